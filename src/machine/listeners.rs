//! Listener registries keyed by event, state or transition pair.

use crate::core::EventContext;
use std::collections::HashMap;
use std::hash::Hash;

/// Observer callback. Its return value is ignored.
pub type Listener<A> = Box<dyn Fn(&EventContext<'_, A>) + Send + Sync>;

/// Ordered listeners per dispatch key.
pub(crate) struct Registry<K, A> {
    entries: HashMap<K, Vec<Listener<A>>>,
}

impl<K: Eq + Hash, A> Registry<K, A> {
    pub(crate) fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    pub(crate) fn add(&mut self, key: K, listener: Listener<A>) {
        self.entries.entry(key).or_default().push(listener);
    }

    /// Invoke every listener for `key` in registration order.
    ///
    /// Returns how many listeners ran.
    pub(crate) fn fire<Q>(&self, key: &Q, ctx: &EventContext<'_, A>) -> usize
    where
        K: std::borrow::Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        let Some(listeners) = self.entries.get(key) else {
            return 0;
        };
        for listener in listeners {
            listener(ctx);
        }
        listeners.len()
    }

    pub(crate) fn keys(&self) -> impl Iterator<Item = &K> {
        self.entries.keys()
    }

    pub(crate) fn count(&self) -> usize {
        self.entries.values().map(Vec::len).sum()
    }
}

/// The four registries a machine dispatches to.
pub(crate) struct Listeners<A> {
    pub(crate) event: Registry<String, A>,
    pub(crate) state_in: Registry<String, A>,
    pub(crate) state_out: Registry<String, A>,
    // from -> to -> listeners
    transition: HashMap<String, Registry<String, A>>,
}

impl<A> Listeners<A> {
    pub(crate) fn new() -> Self {
        Self {
            event: Registry::new(),
            state_in: Registry::new(),
            state_out: Registry::new(),
            transition: HashMap::new(),
        }
    }

    /// Total number of attached listeners.
    pub(crate) fn count(&self) -> usize {
        let transitions: usize = self.transition.values().map(Registry::count).sum();
        self.event.count() + self.state_in.count() + self.state_out.count() + transitions
    }

    pub(crate) fn add_transition(&mut self, from: String, to: String, listener: Listener<A>) {
        self.transition
            .entry(from)
            .or_insert_with(Registry::new)
            .add(to, listener);
    }

    /// Fire the listeners bound to the transition `from -> to`.
    pub(crate) fn fire_transition(&self, from: &str, to: &str, ctx: &EventContext<'_, A>) -> usize {
        self.transition
            .get(from)
            .map_or(0, |targets| targets.fire(to, ctx))
    }

    /// Every `(from, to)` pair with at least one listener.
    pub(crate) fn transition_keys(&self) -> impl Iterator<Item = (&String, &String)> {
        self.transition
            .iter()
            .flat_map(|(from, targets)| targets.keys().map(move |to| (from, to)))
    }
}
