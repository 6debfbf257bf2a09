//! Named states and their event handlers.
//!
//! A [`State`] is plain data: a name plus a map from event name to the
//! [`Handler`] that decides where the machine goes next. States are created
//! through [`StateMachine::register`](crate::StateMachine::register) and
//! configured with the fluent `add_event` API.

use std::collections::HashMap;
use std::fmt;

/// Handler bound to one (state, event) pair.
///
/// Receives the controller and the caller-supplied arguments and returns the
/// name of the next state, or `None` to stay put.
pub type Handler<C, A> = Box<dyn Fn(&C, &A) -> Option<String> + Send + Sync>;

/// A named node in a state machine.
///
/// # Example
///
/// ```rust
/// use stateworker::StateMachine;
///
/// let mut machine: StateMachine<(), ()> = StateMachine::new("FOUP");
/// machine
///     .register("IDLE")
///     .add_event("validateLot", |_, _| None::<String>)
///     .add_transition("moveIn", "PRE_PROCESS");
///
/// let idle = machine.state("IDLE").unwrap();
/// assert!(idle.supports("moveIn"));
/// assert_eq!(idle.declared_target("moveIn"), Some("PRE_PROCESS"));
/// ```
pub struct State<C, A> {
    name: String,
    events: HashMap<String, Handler<C, A>>,
    targets: HashMap<String, String>,
}

impl<C: 'static, A: 'static> State<C, A> {
    pub(crate) fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            events: HashMap::new(),
            targets: HashMap::new(),
        }
    }

    /// Bind `handler` to `event`, replacing any previous binding.
    pub fn add_event<F, N>(&mut self, event: impl Into<String>, handler: F) -> &mut Self
    where
        F: Fn(&C, &A) -> Option<N> + Send + Sync + 'static,
        N: Into<String>,
    {
        let event = event.into();
        // A closure handler has no statically known target.
        self.targets.remove(&event);
        self.events.insert(
            event,
            Box::new(move |c: &C, a: &A| -> Option<String> { handler(c, a).map(Into::into) }),
        );
        self
    }

    /// Bind `event` to an unconditional move to `target`.
    ///
    /// The target is remembered so that
    /// [`StateMachine::validate`](crate::StateMachine::validate) can report it
    /// when no state of that name is registered.
    pub fn add_transition(
        &mut self,
        event: impl Into<String>,
        target: impl Into<String>,
    ) -> &mut Self {
        let event = event.into();
        let target = target.into();
        let next = target.clone();
        self.events
            .insert(event.clone(), Box::new(move |_: &C, _: &A| Some(next.clone())));
        self.targets.insert(event, target);
        self
    }
}

impl<C, A> State<C, A> {
    /// Name of this state.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether this state has a handler for `event`.
    pub fn supports(&self, event: &str) -> bool {
        self.events.contains_key(event)
    }

    /// Registered event names, sorted.
    pub fn event_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.events.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Target declared through [`State::add_transition`] for `event`.
    pub fn declared_target(&self, event: &str) -> Option<&str> {
        self.targets.get(event).map(String::as_str)
    }

    pub(crate) fn declared_targets(&self) -> impl Iterator<Item = (&str, &str)> {
        self.targets
            .iter()
            .map(|(event, target)| (event.as_str(), target.as_str()))
    }

    pub(crate) fn handler(&self, event: &str) -> Option<&Handler<C, A>> {
        self.events.get(event)
    }
}

impl<C, A> fmt::Debug for State<C, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("State")
            .field("name", &self.name)
            .field("events", &self.event_names())
            .finish()
    }
}
