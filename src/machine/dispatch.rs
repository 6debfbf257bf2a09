//! The state machine: state registry, pointers and listener dispatch.

use crate::core::{EventContext, RunResult, State, StateHistory, TransitionRecord};
use crate::machine::config::MachineConfig;
use crate::machine::error::StateError;
use crate::machine::listeners::Listeners;
use chrono::Utc;
use std::collections::BTreeMap;
use std::fmt;

/// Name of the placeholder state reported before the first change.
pub const NULL_STATE: &str = "NULL";

/// A named finite state machine driven by events.
///
/// `C` is the controller handed to every handler and `A` the argument type
/// passed through `run` to handlers and listeners.
///
/// # Example
///
/// ```rust
/// use stateworker::{RunResult, StateMachine};
///
/// let mut machine: StateMachine<(), ()> = StateMachine::new("FOUP");
/// machine.register("IDLE").add_transition("moveIn", "PRE_PROCESS");
/// machine.register("PRE_PROCESS");
///
/// machine.change_state("IDLE").unwrap();
/// assert_eq!(machine.prev_state().name(), "NULL");
///
/// let result = machine.run(&(), "moveIn", &()).unwrap();
/// assert_eq!(result, RunResult::StateChanged);
/// assert_eq!(machine.curr_state().name(), "PRE_PROCESS");
/// assert_eq!(machine.prev_state().name(), "IDLE");
/// ```
pub struct StateMachine<C, A> {
    name: String,
    config: MachineConfig,
    states: BTreeMap<String, State<C, A>>,
    sentinel: State<C, A>,
    // `None` points at the sentinel.
    current: Option<String>,
    previous: Option<String>,
    pub(crate) listeners: Listeners<A>,
    history: StateHistory,
}

impl<C: 'static, A: 'static> StateMachine<C, A> {
    /// Create an empty machine with default settings.
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_config(name, MachineConfig::default())
    }

    /// Create an empty machine with explicit settings.
    pub fn with_config(name: impl Into<String>, config: MachineConfig) -> Self {
        let history = StateHistory::with_capacity(config.history_capacity);
        Self {
            name: name.into(),
            config,
            states: BTreeMap::new(),
            sentinel: State::new(NULL_STATE),
            current: None,
            previous: None,
            listeners: Listeners::new(),
            history,
        }
    }

    /// Return the state called `name`, creating it on first use.
    ///
    /// Registering the same name again hands back the existing state, so
    /// handlers added across several calls accumulate.
    pub fn register(&mut self, name: impl Into<String>) -> &mut State<C, A> {
        let name = name.into();
        self.states
            .entry(name)
            .or_insert_with_key(|name| State::new(name.as_str()))
    }

    /// Jump to `name` without consulting handlers or firing listeners.
    pub fn change_state(&mut self, name: &str) -> Result<(), StateError> {
        if !self.states.contains_key(name) {
            return Err(StateError::UnknownState {
                name: name.to_string(),
                machine: self.name.clone(),
            });
        }

        let from = self.curr_state().name().to_string();
        self.apply(name, None);

        if self.config.trace {
            tracing::info!(machine = %self.name, from = %from, to = %name, "state changed");
        } else {
            tracing::trace!(machine = %self.name, from = %from, to = %name, "state changed");
        }
        Ok(())
    }

    /// Dispatch `event` to the handler of the current state.
    ///
    /// On a transition from `A` to `B` the listeners fire in this order:
    /// state-out of `A`, transition `(A, B)`, state-in of `B`, then, after the
    /// pointers moved, the listeners of `event`. When the handler keeps the
    /// current state only the event listeners fire.
    ///
    /// A handler naming an unregistered state is a configuration error and
    /// leaves the machine untouched.
    pub fn run(&mut self, controller: &C, event: &str, args: &A) -> Result<RunResult, StateError> {
        let from = self.curr_state().name().to_string();

        let Some(handler) = self.curr_state().handler(event) else {
            self.trace_run(&from, event, &from, RunResult::EventNotSupport);
            return Ok(RunResult::EventNotSupport);
        };

        let ctx = EventContext::new(event, args);
        let next = match handler(controller, args) {
            Some(next) if next != from => next,
            _ => {
                let fired = self.listeners.event.fire(event, &ctx);
                tracing::trace!(machine = %self.name, event = %event, fired, "event listeners");
                self.trace_run(&from, event, &from, RunResult::StateKeep);
                return Ok(RunResult::StateKeep);
            }
        };

        if !self.states.contains_key(&next) {
            tracing::debug!(
                machine = %self.name,
                from = %from,
                event = %event,
                to = %next,
                "handler named an unregistered state"
            );
            return Err(StateError::UnknownTarget {
                name: next,
                from,
                event: event.to_string(),
                machine: self.name.clone(),
            });
        }

        let mut fired = self.listeners.state_out.fire(from.as_str(), &ctx);
        fired += self.listeners.fire_transition(&from, &next, &ctx);
        fired += self.listeners.state_in.fire(next.as_str(), &ctx);

        self.apply(&next, Some(event));

        fired += self.listeners.event.fire(event, &ctx);
        tracing::trace!(machine = %self.name, event = %event, fired, "transition listeners");

        self.trace_run(&from, event, &next, RunResult::StateChanged);
        Ok(RunResult::StateChanged)
    }

    /// Fire `callback` whenever a handler for `event` runs.
    pub fn add_event_listener<F>(&mut self, event: impl Into<String>, callback: F) -> &mut Self
    where
        F: Fn(&EventContext<'_, A>) + Send + Sync + 'static,
    {
        self.listeners.event.add(event.into(), Box::new(callback));
        self
    }

    /// Fire `callback` whenever an event moves the machine into `state`.
    pub fn add_state_in_listener<F>(&mut self, state: impl Into<String>, callback: F) -> &mut Self
    where
        F: Fn(&EventContext<'_, A>) + Send + Sync + 'static,
    {
        self.listeners.state_in.add(state.into(), Box::new(callback));
        self
    }

    /// Fire `callback` whenever an event moves the machine out of `state`.
    pub fn add_state_out_listener<F>(&mut self, state: impl Into<String>, callback: F) -> &mut Self
    where
        F: Fn(&EventContext<'_, A>) + Send + Sync + 'static,
    {
        self.listeners.state_out.add(state.into(), Box::new(callback));
        self
    }

    /// Fire `callback` whenever an event moves the machine from `from` to `to`.
    pub fn add_state_changed_listener<F>(
        &mut self,
        from: impl Into<String>,
        to: impl Into<String>,
        callback: F,
    ) -> &mut Self
    where
        F: Fn(&EventContext<'_, A>) + Send + Sync + 'static,
    {
        self.listeners
            .add_transition(from.into(), to.into(), Box::new(callback));
        self
    }

    /// Alias of [`StateMachine::add_state_changed_listener`].
    pub fn add_change_listener<F>(
        &mut self,
        from: impl Into<String>,
        to: impl Into<String>,
        callback: F,
    ) -> &mut Self
    where
        F: Fn(&EventContext<'_, A>) + Send + Sync + 'static,
    {
        self.add_state_changed_listener(from, to, callback)
    }

    fn apply(&mut self, to: &str, event: Option<&str>) {
        let from = self.current.replace(to.to_string());
        let record = TransitionRecord {
            from: from.as_deref().unwrap_or(NULL_STATE).to_string(),
            to: to.to_string(),
            event: event.map(str::to_string),
            timestamp: Utc::now(),
        };
        self.previous = from;
        self.history.push(record);
    }

    fn trace_run(&self, from: &str, event: &str, to: &str, result: RunResult) {
        if self.config.trace {
            tracing::info!(
                machine = %self.name,
                from = %from,
                event = %event,
                to = %to,
                result = %result,
                "run"
            );
        } else {
            tracing::trace!(
                machine = %self.name,
                from = %from,
                event = %event,
                to = %to,
                result = %result,
                "run"
            );
        }
    }
}

impl<C, A> StateMachine<C, A> {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn config(&self) -> &MachineConfig {
        &self.config
    }

    /// The registered state called `name`, if any.
    pub fn state(&self, name: &str) -> Option<&State<C, A>> {
        self.states.get(name)
    }

    pub fn contains_state(&self, name: &str) -> bool {
        self.states.contains_key(name)
    }

    /// Registered state names, sorted.
    pub fn state_names(&self) -> impl Iterator<Item = &str> {
        self.states.keys().map(String::as_str)
    }

    pub(crate) fn states(&self) -> impl Iterator<Item = &State<C, A>> {
        self.states.values()
    }

    /// Current state; the `"NULL"` placeholder until the first change.
    pub fn curr_state(&self) -> &State<C, A> {
        self.resolve(self.current.as_deref())
    }

    /// Previous state; the `"NULL"` placeholder until the second change.
    pub fn prev_state(&self) -> &State<C, A> {
        self.resolve(self.previous.as_deref())
    }

    pub fn history(&self) -> &StateHistory {
        &self.history
    }

    fn resolve(&self, name: Option<&str>) -> &State<C, A> {
        // States are never removed, so a stored name always resolves.
        name.and_then(|name| self.states.get(name))
            .unwrap_or(&self.sentinel)
    }
}

impl<C, A> fmt::Display for StateMachine<C, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} -> {}",
            self.name,
            self.prev_state().name(),
            self.curr_state().name()
        )
    }
}

impl<C, A> fmt::Debug for StateMachine<C, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StateMachine")
            .field("name", &self.name)
            .field("current", &self.curr_state().name())
            .field("previous", &self.prev_state().name())
            .field("states", &self.states.keys().collect::<Vec<_>>())
            .field("listeners", &self.listeners.count())
            .field("config", &self.config)
            .finish()
    }
}
