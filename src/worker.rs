//! A controller bound to its own state machine.
//!
//! Implement [`StateWorker`] on the type that owns the domain logic, then wrap
//! it in a [`Worker`]. The worker calls [`StateWorker::initial`] exactly once
//! while being constructed and passes the controller to every handler.
//!
//! # Example
//!
//! ```rust
//! use stateworker::{RunResult, StateMachine, StateWorker, Worker};
//!
//! struct Door;
//!
//! impl StateWorker for Door {
//!     type Args = ();
//!
//!     fn initial(&self, machine: &mut StateMachine<Self, ()>) {
//!         machine.register("CLOSED").add_transition("open", "OPEN");
//!         machine.register("OPEN").add_transition("close", "CLOSED");
//!     }
//! }
//!
//! let mut door = Worker::new("door", Door);
//! door.change_state("CLOSED").unwrap();
//! assert_eq!(door.run("open", &()).unwrap(), RunResult::StateChanged);
//! assert_eq!(door.curr_state(), "OPEN");
//! ```

use crate::core::{EventContext, RunResult};
use crate::machine::{MachineConfig, StateError, StateMachine};

/// Setup hook for a controller driven by a [`Worker`].
pub trait StateWorker: Sized + 'static {
    /// Argument type passed through `run` to handlers and listeners.
    type Args: 'static;

    /// Register states, handlers and listeners.
    ///
    /// Called once, before any event can be dispatched.
    fn initial(&self, machine: &mut StateMachine<Self, Self::Args>);
}

/// A controller together with the machine it drives.
pub struct Worker<W: StateWorker> {
    controller: W,
    machine: StateMachine<W, W::Args>,
}

impl<W: StateWorker> Worker<W> {
    pub fn new(name: impl Into<String>, controller: W) -> Self {
        Self::with_config(name, controller, MachineConfig::default())
    }

    pub fn with_config(name: impl Into<String>, controller: W, config: MachineConfig) -> Self {
        let mut machine = StateMachine::with_config(name, config);
        controller.initial(&mut machine);
        tracing::debug!(
            machine = %machine.name(),
            states = machine.state_names().count(),
            "worker initialised"
        );
        Self {
            controller,
            machine,
        }
    }

    /// Dispatch `event` with this worker's controller.
    pub fn run(&mut self, event: &str, args: &W::Args) -> Result<RunResult, StateError> {
        self.machine.run(&self.controller, event, args)
    }

    pub fn change_state(&mut self, name: &str) -> Result<(), StateError> {
        self.machine.change_state(name)
    }

    /// Name of the current state.
    pub fn curr_state(&self) -> &str {
        self.machine.curr_state().name()
    }

    /// Name of the previous state.
    pub fn prev_state(&self) -> &str {
        self.machine.prev_state().name()
    }

    pub fn add_event_listener<F>(&mut self, event: impl Into<String>, callback: F) -> &mut Self
    where
        F: Fn(&EventContext<'_, W::Args>) + Send + Sync + 'static,
    {
        self.machine.add_event_listener(event, callback);
        self
    }

    pub fn add_state_in_listener<F>(&mut self, state: impl Into<String>, callback: F) -> &mut Self
    where
        F: Fn(&EventContext<'_, W::Args>) + Send + Sync + 'static,
    {
        self.machine.add_state_in_listener(state, callback);
        self
    }

    pub fn add_state_out_listener<F>(&mut self, state: impl Into<String>, callback: F) -> &mut Self
    where
        F: Fn(&EventContext<'_, W::Args>) + Send + Sync + 'static,
    {
        self.machine.add_state_out_listener(state, callback);
        self
    }

    pub fn add_state_changed_listener<F>(
        &mut self,
        from: impl Into<String>,
        to: impl Into<String>,
        callback: F,
    ) -> &mut Self
    where
        F: Fn(&EventContext<'_, W::Args>) + Send + Sync + 'static,
    {
        self.machine.add_state_changed_listener(from, to, callback);
        self
    }

    pub fn controller(&self) -> &W {
        &self.controller
    }

    pub fn controller_mut(&mut self) -> &mut W {
        &mut self.controller
    }

    pub fn machine(&self) -> &StateMachine<W, W::Args> {
        &self.machine
    }

    pub fn machine_mut(&mut self) -> &mut StateMachine<W, W::Args> {
        &mut self.machine
    }
}
