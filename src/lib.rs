//! Stateworker: an in-memory finite state machine with layered listeners
//!
//! A machine moves a named entity (a piece of equipment, a lot, a job)
//! through named states. Each (state, event) pair maps to a handler that
//! names the next state or keeps the current one. Observers can be attached
//! to an event, to entering or leaving a state, and to a specific transition.
//!
//! # Core Concepts
//!
//! - **State**: a named node with its event handlers ([`State`])
//! - **Machine**: registry, pointers and dispatch ([`StateMachine`])
//! - **Listeners**: event, state-in, state-out and transition observers
//! - **Worker**: a controller bound to its own machine ([`Worker`])
//!
//! # Example
//!
//! ```rust
//! use stateworker::{RunResult, StateMachine};
//! use std::sync::{Arc, Mutex};
//!
//! let mut machine: StateMachine<(), ()> = StateMachine::new("FOUP");
//! machine
//!     .register("IDLE")
//!     .add_event("validateLot", |_, _| None::<&str>)
//!     .add_transition("moveIn", "PRE_PROCESS");
//! machine.register("PRE_PROCESS");
//!
//! let entered = Arc::new(Mutex::new(Vec::new()));
//! let sink = Arc::clone(&entered);
//! machine.add_state_in_listener("PRE_PROCESS", move |ctx| {
//!     sink.lock().unwrap().push(ctx.event_name.to_string());
//! });
//!
//! machine.change_state("IDLE").unwrap();
//! assert_eq!(machine.run(&(), "validateLot", &()).unwrap(), RunResult::StateKeep);
//! assert_eq!(machine.run(&(), "trackIn", &()).unwrap(), RunResult::EventNotSupport);
//! assert_eq!(machine.run(&(), "moveIn", &()).unwrap(), RunResult::StateChanged);
//! assert_eq!(*entered.lock().unwrap(), vec!["moveIn".to_string()]);
//! ```

pub mod core;
pub mod machine;
pub mod validation;
pub mod worker;

// Re-export commonly used types
pub use crate::core::{EventContext, Handler, RunResult, State, StateHistory, TransitionRecord};
pub use machine::{MachineConfig, MachineSnapshot, StateError, StateMachine, NULL_STATE};
pub use validation::{ConfigViolation, ListenerKind};
pub use worker::{StateWorker, Worker};
