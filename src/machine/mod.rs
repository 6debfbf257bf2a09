//! The state machine engine.
//!
//! Owns the state registry, the current/previous pointers and the four
//! listener registries, and runs the dispatch algorithm:
//!
//! 1. look up the current state's handler for the event
//! 2. ask the handler for the next state
//! 3. on a change, fire state-out, transition and state-in listeners,
//!    move the pointers, then fire the event listeners
//!
//! Everything runs inline on the caller's thread. A machine is meant to be
//! driven by one logical worker at a time.

mod config;
mod dispatch;
mod error;
mod listeners;
mod snapshot;

pub use config::{MachineConfig, DEFAULT_HISTORY_CAPACITY};
pub use dispatch::{StateMachine, NULL_STATE};
pub use error::StateError;
pub use listeners::Listener;
pub use snapshot::MachineSnapshot;
