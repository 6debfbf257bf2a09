//! Core building blocks of a state machine.
//!
//! - [`State`]: a named node owning its event handlers
//! - [`EventContext`] and [`RunResult`]: what listeners and callers observe
//! - [`StateHistory`]: bounded record of applied transitions

mod context;
mod history;
mod state;

pub use context::{EventContext, RunResult};
pub use history::{StateHistory, TransitionRecord};
pub use state::{Handler, State};
