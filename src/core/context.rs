//! Values exchanged between the machine and its observers.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Event arguments delivered to every listener.
///
/// Borrowed from the caller of [`StateMachine::run`](crate::StateMachine::run)
/// for the duration of one dispatch.
#[derive(Debug)]
pub struct EventContext<'a, A> {
    /// Name of the event being dispatched.
    pub event_name: &'a str,
    /// Caller-supplied value passed to `run`.
    pub value: &'a A,
}

impl<'a, A> EventContext<'a, A> {
    pub fn new(event_name: &'a str, value: &'a A) -> Self {
        Self { event_name, value }
    }
}

impl<A> Clone for EventContext<'_, A> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<A> Copy for EventContext<'_, A> {}

/// Outcome of one [`StateMachine::run`](crate::StateMachine::run) call.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RunResult {
    /// The current state has no handler for the event. Nothing happened.
    EventNotSupport,

    /// The handler ran and the machine stayed in the current state.
    StateKeep,

    /// The handler ran and the machine moved to another state.
    StateChanged,
}

impl RunResult {
    /// Stable upper-case code, e.g. `"STATE_CHANGED"`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::EventNotSupport => "EVENT_NOT_SUPPORT",
            Self::StateKeep => "STATE_KEEP",
            Self::StateChanged => "STATE_CHANGED",
        }
    }

    /// Whether a handler was found for the event.
    pub fn is_handled(&self) -> bool {
        !matches!(self, Self::EventNotSupport)
    }
}

impl fmt::Display for RunResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}
