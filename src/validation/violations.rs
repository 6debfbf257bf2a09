//! Configuration problems reported by validation.

use std::fmt;
use thiserror::Error;

/// Which listener registry a violation was found in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListenerKind {
    StateIn,
    StateOut,
    Transition,
}

impl fmt::Display for ListenerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::StateIn => "state-in",
            Self::StateOut => "state-out",
            Self::Transition => "transition",
        })
    }
}

/// A name that points at no registered state.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigViolation {
    #[error("State '{state}' moves to unregistered state '{target}' on event '{event}'")]
    UnknownTarget {
        state: String,
        event: String,
        target: String,
    },

    #[error("A {kind} listener is attached to unregistered state '{state}'")]
    UnknownListenerState { kind: ListenerKind, state: String },
}
