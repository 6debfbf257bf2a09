//! Errors raised while driving a state machine.

use thiserror::Error;

/// Errors that can occur during `change_state` and `run`.
///
/// Both lookup failures keep the historical message
/// `"Event:<name> not found in StateMachine:<machine>"`, even though the
/// offending name is a state name.
#[derive(Debug, Error)]
pub enum StateError {
    /// `change_state` named a state that was never registered.
    #[error("Event:{name} not found in StateMachine:{machine}")]
    UnknownState { name: String, machine: String },

    /// A handler answered with a state that was never registered.
    #[error("Event:{name} not found in StateMachine:{machine}")]
    UnknownTarget {
        name: String,
        from: String,
        event: String,
        machine: String,
    },

    #[error("Snapshot serialization failed: {0}")]
    Snapshot(#[from] serde_json::Error),
}

impl StateError {
    /// The unregistered name that caused the failure.
    pub fn name(&self) -> Option<&str> {
        match self {
            Self::UnknownState { name, .. } | Self::UnknownTarget { name, .. } => Some(name),
            Self::Snapshot(_) => None,
        }
    }

    /// Name of the machine that raised the error.
    pub fn machine(&self) -> Option<&str> {
        match self {
            Self::UnknownState { machine, .. } | Self::UnknownTarget { machine, .. } => {
                Some(machine)
            }
            Self::Snapshot(_) => None,
        }
    }
}
