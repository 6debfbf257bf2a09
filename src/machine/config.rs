//! Per-machine settings.

use serde::{Deserialize, Serialize};

/// Default number of transitions kept in a machine's history.
pub const DEFAULT_HISTORY_CAPACITY: usize = 64;

/// Settings fixed when a machine is constructed.
///
/// # Example
///
/// ```rust
/// use stateworker::MachineConfig;
///
/// let config = MachineConfig::default()
///     .with_trace(true)
///     .with_history_capacity(16);
/// assert!(config.trace);
/// assert_eq!(config.history_capacity, 16);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MachineConfig {
    /// Emit one INFO trace line per `run`/`change_state` call.
    pub trace: bool,

    /// Transitions retained in history; zero disables recording.
    pub history_capacity: usize,
}

impl Default for MachineConfig {
    fn default() -> Self {
        Self {
            trace: false,
            history_capacity: DEFAULT_HISTORY_CAPACITY,
        }
    }
}

impl MachineConfig {
    pub fn with_trace(mut self, trace: bool) -> Self {
        self.trace = trace;
        self
    }

    pub fn with_history_capacity(mut self, capacity: usize) -> Self {
        self.history_capacity = capacity;
        self
    }
}
