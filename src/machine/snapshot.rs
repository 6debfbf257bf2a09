//! Serializable diagnostic dump of a machine.

use crate::core::StateHistory;
use crate::machine::dispatch::StateMachine;
use crate::machine::error::StateError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Point-in-time view of a machine, without its handlers and listeners.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MachineSnapshot {
    pub machine: String,
    pub current: String,
    pub previous: String,
    /// Registered event names per state, sorted.
    pub states: BTreeMap<String, Vec<String>>,
    pub history: StateHistory,
}

impl MachineSnapshot {
    /// Render as pretty-printed JSON.
    pub fn to_json(&self) -> Result<String, StateError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl<C, A> StateMachine<C, A> {
    /// Capture names, pointers and history for diagnostics.
    pub fn snapshot(&self) -> MachineSnapshot {
        let states: BTreeMap<String, Vec<String>> = self
            .states()
            .map(|state| {
                let events: Vec<String> = state.event_names().into_iter().map(str::to_string).collect();
                (state.name().to_string(), events)
            })
            .collect();

        MachineSnapshot {
            machine: self.name().to_string(),
            current: self.curr_state().name().to_string(),
            previous: self.prev_state().name().to_string(),
            states,
            history: self.history().clone(),
        }
    }
}
