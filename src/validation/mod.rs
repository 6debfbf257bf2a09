//! Setup-time validation of state names.
//!
//! Handlers name their next state with a plain string, so a typo only shows
//! up when the event first fires. Validation catches the cases that are
//! knowable up front, and reports ALL of them at once using Stillwater's
//! `Validation` instead of stopping at the first one:
//!
//! - targets declared with [`State::add_transition`](crate::State::add_transition)
//! - state names used as listener keys
//!
//! # Example
//!
//! ```rust
//! use stateworker::StateMachine;
//!
//! let mut machine: StateMachine<(), ()> = StateMachine::new("FOUP");
//! machine.register("IDLE").add_transition("moveIn", "PRE_PROCES");
//! machine.add_state_in_listener("PROCESING", |_| {});
//!
//! let result = machine.validate();
//! assert!(result.is_failure());
//! ```

mod violations;

pub use violations::{ConfigViolation, ListenerKind};

use crate::machine::StateMachine;
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;

impl<C, A> StateMachine<C, A> {
    /// Check every statically known state name against the registry.
    ///
    /// Never mutates the machine.
    pub fn validate(&self) -> Validation<(), NonEmptyVec<ConfigViolation>> {
        let mut checks: Vec<Validation<(), NonEmptyVec<ConfigViolation>>> = Vec::new();

        for state in self.states() {
            for (event, target) in state.declared_targets() {
                if !self.contains_state(target) {
                    checks.push(Validation::fail(ConfigViolation::UnknownTarget {
                        state: state.name().to_string(),
                        event: event.to_string(),
                        target: target.to_string(),
                    }));
                }
            }
        }

        let listeners = &self.listeners;
        let keyed = listeners
            .state_in
            .keys()
            .map(|s| (ListenerKind::StateIn, s))
            .chain(listeners.state_out.keys().map(|s| (ListenerKind::StateOut, s)))
            .chain(
                listeners
                    .transition_keys()
                    .flat_map(|(from, to)| [from, to])
                    .map(|s| (ListenerKind::Transition, s)),
            );
        for (kind, state) in keyed {
            if !self.contains_state(state) {
                checks.push(Validation::fail(ConfigViolation::UnknownListenerState {
                    kind,
                    state: state.clone(),
                }));
            }
        }

        Validation::all_vec(checks).map(|_| ())
    }
}
