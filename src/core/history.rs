//! State transition history tracking.
//!
//! Every machine keeps a bounded record of the transitions it performed,
//! whether driven by an event or by an unconditional jump.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::time::Duration;

/// Record of a single state change.
///
/// # Example
///
/// ```rust
/// use stateworker::TransitionRecord;
/// use chrono::Utc;
///
/// let record = TransitionRecord {
///     from: "IDLE".to_string(),
///     to: "PRE_PROCESS".to_string(),
///     event: Some("moveIn".to_string()),
///     timestamp: Utc::now(),
/// };
/// assert!(!record.is_jump());
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TransitionRecord {
    /// The state being left (`"NULL"` for the very first jump)
    pub from: String,
    /// The state being entered
    pub to: String,
    /// Triggering event, `None` for `change_state` jumps
    pub event: Option<String>,
    /// When the change was applied
    pub timestamp: DateTime<Utc>,
}

impl TransitionRecord {
    /// Whether this record came from `change_state` rather than an event.
    pub fn is_jump(&self) -> bool {
        self.event.is_none()
    }
}

/// Ordered, bounded history of transitions.
///
/// `record` returns a new history and leaves the receiver untouched. Once
/// `capacity` records are held, the oldest one is dropped.
///
/// # Example
///
/// ```rust
/// use stateworker::{StateHistory, TransitionRecord};
/// use chrono::Utc;
///
/// let history = StateHistory::with_capacity(8);
/// let history = history.record(TransitionRecord {
///     from: "IDLE".to_string(),
///     to: "PRE_PROCESS".to_string(),
///     event: Some("moveIn".to_string()),
///     timestamp: Utc::now(),
/// });
/// let history = history.record(TransitionRecord {
///     from: "PRE_PROCESS".to_string(),
///     to: "PROCESSING".to_string(),
///     event: Some("trackIn".to_string()),
///     timestamp: Utc::now(),
/// });
///
/// assert_eq!(history.path(), vec!["IDLE", "PRE_PROCESS", "PROCESSING"]);
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct StateHistory {
    capacity: usize,
    records: VecDeque<TransitionRecord>,
}

impl Default for StateHistory {
    fn default() -> Self {
        Self::with_capacity(crate::machine::DEFAULT_HISTORY_CAPACITY)
    }
}

impl StateHistory {
    /// Create an empty history holding at most `capacity` records.
    ///
    /// A capacity of zero records nothing.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            capacity,
            records: VecDeque::with_capacity(capacity.min(64)),
        }
    }

    /// Record a transition, returning a new history.
    pub fn record(&self, record: TransitionRecord) -> Self {
        let mut next = self.clone();
        next.push(record);
        next
    }

    /// Append `record` in place, evicting the oldest entries past capacity.
    pub(crate) fn push(&mut self, record: TransitionRecord) {
        if self.capacity == 0 {
            return;
        }
        while self.records.len() >= self.capacity {
            self.records.pop_front();
        }
        self.records.push_back(record);
    }

    /// Names of the states traversed: the first `from`, then every `to`.
    pub fn path(&self) -> Vec<&str> {
        let mut path = Vec::with_capacity(self.records.len() + 1);
        if let Some(first) = self.records.front() {
            path.push(first.from.as_str());
        }
        path.extend(self.records.iter().map(|r| r.to.as_str()));
        path
    }

    /// Time elapsed between the first and last retained record.
    ///
    /// Returns `None` when the history is empty.
    pub fn duration(&self) -> Option<Duration> {
        let (first, last) = (self.records.front()?, self.records.back()?);
        last.timestamp
            .signed_duration_since(first.timestamp)
            .to_std()
            .ok()
    }

    /// Most recent record.
    pub fn last(&self) -> Option<&TransitionRecord> {
        self.records.back()
    }

    /// Retained records, oldest first.
    pub fn records(&self) -> impl Iterator<Item = &TransitionRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}
