//! Dispatch history tracking.
//!
//! When a machine's trace is switched on, every fired transition is recorded
//! here as an immutable value, in dispatch order.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Record of a single fired transition.
///
/// # Example
///
/// ```rust
/// use tcp_fsm::core::StateTransition;
/// use chrono::Utc;
///
/// let transition = StateTransition {
///     from: "CLOSED".to_string(),
///     event: "PASSIVE".to_string(),
///     to: "LISTEN".to_string(),
///     timestamp: Utc::now(),
///     sequence: 1,
/// };
/// assert_eq!(transition.to, "LISTEN");
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StateTransition {
    /// Name of the state the machine was in
    pub from: String,
    /// Name of the event that fired the transition
    pub event: String,
    /// Name of the state the machine moved to
    pub to: String,
    /// When the transition fired
    pub timestamp: DateTime<Utc>,
    /// 1-based position of this transition in the trace
    pub sequence: usize,
}

/// Ordered history of fired transitions.
///
/// History is immutable - the `record` method returns a new history
/// with the transition added.
///
/// # Example
///
/// ```rust
/// use tcp_fsm::core::{StateHistory, StateTransition};
/// use chrono::Utc;
///
/// let history = StateHistory::new();
///
/// let history = history.record(StateTransition {
///     from: "CLOSED".to_string(),
///     event: "ACTIVE".to_string(),
///     to: "SYN_SENT".to_string(),
///     timestamp: Utc::now(),
///     sequence: 1,
/// });
///
/// let history = history.record(StateTransition {
///     from: "SYN_SENT".to_string(),
///     event: "SYNACK".to_string(),
///     to: "ESTABLISHED".to_string(),
///     timestamp: Utc::now(),
///     sequence: 2,
/// });
///
/// assert_eq!(history.get_path(), vec!["CLOSED", "SYN_SENT", "ESTABLISHED"]);
/// assert_eq!(history.events(), vec!["ACTIVE", "SYNACK"]);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct StateHistory {
    transitions: Vec<StateTransition>,
}

impl StateHistory {
    /// Create a new empty history.
    pub fn new() -> Self {
        Self {
            transitions: Vec::new(),
        }
    }

    /// Record a transition, returning a new history.
    ///
    /// The existing history is left untouched.
    pub fn record(&self, transition: StateTransition) -> Self {
        let mut transitions = self.transitions.clone();
        transitions.push(transition);
        Self { transitions }
    }

    /// Append a transition in place.
    pub(crate) fn push(&mut self, transition: StateTransition) {
        self.transitions.push(transition);
    }

    /// Get the path of state names traversed.
    ///
    /// Returns the initial `from` state, then the `to` state of each
    /// transition. Empty when nothing has been recorded.
    pub fn get_path(&self) -> Vec<&str> {
        let mut path = Vec::new();
        if let Some(first) = self.transitions.first() {
            path.push(first.from.as_str());
        }
        for transition in &self.transitions {
            path.push(transition.to.as_str());
        }
        path
    }

    /// Names of the events that fired, in order.
    pub fn events(&self) -> Vec<&str> {
        self.transitions.iter().map(|t| t.event.as_str()).collect()
    }

    /// Calculate total duration from first to last transition.
    ///
    /// Returns `None` if there are no transitions.
    pub fn duration(&self) -> Option<Duration> {
        if let (Some(first), Some(last)) = (self.transitions.first(), self.transitions.last()) {
            let duration = last.timestamp.signed_duration_since(first.timestamp);
            duration.to_std().ok()
        } else {
            None
        }
    }

    /// Get all transitions.
    pub fn transitions(&self) -> &[StateTransition] {
        &self.transitions
    }

    pub fn len(&self) -> usize {
        self.transitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transitions.is_empty()
    }
}
