//! Builder API for ergonomic machine construction.
//!
//! This module provides fluent builders for wiring states, events and
//! actions into an [`Fsm`](crate::effects::Fsm) by hand. Data-driven
//! construction lives in [`crate::topology`].

pub mod error;
pub mod machine;
pub mod transition;

pub use error::BuildError;
pub use machine::FsmBuilder;
pub use transition::TransitionBuilder;

use crate::core::{Event, StateRef};
use crate::effects::{Action, Transition};

/// Create a transition whose action just logs the event.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use tcp_fsm::builder::log_transition;
/// use tcp_fsm::core::{Event, State};
///
/// let time_wait = Arc::new(State::new("TIME_WAIT"));
/// let closed = Arc::new(State::new("CLOSED"));
///
/// let transition = log_transition(&time_wait, &Event::new("TIMEOUT"), &closed);
/// assert_eq!(transition.to.name(), "CLOSED");
/// ```
pub fn log_transition(from: &StateRef, event: &Event, to: &StateRef) -> Transition {
    Transition::new(from, event, to, Action::Log)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::State;
    use std::sync::Arc;

    #[test]
    fn log_transition_builds() {
        let listen: StateRef = Arc::new(State::new("LISTEN"));
        let syn_rcvd: StateRef = Arc::new(State::new("SYN_RCVD"));
        let syn = Event::new("SYN");

        let transition = log_transition(&listen, &syn, &syn_rcvd);

        assert!(transition.can_fire(&listen, &syn));
        assert!(matches!(transition.action, Action::Log));
    }
}
