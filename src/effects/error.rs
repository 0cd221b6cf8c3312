//! Dispatch errors.

use thiserror::Error;

/// Errors reported by [`Fsm::do_event`](crate::effects::Fsm::do_event).
///
/// None of these are fatal: the machine is left exactly as it was.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DispatchError {
    #[error("invalid Event {event} in State {state}")]
    InvalidTransition { state: String, event: String },
}
