//! Build errors for machines and transitions.

use thiserror::Error;

/// Errors that can occur while assembling a machine.
///
/// All of these describe a malformed topology and are fatal at setup time.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BuildError {
    #[error("Initial state not specified. Call .initial(state) before .build()")]
    MissingInitialState,

    #[error("No transitions defined. Add at least one transition")]
    NoTransitions,

    #[error("Transition source state not specified. Call .from(state)")]
    MissingFromState,

    #[error("Transition event not specified. Call .on(event)")]
    MissingEvent,

    #[error("Transition target state not specified. Call .to(state)")]
    MissingToState,

    #[error("Transition action not specified. Call .action(action) or .logs()")]
    MissingAction,

    #[error("Duplicate transition from state '{state}' on event '{event}'")]
    DuplicateTransition { state: String, event: String },

    #[error("State '{name}' is already registered as a different instance")]
    ConflictingState { name: String },
}
