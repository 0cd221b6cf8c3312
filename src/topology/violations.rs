//! Topology violations.

use thiserror::Error;

/// Problems found while validating a [`TopologySpec`](super::TopologySpec).
///
/// Transition indices are 0-based positions in `TopologySpec::transitions`.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum Violation {
    #[error("Initial state '{name}' is not declared")]
    UnknownInitialState { name: String },

    #[error("State '{name}' is declared more than once")]
    DuplicateState { name: String },

    #[error("Event '{name}' is declared more than once")]
    DuplicateEvent { name: String },

    #[error("Transition {index} references undeclared state '{name}'")]
    UnknownState { index: usize, name: String },

    #[error("Transition {index} references undeclared event '{name}'")]
    UnknownEvent { index: usize, name: String },

    #[error("Transition {index} duplicates the edge from '{state}' on '{event}'")]
    DuplicateTransition {
        index: usize,
        state: String,
        event: String,
    },

    #[error("Transition {index} counts data on state '{state}', which carries no counters")]
    CounterTargetWithoutCounters { index: usize, state: String },
}
