//! Topology loading errors.

use crate::builder::BuildError;
use crate::topology::violations::Violation;
use thiserror::Error;

/// Errors that can occur while loading or assembling a topology.
///
/// Every variant is fatal: the topology is malformed or unreadable.
#[derive(Debug, Error)]
pub enum TopologyError {
    /// Reading the topology file failed
    #[error("Failed to read topology: {0}")]
    Io(#[from] std::io::Error),

    /// The topology is not valid JSON for a `TopologySpec`
    #[error("Failed to parse topology: {0}")]
    Parse(#[from] serde_json::Error),

    /// The topology parsed but is inconsistent
    #[error("Invalid topology: {}", join(.0))]
    Invalid(Vec<Violation>),

    #[error(transparent)]
    Build(#[from] BuildError),
}

fn join(violations: &[Violation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
