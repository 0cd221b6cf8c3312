//! The simplified TCP connection lifecycle.
//!
//! Eleven states and ten events, with the data-transfer self loops on
//! `ESTABLISHED` counting received and sent data in that state's counters.

use crate::topology::{Topology, TopologyError, TopologySpec};

/// Bundled topology source.
pub const TCP_TOPOLOGY: &str = include_str!("../../topologies/tcp.json");

/// Parse the bundled TCP topology.
pub fn spec() -> Result<TopologySpec, TopologyError> {
    TopologySpec::from_json(TCP_TOPOLOGY)
}

/// Assemble a fresh TCP machine sitting in `CLOSED`.
///
/// # Example
///
/// ```rust
/// use tcp_fsm::topology::tcp;
///
/// let mut topology = tcp::topology().unwrap();
/// let passive = topology.events().resolve("PASSIVE").unwrap().clone();
///
/// let notice = topology.fsm_mut().do_event(&passive).unwrap();
/// assert_eq!(notice.to_string(), "Event PASSIVE received, current State is CLOSED");
/// assert_eq!(topology.fsm().current_state().name(), "LISTEN");
/// ```
pub fn topology() -> Result<Topology, TopologyError> {
    spec()?.assemble()
}
