//! tcp-fsm: a table-driven finite state machine engine
//!
//! The engine is generic: states, events and the transition table are plain
//! runtime data, and each transition carries an action that runs when it
//! fires. The crate ships one wiring of it, a simplified TCP connection
//! lifecycle, as a JSON topology.
//!
//! # Core Concepts
//!
//! - **State**: a named node, optionally owning data counters
//! - **Event**: a named stimulus
//! - **Transition**: `(from, event) -> to` plus an [`Action`]
//! - **Fsm**: the transition table and the current state
//! - **Topology**: a serde description of an automaton, validated and
//!   assembled into an `Fsm`
//!
//! # Example
//!
//! ```rust
//! use tcp_fsm::session::Session;
//! use tcp_fsm::topology::tcp;
//!
//! let mut session = Session::new(tcp::topology().unwrap(), Vec::new());
//! let stats = session.run(["PASSIVE", "SYN", "ACK", "RDATA"]).unwrap();
//!
//! assert_eq!(stats.errors(), 0);
//! assert_eq!(session.current_state().name(), "ESTABLISHED");
//!
//! let output = String::from_utf8(session.into_output()).unwrap();
//! assert_eq!(output.lines().last(), Some("DATA received 1"));
//! ```

pub mod builder;
pub mod core;
pub mod effects;
pub mod session;
pub mod telemetry;
pub mod topology;

// Re-export commonly used types
pub use builder::{BuildError, FsmBuilder, TransitionBuilder};
pub use core::{DataCounters, Direction, Event, State, StateHistory, StateRef, StateTransition};
pub use effects::{Action, DispatchError, Fsm, Notice, Transition};
pub use session::{Session, SessionError, SessionStats};
pub use topology::{Topology, TopologyError, TopologySpec};
