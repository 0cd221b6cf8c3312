//! Automaton states and their optional state-local data.
//!
//! A state is a named node. It may carry a [`DataCounters`] payload that
//! lives exactly as long as the state itself. States are shared through
//! [`StateRef`] handles, and the engine treats two handles as the same node
//! only when they point at the same allocation.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Shared handle to a registered state.
pub type StateRef = Arc<State>;

/// Which data counter an action touches.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Receive,
    Send,
}

impl Direction {
    /// Label used in output lines ("received" / "sent").
    pub fn label(self) -> &'static str {
        match self {
            Self::Receive => "received",
            Self::Send => "sent",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Increment-only data counters owned by a single state.
///
/// # Example
///
/// ```rust
/// use tcp_fsm::core::{DataCounters, Direction};
///
/// let counters = DataCounters::new();
/// assert_eq!(counters.increment(Direction::Receive), 1);
/// assert_eq!(counters.increment(Direction::Receive), 2);
/// assert_eq!(counters.received(), 2);
/// assert_eq!(counters.sent(), 0);
/// ```
#[derive(Debug, Default)]
pub struct DataCounters {
    received: AtomicU64,
    sent: AtomicU64,
}

impl DataCounters {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bump the counter for `direction` by one and return the new value.
    pub fn increment(&self, direction: Direction) -> u64 {
        let counter = match direction {
            Direction::Receive => &self.received,
            Direction::Send => &self.sent,
        };
        counter.fetch_add(1, Ordering::Relaxed) + 1
    }

    pub fn received(&self) -> u64 {
        self.received.load(Ordering::Relaxed)
    }

    pub fn sent(&self) -> u64 {
        self.sent.load(Ordering::Relaxed)
    }

    /// Current value of the counter for `direction`.
    pub fn get(&self, direction: Direction) -> u64 {
        match direction {
            Direction::Receive => self.received(),
            Direction::Send => self.sent(),
        }
    }
}

/// A named node of the automaton.
///
/// The name is unique per automaton and forms half of the transition key.
/// Only states built with [`State::with_counters`] carry data counters.
///
/// # Example
///
/// ```rust
/// use std::sync::Arc;
/// use tcp_fsm::core::State;
///
/// let closed = Arc::new(State::new("CLOSED"));
/// let established = Arc::new(State::with_counters("ESTABLISHED"));
///
/// assert_eq!(closed.name(), "CLOSED");
/// assert!(closed.counters().is_none());
/// assert!(established.counters().is_some());
///
/// // Same name, different instance: not the same node.
/// let other_closed = Arc::new(State::new("CLOSED"));
/// assert!(!State::same(&closed, &other_closed));
/// assert!(State::same(&closed, &Arc::clone(&closed)));
/// ```
#[derive(Debug)]
pub struct State {
    name: String,
    counters: Option<Arc<DataCounters>>,
}

impl State {
    /// Create a plain state with no local data.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            counters: None,
        }
    }

    /// Create a state that owns a fresh pair of data counters.
    pub fn with_counters(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            counters: Some(Arc::new(DataCounters::new())),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Handle to this state's counters, if it has any.
    pub fn counters(&self) -> Option<&Arc<DataCounters>> {
        self.counters.as_ref()
    }

    /// Whether two handles refer to the same registered instance.
    pub fn same(a: &StateRef, b: &StateRef) -> bool {
        Arc::ptr_eq(a, b)
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}
