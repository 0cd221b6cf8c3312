//! Side effects executed when a transition fires.

use crate::core::{DataCounters, Direction, Event, State};
use crate::effects::machine::Fsm;
use std::fmt;
use std::sync::Arc;

/// Observable result of one action execution.
///
/// Each notice renders as exactly one output line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Notice {
    /// A plain state change was logged
    EventReceived { event: String, state: String },

    /// A data counter was bumped to `count`
    Data { direction: Direction, count: u64 },
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EventReceived { event, state } => {
                write!(f, "Event {event} received, current State is {state}")
            }
            Self::Data { direction, count } => write!(f, "DATA {direction} {count}"),
        }
    }
}

/// The behavior attached to a transition.
///
/// Actions run synchronously, exactly once per firing transition, after the
/// table lookup succeeds and before the machine advances. They only get a
/// shared borrow of the machine, so they can read the current state but
/// never move it.
#[derive(Clone, Debug)]
pub enum Action {
    /// Report the event and the pre-transition state name.
    Log,

    /// Increment one of a state's data counters and report the new count.
    Count {
        direction: Direction,
        counters: Arc<DataCounters>,
    },
}

impl Action {
    /// Counting action for `direction` over `state`'s counters.
    ///
    /// Returns `None` if `state` carries no counters.
    pub fn counting(direction: Direction, state: &State) -> Option<Self> {
        state.counters().map(|counters| Self::Count {
            direction,
            counters: Arc::clone(counters),
        })
    }

    pub fn receive(state: &State) -> Option<Self> {
        Self::counting(Direction::Receive, state)
    }

    pub fn send(state: &State) -> Option<Self> {
        Self::counting(Direction::Send, state)
    }

    /// Run the action for `event` against `machine`.
    pub fn execute(&self, machine: &Fsm, event: &Event) -> Notice {
        match self {
            Self::Log => Notice::EventReceived {
                event: event.name().to_string(),
                state: machine.current_state().name().to_string(),
            },
            Self::Count {
                direction,
                counters,
            } => Notice::Data {
                direction: *direction,
                count: counters.increment(*direction),
            },
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Log => f.write_str("log"),
            Self::Count { direction, .. } => write!(f, "count {direction}"),
        }
    }
}
