//! Topologies as data.
//!
//! A [`TopologySpec`] is the serde form of an automaton: states, events and
//! the transition table, with each transition's action named rather than
//! constructed. Specs are validated with Stillwater's `Validation` so that
//! every problem is reported in one pass, then assembled into a live
//! [`Topology`].
//!
//! # Example
//!
//! ```rust
//! use tcp_fsm::topology::TopologySpec;
//!
//! let spec = TopologySpec::from_json(r#"{
//!     "name": "door",
//!     "initial": "CLOSED",
//!     "states": [{ "name": "CLOSED" }, { "name": "OPEN" }],
//!     "events": [{ "name": "PUSH" }, { "name": "PULL" }],
//!     "transitions": [
//!         { "from": "CLOSED", "event": "PUSH", "to": "OPEN" },
//!         { "from": "OPEN", "event": "PULL", "to": "CLOSED" }
//!     ]
//! }"#).unwrap();
//!
//! let topology = spec.assemble().unwrap();
//! assert_eq!(topology.fsm().transition_count(), 2);
//! assert!(topology.events().resolve("PUSH").is_some());
//! ```

pub mod error;
mod registry;
mod rules;
pub mod tcp;
mod violations;

pub use error::TopologyError;
pub use registry::EventRegistry;
pub use violations::Violation;

use crate::builder::FsmBuilder;
use crate::core::{Direction, Event, State, StateRef};
use crate::effects::{Action, Fsm, Transition};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;
use std::sync::Arc;
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;

/// Serializable description of an automaton.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TopologySpec {
    /// Machine name, for diagnostics
    pub name: String,

    /// Name of the state the machine starts in
    pub initial: String,

    pub states: Vec<StateSpec>,

    pub events: Vec<EventSpec>,

    pub transitions: Vec<TransitionSpec>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StateSpec {
    pub name: String,

    /// Whether the state owns data counters
    #[serde(default, skip_serializing_if = "is_false")]
    pub counters: bool,
}

impl StateSpec {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            counters: false,
        }
    }

    pub fn with_counters(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            counters: true,
        }
    }
}

fn is_false(value: &bool) -> bool {
    !*value
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EventSpec {
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl EventSpec {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
        }
    }

    fn to_event(&self) -> Event {
        let event = Event::new(self.name.clone());
        match &self.description {
            Some(description) => event.with_description(description.clone()),
            None => event,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TransitionSpec {
    pub from: String,
    pub event: String,
    pub to: String,

    #[serde(default, skip_serializing_if = "ActionSpec::is_log")]
    pub action: ActionSpec,
}

/// Named action kinds.
///
/// Counting actions always work on the counters of the transition's
/// source state.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionSpec {
    #[default]
    Log,
    Receive,
    Send,
}

impl ActionSpec {
    fn is_log(&self) -> bool {
        matches!(self, Self::Log)
    }

    /// Counter direction, or `None` for the logging action.
    pub fn direction(self) -> Option<Direction> {
        match self {
            Self::Log => None,
            Self::Receive => Some(Direction::Receive),
            Self::Send => Some(Direction::Send),
        }
    }
}

impl TopologySpec {
    pub fn from_json(json: &str) -> Result<Self, TopologyError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, TopologyError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn to_json(&self) -> Result<String, TopologyError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check the topology, accumulating every violation.
    pub fn validate(&self) -> Validation<(), NonEmptyVec<Violation>> {
        rules::validate(self)
    }

    /// Validate the topology and build the machine and event registry it describes.
    pub fn assemble(&self) -> Result<Topology, TopologyError> {
        if let Validation::Failure(violations) = self.validate() {
            return Err(TopologyError::Invalid(violations.iter().cloned().collect()));
        }

        let states: BTreeMap<&str, StateRef> = self
            .states
            .iter()
            .map(|spec| {
                let state = if spec.counters {
                    State::with_counters(spec.name.clone())
                } else {
                    State::new(spec.name.clone())
                };
                (spec.name.as_str(), Arc::new(state))
            })
            .collect();

        let events: EventRegistry = self.events.iter().map(EventSpec::to_event).collect();

        let mut transitions = Vec::with_capacity(self.transitions.len());
        for (index, spec) in self.transitions.iter().enumerate() {
            let from = lookup_state(&states, index, &spec.from)?;
            let to = lookup_state(&states, index, &spec.to)?;
            let event = events.resolve(&spec.event).ok_or_else(|| {
                TopologyError::Invalid(vec![Violation::UnknownEvent {
                    index,
                    name: spec.event.clone(),
                }])
            })?;
            let action = match spec.action.direction() {
                None => Action::Log,
                Some(direction) => Action::counting(direction, from).ok_or_else(|| {
                    TopologyError::Invalid(vec![Violation::CounterTargetWithoutCounters {
                        index,
                        state: spec.from.clone(),
                    }])
                })?,
            };
            transitions.push(Transition::new(from, event, to, action));
        }

        let initial = states.get(self.initial.as_str()).ok_or_else(|| {
            TopologyError::Invalid(vec![Violation::UnknownInitialState {
                name: self.initial.clone(),
            }])
        })?;

        let fsm = FsmBuilder::new(self.name.clone())
            .initial(initial)
            .states(states.values())
            .transitions(transitions)
            .build()?;

        Ok(Topology { fsm, events })
    }
}

fn lookup_state<'a>(
    states: &'a BTreeMap<&str, StateRef>,
    index: usize,
    name: &str,
) -> Result<&'a StateRef, TopologyError> {
    states.get(name).ok_or_else(|| {
        TopologyError::Invalid(vec![Violation::UnknownState {
            index,
            name: name.to_string(),
        }])
    })
}

/// An assembled automaton together with the events it understands.
#[derive(Debug)]
pub struct Topology {
    fsm: Fsm,
    events: EventRegistry,
}

impl Topology {
    pub fn new(fsm: Fsm, events: EventRegistry) -> Self {
        Self { fsm, events }
    }

    pub fn fsm(&self) -> &Fsm {
        &self.fsm
    }

    pub fn fsm_mut(&mut self) -> &mut Fsm {
        &mut self.fsm
    }

    pub fn events(&self) -> &EventRegistry {
        &self.events
    }

    pub fn into_parts(self) -> (Fsm, EventRegistry) {
        (self.fsm, self.events)
    }
}

impl fmt::Display for Topology {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let fsm = &self.fsm;
        writeln!(
            f,
            "{}: {} states, {} events, {} transitions, initial state {}",
            fsm.name(),
            fsm.states().count(),
            self.events.len(),
            fsm.transition_count(),
            fsm.initial_state()
        )?;

        writeln!(f, "States:")?;
        for state in fsm.states() {
            if state.counters().is_some() {
                writeln!(f, "  {state} (counters)")?;
            } else {
                writeln!(f, "  {state}")?;
            }
        }

        writeln!(f, "Events:")?;
        for event in self.events.iter() {
            match event.description() {
                Some(description) => writeln!(f, "  {:<10} {description}", event.name())?,
                None => writeln!(f, "  {event}")?,
            }
        }

        writeln!(f, "Transitions:")?;
        for transition in fsm.transitions() {
            writeln!(f, "  {transition}")?;
        }
        Ok(())
    }
}
