//! Table-driven state machine: registration and dispatch.

use crate::builder::BuildError;
use crate::core::{Event, State, StateHistory, StateRef, StateTransition};
use crate::effects::action::Notice;
use crate::effects::error::DispatchError;
use crate::effects::transition::Transition;
use chrono::Utc;
use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;
use tracing::{debug, info, trace};

/// Finite state machine owning the transition table and the current state.
///
/// The table is a partial function from `(state name, event name)` to at
/// most one [`Transition`]. The current state is the only thing that changes
/// once setup is done, and it changes exactly once per successful dispatch.
pub struct Fsm {
    name: String,
    initial: StateRef,
    current: StateRef,
    states: BTreeMap<String, StateRef>,
    table: BTreeMap<String, BTreeMap<String, Transition>>,
    history: Option<StateHistory>,
}

impl Fsm {
    /// Create a machine sitting in `initial`, with an empty table.
    pub fn new(name: impl Into<String>, initial: StateRef) -> Self {
        let mut states = BTreeMap::new();
        states.insert(initial.name().to_string(), Arc::clone(&initial));
        Self {
            name: name.into(),
            current: Arc::clone(&initial),
            initial,
            states,
            table: BTreeMap::new(),
            history: None,
        }
    }

    /// Register a transition.
    ///
    /// Fails if the `(from, event)` key is already taken, or if either end
    /// is a different instance than the state already registered under that
    /// name. A failed call leaves the machine untouched.
    pub fn add_transition(&mut self, transition: Transition) -> Result<(), BuildError> {
        if transition.from.name() == transition.to.name()
            && !State::same(&transition.from, &transition.to)
        {
            return Err(BuildError::ConflictingState {
                name: transition.to.name().to_string(),
            });
        }
        self.check_registered(&transition.from)?;
        self.check_registered(&transition.to)?;

        if self.is_valid_transition(transition.from.name(), transition.event.name()) {
            return Err(BuildError::DuplicateTransition {
                state: transition.from.name().to_string(),
                event: transition.event.name().to_string(),
            });
        }

        for state in [&transition.from, &transition.to] {
            self.states
                .entry(state.name().to_string())
                .or_insert_with(|| Arc::clone(state));
        }

        trace!(machine = %self.name, %transition, "registered transition");
        self.table
            .entry(transition.from.name().to_string())
            .or_default()
            .insert(transition.event.name().to_string(), transition);
        Ok(())
    }

    /// Register a state that may not appear in any transition yet.
    ///
    /// Registering the same instance twice is a no-op; a different instance
    /// under a taken name is rejected.
    pub fn add_state(&mut self, state: &StateRef) -> Result<(), BuildError> {
        self.check_registered(state)?;
        self.states
            .entry(state.name().to_string())
            .or_insert_with(|| Arc::clone(state));
        Ok(())
    }

    fn check_registered(&self, state: &StateRef) -> Result<(), BuildError> {
        match self.states.get(state.name()) {
            Some(registered) if !State::same(registered, state) => {
                Err(BuildError::ConflictingState {
                    name: state.name().to_string(),
                })
            }
            _ => Ok(()),
        }
    }

    /// Dispatch one event.
    ///
    /// Looks up `(current, event)`, runs the transition's action, then moves
    /// to the destination. With no matching edge nothing changes and
    /// [`DispatchError::InvalidTransition`] is returned.
    pub fn do_event(&mut self, event: &Event) -> Result<Notice, DispatchError> {
        let transition = self
            .lookup(self.current.name(), event.name())
            .ok_or_else(|| DispatchError::InvalidTransition {
                state: self.current.name().to_string(),
                event: event.name().to_string(),
            })?;

        let notice = transition.action.execute(self, event);
        let destination = Arc::clone(&transition.to);
        let from = std::mem::replace(&mut self.current, destination);

        debug!(
            machine = %self.name,
            from = from.name(),
            event = event.name(),
            to = self.current.name(),
            "dispatched event"
        );

        if let Some(history) = self.history.as_mut() {
            let record = StateTransition {
                from: from.name().to_string(),
                event: event.name().to_string(),
                to: self.current.name().to_string(),
                timestamp: Utc::now(),
                sequence: history.len() + 1,
            };
            info!(
                machine = %self.name,
                sequence = record.sequence,
                from = %record.from,
                event = %record.event,
                to = %record.to,
                "transition"
            );
            history.push(record);
        }

        Ok(notice)
    }

    fn lookup(&self, state: &str, event: &str) -> Option<&Transition> {
        self.table.get(state).and_then(|edges| edges.get(event))
    }

    /// Events with a registered edge out of `state`.
    ///
    /// Derived from the table on every call. Unknown states and states with
    /// no outgoing edges both yield an empty set.
    pub fn valid_events(&self, state: &str) -> BTreeSet<&str> {
        self.table
            .get(state)
            .map(|edges| edges.keys().map(String::as_str).collect())
            .unwrap_or_default()
    }

    /// Whether an edge exists from `state` on `event`, matching by name.
    ///
    /// A query only; [`Fsm::do_event`] does its own lookup.
    pub fn is_valid_transition(&self, state: &str, event: &str) -> bool {
        self.lookup(state, event).is_some()
    }

    /// Get the transition `do_event` would fire from `state` on `event`.
    pub fn transition(&self, state: &str, event: &str) -> Option<&Transition> {
        self.lookup(state, event)
    }

    /// All transitions, ordered by source state name then event name.
    pub fn transitions(&self) -> impl Iterator<Item = &Transition> + '_ {
        self.table.values().flat_map(BTreeMap::values)
    }

    pub fn transition_count(&self) -> usize {
        self.table.values().map(BTreeMap::len).sum()
    }

    /// Registered states, ordered by name.
    pub fn states(&self) -> impl Iterator<Item = &StateRef> + '_ {
        self.states.values()
    }

    pub fn state(&self, name: &str) -> Option<&StateRef> {
        self.states.get(name)
    }

    pub fn current_state(&self) -> &StateRef {
        &self.current
    }

    pub fn initial_state(&self) -> &StateRef {
        &self.initial
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Move back to the initial state. State-local counters are kept.
    pub fn reset(&mut self) {
        debug!(machine = %self.name, from = self.current.name(), "reset");
        self.current = Arc::clone(&self.initial);
    }

    /// Start recording every fired transition.
    pub fn trace_on(&mut self) {
        if self.history.is_none() {
            self.history = Some(StateHistory::new());
        }
    }

    /// Stop recording and drop what was recorded.
    pub fn trace_off(&mut self) {
        self.history = None;
    }

    pub fn is_tracing(&self) -> bool {
        self.history.is_some()
    }

    /// Recorded transitions, if tracing is on.
    pub fn history(&self) -> Option<&StateHistory> {
        self.history.as_ref()
    }
}

impl std::fmt::Debug for Fsm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Fsm")
            .field("name", &self.name)
            .field("current", &self.current.name())
            .field("states", &self.states.len())
            .field("transitions", &self.transition_count())
            .finish()
    }
}
