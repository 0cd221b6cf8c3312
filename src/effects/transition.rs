//! Transition edges.

use crate::core::{Event, State, StateRef};
use crate::effects::action::Action;
use std::fmt;
use std::sync::Arc;

/// One edge of the automaton: `(from, event) -> (to, action)`.
///
/// Transitions are created during setup and never change afterwards.
#[derive(Clone, Debug)]
pub struct Transition {
    pub from: StateRef,
    pub event: Event,
    pub to: StateRef,
    pub action: Action,
}

impl Transition {
    pub fn new(from: &StateRef, event: &Event, to: &StateRef, action: Action) -> Self {
        Self {
            from: Arc::clone(from),
            event: event.clone(),
            to: Arc::clone(to),
            action,
        }
    }

    /// Check whether this edge leaves `current` on `event` (pure).
    ///
    /// Matching is by name, the same rule the transition table uses.
    pub fn can_fire(&self, current: &State, event: &Event) -> bool {
        self.from.name() == current.name() && self.event == *event
    }

    /// Whether the edge leads back to the state it leaves.
    pub fn is_self_loop(&self) -> bool {
        State::same(&self.from, &self.to)
    }
}

impl fmt::Display for Transition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} --{}--> {} [{}]",
            self.from, self.event, self.to, self.action
        )
    }
}
