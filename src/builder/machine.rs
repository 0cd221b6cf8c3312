//! Builder for constructing state machines.

use crate::builder::error::BuildError;
use crate::builder::transition::TransitionBuilder;
use crate::core::StateRef;
use crate::effects::{Fsm, Transition};
use std::sync::Arc;

/// Builder for constructing state machines with a fluent API.
pub struct FsmBuilder {
    name: String,
    initial: Option<StateRef>,
    states: Vec<StateRef>,
    transitions: Vec<Transition>,
}

impl FsmBuilder {
    /// Create a new builder for a machine called `name`.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            initial: None,
            states: Vec::new(),
            transitions: Vec::new(),
        }
    }

    /// Set the initial state (required).
    pub fn initial(mut self, state: &StateRef) -> Self {
        self.initial = Some(Arc::clone(state));
        self
    }

    /// Declare a state, even one no transition touches.
    pub fn state(mut self, state: &StateRef) -> Self {
        self.states.push(Arc::clone(state));
        self
    }

    /// Declare several states at once.
    pub fn states<'a>(mut self, states: impl IntoIterator<Item = &'a StateRef>) -> Self {
        self.states.extend(states.into_iter().map(Arc::clone));
        self
    }

    /// Add a transition using a builder.
    /// Returns an error if the builder fails validation.
    pub fn transition(mut self, builder: TransitionBuilder) -> Result<Self, BuildError> {
        let transition = builder.build()?;
        self.transitions.push(transition);
        Ok(self)
    }

    /// Add a pre-built transition.
    pub fn add_transition(mut self, transition: Transition) -> Self {
        self.transitions.push(transition);
        self
    }

    /// Add multiple transitions at once.
    pub fn transitions(mut self, transitions: impl IntoIterator<Item = Transition>) -> Self {
        self.transitions.extend(transitions);
        self
    }

    /// Build the state machine.
    ///
    /// Declared states are registered first, then transitions in the order
    /// they were added; the first duplicate key or conflicting state aborts
    /// the build.
    pub fn build(self) -> Result<Fsm, BuildError> {
        let initial = self.initial.ok_or(BuildError::MissingInitialState)?;

        if self.transitions.is_empty() {
            return Err(BuildError::NoTransitions);
        }

        let mut machine = Fsm::new(self.name, initial);
        for state in &self.states {
            machine.add_state(state)?;
        }
        for transition in self.transitions {
            machine.add_transition(transition)?;
        }

        Ok(machine)
    }
}
