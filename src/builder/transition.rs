//! Builder for constructing transitions.

use crate::builder::error::BuildError;
use crate::core::{Event, StateRef};
use crate::effects::{Action, Transition};
use std::sync::Arc;

/// Builder for constructing transitions with a fluent API.
#[derive(Default)]
pub struct TransitionBuilder {
    from: Option<StateRef>,
    event: Option<Event>,
    to: Option<StateRef>,
    action: Option<Action>,
}

impl TransitionBuilder {
    /// Create a new transition builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the source state (required).
    pub fn from(mut self, state: &StateRef) -> Self {
        self.from = Some(Arc::clone(state));
        self
    }

    /// Set the triggering event (required).
    pub fn on(mut self, event: &Event) -> Self {
        self.event = Some(event.clone());
        self
    }

    /// Set the target state (required).
    pub fn to(mut self, state: &StateRef) -> Self {
        self.to = Some(Arc::clone(state));
        self
    }

    /// Set the action (required).
    pub fn action(mut self, action: Action) -> Self {
        self.action = Some(action);
        self
    }

    /// Use the logging action.
    pub fn logs(self) -> Self {
        self.action(Action::Log)
    }

    /// Build the transition.
    pub fn build(self) -> Result<Transition, BuildError> {
        let from = self.from.ok_or(BuildError::MissingFromState)?;
        let event = self.event.ok_or(BuildError::MissingEvent)?;
        let to = self.to.ok_or(BuildError::MissingToState)?;
        let action = self.action.ok_or(BuildError::MissingAction)?;

        Ok(Transition {
            from,
            event,
            to,
            action,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::State;

    #[test]
    fn builder_validates_required_fields() {
        let closed: StateRef = Arc::new(State::new("CLOSED"));

        let result = TransitionBuilder::new().from(&closed).build();
        assert!(matches!(result, Err(BuildError::MissingEvent)));

        let result = TransitionBuilder::new()
            .from(&closed)
            .on(&Event::new("ACTIVE"))
            .build();
        assert!(matches!(result, Err(BuildError::MissingToState)));

        let result = TransitionBuilder::new().to(&closed).build();
        assert!(matches!(result, Err(BuildError::MissingFromState)));
    }

    #[test]
    fn builder_validates_missing_action() {
        let closed: StateRef = Arc::new(State::new("CLOSED"));
        let syn_sent: StateRef = Arc::new(State::new("SYN_SENT"));

        let result = TransitionBuilder::new()
            .from(&closed)
            .on(&Event::new("ACTIVE"))
            .to(&syn_sent)
            .build();

        assert!(matches!(result, Err(BuildError::MissingAction)));
    }

    #[test]
    fn fluent_api_builds_transition() {
        let closed: StateRef = Arc::new(State::new("CLOSED"));
        let syn_sent: StateRef = Arc::new(State::new("SYN_SENT"));

        let transition = TransitionBuilder::new()
            .from(&closed)
            .on(&Event::new("ACTIVE"))
            .to(&syn_sent)
            .logs()
            .build()
            .unwrap();

        assert!(State::same(&transition.from, &closed));
        assert!(State::same(&transition.to, &syn_sent));
        assert_eq!(transition.event.name(), "ACTIVE");
        assert!(matches!(transition.action, Action::Log));
    }
}
