//! Name to event lookup used to resolve inbound tokens.

use crate::core::Event;
use std::collections::BTreeMap;

/// Fixed mapping from event names to registered events.
#[derive(Clone, Debug, Default)]
pub struct EventRegistry {
    events: BTreeMap<String, Event>,
}

impl EventRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `event`. Returns `false`, keeping the earlier entry, if the
    /// name is already taken.
    pub fn register(&mut self, event: Event) -> bool {
        if self.events.contains_key(event.name()) {
            return false;
        }
        self.events.insert(event.name().to_string(), event);
        true
    }

    /// Resolve an inbound token to its event.
    pub fn resolve(&self, token: &str) -> Option<&Event> {
        self.events.get(token)
    }

    /// Registered events, ordered by name.
    pub fn iter(&self) -> impl Iterator<Item = &Event> + '_ {
        self.events.values()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

impl FromIterator<Event> for EventRegistry {
    fn from_iter<I: IntoIterator<Item = Event>>(iter: I) -> Self {
        let mut registry = Self::new();
        for event in iter {
            registry.register(event);
        }
        registry
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_registered_names_only() {
        let registry: EventRegistry = ["SYN", "ACK"].into_iter().map(Event::new).collect();

        assert_eq!(registry.resolve("SYN").map(Event::name), Some("SYN"));
        assert!(registry.resolve("syn").is_none());
        assert!(registry.resolve("BOGUS").is_none());
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn first_registration_wins() {
        let mut registry = EventRegistry::new();
        assert!(registry.register(Event::new("FIN").with_description("FIN received")));
        assert!(!registry.register(Event::new("FIN")));

        assert_eq!(
            registry.resolve("FIN").and_then(Event::description),
            Some("FIN received")
        );
    }
}
