//! Named stimuli that drive the automaton.
//!
//! Events are immutable and interchangeable by name: two `Event` values with
//! the same name are the same event as far as the transition table is
//! concerned, regardless of description.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

/// An immutable, named token identifying a stimulus.
///
/// Equality, ordering and hashing only look at the name. The optional
/// description is for display.
///
/// # Example
///
/// ```rust
/// use tcp_fsm::core::Event;
///
/// let passive = Event::new("PASSIVE").with_description("Passive Open");
///
/// assert_eq!(passive.name(), "PASSIVE");
/// assert_eq!(passive.description(), Some("Passive Open"));
/// assert_eq!(passive, Event::new("PASSIVE"));
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Event {
    name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    description: Option<String>,
}

impl Event {
    /// Create an event with the given name and no description.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
        }
    }

    /// Attach a human-readable description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// The event name, used as half of the transition key.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }
}

impl PartialEq for Event {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for Event {}

impl Hash for Event {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}

impl PartialOrd for Event {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Event {
    fn cmp(&self, other: &Self) -> Ordering {
        self.name.cmp(&other.name)
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}
