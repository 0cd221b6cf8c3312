//! Topology validation using Validation.

use crate::topology::violations::Violation;
use crate::topology::{ActionSpec, TopologySpec};
use std::collections::{BTreeMap, BTreeSet};
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;

type Check = Validation<(), NonEmptyVec<Violation>>;

fn check(ok: bool, violation: impl FnOnce() -> Violation) -> Check {
    if ok {
        Validation::success(())
    } else {
        Validation::fail(violation())
    }
}

/// Validate a topology, accumulating ALL violations.
///
/// Returns `Validation::Success(())` if the topology can be assembled, otherwise
/// `Validation::Failure` with every violation found.
pub fn validate(spec: &TopologySpec) -> Validation<(), NonEmptyVec<Violation>> {
    let mut checks: Vec<Check> = Vec::new();

    // Declared states, remembering which carry counters
    let mut states: BTreeMap<&str, bool> = BTreeMap::new();
    for state in &spec.states {
        let fresh = states.insert(state.name.as_str(), state.counters).is_none();
        checks.push(check(fresh, || Violation::DuplicateState {
            name: state.name.clone(),
        }));
    }

    let mut events: BTreeSet<&str> = BTreeSet::new();
    for event in &spec.events {
        let fresh = events.insert(event.name.as_str());
        checks.push(check(fresh, || Violation::DuplicateEvent {
            name: event.name.clone(),
        }));
    }

    checks.push(check(states.contains_key(spec.initial.as_str()), || {
        Violation::UnknownInitialState {
            name: spec.initial.clone(),
        }
    }));

    let mut keys: BTreeSet<(&str, &str)> = BTreeSet::new();
    for (index, transition) in spec.transitions.iter().enumerate() {
        for name in [&transition.from, &transition.to] {
            checks.push(check(states.contains_key(name.as_str()), || {
                Violation::UnknownState {
                    index,
                    name: name.clone(),
                }
            }));
        }

        checks.push(check(events.contains(transition.event.as_str()), || {
            Violation::UnknownEvent {
                index,
                name: transition.event.clone(),
            }
        }));

        let fresh = keys.insert((transition.from.as_str(), transition.event.as_str()));
        checks.push(check(fresh, || Violation::DuplicateTransition {
            index,
            state: transition.from.clone(),
            event: transition.event.clone(),
        }));

        // Counting actions work on the source state's counters
        if transition.action != ActionSpec::Log {
            if let Some(&has_counters) = states.get(transition.from.as_str()) {
                checks.push(check(has_counters, || {
                    Violation::CounterTargetWithoutCounters {
                        index,
                        state: transition.from.clone(),
                    }
                }));
            }
        }
    }

    Validation::all_vec(checks).map(|_| ())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::topology::{EventSpec, StateSpec, TransitionSpec};

    fn edge(from: &str, event: &str, to: &str, action: ActionSpec) -> TransitionSpec {
        TransitionSpec {
            from: from.to_string(),
            event: event.to_string(),
            to: to.to_string(),
            action,
        }
    }

    fn small_spec() -> TopologySpec {
        TopologySpec {
            name: "small".to_string(),
            initial: "CLOSED".to_string(),
            states: vec![
                StateSpec::new("CLOSED"),
                StateSpec::new("LISTEN"),
                StateSpec::with_counters("ESTABLISHED"),
            ],
            events: vec![
                EventSpec::new("PASSIVE"),
                EventSpec::new("SYN"),
                EventSpec::new("RDATA"),
            ],
            transitions: vec![
                edge("CLOSED", "PASSIVE", "LISTEN", ActionSpec::Log),
                edge("LISTEN", "SYN", "ESTABLISHED", ActionSpec::Log),
                edge("ESTABLISHED", "RDATA", "ESTABLISHED", ActionSpec::Receive),
            ],
        }
    }

    fn violations(spec: &TopologySpec) -> Vec<Violation> {
        match validate(spec) {
            Validation::Success(_) => Vec::new(),
            Validation::Failure(errors) => errors.iter().cloned().collect(),
        }
    }

    #[test]
    fn valid_spec_passes() {
        assert!(validate(&small_spec()).is_success());
    }

    #[test]
    fn validation_accumulates_all_violations() {
        let mut spec = small_spec();
        spec.initial = "NOWHERE".to_string();
        spec.states.push(StateSpec::new("LISTEN"));
        spec.transitions
            .push(edge("CLOSED", "PASSIVE", "GHOST", ActionSpec::Log));
        spec.transitions
            .push(edge("LISTEN", "BOGUS", "CLOSED", ActionSpec::Log));

        let found = violations(&spec);

        assert_eq!(found.len(), 5);
        assert!(found.contains(&Violation::UnknownInitialState {
            name: "NOWHERE".to_string()
        }));
        assert!(found.contains(&Violation::DuplicateState {
            name: "LISTEN".to_string()
        }));
        assert!(found.contains(&Violation::UnknownState {
            index: 3,
            name: "GHOST".to_string()
        }));
        assert!(found.contains(&Violation::DuplicateTransition {
            index: 3,
            state: "CLOSED".to_string(),
            event: "PASSIVE".to_string()
        }));
        assert!(found.contains(&Violation::UnknownEvent {
            index: 4,
            name: "BOGUS".to_string()
        }));
    }

    #[test]
    fn counting_on_plain_state_is_rejected() {
        let mut spec = small_spec();
        spec.transitions
            .push(edge("LISTEN", "RDATA", "LISTEN", ActionSpec::Receive));

        assert_eq!(
            violations(&spec),
            vec![Violation::CounterTargetWithoutCounters {
                index: 3,
                state: "LISTEN".to_string()
            }]
        );
    }

    #[test]
    fn duplicate_events_are_reported() {
        let mut spec = small_spec();
        spec.events.push(EventSpec::new("SYN"));

        assert_eq!(
            violations(&spec),
            vec![Violation::DuplicateEvent {
                name: "SYN".to_string()
            }]
        );
    }
}
