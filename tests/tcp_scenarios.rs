//! End-to-end runs of the TCP lifecycle through a session.

use tcp_fsm::session::{Session, SessionStats};
use tcp_fsm::topology::{tcp, TopologySpec};

struct Outcome {
    lines: Vec<String>,
    state: String,
    received: u64,
    sent: u64,
    stats: SessionStats,
}

fn drive(script: &str) -> Outcome {
    let mut session = Session::new(tcp::topology().unwrap(), Vec::new());
    let stats = session.run(script.split_whitespace()).unwrap();

    let state = session.current_state().name().to_string();
    let counters = session
        .fsm()
        .state("ESTABLISHED")
        .and_then(|s| s.counters())
        .unwrap()
        .clone();
    let lines = String::from_utf8(session.into_output())
        .unwrap()
        .lines()
        .map(str::to_string)
        .collect();

    Outcome {
        lines,
        state,
        received: counters.received(),
        sent: counters.sent(),
        stats,
    }
}

#[test]
fn server_passive_open() {
    let outcome = drive("PASSIVE SYN ACK RDATA SDATA CLOSE");

    assert_eq!(
        outcome.lines,
        vec![
            "Event PASSIVE received, current State is CLOSED",
            "Event SYN received, current State is LISTEN",
            "Event ACK received, current State is SYN_RCVD",
            "DATA received 1",
            "DATA sent 1",
            "Event CLOSE received, current State is ESTABLISHED",
        ]
    );
    assert_eq!(outcome.state, "FIN_WAIT_1");
    assert_eq!((outcome.received, outcome.sent), (1, 1));
    assert_eq!(outcome.stats.errors(), 0);
}

#[test]
fn client_active_open() {
    let outcome = drive("ACTIVE\nSYNACK\nRDATA\nSDATA\nCLOSE\n");

    assert_eq!(
        outcome.lines,
        vec![
            "Event ACTIVE received, current State is CLOSED",
            "Event SYNACK received, current State is SYN_SENT",
            "DATA received 1",
            "DATA sent 1",
            "Event CLOSE received, current State is ESTABLISHED",
        ]
    );
    assert_eq!(outcome.state, "FIN_WAIT_1");
    assert_eq!(outcome.stats.errors(), 0);
}

#[test]
fn multiple_data_transfers() {
    let outcome = drive("PASSIVE SYN ACK RDATA RDATA SDATA SDATA CLOSE");

    assert_eq!(
        &outcome.lines[3..7],
        &["DATA received 1", "DATA received 2", "DATA sent 1", "DATA sent 2"]
    );
    assert_eq!(outcome.state, "FIN_WAIT_1");
    assert_eq!((outcome.received, outcome.sent), (2, 2));
    assert_eq!(outcome.stats.errors(), 0);
}

#[test]
fn passive_close_sequence() {
    let outcome = drive("PASSIVE SYN ACK FIN CLOSE ACK TIMEOUT");

    assert_eq!(
        outcome.lines,
        vec![
            "Event PASSIVE received, current State is CLOSED",
            "Event SYN received, current State is LISTEN",
            "Event ACK received, current State is SYN_RCVD",
            "Event FIN received, current State is ESTABLISHED",
            "Event CLOSE received, current State is CLOSE_WAIT",
            "Event ACK received, current State is LAST_ACK",
            // LAST_ACK already led back to CLOSED, which has no TIMEOUT edge
            "Error: invalid Event TIMEOUT in State CLOSED",
        ]
    );
    assert_eq!(outcome.state, "CLOSED");
    assert_eq!(outcome.stats.dispatched, 6);
    assert_eq!(outcome.stats.invalid_transitions, 1);
}

#[test]
fn invalid_events_after_fin() {
    let outcome = drive("PASSIVE SYN ACK RDATA FIN RDATA SDATA");

    assert_eq!(
        outcome.lines,
        vec![
            "Event PASSIVE received, current State is CLOSED",
            "Event SYN received, current State is LISTEN",
            "Event ACK received, current State is SYN_RCVD",
            "DATA received 1",
            "Event FIN received, current State is ESTABLISHED",
            "Error: invalid Event RDATA in State CLOSE_WAIT",
            "Error: invalid Event SDATA in State CLOSE_WAIT",
        ]
    );
    assert_eq!(outcome.state, "CLOSE_WAIT");
    assert_eq!((outcome.received, outcome.sent), (1, 0));
    assert_eq!(outcome.stats.invalid_transitions, 2);
}

#[test]
fn active_close_through_time_wait() {
    let outcome = drive("ACTIVE SYNACK CLOSE ACK FIN TIMEOUT");

    assert_eq!(outcome.state, "CLOSED");
    assert_eq!(outcome.stats.errors(), 0);
    assert_eq!(
        outcome.lines.last().map(String::as_str),
        Some("Event TIMEOUT received, current State is TIME_WAIT")
    );
}

#[test]
fn simultaneous_close_through_closing() {
    let outcome = drive("ACTIVE SYNACK CLOSE FIN ACK TIMEOUT");

    assert_eq!(outcome.state, "CLOSED");
    assert_eq!(outcome.stats.errors(), 0);
    assert_eq!(
        outcome.lines[4],
        "Event ACK received, current State is CLOSING"
    );
}

#[test]
fn unknown_tokens_are_reported_and_skipped() {
    let outcome = drive("PASSIVE HELLO SYN");

    assert_eq!(
        outcome.lines,
        vec![
            "Event PASSIVE received, current State is CLOSED",
            "Error: unexpected Event: HELLO",
            "Event SYN received, current State is LISTEN",
        ]
    );
    assert_eq!(outcome.state, "SYN_RCVD");
    assert_eq!(outcome.stats.unknown_events, 1);
}

#[test]
fn undecodable_bytes_are_an_unknown_event() {
    let mut session = Session::new(tcp::topology().unwrap(), Vec::new());

    let stats = session
        .run_reader(&b"PASSIVE\n\xff\xfe\nSYN\n"[..])
        .unwrap();

    let output = String::from_utf8(session.into_output()).unwrap();
    assert_eq!(
        output.lines().collect::<Vec<_>>(),
        vec![
            "Event PASSIVE received, current State is CLOSED",
            "Error: unexpected Event: \u{FFFD}\u{FFFD}",
            "Event SYN received, current State is LISTEN",
        ]
    );
    assert_eq!(stats.unknown_events, 1);
    assert_eq!(stats.dispatched, 2);
}

#[test]
fn counters_outlive_the_connection() {
    let outcome = drive(
        "PASSIVE SYN ACK RDATA CLOSE ACK FIN TIMEOUT \
         PASSIVE SYN ACK RDATA",
    );

    assert_eq!(outcome.lines.last().map(String::as_str), Some("DATA received 2"));
    assert_eq!(outcome.state, "ESTABLISHED");
    assert_eq!(outcome.stats.errors(), 0);
}

#[test]
fn bundled_file_matches_embedded_topology() {
    let path = concat!(env!("CARGO_MANIFEST_DIR"), "/topologies/tcp.json");

    let from_file = TopologySpec::from_path(path).unwrap();

    assert_eq!(from_file, tcp::spec().unwrap());
}

#[test]
fn describe_lists_the_whole_table() {
    let description = tcp::topology().unwrap().to_string();

    assert!(description.starts_with("TCP: 11 states, 10 events, 19 transitions"));
    assert!(description.contains("  ESTABLISHED (counters)"));
    assert!(description.contains("  TIMEOUT    Timed wait ends"));
    assert!(description.contains("  ESTABLISHED --SDATA--> ESTABLISHED [count sent]"));
}
