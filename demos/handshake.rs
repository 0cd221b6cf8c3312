//! Three-Way Handshake
//!
//! This example wires the opening half of the TCP lifecycle by hand with the
//! builder API instead of loading a topology.
//!
//! Key concepts:
//! - Shared `StateRef` handles (one instance per state)
//! - Counting actions bound to a state's own counters
//! - Rejected events leave the machine where it was
//!
//! Run with: cargo run --example handshake

use std::sync::Arc;
use tcp_fsm::builder::{log_transition, FsmBuilder, TransitionBuilder};
use tcp_fsm::core::{Event, State, StateRef};
use tcp_fsm::effects::Action;

fn main() {
    println!("=== Three-Way Handshake ===\n");

    let closed: StateRef = Arc::new(State::new("CLOSED"));
    let listen: StateRef = Arc::new(State::new("LISTEN"));
    let syn_rcvd: StateRef = Arc::new(State::new("SYN_RCVD"));
    let established: StateRef = Arc::new(State::with_counters("ESTABLISHED"));

    let passive = Event::new("PASSIVE");
    let syn = Event::new("SYN");
    let ack = Event::new("ACK");
    let rdata = Event::new("RDATA");

    let receive = Action::receive(&established).expect("ESTABLISHED has counters");

    let mut machine = FsmBuilder::new("handshake")
        .initial(&closed)
        .transitions(vec![
            log_transition(&closed, &passive, &listen),
            log_transition(&listen, &syn, &syn_rcvd),
            log_transition(&syn_rcvd, &ack, &established),
        ])
        .transition(
            TransitionBuilder::new()
                .from(&established)
                .on(&rdata)
                .to(&established)
                .action(receive),
        )
        .unwrap()
        .build()
        .unwrap();

    println!("Transition table:");
    for transition in machine.transitions() {
        println!("  {transition}");
    }
    println!();

    for event in [&passive, &syn, &rdata, &ack, &rdata, &rdata] {
        match machine.do_event(event) {
            Ok(notice) => println!("{notice}"),
            Err(err) => println!("Error: {err}"),
        }
    }

    let counters = established.counters().expect("ESTABLISHED has counters");
    println!("\nFinal state: {}", machine.current_state());
    println!("Received: {}, sent: {}", counters.received(), counters.sent());

    println!("\n=== Example Complete ===");
}
