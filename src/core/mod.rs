//! Core value types of the automaton.
//!
//! This module contains the passive building blocks:
//! - Events, identified by name
//! - States, with optional state-local data counters
//! - Immutable history of fired transitions
//!
//! Nothing in here dispatches; that lives in [`crate::effects`].

mod event;
mod history;
mod state;

pub use event::Event;
pub use history::{StateHistory, StateTransition};
pub use state::{DataCounters, Direction, State, StateRef};
