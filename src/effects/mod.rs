//! The dispatching half of the engine.
//!
//! This module holds everything that acts:
//!
//! - **Actions**: the side effect attached to each transition
//! - **Transitions**: immutable `(from, event) -> (to, action)` edges
//! - **Fsm**: the transition table, the current state and the dispatch loop
//!
//! Dispatch is strictly sequential. [`Fsm::do_event`] takes `&mut self` and
//! runs lookup, action and state update to completion before returning.

mod action;
mod error;
mod machine;
mod transition;

pub use action::{Action, Notice};
pub use error::DispatchError;
pub use machine::Fsm;
pub use transition::Transition;
