//! Token-driven dispatch loop.
//!
//! A [`Session`] pairs an assembled machine with its event registry and an
//! output sink. Each inbound token is resolved to an event, dispatched, and
//! reported as exactly one line. Failures are reported and skipped; only
//! I/O errors on the sink stop a run.

use crate::core::StateRef;
use crate::effects::{DispatchError, Fsm, Notice};
use crate::topology::{EventRegistry, Topology};
use serde::Serialize;
use std::io::{self, BufRead, Write};
use thiserror::Error;
use tracing::warn;

/// Per-token failures. Neither is fatal.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("unexpected Event: {token}")]
    UnknownEvent { token: String },

    #[error(transparent)]
    Dispatch(#[from] DispatchError),
}

/// Running totals for a session.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct SessionStats {
    /// Non-empty tokens seen
    pub tokens: usize,
    /// Tokens that fired a transition
    pub dispatched: usize,
    pub unknown_events: usize,
    pub invalid_transitions: usize,
}

impl SessionStats {
    pub fn errors(&self) -> usize {
        self.unknown_events + self.invalid_transitions
    }
}

/// Dispatch context: the machine, its events, and where output goes.
pub struct Session<W: Write> {
    fsm: Fsm,
    events: EventRegistry,
    out: W,
    stats: SessionStats,
}

impl<W: Write> Session<W> {
    pub fn new(topology: Topology, out: W) -> Self {
        let (fsm, events) = topology.into_parts();
        Self {
            fsm,
            events,
            out,
            stats: SessionStats::default(),
        }
    }

    /// Resolve `token` and dispatch it, without writing anything.
    pub fn feed(&mut self, token: &str) -> Result<Notice, SessionError> {
        let event = self
            .events
            .resolve(token)
            .ok_or_else(|| SessionError::UnknownEvent {
                token: token.to_string(),
            })?;
        Ok(self.fsm.do_event(event)?)
    }

    /// Handle one token and write its output line.
    ///
    /// Surrounding whitespace is trimmed and empty tokens are skipped.
    pub fn process(&mut self, token: &str) -> io::Result<()> {
        let token = token.trim();
        if token.is_empty() {
            return Ok(());
        }
        self.stats.tokens += 1;

        match self.feed(token) {
            Ok(notice) => {
                self.stats.dispatched += 1;
                writeln!(self.out, "{notice}")
            }
            Err(err) => {
                match &err {
                    SessionError::UnknownEvent { .. } => self.stats.unknown_events += 1,
                    SessionError::Dispatch(_) => self.stats.invalid_transitions += 1,
                }
                warn!(
                    machine = self.fsm.name(),
                    state = self.fsm.current_state().name(),
                    token,
                    error = %err,
                    "rejected event"
                );
                writeln!(self.out, "Error: {err}")
            }
        }
    }

    /// Process every token in order and return the totals so far.
    pub fn run<I>(&mut self, tokens: I) -> io::Result<SessionStats>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        for token in tokens {
            self.process(token.as_ref())?;
        }
        self.out.flush()?;
        Ok(self.stats)
    }

    /// Process whitespace-separated tokens from `reader` until it is exhausted.
    ///
    /// Lines are decoded lossily, so bytes that are not UTF-8 end up in a
    /// token that is reported as an unknown event instead of stopping the run.
    pub fn run_reader<R: BufRead>(&mut self, reader: R) -> io::Result<SessionStats> {
        for line in reader.split(b'\n') {
            let line = line?;
            let line = String::from_utf8_lossy(&line);
            for token in line.split_whitespace() {
                self.process(token)?;
            }
        }
        self.out.flush()?;
        Ok(self.stats)
    }

    pub fn fsm(&self) -> &Fsm {
        &self.fsm
    }

    pub fn fsm_mut(&mut self) -> &mut Fsm {
        &mut self.fsm
    }

    pub fn events(&self) -> &EventRegistry {
        &self.events
    }

    pub fn current_state(&self) -> &StateRef {
        self.fsm.current_state()
    }

    pub fn stats(&self) -> SessionStats {
        self.stats
    }

    pub fn into_output(self) -> W {
        self.out
    }
}
