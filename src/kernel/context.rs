//! Execution context
//!
//! One `ExecutionContext` drives one top-level evaluation. It owns the frame
//! ledger and the formatter reference, so independent evaluations never see
//! each other's frames. It is `!Sync`: the ledger mirrors the
//! call history of a single thread of evaluation.

use super::backtrace::render_backtrace;
use super::errors::{Fatal, RegistrationError, STACK_OVERFLOW};
use super::formatter::{FormatError, Formatter};
use super::ledger::{DepthExceeded, FrameLedger, DEFAULT_MAX_DEPTH};
use super::types::{EvalResult, Flow};
use crate::config::RuntimeConfig;
use std::cell::OnceCell;
use std::fmt::Debug;

/* ===================== Context ===================== */

pub struct ExecutionContext<V> {
    ledger: FrameLedger<V>,
    formatter: OnceCell<Formatter<V>>,
}

impl<V: Debug> ExecutionContext<V> {
    /// Create a context with the default depth limit
    pub fn new() -> Self {
        Self::with_limit(DEFAULT_MAX_DEPTH)
    }

    pub fn with_limit(limit: usize) -> Self {
        ExecutionContext {
            ledger: FrameLedger::new(limit),
            formatter: OnceCell::new(),
        }
    }

    pub fn from_config(config: &RuntimeConfig) -> Self {
        Self::with_limit(config.max_depth)
    }

    /* ===================== Formatter ===================== */

    /// Install the diagnostic formatter
    ///
    /// Allowed once per context. Until it happens, `raise` takes the degraded
    /// path and backtraces print frames with `Debug`.
    pub fn register_formatter<F>(&self, func: F) -> Result<(), RegistrationError>
    where
        F: Fn(&str, &[V]) -> Result<String, FormatError> + 'static,
    {
        self.formatter
            .set(Formatter::new(func))
            .map_err(|_| RegistrationError::AlreadyRegistered)
    }

    pub fn formatter(&self) -> Option<&Formatter<V>> {
        self.formatter.get()
    }

    /* ===================== Frames ===================== */

    /// Record a frame before recursing
    ///
    /// Past the depth limit this fails with `Fatal::StackOverflow`, whose
    /// report is produced by `raise` and carries the backtrace of the frames
    /// that filled the ledger. The refused frame is never recorded.
    pub fn push_frame(&mut self, frame: V) -> Result<(), Fatal> {
        match self.ledger.push(frame) {
            Ok(()) => Ok(()),
            Err(DepthExceeded { limit }) => Err(Fatal::StackOverflow {
                limit,
                report: Box::new(self.raise(STACK_OVERFLOW, &[])),
            }),
        }
    }

    /// Drop the frame recorded by the matching `push_frame`
    pub fn pop_frame(&mut self) -> Result<V, Fatal> {
        self.ledger.pop()
    }

    /// Run `body` with `frame` on the ledger
    ///
    /// The frame is popped whichever way `body` leaves, value or unwind.
    /// When a signal is propagating it is kept on the unwind trail for
    /// `finish`.
    pub fn with_frame<T, B>(&mut self, frame: V, body: B) -> Result<T, Flow<V>>
    where
        B: FnOnce(&mut Self) -> Result<T, Flow<V>>,
    {
        self.push_frame(frame)?;
        let result = body(self);
        if let Err(Flow::Signal(_)) = &result {
            self.ledger.pop_unwinding()?;
        } else {
            self.pop_frame()?;
            self.ledger.settle();
        }
        result
    }

    pub fn depth(&self) -> usize {
        self.ledger.depth()
    }

    pub fn limit(&self) -> usize {
        self.ledger.limit()
    }

    pub fn ledger(&self) -> &FrameLedger<V> {
        &self.ledger
    }

    /// Current backtrace, newest frame first
    pub fn backtrace(&self) -> String {
        render_backtrace(&self.ledger, self.formatter())
    }

    /* ===================== Top Level ===================== */

    /// Close a top-level evaluation
    ///
    /// A signal still propagating here had no handler anywhere; it becomes a
    /// `Fatal::Escaped` whose backtrace starts at the frame it was signalled
    /// from.
    pub fn finish(&mut self, result: EvalResult<V>) -> Result<V, Fatal> {
        let outcome = match result {
            Ok(value) => Ok(value),
            Err(Flow::Fatal(fatal)) => Err(fatal),
            Err(Flow::Signal(signal)) => Err(self.escaped(&signal)),
        };
        self.ledger.settle();
        outcome
    }
}

impl<V: Debug> Default for ExecutionContext<V> {
    fn default() -> Self {
        Self::new()
    }
}
