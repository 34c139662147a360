//! Evaluation outcome
//!
//! An evaluation step either yields a value or unwinds with a `Flow`.
//! `Flow` is closed over exactly two payload kinds: non-local exits and fatal
//! failures. Nothing else travels through the unwind channel.

use super::super::errors::Fatal;
use super::signal::Signal;

/// Control flow state while unwinding
#[derive(Debug, Clone)]
pub enum Flow<V> {
    /// A non-local exit looking for its handler
    Signal(Signal<V>),
    /// A fatal failure on its way to the host
    Fatal(Fatal),
}

impl<V> Flow<V> {
    pub fn signal(&self) -> Option<&Signal<V>> {
        match self {
            Flow::Signal(signal) => Some(signal),
            Flow::Fatal(_) => None,
        }
    }

    pub fn fatal(&self) -> Option<&Fatal> {
        match self {
            Flow::Signal(_) => None,
            Flow::Fatal(fatal) => Some(fatal),
        }
    }
}

impl<V> From<Signal<V>> for Flow<V> {
    fn from(signal: Signal<V>) -> Self {
        Flow::Signal(signal)
    }
}

impl<V> From<Fatal> for Flow<V> {
    fn from(fatal: Fatal) -> Self {
        Flow::Fatal(fatal)
    }
}

/// Result of evaluating one step
pub type EvalResult<V> = Result<V, Flow<V>>;
