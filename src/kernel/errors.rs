//! Fatal failures
//!
//! Everything here ends the current top-level evaluation. None of these are
//! control signals, and no handler in this crate recovers from them.

use super::types::SignalKind;
use thiserror::Error;

/// Directive passed to the formatter when the ledger overflows
pub const STACK_OVERFLOW: &str = "stack overflow";

/// Directive used to render one frame of a backtrace
pub const FRAME_DIRECTIVE: &str = "~S";

/// Header line of every backtrace
pub const BACKTRACE_HEADER: &str = "Backtrace:\n";

#[derive(Debug, Clone, Error)]
pub enum Fatal {
    /// `raise` with a formatter: directive output, blank line, backtrace
    #[error("{message}")]
    Raised { message: String },

    /// `raise` before any formatter was registered; the arguments went to
    /// the log instead of into the message
    #[error("fatal error raised before a formatter was registered ({directive})")]
    Unformatted { directive: String },

    /// Push past the configured depth limit, reported through `raise`
    #[error("{report}")]
    StackOverflow { limit: usize, report: Box<Fatal> },

    /// Pop with no frame on the ledger; push/pop pairing is broken
    #[error("frame ledger underflow: pop with no pending frame")]
    LedgerUnderflow,

    /// A signal propagated past every handler
    #[error("{message}")]
    Escaped { kind: SignalKind, message: String },

    /// The plain `error` primitive: message only, no backtrace
    #[error("{0}")]
    Error(String),
}

impl Fatal {
    /// Whether this failure went through the degraded no-formatter path
    pub fn is_unformatted(&self) -> bool {
        match self {
            Fatal::Unformatted { .. } => true,
            Fatal::StackOverflow { report, .. } => report.is_unformatted(),
            _ => false,
        }
    }
}

/// Formatter registration failures
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistrationError {
    #[error("a formatter is already registered for this context")]
    AlreadyRegistered,
}
