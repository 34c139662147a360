//! # Control Kernel
//!
//! Non-local exits and call-depth diagnostics for a Lisp evaluator.
//!
//! ## Core Principles
//!
//! 1. **Explicit unwinding**: every evaluation step returns `Result<V, Flow<V>>`;
//!    block, tag and catch exits travel as `Flow::Signal`, errors as `Flow::Fatal`
//! 2. **Exact matching**: block names and catch tags match by identity, tag
//!    exits by `(level, index)`
//! 3. **One context per evaluation**: the frame ledger and formatter live in an
//!    `ExecutionContext`, never in globals
//! 4. **Diagnostics cannot crash**: rendering a backtrace always succeeds
//!
//! The evaluator itself is not here. It pushes a frame per recursive step,
//! builds signals at `return-from`/`go`/`throw`, resolves them with the
//! helpers in `unwind`, and calls `raise` on errors.

pub mod backtrace;
pub mod context;
pub mod errors;
pub mod formatter;
pub mod ledger;
pub mod primitives;
pub mod raise;
pub mod types;
pub mod unwind;

#[cfg(test)]
mod tests;

// Re-export commonly used items
pub use context::ExecutionContext;
pub use errors::{Fatal, RegistrationError};
pub use formatter::{FormatError, Formatter};
pub use ledger::{FrameLedger, DEFAULT_MAX_DEPTH};
pub use types::{EvalResult, Flow, Ident, Identity, Signal, SignalKind};
pub use unwind::{catch_block, catch_tag, catch_throw, Resume};
