//! Type definitions for the control kernel
//!
//! - Identity handles (Ident, Identity)
//! - Non-local exit signals (Signal and its variants)
//! - The evaluation outcome (Flow, EvalResult)

pub mod flow;
pub mod ident;
pub mod signal;

pub use flow::{EvalResult, Flow};
pub use ident::{Ident, Identity};
pub use signal::{BlockExit, CatchExit, Signal, SignalKind, TagExit};
