//! Raise mechanism
//!
//! `raise` is the single entry point for language-level errors. It composes
//! the formatter's rendering of the directive and its data, a blank line, and
//! the current backtrace into one `Fatal::Raised`.
//!
//! Before a formatter exists (early bring-up) there is nothing to render
//! with, so the arguments are logged and a `Fatal::Unformatted` is returned
//! instead. Callers can tell the two apart by variant.

use super::backtrace::{render_datum, render_frames};
use super::context::ExecutionContext;
use super::errors::Fatal;
use super::types::Signal;
use std::fmt::Debug;
use tracing::{debug, error};

impl<V: Debug> ExecutionContext<V> {
    /// Build the fatal failure for an error condition
    ///
    /// Never fails itself: a formatter that cannot render the message still
    /// yields a `Fatal::Raised` with an inline marker in place of the text.
    pub fn raise(&self, directive: &str, data: &[V]) -> Fatal {
        let Some(formatter) = self.formatter() else {
            error!(directive, data = ?data, "raise before formatter registration");
            return Fatal::Unformatted {
                directive: directive.to_string(),
            };
        };

        let mut message = match formatter.format(directive, data) {
            Ok(text) => text,
            Err(e) => format!("#<error formatting {}: {}>", directive, e),
        };
        message.push_str("\n\n");
        message.push_str(&self.backtrace());

        Fatal::Raised { message }
    }

    /// Build the fatal failure for a signal that reached the top level
    ///
    /// The backtrace covers the frames the signal unwound through as well as
    /// any still pending.
    pub fn escaped(&self, signal: &Signal<V>) -> Fatal {
        let kind = signal.kind();
        let target = match signal {
            Signal::Block(exit) => format!("no enclosing block named {}", exit.name()),
            Signal::Tag(exit) => format!(
                "no enclosing tag body at level {} for tag {}",
                exit.level(),
                exit.index()
            ),
            Signal::Catch(exit) => format!(
                "no catch for tag {}",
                render_datum(exit.symbol(), self.formatter())
            ),
        };
        debug!(%kind, %target, "signal escaped every handler");

        let backtrace = render_frames(self.ledger().unwound_first(), self.formatter());
        Fatal::Escaped {
            kind,
            message: format!("{}: {}\n\n{}", kind, target, backtrace),
        }
    }
}
