//! Diagnostic formatter
//!
//! The runtime's printer lives outside this crate. It is handed in as a
//! callback taking a format directive and its data. Whatever it does, a
//! failure comes back as a `FormatError`: both `Err` returns and panics.
//!
//! A contained panic still runs the process panic hook, which by default
//! prints to stderr. Hosts that want quiet diagnostics install their own hook
//! with `std::panic::set_hook`.

use std::any::Any;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use thiserror::Error;

/// Why the formatter could not render its data
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct FormatError(pub String);

impl FormatError {
    pub fn new(description: impl Into<String>) -> Self {
        FormatError(description.into())
    }
}

type FormatFn<V> = dyn Fn(&str, &[V]) -> Result<String, FormatError>;

pub struct Formatter<V> {
    func: Box<FormatFn<V>>,
}

impl<V> Formatter<V> {
    pub fn new<F>(func: F) -> Self
    where
        F: Fn(&str, &[V]) -> Result<String, FormatError> + 'static,
    {
        Formatter {
            func: Box::new(func),
        }
    }

    /// Render `data` according to `directive`
    pub fn format(&self, directive: &str, data: &[V]) -> Result<String, FormatError> {
        match panic::catch_unwind(AssertUnwindSafe(|| (self.func)(directive, data))) {
            Ok(result) => result,
            Err(payload) => Err(FormatError(panic_description(payload.as_ref()))),
        }
    }
}

impl<V> fmt::Debug for Formatter<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Formatter(..)")
    }
}

fn panic_description(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "formatter panicked".to_string()
    }
}
