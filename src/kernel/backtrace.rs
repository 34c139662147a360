//! Backtrace rendering
//!
//! Rendering must not fail: a frame the formatter cannot print becomes an
//! inline `#<error printing ...>` marker and the remaining lines are still
//! produced.

use super::errors::{BACKTRACE_HEADER, FRAME_DIRECTIVE};
use super::formatter::Formatter;
use super::ledger::FrameLedger;
use std::fmt::{Debug, Write};
use std::slice;

/// Render the ledger newest-first, one numbered line per frame
///
/// ```text
/// Backtrace:
/// 0: <newest>
/// ...
/// n: <oldest>
/// ```
pub fn render_backtrace<V: Debug>(
    ledger: &FrameLedger<V>,
    formatter: Option<&Formatter<V>>,
) -> String {
    render_frames(ledger.newest_first(), formatter)
}

/// Render `frames` in the order given under the backtrace header
pub fn render_frames<'a, V: Debug + 'a>(
    frames: impl Iterator<Item = &'a V>,
    formatter: Option<&Formatter<V>>,
) -> String {
    let mut out = String::from(BACKTRACE_HEADER);
    for (n, frame) in frames.enumerate() {
        if n > 0 {
            out.push('\n');
        }
        // Writing into a String cannot fail
        let _ = write!(out, "{}: {}", n, render_datum(frame, formatter));
    }
    out
}

/// Render one value with the frame directive
///
/// Without a formatter the value's `Debug` form is used.
pub fn render_datum<V: Debug>(value: &V, formatter: Option<&Formatter<V>>) -> String {
    let Some(formatter) = formatter else {
        return format!("{:?}", value);
    };
    match formatter.format(FRAME_DIRECTIVE, slice::from_ref(value)) {
        Ok(text) => text,
        Err(e) => format!("#<error printing {}>", e),
    }
}
