//! Handler helpers
//!
//! Each helper sits where an exit point is established (`block`, `tagbody`,
//! `catch`) and inspects whatever its body unwound with. A signal aimed at
//! this exit point is resolved here; anything else, including every
//! `Flow::Fatal`, is passed on untouched.

use super::types::{EvalResult, Flow, Ident, Identity, Signal};
use tracing::trace;

/// Where a tag body continues after its body returned or unwound
#[derive(Debug, Clone, PartialEq)]
pub enum Resume<V> {
    /// The statement finished normally
    Value(V),
    /// A `go` aimed at this tag body; continue at this tag
    Go(usize),
}

/// Resolve a `return-from` aimed at the block `name`
pub fn catch_block<V>(name: &Ident, result: EvalResult<V>) -> EvalResult<V> {
    match result {
        Err(Flow::Signal(Signal::Block(exit))) if exit.targets(name) => {
            trace!(block = %name, "block exit resolved");
            Ok(exit.into_value())
        }
        other => other,
    }
}

/// Resolve a `go` aimed at one of the `tag_count` tags of the tag body at
/// nesting depth `level`
pub fn catch_tag<V>(
    level: usize,
    tag_count: usize,
    result: EvalResult<V>,
) -> Result<Resume<V>, Flow<V>> {
    match result {
        Ok(value) => Ok(Resume::Value(value)),
        Err(Flow::Signal(Signal::Tag(exit)))
            if exit.level() == level && exit.index() < tag_count =>
        {
            trace!(level, index = exit.index(), "tag exit resolved");
            Ok(Resume::Go(exit.index()))
        }
        Err(flow) => Err(flow),
    }
}

/// Resolve a `throw` whose tag is `eq` to the `catch` tag
pub fn catch_throw<V: Identity>(tag: &V, result: EvalResult<V>) -> EvalResult<V> {
    match result {
        Err(Flow::Signal(Signal::Catch(exit))) if exit.targets(tag) => {
            trace!("catch exit resolved");
            Ok(exit.into_value())
        }
        other => other,
    }
}
