//! Control primitives exposed to the standard library

use super::errors::Fatal;
use super::types::{Flow, Identity};

/// `eq`: object identity
pub fn eq<V: Identity>(x: &V, y: &V) -> bool {
    x.is_same(y)
}

/// `error`: fail with `message` as given
///
/// Unlike `raise`, nothing is formatted and no backtrace is attached.
pub fn error<T, V>(message: impl Into<String>) -> Result<T, Flow<V>> {
    Err(Flow::Fatal(Fatal::Error(message.into())))
}
