//! Non-local exit signals
//!
//! A `Signal` is created at a `return-from`, `go` or `throw` site and carried
//! up through `Flow::Signal` until a handler that it targets resolves it.
//! Every intermediate handler that is not the target passes it on unchanged.
//! Signals are immutable once built: fields are private and only readable.

use super::ident::{Ident, Identity};
use std::fmt;

/* ===================== Variants ===================== */

/// Exit from a named block (`return-from`)
///
/// Targets the block whose name is the *same* `Ident`, never one that merely
/// prints the same.
#[derive(Debug, Clone)]
pub struct BlockExit<V> {
    name: Ident,
    value: V,
}

impl<V> BlockExit<V> {
    pub fn name(&self) -> &Ident {
        &self.name
    }

    pub fn value(&self) -> &V {
        &self.value
    }

    pub fn into_value(self) -> V {
        self.value
    }

    /// Whether the block named `name` is the target of this exit
    pub fn targets(&self, name: &Ident) -> bool {
        self.name.is_same(name)
    }
}

/// Jump to a tag inside a lexically enclosing tag body (`go`)
///
/// `level` is the static nesting depth of the tag body, `index` the position
/// of the target tag within it. Both are resolved at compile time, so plain
/// equality is the matching rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TagExit {
    level: usize,
    index: usize,
}

impl TagExit {
    pub fn level(&self) -> usize {
        self.level
    }

    pub fn index(&self) -> usize {
        self.index
    }

    /// Whether the tag `(level, index)` is the target of this exit
    pub fn targets(&self, level: usize, index: usize) -> bool {
        self.level == level && self.index == index
    }
}

/// Dynamic exit to a `catch` (`throw`)
///
/// The tag is an ordinary runtime value, compared with `eq` at the moment
/// the signal passes each `catch`.
#[derive(Debug, Clone)]
pub struct CatchExit<V> {
    symbol: V,
    value: V,
}

impl<V> CatchExit<V> {
    pub fn symbol(&self) -> &V {
        &self.symbol
    }

    pub fn value(&self) -> &V {
        &self.value
    }

    pub fn into_value(self) -> V {
        self.value
    }

    pub fn into_parts(self) -> (V, V) {
        (self.symbol, self.value)
    }
}

impl<V: Identity> CatchExit<V> {
    /// Whether a `catch` established with `tag` is the target of this exit
    pub fn targets(&self, tag: &V) -> bool {
        self.symbol.is_same(tag)
    }
}

/* ===================== Signal ===================== */

/// The three non-local exit carriers
#[derive(Debug, Clone)]
pub enum Signal<V> {
    Block(BlockExit<V>),
    Tag(TagExit),
    Catch(CatchExit<V>),
}

impl<V> Signal<V> {
    /// Build a named-block exit
    pub fn block(name: Ident, value: V) -> Self {
        Signal::Block(BlockExit { name, value })
    }

    /// Build a lexical tag exit
    pub fn tag(level: usize, index: usize) -> Self {
        Signal::Tag(TagExit { level, index })
    }

    /// Build a dynamic catch exit
    pub fn catch(symbol: V, value: V) -> Self {
        Signal::Catch(CatchExit { symbol, value })
    }

    pub fn kind(&self) -> SignalKind {
        match self {
            Signal::Block(_) => SignalKind::Block,
            Signal::Tag(_) => SignalKind::Tag,
            Signal::Catch(_) => SignalKind::Catch,
        }
    }
}

/// Variant tag without payload, for diagnostics
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignalKind {
    Block,
    Tag,
    Catch,
}

impl SignalKind {
    /// The operator that creates this kind of signal
    pub fn operator(self) -> &'static str {
        match self {
            SignalKind::Block => "return-from",
            SignalKind::Tag => "go",
            SignalKind::Catch => "throw",
        }
    }
}

impl fmt::Display for SignalKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.operator())
    }
}
