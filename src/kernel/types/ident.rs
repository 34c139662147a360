//! Identity handles and the `eq` comparison contract

use std::fmt;
use std::rc::Rc;

/* ===================== Identity ===================== */

/// Lisp `eq` semantics: two values are the same object.
///
/// Implementations must never fall back to structural comparison for heap
/// objects; two distinct symbols that print identically are not the same.
pub trait Identity {
    fn is_same(&self, other: &Self) -> bool;
}

impl<T: ?Sized> Identity for Rc<T> {
    fn is_same(&self, other: &Self) -> bool {
        Rc::ptr_eq(self, other)
    }
}

/* ===================== Ident ===================== */

/// A named object compared by identity
///
/// Used for named-block exits: each block form gets its own `Ident`, so two
/// lexically distinct blocks called `foo` never catch each other's exits.
/// Cloning shares the identity.
#[derive(Clone)]
pub struct Ident(Rc<str>);

impl Ident {
    /// Create a fresh identity with the given printed name
    pub fn new(name: impl AsRef<str>) -> Self {
        Ident(Rc::from(name.as_ref()))
    }

    pub fn name(&self) -> &str {
        &self.0
    }
}

impl Identity for Ident {
    fn is_same(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl PartialEq for Ident {
    fn eq(&self, other: &Self) -> bool {
        self.is_same(other)
    }
}

impl Eq for Ident {}

impl fmt::Debug for Ident {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#<ident {} @{:p}>", self.0, Rc::as_ptr(&self.0) as *const u8)
    }
}

impl fmt::Display for Ident {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
