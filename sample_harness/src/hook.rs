//! Shared, cloneable callables used for per-attribute and per-run overrides.

use std::fmt;
use std::ops::Deref;
use std::rc::Rc;

/// Reference-counted callable that survives configuration cloning.
///
/// Hooks are compared and printed by identity only; their behaviour is opaque
/// to the traversal.
pub struct Hook<F: ?Sized>(Rc<F>);

impl<F: ?Sized> Hook<F> {
    /// Wraps an already shared callable.
    #[must_use]
    pub const fn from_rc(inner: Rc<F>) -> Self {
        Self(inner)
    }
}

impl<F: ?Sized> Clone for Hook<F> {
    fn clone(&self) -> Self {
        Self(Rc::clone(&self.0))
    }
}

impl<F: ?Sized> Deref for Hook<F> {
    type Target = F;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<F: ?Sized> fmt::Debug for Hook<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("<hook>")
    }
}
