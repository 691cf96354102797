//! Callback wrapper for components that report events to their parent.
//!
//! A child component stores a `Callback<T, M>` instead of a raw
//! `Option<Rc<dyn Fn(T) -> M>>`; the parent decides which message `M` an
//! event turns into.

use std::fmt;
use std::rc::Rc;

/// Optional event handler mapping a value `T` to a parent message `M`.
pub struct Callback<T, M> {
    f: Option<Rc<dyn Fn(T) -> M>>,
}

impl<T, M> Callback<T, M> {
    /// Wrap a function.
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(T) -> M + 'static,
    {
        Self {
            f: Some(Rc::new(f)),
        }
    }

    /// A callback with no handler attached.
    pub fn none() -> Self {
        Self { f: None }
    }

    /// Invoke the handler, returning its message if one is attached.
    pub fn call(&self, value: T) -> Option<M> {
        self.f.as_ref().map(|f| f(value))
    }

    pub fn is_some(&self) -> bool {
        self.f.is_some()
    }
}

impl<T, M> Default for Callback<T, M> {
    fn default() -> Self {
        Self::none()
    }
}

// The handler is shared, so clones keep firing into the same parent.
impl<T, M> Clone for Callback<T, M> {
    fn clone(&self) -> Self {
        Self { f: self.f.clone() }
    }
}

impl<T, M> fmt::Debug for Callback<T, M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Callback")
            .field("set", &self.is_some())
            .finish()
    }
}
