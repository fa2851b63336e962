//! Shared, copy-on-write storage for heap-backed values.
//!
//! Every container inside a [`Thing`](crate::Thing) lives behind a `Heap<T>`.
//! Cloning a `Heap` only bumps a reference count, so assigning a value to a
//! second variable or passing it as an argument never copies the payload.
//! Mutation goes through [`Heap::make_mut`], which hands out a unique
//! reference and clones the payload first if anyone else still holds it.
//! An owner can therefore never observe another owner's edits.

use std::fmt;
use std::ops::Deref;
use std::sync::Arc;

/// Reference-counted payload of a [`Thing`](crate::Thing).
///
/// The constructor is crate-private: values are built through the factory
/// methods on `Thing` (`Thing::string`, `Thing::list`, ...).
#[repr(transparent)]
pub struct Heap<T: ?Sized>(Arc<T>);

impl<T> Heap<T> {
    #[inline]
    pub(crate) fn new(value: T) -> Self {
        Heap(Arc::new(value))
    }

    /// Unique mutable access, cloning the payload if it is shared.
    #[inline]
    pub fn make_mut(&mut self) -> &mut T
    where
        T: Clone,
    {
        Arc::make_mut(&mut self.0)
    }

    /// Take the payload, cloning it only if other owners remain.
    pub fn into_owned(self) -> T
    where
        T: Clone,
    {
        Arc::try_unwrap(self.0).unwrap_or_else(|shared| (*shared).clone())
    }
}

impl<T: ?Sized> Heap<T> {
    /// Whether more than one owner currently references this payload.
    #[inline]
    pub fn is_shared(&self) -> bool {
        Arc::strong_count(&self.0) > 1
    }

    /// Whether two handles point at the same allocation.
    #[inline]
    pub fn ptr_eq(a: &Self, b: &Self) -> bool {
        Arc::ptr_eq(&a.0, &b.0)
    }
}

impl<T: ?Sized> Deref for Heap<T> {
    type Target = T;

    #[inline]
    fn deref(&self) -> &T {
        &self.0
    }
}

impl<T: ?Sized> Clone for Heap<T> {
    #[inline]
    fn clone(&self) -> Self {
        Heap(Arc::clone(&self.0))
    }
}

impl<T: ?Sized + PartialEq> PartialEq for Heap<T> {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0) || *self.0 == *other.0
    }
}

impl<T: ?Sized + fmt::Debug> fmt::Debug for Heap<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl<T: ?Sized> AsRef<T> for Heap<T> {
    #[inline]
    fn as_ref(&self) -> &T {
        &self.0
    }
}
