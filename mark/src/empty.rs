//! Policies built on semantic emptiness.
//!
//! Containers already carry a "no contents" state; reusing it as the marked
//! value costs nothing. The trade is that an intentionally empty container
//! can no longer be distinguished from absence.

use core::marker::PhantomData;
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet, VecDeque};
use std::ffi::OsString;
use std::hash::BuildHasher;

use crate::Mark;

/// A type with a cheaply constructible, cheaply testable empty state.
///
/// `empty()` is expected not to allocate and not to panic; it is a marked
/// value and gets constructed on every transition to the empty state.
pub trait Emptiable {
    fn empty() -> Self;
    fn is_empty(&self) -> bool;
}

impl Emptiable for String {
    fn empty() -> Self {
        String::new()
    }

    fn is_empty(&self) -> bool {
        self.is_empty()
    }
}

impl Emptiable for OsString {
    fn empty() -> Self {
        OsString::new()
    }

    fn is_empty(&self) -> bool {
        self.is_empty()
    }
}

impl<T> Emptiable for Vec<T> {
    fn empty() -> Self {
        Vec::new()
    }

    fn is_empty(&self) -> bool {
        self.is_empty()
    }
}

impl<T> Emptiable for VecDeque<T> {
    fn empty() -> Self {
        VecDeque::new()
    }

    fn is_empty(&self) -> bool {
        self.is_empty()
    }
}

impl<K, V> Emptiable for BTreeMap<K, V> {
    fn empty() -> Self {
        BTreeMap::new()
    }

    fn is_empty(&self) -> bool {
        self.is_empty()
    }
}

impl<T> Emptiable for BTreeSet<T> {
    fn empty() -> Self {
        BTreeSet::new()
    }

    fn is_empty(&self) -> bool {
        self.is_empty()
    }
}

impl<K, V, S: Default + BuildHasher> Emptiable for HashMap<K, V, S> {
    fn empty() -> Self {
        HashMap::default()
    }

    fn is_empty(&self) -> bool {
        self.is_empty()
    }
}

impl<T, S: Default + BuildHasher> Emptiable for HashSet<T, S> {
    fn empty() -> Self {
        HashSet::default()
    }

    fn is_empty(&self) -> bool {
        self.is_empty()
    }
}

/// Emptiness as the sentinel: an empty container means "no value".
pub struct MarkEmpty<T>(PhantomData<T>);

impl<T: Emptiable> Mark for MarkEmpty<T> {
    type Value = T;
    type Storage = T;

    #[inline]
    fn marked() -> T {
        T::empty()
    }

    #[inline]
    fn is_marked(storage: &T) -> bool {
        storage.is_empty()
    }

    #[inline]
    fn store(value: T) -> T {
        value
    }

    #[inline]
    unsafe fn access(storage: &T) -> &T {
        storage
    }

    #[inline]
    unsafe fn access_mut(storage: &mut T) -> &mut T {
        storage
    }

    #[inline]
    unsafe fn unstore(storage: T) -> T {
        storage
    }
}

/// Delegation to `Option<T>`'s own empty state.
///
/// This is the degenerate policy with no size win at all: `None` is the
/// marked value. It exists so code generic over policies can also wrap
/// types that genuinely have no pattern to spare.
pub struct MarkOption<T>(PhantomData<T>);

impl<T> Mark for MarkOption<T> {
    type Value = T;
    type Storage = Option<T>;

    #[inline]
    fn marked() -> Option<T> {
        None
    }

    #[inline]
    fn is_marked(storage: &Option<T>) -> bool {
        storage.is_none()
    }

    #[inline]
    fn store(value: T) -> Option<T> {
        Some(value)
    }

    #[inline]
    unsafe fn access(storage: &Option<T>) -> &T {
        storage.as_ref().unwrap_unchecked()
    }

    #[inline]
    unsafe fn access_mut(storage: &mut Option<T>) -> &mut T {
        storage.as_mut().unwrap_unchecked()
    }

    #[inline]
    unsafe fn unstore(storage: Option<T>) -> T {
        storage.unwrap_unchecked()
    }
}
