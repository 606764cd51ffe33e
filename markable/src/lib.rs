//! Compact optional values.
//!
//! A [`Markable`] represents "value present / absent" in exactly the bytes
//! of the value itself, by reserving an otherwise-impossible bit pattern of
//! the stored representation (the *marked value*) to mean "absent". No
//! discriminant byte, no padding: for the built-in policies
//! `size_of::<Markable<..>>() == size_of::<T>()`.
//!
//! ```
//! use markable::{Markable, Member};
//! use mark::MarkInt;
//!
//! type OptIdx = Markable<Member<MarkInt<i32, -1>>>;
//!
//! let empty = OptIdx::empty();
//! assert!(!empty.has_value());
//! assert_eq!(*empty.storage_value(), -1);
//!
//! let zero = OptIdx::new(0);
//! assert!(zero.has_value());
//! assert_eq!(*zero.value(), 0);
//! ```
//!
//! The storage policy (which pattern is reserved, and for which type) lives
//! in the [`mark`] crate; the storage strategy (how the bytes are managed)
//! is the [`Store`] parameter: [`Member`] for always-live storage,
//! [`Buffer`] for raw-buffer storage, [`Dual`] for storage shared between
//! a value and a distinct representation object.
//!
//! Comparison semantics are the second, explicit type parameter: with the
//! default [`ByValue`], absent equals absent and sorts below every present
//! value; [`ByRepr`] compares the raw representation instead, deliberately
//! collapsing absence with its literal pattern.

use core::fmt;
use core::marker::PhantomData;
use core::mem;

use thiserror::Error;

pub mod order;
pub mod store;

pub use mark;
pub use mark::{
    BufferMark, DualMark, Emptiable, Mark, MarkBool, MarkDefault, MarkEmpty, MarkInt, MarkNan,
    MarkOption,
};

pub use crate::order::{ByRepr, ByValue};
pub use crate::store::{Buffer, Dual, Member, Store};

/// A single optional bool in a single byte.
pub type CompactBool = Markable<Member<MarkBool>>;

/// Error from [`Markable::try_new`]: the given value is indistinguishable
/// from the marked (absent) pattern. The value has been dropped.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("value coincides with the marked (empty) representation")]
pub struct MarkedValueError(pub(crate) ());

/// A compact optional: present/absent without a discriminant.
///
/// `S` is the storage strategy, `O` the comparison policy. All
/// lifetime-sensitive work is delegated to `S`; this type only sequences
/// it. There is no synchronization: like any other composite value, shared
/// reads are fine, concurrent mutation is not.
pub struct Markable<S: Store, O = ByValue> {
    store: S,
    marker: PhantomData<O>,
}

impl<S: Store, O> Markable<S, O> {
    /// An absent instance; storage holds the marked pattern.
    pub fn empty() -> Self {
        Markable {
            store: S::empty(),
            marker: PhantomData,
        }
    }

    /// A present instance holding `value`.
    ///
    /// If `value` converts to the marked pattern itself, the result reports
    /// `has_value() == false`; that collision is the policy's contract to
    /// avoid, not this type's to detect. Use [`try_new`](Self::try_new) to
    /// surface it.
    pub fn new(value: S::Value) -> Self {
        Markable {
            store: S::filled(value),
            marker: PhantomData,
        }
    }

    /// Like [`new`](Self::new), but rejects a value that collides with the
    /// marked pattern instead of silently producing an absent instance.
    pub fn try_new(value: S::Value) -> Result<Self, MarkedValueError> {
        let this = Self::new(value);
        if this.has_value() {
            Ok(this)
        } else {
            Err(MarkedValueError(()))
        }
    }

    /// Whether a value is present. Pure; callable any number of times.
    pub fn has_value(&self) -> bool {
        self.store.has_value()
    }

    /// A reference to the contained value.
    ///
    /// # Panics
    ///
    /// Panics if no value is present. The unchecked counterpart is
    /// [`value_unchecked`](Self::value_unchecked).
    pub fn value(&self) -> &S::Value {
        assert!(self.has_value(), "no value present");
        unsafe { self.store.value_unchecked() }
    }

    /// A mutable reference to the contained value.
    ///
    /// # Panics
    ///
    /// Panics if no value is present.
    pub fn value_mut(&mut self) -> &mut S::Value {
        assert!(self.has_value(), "no value present");
        unsafe { self.store.value_unchecked_mut() }
    }

    /// A reference to the contained value, without the presence check.
    ///
    /// # Safety
    ///
    /// `has_value()` must be `true`.
    pub unsafe fn value_unchecked(&self) -> &S::Value {
        self.store.value_unchecked()
    }

    /// Mutable counterpart of [`value_unchecked`](Self::value_unchecked).
    ///
    /// # Safety
    ///
    /// `has_value()` must be `true`.
    pub unsafe fn value_unchecked_mut(&mut self) -> &mut S::Value {
        self.store.value_unchecked_mut()
    }

    /// The raw representation, regardless of state. Diagnostic accessor:
    /// an absent instance exposes the marked pattern itself.
    pub fn storage_value(&self) -> &S::Repr {
        self.store.repr()
    }

    /// Borrowing view as a standard `Option`.
    pub fn as_option(&self) -> Option<&S::Value> {
        if self.has_value() {
            Some(unsafe { self.store.value_unchecked() })
        } else {
            None
        }
    }

    /// Stores `value`, dropping any previous occupant.
    pub fn set(&mut self, value: S::Value) {
        self.store.fill(value);
    }

    /// Transitions to absent, dropping the value if one is present.
    pub fn clear(&mut self) {
        self.store.clear();
    }

    /// Takes the value out, leaving the instance absent.
    pub fn take(&mut self) -> Option<S::Value> {
        self.store.take()
    }

    /// Stores `value` and returns the previous one, if any.
    pub fn replace(&mut self, value: S::Value) -> Option<S::Value> {
        let old = self.store.take();
        self.store.fill(value);
        old
    }

    /// Consumes the instance into a standard `Option`.
    pub fn into_option(mut self) -> Option<S::Value> {
        self.store.take()
    }

    /// Exchanges the occupancy and contents of two instances.
    ///
    /// Moves are bitwise, so this is a plain storage swap: panic-free for
    /// every strategy and occupancy combination, with no payload clones or
    /// drops.
    pub fn swap(&mut self, other: &mut Self) {
        mem::swap(&mut self.store, &mut other.store);
    }
}

impl<S: Store, O> Default for Markable<S, O> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<S: Store + Clone, O> Clone for Markable<S, O> {
    fn clone(&self) -> Self {
        Markable {
            store: self.store.clone(),
            marker: PhantomData,
        }
    }

    fn clone_from(&mut self, source: &Self) {
        // Strategies implement the four-case occupancy split here, reusing
        // the payload's own clone_from when both sides are occupied.
        self.store.clone_from(&source.store);
    }
}

impl<S: Store, O> From<Option<S::Value>> for Markable<S, O> {
    fn from(value: Option<S::Value>) -> Self {
        match value {
            Some(value) => Self::new(value),
            None => Self::empty(),
        }
    }
}

impl<S: Store, O> fmt::Debug for Markable<S, O>
where
    S::Value: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.as_option() {
            Some(value) => write!(f, "Markable({:?})", value),
            None => write!(f, "Markable(empty)"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    type OptInt = Markable<Member<MarkInt<i32, -1>>>;

    #[test]
    fn default_is_empty() {
        let o = OptInt::default();
        assert!(!o.has_value());
        assert_eq!(*o.storage_value(), -1);
    }

    #[test]
    fn try_new_rejects_the_sentinel() {
        assert!(OptInt::try_new(-1).is_err());

        let o = OptInt::try_new(0).unwrap();
        assert_eq!(*o.value(), 0);
    }

    #[test]
    #[should_panic(expected = "no value present")]
    fn value_on_empty_panics() {
        let o = OptInt::empty();
        let _ = o.value();
    }

    #[test]
    fn set_take_replace() {
        let mut o = OptInt::empty();

        o.set(5);
        assert_eq!(o.as_option(), Some(&5));

        assert_eq!(o.replace(6), Some(5));
        assert_eq!(o.take(), Some(6));
        assert_eq!(o.take(), None);
        assert!(!o.has_value());
    }

    #[test]
    fn value_mut_writes_through() {
        let mut o = OptInt::new(1);
        *o.value_mut() = 2;
        assert_eq!(*o.value(), 2);
    }

    #[test]
    fn option_round_trip() {
        let o = OptInt::from(Some(3));
        assert_eq!(o.into_option(), Some(3));

        let o = OptInt::from(None);
        assert_eq!(o.into_option(), None);
    }

    #[test]
    fn debug_formatting() {
        assert_eq!(format!("{:?}", OptInt::new(1)), "Markable(1)");
        assert_eq!(format!("{:?}", OptInt::empty()), "Markable(empty)");
    }
}
