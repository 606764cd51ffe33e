//! Storage policies for markable (compact optional) values.
//!
//! A policy reserves a *marked value*: a bit pattern of the stored
//! representation that a legitimately stored value can never produce. A
//! wrapper built over such a policy can encode "no value" as that exact
//! pattern, so `size_of::<Markable<..>>() == size_of::<T>()` with no
//! discriminant byte on the side.
//!
//! Three trait families cover the three ways storage can be laid out:
//!
//! * [`Mark`]: the storage type is an ordinary, always-live value;
//!   "empty" is just one particular value of it.
//! * [`BufferMark`]: the value lives in raw storage that, while empty,
//!   holds a plain `Copy` bit pattern instead of a live value.
//! * [`DualMark`]: the raw storage alternates between a live value and a
//!   live *representation* object of a different type.
//!
//! Choosing the marked value is a contract, not something these traits can
//! verify: if the pattern can arise from a real value, presence checks lie.

pub mod scalar;
pub mod empty;
pub mod enums;

pub use crate::scalar::{MarkBool, MarkDefault, MarkInt, MarkNan};
pub use crate::empty::{Emptiable, MarkEmpty, MarkOption};

/// A storage policy whose storage is an always-live value.
///
/// `Storage` doubles as the representation type: the same value that is
/// inspected by [`is_marked`](Mark::is_marked) is the one handed back by
/// [`access`](Mark::access). Policies where the two genuinely differ want
/// [`DualMark`] instead.
pub trait Mark {
    /// The logical payload type.
    type Value;

    /// The physical type kept in storage. Often equal to `Value`.
    type Storage;

    /// The storage value that encodes absence.
    ///
    /// Must not panic: emptying a wrapper has no way to report failure, and
    /// the empty state must always be constructible.
    fn marked() -> Self::Storage;

    /// Whether `storage` is the marked (absent) value. Pure; no side effects.
    fn is_marked(storage: &Self::Storage) -> bool;

    /// Converts an incoming value into its stored form.
    fn store(value: Self::Value) -> Self::Storage;

    /// Extracts a value reference from occupied storage.
    ///
    /// # Safety
    ///
    /// `is_marked(storage)` must be `false`.
    unsafe fn access(storage: &Self::Storage) -> &Self::Value;

    /// Mutable counterpart of [`access`](Mark::access).
    ///
    /// # Safety
    ///
    /// `is_marked(storage)` must be `false`. The callee may freely mutate
    /// the value, including into one that equals the marked pattern; the
    /// policy author decides whether that is a logic error.
    unsafe fn access_mut(storage: &mut Self::Storage) -> &mut Self::Value;

    /// Converts occupied storage back into the value it stores.
    ///
    /// # Safety
    ///
    /// `is_marked(storage)` must be `false`.
    unsafe fn unstore(storage: Self::Storage) -> Self::Value;
}

/// A storage policy for values hosted in raw buffer storage.
///
/// While empty, the buffer holds a `Raw` bit pattern rather than a live
/// value; while occupied, the value object itself occupies the same bytes
/// and the `Raw` view of those bytes is what presence checks read.
///
/// # Safety
///
/// Implementors must guarantee:
///
/// * `Raw` has exactly the size and alignment of `Value`;
/// * the bytes of any live `Value`, reinterpreted as `Raw`, form a valid
///   `Raw` for which [`is_marked`](BufferMark::is_marked) returns `false`;
/// * [`marked`](BufferMark::marked) does not panic.
pub unsafe trait BufferMark {
    /// The logical payload type.
    type Value;

    /// The bit-pattern type the buffer holds while empty.
    type Raw: Copy;

    /// The raw pattern that encodes absence.
    fn marked() -> Self::Raw;

    /// Whether `raw` is the marked (absent) pattern.
    fn is_marked(raw: &Self::Raw) -> bool;
}

/// A storage policy whose empty state is a live object of a distinct
/// *representation* type.
///
/// Unlike [`BufferMark::Raw`], `Repr` is a real type: it may own resources
/// and runs its destructor when the storage switches back to holding a
/// value. Exactly one of {value, representation} is alive at any instant.
///
/// # Safety
///
/// Implementors must guarantee:
///
/// * `Repr`'s size and alignment do not exceed `Value`'s;
/// * the leading bytes of any live `Value`, reinterpreted as `Repr`, form a
///   `Repr` that is valid to read and for which
///   [`is_marked`](DualMark::is_marked) returns `false`;
/// * [`marked`](DualMark::marked) does not panic; it is what makes the
///   empty state constructible on every transition out of the value state.
pub unsafe trait DualMark {
    /// The logical payload type.
    type Value;

    /// The representation type occupying storage while empty.
    type Repr;

    /// The representation object that encodes absence.
    fn marked() -> Self::Repr;

    /// Whether `repr` is a marked (absent) representation.
    fn is_marked(repr: &Self::Repr) -> bool;
}
