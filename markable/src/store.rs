//! Storage strategies.
//!
//! A [`Store`] is the physical backing of one markable instance. The
//! wrapper never touches lifetimes itself; every construct/destroy decision
//! lives behind this trait, and each strategy upholds the single-occupant
//! invariant its own way:
//!
//! * [`Member`] keeps the policy's storage type as an always-live field;
//!   nothing to track, ordinary drop suffices.
//! * [`Buffer`] keeps a union of the value and a `Copy` bit pattern;
//!   occupancy is decided by reading the pattern view.
//! * [`Dual`] keeps a union of the value and a live representation object;
//!   both occupants require construction and destruction.

use core::mem::ManuallyDrop;

pub mod member;
pub mod buffer;
pub mod dual;

pub use self::buffer::Buffer;
pub use self::dual::Dual;
pub use self::member::Member;

/// The physical backing of a markable instance.
///
/// Implementations maintain one invariant: the storage is always in exactly
/// one well-formed state, empty or occupied, even while a payload `Clone`
/// or `Drop` panics mid-transition.
pub trait Store: Sized {
    /// The logical payload type.
    type Value;

    /// The representation exposed for diagnostics; what presence checks read.
    type Repr;

    /// Storage in the empty state.
    fn empty() -> Self;

    /// Storage occupied by `value`.
    fn filled(value: Self::Value) -> Self;

    /// Whether a value currently occupies the storage.
    fn has_value(&self) -> bool;

    /// The raw representation. Callable in either state.
    fn repr(&self) -> &Self::Repr;

    /// # Safety
    ///
    /// `has_value()` must be `true`.
    unsafe fn value_unchecked(&self) -> &Self::Value;

    /// # Safety
    ///
    /// `has_value()` must be `true`.
    unsafe fn value_unchecked_mut(&mut self) -> &mut Self::Value;

    /// Transitions to occupied, dropping any previous occupant.
    fn fill(&mut self, value: Self::Value);

    /// Transitions to empty, dropping the value if one is present.
    fn clear(&mut self);

    /// Transitions to empty, returning the value if one was present.
    fn take(&mut self) -> Option<Self::Value>;
}

/// Shared two-occupant storage for the buffer and dual strategies.
///
/// Occupancy is tracked externally, by whether the `repr` view of the bytes
/// satisfies the policy's marked-pattern check.
pub(crate) union RawSlot<V, R> {
    pub(crate) value: ManuallyDrop<V>,
    pub(crate) repr: ManuallyDrop<R>,
}

impl<V, R> RawSlot<V, R> {
    pub(crate) fn from_value(value: V) -> Self {
        RawSlot {
            value: ManuallyDrop::new(value),
        }
    }

    pub(crate) fn from_repr(repr: R) -> Self {
        RawSlot {
            repr: ManuallyDrop::new(repr),
        }
    }
}
