//! Comparison policies.
//!
//! Whether two markables compare by wrapped value or by raw representation
//! is an explicit choice, made as the wrapper's second type parameter.
//! Historical variants of this design disagreed on what "absent" compares
//! as; here the choice is spelled at the type level instead of hidden in a
//! default.

use core::cmp::Ordering;
use core::hash::{Hash, Hasher};

use crate::{Markable, Store};

/// Compare by wrapped value: absent equals absent and sorts strictly below
/// every present value.
///
/// Hashing writes a discriminant byte first, so an absent instance hashes
/// differently from a present one whose value happens to convert to the
/// marked pattern's bytes.
pub struct ByValue;

/// Compare by raw representation.
///
/// Absence deliberately collapses with the literal marked pattern: for
/// `MarkInt<i32, -1>`, an absent instance sorts between `-2` and `0`,
/// exactly where `-1` would. Useful when the representation ordering *is*
/// the intended ordering (sentinel keys, sort-order-preserving sentinels).
pub struct ByRepr;

impl<S: Store> PartialEq for Markable<S, ByValue>
where
    S::Value: PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        match (self.as_option(), other.as_option()) {
            (Some(a), Some(b)) => a == b,
            (None, None) => true,
            _ => false,
        }
    }
}

impl<S: Store> Eq for Markable<S, ByValue> where S::Value: Eq {}

impl<S: Store> PartialOrd for Markable<S, ByValue>
where
    S::Value: PartialOrd,
{
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match (self.as_option(), other.as_option()) {
            (Some(a), Some(b)) => a.partial_cmp(b),
            (None, None) => Some(Ordering::Equal),
            (None, Some(_)) => Some(Ordering::Less),
            (Some(_), None) => Some(Ordering::Greater),
        }
    }
}

impl<S: Store> Ord for Markable<S, ByValue>
where
    S::Value: Ord,
{
    fn cmp(&self, other: &Self) -> Ordering {
        match (self.as_option(), other.as_option()) {
            (Some(a), Some(b)) => a.cmp(b),
            (None, None) => Ordering::Equal,
            (None, Some(_)) => Ordering::Less,
            (Some(_), None) => Ordering::Greater,
        }
    }
}

impl<S: Store> Hash for Markable<S, ByValue>
where
    S::Value: Hash,
{
    fn hash<H: Hasher>(&self, state: &mut H) {
        match self.as_option() {
            Some(value) => {
                state.write_u8(1);
                value.hash(state);
            }
            None => state.write_u8(0),
        }
    }
}

impl<S: Store> PartialEq for Markable<S, ByRepr>
where
    S::Repr: PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.storage_value() == other.storage_value()
    }
}

impl<S: Store> Eq for Markable<S, ByRepr> where S::Repr: Eq {}

impl<S: Store> PartialOrd for Markable<S, ByRepr>
where
    S::Repr: PartialOrd,
{
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.storage_value().partial_cmp(other.storage_value())
    }
}

impl<S: Store> Ord for Markable<S, ByRepr>
where
    S::Repr: Ord,
{
    fn cmp(&self, other: &Self) -> Ordering {
        self.storage_value().cmp(other.storage_value())
    }
}

impl<S: Store> Hash for Markable<S, ByRepr>
where
    S::Repr: Hash,
{
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.storage_value().hash(state);
    }
}
