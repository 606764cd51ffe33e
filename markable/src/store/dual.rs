//! Dual value/representation storage.

use core::mem::{self, ManuallyDrop};

use mark::DualMark;

use super::{RawSlot, Store};

/// Storage alternating between a live value and a live representation
/// object of a different type.
///
/// Exactly one of the two occupies the union at any instant; never both,
/// never neither. Occupancy is "the representation view is not marked",
/// which the [`DualMark`] safety contract keeps answerable even while a
/// value occupies the bytes.
///
/// Every transition is ordered so that no failure point sits between
/// destroying the old occupant and installing the new one:
///
/// 1. anything that can panic (`marked()`, payload clones in callers) runs
///    first, against untouched storage;
/// 2. the old occupant is moved *out* into a local;
/// 3. the new occupant is written, an infallible bitwise move;
/// 4. the local is dropped last, where a panicking destructor can no
///    longer corrupt the slot.
///
/// This is why `marked()` must not panic once storage holds only a value
/// to return to: the empty state must always be constructible.
pub struct Dual<M: DualMark> {
    slot: RawSlot<M::Value, M::Repr>,
}

impl<M: DualMark> Dual<M> {
    const LAYOUT_OK: () = {
        assert!(
            mem::size_of::<M::Repr>() <= mem::size_of::<M::Value>(),
            "DualMark::Repr must not outgrow Value",
        );
        assert!(
            mem::align_of::<M::Repr>() <= mem::align_of::<M::Value>(),
            "DualMark::Repr must not require more alignment than Value",
        );
    };

    /// Replaces the representation occupant with `value`.
    ///
    /// Precondition: currently empty.
    fn change_to_value(&mut self, value: M::Value) {
        debug_assert!(!self.has_value());
        let old = unsafe { ManuallyDrop::take(&mut self.slot.repr) };
        self.slot.value = ManuallyDrop::new(value);
        drop(old);
    }

    /// Replaces the value occupant with a marked representation, returning
    /// the value.
    ///
    /// Precondition: currently occupied.
    fn change_to_marked(&mut self) -> M::Value {
        debug_assert!(self.has_value());
        let marked = M::marked();
        let old = unsafe { ManuallyDrop::take(&mut self.slot.value) };
        self.slot.repr = ManuallyDrop::new(marked);
        old
    }
}

impl<M: DualMark> Store for Dual<M> {
    type Value = M::Value;
    type Repr = M::Repr;

    fn empty() -> Self {
        let () = Self::LAYOUT_OK;
        Dual {
            slot: RawSlot::from_repr(M::marked()),
        }
    }

    fn filled(value: M::Value) -> Self {
        let () = Self::LAYOUT_OK;
        Dual {
            slot: RawSlot::from_value(value),
        }
    }

    fn has_value(&self) -> bool {
        !M::is_marked(self.repr())
    }

    fn repr(&self) -> &M::Repr {
        unsafe { &self.slot.repr }
    }

    unsafe fn value_unchecked(&self) -> &M::Value {
        &self.slot.value
    }

    unsafe fn value_unchecked_mut(&mut self) -> &mut M::Value {
        &mut self.slot.value
    }

    fn fill(&mut self, value: M::Value) {
        if self.has_value() {
            let old = unsafe { ManuallyDrop::take(&mut self.slot.value) };
            self.slot.value = ManuallyDrop::new(value);
            drop(old);
        } else {
            self.change_to_value(value);
        }
    }

    fn clear(&mut self) {
        if self.has_value() {
            drop(self.change_to_marked());
        }
    }

    fn take(&mut self) -> Option<M::Value> {
        if self.has_value() {
            Some(self.change_to_marked())
        } else {
            None
        }
    }
}

impl<M: DualMark> Drop for Dual<M> {
    fn drop(&mut self) {
        unsafe {
            if self.has_value() {
                ManuallyDrop::drop(&mut self.slot.value)
            } else {
                ManuallyDrop::drop(&mut self.slot.repr)
            }
        }
    }
}

impl<M: DualMark> Clone for Dual<M>
where
    M::Value: Clone,
{
    fn clone(&self) -> Self {
        if self.has_value() {
            Self::filled(unsafe { self.value_unchecked() }.clone())
        } else {
            Self::empty()
        }
    }

    fn clone_from(&mut self, source: &Self) {
        match (self.has_value(), source.has_value()) {
            (true, true) => unsafe {
                self.value_unchecked_mut()
                    .clone_from(source.value_unchecked());
            },
            (true, false) => self.clear(),
            (false, true) => {
                // Clone before disturbing our own occupant.
                let value = unsafe { source.value_unchecked() }.clone();
                self.change_to_value(value);
            }
            (false, false) => {}
        }
    }
}
