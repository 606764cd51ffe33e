//! Raw buffer storage.

use core::mem::{self, ManuallyDrop};

use mark::BufferMark;

use super::{RawSlot, Store};

/// Storage hosting the value in a raw buffer.
///
/// While empty, the buffer holds the policy's `Raw` marked pattern and no
/// value exists; while occupied, the value itself lives in the same bytes.
/// There is no separate flag: occupancy is exactly "the raw view is not the
/// marked pattern", which the [`BufferMark`] safety contract makes a valid
/// question to ask in either state.
///
/// Transitions move the old occupant out of the buffer before installing
/// the new state, so a panicking payload `Drop` runs against a local and
/// can never leave the buffer half-changed.
pub struct Buffer<M: BufferMark> {
    slot: RawSlot<M::Value, M::Raw>,
}

impl<M: BufferMark> Buffer<M> {
    // Evaluated at monomorphization; a policy violating the layout half of
    // its contract fails to compile rather than corrupting memory.
    const LAYOUT_OK: () = {
        assert!(
            mem::size_of::<M::Value>() == mem::size_of::<M::Raw>(),
            "BufferMark::Raw must have the size of Value",
        );
        assert!(
            mem::align_of::<M::Value>() == mem::align_of::<M::Raw>(),
            "BufferMark::Raw must have the alignment of Value",
        );
    };
}

impl<M: BufferMark> Store for Buffer<M> {
    type Value = M::Value;
    type Repr = M::Raw;

    fn empty() -> Self {
        let () = Self::LAYOUT_OK;
        Buffer {
            slot: RawSlot::from_repr(M::marked()),
        }
    }

    fn filled(value: M::Value) -> Self {
        let () = Self::LAYOUT_OK;
        Buffer {
            slot: RawSlot::from_value(value),
        }
    }

    fn has_value(&self) -> bool {
        !M::is_marked(self.repr())
    }

    fn repr(&self) -> &M::Raw {
        // Sound in either state: the contract guarantees live value bytes
        // read back as a valid Raw.
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
            self.slot.value = ManuallyDrop::new(value);
        }
    }

    fn clear(&mut self) {
        if self.has_value() {
            let marked = M::marked();
            let old = unsafe { ManuallyDrop::take(&mut self.slot.value) };
            self.slot.repr = ManuallyDrop::new(marked);
            drop(old);
        }
    }

    fn take(&mut self) -> Option<M::Value> {
        if self.has_value() {
            let marked = M::marked();
            let old = unsafe { ManuallyDrop::take(&mut self.slot.value) };
            self.slot.repr = ManuallyDrop::new(marked);
            Some(old)
        } else {
            None
        }
    }
}

impl<M: BufferMark> Drop for Buffer<M> {
    fn drop(&mut self) {
        if self.has_value() {
            unsafe { ManuallyDrop::drop(&mut self.slot.value) }
        }
        // The marked pattern is Copy; nothing to do for the empty state.
    }
}

impl<M: BufferMark> Clone for Buffer<M>
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
            (false, true) => self.fill(unsafe { source.value_unchecked() }.clone()),
            (false, false) => {}
        }
    }
}
