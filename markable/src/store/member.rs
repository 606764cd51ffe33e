//! Direct member storage.

use core::mem;

use mark::Mark;

use super::Store;

/// Storage that keeps the policy's storage type as a plain, always-live
/// data member.
///
/// The member is the marked value while empty and `M::store(v)` while
/// occupied; ordinary construction and drop of the member cover both
/// states, so no manual lifetime work is needed.
pub struct Member<M: Mark> {
    storage: M::Storage,
}

impl<M: Mark> Store for Member<M> {
    type Value = M::Value;
    type Repr = M::Storage;

    fn empty() -> Self {
        Member {
            storage: M::marked(),
        }
    }

    fn filled(value: M::Value) -> Self {
        Member {
            storage: M::store(value),
        }
    }

    fn has_value(&self) -> bool {
        !M::is_marked(&self.storage)
    }

    fn repr(&self) -> &M::Storage {
        &self.storage
    }

    unsafe fn value_unchecked(&self) -> &M::Value {
        M::access(&self.storage)
    }

    unsafe fn value_unchecked_mut(&mut self) -> &mut M::Value {
        M::access_mut(&mut self.storage)
    }

    fn fill(&mut self, value: M::Value) {
        // Convert before touching the member; a panicking store() must
        // leave the old state intact.
        let new = M::store(value);
        drop(mem::replace(&mut self.storage, new));
    }

    fn clear(&mut self) {
        let marked = M::marked();
        drop(mem::replace(&mut self.storage, marked));
    }

    fn take(&mut self) -> Option<M::Value> {
        if self.has_value() {
            let marked = M::marked();
            let old = mem::replace(&mut self.storage, marked);
            Some(unsafe { M::unstore(old) })
        } else {
            None
        }
    }
}

impl<M: Mark> Clone for Member<M>
where
    M::Storage: Clone,
{
    fn clone(&self) -> Self {
        Member {
            storage: self.storage.clone(),
        }
    }

    fn clone_from(&mut self, source: &Self) {
        self.storage.clone_from(&source.storage);
    }
}
