//! Stable Handle System
//!
//! A [`Handle<T>`] is a copyable reference to one slot of a [`Store<T>`](super::Store).
//!
//! # Design Principles
//! - Handles are plain values (`Copy`), so nodes, scenes and shapes can point at each
//!   other without borrowing and without raw pointers into growable vectors
//! - Validity is checked on every dereference, never assumed
//! - Each handle carries the identity of the store that issued it, so a handle from one
//!   asset graph never resolves in another
//! - Slots are generational (backed by `slotmap`): once a slot is removed, every handle
//!   issued for it stays invalid even if the slot index is reused

use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;
use std::sync::atomic::{AtomicU64, Ordering};

use slotmap::DefaultKey;

// Global store id generator
static NEXT_STORE_ID: AtomicU64 = AtomicU64::new(1);

/// Identity of a backing collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StoreId(u64);

impl StoreId {
    pub(crate) fn next() -> Self {
        Self(NEXT_STORE_ID.fetch_add(1, Ordering::Relaxed))
    }
}

/// Reference to an element of a [`Store<T>`](super::Store).
///
/// Two handles are equal iff they were issued by the same store instance for the same
/// slot. Equality says nothing about whether the slot is still live; ask the store.
pub struct Handle<T> {
    pub(crate) store: StoreId,
    pub(crate) key: DefaultKey,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Handle<T> {
    pub(crate) fn new(store: StoreId, key: DefaultKey) -> Self {
        Self {
            store,
            key,
            _marker: PhantomData,
        }
    }

    /// Identity of the store that issued this handle.
    #[inline]
    #[must_use]
    pub fn store_id(&self) -> StoreId {
        self.store
    }
}

impl<T> Clone for Handle<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Handle<T> {}

impl<T> PartialEq for Handle<T> {
    fn eq(&self, other: &Self) -> bool {
        self.store == other.store && self.key == other.key
    }
}

impl<T> Eq for Handle<T> {}

impl<T> Hash for Handle<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.store.hash(state);
        self.key.hash(state);
    }
}

impl<T> fmt::Debug for Handle<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let type_name = std::any::type_name::<T>();
        let short = type_name.rsplit("::").next().unwrap_or(type_name);
        write!(f, "Handle<{short}>({}, {:?})", self.store.0, self.key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::Store;
    use rustc_hash::FxHashSet;

    #[test]
    fn test_handles_are_copy_and_comparable() {
        let mut store: Store<u32> = Store::new();
        let a = store.push(1);
        let b = a;
        assert_eq!(a, b);
        assert_ne!(a, store.push(2));
    }

    #[test]
    fn test_handles_from_different_stores_differ() {
        let mut first: Store<u32> = Store::new();
        let mut second: Store<u32> = Store::new();
        let a = first.push(7);
        let b = second.push(7);
        assert_ne!(a, b);
        assert!(second.get(a).is_none());
    }

    #[test]
    fn test_handles_as_map_keys() {
        let mut store: Store<&str> = Store::new();
        let a = store.push("a");
        let b = store.push("b");

        let mut set = FxHashSet::default();
        set.insert(a);
        set.insert(b);
        set.insert(a);
        assert_eq!(set.len(), 2);
    }
}
