use slotmap::{DefaultKey, SecondaryMap, SlotMap};

use super::handle::{Handle, StoreId};

/// Growable collection addressed by [`Handle<T>`].
///
/// Elements live in a generational `SlotMap`, so pushing never invalidates an
/// outstanding handle and removal invalidates exactly the handles of the removed slot.
/// Insertion order is tracked separately so elements can also be addressed by their
/// document position (`handle_at(i)` is the i-th live element).
pub struct Store<T> {
    id: StoreId,
    slots: SlotMap<DefaultKey, T>,
    order: Vec<DefaultKey>,
    positions: SecondaryMap<DefaultKey, usize>,
}

impl<T> Default for Store<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Store<T> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            id: StoreId::next(),
            slots: SlotMap::new(),
            order: Vec::new(),
            positions: SecondaryMap::new(),
        }
    }

    /// Identity of this store; every handle it issues carries it.
    #[inline]
    #[must_use]
    pub fn id(&self) -> StoreId {
        self.id
    }

    /// Appends an element and returns a handle to it.
    pub fn push(&mut self, value: T) -> Handle<T> {
        let key = self.slots.insert(value);
        self.positions.insert(key, self.order.len());
        self.order.push(key);
        Handle::new(self.id, key)
    }

    /// Whether `handle` was issued by this store and its slot is still live.
    #[inline]
    #[must_use]
    pub fn contains(&self, handle: Handle<T>) -> bool {
        handle.store == self.id && self.slots.contains_key(handle.key)
    }

    /// Gets a shared reference, or `None` if the handle is not valid here.
    #[must_use]
    pub fn get(&self, handle: Handle<T>) -> Option<&T> {
        if handle.store != self.id {
            return None;
        }
        self.slots.get(handle.key)
    }

    /// Gets a mutable reference, or `None` if the handle is not valid here.
    pub fn get_mut(&mut self, handle: Handle<T>) -> Option<&mut T> {
        if handle.store != self.id {
            return None;
        }
        self.slots.get_mut(handle.key)
    }

    /// Removes the element, invalidating every handle to its slot.
    ///
    /// Positions of later elements shift down by one.
    pub fn remove(&mut self, handle: Handle<T>) -> Option<T> {
        if handle.store != self.id {
            return None;
        }
        let value = self.slots.remove(handle.key)?;
        if let Some(position) = self.positions.remove(handle.key) {
            self.order.remove(position);
            for (i, key) in self.order.iter().enumerate().skip(position) {
                self.positions.insert(*key, i);
            }
        }
        Some(value)
    }

    /// Handle of the element at `position` in insertion order.
    #[must_use]
    pub fn handle_at(&self, position: usize) -> Option<Handle<T>> {
        self.order.get(position).map(|&key| Handle::new(self.id, key))
    }

    /// Position of `handle` in insertion order.
    #[must_use]
    pub fn index_of(&self, handle: Handle<T>) -> Option<usize> {
        if handle.store != self.id {
            return None;
        }
        self.positions.get(handle.key).copied()
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Handles of all live elements, in insertion order.
    pub fn handles(&self) -> impl Iterator<Item = Handle<T>> + '_ {
        self.order.iter().map(|&key| Handle::new(self.id, key))
    }

    /// All live elements with their handles, in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (Handle<T>, &T)> + '_ {
        self.order
            .iter()
            .map(|&key| (Handle::new(self.id, key), &self.slots[key]))
    }

    /// Mutable access to all live elements, in no particular order.
    pub fn values_mut(&mut self) -> impl Iterator<Item = &mut T> + '_ {
        self.slots.values_mut()
    }
}

impl<T> std::ops::Index<Handle<T>> for Store<T> {
    type Output = T;

    fn index(&self, handle: Handle<T>) -> &T {
        match self.get(handle) {
            Some(value) => value,
            None => panic!("invalid handle {handle:?}"),
        }
    }
}

impl<T> std::ops::IndexMut<Handle<T>> for Store<T> {
    fn index_mut(&mut self, handle: Handle<T>) -> &mut T {
        assert!(self.contains(handle), "invalid handle {handle:?}");
        &mut self.slots[handle.key]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_and_get() {
        let mut store = Store::new();
        let h = store.push("hello".to_string());
        assert_eq!(store.get(h).map(String::as_str), Some("hello"));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_positions_follow_insertion_order() {
        let mut store = Store::new();
        let a = store.push('a');
        let b = store.push('b');
        let c = store.push('c');

        assert_eq!(store.handle_at(1), Some(b));
        assert_eq!(store.index_of(c), Some(2));

        store.remove(a);
        assert_eq!(store.handle_at(0), Some(b));
        assert_eq!(store.index_of(c), Some(1));
        assert_eq!(store.index_of(a), None);
    }

    #[test]
    fn test_reused_slot_does_not_revive_stale_handle() {
        let mut store = Store::new();
        let old = store.push(1);
        store.remove(old);
        let new = store.push(2);

        assert!(store.get(old).is_none());
        assert_eq!(store.get(new), Some(&2));
        assert_ne!(old, new);
    }

    #[test]
    #[should_panic(expected = "invalid handle")]
    fn test_index_with_stale_handle_panics() {
        let mut store = Store::new();
        let h = store.push(1);
        store.remove(h);
        let _ = store[h];
    }
}
