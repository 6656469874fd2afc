//! Generation-checked handles into an owning arena.
//!
//! Handles cross the plugin boundary in place of addresses. Removing an entry bumps its
//! slot's generation, so a handle kept past its owner's lifetime fails lookup instead of
//! reaching whatever reused the slot.

use std::fmt;
use std::marker::PhantomData;

use ofxh_property::PropertyError;

/// Opaque reference to a `T` held by an [`Arena<T>`].
pub struct Handle<T> {
    idx: u32,
    generation: u32,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Handle<T> {
    /// Slot index, for diagnostics.
    pub const fn index(self) -> u32 {
        self.idx
    }

    pub const fn generation(self) -> u32 {
        self.generation
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
        self.idx == other.idx && self.generation == other.generation
    }
}

impl<T> Eq for Handle<T> {}

impl<T> std::hash::Hash for Handle<T> {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.idx.hash(state);
        self.generation.hash(state);
    }
}

impl<T> fmt::Debug for Handle<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Handle({}@gen{})", self.idx, self.generation)
    }
}

/// Slot storage with a free list. Reused slots get a new generation.
pub struct Arena<T> {
    slots: Vec<Option<T>>,
    generation: Vec<u32>,
    free_list: Vec<u32>,
}

impl<T> Default for Arena<T> {
    fn default() -> Self {
        Self {
            slots: Vec::new(),
            generation: Vec::new(),
            free_list: Vec::new(),
        }
    }
}

impl<T> fmt::Debug for Arena<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Arena")
            .field("live", &self.len())
            .field("slots", &self.slots.len())
            .finish()
    }
}

impl<T> Arena<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `value`. Fails only once every `u32` slot index is in use.
    pub fn insert(&mut self, value: T) -> Result<Handle<T>, PropertyError> {
        let idx = match self.free_list.pop() {
            Some(idx) => {
                self.slots[idx as usize] = Some(value);
                idx
            }
            None => {
                let idx = u32::try_from(self.slots.len())
                    .map_err(|_| PropertyError::failed("handle arena is full"))?;
                self.slots.push(Some(value));
                self.generation.push(0);
                idx
            }
        };
        Ok(Handle {
            idx,
            generation: self.generation[idx as usize],
            _marker: PhantomData,
        })
    }

    fn slot(&self, h: Handle<T>) -> Option<usize> {
        let i = h.idx as usize;
        (self.generation.get(i) == Some(&h.generation)).then_some(i)
    }

    pub fn contains(&self, h: Handle<T>) -> bool {
        self.get(h).is_some()
    }

    pub fn get(&self, h: Handle<T>) -> Option<&T> {
        self.slot(h).and_then(|i| self.slots[i].as_ref())
    }

    pub fn get_mut(&mut self, h: Handle<T>) -> Option<&mut T> {
        self.slot(h).and_then(|i| self.slots[i].as_mut())
    }

    /// Take the value out; `h` and every copy of it go stale.
    pub fn remove(&mut self, h: Handle<T>) -> Option<T> {
        let i = self.slot(h)?;
        let value = self.slots[i].take()?;
        self.generation[i] = self.generation[i].wrapping_add(1);
        self.free_list.push(h.idx);
        Some(value)
    }

    pub fn len(&self) -> usize {
        self.slots.len() - self.free_list.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn iter(&self) -> impl Iterator<Item = (Handle<T>, &T)> {
        self.slots.iter().enumerate().filter_map(|(i, s)| {
            let v = s.as_ref()?;
            let handle = Handle {
                idx: u32::try_from(i).ok()?,
                generation: self.generation[i],
                _marker: PhantomData,
            };
            Some((handle, v))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stale_handle_misses_reused_slot() {
        let mut arena = Arena::new();
        let a = arena.insert("a").unwrap();
        assert_eq!(arena.remove(a), Some("a"));
        let b = arena.insert("b").unwrap();
        assert_eq!(a.index(), b.index());
        assert_ne!(a, b);
        assert_eq!(arena.get(a), None);
        assert_eq!(arena.get(b), Some(&"b"));
        assert_eq!(arena.remove(a), None);
        assert_eq!(arena.len(), 1);
    }

    #[test]
    fn iter_yields_live_entries() {
        let mut arena = Arena::new();
        let a = arena.insert(1).unwrap();
        let b = arena.insert(2).unwrap();
        arena.remove(a);
        let live: Vec<_> = arena.iter().map(|(h, v)| (h, *v)).collect();
        assert_eq!(live, vec![(b, 2)]);
        assert!(!arena.contains(a));
        assert!(arena.contains(b));
    }
}
