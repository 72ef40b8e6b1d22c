//! Generational slot storage for element nodes and block nodes.
//!
//! Both levels of the deque live in an `Arena`: links between nodes are plain
//! slot indices, while handles given out to users carry a [`Key`] that also
//! records the slot's generation. Removing a value (or explicitly retiring a
//! slot) bumps the generation, so a key minted before that point no longer
//! resolves.

use std::ops::{Index, IndexMut};

/// A slot index paired with the generation it was observed at.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub(crate) struct Key {
    pub(crate) index: u32,
    pub(crate) generation: u32,
}

#[derive(Clone, Debug)]
pub(crate) struct Slot<V> {
    generation: u32,
    value: Option<V>,
}

/// Free-list backed storage with generation-checked keys.
#[derive(Clone, Debug)]
pub(crate) struct Arena<V> {
    slots: Vec<Slot<V>>,
    /// Vacant slot indices, reused LIFO
    free: Vec<u32>,
    len: usize,
}

impl<V> Arena<V> {
    /// Creates an empty arena. Does not allocate.
    #[inline]
    pub(crate) const fn new() -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
            len: 0,
        }
    }

    /// Number of occupied slots.
    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.len
    }

    /// Stores `value` and returns its slot index.
    pub(crate) fn insert(&mut self, value: V) -> u32 {
        self.len += 1;
        match self.free.pop() {
            Some(index) => {
                let slot = &mut self.slots[index as usize];
                debug_assert!(slot.value.is_none());
                slot.value = Some(value);
                index
            }
            None => {
                let index = u32::try_from(self.slots.len()).unwrap_or_else(|_| {
                    panic!("arena capacity overflow: more than {} slots", u32::MAX)
                });
                self.slots.push(Slot {
                    generation: 0,
                    value: Some(value),
                });
                index
            }
        }
    }

    /// Takes the value out of `index` and retires the slot.
    ///
    /// # Panics
    ///
    /// Panics if the slot is vacant.
    pub(crate) fn remove(&mut self, index: u32) -> V {
        let slot = &mut self.slots[index as usize];
        let value = match slot.value.take() {
            Some(value) => value,
            None => panic!("arena slot {index} is vacant"),
        };
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(index);
        self.len -= 1;
        value
    }

    /// Bumps the generation of an occupied slot without touching its value.
    ///
    /// Keys handed out earlier for `index` stop resolving.
    #[inline]
    pub(crate) fn retire_keys(&mut self, index: u32) {
        let slot = &mut self.slots[index as usize];
        debug_assert!(slot.value.is_some());
        slot.generation = slot.generation.wrapping_add(1);
    }

    /// Current key for an occupied slot.
    #[inline]
    pub(crate) fn key(&self, index: u32) -> Key {
        Key {
            index,
            generation: self.slots[index as usize].generation,
        }
    }

    /// Resolves a key to its slot index if the slot is occupied at the same generation.
    #[inline]
    pub(crate) fn resolve(&self, key: Key) -> Option<u32> {
        match self.slots.get(key.index as usize) {
            Some(slot) if slot.generation == key.generation && slot.value.is_some() => {
                Some(key.index)
            }
            _ => None,
        }
    }

    #[inline]
    pub(crate) fn get(&self, index: u32) -> Option<&V> {
        self.slots.get(index as usize)?.value.as_ref()
    }

    #[inline]
    pub(crate) fn get_mut(&mut self, index: u32) -> Option<&mut V> {
        self.slots.get_mut(index as usize)?.value.as_mut()
    }

    /// Raw pointer to the value stored at `index`.
    ///
    /// # Safety
    ///
    /// `base` must come from [`Arena::base_ptr`] on an arena that has not been
    /// reallocated since, and `index` must name an occupied slot.
    #[inline]
    pub(crate) unsafe fn value_ptr(base: *mut Slot<V>, index: u32) -> *mut V {
        let slot = base.add(index as usize);
        match (*slot).value.as_mut() {
            Some(value) => value as *mut V,
            None => std::ptr::null_mut(),
        }
    }

    /// Base pointer of the slot storage, for iterators that hand out
    /// disjoint mutable references.
    #[inline]
    pub(crate) fn base_ptr(&mut self) -> *mut Slot<V> {
        self.slots.as_mut_ptr()
    }

    /// Drops every value and forgets all slots.
    ///
    /// Generations restart from zero, so callers must make sure keys minted
    /// before the clear cannot be presented again (the deque rotates its
    /// owner id for this).
    pub(crate) fn clear(&mut self) {
        self.slots.clear();
        self.free.clear();
        self.len = 0;
    }
}

impl<V> Default for Arena<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> Index<u32> for Arena<V> {
    type Output = V;

    #[inline]
    fn index(&self, index: u32) -> &V {
        match self.get(index) {
            Some(value) => value,
            None => panic!("arena slot {index} is vacant"),
        }
    }
}

impl<V> IndexMut<u32> for Arena<V> {
    #[inline]
    fn index_mut(&mut self, index: u32) -> &mut V {
        match self.get_mut(index) {
            Some(value) => value,
            None => panic!("arena slot {index} is vacant"),
        }
    }
}
