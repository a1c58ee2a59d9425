//! Slot arena with generation-checked access.
//!
//! The arena owns every node; data structures coordinate [`NodeId`]s into
//! it and never hold pointers. Removing a node bumps its slot's generation,
//! so any `NodeId` taken before the removal stops resolving - this is what
//! makes stale-cursor detection possible without unsafe code.
//!
//! Slot allocation and reuse are delegated to `slab::Slab`; the arena adds
//! only the generation table on top.

use slab::Slab;

use crate::index::NodeId;

/// Arena of nodes addressed by generational index.
#[derive(Debug)]
pub(crate) struct Arena<T> {
    slots: Slab<T>,
    generations: Vec<u32>,
}

impl<T> Arena<T> {
    pub(crate) fn new() -> Self {
        Arena {
            slots: Slab::new(),
            generations: Vec::new(),
        }
    }

    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Arena {
            slots: Slab::with_capacity(capacity),
            generations: Vec::with_capacity(capacity),
        }
    }

    /// Number of live nodes.
    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.slots.len()
    }

    /// Inserts a node, returning its stable id.
    #[inline]
    pub(crate) fn insert(&mut self, value: T) -> NodeId {
        let slot = self.slots.insert(value);
        if slot >= self.generations.len() {
            self.generations.resize(slot + 1, 0);
        }
        NodeId::new(slot, self.generations[slot])
    }

    /// Removes and returns the node at `id`.
    ///
    /// Returns `None` if `id` is the sentinel, already removed, or stale.
    /// The slot's generation is bumped so `id` never resolves again.
    #[inline]
    pub(crate) fn remove(&mut self, id: NodeId) -> Option<T> {
        if !self.holds(id) {
            return None;
        }
        let value = self.slots.try_remove(id.slot());
        if value.is_some() {
            self.generations[id.slot()] = self.generations[id.slot()].wrapping_add(1);
        }
        value
    }

    /// Returns a reference to the node at `id`, if it is still live.
    #[inline]
    pub(crate) fn get(&self, id: NodeId) -> Option<&T> {
        if !self.holds(id) {
            return None;
        }
        self.slots.get(id.slot())
    }

    /// Returns a mutable reference to the node at `id`, if it is still live.
    #[inline]
    pub(crate) fn get_mut(&mut self, id: NodeId) -> Option<&mut T> {
        if !self.holds(id) {
            return None;
        }
        self.slots.get_mut(id.slot())
    }

    /// Returns `true` if `id` currently resolves to a live node.
    #[inline]
    pub(crate) fn holds(&self, id: NodeId) -> bool {
        id.is_some()
            && id.slot() < self.generations.len()
            && self.generations[id.slot()] == id.generation()
            && self.slots.contains(id.slot())
    }

    /// Removes every node, invalidating all outstanding ids.
    pub(crate) fn clear(&mut self) {
        self.slots.clear();
        for generation in &mut self.generations {
            *generation = generation.wrapping_add(1);
        }
    }
}

impl<T> Default for Arena<T> {
    fn default() -> Self {
        Self::new()
    }
}
