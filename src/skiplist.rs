//! Skip list - a probabilistic ordered multiset of key-value entries.
//!
//! This is the "balanced search tree" primitive behind
//! [`TreeMap`](crate::TreeMap): O(log n) expected insert, lookup, and
//! removal with no rebalancing. Nodes live in the list's own [`Arena`] and
//! link to each other through generational ids.
//!
//! ```text
//! Level 2:  HEAD ────────────────► 50 ─────────────────► NIL
//! Level 1:  HEAD ───────► 20 ────► 50 ─────────────────► NIL
//! Level 0:  HEAD ► 10 ──► 20 ────► 50 ──► 60 ──► NIL
//! ```
//!
//! # Multiset semantics
//!
//! Insertion never overwrites: a new entry is always linked, and entries
//! with equal keys coexist, the newest placed after the older ones. Layers
//! that need key uniqueness (the tree-backed map) must enforce it
//! themselves with [`remove_equal`](SkipList::remove_equal) before
//! inserting - that two-step is deliberate, not an omission.
//!
//! Level assignment draws from a caller-supplied [`RngCore`]; tests and the
//! default constructor use a seeded `SmallRng` so structure is
//! deterministic per construction.

use rand::rngs::SmallRng;
use rand::SeedableRng;
use rand_core::RngCore;

use crate::arena::Arena;
use crate::index::NodeId;

const DEFAULT_SEED: u64 = 0x51AB_11F7;

/// A node holding one entry and its forward links.
#[derive(Debug)]
pub struct SkipNode<K, V, const MAX_LEVEL: usize> {
    key: K,
    value: V,
    /// `forward[i]` is the next node at level i.
    forward: [NodeId; MAX_LEVEL],
    /// Highest level this node participates in (0-indexed).
    level: u8,
}

/// An ordered multiset of `(K, V)` entries, ascending by key.
///
/// # Type Parameters
///
/// - `K`: key type; `Ord` supplies the total order
/// - `V`: value type
/// - `R`: level RNG, defaults to a seeded `SmallRng`
/// - `MAX_LEVEL`: maximum express-lane count, defaults to 16
#[derive(Debug)]
pub struct SkipList<K, V, R = SmallRng, const MAX_LEVEL: usize = 16>
where
    K: Ord,
{
    arena: Arena<SkipNode<K, V, MAX_LEVEL>>,
    /// `head[i]` is the first node at level i.
    head: [NodeId; MAX_LEVEL],
    /// Current maximum level in use.
    level: usize,
    len: usize,
    rng: R,
}

impl<K: Ord, V, const MAX_LEVEL: usize> SkipList<K, V, SmallRng, MAX_LEVEL> {
    /// Creates an empty skip list with a deterministic default RNG.
    pub fn new() -> Self {
        Self::with_rng(SmallRng::seed_from_u64(DEFAULT_SEED))
    }
}

impl<K: Ord, V, const MAX_LEVEL: usize> Default for SkipList<K, V, SmallRng, MAX_LEVEL> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V, R, const MAX_LEVEL: usize> SkipList<K, V, R, MAX_LEVEL>
where
    K: Ord,
    R: RngCore,
{
    /// Creates an empty skip list using `rng` for level assignment.
    pub fn with_rng(rng: R) -> Self {
        SkipList {
            arena: Arena::new(),
            head: [NodeId::NONE; MAX_LEVEL],
            level: 0,
            len: 0,
            rng,
        }
    }

    /// Returns the number of entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if there are no entries.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the value of the first entry whose key equals `key`.
    ///
    /// Under a uniqueness-enforcing layer this is *the* entry for the key.
    pub fn get(&self, key: &K) -> Option<&V> {
        let id = self.first_at_least(key);
        let node = self.arena.get(id)?;
        (node.key == *key).then_some(&node.value)
    }

    /// Returns `true` if any entry's key equals `key`.
    #[inline]
    pub fn contains_key(&self, key: &K) -> bool {
        self.get(key).is_some()
    }

    /// Returns the smallest entry, or `None` if empty.
    pub fn first(&self) -> Option<(&K, &V)> {
        let node = self.arena.get(self.head[0])?;
        Some((&node.key, &node.value))
    }

    /// Links a new entry, keeping ascending key order.
    ///
    /// Equal keys are permitted; the new entry lands after existing equals.
    pub fn insert(&mut self, key: K, value: V) {
        let mut update = [NodeId::NONE; MAX_LEVEL];
        self.predecessors(&mut update, |k| k <= &key);

        let level = self.random_level();
        if level > self.level {
            for slot in update.iter_mut().take(level + 1).skip(self.level + 1) {
                *slot = NodeId::NONE;
            }
            self.level = level;
        }

        let mut forward = [NodeId::NONE; MAX_LEVEL];
        for (i, f) in forward.iter_mut().enumerate().take(level + 1) {
            *f = self.successor(update[i], i);
        }

        let id = self.arena.insert(SkipNode {
            key,
            value,
            forward,
            level: level as u8,
        });

        for i in 0..=level {
            if update[i].is_none() {
                self.head[i] = id;
            } else {
                self.arena
                    .get_mut(update[i])
                    .expect("skip list predecessor must be live")
                    .forward[i] = id;
            }
        }

        self.len += 1;
    }

    /// Removes every entry whose key equals `key` - the equal-range
    /// removal. Returns how many entries were removed.
    pub fn remove_equal(&mut self, key: &K) -> usize {
        let mut removed = 0;
        loop {
            let mut update = [NodeId::NONE; MAX_LEVEL];
            self.predecessors(&mut update, |k| k < key);

            let candidate = self.successor(update[0], 0);
            if candidate.is_none() || self.node(candidate).key != *key {
                break;
            }

            self.unlink(candidate, &update);
            removed += 1;
        }
        removed
    }

    /// Removes every entry, invalidating the whole structure's nodes.
    pub fn clear(&mut self) {
        self.arena.clear();
        self.head = [NodeId::NONE; MAX_LEVEL];
        self.level = 0;
        self.len = 0;
    }

    /// Iterates entries in ascending key order.
    pub fn iter(&self) -> Iter<'_, K, V, MAX_LEVEL> {
        Iter {
            arena: &self.arena,
            at: self.head[0],
        }
    }

    /// Iterates entries whose keys are strictly greater than `key`, in
    /// ascending order.
    pub fn iter_after(&self, key: &K) -> Iter<'_, K, V, MAX_LEVEL> {
        let mut update = [NodeId::NONE; MAX_LEVEL];
        self.predecessors(&mut update, |k| k <= key);
        Iter {
            arena: &self.arena,
            at: self.successor(update[0], 0),
        }
    }

    /// Rebuilds an independent copy with its own arena, same entry order.
    pub fn duplicate(&self) -> Self
    where
        K: Clone,
        V: Clone,
        R: Clone,
    {
        let mut copy = SkipList::with_rng(self.rng.clone());
        for (key, value) in self.iter() {
            copy.insert(key.clone(), value.clone());
        }
        copy
    }

    // ========================================================================
    // Internals
    // ========================================================================

    #[inline]
    fn node(&self, id: NodeId) -> &SkipNode<K, V, MAX_LEVEL> {
        self.arena.get(id).expect("skip list link must be live")
    }

    /// Next node after `pred` at `level`; the list head when `pred` is NONE.
    #[inline]
    fn successor(&self, pred: NodeId, level: usize) -> NodeId {
        if pred.is_none() {
            self.head[level]
        } else {
            self.node(pred).forward[level]
        }
    }

    /// Fills `update` with, per level, the last node whose key satisfies
    /// `stays_before` (NONE meaning the list head pseudo-node).
    fn predecessors(&self, update: &mut [NodeId; MAX_LEVEL], stays_before: impl Fn(&K) -> bool) {
        let mut current = NodeId::NONE;
        let mut level = self.level;
        loop {
            loop {
                let next = self.successor(current, level);
                if next.is_some() && stays_before(&self.node(next).key) {
                    current = next;
                } else {
                    break;
                }
            }
            update[level] = current;
            if level == 0 {
                break;
            }
            level -= 1;
        }
    }

    /// First node with key >= `key`, or NONE.
    fn first_at_least(&self, key: &K) -> NodeId {
        let mut update = [NodeId::NONE; MAX_LEVEL];
        self.predecessors(&mut update, |k| k < key);
        self.successor(update[0], 0)
    }

    /// Unlinks `id` given its exact predecessors, then frees the node.
    fn unlink(&mut self, id: NodeId, update: &[NodeId; MAX_LEVEL]) {
        let (node_level, forward) = {
            let node = self.node(id);
            (node.level as usize, node.forward)
        };

        for i in 0..=node_level {
            if update[i].is_none() {
                self.head[i] = forward[i];
            } else {
                self.arena
                    .get_mut(update[i])
                    .expect("skip list predecessor must be live")
                    .forward[i] = forward[i];
            }
        }

        while self.level > 0 && self.head[self.level].is_none() {
            self.level -= 1;
        }

        self.len -= 1;
        self.arena.remove(id);
    }

    /// Geometric level draw, p = 1/2 per additional level.
    fn random_level(&mut self) -> usize {
        let mut level = 0;
        while level + 1 < MAX_LEVEL && self.rng.next_u32() & 1 == 1 {
            level += 1;
        }
        level
    }
}

/// Iterator over entries in ascending key order.
pub struct Iter<'a, K, V, const MAX_LEVEL: usize> {
    arena: &'a Arena<SkipNode<K, V, MAX_LEVEL>>,
    at: NodeId,
}

impl<'a, K, V, const MAX_LEVEL: usize> Iterator for Iter<'a, K, V, MAX_LEVEL> {
    type Item = (&'a K, &'a V);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let node = self.arena.get(self.at)?;
        self.at = node.forward[0];
        Some((&node.key, &node.value))
    }
}
