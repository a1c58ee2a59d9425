//! Tree-backed ordered map over the skip list multiset.
//!
//! [`TreeMap`] realizes the map contract - unique keys, `set` overwrites -
//! on top of [`SkipList`](crate::SkipList), which by itself permits
//! duplicate keys. The map closes that gap at the write boundary: every
//! [`set`](TreeMap::set) first removes the key's whole equal range, then
//! inserts the fresh entry. Dropping that removal would silently turn the
//! map into a multimap with shadowed stale values, so the two-step is the
//! load-bearing part of this module.
//!
//! What the tree backing buys over hashing: iteration and range scans in
//! ascending key order.
//!
//! # Example
//!
//! ```
//! use corral::TreeMap;
//!
//! let mut m: TreeMap<&str, u32> = TreeMap::new();
//! m.set("b", 4);
//! m.set("a", 1);
//! m.set("b", 2); // overwrite, not a second entry
//!
//! assert_eq!(m.len(), 2);
//! assert_eq!(m.get(&"b"), Ok(&2));
//! assert_eq!(m.keys().copied().collect::<Vec<_>>(), vec!["a", "b"]);
//! ```

use std::fmt;

use rand::rngs::SmallRng;
use rand_core::RngCore;

use crate::error::KeyNotFound;
use crate::skiplist::SkipList;

/// An ordered map with unique keys, backed by a skip list.
pub struct TreeMap<K, V, R = SmallRng>
where
    K: Ord,
{
    list: SkipList<K, V, R>,
}

impl<K: Ord, V> TreeMap<K, V, SmallRng> {
    /// Creates an empty map with the default deterministic RNG.
    pub fn new() -> Self {
        TreeMap {
            list: SkipList::new(),
        }
    }
}

impl<K: Ord, V> Default for TreeMap<K, V, SmallRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V, R> TreeMap<K, V, R>
where
    K: Ord,
    R: RngCore,
{
    /// Creates an empty map using `rng` for the backing list's levels.
    pub fn with_rng(rng: R) -> Self {
        TreeMap {
            list: SkipList::with_rng(rng),
        }
    }

    /// Returns the number of entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.list.len()
    }

    /// Returns `true` if the map holds no entries.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    /// Binds `key` to `value`, replacing any existing binding.
    ///
    /// The equal range is removed before the insert; the backing list alone
    /// would happily keep both entries.
    pub fn set(&mut self, key: K, value: V) {
        self.list.remove_equal(&key);
        self.list.insert(key, value);
    }

    /// Returns the value bound to `key`.
    ///
    /// # Errors
    ///
    /// [`KeyNotFound`] if the key is absent. Probe with
    /// [`get_or`](TreeMap::get_or) or [`contains`](TreeMap::contains) when
    /// absence is an expected outcome.
    pub fn get(&self, key: &K) -> Result<&V, KeyNotFound> {
        self.list.get(key).ok_or(KeyNotFound)
    }

    /// Returns the value bound to `key`, or `default` if absent.
    ///
    /// Never inserts; asking about an absent key leaves the map untouched.
    pub fn get_or<'a>(&'a self, key: &K, default: &'a V) -> &'a V {
        self.list.get(key).unwrap_or(default)
    }

    /// Returns `true` if `key` has a binding.
    #[inline]
    pub fn contains(&self, key: &K) -> bool {
        self.list.contains_key(key)
    }

    /// Removes the binding for `key`. Returns `true` if one existed.
    pub fn remove(&mut self, key: &K) -> bool {
        self.list.remove_equal(key) > 0
    }

    /// Removes every binding.
    pub fn clear(&mut self) {
        self.list.clear();
    }

    /// Returns the smallest entry, or `None` if empty.
    pub fn first(&self) -> Option<(&K, &V)> {
        self.list.first()
    }

    /// Iterates keys in ascending order.
    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.list.iter().map(|(k, _)| k)
    }

    /// Iterates values in ascending key order.
    pub fn values(&self) -> impl Iterator<Item = &V> {
        self.list.iter().map(|(_, v)| v)
    }

    /// Iterates `(key, value)` entries in ascending key order.
    pub fn pairs(&self) -> impl Iterator<Item = (&K, &V)> {
        self.list.iter()
    }

    /// Iterates entries with keys strictly greater than `bound`, ascending.
    pub fn strictly_greater(&self, bound: &K) -> impl Iterator<Item = (&K, &V)> {
        self.list.iter_after(bound)
    }

    /// Iterates entries with keys strictly less than `bound`, ascending.
    ///
    /// Walks from the smallest key and stops at the bound, so the full scan
    /// is O(result length) - unlike [`strictly_greater`](TreeMap::strictly_greater),
    /// which seeks its start through the level structure.
    pub fn strictly_less<'a>(&'a self, bound: &'a K) -> impl Iterator<Item = (&'a K, &'a V)> {
        self.list.iter().take_while(move |(k, _)| *k < bound)
    }

    /// Rebuilds an independent copy sharing no storage with `self`.
    pub fn duplicate(&self) -> Self
    where
        K: Clone,
        V: Clone,
        R: Clone,
    {
        TreeMap {
            list: self.list.duplicate(),
        }
    }
}

impl<K, V, R> PartialEq for TreeMap<K, V, R>
where
    K: Ord,
    V: PartialEq,
    R: RngCore,
{
    /// Entry-wise equality in ascending key order; the RNG state and the
    /// probabilistic level structure never participate.
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.pairs().eq(other.pairs())
    }
}

impl<K, V, R> Eq for TreeMap<K, V, R>
where
    K: Ord,
    V: Eq,
    R: RngCore,
{
}

impl<K, V, R> fmt::Debug for TreeMap<K, V, R>
where
    K: Ord + fmt::Debug,
    V: fmt::Debug,
    R: RngCore,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.pairs()).finish()
    }
}

impl<K: Ord, V> FromIterator<(K, V)> for TreeMap<K, V, SmallRng> {
    /// Collects entries with overwrite semantics; for repeated keys the
    /// last entry wins.
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = TreeMap::new();
        map.extend(iter);
        map
    }
}

impl<K, V, R> Extend<(K, V)> for TreeMap<K, V, R>
where
    K: Ord,
    R: RngCore,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.set(key, value);
        }
    }
}
