//! Hash-backed map realization.
//!
//! [`HashTableMap`] offers the same map contract as
//! [`TreeMap`](crate::TreeMap) - unique keys, `set` overwrites, `get_or`
//! never inserts - with O(1) expected access and no iteration order
//! guarantee. Choose it when ordering and range scans are not needed.

use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;

use crate::error::KeyNotFound;

/// An unordered map with unique keys, backed by a hash table.
#[derive(Clone)]
pub struct HashTableMap<K, V> {
    table: HashMap<K, V>,
}

impl<K, V> HashTableMap<K, V>
where
    K: Eq + Hash,
{
    /// Creates an empty map.
    pub fn new() -> Self {
        HashTableMap {
            table: HashMap::new(),
        }
    }

    /// Creates an empty map with room for `capacity` entries before the
    /// table grows.
    pub fn with_capacity(capacity: usize) -> Self {
        HashTableMap {
            table: HashMap::with_capacity(capacity),
        }
    }

    /// Returns the number of entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.table.len()
    }

    /// Returns `true` if the map holds no entries.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Binds `key` to `value`, replacing any existing binding.
    pub fn set(&mut self, key: K, value: V) {
        self.table.insert(key, value);
    }

    /// Returns the value bound to `key`.
    ///
    /// # Errors
    ///
    /// [`KeyNotFound`] if the key is absent.
    pub fn get(&self, key: &K) -> Result<&V, KeyNotFound> {
        self.table.get(key).ok_or(KeyNotFound)
    }

    /// Returns the value bound to `key`, or `default` if absent. Never
    /// inserts.
    pub fn get_or<'a>(&'a self, key: &K, default: &'a V) -> &'a V {
        self.table.get(key).unwrap_or(default)
    }

    /// Returns `true` if `key` has a binding.
    #[inline]
    pub fn contains(&self, key: &K) -> bool {
        self.table.contains_key(key)
    }

    /// Removes the binding for `key`. Returns `true` if one existed.
    pub fn remove(&mut self, key: &K) -> bool {
        self.table.remove(key).is_some()
    }

    /// Removes every binding.
    pub fn clear(&mut self) {
        self.table.clear();
    }

    /// Iterates keys in no particular order.
    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.table.keys()
    }

    /// Iterates values in no particular order.
    pub fn values(&self) -> impl Iterator<Item = &V> {
        self.table.values()
    }

    /// Iterates `(key, value)` entries in no particular order.
    pub fn pairs(&self) -> impl Iterator<Item = (&K, &V)> {
        self.table.iter()
    }

    /// Returns an independent copy sharing no storage with `self`.
    pub fn duplicate(&self) -> Self
    where
        K: Clone,
        V: Clone,
    {
        self.clone()
    }
}

impl<K: Eq + Hash, V> Default for HashTableMap<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> PartialEq for HashTableMap<K, V>
where
    K: Eq + Hash,
    V: PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.table == other.table
    }
}

impl<K, V> Eq for HashTableMap<K, V>
where
    K: Eq + Hash,
    V: Eq,
{
}

impl<K, V> fmt::Debug for HashTableMap<K, V>
where
    K: Eq + Hash + fmt::Debug,
    V: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.pairs()).finish()
    }
}

impl<K: Eq + Hash, V> FromIterator<(K, V)> for HashTableMap<K, V> {
    /// Collects entries with overwrite semantics; for repeated keys the
    /// last entry wins.
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        HashTableMap {
            table: iter.into_iter().collect(),
        }
    }
}

impl<K: Eq + Hash, V> Extend<(K, V)> for HashTableMap<K, V> {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        self.table.extend(iter);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_get_overwrite() {
        let mut m: HashTableMap<&str, u32> = HashTableMap::new();
        m.set("a", 1);
        m.set("a", 2);

        assert_eq!(m.len(), 1);
        assert_eq!(m.get(&"a"), Ok(&2));
        assert_eq!(m.get(&"b"), Err(KeyNotFound));
    }

    #[test]
    fn get_or_probes_without_inserting() {
        let mut m: HashTableMap<u32, u32> = HashTableMap::new();
        m.set(1, 10);

        assert_eq!(*m.get_or(&7, &99), 99);
        assert_eq!(m.len(), 1);
        assert!(!m.contains(&7));
    }

    #[test]
    fn remove_reports_presence() {
        let mut m: HashTableMap<u32, &str> = [(1, "a")].into_iter().collect();

        assert!(m.remove(&1));
        assert!(!m.remove(&1));
        assert!(m.is_empty());
    }

    #[test]
    fn equality_ignores_insertion_order() {
        let a: HashTableMap<u32, u32> = [(1, 10), (2, 20)].into_iter().collect();
        let b: HashTableMap<u32, u32> = [(2, 20), (1, 10)].into_iter().collect();
        assert_eq!(a, b);
    }

    #[test]
    fn duplicate_is_independent() {
        let mut m: HashTableMap<u32, u32> = [(1, 10)].into_iter().collect();
        let copy = m.duplicate();

        m.set(2, 20);
        assert_eq!(copy.len(), 1);
        assert!(!copy.contains(&2));
    }
}
