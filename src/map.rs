//! The map contract, abstracted over its realization.
//!
//! [`MapStore`] names the operations every map realization shares - unique
//! keys, overwriting `set`, erroring `get`, probing `get_or` - so generic
//! code can be written once and handed either the hash-backed or the
//! tree-backed realization. What the trait deliberately does *not* promise
//! is iteration order: that is the realizations' distinguishing property,
//! and code that needs ascending keys should ask for
//! [`TreeMap`](crate::TreeMap) concretely.

use std::hash::Hash;

use rand_core::RngCore;

use crate::error::KeyNotFound;
use crate::hash_map::HashTableMap;
use crate::tree_map::TreeMap;

/// Common contract of the crate's map realizations.
pub trait MapStore<K, V> {
    /// Returns the number of entries.
    fn len(&self) -> usize;

    /// Returns `true` if the map holds no entries.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Binds `key` to `value`, replacing any existing binding.
    fn set(&mut self, key: K, value: V);

    /// Returns the value bound to `key`, or [`KeyNotFound`] if absent.
    fn get(&self, key: &K) -> Result<&V, KeyNotFound>;

    /// Returns the value bound to `key`, or `default` if absent. Never
    /// inserts.
    fn get_or<'a>(&'a self, key: &K, default: &'a V) -> &'a V;

    /// Returns `true` if `key` has a binding.
    fn contains(&self, key: &K) -> bool;

    /// Removes the binding for `key`. Returns `true` if one existed.
    fn remove(&mut self, key: &K) -> bool;

    /// Removes every binding.
    fn clear(&mut self);

    /// Iterates entries in the realization's order - ascending for the
    /// tree-backed map, unspecified for the hash-backed one.
    fn pairs(&self) -> Box<dyn Iterator<Item = (&K, &V)> + '_>;

    /// Returns an independent copy sharing no storage with `self`.
    fn duplicate(&self) -> Self
    where
        Self: Sized;
}

impl<K, V, R> MapStore<K, V> for TreeMap<K, V, R>
where
    K: Ord + Clone,
    V: Clone,
    R: RngCore + Clone,
{
    fn len(&self) -> usize {
        TreeMap::len(self)
    }

    fn set(&mut self, key: K, value: V) {
        TreeMap::set(self, key, value);
    }

    fn get(&self, key: &K) -> Result<&V, KeyNotFound> {
        TreeMap::get(self, key)
    }

    fn get_or<'a>(&'a self, key: &K, default: &'a V) -> &'a V {
        TreeMap::get_or(self, key, default)
    }

    fn contains(&self, key: &K) -> bool {
        TreeMap::contains(self, key)
    }

    fn remove(&mut self, key: &K) -> bool {
        TreeMap::remove(self, key)
    }

    fn clear(&mut self) {
        TreeMap::clear(self);
    }

    fn pairs(&self) -> Box<dyn Iterator<Item = (&K, &V)> + '_> {
        Box::new(TreeMap::pairs(self))
    }

    fn duplicate(&self) -> Self {
        TreeMap::duplicate(self)
    }
}

impl<K, V> MapStore<K, V> for HashTableMap<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    fn len(&self) -> usize {
        HashTableMap::len(self)
    }

    fn set(&mut self, key: K, value: V) {
        HashTableMap::set(self, key, value);
    }

    fn get(&self, key: &K) -> Result<&V, KeyNotFound> {
        HashTableMap::get(self, key)
    }

    fn get_or<'a>(&'a self, key: &K, default: &'a V) -> &'a V {
        HashTableMap::get_or(self, key, default)
    }

    fn contains(&self, key: &K) -> bool {
        HashTableMap::contains(self, key)
    }

    fn remove(&mut self, key: &K) -> bool {
        HashTableMap::remove(self, key)
    }

    fn clear(&mut self) {
        HashTableMap::clear(self);
    }

    fn pairs(&self) -> Box<dyn Iterator<Item = (&K, &V)> + '_> {
        Box::new(HashTableMap::pairs(self))
    }

    fn duplicate(&self) -> Self {
        HashTableMap::duplicate(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Counts word frequencies through the contract alone; runs unchanged
    /// against both realizations.
    fn word_counts<M: MapStore<String, u32> + Default>(text: &str) -> M {
        let mut counts = M::default();
        for word in text.split_whitespace() {
            let next = *counts.get_or(&word.to_string(), &0) + 1;
            counts.set(word.to_string(), next);
        }
        counts
    }

    fn check_counts<M: MapStore<String, u32>>(counts: &M) {
        assert_eq!(counts.len(), 3);
        assert_eq!(counts.get(&"the".to_string()), Ok(&2));
        assert_eq!(counts.get(&"cat".to_string()), Ok(&1));
        assert_eq!(counts.get(&"sat".to_string()), Ok(&1));
        assert_eq!(counts.get(&"dog".to_string()), Err(KeyNotFound));
    }

    #[test]
    fn generic_algorithm_over_tree_realization() {
        let counts: TreeMap<String, u32> = word_counts("the cat sat the");
        check_counts(&counts);

        // The tree realization additionally yields ascending pairs.
        let keys: Vec<_> = MapStore::pairs(&counts).map(|(k, _)| k.clone()).collect();
        assert_eq!(keys, vec!["cat", "sat", "the"]);
    }

    #[test]
    fn generic_algorithm_over_hash_realization() {
        let counts: HashTableMap<String, u32> = word_counts("the cat sat the");
        check_counts(&counts);
    }

    #[test]
    fn realizations_agree_entry_for_entry() {
        let tree: TreeMap<String, u32> = word_counts("a b a c b a");
        let hash: HashTableMap<String, u32> = word_counts("a b a c b a");

        assert_eq!(tree.len(), MapStore::len(&hash));
        for (key, value) in MapStore::pairs(&tree) {
            assert_eq!(hash.get(key), Ok(value));
        }
    }

    #[test]
    fn duplicate_through_the_contract() {
        let mut m: TreeMap<String, u32> = word_counts("x y");
        let copy = MapStore::duplicate(&m);

        MapStore::set(&mut m, "z".to_string(), 1);
        assert_eq!(MapStore::len(&copy), 2);
        assert!(!MapStore::contains(&copy, &"z".to_string()));
    }
}
