//! A wrapper around a vector of tuples that bencode uses to represent dictionaries.
//!
//! Entries are kept in insertion order and keys are unique. The order a [`VecMap`] stores
//! its entries in never affects the encoding: the encoder sorts keys itself (see
//! [`VecMap::sorted`]), and two maps with the same entries compare equal regardless of
//! the order they were built in.
//!
//! # Example
//!
//! ```
//! use bencode::prelude::*;
//! use std::collections::{BTreeMap, HashMap};
//!
//! let key = Bytes::from("a");
//! let value = 1;
//!
//! // from a `BTreeMap`
//! let mut btmap = BTreeMap::new();
//! btmap.insert(key.clone(), value);
//!
//! let bt_vm = VecMap::from(btmap);
//!
//! // from a `HashMap`
//! let mut hashmap = HashMap::new();
//! hashmap.insert(key.clone(), value);
//!
//! let hm_vm = VecMap::from(hashmap);
//!
//! // from a vector of tuples
//! let vec_vm = VecMap::from(vec![(key.clone(), value)]);
//!
//! assert_eq!(bt_vm, hm_vm);
//! assert_eq!(hm_vm, vec_vm);
//! ```

use crate::util::compare_bytes;
use std::{
    collections::{BTreeMap, HashMap},
    hash::*,
    iter::FromIterator,
    slice::Iter,
    vec::IntoIter,
};

#[derive(Clone, Debug)]
/// A map implemented as a [`Vec`] of pairs with unique keys.
///
/// See also: [module level documentation](`crate::vecmap`).
pub struct VecMap<K, V>(Vec<(K, V)>);

impl<K, V> Default for VecMap<K, V> {
    fn default() -> Self { VecMap(Vec::new()) }
}

impl<K, V> VecMap<K, V> {
    /// Creates an empty [`VecMap`].
    pub fn new() -> Self { VecMap(Vec::new()) }

    /// Creates an empty [`VecMap`] with room for `cap` entries.
    pub fn with_capacity(cap: usize) -> Self { VecMap(Vec::with_capacity(cap)) }

    /// Returns length.
    ///
    /// # Example
    ///
    /// ```
    /// use bencode::prelude::*;
    ///
    /// let vmap = VecMap::from(vec![("foo", "bar")]);
    ///
    /// // should have one element
    /// assert_eq!(vmap.len(), 1);
    /// ```
    pub fn len(&self) -> usize { self.0.len() }

    /// Indicates whether the [`VecMap`] is empty.
    pub fn is_empty(&self) -> bool { self.0.is_empty() }

    /// Returns an [`Iter`] of the key value pairs, in insertion order.
    pub fn iter(&self) -> Iter<'_, (K, V)> { self.0.iter() }
}

impl<K: AsRef<[u8]>, V> VecMap<K, V> {
    fn position(&self, key: &[u8]) -> Option<usize> {
        self.0.iter().position(|(k, _)| k.as_ref() == key)
    }

    /// Looks up the value stored under `key`.
    ///
    /// # Example
    ///
    /// ```
    /// use bencode::prelude::*;
    ///
    /// let vmap = VecMap::from(vec![("foo", 1), ("bar", 2)]);
    ///
    /// assert_eq!(vmap.get(b"bar"), Some(&2));
    /// assert_eq!(vmap.get(b"baz"), None);
    /// ```
    pub fn get(&self, key: &[u8]) -> Option<&V> { self.position(key).map(|i| &self.0[i].1) }

    /// Indicates whether an entry exists for `key`.
    pub fn contains_key(&self, key: &[u8]) -> bool { self.position(key).is_some() }

    /// Inserts a pair. If the key was already present its value is replaced and the old
    /// value is returned; the entry keeps its original position.
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        match self.position(key.as_ref()) {
            Some(i) => Some(std::mem::replace(&mut self.0[i].1, value)),
            None => {
                self.0.push((key, value));
                None
            }
        }
    }

    /// Removes the entry for `key`, returning its value.
    pub fn remove(&mut self, key: &[u8]) -> Option<V> {
        self.position(key).map(|i| self.0.remove(i).1)
    }

    /// Returns the entries ordered by key, comparing keys as unsigned bytes.
    ///
    /// # Example
    ///
    /// ```
    /// use bencode::prelude::*;
    ///
    /// let vmap = VecMap::from(vec![("def", 1), ("abc", 2)]);
    ///
    /// let keys: Vec<&str> = vmap.sorted().into_iter().map(|(k, _)| *k).collect();
    ///
    /// assert_eq!(keys, vec!["abc", "def"]);
    /// ```
    pub fn sorted(&self) -> Vec<&(K, V)> {
        let mut entries: Vec<&(K, V)> = self.0.iter().collect();
        entries.sort_unstable_by(|(k1, _), (k2, _)| compare_bytes(k1.as_ref(), k2.as_ref()));
        entries
    }

    /// Appends a pair without checking for an existing entry under the same key.
    ///
    /// The caller must guarantee that `key` is not already present.
    pub(crate) fn push_unique(&mut self, key: K, value: V) {
        debug_assert!(!self.contains_key(key.as_ref()));
        self.0.push((key, value))
    }
}

impl<K: AsRef<[u8]>, V: PartialEq> PartialEq for VecMap<K, V> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len()
            && self
                .iter()
                .all(|(k, v)| other.get(k.as_ref()).map_or(false, |w| v == w))
    }
}

impl<K: AsRef<[u8]>, V: Eq> Eq for VecMap<K, V> {}

impl<K: AsRef<[u8]>, V> From<Vec<(K, V)>> for VecMap<K, V> {
    fn from(v: Vec<(K, V)>) -> Self { Self::from_iter(v) }
}

impl<K: AsRef<[u8]> + Hash + Eq, V, S: BuildHasher> From<HashMap<K, V, S>> for VecMap<K, V> {
    fn from(hm: HashMap<K, V, S>) -> Self { VecMap(hm.into_iter().collect()) }
}

impl<K: AsRef<[u8]>, V> From<BTreeMap<K, V>> for VecMap<K, V> {
    fn from(bt: BTreeMap<K, V>) -> Self { VecMap(bt.into_iter().collect()) }
}

impl<K, V> IntoIterator for VecMap<K, V> {
    type IntoIter = IntoIter<(K, V)>;
    type Item = (K, V);

    fn into_iter(self) -> IntoIter<(K, V)> { self.0.into_iter() }
}

impl<'a, K, V> IntoIterator for &'a VecMap<K, V> {
    type IntoIter = Iter<'a, (K, V)>;
    type Item = &'a (K, V);

    fn into_iter(self) -> Iter<'a, (K, V)> { self.0.iter() }
}

impl<K: AsRef<[u8]>, V> FromIterator<(K, V)> for VecMap<K, V> {
    /// Later pairs replace earlier ones with the same key.
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> VecMap<K, V> {
        let mut out = VecMap::new();
        for (k, v) in iter {
            out.insert(k, v);
        }
        out
    }
}
