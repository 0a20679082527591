//! Insertion-ordered key/value mapping
//!
//! [`OrderedMap`] is the mapping kind of keyed container: keys are
//! integers or strings, lookup is order-independent, and iteration
//! follows insertion order. A key holding [`Value::Null`] is *declared*
//! and distinguishable from an absent key; all existence checks go
//! through [`OrderedMap::contains_key`], never through an
//! equality-to-null comparison.

use crate::value::{Key, Value};
use indexmap::IndexMap;

/// Insertion-ordered mapping from [`Key`] to [`Value`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OrderedMap {
    entries: IndexMap<Key, Value>,
}

impl OrderedMap {
    /// Create a new empty map
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the map is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Check whether a key is declared, even if its value is null
    pub fn contains_key(&self, key: &Key) -> bool {
        self.entries.contains_key(key)
    }

    /// Get the value under a key, if the key is declared
    pub fn get(&self, key: &Key) -> Option<&Value> {
        self.entries.get(key)
    }

    /// Get a mutable reference to the value under a key
    pub fn get_mut(&mut self, key: &Key) -> Option<&mut Value> {
        self.entries.get_mut(key)
    }

    /// Insert a value under a key, returning the previous value if the
    /// key was already declared. New keys append to the iteration order.
    pub fn insert(&mut self, key: Key, value: Value) -> Option<Value> {
        self.entries.insert(key, value)
    }

    /// Get a mutable handle to the slot under a key, inserting `default`
    /// first if the key is absent.
    ///
    /// The returned reference aliases the stored slot: mutation through
    /// it is visible in the map.
    pub fn get_or_insert(&mut self, key: Key, default: Value) -> &mut Value {
        self.entries.entry(key).or_insert(default)
    }

    /// Remove a key, preserving the order of the remaining entries.
    ///
    /// Returns the removed value if the key was declared.
    pub fn remove(&mut self, key: &Key) -> Option<Value> {
        self.entries.shift_remove(key)
    }

    /// Iterate over entries in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&Key, &Value)> {
        self.entries.iter()
    }

    /// Iterate over keys in insertion order
    pub fn keys(&self) -> impl Iterator<Item = &Key> {
        self.entries.keys()
    }
}

impl FromIterator<(Key, Value)> for OrderedMap {
    fn from_iter<I: IntoIterator<Item = (Key, Value)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}
