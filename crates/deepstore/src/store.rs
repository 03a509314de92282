//! Nested in-memory store
//!
//! Layout:
//! - `Store`: one level of segment -> entry mappings (AHash)
//! - `Entry`: either a leaf value or a nested `Store`

use std::collections::hash_map;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use ahash::RandomState;
use parking_lot::RwLock;

use crate::error::Result;
use crate::path;

/// Store handle shared between a cache and the code that created the store
pub type SharedStore<V> = Arc<RwLock<Store<V>>>;

/// A slot in the store
#[derive(Debug, Clone, PartialEq)]
pub enum Entry<V> {
    /// Leaf value
    Value(V),

    /// Nested mapping, reachable by the next path segment
    Map(Store<V>),
}

impl<V> Entry<V> {
    /// Borrow the leaf value, if this is one
    pub fn as_value(&self) -> Option<&V> {
        match self {
            Entry::Value(value) => Some(value),
            Entry::Map(_) => None,
        }
    }

    /// Borrow the nested map, if this is one
    pub fn as_map(&self) -> Option<&Store<V>> {
        match self {
            Entry::Map(map) => Some(map),
            Entry::Value(_) => None,
        }
    }

    /// Mutably borrow the nested map, if this is one
    pub fn as_map_mut(&mut self) -> Option<&mut Store<V>> {
        match self {
            Entry::Map(map) => Some(map),
            Entry::Value(_) => None,
        }
    }

    /// Take the leaf value out, if this is one
    pub fn into_value(self) -> Option<V> {
        match self {
            Entry::Value(value) => Some(value),
            Entry::Map(_) => None,
        }
    }

    /// Check if this entry is a nested map
    pub fn is_map(&self) -> bool {
        matches!(self, Entry::Map(_))
    }
}

impl<V> From<V> for Entry<V> {
    fn from(value: V) -> Self {
        Entry::Value(value)
    }
}

/// One level of the nested store
///
/// Path-aware access goes through [`Store::get`], [`Store::set`] and friends,
/// which split keys on `.`. The `*_segment` methods address this level only.
#[derive(Clone, PartialEq)]
pub struct Store<V> {
    map: HashMap<String, Entry<V>, RandomState>,
}

impl<V> Store<V> {
    /// Create an empty store
    pub fn new() -> Self {
        Self {
            map: HashMap::with_hasher(RandomState::new()),
        }
    }

    /// Build a store from flat `(segment, value)` pairs
    ///
    /// Keys are taken literally; dots are not interpreted.
    pub fn from_values<K, I>(values: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, V)>,
    {
        values
            .into_iter()
            .map(|(key, value)| (key.into(), Entry::Value(value)))
            .collect()
    }

    /// Wrap the store in a shareable handle
    pub fn shared(self) -> SharedStore<V> {
        Arc::new(RwLock::new(self))
    }

    /// Read the entry at a dotted path
    pub fn get(&self, path: &str) -> Option<&Entry<V>> {
        path::get(self, path)
    }

    /// Read the leaf value at a dotted path
    pub fn get_value(&self, path: &str) -> Option<&V> {
        path::get(self, path).and_then(Entry::as_value)
    }

    /// Write a value at a dotted path, creating nested maps as needed
    pub fn set(&mut self, path: &str, value: V) -> &V {
        path::set(self, path, value)
    }

    /// Write a value at a dotted path without replacing leaf values on the way
    pub fn try_set(&mut self, path: &str, value: V) -> Result<&V> {
        path::try_set(self, path, value)
    }

    /// Remove the entry at a dotted path
    pub fn remove(&mut self, path: &str) -> Option<Entry<V>> {
        path::remove(self, path)
    }

    /// Check if an entry exists at a dotted path
    pub fn contains(&self, path: &str) -> bool {
        path::get(self, path).is_some()
    }

    /// Get the entry stored under a single segment at this level
    pub fn get_segment(&self, segment: &str) -> Option<&Entry<V>> {
        self.map.get(segment)
    }

    /// Mutable variant of [`Store::get_segment`]
    pub fn get_segment_mut(&mut self, segment: &str) -> Option<&mut Entry<V>> {
        self.map.get_mut(segment)
    }

    /// Insert an entry under a single segment, returning the previous one
    pub fn insert_segment(&mut self, segment: impl Into<String>, entry: Entry<V>) -> Option<Entry<V>> {
        self.map.insert(segment.into(), entry)
    }

    /// Remove the entry under a single segment
    pub fn remove_segment(&mut self, segment: &str) -> Option<Entry<V>> {
        self.map.remove(segment)
    }

    pub(crate) fn slot(&mut self, segment: &str) -> hash_map::Entry<'_, String, Entry<V>> {
        self.map.entry(segment.to_owned())
    }

    /// Top-level segment names
    pub fn keys(&self) -> impl Iterator<Item = &str> + '_ {
        self.map.keys().map(String::as_str)
    }

    /// Top-level `(segment, entry)` pairs
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Entry<V>)> + '_ {
        self.map.iter().map(|(key, entry)| (key.as_str(), entry))
    }

    /// Number of top-level entries
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Check if the store has no entries
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Drop every entry
    pub fn clear(&mut self) {
        self.map.clear();
    }
}

impl<V> Default for Store<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: fmt::Debug> fmt::Debug for Store<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.map.iter()).finish()
    }
}

impl<V> FromIterator<(String, Entry<V>)> for Store<V> {
    fn from_iter<I: IntoIterator<Item = (String, Entry<V>)>>(iter: I) -> Self {
        let mut store = Store::new();
        store.map.extend(iter);
        store
    }
}
