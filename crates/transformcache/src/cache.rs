//! TransformCache: hook-mediated view over a DeepStore

use std::fmt;
use std::sync::Arc;

use deepstore::{Entry, Result, SharedStore, Store};
use tracing::trace;

use crate::options::{CacheOptions, NormalizeKey, Transform};

/// Key/value cache that normalizes keys and transforms values on write
///
/// Keys are dotted paths into a nested [`Store`]. The store lives behind a
/// [`SharedStore`] handle; when the caller hands one in, the cache keeps that
/// very handle, so every other holder sees writes made through the cache.
///
/// No locking spans a whole operation: hooks run outside the store lock, and
/// a read racing a write on another handle gets no isolation.
pub struct TransformCache<V> {
    /// Backing store, possibly shared with the caller
    store: SharedStore<V>,

    /// Applied to every key; identity when unset
    normalize_key: Option<NormalizeKey>,

    /// Applied to every value before it is written; identity when unset
    transform: Option<Transform<V>>,
}

impl<V> TransformCache<V> {
    /// Create a cache over a fresh store with identity hooks
    pub fn new() -> Self {
        Self::with_options(CacheOptions::new())
    }

    /// Create a cache over a fresh store that transforms values on write
    ///
    /// A single hook is always the value transform; keys are left exactly as
    /// given. Use [`TransformCache::with_hooks`] to normalize keys as well.
    pub fn with_transform<T>(transform: T) -> Self
    where
        T: Fn(V) -> V + Send + Sync + 'static,
    {
        Self::with_options(CacheOptions::new().transform(transform))
    }

    /// Create a cache over a fresh store with both hooks
    ///
    /// # Arguments
    /// * `normalize_key` - Applied to every key before lookup or mutation
    /// * `transform` - Applied to every value before it is written
    pub fn with_hooks<N, T>(normalize_key: N, transform: T) -> Self
    where
        N: Fn(&str) -> String + Send + Sync + 'static,
        T: Fn(V) -> V + Send + Sync + 'static,
    {
        Self::with_options(
            CacheOptions::new()
                .normalize_key(normalize_key)
                .transform(transform),
        )
    }

    /// Create a cache over a fresh store, taking hooks from an options bag
    pub fn with_options(options: CacheOptions<V>) -> Self {
        Self::over_store_with_options(Store::new().shared(), options)
    }

    /// Create a cache over a caller-owned store with identity hooks
    ///
    /// The handle is kept as is, never copied.
    pub fn over_store(store: SharedStore<V>) -> Self {
        Self::over_store_with_options(store, CacheOptions::new())
    }

    /// Create a cache over a caller-owned store, taking hooks from an options bag
    pub fn over_store_with_options(store: SharedStore<V>, options: CacheOptions<V>) -> Self {
        Self {
            store,
            normalize_key: options.normalize_key,
            transform: options.transform,
        }
    }

    /// Create a cache that takes ownership of an existing store value
    pub fn from_store(store: Store<V>) -> Self {
        Self::over_store(store.shared())
    }

    /// Get the backing store handle
    pub fn store(&self) -> &SharedStore<V> {
        &self.store
    }

    /// Run the active key normalization hook
    pub fn normalize_key(&self, key: &str) -> String {
        match &self.normalize_key {
            Some(normalize_key) => normalize_key(key),
            None => key.to_owned(),
        }
    }

    /// Run the active value transform hook
    pub fn transform(&self, value: V) -> V {
        match &self.transform {
            Some(transform) => transform(value),
            None => value,
        }
    }

    /// Number of top-level entries in the store
    pub fn len(&self) -> usize {
        self.store.read().len()
    }

    /// Check if the store is empty
    pub fn is_empty(&self) -> bool {
        self.store.read().is_empty()
    }

    /// Drop every entry from the store
    ///
    /// The store handle itself is kept, so other holders see an empty store.
    pub fn clear(&self) {
        self.store.write().clear();
    }

    /// Check if an entry exists at `key`
    pub fn has(&self, key: &str) -> bool {
        let key = self.normalize_key(key);
        self.store.read().contains(&key)
    }

    /// Remove the entry at `key`
    ///
    /// # Returns
    /// * `Option<Entry<V>>` - The removed entry, if there was one
    pub fn remove(&self, key: &str) -> Option<Entry<V>> {
        let key = self.normalize_key(key);
        trace!(%key, "remove");

        self.store.write().remove(&key)
    }
}

impl<V: Clone> TransformCache<V> {
    /// Set a value on the cache
    ///
    /// The key is normalized and the value transformed, in that order, before
    /// the store is touched. Missing path segments become nested maps; a leaf
    /// value in the way is replaced by a map.
    ///
    /// # Returns
    /// * `V` - The value as written (after the transform)
    pub fn set(&self, key: &str, value: V) -> V {
        let key = self.normalize_key(key);
        let value = self.transform(value);
        trace!(%key, "set");

        self.store.write().set(&key, value).clone()
    }

    /// Strict variant of [`TransformCache::set`]
    ///
    /// Fails instead of replacing a leaf value that sits on the path, and on
    /// an empty normalized key. The store is untouched on failure.
    pub fn try_set(&self, key: &str, value: V) -> Result<V> {
        let key = self.normalize_key(key);
        let value = self.transform(value);
        trace!(%key, "try_set");

        Ok(self.store.write().try_set(&key, value)?.clone())
    }

    /// Get the entry at `key`
    ///
    /// Returns the stored entry unmodified, or `None` if any path segment is
    /// missing. A path ending on a nested map returns the map.
    pub fn get(&self, key: &str) -> Option<Entry<V>> {
        let key = self.normalize_key(key);
        let entry = self.store.read().get(&key).cloned();
        trace!(%key, found = entry.is_some(), "get");
        entry
    }

    /// Get the leaf value at `key`
    ///
    /// Like [`TransformCache::get`], but a nested map counts as not found.
    pub fn get_value(&self, key: &str) -> Option<V> {
        let key = self.normalize_key(key);
        let value = self.store.read().get_value(&key).cloned();
        trace!(%key, found = value.is_some(), "get_value");
        value
    }
}

impl<V> Default for TransformCache<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> Clone for TransformCache<V> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            normalize_key: self.normalize_key.clone(),
            transform: self.transform.clone(),
        }
    }
}

impl<V: fmt::Debug> fmt::Debug for TransformCache<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransformCache")
            .field("store", &*self.store.read())
            .field("normalize_key", &self.normalize_key.is_some())
            .field("transform", &self.transform.is_some())
            .finish()
    }
}
