//! Hook configuration for TransformCache

use std::fmt;
use std::sync::Arc;

/// Key normalization hook, applied to every key before lookup or mutation
pub type NormalizeKey = Arc<dyn Fn(&str) -> String + Send + Sync>;

/// Value transform hook, applied to every value before it is written
pub type Transform<V> = Arc<dyn Fn(V) -> V + Send + Sync>;

/// Options bag for building a [`TransformCache`](crate::TransformCache)
///
/// Unset hooks fall back to identity.
///
/// ```
/// use transformcache::{CacheOptions, TransformCache};
///
/// let options = CacheOptions::new().transform(|value: i64| value * 2);
/// let cache = TransformCache::with_options(options);
///
/// assert_eq!(cache.set("n", 21), 42);
/// ```
pub struct CacheOptions<V> {
    pub(crate) normalize_key: Option<NormalizeKey>,
    pub(crate) transform: Option<Transform<V>>,
}

impl<V> CacheOptions<V> {
    /// Create an options bag with no hooks set
    pub fn new() -> Self {
        Self {
            normalize_key: None,
            transform: None,
        }
    }

    /// Set the key normalization hook
    pub fn normalize_key<F>(mut self, normalize_key: F) -> Self
    where
        F: Fn(&str) -> String + Send + Sync + 'static,
    {
        self.normalize_key = Some(Arc::new(normalize_key));
        self
    }

    /// Set the value transform hook
    pub fn transform<F>(mut self, transform: F) -> Self
    where
        F: Fn(V) -> V + Send + Sync + 'static,
    {
        self.transform = Some(Arc::new(transform));
        self
    }

    /// Check if at least one hook is set
    pub fn has_hooks(&self) -> bool {
        self.normalize_key.is_some() || self.transform.is_some()
    }
}

impl<V> Default for CacheOptions<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> Clone for CacheOptions<V> {
    fn clone(&self) -> Self {
        Self {
            normalize_key: self.normalize_key.clone(),
            transform: self.transform.clone(),
        }
    }
}

impl<V> fmt::Debug for CacheOptions<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CacheOptions")
            .field("normalize_key", &self.normalize_key.is_some())
            .field("transform", &self.transform.is_some())
            .finish()
    }
}
