//! # transformcache
//!
//! Key/value cache that runs every key through a normalization hook and every
//! written value through a transform hook, over a nested [`Store`].
//!
//! ## Architecture
//! - **Store**: `deepstore` nested map, addressed by dotted paths
//! - **Hooks**: `normalize_key` on every read and write, `transform` on writes only
//! - **Sharing**: the store sits behind a [`SharedStore`] handle that the
//!   caller may keep a clone of
//!
//! ```
//! use transformcache::TransformCache;
//!
//! let cache = TransformCache::with_hooks(
//!     |key: &str| key.to_uppercase(),
//!     |value: String| value.to_uppercase(),
//! );
//!
//! cache.set("foo", "bar".to_string());
//! assert_eq!(cache.get_value("FOO"), Some("BAR".to_string()));
//! assert_eq!(cache.get_value("foo"), Some("BAR".to_string()));
//! ```

#![warn(missing_docs)]

mod cache;
mod options;

pub use cache::TransformCache;
pub use options::{CacheOptions, NormalizeKey, Transform};

pub use deepstore::{Entry, Error, Result, SharedStore, Store};
