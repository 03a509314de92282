//! Dotted-path reader and writer primitives
//!
//! A path is split on `.`; each segment addresses one level of nesting.
//! A path without a dot is a plain top-level key. Empty segments are
//! ordinary (empty) keys.

use std::collections::hash_map;

use tracing::debug;

use crate::error::{Error, Result};
use crate::store::{Entry, Store};

/// Segment separator
pub const SEPARATOR: char = '.';

/// Split a path into its segments
pub fn split(path: &str) -> std::str::Split<'_, char> {
    path.split(SEPARATOR)
}

/// Read the entry at `path`
///
/// Returns `None` if any segment is missing or if a segment before the last
/// one holds a leaf value. Never mutates the store.
pub fn get<'a, V>(store: &'a Store<V>, path: &str) -> Option<&'a Entry<V>> {
    let mut segments = split(path);
    let mut entry = store.get_segment(segments.next()?)?;

    for segment in segments {
        entry = entry.as_map()?.get_segment(segment)?;
    }

    Some(entry)
}

/// Mutable variant of [`get`]
pub fn get_mut<'a, V>(store: &'a mut Store<V>, path: &str) -> Option<&'a mut Entry<V>> {
    let mut segments = split(path);
    let mut entry = store.get_segment_mut(segments.next()?)?;

    for segment in segments {
        entry = entry.as_map_mut()?.get_segment_mut(segment)?;
    }

    Some(entry)
}

/// Write `value` at `path`, creating intermediate maps as needed
///
/// An intermediate segment that currently holds a leaf value is replaced by a
/// new empty map. Whatever sits at the final segment is overwritten.
///
/// # Returns
/// * `&V` - The value as stored
pub fn set<'a, V>(store: &'a mut Store<V>, path: &str, value: V) -> &'a V {
    let (parent, last) = match path.rsplit_once(SEPARATOR) {
        Some((prefix, last)) => (descend_or_replace(store, prefix), last),
        None => (store, path),
    };

    write_leaf(parent, last, value)
}

/// Strict variant of [`set`]
///
/// Fails with [`Error::NotAMap`] instead of replacing a leaf value on the way
/// down, and with [`Error::EmptyKey`] for an empty path. On failure the store
/// is left untouched.
pub fn try_set<'a, V>(store: &'a mut Store<V>, path: &str, value: V) -> Result<&'a V> {
    if path.is_empty() {
        return Err(Error::EmptyKey);
    }

    let (parent, last) = match path.rsplit_once(SEPARATOR) {
        Some((prefix, last)) => (descend_strict(store, prefix)?, last),
        None => (store, path),
    };

    Ok(write_leaf(parent, last, value))
}

/// Remove and return the entry at `path`
///
/// Intermediate maps stay in place even if they become empty.
pub fn remove<V>(store: &mut Store<V>, path: &str) -> Option<Entry<V>> {
    match path.rsplit_once(SEPARATOR) {
        Some((prefix, last)) => get_mut(store, prefix)?.as_map_mut()?.remove_segment(last),
        None => store.remove_segment(path),
    }
}

/// Check if an entry exists at `path`
pub fn contains<V>(store: &Store<V>, path: &str) -> bool {
    get(store, path).is_some()
}

fn descend_or_replace<'a, V>(mut store: &'a mut Store<V>, prefix: &str) -> &'a mut Store<V> {
    for segment in split(prefix) {
        let slot = store
            .slot(segment)
            .or_insert_with(|| Entry::Map(Store::new()));

        if !slot.is_map() {
            debug!(segment, "replacing leaf value with nested map");
            *slot = Entry::Map(Store::new());
        }

        store = match slot {
            Entry::Map(map) => map,
            Entry::Value(_) => unreachable!("slot was just made a map"),
        };
    }

    store
}

fn descend_strict<'a, V>(mut store: &'a mut Store<V>, prefix: &str) -> Result<&'a mut Store<V>> {
    let mut consumed = 0;

    for segment in split(prefix) {
        consumed += segment.len();

        let slot = store
            .slot(segment)
            .or_insert_with(|| Entry::Map(Store::new()));

        store = match slot {
            Entry::Map(map) => map,
            Entry::Value(_) => {
                let path = &prefix[..consumed];
                debug!(path, "strict write blocked by leaf value");
                return Err(Error::NotAMap { path: path.to_owned() });
            }
        };

        consumed += SEPARATOR.len_utf8();
    }

    Ok(store)
}

fn write_leaf<'a, V>(store: &'a mut Store<V>, segment: &str, value: V) -> &'a V {
    let slot = match store.slot(segment) {
        hash_map::Entry::Occupied(mut occupied) => {
            occupied.insert(Entry::Value(value));
            occupied.into_mut()
        }
        hash_map::Entry::Vacant(vacant) => vacant.insert(Entry::Value(value)),
    };

    match slot {
        Entry::Value(value) => value,
        Entry::Map(_) => unreachable!("slot was just written with a value"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split() {
        assert_eq!(split("foo").collect::<Vec<_>>(), vec!["foo"]);
        assert_eq!(split("a.b.c").collect::<Vec<_>>(), vec!["a", "b", "c"]);
        assert_eq!(split("a..b").collect::<Vec<_>>(), vec!["a", "", "b"]);
    }

    #[test]
    fn test_set_and_get_top_level() {
        let mut store = Store::new();

        assert_eq!(set(&mut store, "foo", "bar"), &"bar");
        assert_eq!(get(&store, "foo"), Some(&Entry::Value("bar")));
    }

    #[test]
    fn test_set_creates_intermediate_maps() {
        let mut store = Store::new();
        set(&mut store, "a.b.c", 1);

        let a = store.get_segment("a").and_then(Entry::as_map).unwrap();
        let b = a.get_segment("b").and_then(Entry::as_map).unwrap();
        assert_eq!(b.get_segment("c"), Some(&Entry::Value(1)));
        assert_eq!(get(&store, "a.b.c"), Some(&Entry::Value(1)));
    }

    #[test]
    fn test_set_keeps_siblings() {
        let mut store = Store::new();
        set(&mut store, "a.b", 1);
        set(&mut store, "a.c", 2);

        assert_eq!(get(&store, "a.b"), Some(&Entry::Value(1)));
        assert_eq!(get(&store, "a.c"), Some(&Entry::Value(2)));
        assert_eq!(get(&store, "a").and_then(Entry::as_map).map(Store::len), Some(2));
    }

    #[test]
    fn test_get_missing_does_not_mutate() {
        let store: Store<i32> = Store::new();

        assert_eq!(get(&store, "nope"), None);
        assert_eq!(get(&store, "nope.deep"), None);
        assert!(store.is_empty());
    }

    #[test]
    fn test_get_through_leaf_is_none() {
        let mut store = Store::new();
        set(&mut store, "a", 1);

        assert_eq!(get(&store, "a.b"), None);
    }

    #[test]
    fn test_set_replaces_leaf_on_path() {
        let mut store = Store::new();
        set(&mut store, "a", "scalar");
        set(&mut store, "a.b", "nested");

        assert!(get(&store, "a").unwrap().is_map());
        assert_eq!(get(&store, "a.b"), Some(&Entry::Value("nested")));
    }

    #[test]
    fn test_set_overwrites_map_at_final_segment() {
        let mut store = Store::new();
        set(&mut store, "a.b", 1);
        set(&mut store, "a", 2);

        assert_eq!(get(&store, "a"), Some(&Entry::Value(2)));
        assert_eq!(get(&store, "a.b"), None);
    }

    #[test]
    fn test_try_set_rejects_leaf_on_path() {
        let mut store = Store::new();
        set(&mut store, "a.b", 1);

        let err = try_set(&mut store, "a.b.c.d", 2).unwrap_err();
        assert_eq!(err, Error::NotAMap { path: "a.b".to_string() });

        // Untouched
        assert_eq!(get(&store, "a.b"), Some(&Entry::Value(1)));
    }

    #[test]
    fn test_try_set_creates_missing_maps() {
        let mut store = Store::new();

        assert_eq!(try_set(&mut store, "x.y", 3).unwrap(), &3);
        assert_eq!(get(&store, "x.y"), Some(&Entry::Value(3)));
    }

    #[test]
    fn test_try_set_empty_key() {
        let mut store = Store::new();

        assert_eq!(try_set(&mut store, "", 1), Err(Error::EmptyKey));
        assert!(store.is_empty());
    }

    #[test]
    fn test_remove() {
        let mut store = Store::new();
        set(&mut store, "a.b", 1);
        set(&mut store, "c", 2);

        assert_eq!(remove(&mut store, "a.b"), Some(Entry::Value(1)));
        assert_eq!(remove(&mut store, "c"), Some(Entry::Value(2)));
        assert_eq!(remove(&mut store, "a.missing"), None);
        assert_eq!(remove(&mut store, "nope.deep"), None);

        // Parent map stays behind
        assert!(contains(&store, "a"));
        assert!(!contains(&store, "a.b"));
    }

    #[test]
    fn test_get_mut() {
        let mut store = Store::new();
        set(&mut store, "a.b", 1);

        if let Some(Entry::Value(value)) = get_mut(&mut store, "a.b") {
            *value += 41;
        }

        assert_eq!(get(&store, "a.b"), Some(&Entry::Value(42)));
        assert!(get_mut(&mut store, "a.b.c").is_none());
    }
}
