//! Fixed-size separate-chaining hash map keyed by strings
//!
//! The bucket array never grows. Inserting a key that is already present
//! does not overwrite it: the new entry is prepended to the chain and shadows
//! the older one, which stays reachable through [`ChainedMap::iter`] and is
//! handed to the destructor on [`ChainedMap::teardown`].

use rustc_hash::FxHasher;
use std::fmt;
use std::hash::{BuildHasher, BuildHasherDefault};

/// Number of buckets, fixed for the lifetime of the map.
pub const BUCKET_COUNT: usize = 1024;

struct Entry<V> {
    key: String,
    value: V,
    next: Option<Box<Entry<V>>>,
}

/// String-keyed chained hash map with a fixed bucket array.
pub struct ChainedMap<V, S = BuildHasherDefault<FxHasher>> {
    buckets: Vec<Option<Box<Entry<V>>>>,
    len: usize,
    hasher: S,
}

impl<V> ChainedMap<V> {
    pub fn new() -> Self {
        Self::with_hasher(BuildHasherDefault::default())
    }
}

impl<V, S: BuildHasher> ChainedMap<V, S> {
    pub fn with_hasher(hasher: S) -> Self {
        let mut buckets = Vec::with_capacity(BUCKET_COUNT);
        buckets.resize_with(BUCKET_COUNT, || None);
        Self {
            buckets,
            len: 0,
            hasher,
        }
    }

    fn bucket(&self, key: &str) -> usize {
        (self.hasher.hash_one(key) % BUCKET_COUNT as u64) as usize
    }

    /// Prepend `key -> value` to its bucket's chain.
    pub fn insert(&mut self, key: impl Into<String>, value: V) {
        let key = key.into();
        let index = self.bucket(&key);
        let next = self.buckets[index].take();
        self.buckets[index] = Some(Box::new(Entry { key, value, next }));
        self.len += 1;
    }

    /// Most recently inserted value for `key`.
    pub fn find(&self, key: &str) -> Option<&V> {
        let mut entry = self.buckets[self.bucket(key)].as_deref();
        while let Some(current) = entry {
            if current.key == key {
                return Some(&current.value);
            }
            entry = current.next.as_deref();
        }
        None
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.find(key).is_some()
    }
}

impl<V, S> ChainedMap<V, S> {
    /// Number of entries, shadowed ones included.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Every entry, bucket by bucket, newest first within a chain.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &V)> {
        self.buckets.iter().flat_map(|head| {
            std::iter::successors(head.as_deref(), |entry| entry.next.as_deref())
                .map(|entry| (entry.key.as_str(), &entry.value))
        })
    }

    /// Consume the map, handing every key and value to `destroy`.
    pub fn teardown(mut self, mut destroy: impl FnMut(String, V)) {
        for head in self.buckets.iter_mut() {
            let mut entry = head.take();
            while let Some(boxed) = entry {
                let Entry { key, value, next } = *boxed;
                destroy(key, value);
                entry = next;
            }
        }
        self.len = 0;
    }
}

impl<V> Default for ChainedMap<V> {
    fn default() -> Self {
        Self::new()
    }
}

// Unlink chains one entry at a time; the derived drop would recurse once per
// entry in a chain.
impl<V, S> Drop for ChainedMap<V, S> {
    fn drop(&mut self) {
        for head in self.buckets.iter_mut() {
            let mut entry = head.take();
            while let Some(mut boxed) = entry {
                entry = boxed.next.take();
            }
        }
    }
}

impl<V: fmt::Debug, S> fmt::Debug for ChainedMap<V, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::hash::Hasher;
    use test_log::test;

    /// Sends every key to bucket 0.
    #[derive(Default)]
    struct Collide;

    impl Hasher for Collide {
        fn finish(&self) -> u64 {
            0
        }

        fn write(&mut self, _bytes: &[u8]) {}
    }

    #[test]
    fn test_insert_and_find() {
        let mut map = ChainedMap::new();
        map.insert("x", 1);
        map.insert("y", 2);

        assert_eq!(map.find("x"), Some(&1));
        assert_eq!(map.find("y"), Some(&2));
        assert_eq!(map.find("z"), None);
        assert_eq!(map.len(), 2);
    }

    #[test]
    fn test_newest_entry_shadows() {
        let mut map = ChainedMap::new();
        map.insert("x", "old");
        map.insert("x", "new");

        assert_eq!(map.find("x"), Some(&"new"));
        assert_eq!(map.len(), 2);
        assert_eq!(map.iter().filter(|(k, _)| *k == "x").count(), 2);
    }

    #[test]
    fn test_collisions_chain() {
        let mut map: ChainedMap<usize, BuildHasherDefault<Collide>> =
            ChainedMap::with_hasher(BuildHasherDefault::default());
        for i in 0..100 {
            map.insert(format!("k{i}"), i);
        }

        for i in 0..100 {
            assert_eq!(map.find(&format!("k{i}")), Some(&i));
        }
        let keys: Vec<&str> = map.iter().map(|(k, _)| k).collect();
        assert_eq!(keys.first(), Some(&"k99"));
        assert_eq!(keys.last(), Some(&"k0"));
    }

    #[test]
    fn test_teardown_visits_every_entry() {
        let mut map = ChainedMap::new();
        map.insert("a", 1);
        map.insert("b", 2);
        map.insert("a", 3);

        let mut seen = Vec::new();
        map.teardown(|key, value| seen.push((key, value)));
        seen.sort();

        assert_eq!(
            seen,
            vec![("a".to_string(), 1), ("a".to_string(), 3), ("b".to_string(), 2)]
        );
    }

    #[test]
    fn test_long_chain_drops_without_recursion() {
        let mut map: ChainedMap<u32, BuildHasherDefault<Collide>> =
            ChainedMap::with_hasher(BuildHasherDefault::default());
        for i in 0..200_000 {
            map.insert(i.to_string(), i);
        }
        drop(map);
    }
}
