//! Closed-addressing hash table used as the term map.
//!
//! A `Vec` of buckets, each bucket a `Vec` of `(key, value)` pairs. Growth
//! doubles the bucket count and redistributes every entry. The hash
//! function is pluggable through the `BuildHasher` parameter.

use std::borrow::Borrow;
use std::collections::hash_map::RandomState;
use std::hash::{BuildHasher, Hash};

const INITIAL_BUCKETS: usize = 16;
const MAX_LOAD_FACTOR: f64 = 0.75;
const GROWTH_FACTOR: usize = 2;

pub struct HashMap<K, V, S = RandomState> {
    buckets: Vec<Vec<(K, V)>>,
    len: usize,
    hasher: S,
}

impl<K: Hash + Eq, V> HashMap<K, V> {
    pub fn new() -> Self {
        Self::with_hasher(RandomState::new())
    }
}

impl<K: Hash + Eq, V, S: BuildHasher> HashMap<K, V, S> {
    pub fn with_hasher(hasher: S) -> Self {
        Self {
            buckets: (0..INITIAL_BUCKETS).map(|_| Vec::new()).collect(),
            len: 0,
            hasher,
        }
    }

    /// Inserts a binding, returning true if the key was new. An existing
    /// key keeps its bucket slot and only the value is replaced.
    pub fn insert(&mut self, key: K, value: V) -> bool {
        let index = self.bucket_index(&key);
        if let Some(position) = self.buckets[index].iter().position(|(k, _)| *k == key) {
            self.buckets[index][position].1 = value;
            return false;
        }

        self.grow_if_needed(self.len + 1);
        let index = self.bucket_index(&key);
        self.buckets[index].push((key, value));
        self.len += 1;
        true
    }

    /// Removes a binding, returning true if the key was present.
    pub fn remove<Q>(&mut self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let index = self.bucket_index(key);
        if let Some(position) = self.buckets[index]
            .iter()
            .position(|(k, _)| k.borrow() == key)
        {
            self.buckets[index].swap_remove(position);
            self.len -= 1;
            return true;
        }
        false
    }

    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let index = self.bucket_index(key);
        self.buckets[index]
            .iter()
            .find(|(k, _)| k.borrow() == key)
            .map(|(_, v)| v)
    }

    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let index = self.bucket_index(key);
        self.buckets[index]
            .iter_mut()
            .find(|(k, _)| k.borrow() == key)
            .map(|(_, v)| v)
    }

    /// Mutable access to the value for `key`, default-initializing the
    /// binding when the key is absent.
    pub fn entry_or_default(&mut self, key: K) -> &mut V
    where
        V: Default,
    {
        let index = self.bucket_index(&key);
        if let Some(position) = self.buckets[index].iter().position(|(k, _)| *k == key) {
            return &mut self.buckets[index][position].1;
        }

        self.grow_if_needed(self.len + 1);
        let index = self.bucket_index(&key);
        let bucket = &mut self.buckets[index];
        bucket.push((key, V::default()));
        self.len += 1;
        let last = bucket.len() - 1;
        &mut bucket[last].1
    }

    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.get(key).is_some()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Drops every binding; the bucket array keeps its size.
    pub fn clear(&mut self) {
        for bucket in &mut self.buckets {
            bucket.clear();
        }
        self.len = 0;
    }

    /// Iterates bindings in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> {
        self.buckets
            .iter()
            .flat_map(|bucket| bucket.iter().map(|(k, v)| (k, v)))
    }

    pub fn load_factor(&self) -> f64 {
        self.len as f64 / self.buckets.len() as f64
    }

    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    fn bucket_index<Q: Hash + ?Sized>(&self, key: &Q) -> usize {
        (self.hasher.hash_one(key) % self.buckets.len() as u64) as usize
    }

    // Checked against the post-insert size so the load factor invariant
    // holds after every insert, not just before the next one.
    fn grow_if_needed(&mut self, new_len: usize) {
        if new_len as f64 / self.buckets.len() as f64 > MAX_LOAD_FACTOR {
            self.rehash(self.buckets.len() * GROWTH_FACTOR);
        }
    }

    fn rehash(&mut self, new_bucket_count: usize) {
        let old_buckets = std::mem::replace(
            &mut self.buckets,
            (0..new_bucket_count).map(|_| Vec::new()).collect(),
        );
        for (key, value) in old_buckets.into_iter().flatten() {
            let index = self.bucket_index(&key);
            self.buckets[index].push((key, value));
        }
    }
}

impl<K: Hash + Eq, V> Default for HashMap<K, V> {
    fn default() -> Self {
        Self::new()
    }
}
