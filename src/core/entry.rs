use std::prelude::v1::*;
use std::fmt;

use crate::{Error, Result};
use super::{ArrayStore, Core};


/// Storage with two parallel arrays: slot `i` of `keys` holds the key, slot
/// `i` of `values` the value.
///
/// Both arrays are grown, shifted and shrunk in lockstep, so they always
/// have the same length and the same capacity.
#[derive(Clone)]
pub struct EntryKeyed<K, V> {
    keys: ArrayStore<K>,
    values: ArrayStore<V>,
}

impl<K, V> EntryKeyed<K, V> {
    /// Creates empty storage. Does not allocate.
    pub const fn new() -> Self {
        Self {
            keys: ArrayStore::new(),
            values: ArrayStore::new(),
        }
    }

    /// Creates empty storage with space for exactly `capacity` entries.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            keys: ArrayStore::with_capacity(capacity),
            values: ArrayStore::with_capacity(capacity),
        }
    }

    fn check_lockstep(&self) {
        debug_assert_eq!(self.keys.len(), self.values.len());
        debug_assert_eq!(self.keys.capacity(), self.values.capacity());
    }
}

impl<K, V> Core<K, V> for EntryKeyed<K, V> {
    type Entry = (K, V);

    fn len(&self) -> usize {
        self.keys.len()
    }

    fn capacity(&self) -> usize {
        self.keys.capacity()
    }

    fn key_at(&self, index: usize) -> &K {
        &self.keys.as_slice()[index]
    }

    fn values(&self) -> &[V] {
        self.values.as_slice()
    }

    fn values_mut(&mut self) -> &mut [V] {
        self.values.as_mut_slice()
    }

    fn insert_at(&mut self, index: usize, key: K, value: V) {
        self.keys.put(index, key);
        self.values.put(index, value);
        self.check_lockstep();
    }

    fn replace_at(&mut self, index: usize, key: K, value: V) -> V {
        self.keys.swap_at(index, key);
        self.values.swap_at(index, value)
    }

    fn remove_at(&mut self, index: usize) -> (K, V) {
        let key = self.keys.take(index);
        let value = self.values.take(index);
        self.check_lockstep();
        (key, value)
    }

    fn remove_range(&mut self, index: usize, count: usize) {
        self.keys.cut(index, count);
        self.values.cut(index, count);
        self.check_lockstep();
    }

    fn reserve(&mut self, additional: usize) {
        self.keys.reserve(additional);
        self.values.reserve(additional);
        self.check_lockstep();
    }

    fn resize(&mut self, capacity: usize) -> Result<()> {
        // Both arrays have the same length, so if the first one accepts the
        // capacity, the second one does too.
        self.keys.resize(capacity)?;
        self.values.resize(capacity)?;
        self.check_lockstep();
        Ok(())
    }

    fn compact(&mut self) {
        self.keys.compact();
        self.values.compact();
    }

    fn clear(&mut self) {
        self.keys.clear();
        self.values.clear();
    }

    fn entry_value((_, value): (K, V)) -> V {
        value
    }

    fn extract_key<'a>(&self, _: &'a V) -> Result<&'a K> {
        Err(Error::Unsupported("entry-keyed values do not carry their key"))
    }

    fn inject_key(&self, _: K, _: V) -> Result<V> {
        Err(Error::Unsupported("entry-keyed values cannot carry a key"))
    }

    fn into_entries(self) -> Vec<(K, V)> {
        self.keys.into_vec().into_iter().zip(self.values.into_vec()).collect()
    }
}

impl<K, V> Default for EntryKeyed<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for EntryKeyed<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("EntryKeyed")
            .field("keys", &self.keys)
            .field("values", &self.values)
            .finish()
    }
}
