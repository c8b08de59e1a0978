use std::prelude::v1::*;
use std::fmt;

use crate::Result;
use super::{ArrayStore, Core};


/// The pair of functions that lets a value carry its own key.
///
/// `key` derives the key of a stored value; `with_key` returns a value
/// which carries the given key. Every value a [`SelfKeyed`] storage holds
/// went through `with_key` (or already carried its key when it was inserted
/// with `insert_value`), so `key(with_key(k, v)) == k` must hold.
///
/// Implement this for your own unit struct, or use [`KeyFns`] to build one
/// from two closures.
pub trait SelfKey<K, V> {
    /// Returns the key `value` carries.
    fn key<'a>(&self, value: &'a V) -> &'a K;

    /// Returns `value`, changed so that it carries `key`.
    fn with_key(&self, key: K, value: V) -> V;
}

/// A [`SelfKey`] built from two closures.
///
/// ```
/// use compact_collections::core::{KeyFns, SelfKey};
///
/// struct Person { name: String, age: u8 }
///
/// let keys = KeyFns::new(
///     |p: &Person| &p.name,
///     |name, p: Person| Person { name, ..p },
/// );
///
/// let anna = keys.with_key("Anna".to_string(), Person { name: String::new(), age: 31 });
/// assert_eq!(keys.key(&anna), "Anna");
/// assert_eq!(anna.age, 31);
/// ```
#[derive(Clone, Copy)]
pub struct KeyFns<E, I> {
    extract: E,
    inject: I,
}

impl<E, I> KeyFns<E, I> {
    /// Creates key functions from an extracting and an injecting closure.
    pub fn new<K, V>(extract: E, inject: I) -> Self
    where
        E: Fn(&V) -> &K,
        I: Fn(K, V) -> V,
    {
        Self { extract, inject }
    }
}

impl<K, V, E, I> SelfKey<K, V> for KeyFns<E, I>
where
    E: Fn(&V) -> &K,
    I: Fn(K, V) -> V,
{
    fn key<'a>(&self, value: &'a V) -> &'a K {
        (self.extract)(value)
    }

    fn with_key(&self, key: K, value: V) -> V {
        (self.inject)(key, value)
    }
}

impl<E, I> fmt::Debug for KeyFns<E, I> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("KeyFns { .. }")
    }
}


/// Storage where every value carries its own key: one array of values, no
/// key array at all.
///
/// The key of slot `i` is `keys.key(&values[i])`. Inserting under a key
/// passes the value through `keys.with_key` first.
///
/// Mutating a stored value in a way that changes its key (e.g. through
/// `get_mut` or `values_mut` of a map) is a logic error: the order of the
/// array is not re-established. The behavior resulting from such a logic
/// error is not specified, but will not be undefined behavior.
pub struct SelfKeyed<V, X> {
    pub(crate) values: ArrayStore<V>,
    pub(crate) keys: X,
}

impl<V, X> SelfKeyed<V, X> {
    /// Creates empty storage using `keys`. Does not allocate.
    pub fn new(keys: X) -> Self {
        Self {
            values: ArrayStore::new(),
            keys,
        }
    }

    /// Creates empty storage using `keys` with space for exactly `capacity`
    /// values.
    pub fn with_capacity(keys: X, capacity: usize) -> Self {
        Self {
            values: ArrayStore::with_capacity(capacity),
            keys,
        }
    }

    /// Returns the key functions.
    pub fn keys(&self) -> &X {
        &self.keys
    }
}

impl<K, V, X: SelfKey<K, V>> Core<K, V> for SelfKeyed<V, X> {
    type Entry = V;

    fn len(&self) -> usize {
        self.values.len()
    }

    fn capacity(&self) -> usize {
        self.values.capacity()
    }

    fn key_at(&self, index: usize) -> &K {
        self.keys.key(&self.values.as_slice()[index])
    }

    fn values(&self) -> &[V] {
        self.values.as_slice()
    }

    fn values_mut(&mut self) -> &mut [V] {
        self.values.as_mut_slice()
    }

    fn insert_at(&mut self, index: usize, key: K, value: V) {
        let value = self.keys.with_key(key, value);
        self.values.put(index, value);
    }

    fn replace_at(&mut self, index: usize, key: K, value: V) -> V {
        let value = self.keys.with_key(key, value);
        self.values.swap_at(index, value)
    }

    fn remove_at(&mut self, index: usize) -> V {
        self.values.take(index)
    }

    fn remove_range(&mut self, index: usize, count: usize) {
        self.values.cut(index, count);
    }

    fn reserve(&mut self, additional: usize) {
        self.values.reserve(additional);
    }

    fn resize(&mut self, capacity: usize) -> Result<()> {
        self.values.resize(capacity)
    }

    fn compact(&mut self) {
        self.values.compact();
    }

    fn clear(&mut self) {
        self.values.clear();
    }

    fn entry_value(entry: V) -> V {
        entry
    }

    fn extract_key<'a>(&self, value: &'a V) -> Result<&'a K> {
        Ok(self.keys.key(value))
    }

    fn inject_key(&self, key: K, value: V) -> Result<V> {
        Ok(self.keys.with_key(key, value))
    }

    fn into_entries(self) -> Vec<V> {
        self.values.into_vec()
    }
}

impl<V: Clone, X: Clone> Clone for SelfKeyed<V, X> {
    fn clone(&self) -> Self {
        Self {
            values: self.values.clone(),
            keys: self.keys.clone(),
        }
    }
}

impl<V, X: Default> Default for SelfKeyed<V, X> {
    fn default() -> Self {
        Self::new(X::default())
    }
}

impl<V: fmt::Debug, X> fmt::Debug for SelfKeyed<V, X> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("SelfKeyed")
            .field("values", &self.values)
            .finish()
    }
}

