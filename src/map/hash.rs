use std::prelude::v1::*;
use std::{
    fmt,
    iter::FromIterator,
    marker::PhantomData,
};

use crate::{
    Result,
    bound::Span,
    core::{identity_index, Core, EntryKeyed, SelfKey, SelfKeyed},
    iter::{Entries, EntryCursor, IntoIter, Keys, Values, ValuesMut},
    order::{DefaultHashOrder, HashOrder},
};


/// A map whose entries are sorted by the hash of their key.
///
/// How entries are stored is decided by the core `C`:
///
/// - [`EntryKeyed`]: keys and values in two parallel arrays. This is what
///   [`EntryKeyedMap`][crate::EntryKeyedMap] uses.
/// - [`SelfKeyed`]: values only; each value carries its key. This is what
///   [`SelfKeyedMap`][crate::SelfKeyedMap] uses.
///
/// Lookups binary search for the key's hash and scan the run of entries
/// with that hash for the key. Inserting and removing shift the tail of the
/// array(s), so both are O(n).
///
/// ```
/// use compact_collections::EntryKeyedMap;
///
/// let mut map = EntryKeyedMap::new();
/// assert_eq!(map.insert("a", 1), None);
/// assert_eq!(map.insert("b", 2), None);
/// assert_eq!(map.insert("a", 3), Some(1));
///
/// assert_eq!(map.len(), 2);
/// assert_eq!(map.get(&"a"), Some(&3));
/// assert_eq!(map.remove(&"b"), Some(2));
/// ```
pub struct HashOrderedMap<K, V, C = EntryKeyed<K, V>, H = DefaultHashOrder> {
    core: C,
    order: H,
    _marker: PhantomData<fn() -> (K, V)>,
}

impl<K, V> HashOrderedMap<K, V, EntryKeyed<K, V>> {
    /// Creates an empty map with parallel key/value arrays and the default
    /// hash order. Does not allocate.
    pub fn new() -> Self {
        Self::with_core(EntryKeyed::new(), DefaultHashOrder::default())
    }

    /// Creates an empty map with parallel key/value arrays with space for
    /// exactly `capacity` entries.
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_core(EntryKeyed::with_capacity(capacity), DefaultHashOrder::default())
    }
}

impl<K, V, X> HashOrderedMap<K, V, SelfKeyed<V, X>> {
    /// Creates an empty map of values carrying their key, with the default
    /// hash order. Does not allocate.
    pub fn with_keys(keys: X) -> Self {
        Self::with_core(SelfKeyed::new(keys), DefaultHashOrder::default())
    }
}

impl<K, V, C, H> HashOrderedMap<K, V, C, H> {
    /// Creates an empty map from a core and a hash order.
    pub fn with_core(core: C, order: H) -> Self {
        Self {
            core,
            order,
            _marker: PhantomData,
        }
    }

    /// Returns the storage of this map.
    pub fn core(&self) -> &C {
        &self.core
    }

    /// Returns the hash order of this map.
    pub fn order(&self) -> &H {
        &self.order
    }
}

impl<K, V, C: Core<K, V>, H> HashOrderedMap<K, V, C, H> {
    /// Returns the number of entries.
    pub fn len(&self) -> usize {
        self.core.len()
    }

    /// Returns `true` if there are no entries.
    pub fn is_empty(&self) -> bool {
        self.core.is_empty()
    }

    /// Returns the number of entries that fit without reallocating.
    pub fn capacity(&self) -> usize {
        self.core.capacity()
    }

    /// Reserves space for at least `additional` more entries.
    pub fn reserve(&mut self, additional: usize) {
        self.core.reserve(additional);
    }

    /// Reallocates to exactly `capacity` slots. Fails with `CapacityTooSmall`
    /// if there are more entries than that.
    pub fn resize(&mut self, capacity: usize) -> Result<()> {
        self.core.resize(capacity)
    }

    /// Shrinks the capacity to the number of entries.
    pub fn compact(&mut self) {
        self.core.compact();
    }

    /// Removes all entries. The capacity stays the same.
    pub fn clear(&mut self) {
        self.core.clear();
    }

    /// Returns the key `value` carries. Fails with `Unsupported` for entry
    /// keyed storage.
    pub fn extract_key<'a>(&self, value: &'a V) -> Result<&'a K> {
        self.core.extract_key(value)
    }

    /// Returns `value` changed to carry `key`. Fails with `Unsupported` for
    /// entry keyed storage.
    pub fn inject_key(&self, key: K, value: V) -> Result<V> {
        self.core.inject_key(key, value)
    }

    /// Returns `true` if some entry has a value equal to `value`. This is a
    /// linear scan.
    pub fn contains_value(&self, value: &V) -> bool
    where
        V: PartialEq,
    {
        self.core.values().contains(value)
    }

    /// Iterates over all `(key, value)` pairs in hash order.
    pub fn iter(&self) -> Entries<'_, K, V, C> {
        Entries::new(&self.core, Span::ascending(self.len()))
    }

    /// Iterates over the keys in hash order.
    pub fn keys(&self) -> Keys<'_, K, V, C> {
        Keys::new(&self.core, Span::ascending(self.len()))
    }

    /// Iterates over the values in hash order.
    pub fn values(&self) -> Values<'_, V> {
        Values::new(self.core.values(), Span::ascending(self.len()))
    }

    /// Iterates over mutable references to the values. For self keyed
    /// storage, changing the key a value carries is a logic error.
    pub fn values_mut(&mut self) -> ValuesMut<'_, V> {
        ValuesMut::new(self.core.values_mut(), false)
    }

    /// Returns a cursor which can remove entries while walking the map.
    pub fn cursor(&mut self) -> EntryCursor<'_, K, V, C> {
        let span = Span::ascending(self.len());
        EntryCursor::new(&mut self.core, span)
    }

    /// Keeps only the entries for which `keep` returns `true`.
    pub fn retain<F>(&mut self, mut keep: F)
    where
        F: FnMut(&K, &V) -> bool,
    {
        let mut cursor = self.cursor();
        while let Some((key, value)) = cursor.advance() {
            if !keep(key, value) {
                cursor.remove();
            }
        }
    }
}

impl<K, V, C: Core<K, V>, H: HashOrder<K>> HashOrderedMap<K, V, C, H> {
    fn search(&self, key: &K) -> Result<usize, usize> {
        let hash = self.order.hash(key);
        let core = &self.core;
        identity_index(
            core.len(),
            |i| self.order.hash(core.key_at(i)).cmp(&hash),
            |i| self.order.equals(core.key_at(i), key),
        )
    }

    /// Returns `true` if an entry with key `key` is in the map.
    pub fn contains_key(&self, key: &K) -> bool {
        self.search(key).is_ok()
    }

    /// Returns the value stored under `key`.
    pub fn get(&self, key: &K) -> Option<&V> {
        self.search(key).ok().map(|i| self.core.value_at(i))
    }

    /// Returns the stored key and value under `key`.
    pub fn get_key_value(&self, key: &K) -> Option<(&K, &V)> {
        self.search(key).ok().map(|i| (self.core.key_at(i), self.core.value_at(i)))
    }

    /// Returns the value stored under `key` mutably. For self keyed storage,
    /// changing the key the value carries is a logic error.
    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        let index = self.search(key).ok()?;
        Some(&mut self.core.values_mut()[index])
    }

    /// Stores `value` under `key` and returns the value previously stored
    /// under it.
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        match self.search(&key) {
            Ok(index) => Some(self.core.replace_at(index, key, value)),
            Err(index) => {
                self.core.insert_at(index, key, value);
                None
            }
        }
    }

    /// Removes the entry under `key` and returns its value.
    pub fn remove(&mut self, key: &K) -> Option<V> {
        self.remove_entry(key).map(C::entry_value)
    }

    /// Removes the entry under `key` and returns it as stored.
    pub fn remove_entry(&mut self, key: &K) -> Option<C::Entry> {
        let index = self.search(key).ok()?;
        Some(self.core.remove_at(index))
    }
}

impl<K, V, X, H> HashOrderedMap<K, V, SelfKeyed<V, X>, H>
where
    X: SelfKey<K, V>,
    H: HashOrder<K>,
{
    /// Stores `value` under the key it carries and returns the value
    /// previously stored under that key.
    ///
    /// ```
    /// use compact_collections::{SelfKeyedMap, core::KeyFns};
    ///
    /// #[derive(Debug, PartialEq)]
    /// struct User { id: u32, name: &'static str }
    ///
    /// let mut users = SelfKeyedMap::with_keys(KeyFns::new(
    ///     |u: &User| &u.id,
    ///     |id, u: User| User { id, ..u },
    /// ));
    /// users.insert_value(User { id: 7, name: "ada" });
    /// assert_eq!(users.get(&7).map(|u| u.name), Some("ada"));
    /// ```
    pub fn insert_value(&mut self, value: V) -> Option<V> {
        let found = self.search(self.core.keys.key(&value));
        match found {
            Ok(index) => Some(self.core.values.swap_at(index, value)),
            Err(index) => {
                self.core.values.put(index, value);
                None
            }
        }
    }
}

impl<K, V, C: Clone, H: Clone> Clone for HashOrderedMap<K, V, C, H> {
    fn clone(&self) -> Self {
        Self::with_core(self.core.clone(), self.order.clone())
    }
}

impl<K, V, C: Default, H: Default> Default for HashOrderedMap<K, V, C, H> {
    fn default() -> Self {
        Self::with_core(C::default(), H::default())
    }
}

impl<K, V, C, H> PartialEq for HashOrderedMap<K, V, C, H>
where
    V: PartialEq,
    C: Core<K, V>,
    H: HashOrder<K>,
{
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len()
            && self.iter().all(|(key, value)| other.get(key) == Some(value))
    }
}

impl<K, V, C, H> Eq for HashOrderedMap<K, V, C, H>
where
    V: Eq,
    C: Core<K, V>,
    H: HashOrder<K>,
{}

impl<K, V, C, H> fmt::Debug for HashOrderedMap<K, V, C, H>
where
    K: fmt::Debug,
    V: fmt::Debug,
    C: Core<K, V>,
{
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K, V, C, H> Extend<(K, V)> for HashOrderedMap<K, V, C, H>
where
    C: Core<K, V>,
    H: HashOrder<K>,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        let iter = iter.into_iter();
        self.reserve(iter.size_hint().0);
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl<K, V, C, H> FromIterator<(K, V)> for HashOrderedMap<K, V, C, H>
where
    C: Core<K, V> + Default,
    H: HashOrder<K> + Default,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut out = Self::default();
        out.extend(iter);
        out
    }
}

impl<K, V, C: Core<K, V>, H> IntoIterator for HashOrderedMap<K, V, C, H> {
    type Item = C::Entry;
    type IntoIter = IntoIter<C::Entry>;
    fn into_iter(self) -> Self::IntoIter {
        IntoIter::new(self.core.into_entries())
    }
}

impl<'a, K: 'a, V: 'a, C: Core<K, V>, H> IntoIterator for &'a HashOrderedMap<K, V, C, H> {
    type Item = (&'a K, &'a V);
    type IntoIter = Entries<'a, K, V, C>;
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
