use std::prelude::v1::*;
use std::{
    cmp::Ordering,
    fmt,
    hash::{Hash, Hasher},
    iter::FromIterator,
    marker::PhantomData,
    ops::Bound,
};

use crate::{
    Error, Result,
    bound::{Sorted, Span, Window},
    core::{Core, EntryKeyed, SelfKey, SelfKeyed},
    iter::{Entries, EntryCursor, IntoIter, Keys, Values, ValuesMut},
    map::{KeySet, MapView},
    order::{Comparator, Natural},
};


/// A map whose entries are sorted by a comparator over their keys.
///
/// Storage works like for [`HashOrderedMap`][crate::HashOrderedMap]: the
/// core `C` is either [`EntryKeyed`] (parallel key/value arrays) or
/// [`SelfKeyed`] (values carrying their key). Lookups and navigation are
/// binary searches; inserting and removing shift the array(s).
///
/// Sub maps ([`sub_map`][NavigableMap::sub_map], ...) and key sets
/// ([`key_set`][NavigableMap::key_set]) borrow the map and restrict every
/// operation to their bounds.
///
/// ```
/// use compact_collections::NavigableMap;
///
/// let mut map = NavigableMap::new();
/// map.insert("b", 2);
/// map.insert("a", 1);
/// map.insert("a", 3);
///
/// assert_eq!(map.len(), 2);
/// assert_eq!(map.get(&"a"), Some(&3));
/// assert_eq!(map.keys().collect::<Vec<_>>(), [&"a", &"b"]);
///
/// assert_eq!(map.poll_first_entry(), Some(("a", 3)));
/// assert_eq!(map.first_key(), Ok(&"b"));
/// ```
pub struct NavigableMap<K, V, C = EntryKeyed<K, V>, O = Natural> {
    pub(crate) core: C,
    order: O,
    _marker: PhantomData<fn() -> (K, V)>,
}

impl<K: Ord, V> NavigableMap<K, V, EntryKeyed<K, V>> {
    /// Creates an empty map with parallel key/value arrays, ordered by
    /// `K: Ord`. Does not allocate.
    pub fn new() -> Self {
        Self::with_core(EntryKeyed::new(), Natural)
    }

    /// Creates an empty map with parallel key/value arrays with space for
    /// exactly `capacity` entries.
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_core(EntryKeyed::with_capacity(capacity), Natural)
    }
}

impl<K: Ord, V, X> NavigableMap<K, V, SelfKeyed<V, X>> {
    /// Creates an empty map of values carrying their key, ordered by
    /// `K: Ord`. Does not allocate.
    pub fn with_keys(keys: X) -> Self {
        Self::with_core(SelfKeyed::new(keys), Natural)
    }
}

impl<K, V, C, O> NavigableMap<K, V, C, O> {
    /// Creates an empty map from a core and a comparator.
    pub fn with_core(core: C, order: O) -> Self {
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

    /// Returns the comparator of this map.
    pub fn comparator(&self) -> &O {
        &self.order
    }
}

impl<K, V, C: Core<K, V>, O> NavigableMap<K, V, C, O> {
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

    /// Iterates over all `(key, value)` pairs in ascending key order.
    pub fn iter(&self) -> Entries<'_, K, V, C> {
        Entries::new(&self.core, Span::ascending(self.len()))
    }

    /// Iterates over the keys in ascending key order.
    pub fn keys(&self) -> Keys<'_, K, V, C> {
        Keys::new(&self.core, Span::ascending(self.len()))
    }

    /// Iterates over the values in ascending key order.
    pub fn values(&self) -> Values<'_, V> {
        Values::new(self.core.values(), Span::ascending(self.len()))
    }

    /// Iterates over mutable references to the values in ascending key order.
    /// For self keyed storage, changing the key a value carries is a logic
    /// error.
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

    /// Removes and returns the entry with the least key.
    pub fn poll_first_entry(&mut self) -> Option<C::Entry> {
        if self.is_empty() {
            None
        } else {
            Some(self.core.remove_at(0))
        }
    }

    /// Removes and returns the entry with the greatest key.
    pub fn poll_last_entry(&mut self) -> Option<C::Entry> {
        let last = self.len().checked_sub(1)?;
        Some(self.core.remove_at(last))
    }

    /// Returns the least key. Fails with `NoSuchElement` if the map is empty.
    pub fn first_key(&self) -> Result<&K> {
        self.first_entry().map(|(k, _)| k)
    }

    /// Returns the greatest key. Fails with `NoSuchElement` if the map is
    /// empty.
    pub fn last_key(&self) -> Result<&K> {
        self.last_entry().map(|(k, _)| k)
    }

    /// Returns the entry with the least key. Fails with `NoSuchElement` if
    /// the map is empty.
    pub fn first_entry(&self) -> Result<(&K, &V)> {
        if self.is_empty() {
            Err(Error::NoSuchElement)
        } else {
            Ok(self.entry_at(0))
        }
    }

    /// Returns the entry with the greatest key. Fails with `NoSuchElement` if
    /// the map is empty.
    pub fn last_entry(&self) -> Result<(&K, &V)> {
        match self.len().checked_sub(1) {
            Some(last) => Ok(self.entry_at(last)),
            None => Err(Error::NoSuchElement),
        }
    }

    pub(crate) fn entry_at(&self, index: usize) -> (&K, &V) {
        (self.core.key_at(index), self.core.value_at(index))
    }
}

impl<K, V, C: Core<K, V>, O: Comparator<K>> NavigableMap<K, V, C, O> {
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
        self.search(key).ok().map(|i| self.entry_at(i))
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

    /// Returns the greatest key strictly less than `key`.
    pub fn lower_key(&self, key: &K) -> Option<&K> {
        self.lower_entry(key).map(|(k, _)| k)
    }

    /// Returns the greatest key less than or equal to `key`.
    pub fn floor_key(&self, key: &K) -> Option<&K> {
        self.floor_entry(key).map(|(k, _)| k)
    }

    /// Returns the least key greater than or equal to `key`.
    pub fn ceiling_key(&self, key: &K) -> Option<&K> {
        self.ceiling_entry(key).map(|(k, _)| k)
    }

    /// Returns the least key strictly greater than `key`.
    pub fn higher_key(&self, key: &K) -> Option<&K> {
        self.higher_entry(key).map(|(k, _)| k)
    }

    /// Returns the entry with the greatest key strictly less than `key`.
    pub fn lower_entry(&self, key: &K) -> Option<(&K, &V)> {
        Window::full().lower(self, key).map(|i| self.entry_at(i))
    }

    /// Returns the entry with the greatest key less than or equal to `key`.
    pub fn floor_entry(&self, key: &K) -> Option<(&K, &V)> {
        Window::full().floor(self, key).map(|i| self.entry_at(i))
    }

    /// Returns the entry with the least key greater than or equal to `key`.
    pub fn ceiling_entry(&self, key: &K) -> Option<(&K, &V)> {
        Window::full().ceiling(self, key).map(|i| self.entry_at(i))
    }

    /// Returns the entry with the least key strictly greater than `key`.
    pub fn higher_entry(&self, key: &K) -> Option<(&K, &V)> {
        Window::full().higher(self, key).map(|i| self.entry_at(i))
    }

    /// Returns a read-only view over the whole map.
    pub fn view(&self) -> MapView<K, V, C, O, &Self> {
        MapView::new(self, Window::full())
    }

    /// Returns a view over the whole map which can insert and remove.
    pub fn view_mut(&mut self) -> MapView<K, V, C, O, &mut Self> {
        MapView::new(self, Window::full())
    }

    /// Returns a view over the whole map in descending key order.
    pub fn descending_map(&self) -> MapView<K, V, C, O, &Self> {
        self.view().descending()
    }

    /// Returns a view over the whole map in descending key order which can
    /// insert and remove.
    pub fn descending_map_mut(&mut self) -> MapView<K, V, C, O, &mut Self> {
        self.view_mut().descending()
    }

    /// Returns a view over the entries with keys between `from` and `to`.
    ///
    /// Fails with `InvertedBounds` if `from` is greater than `to`.
    pub fn sub_map(&self, from: Bound<K>, to: Bound<K>) -> Result<MapView<K, V, C, O, &Self>> {
        let window = Window::new(self, from, to)?;
        Ok(MapView::new(self, window))
    }

    /// Like [`sub_map`][NavigableMap::sub_map], but the view can insert and
    /// remove.
    pub fn sub_map_mut(&mut self, from: Bound<K>, to: Bound<K>) -> Result<MapView<K, V, C, O, &mut Self>> {
        let window = Window::new(&*self, from, to)?;
        Ok(MapView::new(self, window))
    }

    /// Returns a view over the entries with keys less than (or equal to,
    /// if `to` is inclusive) `to`.
    pub fn head_map(&self, to: Bound<K>) -> MapView<K, V, C, O, &Self> {
        MapView::new(self, Window::unchecked(Bound::Unbounded, to))
    }

    /// Like [`head_map`][NavigableMap::head_map], but the view can insert and
    /// remove.
    pub fn head_map_mut(&mut self, to: Bound<K>) -> MapView<K, V, C, O, &mut Self> {
        MapView::new(self, Window::unchecked(Bound::Unbounded, to))
    }

    /// Returns a view over the entries with keys greater than (or equal to,
    /// if `from` is inclusive) `from`.
    pub fn tail_map(&self, from: Bound<K>) -> MapView<K, V, C, O, &Self> {
        MapView::new(self, Window::unchecked(from, Bound::Unbounded))
    }

    /// Like [`tail_map`][NavigableMap::tail_map], but the view can insert and
    /// remove.
    pub fn tail_map_mut(&mut self, from: Bound<K>) -> MapView<K, V, C, O, &mut Self> {
        MapView::new(self, Window::unchecked(from, Bound::Unbounded))
    }

    /// Returns the keys of this map as a navigable set.
    pub fn key_set(&self) -> KeySet<K, V, C, O, &Self> {
        self.view().key_set()
    }

    /// Returns the keys of this map as a navigable set which can remove
    /// entries.
    pub fn key_set_mut(&mut self) -> KeySet<K, V, C, O, &mut Self> {
        self.view_mut().key_set()
    }

    /// Returns the keys of this map as a navigable set in descending order.
    pub fn descending_key_set(&self) -> KeySet<K, V, C, O, &Self> {
        self.descending_map().key_set()
    }
}

impl<K, V, X, O> NavigableMap<K, V, SelfKeyed<V, X>, O>
where
    X: SelfKey<K, V>,
    O: Comparator<K>,
{
    /// Stores `value` under the key it carries and returns the value
    /// previously stored under that key.
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

impl<K, V, C: Core<K, V>, O: Comparator<K>> Sorted for NavigableMap<K, V, C, O> {
    type Key = K;

    fn len(&self) -> usize {
        self.core.len()
    }

    fn key_at(&self, index: usize) -> &K {
        self.core.key_at(index)
    }

    fn compare(&self, a: &K, b: &K) -> Ordering {
        self.order.compare(a, b)
    }
}

impl<K, V, C: Clone, O: Clone> Clone for NavigableMap<K, V, C, O> {
    fn clone(&self) -> Self {
        Self::with_core(self.core.clone(), self.order.clone())
    }
}

impl<K, V, C: Default, O: Default> Default for NavigableMap<K, V, C, O> {
    fn default() -> Self {
        Self::with_core(C::default(), O::default())
    }
}

impl<K: PartialEq, V: PartialEq, C: Core<K, V>, O> PartialEq for NavigableMap<K, V, C, O> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<K: Eq, V: Eq, C: Core<K, V>, O> Eq for NavigableMap<K, V, C, O> {}

impl<K: Hash, V: Hash, C: Core<K, V>, O> Hash for NavigableMap<K, V, C, O> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_usize(self.len());
        for entry in self.iter() {
            entry.hash(state);
        }
    }
}

impl<K, V, C, O> fmt::Debug for NavigableMap<K, V, C, O>
where
    K: fmt::Debug,
    V: fmt::Debug,
    C: Core<K, V>,
{
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K, V, C, O> Extend<(K, V)> for NavigableMap<K, V, C, O>
where
    C: Core<K, V>,
    O: Comparator<K>,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        let iter = iter.into_iter();
        self.reserve(iter.size_hint().0);
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl<K, V, C, O> FromIterator<(K, V)> for NavigableMap<K, V, C, O>
where
    C: Core<K, V> + Default,
    O: Comparator<K> + Default,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut out = Self::default();
        out.extend(iter);
        out
    }
}

impl<K, V, C: Core<K, V>, O> IntoIterator for NavigableMap<K, V, C, O> {
    type Item = C::Entry;
    type IntoIter = IntoIter<C::Entry>;
    fn into_iter(self) -> Self::IntoIter {
        IntoIter::new(self.core.into_entries())
    }
}

impl<'a, K: 'a, V: 'a, C: Core<K, V>, O> IntoIterator for &'a NavigableMap<K, V, C, O> {
    type Item = (&'a K, &'a V);
    type IntoIter = Entries<'a, K, V, C>;
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
