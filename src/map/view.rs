use std::prelude::v1::*;
use std::{
    fmt,
    marker::PhantomData,
    ops::{Bound, Deref, DerefMut},
};

use crate::{
    Error, Result,
    bound::Window,
    core::Core,
    iter::{Entries, EntryCursor, Keys, Values, ValuesMut},
    map::NavigableMap,
    order::{Comparator, Directed},
    set::SetAlgebra,
};


/// A range view (sub map) of a [`NavigableMap`].
///
/// `V`, `C` and `O` are the value type, storage and comparator of the map.
/// `P` is the handle to it: `&NavigableMap<K, V, C, O>` for a read-only
/// view, `&mut NavigableMap<K, V, C, O>` for a view which can also insert
/// and remove. Like [`SetView`][crate::SetView], a sub map stores only its
/// bounds and direction and recomputes all indices on every call.
///
/// ```
/// use std::ops::Bound::*;
/// use compact_collections::NavigableMap;
///
/// let mut map: NavigableMap<_, _> = (1..=5).map(|i| (i, i * 10)).collect();
/// let mut sub = map.sub_map_mut(Included(2), Included(4)).unwrap().descending();
///
/// assert_eq!(sub.first_key(), Ok(&4));
/// assert_eq!(sub.higher_key(&4), Some(&3));
/// assert_eq!(sub.insert(3, 33), Ok(Some(30)));
/// assert!(sub.insert(5, 50).is_err());
///
/// assert_eq!(sub.poll_first_entry(), Some((4, 40)));
/// assert_eq!(map.keys().copied().collect::<Vec<_>>(), [1, 2, 3, 5]);
/// ```
pub struct MapView<K, V, C, O, P> {
    parent: P,
    window: Window<K>,
    _marker: PhantomData<fn() -> (V, C, O)>,
}

impl<K, V, C, O, P> MapView<K, V, C, O, P> {
    pub(crate) fn new(parent: P, window: Window<K>) -> Self {
        Self {
            parent,
            window,
            _marker: PhantomData,
        }
    }

    /// Returns `true` if this view iterates from the greatest to the least
    /// key.
    pub fn is_descending(&self) -> bool {
        self.window.is_descending()
    }

    /// Returns this view with the direction reversed.
    pub fn descending(self) -> Self {
        Self::new(self.parent, self.window.reversed())
    }

    /// Returns the keys of this view as a navigable set with the same bounds
    /// and direction.
    pub fn key_set(self) -> KeySet<K, V, C, O, P> {
        KeySet(self)
    }
}

impl<K, V, C, O, P> MapView<K, V, C, O, P>
where
    P: Deref<Target = NavigableMap<K, V, C, O>>,
    C: Core<K, V>,
    O: Comparator<K>,
{
    /// Returns the whole map this view is a part of.
    pub fn parent(&self) -> &NavigableMap<K, V, C, O> {
        &self.parent
    }

    /// Returns the key order of this view: the map's comparator, inverted if
    /// the view is descending.
    pub fn comparator(&self) -> Directed<'_, O> {
        Directed::new(self.parent.comparator(), self.is_descending())
    }

    /// Returns a read-only view with the same bounds and direction.
    pub fn reborrow(&self) -> MapView<K, V, C, O, &NavigableMap<K, V, C, O>>
    where
        K: Clone,
    {
        MapView::new(&*self.parent, self.window.clone())
    }

    /// Returns the number of entries within the bounds.
    pub fn len(&self) -> usize {
        self.window.range(&*self.parent).len()
    }

    /// Returns `true` if no entry lies within the bounds.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns `true` if `key` lies within the bounds and is in the map.
    pub fn contains_key(&self, key: &K) -> bool {
        self.window.contains(&*self.parent, key) && self.parent.contains_key(key)
    }

    /// Returns the value stored under `key` if `key` lies within the bounds.
    pub fn get(&self, key: &K) -> Option<&V> {
        self.get_key_value(key).map(|(_, v)| v)
    }

    /// Returns the stored key and value under `key` if `key` lies within the
    /// bounds.
    pub fn get_key_value(&self, key: &K) -> Option<(&K, &V)> {
        if self.window.contains(&*self.parent, key) {
            self.parent.get_key_value(key)
        } else {
            None
        }
    }

    /// Returns the first key in view order. Fails with `NoSuchElement` if
    /// the view is empty.
    pub fn first_key(&self) -> Result<&K> {
        self.first_entry().map(|(k, _)| k)
    }

    /// Returns the last key in view order. Fails with `NoSuchElement` if
    /// the view is empty.
    pub fn last_key(&self) -> Result<&K> {
        self.last_entry().map(|(k, _)| k)
    }

    /// Returns the first entry in view order. Fails with `NoSuchElement` if
    /// the view is empty.
    pub fn first_entry(&self) -> Result<(&K, &V)> {
        self.window.first(&*self.parent)
            .map(|i| self.parent.entry_at(i))
            .ok_or(Error::NoSuchElement)
    }

    /// Returns the last entry in view order. Fails with `NoSuchElement` if
    /// the view is empty.
    pub fn last_entry(&self) -> Result<(&K, &V)> {
        self.window.last(&*self.parent)
            .map(|i| self.parent.entry_at(i))
            .ok_or(Error::NoSuchElement)
    }

    /// Returns the key right before `key` in view order.
    pub fn lower_key(&self, key: &K) -> Option<&K> {
        self.lower_entry(key).map(|(k, _)| k)
    }

    /// Returns the last key in view order which is not after `key`.
    pub fn floor_key(&self, key: &K) -> Option<&K> {
        self.floor_entry(key).map(|(k, _)| k)
    }

    /// Returns the first key in view order which is not before `key`.
    pub fn ceiling_key(&self, key: &K) -> Option<&K> {
        self.ceiling_entry(key).map(|(k, _)| k)
    }

    /// Returns the key right after `key` in view order.
    pub fn higher_key(&self, key: &K) -> Option<&K> {
        self.higher_entry(key).map(|(k, _)| k)
    }

    /// Returns the entry right before `key` in view order.
    pub fn lower_entry(&self, key: &K) -> Option<(&K, &V)> {
        self.window.lower(&*self.parent, key).map(|i| self.parent.entry_at(i))
    }

    /// Returns the last entry in view order whose key is not after `key`.
    pub fn floor_entry(&self, key: &K) -> Option<(&K, &V)> {
        self.window.floor(&*self.parent, key).map(|i| self.parent.entry_at(i))
    }

    /// Returns the first entry in view order whose key is not before `key`.
    pub fn ceiling_entry(&self, key: &K) -> Option<(&K, &V)> {
        self.window.ceiling(&*self.parent, key).map(|i| self.parent.entry_at(i))
    }

    /// Returns the entry right after `key` in view order.
    pub fn higher_entry(&self, key: &K) -> Option<(&K, &V)> {
        self.window.higher(&*self.parent, key).map(|i| self.parent.entry_at(i))
    }

    /// Iterates over the entries within the bounds in view order.
    pub fn iter(&self) -> Entries<'_, K, V, C> {
        Entries::new(&self.parent.core, self.window.span(&*self.parent))
    }

    /// Iterates over the keys within the bounds in view order.
    pub fn keys(&self) -> Keys<'_, K, V, C> {
        Keys::new(&self.parent.core, self.window.span(&*self.parent))
    }

    /// Iterates over the values within the bounds in view order.
    pub fn values(&self) -> Values<'_, V> {
        Values::new(self.parent.core.values(), self.window.span(&*self.parent))
    }

    /// Narrows this view to the keys between `from` and `to` (in view
    /// order).
    ///
    /// An `Unbounded` side keeps the current bound. A new bound outside of
    /// this view fails with `BoundOutOfRange`, `from` after `to` fails with
    /// `InvertedBounds`.
    pub fn sub_map(self, from: Bound<K>, to: Bound<K>) -> Result<Self> {
        let Self { parent, window, .. } = self;
        let window = window.narrow(&*parent, from, to)?;
        Ok(Self::new(parent, window))
    }

    /// Narrows this view to the keys before `to` (in view order).
    pub fn head_map(self, to: Bound<K>) -> Result<Self> {
        self.sub_map(Bound::Unbounded, to)
    }

    /// Narrows this view to the keys after `from` (in view order).
    pub fn tail_map(self, from: Bound<K>) -> Result<Self> {
        self.sub_map(from, Bound::Unbounded)
    }
}

impl<K, V, C, O, P> MapView<K, V, C, O, P>
where
    P: DerefMut<Target = NavigableMap<K, V, C, O>>,
    C: Core<K, V>,
    O: Comparator<K>,
{
    /// Returns the whole map mutably. Changes made through it are visible
    /// through this view as far as they fall within its bounds.
    pub fn parent_mut(&mut self) -> &mut NavigableMap<K, V, C, O> {
        &mut self.parent
    }

    /// Returns a mutable view with the same bounds and direction.
    pub fn reborrow_mut(&mut self) -> MapView<K, V, C, O, &mut NavigableMap<K, V, C, O>>
    where
        K: Clone,
    {
        let window = self.window.clone();
        MapView::new(&mut *self.parent, window)
    }

    /// Stores `value` under `key` in the map and returns the value
    /// previously stored under it.
    ///
    /// Fails with [`Error::OutOfRange`] (leaving the map unchanged) if `key`
    /// lies outside of the bounds.
    pub fn insert(&mut self, key: K, value: V) -> Result<Option<V>> {
        if !self.window.contains(&*self.parent, &key) {
            log::debug!("rejecting insert: key lies outside of the view");
            return Err(Error::OutOfRange);
        }

        Ok(self.parent.insert(key, value))
    }

    /// Removes the entry under `key` if it lies within the bounds and
    /// returns its value.
    pub fn remove(&mut self, key: &K) -> Option<V> {
        self.remove_entry(key).map(C::entry_value)
    }

    /// Removes the entry under `key` if it lies within the bounds and returns
    /// it as stored.
    pub fn remove_entry(&mut self, key: &K) -> Option<C::Entry> {
        if self.window.contains(&*self.parent, key) {
            self.parent.remove_entry(key)
        } else {
            None
        }
    }

    /// Returns the value stored under `key` mutably if `key` lies within the
    /// bounds.
    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        if self.window.contains(&*self.parent, key) {
            self.parent.get_mut(key)
        } else {
            None
        }
    }

    /// Iterates over mutable references to the values within the bounds in
    /// view order.
    pub fn values_mut(&mut self) -> ValuesMut<'_, V> {
        let range = self.window.range(&*self.parent);
        let descending = self.is_descending();
        ValuesMut::new(&mut self.parent.core.values_mut()[range], descending)
    }

    /// Removes and returns the first entry in view order.
    pub fn poll_first_entry(&mut self) -> Option<C::Entry> {
        let index = self.window.first(&*self.parent)?;
        Some(self.parent.core.remove_at(index))
    }

    /// Removes and returns the last entry in view order.
    pub fn poll_last_entry(&mut self) -> Option<C::Entry> {
        let index = self.window.last(&*self.parent)?;
        Some(self.parent.core.remove_at(index))
    }

    /// Removes all entries within the bounds from the map.
    pub fn clear(&mut self) {
        let range = self.window.range(&*self.parent);
        self.parent.core.remove_range(range.start, range.len());
    }

    /// Returns a cursor which walks the entries within the bounds in view
    /// order and can remove them.
    pub fn cursor(&mut self) -> EntryCursor<'_, K, V, C> {
        let span = self.window.span(&*self.parent);
        EntryCursor::new(&mut self.parent.core, span)
    }

    /// Keeps only the entries within the bounds for which `keep` returns
    /// `true`. Entries outside of the bounds are not touched.
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

impl<'a, K: 'a, V: 'a, C: 'a, O: 'a, P> IntoIterator for &'a MapView<K, V, C, O, P>
where
    P: Deref<Target = NavigableMap<K, V, C, O>>,
    C: Core<K, V>,
    O: Comparator<K>,
{
    type Item = (&'a K, &'a V);
    type IntoIter = Entries<'a, K, V, C>;
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K, V, C, O, P> fmt::Debug for MapView<K, V, C, O, P>
where
    K: fmt::Debug,
    V: fmt::Debug,
    P: Deref<Target = NavigableMap<K, V, C, O>>,
    C: Core<K, V>,
    O: Comparator<K>,
{
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}


/// The keys of a [`NavigableMap`] (or of a sub map) as a navigable set.
///
/// A key set owns nothing: iterating it iterates the map's keys, removing a
/// key removes the whole entry from the map. Keys cannot be inserted
/// through a key set, as there would be no value to store with them. The
/// bulk operations (`contains_all`, `remove_all`, ...) come from
/// [`SetAlgebra`][crate::SetAlgebra].
///
/// ```
/// use compact_collections::NavigableMap;
///
/// let mut map: NavigableMap<_, _> = vec![("a", 1), ("b", 2), ("c", 3)].into_iter().collect();
/// let mut keys = map.key_set_mut();
///
/// assert_eq!(keys.ceiling(&"bb"), Some(&"c"));
/// assert!(keys.remove(&"b"));
/// assert!(keys.insert("d").is_err());
///
/// assert_eq!(map.get(&"b"), None);
/// assert_eq!(map.len(), 2);
/// ```
pub struct KeySet<K, V, C, O, P>(MapView<K, V, C, O, P>);

impl<K, V, C, O, P> KeySet<K, V, C, O, P> {
    /// Returns `true` if this set iterates from the greatest to the least
    /// key.
    pub fn is_descending(&self) -> bool {
        self.0.is_descending()
    }

    /// Returns this key set with the direction reversed.
    pub fn descending(self) -> Self {
        Self(self.0.descending())
    }

    /// Returns the sub map with the same bounds and direction.
    pub fn into_map(self) -> MapView<K, V, C, O, P> {
        self.0
    }
}

impl<K, V, C, O, P> KeySet<K, V, C, O, P>
where
    P: Deref<Target = NavigableMap<K, V, C, O>>,
    C: Core<K, V>,
    O: Comparator<K>,
{
    /// Returns the whole map whose keys this set shows.
    pub fn parent(&self) -> &NavigableMap<K, V, C, O> {
        self.0.parent()
    }

    /// Returns the key order of this set, inverted if it is descending.
    pub fn comparator(&self) -> Directed<'_, O> {
        self.0.comparator()
    }

    /// Returns the number of keys within the bounds.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if no key lies within the bounds.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns `true` if `key` lies within the bounds and is in the map.
    pub fn contains(&self, key: &K) -> bool {
        self.0.contains_key(key)
    }

    /// Returns the first key in set order. Fails with `NoSuchElement` if the
    /// set is empty.
    pub fn first(&self) -> Result<&K> {
        self.0.first_key()
    }

    /// Returns the last key in set order. Fails with `NoSuchElement` if the
    /// set is empty.
    pub fn last(&self) -> Result<&K> {
        self.0.last_key()
    }

    /// Returns the key right before `key` in set order.
    pub fn lower(&self, key: &K) -> Option<&K> {
        self.0.lower_key(key)
    }

    /// Returns the last key in set order which is not after `key`.
    pub fn floor(&self, key: &K) -> Option<&K> {
        self.0.floor_key(key)
    }

    /// Returns the first key in set order which is not before `key`.
    pub fn ceiling(&self, key: &K) -> Option<&K> {
        self.0.ceiling_key(key)
    }

    /// Returns the key right after `key` in set order.
    pub fn higher(&self, key: &K) -> Option<&K> {
        self.0.higher_key(key)
    }

    /// Iterates over the keys within the bounds in set order.
    pub fn iter(&self) -> Keys<'_, K, V, C> {
        self.0.keys()
    }

    /// Copies the keys within the bounds into a `Vec` in set order.
    pub fn to_vec(&self) -> Vec<K>
    where
        K: Clone,
    {
        self.iter().cloned().collect()
    }

    /// Narrows this set to the keys between `from` and `to` (in set order).
    /// Bound checks work like for [`MapView::sub_map`].
    pub fn sub_set(self, from: Bound<K>, to: Bound<K>) -> Result<Self> {
        self.0.sub_map(from, to).map(Self)
    }

    /// Narrows this set to the keys before `to` (in set order).
    pub fn head_set(self, to: Bound<K>) -> Result<Self> {
        self.0.head_map(to).map(Self)
    }

    /// Narrows this set to the keys after `from` (in set order).
    pub fn tail_set(self, from: Bound<K>) -> Result<Self> {
        self.0.tail_map(from).map(Self)
    }
}

impl<K, V, C, O, P> KeySet<K, V, C, O, P>
where
    P: DerefMut<Target = NavigableMap<K, V, C, O>>,
    C: Core<K, V>,
    O: Comparator<K>,
{
    /// Returns the whole map mutably.
    pub fn parent_mut(&mut self) -> &mut NavigableMap<K, V, C, O> {
        self.0.parent_mut()
    }

    /// Always fails with `Unsupported`: a key alone is no entry.
    pub fn insert(&mut self, _key: K) -> Result<bool> {
        Err(Error::Unsupported("inserting into the key set of a map"))
    }

    /// Removes the entry with key `key` from the map, if it lies within the
    /// bounds. Returns `true` if an entry was removed.
    pub fn remove(&mut self, key: &K) -> bool {
        self.0.remove_entry(key).is_some()
    }

    /// Removes and returns the entry with the first key in set order.
    pub fn poll_first(&mut self) -> Option<C::Entry> {
        self.0.poll_first_entry()
    }

    /// Removes and returns the entry with the last key in set order.
    pub fn poll_last(&mut self) -> Option<C::Entry> {
        self.0.poll_last_entry()
    }

    /// Removes all entries with keys within the bounds from the map.
    pub fn clear(&mut self) {
        self.0.clear();
    }

    /// Returns a cursor which walks the entries with keys within the bounds
    /// in set order and can remove them.
    pub fn cursor(&mut self) -> EntryCursor<'_, K, V, C> {
        self.0.cursor()
    }

    /// Keeps only the entries whose key `keep` returns `true` for.
    pub fn retain<F>(&mut self, mut keep: F)
    where
        F: FnMut(&K) -> bool,
    {
        self.0.retain(|key, _| keep(key));
    }
}

impl<K, V, C, O, P> SetAlgebra<K> for KeySet<K, V, C, O, P>
where
    P: DerefMut<Target = NavigableMap<K, V, C, O>>,
    C: Core<K, V>,
    O: Comparator<K>,
{
    fn len(&self) -> usize {
        self.len()
    }

    fn contains(&self, key: &K) -> bool {
        self.contains(key)
    }

    fn insert(&mut self, key: K) -> Result<bool> {
        self.insert(key)
    }

    fn remove(&mut self, key: &K) -> bool {
        self.remove(key)
    }

    fn retain<F: FnMut(&K) -> bool>(&mut self, keep: F) {
        self.retain(keep);
    }

    fn check_insert(&self, _key: &K) -> Result<()> {
        Err(Error::Unsupported("inserting into the key set of a map"))
    }
}

impl<'a, K: 'a, V: 'a, C: 'a, O: 'a, P> IntoIterator for &'a KeySet<K, V, C, O, P>
where
    P: Deref<Target = NavigableMap<K, V, C, O>>,
    C: Core<K, V>,
    O: Comparator<K>,
{
    type Item = &'a K;
    type IntoIter = Keys<'a, K, V, C>;
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K, V, C, O, P> fmt::Debug for KeySet<K, V, C, O, P>
where
    K: fmt::Debug,
    P: Deref<Target = NavigableMap<K, V, C, O>>,
    C: Core<K, V>,
    O: Comparator<K>,
{
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}
