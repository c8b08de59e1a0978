use std::prelude::v1::*;
use std::{
    fmt,
    iter::FromIterator,
};

use crate::{
    Result,
    bound::Span,
    core::ArrayStore,
    iter::{Cursor, IntoIter, Iter},
    order::{DefaultHashOrder, HashOrder},
    set::SetAlgebra,
};


/// A set whose elements are sorted by their hash in one contiguous array.
///
/// Lookups binary search for the hash and then scan the run of elements
/// with that hash for the one which `equals` the searched element. Inserting
/// and removing shift the tail of the array, so both are O(n). In exchange
/// the set needs no memory besides the elements themselves (and the spare
/// capacity, which [`compact`][HashOrderedSet::compact] gives back).
///
/// Iteration order is the hash order, not the insertion order. Among
/// elements with the same hash the order is unspecified.
///
/// ```
/// use compact_collections::HashOrderedSet;
///
/// let mut set = HashOrderedSet::new();
/// assert!(set.insert("apple"));
/// assert!(set.insert("pear"));
/// assert!(!set.insert("apple"));
///
/// assert_eq!(set.len(), 2);
/// assert!(set.contains(&"pear"));
/// assert_eq!(set.remove(&"apple"), Some("apple"));
/// assert!(!set.contains(&"apple"));
/// ```
#[derive(Clone)]
pub struct HashOrderedSet<T, H = DefaultHashOrder> {
    items: ArrayStore<T>,
    order: H,
}

impl<T> HashOrderedSet<T> {
    /// Creates an empty set with the default hash order. Does not allocate.
    pub fn new() -> Self {
        Self::with_order(DefaultHashOrder::default())
    }

    /// Creates an empty set with space for exactly `capacity` elements.
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_capacity_and_order(capacity, DefaultHashOrder::default())
    }
}

impl<T, H> HashOrderedSet<T, H> {
    /// Creates an empty set with the given hash order. Does not allocate.
    pub fn with_order(order: H) -> Self {
        Self {
            items: ArrayStore::new(),
            order,
        }
    }

    /// Creates an empty set with the given hash order and space for exactly
    /// `capacity` elements.
    pub fn with_capacity_and_order(capacity: usize, order: H) -> Self {
        Self {
            items: ArrayStore::with_capacity(capacity),
            order,
        }
    }

    /// Returns the hash order of this set.
    pub fn order(&self) -> &H {
        &self.order
    }

    /// Returns the number of elements.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if there are no elements.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns the number of elements the set can hold without
    /// reallocating.
    pub fn capacity(&self) -> usize {
        self.items.capacity()
    }

    /// Reserves space for at least `additional` more elements.
    pub fn reserve(&mut self, additional: usize) {
        self.items.reserve(additional);
    }

    /// Reallocates to exactly `capacity` slots. Fails if the set has more
    /// elements than that.
    pub fn resize(&mut self, capacity: usize) -> Result<()> {
        self.items.resize(capacity)
    }

    /// Shrinks the capacity to the number of elements.
    pub fn compact(&mut self) {
        self.items.compact();
    }

    /// Removes all elements. The capacity stays the same.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Returns the elements in hash order.
    pub fn as_slice(&self) -> &[T] {
        self.items.as_slice()
    }

    /// Iterates over the elements in hash order.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter::new(self.items.as_slice(), Span::ascending(self.len()))
    }

    /// Returns a cursor which can remove elements while walking the set.
    pub fn cursor(&mut self) -> Cursor<'_, T> {
        let span = Span::ascending(self.len());
        Cursor::new(&mut self.items, span)
    }

    /// Keeps only the elements for which `keep` returns `true`.
    pub fn retain<F>(&mut self, mut keep: F)
    where
        F: FnMut(&T) -> bool,
    {
        let mut cursor = self.cursor();
        while let Some(item) = cursor.advance() {
            if !keep(item) {
                cursor.remove();
            }
        }
    }

    /// Copies the elements into a `Vec` in hash order.
    pub fn to_vec(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.items.as_slice().to_vec()
    }
}

impl<T, H: HashOrder<T>> HashOrderedSet<T, H> {
    /// Finds the slot of `item`: `Ok` with its index if present, `Err` with
    /// the insertion point otherwise.
    fn search(&self, item: &T) -> Result<usize, usize> {
        let hash = self.order.hash(item);
        self.items.identity_index(
            |e| self.order.hash(e).cmp(&hash),
            |e| self.order.equals(e, item),
        )
    }

    /// Returns `true` if an element equal to `item` is in the set.
    pub fn contains(&self, item: &T) -> bool {
        self.search(item).is_ok()
    }

    /// Returns the stored element equal to `item`.
    pub fn get(&self, item: &T) -> Option<&T> {
        self.search(item).ok().map(|i| &self.items.as_slice()[i])
    }

    /// Inserts `item`. Returns `false` (and drops `item`) if an equal element
    /// is already present.
    pub fn insert(&mut self, item: T) -> bool {
        match self.search(&item) {
            Ok(_) => false,
            Err(index) => {
                self.items.put(index, item);
                true
            }
        }
    }

    /// Inserts `item`, replacing and returning an equal element if present.
    pub fn replace(&mut self, item: T) -> Option<T> {
        match self.search(&item) {
            Ok(index) => Some(self.items.swap_at(index, item)),
            Err(index) => {
                self.items.put(index, item);
                None
            }
        }
    }

    /// Removes the element equal to `item` and returns it.
    pub fn remove(&mut self, item: &T) -> Option<T> {
        let index = self.search(item).ok()?;
        Some(self.items.take(index))
    }
}

impl<T, H: HashOrder<T>> SetAlgebra<T> for HashOrderedSet<T, H> {
    fn len(&self) -> usize {
        self.len()
    }

    fn contains(&self, item: &T) -> bool {
        self.contains(item)
    }

    fn insert(&mut self, item: T) -> Result<bool> {
        Ok(self.insert(item))
    }

    fn remove(&mut self, item: &T) -> bool {
        self.remove(item).is_some()
    }

    fn retain<F: FnMut(&T) -> bool>(&mut self, keep: F) {
        self.retain(keep);
    }
}

impl<T, H: Default> Default for HashOrderedSet<T, H> {
    fn default() -> Self {
        Self::with_order(H::default())
    }
}

impl<T, H: HashOrder<T>> PartialEq for HashOrderedSet<T, H> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().all(|item| other.contains(item))
    }
}

impl<T, H: HashOrder<T>> Eq for HashOrderedSet<T, H> {}

impl<T: fmt::Debug, H> fmt::Debug for HashOrderedSet<T, H> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<T, H: HashOrder<T>> Extend<T> for HashOrderedSet<T, H> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        let iter = iter.into_iter();
        self.reserve(iter.size_hint().0);
        for item in iter {
            self.insert(item);
        }
    }
}

impl<T, H: HashOrder<T> + Default> FromIterator<T> for HashOrderedSet<T, H> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut out = Self::default();
        out.extend(iter);
        out
    }
}

impl<T, H> IntoIterator for HashOrderedSet<T, H> {
    type Item = T;
    type IntoIter = IntoIter<T>;
    fn into_iter(self) -> Self::IntoIter {
        IntoIter::new(self.items.into_vec())
    }
}

impl<'a, T, H> IntoIterator for &'a HashOrderedSet<T, H> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
