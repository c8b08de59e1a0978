use std::prelude::v1::*;
use std::{
    cmp::Ordering,
    fmt,
    hash::{Hash, Hasher},
    iter::FromIterator,
    ops::Bound,
};

use crate::{
    Error, Result,
    bound::{Sorted, Span, Window},
    core::ArrayStore,
    iter::{Cursor, IntoIter, Iter},
    order::{Comparator, Natural},
    set::{SetAlgebra, SetView},
};


/// A set whose elements are sorted by a comparator in one contiguous array.
///
/// Lookups and navigation (`floor`, `higher`, ...) are binary searches.
/// Inserting and removing shift the tail of the array, so both are O(n).
///
/// Range views ([`sub_set`][NavigableSet::sub_set],
/// [`descending_set`][NavigableSet::descending_set], ...) borrow the set and
/// restrict every operation to the elements within their bounds. They do
/// not copy anything.
///
/// ```
/// use compact_collections::NavigableSet;
///
/// let set: NavigableSet<_> = vec![5, 1, 3, 2, 4].into_iter().collect();
/// assert_eq!(set.to_vec(), [1, 2, 3, 4, 5]);
///
/// assert_eq!(set.floor(&3), Some(&3));
/// assert_eq!(set.higher(&3), Some(&4));
/// assert_eq!(set.lower(&1), None);
/// ```
#[derive(Clone)]
pub struct NavigableSet<T, O = Natural> {
    pub(crate) items: ArrayStore<T>,
    order: O,
}

impl<T: Ord> NavigableSet<T> {
    /// Creates an empty set ordered by `T: Ord`. Does not allocate.
    pub fn new() -> Self {
        Self::with_comparator(Natural)
    }
}

impl<T, O> NavigableSet<T, O> {
    /// Creates an empty set ordered by `order`. Does not allocate.
    pub fn with_comparator(order: O) -> Self {
        Self {
            items: ArrayStore::new(),
            order,
        }
    }

    /// Creates an empty set ordered by `order` with space for exactly
    /// `capacity` elements.
    pub fn with_capacity_and_comparator(capacity: usize, order: O) -> Self {
        Self {
            items: ArrayStore::with_capacity(capacity),
            order,
        }
    }

    /// Returns the comparator of this set.
    pub fn comparator(&self) -> &O {
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

    /// Returns the number of elements that fit without reallocating.
    pub fn capacity(&self) -> usize {
        self.items.capacity()
    }

    /// Reserves space for at least `additional` more elements.
    pub fn reserve(&mut self, additional: usize) {
        self.items.reserve(additional);
    }

    /// Reallocates to exactly `capacity` slots. Fails with `CapacityTooSmall`
    /// if there are more elements than that.
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

    /// Returns the elements in ascending order.
    pub fn as_slice(&self) -> &[T] {
        self.items.as_slice()
    }

    /// Iterates over the elements in ascending order.
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

    /// Copies the elements into a `Vec` in ascending order.
    pub fn to_vec(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.items.as_slice().to_vec()
    }

    /// Removes and returns the least element.
    pub fn poll_first(&mut self) -> Option<T> {
        if self.is_empty() {
            None
        } else {
            Some(self.items.take(0))
        }
    }

    /// Removes and returns the greatest element.
    pub fn poll_last(&mut self) -> Option<T> {
        let last = self.len().checked_sub(1)?;
        Some(self.items.take(last))
    }

    /// Returns the least element. Fails with `NoSuchElement` if the set is
    /// empty.
    pub fn first(&self) -> Result<&T> {
        self.items.as_slice().first().ok_or(Error::NoSuchElement)
    }

    /// Returns the greatest element. Fails with `NoSuchElement` if the set
    /// is empty.
    pub fn last(&self) -> Result<&T> {
        self.items.as_slice().last().ok_or(Error::NoSuchElement)
    }
}

impl<T, O: Comparator<T>> NavigableSet<T, O> {
    /// Returns `true` if an element equal to `item` is in the set.
    pub fn contains(&self, item: &T) -> bool {
        self.search(item).is_ok()
    }

    /// Returns the stored element equal to `item`.
    pub fn get(&self, item: &T) -> Option<&T> {
        self.search(item).ok().map(|i| self.at(i))
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

    /// Returns the greatest element strictly less than `item`.
    pub fn lower(&self, item: &T) -> Option<&T> {
        Window::full().lower(self, item).map(|i| self.at(i))
    }

    /// Returns the greatest element less than or equal to `item`.
    pub fn floor(&self, item: &T) -> Option<&T> {
        Window::full().floor(self, item).map(|i| self.at(i))
    }

    /// Returns the least element greater than or equal to `item`.
    pub fn ceiling(&self, item: &T) -> Option<&T> {
        Window::full().ceiling(self, item).map(|i| self.at(i))
    }

    /// Returns the least element strictly greater than `item`.
    pub fn higher(&self, item: &T) -> Option<&T> {
        Window::full().higher(self, item).map(|i| self.at(i))
    }

    /// Returns a read-only view over the whole set.
    pub fn view(&self) -> SetView<T, O, &Self> {
        SetView::new(self, Window::full())
    }

    /// Returns a view over the whole set which can insert and remove.
    pub fn view_mut(&mut self) -> SetView<T, O, &mut Self> {
        SetView::new(self, Window::full())
    }

    /// Returns a view over the whole set in descending order.
    pub fn descending_set(&self) -> SetView<T, O, &Self> {
        self.view().descending()
    }

    /// Returns a view over the whole set in descending order which can insert
    /// and remove.
    pub fn descending_set_mut(&mut self) -> SetView<T, O, &mut Self> {
        self.view_mut().descending()
    }

    /// Returns a view over the elements between `from` and `to`.
    ///
    /// Fails with `InvertedBounds` if `from` is greater than `to`.
    ///
    /// ```
    /// use std::ops::Bound::*;
    /// use compact_collections::NavigableSet;
    ///
    /// let set: NavigableSet<_> = (1..=5).collect();
    /// let view = set.sub_set(Included(2), Excluded(4)).unwrap();
    /// assert_eq!(view.to_vec(), [2, 3]);
    ///
    /// assert!(set.sub_set(Included(4), Included(2)).is_err());
    /// ```
    pub fn sub_set(&self, from: Bound<T>, to: Bound<T>) -> Result<SetView<T, O, &Self>> {
        let window = Window::new(self, from, to)?;
        Ok(SetView::new(self, window))
    }

    /// Like [`sub_set`][NavigableSet::sub_set], but the view can insert and
    /// remove.
    pub fn sub_set_mut(&mut self, from: Bound<T>, to: Bound<T>) -> Result<SetView<T, O, &mut Self>> {
        let window = Window::new(&*self, from, to)?;
        Ok(SetView::new(self, window))
    }

    /// Returns a view over the elements less than (or equal to, if `to` is
    /// inclusive) `to`.
    pub fn head_set(&self, to: Bound<T>) -> SetView<T, O, &Self> {
        SetView::new(self, Window::unchecked(Bound::Unbounded, to))
    }

    /// Like [`head_set`][NavigableSet::head_set], but the view can insert and
    /// remove.
    pub fn head_set_mut(&mut self, to: Bound<T>) -> SetView<T, O, &mut Self> {
        SetView::new(self, Window::unchecked(Bound::Unbounded, to))
    }

    /// Returns a view over the elements greater than (or equal to, if
    /// `from` is inclusive) `from`.
    pub fn tail_set(&self, from: Bound<T>) -> SetView<T, O, &Self> {
        SetView::new(self, Window::unchecked(from, Bound::Unbounded))
    }

    /// Like [`tail_set`][NavigableSet::tail_set], but the view can insert and
    /// remove.
    pub fn tail_set_mut(&mut self, from: Bound<T>) -> SetView<T, O, &mut Self> {
        SetView::new(self, Window::unchecked(from, Bound::Unbounded))
    }

    fn at(&self, index: usize) -> &T {
        &self.items.as_slice()[index]
    }
}

impl<T, O: Comparator<T>> Sorted for NavigableSet<T, O> {
    type Key = T;

    fn len(&self) -> usize {
        self.items.len()
    }

    fn key_at(&self, index: usize) -> &T {
        &self.items.as_slice()[index]
    }

    fn compare(&self, a: &T, b: &T) -> Ordering {
        self.order.compare(a, b)
    }
}

impl<T, O: Comparator<T>> SetAlgebra<T> for NavigableSet<T, O> {
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

impl<T, O: Default> Default for NavigableSet<T, O> {
    fn default() -> Self {
        Self::with_comparator(O::default())
    }
}

impl<T: PartialEq, O> PartialEq for NavigableSet<T, O> {
    fn eq(&self, other: &Self) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<T: Eq, O> Eq for NavigableSet<T, O> {}

impl<T: Hash, O> Hash for NavigableSet<T, O> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_slice().hash(state);
    }
}

impl<T: fmt::Debug, O> fmt::Debug for NavigableSet<T, O> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<T, O: Comparator<T>> Extend<T> for NavigableSet<T, O> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        let iter = iter.into_iter();
        self.reserve(iter.size_hint().0);
        for item in iter {
            self.insert(item);
        }
    }
}

impl<T, O: Comparator<T> + Default> FromIterator<T> for NavigableSet<T, O> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut out = Self::default();
        out.extend(iter);
        out
    }
}

impl<T, O> IntoIterator for NavigableSet<T, O> {
    type Item = T;
    type IntoIter = IntoIter<T>;
    fn into_iter(self) -> Self::IntoIter {
        IntoIter::new(self.items.into_vec())
    }
}

impl<'a, T, O> IntoIterator for &'a NavigableSet<T, O> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
