use std::prelude::v1::*;
use std::{
    fmt,
    hash::{Hash, Hasher},
    iter::FromIterator,
    ops::{Index, IndexMut},
    slice,
};

use crate::{
    Error, Result,
    bound::Span,
    core::ArrayStore,
    iter::{Cursor, IntoIter},
};


/// A list of elements addressed by position, on the same array mechanics as
/// the sets and maps.
///
/// Unlike `Vec<T>`, the capacity grows by exactly the policy of
/// [`grown_capacity`][crate::core::grown_capacity] and only shrinks on
/// [`compact`][CompactList::compact]. Positional operations with a bad index
/// return an error instead of panicking.
///
/// ```
/// use compact_collections::CompactList;
///
/// let mut list: CompactList<_> = vec!['a', 'd'].into();
/// list.insert_all(1, vec!['b', 'c']).unwrap();
/// assert_eq!(list.as_slice(), &['a', 'b', 'c', 'd']);
///
/// assert_eq!(list.set(0, 'x'), Ok('a'));
/// assert_eq!(list.index_of(&'c'), Some(2));
/// assert!(list.remove(10).is_err());
/// ```
#[derive(Clone)]
pub struct CompactList<T> {
    items: ArrayStore<T>,
}

impl<T> CompactList<T> {
    /// Creates an empty list. Does not allocate.
    pub const fn new() -> Self {
        Self { items: ArrayStore::new() }
    }

    /// Creates an empty list with space for exactly `capacity` elements.
    pub fn with_capacity(capacity: usize) -> Self {
        Self { items: ArrayStore::with_capacity(capacity) }
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

    /// Returns the elements as a slice.
    pub fn as_slice(&self) -> &[T] {
        self.items.as_slice()
    }

    /// Returns the elements as a mutable slice.
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        self.items.as_mut_slice()
    }

    /// Returns the element at `index`, or `None` if `index` is out of range.
    pub fn get(&self, index: usize) -> Option<&T> {
        self.items.get(index)
    }

    /// Returns the element at `index` mutably, or `None` if `index` is out of
    /// range.
    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        self.items.as_mut_slice().get_mut(index)
    }

    /// Replaces the element at `index` and returns the old one.
    pub fn set(&mut self, index: usize, item: T) -> Result<T> {
        if index >= self.len() {
            return Err(Error::IndexOutOfRange { index, len: self.len() });
        }
        Ok(self.items.swap_at(index, item))
    }

    /// Appends `item` to the end of the list.
    pub fn push(&mut self, item: T) {
        let len = self.len();
        self.items.put(len, item);
    }

    /// Removes and returns the last element.
    pub fn pop(&mut self) -> Option<T> {
        let last = self.len().checked_sub(1)?;
        Some(self.items.take(last))
    }

    /// Inserts `item` at `index`, shifting everything from `index` on.
    pub fn insert(&mut self, index: usize, item: T) -> Result<()> {
        self.items.insert(index, item)
    }

    /// Inserts all `items` at `index` with a single shift. Returns the
    /// number of inserted elements.
    pub fn insert_all<I>(&mut self, index: usize, items: I) -> Result<usize>
    where
        I: IntoIterator,
        I::IntoIter: ExactSizeIterator<Item = T>,
    {
        self.items.insert_all(index, items)
    }

    /// Removes and returns the element at `index`, shifting all elements
    /// after it. Fails with `IndexOutOfRange` if there is none.
    pub fn remove(&mut self, index: usize) -> Result<T> {
        self.items.remove(index)
    }

    /// Drops `count` elements starting at `index`.
    pub fn remove_range(&mut self, index: usize, count: usize) -> Result<()> {
        self.items.remove_range(index, count)
    }

    /// Returns the position of the first element equal to `item`.
    pub fn index_of(&self, item: &T) -> Option<usize>
    where
        T: PartialEq,
    {
        self.as_slice().iter().position(|x| x == item)
    }

    /// Returns the position of the last element equal to `item`.
    pub fn last_index_of(&self, item: &T) -> Option<usize>
    where
        T: PartialEq,
    {
        self.as_slice().iter().rposition(|x| x == item)
    }

    /// Returns `true` if some element equals `item`. This is a linear scan.
    pub fn contains(&self, item: &T) -> bool
    where
        T: PartialEq,
    {
        self.as_slice().contains(item)
    }

    /// Returns a cursor which can remove elements while walking the list.
    pub fn cursor(&mut self) -> Cursor<'_, T> {
        let span = Span::ascending(self.len());
        Cursor::new(&mut self.items, span)
    }

    /// Keeps only the elements for which `keep` returns `true`, in order.
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

    /// Iterates over the elements in order.
    pub fn iter(&self) -> slice::Iter<'_, T> {
        self.as_slice().iter()
    }

    /// Iterates over mutable references to the elements in order.
    pub fn iter_mut(&mut self) -> slice::IterMut<'_, T> {
        self.as_mut_slice().iter_mut()
    }

    /// Moves the elements into a `Vec`.
    pub fn into_vec(self) -> Vec<T> {
        self.items.into_vec()
    }
}

impl<T> Default for CompactList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Index<usize> for CompactList<T> {
    type Output = T;
    fn index(&self, index: usize) -> &T {
        &self.as_slice()[index]
    }
}

impl<T> IndexMut<usize> for CompactList<T> {
    fn index_mut(&mut self, index: usize) -> &mut T {
        &mut self.as_mut_slice()[index]
    }
}

impl<T> From<Vec<T>> for CompactList<T> {
    fn from(vec: Vec<T>) -> Self {
        Self { items: ArrayStore::from_vec(vec) }
    }
}

impl<T: Clone> From<&[T]> for CompactList<T> {
    fn from(slice: &[T]) -> Self {
        let mut out = Self::with_capacity(slice.len());
        out.extend(slice.iter().cloned());
        out
    }
}

impl<T> Extend<T> for CompactList<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        let iter = iter.into_iter();
        self.reserve(iter.size_hint().0);
        for item in iter {
            self.push(item);
        }
    }
}

impl<T> FromIterator<T> for CompactList<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut out = Self::new();
        out.extend(iter);
        out
    }
}

impl<T> IntoIterator for CompactList<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;
    fn into_iter(self) -> Self::IntoIter {
        IntoIter::new(self.into_vec())
    }
}

impl<'a, T> IntoIterator for &'a CompactList<T> {
    type Item = &'a T;
    type IntoIter = slice::Iter<'a, T>;
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, T> IntoIterator for &'a mut CompactList<T> {
    type Item = &'a mut T;
    type IntoIter = slice::IterMut<'a, T>;
    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

impl<T: PartialEq> PartialEq for CompactList<T> {
    fn eq(&self, other: &Self) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<T: Eq> Eq for CompactList<T> {}

impl<T: PartialEq> PartialEq<[T]> for CompactList<T> {
    fn eq(&self, other: &[T]) -> bool {
        self.as_slice() == other
    }
}

impl<T: Hash> Hash for CompactList<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_slice().hash(state);
    }
}

impl<T: fmt::Debug> fmt::Debug for CompactList<T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}
