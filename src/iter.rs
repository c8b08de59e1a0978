//! Contains all iterator and cursor types.
//!
//! This is in its own module to not pollute the top-level namespace.
//!
//! Iterators borrow their container and walk a range of slots in the
//! container's (or view's) direction. Cursors borrow their container
//! mutably and can remove the entry they are on: the removal goes through
//! the same shift as a direct `remove` and the cursor adjusts its remaining
//! range right away.

use std::prelude::v1::*;
use std::{
    fmt,
    iter::FusedIterator,
    marker::PhantomData,
    slice,
    vec,
};

use crate::{
    bound::Span,
    core::{ArrayStore, Core},
};


/// Iterator over references to the elements of a set, a set view or a list
/// in container order.
pub struct Iter<'a, T> {
    items: &'a [T],
    span: Span,
}

impl<'a, T> Iter<'a, T> {
    pub(crate) fn new(items: &'a [T], span: Span) -> Self {
        Self { items, span }
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;
    fn next(&mut self) -> Option<Self::Item> {
        let items = self.items;
        self.span.next().map(|i| &items[i])
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.span.len(), Some(self.span.len()))
    }

    fn count(self) -> usize {
        self.len()
    }

    fn last(mut self) -> Option<Self::Item> {
        self.next_back()
    }
}

impl<T> DoubleEndedIterator for Iter<'_, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        let items = self.items;
        self.span.next_back().map(|i| &items[i])
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {
    fn len(&self) -> usize {
        self.span.len()
    }
}

impl<T> FusedIterator for Iter<'_, T> {}

impl<T> Clone for Iter<'_, T> {
    fn clone(&self) -> Self {
        Self {
            items: self.items,
            span: self.span.clone(),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Iter<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}


/// Iterator over the owned entries of a container, in container order.
///
/// Returned by the `IntoIterator` impls of the owning containers. For maps,
/// the items are the storage entries: `(K, V)` for entry keyed storage, the
/// value for self keyed storage.
#[derive(Clone, Debug)]
pub struct IntoIter<T>(vec::IntoIter<T>);

impl<T> IntoIter<T> {
    pub(crate) fn new(items: Vec<T>) -> Self {
        Self(items.into_iter())
    }
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;
    fn next(&mut self) -> Option<Self::Item> {
        self.0.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.0.size_hint()
    }
}

impl<T> DoubleEndedIterator for IntoIter<T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.0.next_back()
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}
impl<T> FusedIterator for IntoIter<T> {}


/// Iterator over the `(key, value)` pairs of a map or a sub map.
pub struct Entries<'a, K, V, C> {
    core: &'a C,
    span: Span,
    _marker: PhantomData<fn() -> (&'a K, &'a V)>,
}

impl<'a, K, V, C: Core<K, V>> Entries<'a, K, V, C> {
    pub(crate) fn new(core: &'a C, span: Span) -> Self {
        Self {
            core,
            span,
            _marker: PhantomData,
        }
    }

    fn entry_at(&self, index: usize) -> (&'a K, &'a V) {
        let core = self.core;
        (core.key_at(index), core.value_at(index))
    }
}

impl<'a, K: 'a, V: 'a, C: Core<K, V>> Iterator for Entries<'a, K, V, C> {
    type Item = (&'a K, &'a V);
    fn next(&mut self) -> Option<Self::Item> {
        self.span.next().map(|i| self.entry_at(i))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.span.len(), Some(self.span.len()))
    }

    fn count(self) -> usize {
        self.len()
    }

    fn last(mut self) -> Option<Self::Item> {
        self.next_back()
    }
}

impl<'a, K: 'a, V: 'a, C: Core<K, V>> DoubleEndedIterator for Entries<'a, K, V, C> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.span.next_back().map(|i| self.entry_at(i))
    }
}

impl<'a, K: 'a, V: 'a, C: Core<K, V>> ExactSizeIterator for Entries<'a, K, V, C> {
    fn len(&self) -> usize {
        self.span.len()
    }
}

impl<'a, K: 'a, V: 'a, C: Core<K, V>> FusedIterator for Entries<'a, K, V, C> {}

impl<K, V, C> Clone for Entries<'_, K, V, C> {
    fn clone(&self) -> Self {
        Self {
            core: self.core,
            span: self.span.clone(),
            _marker: PhantomData,
        }
    }
}

impl<K, V, C> fmt::Debug for Entries<'_, K, V, C> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Entries")
            .field("remaining", &self.span.len())
            .finish()
    }
}


/// Iterator over the keys of a map, a sub map or a key set.
pub struct Keys<'a, K, V, C>(Entries<'a, K, V, C>);

impl<'a, K, V, C: Core<K, V>> Keys<'a, K, V, C> {
    pub(crate) fn new(core: &'a C, span: Span) -> Self {
        Self(Entries::new(core, span))
    }
}

impl<'a, K: 'a, V: 'a, C: Core<K, V>> Iterator for Keys<'a, K, V, C> {
    type Item = &'a K;
    fn next(&mut self) -> Option<Self::Item> {
        self.0.next().map(|(k, _)| k)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.0.size_hint()
    }

    fn count(self) -> usize {
        self.len()
    }

    fn last(mut self) -> Option<Self::Item> {
        self.next_back()
    }
}

impl<'a, K: 'a, V: 'a, C: Core<K, V>> DoubleEndedIterator for Keys<'a, K, V, C> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.0.next_back().map(|(k, _)| k)
    }
}

impl<'a, K: 'a, V: 'a, C: Core<K, V>> ExactSizeIterator for Keys<'a, K, V, C> {
    fn len(&self) -> usize {
        self.0.len()
    }
}

impl<'a, K: 'a, V: 'a, C: Core<K, V>> FusedIterator for Keys<'a, K, V, C> {}

impl<K, V, C> Clone for Keys<'_, K, V, C> {
    fn clone(&self) -> Self {
        Self(self.0.clone())
    }
}

impl<K, V, C> fmt::Debug for Keys<'_, K, V, C> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Keys")
            .field("remaining", &self.0.span.len())
            .finish()
    }
}


/// Iterator over the values of a map or a sub map.
pub struct Values<'a, V>(Iter<'a, V>);

impl<'a, V> Values<'a, V> {
    pub(crate) fn new(values: &'a [V], span: Span) -> Self {
        Self(Iter::new(values, span))
    }
}

impl<'a, V> Iterator for Values<'a, V> {
    type Item = &'a V;
    fn next(&mut self) -> Option<Self::Item> {
        self.0.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.0.size_hint()
    }

    fn count(self) -> usize {
        self.len()
    }

    fn last(mut self) -> Option<Self::Item> {
        self.next_back()
    }
}

impl<V> DoubleEndedIterator for Values<'_, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.0.next_back()
    }
}

impl<V> ExactSizeIterator for Values<'_, V> {
    fn len(&self) -> usize {
        self.0.len()
    }
}

impl<V> FusedIterator for Values<'_, V> {}

impl<V> Clone for Values<'_, V> {
    fn clone(&self) -> Self {
        Self(self.0.clone())
    }
}

impl<V: fmt::Debug> fmt::Debug for Values<'_, V> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}


/// Iterator over mutable references to the values of a map or a sub map.
///
/// For self keyed storage, changing the key a value carries through this
/// iterator is a logic error.
#[derive(Debug)]
pub struct ValuesMut<'a, V> {
    values: slice::IterMut<'a, V>,
    descending: bool,
}

impl<'a, V> ValuesMut<'a, V> {
    pub(crate) fn new(values: &'a mut [V], descending: bool) -> Self {
        Self {
            values: values.iter_mut(),
            descending,
        }
    }
}

impl<'a, V> Iterator for ValuesMut<'a, V> {
    type Item = &'a mut V;
    fn next(&mut self) -> Option<Self::Item> {
        if self.descending {
            self.values.next_back()
        } else {
            self.values.next()
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.values.size_hint()
    }

    fn count(self) -> usize {
        self.len()
    }

    fn last(mut self) -> Option<Self::Item> {
        self.next_back()
    }
}

impl<V> DoubleEndedIterator for ValuesMut<'_, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.descending {
            self.values.next()
        } else {
            self.values.next_back()
        }
    }
}

impl<V> ExactSizeIterator for ValuesMut<'_, V> {
    fn len(&self) -> usize {
        self.values.len()
    }
}

impl<V> FusedIterator for ValuesMut<'_, V> {}


/// A cursor over the elements of a set, a set view or a list which can
/// remove the element it is on.
///
/// ```
/// use compact_collections::NavigableSet;
///
/// let mut set: NavigableSet<_> = (1..=6).collect();
/// let mut cursor = set.cursor();
/// while let Some(&x) = cursor.advance() {
///     if x % 2 == 0 {
///         cursor.remove();
///     }
/// }
/// assert_eq!(set.to_vec(), [1, 3, 5]);
/// ```
pub struct Cursor<'a, T> {
    items: &'a mut ArrayStore<T>,
    span: Span,
    current: Option<usize>,
}

impl<'a, T> Cursor<'a, T> {
    pub(crate) fn new(items: &'a mut ArrayStore<T>, span: Span) -> Self {
        Self {
            items,
            span,
            current: None,
        }
    }

    /// Moves to the next element and returns it, or returns `None` if
    /// there is none left.
    pub fn advance(&mut self) -> Option<&T> {
        self.current = self.span.next();
        let items = self.items.as_slice();
        self.current.map(move |i| &items[i])
    }

    /// Returns the element the cursor is on. `None` before the first
    /// `advance`, after the end and after `remove`.
    pub fn current(&self) -> Option<&T> {
        self.current.map(|i| &self.items.as_slice()[i])
    }

    /// Removes the element the cursor is on and returns it. The next
    /// `advance` returns the element after the removed one.
    pub fn remove(&mut self) -> Option<T> {
        let index = self.current.take()?;
        self.span.removed_last();
        Some(self.items.take(index))
    }

    /// Returns the number of elements `advance` will still return.
    pub fn remaining(&self) -> usize {
        self.span.len()
    }
}

impl<T: fmt::Debug> fmt::Debug for Cursor<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Cursor")
            .field("current", &self.current())
            .field("remaining", &self.span.len())
            .finish()
    }
}


/// A cursor over the entries of a map, a sub map or a key set which can
/// remove the entry it is on.
pub struct EntryCursor<'a, K, V, C> {
    core: &'a mut C,
    span: Span,
    current: Option<usize>,
    _marker: PhantomData<fn() -> (K, V)>,
}

impl<'a, K, V, C: Core<K, V>> EntryCursor<'a, K, V, C> {
    pub(crate) fn new(core: &'a mut C, span: Span) -> Self {
        Self {
            core,
            span,
            current: None,
            _marker: PhantomData,
        }
    }

    /// Moves to the next entry and returns it, or returns `None` if there
    /// is none left.
    pub fn advance(&mut self) -> Option<(&K, &V)> {
        self.current = self.span.next();
        self.current()
    }

    /// Returns the entry the cursor is on. `None` before the first
    /// `advance`, after the end and after `remove`.
    pub fn current(&self) -> Option<(&K, &V)> {
        self.current.map(|i| (self.core.key_at(i), self.core.value_at(i)))
    }

    /// Returns the value of the entry the cursor is on, mutably. For self
    /// keyed storage, changing the key the value carries is a logic error.
    pub fn value_mut(&mut self) -> Option<&mut V> {
        let index = self.current?;
        Some(&mut self.core.values_mut()[index])
    }

    /// Removes the entry the cursor is on and returns it. The next
    /// `advance` returns the entry after the removed one.
    pub fn remove(&mut self) -> Option<C::Entry> {
        let index = self.current.take()?;
        self.span.removed_last();
        Some(self.core.remove_at(index))
    }

    /// Returns the number of entries `advance` will still return.
    pub fn remaining(&self) -> usize {
        self.span.len()
    }
}

impl<K, V, C> fmt::Debug for EntryCursor<'_, K, V, C> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("EntryCursor")
            .field("current", &self.current)
            .field("remaining", &self.span.len())
            .finish()
    }
}
