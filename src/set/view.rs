use std::prelude::v1::*;
use std::{
    fmt,
    marker::PhantomData,
    ops::{Bound, Deref, DerefMut},
};

use crate::{
    Error, Result,
    bound::Window,
    iter::{Cursor, Iter},
    order::{Comparator, Directed},
    set::{NavigableSet, SetAlgebra},
};


/// A range view of a [`NavigableSet`].
///
/// `O` is the comparator of the set and `P` the handle to it:
/// `&NavigableSet<T, O>` for a read-only view, `&mut NavigableSet<T, O>`
/// for a view which can also insert and remove. The
/// view stores nothing but that handle, its bounds and its direction. All
/// indices are recomputed from the bounds on every call, so the view always
/// reflects the current content of the set.
///
/// Everything a view returns is restricted to its bounds, and "first",
/// "lower", iteration order, ... follow the view's direction. Inserting an
/// element outside of the bounds fails with [`Error::OutOfRange`].
///
/// ```
/// use std::ops::Bound::*;
/// use compact_collections::NavigableSet;
///
/// let mut set: NavigableSet<_> = (1..=5).collect();
/// let mut view = set.sub_set_mut(Included(2), Excluded(4)).unwrap();
///
/// assert_eq!(view.insert(3), Ok(false));
/// assert!(view.insert(10).is_err());
///
/// view.parent_mut().remove(&2);
/// assert_eq!(view.to_vec(), [3]);
/// ```
pub struct SetView<T, O, P> {
    parent: P,
    window: Window<T>,
    _order: PhantomData<fn() -> O>,
}

impl<T, O, P> SetView<T, O, P> {
    pub(crate) fn new(parent: P, window: Window<T>) -> Self {
        Self {
            parent,
            window,
            _order: PhantomData,
        }
    }

    /// Returns `true` if this view iterates from the greatest to the least
    /// element.
    pub fn is_descending(&self) -> bool {
        self.window.is_descending()
    }

    /// Returns this view with the direction reversed.
    pub fn descending(self) -> Self {
        Self::new(self.parent, self.window.reversed())
    }
}

impl<T, O, P> SetView<T, O, P>
where
    P: Deref<Target = NavigableSet<T, O>>,
    O: Comparator<T>,
{
    /// Returns the whole set this view is a part of.
    pub fn parent(&self) -> &NavigableSet<T, O> {
        &self.parent
    }

    /// Returns the order of this view: the set's comparator, inverted if the
    /// view is descending.
    pub fn comparator(&self) -> Directed<'_, O> {
        Directed::new(self.parent.comparator(), self.is_descending())
    }

    /// Returns a read-only view with the same bounds and direction.
    pub fn reborrow(&self) -> SetView<T, O, &NavigableSet<T, O>>
    where
        T: Clone,
    {
        SetView::new(&*self.parent, self.window.clone())
    }

    /// Returns the number of elements within the bounds.
    pub fn len(&self) -> usize {
        self.window.range(&*self.parent).len()
    }

    /// Returns `true` if no element lies within the bounds.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns `true` if `item` lies within the bounds and is in the set.
    pub fn contains(&self, item: &T) -> bool {
        self.window.contains(&*self.parent, item) && self.parent.contains(item)
    }

    /// Returns the stored element equal to `item` if it lies within the
    /// bounds.
    pub fn get(&self, item: &T) -> Option<&T> {
        if self.window.contains(&*self.parent, item) {
            self.parent.get(item)
        } else {
            None
        }
    }

    /// Returns the first element in view order. Fails with `NoSuchElement`
    /// if the view is empty.
    pub fn first(&self) -> Result<&T> {
        self.window.first(&*self.parent).map(|i| self.at(i)).ok_or(Error::NoSuchElement)
    }

    /// Returns the last element in view order. Fails with `NoSuchElement`
    /// if the view is empty.
    pub fn last(&self) -> Result<&T> {
        self.window.last(&*self.parent).map(|i| self.at(i)).ok_or(Error::NoSuchElement)
    }

    /// Returns the element right before `item` in view order.
    pub fn lower(&self, item: &T) -> Option<&T> {
        self.window.lower(&*self.parent, item).map(|i| self.at(i))
    }

    /// Returns the last element in view order which is not after `item`.
    pub fn floor(&self, item: &T) -> Option<&T> {
        self.window.floor(&*self.parent, item).map(|i| self.at(i))
    }

    /// Returns the first element in view order which is not before `item`.
    pub fn ceiling(&self, item: &T) -> Option<&T> {
        self.window.ceiling(&*self.parent, item).map(|i| self.at(i))
    }

    /// Returns the element right after `item` in view order.
    pub fn higher(&self, item: &T) -> Option<&T> {
        self.window.higher(&*self.parent, item).map(|i| self.at(i))
    }

    /// Iterates over the elements within the bounds in view order.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter::new(self.parent.as_slice(), self.window.span(&*self.parent))
    }

    /// Copies the elements within the bounds into a `Vec` in view order.
    pub fn to_vec(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.iter().cloned().collect()
    }

    /// Narrows this view to the elements between `from` and `to` (in view
    /// order).
    ///
    /// An `Unbounded` side keeps the current bound. A new bound outside of
    /// this view fails with `BoundOutOfRange`, `from` after `to` fails with
    /// `InvertedBounds`.
    pub fn sub_set(self, from: Bound<T>, to: Bound<T>) -> Result<Self> {
        let Self { parent, window, .. } = self;
        let window = window.narrow(&*parent, from, to)?;
        Ok(Self::new(parent, window))
    }

    /// Narrows this view to the elements before `to` (in view order).
    pub fn head_set(self, to: Bound<T>) -> Result<Self> {
        self.sub_set(Bound::Unbounded, to)
    }

    /// Narrows this view to the elements after `from` (in view order).
    pub fn tail_set(self, from: Bound<T>) -> Result<Self> {
        self.sub_set(from, Bound::Unbounded)
    }

    fn at(&self, index: usize) -> &T {
        &self.parent.as_slice()[index]
    }
}

impl<T, O, P> SetView<T, O, P>
where
    P: DerefMut<Target = NavigableSet<T, O>>,
    O: Comparator<T>,
{
    /// Returns the whole set mutably. Changes made through it are visible
    /// through this view as far as they fall within its bounds.
    pub fn parent_mut(&mut self) -> &mut NavigableSet<T, O> {
        &mut self.parent
    }

    /// Returns a mutable view with the same bounds and direction.
    pub fn reborrow_mut(&mut self) -> SetView<T, O, &mut NavigableSet<T, O>>
    where
        T: Clone,
    {
        let window = self.window.clone();
        SetView::new(&mut *self.parent, window)
    }

    /// Inserts `item` into the set.
    ///
    /// Fails with [`Error::OutOfRange`] (leaving the set unchanged) if
    /// `item` lies outside of the bounds. Otherwise returns whether it was
    /// newly inserted.
    pub fn insert(&mut self, item: T) -> Result<bool> {
        if !self.window.contains(&*self.parent, &item) {
            log::debug!("rejecting insert: element lies outside of the view");
            return Err(Error::OutOfRange);
        }

        Ok(self.parent.insert(item))
    }

    /// Removes the element equal to `item` if it lies within the bounds.
    pub fn remove(&mut self, item: &T) -> Option<T> {
        if self.window.contains(&*self.parent, item) {
            self.parent.remove(item)
        } else {
            None
        }
    }

    /// Removes and returns the first element in view order.
    pub fn poll_first(&mut self) -> Option<T> {
        let index = self.window.first(&*self.parent)?;
        Some(self.parent.items.take(index))
    }

    /// Removes and returns the last element in view order.
    pub fn poll_last(&mut self) -> Option<T> {
        let index = self.window.last(&*self.parent)?;
        Some(self.parent.items.take(index))
    }

    /// Removes all elements within the bounds from the set.
    pub fn clear(&mut self) {
        let range = self.window.range(&*self.parent);
        self.parent.items.cut(range.start, range.len());
    }

    /// Returns a cursor which walks the elements within the bounds in view
    /// order and can remove them.
    pub fn cursor(&mut self) -> Cursor<'_, T> {
        let span = self.window.span(&*self.parent);
        Cursor::new(&mut self.parent.items, span)
    }

    /// Keeps only the elements within the bounds for which `keep` returns
    /// `true`. Elements outside of the bounds are not touched.
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
}

impl<T, O, P> SetAlgebra<T> for SetView<T, O, P>
where
    P: DerefMut<Target = NavigableSet<T, O>>,
    O: Comparator<T>,
{
    fn len(&self) -> usize {
        self.len()
    }

    fn contains(&self, item: &T) -> bool {
        self.contains(item)
    }

    fn insert(&mut self, item: T) -> Result<bool> {
        self.insert(item)
    }

    fn remove(&mut self, item: &T) -> bool {
        self.remove(item).is_some()
    }

    fn retain<F: FnMut(&T) -> bool>(&mut self, keep: F) {
        self.retain(keep);
    }

    fn check_insert(&self, item: &T) -> Result<()> {
        if self.window.contains(&*self.parent, item) {
            Ok(())
        } else {
            Err(Error::OutOfRange)
        }
    }
}

impl<'a, T: 'a, O: 'a, P> IntoIterator for &'a SetView<T, O, P>
where
    P: Deref<Target = NavigableSet<T, O>>,
    O: Comparator<T>,
{
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T, O, P> fmt::Debug for SetView<T, O, P>
where
    T: fmt::Debug,
    P: Deref<Target = NavigableSet<T, O>>,
    O: Comparator<T>,
{
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}
