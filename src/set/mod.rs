//! Unique element sets and the set algebra shared by all of them.

use std::prelude::v1::*;

use crate::Result;

pub use self::hash::HashOrderedSet;
pub use self::navigable::NavigableSet;
pub use self::view::SetView;

mod hash;
mod navigable;
mod view;


/// Bulk operations expressed over the single element operations of a set.
///
/// Implementors only provide `len`, `contains`, `insert`, `remove` and
/// `retain` (and `check_insert`, if not every element may be inserted). The
/// bulk operations are provided on top of those.
pub trait SetAlgebra<T> {
    fn len(&self) -> usize;

    fn contains(&self, item: &T) -> bool;

    /// Inserts `item`. Returns `Ok(true)` if it was inserted, `Ok(false)` if
    /// it was already present.
    fn insert(&mut self, item: T) -> Result<bool>;

    /// Removes the element equal to `item`. Returns `true` if there was one.
    fn remove(&mut self, item: &T) -> bool;

    /// Keeps only the elements for which `keep` returns `true`.
    fn retain<F: FnMut(&T) -> bool>(&mut self, keep: F);

    /// Fails with the error `insert(item)` would fail with. Succeeds if
    /// `insert(item)` would succeed.
    fn check_insert(&self, _item: &T) -> Result<()> {
        Ok(())
    }

    /// Returns `true` if every element of `items` is contained.
    fn contains_all<'a, I>(&self, items: I) -> bool
    where
        I: IntoIterator<Item = &'a T>,
        T: 'a,
    {
        items.into_iter().all(|item| self.contains(item))
    }

    /// Inserts all elements of `items`. Returns `true` if the set changed.
    ///
    /// Fails (with the error of [`check_insert`][SetAlgebra::check_insert])
    /// if any of the elements would be rejected. In that case, nothing is
    /// inserted.
    fn add_all<I>(&mut self, items: I) -> Result<bool>
    where
        I: IntoIterator<Item = T>,
    {
        let items = items.into_iter().collect::<Vec<_>>();
        if let Err(e) = items.iter().try_for_each(|item| self.check_insert(item)) {
            log::debug!("rejecting bulk insert of {} elements: {}", items.len(), e);
            return Err(e);
        }

        let mut changed = false;
        for item in items {
            changed |= self.insert(item)?;
        }
        Ok(changed)
    }

    /// Removes all elements of `items`. Returns `true` if the set changed.
    fn remove_all<'a, I>(&mut self, items: I) -> bool
    where
        I: IntoIterator<Item = &'a T>,
        T: 'a,
    {
        let mut changed = false;
        for item in items {
            changed |= self.remove(item);
        }
        changed
    }

    /// Removes all elements not contained in `other`. Returns `true` if the
    /// set changed.
    fn retain_all<S>(&mut self, other: &S) -> bool
    where
        S: SetAlgebra<T> + ?Sized,
    {
        let before = self.len();
        self.retain(|item| other.contains(item));
        self.len() != before
    }
}
