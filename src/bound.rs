//! Index windows of range views.
//!
//! A view never stores indices. It stores two [`Bound`]s and a direction and
//! turns them into an index range of the parent's array on every call, so
//! the view stays correct while the parent is shifted under it.

use std::{
    cmp::Ordering,
    ops::{Bound, Range},
};

use crate::{
    Error, Result,
    core::order_index,
};


/// A container whose array is sorted by a comparator over `Key`.
pub(crate) trait Sorted {
    type Key;

    fn len(&self) -> usize;
    fn key_at(&self, index: usize) -> &Self::Key;
    fn compare(&self, a: &Self::Key, b: &Self::Key) -> Ordering;

    fn search(&self, key: &Self::Key) -> Result<usize, usize> {
        order_index(self.len(), |i| self.compare(self.key_at(i), key))
    }

    /// Number of entries less than `key`.
    fn count_below(&self, key: &Self::Key) -> usize {
        match self.search(key) {
            Ok(i) | Err(i) => i,
        }
    }

    /// Number of entries less than or equal to `key`.
    fn count_up_to(&self, key: &Self::Key) -> usize {
        match self.search(key) {
            Ok(i) => i + 1,
            Err(i) => i,
        }
    }
}

/// Lower and upper bound plus iteration direction of a view.
///
/// The bounds are always in ascending order (`lower ≤ upper` under the
/// comparator), even for descending windows. Everything taking or returning
/// "first", "last", "lower", ... is relative to the window's direction.
#[derive(Clone, Debug)]
pub(crate) struct Window<K> {
    lower: Bound<K>,
    upper: Bound<K>,
    descending: bool,
}

impl<K> Window<K> {
    /// The ascending window over everything.
    pub(crate) fn full() -> Self {
        Self {
            lower: Bound::Unbounded,
            upper: Bound::Unbounded,
            descending: false,
        }
    }

    /// An ascending window with bounds that are known not to be inverted
    /// (e.g. because one side is unbounded).
    pub(crate) fn unchecked(lower: Bound<K>, upper: Bound<K>) -> Self {
        Self {
            lower,
            upper,
            descending: false,
        }
    }

    pub(crate) fn is_descending(&self) -> bool {
        self.descending
    }

    /// The same window, iterated in the opposite direction.
    pub(crate) fn reversed(self) -> Self {
        Self {
            descending: !self.descending,
            ..self
        }
    }

    fn too_low<S: Sorted<Key = K>>(&self, sorted: &S, key: &K) -> bool {
        match &self.lower {
            Bound::Unbounded => false,
            Bound::Included(lo) => sorted.compare(key, lo) == Ordering::Less,
            Bound::Excluded(lo) => sorted.compare(key, lo) != Ordering::Greater,
        }
    }

    fn too_high<S: Sorted<Key = K>>(&self, sorted: &S, key: &K) -> bool {
        match &self.upper {
            Bound::Unbounded => false,
            Bound::Included(hi) => sorted.compare(key, hi) == Ordering::Greater,
            Bound::Excluded(hi) => sorted.compare(key, hi) != Ordering::Less,
        }
    }

    /// Returns `true` if `key` lies inside the window.
    pub(crate) fn contains<S: Sorted<Key = K>>(&self, sorted: &S, key: &K) -> bool {
        !self.too_low(sorted, key) && !self.too_high(sorted, key)
    }

    /// Like `contains`, but ignores whether the bounds are exclusive.
    fn contains_closed<S: Sorted<Key = K>>(&self, sorted: &S, key: &K) -> bool {
        let above_lower = match &self.lower {
            Bound::Unbounded => true,
            Bound::Included(lo) | Bound::Excluded(lo) => sorted.compare(key, lo) != Ordering::Less,
        };
        let below_upper = match &self.upper {
            Bound::Unbounded => true,
            Bound::Included(hi) | Bound::Excluded(hi) => sorted.compare(key, hi) != Ordering::Greater,
        };
        above_lower && below_upper
    }

    fn start<S: Sorted<Key = K>>(&self, sorted: &S) -> usize {
        match &self.lower {
            Bound::Unbounded => 0,
            Bound::Included(lo) => sorted.count_below(lo),
            Bound::Excluded(lo) => sorted.count_up_to(lo),
        }
    }

    fn end<S: Sorted<Key = K>>(&self, sorted: &S) -> usize {
        match &self.upper {
            Bound::Unbounded => sorted.len(),
            Bound::Included(hi) => sorted.count_up_to(hi),
            Bound::Excluded(hi) => sorted.count_below(hi),
        }
    }

    /// The slots of the parent inside this window, in ascending order.
    pub(crate) fn range<S: Sorted<Key = K>>(&self, sorted: &S) -> Range<usize> {
        let start = self.start(sorted);
        let end = self.end(sorted);
        start..end.max(start)
    }

    pub(crate) fn span<S: Sorted<Key = K>>(&self, sorted: &S) -> Span {
        Span::new(self.range(sorted), self.descending)
    }

    pub(crate) fn first<S: Sorted<Key = K>>(&self, sorted: &S) -> Option<usize> {
        let range = self.range(sorted);
        if range.is_empty() {
            None
        } else if self.descending {
            Some(range.end - 1)
        } else {
            Some(range.start)
        }
    }

    pub(crate) fn last<S: Sorted<Key = K>>(&self, sorted: &S) -> Option<usize> {
        let range = self.range(sorted);
        if range.is_empty() {
            None
        } else if self.descending {
            Some(range.start)
        } else {
            Some(range.end - 1)
        }
    }

    /// Greatest slot strictly before `key` in window order.
    pub(crate) fn lower<S: Sorted<Key = K>>(&self, sorted: &S, key: &K) -> Option<usize> {
        if self.descending {
            self.above(sorted, sorted.count_up_to(key))
        } else {
            self.below(sorted, sorted.count_below(key))
        }
    }

    /// Greatest slot at or before `key` in window order.
    pub(crate) fn floor<S: Sorted<Key = K>>(&self, sorted: &S, key: &K) -> Option<usize> {
        if self.descending {
            self.above(sorted, sorted.count_below(key))
        } else {
            self.below(sorted, sorted.count_up_to(key))
        }
    }

    /// Least slot at or after `key` in window order.
    pub(crate) fn ceiling<S: Sorted<Key = K>>(&self, sorted: &S, key: &K) -> Option<usize> {
        if self.descending {
            self.below(sorted, sorted.count_up_to(key))
        } else {
            self.above(sorted, sorted.count_below(key))
        }
    }

    /// Least slot strictly after `key` in window order.
    pub(crate) fn higher<S: Sorted<Key = K>>(&self, sorted: &S, key: &K) -> Option<usize> {
        if self.descending {
            self.below(sorted, sorted.count_below(key))
        } else {
            self.above(sorted, sorted.count_up_to(key))
        }
    }

    /// The last slot of the window with an index `< count`.
    fn below<S: Sorted<Key = K>>(&self, sorted: &S, count: usize) -> Option<usize> {
        let range = self.range(sorted);
        let bound = count.min(range.end);
        if bound > range.start {
            Some(bound - 1)
        } else {
            None
        }
    }

    /// The first slot of the window with an index `≥ count`.
    fn above<S: Sorted<Key = K>>(&self, sorted: &S, count: usize) -> Option<usize> {
        let range = self.range(sorted);
        let index = count.max(range.start);
        if index < range.end {
            Some(index)
        } else {
            None
        }
    }
}

impl<K> Window<K> {
    /// Creates an ascending window. Fails with `InvertedBounds` if `lower` is
    /// greater than `upper`.
    pub(crate) fn new<S: Sorted<Key = K>>(
        sorted: &S,
        lower: Bound<K>,
        upper: Bound<K>,
    ) -> Result<Self> {
        if let (
            Bound::Included(lo) | Bound::Excluded(lo),
            Bound::Included(hi) | Bound::Excluded(hi),
        ) = (&lower, &upper) {
            if sorted.compare(lo, hi) == Ordering::Greater {
                log::debug!("rejecting view: lower bound greater than upper bound");
                return Err(Error::InvertedBounds);
            }
        }

        Ok(Self {
            lower,
            upper,
            descending: false,
        })
    }

    /// Narrows this window to `from..to` in window order. An `Unbounded`
    /// side keeps the current bound.
    ///
    /// A new bound has to lie inside this window. An exclusive bound may
    /// also sit exactly on an exclusive bound of this window. Violations fail
    /// with `BoundOutOfRange`.
    pub(crate) fn narrow<S: Sorted<Key = K>>(
        self,
        sorted: &S,
        from: Bound<K>,
        to: Bound<K>,
    ) -> Result<Self> {
        let (lower, upper) = if self.descending { (to, from) } else { (from, to) };

        for bound in [&lower, &upper] {
            let accepted = match bound {
                Bound::Unbounded => true,
                Bound::Included(key) => self.contains(sorted, key),
                Bound::Excluded(key) => self.contains_closed(sorted, key),
            };
            if !accepted {
                log::debug!("rejecting view: bound outside of the parent view");
                return Err(Error::BoundOutOfRange);
            }
        }

        let descending = self.descending;
        let lower = match lower {
            Bound::Unbounded => self.lower,
            b => b,
        };
        let upper = match upper {
            Bound::Unbounded => self.upper,
            b => b,
        };

        let out = Self::new(sorted, lower, upper)?;
        Ok(Self { descending, ..out })
    }
}

/// A range of slots plus the direction in which to walk it. Shared by all
/// iterators and cursors.
#[derive(Clone, Debug)]
pub(crate) struct Span {
    range: Range<usize>,
    descending: bool,
}

impl Span {
    pub(crate) fn new(range: Range<usize>, descending: bool) -> Self {
        Self { range, descending }
    }

    pub(crate) fn ascending(len: usize) -> Self {
        Self::new(0..len, false)
    }

    pub(crate) fn len(&self) -> usize {
        self.range.len()
    }

    /// Takes the next slot in walking direction.
    pub(crate) fn next(&mut self) -> Option<usize> {
        if self.descending {
            self.range.next_back()
        } else {
            self.range.next()
        }
    }

    /// Takes the next slot against walking direction.
    pub(crate) fn next_back(&mut self) -> Option<usize> {
        if self.descending {
            self.range.next()
        } else {
            self.range.next_back()
        }
    }

    /// Adjusts the remaining range after the slot last returned by `next` was
    /// removed from the array.
    ///
    /// Walking ascending, every remaining slot sits behind the removed one
    /// and moves one to the left. Walking descending, every remaining slot
    /// sits before it and stays where it is.
    pub(crate) fn removed_last(&mut self) {
        if !self.descending {
            self.range.start -= 1;
            self.range.end -= 1;
        }
    }
}
