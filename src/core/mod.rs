//! The array mechanics shared by all containers.
//!
//! Every container of this crate stores its entries in one dense array
//! ([`ArrayStore`]) which is kept in the container's order. This module
//! contains that array, the growth policy, the two search primitives
//! ([`order_index`] and [`identity_index`]) and the [`Core`] trait, which
//! abstracts over how the key/value containers lay out their entries.

use std::prelude::v1::*;
use std::{
    cmp::Ordering,
    fmt,
    mem,
    ptr,
    slice,
};

use crate::{Error, Result};
use self::slots::Slots;

pub use self::entry::EntryKeyed;
pub use self::item::{KeyFns, SelfKey, SelfKeyed};

mod entry;
mod item;
mod slots;


/// Returns the capacity an array of capacity `capacity` grows to so that it
/// can hold `required` entries.
///
/// The array keeps its capacity if it is already large enough. Otherwise it
/// grows by half of its current capacity, or to exactly `required` if that
/// is not enough.
///
/// ```
/// use compact_collections::core::grown_capacity;
///
/// assert_eq!(grown_capacity(10, 4), 10);
/// assert_eq!(grown_capacity(10, 11), 15);
/// assert_eq!(grown_capacity(10, 20), 20);
/// assert_eq!(grown_capacity(0, 1), 1);
/// ```
pub fn grown_capacity(capacity: usize, required: usize) -> usize {
    if capacity >= required {
        return capacity;
    }

    let grown = capacity.saturating_add(capacity / 2);
    if grown >= required {
        grown
    } else {
        required
    }
}

/// Binary search over the slots `0..len`.
///
/// `order_at(i)` has to return the ordering of the entry in slot `i`
/// relative to the searched key (`Less` if the entry comes before the key).
/// Returns `Ok(i)` with the index of *some* slot comparing equal to the key,
/// or `Err(i)` with the index at which the key would have to be inserted to
/// keep the order.
///
/// This is the only search comparator ordered containers need, because for
/// them comparing equal means being the same entry.
pub fn order_index<F>(len: usize, mut order_at: F) -> Result<usize, usize>
where
    F: FnMut(usize) -> Ordering,
{
    let mut from = 0;
    let mut to = len;
    while from < to {
        let mid = from + (to - from) / 2;
        match order_at(mid) {
            Ordering::Less => from = mid + 1,
            Ordering::Greater => to = mid,
            Ordering::Equal => return Ok(mid),
        }
    }

    Err(from)
}

/// Search for the slot that is identical to the searched key.
///
/// Unlike [`order_index`], comparing equal (e.g. having the same hash) does
/// not mean being identical. So after the binary search found a slot of the
/// right order, the contiguous run of slots with the same order is scanned
/// forward and then backward until `identity_at(i)` returns `true`.
///
/// Returns `Ok(i)` with the index of the identical slot, or `Err(i)` with
/// an insertion point that keeps the order.
pub fn identity_index<F, G>(len: usize, mut order_at: F, mut identity_at: G) -> Result<usize, usize>
where
    F: FnMut(usize) -> Ordering,
    G: FnMut(usize) -> bool,
{
    let index = order_index(len, &mut order_at)?;
    if identity_at(index) {
        return Ok(index);
    }

    let mut next = index + 1;
    while next < len && order_at(next) == Ordering::Equal {
        if identity_at(next) {
            return Ok(next);
        }
        next += 1;
    }

    let mut prev = index;
    while prev > 0 && order_at(prev - 1) == Ordering::Equal {
        prev -= 1;
        if identity_at(prev) {
            return Ok(prev);
        }
    }

    Err(index)
}


/// A dense array of entries: the slots `0..len` hold the live entries,
/// the slots `len..capacity` are unused.
///
/// Inserting and removing shift the tail of the array, so both are O(n).
/// The capacity grows by the policy of [`grown_capacity`] and never shrinks
/// by itself; call [`compact`][ArrayStore::compact] to give memory back.
///
/// The store does not know anything about order. Keeping the entries
/// sorted is the job of the containers built on top of it.
pub struct ArrayStore<T> {
    slots: Slots<T>,

    /// Number of live entries at the start of `slots`.
    len: usize,
}

impl<T> ArrayStore<T> {
    /// Creates an empty store. Does not allocate.
    pub const fn new() -> Self {
        Self {
            slots: Slots::new(),
            len: 0,
        }
    }

    /// Creates an empty store with exactly `capacity` slots.
    pub fn with_capacity(capacity: usize) -> Self {
        let mut out = Self::new();
        unsafe {
            // Empty, so every slot is uninitialized.
            out.slots.realloc(capacity);
        }
        out
    }

    /// Creates a store holding the elements of `vec` in the same order, with
    /// a capacity equal to their number.
    pub fn from_vec(vec: Vec<T>) -> Self {
        let mut out = Self::with_capacity(vec.len());
        for item in vec {
            out.put(out.len, item);
        }
        out
    }

    /// Returns the number of live entries.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if there are no live entries.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the number of slots of the backing array.
    pub fn capacity(&self) -> usize {
        self.slots.cap()
    }

    /// Returns the live entries as a slice.
    pub fn as_slice(&self) -> &[T] {
        unsafe { slice::from_raw_parts(self.slots.as_ptr(), self.len) }
    }

    /// Returns the live entries as a mutable slice.
    ///
    /// Containers must not use this to reorder entries.
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        unsafe { slice::from_raw_parts_mut(self.slots.as_mut_ptr(), self.len) }
    }

    /// Returns the entry at `index`, or `None` if it is out of bounds.
    pub fn get(&self, index: usize) -> Option<&T> {
        self.as_slice().get(index)
    }

    /// Reallocates the backing array to exactly `capacity` slots.
    ///
    /// Fails with [`Error::CapacityTooSmall`] if `capacity` is smaller than
    /// the number of live entries.
    pub fn resize(&mut self, capacity: usize) -> Result<()> {
        if capacity < self.len {
            return Err(Error::CapacityTooSmall { capacity, len: self.len });
        }

        if capacity != self.capacity() {
            log::trace!("resizing compact array: {} -> {} slots", self.capacity(), capacity);
            unsafe {
                // `capacity >= len`, so only uninitialized slots are cut off.
                self.slots.realloc(capacity);
            }
        }
        Ok(())
    }

    /// Makes sure that `additional` more entries fit without reallocation.
    /// Grows by the same policy as inserting does.
    pub fn reserve(&mut self, additional: usize) {
        let required = self.len.saturating_add(additional);
        self.grow_for(required);
    }

    /// Shrinks the backing array to exactly the number of live entries.
    pub fn compact(&mut self) {
        if self.capacity() != self.len {
            log::trace!("compacting array: {} -> {} slots", self.capacity(), self.len);
            unsafe {
                self.slots.realloc(self.len);
            }
        }
    }

    /// Inserts `item` at `index`, shifting all entries from `index` on one
    /// slot to the right.
    ///
    /// Fails with [`Error::IndexOutOfRange`] if `index > len`.
    pub fn insert(&mut self, index: usize, item: T) -> Result<()> {
        if index > self.len {
            return Err(Error::IndexOutOfRange { index, len: self.len });
        }

        self.put(index, item);
        Ok(())
    }

    /// Opens a gap of `items.len()` slots at `index` with one shift and fills
    /// it with `items`. Returns the number of inserted entries.
    ///
    /// Fails with [`Error::IndexOutOfRange`] if `index > len`.
    pub fn insert_all<I>(&mut self, index: usize, items: I) -> Result<usize>
    where
        I: IntoIterator,
        I::IntoIter: ExactSizeIterator<Item = T>,
    {
        if index > self.len {
            return Err(Error::IndexOutOfRange { index, len: self.len });
        }

        let items = items.into_iter();
        let count = items.len();
        if count == 0 {
            return Ok(0);
        }

        let required = self.len.saturating_add(count);
        self.grow_for(required);

        unsafe {
            let len = self.len;
            let tail = len - index;

            // If `items` panics, the entries behind the gap are leaked
            // instead of being dropped twice.
            self.len = index;

            let gap = self.slots.as_mut_ptr().add(index);
            ptr::copy(gap, gap.add(count), tail);

            // `ExactSizeIterator` is a safe trait, so we can't trust `count`.
            let mut written = 0;
            for item in items.take(count) {
                ptr::write(gap.add(written), item);
                written += 1;
            }
            if written < count {
                ptr::copy(gap.add(count), gap.add(written), tail);
            }

            self.len = index + written + tail;
            Ok(written)
        }
    }

    /// Removes and returns the entry at `index`, shifting all entries behind
    /// it one slot to the left.
    ///
    /// Fails with [`Error::IndexOutOfRange`] if `index >= len`.
    pub fn remove(&mut self, index: usize) -> Result<T> {
        if index >= self.len {
            return Err(Error::IndexOutOfRange { index, len: self.len });
        }

        Ok(self.take(index))
    }

    /// Drops the `count` entries starting at `index` and shifts the rest of
    /// the array to the left. The vacated slots at the end become unused;
    /// the capacity does not change.
    ///
    /// Fails with [`Error::IndexOutOfRange`] if `index > len` and with
    /// [`Error::CountOutOfRange`] if `index + count > len`.
    pub fn remove_range(&mut self, index: usize, count: usize) -> Result<()> {
        if index > self.len {
            return Err(Error::IndexOutOfRange { index, len: self.len });
        }
        if count > self.len - index {
            return Err(Error::CountOutOfRange { index, count, len: self.len });
        }

        self.cut(index, count);
        Ok(())
    }

    /// Drops all entries. The capacity does not change.
    pub fn clear(&mut self) {
        self.cut(0, self.len);
    }

    /// Binary search over the live entries, see [`order_index`]. `order`
    /// returns the ordering of an entry relative to the searched key.
    pub fn order_index<F>(&self, mut order: F) -> Result<usize, usize>
    where
        F: FnMut(&T) -> Ordering,
    {
        let items = self.as_slice();
        order_index(items.len(), |i| order(&items[i]))
    }

    /// Binary search followed by an identity scan, see [`identity_index`].
    pub fn identity_index<F, G>(&self, mut order: F, mut identity: G) -> Result<usize, usize>
    where
        F: FnMut(&T) -> Ordering,
        G: FnMut(&T) -> bool,
    {
        let items = self.as_slice();
        identity_index(items.len(), |i| order(&items[i]), |i| identity(&items[i]))
    }

    /// Moves all entries into a `Vec<T>` of the same order.
    pub fn into_vec(mut self) -> Vec<T> {
        let len = self.len;
        let mut out = Vec::with_capacity(len);
        unsafe {
            // Ownership of the entries moves to `out`; `self` only frees
            // its memory afterwards.
            self.len = 0;
            ptr::copy_nonoverlapping(self.slots.as_ptr(), out.as_mut_ptr(), len);
            out.set_len(len);
        }
        out
    }

    /// Like `insert`, but panics if `index > len`. For callers which
    /// computed `index` from a search.
    pub(crate) fn put(&mut self, index: usize, item: T) {
        assert!(index <= self.len, "insertion index out of bounds");

        let required = self.len.saturating_add(1);
        self.grow_for(required);

        unsafe {
            let slot = self.slots.as_mut_ptr().add(index);
            ptr::copy(slot, slot.add(1), self.len - index);
            ptr::write(slot, item);
        }
        self.len += 1;
    }

    /// Like `remove`, but panics if `index >= len`.
    pub(crate) fn take(&mut self, index: usize) -> T {
        assert!(index < self.len, "removal index out of bounds");

        unsafe {
            let slot = self.slots.as_mut_ptr().add(index);
            let item = ptr::read(slot);
            ptr::copy(slot.add(1), slot, self.len - index - 1);
            self.len -= 1;
            item
        }
    }

    /// Replaces the entry at `index`. Panics if `index >= len`.
    pub(crate) fn swap_at(&mut self, index: usize, item: T) -> T {
        mem::replace(&mut self.as_mut_slice()[index], item)
    }

    /// Like `remove_range`, but panics if the range is out of bounds.
    pub(crate) fn cut(&mut self, index: usize, count: usize) {
        assert!(index <= self.len && count <= self.len - index, "removal range out of bounds");
        if count == 0 {
            return;
        }

        unsafe {
            let len = self.len;

            // If a destructor panics, the tail is leaked instead of being
            // dropped twice.
            self.len = index;

            let gap = self.slots.as_mut_ptr().add(index);
            ptr::drop_in_place(slice::from_raw_parts_mut(gap, count));
            ptr::copy(gap.add(count), gap, len - index - count);

            self.len = len - count;
        }
    }

    fn grow_for(&mut self, required: usize) {
        let capacity = self.capacity();
        if capacity < required {
            let grown = grown_capacity(capacity, required);
            log::trace!("growing compact array: {} -> {} slots", capacity, grown);
            unsafe {
                // Growing never cuts off live entries.
                self.slots.realloc(grown);
            }
        }
    }
}

impl<T> Drop for ArrayStore<T> {
    fn drop(&mut self) {
        // Drop the live entries, `Slots` frees the memory afterwards.
        unsafe {
            ptr::drop_in_place(self.as_mut_slice());
        }
    }
}

impl<T: Clone> Clone for ArrayStore<T> {
    fn clone(&self) -> Self {
        // The clone gets the same capacity, not just the same length.
        let mut out = Self::with_capacity(self.capacity());
        for item in self.as_slice() {
            out.put(out.len, item.clone());
        }
        out
    }
}

impl<T> Default for ArrayStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: fmt::Debug> fmt::Debug for ArrayStore<T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_list().entries(self.as_slice()).finish()
    }
}


/// The storage layout of a key/value container.
///
/// The key/value containers ([`HashOrderedMap`][crate::HashOrderedMap] and
/// [`NavigableMap`][crate::NavigableMap]) compute positions by searching over
/// `key_at` and then let the core insert, replace or remove the entry at that
/// position. How keys and values are laid out is up to the core:
///
/// - [`SelfKeyed`] stores only values; the key is part of the value.
/// - [`EntryKeyed`] stores keys and values in two parallel arrays.
///
/// Both lay out the values contiguously, so `values` is a plain slice.
///
/// # Formal
///
/// Indices passed to the `*_at` methods must be `< len()` (for `insert_at`:
/// `≤ len()`). The cores check this and panic otherwise; the containers
/// only pass indices they obtained from a search.
pub trait Core<K, V> {
    /// What removing an entry hands back: the value for self-keyed storage,
    /// the key/value pair for parallel storage.
    type Entry;

    /// Returns the number of entries.
    fn len(&self) -> usize;

    /// Returns the number of entries that fit without reallocation.
    fn capacity(&self) -> usize;

    /// Returns the key of the entry at `index`.
    fn key_at(&self, index: usize) -> &K;

    /// Returns all values in order.
    fn values(&self) -> &[V];

    /// Returns all values in order, mutably.
    fn values_mut(&mut self) -> &mut [V];

    /// Inserts a new entry at `index`, shifting the entries behind it.
    ///
    /// **Postconditons**:
    /// - `self.key_at(index) == key`
    fn insert_at(&mut self, index: usize, key: K, value: V);

    /// Replaces the entry at `index` and returns the old value. `key` has to
    /// be equal to the old key.
    fn replace_at(&mut self, index: usize, key: K, value: V) -> V;

    /// Removes the entry at `index`, shifting the entries behind it.
    fn remove_at(&mut self, index: usize) -> Self::Entry;

    /// Drops `count` entries starting at `index`.
    fn remove_range(&mut self, index: usize, count: usize);

    /// Makes sure `additional` more entries fit without reallocation.
    fn reserve(&mut self, additional: usize);

    /// Reallocates to exactly `capacity` slots.
    fn resize(&mut self, capacity: usize) -> Result<()>;

    /// Shrinks the capacity to the number of entries.
    fn compact(&mut self);

    /// Drops all entries, keeping the capacity.
    fn clear(&mut self);

    /// Returns the value part of a removed entry.
    fn entry_value(entry: Self::Entry) -> V;

    /// Returns the key a value carries. Only self-keyed storage supports
    /// this.
    fn extract_key<'a>(&self, value: &'a V) -> Result<&'a K>;

    /// Returns `value` modified to carry `key`. Only self-keyed storage
    /// supports this.
    fn inject_key(&self, key: K, value: V) -> Result<V>;

    /// Moves all entries out, in order.
    fn into_entries(self) -> Vec<Self::Entry>;

    /// Returns the value of the entry at `index`.
    fn value_at(&self, index: usize) -> &V {
        &self.values()[index]
    }

    /// Returns `true` if there are no entries.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
