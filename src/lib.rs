//! Sets and maps which store all entries in one sorted, contiguous array.
//!
//! A balanced tree spends a few pointers per entry, a hash table spends its
//! load factor and bucket metadata. The containers of this crate spend
//! nothing besides the entries themselves: entries live in a single array
//! in the container's order, lookups are binary searches, and inserting or
//! removing shifts the tail of the array. That makes modifications O(n)
//! instead of O(log n), which is a good trade for collections that are read
//! far more often than they are modified, or that are small and numerous.
//!
//! There are two ways to order the array:
//!
//! - **by hash** ([`HashOrderedSet`], [`HashOrderedMap`]): entries are sorted
//!   by the hash of their element or key. Entries with colliding hashes
//!   form a run which is scanned for the right one. See [`order::HashOrder`].
//! - **by comparator** ([`NavigableSet`], [`NavigableMap`]): entries are
//!   sorted by a total order. These support navigation (`floor`, `higher`,
//!   `poll_first`, ...) and range views ([`SetView`], [`MapView`],
//!   [`KeySet`]) which alias the container's array instead of copying it.
//!   See [`order::Comparator`].
//!
//! Maps come in two storage flavors (see [`Core`][crate::core::Core]):
//! parallel key and value arrays ([`EntryKeyed`][crate::core::EntryKeyed]),
//! or values which carry their own key
//! ([`SelfKeyed`][crate::core::SelfKeyed]), which saves the key array
//! altogether.
//!
//! ```
//! use std::ops::Bound::*;
//! use compact_collections::NavigableSet;
//!
//! let mut set: NavigableSet<_> = vec![5, 1, 3, 2, 4].into_iter().collect();
//! assert_eq!(set.to_vec(), [1, 2, 3, 4, 5]);
//! assert_eq!(set.ceiling(&0), Some(&1));
//!
//! // A view restricted to `2..4`, which aliases `set`.
//! let mut view = set.sub_set_mut(Included(2), Excluded(4)).unwrap();
//! assert_eq!(view.to_vec(), [2, 3]);
//! assert!(view.insert(10).is_err());
//!
//! view.parent_mut().remove(&3);
//! assert_eq!(view.to_vec(), [2]);
//! ```
//!
//! # Capacity
//!
//! The backing array grows to `max(required, capacity * 3 / 2)` (see
//! [`grown_capacity`][crate::core::grown_capacity]) and never shrinks on its
//! own. Call `compact()` to shrink it to the number of entries, or
//! `reserve`/`resize` to size it up front.
//!
//! # Views and mutation
//!
//! Views hold a reference to their container, so the borrow checker
//! already rules out modifying a container behind the back of a live view or
//! iterator. A view stores its bounds, not indices: every call recomputes
//! its index window, so changes made through
//! [`parent_mut`][SetView::parent_mut] are reflected by the view right
//! away. Cursors ([`iter::Cursor`], [`iter::EntryCursor`]) are the way to
//! remove entries while walking a container.
//!
//! # `no_std`
//!
//! The crate works without `std` (it needs `alloc`). Disable the default
//! feature `std` to use it in `no_std` environments.

#![no_std]

extern crate alloc;
extern crate no_std_compat as std;

pub mod core;
pub mod iter;
pub mod order;
mod bound;
mod error;
mod list;
mod map;
mod set;

#[cfg(test)]
mod tests;

pub use crate::{
    error::{Error, ErrorKind, Result},
    list::CompactList,
    map::{HashOrderedMap, KeySet, MapView, NavigableMap},
    order::{Comparator, DefaultHashOrder, HashOrder, Natural},
    set::{HashOrderedSet, NavigableSet, SetAlgebra, SetView},
};


/// A hash ordered map with parallel key and value arrays.
pub type EntryKeyedMap<K, V, H = DefaultHashOrder> =
    HashOrderedMap<K, V, crate::core::EntryKeyed<K, V>, H>;

/// A hash ordered map of values which carry their key. `X` derives the key
/// of a value, see [`SelfKey`][crate::core::SelfKey].
pub type SelfKeyedMap<K, V, X, H = DefaultHashOrder> =
    HashOrderedMap<K, V, crate::core::SelfKeyed<V, X>, H>;

/// A navigable map of values which carry their key.
pub type NavigableSelfKeyedMap<K, V, X, O = Natural> =
    NavigableMap<K, V, crate::core::SelfKeyed<V, X>, O>;
