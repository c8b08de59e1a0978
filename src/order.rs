//! Order strategies: how containers place their entries in the array.
//!
//! Hash ordered containers take a [`HashOrder`] (an order key plus an
//! identity predicate), navigable containers take a [`Comparator`] (a total
//! order). Both are plain values injected at construction time.

use std::{
    cmp::Ordering,
    fmt,
    hash::{BuildHasher, BuildHasherDefault, Hash},
};


/// Order key and identity predicate of hash ordered containers.
///
/// Entries are sorted by `hash`. Entries with the same hash form a run in
/// which `equals` finds the exact one. `equals(a, b)` has to imply
/// `hash(a) == hash(b)`.
pub trait HashOrder<T: ?Sized> {
    fn hash(&self, item: &T) -> u64;
    fn equals(&self, a: &T, b: &T) -> bool;
}

/// [`HashOrder`] for `T: Hash + Eq`, hashing with the hasher built by `S`.
#[derive(Clone, Copy, Default)]
pub struct BuildHasherOrder<S>(pub S);

impl<S> BuildHasherOrder<S> {
    /// Creates an order which hashes with hashers built by `build_hasher` and
    /// compares with `Eq`.
    pub fn new(build_hasher: S) -> Self {
        Self(build_hasher)
    }
}

impl<T, S> HashOrder<T> for BuildHasherOrder<S>
where
    T: Hash + Eq + ?Sized,
    S: BuildHasher,
{
    fn hash(&self, item: &T) -> u64 {
        self.0.hash_one(item)
    }

    fn equals(&self, a: &T, b: &T) -> bool {
        a == b
    }
}

impl<S> fmt::Debug for BuildHasherOrder<S> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("BuildHasherOrder")
    }
}

/// The hash order used when none is given: `ahash` with fixed keys, so the
/// iteration order of a hash ordered container is the same in every run.
pub type DefaultHashOrder = BuildHasherOrder<BuildHasherDefault<ahash::AHasher>>;

/// [`HashOrder`] from two closures.
#[derive(Clone, Copy)]
pub struct FnHashOrder<H, E> {
    hash: H,
    equals: E,
}

impl<H, E> FnHashOrder<H, E> {
    /// Creates an order from a hash function and an equality function.
    pub fn new<T: ?Sized>(hash: H, equals: E) -> Self
    where
        H: Fn(&T) -> u64,
        E: Fn(&T, &T) -> bool,
    {
        Self { hash, equals }
    }
}

impl<T, H, E> HashOrder<T> for FnHashOrder<H, E>
where
    T: ?Sized,
    H: Fn(&T) -> u64,
    E: Fn(&T, &T) -> bool,
{
    fn hash(&self, item: &T) -> u64 {
        (self.hash)(item)
    }

    fn equals(&self, a: &T, b: &T) -> bool {
        (self.equals)(a, b)
    }
}

impl<H, E> fmt::Debug for FnHashOrder<H, E> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("FnHashOrder { .. }")
    }
}


/// A total order for navigable containers.
///
/// Two entries comparing `Equal` are the same entry as far as the container
/// is concerned. Any `Fn(&T, &T) -> Ordering` is a comparator.
pub trait Comparator<T: ?Sized> {
    fn compare(&self, a: &T, b: &T) -> Ordering;
}

/// The `Ord` order of `T`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Natural;

impl<T: Ord + ?Sized> Comparator<T> for Natural {
    fn compare(&self, a: &T, b: &T) -> Ordering {
        a.cmp(b)
    }
}

impl<T: ?Sized, F: Fn(&T, &T) -> Ordering> Comparator<T> for F {
    fn compare(&self, a: &T, b: &T) -> Ordering {
        self(a, b)
    }
}

/// The inverse of the wrapped comparator.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Reversed<C>(pub C);

impl<T: ?Sized, C: Comparator<T>> Comparator<T> for Reversed<C> {
    fn compare(&self, a: &T, b: &T) -> Ordering {
        self.0.compare(b, a)
    }
}

/// The comparator in effect for a view: the container's comparator, inverted
/// if the view is descending.
pub struct Directed<'a, C> {
    inner: &'a C,
    descending: bool,
}

impl<'a, C> Directed<'a, C> {
    pub(crate) fn new(inner: &'a C, descending: bool) -> Self {
        Self { inner, descending }
    }

    /// Returns `true` if this inverts the container's comparator.
    pub fn is_descending(&self) -> bool {
        self.descending
    }
}

impl<T: ?Sized, C: Comparator<T>> Comparator<T> for Directed<'_, C> {
    fn compare(&self, a: &T, b: &T) -> Ordering {
        if self.descending {
            self.inner.compare(b, a)
        } else {
            self.inner.compare(a, b)
        }
    }
}

impl<C> Clone for Directed<'_, C> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<C> Copy for Directed<'_, C> {}

impl<C: fmt::Debug> fmt::Debug for Directed<'_, C> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Directed")
            .field("inner", self.inner)
            .field("descending", &self.descending)
            .finish()
    }
}
