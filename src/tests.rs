use std::prelude::v1::*;
use std::{
    collections::{BTreeMap, BTreeSet},
    hash::{Hash, Hasher},
    ops::Bound::{self, *},
    sync::atomic::{AtomicIsize, Ordering as AtomicOrdering},
};
use quickcheck_macros::quickcheck;

use crate::{
    CompactList, EntryKeyedMap, Error, ErrorKind, HashOrderedMap, HashOrderedSet,
    NavigableMap, NavigableSelfKeyedMap, NavigableSet, SelfKeyedMap, SetAlgebra,
    core::{EntryKeyed, KeyFns, SelfKey},
    order::{Comparator, FnHashOrder, Reversed},
};


macro_rules! assert_panic {
    ($($body:tt)*) => {{
        let res = std::panic::catch_unwind(|| {
            $($body)*
        });
        if let Ok(x) = res {
            panic!(
                "expected panic for '{}', but got '{:?}' ",
                stringify!($($body)*),
                x,
            );
        }
    }}
}

macro_rules! assert_err {
    ($expr:expr, $kind:ident $(,)*) => {{
        match $expr {
            Ok(x) => panic!(
                "expected error of kind {} for '{}', but got '{:?}'",
                stringify!($kind),
                stringify!($expr),
                x,
            ),
            Err(e) => assert_eq!(
                e.kind(),
                ErrorKind::$kind,
                "wrong error kind for '{}': {}",
                stringify!($expr),
                e,
            ),
        }
    }};
}

/// Checks length, iteration in both directions, exact size hints and
/// membership of a set, set view or key set.
macro_rules! assert_set_eq {
    ($left:expr, [] $(,)*) => {{
        let set = &$left;
        assert_eq!(set.len(), 0, "len check failed");
        assert!(set.is_empty(), "is_empty check failed");
        assert!(set.iter().next().is_none());
        assert!(set.iter().next_back().is_none());
        assert_eq!(set.iter().size_hint(), (0, Some(0)));
    }};
    ($left:expr, [$($item:expr),* $(,)*] $(,)*) => {{
        let set = &$left;
        let expected: Vec<_> = vec![$($item),*];
        let reversed = expected.iter().rev().cloned().collect::<Vec<_>>();

        assert_eq!(set.len(), expected.len(), "len check failed");
        assert_eq!(set.is_empty(), expected.is_empty(), "is_empty check failed");

        assert_eq!(set.iter().cloned().collect::<Vec<_>>(), expected);
        assert_eq!(set.iter().rev().cloned().collect::<Vec<_>>(), reversed);
        assert_eq!(set.iter().len(), expected.len());
        assert_eq!(set.iter().size_hint(), (expected.len(), Some(expected.len())));

        for item in &expected {
            assert!(set.contains(item), "contains check failed for {:?}", item);
        }
    }};
}

fn naturals(range: std::ops::RangeInclusive<i32>) -> NavigableSet<i32> {
    range.collect()
}

#[derive(Clone, Debug, PartialEq)]
struct User {
    id: u32,
    name: &'static str,
}

#[derive(Clone, Copy, Default)]
struct UserId;

impl SelfKey<u32, User> for UserId {
    fn key<'a>(&self, user: &'a User) -> &'a u32 {
        &user.id
    }

    fn with_key(&self, id: u32, user: User) -> User {
        User { id, ..user }
    }
}

fn user(id: u32, name: &'static str) -> User {
    User { id, name }
}


// ===========================================================================
// ===== Sets
// ===========================================================================

#[test]
fn navigable_set_sorts_and_navigates() {
    let set: NavigableSet<_> = vec![5, 1, 3, 2, 4].into_iter().collect();
    assert_set_eq!(set, [1, 2, 3, 4, 5]);

    assert_eq!(set.floor(&3), Some(&3));
    assert_eq!(set.higher(&3), Some(&4));
    assert_eq!(set.lower(&1), None);
    assert_eq!(set.ceiling(&3), Some(&3));
    assert_eq!(set.ceiling(&6), None);
    assert_eq!(set.floor(&0), None);
    assert_eq!(set.lower(&10), Some(&5));
    assert_eq!(set.higher(&-3), Some(&1));

    assert_eq!(set.first(), Ok(&1));
    assert_eq!(set.last(), Ok(&5));
    assert_eq!(format!("{:?}", set), "{1, 2, 3, 4, 5}");
}

#[test]
fn navigable_set_insert_remove_poll() {
    let mut set = NavigableSet::new();
    assert_set_eq!(set, []);
    assert_err!(set.first(), NoSuchElement);
    assert_err!(set.last(), NoSuchElement);
    assert_eq!(set.poll_first(), None);
    assert_eq!(set.poll_last(), None);

    assert!(set.insert(20));
    assert!(set.insert(10));
    assert!(set.insert(30));
    assert!(!set.insert(20));
    assert_set_eq!(set, [10, 20, 30]);

    assert_eq!(set.remove(&15), None);
    assert_eq!(set.remove(&20), Some(20));
    assert_set_eq!(set, [10, 30]);

    assert_eq!(set.poll_last(), Some(30));
    assert_eq!(set.poll_first(), Some(10));
    assert!(set.is_empty());
}

#[test]
fn navigable_set_with_comparator() {
    let mut set = NavigableSet::with_comparator(Reversed(crate::Natural));
    set.extend(vec![1, 4, 2, 3]);
    assert_eq!(set.to_vec(), [4, 3, 2, 1]);
    assert_eq!(set.first(), Ok(&4));
    assert_eq!(set.higher(&3), Some(&2));

    let mut by_len = NavigableSet::with_comparator(|a: &&str, b: &&str| a.len().cmp(&b.len()));
    assert!(by_len.insert("ccc"));
    assert!(by_len.insert("a"));
    assert!(!by_len.insert("b"));
    assert_eq!(by_len.replace("b"), Some("a"));
    assert_eq!(by_len.to_vec(), ["b", "ccc"]);
}

#[test]
fn hash_set_basics() {
    let mut set = HashOrderedSet::new();
    assert!(set.is_empty());
    for word in ["apple", "pear", "plum", "fig"] {
        assert!(set.insert(word));
    }
    assert!(!set.insert("pear"));
    assert_eq!(set.len(), 4);

    assert!(set.contains(&"fig"));
    assert_eq!(set.get(&"plum"), Some(&"plum"));
    assert_eq!(set.remove(&"plum"), Some("plum"));
    assert_eq!(set.remove(&"plum"), None);
    assert!(!set.contains(&"plum"));

    let other: HashOrderedSet<_> = vec!["fig", "pear", "apple"].into_iter().collect();
    assert_eq!(set, other);

    let mut sorted = set.to_vec();
    sorted.sort();
    assert_eq!(sorted, ["apple", "fig", "pear"]);

    set.clear();
    assert!(set.is_empty());
    assert_eq!(set.capacity(), 4);
}

#[test]
fn hash_set_collisions() {
    // All strings of the same length collide.
    let mut set = HashOrderedSet::with_order(FnHashOrder::new(
        |s: &String| s.len() as u64,
        |a: &String, b: &String| a == b,
    ));

    for s in ["abc", "xyz", "pqr", "z", "longer"] {
        assert!(set.insert(s.to_string()));
    }
    assert!(!set.insert("xyz".to_string()));
    assert_eq!(set.len(), 5);

    assert_eq!(set.remove(&"xyz".to_string()), Some("xyz".to_string()));
    assert!(set.contains(&"abc".to_string()));
    assert!(set.contains(&"pqr".to_string()));
    assert!(!set.contains(&"xyz".to_string()));
    assert!(!set.contains(&"aaa".to_string()));

    // Hash order: the run of length 3 sits between "z" and "longer".
    let lens = set.iter().map(|s| s.len()).collect::<Vec<_>>();
    assert_eq!(lens, [1, 3, 3, 6]);
}

#[test]
fn set_algebra() {
    let mut set = naturals(1..=6);
    assert!(set.contains_all(&[1, 2, 6]));
    assert!(!set.contains_all(&[1, 7]));

    assert!(set.remove_all(&[2, 4, 8]));
    assert!(!set.remove_all(&[2]));
    assert_set_eq!(set, [1, 3, 5, 6]);

    let keep: HashOrderedSet<_> = vec![1, 5, 6, 9].into_iter().collect();
    assert!(set.retain_all(&keep));
    assert!(!set.retain_all(&keep));
    assert_set_eq!(set, [1, 5, 6]);

    assert_eq!(set.add_all(vec![2, 5]), Ok(true));
    assert_eq!(set.add_all(vec![2, 5]), Ok(false));
    assert_set_eq!(set, [1, 2, 5, 6]);
}

#[test]
fn bulk_insert_through_view_is_all_or_nothing() {
    let mut set: NavigableSet<_> = vec![1, 5, 10].into_iter().collect();
    {
        let mut view = set.sub_set_mut(Included(1), Included(6)).unwrap();
        assert_err!(view.add_all(vec![2, 3, 7]), InvalidArgument);
        assert_eq!(view.parent().len(), 3);

        assert_eq!(view.add_all(vec![2, 3]), Ok(true));
        assert_eq!(view.check_insert(&6), Ok(()));
        assert_err!(view.check_insert(&7), InvalidArgument);
    }
    assert_set_eq!(set, [1, 2, 3, 5, 10]);
}


// ===========================================================================
// ===== Set views
// ===========================================================================

#[test]
fn sub_set_bounds() {
    let mut set = naturals(1..=5);

    assert_set_eq!(set.sub_set(Included(2), Excluded(4)).unwrap(), [2, 3]);
    assert_set_eq!(set.sub_set(Excluded(2), Included(4)).unwrap(), [3, 4]);
    assert_set_eq!(set.sub_set(Excluded(3), Excluded(3)).unwrap(), []);
    assert_set_eq!(set.head_set(Excluded(3)), [1, 2]);
    assert_set_eq!(set.head_set(Included(3)), [1, 2, 3]);
    assert_set_eq!(set.tail_set(Excluded(3)), [4, 5]);
    assert_set_eq!(set.tail_set(Included(0)), [1, 2, 3, 4, 5]);

    assert_err!(set.sub_set(Included(4), Included(2)), InvalidArgument);
    assert_eq!(set.sub_set(Included(4), Included(2)).unwrap_err(), Error::InvertedBounds);

    let mut view = set.sub_set_mut(Included(2), Excluded(4)).unwrap();
    assert_eq!(view.insert(3), Ok(false));
    assert_eq!(view.insert(10), Err(Error::OutOfRange));
    assert_err!(view.insert(4), InvalidArgument);
    assert_eq!(view.remove(&5), None);
    assert_eq!(view.parent().len(), 5);

    assert_eq!(view.first(), Ok(&2));
    assert_eq!(view.last(), Ok(&3));
    assert_eq!(view.floor(&10), Some(&3));
    assert_eq!(view.ceiling(&0), Some(&2));
    assert_eq!(view.higher(&3), None);
    assert_eq!(view.lower(&2), None);
    assert_eq!(view.get(&5), None);
    assert_eq!(view.get(&3), Some(&3));
}

#[test]
fn views_alias_the_parent() {
    let mut set = naturals(1..=5);
    {
        let mut view = set.sub_set_mut(Included(2), Included(4)).unwrap();

        view.parent_mut().insert(10);
        view.parent_mut().remove(&3);
        assert_set_eq!(view, [2, 4]);

        view.parent_mut().insert(3);
        assert_eq!(view.len(), 3);
        assert!(view.contains(&3));
        assert!(!view.contains(&10));

        assert_eq!(view.poll_last(), Some(4));
        assert_eq!(view.poll_first(), Some(2));
        view.clear();
        assert!(view.is_empty());
        assert_err!(view.first(), NoSuchElement);
    }
    assert_set_eq!(set, [1, 5, 10]);
}

#[test]
fn views_over_borrowed_comparator_and_values() {
    let weights = vec![3, 1, 2, 0];
    let by_weight = |a: &usize, b: &usize| weights[*a].cmp(&weights[*b]);
    let mut set = NavigableSet::with_comparator(by_weight);
    set.extend(0..4);
    assert_eq!(set.to_vec(), [3, 1, 2, 0]);

    let view = set.sub_set(Included(1), Included(0)).unwrap();
    assert_eq!(view.first(), Ok(&1));
    assert_eq!(view.get(&2), Some(&2));
    assert_eq!(view.get(&3), None);
    assert_eq!(view.iter().copied().collect::<Vec<_>>(), [1, 2, 0]);
    assert_eq!(view.descending().first(), Ok(&0));

    let names = vec!["ada".to_string(), "bob".to_string(), "cy".to_string()];
    let mut map = NavigableMap::new();
    for (i, name) in names.iter().enumerate() {
        map.insert(i, name.as_str());
    }

    let mut sub = map.sub_map_mut(Included(1), Unbounded).unwrap();
    assert_eq!(sub.get(&1), Some(&"bob"));
    assert_eq!(sub.first_entry(), Ok((&1, &"bob")));
    assert_eq!(sub.values().copied().collect::<Vec<_>>(), ["bob", "cy"]);
    {
        let keys = sub.reborrow().key_set();
        assert_eq!(keys.iter().copied().collect::<Vec<_>>(), [1, 2]);
        assert_eq!(keys.higher(&1), Some(&2));
    }
    assert_err!(sub.insert(0, "zed"), InvalidArgument);
    assert_eq!(sub.insert(2, names[0].as_str()), Ok(Some("cy")));
    assert_eq!(map.values().copied().collect::<Vec<_>>(), ["ada", "bob", "ada"]);
}

#[test]
fn descending_view() {
    let set = naturals(1..=5);
    let desc = set.descending_set();
    assert!(desc.is_descending());
    assert_set_eq!(desc, [5, 4, 3, 2, 1]);

    assert_eq!(desc.first(), Ok(&5));
    assert_eq!(desc.last(), Ok(&1));
    assert_eq!(desc.lower(&3), Some(&4));
    assert_eq!(desc.higher(&3), Some(&2));
    assert_eq!(desc.floor(&3), Some(&3));
    assert_eq!(desc.ceiling(&3), Some(&3));
    assert_eq!(desc.floor(&0), Some(&1));
    assert_eq!(desc.ceiling(&6), Some(&5));
    assert_eq!(desc.lower(&5), None);
    assert_eq!(desc.higher(&1), None);
    assert_eq!(desc.comparator().compare(&1, &2), std::cmp::Ordering::Greater);

    let sub = desc.sub_set(Included(4), Excluded(1)).unwrap();
    assert_set_eq!(sub, [4, 3, 2]);

    assert_err!(set.descending_set().sub_set(Included(1), Included(4)), InvalidArgument);
    assert_set_eq!(set.descending_set().head_set(Excluded(3)).unwrap(), [5, 4]);
    assert_set_eq!(set.descending_set().tail_set(Included(2)).unwrap(), [2, 1]);

    // Reversing twice is ascending again.
    assert_set_eq!(set.descending_set().descending(), [1, 2, 3, 4, 5]);
}

#[test]
fn nested_views_keep_the_narrower_window() {
    let set = naturals(1..=10);
    let view = set.sub_set(Included(3), Excluded(8)).unwrap();
    assert_set_eq!(view, [3, 4, 5, 6, 7]);

    // Bounds outside of the view.
    assert_err!(view.reborrow().sub_set(Included(2), Unbounded), InvalidArgument);
    assert_err!(view.reborrow().sub_set(Unbounded, Included(8)), InvalidArgument);
    assert_err!(view.reborrow().tail_set(Excluded(9)), InvalidArgument);
    assert_eq!(
        view.reborrow().sub_set(Included(2), Unbounded).unwrap_err(),
        Error::BoundOutOfRange,
    );

    // Exclusive bounds may sit on the view's own bounds.
    assert_set_eq!(view.reborrow().sub_set(Excluded(3), Excluded(8)).unwrap(), [4, 5, 6, 7]);
    assert_set_eq!(view.reborrow().sub_set(Excluded(3), Included(7)).unwrap(), [4, 5, 6, 7]);

    // Unbounded sides inherit.
    assert_set_eq!(view.reborrow().tail_set(Included(5)).unwrap(), [5, 6, 7]);
    assert_set_eq!(view.reborrow().head_set(Included(4)).unwrap(), [3, 4]);

    let inner = view.sub_set(Included(4), Included(6)).unwrap();
    assert_set_eq!(inner, [4, 5, 6]);
    assert_err!(inner.sub_set(Included(4), Included(7)), InvalidArgument);
}

#[test]
fn read_only_view_iteration() {
    let set = naturals(1..=9);
    let view = set.sub_set(Excluded(2), Excluded(7)).unwrap();

    let mut iter = view.iter();
    assert_eq!(iter.len(), 4);
    assert_eq!(iter.next(), Some(&3));
    assert_eq!(iter.next_back(), Some(&6));
    assert_eq!(iter.len(), 2);
    assert_eq!(iter.last(), Some(&5));

    assert_eq!((&view).into_iter().count(), 4);
    assert_eq!(format!("{:?}", view), "{3, 4, 5, 6}");
}


// ===========================================================================
// ===== Cursors
// ===========================================================================

#[test]
fn cursor_removes_while_walking() {
    let mut set = naturals(1..=10);
    {
        let mut cursor = set.cursor();
        assert_eq!(cursor.current(), None);
        assert_eq!(cursor.remove(), None);

        let mut seen = Vec::new();
        while let Some(&x) = cursor.advance() {
            seen.push(x);
            if x % 3 == 0 {
                assert_eq!(cursor.remove(), Some(x));
                assert_eq!(cursor.remove(), None);
                assert_eq!(cursor.current(), None);
            }
        }
        assert_eq!(seen, (1..=10).collect::<Vec<_>>());
        assert_eq!(cursor.remaining(), 0);
    }
    assert_set_eq!(set, [1, 2, 4, 5, 7, 8, 10]);
}

#[test]
fn descending_view_cursor() {
    let mut set = naturals(1..=10);
    {
        let mut view = set.sub_set_mut(Included(3), Included(8)).unwrap().descending();
        let mut cursor = view.cursor();
        let mut seen = Vec::new();
        while let Some(&x) = cursor.advance() {
            seen.push(x);
            if x % 2 == 0 {
                assert_eq!(cursor.remove(), Some(x));
            }
        }
        assert_eq!(seen, [8, 7, 6, 5, 4, 3]);
    }
    assert_set_eq!(set, [1, 2, 3, 5, 7, 9, 10]);

    set.sub_set_mut(Included(2), Included(9)).unwrap().retain(|&x| x > 4);
    assert_set_eq!(set, [1, 5, 7, 9, 10]);
}

#[test]
fn hash_set_cursor_and_retain() {
    let mut set: HashOrderedSet<u32> = (0..20).collect();
    set.retain(|x| x % 2 == 0);
    assert_eq!(set.len(), 10);
    assert!((0..20).all(|x| set.contains(&x) == (x % 2 == 0)));

    let mut cursor = set.cursor();
    let mut removed = 0;
    while cursor.advance().is_some() {
        cursor.remove();
        removed += 1;
    }
    assert_eq!(removed, 10);
    assert!(set.is_empty());
}


// ===========================================================================
// ===== Maps
// ===========================================================================

#[test]
fn navigable_map_replaces_values() {
    let mut map = NavigableMap::new();
    assert_eq!(map.insert("b", 2), None);
    assert_eq!(map.insert("a", 1), None);
    assert_eq!(map.insert("a", 3), Some(1));

    assert_eq!(map.len(), 2);
    assert_eq!(map.get(&"a"), Some(&3));
    assert_eq!(map.keys().collect::<Vec<_>>(), [&"a", &"b"]);
    assert_eq!(map.values().collect::<Vec<_>>(), [&3, &2]);
    assert!(map.contains_key(&"b"));
    assert!(map.contains_value(&3));
    assert!(!map.contains_value(&1));
    assert_eq!(format!("{:?}", map), r#"{"a": 3, "b": 2}"#);
}

#[test]
fn hash_map_replaces_values() {
    let mut map = EntryKeyedMap::new();
    assert_eq!(map.insert("a", 1), None);
    assert_eq!(map.insert("b", 2), None);
    assert_eq!(map.insert("a", 3), Some(1));

    assert_eq!(map.len(), 2);
    assert_eq!(map.get(&"a"), Some(&3));
    assert_eq!(map.get_key_value(&"b"), Some((&"b", &2)));
    assert_eq!(map.get(&"c"), None);

    *map.get_mut(&"b").unwrap() += 10;
    assert_eq!(map.remove(&"b"), Some(12));
    assert_eq!(map.remove(&"b"), None);
    assert_eq!(map.remove_entry(&"a"), Some(("a", 3)));
    assert!(map.is_empty());
}

#[test]
fn hash_map_collisions() {
    let mut map = HashOrderedMap::with_core(
        EntryKeyed::new(),
        FnHashOrder::new(|k: &u32| u64::from(*k % 4), |a: &u32, b: &u32| a == b),
    );
    for k in 0..16 {
        assert_eq!(map.insert(k, k * 100), None);
    }
    assert_eq!(map.remove(&5), Some(500));
    assert_eq!(map.remove(&9), Some(900));
    for k in 0..16 {
        let expected = if k == 5 || k == 9 { None } else { Some(k * 100) };
        assert_eq!(map.get(&k).copied(), expected);
    }

    map.retain(|k, _| k % 4 != 1);
    assert_eq!(map.len(), 12);
    assert!(map.keys().all(|k| k % 4 != 1));
}

#[test]
fn poll_first_entry() {
    let mut map: NavigableMap<&str, i32> = NavigableMap::new();
    assert_eq!(map.poll_first_entry(), None);
    assert_eq!(map.poll_last_entry(), None);
    assert_err!(map.first_key(), NoSuchElement);
    assert_err!(map.last_entry(), NoSuchElement);

    map.insert("a", 1);
    assert_eq!(map.poll_first_entry(), Some(("a", 1)));
    assert!(map.is_empty());
}

#[test]
fn navigable_map_navigation() {
    let map: NavigableMap<_, _> = vec![(10, 'a'), (20, 'b'), (30, 'c')].into_iter().collect();

    assert_eq!(map.first_entry(), Ok((&10, &'a')));
    assert_eq!(map.last_key(), Ok(&30));
    assert_eq!(map.lower_key(&20), Some(&10));
    assert_eq!(map.floor_key(&25), Some(&20));
    assert_eq!(map.ceiling_key(&25), Some(&30));
    assert_eq!(map.higher_key(&30), None);
    assert_eq!(map.lower_entry(&10), None);
    assert_eq!(map.floor_entry(&20), Some((&20, &'b')));
    assert_eq!(map.ceiling_entry(&5), Some((&10, &'a')));
    assert_eq!(map.higher_entry(&10), Some((&20, &'b')));
}

#[test]
fn sub_maps() {
    let mut map: NavigableMap<_, _> = (1..=8).map(|i| (i, i * 10)).collect();

    {
        let sub = map.sub_map(Included(3), Excluded(6)).unwrap();
        assert_eq!(sub.len(), 3);
        assert_eq!(sub.keys().copied().collect::<Vec<_>>(), [3, 4, 5]);
        assert_eq!(sub.values().copied().collect::<Vec<_>>(), [30, 40, 50]);
        assert_eq!(sub.get(&7), None);
        assert_eq!(sub.get(&4), Some(&40));
        assert!(!sub.contains_key(&6));
        assert_eq!(sub.first_entry(), Ok((&3, &30)));
        assert_eq!(sub.last_key(), Ok(&5));
        assert_eq!(sub.floor_key(&10), Some(&5));
        assert_eq!(sub.ceiling_entry(&0), Some((&3, &30)));
        assert_eq!(format!("{:?}", sub), "{3: 30, 4: 40, 5: 50}");

        let desc = sub.descending();
        assert_eq!(desc.iter().map(|(&k, _)| k).collect::<Vec<_>>(), [5, 4, 3]);
        assert_eq!(desc.lower_key(&4), Some(&5));
        assert_eq!(desc.higher_entry(&4), Some((&3, &30)));
        assert_err!(desc.tail_map(Included(6)), InvalidArgument);
    }

    assert_err!(map.sub_map(Included(6), Included(3)), InvalidArgument);
    assert_eq!(map.head_map(Excluded(3)).len(), 2);
    assert_eq!(map.tail_map(Excluded(3)).len(), 5);
    assert_eq!(map.descending_map().first_key(), Ok(&8));

    {
        let mut sub = map.tail_map_mut(Included(5));
        assert_eq!(sub.insert(6, 66), Ok(Some(60)));
        assert_eq!(sub.insert(9, 90), Ok(None));
        assert_eq!(sub.insert(1, 11), Err(Error::OutOfRange));
        assert_eq!(sub.remove(&2), None);
        assert_eq!(sub.remove(&7), Some(70));
        assert_eq!(sub.get_mut(&1), None);
        *sub.get_mut(&5).unwrap() += 5;
        for value in sub.values_mut() {
            *value += 1;
        }
        assert_eq!(sub.poll_last_entry(), Some((9, 91)));

        sub.parent_mut().insert(100, 1000);
        assert_eq!(sub.last_key(), Ok(&100));
    }
    assert_eq!(
        map.iter().map(|(&k, &v)| (k, v)).collect::<Vec<_>>(),
        [(1, 10), (2, 20), (3, 30), (4, 40), (5, 56), (6, 67), (8, 81), (100, 1000)],
    );

    map.head_map_mut(Excluded(4)).clear();
    map.sub_map_mut(Included(5), Included(8)).unwrap().retain(|k, _| k % 2 == 0);
    assert_eq!(map.keys().copied().collect::<Vec<_>>(), [4, 6, 8, 100]);
}

#[test]
fn map_cursor() {
    let mut map: NavigableMap<_, _> = (1..=6).map(|i| (i, i * i)).collect();
    {
        let mut cursor = map.cursor();
        while let Some((&k, _)) = cursor.advance() {
            if k % 3 == 0 {
                assert!(cursor.remove().is_some());
                assert_eq!(cursor.value_mut(), None);
            } else {
                *cursor.value_mut().unwrap() += 1;
            }
        }
    }
    assert_eq!(
        map.iter().map(|(&k, &v)| (k, v)).collect::<Vec<_>>(),
        [(1, 2), (2, 5), (4, 17), (5, 26)],
    );

    let mut desc = map.descending_map_mut();
    let mut cursor = desc.cursor();
    assert_eq!(cursor.advance(), Some((&5, &26)));
    assert_eq!(cursor.remove(), Some((5, 26)));
    assert_eq!(cursor.advance(), Some((&4, &17)));
    assert_eq!(cursor.remaining(), 2);
}

#[test]
fn key_sets() {
    let mut map: NavigableMap<_, _> = (1..=6).map(|i| (i, i.to_string())).collect();

    {
        let keys = map.key_set();
        assert_set_eq!(keys, [1, 2, 3, 4, 5, 6]);
        assert_eq!(keys.first(), Ok(&1));
        assert_eq!(keys.lower(&1), None);
        assert_eq!(keys.ceiling(&7), None);
        assert_eq!(keys.floor(&7), Some(&6));
        assert_eq!(format!("{:?}", keys), "{1, 2, 3, 4, 5, 6}");
    }
    assert_set_eq!(map.descending_key_set(), [6, 5, 4, 3, 2, 1]);
    assert_eq!(map.descending_key_set().higher(&3), Some(&2));

    {
        let mut keys = map.key_set_mut().sub_set(Excluded(2), Unbounded).unwrap();
        assert!(keys.contains_all(&[3, 6]));
        assert!(!keys.contains_all(&[2, 3]));
        assert!(!keys.remove(&2));
        assert!(keys.remove(&3));
        assert_eq!(keys.poll_first(), Some((4, "4".to_string())));
        assert_err!(keys.insert(9), UnsupportedOperation);
        keys.retain(|&k| k != 6);
        assert_set_eq!(keys, [5]);
        assert!(keys.remove_all(&[1, 5]));
    }
    assert_eq!(map.keys().copied().collect::<Vec<_>>(), [1, 2]);
    assert_eq!(map.get(&2).map(|s| s.as_str()), Some("2"));
}

#[test]
fn key_set_algebra() {
    let mut map: NavigableMap<_, _> = (1..=8).map(|i| (i, i * 10)).collect();

    {
        let mut keys = map.key_set_mut().descending();
        assert!(keys.remove_all(&[2, 3, 9]));
        assert!(!keys.remove_all(&[2, 9]));
        assert_set_eq!(keys, [8, 7, 6, 5, 4, 1]);

        let keep: NavigableSet<_> = vec![1, 4, 5, 7].into_iter().collect();
        assert!(keys.retain_all(&keep));
        assert!(!keys.retain_all(&keep));
        assert_set_eq!(keys, [7, 5, 4, 1]);

        assert_eq!(keys.add_all(Vec::new()), Ok(false));
        assert_err!(keys.add_all(vec![7]), UnsupportedOperation);
        assert_err!(keys.check_insert(&2), UnsupportedOperation);
    }

    {
        // Bulk removal through a bounded key set leaves the rest alone.
        let mut keys = map.key_set_mut().head_set(Excluded(5)).unwrap();
        assert!(keys.remove_all(&[1, 5, 7]));
        assert_set_eq!(keys, [4]);
    }

    assert_eq!(map.iter().map(|(&k, &v)| (k, v)).collect::<Vec<_>>(), [(4, 40), (5, 50), (7, 70)]);
}

#[test]
fn self_keyed_maps() {
    let mut users = SelfKeyedMap::with_keys(UserId);
    assert_eq!(users.insert_value(user(3, "c")), None);
    assert_eq!(users.insert(1, user(0, "a")), None);
    assert_eq!(users.get(&1), Some(&user(1, "a")));
    assert_eq!(users.insert_value(user(3, "cc")), Some(user(3, "c")));
    assert_eq!(users.len(), 2);

    assert_eq!(users.extract_key(&user(9, "x")), Ok(&9));
    assert_eq!(users.inject_key(5, user(0, "y")), Ok(user(5, "y")));

    assert_eq!(users.remove(&3), Some(user(3, "cc")));
    assert_eq!(users.remove_entry(&1), Some(user(1, "a")));
    assert!(users.is_empty());
}

#[test]
fn navigable_self_keyed_map() {
    let mut users: NavigableSelfKeyedMap<u32, User, UserId> = NavigableMap::with_keys(UserId);
    users.insert_value(user(20, "b"));
    users.insert_value(user(10, "a"));
    users.insert(30, user(0, "c"));

    assert_eq!(users.keys().copied().collect::<Vec<_>>(), [10, 20, 30]);
    assert_eq!(users.get(&30).map(|u| u.id), Some(30));
    assert_eq!(users.floor_entry(&25), Some((&20, &user(20, "b"))));
    assert_eq!(users.poll_last_entry(), Some(user(30, "c")));

    let mut sub = users.sub_map_mut(Included(15), Unbounded).unwrap();
    assert_eq!(sub.insert(25, user(0, "d")), Ok(None));
    assert_err!(sub.insert(5, user(0, "e")), InvalidArgument);
    assert_eq!(sub.poll_first_entry(), Some(user(20, "b")));
    assert_eq!(users.values().map(|u| u.name).collect::<Vec<_>>(), ["a", "d"]);
}

#[test]
fn key_fns_storage() {
    let keys = KeyFns::new(|u: &User| &u.id, |id, u: User| User { id, ..u });
    let mut users: SelfKeyedMap<u32, User, _> = SelfKeyedMap::with_keys(keys);
    users.insert(4, user(0, "d"));
    users.insert_value(user(2, "b"));
    assert_eq!(users.get(&4).map(|u| u.id), Some(4));
    assert_eq!(users.len(), 2);
}

#[test]
fn entry_keyed_maps_do_not_inject_keys() {
    let map: EntryKeyedMap<&str, i32> = EntryKeyedMap::new();
    assert_err!(map.extract_key(&1), UnsupportedOperation);
    assert_err!(map.inject_key("a", 1), UnsupportedOperation);

    let map: NavigableMap<&str, i32> = NavigableMap::new();
    assert!(matches!(map.extract_key(&1), Err(Error::Unsupported(_))));
}

#[test]
fn map_equality_and_hash() {
    fn hash_of<T: Hash>(value: &T) -> u64 {
        let mut hasher = ahash::AHasher::default();
        value.hash(&mut hasher);
        hasher.finish()
    }

    let a: NavigableMap<_, _> = vec![(1, 'x'), (2, 'y')].into_iter().collect();
    let b: NavigableMap<_, _> = vec![(2, 'y'), (1, 'x')].into_iter().collect();
    assert_eq!(a, b);
    assert_eq!(hash_of(&a), hash_of(&b));

    let c = a.clone();
    assert_eq!(c, a);

    let x: EntryKeyedMap<_, _> = vec![(1, 'x'), (2, 'y')].into_iter().collect();
    let mut y: EntryKeyedMap<_, _> = vec![(2, 'y'), (1, 'x')].into_iter().collect();
    assert_eq!(x, y);
    y.insert(1, 'z');
    assert_ne!(x, y);

    let s = naturals(1..=3);
    assert_eq!(hash_of(&s), hash_of(&s.clone()));
}

#[test]
fn values_of_non_clone_type() {
    #[derive(Debug)]
    struct Tag(u8);

    let map: NavigableMap<_, _> = (1..=3u8).map(|i| (i, Tag(i))).collect();
    let values = map.values();
    assert_eq!(values.clone().map(|t| t.0).collect::<Vec<_>>(), [1, 2, 3]);
    assert_eq!(format!("{:?}", values), "[Tag(1), Tag(2), Tag(3)]");
    assert_eq!(values.len(), 3);

    let desc = map.descending_map();
    assert_eq!(format!("{:?}", desc.values()), "[Tag(3), Tag(2), Tag(1)]");
}

#[test]
fn owned_iteration() {
    let map: NavigableMap<_, _> = vec![(2, "b"), (1, "a")].into_iter().collect();
    assert_eq!(map.into_iter().collect::<Vec<_>>(), [(1, "a"), (2, "b")]);

    let mut users = SelfKeyedMap::with_keys(UserId);
    users.insert_value(user(1, "a"));
    assert_eq!(users.into_iter().collect::<Vec<_>>(), [user(1, "a")]);

    let set = naturals(1..=3);
    let mut iter = set.into_iter();
    assert_eq!(iter.len(), 3);
    assert_eq!(iter.next_back(), Some(3));
    assert_eq!(iter.collect::<Vec<_>>(), [1, 2]);
}


// ===========================================================================
// ===== Capacity
// ===========================================================================

#[test]
fn compact_after_removing_most() {
    let mut set: NavigableSet<u32> = (0..1000).collect();
    assert_eq!(set.capacity(), 1000);

    set.retain(|x| x % 10 == 0);
    assert_eq!(set.len(), 100);
    assert_eq!(set.capacity(), 1000);

    set.compact();
    assert_eq!(set.capacity(), 100);
    assert!(set.contains(&990));
    assert!(set.insert(5));
    assert_eq!(set.floor(&7), Some(&5));
    assert_eq!(set.capacity(), 150);

    let mut map: EntryKeyedMap<u32, u32> = (0..100).map(|i| (i, i)).collect();
    map.retain(|k, _| *k < 10);
    map.compact();
    assert_eq!(map.capacity(), 10);
    assert_eq!(map.get(&9), Some(&9));
}

#[test]
fn capacity_growth() {
    let mut set = NavigableSet::with_capacity_and_comparator(2, crate::Natural);
    let mut caps = Vec::new();
    for i in 0..10 {
        set.insert(i);
        caps.push(set.capacity());
    }
    assert_eq!(caps, [2, 2, 3, 4, 6, 6, 9, 9, 9, 13]);

    assert_err!(set.resize(5), InvalidArgument);
    assert_eq!(set.resize(5).unwrap_err(), Error::CapacityTooSmall { capacity: 5, len: 10 });
    set.resize(20).unwrap();
    assert_eq!(set.capacity(), 20);

    set.clear();
    assert_eq!(set.capacity(), 20);
    set.reserve(3);
    assert_eq!(set.capacity(), 20);
    set.compact();
    assert_eq!(set.capacity(), 0);
}


// ===========================================================================
// ===== Lists
// ===========================================================================

#[test]
fn compact_list() {
    let mut list = CompactList::new();
    list.push('a');
    list.push('e');
    assert_eq!(list.insert(1, 'b'), Ok(()));
    assert_eq!(list.insert_all(2, vec!['c', 'd']), Ok(2));
    assert_eq!(list.as_slice(), &['a', 'b', 'c', 'd', 'e']);

    assert_err!(list.insert(9, 'x'), InvalidArgument);
    assert_err!(list.insert_all(6, vec!['x']), InvalidArgument);
    assert_err!(list.set(5, 'x'), InvalidArgument);
    assert_err!(list.remove(5), InvalidArgument);
    assert_err!(list.remove_range(3, 3), InvalidArgument);

    assert_eq!(list.set(0, 'b'), Ok('a'));
    assert_eq!(list.index_of(&'b'), Some(0));
    assert_eq!(list.last_index_of(&'b'), Some(1));
    assert_eq!(list.index_of(&'z'), None);

    list.remove_range(1, 2).unwrap();
    assert_eq!(list.as_slice(), &['b', 'd', 'e']);
    assert_eq!(list.remove(0), Ok('b'));
    assert_eq!(list.pop(), Some('e'));
    assert_eq!(list[0], 'd');
    list[0] = 'x';
    assert_eq!(format!("{:?}", list), "['x']");

    assert_panic!(list[3]);
}

#[test]
fn compact_list_retain_and_cursor() {
    let mut list: CompactList<_> = (0..10).collect();
    list.retain(|x| x % 3 != 0);
    assert_eq!(list.as_slice(), &[1, 2, 4, 5, 7, 8]);
    assert_eq!(list.capacity(), 10);

    // Duplicates are fine in a list; `retain` keeps the order.
    list.push(1);
    list.retain(|&x| x != 1 && x != 8);
    assert_eq!(list.as_slice(), &[2, 4, 5, 7]);

    let mut cursor = list.cursor();
    assert_eq!(cursor.advance(), Some(&2));
    assert_eq!(cursor.advance(), Some(&4));
    assert_eq!(cursor.remove(), Some(4));
    assert_eq!(cursor.remaining(), 2);
    assert_eq!(cursor.advance(), Some(&5));
    assert_eq!(list.as_slice(), &[2, 5, 7]);
}


// ===========================================================================
// ===== Errors
// ===========================================================================

#[test]
fn error_kinds() {
    assert_eq!(Error::IndexOutOfRange { index: 1, len: 0 }.kind(), ErrorKind::InvalidArgument);
    assert_eq!(
        Error::CountOutOfRange { index: 0, count: 1, len: 0 }.kind(),
        ErrorKind::InvalidArgument,
    );
    assert_eq!(Error::InvertedBounds.kind(), ErrorKind::InvalidArgument);
    assert_eq!(Error::BoundOutOfRange.kind(), ErrorKind::InvalidArgument);
    assert_eq!(Error::OutOfRange.kind(), ErrorKind::InvalidArgument);
    assert_eq!(Error::NoSuchElement.kind(), ErrorKind::NoSuchElement);
    assert_eq!(Error::Unsupported("x").kind(), ErrorKind::UnsupportedOperation);

    assert_eq!(Error::NoSuchElement.to_string(), "no such element");
    assert_eq!(
        Error::IndexOutOfRange { index: 3, len: 2 }.to_string(),
        "index 3 out of range for length 2",
    );
}


// ===========================================================================
// ===== Drop
// ===========================================================================

#[test]
fn correct_drop() {
    static ALIVE_COUNT: AtomicIsize = AtomicIsize::new(0);

    struct Dummy(char);
    impl Dummy {
        fn new(c: char) -> Self {
            ALIVE_COUNT.fetch_add(1, AtomicOrdering::SeqCst);
            Self(c)
        }
    }
    impl Drop for Dummy {
        fn drop(&mut self) {
            ALIVE_COUNT.fetch_sub(1, AtomicOrdering::SeqCst);
        }
    }
    impl Clone for Dummy {
        fn clone(&self) -> Self {
            Self::new(self.0)
        }
    }

    let alive = || ALIVE_COUNT.load(AtomicOrdering::SeqCst);

    let mut set = NavigableSet::with_comparator(|a: &Dummy, b: &Dummy| a.0.cmp(&b.0));
    for c in "gfedcba".chars() {
        assert!(set.insert(Dummy::new(c)));
    }
    assert_eq!(alive(), 7);

    // The rejected duplicate is dropped.
    assert!(!set.insert(Dummy::new('a')));
    assert_eq!(alive(), 7);

    set.remove(&Dummy::new('c'));
    assert_eq!(alive(), 6);

    set.poll_first();
    assert_eq!(alive(), 5);

    {
        let mut view = set.sub_set_mut(Included(Dummy::new('e')), Unbounded).unwrap();
        assert_eq!(alive(), 6);
        view.clear();
        assert_eq!(alive(), 3);
    }
    assert_eq!(alive(), 2);

    set.retain(|d| d.0 != 'b');
    assert_eq!(alive(), 1);

    {
        let _clone = set.clone();
        assert_eq!(alive(), 2);
    }
    assert_eq!(alive(), 1);

    set.replace(Dummy::new('d'));
    assert_eq!(alive(), 1);

    set.insert(Dummy::new('x'));
    set.insert(Dummy::new('y'));
    assert_eq!(alive(), 3);
    {
        let mut iter = set.into_iter();
        iter.next();
        assert_eq!(alive(), 2);
    }
    assert_eq!(alive(), 0);

    let mut map = NavigableMap::new();
    map.insert(1, Dummy::new('a'));
    map.insert(2, Dummy::new('b'));
    map.insert(1, Dummy::new('c'));
    assert_eq!(alive(), 2);
    map.remove(&2);
    assert_eq!(alive(), 1);
    map.insert(3, Dummy::new('d'));
    map.insert(4, Dummy::new('e'));
    map.head_map_mut(Included(3)).clear();
    assert_eq!(alive(), 1);
    drop(map);
    assert_eq!(alive(), 0);

    let mut list = CompactList::new();
    list.extend("abcdef".chars().map(Dummy::new));
    list.remove_range(1, 3).unwrap();
    assert_eq!(alive(), 3);
    list.insert_all(1, vec![Dummy::new('x'), Dummy::new('y')]).unwrap();
    assert_eq!(alive(), 5);
    list.clear();
    assert_eq!(alive(), 0);
}


// ===========================================================================
// ===== Properties
// ===========================================================================

fn bound_of(value: u8, inclusive: bool) -> Bound<u8> {
    if inclusive {
        Included(value)
    } else {
        Excluded(value)
    }
}

fn in_bounds(x: u8, lo: Bound<u8>, hi: Bound<u8>) -> bool {
    let above = match lo {
        Included(lo) => x >= lo,
        Excluded(lo) => x > lo,
        Unbounded => true,
    };
    let below = match hi {
        Included(hi) => x <= hi,
        Excluded(hi) => x < hi,
        Unbounded => true,
    };
    above && below
}

#[quickcheck]
fn navigable_set_matches_btree_set(ops: Vec<(bool, u8)>) -> bool {
    let mut set = NavigableSet::new();
    let mut model = BTreeSet::new();

    for (insert, x) in ops {
        let same = if insert {
            set.insert(x) == model.insert(x)
        } else {
            set.remove(&x) == model.take(&x)
        };
        if !same {
            return false;
        }
    }

    set.len() == model.len()
        && set.as_slice().windows(2).all(|w| w[0] < w[1])
        && set.iter().eq(model.iter())
        && (0..=u8::MAX).all(|probe| {
            set.contains(&probe) == model.contains(&probe)
                && set.lower(&probe) == model.range(..probe).next_back()
                && set.floor(&probe) == model.range(..=probe).next_back()
                && set.ceiling(&probe) == model.range(probe..).next()
                && set.higher(&probe) == model.range(probe..).find(|&&x| x > probe)
        })
}

#[quickcheck]
fn hash_set_matches_btree_set(ops: Vec<(bool, u16)>) -> bool {
    // Few hash values, so that collision runs are long.
    let mut set = HashOrderedSet::with_order(FnHashOrder::new(
        |x: &u16| u64::from(*x % 7),
        |a: &u16, b: &u16| a == b,
    ));
    let mut model = BTreeSet::new();

    for (insert, x) in ops {
        let same = if insert {
            set.insert(x) == model.insert(x)
        } else {
            set.remove(&x) == model.take(&x)
        };
        if !same {
            return false;
        }
    }

    let mut items = set.to_vec();
    let hash_sorted = items.windows(2).all(|w| w[0] % 7 <= w[1] % 7);
    items.sort();

    hash_sorted
        && items.iter().eq(model.iter())
        && model.iter().all(|x| set.contains(x))
}

#[quickcheck]
fn maps_match_btree_map(ops: Vec<(bool, u8, u32)>) -> bool {
    let mut navigable = NavigableMap::new();
    let mut hashed = EntryKeyedMap::new();
    let mut model = BTreeMap::new();

    for (insert, k, v) in ops {
        let expected = if insert { model.insert(k, v) } else { model.remove(&k) };
        let (a, b) = if insert {
            (navigable.insert(k, v), hashed.insert(k, v))
        } else {
            (navigable.remove(&k), hashed.remove(&k))
        };
        if a != expected || b != expected {
            return false;
        }
    }

    navigable.iter().eq(model.iter())
        && hashed.len() == model.len()
        && model.iter().all(|(k, v)| hashed.get(k) == Some(v))
}

#[quickcheck]
fn views_match_filtered_model(
    items: Vec<u8>,
    lo: u8,
    lo_inclusive: bool,
    hi: u8,
    hi_inclusive: bool,
    probes: Vec<u8>,
) -> bool {
    let set: NavigableSet<_> = items.iter().copied().collect();
    let lower = bound_of(lo, lo_inclusive);
    let upper = bound_of(hi, hi_inclusive);

    let view = match set.sub_set(lower, upper) {
        Ok(view) => view,
        Err(e) => return lo > hi && e == Error::InvertedBounds,
    };
    let expected = set.iter().copied().filter(|&x| in_bounds(x, lower, upper)).collect::<Vec<_>>();

    let desc = view.reborrow().descending();
    let reversed = expected.iter().rev().copied().collect::<Vec<_>>();

    view.to_vec() == expected
        && desc.to_vec() == reversed
        && view.first().ok().copied() == expected.first().copied()
        && desc.first().ok().copied() == expected.last().copied()
        && probes.iter().all(|&p| {
            view.contains(&p) == expected.contains(&p)
                && view.floor(&p).copied() == expected.iter().rev().find(|&&x| x <= p).copied()
                && view.higher(&p).copied() == expected.iter().find(|&&x| x > p).copied()
                && desc.floor(&p).copied() == expected.iter().find(|&&x| x >= p).copied()
                && desc.higher(&p).copied() == expected.iter().rev().find(|&&x| x < p).copied()
        })
}

#[quickcheck]
fn view_insert_never_escapes(items: Vec<u8>, lo: u8, hi: u8, inserts: Vec<u8>) -> bool {
    let mut set: NavigableSet<_> = items.into_iter().collect();
    let before = set.to_vec();
    let (lo, hi) = if lo <= hi { (lo, hi) } else { (hi, lo) };

    let mut accepted = Vec::new();
    {
        let mut view = match set.sub_set_mut(Included(lo), Excluded(hi)) {
            Ok(view) => view,
            Err(_) => return false,
        };
        for x in inserts {
            match view.insert(x) {
                Ok(_) => accepted.push(x),
                Err(e) => {
                    if e != Error::OutOfRange || (lo <= x && x < hi) {
                        return false;
                    }
                }
            }
        }
    }

    let mut expected = before.into_iter().chain(accepted).collect::<Vec<_>>();
    expected.sort();
    expected.dedup();
    set.to_vec() == expected
}
