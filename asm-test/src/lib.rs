//! This is just a dummy library to check the assembly output of some
//! functions.

use compact_collections::{HashOrderedSet, NavigableMap, NavigableSet};


pub fn contains_u32_navigable(set: &NavigableSet<u32>, item: u32) -> bool {
    set.contains(&item)
}

pub fn floor_u32_navigable(set: &NavigableSet<u32>, item: u32) -> Option<u32> {
    set.floor(&item).copied()
}

pub fn insert_u32_navigable(set: &mut NavigableSet<u32>, item: u32) -> bool {
    set.insert(item)
}

pub fn contains_u32_hash(set: &HashOrderedSet<u32>, item: u32) -> bool {
    set.contains(&item)
}

pub fn insert_u32_hash(set: &mut HashOrderedSet<u32>, item: u32) -> bool {
    set.insert(item)
}

pub fn get_u32_map(map: &NavigableMap<u32, u64>, key: u32) -> Option<u64> {
    map.get(&key).copied()
}

pub fn count_u32_sub_set(set: &NavigableSet<u32>, from: u32, to: u32) -> usize {
    use std::ops::Bound::*;

    set.sub_set(Included(from), Excluded(to)).map_or(0, |view| view.len())
}
