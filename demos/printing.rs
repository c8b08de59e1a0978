use std::ops::Bound::*;

use compact_collections::{EntryKeyedMap, NavigableSet};

fn main() {
    let mut set: NavigableSet<_> = "fcadbe".chars().collect();
    println!("{:?}", set);

    set.remove(&'b');
    set.remove(&'e');
    println!("{:?}", set);

    set.insert('x');
    println!("{:?}", set);
    println!("{:?}", set.sub_set(Included('b'), Excluded('x')));
    println!("{:?}", set.descending_set());

    let map: EntryKeyedMap<_, _> = vec![("one", 1), ("two", 2)].into_iter().collect();
    println!("{:?}", map);
}
