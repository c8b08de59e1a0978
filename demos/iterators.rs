use std::ops::Bound::*;

use compact_collections::{NavigableMap, NavigableSet};


fn main() {
    let mut map: NavigableMap<_, _> = (0..6).map(|i| (i, i * 10)).collect();
    map.remove(&1);
    map.remove(&4);

    for (k, v) in &map {
        println!("{} -> {:?}", k, v);
    }

    println!("-------");
    for v in map.values_mut() {
        *v += 1;
        println!("{:?}", v);
    }

    println!("-------");
    let sub = map.sub_map(Included(2), Unbounded).unwrap().descending();
    for (k, v) in &sub {
        println!("{} -> {:?}", k, v);
    }

    // NavigableSet implements `FromIterator`
    let mut set: NavigableSet<_> = (1..9).collect();
    println!("{:?}", set);

    let mut cursor = set.cursor();
    while let Some(&x) = cursor.advance() {
        if x % 3 == 0 {
            cursor.remove();
        }
    }
    println!("{:?}", set);
}
