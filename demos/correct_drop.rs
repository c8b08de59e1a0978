use compact_collections::NavigableMap;

/// A dummy type which prints its character when dropped.
struct EchoDrop(pub char);

impl Drop for EchoDrop {
    fn drop(&mut self) {
        println!("I was dropped: {}", self.0);
    }
}

fn main() {
    let mut map = NavigableMap::new();
    map.insert(1, EchoDrop('a'));
    map.insert(2, EchoDrop('b'));
    map.insert(3, EchoDrop('c'));

    {
        // Removing it from the map shouldn't drop the value: it is moved
        // out of the map into this function.
        println!("--- removing 'b' (nothing should be dropped!) ...");
        let _b = map.remove(&2);

        // But now the value goes out of scope and it should be dropped now.
        println!("--- letting 'b' go out of scope (it should be dropped now!) ...");
    }

    // Replacing a value hands back the old one, which is dropped right away.
    println!("--- replacing 'c' with 'x' (it should drop 'c'!) ...");
    map.insert(3, EchoDrop('x'));

    // The map will be dropped at the end of this function and should drop
    // all values inside it which haven't been removed yet ('a' and 'x').
    println!("--- Letting 'map' go out of scope (it should drop 'a' and 'x'!) ...");
}
