use compact_collections::NavigableSet;


fn main() {
    let mut set: NavigableSet<char> = "abcdefg".chars().collect();
    set.remove(&'b');
    set.remove(&'c');
    set.remove(&'f');

    println!("--- before compact():");
    println!("{:?}", set);
    println!("len:      {}", set.len());
    println!("capacity: {}", set.capacity());

    set.compact();
    println!("--- after compact():");
    println!("{:?}", set);
    println!("len:      {}", set.len());
    println!("capacity: {}", set.capacity());

    set.insert('x');
    println!("--- after inserting 'x':");
    println!("capacity: {}", set.capacity());
}
