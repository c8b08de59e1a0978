//! Key/value maps on top of the [`Core`][crate::core::Core] storages.

pub use self::hash::HashOrderedMap;
pub use self::navigable::NavigableMap;
pub use self::view::{KeySet, MapView};

mod hash;
mod navigable;
mod view;
