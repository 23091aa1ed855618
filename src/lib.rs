#![warn(missing_docs)]
#![doc = include_str!("../README.md")]
#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

/// A HashMap implementation using fingerprint-filtered linear probing.
///
/// This module provides a `HashMap` that wraps the `HashTable` and provides
/// a standard key-value map interface with configurable hashers.
pub mod hash_map;

/// The core hash table engine.
///
/// `HashTable` works directly with hash values and equality predicates
/// instead of owning a hasher, which lets the map and set façades share one
/// implementation of probing, growth, and backward-shift deletion.
pub mod hash_table;

/// A hash set implementation using fingerprint-filtered linear probing.
///
/// This module provides a `HashSet` that wraps the `HashTable` and provides
/// a standard set interface with configurable hashers.
pub mod hash_set;

pub use hash_map::Entry;
pub use hash_map::HashMap;
pub use hash_set::HashSet;
pub use hash_table::HashTable;

cfg_if::cfg_if! {
    if #[cfg(feature = "foldhash")] {
        /// The default hasher builder, backed by `foldhash`.
        pub type DefaultHashBuilder = foldhash::fast::RandomState;
    } else {
        /// Placeholder hasher builder used when no default hasher is
        /// enabled. It cannot be constructed; supply a hasher through
        /// `with_hasher` instead.
        #[derive(Clone)]
        pub enum DefaultHashBuilder {}
    }
}
