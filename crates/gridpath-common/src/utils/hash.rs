//! Hash map and set aliases.
//!
//! Use these instead of `std::collections` so every crate hashes vertices the
//! same way.
//!
//! | Type | Use Case |
//! |------|----------|
//! | [`FastMap`] | Single-threaded hash map |
//! | [`FastSet`] | Single-threaded hash set |
//! | [`ConcurrentMap`] | Multi-threaded hash map with sharded locking |
//! | [`ConcurrentSet`] | Multi-threaded hash set with sharded locking |
//! | [`OrderedSet`] | Insertion-order preserving set |

/// Hash builder shared by all aliases.
pub type FastBuildHasher = ahash::RandomState;

/// Single-threaded hash map.
pub type FastMap<K, V> = hashbrown::HashMap<K, V, FastBuildHasher>;

/// Single-threaded hash set.
pub type FastSet<T> = hashbrown::HashSet<T, FastBuildHasher>;

/// Concurrent hash map. Prefer this over `Mutex<HashMap>` for shared state.
pub type ConcurrentMap<K, V> = dashmap::DashMap<K, V, FastBuildHasher>;

/// Concurrent hash set.
pub type ConcurrentSet<T> = dashmap::DashSet<T, FastBuildHasher>;

/// Set that iterates in insertion order.
pub type OrderedSet<T> = indexmap::IndexSet<T, FastBuildHasher>;
