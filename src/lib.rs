//! lrukit: a fixed-capacity LRU cache built on stable-handle primitives.
//!
//! The crate is split into two layers:
//!
//! - [`ds`]: reusable data-structure primitives — a generational
//!   [`SlotArena`](ds::SlotArena) and a [`RecencyList`](ds::RecencyList)
//!   that orders entries from least to most recently used with O(1)
//!   handle-based removal.
//! - [`policy`]: the [`LruCache`](policy::lru::LruCache) eviction policy
//!   composing a recency list with a hash index, plus a thread-safe
//!   wrapper behind the `concurrency` feature.

pub mod ds;
pub mod error;
pub mod policy;
pub mod prelude;
pub mod traits;
