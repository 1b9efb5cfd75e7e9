//! # Cache Trait Hierarchy
//!
//! Defines the trait hierarchy for the cache types in this crate, keeping
//! universal operations separate from recency-specific ones.
//!
//! ```text
//!   ┌─────────────────────────────────────────┐
//!   │            CoreCache<K, V>              │
//!   │                                         │
//!   │  insert(&mut, K, V) → Option<V>         │
//!   │  get(&mut, &K) → Option<&V>             │
//!   │  contains(&, &K) → bool                 │
//!   │  len(&) → usize                         │
//!   │  is_empty(&) → bool                     │
//!   │  capacity(&) → usize                    │
//!   │  clear(&mut)                            │
//!   └────────────────────┬────────────────────┘
//!                        │
//!                        ▼
//!   ┌─────────────────────────────────────────┐
//!   │           MutableCache<K, V>            │
//!   │                                         │
//!   │  remove(&K) → Option<V>                 │
//!   │  remove_batch(&[K])                     │
//!   └────────────────────┬────────────────────┘
//!                        │
//!                        ▼
//!   ┌─────────────────────────────────────────┐
//!   │          LruCacheTrait<K, V>            │
//!   │                                         │
//!   │  pop_lru() → (K, V)                     │
//!   │  peek_lru() → (&K, &V)                  │
//!   │  touch(&K) → bool                       │
//!   │  recency_rank(&K) → usize               │
//!   └─────────────────────────────────────────┘
//! ```
//!
//! | Trait           | Extends        | Purpose                            |
//! |-----------------|----------------|------------------------------------|
//! | `CoreCache`     | -              | Universal cache operations         |
//! | `MutableCache`  | `CoreCache`    | Adds arbitrary key removal         |
//! | `LruCacheTrait` | `MutableCache` | LRU-specific recency operations    |

/// Core cache operations that all caches support.
///
/// # Type Parameters
///
/// - `K`: Key type (implementations typically require `Eq + Hash`)
/// - `V`: Value type
///
/// # Example
///
/// ```
/// use lrukit::policy::lru::LruCache;
/// use lrukit::traits::CoreCache;
///
/// fn warm_cache<C: CoreCache<u64, String>>(cache: &mut C, data: &[(u64, String)]) {
///     for (key, value) in data {
///         cache.insert(*key, value.clone());
///     }
/// }
///
/// let mut cache = LruCache::new(100);
/// warm_cache(&mut cache, &[(1, "one".to_string()), (2, "two".to_string())]);
/// assert_eq!(cache.len(), 2);
/// ```
pub trait CoreCache<K, V> {
    /// Inserts a key-value pair, returning the previous value if it existed.
    ///
    /// If the cache is at capacity and `key` is new, an entry is evicted
    /// according to the cache's eviction policy before the new entry is
    /// inserted.
    fn insert(&mut self, key: K, value: V) -> Option<V>;

    /// Gets a reference to a value by key.
    ///
    /// May update internal recency state. Use [`contains`](Self::contains)
    /// to check existence without affecting eviction order.
    fn get(&mut self, key: &K) -> Option<&V>;

    /// Checks if a key exists without updating access state.
    fn contains(&self, key: &K) -> bool;

    /// Returns the current number of entries in the cache.
    fn len(&self) -> usize;

    /// Returns `true` if the cache holds no entries.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the maximum number of entries the cache can hold.
    fn capacity(&self) -> usize;

    /// Removes all entries from the cache.
    fn clear(&mut self);
}

/// Caches that support arbitrary key-based removal.
///
/// # Example
///
/// ```
/// use lrukit::policy::lru::LruCache;
/// use lrukit::traits::{CoreCache, MutableCache};
///
/// fn invalidate<C: MutableCache<u64, String>>(cache: &mut C, keys: &[u64]) {
///     cache.remove_batch(keys);
/// }
///
/// let mut cache = LruCache::new(10);
/// cache.insert(1, "one".to_string());
/// cache.insert(2, "two".to_string());
/// invalidate(&mut cache, &[1, 2]);
/// assert!(cache.is_empty());
/// ```
pub trait MutableCache<K, V>: CoreCache<K, V> {
    /// Removes an entry by key, returning its value if it existed.
    fn remove(&mut self, key: &K) -> Option<V>;

    /// Removes a batch of keys. Missing keys are skipped.
    fn remove_batch(&mut self, keys: &[K]) {
        for key in keys {
            self.remove(key);
        }
    }
}

/// Recency-specific operations for LRU caches.
///
/// # Example
///
/// ```
/// use lrukit::policy::lru::LruCache;
/// use lrukit::traits::{CoreCache, LruCacheTrait};
///
/// let mut cache = LruCache::new(3);
/// cache.insert(1, "a");
/// cache.insert(2, "b");
/// cache.insert(3, "c");
///
/// // Mark key 1 as recently used without retrieving it.
/// assert!(cache.touch(&1));
///
/// // Key 2 is now the eviction candidate.
/// assert_eq!(cache.peek_lru(), Some((&2, &"b")));
/// assert_eq!(cache.pop_lru(), Some((2, "b")));
/// ```
pub trait LruCacheTrait<K, V>: MutableCache<K, V> {
    /// Removes and returns the least recently used entry.
    fn pop_lru(&mut self) -> Option<(K, V)>;

    /// Returns the least recently used entry without removing it or
    /// affecting recency order.
    fn peek_lru(&self) -> Option<(&K, &V)>;

    /// Marks a key as most recently used without retrieving its value.
    ///
    /// Returns `true` if the key was found.
    fn touch(&mut self, key: &K) -> bool;

    /// Returns the key's position in recency order (0 = most recently
    /// used). O(n) scan; intended for diagnostics and tests.
    fn recency_rank(&self, key: &K) -> Option<usize>;
}
