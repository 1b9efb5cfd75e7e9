//! # Least Recently Used (LRU) Cache
//!
//! Fixed-capacity cache that evicts the entry untouched for the longest
//! time when a new key arrives at capacity.
//!
//! ## Architecture
//!
//! ```text
//!   ┌──────────────────────────────────────────────────────────────┐
//!   │                        LruCache<K, V>                        │
//!   │                                                              │
//!   │   ┌────────────────────────────────────────────────────────┐ │
//!   │   │  FxHashMap<K, SlotId> (index into the recency list)    │ │
//!   │   │                                                        │ │
//!   │   │  ┌─────────┬──────────────────────────────────────┐    │ │
//!   │   │  │   Key   │  SlotId                              │    │ │
//!   │   │  ├─────────┼──────────────────────────────────────┤    │ │
//!   │   │  │  key_1  │  ──────────────────────────────────┐ │    │ │
//!   │   │  │  key_2  │  ────────────────────────────┐     │ │    │ │
//!   │   │  │  key_3  │  ──────────────────────┐     │     │ │    │ │
//!   │   │  └─────────┴────────────────────────┼─────┼─────┼─┘    │ │
//!   │   └───────────────────────────────────────────────────┬────┘ │
//!   │                                        │     │     │         │
//!   │   ┌────────────────────────────────────┼─────┼─────┼───────┐ │
//!   │   │  RecencyList<Entry<K, V>>          ▼     ▼     ▼       │ │
//!   │   │                                                        │ │
//!   │   │  head ──► [id_3] ◄──► [id_2] ◄──► [id_1] ◄── tail      │ │
//!   │   │           (LRU)                   (MRU)                │ │
//!   │   └────────────────────────────────────────────────────────┘ │
//!   └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Operation Flow
//!
//! ```text
//!   insert(D) with cache full (capacity = 3):
//!     1. pop_front() evicts the LRU entry, its key leaves the index
//!     2. push_back(D) appends at the MRU tail, index records the handle
//!
//!   get(B) on a hit:
//!     1. index lookup: O(1)
//!     2. move_to_back(handle): O(1), B becomes MRU
//! ```
//!
//! ## Key Components
//!
//! | Component        | Description                                     |
//! |------------------|-------------------------------------------------|
//! | `LruCache<K, V>` | Single-threaded core: recency list + hash index |
//! | `Entry<K, V>`    | Key + value stored in each list node            |
//! | `ConcurrentLruCache` | Thread-safe wrapper (`parking_lot::RwLock`) |
//!
//! ## Invariants
//!
//! After every public operation:
//! - the index and the recency list hold the same number of entries,
//! - `len() <= capacity()`,
//! - every indexed handle resolves to an entry carrying the same key,
//! - the list tail is the most recently touched entry and the head is the
//!   next eviction victim.
//!
//! Both structures are private and every mutating method updates both
//! before returning, so no caller can observe them diverged.
//!
//! ## Performance
//!
//! | Operation  | Time     | Notes                          |
//! |------------|----------|--------------------------------|
//! | `insert`   | O(1) avg | Index update + list update     |
//! | `get`      | O(1) avg | Index lookup + move to tail    |
//! | `peek`     | O(1) avg | Index lookup only              |
//! | `remove`   | O(1) avg | Index remove + list unlink     |
//! | `pop_lru`  | O(1)     | Head removal                   |
//!
//! ## Thread Safety
//!
//! - `LruCache`: **NOT thread-safe**, takes `&mut self` for mutation.
//! - `ConcurrentLruCache`: thread-safe via `parking_lot::RwLock`; values
//!   are `Arc<V>` so callers can keep them past eviction.

use std::fmt;
use std::hash::Hash;
#[cfg(feature = "concurrency")]
use std::sync::Arc;

#[cfg(feature = "concurrency")]
use parking_lot::RwLock;
use rustc_hash::FxHashMap;

use crate::ds::recency_list::RecencyList;
use crate::ds::slot_arena::SlotId;
use crate::error::ConfigError;
#[cfg(any(test, debug_assertions))]
use crate::error::InvariantError;
use crate::traits::{CoreCache, LruCacheTrait, MutableCache};

/// One cached entry. Lives in the recency list; the index holds its handle.
///
/// The key is duplicated here so eviction can unmap the victim without a
/// reverse lookup.
#[derive(Debug)]
struct Entry<K, V> {
    key: K,
    value: V,
}

/// Fixed-capacity LRU cache composing a [`RecencyList`] with a hash index.
///
/// Keys need `Eq + Hash` for the index and `Clone` because each key is
/// stored both in the index and in its list entry. Values are
/// unconstrained.
///
/// # Example
///
/// ```
/// use lrukit::policy::lru::LruCache;
/// use lrukit::traits::CoreCache;
///
/// let mut cache: LruCache<u32, &str> = LruCache::new(2);
/// cache.insert(1, "one");
/// cache.insert(2, "two");
/// cache.insert(3, "three"); // evicts key 1
///
/// assert!(!cache.contains(&1));
/// assert_eq!(cache.get(&3), Some(&"three"));
/// ```
pub struct LruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    index: FxHashMap<K, SlotId>,
    order: RecencyList<Entry<K, V>>,
    capacity: usize,
}

impl<K, V> LruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    /// Creates a new LRU cache with the given capacity.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is 0. Use [`try_new`](Self::try_new) to handle
    /// user-supplied capacities without panicking.
    ///
    /// # Example
    ///
    /// ```
    /// use lrukit::policy::lru::LruCache;
    ///
    /// let cache: LruCache<u32, String> = LruCache::new(100);
    /// ```
    #[inline]
    pub fn new(capacity: usize) -> Self {
        match Self::try_new(capacity) {
            Ok(cache) => cache,
            Err(err) => panic!("{err}"),
        }
    }

    /// Creates a new LRU cache, rejecting invalid capacities.
    ///
    /// A capacity of 0 is a configuration error: a cache that can hold
    /// nothing has no meaningful recency order, so it is reported here at
    /// construction time rather than surfacing as silent no-op inserts.
    ///
    /// # Example
    ///
    /// ```
    /// use lrukit::policy::lru::LruCache;
    ///
    /// assert!(LruCache::<u32, String>::try_new(8).is_ok());
    /// assert!(LruCache::<u32, String>::try_new(0).is_err());
    /// ```
    pub fn try_new(capacity: usize) -> Result<Self, ConfigError> {
        if capacity == 0 {
            return Err(ConfigError::new("capacity must be greater than 0"));
        }
        Ok(Self {
            index: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
            order: RecencyList::with_capacity(capacity),
            capacity,
        })
    }

    /// Read-only lookup without a recency update.
    ///
    /// Unlike [`get`](CoreCache::get), this does not move the entry to the
    /// MRU position.
    ///
    /// # Example
    ///
    /// ```
    /// use lrukit::policy::lru::LruCache;
    /// use lrukit::traits::CoreCache;
    ///
    /// let mut cache = LruCache::new(2);
    /// cache.insert(1, "first");
    /// cache.insert(2, "second");
    ///
    /// // Peek doesn't affect LRU order
    /// assert_eq!(cache.peek(&1), Some(&"first"));
    ///
    /// // Key 1 is still LRU and gets evicted first
    /// cache.insert(3, "third");
    /// assert!(!cache.contains(&1));
    /// ```
    #[inline]
    pub fn peek(&self, key: &K) -> Option<&V> {
        let id = *self.index.get(key)?;
        self.order.get(id).map(|entry| &entry.value)
    }

    /// Verifies the index/list coupling invariants.
    ///
    /// Walks the whole structure; debug and test builds only.
    #[cfg(any(test, debug_assertions))]
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        if self.index.len() != self.order.len() {
            return Err(InvariantError::new(format!(
                "index has {} entries but recency list has {}",
                self.index.len(),
                self.order.len()
            )));
        }
        if self.order.len() > self.capacity {
            return Err(InvariantError::new(format!(
                "{} entries exceed capacity {}",
                self.order.len(),
                self.capacity
            )));
        }
        for (key, &id) in &self.index {
            match self.order.get(id) {
                Some(entry) if entry.key == *key => {}
                Some(_) => {
                    return Err(InvariantError::new(
                        "index handle resolves to an entry with a different key",
                    ));
                }
                None => {
                    return Err(InvariantError::new(
                        "index handle does not resolve to a live entry",
                    ));
                }
            }
        }
        self.order.debug_validate_invariants();
        Ok(())
    }

    #[inline]
    fn debug_audit(&self) {
        #[cfg(debug_assertions)]
        if let Err(err) = self.check_invariants() {
            panic!("invariant violation: {err}");
        }
    }
}

impl<K, V> CoreCache<K, V> for LruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    /// Inserts or updates a key, returning the previous value on update.
    ///
    /// An update of an existing key never evicts; a new key at capacity
    /// evicts exactly one entry, the current LRU head, before the append.
    /// Either way the touched key ends up most recently used and
    /// `len() <= capacity()` holds on return.
    fn insert(&mut self, key: K, value: V) -> Option<V> {
        if let Some(&id) = self.index.get(&key) {
            let previous = self
                .order
                .get_mut(id)
                .map(|entry| std::mem::replace(&mut entry.value, value));
            debug_assert!(previous.is_some(), "indexed handle must be live");
            self.order.move_to_back(id);
            self.debug_audit();
            return previous;
        }

        if self.index.len() == self.capacity {
            if let Some(evicted) = self.order.pop_front() {
                self.index.remove(&evicted.key);
            }
        }

        let id = self.order.push_back(Entry {
            key: key.clone(),
            value,
        });
        self.index.insert(key, id);

        self.debug_audit();
        None
    }

    /// Returns the value for `key`, marking it most recently used.
    ///
    /// A miss returns `None` and mutates nothing.
    fn get(&mut self, key: &K) -> Option<&V> {
        let id = *self.index.get(key)?;
        self.order.move_to_back(id);
        self.order.get(id).map(|entry| &entry.value)
    }

    #[inline]
    fn contains(&self, key: &K) -> bool {
        self.index.contains_key(key)
    }

    #[inline]
    fn len(&self) -> usize {
        self.index.len()
    }

    #[inline]
    fn capacity(&self) -> usize {
        self.capacity
    }

    fn clear(&mut self) {
        self.index.clear();
        self.order.clear();
        self.debug_audit();
    }
}

impl<K, V> MutableCache<K, V> for LruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn remove(&mut self, key: &K) -> Option<V> {
        let id = self.index.remove(key)?;
        let entry = self.order.remove(id);
        debug_assert!(entry.is_some(), "indexed handle must be live");
        self.debug_audit();
        entry.map(|entry| entry.value)
    }
}

impl<K, V> LruCacheTrait<K, V> for LruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn pop_lru(&mut self) -> Option<(K, V)> {
        let entry = self.order.pop_front()?;
        self.index.remove(&entry.key);
        self.debug_audit();
        Some((entry.key, entry.value))
    }

    fn peek_lru(&self) -> Option<(&K, &V)> {
        self.order.front().map(|entry| (&entry.key, &entry.value))
    }

    fn touch(&mut self, key: &K) -> bool {
        if let Some(&id) = self.index.get(key) {
            self.order.move_to_back(id);
            self.debug_audit();
            true
        } else {
            false
        }
    }

    fn recency_rank(&self, key: &K) -> Option<usize> {
        let target = *self.index.get(key)?;
        self.order
            .iter_ids()
            .position(|id| id == target)
            .map(|pos| self.order.len() - 1 - pos)
    }
}

impl<K, V> fmt::Debug for LruCache<K, V>
where
    K: Eq + Hash + Clone + fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LruCache")
            .field("len", &self.len())
            .field("capacity", &self.capacity())
            .finish_non_exhaustive()
    }
}

impl<K, V> Extend<(K, V)> for LruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn extend<T: IntoIterator<Item = (K, V)>>(&mut self, iter: T) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

/// Thread-safe LRU cache wrapper using `parking_lot::RwLock`.
///
/// The core takes `&mut self` even for `get` (it reorders the list), so
/// most operations acquire the write lock; `peek`, `contains` and the size
/// accessors only need the read lock. Values are stored as `Arc<V>` so
/// callers can hold them after the entry is evicted.
#[cfg(feature = "concurrency")]
#[derive(Clone)]
pub struct ConcurrentLruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    inner: Arc<RwLock<LruCache<K, Arc<V>>>>,
}

#[cfg(feature = "concurrency")]
impl<K, V> ConcurrentLruCache<K, V>
where
    K: Eq + Hash + Clone + Send + Sync,
    V: Send + Sync,
{
    /// Creates a new thread-safe LRU cache with the given capacity.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is 0; see [`try_new`](Self::try_new).
    ///
    /// # Example
    ///
    /// ```
    /// use lrukit::policy::lru::ConcurrentLruCache;
    ///
    /// let cache: ConcurrentLruCache<u32, String> = ConcurrentLruCache::new(100);
    /// assert_eq!(cache.capacity(), 100);
    /// assert!(cache.is_empty());
    /// ```
    pub fn new(capacity: usize) -> Self {
        Self {
            inner: Arc::new(RwLock::new(LruCache::new(capacity))),
        }
    }

    /// Creates a new thread-safe LRU cache, rejecting invalid capacities.
    pub fn try_new(capacity: usize) -> Result<Self, ConfigError> {
        Ok(Self {
            inner: Arc::new(RwLock::new(LruCache::try_new(capacity)?)),
        })
    }

    /// Inserts a value, wrapping it in `Arc<V>` internally.
    ///
    /// Returns the previous `Arc<V>` if the key existed.
    ///
    /// # Example
    ///
    /// ```
    /// use lrukit::policy::lru::ConcurrentLruCache;
    ///
    /// let cache: ConcurrentLruCache<u32, String> = ConcurrentLruCache::new(100);
    ///
    /// let old = cache.insert(1, "first".to_string());
    /// assert!(old.is_none());
    ///
    /// let old = cache.insert(1, "updated".to_string());
    /// assert_eq!(*old.unwrap(), "first");
    /// ```
    pub fn insert(&self, key: K, value: V) -> Option<Arc<V>> {
        let value = Arc::new(value);
        let mut cache = self.inner.write();
        cache.insert(key, value)
    }

    /// Inserts a pre-wrapped `Arc<V>` directly.
    ///
    /// # Example
    ///
    /// ```
    /// use lrukit::policy::lru::ConcurrentLruCache;
    /// use std::sync::Arc;
    ///
    /// let cache: ConcurrentLruCache<u32, String> = ConcurrentLruCache::new(100);
    ///
    /// let shared = Arc::new("shared".to_string());
    /// cache.insert_arc(1, Arc::clone(&shared));
    ///
    /// let retrieved = cache.get(&1).unwrap();
    /// assert!(Arc::ptr_eq(&shared, &retrieved));
    /// ```
    pub fn insert_arc(&self, key: K, value: Arc<V>) -> Option<Arc<V>> {
        let mut cache = self.inner.write();
        cache.insert(key, value)
    }

    /// Gets a value by key, moving it to the MRU position.
    ///
    /// Takes the write lock because it reorders the recency list.
    pub fn get(&self, key: &K) -> Option<Arc<V>> {
        let mut cache = self.inner.write();
        cache.get(key).map(Arc::clone)
    }

    /// Peeks a value without affecting LRU order. Read lock only.
    pub fn peek(&self, key: &K) -> Option<Arc<V>> {
        let cache = self.inner.read();
        cache.peek(key).map(Arc::clone)
    }

    /// Removes an entry and returns its `Arc<V>`.
    pub fn remove(&self, key: &K) -> Option<Arc<V>> {
        let mut cache = self.inner.write();
        cache.remove(key)
    }

    /// Marks a key as most recently used without retrieving its value.
    ///
    /// # Example
    ///
    /// ```
    /// use lrukit::policy::lru::ConcurrentLruCache;
    ///
    /// let cache: ConcurrentLruCache<u32, &str> = ConcurrentLruCache::new(2);
    /// cache.insert(1, "a");
    /// cache.insert(2, "b");
    ///
    /// assert!(cache.touch(&1));
    /// cache.insert(3, "c"); // evicts key 2, not the touched key 1
    /// assert!(cache.contains(&1));
    /// assert!(!cache.contains(&2));
    /// ```
    pub fn touch(&self, key: &K) -> bool {
        let mut cache = self.inner.write();
        cache.touch(key)
    }

    /// Removes and returns the least recently used entry.
    pub fn pop_lru(&self) -> Option<(K, Arc<V>)> {
        let mut cache = self.inner.write();
        cache.pop_lru()
    }

    /// Peeks at the least recently used entry without removing it.
    pub fn peek_lru(&self) -> Option<(K, Arc<V>)> {
        let cache = self.inner.read();
        cache.peek_lru().map(|(k, v)| (k.clone(), Arc::clone(v)))
    }

    /// Returns the current number of entries.
    pub fn len(&self) -> usize {
        let cache = self.inner.read();
        cache.len()
    }

    /// Returns `true` if the cache is empty.
    pub fn is_empty(&self) -> bool {
        let cache = self.inner.read();
        cache.is_empty()
    }

    /// Returns the maximum capacity.
    pub fn capacity(&self) -> usize {
        let cache = self.inner.read();
        cache.capacity()
    }

    /// Returns `true` if the key exists. Does not affect LRU order.
    pub fn contains(&self, key: &K) -> bool {
        let cache = self.inner.read();
        cache.contains(key)
    }

    /// Removes all entries.
    pub fn clear(&self) {
        let mut cache = self.inner.write();
        cache.clear()
    }
}

#[cfg(feature = "concurrency")]
impl<K, V> fmt::Debug for ConcurrentLruCache<K, V>
where
    K: Eq + Hash + Clone + fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cache = self.inner.read();
        f.debug_struct("ConcurrentLruCache")
            .field("len", &cache.len())
            .field("capacity", &cache.capacity())
            .finish_non_exhaustive()
    }
}
