// ==============================================
// LRU CACHE BEHAVIORAL INVARIANTS (integration)
// ==============================================
//
// Exercises the public API the way a caller would, checking the properties
// the cache guarantees across whole operation sequences rather than single
// calls: the capacity bound, recency-driven eviction order, and update
// semantics.

use lrukit::policy::lru::LruCache;
use lrukit::traits::{CoreCache, LruCacheTrait, MutableCache};

// ==============================================
// Capacity bound
// ==============================================

#[test]
fn size_never_exceeds_capacity() {
    let mut cache = LruCache::new(8);
    for i in 0..1000u64 {
        cache.insert(i % 37, i);
        assert!(cache.len() <= cache.capacity());
    }
    assert_eq!(cache.len(), 8);
}

#[test]
fn mixed_workload_respects_capacity() {
    let mut cache = LruCache::new(5);
    for i in 0..500u64 {
        match i % 4 {
            0 => {
                cache.insert(i % 13, i);
            }
            1 => {
                let _ = cache.get(&(i % 13));
            }
            2 => {
                cache.touch(&(i % 13));
            }
            _ => {
                cache.remove(&(i % 17));
            }
        }
        assert!(cache.len() <= cache.capacity());
    }
}

// ==============================================
// Eviction order
// ==============================================

#[test]
fn overfilling_evicts_first_inserted_key() {
    let capacity = 4;
    let mut cache = LruCache::new(capacity);
    for key in 0..=capacity as u64 {
        cache.insert(key, key * 10);
    }

    // Exactly the first-inserted key is gone, everything else survives.
    assert!(!cache.contains(&0));
    for key in 1..=capacity as u64 {
        assert!(cache.contains(&key));
    }
}

#[test]
fn touched_key_is_evicted_last() {
    let mut cache = LruCache::new(3);
    cache.insert(1, "a");
    cache.insert(2, "b");
    cache.insert(3, "c");

    cache.touch(&1);

    // Every other key must be evicted before the touched one.
    assert_eq!(cache.pop_lru(), Some((2, "b")));
    assert_eq!(cache.pop_lru(), Some((3, "c")));
    assert_eq!(cache.pop_lru(), Some((1, "a")));
}

#[test]
fn eviction_drains_in_recency_order() {
    let mut cache = LruCache::new(4);
    for key in 0..4u64 {
        cache.insert(key, key);
    }
    cache.get(&0);
    cache.get(&2);

    // Recency order is now 1, 3, 0, 2 from LRU to MRU.
    let mut evicted = Vec::new();
    while let Some((key, _)) = cache.pop_lru() {
        evicted.push(key);
    }
    assert_eq!(evicted, vec![1, 3, 0, 2]);
}

// ==============================================
// Update semantics
// ==============================================

#[test]
fn updating_existing_key_never_evicts() {
    let mut cache = LruCache::new(2);
    cache.insert(4, 40);
    cache.insert(5, 50);

    assert_eq!(cache.insert(4, 44), Some(40));

    assert_eq!(cache.len(), 2);
    assert_eq!(cache.get(&4), Some(&44));
    assert_eq!(cache.get(&5), Some(&50));
}

#[test]
fn value_visible_immediately_after_insert() {
    let mut cache = LruCache::new(3);
    for i in 0..50u64 {
        cache.insert(i, i * 2);
        assert_eq!(cache.get(&i), Some(&(i * 2)));
    }
}

// ==============================================
// End-to-end scenarios
// ==============================================

#[test]
fn basic_put_get_and_eviction_scenario() {
    let mut cache = LruCache::new(2);

    cache.insert(1, 10);
    cache.insert(2, 20);
    assert_eq!(cache.get(&1), Some(&10));

    // Key 2 is now LRU and gets evicted.
    cache.insert(3, 30);
    assert_eq!(cache.get(&2), None);
    assert_eq!(cache.get(&3), Some(&30));
    assert_eq!(cache.get(&1), Some(&10));
}

#[test]
fn read_protects_key_from_eviction() {
    let mut cache = LruCache::new(2);
    cache.insert(1, 10);
    cache.insert(3, 30);

    cache.get(&1);
    cache.insert(4, 40);

    assert_eq!(cache.get(&3), None);
    assert_eq!(cache.get(&4), Some(&40));
    assert_eq!(cache.get(&1), Some(&10));
}

#[test]
fn capacity_one_keeps_only_latest_key() {
    let mut cache = LruCache::new(1);
    cache.insert(1, 1);
    cache.insert(2, 2);

    assert_eq!(cache.get(&1), None);
    assert_eq!(cache.get(&2), Some(&2));
}

// ==============================================
// Construction
// ==============================================

#[test]
fn zero_capacity_is_rejected_at_construction() {
    assert!(LruCache::<u64, u64>::try_new(0).is_err());
    assert!(LruCache::<u64, u64>::try_new(1).is_ok());
}
