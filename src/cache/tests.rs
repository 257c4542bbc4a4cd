//! Local Cache Tests
//!
//! Validates byte accounting, eviction order and the thread-safe wrapper.
//!
//! ## Test Scopes
//! - **LruStore**: hits, misses, recency promotion, budget enforcement, eviction hook.
//! - **ConcurrentCache**: lazy construction and access from many threads.

#[cfg(test)]
mod tests {
    use crate::cache::{ByteView, ConcurrentCache, LruStore};
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};
    use std::collections::VecDeque;
    use std::sync::{Arc, Mutex};

    fn view(s: &str) -> ByteView {
        ByteView::from(s)
    }

    // ============================================================
    // LRU STORE TESTS
    // ============================================================

    #[test]
    fn test_get_hit_and_miss() {
        let mut lru = LruStore::new(0, None);
        lru.add("key1".to_string(), view("1234"));

        assert_eq!(lru.get("key1").map(|v| v.to_string()), Some("1234".to_string()));
        assert!(lru.get("key2").is_none());
    }

    #[test]
    fn test_remove_oldest_when_over_budget() {
        let (k1, k2, k3) = ("key1", "key2", "k3");
        let (v1, v2, v3) = ("value1", "value2", "v3");
        let cap = k1.len() + k2.len() + v1.len() + v2.len();

        let mut lru = LruStore::new(cap, None);
        lru.add(k1.to_string(), view(v1));
        lru.add(k2.to_string(), view(v2));
        lru.add(k3.to_string(), view(v3));

        assert!(lru.get(k1).is_none(), "key1 should have been evicted");
        assert_eq!(lru.len(), 2);
        assert!(lru.bytes() <= cap);
    }

    #[test]
    fn test_get_promotes_entry() {
        let cap = "k1".len() + "v1".len() + "k2".len() + "v2".len();
        let mut lru = LruStore::new(cap, None);
        lru.add("k1".to_string(), view("v1"));
        lru.add("k2".to_string(), view("v2"));

        // k1 is now the most recently used, so k2 goes first
        assert!(lru.get("k1").is_some());
        lru.add("k3".to_string(), view("v3"));

        assert!(lru.get("k1").is_some());
        assert!(lru.get("k2").is_none());
        assert!(lru.get("k3").is_some());
    }

    #[test]
    fn test_overwrite_adjusts_bytes() {
        let mut lru = LruStore::new(0, None);
        lru.add("key".to_string(), view("short"));
        assert_eq!(lru.bytes(), 3 + 5);

        lru.add("key".to_string(), view("a much longer value"));
        assert_eq!(lru.len(), 1);
        assert_eq!(lru.bytes(), 3 + 18);

        lru.add("key".to_string(), view("x"));
        assert_eq!(lru.bytes(), 3 + 1);
        assert_eq!(lru.get("key").map(|v| v.to_string()), Some("x".to_string()));
    }

    #[test]
    fn test_eviction_hook_sees_evicted_keys() {
        let evicted = Arc::new(Mutex::new(Vec::new()));
        let sink = evicted.clone();

        let mut lru = LruStore::new(
            10,
            Some(Box::new(move |key: &str, _value: &ByteView| {
                sink.lock().unwrap().push(key.to_string());
            })),
        );
        lru.add("key1".to_string(), view("123456"));
        lru.add("k2".to_string(), view("k2"));
        lru.add("k3".to_string(), view("k3"));
        lru.add("k4".to_string(), view("k4"));

        assert_eq!(*evicted.lock().unwrap(), vec!["key1", "k2"]);
    }

    #[test]
    fn test_entry_larger_than_budget_is_dropped() {
        let mut lru = LruStore::new(4, None);
        lru.add("key".to_string(), view("too large"));

        assert!(lru.is_empty());
        assert_eq!(lru.bytes(), 0);
    }

    #[test]
    fn test_zero_budget_never_evicts() {
        let mut lru = LruStore::new(0, None);
        for i in 0..5_000 {
            lru.add(format!("key-{}", i), view(&"x".repeat(64)));
        }

        assert_eq!(lru.len(), 5_000);
        assert!(lru.get("key-0").is_some());
    }

    #[test]
    fn test_remove_oldest_on_empty_store() {
        let mut lru = LruStore::new(0, None);
        lru.remove_oldest();
        assert!(lru.is_empty());
    }

    #[test]
    fn test_random_ops_keep_budget_and_recency() {
        let budget = 64;
        let mut lru = LruStore::new(budget, None);
        // Model: front is least recently used.
        let mut model: VecDeque<(String, usize)> = VecDeque::new();
        let mut rng = StdRng::seed_from_u64(7);

        for _ in 0..2_000 {
            let key = format!("k{}", rng.gen_range(0..12));
            if rng.gen_bool(0.5) {
                let value = "v".repeat(rng.gen_range(0..20));
                let size = key.len() + value.len();
                lru.add(key.clone(), view(&value));

                model.retain(|(k, _)| k != &key);
                model.push_back((key, size));
                while model.iter().map(|(_, s)| s).sum::<usize>() > budget {
                    model.pop_front();
                }
            } else {
                let hit = lru.get(&key).is_some();
                let position = model.iter().position(|(k, _)| k == &key);
                assert_eq!(hit, position.is_some(), "hit mismatch for {}", key);
                if let Some(idx) = position
                    && let Some(entry) = model.remove(idx)
                {
                    model.push_back(entry);
                }
            }

            assert!(lru.bytes() <= budget);
            assert_eq!(lru.len(), model.len());
        }

        for (key, _) in &model {
            assert!(lru.get(key).is_some(), "{} should be retained", key);
        }
    }

    // ============================================================
    // CONCURRENT CACHE TESTS
    // ============================================================

    #[test]
    fn test_concurrent_cache_is_lazy() {
        let cache = ConcurrentCache::new(1024);
        assert_eq!(cache.len(), 0);
        assert_eq!(cache.bytes(), 0);
        assert!(cache.get("anything").is_none());

        cache.add("Tom", view("630"));
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.get("Tom"), Some(view("630")));
    }

    #[test]
    fn test_concurrent_cache_from_many_threads() {
        let cache = Arc::new(ConcurrentCache::new(0));
        let mut handles = Vec::new();

        for t in 0..8 {
            let cache = cache.clone();
            handles.push(std::thread::spawn(move || {
                for i in 0..100 {
                    let key = format!("t{}-{}", t, i);
                    cache.add(&key, ByteView::from(key.as_str()));
                    assert!(cache.get(&key).is_some());
                }
            }));
        }
        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(cache.len(), 800);
    }

    #[test]
    fn test_concurrent_cache_respects_budget() {
        let cache = ConcurrentCache::new(32);
        for i in 0..50 {
            cache.add(&format!("key{:02}", i), view("0123456789"));
        }

        assert!(cache.bytes() <= 32);
        assert!(cache.get("key49").is_some());
        assert!(cache.get("key00").is_none());
    }
}
