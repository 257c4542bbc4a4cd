use super::byteview::ByteView;
use super::store::LruStore;
use parking_lot::Mutex;

/// Mutex-guarded LRU store shared by every caller of a group.
///
/// Reads update recency, so a plain mutex is used rather than a
/// reader/writer lock. The store itself is only allocated on the first
/// insert.
pub struct ConcurrentCache {
    cache_bytes: usize,
    lru: Mutex<Option<LruStore>>,
}

impl ConcurrentCache {
    pub fn new(cache_bytes: usize) -> Self {
        Self {
            cache_bytes,
            lru: Mutex::new(None),
        }
    }

    pub fn add(&self, key: &str, value: ByteView) {
        let mut lru = self.lru.lock();
        lru.get_or_insert_with(|| {
            LruStore::new(
                self.cache_bytes,
                Some(Box::new(|key: &str, value: &ByteView| {
                    tracing::trace!("Evicted {} ({} bytes)", key, value.len());
                })),
            )
        })
        .add(key.to_string(), value);
    }

    pub fn get(&self, key: &str) -> Option<ByteView> {
        let mut lru = self.lru.lock();
        lru.as_mut()?.get(key).cloned()
    }

    pub fn len(&self) -> usize {
        self.lru.lock().as_ref().map_or(0, LruStore::len)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Tracked bytes, zero before the first insert.
    pub fn bytes(&self) -> usize {
        self.lru.lock().as_ref().map_or(0, LruStore::bytes)
    }

    pub fn cache_bytes(&self) -> usize {
        self.cache_bytes
    }
}
