//! Byte-budgeted LRU store
//!
//! Recency bookkeeping comes from `lru::LruCache` in unbounded mode; this
//! type adds the byte accounting and budget-driven eviction on top. It does
//! no locking of its own, see [`super::ConcurrentCache`] for that.

use super::byteview::ByteView;
use lru::LruCache;

/// Called with each entry removed by eviction.
///
/// Runs while the owning lock is held, so it must not call back into the
/// same cache.
pub type EvictionHook = Box<dyn FnMut(&str, &ByteView) + Send>;

pub struct LruStore {
    max_bytes: usize,
    nbytes: usize,
    cache: LruCache<String, ByteView>,
    on_evicted: Option<EvictionHook>,
}

impl LruStore {
    /// A `max_bytes` of zero disables eviction.
    pub fn new(max_bytes: usize, on_evicted: Option<EvictionHook>) -> Self {
        Self {
            max_bytes,
            nbytes: 0,
            cache: LruCache::unbounded(),
            on_evicted,
        }
    }

    /// Looks up a key and marks it most recently used.
    pub fn get(&mut self, key: &str) -> Option<&ByteView> {
        self.cache.get(key)
    }

    /// Inserts or replaces a value, then evicts until the budget holds.
    pub fn add(&mut self, key: String, value: ByteView) {
        let added = entry_size(&key, &value);
        // push() promotes an existing key and hands back the replaced pair.
        if let Some((old_key, old_value)) = self.cache.push(key, value) {
            self.nbytes -= entry_size(&old_key, &old_value);
        }
        self.nbytes += added;

        while self.max_bytes != 0 && self.nbytes > self.max_bytes {
            self.remove_oldest();
        }
    }

    /// Evicts the least recently used entry, if any.
    pub fn remove_oldest(&mut self) {
        if let Some((key, value)) = self.cache.pop_lru() {
            self.nbytes -= entry_size(&key, &value);
            if let Some(hook) = self.on_evicted.as_mut() {
                hook(key.as_str(), &value);
            }
        }
    }

    pub fn len(&self) -> usize {
        self.cache.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }

    /// Bytes currently tracked against the budget.
    pub fn bytes(&self) -> usize {
        self.nbytes
    }

    pub fn max_bytes(&self) -> usize {
        self.max_bytes
    }
}

fn entry_size(key: &str, value: &ByteView) -> usize {
    key.len() + value.len()
}
