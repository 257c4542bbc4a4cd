use super::getter::Getter;
use crate::cache::{ByteView, ConcurrentCache};
use crate::error::{CacheError, Result};
use crate::peers::{PeerGetter, PeerPicker};
use crate::singleflight::SingleFlight;

use std::sync::{Arc, OnceLock};

/// A cache namespace: one local cache, one loader, at most one peer router.
pub struct Group {
    name: String,
    getter: Arc<dyn Getter>,
    main_cache: ConcurrentCache,
    peers: OnceLock<Arc<dyn PeerPicker>>,
    loader: SingleFlight<ByteView>,
}

impl Group {
    pub(crate) fn new(name: &str, cache_bytes: usize, getter: Arc<dyn Getter>) -> Self {
        Self {
            name: name.to_string(),
            getter,
            main_cache: ConcurrentCache::new(cache_bytes),
            peers: OnceLock::new(),
            loader: SingleFlight::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the value for `key`, loading it on a miss.
    ///
    /// A miss is routed to the owning peer when there is one. If that fetch
    /// fails, or the key is owned locally, the loader runs and its result is
    /// cached here. Values fetched from peers are not cached locally.
    ///
    /// The load runs on its own task: if this caller is dropped, callers
    /// sharing the load still get its result and the value is still cached.
    pub async fn get(self: &Arc<Self>, key: &str) -> Result<ByteView> {
        if key.is_empty() {
            return Err(CacheError::EmptyKey);
        }

        if let Some(value) = self.main_cache.get(key) {
            tracing::debug!("GET: cache hit for {} in group {}", key, self.name);
            return Ok(value);
        }

        self.load(key).await
    }

    /// Attaches the router used to find remote owners.
    ///
    /// # Panics
    /// If a router was already registered for this group.
    pub fn register_peers(&self, peers: Arc<dyn PeerPicker>) {
        if self.peers.set(peers).is_err() {
            panic!("register_peers called more than once for group {}", self.name);
        }
    }

    async fn load(self: &Arc<Self>, key: &str) -> Result<ByteView> {
        let group = Arc::clone(self);
        let owned_key = key.to_string();

        self.loader
            .do_call(key, async move { group.load_uncached(&owned_key).await })
            .await
    }

    async fn load_uncached(&self, key: &str) -> Result<ByteView> {
        // A caller that missed just before the previous load finished
        // would otherwise load the key a second time.
        if let Some(value) = self.main_cache.get(key) {
            return Ok(value);
        }

        if let Some(peers) = self.peers.get()
            && let Some(peer) = peers.pick_peer(key)
        {
            match self.get_from_peer(peer.as_ref(), key).await {
                Ok(value) => return Ok(value),
                Err(e) if e.is_transport() => {
                    tracing::warn!("GET: Failed to get {} from peer: {}", key, e);
                }
                Err(e) => {
                    tracing::error!("GET: Peer error for {}: {}", key, e);
                }
            }
        }

        self.get_locally(key).await
    }

    async fn get_locally(&self, key: &str) -> Result<ByteView> {
        let getter = self.getter.clone();
        let owned_key = key.to_string();

        let bytes = tokio::task::spawn_blocking(move || getter.get(&owned_key))
            .await
            .map_err(|e| CacheError::Loader(format!("loader task failed: {}", e)))?
            .map_err(|e| CacheError::Loader(e.to_string()))?;

        // The loader handed over its buffer, so nothing else can mutate it.
        let value = ByteView::from(bytes);
        self.populate_cache(key, value.clone());
        Ok(value)
    }

    fn populate_cache(&self, key: &str, value: ByteView) {
        self.main_cache.add(key, value);
    }

    async fn get_from_peer(&self, peer: &dyn PeerGetter, key: &str) -> Result<ByteView> {
        let bytes = peer.get(&self.name, key).await?;
        tracing::debug!("GET: Fetched {} for group {} from peer", key, self.name);
        Ok(ByteView::from(bytes))
    }

    /// Number of entries held in this node's cache.
    pub fn cache_len(&self) -> usize {
        self.main_cache.len()
    }

    pub fn cache_bytes(&self) -> usize {
        self.main_cache.bytes()
    }
}
