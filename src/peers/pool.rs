use super::client::HttpGetter;
use super::handlers::{handle_peer_get, handle_unexpected_path};
use super::protocol::{
    DEFAULT_BASE_PATH, DEFAULT_REPLICAS, DEFAULT_REQUEST_TIMEOUT, normalize_base_path,
};
use super::{PeerGetter, PeerPicker};
use crate::group::GroupRegistry;
use crate::ring::{HashFn, HashRing};

use axum::{Extension, Router, routing::get};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

/// Tunables for an `HttpPool`. Every node in a cluster must agree on
/// `base_path`, `replicas` and `hash`.
#[derive(Clone)]
pub struct PoolOptions {
    pub base_path: String,
    pub replicas: usize,
    /// `None` selects the ring's default hash.
    pub hash: Option<HashFn>,
    pub request_timeout: Duration,
}

impl Default for PoolOptions {
    fn default() -> Self {
        Self {
            base_path: DEFAULT_BASE_PATH.to_string(),
            replicas: DEFAULT_REPLICAS,
            hash: None,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }
}

/// Ring and per-peer clients, always replaced together.
struct PeerState {
    ring: HashRing,
    getters: HashMap<String, Arc<HttpGetter>>,
}

/// The set of HTTP peers this node talks to, including itself.
pub struct HttpPool {
    /// This node's base URL, e.g. `http://example.net:8000`.
    self_addr: String,
    base_path: String,
    options: PoolOptions,
    http_client: reqwest::Client,
    peers: Mutex<PeerState>,
}

impl HttpPool {
    pub fn new(self_addr: &str) -> Arc<Self> {
        Self::with_options(self_addr, PoolOptions::default())
    }

    pub fn with_options(self_addr: &str, options: PoolOptions) -> Arc<Self> {
        let base_path = normalize_base_path(&options.base_path);
        let ring = HashRing::new(options.replicas, options.hash);

        Arc::new(Self {
            self_addr: self_addr.trim_end_matches('/').to_string(),
            base_path,
            options,
            http_client: reqwest::Client::new(),
            peers: Mutex::new(PeerState {
                ring,
                getters: HashMap::new(),
            }),
        })
    }

    pub fn self_addr(&self) -> &str {
        &self.self_addr
    }

    pub fn base_path(&self) -> &str {
        &self.base_path
    }

    /// Replaces the peer list. Each entry is a base URL such as
    /// `http://10.0.0.2:8008`; this node's own address should be included.
    pub fn set<I, S>(&self, peers: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let peers: Vec<String> = peers
            .into_iter()
            .map(|peer| peer.as_ref().trim_end_matches('/').to_string())
            .collect();

        let mut ring = HashRing::new(self.options.replicas, self.options.hash);
        ring.add(&peers);

        let getters = peers
            .iter()
            .map(|peer| {
                let getter = HttpGetter::new(
                    format!("{}{}", peer, self.base_path),
                    self.http_client.clone(),
                    self.options.request_timeout,
                );
                (peer.clone(), Arc::new(getter))
            })
            .collect();

        *self.peers.lock() = PeerState { ring, getters };

        tracing::info!("[Server {}] Peer set updated: {:?}", self.self_addr, peers);
    }

    /// Number of configured peers, including this node.
    pub fn peer_count(&self) -> usize {
        self.peers.lock().getters.len()
    }

    /// Router serving peer requests under the base path.
    ///
    /// Requests outside the base path are logged as a routing mistake and
    /// answered with 404.
    pub fn router(self: &Arc<Self>, registry: Arc<GroupRegistry>) -> Router {
        Router::new()
            .route(&format!("{}*path", self.base_path), get(handle_peer_get))
            .fallback(handle_unexpected_path)
            .layer(Extension(registry))
            .layer(Extension(self.clone()))
    }
}

impl PeerPicker for HttpPool {
    fn pick_peer(&self, key: &str) -> Option<Arc<dyn PeerGetter>> {
        let state = self.peers.lock();
        match state.ring.get(key) {
            Some(peer) if peer != self.self_addr => {
                tracing::info!("[Server {}] Pick peer {}", self.self_addr, peer);
                let getter = state.getters.get(peer)?.clone();
                Some(getter as Arc<dyn PeerGetter>)
            }
            _ => None,
        }
    }
}
