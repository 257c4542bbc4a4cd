//! Peer Transport Module
//!
//! Lets nodes fetch cached values from each other over HTTP.
//!
//! ## Core Concepts
//! - **Routing**: `HttpPool` places the configured peers on a consistent hash
//!   ring and picks the owner for each key. Keys the local node owns are
//!   reported as "no remote peer" so the caller loads them itself.
//! - **Client**: `HttpGetter` requests `{peer}{base_path}{group}/{key}` and
//!   returns the raw body.
//! - **Server**: `handlers` answers those requests from the local groups.
//!
//! The peer set is static. `HttpPool::set` swaps the whole ring at once.

pub mod client;
pub mod handlers;
pub mod pool;
pub mod protocol;

pub use client::HttpGetter;
pub use pool::{HttpPool, PoolOptions};

use crate::error::Result;
use async_trait::async_trait;
use bytes::Bytes;
use std::sync::Arc;

/// Chooses the peer that owns a key.
pub trait PeerPicker: Send + Sync {
    /// Returns `None` when the key is owned locally or no peers are known.
    fn pick_peer(&self, key: &str) -> Option<Arc<dyn PeerGetter>>;
}

/// Fetches a value for `group`/`key` from one specific peer.
#[async_trait]
pub trait PeerGetter: Send + Sync {
    async fn get(&self, group: &str, key: &str) -> Result<Bytes>;
}
