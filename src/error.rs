//! Error types for the cache
//!
//! Configuration mistakes (registering a peer router twice, reusing a group
//! name) are programmer errors and panic at startup. Everything below is a
//! runtime condition returned to the caller.

use thiserror::Error;

/// Common result type for cache operations
pub type Result<T> = std::result::Result<T, CacheError>;

/// Errors surfaced by groups, the peer transport and the deduplicator.
///
/// The type is `Clone` because a single in-flight load hands the same result
/// to every caller waiting on it.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CacheError {
    #[error("key is required")]
    EmptyKey,

    #[error("no such group: {0}")]
    GroupNotFound(String),

    /// The user loader failed. The message is passed through verbatim.
    #[error("{0}")]
    Loader(String),

    #[error("server returned: {status}")]
    PeerStatus { status: String },

    #[error("peer request failed: {0}")]
    PeerTransport(String),

    #[error("bad request: {0}")]
    BadRequest(String),

    #[error("in-flight load for key {0} was interrupted")]
    Interrupted(String),
}

impl CacheError {
    /// Transport errors are recovered by falling back to the local loader.
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::PeerStatus { .. } | Self::PeerTransport(_))
    }
}

impl From<reqwest::Error> for CacheError {
    fn from(err: reqwest::Error) -> Self {
        Self::PeerTransport(err.to_string())
    }
}
