//! Distributed In-Process Cache Library
//!
//! A node keeps a bounded cache per named group. On a miss the value is either
//! fetched from the peer that owns the key, chosen by consistent hashing, or
//! produced by the group's loader and cached locally. A peer that cannot be
//! reached is treated like a local miss.
//!
//! ## Architecture Modules
//!
//! - **`cache`**: The local storage layer. A byte-budgeted LRU store, its
//!   mutex-guarded wrapper and the immutable `ByteView` values.
//! - **`ring`**: Consistent hash ring with virtual nodes, mapping keys to peers.
//! - **`singleflight`**: Collapses concurrent loads of the same key into one.
//! - **`group`**: Cache namespaces and the registry that owns them. Implements
//!   the hit / remote fetch / local load flow.
//! - **`peers`**: The HTTP transport. Peer selection, the client used to fetch
//!   from other nodes and the axum handlers that answer them.
//! - **`config`**: TOML node configuration.
//! - **`error`**: The `CacheError` type shared by all of the above.

pub mod cache;
pub mod config;
pub mod error;
pub mod group;
pub mod peers;
pub mod ring;
pub mod singleflight;

pub use cache::ByteView;
pub use error::{CacheError, Result};
pub use group::{Getter, Group, GroupRegistry};
pub use peers::{HttpPool, PeerGetter, PeerPicker};
