//! Local Cache Module
//!
//! The in-memory layer each group keeps for the keys it has loaded.
//!
//! ## Components
//! - **`store`**: `LruStore`, a byte-budgeted least-recently-used store with an
//!   optional eviction hook. Not thread safe on its own.
//! - **`concurrent`**: `ConcurrentCache`, a mutex around a lazily built `LruStore`.
//! - **`byteview`**: `ByteView`, the immutable value handed back to callers.

pub mod byteview;
pub mod concurrent;
pub mod store;

pub use byteview::ByteView;
pub use concurrent::ConcurrentCache;
pub use store::{EvictionHook, LruStore};

#[cfg(test)]
mod tests;
