//! Cache Groups
//!
//! A group is a named cache namespace, e.g. `scores` or `courses`. Each one
//! owns its local cache and the loader used to produce values on a miss.
//!
//! ## Lookup Flow
//! 1. **Local**: the group's `ConcurrentCache` is checked first.
//! 2. **Remote**: on a miss the registered `PeerPicker` may name a remote
//!    owner, which is asked over HTTP. Its answer is returned as is.
//! 3. **Load**: if no peer owns the key, or the peer fails, the `Getter`
//!    runs and its result is stored in the local cache.
//!
//! Steps 2 and 3 run through a `SingleFlight`, so concurrent misses on the
//! same key trigger a single fetch or load.

pub mod getter;
pub mod group;
pub mod registry;

pub use getter::Getter;
pub use group::Group;
pub use registry::GroupRegistry;
