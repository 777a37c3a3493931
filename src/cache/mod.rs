//! # Cache Module
//!
//! In-memory cache of the full record collection, shielding the slow and
//! quota-limited backing store from read traffic.
//!
//! ## Key Components
//!
//! - [`service`] - The cache lifecycle: single-flight loads, refresh,
//!   write-through, invalidation, stats
//! - [`snapshot`] - The immutable (map, ordered list) pair served to
//!   readers, plus the canonical record ordering
//!
//! The cache never evicts on its own: it is a full-working-set cache, not
//! an LRU. Records leave only through `remove` or `invalidate`.

pub mod service;
pub mod snapshot;

pub use service::{CacheConfig, CacheStats, LoadError, SnapshotCache};
pub use snapshot::{Snapshot, name_order, record_order};
