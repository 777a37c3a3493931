//! # mealdex
//!
//! Read-path acceleration for a dish catalog backed by a slow,
//! quota-limited remote document store: an in-memory full-working-set
//! cache plus a fuzzy-matching search engine over its snapshot.
//!
//! The embedding application wires a [`store::RecordStore`]
//! implementation into a [`SnapshotCache`], calls
//! [`warm_up`](SnapshotCache::warm_up) once at startup (best-effort; the
//! next read retries), spawns the background refresh, and pushes every
//! successful backing-store write back through
//! [`upsert`](SnapshotCache::upsert)/[`remove`](SnapshotCache::remove).

pub mod cache;
pub mod health;
pub mod model;
pub mod search;
pub mod store;

pub use cache::{CacheConfig, CacheStats, LoadError, SnapshotCache};
pub use model::{Dish, Ingredient};
pub use search::{SearchEngine, SearchError, SearchOptions};

/// The cache specialization used throughout the dish catalog
pub type DishCache = SnapshotCache<Dish>;
