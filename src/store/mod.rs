//! # Store Module
//!
//! Boundary contract between the cache and the backing document store.
//!
//! The cache never talks to a concrete database; it sees an ordered,
//! cursor-paginated scan plus point writes through [`RecordStore`]. Point
//! writes are issued by the surrounding application, which is expected to
//! push the same delta into the cache once the write succeeds.
//!
//! ## Key Components
//!
//! - [`CacheRecord`] - Marker trait for anything the cache can hold
//! - [`PageCursor`] - Continuation cursor for the ordered full scan
//! - [`RecordStore`] - The backing document store abstraction
//! - [`memory`] - In-memory reference backend used in tests and demos

pub mod memory;

use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

pub use memory::InMemoryStore;

/// A record the cache can hold: stable unique ID plus a display name.
///
/// The cache sorts and tie-breaks on `name` and indexes on `id`; it never
/// interprets any other field.
pub trait CacheRecord: Clone + Send + Sync + 'static {
    /// Stable unique identifier
    fn id(&self) -> &str;

    /// Display name, the default sort key
    fn name(&self) -> &str;

    /// Return this record carrying a store-assigned ID
    fn with_id(self, id: String) -> Self;
}

/// Continuation cursor for the paginated full scan.
///
/// Carries both name and ID so that records sharing a name are never
/// skipped across a page boundary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageCursor {
    pub name: String,
    pub id: String,
}

impl PageCursor {
    /// Cursor pointing just after the given record
    pub fn after<R: CacheRecord>(record: &R) -> Self {
        Self {
            name: record.name().to_string(),
            id: record.id().to_string(),
        }
    }
}

/// Abstract backing document store.
///
/// `list_page` must return records ordered by name (ties broken by ID,
/// the same order [`record_order`] produces) and resume strictly after
/// `after` when a cursor is given. The write operations are called by
/// external collaborators, not by the cache itself; their success is the
/// precondition for the corresponding cache write-through call.
///
/// [`record_order`]: crate::cache::snapshot::record_order
#[async_trait]
pub trait RecordStore<R: CacheRecord>: Send + Sync {
    /// One page of the ordered full scan
    async fn list_page(&self, after: Option<&PageCursor>, page_size: usize) -> Result<Vec<R>>;

    /// Insert a new record, returning its assigned ID. Records arriving
    /// with an empty ID get one minted by the store.
    async fn create(&self, record: R) -> Result<String>;

    /// Replace an existing record
    async fn update(&self, id: &str, record: R) -> Result<()>;

    /// Delete a record
    async fn delete(&self, id: &str) -> Result<()>;

    /// Bump a record's view counter. Used by the fire-and-forget read
    /// path; implementations should make this cheap.
    async fn increment_views(&self, id: &str) -> Result<()>;
}
