//! Immutable point-in-time view of the cached collection
//!
//! A [`Snapshot`] holds the same record set twice: an ID-indexed map for
//! O(1) lookups and a name-ordered list for scans. Both views share the
//! records through `Arc`, and a snapshot is never mutated after
//! construction; point writes build a new snapshot from the old one.

use std::cmp::Ordering;
use std::collections::HashMap;
use std::sync::Arc;

use crate::store::CacheRecord;

/// Canonical name ordering: case-insensitive, byte-order tie-break.
///
/// This is the ONE comparator in the crate. It orders the snapshot list
/// and breaks ties between equally-scored search results, so ranked
/// output and `get_all` always agree.
pub fn name_order(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

/// Full record ordering: canonical name order, then ID.
pub fn record_order<R: CacheRecord>(a: &R, b: &R) -> Ordering {
    name_order(a.name(), b.name()).then_with(|| a.id().cmp(b.id()))
}

/// Immutable pair of (ID-indexed map, name-ordered list)
#[derive(Debug)]
pub struct Snapshot<R> {
    by_id: HashMap<String, Arc<R>>,
    ordered: Vec<Arc<R>>,
}

impl<R: CacheRecord> Snapshot<R> {
    /// Build a snapshot from a freshly loaded record set.
    ///
    /// Duplicate IDs collapse to the last occurrence so a page boundary
    /// race in the backing scan cannot produce a double entry.
    pub fn from_records(records: Vec<R>) -> Self {
        let mut by_id = HashMap::with_capacity(records.len());
        for record in records {
            by_id.insert(record.id().to_string(), Arc::new(record));
        }
        Self::from_map(by_id)
    }

    fn from_map(by_id: HashMap<String, Arc<R>>) -> Self {
        let mut ordered: Vec<Arc<R>> = by_id.values().cloned().collect();
        ordered.sort_by(|a, b| record_order(a.as_ref(), b.as_ref()));
        Self { by_id, ordered }
    }

    /// New snapshot with one record inserted or replaced
    pub fn with_upsert(&self, record: R) -> Self {
        let mut by_id = self.by_id.clone();
        by_id.insert(record.id().to_string(), Arc::new(record));
        Self::from_map(by_id)
    }

    /// New snapshot with one record removed, or `None` if the ID is absent
    pub fn with_removed(&self, id: &str) -> Option<Self> {
        if !self.by_id.contains_key(id) {
            return None;
        }
        let mut by_id = self.by_id.clone();
        by_id.remove(id);
        Some(Self::from_map(by_id))
    }

    /// O(1) lookup by ID
    pub fn get(&self, id: &str) -> Option<&Arc<R>> {
        self.by_id.get(id)
    }

    /// Records in canonical name order
    pub fn ordered(&self) -> &[Arc<R>] {
        &self.ordered
    }

    pub fn len(&self) -> usize {
        self.ordered.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ordered.is_empty()
    }
}
