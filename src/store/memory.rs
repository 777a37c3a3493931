//! In-memory reference backend
//!
//! Keeps records in a BTreeMap whose key reproduces the canonical
//! (case-insensitive name, name, ID) ordering, so `list_page` serves the
//! ordered scan the cache loader expects without sorting per call. Used
//! by the test suites and as a seed backend for demos.

use std::collections::{BTreeMap, HashMap};
use std::ops::Bound;

use anyhow::{Result, bail};
use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::store::{CacheRecord, PageCursor, RecordStore};

/// Matches `record_order`: lowercased name, then raw name, then ID
type SortKey = (String, String, String);

fn sort_key(name: &str, id: &str) -> SortKey {
    (name.to_lowercase(), name.to_string(), id.to_string())
}

#[derive(Debug, Default)]
struct StoreInner<R> {
    records: BTreeMap<SortKey, R>,
    /// ID -> current sort key, so point writes can find their entry
    by_id: HashMap<String, SortKey>,
    /// View counters live beside the documents, not inside them
    views: HashMap<String, u64>,
}

/// Process-memory implementation of [`RecordStore`]
#[derive(Debug)]
pub struct InMemoryStore<R> {
    inner: RwLock<StoreInner<R>>,
}

impl<R: CacheRecord> InMemoryStore<R> {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(StoreInner {
                records: BTreeMap::new(),
                by_id: HashMap::new(),
                views: HashMap::new(),
            }),
        }
    }

    /// Seed the store with a batch of records, replacing on ID collision
    pub async fn seed(&self, records: impl IntoIterator<Item = R>) {
        let mut inner = self.inner.write().await;
        for record in records {
            inner.put(record);
        }
    }

    /// Number of records currently stored
    pub async fn len(&self) -> usize {
        self.inner.read().await.records.len()
    }

    /// Current view counter for a record
    pub async fn views(&self, id: &str) -> u64 {
        self.inner
            .read()
            .await
            .views
            .get(id)
            .copied()
            .unwrap_or(0)
    }
}

impl<R: CacheRecord> Default for InMemoryStore<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: CacheRecord> StoreInner<R> {
    fn put(&mut self, record: R) {
        let key = sort_key(record.name(), record.id());
        if let Some(old_key) = self.by_id.insert(record.id().to_string(), key.clone()) {
            self.records.remove(&old_key);
        }
        self.records.insert(key, record);
    }
}

#[async_trait]
impl<R: CacheRecord> RecordStore<R> for InMemoryStore<R> {
    async fn list_page(&self, after: Option<&PageCursor>, page_size: usize) -> Result<Vec<R>> {
        let inner = self.inner.read().await;
        let lower = match after {
            Some(cursor) => Bound::Excluded(sort_key(&cursor.name, &cursor.id)),
            None => Bound::Unbounded,
        };
        Ok(inner
            .records
            .range((lower, Bound::Unbounded))
            .take(page_size)
            .map(|(_, record)| record.clone())
            .collect())
    }

    async fn create(&self, record: R) -> Result<String> {
        let id = if record.id().is_empty() {
            Uuid::new_v4().to_string()
        } else {
            record.id().to_string()
        };
        let mut inner = self.inner.write().await;
        if inner.by_id.contains_key(&id) {
            bail!("record {id} already exists");
        }
        inner.put(record.with_id(id.clone()));
        Ok(id)
    }

    async fn update(&self, id: &str, record: R) -> Result<()> {
        let mut inner = self.inner.write().await;
        if !inner.by_id.contains_key(id) {
            bail!("record {id} not found");
        }
        inner.put(record.with_id(id.to_string()));
        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<()> {
        let mut inner = self.inner.write().await;
        if let Some(key) = inner.by_id.remove(id) {
            inner.records.remove(&key);
            inner.views.remove(id);
        }
        Ok(())
    }

    async fn increment_views(&self, id: &str) -> Result<()> {
        let mut inner = self.inner.write().await;
        if !inner.by_id.contains_key(id) {
            bail!("record {id} not found");
        }
        *inner.views.entry(id.to_string()).or_insert(0) += 1;
        Ok(())
    }
}
