//! Snapshot cache service
//!
//! Owns the load/refresh/consistency lifecycle described in the crate
//! docs: single-flight bulk loads, wholesale snapshot swaps, write-through
//! point mutations, and a background refresh task that is allowed to fail
//! without ever degrading the read path.

use std::sync::{Arc, Mutex, RwLock};
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use futures::FutureExt;
use futures::future::{BoxFuture, Shared};
use serde::Serialize;
use thiserror::Error;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use crate::cache::snapshot::Snapshot;
use crate::store::{CacheRecord, PageCursor, RecordStore};

/// Default number of records fetched per backing-store page
pub const DEFAULT_PAGE_SIZE: usize = 100;

/// Default snapshot refresh interval
pub const DEFAULT_REFRESH_INTERVAL: Duration = Duration::from_secs(300);

/// A bulk load against the backing store failed.
///
/// Cloneable so that every caller coalesced onto the same in-flight load
/// receives the one outcome that load produced.
#[derive(Debug, Clone, Error)]
#[error("bulk load from backing store failed: {0:#}")]
pub struct LoadError(Arc<anyhow::Error>);

impl LoadError {
    fn new(err: anyhow::Error) -> Self {
        Self(Arc::new(err))
    }
}

/// Cache tuning knobs
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// Page size for the backing-store full scan
    pub page_size: usize,
    /// Snapshot age beyond which reads trigger a reload, and the period
    /// of the background refresh task
    pub refresh_interval: Duration,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            refresh_interval: DEFAULT_REFRESH_INTERVAL,
        }
    }
}

impl CacheConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the backing-store page size (clamped to at least 1)
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    /// Set the refresh interval
    pub fn with_refresh_interval(mut self, interval: Duration) -> Self {
        self.refresh_interval = interval;
        self
    }
}

/// Introspection snapshot of the cache state. Never triggers a load.
#[derive(Debug, Clone, Serialize)]
pub struct CacheStats {
    pub loaded: bool,
    pub count: usize,
    pub last_loaded_at: Option<DateTime<Utc>>,
    pub age: Option<Duration>,
}

struct Loaded<R> {
    snapshot: Arc<Snapshot<R>>,
    loaded_at: Instant,
    loaded_at_utc: DateTime<Utc>,
}

/// Mutable cache state behind the read-write lock.
///
/// `last_attempt` stamps every finished load, successful or not.
/// Freshness is measured against the attempt, not the success: after a
/// failed refresh the cache serves the previous snapshot until the next
/// scheduled refresh or caller-triggered reload, instead of turning
/// every read into a retry.
struct CacheState<R> {
    loaded: Option<Loaded<R>>,
    last_attempt: Option<Instant>,
}

type LoadOutcome<R> = Result<Arc<Snapshot<R>>, LoadError>;
type SharedLoad<R> = Shared<BoxFuture<'static, LoadOutcome<R>>>;

struct CacheInner<R: CacheRecord> {
    store: Arc<dyn RecordStore<R>>,
    config: CacheConfig,
    /// Current snapshot; the write lock is held only for the swap instant
    /// or a point mutation, never across store I/O.
    state: RwLock<CacheState<R>>,
    /// The single in-flight bulk load, if any. Late callers clone and
    /// await this instead of triggering their own load.
    in_flight: Mutex<Option<SharedLoad<R>>>,
}

/// In-memory cache of the full record collection.
///
/// Holds the working set as an immutable [`Snapshot`] replaced wholesale
/// on load and refresh, so readers never observe a partially populated
/// collection. Cheap to clone; clones share state.
pub struct SnapshotCache<R: CacheRecord> {
    inner: Arc<CacheInner<R>>,
}

impl<R: CacheRecord> Clone for SnapshotCache<R> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<R: CacheRecord> SnapshotCache<R> {
    /// Create a cache over the given backing store
    pub fn new(store: Arc<dyn RecordStore<R>>, config: CacheConfig) -> Self {
        Self {
            inner: Arc::new(CacheInner {
                store,
                config,
                state: RwLock::new(CacheState {
                    loaded: None,
                    last_attempt: None,
                }),
                in_flight: Mutex::new(None),
            }),
        }
    }

    /// Create a cache with default configuration
    pub fn with_defaults(store: Arc<dyn RecordStore<R>>) -> Self {
        Self::new(store, CacheConfig::default())
    }

    /// The configuration this cache was built with
    pub fn config(&self) -> &CacheConfig {
        &self.inner.config
    }

    /// Perform (or join) a bulk load from the backing store.
    ///
    /// If a load is already in flight, this call attaches to it and
    /// receives the same outcome; exactly one scan hits the backing store
    /// no matter how many callers arrive concurrently. On success the new
    /// snapshot is swapped in atomically; on failure any existing
    /// snapshot is left untouched.
    pub async fn warm_up(&self) -> Result<(), LoadError> {
        self.join_load().await.map(|_| ())
    }

    /// Current snapshot, loading or reloading first when the cache is
    /// cold or the snapshot has outlived the refresh interval.
    pub async fn snapshot(&self) -> Result<Arc<Snapshot<R>>, LoadError> {
        if let Some(current) = self.current_if_fresh() {
            return Ok(current);
        }
        self.join_load().await
    }

    /// All records in canonical name order
    pub async fn get_all(&self) -> Result<Vec<Arc<R>>, LoadError> {
        Ok(self.snapshot().await?.ordered().to_vec())
    }

    /// O(1) lookup by ID. A miss is `Ok(None)`, not an error.
    pub async fn get_by_id(&self, id: &str) -> Result<Option<Arc<R>>, LoadError> {
        Ok(self.snapshot().await?.get(id).cloned())
    }

    /// Write-through insert/replace of one record.
    ///
    /// No-op on a never-loaded cache: the next bulk load reads a backing
    /// store that already contains this write, so nothing is lost.
    pub fn upsert(&self, record: R) {
        let mut state = self.inner.state.write().expect("cache state lock poisoned");
        match state.loaded.as_mut() {
            Some(loaded) => {
                loaded.snapshot = Arc::new(loaded.snapshot.with_upsert(record));
            }
            None => {
                tracing::debug!(id = record.id(), "upsert before first load, skipping");
            }
        }
    }

    /// Write-through removal of one record. No-op if absent.
    pub fn remove(&self, id: &str) {
        let mut state = self.inner.state.write().expect("cache state lock poisoned");
        if let Some(loaded) = state.loaded.as_mut()
            && let Some(next) = loaded.snapshot.with_removed(id)
        {
            loaded.snapshot = Arc::new(next);
        }
    }

    /// Discard the current snapshot; the next read reloads synchronously
    pub fn invalidate(&self) {
        let mut state = self.inner.state.write().expect("cache state lock poisoned");
        state.loaded = None;
        state.last_attempt = None;
        tracing::info!("cache invalidated, next read triggers a full reload");
    }

    /// Whether a snapshot has ever been loaded
    pub fn is_loaded(&self) -> bool {
        self.inner
            .state
            .read()
            .expect("cache state lock poisoned")
            .loaded
            .is_some()
    }

    /// Cache statistics for health reporting. Never triggers a load.
    pub fn stats(&self) -> CacheStats {
        let state = self.inner.state.read().expect("cache state lock poisoned");
        match state.loaded.as_ref() {
            Some(loaded) => CacheStats {
                loaded: true,
                count: loaded.snapshot.len(),
                last_loaded_at: Some(loaded.loaded_at_utc),
                age: Some(loaded.loaded_at.elapsed()),
            },
            None => CacheStats {
                loaded: false,
                count: 0,
                last_loaded_at: None,
                age: None,
            },
        }
    }

    /// Spawn the periodic background refresh task.
    ///
    /// Ticks are skipped until the first warm-up has succeeded and while
    /// a previous refresh is still running. A failed refresh keeps the
    /// previous snapshot and logs; it never surfaces to readers.
    pub fn spawn_refresh(&self) -> JoinHandle<()> {
        let cache = self.clone();
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(cache.inner.config.refresh_interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
            // interval yields immediately; consume that tick so the first
            // refresh lands one full period after spawn
            ticker.tick().await;
            loop {
                ticker.tick().await;
                if !cache.is_loaded() {
                    continue;
                }
                match cache.warm_up().await {
                    Ok(()) => tracing::debug!("background refresh complete"),
                    Err(e) => {
                        tracing::warn!("background refresh failed, keeping previous snapshot: {e}");
                    }
                }
            }
        })
    }

    /// Bump a record's view counter on the backing store without blocking
    /// the caller. Failures are logged on the spawned task and dropped.
    pub fn record_view_detached(&self, id: &str) {
        let store = Arc::clone(&self.inner.store);
        let id = id.to_string();
        tokio::spawn(async move {
            if let Err(e) = store.increment_views(&id).await {
                tracing::warn!("view-count bump for {id} failed: {e:#}");
            }
        });
    }

    fn current_if_fresh(&self) -> Option<Arc<Snapshot<R>>> {
        let state = self.inner.state.read().expect("cache state lock poisoned");
        let loaded = state.loaded.as_ref()?;
        let fresh = state
            .last_attempt
            .is_some_and(|at| at.elapsed() < self.inner.config.refresh_interval);
        fresh.then(|| Arc::clone(&loaded.snapshot))
    }

    /// Join the in-flight load if one exists, otherwise start one
    fn join_load(&self) -> SharedLoad<R> {
        let mut in_flight = self.inner.in_flight.lock().expect("in-flight lock poisoned");
        if let Some(load) = in_flight.as_ref() {
            return load.clone();
        }

        let inner = Arc::clone(&self.inner);
        let load: SharedLoad<R> = async move {
            let outcome = match load_full(inner.store.as_ref(), inner.config.page_size).await {
                Ok(records) => {
                    let snapshot = Arc::new(Snapshot::from_records(records));
                    let mut state = inner.state.write().expect("cache state lock poisoned");
                    state.loaded = Some(Loaded {
                        snapshot: Arc::clone(&snapshot),
                        loaded_at: Instant::now(),
                        loaded_at_utc: Utc::now(),
                    });
                    state.last_attempt = Some(Instant::now());
                    drop(state);
                    tracing::info!(count = snapshot.len(), "snapshot swapped in");
                    Ok(snapshot)
                }
                Err(e) => {
                    let mut state = inner.state.write().expect("cache state lock poisoned");
                    state.last_attempt = Some(Instant::now());
                    drop(state);
                    tracing::warn!("bulk load failed: {e:#}");
                    Err(LoadError::new(e))
                }
            };
            *inner.in_flight.lock().expect("in-flight lock poisoned") = None;
            outcome
        }
        .boxed()
        .shared();

        *in_flight = Some(load.clone());
        load
    }
}

/// Cursor-paginated full scan, accumulated before any snapshot swap
async fn load_full<R: CacheRecord>(
    store: &dyn RecordStore<R>,
    page_size: usize,
) -> Result<Vec<R>> {
    let mut all = Vec::new();
    let mut cursor: Option<PageCursor> = None;
    loop {
        let page = store
            .list_page(cursor.as_ref(), page_size)
            .await
            .context("listing records from backing store")?;
        let full_page = page.len() == page_size;
        cursor = page.last().map(PageCursor::after);
        all.extend(page);
        if !full_page {
            break;
        }
    }
    tracing::debug!(count = all.len(), "full collection scan finished");
    Ok(all)
}
