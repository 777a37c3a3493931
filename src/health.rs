//! Cache health reporting
//!
//! Condenses [`CacheStats`](crate::cache::CacheStats) into a status the
//! surrounding application can expose on its health endpoint. Reading
//! health never triggers a load.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::cache::SnapshotCache;
use crate::store::CacheRecord;

/// Health view of a snapshot cache
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheHealth {
    /// "ready", "stale", or "cold"
    pub status: &'static str,
    pub loaded: bool,
    pub count: usize,
    pub last_loaded_at: Option<DateTime<Utc>>,
    pub age_seconds: Option<u64>,
}

impl CacheHealth {
    /// Whether the cache can serve reads without a blocking load
    pub fn is_ready(&self) -> bool {
        self.loaded
    }

    /// Convert to a JSON string for the health endpoint
    pub fn to_json(&self) -> String {
        serde_json::to_string(self)
            .unwrap_or_else(|_| r#"{"status":"error"}"#.to_string())
    }
}

/// Report the cache's health.
///
/// A cache counts as "stale" once its snapshot has outlived two refresh
/// intervals, i.e. the background refresh has missed at least one full
/// period; it still serves that data.
pub fn check<R: CacheRecord>(cache: &SnapshotCache<R>) -> CacheHealth {
    let stats = cache.stats();
    let stale_after = cache.config().refresh_interval * 2;
    let status = if !stats.loaded {
        "cold"
    } else if stats.age.is_some_and(|age| age > stale_after) {
        "stale"
    } else {
        "ready"
    };

    CacheHealth {
        status,
        loaded: stats.loaded,
        count: stats.count,
        last_loaded_at: stats.last_loaded_at,
        age_seconds: stats.age.map(|age| age.as_secs()),
    }
}
