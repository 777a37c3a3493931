//! Search engine over the cache snapshot
//!
//! Every operation here is a pure in-memory computation against the
//! current snapshot: an optional structural pre-filter, the tiered
//! scorer, deterministic ordering, and pagination. The only I/O is the
//! cache's own on-demand load.

use std::sync::Arc;

use thiserror::Error;

use crate::cache::snapshot::record_order;
use crate::cache::{LoadError, SnapshotCache};
use crate::model::Dish;
use crate::search::config::{DEFAULT_MIN_SCORE, DEFAULT_PAGE_LIMIT, MAX_PAGE_LIMIT, MIN_QUERY_LENGTH};
use crate::search::outputs::{Page, ScoredDish, Suggestion};
use crate::search::score::score_dish;

/// Search failure modes.
///
/// `QueryTooShort` is an input condition for the caller to map to a user
/// error; `Cache` is a real backing-store failure.
#[derive(Debug, Error)]
pub enum SearchError {
    #[error("query must be at least {min} characters")]
    QueryTooShort { min: usize },
    #[error(transparent)]
    Cache(#[from] LoadError),
}

/// Knobs for a ranked search request
#[derive(Debug, Clone)]
pub struct SearchOptions {
    /// Restrict to an exact country ID
    pub country_id: Option<String>,
    /// Restrict to an exact region
    pub region: Option<String>,
    /// Restrict to dishes carrying this category
    pub category: Option<String>,
    /// Discard hits scoring below this value
    pub min_score: u8,
    /// 1-based page number
    pub page: usize,
    pub limit: usize,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            country_id: None,
            region: None,
            category: None,
            min_score: DEFAULT_MIN_SCORE,
            page: 1,
            limit: DEFAULT_PAGE_LIMIT,
        }
    }
}

/// Ranks the cached dish collection against free-text queries
#[derive(Clone)]
pub struct SearchEngine {
    cache: SnapshotCache<Dish>,
}

impl SearchEngine {
    pub fn new(cache: SnapshotCache<Dish>) -> Self {
        Self { cache }
    }

    /// Relevance-ranked, paginated search.
    ///
    /// Hits are ordered score-descending with ties broken by the same
    /// canonical name order the cache list uses, so output is stable.
    pub async fn search(
        &self,
        query: &str,
        options: &SearchOptions,
    ) -> Result<Page<ScoredDish>, SearchError> {
        let query = query.trim().to_lowercase();
        if query.chars().count() < MIN_QUERY_LENGTH {
            return Err(SearchError::QueryTooShort {
                min: MIN_QUERY_LENGTH,
            });
        }

        let snapshot = self.cache.snapshot().await?;
        let mut hits: Vec<(u8, &Arc<Dish>)> = snapshot
            .ordered()
            .iter()
            .filter(|dish| passes_filter(dish, options))
            .filter_map(|dish| {
                let score = score_dish(dish, &query);
                (score >= options.min_score).then_some((score, dish))
            })
            .collect();
        hits.sort_by(|(score_a, dish_a), (score_b, dish_b)| {
            score_b
                .cmp(score_a)
                .then_with(|| record_order(dish_a.as_ref(), dish_b.as_ref()))
        });

        let total = hits.len();
        let (page, limit) = clamp_paging(options.page, options.limit);
        let items = hits
            .into_iter()
            .skip((page - 1).saturating_mul(limit))
            .take(limit)
            .map(|(score, dish)| ScoredDish {
                score,
                dish: dish.as_ref().clone(),
            })
            .collect();

        tracing::debug!(query = %query, total, "search ranked");
        Ok(Page::new(items, total, page, limit))
    }

    /// Prefix/substring autocomplete in snapshot list order.
    ///
    /// Scans until `limit` matches are found rather than ranking the full
    /// collection. Queries under the minimum length return no suggestions
    /// without touching the cache.
    pub async fn autocomplete(
        &self,
        query: &str,
        limit: usize,
    ) -> Result<Vec<Suggestion>, SearchError> {
        let query = query.trim().to_lowercase();
        if query.chars().count() < MIN_QUERY_LENGTH {
            return Ok(Vec::new());
        }
        let limit = limit.clamp(1, MAX_PAGE_LIMIT);

        let snapshot = self.cache.snapshot().await?;
        let mut suggestions = Vec::new();
        for dish in snapshot.ordered() {
            if suggests(dish, &query) {
                suggestions.push(Suggestion::from_dish(dish));
                if suggestions.len() == limit {
                    break;
                }
            }
        }
        Ok(suggestions)
    }

    /// Exact-substring ingredient lookup, unscored, in list order
    pub async fn search_by_ingredient(
        &self,
        ingredient: &str,
        page: usize,
        limit: usize,
    ) -> Result<Page<Dish>, SearchError> {
        let query = ingredient.trim().to_lowercase();
        if query.is_empty() {
            return Err(SearchError::QueryTooShort { min: 1 });
        }

        let snapshot = self.cache.snapshot().await?;
        let matches: Vec<&Arc<Dish>> = snapshot
            .ordered()
            .iter()
            .filter(|dish| {
                dish.ingredients
                    .iter()
                    .any(|i| i.name.to_lowercase().contains(&query))
            })
            .collect();

        let total = matches.len();
        let (page, limit) = clamp_paging(page, limit);
        let items = matches
            .into_iter()
            .skip((page - 1).saturating_mul(limit))
            .take(limit)
            .map(|dish| dish.as_ref().clone())
            .collect();
        Ok(Page::new(items, total, page, limit))
    }
}

/// Apply at most one structural filter: country, else region, else category
fn passes_filter(dish: &Dish, options: &SearchOptions) -> bool {
    if let Some(country_id) = &options.country_id {
        return dish.country_id.as_deref() == Some(country_id.as_str());
    }
    if let Some(region) = &options.region {
        return dish
            .region
            .as_deref()
            .is_some_and(|r| r.eq_ignore_ascii_case(region));
    }
    if let Some(category) = &options.category {
        return dish
            .categories
            .iter()
            .any(|c| c.eq_ignore_ascii_case(category));
    }
    true
}

/// Autocomplete predicate: name substring, local-name prefix, alias or
/// search-term substring
fn suggests(dish: &Dish, query: &str) -> bool {
    if dish.name.to_lowercase().contains(query) {
        return true;
    }
    if dish
        .local_name
        .as_deref()
        .is_some_and(|l| l.to_lowercase().starts_with(query))
    {
        return true;
    }
    dish.aliases
        .iter()
        .chain(dish.search_terms.iter())
        .any(|entry| entry.to_lowercase().contains(query))
}

fn clamp_paging(page: usize, limit: usize) -> (usize, usize) {
    (page.max(1), limit.clamp(1, MAX_PAGE_LIMIT))
}
