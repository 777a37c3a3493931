//! # Search Module
//!
//! Fuzzy-matching search over the cache snapshot: weighted multi-field
//! scoring with typo tolerance, prefix autocomplete, and exact-substring
//! ingredient lookup.
//!
//! ## Key Components
//!
//! - [`engine`] - Filter, rank, paginate; autocomplete; ingredient search
//! - [`score`] - Levenshtein distance and the tiered relevance scorer
//! - [`config`] - Score tier values, thresholds, and query limits
//! - [`outputs`] - Result types handed to the surrounding application

pub mod config;
pub mod engine;
pub mod outputs;
pub mod score;

pub use engine::{SearchEngine, SearchError, SearchOptions};
pub use outputs::{Page, ScoredDish, Suggestion};
pub use score::{levenshtein, score_dish, similarity};
