//! # Search Configuration Module
//!
//! Score tier values, fuzzy-match thresholds, and query limits.
//!
//! Scoring takes the MAXIMUM across field checks, so a record matches on
//! its single strongest signal; these constants define that hierarchy.
//! Exact name beats prefix beats substring beats fuzzy, and identity
//! fields (name, local name, alias) outrank descriptive ones (tags,
//! categories, country, region, description).

/// Minimum query length for ranked search and autocomplete
pub const MIN_QUERY_LENGTH: usize = 2;

/// Default score cutoff for ranked search results
pub const DEFAULT_MIN_SCORE: u8 = 30;

/// Default page size for ranked and ingredient search
pub const DEFAULT_PAGE_LIMIT: usize = 20;

/// Maximum allowed page size / suggestion count
pub const MAX_PAGE_LIMIT: usize = 100;

/// Exact name match (short-circuits every other check)
pub const SCORE_NAME_EXACT: u8 = 100;
/// Exact local-name match (short-circuits)
pub const SCORE_LOCAL_NAME_EXACT: u8 = 95;
/// Exact alias match (short-circuits)
pub const SCORE_ALIAS_EXACT: u8 = 92;
/// Name starts with the query
pub const SCORE_NAME_PREFIX: u8 = 90;
/// A search term equals the query
pub const SCORE_SEARCH_TERM_EXACT: u8 = 85;
/// Name contains the query
pub const SCORE_NAME_CONTAINS: u8 = 80;
/// Local name contains the query
pub const SCORE_LOCAL_NAME_CONTAINS: u8 = 78;
/// Alias contains the query, or the query contains the alias
pub const SCORE_ALIAS_CONTAINS: u8 = 75;
/// A tag equals the query
pub const SCORE_TAG_EXACT: u8 = 72;
/// A search term contains, or is contained by, the query
pub const SCORE_SEARCH_TERM_CONTAINS: u8 = 70;
/// A tag contains the query
pub const SCORE_TAG_CONTAINS: u8 = 60;
/// A category contains the query
pub const SCORE_CATEGORY_CONTAINS: u8 = 55;
/// Country name contains the query
pub const SCORE_COUNTRY_CONTAINS: u8 = 50;
/// Region contains the query
pub const SCORE_REGION_CONTAINS: u8 = 48;
/// Description contains the query
pub const SCORE_DESCRIPTION_CONTAINS: u8 = 40;

/// Similarity floor for a fuzzy match against the full name
pub const FUZZY_NAME_THRESHOLD: f64 = 0.70;
/// Similarity floor for a fuzzy match against an alias
pub const FUZZY_ALIAS_THRESHOLD: f64 = 0.70;
/// Similarity floor for a fuzzy match against a single name word
pub const FUZZY_WORD_THRESHOLD: f64 = 0.75;

/// Score weight for a fuzzy full-name match
pub const FUZZY_NAME_WEIGHT: f64 = 70.0;
/// Score weight for a fuzzy alias match
pub const FUZZY_ALIAS_WEIGHT: f64 = 65.0;
/// Score weight for a fuzzy name-word match
pub const FUZZY_WORD_WEIGHT: f64 = 68.0;
