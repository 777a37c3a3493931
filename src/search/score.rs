//! Relevance scoring
//!
//! A dish is scored 0..=100 against a normalized query by taking the
//! maximum across independent field checks: three exact-match tiers that
//! short-circuit, a ladder of prefix/substring tiers, and edit-distance
//! fuzzy tiers for typo tolerance. Scores are never summed; a record
//! keeps only its single strongest signal.

use crate::model::Dish;
use crate::search::config::*;

/// Classic Levenshtein distance (insert/delete/substitute, unit cost)
/// computed over a full dynamic-programming table of the two strings.
pub fn levenshtein(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }

    let mut table = vec![vec![0usize; b.len() + 1]; a.len() + 1];
    for (i, row) in table.iter_mut().enumerate() {
        row[0] = i;
    }
    for (j, cell) in table[0].iter_mut().enumerate() {
        *cell = j;
    }

    for i in 1..=a.len() {
        for j in 1..=b.len() {
            let substitute = table[i - 1][j - 1] + usize::from(a[i - 1] != b[j - 1]);
            let delete = table[i - 1][j] + 1;
            let insert = table[i][j - 1] + 1;
            table[i][j] = substitute.min(delete).min(insert);
        }
    }

    table[a.len()][b.len()]
}

/// Normalized similarity in 0.0..=1.0: `1 - distance / max(len)`
pub fn similarity(a: &str, b: &str) -> f64 {
    let longest = a.chars().count().max(b.chars().count());
    if longest == 0 {
        return 1.0;
    }
    1.0 - levenshtein(a, b) as f64 / longest as f64
}

/// Score a dish against a query.
///
/// The query must already be trimmed and lowercased; dish fields are
/// lowercased here, so scoring is case-insensitive end to end.
pub fn score_dish(dish: &Dish, query: &str) -> u8 {
    let name = dish.name.to_lowercase();
    if name == query {
        return SCORE_NAME_EXACT;
    }

    let local_name = dish.local_name.as_deref().map(str::to_lowercase);
    if local_name.as_deref() == Some(query) {
        return SCORE_LOCAL_NAME_EXACT;
    }

    // empty entries would make the reversed containment checks match
    // everything, so they are dropped up front
    let aliases: Vec<String> = dish
        .aliases
        .iter()
        .map(|a| a.to_lowercase())
        .filter(|a| !a.is_empty())
        .collect();
    if aliases.iter().any(|a| a == query) {
        return SCORE_ALIAS_EXACT;
    }

    let terms: Vec<String> = dish
        .search_terms
        .iter()
        .map(|t| t.to_lowercase())
        .filter(|t| !t.is_empty())
        .collect();
    let tags: Vec<String> = dish.tags.iter().map(|t| t.to_lowercase()).collect();

    let mut best = 0u8;

    if name.starts_with(query) {
        best = best.max(SCORE_NAME_PREFIX);
    }
    if terms.iter().any(|t| t == query) {
        best = best.max(SCORE_SEARCH_TERM_EXACT);
    }
    if name.contains(query) {
        best = best.max(SCORE_NAME_CONTAINS);
    }
    if local_name.as_deref().is_some_and(|l| l.contains(query)) {
        best = best.max(SCORE_LOCAL_NAME_CONTAINS);
    }
    if aliases
        .iter()
        .any(|a| a.contains(query) || query.contains(a.as_str()))
    {
        best = best.max(SCORE_ALIAS_CONTAINS);
    }
    if tags.iter().any(|t| t == query) {
        best = best.max(SCORE_TAG_EXACT);
    }
    if terms
        .iter()
        .any(|t| t.contains(query) || query.contains(t.as_str()))
    {
        best = best.max(SCORE_SEARCH_TERM_CONTAINS);
    }
    if tags.iter().any(|t| t.contains(query)) {
        best = best.max(SCORE_TAG_CONTAINS);
    }
    if dish
        .categories
        .iter()
        .any(|c| c.to_lowercase().contains(query))
    {
        best = best.max(SCORE_CATEGORY_CONTAINS);
    }
    if dish
        .country_name
        .as_deref()
        .is_some_and(|c| c.to_lowercase().contains(query))
    {
        best = best.max(SCORE_COUNTRY_CONTAINS);
    }
    if dish
        .region
        .as_deref()
        .is_some_and(|r| r.to_lowercase().contains(query))
    {
        best = best.max(SCORE_REGION_CONTAINS);
    }
    if dish
        .description
        .as_deref()
        .is_some_and(|d| d.to_lowercase().contains(query))
    {
        best = best.max(SCORE_DESCRIPTION_CONTAINS);
    }

    let sim = similarity(query, &name);
    if sim >= FUZZY_NAME_THRESHOLD {
        best = best.max((sim * FUZZY_NAME_WEIGHT).round() as u8);
    }
    for alias in &aliases {
        let sim = similarity(query, alias);
        if sim >= FUZZY_ALIAS_THRESHOLD {
            best = best.max((sim * FUZZY_ALIAS_WEIGHT).round() as u8);
        }
    }
    for word in name.split(|c: char| !c.is_alphanumeric()).filter(|w| !w.is_empty()) {
        let sim = similarity(query, word);
        if sim >= FUZZY_WORD_THRESHOLD {
            best = best.max((sim * FUZZY_WORD_WEIGHT).round() as u8);
        }
    }

    best
}
