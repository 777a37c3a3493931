//! Output types for search operations
//!
//! Serialized by the surrounding application straight onto its API
//! surface; deserialized in tests for type-safe assertions.

use serde::{Deserialize, Serialize};

use crate::model::Dish;

/// A ranked search hit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredDish {
    /// Relevance score, 0..=100
    pub score: u8,
    pub dish: Dish,
}

/// A lightweight autocomplete suggestion
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Suggestion {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub local_name: Option<String>,
}

impl Suggestion {
    pub fn from_dish(dish: &Dish) -> Self {
        Self {
            id: dish.id.clone(),
            name: dish.name.clone(),
            local_name: dish.local_name.clone(),
        }
    }
}

/// One page of an ordered result set
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub items: Vec<T>,
    /// Total matches across all pages
    pub total: usize,
    pub page: usize,
    pub limit: usize,
    pub total_pages: usize,
}

impl<T> Page<T> {
    /// Build a page, deriving `total_pages` from total and limit
    pub fn new(items: Vec<T>, total: usize, page: usize, limit: usize) -> Self {
        Self {
            items,
            total,
            page,
            limit,
            total_pages: total.div_ceil(limit.max(1)),
        }
    }

    pub fn has_results(&self) -> bool {
        !self.items.is_empty()
    }
}

impl<T: Serialize> Page<T> {
    /// Convert to a JSON string for the API surface
    pub fn to_json(&self) -> String {
        serde_json::to_string(self)
            .unwrap_or_else(|_| r#"{"error":"Failed to serialize response"}"#.to_string())
    }
}
