//! Record types for the dish catalog
//!
//! These mirror the documents held by the backing store. The cache layer
//! only ever looks at `id` and `name` (via [`CacheRecord`]); every other
//! field exists for the search engine.
//!
//! [`CacheRecord`]: crate::store::CacheRecord

use serde::{Deserialize, Serialize};

use crate::store::CacheRecord;

/// A single ingredient entry on a dish
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ingredient {
    pub name: String,
    /// Free-form quantity, e.g. "2 cups"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity: Option<String>,
}

impl Ingredient {
    /// Create an ingredient with just a name
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            quantity: None,
        }
    }
}

/// A dish document as stored in the backing collection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dish {
    pub id: String,
    pub name: String,
    /// Name in the dish's language of origin
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub local_name: Option<String>,
    /// Alternative names and common spellings
    #[serde(default)]
    pub aliases: Vec<String>,
    /// Curated keywords for search
    #[serde(default)]
    pub search_terms: Vec<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub categories: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub ingredients: Vec<Ingredient>,
    /// Read-path popularity counter, bumped fire-and-forget
    #[serde(default)]
    pub view_count: u64,
}

impl Dish {
    /// Create a minimal dish with the given id and name
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            local_name: None,
            aliases: Vec::new(),
            search_terms: Vec::new(),
            tags: Vec::new(),
            categories: Vec::new(),
            region: None,
            country_id: None,
            country_name: None,
            description: None,
            ingredients: Vec::new(),
            view_count: 0,
        }
    }
}

impl CacheRecord for Dish {
    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn with_id(mut self, id: String) -> Self {
        self.id = id;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dish_wire_format_is_camel_case() {
        let mut dish = Dish::new("d1", "Jollof Rice");
        dish.local_name = Some("Benachin".to_string());
        dish.country_name = Some("Nigeria".to_string());
        dish.search_terms = vec!["party rice".to_string()];

        let json = serde_json::to_value(&dish).unwrap();
        assert_eq!(json["localName"], "Benachin");
        assert_eq!(json["countryName"], "Nigeria");
        assert_eq!(json["searchTerms"][0], "party rice");
        // absent optionals are omitted entirely
        assert!(json.get("region").is_none());
    }

    #[test]
    fn test_dish_deserializes_with_missing_fields() {
        let dish: Dish =
            serde_json::from_str(r#"{"id":"d2","name":"Rice and Beans"}"#).unwrap();
        assert_eq!(dish.id, "d2");
        assert!(dish.aliases.is_empty());
        assert!(dish.ingredients.is_empty());
        assert_eq!(dish.view_count, 0);
    }

    #[test]
    fn test_ingredient_round_trip() {
        let ing = Ingredient {
            name: "Scotch bonnet".to_string(),
            quantity: Some("2".to_string()),
        };
        let json = serde_json::to_string(&ing).unwrap();
        let back: Ingredient = serde_json::from_str(&json).unwrap();
        assert_eq!(ing, back);
    }
}
