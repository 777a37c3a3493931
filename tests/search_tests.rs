//! Integration tests for ranked search, autocomplete, and ingredient
//! lookup, including the ranking scenarios the API contract promises.

use std::sync::Arc;

use anyhow::Result;

use mealdex::cache::SnapshotCache;
use mealdex::model::{Dish, Ingredient};
use mealdex::search::{SearchEngine, SearchError, SearchOptions};
use mealdex::store::InMemoryStore;

async fn engine_with(dishes: Vec<Dish>) -> (SearchEngine, SnapshotCache<Dish>) {
    let store = Arc::new(InMemoryStore::new());
    store.seed(dishes).await;
    let cache = SnapshotCache::with_defaults(store);
    (SearchEngine::new(cache.clone()), cache)
}

fn jollof() -> Dish {
    let mut d = Dish::new("d1", "Jollof Rice");
    d.local_name = Some("Benachin".to_string());
    d.aliases = vec!["Party Rice".to_string()];
    d.search_terms = vec!["one pot rice".to_string()];
    d.tags = vec!["rice".to_string()];
    d.categories = vec!["Main Course".to_string()];
    d.region = Some("West Africa".to_string());
    d.country_id = Some("ng".to_string());
    d.country_name = Some("Nigeria".to_string());
    d.description = Some("Tomato-based one-pot rice dish".to_string());
    d.ingredients = vec![
        Ingredient::named("rice"),
        Ingredient::named("tomato"),
        Ingredient::named("scotch bonnet"),
    ];
    d
}

fn catalog() -> Vec<Dish> {
    let mut rice_and_beans = Dish::new("d2", "Rice and Beans");
    rice_and_beans.country_id = Some("ng".to_string());
    rice_and_beans.ingredients = vec![Ingredient::named("rice"), Ingredient::named("beans")];

    let mut egusi = Dish::new("d3", "Egusi Soup");
    egusi.country_id = Some("ng".to_string());
    egusi.region = Some("West Africa".to_string());
    egusi.categories = vec!["Soup".to_string()];
    egusi.ingredients = vec![Ingredient::named("melon seeds"), Ingredient::named("spinach")];

    let mut waakye = Dish::new("d4", "Waakye");
    waakye.country_id = Some("gh".to_string());
    waakye.country_name = Some("Ghana".to_string());
    waakye.ingredients = vec![Ingredient::named("rice"), Ingredient::named("black-eyed beans")];

    let mut fried_rice = Dish::new("d5", "Fried Rice");
    fried_rice.country_id = Some("gh".to_string());
    fried_rice.ingredients = vec![Ingredient::named("rice"), Ingredient::named("carrots")];

    vec![jollof(), rice_and_beans, egusi, waakye, fried_rice]
}

#[tokio::test]
async fn test_jollof_query_ranks_only_the_matching_dish() -> Result<()> {
    let (engine, _) = engine_with(vec![jollof(), Dish::new("d2", "Rice and Beans")]).await;

    let page = engine.search("jollof", &SearchOptions::default()).await?;
    assert_eq!(page.total, 1);
    assert_eq!(page.items[0].dish.name, "Jollof Rice");
    // name-prefix tier
    assert_eq!(page.items[0].score, 90);
    Ok(())
}

#[tokio::test]
async fn test_misspelled_query_still_matches_via_fuzzy() -> Result<()> {
    let (engine, _) = engine_with(vec![jollof()]).await;

    let page = engine.search("jolof", &SearchOptions::default()).await?;
    assert_eq!(page.total, 1);
    let hit = &page.items[0];
    assert_eq!(hit.dish.name, "Jollof Rice");
    // fuzzy tier: above the default cutoff, below every substring tier
    assert!(hit.score >= 30 && hit.score < 80, "score was {}", hit.score);
    Ok(())
}

#[tokio::test]
async fn test_high_min_score_filters_out_prefix_matches() -> Result<()> {
    let (engine, _) = engine_with(vec![jollof(), Dish::new("d2", "Rice and Beans")]).await;

    let options = SearchOptions {
        min_score: 95,
        ..Default::default()
    };
    let page = engine.search("jollof", &options).await?;
    assert_eq!(page.total, 0);
    assert!(!page.has_results());
    assert_eq!(page.total_pages, 0);
    Ok(())
}

#[tokio::test]
async fn test_exact_outranks_substring_outranks_fuzzy() -> Result<()> {
    let (engine, _) = engine_with(vec![
        Dish::new("a", "Peanut Suya"),
        Dish::new("b", "Soya"),
        Dish::new("c", "Suya"),
    ])
    .await;

    let page = engine.search("suya", &SearchOptions::default()).await?;
    let ranked: Vec<(&str, u8)> = page
        .items
        .iter()
        .map(|hit| (hit.dish.name.as_str(), hit.score))
        .collect();
    assert_eq!(
        ranked,
        vec![("Suya", 100), ("Peanut Suya", 80), ("Soya", 53)]
    );
    Ok(())
}

#[tokio::test]
async fn test_equal_scores_tie_break_by_name() -> Result<()> {
    let (engine, _) = engine_with(vec![
        Dish::new("a", "Ogbono Soup"),
        Dish::new("b", "Egusi Soup"),
    ])
    .await;

    let page = engine.search("soup", &SearchOptions::default()).await?;
    let names: Vec<&str> = page.items.iter().map(|h| h.dish.name.as_str()).collect();
    assert_eq!(names, vec!["Egusi Soup", "Ogbono Soup"]);
    assert_eq!(page.items[0].score, page.items[1].score);
    Ok(())
}

#[tokio::test]
async fn test_search_is_case_insensitive() -> Result<()> {
    let (engine, _) = engine_with(catalog()).await;

    let lower = engine.search("jollof", &SearchOptions::default()).await?;
    let upper = engine.search("  JOLLOF  ", &SearchOptions::default()).await?;
    assert_eq!(lower, upper);
    Ok(())
}

#[tokio::test]
async fn test_too_short_query_is_a_typed_condition() -> Result<()> {
    let (engine, _) = engine_with(catalog()).await;

    for query in ["", " ", "j"] {
        let err = engine
            .search(query, &SearchOptions::default())
            .await
            .unwrap_err();
        assert!(matches!(err, SearchError::QueryTooShort { min: 2 }));
    }
    Ok(())
}

#[tokio::test]
async fn test_structural_filters_narrow_candidates() -> Result<()> {
    let (engine, _) = engine_with(catalog()).await;

    // country filter: only Ghanaian dishes can match "rice"
    let options = SearchOptions {
        country_id: Some("gh".to_string()),
        ..Default::default()
    };
    let page = engine.search("rice", &options).await?;
    let names: Vec<&str> = page.items.iter().map(|h| h.dish.name.as_str()).collect();
    assert_eq!(names, vec!["Fried Rice"]);

    // region filter
    let options = SearchOptions {
        region: Some("west africa".to_string()),
        ..Default::default()
    };
    let page = engine.search("soup", &options).await?;
    let names: Vec<&str> = page.items.iter().map(|h| h.dish.name.as_str()).collect();
    assert_eq!(names, vec!["Egusi Soup"]);

    // category filter with no matching candidates
    let options = SearchOptions {
        category: Some("Dessert".to_string()),
        ..Default::default()
    };
    let page = engine.search("rice", &options).await?;
    assert_eq!(page.total, 0);
    Ok(())
}

#[tokio::test]
async fn test_pagination_slices_the_ranked_set() -> Result<()> {
    let dishes: Vec<Dish> = (0..5)
        .map(|i| Dish::new(format!("d{i}"), format!("Rice Dish {i}")))
        .collect();
    let (engine, _) = engine_with(dishes).await;

    let options = SearchOptions {
        page: 2,
        limit: 2,
        ..Default::default()
    };
    let page = engine.search("rice", &options).await?;
    assert_eq!(page.total, 5);
    assert_eq!(page.total_pages, 3);
    let names: Vec<&str> = page.items.iter().map(|h| h.dish.name.as_str()).collect();
    assert_eq!(names, vec!["Rice Dish 2", "Rice Dish 3"]);

    let options = SearchOptions {
        page: 4,
        limit: 2,
        ..Default::default()
    };
    let past_end = engine.search("rice", &options).await?;
    assert!(past_end.items.is_empty());
    assert_eq!(past_end.total, 5);
    Ok(())
}

#[tokio::test]
async fn test_autocomplete_short_query_never_touches_the_cache() -> Result<()> {
    // cold cache over an empty store: a load would be observable
    let (engine, cache) = engine_with(Vec::new()).await;

    let suggestions = engine.autocomplete("j", 10).await?;
    assert!(suggestions.is_empty());
    assert!(!cache.is_loaded());
    Ok(())
}

#[tokio::test]
async fn test_autocomplete_scans_in_list_order_and_stops_at_limit() -> Result<()> {
    let (engine, _) = engine_with(catalog()).await;

    // list order: Egusi Soup, Fried Rice, Jollof Rice, Rice and Beans,
    // Waakye; "ri" matches the middle three, limit cuts after two
    let suggestions = engine.autocomplete("ri", 2).await?;
    let names: Vec<&str> = suggestions.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, vec!["Fried Rice", "Jollof Rice"]);
    Ok(())
}

#[tokio::test]
async fn test_autocomplete_matches_local_name_alias_and_terms() -> Result<()> {
    let (engine, _) = engine_with(catalog()).await;

    let by_local = engine.autocomplete("bena", 10).await?;
    assert_eq!(by_local.len(), 1);
    assert_eq!(by_local[0].name, "Jollof Rice");
    assert_eq!(by_local[0].local_name.as_deref(), Some("Benachin"));

    let by_alias = engine.autocomplete("party", 10).await?;
    assert_eq!(by_alias.len(), 1);
    assert_eq!(by_alias[0].id, "d1");

    let by_term = engine.autocomplete("one pot", 10).await?;
    assert_eq!(by_term.len(), 1);
    assert_eq!(by_term[0].id, "d1");
    Ok(())
}

#[tokio::test]
async fn test_ingredient_search_filters_and_paginates() -> Result<()> {
    let (engine, _) = engine_with(catalog()).await;

    // list order among rice-bearing dishes: Fried Rice, Jollof Rice,
    // Rice and Beans, Waakye
    let page = engine.search_by_ingredient("rice", 1, 3).await?;
    assert_eq!(page.total, 4);
    assert_eq!(page.total_pages, 2);
    let names: Vec<&str> = page.items.iter().map(|d| d.name.as_str()).collect();
    assert_eq!(names, vec!["Fried Rice", "Jollof Rice", "Rice and Beans"]);

    let rest = engine.search_by_ingredient("RICE", 2, 3).await?;
    let names: Vec<&str> = rest.items.iter().map(|d| d.name.as_str()).collect();
    assert_eq!(names, vec!["Waakye"]);

    let scotch = engine.search_by_ingredient("scotch", 1, 10).await?;
    assert_eq!(scotch.total, 1);
    assert_eq!(scotch.items[0].name, "Jollof Rice");
    Ok(())
}

#[tokio::test]
async fn test_empty_ingredient_query_is_rejected() -> Result<()> {
    let (engine, _) = engine_with(catalog()).await;

    let err = engine.search_by_ingredient("  ", 1, 10).await.unwrap_err();
    assert!(matches!(err, SearchError::QueryTooShort { min: 1 }));
    Ok(())
}
