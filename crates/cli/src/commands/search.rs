use bidwise_core::{RecommendationEngine, SearchEngine};
use serde_json::json;

use super::CommandResult;

pub fn run(engine: &SearchEngine, query: &str, limit: usize) -> CommandResult {
    let results = engine.search(query, limit);
    CommandResult::success(
        "search",
        json!({
            "query": query,
            "detected_category": engine.detect_category(query),
            "results": results,
        }),
    )
}

pub fn suggest(engine: &SearchEngine, query: &str, limit: usize) -> CommandResult {
    CommandResult::success(
        "suggest",
        json!({
            "query": query,
            "suggestions": engine.suggestions(query, limit),
        }),
    )
}

pub fn trending(
    engine: &SearchEngine,
    recommender: &RecommendationEngine,
    limit: usize,
) -> CommandResult {
    CommandResult::success(
        "trending",
        json!({
            "searches": engine.trending_searches(limit),
            "products": recommender.trending_products(limit),
        }),
    )
}
