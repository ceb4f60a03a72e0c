use bidwise_core::{DomainError, RecommendationEngine};
use serde_json::json;

use super::CommandResult;

pub fn run(engine: &RecommendationEngine, user_id: &str, limit: usize) -> CommandResult {
    CommandResult::success(
        "recommend",
        json!({
            "user_id": user_id,
            "recommendations": engine.recommendations_for_user(user_id, limit),
        }),
    )
}

pub fn similar(engine: &RecommendationEngine, product_id: &str, limit: usize) -> CommandResult {
    if engine.product(product_id).is_none() {
        let error = DomainError::UnknownProduct(product_id.to_string());
        return CommandResult::failure("similar", "unknown_product", error.to_string(), 2);
    }

    CommandResult::success(
        "similar",
        json!({
            "product_id": product_id,
            "similar": engine.similar_products_scored(product_id, limit),
        }),
    )
}

pub fn buyers(engine: &RecommendationEngine, product_id: &str) -> CommandResult {
    if engine.product(product_id).is_none() {
        let error = DomainError::UnknownProduct(product_id.to_string());
        return CommandResult::failure("buyers", "unknown_product", error.to_string(), 2);
    }

    CommandResult::success(
        "buyers",
        json!({
            "product_id": product_id,
            "interested_buyers": engine.interested_buyers(product_id),
        }),
    )
}
