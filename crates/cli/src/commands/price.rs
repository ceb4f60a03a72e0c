use bidwise_core::{Condition, DomainError, PricingEngine, RecommendationEngine};
use serde_json::json;

use super::CommandResult;

pub fn run(
    engine: &PricingEngine,
    name: &str,
    category: &str,
    condition: Condition,
) -> CommandResult {
    CommandResult::success(
        "price",
        json!({
            "category": category,
            "condition": condition,
            "suggestion": engine.suggest_price(name, category, condition),
        }),
    )
}

pub fn forecast(engine: &PricingEngine, price: f64, category: &str) -> CommandResult {
    CommandResult::success(
        "forecast",
        json!({
            "price": price,
            "category": category,
            "forecast": engine.predict_bid_success(price, category),
        }),
    )
}

pub fn bid(
    engine: &PricingEngine,
    recommender: &RecommendationEngine,
    product_id: &str,
) -> CommandResult {
    let Some(product) = recommender.product(product_id) else {
        let error = DomainError::UnknownProduct(product_id.to_string());
        return CommandResult::failure("bid", "unknown_product", error.to_string(), 2);
    };

    CommandResult::success(
        "bid",
        json!({
            "product_id": product_id,
            "suggestion": engine.suggest_bid_amount(product),
        }),
    )
}

pub fn trends(engine: &PricingEngine, category: Option<&str>) -> CommandResult {
    CommandResult::success(
        "trends",
        json!({
            "category": category,
            "trends": engine.market_trends(category),
        }),
    )
}
