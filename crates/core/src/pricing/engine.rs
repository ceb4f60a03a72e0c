use serde::{Deserialize, Serialize};

use super::stats;
use super::types::{
    BidForecast, BidSuggestion, Condition, Confidence, MarketInsights, MarketTrends, PriceRange,
    PriceSuggestion, Trend,
};
use super::{HIGH_DEMAND_AVG_BIDS, MIN_TREND_SAMPLES, STRONG_SUCCESS_RATE, TREND_THRESHOLD_PCT};
use crate::domain::product::Product;

/// Tunable pricing constants. Defaults reproduce the documented behavior;
/// the bid-increment tiers are intentionally not configurable.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PricingTuning {
    /// Multiplier applied to the category base price for new-condition items.
    pub new_condition_multiplier: f64,
    /// Fallback price when a category has no history.
    pub default_price: f64,
}

impl Default for PricingTuning {
    fn default() -> Self {
        Self { new_condition_multiplier: 1.3, default_price: 50.0 }
    }
}

/// Price statistics and bid guidance over a product snapshot.
#[derive(Clone, Debug, Default)]
pub struct PricingEngine {
    tuning: PricingTuning,
    products: Vec<Product>,
}

struct BidPatterns {
    avg_bids_per_product: f64,
    success_rate: f64,
}

impl PricingEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tuning(tuning: PricingTuning) -> Self {
        Self { tuning, products: Vec::new() }
    }

    /// Store a new snapshot. Statistics are computed lazily per query.
    pub fn refresh(&mut self, products: &[Product]) {
        self.products = products.to_vec();
    }

    /// Suggest a list price for a new listing in `category`.
    pub fn suggest_price(
        &self,
        _product_name: &str,
        category: &str,
        condition: Condition,
    ) -> PriceSuggestion {
        let needle = category.to_lowercase();
        let category_products: Vec<&Product> =
            self.products.iter().filter(|p| p.category.to_lowercase() == needle).collect();

        if category_products.is_empty() {
            return self.default_suggestion();
        }

        let prices: Vec<f64> =
            category_products.iter().map(|p| p.price).filter(|price| *price > 0.0).collect();
        let avg_price = stats::mean(&prices);
        let median_price = stats::median(&prices);
        let std_dev = stats::population_std_dev(&prices);

        let bid_patterns = analyze_bid_patterns(&category_products);

        // Median is the base when present; a category whose every price is
        // missing or zero falls back to the mean, then the default.
        let base_price = if median_price != 0.0 {
            median_price
        } else if avg_price != 0.0 {
            avg_price
        } else {
            self.tuning.default_price
        };
        let multiplier = match condition {
            Condition::New => self.tuning.new_condition_multiplier,
            Condition::Used => 1.0,
        };
        let optimal = (base_price * multiplier).round();

        let price_range = PriceRange {
            min: (optimal * 0.7).round().max(10.0),
            max: (optimal * 1.3).round(),
            optimal,
        };

        let mut reasoning = Vec::new();
        reasoning.push(format!(
            "Based on {} similar items in {}",
            category_products.len(),
            category
        ));
        if median_price != 0.0 {
            reasoning.push(format!("Median price in category: ${median_price:.2}"));
        }
        if bid_patterns.avg_bids_per_product > HIGH_DEMAND_AVG_BIDS {
            reasoning.push(format!(
                "High demand category (avg {:.1} bids/item)",
                bid_patterns.avg_bids_per_product
            ));
        }
        if condition == Condition::New {
            reasoning.push(format!(
                "Adjusted +{:.0}% for new condition",
                (self.tuning.new_condition_multiplier - 1.0) * 100.0
            ));
        }
        if bid_patterns.success_rate > STRONG_SUCCESS_RATE {
            reasoning.push(format!(
                "{:.0}% success rate in this category",
                bid_patterns.success_rate * 100.0
            ));
        }

        let confidence = Confidence::from_stats(category_products.len(), std_dev, avg_price);

        PriceSuggestion {
            suggested_price: optimal,
            confidence,
            reasoning,
            price_range,
            market_insights: MarketInsights {
                avg_category_price: avg_price,
                avg_bids_per_product: bid_patterns.avg_bids_per_product,
                success_rate: bid_patterns.success_rate,
            },
        }
    }

    /// Bucket a price against the category's suggested range.
    pub fn predict_bid_success(&self, price: f64, category: &str) -> BidForecast {
        let suggestion = self.suggest_price("", category, Condition::Used);
        let PriceRange { min, max, optimal } = suggestion.price_range;

        let (probability, recommendation) = if price < min {
            (0.9, "Price is low - likely to attract many bids quickly")
        } else if price <= optimal {
            (0.75, "Price is competitive - good chance of successful sale")
        } else if price <= max {
            (0.5, "Price is above optimal - may take longer to sell")
        } else {
            (0.25, "Price is high - consider lowering for better results")
        };

        BidForecast { probability, recommendation: recommendation.to_owned() }
    }

    /// Suggest the next bid for a listing: a tiered increment above the
    /// highest bid, or above the asking price when nobody has bid yet.
    pub fn suggest_bid_amount(&self, product: &Product) -> BidSuggestion {
        if let Some(highest) = product.highest_bid() {
            let increment = optimal_increment(highest);
            return BidSuggestion {
                suggested_bid: stats::round_to_cents(highest + increment),
                min_increment: increment,
                reasoning: format!(
                    "{} bids placed. Suggest ${} above current highest bid",
                    product.bid_count(),
                    increment
                ),
            };
        }

        let increment = optimal_increment(product.price);
        BidSuggestion {
            suggested_bid: stats::round_to_cents(product.price + increment),
            min_increment: increment,
            reasoning: "Be the first to bid! Suggested opening bid".to_owned(),
        }
    }

    /// Compare the older and newer halves of a category's listings by
    /// average price. Needs at least [`MIN_TREND_SAMPLES`] listings.
    pub fn market_trends(&self, category: Option<&str>) -> MarketTrends {
        let relevant: Vec<&Product> = match category {
            Some(category) => {
                let needle = category.to_lowercase();
                self.products.iter().filter(|p| p.category.to_lowercase() == needle).collect()
            }
            None => self.products.iter().collect(),
        };

        if relevant.len() < MIN_TREND_SAMPLES {
            return MarketTrends {
                trending: Trend::Stable,
                average_price: 0.0,
                total_products: relevant.len(),
                insights: vec!["Not enough data for trend analysis".to_owned()],
            };
        }

        let mut chronological = relevant.clone();
        // Missing creation dates sort first, like a zero timestamp.
        chronological
            .sort_by_key(|p| p.created_at.map(|at| at.timestamp_millis()).unwrap_or(0));

        let midpoint = chronological.len() / 2;
        let old_avg =
            stats::mean(&chronological[..midpoint].iter().map(|p| p.price).collect::<Vec<_>>());
        let new_avg =
            stats::mean(&chronological[midpoint..].iter().map(|p| p.price).collect::<Vec<_>>());
        let price_change = (new_avg - old_avg) / old_avg * 100.0;

        let trending = if price_change > TREND_THRESHOLD_PCT {
            Trend::Up
        } else if price_change < -TREND_THRESHOLD_PCT {
            Trend::Down
        } else {
            Trend::Stable
        };

        let mut insights = vec![format!("Analyzed {} products", relevant.len())];
        match trending {
            Trend::Up => insights
                .push(format!("Prices trending up {price_change:.1}% - good time to sell")),
            Trend::Down => insights.push(format!(
                "Prices trending down {:.1}% - good time to buy",
                price_change.abs()
            )),
            Trend::Stable => insights.push("Stable market - consistent pricing".to_owned()),
        }

        MarketTrends {
            trending,
            average_price: new_avg,
            total_products: relevant.len(),
            insights,
        }
    }

    fn default_suggestion(&self) -> PriceSuggestion {
        let default_price = self.tuning.default_price;
        PriceSuggestion {
            suggested_price: default_price,
            confidence: Confidence::Low,
            reasoning: vec![
                "Not enough data in this category yet".to_owned(),
                format!("Suggested starting price: ${default_price}"),
            ],
            price_range: PriceRange {
                min: default_price * 0.5,
                max: default_price * 2.0,
                optimal: default_price,
            },
            market_insights: MarketInsights::default(),
        }
    }
}

fn analyze_bid_patterns(products: &[&Product]) -> BidPatterns {
    let mut total_bids = 0usize;
    let mut successful = 0usize;
    for product in products {
        let bid_count = product.bid_count();
        total_bids += bid_count;
        if bid_count > 0 || product.is_sold() {
            successful += 1;
        }
    }

    if products.is_empty() {
        return BidPatterns { avg_bids_per_product: 0.0, success_rate: 0.0 };
    }
    BidPatterns {
        avg_bids_per_product: total_bids as f64 / products.len() as f64,
        success_rate: successful as f64 / products.len() as f64,
    }
}

/// Bid increment tiered by the amount being outbid.
fn optimal_increment(amount: f64) -> f64 {
    if amount < 20.0 {
        1.0
    } else if amount < 50.0 {
        2.0
    } else if amount < 100.0 {
        5.0
    } else if amount < 500.0 {
        10.0
    } else {
        25.0
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, TimeZone, Utc};

    use super::*;
    use crate::domain::product::{Bid, ProductId};

    fn bid(bidder: &str, amount: f64) -> Bid {
        Bid { bidder: bidder.to_owned(), bid_amount: amount, created_at: None }
    }

    fn product(id: &str, category: &str, price: f64, bids: Vec<Bid>) -> Product {
        Product {
            id: ProductId::from(id),
            name: format!("Item {id}"),
            description: String::new(),
            category: category.to_owned(),
            price,
            seller: None,
            bids,
            status: None,
            created_at: None,
        }
    }

    fn engine(products: Vec<Product>) -> PricingEngine {
        let mut engine = PricingEngine::new();
        engine.refresh(&products);
        engine
    }

    #[test]
    fn unknown_category_returns_the_fixed_default_suggestion() {
        let engine = engine(vec![product("a", "books", 12.0, Vec::new())]);
        let suggestion = engine.suggest_price("anything", "NoSuchCategory", Condition::Used);

        assert_eq!(suggestion.suggested_price, 50.0);
        assert_eq!(suggestion.confidence, Confidence::Low);
        assert_eq!(
            suggestion.price_range,
            PriceRange { min: 25.0, max: 100.0, optimal: 50.0 }
        );
        assert_eq!(suggestion.market_insights, MarketInsights::default());
    }

    #[test]
    fn suggested_price_is_the_rounded_category_median() {
        let engine = engine(vec![
            product("a", "books", 10.0, Vec::new()),
            product("b", "books", 20.0, Vec::new()),
            product("c", "books", 31.0, Vec::new()),
        ]);

        let suggestion = engine.suggest_price("", "books", Condition::Used);
        assert_eq!(suggestion.suggested_price, 20.0);
        assert_eq!(suggestion.price_range.min, 14.0);
        assert_eq!(suggestion.price_range.max, 26.0);
    }

    #[test]
    fn new_condition_never_suggests_less_than_used() {
        let engine = engine(vec![
            product("a", "books", 10.0, Vec::new()),
            product("b", "books", 20.0, Vec::new()),
            product("c", "books", 30.0, Vec::new()),
        ]);

        let used = engine.suggest_price("", "books", Condition::Used);
        let new = engine.suggest_price("", "books", Condition::New);
        assert!(new.suggested_price >= used.suggested_price);
        assert_eq!(new.suggested_price, 26.0); // round(20 * 1.3)
        assert!(new.reasoning.iter().any(|reason| reason.contains("new condition")));
    }

    #[test]
    fn price_range_minimum_never_drops_below_ten() {
        let engine = engine(vec![product("a", "stickers", 5.0, Vec::new())]);
        let suggestion = engine.suggest_price("", "stickers", Condition::Used);
        assert_eq!(suggestion.price_range.min, 10.0);
    }

    #[test]
    fn zero_prices_contribute_nothing_to_the_statistics() {
        let engine = engine(vec![
            product("a", "books", 0.0, Vec::new()),
            product("b", "books", 40.0, Vec::new()),
        ]);

        let suggestion = engine.suggest_price("", "books", Condition::Used);
        assert_eq!(suggestion.suggested_price, 40.0);
        assert_eq!(suggestion.market_insights.avg_category_price, 40.0);
    }

    #[test]
    fn reasoning_mentions_demand_and_success_rate_when_strong() {
        let bids = vec![bid("u1", 11.0), bid("u2", 12.0), bid("u3", 13.0)];
        let engine = engine(vec![
            product("a", "books", 10.0, bids.clone()),
            product("b", "books", 12.0, bids.clone()),
            product("c", "books", 14.0, bids),
        ]);

        let suggestion = engine.suggest_price("", "books", Condition::Used);
        assert!(suggestion.reasoning.iter().any(|reason| reason.contains("High demand")));
        assert!(suggestion.reasoning.iter().any(|reason| reason.contains("success rate")));
    }

    #[test]
    fn bid_success_probability_buckets_by_price_range() {
        let engine = engine(vec![
            product("a", "books", 90.0, Vec::new()),
            product("b", "books", 100.0, Vec::new()),
            product("c", "books", 110.0, Vec::new()),
        ]);
        // median 100 -> optimal 100, range [70, 130].

        assert_eq!(engine.predict_bid_success(50.0, "books").probability, 0.9);
        assert_eq!(engine.predict_bid_success(85.0, "books").probability, 0.75);
        assert_eq!(engine.predict_bid_success(120.0, "books").probability, 0.5);
        assert_eq!(engine.predict_bid_success(200.0, "books").probability, 0.25);
    }

    #[test]
    fn first_bid_applies_the_increment_to_the_asking_price() {
        let engine = engine(Vec::new());

        let fifteen = engine.suggest_bid_amount(&product("a", "books", 15.0, Vec::new()));
        assert_eq!(fifteen.suggested_bid, 16.0);
        assert_eq!(fifteen.min_increment, 1.0);
        assert!(fifteen.reasoning.contains("first to bid"));

        let eighty = engine.suggest_bid_amount(&product("b", "books", 80.0, Vec::new()));
        assert_eq!(eighty.suggested_bid, 85.0);
        assert_eq!(eighty.min_increment, 5.0);
    }

    #[test]
    fn next_bid_builds_on_the_highest_existing_bid() {
        let listing =
            product("a", "books", 40.0, vec![bid("u1", 45.0), bid("u2", 62.0), bid("u3", 55.0)]);
        let engine = engine(Vec::new());

        let suggestion = engine.suggest_bid_amount(&listing);
        assert_eq!(suggestion.suggested_bid, 67.0); // 62 + 5 tier
        assert_eq!(suggestion.min_increment, 5.0);
        assert!(suggestion.reasoning.starts_with("3 bids placed"));
    }

    #[test]
    fn increment_tiers_follow_the_magnitude_of_the_amount() {
        assert_eq!(optimal_increment(10.0), 1.0);
        assert_eq!(optimal_increment(30.0), 2.0);
        assert_eq!(optimal_increment(99.0), 5.0);
        assert_eq!(optimal_increment(250.0), 10.0);
        assert_eq!(optimal_increment(1000.0), 25.0);
    }

    #[test]
    fn trend_detection_flags_rising_prices() {
        let start = Utc.with_ymd_and_hms(2026, 1, 1, 12, 0, 0).unwrap();
        let mut listings = Vec::new();
        for (index, price) in [100.0, 100.0, 100.0, 100.0, 100.0].iter().enumerate() {
            let mut listing = product(&format!("old{index}"), "books", *price, Vec::new());
            listing.created_at = Some(start + Duration::days(index as i64));
            listings.push(listing);
        }
        for (index, price) in [150.0, 150.0, 150.0, 150.0, 150.0].iter().enumerate() {
            let mut listing = product(&format!("new{index}"), "books", *price, Vec::new());
            listing.created_at = Some(start + Duration::days(30 + index as i64));
            listings.push(listing);
        }

        let trends = engine(listings).market_trends(Some("books"));
        assert_eq!(trends.trending, Trend::Up);
        assert_eq!(trends.average_price, 150.0);
        assert_eq!(trends.total_products, 10);
        assert!(trends.insights.iter().any(|insight| insight.contains("good time to sell")));
    }

    #[test]
    fn too_few_listings_yield_a_stable_no_data_result() {
        let engine = engine(vec![
            product("a", "books", 10.0, Vec::new()),
            product("b", "books", 400.0, Vec::new()),
        ]);

        let trends = engine.market_trends(Some("books"));
        assert_eq!(trends.trending, Trend::Stable);
        assert_eq!(trends.average_price, 0.0);
        assert_eq!(trends.total_products, 2);
        assert_eq!(trends.insights, vec!["Not enough data for trend analysis".to_owned()]);
    }

    #[test]
    fn flat_prices_stay_stable() {
        let listings: Vec<Product> = (0..6)
            .map(|index| {
                let mut listing = product(&format!("p{index}"), "books", 100.0, Vec::new());
                listing.created_at =
                    Some(Utc.with_ymd_and_hms(2026, 1, 1 + index, 0, 0, 0).unwrap());
                listing
            })
            .collect();

        let trends = engine(listings).market_trends(None);
        assert_eq!(trends.trending, Trend::Stable);
        assert!(trends.insights.iter().any(|insight| insight.contains("Stable market")));
    }
}
