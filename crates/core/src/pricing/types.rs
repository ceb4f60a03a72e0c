use serde::{Deserialize, Serialize};

use super::{HIGH_VARIANCE_CUTOFF, LOW_CONFIDENCE_SAMPLES, MEDIUM_CONFIDENCE_SAMPLES};

/// Listing condition, which scales the suggested price.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Condition {
    New,
    #[default]
    Used,
}

/// How much to trust a suggestion, driven by sample size and variance.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    Low,
    Medium,
    High,
}

impl Confidence {
    /// Small samples are low confidence, mid-size samples medium, and large
    /// samples high unless the category's prices are all over the place.
    pub(super) fn from_stats(sample_size: usize, std_dev: f64, avg: f64) -> Self {
        if sample_size < LOW_CONFIDENCE_SAMPLES {
            return Confidence::Low;
        }
        if sample_size < MEDIUM_CONFIDENCE_SAMPLES {
            return Confidence::Medium;
        }
        let coefficient_of_variation = if avg > 0.0 { std_dev / avg } else { 0.0 };
        if coefficient_of_variation > HIGH_VARIANCE_CUTOFF {
            Confidence::Medium
        } else {
            Confidence::High
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PriceRange {
    pub min: f64,
    pub max: f64,
    pub optimal: f64,
}

/// Category-level aggregates surfaced alongside a suggestion.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct MarketInsights {
    pub avg_category_price: f64,
    pub avg_bids_per_product: f64,
    pub success_rate: f64,
}

/// Seller-facing price suggestion.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PriceSuggestion {
    pub suggested_price: f64,
    pub confidence: Confidence,
    pub reasoning: Vec<String>,
    pub price_range: PriceRange,
    pub market_insights: MarketInsights,
}

/// Buyer-facing next-bid suggestion.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct BidSuggestion {
    pub suggested_bid: f64,
    pub min_increment: f64,
    pub reasoning: String,
}

/// Likelihood that a price attracts bids, with a fixed recommendation.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct BidForecast {
    pub probability: f64,
    pub recommendation: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Up,
    Down,
    Stable,
}

/// Coarse category trend from comparing older and newer listing prices.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct MarketTrends {
    pub trending: Trend,
    pub average_price: f64,
    pub total_products: usize,
    pub insights: Vec<String>,
}
