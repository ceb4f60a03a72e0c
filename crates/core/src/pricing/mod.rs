//! Price and bid suggestions.
//!
//! Descriptive statistics over a category's price history drive a suggested
//! list price (with confidence and reasoning), a bid-success forecast, a
//! suggested next bid, and a coarse market trend. The engine stores the raw
//! snapshot and computes every statistic lazily per call — nothing here is
//! indexed, because every query slices the snapshot differently.

mod engine;
mod stats;
mod types;

pub use engine::{PricingEngine, PricingTuning};
pub use types::{
    BidForecast, BidSuggestion, Condition, Confidence, MarketInsights, MarketTrends, PriceRange,
    PriceSuggestion, Trend,
};

/// Sample size below which a suggestion is low confidence.
pub const LOW_CONFIDENCE_SAMPLES: usize = 5;

/// Sample size below which a suggestion is at most medium confidence.
pub const MEDIUM_CONFIDENCE_SAMPLES: usize = 15;

/// Coefficient of variation above which even a large sample stays medium.
pub const HIGH_VARIANCE_CUTOFF: f64 = 0.5;

/// Average bids per listing above which a category counts as high demand.
pub const HIGH_DEMAND_AVG_BIDS: f64 = 2.0;

/// Success rate worth calling out in the reasoning.
pub const STRONG_SUCCESS_RATE: f64 = 0.7;

/// Minimum listings needed for trend analysis.
pub const MIN_TREND_SAMPLES: usize = 5;

/// Percentage move that flips a trend out of stable.
pub const TREND_THRESHOLD_PCT: f64 = 10.0;
