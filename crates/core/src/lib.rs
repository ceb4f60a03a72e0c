//! Bidwise core: in-memory intelligence engines for a peer-to-peer
//! marketplace.
//!
//! Three snapshot-driven engines (fuzzy search, recommendations, price/bid
//! suggestions) plus a stateless description-quality scorer. Each engine is
//! rebuilt from the current product snapshot via `refresh` and answers pure,
//! deterministic queries until the next refresh; nothing here performs I/O
//! or holds a connection to a data store.

pub mod config;
pub mod domain;
pub mod errors;
pub mod pricing;
pub mod quality;
pub mod recommend;
pub mod search;

pub use config::{ConfigError, EngineConfig};
pub use domain::product::{Bid, Product, ProductId, SellerRef};
pub use errors::DomainError;
pub use pricing::{
    BidForecast, BidSuggestion, Condition, Confidence, MarketInsights, MarketTrends, PriceRange,
    PriceSuggestion, PricingEngine, PricingTuning, Trend,
};
pub use quality::{
    EnhancementSuggestion, Readability, Severity, SuggestionKind, WritingAnalysis, WritingAnalyzer,
};
pub use recommend::{RecommendationEngine, ScoredProduct};
pub use search::{FieldWeights, SearchEngine};
