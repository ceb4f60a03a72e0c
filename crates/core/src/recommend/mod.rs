//! Product recommendations.
//!
//! Combines content-based filtering (category affinity), collaborative
//! filtering (Jaccard similarity over users' bid histories), and a trending
//! fallback for users with no history. All scoring runs against the stored
//! snapshot per query; only the user interest index is precomputed at
//! refresh. Score maps are insertion-ordered so equal scores keep the order
//! candidates were discovered in.

mod engine;
mod types;

pub use engine::RecommendationEngine;
pub use types::ScoredProduct;

/// Score added per occurrence of a candidate in one of the user's
/// preferred categories.
pub const CATEGORY_AFFINITY_SCORE: f64 = 2.0;

/// Score added each time a similar user has interacted with a candidate.
pub const COLLABORATIVE_SCORE: f64 = 1.0;

/// Score for sharing the source product's category.
pub const SAME_CATEGORY_SCORE: f64 = 2.0;

/// Score for a price within [`PRICE_BAND`] of the source product's.
pub const PRICE_PROXIMITY_SCORE: f64 = 1.0;

/// Score per shared lowercase name token.
pub const NAME_OVERLAP_SCORE: f64 = 0.5;

/// Score for sharing the source product's seller.
pub const SAME_SELLER_SCORE: f64 = 1.0;

/// Bump for already-scored candidates inside the price band.
pub const PRICE_BAND_BONUS: f64 = 0.5;

/// Relative price distance treated as "similar" (±30%).
pub const PRICE_BAND: f64 = 0.3;

/// Similar users considered per recommendation request.
pub const MAX_SIMILAR_USERS: usize = 5;
