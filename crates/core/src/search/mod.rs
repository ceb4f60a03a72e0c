//! Fuzzy product search.
//!
//! `SearchEngine` builds a tokenized index over listing text at refresh time
//! and answers ranked queries against it. Matching is position-independent
//! and tolerates a couple of edit-level deviations per token, so "iphne"
//! still finds "iPhone 12". Ranking is weighted toward name and category
//! matches; ties keep snapshot order.

mod engine;
mod index;

pub use engine::SearchEngine;
pub use index::FieldWeights;

/// Query tokens shorter than this are not matched at all.
pub const MIN_TOKEN_LEN: usize = 2;

/// Token similarity below this is treated as no match.
pub const MIN_TOKEN_SIMILARITY: f64 = 0.6;

/// Similarity credited when one token contains the other outright.
pub const CONTAINMENT_SIMILARITY: f64 = 0.9;
