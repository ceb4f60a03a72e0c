use serde::Serialize;

use crate::domain::product::Product;

/// A recommended product together with its accumulated score and the
/// human-readable reasons it was picked.
#[derive(Clone, Debug, Serialize)]
pub struct ScoredProduct {
    pub product: Product,
    pub score: f64,
    pub reasons: Vec<String>,
}

impl ScoredProduct {
    pub(super) fn new(product: Product, score: f64, reason: impl Into<String>) -> Self {
        Self { product, score, reasons: vec![reason.into()] }
    }

    pub(super) fn bump(&mut self, score: f64, reason: impl Into<String>) {
        self.score += score;
        self.reasons.push(reason.into());
    }
}
