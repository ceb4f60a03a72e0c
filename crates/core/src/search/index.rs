use serde::{Deserialize, Serialize};

use crate::domain::product::Product;

/// Per-field ranking weights. Name and category dominate so that a listing
/// matched on its title always outranks one matched only through its seller.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldWeights {
    pub name: f64,
    pub description: f64,
    pub category: f64,
    pub seller: f64,
}

impl Default for FieldWeights {
    fn default() -> Self {
        Self { name: 2.0, description: 1.0, category: 1.5, seller: 0.5 }
    }
}

/// One listing's searchable text, lowercased and tokenized once at refresh.
#[derive(Clone, Debug)]
pub(super) struct IndexedProduct {
    pub(super) name: Vec<String>,
    pub(super) description: Vec<String>,
    pub(super) category: Vec<String>,
    pub(super) seller: Vec<String>,
}

impl IndexedProduct {
    pub(super) fn from_product(product: &Product) -> Self {
        Self {
            name: tokenize(&product.name),
            description: tokenize(&product.description),
            category: tokenize(&product.category),
            seller: product
                .seller
                .as_ref()
                .map(|seller| tokenize(&seller.name))
                .unwrap_or_default(),
        }
    }
}

pub(super) fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|token| !token.is_empty())
        .map(str::to_owned)
        .collect()
}
