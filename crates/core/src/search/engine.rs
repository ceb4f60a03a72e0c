use std::cmp::Ordering;

use indexmap::{IndexMap, IndexSet};

use super::index::{tokenize, FieldWeights, IndexedProduct};
use super::{CONTAINMENT_SIMILARITY, MIN_TOKEN_LEN, MIN_TOKEN_SIMILARITY};
use crate::domain::product::Product;

/// Fuzzy search over the current product snapshot.
///
/// `refresh` builds a fresh index and swaps it in with a single assignment,
/// so a query never observes a partially rebuilt index. Queries are pure and
/// deterministic: the same snapshot and arguments always produce the same
/// ordered results.
#[derive(Clone, Debug, Default)]
pub struct SearchEngine {
    weights: FieldWeights,
    products: Vec<Product>,
    index: Vec<IndexedProduct>,
}

impl SearchEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_weights(weights: FieldWeights) -> Self {
        Self { weights, products: Vec::new(), index: Vec::new() }
    }

    /// Rebuild the index from a new snapshot, discarding all previous state.
    pub fn refresh(&mut self, products: &[Product]) {
        let index = products.iter().map(IndexedProduct::from_product).collect();
        self.products = products.to_vec();
        self.index = index;
    }

    /// Ranked fuzzy search.
    ///
    /// An empty or whitespace query returns the first `limit` products in
    /// index order without ranking. A query with no token of at least
    /// [`MIN_TOKEN_LEN`] characters matches nothing.
    pub fn search(&self, query: &str, limit: usize) -> Vec<Product> {
        if query.trim().is_empty() {
            return self.products.iter().take(limit).cloned().collect();
        }

        let tokens: Vec<String> = tokenize(query)
            .into_iter()
            .filter(|token| token.len() >= MIN_TOKEN_LEN)
            .collect();
        if tokens.is_empty() {
            return Vec::new();
        }

        let mut scored: Vec<(f64, usize)> = Vec::new();
        for (position, doc) in self.index.iter().enumerate() {
            let score = self.score(doc, &tokens);
            if score > 0.0 {
                scored.push((score, position));
            }
        }

        // Stable sort: equal scores keep snapshot order.
        scored.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(Ordering::Equal));
        scored
            .into_iter()
            .take(limit)
            .map(|(_, position)| self.products[position].clone())
            .collect()
    }

    /// Autocomplete candidates for a partial query: matched product names,
    /// plus categories whose text contains the query. First-seen order among
    /// ranked results, deduplicated.
    pub fn suggestions(&self, query: &str, limit: usize) -> Vec<String> {
        if query.trim().is_empty() {
            return Vec::new();
        }

        let needle = query.to_lowercase();
        let mut seen: IndexSet<String> = IndexSet::new();
        for product in self.search(query, limit) {
            seen.insert(product.name.clone());
            if product.category.to_lowercase().contains(&needle) {
                seen.insert(product.category.clone());
            }
        }

        seen.into_iter().take(limit).collect()
    }

    /// Popular search terms derived from category frequency. Ties keep
    /// first-encountered order.
    pub fn trending_searches(&self, limit: usize) -> Vec<String> {
        let mut counts: IndexMap<&str, usize> = IndexMap::new();
        for product in &self.products {
            *counts.entry(product.category.as_str()).or_insert(0) += 1;
        }

        let mut entries: Vec<(&str, usize)> = counts.into_iter().collect();
        entries.sort_by(|a, b| b.1.cmp(&a.1));
        entries.into_iter().take(limit).map(|(category, _)| category.to_owned()).collect()
    }

    /// Majority category among the top three matches, if any.
    pub fn detect_category(&self, query: &str) -> Option<String> {
        let results = self.search(query, 3);
        if results.is_empty() {
            return None;
        }

        let mut counts: IndexMap<String, usize> = IndexMap::new();
        for product in results {
            *counts.entry(product.category).or_insert(0) += 1;
        }

        let mut best: Option<(String, usize)> = None;
        for (category, count) in counts {
            match &best {
                Some((_, top)) if *top >= count => {}
                _ => best = Some((category, count)),
            }
        }
        best.map(|(category, _)| category)
    }

    fn score(&self, doc: &IndexedProduct, query_tokens: &[String]) -> f64 {
        let fields: [(&[String], f64); 4] = [
            (&doc.name, self.weights.name),
            (&doc.description, self.weights.description),
            (&doc.category, self.weights.category),
            (&doc.seller, self.weights.seller),
        ];

        let mut total = 0.0;
        for query_token in query_tokens {
            for (tokens, weight) in &fields {
                let best = tokens
                    .iter()
                    .map(|field_token| token_similarity(query_token, field_token))
                    .fold(0.0_f64, f64::max);
                if best >= MIN_TOKEN_SIMILARITY {
                    total += best * weight;
                }
            }
        }
        total
    }
}

/// Similarity between a query token and a field token in `[0, 1]`.
///
/// Exact matches are 1.0; containment either way (partial tokens such as
/// "ipho"/"iphone") counts as a strong match; everything else falls through
/// to Jaro-Winkler and normalized Levenshtein, whichever is more generous.
fn token_similarity(query: &str, field: &str) -> f64 {
    if query == field {
        return 1.0;
    }
    if field.contains(query) || query.contains(field) {
        return CONTAINMENT_SIMILARITY;
    }
    strsim::jaro_winkler(query, field).max(strsim::normalized_levenshtein(query, field))
}
