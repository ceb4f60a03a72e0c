use std::cmp::Ordering;
use std::collections::HashSet;

use indexmap::{map::Entry, IndexMap, IndexSet};

use super::types::ScoredProduct;
use super::{
    CATEGORY_AFFINITY_SCORE, COLLABORATIVE_SCORE, MAX_SIMILAR_USERS, NAME_OVERLAP_SCORE,
    PRICE_BAND, PRICE_BAND_BONUS, PRICE_PROXIMITY_SCORE, SAME_CATEGORY_SCORE, SAME_SELLER_SCORE,
};
use crate::domain::product::{Product, ProductId};

/// Personalized and item-to-item recommendations over a product snapshot.
///
/// `refresh` rebuilds the user → interacted-product index from scratch by
/// scanning every bid, then swaps both snapshot and index in; queries only
/// ever see a fully built index. Scoring itself is recomputed per call
/// because it depends on per-query parameters (user, product).
#[derive(Clone, Debug, Default)]
pub struct RecommendationEngine {
    products: Vec<Product>,
    interests: IndexMap<String, Vec<ProductId>>,
}

impl RecommendationEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the snapshot and rebuild the interest index.
    pub fn refresh(&mut self, products: &[Product]) {
        let mut interests: IndexMap<String, Vec<ProductId>> = IndexMap::new();
        for product in products {
            for bid in &product.bids {
                let entry = interests.entry(bid.bidder.clone()).or_default();
                if !entry.contains(&product.id) {
                    entry.push(product.id.clone());
                }
            }
        }
        self.products = products.to_vec();
        self.interests = interests;
    }

    pub fn product(&self, id: &str) -> Option<&Product> {
        self.products.iter().find(|product| product.id.as_str() == id)
    }

    /// Personalized recommendations. Users without bid history get the
    /// trending list instead.
    pub fn recommendations_for_user(&self, user_id: &str, limit: usize) -> Vec<Product> {
        let interacted = match self.interests.get(user_id) {
            Some(ids) if !ids.is_empty() => ids,
            _ => return self.trending_products(limit),
        };

        let categories = self.user_categories(interacted);
        let similar_users = self.similar_users(user_id);

        let mut scores: IndexMap<ProductId, ScoredProduct> = IndexMap::new();

        // Content-based pass: candidates from the user's preferred categories.
        for category in &categories {
            for product in &self.products {
                if product.category != *category || interacted.contains(&product.id) {
                    continue;
                }
                match scores.entry(product.id.clone()) {
                    Entry::Occupied(mut entry) => {
                        entry.get_mut().bump(CATEGORY_AFFINITY_SCORE, "Similar category");
                    }
                    Entry::Vacant(entry) => {
                        entry.insert(ScoredProduct::new(
                            product.clone(),
                            CATEGORY_AFFINITY_SCORE,
                            "Similar category",
                        ));
                    }
                }
            }
        }

        // Collaborative pass: products similar users interacted with.
        for similar_user in &similar_users {
            let Some(their_products) = self.interests.get(similar_user) else { continue };
            for product_id in their_products {
                if interacted.contains(product_id) {
                    continue;
                }
                let Some(product) = self.product(product_id.as_str()) else { continue };
                match scores.entry(product_id.clone()) {
                    Entry::Occupied(mut entry) => {
                        entry.get_mut().bump(COLLABORATIVE_SCORE, "Similar users liked this");
                    }
                    Entry::Vacant(entry) => {
                        entry.insert(ScoredProduct::new(
                            product.clone(),
                            COLLABORATIVE_SCORE,
                            "Similar users liked this",
                        ));
                    }
                }
            }
        }

        rank(scores, limit).into_iter().map(|scored| scored.product).collect()
    }

    /// "You might also like" for a product page. The source product is never
    /// part of the result.
    pub fn similar_products(&self, product_id: &str, limit: usize) -> Vec<Product> {
        self.similar_products_scored(product_id, limit)
            .into_iter()
            .map(|scored| scored.product)
            .collect()
    }

    /// Scored variant of [`similar_products`](Self::similar_products),
    /// exposing the reasons behind each pick.
    pub fn similar_products_scored(&self, product_id: &str, limit: usize) -> Vec<ScoredProduct> {
        let Some(source) = self.product(product_id) else { return Vec::new() };

        let mut scores: IndexMap<ProductId, ScoredProduct> = IndexMap::new();

        // Same-category candidates scored by full similarity.
        for product in &self.products {
            if product.category != source.category || product.id == source.id {
                continue;
            }
            scores.insert(
                product.id.clone(),
                ScoredProduct::new(
                    product.clone(),
                    similarity_score(source, product),
                    format!("Similar to {}", source.name),
                ),
            );
        }

        // Same-seller candidates.
        if let Some(seller) = &source.seller {
            for product in &self.products {
                if product.id == source.id {
                    continue;
                }
                let same_seller =
                    product.seller.as_ref().is_some_and(|other| other.id == seller.id);
                if !same_seller {
                    continue;
                }
                match scores.entry(product.id.clone()) {
                    Entry::Occupied(mut entry) => {
                        entry.get_mut().bump(SAME_SELLER_SCORE, "Same seller");
                    }
                    Entry::Vacant(entry) => {
                        entry.insert(ScoredProduct::new(
                            product.clone(),
                            SAME_SELLER_SCORE,
                            "Same seller",
                        ));
                    }
                }
            }
        }

        // Price-band bump for candidates that already scored.
        let price_min = source.price * (1.0 - PRICE_BAND);
        let price_max = source.price * (1.0 + PRICE_BAND);
        for product in &self.products {
            if product.id == source.id
                || product.category != source.category
                || product.price < price_min
                || product.price > price_max
            {
                continue;
            }
            if let Some(entry) = scores.get_mut(&product.id) {
                entry.bump(PRICE_BAND_BONUS, "Similar price");
            }
        }

        rank(scores, limit)
    }

    /// Products ranked by bid count, ties keeping snapshot order.
    pub fn trending_products(&self, limit: usize) -> Vec<Product> {
        let mut ranked = self.products.clone();
        ranked.sort_by(|a, b| b.bid_count().cmp(&a.bid_count()));
        ranked.truncate(limit);
        ranked
    }

    /// Substring-scored recommendations for a free-text query:
    /// name +3, category +2, description +1.
    pub fn search_based(&self, query: &str, limit: usize) -> Vec<Product> {
        let needle = query.to_lowercase();

        let mut scored: Vec<(f64, &Product)> = Vec::new();
        for product in &self.products {
            let mut score = 0.0;
            if product.name.to_lowercase().contains(&needle) {
                score += 3.0;
            }
            if product.description.to_lowercase().contains(&needle) {
                score += 1.0;
            }
            if product.category.to_lowercase().contains(&needle) {
                score += 2.0;
            }
            if score > 0.0 {
                scored.push((score, product));
            }
        }

        scored.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(Ordering::Equal));
        scored.into_iter().take(limit).map(|(_, product)| product.clone()).collect()
    }

    /// Most-bid products within a category (case-insensitive).
    pub fn category_recommendations(&self, category: &str, limit: usize) -> Vec<Product> {
        let needle = category.to_lowercase();
        let mut matches: Vec<Product> = self
            .products
            .iter()
            .filter(|product| product.category.to_lowercase() == needle)
            .cloned()
            .collect();
        matches.sort_by(|a, b| b.bid_count().cmp(&a.bid_count()));
        matches.truncate(limit);
        matches
    }

    /// Distinct bidders on *other* products in this product's category,
    /// in first-seen order.
    pub fn interested_buyers(&self, product_id: &str) -> Vec<String> {
        let Some(source) = self.product(product_id) else { return Vec::new() };

        let mut buyers: IndexSet<String> = IndexSet::new();
        for product in &self.products {
            if product.category != source.category || product.id == source.id {
                continue;
            }
            for bid in &product.bids {
                buyers.insert(bid.bidder.clone());
            }
        }
        buyers.into_iter().collect()
    }

    /// The user's categories ranked by distinct interacted products,
    /// descending, ties in discovery order.
    fn user_categories(&self, interacted: &[ProductId]) -> Vec<String> {
        let mut counts: IndexMap<&str, usize> = IndexMap::new();
        for product_id in interacted {
            if let Some(product) = self.product(product_id.as_str()) {
                *counts.entry(product.category.as_str()).or_insert(0) += 1;
            }
        }

        let mut entries: Vec<(&str, usize)> = counts.into_iter().collect();
        entries.sort_by(|a, b| b.1.cmp(&a.1));
        entries.into_iter().map(|(category, _)| category.to_owned()).collect()
    }

    /// Up to [`MAX_SIMILAR_USERS`] users by Jaccard similarity of interacted
    /// product sets. Zero-overlap users are excluded; ties keep interest
    /// index insertion order.
    fn similar_users(&self, user_id: &str) -> Vec<String> {
        let Some(mine) = self.interests.get(user_id) else { return Vec::new() };
        if mine.is_empty() {
            return Vec::new();
        }

        let mine_set: HashSet<&ProductId> = mine.iter().collect();
        let mut scored: Vec<(String, f64)> = Vec::new();
        for (other_id, theirs) in &self.interests {
            if other_id == user_id {
                continue;
            }
            let intersection = theirs.iter().filter(|id| mine_set.contains(id)).count();
            if intersection == 0 {
                continue;
            }
            // Both lists are deduplicated, so the union size is additive.
            let union = mine.len() + theirs.len() - intersection;
            scored.push((other_id.clone(), intersection as f64 / union as f64));
        }

        scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));
        scored.truncate(MAX_SIMILAR_USERS);
        scored.into_iter().map(|(id, _)| id).collect()
    }
}

/// Content similarity between two products: shared category, price
/// proximity relative to their average, and name token overlap.
fn similarity_score(a: &Product, b: &Product) -> f64 {
    let mut score = 0.0;

    if a.category == b.category {
        score += SAME_CATEGORY_SCORE;
    }

    let avg_price = (a.price + b.price) / 2.0;
    if avg_price > 0.0 && (a.price - b.price).abs() / avg_price < PRICE_BAND {
        score += PRICE_PROXIMITY_SCORE;
    }

    let a_words: HashSet<String> = a.name.to_lowercase().split_whitespace().map(str::to_owned).collect();
    let b_words: HashSet<String> = b.name.to_lowercase().split_whitespace().map(str::to_owned).collect();
    let common = a_words.intersection(&b_words).count();
    score + common as f64 * NAME_OVERLAP_SCORE
}

fn rank(scores: IndexMap<ProductId, ScoredProduct>, limit: usize) -> Vec<ScoredProduct> {
    let mut ranked: Vec<ScoredProduct> = scores.into_values().collect();
    // Stable sort: equal scores keep map insertion order.
    ranked.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
    ranked.truncate(limit);
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::product::{Bid, SellerRef};

    fn bid(bidder: &str, amount: f64) -> Bid {
        Bid { bidder: bidder.to_owned(), bid_amount: amount, created_at: None }
    }

    fn product(id: &str, name: &str, category: &str, price: f64, bids: Vec<Bid>) -> Product {
        Product {
            id: ProductId::from(id),
            name: name.to_owned(),
            description: String::new(),
            category: category.to_owned(),
            price,
            seller: None,
            bids,
            status: None,
            created_at: None,
        }
    }

    fn engine(products: Vec<Product>) -> RecommendationEngine {
        let mut engine = RecommendationEngine::new();
        engine.refresh(&products);
        engine
    }

    #[test]
    fn user_without_history_gets_trending_products() {
        let engine = engine(vec![
            product("a", "Lamp", "home", 20.0, vec![bid("u1", 21.0)]),
            product("b", "Rug", "home", 45.0, vec![bid("u1", 46.0), bid("u2", 48.0)]),
            product("c", "Vase", "home", 15.0, Vec::new()),
        ]);

        assert_eq!(engine.recommendations_for_user("stranger", 3), engine.trending_products(3));
    }

    #[test]
    fn jaccard_similarity_prefers_overlapping_users() {
        // u1 bids on {a, b, c}; u2 on {b, c, d}; u3 on {e} (zero overlap).
        let engine = engine(vec![
            product("a", "A", "books", 10.0, vec![bid("u1", 11.0)]),
            product("b", "B", "books", 10.0, vec![bid("u1", 11.0), bid("u2", 12.0)]),
            product("c", "C", "books", 10.0, vec![bid("u1", 11.0), bid("u2", 12.0)]),
            product("d", "D", "books", 10.0, vec![bid("u2", 11.0)]),
            product("e", "E", "toys", 10.0, vec![bid("u3", 11.0)]),
        ]);

        let similar = engine.similar_users("u1");
        assert_eq!(similar, vec!["u2".to_owned()]);
        let similar = engine.similar_users("u2");
        assert_eq!(similar, vec!["u1".to_owned()]);
    }

    #[test]
    fn collaborative_pass_surfaces_similar_users_products() {
        let engine = engine(vec![
            product("a", "A", "books", 10.0, vec![bid("u1", 11.0)]),
            product("b", "B", "books", 10.0, vec![bid("u1", 11.0), bid("u2", 12.0)]),
            product("c", "C", "books", 10.0, vec![bid("u1", 11.0), bid("u2", 12.0)]),
            product("d", "D", "music", 10.0, vec![bid("u2", 11.0)]),
        ]);

        // "d" is outside u1's categories but u2 (similar) bid on it.
        let recommendations = engine.recommendations_for_user("u1", 10);
        assert!(recommendations.iter().any(|p| p.id.as_str() == "d"));
    }

    #[test]
    fn similar_products_never_include_the_source() {
        let engine = engine(vec![
            product("a", "Road bike", "sports", 100.0, Vec::new()),
            product("b", "Gravel bike", "sports", 110.0, Vec::new()),
            product("c", "Trail bike", "sports", 95.0, Vec::new()),
        ]);

        let similar = engine.similar_products("a", 10);
        assert!(!similar.iter().any(|p| p.id.as_str() == "a"));
        assert_eq!(similar.len(), 2);
    }

    #[test]
    fn similar_products_rank_by_composed_similarity() {
        let engine = engine(vec![
            product("a", "Road bike", "sports", 100.0, Vec::new()),
            // Same category, similar price, shares "bike": 2 + 1 + 0.5, plus 0.5 band bonus.
            product("b", "Gravel bike", "sports", 110.0, Vec::new()),
            // Same category, price far outside the band.
            product("c", "Treadmill", "sports", 900.0, Vec::new()),
        ]);

        let scored = engine.similar_products_scored("a", 10);
        assert_eq!(scored[0].product.id.as_str(), "b");
        assert!(scored[0].score > scored[1].score);
        assert!(scored[0].reasons.iter().any(|reason| reason == "Similar price"));
    }

    #[test]
    fn same_seller_listings_get_a_flat_boost() {
        let seller = SellerRef { id: "s1".to_owned(), name: "Dana".to_owned() };
        let mut source = product("a", "Couch", "furniture", 300.0, Vec::new());
        source.seller = Some(seller.clone());
        let mut other_category = product("b", "Skis", "sports", 150.0, Vec::new());
        other_category.seller = Some(seller);

        let engine = engine(vec![source, other_category]);
        let scored = engine.similar_products_scored("a", 10);
        assert_eq!(scored.len(), 1);
        assert_eq!(scored[0].product.id.as_str(), "b");
        assert_eq!(scored[0].reasons, vec!["Same seller".to_owned()]);
    }

    #[test]
    fn trending_products_tie_keeps_snapshot_order() {
        let engine = engine(vec![
            product("a", "A", "home", 10.0, vec![bid("u1", 11.0)]),
            product("b", "B", "home", 10.0, vec![bid("u2", 11.0)]),
            product("c", "C", "home", 10.0, Vec::new()),
        ]);

        let trending = engine.trending_products(3);
        let ids: Vec<&str> =
            trending.iter().map(|p| p.id.as_str()).collect::<Vec<_>>();
        assert_eq!(ids, vec!["a", "b", "c"]);
    }

    #[test]
    fn search_based_scores_name_over_description() {
        let mut described = product("a", "Bookshelf", "furniture", 60.0, Vec::new());
        described.description = "fits many vinyl records".to_owned();
        let engine = engine(vec![described, product("b", "Vinyl record", "music", 15.0, Vec::new())]);

        let results = engine.search_based("vinyl", 10);
        assert_eq!(results[0].id.as_str(), "b");
        assert_eq!(results.len(), 2);
    }

    #[test]
    fn search_based_drops_zero_score_products() {
        let engine = engine(vec![product("a", "Kettle", "home", 25.0, Vec::new())]);
        assert!(engine.search_based("guitar", 10).is_empty());
    }

    #[test]
    fn category_recommendations_are_case_insensitive() {
        let engine = engine(vec![
            product("a", "A", "Electronics", 10.0, vec![bid("u1", 11.0)]),
            product("b", "B", "electronics", 10.0, Vec::new()),
        ]);

        let results = engine.category_recommendations("ELECTRONICS", 10);
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].id.as_str(), "a");
    }

    #[test]
    fn interested_buyers_come_from_other_listings_in_the_category() {
        let engine = engine(vec![
            product("a", "A", "books", 10.0, vec![bid("self-bidder", 11.0)]),
            product("b", "B", "books", 10.0, vec![bid("u2", 11.0), bid("u3", 12.0)]),
            product("c", "C", "toys", 10.0, vec![bid("u4", 11.0)]),
        ]);

        assert_eq!(engine.interested_buyers("a"), vec!["u2".to_owned(), "u3".to_owned()]);
    }

    #[test]
    fn empty_snapshot_degrades_to_empty_results() {
        let engine = engine(Vec::new());
        assert!(engine.recommendations_for_user("u1", 5).is_empty());
        assert!(engine.similar_products("missing", 5).is_empty());
        assert!(engine.interested_buyers("missing").is_empty());
    }
}
