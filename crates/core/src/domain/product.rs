use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProductId(pub String);

impl ProductId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ProductId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ProductId {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

/// Reference to the listing's seller as supplied by the host application.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SellerRef {
    pub id: String,
    pub name: String,
}

/// A single bid attached to a product listing.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Bid {
    pub bidder: String,
    pub bid_amount: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

/// A marketplace listing as fetched by the host application.
///
/// Engines treat a slice of these as the full and current universe; they
/// never mutate a record and never reach back to a data store. Optional
/// fields stay optional all the way through scoring — an absent value
/// contributes nothing to an aggregate.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub description: String,
    pub category: String,
    pub price: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seller: Option<SellerRef>,
    #[serde(default)]
    pub bids: Vec<Bid>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl Product {
    pub fn bid_count(&self) -> usize {
        self.bids.len()
    }

    /// Highest bid amount placed so far, if any bids exist.
    pub fn highest_bid(&self) -> Option<f64> {
        self.bids.iter().map(|bid| bid.bid_amount).fold(None, |best, amount| match best {
            Some(current) if current >= amount => Some(current),
            _ => Some(amount),
        })
    }

    pub fn is_sold(&self) -> bool {
        self.status.as_deref() == Some("sold")
    }
}
