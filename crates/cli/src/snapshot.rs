use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use bidwise_core::Product;

/// Load a product snapshot from a JSON array file.
pub fn load(path: &Path) -> Result<Vec<Product>> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("reading snapshot {}", path.display()))?;
    let products: Vec<Product> = serde_json::from_str(&raw)
        .with_context(|| format!("parsing snapshot {}", path.display()))?;
    Ok(products)
}
