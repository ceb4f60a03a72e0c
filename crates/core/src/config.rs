//! Engine tuning configuration.
//!
//! All weights and thresholds default to the values the engines document;
//! a host may override them through an optional TOML file. Absent file and
//! absent keys both mean "use the defaults", so behavior is unchanged
//! unless someone deliberately tunes it.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::pricing::PricingTuning;
use crate::search::FieldWeights;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read tuning file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse tuning file {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: toml::de::Error,
    },
}

/// Tuning for all engines, loadable from a TOML file:
///
/// ```toml
/// [search]
/// name = 2.0
/// category = 1.5
///
/// [pricing]
/// new_condition_multiplier = 1.3
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub search: FieldWeights,
    pub pricing: PricingTuning,
}

impl EngineConfig {
    /// Load tuning from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })
    }

    pub fn from_toml_str(raw: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_yields_the_defaults() {
        let config = EngineConfig::from_toml_str("").expect("empty config parses");
        assert_eq!(config, EngineConfig::default());
        assert_eq!(config.search.name, 2.0);
        assert_eq!(config.pricing.new_condition_multiplier, 1.3);
    }

    #[test]
    fn partial_overrides_keep_remaining_defaults() {
        let config = EngineConfig::from_toml_str(
            "[search]\nname = 3.0\n\n[pricing]\ndefault_price = 75.0\n",
        )
        .expect("partial config parses");

        assert_eq!(config.search.name, 3.0);
        assert_eq!(config.search.category, 1.5);
        assert_eq!(config.pricing.default_price, 75.0);
        assert_eq!(config.pricing.new_condition_multiplier, 1.3);
    }

    #[test]
    fn malformed_document_is_a_parse_error() {
        assert!(EngineConfig::from_toml_str("[search]\nname = \"loud\"").is_err());
    }
}
