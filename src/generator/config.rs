//! Generator configuration
//!
//! Every field has a default, so a YAML file only needs the values it
//! changes:
//!
//! ```yaml
//! seed: 42
//! counts:
//!   customers: 1000
//!   transactions: 5000
//! supplier_link_probability: 0.05
//! ```

use super::error::ConfigError;
use crate::schema::DEFAULT_CATEGORIES;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Target number of entities per stage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationCounts {
    pub customers: usize,
    pub products: usize,
    pub orders: usize,
    pub reviews: usize,
    pub transactions: usize,
    pub suppliers: usize,
    pub campaigns: usize,
}

impl Default for GenerationCounts {
    fn default() -> Self {
        Self {
            customers: 100,
            products: 50,
            orders: 200,
            reviews: 150,
            transactions: 300,
            suppliers: 10,
            campaigns: 5,
        }
    }
}

/// Full generator configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    pub counts: GenerationCounts,

    /// Seed of the random source; `None` draws one from OS entropy
    pub seed: Option<u64>,

    /// Category names seeded before products
    pub categories: Vec<String>,

    /// Upper bound of distinct products per order
    pub max_products_per_order: usize,

    /// Device pool size as a fraction of the transaction count
    pub device_pool_ratio: f64,

    /// Probability that a given supplier supplies a given product
    pub supplier_link_probability: f64,

    /// Probability that a given customer engaged with a given campaign
    pub engagement_probability: f64,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            counts: GenerationCounts::default(),
            seed: None,
            categories: DEFAULT_CATEGORIES.iter().map(|c| c.to_string()).collect(),
            max_products_per_order: 5,
            device_pool_ratio: 0.2,
            supplier_link_probability: 0.2,
            engagement_probability: 0.1,
        }
    }
}

impl GeneratorConfig {
    /// Parse and validate a YAML document
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a YAML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let yaml = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml_str(&yaml)
    }

    pub fn to_yaml(&self) -> Result<String, ConfigError> {
        Ok(serde_yaml::to_string(self)?)
    }

    pub fn with_counts(mut self, counts: GenerationCounts) -> Self {
        self.counts = counts;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.categories.is_empty() {
            return Err(ConfigError::Invalid(
                "at least one category is required".to_string(),
            ));
        }
        if let Some(blank) = self.categories.iter().find(|c| c.trim().is_empty()) {
            return Err(ConfigError::Invalid(format!(
                "category names must not be blank (got {:?})",
                blank
            )));
        }
        if self.max_products_per_order == 0 {
            return Err(ConfigError::Invalid(
                "max_products_per_order must be at least 1".to_string(),
            ));
        }
        for (name, p) in [
            ("device_pool_ratio", self.device_pool_ratio),
            ("supplier_link_probability", self.supplier_link_probability),
            ("engagement_probability", self.engagement_probability),
        ] {
            if !(0.0..=1.0).contains(&p) {
                return Err(ConfigError::Invalid(format!(
                    "{} must lie in [0, 1] (got {})",
                    name, p
                )));
            }
        }
        Ok(())
    }
}
