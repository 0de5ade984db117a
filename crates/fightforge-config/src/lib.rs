//! Configuration system for FightForge.
//!
//! Load optimizer configuration from TOML or YAML files to control chunking,
//! the budget tolerance band, result selection and the price feed without
//! code changes.
//!
//! # Examples
//!
//! Load configuration from a TOML string:
//!
//! ```
//! use fightforge_config::{OptimizerConfig, SelectionConfig};
//!
//! let config = OptimizerConfig::from_toml_str(r#"
//!     [search]
//!     chunk_size = 100000
//!     budget_tolerance = 4
//!
//!     [selection]
//!     type = "cost_bucketed"
//!     per_bucket = 5
//! "#).unwrap();
//!
//! assert_eq!(config.search.chunk_size, 100_000);
//! assert!(matches!(config.selection, SelectionConfig::CostBucketed { .. }));
//! ```
//!
//! Use the default config when the file is missing:
//!
//! ```
//! use fightforge_config::OptimizerConfig;
//!
//! let config = OptimizerConfig::load("fightforge.toml").unwrap_or_default();
//! // Proceeds with defaults if file doesn't exist
//! ```

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default number of combinations scored per chunk.
pub const DEFAULT_CHUNK_SIZE: u64 = 50_000;

/// Default number of builds returned by flat selection.
pub const DEFAULT_TOP_N: usize = 10;

/// Default share of retained builds considered by bucketed selection.
pub const DEFAULT_ELITE_FRACTION: f64 = 0.3;

/// Default number of builds per cost bucket.
pub const DEFAULT_PER_BUCKET: usize = 5;

/// Default market price endpoint.
pub const DEFAULT_PRICE_ENDPOINT: &str = "https://api2.warera.io/trpc/itemTrading.getPrices";

/// Configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Main optimizer configuration.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct OptimizerConfig {
    /// Enumeration settings.
    #[serde(default)]
    pub search: SearchConfig,

    /// Result selection policy.
    #[serde(default)]
    pub selection: SelectionConfig,

    /// Market price feed used in cost-aware mode.
    #[serde(default)]
    pub prices: PriceFeedConfig,
}

impl OptimizerConfig {
    /// Creates a new default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns error if file doesn't exist, contains invalid TOML, or fails
    /// validation.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Self::from_toml_file(path)
    }

    /// Loads configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Parses configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads configuration from a YAML file.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&contents)
    }

    /// Parses configuration from a YAML string.
    pub fn from_yaml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Sets the chunk size.
    pub fn with_chunk_size(mut self, chunk_size: u64) -> Self {
        self.search.chunk_size = chunk_size;
        self
    }

    /// Sets the lower tolerance band below the budget.
    pub fn with_tolerance(mut self, tolerance: u32) -> Self {
        self.search.budget_tolerance = tolerance;
        self
    }

    /// Sets the selection policy.
    pub fn with_selection(mut self, selection: SelectionConfig) -> Self {
        self.selection = selection;
        self
    }

    /// Sets the price endpoint.
    pub fn with_price_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.prices.endpoint = endpoint.into();
        self
    }

    /// Checks value ranges that serde cannot express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.search.chunk_size == 0 {
            return Err(ConfigError::Invalid("chunk_size must be at least 1".into()));
        }
        match self.selection {
            SelectionConfig::Flat { top_n } if top_n == 0 => {
                Err(ConfigError::Invalid("top_n must be at least 1".into()))
            }
            SelectionConfig::CostBucketed {
                elite_fraction,
                per_bucket,
            } => {
                if !(elite_fraction > 0.0 && elite_fraction <= 1.0) {
                    return Err(ConfigError::Invalid(format!(
                        "elite_fraction must be in (0, 1], got {}",
                        elite_fraction
                    )));
                }
                if per_bucket == 0 {
                    return Err(ConfigError::Invalid("per_bucket must be at least 1".into()));
                }
                Ok(())
            }
            _ => Ok(()),
        }
    }
}

/// Enumeration configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct SearchConfig {
    /// Combinations scored between progress reports.
    #[serde(default = "default_chunk_size")]
    pub chunk_size: u64,

    /// Lower tolerance band: builds spending fewer than
    /// `budget - budget_tolerance` points are rejected. 0 disables the band.
    #[serde(default)]
    pub budget_tolerance: u32,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            budget_tolerance: 0,
        }
    }
}

fn default_chunk_size() -> u64 {
    DEFAULT_CHUNK_SIZE
}

/// Result selection policy.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SelectionConfig {
    /// The `top_n` highest-damage builds.
    Flat {
        #[serde(default = "default_top_n")]
        top_n: usize,
    },

    /// The best `per_bucket` builds of each cost tertile of the top
    /// `elite_fraction` builds by damage.
    CostBucketed {
        #[serde(default = "default_elite_fraction")]
        elite_fraction: f64,
        #[serde(default = "default_per_bucket")]
        per_bucket: usize,
    },
}

impl SelectionConfig {
    /// Flat selection of the best `top_n` builds.
    pub fn flat(top_n: usize) -> Self {
        SelectionConfig::Flat { top_n }
    }

    /// Cost-bucketed selection with default fraction and bucket size.
    pub fn cost_bucketed() -> Self {
        SelectionConfig::CostBucketed {
            elite_fraction: DEFAULT_ELITE_FRACTION,
            per_bucket: DEFAULT_PER_BUCKET,
        }
    }

    /// Upper bound on the number of builds this policy returns.
    pub fn max_results(&self) -> usize {
        match *self {
            SelectionConfig::Flat { top_n } => top_n,
            SelectionConfig::CostBucketed { per_bucket, .. } => per_bucket * 3,
        }
    }
}

impl Default for SelectionConfig {
    fn default() -> Self {
        SelectionConfig::flat(DEFAULT_TOP_N)
    }
}

fn default_top_n() -> usize {
    DEFAULT_TOP_N
}

fn default_elite_fraction() -> f64 {
    DEFAULT_ELITE_FRACTION
}

fn default_per_bucket() -> usize {
    DEFAULT_PER_BUCKET
}

/// Price feed configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct PriceFeedConfig {
    /// Market price endpoint.
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

impl PriceFeedConfig {
    /// Returns the request timeout as a Duration.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}

impl Default for PriceFeedConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            timeout_seconds: default_timeout_seconds(),
        }
    }
}

fn default_endpoint() -> String {
    DEFAULT_PRICE_ENDPOINT.to_string()
}

fn default_timeout_seconds() -> u64 {
    10
}
