//! Pricing configuration
//!
//! Built-in defaults cover the standard price list. A JSON rules file may
//! replace any section wholesale; absent sections keep their defaults.
//! Environment variables select the rules file and currency.
//!
//! Parsing is strict: an unknown config field, service key, or tier name in
//! a rules file fails the load rather than being silently ignored. A typo in
//! a price list should never ship a wrong price.

use serde::{Deserialize, Serialize};
use tonelift_common::{Result, ToneliftError, DEFAULT_CURRENCY};
use tracing::info;

use crate::catalog::PriceCatalog;
use crate::schedule::DurationDiscountSchedule;
use crate::tiers::TierTable;

/// Currency plus the three pricing tables
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PricingConfig {
    /// Currency code stamped on quotes
    pub currency: String,
    /// Service price catalog
    pub catalog: PriceCatalog,
    /// Subscription tier discount table
    pub tiers: TierTable,
    /// Campaign duration discount schedule
    pub duration_discounts: DurationDiscountSchedule,
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            currency: DEFAULT_CURRENCY.to_string(),
            catalog: PriceCatalog::standard(),
            tiers: TierTable::standard(),
            duration_discounts: DurationDiscountSchedule::standard(),
        }
    }
}

impl PricingConfig {
    /// Parse a JSON rules document
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| ToneliftError::Config(format!("failed to parse rules JSON: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Load a JSON rules file
    pub fn from_file(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            ToneliftError::Config(format!("failed to read rules file {}: {}", path, e))
        })?;
        Self::from_json_str(&content)
    }

    /// Load configuration from the environment
    ///
    /// `TONELIFT_PRICING_RULES` names a rules file to load;
    /// `TONELIFT_CURRENCY` overrides the currency code.
    pub fn load() -> anyhow::Result<Self> {
        // Try to load .env file
        let _ = dotenvy::dotenv();

        let mut cfg = Self::default();

        if let Ok(path) = std::env::var("TONELIFT_PRICING_RULES") {
            info!(rules = %path, "loading pricing rules file");
            cfg = Self::from_file(&path)?;
        }
        if let Ok(currency) = std::env::var("TONELIFT_CURRENCY") {
            cfg.currency = currency;
        }

        cfg.validate()?;
        Ok(cfg)
    }

    /// Check the tables and currency are usable
    pub fn validate(&self) -> Result<()> {
        if self.catalog.is_empty() {
            return Err(ToneliftError::Config("catalog has no entries".to_string()));
        }
        if self.currency.trim().is_empty() {
            return Err(ToneliftError::Config("currency is blank".to_string()));
        }
        self.tiers.validate()?;
        self.duration_discounts.validate()?;
        Ok(())
    }
}
