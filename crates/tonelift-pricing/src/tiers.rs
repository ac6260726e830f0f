//! Subscription tier discount table
//!
//! Each tier carries a general discount fraction plus optional per-category
//! overrides. An override replaces the general fraction outright for that
//! category; it is not combined with it and may be lower.
//!
//! Lookups fail open: a tier missing from the table discounts nothing and a
//! buyer always sees at worst the undiscounted list price. Table contents
//! are still validated strictly when loaded, so a fraction outside [0, 1)
//! never enters a running resolver.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tonelift_common::{PricingError, ServiceCategory, SubscriptionTier};
use tracing::debug;

/// Discount entry for one subscription tier
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TierDiscount {
    /// General fraction of the base price removed, within [0, 1)
    pub fraction: Decimal,
    /// Per-category replacements for the general fraction
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub category_overrides: BTreeMap<ServiceCategory, Decimal>,
}

impl TierDiscount {
    /// Entry with a general fraction and no overrides
    pub fn flat(fraction: Decimal) -> Self {
        Self {
            fraction,
            category_overrides: BTreeMap::new(),
        }
    }

    /// Add a category override
    pub fn with_override(mut self, category: ServiceCategory, fraction: Decimal) -> Self {
        self.category_overrides.insert(category, fraction);
        self
    }
}

/// Discount table keyed by subscription tier
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TierTable {
    tiers: BTreeMap<SubscriptionTier, TierDiscount>,
}

impl TierTable {
    /// Empty table; every lookup returns zero
    pub fn new() -> Self {
        Self {
            tiers: BTreeMap::new(),
        }
    }

    /// The standard Tonelift tier discounts
    pub fn standard() -> Self {
        Self::new()
            .with_tier(SubscriptionTier::Free, TierDiscount::flat(Decimal::ZERO))
            .with_tier(SubscriptionTier::Basic, TierDiscount::flat(dec!(0.10)))
            .with_tier(
                SubscriptionTier::Pro,
                TierDiscount::flat(dec!(0.20))
                    .with_override(ServiceCategory::Marketing, dec!(0.25)),
            )
            .with_tier(
                SubscriptionTier::Label,
                TierDiscount::flat(dec!(0.30))
                    .with_override(ServiceCategory::Marketing, dec!(0.35))
                    .with_override(ServiceCategory::Pitching, dec!(0.25)),
            )
    }

    /// Set the entry for a tier
    pub fn with_tier(mut self, tier: SubscriptionTier, discount: TierDiscount) -> Self {
        self.tiers.insert(tier, discount);
        self
    }

    /// General discount fraction for a tier; missing tiers discount nothing
    pub fn fraction_for(&self, tier: SubscriptionTier) -> Decimal {
        match self.tiers.get(&tier) {
            Some(entry) => entry.fraction,
            None => {
                debug!(%tier, "tier not in discount table, quoting list price");
                Decimal::ZERO
            }
        }
    }

    /// Discount fraction for a tier buying within a category
    ///
    /// Returns the category override when the tier has one, the general
    /// fraction otherwise.
    pub fn fraction_for_category(&self, tier: SubscriptionTier, category: ServiceCategory) -> Decimal {
        match self.tiers.get(&tier) {
            Some(entry) => entry
                .category_overrides
                .get(&category)
                .copied()
                .unwrap_or(entry.fraction),
            None => {
                debug!(%tier, %category, "tier not in discount table, quoting list price");
                Decimal::ZERO
            }
        }
    }

    /// Iterate entries in tier order
    pub fn iter(&self) -> impl Iterator<Item = (&SubscriptionTier, &TierDiscount)> {
        self.tiers.iter()
    }

    /// Check every fraction lies within [0, 1) and `free` confers nothing
    ///
    /// A tier discount of exactly 1 would make a service free for the life
    /// of the subscription, which no plan is meant to do; full comping goes
    /// through manual invoicing instead. `free` doubles as the fallback for
    /// unrecognized tier strings, so a table granting it any discount would
    /// hand that discount to every mistyped tier.
    pub fn validate(&self) -> Result<(), PricingError> {
        for (tier, entry) in &self.tiers {
            Self::check_fraction(tier, entry.fraction)?;
            for fraction in entry.category_overrides.values() {
                Self::check_fraction(tier, *fraction)?;
            }
        }
        if let Some(entry) = self.tiers.get(&SubscriptionTier::Free) {
            if !entry.fraction.is_zero()
                || entry.category_overrides.values().any(|f| !f.is_zero())
            {
                return Err(PricingError::InvalidTierTable(
                    "free tier cannot carry a discount".to_string(),
                ));
            }
        }
        Ok(())
    }

    fn check_fraction(tier: &SubscriptionTier, fraction: Decimal) -> Result<(), PricingError> {
        if fraction < Decimal::ZERO || fraction >= Decimal::ONE {
            return Err(PricingError::InvalidTierTable(format!(
                "tier {} has discount fraction {} outside [0, 1)",
                tier, fraction
            )));
        }
        Ok(())
    }
}

impl Default for TierTable {
    fn default() -> Self {
        Self::standard()
    }
}
