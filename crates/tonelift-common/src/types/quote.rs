//! Price quote types
//!
//! A quote is the `{base, discount, final, savings}` tuple shown to a buyer
//! before purchase. Quotes are ephemeral: computed on demand, returned for
//! display, and recomputed on the next request. Nothing here is persisted and
//! there is no validity window to expire.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::types::service::ServiceKind;
use crate::types::tier::SubscriptionTier;

/// Where a quote's discount came from
///
/// Subscription and duration discounts are never compounded: every quote
/// carries exactly one source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "source", rename_all = "snake_case")]
pub enum DiscountSource {
    /// Undiscounted list price
    None,
    /// Subscriber tier discount (general or per-category override)
    Subscription { tier: SubscriptionTier },
    /// Campaign duration discount
    Duration { days: u32 },
}

/// The single discount applied to a quote
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppliedDiscount {
    /// Discount origin
    #[serde(flatten)]
    pub source: DiscountSource,
    /// Fraction of the base price removed, within [0, 1]
    pub fraction: Decimal,
}

impl AppliedDiscount {
    /// A zero discount with no source
    pub fn none() -> Self {
        Self {
            source: DiscountSource::None,
            fraction: Decimal::ZERO,
        }
    }
}

/// Computed price quote for display
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PriceQuote {
    /// Correlation id for logs and UI list keys; quotes are not stored by id
    pub quote_id: Uuid,
    /// Service being priced
    pub service: ServiceKind,
    /// Currency code; amounts are whole currency units with no minor units
    pub currency: String,
    /// Gross amount before discount; for campaigns, day rate × days
    pub base_price: Decimal,
    /// The discount applied to this quote
    pub discount: AppliedDiscount,
    /// `round_half_up(base_price × (1 − fraction))`
    pub final_price: Decimal,
    /// `base_price − final_price`
    pub savings: Decimal,
    /// When this quote was computed
    pub computed_at: DateTime<Utc>,
}

impl PriceQuote {
    /// Whether any discount was applied
    pub fn is_discounted(&self) -> bool {
        self.discount.fraction > Decimal::ZERO
    }

    /// Savings as a percentage of the base price, one decimal place
    pub fn savings_percent(&self) -> Decimal {
        if self.base_price > Decimal::ZERO {
            (self.savings / self.base_price * Decimal::ONE_HUNDRED).round_dp(1)
        } else {
            Decimal::ZERO
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn quote(base: Decimal, fraction: Decimal, final_price: Decimal) -> PriceQuote {
        PriceQuote {
            quote_id: Uuid::new_v4(),
            service: ServiceKind::ConcertPromotion,
            currency: "krw".to_string(),
            base_price: base,
            discount: AppliedDiscount {
                source: DiscountSource::Subscription {
                    tier: SubscriptionTier::Pro,
                },
                fraction,
            },
            final_price,
            savings: base - final_price,
            computed_at: Utc::now(),
        }
    }

    #[test]
    fn test_savings_percent() {
        let q = quote(dec!(210000), dec!(0.20), dec!(168000));
        assert_eq!(q.savings_percent(), dec!(20.0));
        assert!(q.is_discounted());
    }

    #[test]
    fn test_zero_base_has_zero_percent() {
        let q = quote(Decimal::ZERO, Decimal::ZERO, Decimal::ZERO);
        assert_eq!(q.savings_percent(), Decimal::ZERO);
        assert!(!q.is_discounted());
    }

    #[test]
    fn test_discount_source_serialization() {
        let discount = AppliedDiscount {
            source: DiscountSource::Duration { days: 30 },
            fraction: dec!(0.15),
        };
        let json = serde_json::to_value(&discount).unwrap();
        assert_eq!(json["source"], "duration");
        assert_eq!(json["days"], 30);
    }
}
