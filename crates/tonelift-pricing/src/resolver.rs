//! Quote computation
//!
//! `final = round_half_up(base × (1 − fraction))`, with the half-up rounding
//! applied exactly once per quote. All arithmetic runs on [`Decimal`], so a
//! repeating fraction like 1/3 still lands on the stable advertised price.
//!
//! Subscription and duration discounts never combine. Each entry point
//! consults exactly one table: [`PricingResolver::subscription_quote`] reads
//! the tier table and [`PricingResolver::campaign_quote`] reads the duration
//! schedule, and a quote records which one produced its discount.

use chrono::Utc;
use rust_decimal::{Decimal, RoundingStrategy};
use tracing::{debug, instrument};
use uuid::Uuid;

use tonelift_common::{
    AppliedDiscount, DiscountSource, PriceQuote, PricingError, PricingUnit, ServiceKind,
    SubscriptionTier, ToneliftError, DEFAULT_CURRENCY,
};

use crate::catalog::PriceCatalog;
use crate::config::PricingConfig;
use crate::schedule::DurationDiscountSchedule;
use crate::tiers::TierTable;

/// Discounted price, rounded half-up to a whole currency unit
///
/// `base` must be a non-negative whole-unit amount; the platform prices
/// everything in whole units, so a fractional base is a caller bug and is
/// rejected rather than silently rounded. `fraction` must lie within
/// [0, 1]. The result is always within [0, base].
pub fn final_price(base: Decimal, fraction: Decimal) -> Result<Decimal, PricingError> {
    if base < Decimal::ZERO || !base.fract().is_zero() {
        return Err(PricingError::InvalidBasePrice {
            amount: base.to_string(),
        });
    }
    if fraction < Decimal::ZERO || fraction > Decimal::ONE {
        return Err(PricingError::InvalidDiscountFraction {
            fraction: fraction.to_string(),
        });
    }
    let net = base * (Decimal::ONE - fraction);
    Ok(net.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero))
}

/// Amount saved against the list price
pub fn savings(base: Decimal, final_price: Decimal) -> Decimal {
    base - final_price
}

/// Computes quotes from a catalog and its discount tables
///
/// Holds no mutable state; handlers share one resolver per process and call
/// it concurrently.
#[derive(Debug, Clone)]
pub struct PricingResolver {
    catalog: PriceCatalog,
    tiers: TierTable,
    schedule: DurationDiscountSchedule,
    currency: String,
}

impl PricingResolver {
    /// Resolver over the standard catalog and discount tables
    pub fn standard() -> Self {
        Self {
            catalog: PriceCatalog::standard(),
            tiers: TierTable::standard(),
            schedule: DurationDiscountSchedule::standard(),
            currency: DEFAULT_CURRENCY.to_string(),
        }
    }

    /// Build a resolver from loaded configuration
    ///
    /// Re-runs [`PricingConfig::validate`]; a table that fails validation
    /// never reaches a running resolver.
    pub fn from_config(config: PricingConfig) -> Result<Self, ToneliftError> {
        config.validate()?;
        Ok(Self {
            catalog: config.catalog,
            tiers: config.tiers,
            schedule: config.duration_discounts,
            currency: config.currency,
        })
    }

    /// Replace the quote currency
    pub fn with_currency(mut self, currency: impl Into<String>) -> Self {
        self.currency = currency.into();
        self
    }

    /// Quote a service for a subscriber
    ///
    /// The discount comes from the tier table alone; campaign length never
    /// enters. Per-day services are quoted at their one-day rate.
    #[instrument(skip(self))]
    pub fn subscription_quote(
        &self,
        service: ServiceKind,
        tier: SubscriptionTier,
    ) -> Result<PriceQuote, PricingError> {
        let base = self.catalog.base_price(service)?;
        let fraction = self.tiers.fraction_for_category(tier, service.category());
        let source = if fraction.is_zero() {
            DiscountSource::None
        } else {
            DiscountSource::Subscription { tier }
        };
        self.build_quote(service, base, fraction, source)
    }

    /// Quote a campaign of `days` on a per-day service
    ///
    /// The gross price is the day rate times the campaign length; the
    /// discount comes from the duration schedule alone, regardless of the
    /// buyer's subscription. A zero-day campaign quotes to zero. Flat-priced
    /// services have no campaign length and are rejected.
    #[instrument(skip(self))]
    pub fn campaign_quote(&self, service: ServiceKind, days: u32) -> Result<PriceQuote, PricingError> {
        let entry = self.catalog.entry(service)?;
        if entry.unit != PricingUnit::PerDay {
            return Err(PricingError::NotDurationPriced {
                service: service.to_string(),
            });
        }
        let gross = Decimal::from(entry.base_price) * Decimal::from(days);
        let fraction = self.schedule.fraction_for(days);
        let source = if fraction.is_zero() {
            DiscountSource::None
        } else {
            DiscountSource::Duration { days }
        };
        self.build_quote(service, gross, fraction, source)
    }

    fn build_quote(
        &self,
        service: ServiceKind,
        base: Decimal,
        fraction: Decimal,
        source: DiscountSource,
    ) -> Result<PriceQuote, PricingError> {
        let final_amount = final_price(base, fraction)?;
        let quote = PriceQuote {
            quote_id: Uuid::new_v4(),
            service,
            currency: self.currency.clone(),
            base_price: base,
            discount: AppliedDiscount { source, fraction },
            final_price: final_amount,
            savings: savings(base, final_amount),
            computed_at: Utc::now(),
        };
        debug!(
            quote_id = %quote.quote_id,
            base = %quote.base_price,
            final_price = %quote.final_price,
            "computed quote"
        );
        Ok(quote)
    }

    /// The catalog this resolver quotes from
    pub fn catalog(&self) -> &PriceCatalog {
        &self.catalog
    }

    /// The subscription tier discount table
    pub fn tiers(&self) -> &TierTable {
        &self.tiers
    }

    /// The campaign duration schedule
    pub fn schedule(&self) -> &DurationDiscountSchedule {
        &self.schedule
    }

    /// Currency code stamped on quotes
    pub fn currency(&self) -> &str {
        &self.currency
    }
}

impl Default for PricingResolver {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_pro_tier_concert_quote() {
        let resolver = PricingResolver::standard();
        let quote = resolver
            .subscription_quote(ServiceKind::ConcertPromotion, SubscriptionTier::Pro)
            .unwrap();

        assert_eq!(quote.base_price, dec!(210000));
        assert_eq!(quote.final_price, dec!(168000));
        assert_eq!(quote.savings, dec!(42000));
        assert_eq!(
            quote.discount.source,
            DiscountSource::Subscription {
                tier: SubscriptionTier::Pro
            }
        );
    }

    #[test]
    fn test_free_tier_quotes_list_price() {
        let resolver = PricingResolver::standard();
        let quote = resolver
            .subscription_quote(ServiceKind::PressRelease, SubscriptionTier::Free)
            .unwrap();

        assert_eq!(quote.final_price, quote.base_price);
        assert_eq!(quote.savings, Decimal::ZERO);
        assert_eq!(quote.discount.source, DiscountSource::None);
    }

    #[test]
    fn test_category_override_applies_to_quote() {
        let resolver = PricingResolver::standard();
        // marketing_campaign falls in the marketing category, where pro
        // carries 0.25 instead of its general 0.20
        let quote = resolver
            .subscription_quote(ServiceKind::MarketingCampaign, SubscriptionTier::Pro)
            .unwrap();

        assert_eq!(quote.discount.fraction, dec!(0.25));
        assert_eq!(quote.final_price, dec!(225000));
    }

    #[test]
    fn test_subscription_quote_prices_one_day_of_per_day_service() {
        let resolver = PricingResolver::standard();
        let quote = resolver
            .subscription_quote(ServiceKind::BannerAd, SubscriptionTier::Free)
            .unwrap();
        assert_eq!(quote.base_price, dec!(15000));
    }

    #[test]
    fn test_thirty_day_campaign_quote() {
        let resolver = PricingResolver::standard();
        let quote = resolver
            .campaign_quote(ServiceKind::BannerAd, 30)
            .unwrap();

        assert_eq!(quote.base_price, dec!(450000));
        assert_eq!(quote.discount.fraction, dec!(0.15));
        assert_eq!(quote.final_price, dec!(382500));
        assert_eq!(quote.savings, dec!(67500));
        assert_eq!(quote.discount.source, DiscountSource::Duration { days: 30 });
    }

    #[test]
    fn test_short_campaign_earns_no_discount() {
        let resolver = PricingResolver::standard();
        let quote = resolver.campaign_quote(ServiceKind::BannerAd, 6).unwrap();

        assert_eq!(quote.base_price, dec!(90000));
        assert_eq!(quote.final_price, dec!(90000));
        assert_eq!(quote.discount.source, DiscountSource::None);
    }

    #[test]
    fn test_zero_day_campaign_quotes_zero() {
        let resolver = PricingResolver::standard();
        let quote = resolver.campaign_quote(ServiceKind::BannerAd, 0).unwrap();

        assert_eq!(quote.base_price, Decimal::ZERO);
        assert_eq!(quote.final_price, Decimal::ZERO);
        assert_eq!(quote.savings, Decimal::ZERO);
    }

    #[test]
    fn test_campaign_quote_rejects_flat_service() {
        let resolver = PricingResolver::standard();
        let err = resolver
            .campaign_quote(ServiceKind::ConcertPromotion, 30)
            .unwrap_err();
        assert!(matches!(err, PricingError::NotDurationPriced { .. }));
    }

    #[test]
    fn test_rounds_half_up() {
        assert_eq!(final_price(dec!(101), dec!(0.5)).unwrap(), dec!(51));
        assert_eq!(final_price(dec!(99), dec!(0.5)).unwrap(), dec!(50));
    }

    #[test]
    fn test_repeating_fraction_lands_on_whole_unit() {
        let third = Decimal::ONE / dec!(3);
        assert_eq!(final_price(dec!(9900), third).unwrap(), dec!(6600));
    }

    #[test]
    fn test_full_discount_quotes_zero() {
        assert_eq!(final_price(dec!(4200), Decimal::ONE).unwrap(), Decimal::ZERO);
    }

    #[test]
    fn test_rejects_negative_base() {
        let err = final_price(dec!(-100), Decimal::ZERO).unwrap_err();
        assert!(matches!(err, PricingError::InvalidBasePrice { .. }));
    }

    #[test]
    fn test_rejects_fractional_base() {
        let err = final_price(dec!(99.5), Decimal::ZERO).unwrap_err();
        assert!(matches!(err, PricingError::InvalidBasePrice { .. }));
    }

    #[test]
    fn test_rejects_fraction_outside_unit_interval() {
        assert!(matches!(
            final_price(dec!(100), dec!(1.01)),
            Err(PricingError::InvalidDiscountFraction { .. })
        ));
        assert!(matches!(
            final_price(dec!(100), dec!(-0.1)),
            Err(PricingError::InvalidDiscountFraction { .. })
        ));
    }

    #[test]
    fn test_final_stays_within_base() {
        let fractions = [
            Decimal::ZERO,
            dec!(0.05),
            dec!(0.15),
            dec!(0.333),
            dec!(0.999),
            Decimal::ONE,
        ];
        for base in [dec!(0), dec!(1), dec!(101), dec!(9900), dec!(450000)] {
            for fraction in fractions {
                let final_amount = final_price(base, fraction).unwrap();
                assert!(final_amount >= Decimal::ZERO);
                assert!(final_amount <= base);
                assert_eq!(savings(base, final_amount), base - final_amount);
            }
        }
    }
}
