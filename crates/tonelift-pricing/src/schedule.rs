//! Campaign duration discount schedule
//!
//! Longer ad campaigns earn a larger discount. The schedule is a list of
//! bands, each opening at a minimum day count; a lookup takes the highest
//! band whose threshold the campaign length meets or exceeds. Day counts
//! below the first band earn nothing, day counts past the last band stay
//! in it.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use tonelift_common::PricingError;

/// One schedule band
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DurationBand {
    /// Campaign length in days at which this band opens, inclusive
    pub min_days: u32,
    /// Fraction of the gross price removed, within [0, 1]
    pub discount: Decimal,
}

impl DurationBand {
    pub fn new(min_days: u32, discount: Decimal) -> Self {
        Self { min_days, discount }
    }
}

/// Duration discount schedule, bands ascending by threshold
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DurationDiscountSchedule {
    bands: Vec<DurationBand>,
}

impl DurationDiscountSchedule {
    /// Schedule from a band list; sorts by threshold
    pub fn new(mut bands: Vec<DurationBand>) -> Self {
        bands.sort_by_key(|band| band.min_days);
        Self { bands }
    }

    /// The standard Tonelift campaign schedule
    pub fn standard() -> Self {
        Self::new(vec![
            DurationBand::new(7, Decimal::ZERO),
            DurationBand::new(14, dec!(0.05)),
            DurationBand::new(30, dec!(0.15)),
            DurationBand::new(90, dec!(0.35)),
        ])
    }

    /// Add a band, keeping thresholds sorted
    pub fn with_band(mut self, min_days: u32, discount: Decimal) -> Self {
        self.bands.push(DurationBand::new(min_days, discount));
        self.bands.sort_by_key(|band| band.min_days);
        self
    }

    /// Discount fraction for a campaign length
    pub fn fraction_for(&self, days: u32) -> Decimal {
        self.bands
            .iter()
            .take_while(|band| band.min_days <= days)
            .last()
            .map(|band| band.discount)
            .unwrap_or(Decimal::ZERO)
    }

    /// Iterate bands ascending by threshold
    pub fn iter(&self) -> impl Iterator<Item = &DurationBand> {
        self.bands.iter()
    }

    /// Check thresholds strictly increase and fractions never decrease
    ///
    /// Fractions must lie within [0, 1]; unlike tier discounts, a top band
    /// of exactly 1 is allowed so a promotion can comp the longest runs.
    pub fn validate(&self) -> Result<(), PricingError> {
        if self.bands.is_empty() {
            return Err(PricingError::InvalidSchedule(
                "schedule has no bands".to_string(),
            ));
        }
        for band in &self.bands {
            if band.discount < Decimal::ZERO || band.discount > Decimal::ONE {
                return Err(PricingError::InvalidSchedule(format!(
                    "band at {} days has discount fraction {} outside [0, 1]",
                    band.min_days, band.discount
                )));
            }
        }
        for pair in self.bands.windows(2) {
            if pair[1].min_days <= pair[0].min_days {
                return Err(PricingError::InvalidSchedule(format!(
                    "band thresholds {} and {} do not strictly increase",
                    pair[0].min_days, pair[1].min_days
                )));
            }
            if pair[1].discount < pair[0].discount {
                return Err(PricingError::InvalidSchedule(format!(
                    "discount falls from {} to {} at {} days",
                    pair[0].discount, pair[1].discount, pair[1].min_days
                )));
            }
        }
        Ok(())
    }
}

impl Default for DurationDiscountSchedule {
    fn default() -> Self {
        Self::standard()
    }
}
