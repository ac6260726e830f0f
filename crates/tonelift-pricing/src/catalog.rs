//! Service price catalog
//!
//! Maps each [`ServiceKind`] to its list price. Base prices are whole
//! currency units stored as unsigned integers, so a malformed rules file
//! with a negative or fractional price is rejected during deserialization
//! rather than checked after the fact.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tonelift_common::{PricingError, PricingUnit, ServiceKind};

/// One catalog line: the list price and how it is charged
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CatalogEntry {
    /// Whole currency units; for per-day services this is the one-day rate
    pub base_price: u64,
    /// Flat per order, or per campaign day
    #[serde(default)]
    pub unit: PricingUnit,
}

impl CatalogEntry {
    /// Flat-priced entry
    pub fn flat(base_price: u64) -> Self {
        Self {
            base_price,
            unit: PricingUnit::Flat,
        }
    }

    /// Per-day entry; `base_price` is the day rate
    pub fn per_day(base_price: u64) -> Self {
        Self {
            base_price,
            unit: PricingUnit::PerDay,
        }
    }
}

/// Price catalog keyed by service
///
/// Serializes as a plain JSON map, so a rules file reads
/// `{"concert_promotion": {"base_price": 210000}}`. A key outside the
/// [`ServiceKind`] set fails deserialization; the catalog never accepts
/// services the platform does not sell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PriceCatalog {
    entries: BTreeMap<ServiceKind, CatalogEntry>,
}

impl PriceCatalog {
    /// Empty catalog
    pub fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    /// The standard Tonelift price list
    pub fn standard() -> Self {
        Self::new()
            .with_entry(ServiceKind::PlaylistPitching, CatalogEntry::flat(150_000))
            .with_entry(ServiceKind::MarketingCampaign, CatalogEntry::flat(300_000))
            .with_entry(ServiceKind::BannerAd, CatalogEntry::per_day(15_000))
            .with_entry(ServiceKind::ConcertPromotion, CatalogEntry::flat(210_000))
            .with_entry(ServiceKind::PressRelease, CatalogEntry::flat(120_000))
    }

    /// Set the entry for a service
    pub fn with_entry(mut self, service: ServiceKind, entry: CatalogEntry) -> Self {
        self.entries.insert(service, entry);
        self
    }

    /// Look up the entry for a service
    pub fn entry(&self, service: ServiceKind) -> Result<&CatalogEntry, PricingError> {
        self.entries
            .get(&service)
            .ok_or_else(|| PricingError::ServiceNotPriced {
                service: service.to_string(),
            })
    }

    /// Base price for a service as an exact decimal
    pub fn base_price(&self, service: ServiceKind) -> Result<Decimal, PricingError> {
        Ok(Decimal::from(self.entry(service)?.base_price))
    }

    /// Iterate entries in key order
    pub fn iter(&self) -> impl Iterator<Item = (&ServiceKind, &CatalogEntry)> {
        self.entries.iter()
    }

    /// Number of priced services
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the catalog has no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for PriceCatalog {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_standard_catalog_prices_every_service() {
        let catalog = PriceCatalog::standard();
        assert_eq!(catalog.len(), ServiceKind::ALL.len());
        for service in ServiceKind::ALL {
            assert!(catalog.entry(service).is_ok());
        }
    }

    #[test]
    fn test_base_price_is_exact() {
        let catalog = PriceCatalog::standard();
        assert_eq!(
            catalog.base_price(ServiceKind::ConcertPromotion).unwrap(),
            dec!(210000)
        );
        assert_eq!(
            catalog.base_price(ServiceKind::BannerAd).unwrap(),
            dec!(15000)
        );
    }

    #[test]
    fn test_missing_entry_is_reported() {
        let catalog = PriceCatalog::new();
        let err = catalog.base_price(ServiceKind::PressRelease).unwrap_err();
        assert!(matches!(err, PricingError::ServiceNotPriced { .. }));
    }

    #[test]
    fn test_unknown_service_key_rejected() {
        let json = r#"{"hologram_tour": {"base_price": 100}}"#;
        assert!(serde_json::from_str::<PriceCatalog>(json).is_err());
    }

    #[test]
    fn test_negative_price_rejected() {
        let json = r#"{"banner_ad": {"base_price": -15000}}"#;
        assert!(serde_json::from_str::<PriceCatalog>(json).is_err());
    }

    #[test]
    fn test_fractional_price_rejected() {
        let json = r#"{"banner_ad": {"base_price": 15000.5}}"#;
        assert!(serde_json::from_str::<PriceCatalog>(json).is_err());
    }

    #[test]
    fn test_unit_defaults_to_flat() {
        let json = r#"{"press_release": {"base_price": 120000}}"#;
        let catalog: PriceCatalog = serde_json::from_str(json).unwrap();
        assert_eq!(
            catalog.entry(ServiceKind::PressRelease).unwrap().unit,
            PricingUnit::Flat
        );
    }
}
