//! Service catalog keys and categories
//!
//! The sellable promotion services form a closed set. Price tables are keyed
//! by [`ServiceKind`], never by free-form strings, so a misspelled or
//! unpriced key is rejected at the boundary instead of silently quoting
//! nothing.

use serde::{Deserialize, Serialize};

use crate::error::PricingError;

/// Sellable promotion services
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum ServiceKind {
    /// Pitching a track to playlist curators
    PlaylistPitching,
    /// Managed social/streaming marketing campaign
    MarketingCampaign,
    /// Rotating banner advertisement, priced per running day
    BannerAd,
    /// Concert and event promotion
    ConcertPromotion,
    /// Press release drafting and distribution
    PressRelease,
}

impl ServiceKind {
    /// All catalog keys, in display order
    pub const ALL: [ServiceKind; 5] = [
        ServiceKind::PlaylistPitching,
        ServiceKind::MarketingCampaign,
        ServiceKind::BannerAd,
        ServiceKind::ConcertPromotion,
        ServiceKind::PressRelease,
    ];

    /// Stable string key used in config files and API payloads
    pub fn as_key(&self) -> &'static str {
        match self {
            ServiceKind::PlaylistPitching => "playlist_pitching",
            ServiceKind::MarketingCampaign => "marketing_campaign",
            ServiceKind::BannerAd => "banner_ad",
            ServiceKind::ConcertPromotion => "concert_promotion",
            ServiceKind::PressRelease => "press_release",
        }
    }

    /// Category used for per-category tier discount overrides
    pub fn category(&self) -> ServiceCategory {
        match self {
            ServiceKind::PlaylistPitching => ServiceCategory::Pitching,
            ServiceKind::MarketingCampaign => ServiceCategory::Marketing,
            ServiceKind::BannerAd => ServiceCategory::Advertising,
            ServiceKind::ConcertPromotion => ServiceCategory::Events,
            ServiceKind::PressRelease => ServiceCategory::Marketing,
        }
    }

    /// Parse a service key, rejecting anything outside the catalog
    pub fn from_key(key: &str) -> Result<Self, PricingError> {
        match key {
            "playlist_pitching" => Ok(ServiceKind::PlaylistPitching),
            "marketing_campaign" => Ok(ServiceKind::MarketingCampaign),
            "banner_ad" => Ok(ServiceKind::BannerAd),
            "concert_promotion" => Ok(ServiceKind::ConcertPromotion),
            "press_release" => Ok(ServiceKind::PressRelease),
            other => Err(PricingError::UnknownService {
                key: other.to_string(),
            }),
        }
    }
}

impl std::fmt::Display for ServiceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_key())
    }
}

impl std::str::FromStr for ServiceKind {
    type Err = PricingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_key(s)
    }
}

/// Service categories that tier discounts may override individually
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ServiceCategory {
    /// Playlist and curator pitching
    Pitching,
    /// Marketing campaigns and press work
    Marketing,
    /// Banner and display advertising
    Advertising,
    /// Concert and event promotion
    Events,
}

impl ServiceCategory {
    /// Stable string key used in config files and API payloads
    pub fn as_key(&self) -> &'static str {
        match self {
            ServiceCategory::Pitching => "pitching",
            ServiceCategory::Marketing => "marketing",
            ServiceCategory::Advertising => "advertising",
            ServiceCategory::Events => "events",
        }
    }
}

impl std::fmt::Display for ServiceCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_key())
    }
}

/// How a catalog entry is priced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PricingUnit {
    /// One price for the whole engagement
    Flat,
    /// Price per running day; campaign quotes multiply by the day count
    PerDay,
}

impl Default for PricingUnit {
    fn default() -> Self {
        PricingUnit::Flat
    }
}
