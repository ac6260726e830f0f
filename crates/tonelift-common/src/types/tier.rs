//! Subscription tiers
//!
//! Tiers form a closed enumeration. The discount each tier confers lives in
//! the pricing crate's tier table (static configuration), not on the enum,
//! so deployments can re-rate tiers without a code change.

use serde::{Deserialize, Serialize};
use tracing::debug;

/// Subscriber plans, in ascending order of benefit
///
/// `Free` is the unsubscribed state and carries no discount of its own.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum SubscriptionTier {
    /// No subscription
    #[serde(alias = "none")]
    Free,
    /// Entry plan for independent artists
    Basic,
    /// Full toolset for working artists
    Pro,
    /// Multi-artist plan for labels and agencies
    Label,
}

impl SubscriptionTier {
    /// All tiers, lowest first
    pub const ALL: [SubscriptionTier; 4] = [
        SubscriptionTier::Free,
        SubscriptionTier::Basic,
        SubscriptionTier::Pro,
        SubscriptionTier::Label,
    ];

    /// Stable string key used in config files and API payloads
    pub fn as_key(&self) -> &'static str {
        match self {
            SubscriptionTier::Free => "free",
            SubscriptionTier::Basic => "basic",
            SubscriptionTier::Pro => "pro",
            SubscriptionTier::Label => "label",
        }
    }

    /// Lenient parse for request paths: an unrecognized tier degrades to
    /// `Free` (zero discount) rather than failing the request.
    ///
    /// Config files go through the strict serde impl instead, where an
    /// unknown tier name is a load error.
    pub fn from_key(key: &str) -> Self {
        match key.trim().to_ascii_lowercase().as_str() {
            "free" | "none" | "" => SubscriptionTier::Free,
            "basic" => SubscriptionTier::Basic,
            "pro" => SubscriptionTier::Pro,
            "label" => SubscriptionTier::Label,
            other => {
                debug!(tier = other, "unrecognized subscription tier, treating as free");
                SubscriptionTier::Free
            }
        }
    }

    /// Whether this tier is a paying plan
    pub fn is_paid(&self) -> bool {
        !matches!(self, SubscriptionTier::Free)
    }
}

impl Default for SubscriptionTier {
    fn default() -> Self {
        SubscriptionTier::Free
    }
}

impl std::fmt::Display for SubscriptionTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_key())
    }
}
