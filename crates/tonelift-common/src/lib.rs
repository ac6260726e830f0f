//! # Tonelift Common
//!
//! Shared types and errors for the Tonelift music promotion platform.
//!
//! ## Core Types
//!
//! - [`ServiceKind`]: The closed set of purchasable promotion services
//! - [`ServiceCategory`]: Grouping used for per-category discount overrides
//! - [`SubscriptionTier`]: Subscriber plan determining the tier discount
//! - [`PriceQuote`]: Computed `{base, discount, final, savings}` tuple
//! - [`DiscountSource`]: Which discount (if any) a quote carries
//!
//! Monetary amounts are whole currency units (no minor units) held in
//! [`rust_decimal::Decimal`] so discount math stays exact until the single
//! rounding step that produces a final price.

pub mod error;
pub mod types;

// Re-export commonly used types at crate root
pub use error::{PricingError, Result, ToneliftError};
pub use types::{
    quote::{AppliedDiscount, DiscountSource, PriceQuote},
    service::{PricingUnit, ServiceCategory, ServiceKind},
    tier::SubscriptionTier,
};

/// Tonelift version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Currency code used when none is configured
pub const DEFAULT_CURRENCY: &str = "krw";

/// Highest campaign length (days) a quote request will accept
pub const MAX_CAMPAIGN_DAYS: u32 = 3650;
