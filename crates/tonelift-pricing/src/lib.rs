//! # Tonelift Pricing
//!
//! Price catalog, discount tables, and quote computation for the Tonelift
//! promotion platform.
//!
//! ## Pricing Formula
//!
//! ```text
//! final = round_half_up(base × (1 − fraction))
//! savings = base − final
//! ```
//!
//! Where `fraction` comes from exactly one of:
//! - the subscription tier table (general fraction or per-category override)
//! - the campaign duration schedule (highest band at or below the day count)
//!
//! The two sources are never combined. Amounts are whole currency units held
//! in [`rust_decimal::Decimal`], discounted exactly and rounded once.

pub mod catalog;
pub mod config;
pub mod resolver;
pub mod schedule;
pub mod tiers;

// Re-export the working set at crate root
pub use catalog::{CatalogEntry, PriceCatalog};
pub use config::PricingConfig;
pub use resolver::{final_price, savings, PricingResolver};
pub use schedule::{DurationBand, DurationDiscountSchedule};
pub use tiers::{TierDiscount, TierTable};
