//! Error types for the Tonelift pricing engine
//!
//! Provides a unified error type and domain-specific error variants

use thiserror::Error;

/// Result type alias using ToneliftError
pub type Result<T> = std::result::Result<T, ToneliftError>;

/// Unified error type for Tonelift operations
#[derive(Debug, Error)]
pub enum ToneliftError {
    // Pricing errors
    #[error("Pricing error: {0}")]
    Pricing(#[from] PricingError),

    // Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    // Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    // Generic internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Pricing calculation errors
///
/// Unknown *tiers* are not represented here: tier resolution fails open to a
/// zero discount. Unknown *service keys* fail closed, since quoting a service
/// that has no price would put a wrong number in front of a buyer.
#[derive(Debug, Error)]
pub enum PricingError {
    #[error("Invalid base price {amount}: amounts are non-negative whole currency units")]
    InvalidBasePrice { amount: String },

    #[error("Invalid discount fraction {fraction}: must be within [0, 1]")]
    InvalidDiscountFraction { fraction: String },

    #[error("Unknown service key: {key}")]
    UnknownService { key: String },

    #[error("No price configured for service: {service}")]
    ServiceNotPriced { service: String },

    #[error("Service is not priced per day: {service}")]
    NotDurationPriced { service: String },

    #[error("Invalid duration discount schedule: {0}")]
    InvalidSchedule(String),

    #[error("Invalid tier table: {0}")]
    InvalidTierTable(String),
}

// Implement From for common external error types
impl From<serde_json::Error> for ToneliftError {
    fn from(err: serde_json::Error) -> Self {
        ToneliftError::Serialization(err.to_string())
    }
}

impl From<anyhow::Error> for ToneliftError {
    fn from(err: anyhow::Error) -> Self {
        ToneliftError::Internal(err.to_string())
    }
}
