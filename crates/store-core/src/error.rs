//! Catalog Error Types

use rust_decimal::Decimal;
use thiserror::Error;

/// Result type alias for catalog operations
pub type Result<T> = std::result::Result<T, CatalogError>;

/// Catalog-related errors
#[derive(Error, Debug)]
pub enum CatalogError {
    /// Remote catalog request failed (transport or non-success status)
    #[error("Catalog request failed: {0}")]
    Remote(String),

    /// Remote catalog returned a payload we could not decode
    #[error("Catalog response invalid: {0}")]
    Decode(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Computed amount does not fit in integer minor units
    #[error("Amount out of range: {price} x {quantity}")]
    AmountOverflow {
        /// Unit price that overflowed
        price: Decimal,
        /// Item quantity of the variant
        quantity: u32,
    },
}

impl CatalogError {
    /// Check if this error is retryable
    pub fn is_retryable(&self) -> bool {
        matches!(self, CatalogError::Remote(_))
    }
}
