//! Payment and Checkout Error Types

use store_core::CatalogError;
use thiserror::Error;

/// Result type alias for gateway operations
pub type Result<T> = std::result::Result<T, PaymentError>;

/// Result type alias for checkout-flow operations
pub type CheckoutResult<T> = std::result::Result<T, CheckoutError>;

/// Payment-provider errors
#[derive(Error, Debug)]
pub enum PaymentError {
    /// Stripe API error
    #[error("Stripe error: {0}")]
    Stripe(String),

    /// Identifier did not parse as a provider id
    #[error("Invalid provider id: {0}")]
    InvalidId(String),

    /// Provider response was missing a field we require
    #[error("Provider response missing {0}")]
    MissingField(&'static str),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl PaymentError {
    /// Check if this error is retryable
    pub fn is_retryable(&self) -> bool {
        matches!(self, PaymentError::Stripe(_))
    }

    /// Get user-friendly message
    ///
    /// Provider messages pass through verbatim; everything else collapses to
    /// a generic string so internals never reach the browser.
    pub fn user_message(&self) -> String {
        match self {
            PaymentError::Stripe(message) => message.clone(),
            _ => "Something went wrong!".into(),
        }
    }
}

/// Checkout-flow errors
///
/// Expected failure paths of the intent lifecycle, returned as values so
/// handlers compose them without exceptions.
#[derive(Error, Debug)]
pub enum CheckoutError {
    /// Referenced product absent from the catalog
    #[error("Product not found")]
    ProductNotFound,

    /// Referenced variant absent from the product
    #[error("Variant not found")]
    VariantNotFound,

    /// Intent metadata carries no product reference
    #[error("Payment intent has no associated product")]
    MissingProductRef,

    /// Catalog lookup failed
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    /// Gateway call failed
    #[error(transparent)]
    Payment(#[from] PaymentError),
}

impl CheckoutError {
    /// Get user-friendly message
    pub fn user_message(&self) -> String {
        match self {
            CheckoutError::ProductNotFound | CheckoutError::MissingProductRef => {
                "Invalid product!".into()
            }
            CheckoutError::VariantNotFound => "Invalid variant!".into(),
            CheckoutError::Payment(err) => err.user_message(),
            CheckoutError::Catalog(_) => "Something went wrong!".into(),
        }
    }
}
