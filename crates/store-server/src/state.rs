//! Application State

use std::sync::Arc;

use store_payments::{CheckoutFlow, PaymentGateway};

use crate::config::ServerConfig;

/// Shared application state
///
/// Provider clients are constructed once at startup from configuration and
/// passed explicitly to every handler through this state.
#[derive(Clone)]
pub struct AppState {
    /// The process-wide payment gateway
    pub gateway: Arc<dyn PaymentGateway>,

    /// Checkout flow over the built-in fixed catalog
    pub fixed_checkout: Arc<CheckoutFlow>,

    /// Checkout flow over the Shopify catalog (None if not configured)
    pub shopify_checkout: Option<Arc<CheckoutFlow>>,

    /// Server configuration
    pub config: Arc<ServerConfig>,
}
