//! Payment-Intent Lifecycle
//!
//! Creates an intent at the default variant's price before the shopper has
//! chosen anything, then re-prices that same intent in place exactly once
//! when a variant is selected. The provider owns the intent state machine;
//! this flow only creates, re-prices, and reads.

use std::collections::HashMap;
use std::sync::Arc;

use store_core::{CatalogProvider, Product};

use crate::error::{CheckoutError, CheckoutResult};
use crate::gateway::{CreateIntent, PaymentGateway, UpdateIntent};

/// Currency every intent is created in
pub const DEFAULT_CURRENCY: &str = "usd";

/// Metadata key carrying the product an intent prices
pub const METADATA_PRODUCT_ID: &str = "product_id";

/// Metadata key carrying the variant chosen on re-price
pub const METADATA_VARIANT_ID: &str = "variant_id";

/// Result of intent creation: the browser's handles plus the product to render
#[derive(Clone, Debug)]
pub struct IntentCheckout {
    /// Provider intent identifier, round-tripped by the client on re-price
    pub intent_id: String,

    /// Client secret for mounting the payment UI
    pub client_secret: String,

    /// The product whose default variant priced the intent
    pub product: Product,
}

/// The intent lifecycle service
///
/// Stateless: the intent identifier held client-side is the only durable
/// handle, and the payment provider is the system of record. One instance
/// per catalog, sharing a process-wide gateway.
pub struct CheckoutFlow {
    catalog: Arc<dyn CatalogProvider>,
    gateway: Arc<dyn PaymentGateway>,
    currency: String,
}

impl CheckoutFlow {
    pub fn new(
        catalog: Arc<dyn CatalogProvider>,
        gateway: Arc<dyn PaymentGateway>,
        currency: impl Into<String>,
    ) -> Self {
        Self {
            catalog,
            gateway,
            currency: currency.into(),
        }
    }

    /// Name of the catalog this flow prices from
    pub fn catalog_name(&self) -> &str {
        self.catalog.name()
    }

    /// Create a payment intent priced at the product's default variant
    ///
    /// The amount is provisional: the payment UI needs a client secret to
    /// mount before the shopper has picked a variant. No provider call is
    /// made when the product cannot be resolved.
    pub async fn create_intent(&self, product_id: &str) -> CheckoutResult<IntentCheckout> {
        let product = self
            .catalog
            .product(product_id)
            .await?
            .ok_or(CheckoutError::ProductNotFound)?;
        let variant = product
            .default_variant()
            .ok_or(CheckoutError::VariantNotFound)?;
        let amount = variant.amount_minor()?;

        let metadata =
            HashMap::from([(METADATA_PRODUCT_ID.to_owned(), product.id.clone())]);
        let created = self
            .gateway
            .create_intent(CreateIntent {
                amount,
                currency: self.currency.clone(),
                metadata,
            })
            .await?;

        tracing::info!(
            intent_id = %created.id,
            product_id = %product.id,
            amount,
            catalog = self.catalog.name(),
            "Created payment intent"
        );

        Ok(IntentCheckout {
            intent_id: created.id,
            client_secret: created.client_secret,
            product,
        })
    }

    /// Re-price an intent for the variant the shopper selected
    ///
    /// Retrieves the intent, resolves its product through the catalog from
    /// the `product_id` metadata, and overwrites amount and metadata in one
    /// update call. The two provider calls are sequential: the update's
    /// parameters depend on the retrieval. An unknown variant fails before
    /// any update is issued, leaving the intent untouched.
    pub async fn select_variant(&self, intent_id: &str, variant_id: &str) -> CheckoutResult<()> {
        let intent = self.gateway.retrieve_intent(intent_id).await?;
        let product_id = intent
            .metadata
            .get(METADATA_PRODUCT_ID)
            .ok_or(CheckoutError::MissingProductRef)?;

        let product = self
            .catalog
            .product(product_id)
            .await?
            .ok_or(CheckoutError::ProductNotFound)?;
        let variant = product
            .variant(variant_id)
            .ok_or(CheckoutError::VariantNotFound)?;
        let amount = variant.amount_minor()?;

        let metadata = HashMap::from([(METADATA_VARIANT_ID.to_owned(), variant.id.clone())]);
        self.gateway
            .update_intent(intent_id, UpdateIntent { amount, metadata })
            .await?;

        tracing::info!(intent_id, variant_id, amount, "Re-priced payment intent");

        Ok(())
    }
}
