//! # store-payments
//!
//! Payment gateway abstraction and the payment-intent lifecycle for the
//! storefront checkout backend.
//!
//! ## The create-then-reprice flow
//!
//! The embedded payment UI needs a client secret before it can mount, but at
//! that point the shopper has not picked a variant yet. So the intent is
//! created at the default variant's price and corrected in place exactly once
//! when the shopper decides:
//!
//! ```text
//! ┌──────────────┐    ┌───────────────────┐    ┌──────────────────┐
//! │ create intent│───▶│ update amount once │───▶│ client confirms  │
//! │ (provisional)│    │ (variant chosen)   │    │ (provider owns   │
//! │              │    │                    │    │  the lifecycle)  │
//! └──────────────┘    └───────────────────┘    └──────────────────┘
//! ```
//!
//! Updating before confirmation is a hard ordering requirement: confirming
//! first would charge the provisional amount.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use store_core::FixedCatalog;
//! use store_payments::{CheckoutFlow, StripeGateway, DEFAULT_CURRENCY};
//!
//! let gateway = Arc::new(StripeGateway::from_env()?);
//! let catalog = Arc::new(FixedCatalog::new());
//! let flow = CheckoutFlow::new(catalog, gateway, DEFAULT_CURRENCY);
//!
//! let checkout = flow.create_intent(FixedCatalog::PRODUCT_ID).await?;
//! // hand checkout.client_secret to the payment UI, then later:
//! flow.select_variant(&checkout.intent_id, "pack_3").await?;
//! ```

mod error;
mod flow;
mod gateway;

pub use error::{CheckoutError, CheckoutResult, PaymentError, Result};
pub use flow::{
    CheckoutFlow, IntentCheckout, DEFAULT_CURRENCY, METADATA_PRODUCT_ID, METADATA_VARIANT_ID,
};
pub use gateway::{
    CreateIntent, CreateSession, IntentCreated, IntentStatus, IntentSummary, MockGateway,
    PaymentGateway, SessionCreated, SessionLineItem, SessionStatus, StripeConfig, StripeGateway,
    UpdateIntent,
};
