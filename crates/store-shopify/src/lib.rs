//! # store-shopify
//!
//! Shopify Admin REST catalog provider for the storefront checkout backend.
//!
//! Fetches products from a custom store app over the Admin REST API
//! (`read_products` scope) and converts them into the checkout's own product
//! records, so the payment-intent flow prices remote products exactly like
//! the built-in catalog.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use store_shopify::ShopifyCatalog;
//!
//! let catalog = ShopifyCatalog::from_env()?;
//! let product = catalog.product("8981234567").await?;
//! ```

mod client;
mod rest;

pub use client::{ShopifyCatalog, ShopifyConfig};
pub use rest::{ProductEnvelope, RestImage, RestProduct, RestVariant};
