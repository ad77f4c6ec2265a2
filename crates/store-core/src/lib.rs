//! # store-core
//!
//! Catalog model and pricing for the storefront checkout backend.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                     CheckoutFlow                             │
//! │  ┌─────────────┐  ┌──────────────────┐  ┌────────────────┐  │
//! │  │   Pricing   │  │ CatalogProvider  │  │ PaymentGateway │  │
//! │  │ (minor unit)│──│   (Strategy)     │──│  (see store-   │  │
//! │  │             │  │ fixed / shopify  │  │   payments)    │  │
//! │  └─────────────┘  └──────────────────┘  └────────────────┘  │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! The `CatalogProvider` trait lets the same checkout flow price intents from
//! the built-in demo catalog or from a remote commerce platform without
//! changing any lifecycle logic.

pub mod catalog;
pub mod error;
pub mod pricing;
pub mod product;

pub use catalog::{CatalogProvider, FixedCatalog};
pub use error::{CatalogError, Result};
pub use pricing::amount_minor;
pub use product::{Product, ProductImage, Variant};
