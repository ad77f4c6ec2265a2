//! Product and Variant Records
//!
//! Explicit domain records for purchasable products. Prices are exact
//! decimals and serialize as decimal strings.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::pricing;

/// A purchasable product with an ordered variant list
///
/// The first variant in `variants` is the default selection: catalogs that
/// carry a recommended variant place it first (see
/// [`Product::promote_recommended`]).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Product identifier
    pub id: String,

    /// Display title
    pub title: String,

    /// Display image, if the catalog provides one
    pub image: Option<ProductImage>,

    /// Purchasable variants, default-selected first
    pub variants: Vec<Variant>,
}

impl Product {
    /// The variant selected on initial render (first in list order)
    pub fn default_variant(&self) -> Option<&Variant> {
        self.variants.first()
    }

    /// Find a variant by identifier
    pub fn variant(&self, variant_id: &str) -> Option<&Variant> {
        self.variants.iter().find(|v| v.id == variant_id)
    }

    /// Reorder variants so the recommended one comes first
    ///
    /// Stable: variants without the flag keep their relative order, so a list
    /// with no recommended variant is left untouched.
    pub fn promote_recommended(&mut self) {
        self.variants.sort_by_key(|v| !v.recommended);
    }
}

/// Product display image
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductImage {
    /// Image source URL
    pub src: String,
}

/// A purchasable configuration of a product (e.g. a bundle size)
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Variant {
    /// Variant identifier
    pub id: String,

    /// Unit price in major currency units
    pub price: Decimal,

    /// Items per pack
    pub quantity: u32,

    /// Discount off the product base price, in percent
    pub discount_percentage: Decimal,

    /// Whether the catalog recommends this variant
    pub recommended: bool,
}

impl Variant {
    /// The charge for this variant in integer minor currency units
    ///
    /// `round(price × 100 × quantity)`, the amount handed to the payment
    /// provider at intent creation and on re-pricing.
    pub fn amount_minor(&self) -> Result<i64> {
        pricing::amount_minor(self.price, self.quantity)
    }
}
