//! Admin REST Wire Types
//!
//! Defensive records for the slice of the product resource this service
//! requests (`fields=id,title,image,variants`). Everything beyond the id is
//! optional: absent fields decode to defaults instead of failing the lookup.

use rust_decimal::Decimal;
use serde::Deserialize;

use store_core::{Product, ProductImage, Variant};

/// The `{ "product": … }` envelope the Admin REST API wraps single products in
#[derive(Clone, Debug, Deserialize)]
pub struct ProductEnvelope {
    pub product: RestProduct,
}

/// A product as the Admin REST API returns it
#[derive(Clone, Debug, Deserialize)]
pub struct RestProduct {
    /// Numeric product identifier
    pub id: i64,

    #[serde(default)]
    pub title: String,

    #[serde(default)]
    pub image: Option<RestImage>,

    #[serde(default)]
    pub variants: Vec<RestVariant>,
}

/// A product variant as the Admin REST API returns it
#[derive(Clone, Debug, Deserialize)]
pub struct RestVariant {
    /// Numeric variant identifier
    pub id: i64,

    #[serde(default)]
    pub title: Option<String>,

    /// Price as a decimal string, e.g. `"12.99"`
    #[serde(default)]
    pub price: Option<String>,

    #[serde(default)]
    pub position: Option<i64>,
}

/// A product image
#[derive(Clone, Debug, Deserialize)]
pub struct RestImage {
    #[serde(default)]
    pub src: Option<String>,
}

impl From<RestProduct> for Product {
    fn from(rest: RestProduct) -> Self {
        Product {
            id: rest.id.to_string(),
            title: rest.title,
            image: rest
                .image
                .and_then(|image| image.src)
                .map(|src| ProductImage { src }),
            variants: rest.variants.into_iter().map(Variant::from).collect(),
        }
    }
}

impl From<RestVariant> for Variant {
    fn from(rest: RestVariant) -> Self {
        // An unparsable or absent price prices as zero rather than failing
        // the whole product
        let price = rest
            .price
            .as_deref()
            .and_then(|price| price.parse::<Decimal>().ok())
            .unwrap_or(Decimal::ZERO);

        Variant {
            id: rest.id.to_string(),
            price,
            quantity: 1,
            discount_percentage: Decimal::ZERO,
            recommended: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_product_decodes_and_converts() {
        let json = serde_json::json!({
            "product": {
                "id": 8981234567_i64,
                "title": "Sample Snowboard",
                "image": { "src": "https://cdn.example.com/snowboard.jpg" },
                "variants": [
                    { "id": 111, "title": "Default", "price": "49.95", "position": 1 },
                    { "id": 222, "title": "Pro", "price": "79.00", "position": 2 }
                ]
            }
        });

        let envelope: ProductEnvelope = serde_json::from_value(json).unwrap();
        let product = Product::from(envelope.product);

        assert_eq!(product.id, "8981234567");
        assert_eq!(product.title, "Sample Snowboard");
        assert_eq!(product.image.clone().unwrap().src, "https://cdn.example.com/snowboard.jpg");
        assert_eq!(product.variants.len(), 2);

        let first = product.default_variant().unwrap();
        assert_eq!(first.id, "111");
        assert_eq!(first.amount_minor().unwrap(), 4995);
        assert_eq!(first.quantity, 1);
        assert!(!first.recommended);
    }

    #[test]
    fn test_sparse_product_decodes_to_defaults() {
        let json = serde_json::json!({
            "product": { "id": 42 }
        });

        let envelope: ProductEnvelope = serde_json::from_value(json).unwrap();
        let product = Product::from(envelope.product);

        assert_eq!(product.id, "42");
        assert!(product.title.is_empty());
        assert!(product.image.is_none());
        assert!(product.variants.is_empty());
        assert!(product.default_variant().is_none());
    }

    #[test]
    fn test_bad_price_prices_as_zero() {
        let variant = RestVariant {
            id: 7,
            title: None,
            price: Some("not-a-price".into()),
            position: None,
        };

        let converted = Variant::from(variant);
        assert_eq!(converted.price, Decimal::ZERO);
        assert_eq!(converted.amount_minor().unwrap(), 0);
    }
}
