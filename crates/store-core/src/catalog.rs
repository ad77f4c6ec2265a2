//! Catalog Providers
//!
//! Abstraction over where products come from.

use async_trait::async_trait;
use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;

use crate::error::Result;
use crate::product::{Product, ProductImage, Variant};

/// Catalog provider trait (Strategy pattern)
///
/// Implement this for each product source: the built-in fixed catalog, a
/// commerce platform, etc. The checkout flow is written against this trait
/// so the fixed and remote catalogs are interchangeable.
#[async_trait]
pub trait CatalogProvider: Send + Sync {
    /// Look up a product by identifier
    ///
    /// `Ok(None)` means the catalog answered and the product does not exist;
    /// transport and decode failures are errors.
    async fn product(&self, id: &str) -> Result<Option<Product>>;

    /// Provider name
    fn name(&self) -> &str;
}

/// Base price of the demo product, in major units
const BASE_PRICE: Decimal = dec!(80.55);

/// Number of pack-size variants the demo product carries
const PACK_COUNT: u32 = 5;

/// Pack size the storefront recommends
const RECOMMENDED_PACK: u32 = 3;

/// In-repository catalog with the demo product
///
/// Holds a single product whose variants are bulk packs at increasing
/// discounts, recommended pack first.
pub struct FixedCatalog {
    product: Product,
}

impl FixedCatalog {
    /// Identifier of the built-in demo product
    pub const PRODUCT_ID: &'static str = "prod_15262";

    pub fn new() -> Self {
        Self {
            product: demo_product(),
        }
    }

    /// Build a catalog around a caller-supplied product
    pub fn with_product(mut product: Product) -> Self {
        product.promote_recommended();
        Self { product }
    }

    /// Identifier of the product this catalog serves
    pub fn product_id(&self) -> &str {
        &self.product.id
    }
}

impl Default for FixedCatalog {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CatalogProvider for FixedCatalog {
    async fn product(&self, id: &str) -> Result<Option<Product>> {
        Ok((id == self.product.id).then(|| self.product.clone()))
    }

    fn name(&self) -> &str {
        "fixed"
    }
}

/// The demo product: five pack sizes of one item, discounted by bulk
///
/// Pack `n` holds `n` items at `BASE_PRICE` less a discount that grows with
/// the pack size. Unit prices round to whole cents, midpoint away from zero.
fn demo_product() -> Product {
    let variants = (0..PACK_COUNT)
        .map(|i| {
            let discount = Decimal::from(i * 5 + 50);
            let unit_price = (BASE_PRICE - BASE_PRICE * discount / dec!(100))
                .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);

            Variant {
                id: format!("pack_{}", i + 1),
                price: unit_price,
                quantity: i + 1,
                discount_percentage: discount,
                recommended: i + 1 == RECOMMENDED_PACK,
            }
        })
        .collect();

    let mut product = Product {
        id: FixedCatalog::PRODUCT_ID.into(),
        title: "Test Product".into(),
        image: Some(ProductImage {
            src: "/assets/images/product-1.jpg".into(),
        }),
        variants,
    };
    product.promote_recommended();
    product
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_fixed_catalog_serves_its_product() {
        let catalog = FixedCatalog::new();

        let product = catalog
            .product(FixedCatalog::PRODUCT_ID)
            .await
            .unwrap()
            .expect("demo product");
        assert_eq!(product.title, "Test Product");
        assert_eq!(product.variants.len(), 5);

        assert!(catalog.product("prod_unknown").await.unwrap().is_none());
    }

    #[test]
    fn test_recommended_pack_is_default() {
        let product = demo_product();

        let order: Vec<&str> = product.variants.iter().map(|v| v.id.as_str()).collect();
        assert_eq!(order, vec!["pack_3", "pack_1", "pack_2", "pack_4", "pack_5"]);

        let default = product.default_variant().unwrap();
        assert!(default.recommended);
        assert_eq!(default.id, "pack_3");
    }

    #[test]
    fn test_demo_prices_follow_the_discount_ladder() {
        let product = demo_product();

        let price_of = |id: &str| product.variant(id).unwrap().price;
        assert_eq!(price_of("pack_1"), dec!(40.28));
        assert_eq!(price_of("pack_2"), dec!(36.25));
        assert_eq!(price_of("pack_3"), dec!(32.22));
        assert_eq!(price_of("pack_4"), dec!(28.19));
        assert_eq!(price_of("pack_5"), dec!(24.17));
    }

    #[test]
    fn test_default_variant_amount() {
        let product = demo_product();

        // pack_3: 32.22 per item, three items
        let default = product.default_variant().unwrap();
        assert_eq!(default.amount_minor().unwrap(), 9666);
    }
}
