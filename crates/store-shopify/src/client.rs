//! Shopify Catalog Client
//!
//! `CatalogProvider` implementation over the Admin REST API of a custom
//! store app.

use async_trait::async_trait;

use store_core::{CatalogError, CatalogProvider, Product, Result};

use crate::rest::ProductEnvelope;

/// Header carrying the admin access token
const ACCESS_TOKEN_HEADER: &str = "X-Shopify-Access-Token";

/// The only product fields the checkout needs
const PRODUCT_FIELDS: &str = "id,title,image,variants";

/// Shopify configuration
///
/// The full custom-app credential set; product reads authenticate with the
/// access token, the key pair is carried for parity with the store's app
/// registration. None of it is ever logged.
#[derive(Clone, Debug)]
pub struct ShopifyConfig {
    /// Admin API key
    pub api_key: String,

    /// Admin API secret key
    pub api_secret_key: String,

    /// Admin access token of the custom store app
    pub access_token: String,

    /// Store name, as in `{store_name}.myshopify.com`
    pub store_name: String,

    /// Admin API version
    pub api_version: String,
}

impl ShopifyConfig {
    /// Admin API version this client is written against
    pub const DEFAULT_API_VERSION: &'static str = "2024-04";

    /// Read configuration from environment variables
    pub fn from_env() -> Result<Self> {
        let var = |name: &str| {
            std::env::var(name).map_err(|_| CatalogError::Config(format!("{name} not set")))
        };

        Ok(Self {
            api_key: var("SHOPIFY_ADMIN_API_KEY")?,
            api_secret_key: var("SHOPIFY_ADMIN_API_SECRET_KEY")?,
            access_token: var("SHOPIFY_ADMIN_ACCESS_TOKEN")?,
            store_name: var("SHOPIFY_STORE_NAME")?,
            api_version: std::env::var("SHOPIFY_API_VERSION")
                .unwrap_or_else(|_| Self::DEFAULT_API_VERSION.into()),
        })
    }

    /// Host of the store's admin API
    pub fn host(&self) -> String {
        format!("{}.myshopify.com", self.store_name)
    }

    fn base_url(&self) -> String {
        format!("https://{}/admin/api/{}", self.host(), self.api_version)
    }
}

/// Shopify-backed catalog
pub struct ShopifyCatalog {
    http: reqwest::Client,
    base_url: String,
    access_token: String,
}

impl ShopifyCatalog {
    /// Create from configuration
    pub fn from_config(config: &ShopifyConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: config.base_url(),
            access_token: config.access_token.clone(),
        }
    }

    /// Create from environment variables
    pub fn from_env() -> Result<Self> {
        Ok(Self::from_config(&ShopifyConfig::from_env()?))
    }

    async fn fetch_product(&self, id: &str) -> Result<Option<Product>> {
        let url = format!("{}/products/{id}.json", self.base_url);

        let response = self
            .http
            .get(&url)
            .header(ACCESS_TOKEN_HEADER, &self.access_token)
            .query(&[("fields", PRODUCT_FIELDS)])
            .send()
            .await
            .map_err(|e| CatalogError::Remote(e.to_string()))?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            tracing::debug!(product_id = id, "Product not in store");
            return Ok(None);
        }
        if !response.status().is_success() {
            return Err(CatalogError::Remote(format!(
                "Shopify returned {}",
                response.status()
            )));
        }

        let envelope: ProductEnvelope = response
            .json()
            .await
            .map_err(|e| CatalogError::Decode(e.to_string()))?;

        tracing::debug!(product_id = id, "Fetched product from store");
        Ok(Some(envelope.product.into()))
    }
}

#[async_trait]
impl CatalogProvider for ShopifyCatalog {
    async fn product(&self, id: &str) -> Result<Option<Product>> {
        self.fetch_product(id).await
    }

    fn name(&self) -> &str {
        "shopify"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> ShopifyConfig {
        ShopifyConfig {
            api_key: "key".into(),
            api_secret_key: "secret".into(),
            access_token: "shpat_test".into(),
            store_name: "demo-store".into(),
            api_version: ShopifyConfig::DEFAULT_API_VERSION.into(),
        }
    }

    #[test]
    fn test_admin_url_layout() {
        let config = config();

        assert_eq!(config.host(), "demo-store.myshopify.com");
        assert_eq!(
            config.base_url(),
            "https://demo-store.myshopify.com/admin/api/2024-04"
        );
    }

    #[test]
    fn test_catalog_name() {
        let catalog = ShopifyCatalog::from_config(&config());
        assert_eq!(catalog.name(), "shopify");
    }
}
