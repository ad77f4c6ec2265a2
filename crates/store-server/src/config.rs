//! Server Configuration

/// Price ids the hosted-style checkout session is created with when
/// `CHECKOUT_PRICE_IDS` is unset
const DEFAULT_PRICE_IDS: [&str; 2] = [
    "price_1MkfFaC2E9PG9OjQBxEmv6VU",
    "price_1MS2qqC2E9PG9OjQg4dszKGy",
];

/// Server configuration
#[derive(Clone, Debug)]
pub struct ServerConfig {
    /// Listen address
    pub bind_addr: String,

    /// Production mode: enables the same-origin check on `/api/*`
    pub production: bool,

    /// Public base URL of the storefront, for session return URLs
    pub site_url: String,

    /// Price ids for checkout-session line items
    pub checkout_price_ids: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0:3000".into(),
            production: false,
            site_url: "http://localhost:3000".into(),
            checkout_price_ids: DEFAULT_PRICE_IDS.iter().map(ToString::to_string).collect(),
        }
    }
}

impl ServerConfig {
    /// Read configuration from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let checkout_price_ids = std::env::var("CHECKOUT_PRICE_IDS")
            .map(|ids| {
                ids.split(',')
                    .map(str::trim)
                    .filter(|id| !id.is_empty())
                    .map(ToString::to_string)
                    .collect()
            })
            .unwrap_or(defaults.checkout_price_ids);

        Self {
            bind_addr: std::env::var("BIND_ADDR").unwrap_or(defaults.bind_addr),
            production: std::env::var("APP_ENV").is_ok_and(|env| env == "production"),
            site_url: std::env::var("SITE_URL").unwrap_or(defaults.site_url),
            checkout_price_ids,
        }
    }

    /// Where the provider sends the shopper after an embedded session
    /// completes; `{CHECKOUT_SESSION_ID}` is substituted provider-side
    pub fn confirm_return_url(&self) -> String {
        format!(
            "{}/checkout/confirm?session_id={{CHECKOUT_SESSION_ID}}",
            self.site_url.trim_end_matches('/')
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_return_url_keeps_the_session_placeholder() {
        let config = ServerConfig {
            site_url: "https://shop.example.com/".into(),
            ..ServerConfig::default()
        };

        assert_eq!(
            config.confirm_return_url(),
            "https://shop.example.com/checkout/confirm?session_id={CHECKOUT_SESSION_ID}"
        );
    }

    #[test]
    fn test_defaults() {
        let config = ServerConfig::default();

        assert!(!config.production);
        assert_eq!(config.checkout_price_ids.len(), 2);
    }
}
