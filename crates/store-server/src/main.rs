//! storefront-checkout HTTP Server
//!
//! Axum-based server wiring the payment-intent lifecycle to Stripe and,
//! when configured, the product catalog to a Shopify store.

use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use store_core::{CatalogProvider, FixedCatalog};
use store_payments::{CheckoutFlow, PaymentGateway, StripeGateway, DEFAULT_CURRENCY};
use store_server::{router, AppState, ServerConfig};
use store_shopify::ShopifyCatalog;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info,tower_http=debug".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load environment
    dotenvy::dotenv().ok();

    let config = Arc::new(ServerConfig::from_env());

    // The payment gateway is the point of this server: fail fast without it
    let gateway: Arc<dyn PaymentGateway> = Arc::new(StripeGateway::from_env()?);
    tracing::info!("✓ Stripe configured");

    let fixed_catalog: Arc<dyn CatalogProvider> = Arc::new(FixedCatalog::new());
    let fixed_checkout = Arc::new(CheckoutFlow::new(
        fixed_catalog,
        gateway.clone(),
        DEFAULT_CURRENCY,
    ));

    // The remote catalog is optional
    let shopify_checkout = match ShopifyCatalog::from_env() {
        Ok(catalog) => {
            tracing::info!("✓ Shopify catalog configured");
            let catalog: Arc<dyn CatalogProvider> = Arc::new(catalog);
            Some(Arc::new(CheckoutFlow::new(
                catalog,
                gateway.clone(),
                DEFAULT_CURRENCY,
            )))
        }
        Err(e) => {
            tracing::warn!("⚠ Shopify catalog disabled - {}", e);
            tracing::warn!("  Set SHOPIFY_* variables in .env to enable /api/shopify routes");
            None
        }
    };

    if config.production {
        tracing::info!("✓ Production mode - same-origin check active on /api");
    }

    let state = AppState {
        gateway,
        fixed_checkout,
        shopify_checkout,
        config: config.clone(),
    };

    let app = router(state);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;

    tracing::info!("══════════════════════════════════════════════════");
    tracing::info!("🚀 storefront-checkout server on http://{}", config.bind_addr);
    tracing::info!("══════════════════════════════════════════════════");
    tracing::info!("");
    tracing::info!("Endpoints:");
    tracing::info!("  GET  /health                            - Health check");
    tracing::info!("  POST /api/stripe/create-payment-intent  - Create intent (demo catalog)");
    tracing::info!("  PUT  /api/stripe/create-payment-intent  - Re-price intent for a variant");
    tracing::info!("  POST /api/stripe/create-checkout-session - Create embedded session");
    tracing::info!("  GET  /api/stripe/session-status         - Session status");
    tracing::info!("  POST /api/shopify/checkout-product      - Create intent (store catalog)");
    tracing::info!("  PUT  /api/shopify/checkout-product      - Re-price intent for a variant");
    tracing::info!("");

    axum::serve(listener, app).await?;

    Ok(())
}
