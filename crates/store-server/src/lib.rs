//! # store-server
//!
//! Axum HTTP server for the storefront checkout backend. Exposes the
//! payment-intent lifecycle over `/api/stripe/*` (built-in catalog) and
//! `/api/shopify/*` (remote catalog), guarded by a production-only
//! same-origin check.

pub mod config;
pub mod handlers;
pub mod middleware;
pub mod state;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

pub use config::ServerConfig;
pub use state::AppState;

/// Assemble the application router
///
/// Kept separate from `main` so tests can drive the full stack, middleware
/// included, without binding a socket.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health_check))
        .route(
            "/api/stripe/create-payment-intent",
            post(handlers::create_payment_intent).put(handlers::select_payment_variant),
        )
        .route(
            "/api/stripe/create-checkout-session",
            post(handlers::create_checkout_session),
        )
        .route("/api/stripe/session-status", get(handlers::session_status))
        .route(
            "/api/shopify/checkout-product",
            post(handlers::shopify_checkout_product).put(handlers::shopify_select_variant),
        )
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            middleware::require_same_origin,
        ))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
