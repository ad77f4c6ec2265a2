//! Shared test harness
//!
//! Spins the full router up against the mock gateway and the fixed catalog,
//! so requests exercise middleware, validation, and the checkout flow without
//! a socket or a real provider.

use std::sync::Arc;

use axum::{
    body::Body,
    http::{Method, Request, Response, StatusCode},
    Router,
};
use serde_json::Value;
use tower::ServiceExt;

use store_core::{CatalogProvider, FixedCatalog};
use store_payments::{CheckoutFlow, MockGateway, PaymentGateway, DEFAULT_CURRENCY};
use store_server::{router, AppState, ServerConfig};

pub struct TestApp {
    router: Router,
    pub gateway: Arc<MockGateway>,
}

impl TestApp {
    /// Development-mode app (no origin enforcement)
    pub fn new() -> Self {
        Self::with_config(ServerConfig::default())
    }

    /// Production-mode app (same-origin check active)
    pub fn production() -> Self {
        Self::with_config(ServerConfig {
            production: true,
            ..ServerConfig::default()
        })
    }

    pub fn with_config(config: ServerConfig) -> Self {
        let mock = Arc::new(MockGateway::new());
        let gateway: Arc<dyn PaymentGateway> = mock.clone();
        let catalog: Arc<dyn CatalogProvider> = Arc::new(FixedCatalog::new());

        let fixed_checkout = Arc::new(CheckoutFlow::new(
            catalog.clone(),
            gateway.clone(),
            DEFAULT_CURRENCY,
        ));
        // The store routes get the same fixed catalog here; only the catalog
        // contents differ in production
        let shopify_checkout = Some(Arc::new(CheckoutFlow::new(
            catalog,
            gateway.clone(),
            DEFAULT_CURRENCY,
        )));

        let state = AppState {
            gateway,
            fixed_checkout,
            shopify_checkout,
            config: Arc::new(config),
        };

        Self {
            router: router(state),
            gateway: mock,
        }
    }

    pub async fn send(&self, request: Request<Body>) -> Response<Body> {
        self.router
            .clone()
            .oneshot(request)
            .await
            .expect("router is infallible")
    }

    /// JSON request with the right content type
    pub async fn send_json(&self, method: Method, path: &str, body: Value) -> Response<Body> {
        let request = Request::builder()
            .method(method)
            .uri(path)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .expect("request");
        self.send(request).await
    }

    pub async fn get(&self, path: &str) -> Response<Body> {
        let request = Request::builder()
            .method(Method::GET)
            .uri(path)
            .body(Body::empty())
            .expect("request");
        self.send(request).await
    }
}

/// Read a response body as JSON
pub async fn json_body(response: Response<Body>) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("read body");
    serde_json::from_slice(&bytes).expect("JSON body")
}

/// Assert a 400 with the given `error` message
pub async fn assert_error(response: Response<Body>, message: &str) {
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response).await;
    assert_eq!(body["error"], message);
}
