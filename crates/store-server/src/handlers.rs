//! HTTP Handlers
//!
//! JSON marshaling around the checkout flow: validate the request body,
//! call through to the flow or gateway, shape the response. Every expected
//! failure is a single 400-class JSON body; nothing here retries.

use axum::{
    extract::{Query, State},
    http::{header, HeaderMap, StatusCode},
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use store_core::{FixedCatalog, Product};
use store_payments::{CheckoutError, CheckoutFlow, CreateSession, SessionLineItem};

use crate::state::AppState;

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub gateway: String,
    pub shopify_configured: bool,
}

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IntentCreatedResponse {
    pub client_secret: String,
    pub id: String,
}

#[derive(Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionCreatedResponse {
    pub client_secret: String,
}

#[derive(Serialize)]
pub struct SessionStatusResponse {
    pub status: Option<String>,
    pub customer_email: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductCheckoutResponse {
    pub client_secret: String,
    pub id: String,
    pub product: Product,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectVariantRequest {
    pub variant_id: String,
    pub intent_id: String,
}

#[derive(Debug, Deserialize)]
pub struct CheckoutProductRequest {
    #[serde(default)]
    pub id: String,
}

#[derive(Debug, Deserialize)]
pub struct SessionStatusQuery {
    pub session_id: Option<String>,
}

type HandlerError = (StatusCode, Json<ErrorResponse>);

fn bad_request(message: impl Into<String>) -> HandlerError {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse {
            error: message.into(),
        }),
    )
}

/// Whether the request body claims to be JSON
fn is_json(headers: &HeaderMap) -> bool {
    headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| {
            value
                .trim_start()
                .to_ascii_lowercase()
                .starts_with("application/json")
        })
}

/// The Shopify-backed flow, or a 503 when the store is not configured
fn shopify_flow(state: &AppState) -> Result<&Arc<CheckoutFlow>, HandlerError> {
    state.shopify_checkout.as_ref().ok_or((
        StatusCode::SERVICE_UNAVAILABLE,
        Json(ErrorResponse {
            error: "Catalog not configured".into(),
        }),
    ))
}

// ============================================================================
// Handlers
// ============================================================================

/// Health check endpoint
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
        gateway: state.gateway.name().to_owned(),
        shopify_configured: state.shopify_checkout.is_some(),
    })
}

/// Create a payment intent priced at the demo product's default variant
pub async fn create_payment_intent(
    State(state): State<AppState>,
) -> Result<Json<IntentCreatedResponse>, HandlerError> {
    let checkout = state
        .fixed_checkout
        .create_intent(FixedCatalog::PRODUCT_ID)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "Payment intent creation failed");
            bad_request(e.user_message())
        })?;

    Ok(Json(IntentCreatedResponse {
        client_secret: checkout.client_secret,
        id: checkout.intent_id,
    }))
}

/// Re-price a payment intent for the selected demo-product variant
pub async fn select_payment_variant(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: String,
) -> Result<Json<MessageResponse>, HandlerError> {
    select_variant(&state.fixed_checkout, &headers, &body).await
}

/// Create an embedded checkout session from the configured line items
pub async fn create_checkout_session(
    State(state): State<AppState>,
) -> Result<Json<SessionCreatedResponse>, HandlerError> {
    let line_items = state
        .config
        .checkout_price_ids
        .iter()
        .map(|price| SessionLineItem {
            price: price.clone(),
            quantity: 1,
        })
        .collect();

    let session = state
        .gateway
        .create_session(CreateSession {
            line_items,
            return_url: state.config.confirm_return_url(),
        })
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "Checkout session creation failed");
            bad_request(e.user_message())
        })?;

    Ok(Json(SessionCreatedResponse {
        client_secret: session.client_secret,
    }))
}

/// Project a checkout session's status and customer email
pub async fn session_status(
    State(state): State<AppState>,
    Query(query): Query<SessionStatusQuery>,
) -> Result<Json<SessionStatusResponse>, HandlerError> {
    let session_id = query
        .session_id
        .filter(|id| !id.is_empty())
        .ok_or_else(|| bad_request("Missing session_id"))?;

    let status = state
        .gateway
        .session_status(&session_id)
        .await
        .map_err(|e| {
            tracing::warn!(error = %e, "Session status lookup failed");
            bad_request(e.user_message())
        })?;

    Ok(Json(SessionStatusResponse {
        status: status.status,
        customer_email: status.customer_email,
    }))
}

/// Create a payment intent for a store product, returning the product too
pub async fn shopify_checkout_product(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: String,
) -> Result<Json<ProductCheckoutResponse>, HandlerError> {
    let flow = shopify_flow(&state)?;

    if !is_json(&headers) {
        return Err(bad_request("Invalid request"));
    }
    let Ok(request) = serde_json::from_str::<CheckoutProductRequest>(&body) else {
        return Err(bad_request("Invalid input!"));
    };
    if request.id.is_empty() {
        return Err(bad_request("id is required!"));
    }

    let checkout = flow.create_intent(&request.id).await.map_err(|e| {
        tracing::warn!(error = %e, product_id = %request.id, "Product checkout failed");
        match e {
            CheckoutError::ProductNotFound => bad_request("Product not found!"),
            other => bad_request(other.user_message()),
        }
    })?;

    Ok(Json(ProductCheckoutResponse {
        client_secret: checkout.client_secret,
        id: checkout.intent_id,
        product: checkout.product,
    }))
}

/// Re-price a payment intent for the selected store-product variant
pub async fn shopify_select_variant(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: String,
) -> Result<Json<MessageResponse>, HandlerError> {
    let flow = shopify_flow(&state)?;
    select_variant(flow, &headers, &body).await
}

/// Shared re-price path: validate, look up, update once
///
/// Malformed input short-circuits before any provider call; an unknown
/// variant fails after the lookup without issuing the update.
async fn select_variant(
    flow: &CheckoutFlow,
    headers: &HeaderMap,
    body: &str,
) -> Result<Json<MessageResponse>, HandlerError> {
    if !is_json(headers) {
        return Err(bad_request("Invalid request"));
    }

    let Ok(request) = serde_json::from_str::<SelectVariantRequest>(body) else {
        return Err(bad_request("Invalid input!"));
    };
    if request.variant_id.is_empty() || request.intent_id.is_empty() {
        return Err(bad_request("Invalid input!"));
    }

    flow.select_variant(&request.intent_id, &request.variant_id)
        .await
        .map_err(|e| {
            tracing::warn!(
                error = %e,
                intent_id = %request.intent_id,
                variant_id = %request.variant_id,
                "Variant selection failed"
            );
            bad_request(e.user_message())
        })?;

    Ok(Json(MessageResponse {
        message: "Variant selected!",
    }))
}
