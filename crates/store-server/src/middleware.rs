//! Request Middleware
//!
//! Same-origin guard for the API surface.

use axum::{
    extract::{Request, State},
    http::{header, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use url::Url;

use crate::state::AppState;

/// Reject cross-origin `/api/*` requests in production
///
/// The `Origin` header's host (including port) must equal the `Host` header;
/// a missing header counts as a mismatch. Violations get an empty 403 before
/// any handler runs. Non-API paths and non-production mode pass through.
pub async fn require_same_origin(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    if state.config.production && request.uri().path().starts_with("/api") {
        let headers = request.headers();
        let origin = headers.get(header::ORIGIN).and_then(|v| v.to_str().ok());
        let host = headers.get(header::HOST).and_then(|v| v.to_str().ok());

        let allowed = match (origin, host) {
            (Some(origin), Some(host)) => origin_matches_host(origin, host),
            _ => false,
        };

        if !allowed {
            tracing::warn!(
                path = request.uri().path(),
                origin,
                host,
                "Rejected cross-origin API request"
            );
            return StatusCode::FORBIDDEN.into_response();
        }
    }

    next.run(request).await
}

/// Whether an `Origin` header value points at the given `Host` header value
fn origin_matches_host(origin: &str, host: &str) -> bool {
    let Ok(url) = Url::parse(origin) else {
        return false;
    };
    let Some(origin_host) = url.host_str() else {
        return false;
    };

    let origin_authority = match url.port() {
        Some(port) => format!("{origin_host}:{port}"),
        None => origin_host.to_owned(),
    };

    origin_authority.eq_ignore_ascii_case(host)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matching_origin() {
        assert!(origin_matches_host("https://shop.example.com", "shop.example.com"));
        assert!(origin_matches_host("http://localhost:3000", "localhost:3000"));
        assert!(origin_matches_host("https://Shop.Example.com", "shop.example.com"));
    }

    #[test]
    fn test_foreign_origin() {
        assert!(!origin_matches_host("https://evil.example.com", "shop.example.com"));
        assert!(!origin_matches_host("http://localhost:3001", "localhost:3000"));
        assert!(!origin_matches_host("https://shop.example.com:8443", "shop.example.com"));
    }

    #[test]
    fn test_garbage_origin() {
        assert!(!origin_matches_host("not a url", "shop.example.com"));
        assert!(!origin_matches_host("", "shop.example.com"));
        assert!(!origin_matches_host("null", "shop.example.com"));
    }
}
