//! Payment Gateway Abstraction
//!
//! Explicit request/response records for the provider calls the checkout
//! makes, decoded defensively instead of trusting SDK shapes downstream.

mod mock;
mod stripe;

pub use mock::MockGateway;
pub use stripe::{StripeConfig, StripeGateway};

use std::collections::HashMap;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Payment gateway trait (Strategy pattern)
///
/// One long-lived implementation per process, constructed from configuration
/// at startup and shared by every handler. The provider owns the intent state
/// machine; these five calls are the only interaction this service has with
/// it.
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Create a payment intent at a provisional amount
    async fn create_intent(&self, request: CreateIntent) -> Result<IntentCreated>;

    /// Retrieve an intent by identifier
    async fn retrieve_intent(&self, intent_id: &str) -> Result<IntentSummary>;

    /// Overwrite an intent's amount and metadata in place
    ///
    /// An overwrite, not an increment: the new amount replaces whatever the
    /// intent was created with.
    async fn update_intent(&self, intent_id: &str, update: UpdateIntent) -> Result<()>;

    /// Create an embedded checkout session
    async fn create_session(&self, request: CreateSession) -> Result<SessionCreated>;

    /// Project a checkout session's status and customer email
    async fn session_status(&self, session_id: &str) -> Result<SessionStatus>;

    /// Gateway name
    fn name(&self) -> &str;
}

/// Parameters for intent creation
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CreateIntent {
    /// Amount in integer minor currency units
    pub amount: i64,

    /// Lowercase ISO currency code (e.g. `"usd"`)
    pub currency: String,

    /// Metadata recorded on the intent
    pub metadata: HashMap<String, String>,
}

/// A freshly created intent: the two handles the browser needs
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct IntentCreated {
    /// Provider intent identifier
    pub id: String,

    /// Client secret authorizing the browser to complete this intent
    pub client_secret: String,
}

/// Projection of a provider-owned payment intent
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct IntentSummary {
    /// Provider intent identifier
    pub id: String,

    /// Current amount in minor units
    pub amount: i64,

    /// Lowercase ISO currency code
    pub currency: String,

    /// Provider-defined lifecycle status
    pub status: IntentStatus,

    /// Metadata recorded on the intent
    pub metadata: HashMap<String, String>,
}

/// Provider-defined intent status, decoded defensively
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntentStatus {
    Succeeded,
    Processing,
    RequiresPaymentMethod,
    /// Any status this service does not interpret
    #[serde(untagged)]
    Other(String),
}

impl IntentStatus {
    /// Decode a provider status string
    pub fn from_provider(status: &str) -> Self {
        match status {
            "succeeded" => IntentStatus::Succeeded,
            "processing" => IntentStatus::Processing,
            "requires_payment_method" => IntentStatus::RequiresPaymentMethod,
            other => IntentStatus::Other(other.to_owned()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            IntentStatus::Succeeded => "succeeded",
            IntentStatus::Processing => "processing",
            IntentStatus::RequiresPaymentMethod => "requires_payment_method",
            IntentStatus::Other(status) => status,
        }
    }
}

/// Parameters for the single in-place re-price of an intent
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct UpdateIntent {
    /// New amount in integer minor currency units
    pub amount: i64,

    /// Metadata recorded on the intent (merged by the provider)
    pub metadata: HashMap<String, String>,
}

/// Parameters for checkout session creation
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CreateSession {
    /// Priced line items for the session
    pub line_items: Vec<SessionLineItem>,

    /// URL the provider redirects to when the session completes
    pub return_url: String,
}

/// One priced line item of a checkout session
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SessionLineItem {
    /// Provider price identifier
    pub price: String,

    /// Quantity purchased
    pub quantity: u64,
}

/// A freshly created checkout session
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SessionCreated {
    /// Provider session identifier
    pub id: String,

    /// Client secret for mounting the embedded session
    pub client_secret: String,
}

/// Status projection of a checkout session
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SessionStatus {
    /// Provider status string, verbatim (`"open"`, `"complete"`, …)
    pub status: Option<String>,

    /// Customer email, when the provider has collected one
    pub customer_email: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intent_status_round_trips_known_values() {
        for status in ["succeeded", "processing", "requires_payment_method"] {
            assert_eq!(IntentStatus::from_provider(status).as_str(), status);
        }
    }

    #[test]
    fn test_unknown_status_is_preserved() {
        let status = IntentStatus::from_provider("requires_capture");
        assert_eq!(status, IntentStatus::Other("requires_capture".into()));
        assert_eq!(status.as_str(), "requires_capture");
    }
}
