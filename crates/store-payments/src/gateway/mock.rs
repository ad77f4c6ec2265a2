//! Mock Payment Gateway
//!
//! In-memory `PaymentGateway` for tests and demos. Stores intents, records
//! per-method call counts, and can be told to fail its next calls.

use std::collections::HashMap;
use std::sync::RwLock;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::{PaymentError, Result};

use super::{
    CreateIntent, CreateSession, IntentCreated, IntentStatus, IntentSummary, PaymentGateway,
    SessionCreated, SessionStatus, UpdateIntent,
};

/// In-memory payment gateway
pub struct MockGateway {
    intents: RwLock<HashMap<String, IntentSummary>>,
    sessions: RwLock<HashMap<String, SessionStatus>>,
    /// When set, every call fails with this provider message
    failure: RwLock<Option<String>>,
    create_calls: AtomicUsize,
    retrieve_calls: AtomicUsize,
    update_calls: AtomicUsize,
}

impl Default for MockGateway {
    fn default() -> Self {
        Self::new()
    }
}

impl MockGateway {
    pub fn new() -> Self {
        Self {
            intents: RwLock::new(HashMap::new()),
            sessions: RwLock::new(HashMap::new()),
            failure: RwLock::new(None),
            create_calls: AtomicUsize::new(0),
            retrieve_calls: AtomicUsize::new(0),
            update_calls: AtomicUsize::new(0),
        }
    }

    /// Make every subsequent call fail with the given provider message
    pub fn fail_with(&self, message: impl Into<String>) {
        *self.failure.write().unwrap() = Some(message.into());
    }

    /// Stop failing calls
    pub fn recover(&self) {
        *self.failure.write().unwrap() = None;
    }

    /// Snapshot of a stored intent, for assertions
    pub fn intent(&self, intent_id: &str) -> Option<IntentSummary> {
        self.intents.read().unwrap().get(intent_id).cloned()
    }

    /// Number of `create_intent` calls so far
    pub fn create_calls(&self) -> usize {
        self.create_calls.load(Ordering::SeqCst)
    }

    /// Number of `retrieve_intent` calls so far
    pub fn retrieve_calls(&self) -> usize {
        self.retrieve_calls.load(Ordering::SeqCst)
    }

    /// Number of `update_intent` calls so far
    pub fn update_calls(&self) -> usize {
        self.update_calls.load(Ordering::SeqCst)
    }

    fn check_failure(&self) -> Result<()> {
        match self.failure.read().unwrap().as_ref() {
            Some(message) => Err(PaymentError::Stripe(message.clone())),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl PaymentGateway for MockGateway {
    async fn create_intent(&self, request: CreateIntent) -> Result<IntentCreated> {
        self.create_calls.fetch_add(1, Ordering::SeqCst);
        self.check_failure()?;

        let id = format!("pi_{}", Uuid::new_v4().simple());
        let client_secret = format!("{id}_secret_{}", Uuid::new_v4().simple());

        let summary = IntentSummary {
            id: id.clone(),
            amount: request.amount,
            currency: request.currency,
            status: IntentStatus::RequiresPaymentMethod,
            metadata: request.metadata,
        };
        self.intents.write().unwrap().insert(id.clone(), summary);

        Ok(IntentCreated { id, client_secret })
    }

    async fn retrieve_intent(&self, intent_id: &str) -> Result<IntentSummary> {
        self.retrieve_calls.fetch_add(1, Ordering::SeqCst);
        self.check_failure()?;

        self.intent(intent_id)
            .ok_or_else(|| PaymentError::Stripe(format!("No such payment_intent: '{intent_id}'")))
    }

    async fn update_intent(&self, intent_id: &str, update: UpdateIntent) -> Result<()> {
        self.update_calls.fetch_add(1, Ordering::SeqCst);
        self.check_failure()?;

        let mut intents = self.intents.write().unwrap();
        let intent = intents.get_mut(intent_id).ok_or_else(|| {
            PaymentError::Stripe(format!("No such payment_intent: '{intent_id}'"))
        })?;

        intent.amount = update.amount;
        intent.metadata.extend(update.metadata);

        Ok(())
    }

    async fn create_session(&self, request: CreateSession) -> Result<SessionCreated> {
        self.check_failure()?;

        if request.line_items.is_empty() {
            return Err(PaymentError::Stripe("No line items".into()));
        }

        let id = format!("cs_{}", Uuid::new_v4().simple());
        let client_secret = format!("{id}_secret_{}", Uuid::new_v4().simple());

        self.sessions.write().unwrap().insert(
            id.clone(),
            SessionStatus {
                status: Some("open".into()),
                customer_email: None,
            },
        );

        Ok(SessionCreated { id, client_secret })
    }

    async fn session_status(&self, session_id: &str) -> Result<SessionStatus> {
        self.check_failure()?;

        self.sessions
            .read()
            .unwrap()
            .get(session_id)
            .cloned()
            .ok_or_else(|| PaymentError::Stripe(format!("No such checkout session: '{session_id}'")))
    }

    fn name(&self) -> &str {
        "mock"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gateway::SessionLineItem;

    fn create_request(amount: i64) -> CreateIntent {
        CreateIntent {
            amount,
            currency: "usd".into(),
            metadata: HashMap::from([("product_id".into(), "prod_15262".into())]),
        }
    }

    #[tokio::test]
    async fn test_created_intent_is_retrievable() {
        let gateway = MockGateway::new();

        let created = gateway.create_intent(create_request(9666)).await.unwrap();
        assert!(created.id.starts_with("pi_"));
        assert!(created.client_secret.contains("_secret_"));

        let summary = gateway.retrieve_intent(&created.id).await.unwrap();
        assert_eq!(summary.amount, 9666);
        assert_eq!(summary.status, IntentStatus::RequiresPaymentMethod);
        assert_eq!(summary.metadata["product_id"], "prod_15262");
    }

    #[tokio::test]
    async fn test_update_overwrites_amount_and_merges_metadata() {
        let gateway = MockGateway::new();
        let created = gateway.create_intent(create_request(9666)).await.unwrap();

        gateway
            .update_intent(
                &created.id,
                UpdateIntent {
                    amount: 4028,
                    metadata: HashMap::from([("variant_id".into(), "pack_1".into())]),
                },
            )
            .await
            .unwrap();

        let summary = gateway.intent(&created.id).unwrap();
        assert_eq!(summary.amount, 4028);
        assert_eq!(summary.metadata["product_id"], "prod_15262");
        assert_eq!(summary.metadata["variant_id"], "pack_1");
        assert_eq!(gateway.update_calls(), 1);
    }

    #[tokio::test]
    async fn test_unknown_intent_is_a_provider_error() {
        let gateway = MockGateway::new();

        let result = gateway.retrieve_intent("pi_missing").await;
        assert!(matches!(result, Err(PaymentError::Stripe(_))));
    }

    #[tokio::test]
    async fn test_failure_mode() {
        let gateway = MockGateway::new();
        gateway.fail_with("api is down");

        let result = gateway.create_intent(create_request(100)).await;
        assert!(matches!(result, Err(PaymentError::Stripe(message)) if message == "api is down"));

        gateway.recover();
        assert!(gateway.create_intent(create_request(100)).await.is_ok());
    }

    #[tokio::test]
    async fn test_session_lifecycle() {
        let gateway = MockGateway::new();

        let session = gateway
            .create_session(CreateSession {
                line_items: vec![SessionLineItem {
                    price: "price_123".into(),
                    quantity: 1,
                }],
                return_url: "http://localhost:3000/checkout/confirm".into(),
            })
            .await
            .unwrap();

        let status = gateway.session_status(&session.id).await.unwrap();
        assert_eq!(status.status.as_deref(), Some("open"));
        assert!(status.customer_email.is_none());
    }
}
