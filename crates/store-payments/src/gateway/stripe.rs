//! Stripe Gateway
//!
//! `PaymentGateway` implementation backed by the Stripe API. One client per
//! process, constructed from configuration at startup.

use async_trait::async_trait;
use stripe::{
    CheckoutSession, CheckoutSessionId, CheckoutSessionMode, CheckoutSessionUiMode, Client,
    CreateCheckoutSession, CreateCheckoutSessionLineItems, CreatePaymentIntent,
    CreatePaymentIntentAutomaticPaymentMethods, Currency, PaymentIntent, PaymentIntentId,
    UpdatePaymentIntent,
};

use crate::error::{PaymentError, Result};

use super::{
    CreateIntent, CreateSession, IntentCreated, IntentStatus, IntentSummary, PaymentGateway,
    SessionCreated, SessionStatus, UpdateIntent,
};

/// Stripe configuration
#[derive(Clone, Debug)]
pub struct StripeConfig {
    /// Secret API key (never logged)
    pub secret_key: String,
}

impl StripeConfig {
    /// Read configuration from environment variables
    pub fn from_env() -> Result<Self> {
        let secret_key = std::env::var("STRIPE_SECRET_API_KEY")
            .map_err(|_| PaymentError::Config("STRIPE_SECRET_API_KEY not set".into()))?;

        Ok(Self { secret_key })
    }
}

/// Stripe-backed payment gateway
pub struct StripeGateway {
    client: Client,
}

impl StripeGateway {
    /// Create a new gateway from a secret key
    pub fn new(secret_key: &str) -> Self {
        Self {
            client: Client::new(secret_key),
        }
    }

    /// Create from configuration
    pub fn from_config(config: &StripeConfig) -> Self {
        Self::new(&config.secret_key)
    }

    /// Create from environment variables
    pub fn from_env() -> Result<Self> {
        Ok(Self::from_config(&StripeConfig::from_env()?))
    }

    /// Map a lowercase ISO code onto the SDK currency enum
    fn currency(code: &str) -> Currency {
        match code.to_lowercase().as_str() {
            "eur" => Currency::EUR,
            "gbp" => Currency::GBP,
            _ => Currency::USD,
        }
    }

    fn parse_intent_id(intent_id: &str) -> Result<PaymentIntentId> {
        intent_id
            .parse()
            .map_err(|_| PaymentError::InvalidId(intent_id.to_owned()))
    }
}

#[async_trait]
impl PaymentGateway for StripeGateway {
    async fn create_intent(&self, request: CreateIntent) -> Result<IntentCreated> {
        let mut params =
            CreatePaymentIntent::new(request.amount, Self::currency(&request.currency));
        params.automatic_payment_methods = Some(CreatePaymentIntentAutomaticPaymentMethods {
            allow_redirects: None,
            enabled: true,
        });
        params.metadata = Some(request.metadata);

        let intent = PaymentIntent::create(&self.client, params)
            .await
            .map_err(|e| PaymentError::Stripe(e.to_string()))?;

        let client_secret = intent
            .client_secret
            .ok_or(PaymentError::MissingField("client_secret"))?;

        Ok(IntentCreated {
            id: intent.id.to_string(),
            client_secret,
        })
    }

    async fn retrieve_intent(&self, intent_id: &str) -> Result<IntentSummary> {
        let id = Self::parse_intent_id(intent_id)?;

        let intent = PaymentIntent::retrieve(&self.client, &id, &[])
            .await
            .map_err(|e| PaymentError::Stripe(e.to_string()))?;

        Ok(IntentSummary {
            id: intent.id.to_string(),
            amount: intent.amount,
            currency: intent.currency.to_string(),
            status: IntentStatus::from_provider(intent.status.as_str()),
            metadata: intent.metadata,
        })
    }

    async fn update_intent(&self, intent_id: &str, update: UpdateIntent) -> Result<()> {
        let id = Self::parse_intent_id(intent_id)?;

        let mut params = UpdatePaymentIntent::new();
        params.amount = Some(update.amount);
        params.metadata = Some(update.metadata);

        PaymentIntent::update(&self.client, &id, params)
            .await
            .map_err(|e| PaymentError::Stripe(e.to_string()))?;

        Ok(())
    }

    async fn create_session(&self, request: CreateSession) -> Result<SessionCreated> {
        let line_items = request
            .line_items
            .iter()
            .map(|item| CreateCheckoutSessionLineItems {
                price: Some(item.price.clone()),
                quantity: Some(item.quantity),
                ..Default::default()
            })
            .collect();

        let mut params = CreateCheckoutSession::new();
        params.ui_mode = Some(CheckoutSessionUiMode::Embedded);
        params.mode = Some(CheckoutSessionMode::Payment);
        params.line_items = Some(line_items);
        params.return_url = Some(&request.return_url);

        let session = CheckoutSession::create(&self.client, params)
            .await
            .map_err(|e| PaymentError::Stripe(e.to_string()))?;

        let client_secret = session
            .client_secret
            .ok_or(PaymentError::MissingField("client_secret"))?;

        Ok(SessionCreated {
            id: session.id.to_string(),
            client_secret,
        })
    }

    async fn session_status(&self, session_id: &str) -> Result<SessionStatus> {
        let id: CheckoutSessionId = session_id
            .parse()
            .map_err(|_| PaymentError::InvalidId(session_id.to_owned()))?;

        let session = CheckoutSession::retrieve(&self.client, &id, &[])
            .await
            .map_err(|e| PaymentError::Stripe(e.to_string()))?;

        Ok(SessionStatus {
            status: session.status.map(|s| s.as_str().to_owned()),
            customer_email: session.customer_details.and_then(|d| d.email),
        })
    }

    fn name(&self) -> &str {
        "stripe"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_currency_mapping_defaults_to_usd() {
        assert_eq!(StripeGateway::currency("usd"), Currency::USD);
        assert_eq!(StripeGateway::currency("EUR"), Currency::EUR);
        assert_eq!(StripeGateway::currency("jpy"), Currency::USD);
    }

    #[test]
    fn test_malformed_intent_id_is_rejected() {
        let result = StripeGateway::parse_intent_id("not an id");
        assert!(matches!(result, Err(PaymentError::InvalidId(_))));
    }
}
