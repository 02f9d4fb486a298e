//! Mock payment provider for testing.
//!
//! Records every call and returns pre-configured responses, so handler
//! and HTTP tests can exercise payment flows without touching Stripe.

use std::sync::Mutex;

use async_trait::async_trait;

use crate::ports::{
    CheckoutPaymentStatus, CheckoutSession, CreateCheckoutRequest, PaymentError, PaymentProvider,
    ProviderCheckout, WebhookEvent, WebhookEventData, WebhookEventType,
};

/// Calls recorded by the mock, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordedCall {
    CreateCheckoutSession { session_id: String },
    GetCheckoutSession { checkout_session_id: String },
    VerifyWebhook,
}

/// Mock payment provider with configurable responses and a call log.
#[derive(Default)]
pub struct MockPaymentProvider {
    calls: Mutex<Vec<RecordedCall>>,
    next_checkout: Mutex<Option<CheckoutSession>>,
    next_provider_checkout: Mutex<Option<ProviderCheckout>>,
    next_webhook_event: Mutex<Option<WebhookEvent>>,
    next_error: Mutex<Option<PaymentError>>,
}

impl MockPaymentProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Configure the checkout session returned by `create_checkout_session`.
    pub fn with_checkout(self, checkout: CheckoutSession) -> Self {
        *self.next_checkout.lock().unwrap_or_else(|e| e.into_inner()) = Some(checkout);
        self
    }

    /// Configure the checkout state returned by `get_checkout_session`.
    pub fn with_provider_checkout(self, checkout: ProviderCheckout) -> Self {
        *self
            .next_provider_checkout
            .lock()
            .unwrap_or_else(|e| e.into_inner()) = Some(checkout);
        self
    }

    /// Configure the event returned by `verify_webhook`.
    pub fn with_webhook_event(self, event: WebhookEvent) -> Self {
        *self
            .next_webhook_event
            .lock()
            .unwrap_or_else(|e| e.into_inner()) = Some(event);
        self
    }

    /// Make the next call fail with the given error.
    pub fn with_error(self, error: PaymentError) -> Self {
        *self.next_error.lock().unwrap_or_else(|e| e.into_inner()) = Some(error);
        self
    }

    /// All calls made against the mock, in order.
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    fn record(&self, call: RecordedCall) {
        self.calls
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(call);
    }

    fn take_error(&self) -> Option<PaymentError> {
        self.next_error
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .take()
    }
}

#[async_trait]
impl PaymentProvider for MockPaymentProvider {
    async fn create_checkout_session(
        &self,
        request: CreateCheckoutRequest,
    ) -> Result<CheckoutSession, PaymentError> {
        self.record(RecordedCall::CreateCheckoutSession {
            session_id: request.session_id.to_string(),
        });

        if let Some(err) = self.take_error() {
            return Err(err);
        }

        let configured = self
            .next_checkout
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone();

        Ok(configured.unwrap_or_else(|| CheckoutSession {
            id: format!("cs_mock_{}", request.session_id),
            url: format!("https://checkout.mock/pay/cs_mock_{}", request.session_id),
            expires_at: chrono::Utc::now().timestamp() + 24 * 60 * 60,
        }))
    }

    async fn get_checkout_session(
        &self,
        checkout_session_id: &str,
    ) -> Result<Option<ProviderCheckout>, PaymentError> {
        self.record(RecordedCall::GetCheckoutSession {
            checkout_session_id: checkout_session_id.to_string(),
        });

        if let Some(err) = self.take_error() {
            return Err(err);
        }

        Ok(self
            .next_provider_checkout
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone())
    }

    async fn verify_webhook(
        &self,
        _payload: &[u8],
        _signature: &str,
    ) -> Result<WebhookEvent, PaymentError> {
        self.record(RecordedCall::VerifyWebhook);

        if let Some(err) = self.take_error() {
            return Err(err);
        }

        let configured = self
            .next_webhook_event
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone();

        configured.ok_or_else(|| PaymentError::invalid_webhook("no webhook event configured"))
    }
}

/// Builds a completed-checkout event for mentoring sessions.
pub fn completed_checkout_event(
    checkout_session_id: &str,
    session_id: Option<&str>,
) -> WebhookEvent {
    WebhookEvent {
        id: format!("evt_mock_{}", checkout_session_id),
        event_type: WebhookEventType::CheckoutSessionCompleted,
        data: WebhookEventData::Checkout {
            checkout_session_id: checkout_session_id.to_string(),
            payment_intent_id: Some(format!("pi_mock_{}", checkout_session_id)),
            metadata_type: Some("mentor_session".to_string()),
            session_id: session_id.map(str::to_string),
        },
        created_at: chrono::Utc::now().timestamp(),
    }
}

/// Builds a settled checkout state for polling tests.
pub fn paid_checkout(checkout_session_id: &str) -> ProviderCheckout {
    ProviderCheckout {
        id: checkout_session_id.to_string(),
        payment_status: CheckoutPaymentStatus::Paid,
        payment_intent_id: Some(format!("pi_mock_{}", checkout_session_id)),
    }
}
