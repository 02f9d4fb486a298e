//! Stripe payment provider adapter.
//!
//! Implements the `PaymentProvider` trait for Stripe API integration.
//! Handles one-off checkout sessions for mentoring bookings and webhook
//! signature verification.
//!
//! # Security
//!
//! - HMAC-SHA256 signature verification with constant-time comparison
//! - Timestamp validation (5-minute window) for replay attack prevention
//! - Secrets handled via `secrecy::SecretString`

use std::time::Duration;

use async_trait::async_trait;
use hmac::{Hmac, Mac};
use secrecy::{ExposeSecret, SecretString};
use sha2::Sha256;
use subtle::ConstantTimeEq;

use crate::config::PaymentConfig;
use crate::ports::{
    CheckoutPaymentStatus, CheckoutSession, CreateCheckoutRequest, PaymentError, PaymentErrorCode,
    PaymentProvider, ProviderCheckout, WebhookEvent, WebhookEventData, WebhookEventType,
};

use super::webhook_types::{hex_encode, SignatureHeader, StripeCheckoutSession, StripeWebhookEvent};

type HmacSha256 = Hmac<Sha256>;

/// Maximum age for webhook events (5 minutes).
const MAX_TIMESTAMP_AGE_SECS: i64 = 300;

/// Clock skew tolerance for future timestamps (60 seconds).
const MAX_FUTURE_TOLERANCE_SECS: i64 = 60;

/// Stripe API configuration.
#[derive(Clone)]
pub struct StripeConfig {
    /// Stripe secret API key (sk_live_... or sk_test_...).
    api_key: SecretString,

    /// Webhook signing secret (whsec_...).
    webhook_secret: SecretString,

    /// Base URL for Stripe API (default: https://api.stripe.com).
    api_base_url: String,

    /// Timeout applied to every API call.
    request_timeout: Duration,

    /// Whether to require livemode events in production.
    require_livemode: bool,
}

impl StripeConfig {
    /// Create a new Stripe configuration.
    pub fn new(api_key: impl Into<String>, webhook_secret: impl Into<String>) -> Self {
        Self {
            api_key: SecretString::new(api_key.into()),
            webhook_secret: SecretString::new(webhook_secret.into()),
            api_base_url: "https://api.stripe.com".to_string(),
            request_timeout: Duration::from_secs(10),
            require_livemode: false,
        }
    }

    /// Create configuration from the application payment section.
    pub fn from_payment_config(config: &PaymentConfig) -> Self {
        Self {
            api_key: SecretString::new(config.stripe_api_key.clone()),
            webhook_secret: SecretString::new(config.stripe_webhook_secret.clone()),
            api_base_url: "https://api.stripe.com".to_string(),
            request_timeout: Duration::from_secs(config.provider_timeout_secs),
            require_livemode: config.is_live_mode(),
        }
    }

    /// Set a custom API base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into();
        self
    }

    /// Require livemode events in production.
    pub fn with_require_livemode(mut self, require: bool) -> Self {
        self.require_livemode = require;
        self
    }
}

/// Stripe payment provider adapter.
pub struct StripePaymentAdapter {
    config: StripeConfig,
    http_client: reqwest::Client,
}

impl StripePaymentAdapter {
    /// Create a new Stripe adapter with the given configuration.
    pub fn new(config: StripeConfig) -> Self {
        let http_client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()
            .unwrap_or_default();
        Self {
            config,
            http_client,
        }
    }

    /// Verify webhook signature using HMAC-SHA256.
    ///
    /// # Security
    ///
    /// - Uses constant-time comparison to prevent timing attacks
    /// - Validates timestamp to prevent replay attacks
    fn verify_signature(
        &self,
        payload: &[u8],
        header: &SignatureHeader,
    ) -> Result<(), PaymentError> {
        // 1. Validate timestamp (prevent replay attacks)
        let now = chrono::Utc::now().timestamp();
        let age = now - header.timestamp;

        if age > MAX_TIMESTAMP_AGE_SECS {
            tracing::warn!(
                event_timestamp = header.timestamp,
                current_time = now,
                age_secs = age,
                "Webhook event too old - possible replay attack"
            );
            return Err(PaymentError::invalid_webhook(format!(
                "Event too old ({} seconds)",
                age
            )));
        }

        if age < -MAX_FUTURE_TOLERANCE_SECS {
            tracing::warn!(
                event_timestamp = header.timestamp,
                current_time = now,
                "Webhook event from future - clock skew or manipulation"
            );
            return Err(PaymentError::invalid_webhook("Event timestamp in future"));
        }

        // 2. Compute expected signature over "timestamp.payload"
        let signed_payload = format!("{}.{}", header.timestamp, String::from_utf8_lossy(payload));

        let mut mac =
            HmacSha256::new_from_slice(self.config.webhook_secret.expose_secret().as_bytes())
                .map_err(|_| {
                    PaymentError::new(PaymentErrorCode::ProviderError, "Invalid webhook secret")
                })?;
        mac.update(signed_payload.as_bytes());
        let expected = mac.finalize().into_bytes();

        // 3. Constant-time comparison
        let expected_bytes: &[u8] = expected.as_slice();
        let provided_bytes: &[u8] = &header.v1_signature;

        if expected_bytes.ct_eq(provided_bytes).unwrap_u8() != 1 {
            tracing::warn!(
                expected_signature = hex_encode(expected_bytes),
                "Invalid webhook signature"
            );
            return Err(PaymentError::invalid_webhook("Invalid signature"));
        }

        Ok(())
    }

    /// Parse a Stripe event and convert it to the domain event shape.
    fn parse_event(&self, payload: &[u8]) -> Result<WebhookEvent, PaymentError> {
        let stripe_event: StripeWebhookEvent = serde_json::from_slice(payload).map_err(|e| {
            tracing::warn!(error = %e, "Failed to parse webhook payload");
            PaymentError::invalid_webhook(format!("Invalid JSON: {}", e))
        })?;

        // Check livemode if required
        if self.config.require_livemode && !stripe_event.livemode {
            tracing::warn!(
                event_id = %stripe_event.id,
                "Rejected test mode event in production"
            );
            return Err(PaymentError::invalid_webhook(
                "Test mode events not allowed in production",
            ));
        }

        let event_type = match stripe_event.event_type.as_str() {
            "checkout.session.completed" => WebhookEventType::CheckoutSessionCompleted,
            other => WebhookEventType::Unknown(other.to_string()),
        };

        let data = match event_type {
            WebhookEventType::CheckoutSessionCompleted => {
                let session: StripeCheckoutSession =
                    serde_json::from_value(stripe_event.data.object.clone()).map_err(|e| {
                        PaymentError::invalid_webhook(format!("Invalid checkout session: {}", e))
                    })?;
                WebhookEventData::Checkout {
                    checkout_session_id: session.id,
                    payment_intent_id: session.payment_intent,
                    metadata_type: session.metadata.get("type").cloned(),
                    session_id: session.metadata.get("session_id").cloned(),
                }
            }
            WebhookEventType::Unknown(_) => WebhookEventData::Raw {
                json: serde_json::to_string(&stripe_event.data.object).unwrap_or_default(),
            },
        };

        Ok(WebhookEvent {
            id: stripe_event.id,
            event_type,
            data,
            created_at: stripe_event.created,
        })
    }
}

#[async_trait]
impl PaymentProvider for StripePaymentAdapter {
    async fn create_checkout_session(
        &self,
        request: CreateCheckoutRequest,
    ) -> Result<CheckoutSession, PaymentError> {
        let url = format!("{}/v1/checkout/sessions", self.config.api_base_url);

        // One-off payment with inline price data; metadata routes the
        // completed-checkout webhook back to the session.
        let params = vec![
            ("mode", "payment".to_string()),
            ("line_items[0][quantity]", "1".to_string()),
            ("line_items[0][price_data][currency]", request.currency),
            (
                "line_items[0][price_data][unit_amount]",
                request.amount.cents().to_string(),
            ),
            (
                "line_items[0][price_data][product_data][name]",
                request.title,
            ),
            ("success_url", request.success_url),
            ("cancel_url", request.cancel_url),
            ("metadata[type]", "mentor_session".to_string()),
            ("metadata[session_id]", request.session_id.to_string()),
            ("metadata[student_id]", request.student_id.to_string()),
        ];

        let response = self
            .http_client
            .post(&url)
            .basic_auth(self.config.api_key.expose_secret(), Option::<&str>::None)
            .form(&params)
            .send()
            .await
            .map_err(|e| PaymentError::network(e.to_string()))?;

        if !response.status().is_success() {
            let error_text = response.text().await.unwrap_or_default();
            tracing::error!(error = %error_text, "Stripe create_checkout_session failed");
            return Err(PaymentError::new(
                PaymentErrorCode::ProviderError,
                format!("Stripe API error: {}", error_text),
            ));
        }

        let stripe_session: StripeCheckoutSession = response.json().await.map_err(|e| {
            PaymentError::new(
                PaymentErrorCode::ProviderError,
                format!("Failed to parse Stripe response: {}", e),
            )
        })?;

        // Stripe checkout sessions expire after 24 hours by default
        let expires_at = stripe_session
            .expires_at
            .unwrap_or_else(|| chrono::Utc::now().timestamp() + 24 * 60 * 60);
        let url = stripe_session.url.unwrap_or_else(|| {
            format!("https://checkout.stripe.com/c/pay/{}", &stripe_session.id)
        });

        Ok(CheckoutSession {
            id: stripe_session.id,
            url,
            expires_at,
        })
    }

    async fn get_checkout_session(
        &self,
        checkout_session_id: &str,
    ) -> Result<Option<ProviderCheckout>, PaymentError> {
        let url = format!(
            "{}/v1/checkout/sessions/{}",
            self.config.api_base_url, checkout_session_id
        );

        let response = self
            .http_client
            .get(&url)
            .basic_auth(self.config.api_key.expose_secret(), Option::<&str>::None)
            .send()
            .await
            .map_err(|e| PaymentError::network(e.to_string()))?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }

        if !response.status().is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(PaymentError::new(
                PaymentErrorCode::ProviderError,
                format!("Stripe API error: {}", error_text),
            ));
        }

        let stripe_session: StripeCheckoutSession = response.json().await.map_err(|e| {
            PaymentError::new(
                PaymentErrorCode::ProviderError,
                format!("Failed to parse Stripe response: {}", e),
            )
        })?;

        Ok(Some(ProviderCheckout {
            id: stripe_session.id,
            payment_status: CheckoutPaymentStatus::parse(&stripe_session.payment_status),
            payment_intent_id: stripe_session.payment_intent,
        }))
    }

    async fn verify_webhook(
        &self,
        payload: &[u8],
        signature: &str,
    ) -> Result<WebhookEvent, PaymentError> {
        // 1. Parse signature header
        let header = SignatureHeader::parse(signature).map_err(|e| {
            tracing::warn!(error = %e, "Failed to parse Stripe-Signature header");
            PaymentError::invalid_webhook(e.to_string())
        })?;

        // 2. Verify signature (includes timestamp validation)
        self.verify_signature(payload, &header)?;

        // 3. Parse and convert event
        let webhook_event = self.parse_event(payload)?;

        tracing::info!(
            event_id = %webhook_event.id,
            event_type = ?webhook_event.event_type,
            "Webhook signature verified"
        );

        Ok(webhook_event)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WEBHOOK_SECRET: &str = "whsec_test_secret";

    fn adapter() -> StripePaymentAdapter {
        StripePaymentAdapter::new(StripeConfig::new("sk_test_123", WEBHOOK_SECRET))
    }

    fn sign(payload: &[u8], timestamp: i64, secret: &str) -> String {
        let signed_payload = format!("{}.{}", timestamp, String::from_utf8_lossy(payload));
        let mut mac = HmacSha256::new_from_slice(secret.as_bytes()).unwrap();
        mac.update(signed_payload.as_bytes());
        format!("t={},v1={}", timestamp, hex_encode(&mac.finalize().into_bytes()))
    }

    fn completed_payload(session_id: &str) -> Vec<u8> {
        format!(
            r#"{{
                "id": "evt_1",
                "type": "checkout.session.completed",
                "created": 1704067200,
                "data": {{
                    "object": {{
                        "id": "cs_test_1",
                        "object": "checkout.session",
                        "payment_status": "paid",
                        "status": "complete",
                        "payment_intent": "pi_test_1",
                        "mode": "payment",
                        "metadata": {{
                            "type": "mentor_session",
                            "session_id": "{}"
                        }}
                    }}
                }},
                "livemode": false,
                "pending_webhooks": 0
            }}"#,
            session_id
        )
        .into_bytes()
    }

    #[tokio::test]
    async fn verify_webhook_accepts_valid_signature() {
        let adapter = adapter();
        let payload = completed_payload("sess-1");
        let signature = sign(&payload, chrono::Utc::now().timestamp(), WEBHOOK_SECRET);

        let event = adapter.verify_webhook(&payload, &signature).await.unwrap();
        assert_eq!(event.event_type, WebhookEventType::CheckoutSessionCompleted);
        match event.data {
            WebhookEventData::Checkout {
                checkout_session_id,
                payment_intent_id,
                metadata_type,
                session_id,
            } => {
                assert_eq!(checkout_session_id, "cs_test_1");
                assert_eq!(payment_intent_id.as_deref(), Some("pi_test_1"));
                assert_eq!(metadata_type.as_deref(), Some("mentor_session"));
                assert_eq!(session_id.as_deref(), Some("sess-1"));
            }
            other => panic!("unexpected event data: {:?}", other),
        }
    }

    #[tokio::test]
    async fn verify_webhook_rejects_wrong_secret() {
        let adapter = adapter();
        let payload = completed_payload("sess-1");
        let signature = sign(&payload, chrono::Utc::now().timestamp(), "whsec_wrong");

        let err = adapter.verify_webhook(&payload, &signature).await.unwrap_err();
        assert_eq!(err.code, PaymentErrorCode::InvalidWebhook);
    }

    #[tokio::test]
    async fn verify_webhook_rejects_tampered_payload() {
        let adapter = adapter();
        let payload = completed_payload("sess-1");
        let signature = sign(&payload, chrono::Utc::now().timestamp(), WEBHOOK_SECRET);

        let tampered = completed_payload("sess-2");
        let err = adapter.verify_webhook(&tampered, &signature).await.unwrap_err();
        assert_eq!(err.code, PaymentErrorCode::InvalidWebhook);
    }

    #[tokio::test]
    async fn verify_webhook_rejects_replayed_event() {
        let adapter = adapter();
        let payload = completed_payload("sess-1");
        let stale = chrono::Utc::now().timestamp() - MAX_TIMESTAMP_AGE_SECS - 10;
        let signature = sign(&payload, stale, WEBHOOK_SECRET);

        let err = adapter.verify_webhook(&payload, &signature).await.unwrap_err();
        assert_eq!(err.code, PaymentErrorCode::InvalidWebhook);
    }

    #[tokio::test]
    async fn verify_webhook_rejects_future_timestamp() {
        let adapter = adapter();
        let payload = completed_payload("sess-1");
        let future = chrono::Utc::now().timestamp() + MAX_FUTURE_TOLERANCE_SECS + 10;
        let signature = sign(&payload, future, WEBHOOK_SECRET);

        let err = adapter.verify_webhook(&payload, &signature).await.unwrap_err();
        assert_eq!(err.code, PaymentErrorCode::InvalidWebhook);
    }

    #[tokio::test]
    async fn verify_webhook_rejects_malformed_header() {
        let adapter = adapter();
        let payload = completed_payload("sess-1");

        let err = adapter.verify_webhook(&payload, "garbage").await.unwrap_err();
        assert_eq!(err.code, PaymentErrorCode::InvalidWebhook);
    }

    #[tokio::test]
    async fn unknown_event_types_pass_through_as_raw() {
        let adapter = adapter();
        let payload = br#"{
            "id": "evt_2",
            "type": "invoice.paid",
            "created": 1704067200,
            "data": { "object": { "id": "in_1" } },
            "livemode": false,
            "pending_webhooks": 0
        }"#
        .to_vec();
        let signature = sign(&payload, chrono::Utc::now().timestamp(), WEBHOOK_SECRET);

        let event = adapter.verify_webhook(&payload, &signature).await.unwrap();
        assert_eq!(
            event.event_type,
            WebhookEventType::Unknown("invoice.paid".to_string())
        );
        assert!(matches!(event.data, WebhookEventData::Raw { .. }));
    }
}
