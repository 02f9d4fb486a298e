//! Payment provider port for external payment processing.
//!
//! Defines the contract for payment gateway integrations (e.g., Stripe).
//! The mentoring flow uses one-off checkout sessions: a checkout is
//! created per booked session, and confirmation arrives either by
//! webhook push or by polling the checkout state.

use crate::domain::foundation::{DomainError, Money, SessionId, UserId};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Port for payment provider integrations.
///
/// Implementations must ensure idempotency for all operations.
#[async_trait]
pub trait PaymentProvider: Send + Sync {
    /// Create a checkout session for a booked mentoring session.
    ///
    /// Returns a URL for the student to complete payment.
    async fn create_checkout_session(
        &self,
        request: CreateCheckoutRequest,
    ) -> Result<CheckoutSession, PaymentError>;

    /// Fetch the current state of a checkout session.
    ///
    /// Returns `None` if the provider doesn't know the session.
    async fn get_checkout_session(
        &self,
        checkout_session_id: &str,
    ) -> Result<Option<ProviderCheckout>, PaymentError>;

    /// Verify a webhook signature and parse the event.
    ///
    /// Returns the parsed event if valid, error if signature invalid.
    async fn verify_webhook(
        &self,
        payload: &[u8],
        signature: &str,
    ) -> Result<WebhookEvent, PaymentError>;
}

/// Request to create a checkout session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateCheckoutRequest {
    /// Internal session being paid for (stored as metadata).
    pub session_id: SessionId,

    /// Paying student (stored as metadata).
    pub student_id: UserId,

    /// Line item label shown at checkout.
    pub title: String,

    /// Amount to charge, in cents.
    pub amount: Money,

    /// ISO currency code, lowercase (e.g. "usd").
    pub currency: String,

    /// URL to redirect after successful checkout.
    pub success_url: String,

    /// URL to redirect after cancelled checkout.
    pub cancel_url: String,
}

/// Checkout session for payment completion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckoutSession {
    /// Provider's session ID.
    pub id: String,

    /// URL for the student to complete checkout.
    pub url: String,

    /// When the session expires (Unix timestamp).
    pub expires_at: i64,
}

/// Provider's view of a checkout session when polled.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderCheckout {
    /// Provider's session ID.
    pub id: String,

    /// Whether the payment settled.
    pub payment_status: CheckoutPaymentStatus,

    /// Payment intent created for the checkout, once one exists.
    pub payment_intent_id: Option<String>,
}

/// Settlement state of a checkout as reported by the provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckoutPaymentStatus {
    Paid,
    Unpaid,
    NoPaymentRequired,
    Unknown,
}

impl CheckoutPaymentStatus {
    /// Parses the provider's string representation.
    pub fn parse(s: &str) -> Self {
        match s {
            "paid" => CheckoutPaymentStatus::Paid,
            "unpaid" => CheckoutPaymentStatus::Unpaid,
            "no_payment_required" => CheckoutPaymentStatus::NoPaymentRequired,
            _ => CheckoutPaymentStatus::Unknown,
        }
    }

    /// Only `Paid` settles the session.
    pub fn is_settled(&self) -> bool {
        matches!(self, CheckoutPaymentStatus::Paid)
    }
}

/// Webhook event from payment provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebhookEvent {
    /// Event ID from provider.
    pub id: String,

    /// Event type.
    pub event_type: WebhookEventType,

    /// Event payload.
    pub data: WebhookEventData,

    /// When the event occurred (Unix timestamp).
    pub created_at: i64,
}

/// Types of webhook events we handle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WebhookEventType {
    /// Checkout session completed successfully.
    CheckoutSessionCompleted,

    /// Unknown event type, acknowledged and ignored.
    Unknown(String),
}

/// Webhook event payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum WebhookEventData {
    /// Checkout session data.
    #[serde(rename = "checkout")]
    Checkout {
        /// Provider's checkout session ID.
        checkout_session_id: String,

        /// Payment intent behind the checkout, if present.
        payment_intent_id: Option<String>,

        /// `metadata.type` set when the checkout was created.
        metadata_type: Option<String>,

        /// `metadata.session_id`: the internal session being paid for.
        session_id: Option<String>,
    },

    /// Raw/unknown event data.
    #[serde(rename = "raw")]
    Raw { json: String },
}

/// Errors from payment provider operations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentError {
    /// Error code for categorization.
    pub code: PaymentErrorCode,

    /// Human-readable message.
    pub message: String,

    /// Provider's error code (if available).
    pub provider_code: Option<String>,

    /// Whether the operation can be retried.
    pub retryable: bool,
}

impl PaymentError {
    /// Create a new payment error.
    pub fn new(code: PaymentErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            provider_code: None,
            retryable: code.is_retryable(),
        }
    }

    /// Create with provider code.
    pub fn with_provider_code(mut self, code: impl Into<String>) -> Self {
        self.provider_code = Some(code.into());
        self
    }

    /// Create a network error.
    pub fn network(message: impl Into<String>) -> Self {
        Self::new(PaymentErrorCode::NetworkError, message)
    }

    /// Create an authentication error.
    pub fn authentication(message: impl Into<String>) -> Self {
        Self::new(PaymentErrorCode::AuthenticationError, message)
    }

    /// Create a not found error.
    pub fn not_found(resource: &str) -> Self {
        Self::new(
            PaymentErrorCode::NotFound,
            format!("{} not found", resource),
        )
    }

    /// Create an invalid webhook error.
    pub fn invalid_webhook(message: impl Into<String>) -> Self {
        Self::new(PaymentErrorCode::InvalidWebhook, message)
    }
}

impl std::fmt::Display for PaymentError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.code, self.message)
    }
}

impl std::error::Error for PaymentError {}

impl From<PaymentError> for DomainError {
    fn from(err: PaymentError) -> Self {
        use crate::domain::foundation::ErrorCode;

        let code = match err.code {
            PaymentErrorCode::InvalidWebhook => ErrorCode::InvalidWebhookSignature,
            _ => ErrorCode::PaymentProviderError,
        };

        DomainError::new(code, err.message)
    }
}

/// Payment error codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentErrorCode {
    /// Network connectivity issue or timeout.
    NetworkError,

    /// API authentication failed.
    AuthenticationError,

    /// Resource not found.
    NotFound,

    /// Rate limit exceeded.
    RateLimitExceeded,

    /// Invalid webhook signature.
    InvalidWebhook,

    /// Provider API error.
    ProviderError,

    /// Unknown error.
    Unknown,
}

impl PaymentErrorCode {
    /// Check if this error type is typically retryable.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            PaymentErrorCode::NetworkError | PaymentErrorCode::RateLimitExceeded
        )
    }
}

impl std::fmt::Display for PaymentErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            PaymentErrorCode::NetworkError => "network_error",
            PaymentErrorCode::AuthenticationError => "authentication_error",
            PaymentErrorCode::NotFound => "not_found",
            PaymentErrorCode::RateLimitExceeded => "rate_limit_exceeded",
            PaymentErrorCode::InvalidWebhook => "invalid_webhook",
            PaymentErrorCode::ProviderError => "provider_error",
            PaymentErrorCode::Unknown => "unknown",
        };
        write!(f, "{}", s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Trait object safety test
    #[test]
    fn payment_provider_is_object_safe() {
        fn _accepts_dyn(_provider: &dyn PaymentProvider) {}
    }

    #[test]
    fn checkout_payment_status_parse() {
        assert_eq!(
            CheckoutPaymentStatus::parse("paid"),
            CheckoutPaymentStatus::Paid
        );
        assert_eq!(
            CheckoutPaymentStatus::parse("unpaid"),
            CheckoutPaymentStatus::Unpaid
        );
        assert_eq!(
            CheckoutPaymentStatus::parse("whatever"),
            CheckoutPaymentStatus::Unknown
        );
    }

    #[test]
    fn only_paid_is_settled() {
        assert!(CheckoutPaymentStatus::Paid.is_settled());
        assert!(!CheckoutPaymentStatus::Unpaid.is_settled());
        assert!(!CheckoutPaymentStatus::NoPaymentRequired.is_settled());
    }

    #[test]
    fn payment_error_retryable() {
        assert!(PaymentErrorCode::NetworkError.is_retryable());
        assert!(PaymentErrorCode::RateLimitExceeded.is_retryable());
        assert!(!PaymentErrorCode::NotFound.is_retryable());
        assert!(!PaymentErrorCode::InvalidWebhook.is_retryable());
    }

    #[test]
    fn invalid_webhook_maps_to_signature_error_code() {
        use crate::domain::foundation::ErrorCode;
        let err: DomainError = PaymentError::invalid_webhook("bad signature").into();
        assert_eq!(err.code, ErrorCode::InvalidWebhookSignature);
    }
}
