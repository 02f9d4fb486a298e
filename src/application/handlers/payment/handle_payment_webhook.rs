//! HandlePaymentWebhookHandler - Command handler for provider webhooks.

use std::str::FromStr;
use std::sync::Arc;

use crate::domain::foundation::SessionId;
use crate::domain::mentoring::MentoringError;
use crate::ports::{
    ConfirmOutcome, PaymentErrorCode, PaymentProvider, SessionRepository, WebhookEventData,
    WebhookEventType,
};

/// Metadata marker distinguishing mentoring checkouts from other
/// product lines sharing the same webhook endpoint.
const MENTOR_SESSION_METADATA_TYPE: &str = "mentor_session";

/// Command carrying the raw webhook request.
#[derive(Debug, Clone)]
pub struct HandlePaymentWebhookCommand {
    pub payload: Vec<u8>,
    pub signature: String,
}

/// What the webhook call did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandlePaymentWebhookResult {
    /// A session moved Pending to Confirmed.
    SessionConfirmed,

    /// A duplicate delivery; the session was already confirmed.
    AlreadyConfirmed,

    /// Recognized event, but nothing to do (unknown or malformed
    /// session reference). Acknowledged so the provider stops retrying.
    Acknowledged,

    /// Event type or metadata not for this subsystem.
    Ignored,
}

/// Handler for payment provider webhooks.
///
/// The signature is verified before the payload is trusted. Only
/// `checkout.session.completed` events carrying the mentoring metadata
/// marker are routed to confirmation; everything else is acknowledged
/// with a 2xx so the provider does not retry.
pub struct HandlePaymentWebhookHandler {
    session_repository: Arc<dyn SessionRepository>,
    payment_provider: Arc<dyn PaymentProvider>,
}

impl HandlePaymentWebhookHandler {
    pub fn new(
        session_repository: Arc<dyn SessionRepository>,
        payment_provider: Arc<dyn PaymentProvider>,
    ) -> Self {
        Self {
            session_repository,
            payment_provider,
        }
    }

    pub async fn handle(
        &self,
        cmd: HandlePaymentWebhookCommand,
    ) -> Result<HandlePaymentWebhookResult, MentoringError> {
        // 1. Verify the signature before trusting anything in the body
        let event = self
            .payment_provider
            .verify_webhook(&cmd.payload, &cmd.signature)
            .await
            .map_err(|e| match e.code {
                PaymentErrorCode::InvalidWebhook => MentoringError::invalid_webhook_signature(),
                _ => MentoringError::payment_provider(e.message),
            })?;

        // 2. Route only completed mentoring checkouts
        if event.event_type != WebhookEventType::CheckoutSessionCompleted {
            return Ok(HandlePaymentWebhookResult::Ignored);
        }
        let (payment_intent_id, metadata_type, session_id) = match event.data {
            WebhookEventData::Checkout {
                payment_intent_id,
                metadata_type,
                session_id,
                ..
            } => (payment_intent_id, metadata_type, session_id),
            WebhookEventData::Raw { .. } => return Ok(HandlePaymentWebhookResult::Ignored),
        };
        if metadata_type.as_deref() != Some(MENTOR_SESSION_METADATA_TYPE) {
            return Ok(HandlePaymentWebhookResult::Ignored);
        }

        // 3. A recognized event with an unusable session reference is
        //    acknowledged, not retried
        let session_id = match session_id.as_deref().map(SessionId::from_str) {
            Some(Ok(id)) => id,
            _ => return Ok(HandlePaymentWebhookResult::Acknowledged),
        };

        // 4. Confirm; duplicates land on AlreadyConfirmed
        let outcome = self
            .session_repository
            .confirm_payment(&session_id, &payment_intent_id.unwrap_or_default())
            .await?;

        Ok(match outcome {
            ConfirmOutcome::Confirmed => HandlePaymentWebhookResult::SessionConfirmed,
            ConfirmOutcome::AlreadyConfirmed => HandlePaymentWebhookResult::AlreadyConfirmed,
            ConfirmOutcome::NotFound => HandlePaymentWebhookResult::Acknowledged,
        })
    }
}
