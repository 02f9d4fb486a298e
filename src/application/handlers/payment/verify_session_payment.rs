//! VerifySessionPaymentHandler - Pull-side payment verification.

use std::sync::Arc;

use crate::domain::foundation::{Actor, SessionId};
use crate::domain::mentoring::{MentoringError, SessionStatus};
use crate::ports::{ConfirmOutcome, PaymentProvider, SessionRepository};

/// Query to verify a session's payment against the provider.
#[derive(Debug, Clone)]
pub struct VerifySessionPaymentQuery {
    pub actor: Actor,
    pub session_id: SessionId,
}

/// Outcome of a verification attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerifyPaymentOutcome {
    /// The session was already confirmed before this call.
    AlreadyConfirmed,

    /// This call confirmed the session.
    Confirmed,

    /// The provider reports the checkout as not yet settled.
    PaymentPending,

    /// The provider call failed or the checkout is unknown to it.
    VerificationFailed,

    /// No checkout was ever created for this session.
    NoPaymentSession,
}

impl VerifyPaymentOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            VerifyPaymentOutcome::AlreadyConfirmed => "already_confirmed",
            VerifyPaymentOutcome::Confirmed => "confirmed",
            VerifyPaymentOutcome::PaymentPending => "payment_pending",
            VerifyPaymentOutcome::VerificationFailed => "verification_failed",
            VerifyPaymentOutcome::NoPaymentSession => "no_payment_session",
        }
    }
}

/// Result of verification.
#[derive(Debug, Clone)]
pub struct VerifySessionPaymentResult {
    pub outcome: VerifyPaymentOutcome,
}

/// Handler for client-driven payment verification.
///
/// Fallback for lost webhooks: the client polls after returning from
/// checkout, and the handler asks the provider directly. The session
/// mutates only when the provider reports the checkout as paid; any
/// provider error or timeout leaves it untouched.
pub struct VerifySessionPaymentHandler {
    session_repository: Arc<dyn SessionRepository>,
    payment_provider: Arc<dyn PaymentProvider>,
}

impl VerifySessionPaymentHandler {
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
        query: VerifySessionPaymentQuery,
    ) -> Result<VerifySessionPaymentResult, MentoringError> {
        // 1. Load and authorize a participant
        let session = self
            .session_repository
            .find_by_id(&query.session_id)
            .await?
            .ok_or(MentoringError::session_not_found(query.session_id))?;
        if !session.is_participant(&query.actor.user_id) && !query.actor.is_admin() {
            return Err(MentoringError::not_authorized());
        }

        // 2. Nothing to do for an already-confirmed session
        if session.status == SessionStatus::Confirmed {
            return Ok(VerifySessionPaymentResult {
                outcome: VerifyPaymentOutcome::AlreadyConfirmed,
            });
        }

        // 3. Without a recorded checkout there is nothing to verify
        let checkout_id = match &session.checkout_session_id {
            Some(id) => id.clone(),
            None => {
                return Ok(VerifySessionPaymentResult {
                    outcome: VerifyPaymentOutcome::NoPaymentSession,
                })
            }
        };

        // 4. Ask the provider; failure or an unknown checkout never mutates
        let checkout = match self.payment_provider.get_checkout_session(&checkout_id).await {
            Ok(Some(checkout)) => checkout,
            Ok(None) => {
                return Ok(VerifySessionPaymentResult {
                    outcome: VerifyPaymentOutcome::VerificationFailed,
                })
            }
            Err(_) => {
                return Ok(VerifySessionPaymentResult {
                    outcome: VerifyPaymentOutcome::VerificationFailed,
                });
            }
        };

        if !checkout.payment_status.is_settled() {
            return Ok(VerifySessionPaymentResult {
                outcome: VerifyPaymentOutcome::PaymentPending,
            });
        }

        // 5. Settled: run the shared confirmation
        let intent_id = checkout.payment_intent_id.unwrap_or_default();
        let outcome = match self
            .session_repository
            .confirm_payment(&query.session_id, &intent_id)
            .await?
        {
            ConfirmOutcome::Confirmed => VerifyPaymentOutcome::Confirmed,
            ConfirmOutcome::AlreadyConfirmed => VerifyPaymentOutcome::AlreadyConfirmed,
            ConfirmOutcome::NotFound => {
                return Err(MentoringError::session_not_found(query.session_id))
            }
        };

        Ok(VerifySessionPaymentResult { outcome })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::{InMemoryMentorProfileRepository, InMemorySessionRepository};
    use crate::domain::foundation::{Money, Timestamp, UserId, UserRole};
    use crate::domain::mentoring::MentorSession;
    use crate::ports::{
        CheckoutPaymentStatus, CheckoutSession, CreateCheckoutRequest, PaymentError,
        ProviderCheckout, WebhookEvent,
    };
    use async_trait::async_trait;

    enum ProviderBehavior {
        Paid,
        Unpaid,
        Unknown,
        Fails,
    }

    struct MockProvider {
        behavior: ProviderBehavior,
    }

    #[async_trait]
    impl PaymentProvider for MockProvider {
        async fn create_checkout_session(
            &self,
            _request: CreateCheckoutRequest,
        ) -> Result<CheckoutSession, PaymentError> {
            Err(PaymentError::network("not implemented"))
        }

        async fn get_checkout_session(
            &self,
            checkout_session_id: &str,
        ) -> Result<Option<ProviderCheckout>, PaymentError> {
            match self.behavior {
                ProviderBehavior::Paid => Ok(Some(ProviderCheckout {
                    id: checkout_session_id.to_string(),
                    payment_status: CheckoutPaymentStatus::Paid,
                    payment_intent_id: Some("pi_verified".to_string()),
                })),
                ProviderBehavior::Unpaid => Ok(Some(ProviderCheckout {
                    id: checkout_session_id.to_string(),
                    payment_status: CheckoutPaymentStatus::Unpaid,
                    payment_intent_id: None,
                })),
                ProviderBehavior::Unknown => Ok(None),
                ProviderBehavior::Fails => Err(PaymentError::network("timed out")),
            }
        }

        async fn verify_webhook(
            &self,
            _payload: &[u8],
            _signature: &str,
        ) -> Result<WebhookEvent, PaymentError> {
            Err(PaymentError::invalid_webhook("not implemented"))
        }
    }

    struct Fixture {
        sessions: Arc<InMemorySessionRepository>,
        handler: VerifySessionPaymentHandler,
        session_id: SessionId,
    }

    async fn fixture(behavior: ProviderBehavior, with_checkout: bool) -> Fixture {
        let profiles = Arc::new(InMemoryMentorProfileRepository::new());
        let sessions = Arc::new(InMemorySessionRepository::new(profiles));
        let session = MentorSession::book(
            SessionId::new(),
            UserId::new("mentor-1").unwrap(),
            UserId::new("student-1").unwrap(),
            "Session".to_string(),
            None,
            Timestamp::from_unix_secs(1_740_000_000),
            60,
            Money::from_cents(10000).unwrap(),
        )
        .unwrap();
        let session_id = session.id;
        sessions.insert_booking(&session).await.unwrap();
        if with_checkout {
            sessions
                .set_checkout_session(&session_id, "cs_test_1")
                .await
                .unwrap();
        }

        let handler = VerifySessionPaymentHandler::new(
            Arc::clone(&sessions) as Arc<dyn SessionRepository>,
            Arc::new(MockProvider { behavior }),
        );
        Fixture {
            sessions,
            handler,
            session_id,
        }
    }

    fn student() -> Actor {
        Actor::new(UserId::new("student-1").unwrap(), UserRole::Student)
    }

    #[tokio::test]
    async fn paid_checkout_confirms_the_session() {
        let f = fixture(ProviderBehavior::Paid, true).await;
        let result = f
            .handler
            .handle(VerifySessionPaymentQuery {
                actor: student(),
                session_id: f.session_id,
            })
            .await
            .unwrap();

        assert_eq!(result.outcome, VerifyPaymentOutcome::Confirmed);
        let stored = f.sessions.find_by_id(&f.session_id).await.unwrap().unwrap();
        assert_eq!(stored.status, SessionStatus::Confirmed);
        assert_eq!(stored.payment_intent_id.as_deref(), Some("pi_verified"));
    }

    #[tokio::test]
    async fn already_confirmed_short_circuits_without_provider_call() {
        let f = fixture(ProviderBehavior::Fails, true).await;
        f.sessions
            .confirm_payment(&f.session_id, "pi_webhook")
            .await
            .unwrap();

        let result = f
            .handler
            .handle(VerifySessionPaymentQuery {
                actor: student(),
                session_id: f.session_id,
            })
            .await
            .unwrap();
        assert_eq!(result.outcome, VerifyPaymentOutcome::AlreadyConfirmed);
    }

    #[tokio::test]
    async fn unpaid_checkout_reports_pending_without_mutation() {
        let f = fixture(ProviderBehavior::Unpaid, true).await;
        let result = f
            .handler
            .handle(VerifySessionPaymentQuery {
                actor: student(),
                session_id: f.session_id,
            })
            .await
            .unwrap();

        assert_eq!(result.outcome, VerifyPaymentOutcome::PaymentPending);
        let stored = f.sessions.find_by_id(&f.session_id).await.unwrap().unwrap();
        assert_eq!(stored.status, SessionStatus::Pending);
    }

    #[tokio::test]
    async fn provider_failure_reports_verification_failed_without_mutation() {
        let f = fixture(ProviderBehavior::Fails, true).await;
        let result = f
            .handler
            .handle(VerifySessionPaymentQuery {
                actor: student(),
                session_id: f.session_id,
            })
            .await
            .unwrap();

        assert_eq!(result.outcome, VerifyPaymentOutcome::VerificationFailed);
        let stored = f.sessions.find_by_id(&f.session_id).await.unwrap().unwrap();
        assert_eq!(stored.status, SessionStatus::Pending);
    }

    #[tokio::test]
    async fn unknown_checkout_reports_verification_failed() {
        let f = fixture(ProviderBehavior::Unknown, true).await;
        let result = f
            .handler
            .handle(VerifySessionPaymentQuery {
                actor: student(),
                session_id: f.session_id,
            })
            .await
            .unwrap();
        assert_eq!(result.outcome, VerifyPaymentOutcome::VerificationFailed);
    }

    #[tokio::test]
    async fn session_without_checkout_reports_no_payment_session() {
        let f = fixture(ProviderBehavior::Paid, false).await;
        let result = f
            .handler
            .handle(VerifySessionPaymentQuery {
                actor: student(),
                session_id: f.session_id,
            })
            .await
            .unwrap();
        assert_eq!(result.outcome, VerifyPaymentOutcome::NoPaymentSession);
    }

    #[tokio::test]
    async fn non_participant_is_rejected() {
        let f = fixture(ProviderBehavior::Paid, true).await;
        let result = f
            .handler
            .handle(VerifySessionPaymentQuery {
                actor: Actor::new(UserId::new("someone-else").unwrap(), UserRole::Student),
                session_id: f.session_id,
            })
            .await;
        assert!(matches!(result, Err(MentoringError::NotAuthorized)));
    }
}
