//! ConfirmSessionPaymentHandler - Push-side payment confirmation.

use std::sync::Arc;

use crate::domain::foundation::SessionId;
use crate::domain::mentoring::MentoringError;
use crate::ports::{ConfirmOutcome, SessionRepository};

/// Command to confirm a session's payment from a trusted signal.
#[derive(Debug, Clone)]
pub struct ConfirmSessionPaymentCommand {
    pub session_id: SessionId,
    pub payment_intent_id: String,
}

/// Result of a confirmation attempt.
#[derive(Debug, Clone)]
pub struct ConfirmSessionPaymentResult {
    /// The session is confirmed after this call.
    pub confirmed: bool,

    /// This call performed the confirmation (false for a repeat).
    pub newly_confirmed: bool,
}

/// Handler confirming payment after a trusted provider signal.
///
/// Idempotent: a repeat for an already-confirmed session reports
/// success without touching anything. `confirmed` is false only when
/// the session id is unknown.
pub struct ConfirmSessionPaymentHandler {
    session_repository: Arc<dyn SessionRepository>,
}

impl ConfirmSessionPaymentHandler {
    pub fn new(session_repository: Arc<dyn SessionRepository>) -> Self {
        Self { session_repository }
    }

    pub async fn handle(
        &self,
        cmd: ConfirmSessionPaymentCommand,
    ) -> Result<ConfirmSessionPaymentResult, MentoringError> {
        let outcome = self
            .session_repository
            .confirm_payment(&cmd.session_id, &cmd.payment_intent_id)
            .await?;

        Ok(match outcome {
            ConfirmOutcome::Confirmed => ConfirmSessionPaymentResult {
                confirmed: true,
                newly_confirmed: true,
            },
            ConfirmOutcome::AlreadyConfirmed => ConfirmSessionPaymentResult {
                confirmed: true,
                newly_confirmed: false,
            },
            ConfirmOutcome::NotFound => ConfirmSessionPaymentResult {
                confirmed: false,
                newly_confirmed: false,
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::{InMemoryMentorProfileRepository, InMemorySessionRepository};
    use crate::domain::foundation::{Money, Timestamp, UserId};
    use crate::domain::mentoring::{MentorProfile, MentorSession};
    use crate::ports::MentorProfileRepository;

    async fn fixture() -> (
        Arc<InMemoryMentorProfileRepository>,
        ConfirmSessionPaymentHandler,
        SessionId,
    ) {
        let profiles = Arc::new(InMemoryMentorProfileRepository::new());
        profiles
            .save(
                &MentorProfile::new(
                    UserId::new("mentor-1").unwrap(),
                    None,
                    vec![],
                    Money::from_cents(10000).unwrap(),
                    5,
                    30,
                    120,
                )
                .unwrap(),
            )
            .await
            .unwrap();

        let sessions = Arc::new(InMemorySessionRepository::new(Arc::clone(&profiles)));
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
        let id = session.id;
        sessions.insert_booking(&session).await.unwrap();

        let handler = ConfirmSessionPaymentHandler::new(sessions);
        (profiles, handler, id)
    }

    #[tokio::test]
    async fn first_confirmation_credits_the_mentor() {
        let (profiles, handler, id) = fixture().await;
        let result = handler
            .handle(ConfirmSessionPaymentCommand {
                session_id: id,
                payment_intent_id: "pi_1".to_string(),
            })
            .await
            .unwrap();

        assert!(result.confirmed);
        assert!(result.newly_confirmed);

        let profile = profiles
            .find_by_user_id(&UserId::new("mentor-1").unwrap())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(profile.total_sessions, 1);
        assert_eq!(profile.total_earnings.cents(), 10000);
    }

    #[tokio::test]
    async fn repeat_confirmation_is_a_successful_no_op() {
        let (profiles, handler, id) = fixture().await;
        let cmd = ConfirmSessionPaymentCommand {
            session_id: id,
            payment_intent_id: "pi_1".to_string(),
        };
        handler.handle(cmd.clone()).await.unwrap();
        let repeat = handler.handle(cmd).await.unwrap();

        assert!(repeat.confirmed);
        assert!(!repeat.newly_confirmed);

        let profile = profiles
            .find_by_user_id(&UserId::new("mentor-1").unwrap())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(profile.total_sessions, 1);
        assert_eq!(profile.total_earnings.cents(), 10000);
    }

    #[tokio::test]
    async fn unknown_session_reports_unconfirmed() {
        let (_, handler, _) = fixture().await;
        let result = handler
            .handle(ConfirmSessionPaymentCommand {
                session_id: SessionId::new(),
                payment_intent_id: "pi_1".to_string(),
            })
            .await
            .unwrap();
        assert!(!result.confirmed);
        assert!(!result.newly_confirmed);
    }
}
