//! CreateSessionCheckoutHandler - Command handler for starting payment.

use std::sync::Arc;

use crate::config::BookingConfig;
use crate::domain::foundation::{Actor, SessionId};
use crate::domain::mentoring::{MentoringError, PaymentStatus, SessionStatus};
use crate::ports::{CheckoutSession, CreateCheckoutRequest, PaymentProvider, SessionRepository};

/// Command to create a provider checkout for a booked session.
#[derive(Debug, Clone)]
pub struct CreateSessionCheckoutCommand {
    pub actor: Actor,
    pub session_id: SessionId,
}

/// Result of checkout creation.
#[derive(Debug, Clone)]
pub struct CreateSessionCheckoutResult {
    pub checkout: CheckoutSession,
}

/// Handler creating a provider checkout session for a pending booking.
///
/// Only the paying student may start checkout, and only while the
/// session is Pending and unpaid. The provider checkout id is recorded
/// on the session so polling verification can find it later.
pub struct CreateSessionCheckoutHandler {
    session_repository: Arc<dyn SessionRepository>,
    payment_provider: Arc<dyn PaymentProvider>,
    booking_config: BookingConfig,
}

impl CreateSessionCheckoutHandler {
    pub fn new(
        session_repository: Arc<dyn SessionRepository>,
        payment_provider: Arc<dyn PaymentProvider>,
        booking_config: BookingConfig,
    ) -> Self {
        Self {
            session_repository,
            payment_provider,
            booking_config,
        }
    }

    pub async fn handle(
        &self,
        cmd: CreateSessionCheckoutCommand,
    ) -> Result<CreateSessionCheckoutResult, MentoringError> {
        // 1. Load and authorize the paying student
        let session = self
            .session_repository
            .find_by_id(&cmd.session_id)
            .await?
            .ok_or(MentoringError::session_not_found(cmd.session_id))?;
        if !cmd.actor.is_user(&session.student_id) {
            return Err(MentoringError::not_authorized());
        }

        // 2. Only pending, unpaid sessions can start checkout
        if session.status != SessionStatus::Pending
            || session.payment_status == PaymentStatus::Paid
        {
            return Err(MentoringError::invalid_state(
                session.status.as_str(),
                "checkout",
            ));
        }

        // 3. Create the provider checkout
        let session_id_str = session.id.to_string();
        let checkout = self
            .payment_provider
            .create_checkout_session(CreateCheckoutRequest {
                session_id: session.id,
                student_id: session.student_id.clone(),
                title: session.title.clone(),
                amount: session.price,
                currency: self.booking_config.currency.clone(),
                success_url: self.booking_config.checkout_success_url(&session_id_str),
                cancel_url: self.booking_config.checkout_cancel_url(&session_id_str),
            })
            .await
            .map_err(|e| MentoringError::payment_provider(e.message))?;

        // 4. Record the checkout id for later verification
        self.session_repository
            .set_checkout_session(&session.id, &checkout.id)
            .await?;

        Ok(CreateSessionCheckoutResult { checkout })
    }
}
