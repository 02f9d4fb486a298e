//! Mentoring session aggregate.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{
    Money, SessionId, StateMachine, Timestamp, UserId, ValidationError,
};

use super::{PaymentStatus, SessionStatus};

/// A booked mentoring session.
///
/// # Invariants
///
/// - `price` is fixed at booking from the mentor's rate at that moment
///   and never recomputed.
/// - The session occupies the half-open interval
///   `[scheduled_at, scheduled_at + duration)` against the mentor's
///   other Pending/Confirmed sessions.
/// - Status transitions follow the `SessionStatus` state machine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MentorSession {
    pub id: SessionId,
    pub mentor_id: UserId,
    pub student_id: UserId,
    pub title: String,
    pub description: Option<String>,

    /// Session start, UTC.
    pub scheduled_at: Timestamp,
    pub duration_minutes: u32,

    /// Price in cents, fixed at booking.
    pub price: Money,

    pub status: SessionStatus,
    pub payment_status: PaymentStatus,

    /// Provider checkout session id, set when checkout is created.
    pub checkout_session_id: Option<String>,

    /// Provider payment intent id, set on confirmation.
    pub payment_intent_id: Option<String>,

    pub meeting_link: Option<String>,
    pub mentor_notes: Option<String>,
    pub student_notes: Option<String>,

    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl MentorSession {
    /// Creates a freshly booked Pending session.
    #[allow(clippy::too_many_arguments)]
    pub fn book(
        id: SessionId,
        mentor_id: UserId,
        student_id: UserId,
        title: String,
        description: Option<String>,
        scheduled_at: Timestamp,
        duration_minutes: u32,
        price: Money,
    ) -> Result<Self, ValidationError> {
        if title.trim().is_empty() {
            return Err(ValidationError::empty_field("title"));
        }
        if duration_minutes == 0 {
            return Err(ValidationError::invalid_format(
                "duration_minutes",
                "duration must be positive",
            ));
        }
        if mentor_id == student_id {
            return Err(ValidationError::invalid_format(
                "student_id",
                "a mentor cannot book a session with themselves",
            ));
        }
        let now = Timestamp::now();
        Ok(Self {
            id,
            mentor_id,
            student_id,
            title,
            description,
            scheduled_at,
            duration_minutes,
            price,
            status: SessionStatus::Pending,
            payment_status: PaymentStatus::Pending,
            checkout_session_id: None,
            payment_intent_id: None,
            meeting_link: None,
            mentor_notes: None,
            student_notes: None,
            created_at: now,
            updated_at: now,
        })
    }

    /// Exclusive end of the occupied interval.
    pub fn ends_at(&self) -> Timestamp {
        self.scheduled_at.plus_minutes(self.duration_minutes as i64)
    }

    /// True while the session counts against the mentor's availability.
    pub fn occupies_slot(&self) -> bool {
        self.status.occupies_slot()
    }

    /// Checks whether a user is the mentor or the student of this session.
    pub fn is_participant(&self, user_id: &UserId) -> bool {
        &self.mentor_id == user_id || &self.student_id == user_id
    }

    /// Records the provider checkout session created for this booking.
    pub fn attach_checkout(&mut self, checkout_session_id: String) {
        self.checkout_session_id = Some(checkout_session_id);
        self.updated_at = Timestamp::now();
    }

    /// Confirms payment: Pending becomes Confirmed, payment is marked
    /// paid and the intent id is recorded.
    pub fn confirm_payment(&mut self, payment_intent_id: String) -> Result<(), ValidationError> {
        self.status = self.status.transition_to(SessionStatus::Confirmed)?;
        self.payment_status = PaymentStatus::Paid;
        self.payment_intent_id = Some(payment_intent_id);
        self.updated_at = Timestamp::now();
        Ok(())
    }

    /// Moves the session to a new lifecycle status, validated by the
    /// state machine. Only status and updated_at change.
    pub fn change_status(&mut self, target: SessionStatus) -> Result<(), ValidationError> {
        self.status = self.status.transition_to(target)?;
        self.updated_at = Timestamp::now();
        Ok(())
    }
}
