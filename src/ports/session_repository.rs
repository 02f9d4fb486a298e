//! Session repository port.
//!
//! Two operations carry the concurrency-critical semantics:
//!
//! - `insert_booking` re-checks slot overlap inside one storage
//!   transaction, serialized per mentor, so two racing bookings for the
//!   same slot cannot both commit.
//! - `confirm_payment` performs the Pending-to-Confirmed move and the
//!   mentor credit atomically under a row lock, so duplicate webhook
//!   deliveries and concurrent client polls confirm exactly once.

use crate::domain::foundation::{DomainError, SessionId, UserId};
use crate::domain::mentoring::MentorSession;
use async_trait::async_trait;

/// Result of an attempt to confirm a session's payment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmOutcome {
    /// This call performed the Pending-to-Confirmed transition and
    /// credited the mentor.
    Confirmed,

    /// The session was no longer Pending; nothing changed.
    AlreadyConfirmed,

    /// No session with that ID exists.
    NotFound,
}

/// Repository port for mentoring sessions.
#[async_trait]
pub trait SessionRepository: Send + Sync {
    /// Insert a freshly booked Pending session, re-checking that its
    /// slot does not overlap any Pending/Confirmed session of the same
    /// mentor inside the same transaction.
    ///
    /// # Errors
    ///
    /// - `SlotConflict` if the slot was taken by a concurrent booking
    /// - `DatabaseError` on persistence failure
    async fn insert_booking(&self, session: &MentorSession) -> Result<(), DomainError>;

    /// Update an existing session.
    ///
    /// # Errors
    ///
    /// - `SessionNotFound` if the session doesn't exist
    /// - `DatabaseError` on persistence failure
    async fn update(&self, session: &MentorSession) -> Result<(), DomainError>;

    /// Find a session by its ID.
    ///
    /// Returns `None` if not found.
    async fn find_by_id(&self, id: &SessionId) -> Result<Option<MentorSession>, DomainError>;

    /// All Pending/Confirmed sessions of a mentor. Used for conflict
    /// detection and slot enumeration.
    async fn find_occupying_by_mentor(
        &self,
        mentor_id: &UserId,
    ) -> Result<Vec<MentorSession>, DomainError>;

    /// All sessions where the user is mentor or student, newest first.
    async fn find_for_user(&self, user_id: &UserId) -> Result<Vec<MentorSession>, DomainError>;

    /// Record the provider checkout session created for a booking.
    ///
    /// # Errors
    ///
    /// - `SessionNotFound` if the session doesn't exist
    /// - `DatabaseError` on persistence failure
    async fn set_checkout_session(
        &self,
        id: &SessionId,
        checkout_session_id: &str,
    ) -> Result<(), DomainError>;

    /// Attempt to confirm payment for a session.
    ///
    /// On `Confirmed` the implementation has, in one transaction:
    /// moved the session Pending to Confirmed, marked the payment paid,
    /// stored `payment_intent_id`, and credited the mentor's
    /// `total_sessions` and `total_earnings` by the session price.
    async fn confirm_payment(
        &self,
        id: &SessionId,
        payment_intent_id: &str,
    ) -> Result<ConfirmOutcome, DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    // Trait object safety test
    #[test]
    fn session_repository_is_object_safe() {
        fn _accepts_dyn(_repo: &dyn SessionRepository) {}
    }
}
