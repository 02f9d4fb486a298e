//! In-memory session repository.
//!
//! Mirrors the postgres adapter's concurrency semantics with a single
//! mutex: booking re-checks overlap before inserting, and payment
//! confirmation is an atomic check-then-mutate that also credits the
//! mentor's profile.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, ErrorCode, SessionId, UserId};
use crate::domain::mentoring::{intervals_overlap, MentorSession, SessionStatus};
use crate::ports::{ConfirmOutcome, SessionRepository};

use super::InMemoryMentorProfileRepository;

/// Mutex-guarded session store.
pub struct InMemorySessionRepository {
    sessions: Mutex<Vec<MentorSession>>,
    profiles: Arc<InMemoryMentorProfileRepository>,
}

impl InMemorySessionRepository {
    /// The profile repository is shared so confirmation can credit the
    /// mentor the way the postgres transaction does.
    pub fn new(profiles: Arc<InMemoryMentorProfileRepository>) -> Self {
        Self {
            sessions: Mutex::new(Vec::new()),
            profiles,
        }
    }

    /// Snapshot of all stored sessions.
    pub(crate) fn snapshot(&self) -> Vec<MentorSession> {
        self.sessions.lock().unwrap().clone()
    }
}

#[async_trait]
impl SessionRepository for InMemorySessionRepository {
    async fn insert_booking(&self, session: &MentorSession) -> Result<(), DomainError> {
        let mut sessions = self.sessions.lock().unwrap();
        let start = &session.scheduled_at;
        let end = session.ends_at();
        let conflict = sessions.iter().any(|existing| {
            existing.mentor_id == session.mentor_id
                && existing.occupies_slot()
                && intervals_overlap(start, &end, &existing.scheduled_at, &existing.ends_at())
        });
        if conflict {
            return Err(DomainError::new(
                ErrorCode::SlotConflict,
                "Requested time slot is already booked",
            )
            .with_detail("mentor_id", session.mentor_id.to_string()));
        }
        sessions.push(session.clone());
        Ok(())
    }

    async fn update(&self, session: &MentorSession) -> Result<(), DomainError> {
        let mut sessions = self.sessions.lock().unwrap();
        match sessions.iter_mut().find(|s| s.id == session.id) {
            Some(existing) => {
                *existing = session.clone();
                Ok(())
            }
            None => Err(DomainError::new(
                ErrorCode::SessionNotFound,
                format!("Session not found: {}", session.id),
            )),
        }
    }

    async fn find_by_id(&self, id: &SessionId) -> Result<Option<MentorSession>, DomainError> {
        Ok(self
            .sessions
            .lock()
            .unwrap()
            .iter()
            .find(|s| &s.id == id)
            .cloned())
    }

    async fn find_occupying_by_mentor(
        &self,
        mentor_id: &UserId,
    ) -> Result<Vec<MentorSession>, DomainError> {
        Ok(self
            .sessions
            .lock()
            .unwrap()
            .iter()
            .filter(|s| &s.mentor_id == mentor_id && s.occupies_slot())
            .cloned()
            .collect())
    }

    async fn find_for_user(&self, user_id: &UserId) -> Result<Vec<MentorSession>, DomainError> {
        let mut found: Vec<MentorSession> = self
            .sessions
            .lock()
            .unwrap()
            .iter()
            .filter(|s| s.is_participant(user_id))
            .cloned()
            .collect();
        found.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(found)
    }

    async fn set_checkout_session(
        &self,
        id: &SessionId,
        checkout_session_id: &str,
    ) -> Result<(), DomainError> {
        let mut sessions = self.sessions.lock().unwrap();
        match sessions.iter_mut().find(|s| &s.id == id) {
            Some(session) => {
                session.attach_checkout(checkout_session_id.to_string());
                Ok(())
            }
            None => Err(DomainError::new(
                ErrorCode::SessionNotFound,
                format!("Session not found: {}", id),
            )),
        }
    }

    async fn confirm_payment(
        &self,
        id: &SessionId,
        payment_intent_id: &str,
    ) -> Result<ConfirmOutcome, DomainError> {
        let mut sessions = self.sessions.lock().unwrap();
        let session = match sessions.iter_mut().find(|s| &s.id == id) {
            Some(session) => session,
            None => return Ok(ConfirmOutcome::NotFound),
        };
        if session.status != SessionStatus::Pending {
            return Ok(ConfirmOutcome::AlreadyConfirmed);
        }
        session
            .confirm_payment(payment_intent_id.to_string())
            .map_err(DomainError::from)?;
        self.profiles.credit(&session.mentor_id, session.price);
        Ok(ConfirmOutcome::Confirmed)
    }
}
