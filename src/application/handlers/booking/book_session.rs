//! BookSessionHandler - Command handler for booking a mentoring session.

use std::sync::Arc;

use crate::domain::foundation::{SessionId, Timestamp, UserId, ValidationError};
use crate::domain::mentoring::{MentorSession, MentoringError};
use crate::ports::{MentorProfileRepository, SessionRepository};

use super::super::scheduling::SlotConflictResolver;

/// Command to book a session with a mentor.
#[derive(Debug, Clone)]
pub struct BookSessionCommand {
    pub student_id: UserId,
    pub mentor_id: UserId,
    pub title: String,
    pub description: Option<String>,
    pub scheduled_at: Timestamp,
    pub duration_minutes: u32,
}

/// Result of a successful booking.
#[derive(Debug, Clone)]
pub struct BookSessionResult {
    pub session: MentorSession,
}

/// Handler for booking sessions.
///
/// The price is fixed here from the mentor's current hourly rate,
/// prorated to the requested duration. Later rate changes never touch
/// it. The slot check runs before insert, and the repository re-checks
/// overlap inside its own transaction so racing bookings cannot both
/// commit.
pub struct BookSessionHandler {
    profile_repository: Arc<dyn MentorProfileRepository>,
    session_repository: Arc<dyn SessionRepository>,
    resolver: Arc<SlotConflictResolver>,
}

impl BookSessionHandler {
    pub fn new(
        profile_repository: Arc<dyn MentorProfileRepository>,
        session_repository: Arc<dyn SessionRepository>,
        resolver: Arc<SlotConflictResolver>,
    ) -> Self {
        Self {
            profile_repository,
            session_repository,
            resolver,
        }
    }

    pub async fn handle(
        &self,
        cmd: BookSessionCommand,
    ) -> Result<BookSessionResult, MentoringError> {
        // 1. Mentor must have a profile and be accepting sessions
        let profile = self
            .profile_repository
            .find_by_user_id(&cmd.mentor_id)
            .await?
            .ok_or_else(|| MentoringError::mentor_unavailable(cmd.mentor_id.clone()))?;
        if !profile.is_accepting_sessions {
            return Err(MentoringError::mentor_unavailable(cmd.mentor_id));
        }

        // 2. Duration must sit inside the mentor's bounds
        if !profile.allows_duration(cmd.duration_minutes) {
            return Err(ValidationError::invalid_format(
                "duration_minutes",
                format!(
                    "duration must be between {} and {} minutes",
                    profile.min_session_duration, profile.max_session_duration
                ),
            )
            .into());
        }

        // 3. Slot must be inside availability and free of conflicts
        let available = self
            .resolver
            .is_slot_available(&cmd.mentor_id, &cmd.scheduled_at, cmd.duration_minutes)
            .await?;
        if !available {
            return Err(MentoringError::slot_conflict(cmd.mentor_id.as_str()));
        }

        // 4. Fix the price and build the pending session
        let price = profile.session_price(cmd.duration_minutes);
        let session = MentorSession::book(
            SessionId::new(),
            cmd.mentor_id,
            cmd.student_id,
            cmd.title,
            cmd.description,
            cmd.scheduled_at,
            cmd.duration_minutes,
            price,
        )?;

        // 5. Insert, with the transactional conflict re-check
        self.session_repository.insert_booking(&session).await?;

        Ok(BookSessionResult { session })
    }
}
