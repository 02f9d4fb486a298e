//! SlotConflictResolver - Availability and conflict checks for booking.

use std::sync::Arc;

use crate::domain::foundation::{Timestamp, UserId};
use crate::domain::mentoring::{intervals_overlap, MentoringError};
use crate::ports::{AvailabilityRepository, SessionRepository};

/// Resolves whether a requested slot can be booked against a mentor's
/// availability windows and existing sessions.
///
/// A slot is available when at least one active window for the slot's
/// weekday fully contains it on wall-clock time, and it overlaps no
/// Pending/Confirmed session of the mentor. Intervals are half-open, so
/// back-to-back sessions never conflict.
pub struct SlotConflictResolver {
    availability_repository: Arc<dyn AvailabilityRepository>,
    session_repository: Arc<dyn SessionRepository>,
}

impl SlotConflictResolver {
    pub fn new(
        availability_repository: Arc<dyn AvailabilityRepository>,
        session_repository: Arc<dyn SessionRepository>,
    ) -> Self {
        Self {
            availability_repository,
            session_repository,
        }
    }

    pub async fn is_slot_available(
        &self,
        mentor_id: &UserId,
        start: &Timestamp,
        duration_minutes: u32,
    ) -> Result<bool, MentoringError> {
        // 1. At least one active window must contain the slot
        let windows = self
            .availability_repository
            .find_active_by_mentor(mentor_id)
            .await?;
        if !windows
            .iter()
            .any(|w| w.covers(start.as_datetime(), duration_minutes))
        {
            return Ok(false);
        }

        // 2. No overlap with any occupying session of the mentor
        let end = start.plus_minutes(duration_minutes as i64);
        let occupying = self
            .session_repository
            .find_occupying_by_mentor(mentor_id)
            .await?;
        let conflict = occupying
            .iter()
            .any(|s| intervals_overlap(start, &end, &s.scheduled_at, &s.ends_at()));

        Ok(!conflict)
    }
}
