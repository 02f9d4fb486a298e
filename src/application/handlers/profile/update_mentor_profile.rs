//! UpdateMentorProfileHandler - Command handler for editing a profile.

use std::sync::Arc;

use crate::domain::foundation::{Actor, Money, Timestamp, ValidationError};
use crate::domain::mentoring::{MentorProfile, MentoringError};
use crate::ports::MentorProfileRepository;

/// Command to edit the acting mentor's profile. Absent fields keep
/// their current values.
#[derive(Debug, Clone, Default)]
pub struct UpdateMentorProfileCommand {
    pub bio: Option<String>,
    pub expertise_areas: Option<Vec<String>>,
    pub hourly_rate: Option<Money>,
    pub years_experience: Option<u32>,
    pub min_session_duration: Option<u32>,
    pub max_session_duration: Option<u32>,
    pub is_accepting_sessions: Option<bool>,
}

/// Result of a profile update.
#[derive(Debug, Clone)]
pub struct UpdateMentorProfileResult {
    pub profile: MentorProfile,
}

/// Handler for editing mentor profiles.
///
/// Rate changes apply only to future bookings; prices already fixed on
/// booked sessions never move. Toggling `is_accepting_sessions` off
/// stops new bookings without touching existing sessions.
pub struct UpdateMentorProfileHandler {
    profile_repository: Arc<dyn MentorProfileRepository>,
}

impl UpdateMentorProfileHandler {
    pub fn new(profile_repository: Arc<dyn MentorProfileRepository>) -> Self {
        Self { profile_repository }
    }

    pub async fn handle(
        &self,
        actor: Actor,
        cmd: UpdateMentorProfileCommand,
    ) -> Result<UpdateMentorProfileResult, MentoringError> {
        // 1. Load the actor's profile
        let mut profile = self
            .profile_repository
            .find_by_user_id(&actor.user_id)
            .await?
            .ok_or(MentoringError::profile_not_found(actor.user_id))?;

        // 2. Apply changes and re-validate the editable invariants
        if let Some(bio) = cmd.bio {
            profile.bio = Some(bio);
        }
        if let Some(areas) = cmd.expertise_areas {
            profile.expertise_areas = areas;
        }
        if let Some(rate) = cmd.hourly_rate {
            if rate.cents() <= 0 {
                return Err(ValidationError::invalid_format(
                    "hourly_rate",
                    "hourly rate must be positive",
                )
                .into());
            }
            profile.hourly_rate = rate;
        }
        if let Some(years) = cmd.years_experience {
            profile.years_experience = years;
        }
        if let Some(min) = cmd.min_session_duration {
            profile.min_session_duration = min;
        }
        if let Some(max) = cmd.max_session_duration {
            profile.max_session_duration = max;
        }
        if profile.min_session_duration == 0
            || profile.min_session_duration > profile.max_session_duration
        {
            return Err(ValidationError::invalid_format(
                "min_session_duration",
                format!(
                    "duration bounds {}..{} are invalid",
                    profile.min_session_duration, profile.max_session_duration
                ),
            )
            .into());
        }
        if let Some(accepting) = cmd.is_accepting_sessions {
            profile.is_accepting_sessions = accepting;
        }
        profile.updated_at = Timestamp::now();

        // 3. Persist
        self.profile_repository.update(&profile).await?;

        Ok(UpdateMentorProfileResult { profile })
    }
}
