//! CreateMentorProfileHandler - Command handler for creating a profile.

use std::sync::Arc;

use crate::domain::foundation::{Actor, Money};
use crate::domain::mentoring::{MentorProfile, MentoringError};
use crate::ports::MentorProfileRepository;

/// Command to create a mentor profile for the acting user.
#[derive(Debug, Clone)]
pub struct CreateMentorProfileCommand {
    pub actor: Actor,
    pub bio: Option<String>,
    pub expertise_areas: Vec<String>,
    pub hourly_rate: Money,
    pub years_experience: u32,
    pub min_session_duration: u32,
    pub max_session_duration: u32,
}

/// Result of profile creation.
#[derive(Debug, Clone)]
pub struct CreateMentorProfileResult {
    pub profile: MentorProfile,
}

/// Handler for creating mentor profiles. One profile per user.
pub struct CreateMentorProfileHandler {
    profile_repository: Arc<dyn MentorProfileRepository>,
}

impl CreateMentorProfileHandler {
    pub fn new(profile_repository: Arc<dyn MentorProfileRepository>) -> Self {
        Self { profile_repository }
    }

    pub async fn handle(
        &self,
        cmd: CreateMentorProfileCommand,
    ) -> Result<CreateMentorProfileResult, MentoringError> {
        // 1. Reject a second profile for the same user
        if self
            .profile_repository
            .find_by_user_id(&cmd.actor.user_id)
            .await?
            .is_some()
        {
            return Err(MentoringError::profile_already_exists(cmd.actor.user_id));
        }

        // 2. Validate and build
        let profile = MentorProfile::new(
            cmd.actor.user_id,
            cmd.bio,
            cmd.expertise_areas,
            cmd.hourly_rate,
            cmd.years_experience,
            cmd.min_session_duration,
            cmd.max_session_duration,
        )?;

        // 3. Persist
        self.profile_repository.save(&profile).await?;

        Ok(CreateMentorProfileResult { profile })
    }
}
