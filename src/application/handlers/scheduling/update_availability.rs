//! UpdateAvailabilityHandler - Command handler for editing a window.

use std::sync::Arc;

use crate::domain::foundation::{Actor, AvailabilityId, ValidationError};
use crate::domain::mentoring::{AvailabilityWindow, MentoringError, TimeOfDay};
use crate::ports::AvailabilityRepository;

/// Command to edit an availability window. Absent fields keep their
/// current values.
#[derive(Debug, Clone)]
pub struct UpdateAvailabilityCommand {
    pub actor: Actor,
    pub availability_id: AvailabilityId,
    pub day_of_week: Option<u8>,
    pub start_time: Option<TimeOfDay>,
    pub end_time: Option<TimeOfDay>,
    pub is_active: Option<bool>,
}

/// Result of a window update.
#[derive(Debug, Clone)]
pub struct UpdateAvailabilityResult {
    pub window: AvailabilityWindow,
}

/// Handler for editing availability windows. Only the owning mentor or
/// an admin may edit a window.
pub struct UpdateAvailabilityHandler {
    availability_repository: Arc<dyn AvailabilityRepository>,
}

impl UpdateAvailabilityHandler {
    pub fn new(availability_repository: Arc<dyn AvailabilityRepository>) -> Self {
        Self {
            availability_repository,
        }
    }

    pub async fn handle(
        &self,
        cmd: UpdateAvailabilityCommand,
    ) -> Result<UpdateAvailabilityResult, MentoringError> {
        // 1. Load and authorize
        let existing = self
            .availability_repository
            .find_by_id(&cmd.availability_id)
            .await?
            .ok_or(MentoringError::availability_not_found(cmd.availability_id))?;

        if !cmd.actor.is_user(&existing.mentor_id) && !cmd.actor.is_admin() {
            return Err(MentoringError::not_authorized());
        }

        // 2. Apply changes and re-validate the day/time range
        let day_of_week = cmd.day_of_week.unwrap_or(existing.day_of_week);
        let start_time = cmd.start_time.unwrap_or(existing.start_time);
        let end_time = cmd.end_time.unwrap_or(existing.end_time);
        if day_of_week > 6 {
            return Err(ValidationError::out_of_range("day_of_week", 0, 6, day_of_week as i32).into());
        }
        if start_time >= end_time {
            return Err(ValidationError::invalid_format(
                "start_time",
                format!("start {} must be before end {}", start_time, end_time),
            )
            .into());
        }

        let window = AvailabilityWindow {
            day_of_week,
            start_time,
            end_time,
            is_active: cmd.is_active.unwrap_or(existing.is_active),
            ..existing
        };

        // 3. Persist
        self.availability_repository.update(&window).await?;

        Ok(UpdateAvailabilityResult { window })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryAvailabilityRepository;
    use crate::domain::foundation::{UserId, UserRole};

    async fn seeded_repo() -> (Arc<InMemoryAvailabilityRepository>, AvailabilityWindow) {
        let repo = Arc::new(InMemoryAvailabilityRepository::new());
        let window = AvailabilityWindow::new(
            AvailabilityId::new(),
            UserId::new("mentor-1").unwrap(),
            0,
            TimeOfDay::parse("09:00").unwrap(),
            TimeOfDay::parse("17:00").unwrap(),
        )
        .unwrap();
        repo.save(&window).await.unwrap();
        (repo, window)
    }

    fn mentor_actor() -> Actor {
        Actor::new(UserId::new("mentor-1").unwrap(), UserRole::Mentor)
    }

    #[tokio::test]
    async fn owner_can_deactivate_window() {
        let (repo, window) = seeded_repo().await;
        let handler = UpdateAvailabilityHandler::new(repo.clone());

        let result = handler
            .handle(UpdateAvailabilityCommand {
                actor: mentor_actor(),
                availability_id: window.id,
                day_of_week: None,
                start_time: None,
                end_time: None,
                is_active: Some(false),
            })
            .await
            .unwrap();

        assert!(!result.window.is_active);
        assert!(repo
            .find_active_by_mentor(&UserId::new("mentor-1").unwrap())
            .await
            .unwrap()
            .is_empty());
    }

    #[tokio::test]
    async fn non_owner_is_rejected() {
        let (repo, window) = seeded_repo().await;
        let handler = UpdateAvailabilityHandler::new(repo);

        let result = handler
            .handle(UpdateAvailabilityCommand {
                actor: Actor::new(UserId::new("mentor-2").unwrap(), UserRole::Mentor),
                availability_id: window.id,
                day_of_week: None,
                start_time: None,
                end_time: None,
                is_active: Some(false),
            })
            .await;

        assert!(matches!(result, Err(MentoringError::NotAuthorized)));
    }

    #[tokio::test]
    async fn partial_update_cannot_invert_range() {
        let (repo, window) = seeded_repo().await;
        let handler = UpdateAvailabilityHandler::new(repo);

        let result = handler
            .handle(UpdateAvailabilityCommand {
                actor: mentor_actor(),
                availability_id: window.id,
                day_of_week: None,
                start_time: Some(TimeOfDay::parse("18:00").unwrap()),
                end_time: None,
                is_active: None,
            })
            .await;

        assert!(matches!(
            result,
            Err(MentoringError::ValidationFailed { .. })
        ));
    }

    #[tokio::test]
    async fn unknown_window_is_not_found() {
        let (repo, _) = seeded_repo().await;
        let handler = UpdateAvailabilityHandler::new(repo);

        let result = handler
            .handle(UpdateAvailabilityCommand {
                actor: mentor_actor(),
                availability_id: AvailabilityId::new(),
                day_of_week: None,
                start_time: None,
                end_time: None,
                is_active: Some(false),
            })
            .await;

        assert!(matches!(result, Err(MentoringError::AvailabilityNotFound(_))));
    }
}
