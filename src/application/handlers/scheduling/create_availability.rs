//! CreateAvailabilityHandler - Command handler for adding a weekly window.

use std::sync::Arc;

use crate::domain::foundation::{Actor, AvailabilityId};
use crate::domain::mentoring::{AvailabilityWindow, MentoringError, TimeOfDay};
use crate::ports::AvailabilityRepository;

/// Command to add a weekly availability window for the acting mentor.
#[derive(Debug, Clone)]
pub struct CreateAvailabilityCommand {
    pub actor: Actor,
    pub day_of_week: u8,
    pub start_time: TimeOfDay,
    pub end_time: TimeOfDay,
}

/// Result of window creation.
#[derive(Debug, Clone)]
pub struct CreateAvailabilityResult {
    pub window: AvailabilityWindow,
}

/// Handler for creating availability windows.
pub struct CreateAvailabilityHandler {
    availability_repository: Arc<dyn AvailabilityRepository>,
}

impl CreateAvailabilityHandler {
    pub fn new(availability_repository: Arc<dyn AvailabilityRepository>) -> Self {
        Self {
            availability_repository,
        }
    }

    pub async fn handle(
        &self,
        cmd: CreateAvailabilityCommand,
    ) -> Result<CreateAvailabilityResult, MentoringError> {
        // 1. Validate and build the window for the acting mentor
        let window = AvailabilityWindow::new(
            AvailabilityId::new(),
            cmd.actor.user_id,
            cmd.day_of_week,
            cmd.start_time,
            cmd.end_time,
        )?;

        // 2. Persist
        self.availability_repository.save(&window).await?;

        Ok(CreateAvailabilityResult { window })
    }
}
