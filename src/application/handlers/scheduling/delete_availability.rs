//! DeleteAvailabilityHandler - Command handler for removing a window.

use std::sync::Arc;

use crate::domain::foundation::{Actor, AvailabilityId};
use crate::domain::mentoring::MentoringError;
use crate::ports::AvailabilityRepository;

/// Command to delete an availability window.
#[derive(Debug, Clone)]
pub struct DeleteAvailabilityCommand {
    pub actor: Actor,
    pub availability_id: AvailabilityId,
}

/// Handler for deleting availability windows. Only the owning mentor or
/// an admin may delete a window. Existing sessions are unaffected.
pub struct DeleteAvailabilityHandler {
    availability_repository: Arc<dyn AvailabilityRepository>,
}

impl DeleteAvailabilityHandler {
    pub fn new(availability_repository: Arc<dyn AvailabilityRepository>) -> Self {
        Self {
            availability_repository,
        }
    }

    pub async fn handle(&self, cmd: DeleteAvailabilityCommand) -> Result<(), MentoringError> {
        let existing = self
            .availability_repository
            .find_by_id(&cmd.availability_id)
            .await?
            .ok_or(MentoringError::availability_not_found(cmd.availability_id))?;

        if !cmd.actor.is_user(&existing.mentor_id) && !cmd.actor.is_admin() {
            return Err(MentoringError::not_authorized());
        }

        self.availability_repository
            .delete(&cmd.availability_id)
            .await?;
        Ok(())
    }
}
