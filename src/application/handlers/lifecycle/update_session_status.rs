//! UpdateSessionStatusHandler - Command handler for lifecycle moves.

use std::sync::Arc;

use crate::domain::foundation::{Actor, SessionId, StateMachine};
use crate::domain::mentoring::{MentorSession, MentoringError, SessionStatus};
use crate::ports::SessionRepository;

/// Command to move a session to a new lifecycle status.
#[derive(Debug, Clone)]
pub struct UpdateSessionStatusCommand {
    pub actor: Actor,
    pub session_id: SessionId,
    pub target: SessionStatus,
}

/// Result of a status change.
#[derive(Debug, Clone)]
pub struct UpdateSessionStatusResult {
    pub session: MentorSession,
}

/// Handler for session lifecycle transitions.
///
/// Only the session's mentor or an admin may move a session, and the
/// Confirmed target is reserved to payment confirmation. Transitions
/// are validated by the status state machine; only status and
/// updated_at change.
pub struct UpdateSessionStatusHandler {
    session_repository: Arc<dyn SessionRepository>,
}

impl UpdateSessionStatusHandler {
    pub fn new(session_repository: Arc<dyn SessionRepository>) -> Self {
        Self { session_repository }
    }

    pub async fn handle(
        &self,
        cmd: UpdateSessionStatusCommand,
    ) -> Result<UpdateSessionStatusResult, MentoringError> {
        // 1. Load and authorize
        let mut session = self
            .session_repository
            .find_by_id(&cmd.session_id)
            .await?
            .ok_or(MentoringError::session_not_found(cmd.session_id))?;
        if !cmd.actor.is_user(&session.mentor_id) && !cmd.actor.is_admin() {
            return Err(MentoringError::not_authorized());
        }

        // 2. Confirmed is reachable only through payment confirmation
        if cmd.target == SessionStatus::Confirmed {
            return Err(MentoringError::invalid_state(
                session.status.as_str(),
                cmd.target.as_str(),
            ));
        }
        if !session.status.can_transition_to(&cmd.target) {
            return Err(MentoringError::invalid_state(
                session.status.as_str(),
                cmd.target.as_str(),
            ));
        }

        // 3. Apply and persist
        session.change_status(cmd.target)?;
        self.session_repository.update(&session).await?;

        Ok(UpdateSessionStatusResult { session })
    }
}
