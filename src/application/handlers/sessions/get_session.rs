//! GetSessionHandler - Query handler for a single session.

use std::sync::Arc;

use crate::domain::foundation::{Actor, SessionId};
use crate::domain::mentoring::{MentorSession, MentoringError};
use crate::ports::SessionRepository;

/// Query for one session by id.
#[derive(Debug, Clone)]
pub struct GetSessionQuery {
    pub actor: Actor,
    pub session_id: SessionId,
}

/// Result of the lookup.
#[derive(Debug, Clone)]
pub struct GetSessionResult {
    pub session: MentorSession,
}

/// Handler returning a session to its participants or an admin.
pub struct GetSessionHandler {
    session_repository: Arc<dyn SessionRepository>,
}

impl GetSessionHandler {
    pub fn new(session_repository: Arc<dyn SessionRepository>) -> Self {
        Self { session_repository }
    }

    pub async fn handle(&self, query: GetSessionQuery) -> Result<GetSessionResult, MentoringError> {
        let session = self
            .session_repository
            .find_by_id(&query.session_id)
            .await?
            .ok_or(MentoringError::session_not_found(query.session_id))?;
        if !session.is_participant(&query.actor.user_id) && !query.actor.is_admin() {
            return Err(MentoringError::not_authorized());
        }
        Ok(GetSessionResult { session })
    }
}
