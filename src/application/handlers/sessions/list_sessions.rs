//! ListSessionsHandler - Query handler for a user's sessions.

use std::sync::Arc;

use crate::domain::foundation::Actor;
use crate::domain::mentoring::{MentorSession, MentoringError, SessionStatus};
use crate::ports::SessionRepository;

/// Query for the acting user's sessions, optionally filtered by status.
#[derive(Debug, Clone)]
pub struct ListSessionsQuery {
    pub actor: Actor,
    pub status: Option<SessionStatus>,
}

/// Result listing sessions, newest first.
#[derive(Debug, Clone)]
pub struct ListSessionsResult {
    pub sessions: Vec<MentorSession>,
}

/// Handler listing all sessions where the user is mentor or student.
pub struct ListSessionsHandler {
    session_repository: Arc<dyn SessionRepository>,
}

impl ListSessionsHandler {
    pub fn new(session_repository: Arc<dyn SessionRepository>) -> Self {
        Self { session_repository }
    }

    pub async fn handle(
        &self,
        query: ListSessionsQuery,
    ) -> Result<ListSessionsResult, MentoringError> {
        let mut sessions = self
            .session_repository
            .find_for_user(&query.actor.user_id)
            .await?;
        if let Some(status) = query.status {
            sessions.retain(|s| s.status == status);
        }
        Ok(ListSessionsResult { sessions })
    }
}
