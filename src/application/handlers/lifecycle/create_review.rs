//! CreateReviewHandler - Command handler for reviewing a session.

use std::sync::Arc;

use crate::domain::foundation::{Actor, ReviewId, SessionId};
use crate::domain::mentoring::{
    average_rating, MentoringError, ReviewRating, SessionReview, SessionStatus,
};
use crate::ports::{MentorProfileRepository, ReviewRepository, SessionRepository};

/// Command to review a completed session.
#[derive(Debug, Clone)]
pub struct CreateReviewCommand {
    pub actor: Actor,
    pub session_id: SessionId,
    pub rating: u8,
    pub comment: Option<String>,
}

/// Result of review creation.
#[derive(Debug, Clone)]
pub struct CreateReviewResult {
    pub review: SessionReview,

    /// Recomputed mentor average when the review was student-authored.
    pub new_average_rating: Option<f64>,
}

/// Handler for session reviews.
///
/// A review requires a Completed session, a reviewer who participated,
/// and no prior review by that reviewer. Either side may review; only
/// student-authored ratings feed the mentor's average.
pub struct CreateReviewHandler {
    session_repository: Arc<dyn SessionRepository>,
    review_repository: Arc<dyn ReviewRepository>,
    profile_repository: Arc<dyn MentorProfileRepository>,
}

impl CreateReviewHandler {
    pub fn new(
        session_repository: Arc<dyn SessionRepository>,
        review_repository: Arc<dyn ReviewRepository>,
        profile_repository: Arc<dyn MentorProfileRepository>,
    ) -> Self {
        Self {
            session_repository,
            review_repository,
            profile_repository,
        }
    }

    pub async fn handle(
        &self,
        cmd: CreateReviewCommand,
    ) -> Result<CreateReviewResult, MentoringError> {
        // 1. Load and gate on participation and completion
        let session = self
            .session_repository
            .find_by_id(&cmd.session_id)
            .await?
            .ok_or(MentoringError::session_not_found(cmd.session_id))?;
        if !session.is_participant(&cmd.actor.user_id) {
            return Err(MentoringError::not_authorized());
        }
        if session.status != SessionStatus::Completed {
            return Err(MentoringError::review_not_allowed(format!(
                "session is {}, only completed sessions can be reviewed",
                session.status.as_str()
            )));
        }

        // 2. One review per reviewer per session
        if self
            .review_repository
            .exists_for_reviewer(&cmd.session_id, &cmd.actor.user_id)
            .await?
        {
            return Err(MentoringError::already_reviewed(cmd.session_id));
        }

        // 3. Validate and persist the review
        let rating = ReviewRating::new(cmd.rating)?;
        let review = SessionReview::new(
            ReviewId::new(),
            cmd.session_id,
            cmd.actor.user_id.clone(),
            rating,
            cmd.comment,
        );
        self.review_repository.save(&review).await?;

        // 4. A student-authored review moves the mentor's average
        let new_average_rating = if cmd.actor.user_id == session.student_id {
            let ratings = self
                .review_repository
                .student_ratings_for_mentor(&session.mentor_id)
                .await?;
            let average = average_rating(&ratings);
            self.profile_repository
                .set_average_rating(&session.mentor_id, average)
                .await?;
            Some(average)
        } else {
            None
        };

        Ok(CreateReviewResult {
            review,
            new_average_rating,
        })
    }
}
