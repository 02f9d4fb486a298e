//! Review repository port.

use crate::domain::foundation::{DomainError, SessionId, UserId};
use crate::domain::mentoring::SessionReview;
use async_trait::async_trait;

/// Repository port for session reviews.
#[async_trait]
pub trait ReviewRepository: Send + Sync {
    /// Save a new review.
    ///
    /// # Errors
    ///
    /// - `DatabaseError` on persistence failure (including unique
    ///   violation of the one-review-per-reviewer constraint)
    async fn save(&self, review: &SessionReview) -> Result<(), DomainError>;

    /// Whether the reviewer already reviewed this session.
    async fn exists_for_reviewer(
        &self,
        session_id: &SessionId,
        reviewer_id: &UserId,
    ) -> Result<bool, DomainError>;

    /// Ratings of all student-authored reviews across a mentor's
    /// sessions. Feeds the average rating recomputation.
    async fn student_ratings_for_mentor(
        &self,
        mentor_id: &UserId,
    ) -> Result<Vec<u8>, DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    // Trait object safety test
    #[test]
    fn review_repository_is_object_safe() {
        fn _accepts_dyn(_repo: &dyn ReviewRepository) {}
    }
}
