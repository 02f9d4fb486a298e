//! In-memory review repository.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, SessionId, UserId};
use crate::domain::mentoring::SessionReview;
use crate::ports::ReviewRepository;

use super::InMemorySessionRepository;

/// Mutex-guarded review store.
///
/// Holds the session repository so student-authored ratings can be
/// resolved by joining reviews to their sessions, as the postgres
/// adapter does with a join.
pub struct InMemoryReviewRepository {
    reviews: Mutex<Vec<SessionReview>>,
    sessions: Arc<InMemorySessionRepository>,
}

impl InMemoryReviewRepository {
    pub fn new(sessions: Arc<InMemorySessionRepository>) -> Self {
        Self {
            reviews: Mutex::new(Vec::new()),
            sessions,
        }
    }
}

#[async_trait]
impl ReviewRepository for InMemoryReviewRepository {
    async fn save(&self, review: &SessionReview) -> Result<(), DomainError> {
        let mut reviews = self.reviews.lock().unwrap();
        if reviews
            .iter()
            .any(|r| r.session_id == review.session_id && r.reviewer_id == review.reviewer_id)
        {
            return Err(DomainError::validation(
                "reviewer_id",
                "Session already reviewed by this user",
            ));
        }
        reviews.push(review.clone());
        Ok(())
    }

    async fn exists_for_reviewer(
        &self,
        session_id: &SessionId,
        reviewer_id: &UserId,
    ) -> Result<bool, DomainError> {
        Ok(self
            .reviews
            .lock()
            .unwrap()
            .iter()
            .any(|r| &r.session_id == session_id && &r.reviewer_id == reviewer_id))
    }

    async fn student_ratings_for_mentor(
        &self,
        mentor_id: &UserId,
    ) -> Result<Vec<u8>, DomainError> {
        let sessions = self.sessions.snapshot();
        let reviews = self.reviews.lock().unwrap();
        let ratings = reviews
            .iter()
            .filter_map(|review| {
                sessions
                    .iter()
                    .find(|s| s.id == review.session_id)
                    .filter(|s| &s.mentor_id == mentor_id && s.student_id == review.reviewer_id)
                    .map(|_| review.rating.value())
            })
            .collect();
        Ok(ratings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryMentorProfileRepository;
    use crate::domain::foundation::{Money, ReviewId, Timestamp};
    use crate::domain::mentoring::{MentorSession, ReviewRating};
    use crate::ports::SessionRepository;

    async fn setup_with_session(
        mentor: &str,
        student: &str,
    ) -> (Arc<InMemorySessionRepository>, InMemoryReviewRepository, SessionId) {
        let profiles = Arc::new(InMemoryMentorProfileRepository::new());
        let sessions = Arc::new(InMemorySessionRepository::new(profiles));
        let reviews = InMemoryReviewRepository::new(Arc::clone(&sessions));

        let session = MentorSession::book(
            SessionId::new(),
            UserId::new(mentor).unwrap(),
            UserId::new(student).unwrap(),
            "Session".to_string(),
            None,
            Timestamp::from_unix_secs(3600),
            60,
            Money::from_cents(5000).unwrap(),
        )
        .unwrap();
        let id = session.id;
        sessions.insert_booking(&session).await.unwrap();
        (sessions, reviews, id)
    }

    fn review(session_id: SessionId, reviewer: &str, rating: u8) -> SessionReview {
        SessionReview::new(
            ReviewId::new(),
            session_id,
            UserId::new(reviewer).unwrap(),
            ReviewRating::new(rating).unwrap(),
            None,
        )
    }

    #[tokio::test]
    async fn save_rejects_second_review_from_same_reviewer() {
        let (_, reviews, session_id) = setup_with_session("mentor-1", "student-1").await;
        reviews.save(&review(session_id, "student-1", 5)).await.unwrap();
        assert!(reviews.save(&review(session_id, "student-1", 4)).await.is_err());
    }

    #[tokio::test]
    async fn student_ratings_exclude_mentor_authored_reviews() {
        let (_, reviews, session_id) = setup_with_session("mentor-1", "student-1").await;
        reviews.save(&review(session_id, "student-1", 5)).await.unwrap();
        reviews.save(&review(session_id, "mentor-1", 3)).await.unwrap();

        let ratings = reviews
            .student_ratings_for_mentor(&UserId::new("mentor-1").unwrap())
            .await
            .unwrap();
        assert_eq!(ratings, vec![5]);
    }
}
