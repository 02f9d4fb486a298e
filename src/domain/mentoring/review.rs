//! Session review aggregate.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{ReviewId, SessionId, Timestamp, UserId, ValidationError};

/// Star rating between 1 and 5.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReviewRating(u8);

impl ReviewRating {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 5;

    /// Creates a rating, rejecting values outside 1..=5.
    pub fn new(value: u8) -> Result<Self, ValidationError> {
        if !(Self::MIN..=Self::MAX).contains(&value) {
            return Err(ValidationError::out_of_range(
                "rating",
                Self::MIN as i32,
                Self::MAX as i32,
                value as i32,
            ));
        }
        Ok(Self(value))
    }

    /// Returns the raw value.
    pub fn value(&self) -> u8 {
        self.0
    }
}

/// Review left by a session participant after completion.
///
/// At most one review per (session, reviewer).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionReview {
    pub id: ReviewId,
    pub session_id: SessionId,
    pub reviewer_id: UserId,
    pub rating: ReviewRating,
    pub comment: Option<String>,
    pub created_at: Timestamp,
}

impl SessionReview {
    /// Creates a new review.
    pub fn new(
        id: ReviewId,
        session_id: SessionId,
        reviewer_id: UserId,
        rating: ReviewRating,
        comment: Option<String>,
    ) -> Self {
        Self {
            id,
            session_id,
            reviewer_id,
            rating,
            comment,
            created_at: Timestamp::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rating_accepts_one_through_five() {
        for v in 1..=5 {
            assert!(ReviewRating::new(v).is_ok());
        }
    }

    #[test]
    fn rating_rejects_out_of_range() {
        assert!(ReviewRating::new(0).is_err());
        assert!(ReviewRating::new(6).is_err());
    }

    #[test]
    fn review_carries_rating_and_comment() {
        let review = SessionReview::new(
            ReviewId::new(),
            SessionId::new(),
            UserId::new("student-1").unwrap(),
            ReviewRating::new(5).unwrap(),
            Some("Great session".to_string()),
        );
        assert_eq!(review.rating.value(), 5);
        assert_eq!(review.comment.as_deref(), Some("Great session"));
    }
}
