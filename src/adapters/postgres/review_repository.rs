//! PostgreSQL implementation of ReviewRepository.

use async_trait::async_trait;
use sqlx::{PgPool, Row};

use crate::domain::foundation::{DomainError, ErrorCode, SessionId, UserId};
use crate::domain::mentoring::SessionReview;
use crate::ports::ReviewRepository;

/// PostgreSQL implementation of ReviewRepository.
#[derive(Clone)]
pub struct PostgresReviewRepository {
    pool: PgPool,
}

impl PostgresReviewRepository {
    /// Creates a new PostgresReviewRepository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ReviewRepository for PostgresReviewRepository {
    async fn save(&self, review: &SessionReview) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO session_reviews (
                id, session_id, reviewer_id, rating, comment, created_at
            ) VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(review.id.as_uuid())
        .bind(review.session_id.as_uuid())
        .bind(review.reviewer_id.as_str())
        .bind(review.rating.value() as i16)
        .bind(&review.comment)
        .bind(review.created_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db) if db.is_unique_violation() => DomainError::new(
                ErrorCode::AlreadyReviewed,
                format!("Session already reviewed: {}", review.session_id),
            ),
            _ => DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to insert review: {}", e),
            ),
        })?;

        Ok(())
    }

    async fn exists_for_reviewer(
        &self,
        session_id: &SessionId,
        reviewer_id: &UserId,
    ) -> Result<bool, DomainError> {
        let result: (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM session_reviews WHERE session_id = $1 AND reviewer_id = $2",
        )
        .bind(session_id.as_uuid())
        .bind(reviewer_id.as_str())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to check review existence: {}", e),
            )
        })?;

        Ok(result.0 > 0)
    }

    async fn student_ratings_for_mentor(
        &self,
        mentor_id: &UserId,
    ) -> Result<Vec<u8>, DomainError> {
        // Student-authored only: the reviewer must be the session's student.
        let rows = sqlx::query(
            r#"
            SELECT r.rating
            FROM session_reviews r
            JOIN mentor_sessions s ON s.id = r.session_id
            WHERE s.mentor_id = $1 AND r.reviewer_id = s.student_id
            "#,
        )
        .bind(mentor_id.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to fetch mentor ratings: {}", e),
            )
        })?;

        rows.into_iter()
            .map(|row| {
                let rating: i16 = row.try_get("rating").map_err(|e| {
                    DomainError::new(
                        ErrorCode::DatabaseError,
                        format!("Failed to get rating: {}", e),
                    )
                })?;
                Ok(rating as u8)
            })
            .collect()
    }
}
