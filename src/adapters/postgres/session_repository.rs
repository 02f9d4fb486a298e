//! PostgreSQL implementation of SessionRepository.
//!
//! Concurrency control:
//!
//! - `insert_booking` takes a per-mentor advisory lock and re-checks
//!   slot overlap in the same transaction, so racing bookings for the
//!   same mentor serialize and at most one can take a slot.
//! - `confirm_payment` locks the session row with `FOR UPDATE` and
//!   credits the mentor in the same transaction, so duplicate webhook
//!   deliveries and concurrent polls confirm exactly once.

use async_trait::async_trait;
use sqlx::{PgPool, Postgres, Row, Transaction};

use crate::domain::foundation::{DomainError, ErrorCode, Money, SessionId, Timestamp, UserId};
use crate::domain::mentoring::{MentorSession, PaymentStatus, SessionStatus};
use crate::ports::{ConfirmOutcome, SessionRepository};

/// PostgreSQL implementation of SessionRepository.
#[derive(Clone)]
pub struct PostgresSessionRepository {
    pool: PgPool,
}

impl PostgresSessionRepository {
    /// Creates a new PostgresSessionRepository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn count_overlapping(
        tx: &mut Transaction<'_, Postgres>,
        session: &MentorSession,
    ) -> Result<i64, DomainError> {
        let result: (i64,) = sqlx::query_as(
            r#"
            SELECT COUNT(*)
            FROM mentor_sessions
            WHERE mentor_id = $1
              AND status IN ('pending', 'confirmed')
              AND scheduled_at < $3
              AND scheduled_at + duration_minutes * interval '1 minute' > $2
            "#,
        )
        .bind(session.mentor_id.as_str())
        .bind(session.scheduled_at.as_datetime())
        .bind(session.ends_at().as_datetime())
        .fetch_one(&mut **tx)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to check slot overlap: {}", e),
            )
        })?;

        Ok(result.0)
    }
}

#[async_trait]
impl SessionRepository for PostgresSessionRepository {
    async fn insert_booking(&self, session: &MentorSession) -> Result<(), DomainError> {
        let mut tx = self.pool.begin().await.map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to begin transaction: {}", e),
            )
        })?;

        // Serialize bookings per mentor for the rest of the transaction.
        sqlx::query("SELECT pg_advisory_xact_lock(hashtext($1))")
            .bind(session.mentor_id.as_str())
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                DomainError::new(
                    ErrorCode::DatabaseError,
                    format!("Failed to acquire booking lock: {}", e),
                )
            })?;

        if Self::count_overlapping(&mut tx, session).await? > 0 {
            return Err(DomainError::new(
                ErrorCode::SlotConflict,
                "Requested slot overlaps an existing session",
            )
            .with_detail("mentor_id", session.mentor_id.as_str()));
        }

        sqlx::query(
            r#"
            INSERT INTO mentor_sessions (
                id, mentor_id, student_id, title, description,
                scheduled_at, duration_minutes, price_cents,
                status, payment_status, checkout_session_id, payment_intent_id,
                meeting_link, mentor_notes, student_notes,
                created_at, updated_at
            ) VALUES (
                $1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17
            )
            "#,
        )
        .bind(session.id.as_uuid())
        .bind(session.mentor_id.as_str())
        .bind(session.student_id.as_str())
        .bind(&session.title)
        .bind(&session.description)
        .bind(session.scheduled_at.as_datetime())
        .bind(session.duration_minutes as i32)
        .bind(session.price.cents())
        .bind(session.status.as_str())
        .bind(session.payment_status.as_str())
        .bind(&session.checkout_session_id)
        .bind(&session.payment_intent_id)
        .bind(&session.meeting_link)
        .bind(&session.mentor_notes)
        .bind(&session.student_notes)
        .bind(session.created_at.as_datetime())
        .bind(session.updated_at.as_datetime())
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to insert session: {}", e),
            )
        })?;

        tx.commit().await.map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to commit booking: {}", e),
            )
        })?;

        Ok(())
    }

    async fn update(&self, session: &MentorSession) -> Result<(), DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE mentor_sessions SET
                title = $2,
                description = $3,
                scheduled_at = $4,
                duration_minutes = $5,
                status = $6,
                payment_status = $7,
                checkout_session_id = $8,
                payment_intent_id = $9,
                meeting_link = $10,
                mentor_notes = $11,
                student_notes = $12,
                updated_at = $13
            WHERE id = $1
            "#,
        )
        .bind(session.id.as_uuid())
        .bind(&session.title)
        .bind(&session.description)
        .bind(session.scheduled_at.as_datetime())
        .bind(session.duration_minutes as i32)
        .bind(session.status.as_str())
        .bind(session.payment_status.as_str())
        .bind(&session.checkout_session_id)
        .bind(&session.payment_intent_id)
        .bind(&session.meeting_link)
        .bind(&session.mentor_notes)
        .bind(&session.student_notes)
        .bind(session.updated_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to update session: {}", e),
            )
        })?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(
                ErrorCode::SessionNotFound,
                format!("Session not found: {}", session.id),
            ));
        }

        Ok(())
    }

    async fn find_by_id(&self, id: &SessionId) -> Result<Option<MentorSession>, DomainError> {
        let row = sqlx::query("SELECT * FROM mentor_sessions WHERE id = $1")
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                DomainError::new(
                    ErrorCode::DatabaseError,
                    format!("Failed to fetch session: {}", e),
                )
            })?;

        row.map(row_to_session).transpose()
    }

    async fn find_occupying_by_mentor(
        &self,
        mentor_id: &UserId,
    ) -> Result<Vec<MentorSession>, DomainError> {
        let rows = sqlx::query(
            r#"
            SELECT * FROM mentor_sessions
            WHERE mentor_id = $1 AND status IN ('pending', 'confirmed')
            ORDER BY scheduled_at
            "#,
        )
        .bind(mentor_id.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to fetch occupying sessions: {}", e),
            )
        })?;

        rows.into_iter().map(row_to_session).collect()
    }

    async fn find_for_user(&self, user_id: &UserId) -> Result<Vec<MentorSession>, DomainError> {
        let rows = sqlx::query(
            r#"
            SELECT * FROM mentor_sessions
            WHERE mentor_id = $1 OR student_id = $1
            ORDER BY scheduled_at DESC
            "#,
        )
        .bind(user_id.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to fetch sessions for user: {}", e),
            )
        })?;

        rows.into_iter().map(row_to_session).collect()
    }

    async fn set_checkout_session(
        &self,
        id: &SessionId,
        checkout_session_id: &str,
    ) -> Result<(), DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE mentor_sessions
            SET checkout_session_id = $2, updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .bind(checkout_session_id)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to record checkout session: {}", e),
            )
        })?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(
                ErrorCode::SessionNotFound,
                format!("Session not found: {}", id),
            ));
        }

        Ok(())
    }

    async fn confirm_payment(
        &self,
        id: &SessionId,
        payment_intent_id: &str,
    ) -> Result<ConfirmOutcome, DomainError> {
        let mut tx = self.pool.begin().await.map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to begin transaction: {}", e),
            )
        })?;

        let row = sqlx::query(
            r#"
            SELECT mentor_id, status, price_cents
            FROM mentor_sessions
            WHERE id = $1
            FOR UPDATE
            "#,
        )
        .bind(id.as_uuid())
        .fetch_optional(&mut *tx)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to lock session: {}", e),
            )
        })?;

        let Some(row) = row else {
            return Ok(ConfirmOutcome::NotFound);
        };

        let status: String = row.try_get("status").map_err(|e| {
            DomainError::new(ErrorCode::DatabaseError, format!("Failed to get status: {}", e))
        })?;
        if status != "pending" {
            return Ok(ConfirmOutcome::AlreadyConfirmed);
        }

        let mentor_id: String = row.try_get("mentor_id").map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to get mentor_id: {}", e),
            )
        })?;
        let price_cents: i64 = row.try_get("price_cents").map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to get price_cents: {}", e),
            )
        })?;

        sqlx::query(
            r#"
            UPDATE mentor_sessions SET
                status = 'confirmed',
                payment_status = 'paid',
                payment_intent_id = $2,
                updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .bind(payment_intent_id)
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to confirm session: {}", e),
            )
        })?;

        sqlx::query(
            r#"
            UPDATE mentor_profiles SET
                total_sessions = total_sessions + 1,
                total_earnings_cents = total_earnings_cents + $2,
                updated_at = NOW()
            WHERE user_id = $1
            "#,
        )
        .bind(&mentor_id)
        .bind(price_cents)
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to credit mentor: {}", e),
            )
        })?;

        tx.commit().await.map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to commit confirmation: {}", e),
            )
        })?;

        Ok(ConfirmOutcome::Confirmed)
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Helper functions
// ════════════════════════════════════════════════════════════════════════════

fn column_error(column: &str, e: impl std::fmt::Display) -> DomainError {
    DomainError::new(
        ErrorCode::DatabaseError,
        format!("Failed to get {}: {}", column, e),
    )
}

fn row_to_session(row: sqlx::postgres::PgRow) -> Result<MentorSession, DomainError> {
    let id: uuid::Uuid = row.try_get("id").map_err(|e| column_error("id", e))?;
    let mentor_id: String = row
        .try_get("mentor_id")
        .map_err(|e| column_error("mentor_id", e))?;
    let student_id: String = row
        .try_get("student_id")
        .map_err(|e| column_error("student_id", e))?;
    let title: String = row.try_get("title").map_err(|e| column_error("title", e))?;
    let description: Option<String> = row
        .try_get("description")
        .map_err(|e| column_error("description", e))?;
    let scheduled_at: chrono::DateTime<chrono::Utc> = row
        .try_get("scheduled_at")
        .map_err(|e| column_error("scheduled_at", e))?;
    let duration_minutes: i32 = row
        .try_get("duration_minutes")
        .map_err(|e| column_error("duration_minutes", e))?;
    let price_cents: i64 = row
        .try_get("price_cents")
        .map_err(|e| column_error("price_cents", e))?;
    let status: String = row
        .try_get("status")
        .map_err(|e| column_error("status", e))?;
    let payment_status: String = row
        .try_get("payment_status")
        .map_err(|e| column_error("payment_status", e))?;
    let checkout_session_id: Option<String> = row
        .try_get("checkout_session_id")
        .map_err(|e| column_error("checkout_session_id", e))?;
    let payment_intent_id: Option<String> = row
        .try_get("payment_intent_id")
        .map_err(|e| column_error("payment_intent_id", e))?;
    let meeting_link: Option<String> = row
        .try_get("meeting_link")
        .map_err(|e| column_error("meeting_link", e))?;
    let mentor_notes: Option<String> = row
        .try_get("mentor_notes")
        .map_err(|e| column_error("mentor_notes", e))?;
    let student_notes: Option<String> = row
        .try_get("student_notes")
        .map_err(|e| column_error("student_notes", e))?;
    let created_at: chrono::DateTime<chrono::Utc> = row
        .try_get("created_at")
        .map_err(|e| column_error("created_at", e))?;
    let updated_at: chrono::DateTime<chrono::Utc> = row
        .try_get("updated_at")
        .map_err(|e| column_error("updated_at", e))?;

    Ok(MentorSession {
        id: SessionId::from_uuid(id),
        mentor_id: UserId::new(mentor_id)
            .map_err(|e| DomainError::new(ErrorCode::DatabaseError, e.to_string()))?,
        student_id: UserId::new(student_id)
            .map_err(|e| DomainError::new(ErrorCode::DatabaseError, e.to_string()))?,
        title,
        description,
        scheduled_at: Timestamp::from_datetime(scheduled_at),
        duration_minutes: duration_minutes as u32,
        price: Money::from_cents(price_cents)
            .map_err(|e| DomainError::new(ErrorCode::DatabaseError, e.to_string()))?,
        status: SessionStatus::parse(&status)
            .map_err(|e| DomainError::new(ErrorCode::DatabaseError, e.to_string()))?,
        payment_status: PaymentStatus::parse(&payment_status)
            .map_err(|e| DomainError::new(ErrorCode::DatabaseError, e.to_string()))?,
        checkout_session_id,
        payment_intent_id,
        meeting_link,
        mentor_notes,
        student_notes,
        created_at: Timestamp::from_datetime(created_at),
        updated_at: Timestamp::from_datetime(updated_at),
    })
}
