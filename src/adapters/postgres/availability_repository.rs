//! PostgreSQL implementation of AvailabilityRepository.

use async_trait::async_trait;
use sqlx::{PgPool, Row};

use crate::domain::foundation::{AvailabilityId, DomainError, ErrorCode, Timestamp, UserId};
use crate::domain::mentoring::{AvailabilityWindow, TimeOfDay};
use crate::ports::AvailabilityRepository;

/// PostgreSQL implementation of AvailabilityRepository.
#[derive(Clone)]
pub struct PostgresAvailabilityRepository {
    pool: PgPool,
}

impl PostgresAvailabilityRepository {
    /// Creates a new PostgresAvailabilityRepository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AvailabilityRepository for PostgresAvailabilityRepository {
    async fn save(&self, window: &AvailabilityWindow) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO mentor_availability (
                id, mentor_id, day_of_week, start_time, end_time, is_active, created_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(window.id.as_uuid())
        .bind(window.mentor_id.as_str())
        .bind(window.day_of_week as i16)
        .bind(window.start_time.to_naive())
        .bind(window.end_time.to_naive())
        .bind(window.is_active)
        .bind(window.created_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to insert availability window: {}", e),
            )
        })?;

        Ok(())
    }

    async fn update(&self, window: &AvailabilityWindow) -> Result<(), DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE mentor_availability SET
                day_of_week = $2,
                start_time = $3,
                end_time = $4,
                is_active = $5
            WHERE id = $1
            "#,
        )
        .bind(window.id.as_uuid())
        .bind(window.day_of_week as i16)
        .bind(window.start_time.to_naive())
        .bind(window.end_time.to_naive())
        .bind(window.is_active)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to update availability window: {}", e),
            )
        })?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(
                ErrorCode::AvailabilityNotFound,
                format!("Availability window not found: {}", window.id),
            ));
        }

        Ok(())
    }

    async fn delete(&self, id: &AvailabilityId) -> Result<(), DomainError> {
        let result = sqlx::query("DELETE FROM mentor_availability WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(|e| {
                DomainError::new(
                    ErrorCode::DatabaseError,
                    format!("Failed to delete availability window: {}", e),
                )
            })?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(
                ErrorCode::AvailabilityNotFound,
                format!("Availability window not found: {}", id),
            ));
        }

        Ok(())
    }

    async fn find_by_id(
        &self,
        id: &AvailabilityId,
    ) -> Result<Option<AvailabilityWindow>, DomainError> {
        let row = sqlx::query("SELECT * FROM mentor_availability WHERE id = $1")
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                DomainError::new(
                    ErrorCode::DatabaseError,
                    format!("Failed to fetch availability window: {}", e),
                )
            })?;

        row.map(row_to_window).transpose()
    }

    async fn find_active_by_mentor(
        &self,
        mentor_id: &UserId,
    ) -> Result<Vec<AvailabilityWindow>, DomainError> {
        let rows = sqlx::query(
            r#"
            SELECT * FROM mentor_availability
            WHERE mentor_id = $1 AND is_active = TRUE
            ORDER BY day_of_week, start_time
            "#,
        )
        .bind(mentor_id.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to fetch availability windows: {}", e),
            )
        })?;

        rows.into_iter().map(row_to_window).collect()
    }
}

fn column_error(column: &str, e: impl std::fmt::Display) -> DomainError {
    DomainError::new(
        ErrorCode::DatabaseError,
        format!("Failed to get {}: {}", column, e),
    )
}

fn row_to_window(row: sqlx::postgres::PgRow) -> Result<AvailabilityWindow, DomainError> {
    let id: uuid::Uuid = row.try_get("id").map_err(|e| column_error("id", e))?;
    let mentor_id: String = row
        .try_get("mentor_id")
        .map_err(|e| column_error("mentor_id", e))?;
    let day_of_week: i16 = row
        .try_get("day_of_week")
        .map_err(|e| column_error("day_of_week", e))?;
    let start_time: chrono::NaiveTime = row
        .try_get("start_time")
        .map_err(|e| column_error("start_time", e))?;
    let end_time: chrono::NaiveTime = row
        .try_get("end_time")
        .map_err(|e| column_error("end_time", e))?;
    let is_active: bool = row
        .try_get("is_active")
        .map_err(|e| column_error("is_active", e))?;
    let created_at: chrono::DateTime<chrono::Utc> = row
        .try_get("created_at")
        .map_err(|e| column_error("created_at", e))?;

    Ok(AvailabilityWindow {
        id: AvailabilityId::from_uuid(id),
        mentor_id: UserId::new(mentor_id)
            .map_err(|e| DomainError::new(ErrorCode::DatabaseError, e.to_string()))?,
        day_of_week: day_of_week as u8,
        start_time: TimeOfDay::from_naive(start_time),
        end_time: TimeOfDay::from_naive(end_time),
        is_active,
        created_at: Timestamp::from_datetime(created_at),
    })
}
