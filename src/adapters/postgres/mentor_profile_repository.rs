//! PostgreSQL implementation of MentorProfileRepository.

use async_trait::async_trait;
use sqlx::{PgPool, Row};

use crate::domain::foundation::{DomainError, ErrorCode, Money, Timestamp, UserId};
use crate::domain::mentoring::MentorProfile;
use crate::ports::MentorProfileRepository;

/// PostgreSQL implementation of MentorProfileRepository.
#[derive(Clone)]
pub struct PostgresMentorProfileRepository {
    pool: PgPool,
}

impl PostgresMentorProfileRepository {
    /// Creates a new PostgresMentorProfileRepository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MentorProfileRepository for PostgresMentorProfileRepository {
    async fn save(&self, profile: &MentorProfile) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO mentor_profiles (
                user_id, bio, expertise_areas, hourly_rate_cents, years_experience,
                min_session_duration, max_session_duration, is_accepting_sessions,
                total_sessions, average_rating, total_earnings_cents,
                created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
            "#,
        )
        .bind(profile.user_id.as_str())
        .bind(&profile.bio)
        .bind(&profile.expertise_areas)
        .bind(profile.hourly_rate.cents())
        .bind(profile.years_experience as i32)
        .bind(profile.min_session_duration as i32)
        .bind(profile.max_session_duration as i32)
        .bind(profile.is_accepting_sessions)
        .bind(profile.total_sessions as i32)
        .bind(profile.average_rating)
        .bind(profile.total_earnings.cents())
        .bind(profile.created_at.as_datetime())
        .bind(profile.updated_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db) if db.is_unique_violation() => DomainError::new(
                ErrorCode::ValidationFailed,
                format!("Mentor profile already exists: {}", profile.user_id),
            ),
            _ => DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to insert mentor profile: {}", e),
            ),
        })?;

        Ok(())
    }

    async fn update(&self, profile: &MentorProfile) -> Result<(), DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE mentor_profiles SET
                bio = $2,
                expertise_areas = $3,
                hourly_rate_cents = $4,
                years_experience = $5,
                min_session_duration = $6,
                max_session_duration = $7,
                is_accepting_sessions = $8,
                updated_at = $9
            WHERE user_id = $1
            "#,
        )
        .bind(profile.user_id.as_str())
        .bind(&profile.bio)
        .bind(&profile.expertise_areas)
        .bind(profile.hourly_rate.cents())
        .bind(profile.years_experience as i32)
        .bind(profile.min_session_duration as i32)
        .bind(profile.max_session_duration as i32)
        .bind(profile.is_accepting_sessions)
        .bind(profile.updated_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to update mentor profile: {}", e),
            )
        })?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(
                ErrorCode::ProfileNotFound,
                format!("Mentor profile not found: {}", profile.user_id),
            ));
        }

        Ok(())
    }

    async fn find_by_user_id(
        &self,
        user_id: &UserId,
    ) -> Result<Option<MentorProfile>, DomainError> {
        let row = sqlx::query("SELECT * FROM mentor_profiles WHERE user_id = $1")
            .bind(user_id.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                DomainError::new(
                    ErrorCode::DatabaseError,
                    format!("Failed to fetch mentor profile: {}", e),
                )
            })?;

        row.map(row_to_profile).transpose()
    }

    async fn set_average_rating(
        &self,
        mentor_id: &UserId,
        average_rating: f64,
    ) -> Result<(), DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE mentor_profiles
            SET average_rating = $2, updated_at = NOW()
            WHERE user_id = $1
            "#,
        )
        .bind(mentor_id.as_str())
        .bind(average_rating)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to update average rating: {}", e),
            )
        })?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(
                ErrorCode::ProfileNotFound,
                format!("Mentor profile not found: {}", mentor_id),
            ));
        }

        Ok(())
    }
}

fn column_error(column: &str, e: impl std::fmt::Display) -> DomainError {
    DomainError::new(
        ErrorCode::DatabaseError,
        format!("Failed to get {}: {}", column, e),
    )
}

fn row_to_profile(row: sqlx::postgres::PgRow) -> Result<MentorProfile, DomainError> {
    let user_id: String = row
        .try_get("user_id")
        .map_err(|e| column_error("user_id", e))?;
    let bio: Option<String> = row.try_get("bio").map_err(|e| column_error("bio", e))?;
    let expertise_areas: Vec<String> = row
        .try_get("expertise_areas")
        .map_err(|e| column_error("expertise_areas", e))?;
    let hourly_rate_cents: i64 = row
        .try_get("hourly_rate_cents")
        .map_err(|e| column_error("hourly_rate_cents", e))?;
    let years_experience: i32 = row
        .try_get("years_experience")
        .map_err(|e| column_error("years_experience", e))?;
    let min_session_duration: i32 = row
        .try_get("min_session_duration")
        .map_err(|e| column_error("min_session_duration", e))?;
    let max_session_duration: i32 = row
        .try_get("max_session_duration")
        .map_err(|e| column_error("max_session_duration", e))?;
    let is_accepting_sessions: bool = row
        .try_get("is_accepting_sessions")
        .map_err(|e| column_error("is_accepting_sessions", e))?;
    let total_sessions: i32 = row
        .try_get("total_sessions")
        .map_err(|e| column_error("total_sessions", e))?;
    let average_rating: f64 = row
        .try_get("average_rating")
        .map_err(|e| column_error("average_rating", e))?;
    let total_earnings_cents: i64 = row
        .try_get("total_earnings_cents")
        .map_err(|e| column_error("total_earnings_cents", e))?;
    let created_at: chrono::DateTime<chrono::Utc> = row
        .try_get("created_at")
        .map_err(|e| column_error("created_at", e))?;
    let updated_at: chrono::DateTime<chrono::Utc> = row
        .try_get("updated_at")
        .map_err(|e| column_error("updated_at", e))?;

    Ok(MentorProfile {
        user_id: UserId::new(user_id)
            .map_err(|e| DomainError::new(ErrorCode::DatabaseError, e.to_string()))?,
        bio,
        expertise_areas,
        hourly_rate: Money::from_cents(hourly_rate_cents)
            .map_err(|e| DomainError::new(ErrorCode::DatabaseError, e.to_string()))?,
        years_experience: years_experience as u32,
        min_session_duration: min_session_duration as u32,
        max_session_duration: max_session_duration as u32,
        is_accepting_sessions,
        total_sessions: total_sessions as u32,
        average_rating,
        total_earnings: Money::from_cents(total_earnings_cents)
            .map_err(|e| DomainError::new(ErrorCode::DatabaseError, e.to_string()))?,
        created_at: Timestamp::from_datetime(created_at),
        updated_at: Timestamp::from_datetime(updated_at),
    })
}
