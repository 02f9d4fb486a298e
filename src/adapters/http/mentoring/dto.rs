//! HTTP DTOs for mentoring endpoints.
//!
//! These types decouple the HTTP API from domain types, allowing
//! independent evolution.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::application::handlers::scheduling::SlotEntry;
use crate::domain::mentoring::{AvailabilityWindow, MentorProfile, MentorSession, SessionReview};

// ════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════

/// Request to create an availability window.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateAvailabilityRequest {
    /// 0 = Monday .. 6 = Sunday.
    pub day_of_week: u8,
    /// "HH:MM", 24-hour.
    pub start_time: String,
    pub end_time: String,
}

/// Request to partially update an availability window.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateAvailabilityRequest {
    pub day_of_week: Option<u8>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub is_active: Option<bool>,
}

/// Query string for the available-slots endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct AvailableSlotsParams {
    pub date: NaiveDate,
}

/// Request to create a mentor profile.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateMentorProfileRequest {
    pub bio: Option<String>,
    #[serde(default)]
    pub expertise_areas: Vec<String>,
    pub hourly_rate_cents: i64,
    pub years_experience: u32,
    pub min_session_duration: u32,
    pub max_session_duration: u32,
}

/// Request to partially update a mentor profile.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateMentorProfileRequest {
    pub bio: Option<String>,
    pub expertise_areas: Option<Vec<String>>,
    pub hourly_rate_cents: Option<i64>,
    pub years_experience: Option<u32>,
    pub min_session_duration: Option<u32>,
    pub max_session_duration: Option<u32>,
    pub is_accepting_sessions: Option<bool>,
}

/// Request to book a session.
#[derive(Debug, Clone, Deserialize)]
pub struct BookSessionRequest {
    pub mentor_id: String,
    pub title: String,
    pub description: Option<String>,
    /// Session start, UTC.
    pub scheduled_at: DateTime<Utc>,
    pub duration_minutes: u32,
}

/// Query string for listing sessions.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListSessionsParams {
    pub status: Option<String>,
}

/// Request to move a session to a new lifecycle status.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateSessionStatusRequest {
    pub status: String,
}

/// Request to review a completed session.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateReviewRequest {
    pub rating: u8,
    pub comment: Option<String>,
}

// ════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════

/// Availability window representation.
#[derive(Debug, Clone, Serialize)]
pub struct AvailabilityResponse {
    pub id: String,
    pub mentor_id: String,
    pub day_of_week: u8,
    pub start_time: String,
    pub end_time: String,
    pub is_active: bool,
}

impl From<AvailabilityWindow> for AvailabilityResponse {
    fn from(window: AvailabilityWindow) -> Self {
        Self {
            id: window.id.to_string(),
            mentor_id: window.mentor_id.as_str().to_string(),
            day_of_week: window.day_of_week,
            start_time: window.start_time.to_string(),
            end_time: window.end_time.to_string(),
            is_active: window.is_active,
        }
    }
}

/// One enumerated slot of a mentor's day.
#[derive(Debug, Clone, Serialize)]
pub struct SlotResponse {
    pub start_time: String,
    pub is_available: bool,
}

impl From<SlotEntry> for SlotResponse {
    fn from(entry: SlotEntry) -> Self {
        Self {
            start_time: entry.start_time.to_string(),
            is_available: entry.is_available,
        }
    }
}

/// Enumerated slots for one mentor and date.
#[derive(Debug, Clone, Serialize)]
pub struct AvailableSlotsResponse {
    pub date: NaiveDate,
    pub slots: Vec<SlotResponse>,
}

/// Mentor profile representation.
#[derive(Debug, Clone, Serialize)]
pub struct MentorProfileResponse {
    pub user_id: String,
    pub bio: Option<String>,
    pub expertise_areas: Vec<String>,
    pub hourly_rate_cents: i64,
    pub years_experience: u32,
    pub min_session_duration: u32,
    pub max_session_duration: u32,
    pub is_accepting_sessions: bool,
    pub total_sessions: u32,
    pub average_rating: f64,
    pub total_earnings_cents: i64,
}

impl From<MentorProfile> for MentorProfileResponse {
    fn from(profile: MentorProfile) -> Self {
        Self {
            user_id: profile.user_id.as_str().to_string(),
            bio: profile.bio,
            expertise_areas: profile.expertise_areas,
            hourly_rate_cents: profile.hourly_rate.cents(),
            years_experience: profile.years_experience,
            min_session_duration: profile.min_session_duration,
            max_session_duration: profile.max_session_duration,
            is_accepting_sessions: profile.is_accepting_sessions,
            total_sessions: profile.total_sessions,
            average_rating: profile.average_rating,
            total_earnings_cents: profile.total_earnings.cents(),
        }
    }
}

/// Session representation.
#[derive(Debug, Clone, Serialize)]
pub struct SessionResponse {
    pub id: String,
    pub mentor_id: String,
    pub student_id: String,
    pub title: String,
    pub description: Option<String>,
    pub scheduled_at: DateTime<Utc>,
    pub duration_minutes: u32,
    pub price_cents: i64,
    pub status: String,
    pub payment_status: String,
    pub meeting_link: Option<String>,
}

impl From<MentorSession> for SessionResponse {
    fn from(session: MentorSession) -> Self {
        Self {
            id: session.id.to_string(),
            mentor_id: session.mentor_id.as_str().to_string(),
            student_id: session.student_id.as_str().to_string(),
            title: session.title,
            description: session.description,
            scheduled_at: *session.scheduled_at.as_datetime(),
            duration_minutes: session.duration_minutes,
            price_cents: session.price.cents(),
            status: session.status.as_str().to_string(),
            payment_status: session.payment_status.as_str().to_string(),
            meeting_link: session.meeting_link,
        }
    }
}

/// Response for the composite book-and-checkout endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct BookSessionResponse {
    pub session: SessionResponse,
    /// Always true: every booking awaits payment.
    pub payment_required: bool,
    /// Checkout URL the student completes payment at.
    pub payment_url: String,
}

/// Session list wrapper.
#[derive(Debug, Clone, Serialize)]
pub struct SessionListResponse {
    pub sessions: Vec<SessionResponse>,
}

/// Outcome of a payment verification poll.
#[derive(Debug, Clone, Serialize)]
pub struct VerifyPaymentResponse {
    pub status: String,
}

/// Created review plus the recomputed mentor average, when one was
/// recomputed.
#[derive(Debug, Clone, Serialize)]
pub struct ReviewResponse {
    pub id: String,
    pub session_id: String,
    pub reviewer_id: String,
    pub rating: u8,
    pub comment: Option<String>,
    pub new_average_rating: Option<f64>,
}

impl ReviewResponse {
    pub fn from_review(review: SessionReview, new_average_rating: Option<f64>) -> Self {
        Self {
            id: review.id.to_string(),
            session_id: review.session_id.to_string(),
            reviewer_id: review.reviewer_id.as_str().to_string(),
            rating: review.rating.value(),
            comment: review.comment,
            new_average_rating,
        }
    }
}

/// Acknowledgement returned to the payment provider.
#[derive(Debug, Clone, Serialize)]
pub struct WebhookAckResponse {
    pub status: String,
}
