//! HTTP handlers for mentoring endpoints.

use std::str::FromStr;
use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};

use crate::application::handlers::booking::{
    BookSessionCommand, BookSessionHandler, CreateSessionCheckoutCommand,
    CreateSessionCheckoutHandler,
};
use crate::application::handlers::lifecycle::{
    CreateReviewCommand, CreateReviewHandler, UpdateSessionStatusCommand,
    UpdateSessionStatusHandler,
};
use crate::application::handlers::payment::{
    HandlePaymentWebhookCommand, HandlePaymentWebhookHandler, HandlePaymentWebhookResult,
    VerifySessionPaymentHandler, VerifySessionPaymentQuery,
};
use crate::application::handlers::profile::{
    CreateMentorProfileCommand, CreateMentorProfileHandler, UpdateMentorProfileCommand,
    UpdateMentorProfileHandler,
};
use crate::application::handlers::scheduling::{
    CreateAvailabilityCommand, CreateAvailabilityHandler, DeleteAvailabilityCommand,
    DeleteAvailabilityHandler, ListAvailableSlotsHandler, ListAvailableSlotsQuery,
    UpdateAvailabilityCommand, UpdateAvailabilityHandler,
};
use crate::application::handlers::sessions::{
    GetSessionHandler, GetSessionQuery, ListSessionsHandler, ListSessionsQuery,
};
use crate::domain::foundation::{AvailabilityId, Money, SessionId, UserId};
use crate::domain::mentoring::{MentoringError, SessionStatus, TimeOfDay};

use super::super::error::ApiError;
use super::super::identity::AuthenticatedActor;
use super::dto::{
    AvailabilityResponse, AvailableSlotsParams, AvailableSlotsResponse, BookSessionRequest,
    BookSessionResponse, CreateAvailabilityRequest, CreateMentorProfileRequest,
    CreateReviewRequest, ListSessionsParams, MentorProfileResponse, ReviewResponse,
    SessionListResponse, SessionResponse, UpdateAvailabilityRequest, UpdateMentorProfileRequest,
    UpdateSessionStatusRequest, VerifyPaymentResponse, WebhookAckResponse,
};

// ════════════════════════════════════════════════════════════════════════════
// Handler state
// ════════════════════════════════════════════════════════════════════════════

/// Shared state carrying one handler per operation.
#[derive(Clone)]
pub struct MentoringState {
    pub create_availability: Arc<CreateAvailabilityHandler>,
    pub update_availability: Arc<UpdateAvailabilityHandler>,
    pub delete_availability: Arc<DeleteAvailabilityHandler>,
    pub list_available_slots: Arc<ListAvailableSlotsHandler>,
    pub create_mentor_profile: Arc<CreateMentorProfileHandler>,
    pub update_mentor_profile: Arc<UpdateMentorProfileHandler>,
    pub book_session: Arc<BookSessionHandler>,
    pub create_session_checkout: Arc<CreateSessionCheckoutHandler>,
    pub verify_session_payment: Arc<VerifySessionPaymentHandler>,
    pub handle_payment_webhook: Arc<HandlePaymentWebhookHandler>,
    pub update_session_status: Arc<UpdateSessionStatusHandler>,
    pub create_review: Arc<CreateReviewHandler>,
    pub get_session: Arc<GetSessionHandler>,
    pub list_sessions: Arc<ListSessionsHandler>,
}

fn bad_request(field: &str, message: impl Into<String>) -> ApiError {
    ApiError(MentoringError::validation(field, message))
}

fn parse_session_id(raw: &str) -> Result<SessionId, ApiError> {
    SessionId::from_str(raw).map_err(|_| bad_request("session_id", "invalid session id"))
}

// ════════════════════════════════════════════════════════════════════════════
// Availability
// ════════════════════════════════════════════════════════════════════════════

/// POST /api/mentoring/availability
pub async fn create_availability(
    State(state): State<MentoringState>,
    AuthenticatedActor(actor): AuthenticatedActor,
    Json(req): Json<CreateAvailabilityRequest>,
) -> Result<Response, ApiError> {
    let start_time = TimeOfDay::parse(&req.start_time)
        .map_err(|e| bad_request("start_time", e.to_string()))?;
    let end_time =
        TimeOfDay::parse(&req.end_time).map_err(|e| bad_request("end_time", e.to_string()))?;

    let result = state
        .create_availability
        .handle(CreateAvailabilityCommand {
            actor,
            day_of_week: req.day_of_week,
            start_time,
            end_time,
        })
        .await?;

    let body: AvailabilityResponse = result.window.into();
    Ok((StatusCode::CREATED, Json(body)).into_response())
}

/// PUT /api/mentoring/availability/{id}
pub async fn update_availability(
    State(state): State<MentoringState>,
    AuthenticatedActor(actor): AuthenticatedActor,
    Path(id): Path<String>,
    Json(req): Json<UpdateAvailabilityRequest>,
) -> Result<Response, ApiError> {
    let availability_id = AvailabilityId::from_str(&id)
        .map_err(|_| bad_request("availability_id", "invalid availability id"))?;

    let start_time = req
        .start_time
        .as_deref()
        .map(TimeOfDay::parse)
        .transpose()
        .map_err(|e| bad_request("start_time", e.to_string()))?;
    let end_time = req
        .end_time
        .as_deref()
        .map(TimeOfDay::parse)
        .transpose()
        .map_err(|e| bad_request("end_time", e.to_string()))?;

    let result = state
        .update_availability
        .handle(UpdateAvailabilityCommand {
            actor,
            availability_id,
            day_of_week: req.day_of_week,
            start_time,
            end_time,
            is_active: req.is_active,
        })
        .await?;

    let body: AvailabilityResponse = result.window.into();
    Ok(Json(body).into_response())
}

/// DELETE /api/mentoring/availability/{id}
pub async fn delete_availability(
    State(state): State<MentoringState>,
    AuthenticatedActor(actor): AuthenticatedActor,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    let availability_id = AvailabilityId::from_str(&id)
        .map_err(|_| bad_request("availability_id", "invalid availability id"))?;

    state
        .delete_availability
        .handle(DeleteAvailabilityCommand {
            actor,
            availability_id,
        })
        .await?;

    Ok(StatusCode::NO_CONTENT.into_response())
}

/// GET /api/mentoring/mentor/{id}/available-slots?date=YYYY-MM-DD
pub async fn list_available_slots(
    State(state): State<MentoringState>,
    Path(mentor_id): Path<String>,
    Query(params): Query<AvailableSlotsParams>,
) -> Result<Response, ApiError> {
    let mentor_id =
        UserId::new(mentor_id).map_err(|e| bad_request("mentor_id", e.to_string()))?;

    let result = state
        .list_available_slots
        .handle(ListAvailableSlotsQuery {
            mentor_id,
            date: params.date,
        })
        .await?;

    let body = AvailableSlotsResponse {
        date: result.date,
        slots: result.slots.into_iter().map(Into::into).collect(),
    };
    Ok(Json(body).into_response())
}

// ════════════════════════════════════════════════════════════════════════════
// Mentor profile
// ════════════════════════════════════════════════════════════════════════════

/// POST /api/mentoring/mentor/profile
pub async fn create_mentor_profile(
    State(state): State<MentoringState>,
    AuthenticatedActor(actor): AuthenticatedActor,
    Json(req): Json<CreateMentorProfileRequest>,
) -> Result<Response, ApiError> {
    let hourly_rate = Money::from_cents(req.hourly_rate_cents)
        .map_err(|e| bad_request("hourly_rate_cents", e.to_string()))?;

    let result = state
        .create_mentor_profile
        .handle(CreateMentorProfileCommand {
            actor,
            bio: req.bio,
            expertise_areas: req.expertise_areas,
            hourly_rate,
            years_experience: req.years_experience,
            min_session_duration: req.min_session_duration,
            max_session_duration: req.max_session_duration,
        })
        .await?;

    let body: MentorProfileResponse = result.profile.into();
    Ok((StatusCode::CREATED, Json(body)).into_response())
}

/// PUT /api/mentoring/mentor/profile
pub async fn update_mentor_profile(
    State(state): State<MentoringState>,
    AuthenticatedActor(actor): AuthenticatedActor,
    Json(req): Json<UpdateMentorProfileRequest>,
) -> Result<Response, ApiError> {
    let hourly_rate = req
        .hourly_rate_cents
        .map(Money::from_cents)
        .transpose()
        .map_err(|e| bad_request("hourly_rate_cents", e.to_string()))?;

    let result = state
        .update_mentor_profile
        .handle(
            actor,
            UpdateMentorProfileCommand {
                bio: req.bio,
                expertise_areas: req.expertise_areas,
                hourly_rate,
                years_experience: req.years_experience,
                min_session_duration: req.min_session_duration,
                max_session_duration: req.max_session_duration,
                is_accepting_sessions: req.is_accepting_sessions,
            },
        )
        .await?;

    let body: MentorProfileResponse = result.profile.into();
    Ok(Json(body).into_response())
}

// ════════════════════════════════════════════════════════════════════════════
// Booking
// ════════════════════════════════════════════════════════════════════════════

/// POST /api/mentoring/book
///
/// Books the session and immediately creates the payment checkout, so
/// the client gets back one response with the session and the URL to
/// pay at.
pub async fn book_session(
    State(state): State<MentoringState>,
    AuthenticatedActor(actor): AuthenticatedActor,
    Json(req): Json<BookSessionRequest>,
) -> Result<Response, ApiError> {
    let mentor_id =
        UserId::new(req.mentor_id).map_err(|e| bad_request("mentor_id", e.to_string()))?;

    let booked = state
        .book_session
        .handle(BookSessionCommand {
            student_id: actor.user_id.clone(),
            mentor_id,
            title: req.title,
            description: req.description,
            scheduled_at: crate::domain::foundation::Timestamp::from_datetime(req.scheduled_at),
            duration_minutes: req.duration_minutes,
        })
        .await?;

    let checkout = state
        .create_session_checkout
        .handle(CreateSessionCheckoutCommand {
            actor,
            session_id: booked.session.id,
        })
        .await?;

    tracing::info!(
        session_id = %booked.session.id,
        mentor_id = %booked.session.mentor_id,
        "Session booked, awaiting payment"
    );

    let body = BookSessionResponse {
        session: booked.session.into(),
        payment_required: true,
        payment_url: checkout.checkout.url,
    };
    Ok((StatusCode::CREATED, Json(body)).into_response())
}

// ════════════════════════════════════════════════════════════════════════════
// Sessions
// ════════════════════════════════════════════════════════════════════════════

/// GET /api/mentoring/sessions
pub async fn list_sessions(
    State(state): State<MentoringState>,
    AuthenticatedActor(actor): AuthenticatedActor,
    Query(params): Query<ListSessionsParams>,
) -> Result<Response, ApiError> {
    let status = params
        .status
        .as_deref()
        .map(SessionStatus::parse)
        .transpose()
        .map_err(|e| bad_request("status", e.to_string()))?;

    let result = state
        .list_sessions
        .handle(ListSessionsQuery { actor, status })
        .await?;

    let body = SessionListResponse {
        sessions: result.sessions.into_iter().map(Into::into).collect(),
    };
    Ok(Json(body).into_response())
}

/// GET /api/mentoring/sessions/{id}
pub async fn get_session(
    State(state): State<MentoringState>,
    AuthenticatedActor(actor): AuthenticatedActor,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    let session_id = parse_session_id(&id)?;

    let result = state
        .get_session
        .handle(GetSessionQuery { actor, session_id })
        .await?;

    let body: SessionResponse = result.session.into();
    Ok(Json(body).into_response())
}

/// PUT /api/mentoring/sessions/{id}/status
pub async fn update_session_status(
    State(state): State<MentoringState>,
    AuthenticatedActor(actor): AuthenticatedActor,
    Path(id): Path<String>,
    Json(req): Json<UpdateSessionStatusRequest>,
) -> Result<Response, ApiError> {
    let session_id = parse_session_id(&id)?;
    let target =
        SessionStatus::parse(&req.status).map_err(|e| bad_request("status", e.to_string()))?;

    let result = state
        .update_session_status
        .handle(UpdateSessionStatusCommand {
            actor,
            session_id,
            target,
        })
        .await?;

    let body: SessionResponse = result.session.into();
    Ok(Json(body).into_response())
}

// ════════════════════════════════════════════════════════════════════════════
// Payment
// ════════════════════════════════════════════════════════════════════════════

/// POST /api/mentoring/session/{id}/verify-payment
pub async fn verify_session_payment(
    State(state): State<MentoringState>,
    AuthenticatedActor(actor): AuthenticatedActor,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    let session_id = parse_session_id(&id)?;

    let result = state
        .verify_session_payment
        .handle(VerifySessionPaymentQuery { actor, session_id })
        .await?;

    let body = VerifyPaymentResponse {
        status: result.outcome.as_str().to_string(),
    };
    Ok(Json(body).into_response())
}

/// POST /api/webhooks/payment
///
/// Provider callbacks carry the signature in the `Stripe-Signature`
/// header and the event as the raw body. All recognized-but-inapplicable
/// events are acknowledged with 200 so the provider stops retrying.
pub async fn handle_payment_webhook(
    State(state): State<MentoringState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Response, ApiError> {
    let signature = headers
        .get("Stripe-Signature")
        .and_then(|h| h.to_str().ok())
        .ok_or(MentoringError::InvalidWebhookSignature)?
        .to_string();

    let result = state
        .handle_payment_webhook
        .handle(HandlePaymentWebhookCommand {
            payload: body.to_vec(),
            signature,
        })
        .await?;

    let status = match result {
        HandlePaymentWebhookResult::SessionConfirmed => "session_confirmed",
        HandlePaymentWebhookResult::AlreadyConfirmed => "already_confirmed",
        HandlePaymentWebhookResult::Acknowledged => "acknowledged",
        HandlePaymentWebhookResult::Ignored => "ignored",
    };

    Ok(Json(WebhookAckResponse {
        status: status.to_string(),
    })
    .into_response())
}

// ════════════════════════════════════════════════════════════════════════════
// Reviews
// ════════════════════════════════════════════════════════════════════════════

/// POST /api/mentoring/sessions/{id}/review
pub async fn create_review(
    State(state): State<MentoringState>,
    AuthenticatedActor(actor): AuthenticatedActor,
    Path(id): Path<String>,
    Json(req): Json<CreateReviewRequest>,
) -> Result<Response, ApiError> {
    let session_id = parse_session_id(&id)?;

    let result = state
        .create_review
        .handle(CreateReviewCommand {
            actor,
            session_id,
            rating: req.rating,
            comment: req.comment,
        })
        .await?;

    let body = ReviewResponse::from_review(result.review, result.new_average_rating);
    Ok((StatusCode::CREATED, Json(body)).into_response())
}
