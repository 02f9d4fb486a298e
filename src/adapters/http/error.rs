//! HTTP error mapping for domain errors.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::domain::foundation::ErrorCode;
use crate::domain::mentoring::MentoringError;

/// Error payload returned on every failure path.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
}

impl ErrorResponse {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }
}

/// Wrapper that turns `MentoringError` into an HTTP response.
#[derive(Debug)]
pub struct ApiError(pub MentoringError);

impl From<MentoringError> for ApiError {
    fn from(err: MentoringError) -> Self {
        ApiError(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let code = self.0.code();
        let status = status_for(code);

        if status.is_server_error() {
            tracing::error!(error_code = %code, message = %self.0.message(), "Request failed");
        }

        let body = ErrorResponse::new(code.to_string(), self.0.message());
        (status, Json(body)).into_response()
    }
}

fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::ValidationFailed
        | ErrorCode::EmptyField
        | ErrorCode::OutOfRange
        | ErrorCode::InvalidFormat => StatusCode::BAD_REQUEST,

        ErrorCode::SessionNotFound
        | ErrorCode::MentorNotFound
        | ErrorCode::AvailabilityNotFound
        | ErrorCode::ProfileNotFound
        | ErrorCode::ReviewNotFound => StatusCode::NOT_FOUND,

        ErrorCode::InvalidStateTransition
        | ErrorCode::SlotConflict
        | ErrorCode::MentorUnavailable
        | ErrorCode::AlreadyReviewed
        | ErrorCode::ProfileAlreadyExists
        | ErrorCode::PaymentNotSettled => StatusCode::CONFLICT,

        ErrorCode::Unauthorized | ErrorCode::InvalidWebhookSignature => StatusCode::UNAUTHORIZED,
        ErrorCode::Forbidden => StatusCode::FORBIDDEN,

        ErrorCode::PaymentProviderError => StatusCode::BAD_GATEWAY,
        ErrorCode::Contention => StatusCode::SERVICE_UNAVAILABLE,

        ErrorCode::DatabaseError | ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}
