//! Mentoring-specific error types.
//!
//! Errors for booking, payment reconciliation, lifecycle, and reviews.
//!
//! # HTTP Status Mapping
//!
//! | Error | HTTP Status |
//! |-------|-------------|
//! | SessionNotFound | 404 |
//! | ProfileNotFound | 404 |
//! | AvailabilityNotFound | 404 |
//! | MentorUnavailable | 409 |
//! | SlotConflict | 409 |
//! | ProfileAlreadyExists | 409 |
//! | AlreadyReviewed | 409 |
//! | ReviewNotAllowed | 409 |
//! | InvalidState | 409 |
//! | NotAuthorized | 403 |
//! | InvalidWebhookSignature | 401 |
//! | PaymentProvider | 502 |
//! | ValidationFailed | 400 |
//! | Contention | 503 |
//! | Infrastructure | 500 |

use crate::domain::foundation::{
    AvailabilityId, DomainError, ErrorCode, SessionId, UserId, ValidationError,
};

/// Mentoring-specific errors.
#[derive(Debug, Clone, PartialEq)]
pub enum MentoringError {
    /// Session was not found.
    SessionNotFound(SessionId),

    /// No mentor profile exists for this user.
    ProfileNotFound(UserId),

    /// Availability window was not found.
    AvailabilityNotFound(AvailabilityId),

    /// Mentor has no profile or is not accepting sessions.
    MentorUnavailable(UserId),

    /// Requested slot is outside availability or already booked.
    SlotConflict { mentor_id: String },

    /// Mentor already has a profile.
    ProfileAlreadyExists(UserId),

    /// Reviewer already reviewed this session.
    AlreadyReviewed(SessionId),

    /// Session is not in a reviewable state.
    ReviewNotAllowed { reason: String },

    /// Invalid lifecycle transition for the requested operation.
    InvalidState { current: String, attempted: String },

    /// Caller may not act on this resource.
    NotAuthorized,

    /// Webhook signature verification failed.
    InvalidWebhookSignature,

    /// Payment provider call failed or timed out.
    PaymentProvider(String),

    /// Validation failed.
    ValidationFailed { field: String, message: String },

    /// Transient storage contention; safe to retry.
    Contention(String),

    /// Infrastructure error.
    Infrastructure(String),
}

impl MentoringError {
    pub fn session_not_found(id: SessionId) -> Self {
        MentoringError::SessionNotFound(id)
    }

    pub fn profile_not_found(user_id: UserId) -> Self {
        MentoringError::ProfileNotFound(user_id)
    }

    pub fn availability_not_found(id: AvailabilityId) -> Self {
        MentoringError::AvailabilityNotFound(id)
    }

    pub fn mentor_unavailable(mentor_id: UserId) -> Self {
        MentoringError::MentorUnavailable(mentor_id)
    }

    pub fn slot_conflict(mentor_id: impl Into<String>) -> Self {
        MentoringError::SlotConflict {
            mentor_id: mentor_id.into(),
        }
    }

    pub fn profile_already_exists(user_id: UserId) -> Self {
        MentoringError::ProfileAlreadyExists(user_id)
    }

    pub fn already_reviewed(session_id: SessionId) -> Self {
        MentoringError::AlreadyReviewed(session_id)
    }

    pub fn review_not_allowed(reason: impl Into<String>) -> Self {
        MentoringError::ReviewNotAllowed {
            reason: reason.into(),
        }
    }

    pub fn invalid_state(current: impl Into<String>, attempted: impl Into<String>) -> Self {
        MentoringError::InvalidState {
            current: current.into(),
            attempted: attempted.into(),
        }
    }

    pub fn not_authorized() -> Self {
        MentoringError::NotAuthorized
    }

    pub fn invalid_webhook_signature() -> Self {
        MentoringError::InvalidWebhookSignature
    }

    pub fn payment_provider(message: impl Into<String>) -> Self {
        MentoringError::PaymentProvider(message.into())
    }

    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        MentoringError::ValidationFailed {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn contention(message: impl Into<String>) -> Self {
        MentoringError::Contention(message.into())
    }

    pub fn infrastructure(message: impl Into<String>) -> Self {
        MentoringError::Infrastructure(message.into())
    }

    /// Returns the error code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            MentoringError::SessionNotFound(_) => ErrorCode::SessionNotFound,
            MentoringError::ProfileNotFound(_) => ErrorCode::ProfileNotFound,
            MentoringError::AvailabilityNotFound(_) => ErrorCode::AvailabilityNotFound,
            MentoringError::MentorUnavailable(_) => ErrorCode::MentorUnavailable,
            MentoringError::SlotConflict { .. } => ErrorCode::SlotConflict,
            MentoringError::ProfileAlreadyExists(_) => ErrorCode::ProfileAlreadyExists,
            MentoringError::AlreadyReviewed(_) => ErrorCode::AlreadyReviewed,
            MentoringError::ReviewNotAllowed { .. } => ErrorCode::InvalidStateTransition,
            MentoringError::InvalidState { .. } => ErrorCode::InvalidStateTransition,
            MentoringError::NotAuthorized => ErrorCode::Forbidden,
            MentoringError::InvalidWebhookSignature => ErrorCode::InvalidWebhookSignature,
            MentoringError::PaymentProvider(_) => ErrorCode::PaymentProviderError,
            MentoringError::ValidationFailed { .. } => ErrorCode::ValidationFailed,
            MentoringError::Contention(_) => ErrorCode::Contention,
            MentoringError::Infrastructure(_) => ErrorCode::DatabaseError,
        }
    }

    /// Returns a user-friendly error message.
    pub fn message(&self) -> String {
        match self {
            MentoringError::SessionNotFound(id) => format!("Session not found: {}", id),
            MentoringError::ProfileNotFound(user_id) => {
                format!("No mentor profile found for user: {}", user_id)
            }
            MentoringError::AvailabilityNotFound(id) => {
                format!("Availability window not found: {}", id)
            }
            MentoringError::MentorUnavailable(mentor_id) => {
                format!("Mentor {} is not accepting sessions", mentor_id)
            }
            MentoringError::SlotConflict { mentor_id } => {
                format!("Requested time slot is not available for mentor {}", mentor_id)
            }
            MentoringError::ProfileAlreadyExists(user_id) => {
                format!("User {} already has a mentor profile", user_id)
            }
            MentoringError::AlreadyReviewed(session_id) => {
                format!("Session {} has already been reviewed by this user", session_id)
            }
            MentoringError::ReviewNotAllowed { reason } => {
                format!("Review not allowed: {}", reason)
            }
            MentoringError::InvalidState { current, attempted } => {
                format!("Cannot move session from {} to {}", current, attempted)
            }
            MentoringError::NotAuthorized => "Not authorized for this resource".to_string(),
            MentoringError::InvalidWebhookSignature => "Invalid webhook signature".to_string(),
            MentoringError::PaymentProvider(msg) => format!("Payment provider error: {}", msg),
            MentoringError::ValidationFailed { field, message } => {
                format!("Validation failed for '{}': {}", field, message)
            }
            MentoringError::Contention(msg) => format!("Resource busy: {}", msg),
            MentoringError::Infrastructure(msg) => format!("Error: {}", msg),
        }
    }

    /// Returns true if this error should trigger a retry.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            MentoringError::Contention(_)
                | MentoringError::Infrastructure(_)
                | MentoringError::PaymentProvider(_)
        )
    }
}

impl std::fmt::Display for MentoringError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for MentoringError {}

impl From<ValidationError> for MentoringError {
    fn from(err: ValidationError) -> Self {
        let field = match &err {
            ValidationError::EmptyField { field } => field.clone(),
            ValidationError::OutOfRange { field, .. } => field.clone(),
            ValidationError::InvalidFormat { field, .. } => field.clone(),
        };
        MentoringError::ValidationFailed {
            field,
            message: err.to_string(),
        }
    }
}

impl From<DomainError> for MentoringError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::SlotConflict => MentoringError::SlotConflict {
                mentor_id: err
                    .details
                    .get("mentor_id")
                    .cloned()
                    .unwrap_or_else(|| "unknown".to_string()),
            },
            ErrorCode::Contention => MentoringError::Contention(err.to_string()),
            ErrorCode::PaymentProviderError => MentoringError::PaymentProvider(err.to_string()),
            ErrorCode::InvalidWebhookSignature => MentoringError::InvalidWebhookSignature,
            ErrorCode::ValidationFailed => MentoringError::ValidationFailed {
                field: err
                    .details
                    .get("field")
                    .cloned()
                    .unwrap_or_else(|| "unknown".to_string()),
                message: err.to_string(),
            },
            _ => MentoringError::Infrastructure(err.to_string()),
        }
    }
}

impl From<MentoringError> for DomainError {
    fn from(err: MentoringError) -> Self {
        DomainError::new(err.code(), err.message())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constructors_set_matching_codes() {
        assert_eq!(
            MentoringError::session_not_found(SessionId::new()).code(),
            ErrorCode::SessionNotFound
        );
        assert_eq!(
            MentoringError::slot_conflict("mentor-1").code(),
            ErrorCode::SlotConflict
        );
        assert_eq!(
            MentoringError::not_authorized().code(),
            ErrorCode::Forbidden
        );
        assert_eq!(
            MentoringError::contention("row locked").code(),
            ErrorCode::Contention
        );
    }

    #[test]
    fn messages_include_identifiers() {
        let id = SessionId::new();
        assert!(MentoringError::session_not_found(id)
            .message()
            .contains(&id.to_string()));

        let mentor = UserId::new("mentor-7").unwrap();
        assert!(MentoringError::mentor_unavailable(mentor)
            .message()
            .contains("mentor-7"));
    }

    #[test]
    fn transient_errors_are_retryable() {
        assert!(MentoringError::contention("busy").is_retryable());
        assert!(MentoringError::infrastructure("db down").is_retryable());
        assert!(MentoringError::payment_provider("timeout").is_retryable());
        assert!(!MentoringError::slot_conflict("m").is_retryable());
        assert!(!MentoringError::not_authorized().is_retryable());
    }

    #[test]
    fn validation_error_conversion_keeps_field() {
        let err: MentoringError = ValidationError::empty_field("title").into();
        assert!(matches!(
            err,
            MentoringError::ValidationFailed { ref field, .. } if field == "title"
        ));
    }

    #[test]
    fn domain_error_slot_conflict_maps_with_detail() {
        let domain_err = DomainError::new(ErrorCode::SlotConflict, "slot taken")
            .with_detail("mentor_id", "mentor-3");
        let err: MentoringError = domain_err.into();
        assert!(matches!(
            err,
            MentoringError::SlotConflict { ref mentor_id } if mentor_id == "mentor-3"
        ));
    }

    #[test]
    fn unmapped_domain_errors_become_infrastructure() {
        let domain_err = DomainError::new(ErrorCode::DatabaseError, "connection reset");
        let err: MentoringError = domain_err.into();
        assert!(matches!(err, MentoringError::Infrastructure(_)));
    }

    #[test]
    fn display_matches_message() {
        let err = MentoringError::invalid_state("completed", "cancelled");
        assert_eq!(format!("{}", err), err.message());
    }
}
