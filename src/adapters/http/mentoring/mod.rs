//! HTTP adapter for mentoring endpoints.

mod dto;
mod handlers;
mod routes;

pub use dto::{
    AvailabilityResponse, AvailableSlotsResponse, BookSessionRequest, BookSessionResponse,
    CreateAvailabilityRequest, CreateMentorProfileRequest, CreateReviewRequest,
    MentorProfileResponse, ReviewResponse, SessionListResponse, SessionResponse,
    UpdateAvailabilityRequest, UpdateMentorProfileRequest, UpdateSessionStatusRequest,
    VerifyPaymentResponse, WebhookAckResponse,
};
pub use handlers::MentoringState;
pub use routes::{mentoring_router, webhook_router};
