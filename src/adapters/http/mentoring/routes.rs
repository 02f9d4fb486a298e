//! HTTP routes for mentoring endpoints.

use axum::{
    routing::{delete, get, post, put},
    Router,
};

use super::handlers::{
    book_session, create_availability, create_mentor_profile, create_review,
    delete_availability, get_session, handle_payment_webhook, list_available_slots,
    list_sessions, update_availability, update_mentor_profile, update_session_status,
    verify_session_payment, MentoringState,
};

/// Creates the mentoring router with all authenticated endpoints.
pub fn mentoring_router(state: MentoringState) -> Router {
    Router::new()
        .route("/availability", post(create_availability))
        .route("/availability/:id", put(update_availability))
        .route("/availability/:id", delete(delete_availability))
        .route("/mentor/:id/available-slots", get(list_available_slots))
        .route("/mentor/profile", post(create_mentor_profile))
        .route("/mentor/profile", put(update_mentor_profile))
        .route("/book", post(book_session))
        .route("/sessions", get(list_sessions))
        .route("/sessions/:id", get(get_session))
        .route("/sessions/:id/status", put(update_session_status))
        .route("/session/:id/verify-payment", post(verify_session_payment))
        .route("/sessions/:id/review", post(create_review))
        .with_state(state)
}

/// Creates the webhook router. Mounted outside the authenticated API;
/// the webhook authenticates by signature instead.
pub fn webhook_router(state: MentoringState) -> Router {
    Router::new()
        .route("/payment", post(handle_payment_webhook))
        .with_state(state)
}
