//! HTTP adapters - REST API implementations.
//!
//! The mentoring router exposes scheduling, booking, payment, and
//! lifecycle endpoints; the webhook router receives provider callbacks.

mod error;
mod identity;
pub mod mentoring;

pub use error::{ApiError, ErrorResponse};
pub use identity::AuthenticatedActor;
pub use mentoring::{mentoring_router, webhook_router, MentoringState};
