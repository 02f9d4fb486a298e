//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! ## Repository Ports
//!
//! - `AvailabilityRepository` - Mentor availability windows
//! - `MentorProfileRepository` - Mentor profiles and aggregates
//! - `SessionRepository` - Sessions, conflict-checked booking, payment confirmation
//! - `ReviewRepository` - Session reviews
//!
//! ## External Service Ports
//!
//! - `PaymentProvider` - Checkout creation, verification, webhook parsing

mod availability_repository;
mod mentor_profile_repository;
mod payment_provider;
mod review_repository;
mod session_repository;

pub use availability_repository::AvailabilityRepository;
pub use mentor_profile_repository::MentorProfileRepository;
pub use payment_provider::{
    CheckoutPaymentStatus, CheckoutSession, CreateCheckoutRequest, PaymentError, PaymentErrorCode,
    PaymentProvider, ProviderCheckout, WebhookEvent, WebhookEventData, WebhookEventType,
};
pub use review_repository::ReviewRepository;
pub use session_repository::{ConfirmOutcome, SessionRepository};
