//! Payment reconciliation handlers.
//!
//! Payment confirmation arrives on two independent paths that converge
//! on `SessionRepository::confirm_payment`:
//!
//! - push: the provider webhook (`HandlePaymentWebhookHandler`)
//! - pull: client-driven verification (`VerifySessionPaymentHandler`)
//!
//! Both are safe to race and to repeat; the repository guarantees a
//! session is confirmed and the mentor credited exactly once.

mod confirm_session_payment;
mod handle_payment_webhook;
mod verify_session_payment;

pub use confirm_session_payment::{
    ConfirmSessionPaymentCommand, ConfirmSessionPaymentHandler, ConfirmSessionPaymentResult,
};
pub use handle_payment_webhook::{
    HandlePaymentWebhookCommand, HandlePaymentWebhookHandler, HandlePaymentWebhookResult,
};
pub use verify_session_payment::{
    VerifyPaymentOutcome, VerifySessionPaymentHandler, VerifySessionPaymentQuery,
    VerifySessionPaymentResult,
};
