//! Stripe adapter for payment processing.
//!
//! Implements the `PaymentProvider` port against the Stripe Checkout
//! API, plus webhook signature verification and a mock provider for
//! tests.

pub mod mock_payment_provider;
pub mod stripe_adapter;
pub mod webhook_types;

pub use mock_payment_provider::{
    completed_checkout_event, paid_checkout, MockPaymentProvider, RecordedCall,
};
pub use stripe_adapter::{StripeConfig, StripePaymentAdapter};
pub use webhook_types::{SignatureHeader, StripeCheckoutSession, StripeWebhookEvent};
