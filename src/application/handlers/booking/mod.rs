//! Booking handlers.
//!
//! ## Commands
//! - Booking a session against a mentor's availability
//! - Creating the provider checkout for a pending booking

mod book_session;
mod create_session_checkout;

pub use book_session::{BookSessionCommand, BookSessionHandler, BookSessionResult};
pub use create_session_checkout::{
    CreateSessionCheckoutCommand, CreateSessionCheckoutHandler, CreateSessionCheckoutResult,
};
