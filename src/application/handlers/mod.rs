//! Application handlers.
//!
//! Command and query handlers that orchestrate domain operations:
//!
//! - `scheduling` - Availability windows and slot resolution
//! - `profile` - Mentor profile management
//! - `booking` - Session booking and checkout creation
//! - `payment` - Payment confirmation, verification, and webhooks
//! - `lifecycle` - Session status transitions and reviews
//! - `sessions` - Session queries

pub mod booking;
pub mod lifecycle;
pub mod payment;
pub mod profile;
pub mod scheduling;
pub mod sessions;
