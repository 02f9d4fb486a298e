//! Session lifecycle handlers.
//!
//! ## Commands
//! - Moving sessions through the status state machine
//! - Reviewing completed sessions, with mentor rating recompute

mod create_review;
mod update_session_status;

pub use create_review::{CreateReviewCommand, CreateReviewHandler, CreateReviewResult};
pub use update_session_status::{
    UpdateSessionStatusCommand, UpdateSessionStatusHandler, UpdateSessionStatusResult,
};
