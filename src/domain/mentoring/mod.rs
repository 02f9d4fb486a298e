//! Mentoring domain module.
//!
//! Booking, availability, payment confirmation, lifecycle, and reviews.
//!
//! # Module Structure
//!
//! - `availability` - Weekly recurring availability windows
//! - `profile` - Mentor profile aggregate with earnings/rating stats
//! - `session` - MentorSession aggregate
//! - `review` - SessionReview and rating value object
//! - `status` - SessionStatus state machine
//! - `payment_status` - PaymentStatus enum
//! - `time_of_day` - Wall-clock "HH:MM" value object
//! - `conflict` - Pure interval overlap predicate

mod availability;
mod conflict;
mod errors;
mod payment_status;
mod profile;
mod review;
mod session;
mod status;
mod time_of_day;

pub use availability::{AvailabilityWindow, SLOT_INCREMENT_MINUTES};
pub use conflict::intervals_overlap;
pub use errors::MentoringError;
pub use payment_status::PaymentStatus;
pub use profile::{average_rating, MentorProfile};
pub use review::{ReviewRating, SessionReview};
pub use session::MentorSession;
pub use status::SessionStatus;
pub use time_of_day::TimeOfDay;
