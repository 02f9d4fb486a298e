//! PostgreSQL adapters - Database implementations of the repository
//! ports.
//!
//! Booking and payment confirmation carry transactional semantics; see
//! `PostgresSessionRepository` for the locking strategy.

mod availability_repository;
mod mentor_profile_repository;
mod review_repository;
mod session_repository;

pub use availability_repository::PostgresAvailabilityRepository;
pub use mentor_profile_repository::PostgresMentorProfileRepository;
pub use review_repository::PostgresReviewRepository;
pub use session_repository::PostgresSessionRepository;
