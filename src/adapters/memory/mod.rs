//! In-memory repository adapters.
//!
//! Mutex-guarded implementations of the repository ports, mirroring the
//! transactional semantics of the postgres adapters: booking re-checks
//! overlap under the lock, and payment confirmation credits the mentor
//! atomically with the status move. Used by tests and local development.

mod availability_repository;
mod mentor_profile_repository;
mod review_repository;
mod session_repository;

pub use availability_repository::InMemoryAvailabilityRepository;
pub use mentor_profile_repository::InMemoryMentorProfileRepository;
pub use review_repository::InMemoryReviewRepository;
pub use session_repository::InMemorySessionRepository;
