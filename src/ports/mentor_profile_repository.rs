//! Mentor profile repository port.

use crate::domain::foundation::{DomainError, UserId};
use crate::domain::mentoring::MentorProfile;
use async_trait::async_trait;

/// Repository port for mentor profiles.
///
/// Implementations must enforce the one-profile-per-user constraint.
/// Earnings and session counts are credited by
/// `SessionRepository::confirm_payment` inside the confirmation
/// transaction, never through this port.
#[async_trait]
pub trait MentorProfileRepository: Send + Sync {
    /// Save a new profile.
    ///
    /// # Errors
    ///
    /// - `ValidationFailed` if the user already has a profile
    /// - `DatabaseError` on persistence failure
    async fn save(&self, profile: &MentorProfile) -> Result<(), DomainError>;

    /// Update an existing profile's editable fields and timestamps.
    ///
    /// # Errors
    ///
    /// - `ProfileNotFound` if the profile doesn't exist
    /// - `DatabaseError` on persistence failure
    async fn update(&self, profile: &MentorProfile) -> Result<(), DomainError>;

    /// Find a profile by the mentor's user ID.
    ///
    /// Returns `None` if the user has no profile.
    async fn find_by_user_id(&self, user_id: &UserId)
        -> Result<Option<MentorProfile>, DomainError>;

    /// Replace the stored average rating for a mentor.
    ///
    /// # Errors
    ///
    /// - `ProfileNotFound` if the profile doesn't exist
    /// - `DatabaseError` on persistence failure
    async fn set_average_rating(
        &self,
        mentor_id: &UserId,
        average_rating: f64,
    ) -> Result<(), DomainError>;
}
