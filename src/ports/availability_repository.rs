//! Availability repository port.

use crate::domain::foundation::{AvailabilityId, DomainError, UserId};
use crate::domain::mentoring::AvailabilityWindow;
use async_trait::async_trait;

/// Repository port for mentor availability windows.
#[async_trait]
pub trait AvailabilityRepository: Send + Sync {
    /// Save a new availability window.
    ///
    /// # Errors
    ///
    /// - `DatabaseError` on persistence failure
    async fn save(&self, window: &AvailabilityWindow) -> Result<(), DomainError>;

    /// Update an existing availability window.
    ///
    /// # Errors
    ///
    /// - `AvailabilityNotFound` if the window doesn't exist
    /// - `DatabaseError` on persistence failure
    async fn update(&self, window: &AvailabilityWindow) -> Result<(), DomainError>;

    /// Delete an availability window.
    ///
    /// # Errors
    ///
    /// - `AvailabilityNotFound` if the window doesn't exist
    /// - `DatabaseError` on persistence failure
    async fn delete(&self, id: &AvailabilityId) -> Result<(), DomainError>;

    /// Find a window by its ID.
    ///
    /// Returns `None` if not found.
    async fn find_by_id(&self, id: &AvailabilityId)
        -> Result<Option<AvailabilityWindow>, DomainError>;

    /// All active windows of a mentor, across all weekdays.
    async fn find_active_by_mentor(
        &self,
        mentor_id: &UserId,
    ) -> Result<Vec<AvailabilityWindow>, DomainError>;
}
