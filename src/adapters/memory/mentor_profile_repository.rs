//! In-memory mentor profile repository.

use std::sync::Mutex;

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, ErrorCode, Money, UserId};
use crate::domain::mentoring::MentorProfile;
use crate::ports::MentorProfileRepository;

/// Mutex-guarded mentor profile store.
#[derive(Default)]
pub struct InMemoryMentorProfileRepository {
    profiles: Mutex<Vec<MentorProfile>>,
}

impl InMemoryMentorProfileRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Credit a confirmed payment against the mentor's aggregates.
    ///
    /// Called by `InMemorySessionRepository::confirm_payment` under its
    /// own lock, mirroring the single postgres transaction.
    pub(crate) fn credit(&self, mentor_id: &UserId, price: Money) {
        let mut profiles = self.profiles.lock().unwrap();
        if let Some(profile) = profiles.iter_mut().find(|p| &p.user_id == mentor_id) {
            profile.credit_session(price);
        }
    }
}

#[async_trait]
impl MentorProfileRepository for InMemoryMentorProfileRepository {
    async fn save(&self, profile: &MentorProfile) -> Result<(), DomainError> {
        let mut profiles = self.profiles.lock().unwrap();
        if profiles.iter().any(|p| p.user_id == profile.user_id) {
            return Err(DomainError::validation(
                "user_id",
                "User already has a mentor profile",
            ));
        }
        profiles.push(profile.clone());
        Ok(())
    }

    async fn update(&self, profile: &MentorProfile) -> Result<(), DomainError> {
        let mut profiles = self.profiles.lock().unwrap();
        match profiles.iter_mut().find(|p| p.user_id == profile.user_id) {
            Some(existing) => {
                *existing = profile.clone();
                Ok(())
            }
            None => Err(DomainError::new(
                ErrorCode::ProfileNotFound,
                format!("No mentor profile found for user: {}", profile.user_id),
            )),
        }
    }

    async fn find_by_user_id(
        &self,
        user_id: &UserId,
    ) -> Result<Option<MentorProfile>, DomainError> {
        Ok(self
            .profiles
            .lock()
            .unwrap()
            .iter()
            .find(|p| &p.user_id == user_id)
            .cloned())
    }

    async fn set_average_rating(
        &self,
        mentor_id: &UserId,
        average_rating: f64,
    ) -> Result<(), DomainError> {
        let mut profiles = self.profiles.lock().unwrap();
        match profiles.iter_mut().find(|p| &p.user_id == mentor_id) {
            Some(profile) => {
                profile.apply_average_rating(average_rating);
                Ok(())
            }
            None => Err(DomainError::new(
                ErrorCode::ProfileNotFound,
                format!("No mentor profile found for user: {}", mentor_id),
            )),
        }
    }
}
