//! In-memory availability repository.

use std::sync::Mutex;

use async_trait::async_trait;

use crate::domain::foundation::{AvailabilityId, DomainError, ErrorCode, UserId};
use crate::domain::mentoring::AvailabilityWindow;
use crate::ports::AvailabilityRepository;

/// Mutex-guarded availability window store.
#[derive(Default)]
pub struct InMemoryAvailabilityRepository {
    windows: Mutex<Vec<AvailabilityWindow>>,
}

impl InMemoryAvailabilityRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AvailabilityRepository for InMemoryAvailabilityRepository {
    async fn save(&self, window: &AvailabilityWindow) -> Result<(), DomainError> {
        self.windows.lock().unwrap().push(window.clone());
        Ok(())
    }

    async fn update(&self, window: &AvailabilityWindow) -> Result<(), DomainError> {
        let mut windows = self.windows.lock().unwrap();
        match windows.iter_mut().find(|w| w.id == window.id) {
            Some(existing) => {
                *existing = window.clone();
                Ok(())
            }
            None => Err(DomainError::new(
                ErrorCode::AvailabilityNotFound,
                format!("Availability window not found: {}", window.id),
            )),
        }
    }

    async fn delete(&self, id: &AvailabilityId) -> Result<(), DomainError> {
        let mut windows = self.windows.lock().unwrap();
        let before = windows.len();
        windows.retain(|w| &w.id != id);
        if windows.len() == before {
            return Err(DomainError::new(
                ErrorCode::AvailabilityNotFound,
                format!("Availability window not found: {}", id),
            ));
        }
        Ok(())
    }

    async fn find_by_id(
        &self,
        id: &AvailabilityId,
    ) -> Result<Option<AvailabilityWindow>, DomainError> {
        Ok(self
            .windows
            .lock()
            .unwrap()
            .iter()
            .find(|w| &w.id == id)
            .cloned())
    }

    async fn find_active_by_mentor(
        &self,
        mentor_id: &UserId,
    ) -> Result<Vec<AvailabilityWindow>, DomainError> {
        Ok(self
            .windows
            .lock()
            .unwrap()
            .iter()
            .filter(|w| &w.mentor_id == mentor_id && w.is_active)
            .cloned()
            .collect())
    }
}
