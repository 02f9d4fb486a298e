//! ListAvailableSlotsHandler - Query handler for a mentor's bookable slots.

use std::sync::Arc;

use chrono::NaiveDate;

use crate::domain::foundation::{Timestamp, UserId};
use crate::domain::mentoring::{MentoringError, TimeOfDay, SLOT_INCREMENT_MINUTES};
use crate::ports::AvailabilityRepository;

use super::SlotConflictResolver;

/// Query for a mentor's available slots on a calendar date.
#[derive(Debug, Clone)]
pub struct ListAvailableSlotsQuery {
    pub mentor_id: UserId,
    pub date: NaiveDate,
}

/// One enumerated slot with its availability flag.
#[derive(Debug, Clone, PartialEq)]
pub struct SlotEntry {
    pub start_time: TimeOfDay,
    pub is_available: bool,
}

/// Result of slot enumeration.
#[derive(Debug, Clone)]
pub struct ListAvailableSlotsResult {
    pub date: NaiveDate,
    pub slots: Vec<SlotEntry>,
}

/// Handler enumerating fixed-increment slots across a mentor's active
/// windows for a date, flagging each against existing bookings.
pub struct ListAvailableSlotsHandler {
    availability_repository: Arc<dyn AvailabilityRepository>,
    resolver: Arc<SlotConflictResolver>,
}

impl ListAvailableSlotsHandler {
    pub fn new(
        availability_repository: Arc<dyn AvailabilityRepository>,
        resolver: Arc<SlotConflictResolver>,
    ) -> Self {
        Self {
            availability_repository,
            resolver,
        }
    }

    pub async fn handle(
        &self,
        query: ListAvailableSlotsQuery,
    ) -> Result<ListAvailableSlotsResult, MentoringError> {
        // 1. Active windows whose weekday matches the date
        let windows = self
            .availability_repository
            .find_active_by_mentor(&query.mentor_id)
            .await?;

        // 2. Enumerate fixed-increment slot starts, deduplicated across
        //    overlapping windows
        let mut starts: Vec<TimeOfDay> = windows
            .iter()
            .filter(|w| w.matches_date(query.date))
            .flat_map(|w| w.slot_starts())
            .collect();
        starts.sort();
        starts.dedup();

        // 3. Flag each slot against existing bookings
        let mut slots = Vec::with_capacity(starts.len());
        for start_time in starts {
            let start = Timestamp::from_datetime(
                query.date.and_time(start_time.to_naive()).and_utc(),
            );
            let is_available = self
                .resolver
                .is_slot_available(&query.mentor_id, &start, SLOT_INCREMENT_MINUTES as u32)
                .await?;
            slots.push(SlotEntry {
                start_time,
                is_available,
            });
        }

        Ok(ListAvailableSlotsResult {
            date: query.date,
            slots,
        })
    }
}
