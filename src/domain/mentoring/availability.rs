//! Mentor availability window aggregate.

use chrono::{DateTime, Datelike, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::foundation::{AvailabilityId, Timestamp, UserId, ValidationError};

use super::TimeOfDay;

/// Bookable slots are enumerated on fixed increments from the window
/// start. Kept at one hour for compatibility with existing clients.
pub const SLOT_INCREMENT_MINUTES: u16 = 60;

/// Weekly recurring availability window for a mentor.
///
/// `day_of_week` uses 0 = Monday .. 6 = Sunday. Windows of the same
/// mentor may overlap each other; each is checked independently when
/// resolving slots.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AvailabilityWindow {
    pub id: AvailabilityId,
    pub mentor_id: UserId,
    pub day_of_week: u8,
    pub start_time: TimeOfDay,
    pub end_time: TimeOfDay,
    pub is_active: bool,
    pub created_at: Timestamp,
}

impl AvailabilityWindow {
    /// Creates a new active window, validating the day and time range.
    pub fn new(
        id: AvailabilityId,
        mentor_id: UserId,
        day_of_week: u8,
        start_time: TimeOfDay,
        end_time: TimeOfDay,
    ) -> Result<Self, ValidationError> {
        if day_of_week > 6 {
            return Err(ValidationError::out_of_range(
                "day_of_week",
                0,
                6,
                day_of_week as i32,
            ));
        }
        if start_time >= end_time {
            return Err(ValidationError::invalid_format(
                "start_time",
                format!("start {} must be before end {}", start_time, end_time),
            ));
        }
        Ok(Self {
            id,
            mentor_id,
            day_of_week,
            start_time,
            end_time,
            is_active: true,
            created_at: Timestamp::now(),
        })
    }

    /// Checks whether the window's weekday matches a calendar date.
    pub fn matches_date(&self, date: NaiveDate) -> bool {
        date.weekday().num_days_from_monday() as u8 == self.day_of_week
    }

    /// Checks whether a session starting at `start` (UTC) for
    /// `duration_minutes` fits inside this window.
    ///
    /// The fit is tested on wall-clock time of day: the session end is
    /// taken as the time component of `start + duration`, so a session
    /// crossing midnight wraps and fails the check.
    pub fn covers(&self, start: &DateTime<Utc>, duration_minutes: u32) -> bool {
        if !self.is_active {
            return false;
        }
        if start.weekday().num_days_from_monday() as u8 != self.day_of_week {
            return false;
        }
        let start_tod = TimeOfDay::from_naive(start.time());
        let end_tod =
            TimeOfDay::from_naive((*start + Duration::minutes(duration_minutes as i64)).time());
        start_tod >= self.start_time && end_tod <= self.end_time
    }

    /// Enumerates slot start times on fixed increments, keeping only
    /// slots that end at or before the window end.
    pub fn slot_starts(&self) -> Vec<TimeOfDay> {
        let mut slots = Vec::new();
        let end = self.end_time.minutes_from_midnight();
        let mut t = self.start_time.minutes_from_midnight();
        while t + SLOT_INCREMENT_MINUTES <= end {
            if let Ok(slot) = TimeOfDay::from_minutes(t) {
                slots.push(slot);
            }
            t += SLOT_INCREMENT_MINUTES;
        }
        slots
    }
}
