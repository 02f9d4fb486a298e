//! Mentor profile aggregate.
//!
//! One profile per mentor user. Earnings and session counts move only
//! when a payment is confirmed; the average rating moves only when a
//! student reviews a completed session. Rate changes never touch the
//! price of already-booked sessions.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{Money, Timestamp, UserId, ValidationError};

/// Mentor profile with pricing, capacity, and aggregate stats.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MentorProfile {
    /// Mentor user. Unique per profile.
    pub user_id: UserId,

    pub bio: Option<String>,

    pub expertise_areas: Vec<String>,

    /// Hourly rate in cents. Always positive.
    pub hourly_rate: Money,

    pub years_experience: u32,

    /// Shortest bookable session, minutes.
    pub min_session_duration: u32,

    /// Longest bookable session, minutes.
    pub max_session_duration: u32,

    /// Gate for new bookings. Existing sessions are unaffected.
    pub is_accepting_sessions: bool,

    /// Count of paid sessions. Moves only on payment confirmation.
    pub total_sessions: u32,

    /// Mean of student ratings, rounded to two decimals. 0.0 until the
    /// first review.
    pub average_rating: f64,

    /// Lifetime confirmed earnings. Moves only on payment confirmation.
    pub total_earnings: Money,

    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl MentorProfile {
    /// Creates a new profile accepting sessions with zeroed aggregates.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        user_id: UserId,
        bio: Option<String>,
        expertise_areas: Vec<String>,
        hourly_rate: Money,
        years_experience: u32,
        min_session_duration: u32,
        max_session_duration: u32,
    ) -> Result<Self, ValidationError> {
        if hourly_rate.cents() <= 0 {
            return Err(ValidationError::invalid_format(
                "hourly_rate",
                "hourly rate must be positive",
            ));
        }
        if min_session_duration == 0 {
            return Err(ValidationError::invalid_format(
                "min_session_duration",
                "minimum duration must be positive",
            ));
        }
        if min_session_duration > max_session_duration {
            return Err(ValidationError::invalid_format(
                "min_session_duration",
                format!(
                    "minimum duration {} exceeds maximum {}",
                    min_session_duration, max_session_duration
                ),
            ));
        }
        let now = Timestamp::now();
        Ok(Self {
            user_id,
            bio,
            expertise_areas,
            hourly_rate,
            years_experience,
            min_session_duration,
            max_session_duration,
            is_accepting_sessions: true,
            total_sessions: 0,
            average_rating: 0.0,
            total_earnings: Money::zero(),
            created_at: now,
            updated_at: now,
        })
    }

    /// Checks a requested duration against the profile's bounds.
    pub fn allows_duration(&self, minutes: u32) -> bool {
        minutes >= self.min_session_duration && minutes <= self.max_session_duration
    }

    /// Price of a session at the current rate, prorated to the minute
    /// with half-up cent rounding. Fixed on the session at booking time.
    pub fn session_price(&self, duration_minutes: u32) -> Money {
        self.hourly_rate.prorate_hourly(duration_minutes)
    }

    /// Records a confirmed payment against the mentor's aggregates.
    pub fn credit_session(&mut self, price: Money) {
        self.total_sessions += 1;
        self.total_earnings = self.total_earnings.plus(price);
        self.updated_at = Timestamp::now();
    }

    /// Replaces the average rating with a freshly computed mean.
    pub fn apply_average_rating(&mut self, average: f64) {
        self.average_rating = average;
        self.updated_at = Timestamp::now();
    }
}

/// Arithmetic mean of ratings rounded to two decimals, 0.0 when empty.
pub fn average_rating(ratings: &[u8]) -> f64 {
    if ratings.is_empty() {
        return 0.0;
    }
    let sum: u32 = ratings.iter().map(|r| *r as u32).sum();
    let mean = sum as f64 / ratings.len() as f64;
    (mean * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(rate_cents: i64) -> MentorProfile {
        MentorProfile::new(
            UserId::new("mentor-1").unwrap(),
            Some("Systems programming mentor".to_string()),
            vec!["rust".to_string(), "databases".to_string()],
            Money::from_cents(rate_cents).unwrap(),
            8,
            30,
            120,
        )
        .unwrap()
    }

    #[test]
    fn new_profile_starts_accepting_with_zero_aggregates() {
        let p = profile(10000);
        assert!(p.is_accepting_sessions);
        assert_eq!(p.total_sessions, 0);
        assert_eq!(p.total_earnings, Money::zero());
        assert_eq!(p.average_rating, 0.0);
    }

    #[test]
    fn rejects_zero_rate() {
        let result = MentorProfile::new(
            UserId::new("mentor-1").unwrap(),
            None,
            vec![],
            Money::zero(),
            1,
            30,
            60,
        );
        assert!(result.is_err());
    }

    #[test]
    fn rejects_inverted_duration_bounds() {
        let result = MentorProfile::new(
            UserId::new("mentor-1").unwrap(),
            None,
            vec![],
            Money::from_cents(5000).unwrap(),
            1,
            120,
            60,
        );
        assert!(result.is_err());
    }

    #[test]
    fn allows_duration_is_inclusive() {
        let p = profile(10000);
        assert!(p.allows_duration(30));
        assert!(p.allows_duration(120));
        assert!(!p.allows_duration(29));
        assert!(!p.allows_duration(121));
    }

    #[test]
    fn session_price_prorates_hourly_rate() {
        let p = profile(10000);
        assert_eq!(p.session_price(60).cents(), 10000);
        assert_eq!(p.session_price(90).cents(), 15000);
        assert_eq!(p.session_price(45).cents(), 7500);
    }

    #[test]
    fn credit_session_moves_both_aggregates() {
        let mut p = profile(10000);
        p.credit_session(Money::from_cents(10000).unwrap());
        p.credit_session(Money::from_cents(5000).unwrap());
        assert_eq!(p.total_sessions, 2);
        assert_eq!(p.total_earnings.cents(), 15000);
    }

    #[test]
    fn average_rating_rounds_to_two_decimals() {
        assert_eq!(average_rating(&[]), 0.0);
        assert_eq!(average_rating(&[5]), 5.0);
        assert_eq!(average_rating(&[4, 5]), 4.5);
        assert_eq!(average_rating(&[3, 4, 5]), 4.0);
        assert_eq!(average_rating(&[5, 5, 4]), 4.67);
    }
}
