//! Wall-clock time of day value object.

use chrono::{NaiveTime, Timelike};
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

use crate::domain::foundation::ValidationError;

/// Minute-precision wall-clock time, stored as minutes since midnight.
///
/// Availability windows are expressed in this type ("HH:MM" on the wire);
/// seconds never participate in scheduling decisions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimeOfDay(u16);

impl TimeOfDay {
    /// Creates a time of day from hours and minutes.
    pub fn from_hm(hour: u8, minute: u8) -> Result<Self, ValidationError> {
        if hour > 23 {
            return Err(ValidationError::out_of_range("hour", 0, 23, hour as i32));
        }
        if minute > 59 {
            return Err(ValidationError::out_of_range("minute", 0, 59, minute as i32));
        }
        Ok(Self(hour as u16 * 60 + minute as u16))
    }

    /// Parses an "HH:MM" string.
    pub fn parse(s: &str) -> Result<Self, ValidationError> {
        let invalid = || {
            ValidationError::invalid_format("time", format!("expected HH:MM, got '{}'", s))
        };
        let (h, m) = s.split_once(':').ok_or_else(invalid)?;
        if h.len() != 2 || m.len() != 2 {
            return Err(invalid());
        }
        let hour: u8 = h.parse().map_err(|_| invalid())?;
        let minute: u8 = m.parse().map_err(|_| invalid())?;
        Self::from_hm(hour, minute)
    }

    /// Creates a time of day from minutes since midnight.
    pub fn from_minutes(minutes: u16) -> Result<Self, ValidationError> {
        if minutes >= 24 * 60 {
            return Err(ValidationError::out_of_range(
                "minutes_from_midnight",
                0,
                24 * 60 - 1,
                minutes as i32,
            ));
        }
        Ok(Self(minutes))
    }

    /// Creates a time of day from a chrono NaiveTime, discarding seconds.
    pub fn from_naive(time: NaiveTime) -> Self {
        Self((time.hour() * 60 + time.minute()) as u16)
    }

    /// Returns minutes since midnight.
    pub fn minutes_from_midnight(&self) -> u16 {
        self.0
    }

    /// Hour component.
    pub fn hour(&self) -> u8 {
        (self.0 / 60) as u8
    }

    /// Minute component.
    pub fn minute(&self) -> u8 {
        (self.0 % 60) as u8
    }

    /// Converts to a chrono NaiveTime at second zero.
    pub fn to_naive(&self) -> NaiveTime {
        NaiveTime::from_hms_opt(self.hour() as u32, self.minute() as u32, 0)
            .unwrap_or(NaiveTime::MIN)
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

impl Serialize for TimeOfDay {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for TimeOfDay {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct TimeOfDayVisitor;

        impl Visitor<'_> for TimeOfDayVisitor {
            type Value = TimeOfDay;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a time string in HH:MM format")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<TimeOfDay, E> {
                TimeOfDay::parse(v).map_err(|e| E::custom(e.to_string()))
            }
        }

        deserializer.deserialize_str(TimeOfDayVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_valid_times() {
        assert_eq!(TimeOfDay::parse("09:00").unwrap().minutes_from_midnight(), 540);
        assert_eq!(TimeOfDay::parse("00:00").unwrap().minutes_from_midnight(), 0);
        assert_eq!(TimeOfDay::parse("23:59").unwrap().minutes_from_midnight(), 1439);
    }

    #[test]
    fn rejects_malformed_times() {
        assert!(TimeOfDay::parse("9:00").is_err());
        assert!(TimeOfDay::parse("24:00").is_err());
        assert!(TimeOfDay::parse("12:60").is_err());
        assert!(TimeOfDay::parse("noon").is_err());
    }

    #[test]
    fn displays_zero_padded() {
        assert_eq!(TimeOfDay::from_hm(9, 5).unwrap().to_string(), "09:05");
    }

    #[test]
    fn orders_chronologically() {
        let morning = TimeOfDay::parse("09:00").unwrap();
        let evening = TimeOfDay::parse("17:00").unwrap();
        assert!(morning < evening);
    }

    #[test]
    fn from_naive_discards_seconds() {
        let t = NaiveTime::from_hms_opt(10, 30, 45).unwrap();
        assert_eq!(TimeOfDay::from_naive(t), TimeOfDay::from_hm(10, 30).unwrap());
    }

    #[test]
    fn serde_roundtrips_as_string() {
        let t = TimeOfDay::parse("14:30").unwrap();
        let json = serde_json::to_string(&t).unwrap();
        assert_eq!(json, "\"14:30\"");
        let back: TimeOfDay = serde_json::from_str(&json).unwrap();
        assert_eq!(back, t);
    }
}
