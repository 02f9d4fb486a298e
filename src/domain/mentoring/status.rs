//! Session status state machine.
//!
//! Defines all states a mentoring session moves through and the valid
//! transitions between them. Confirmation is reserved to payment
//! reconciliation; the lifecycle API never sets Confirmed directly.

use crate::domain::foundation::{StateMachine, ValidationError};
use serde::{Deserialize, Serialize};

/// Mentoring session status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    /// Booked, payment not yet confirmed. Occupies the slot.
    Pending,

    /// Payment confirmed. Occupies the slot.
    Confirmed,

    /// Cancelled before or after confirmation. Terminal.
    Cancelled,

    /// Session took place. Terminal; unlocks reviews.
    Completed,

    /// Student did not attend. Terminal.
    NoShow,
}

impl SessionStatus {
    /// Returns true if the session still occupies its time slot.
    ///
    /// Only Pending and Confirmed sessions count against a mentor's
    /// availability.
    pub fn occupies_slot(&self) -> bool {
        matches!(self, SessionStatus::Pending | SessionStatus::Confirmed)
    }

    /// Returns the wire/storage representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionStatus::Pending => "pending",
            SessionStatus::Confirmed => "confirmed",
            SessionStatus::Cancelled => "cancelled",
            SessionStatus::Completed => "completed",
            SessionStatus::NoShow => "no_show",
        }
    }

    /// Parses the wire/storage representation.
    pub fn parse(s: &str) -> Result<Self, ValidationError> {
        match s {
            "pending" => Ok(SessionStatus::Pending),
            "confirmed" => Ok(SessionStatus::Confirmed),
            "cancelled" => Ok(SessionStatus::Cancelled),
            "completed" => Ok(SessionStatus::Completed),
            "no_show" => Ok(SessionStatus::NoShow),
            other => Err(ValidationError::invalid_format(
                "status",
                format!("unknown session status '{}'", other),
            )),
        }
    }
}

impl StateMachine for SessionStatus {
    fn can_transition_to(&self, target: &Self) -> bool {
        use SessionStatus::*;
        matches!(
            (self, target),
            // From PENDING
            (Pending, Confirmed)
                | (Pending, Cancelled)
            // From CONFIRMED
                | (Confirmed, Completed)
                | (Confirmed, Cancelled)
                | (Confirmed, NoShow)
        )
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use SessionStatus::*;
        match self {
            Pending => vec![Confirmed, Cancelled],
            Confirmed => vec![Completed, Cancelled, NoShow],
            Cancelled | Completed | NoShow => vec![],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pending_can_confirm_or_cancel() {
        assert!(SessionStatus::Pending.can_transition_to(&SessionStatus::Confirmed));
        assert!(SessionStatus::Pending.can_transition_to(&SessionStatus::Cancelled));
        assert!(!SessionStatus::Pending.can_transition_to(&SessionStatus::Completed));
        assert!(!SessionStatus::Pending.can_transition_to(&SessionStatus::NoShow));
    }

    #[test]
    fn confirmed_can_complete_cancel_or_no_show() {
        assert!(SessionStatus::Confirmed.can_transition_to(&SessionStatus::Completed));
        assert!(SessionStatus::Confirmed.can_transition_to(&SessionStatus::Cancelled));
        assert!(SessionStatus::Confirmed.can_transition_to(&SessionStatus::NoShow));
        assert!(!SessionStatus::Confirmed.can_transition_to(&SessionStatus::Pending));
    }

    #[test]
    fn terminal_states_have_no_transitions() {
        assert!(SessionStatus::Cancelled.is_terminal());
        assert!(SessionStatus::Completed.is_terminal());
        assert!(SessionStatus::NoShow.is_terminal());
    }

    #[test]
    fn only_pending_and_confirmed_occupy_slots() {
        assert!(SessionStatus::Pending.occupies_slot());
        assert!(SessionStatus::Confirmed.occupies_slot());
        assert!(!SessionStatus::Cancelled.occupies_slot());
        assert!(!SessionStatus::Completed.occupies_slot());
        assert!(!SessionStatus::NoShow.occupies_slot());
    }

    #[test]
    fn parse_roundtrips_as_str() {
        for status in [
            SessionStatus::Pending,
            SessionStatus::Confirmed,
            SessionStatus::Cancelled,
            SessionStatus::Completed,
            SessionStatus::NoShow,
        ] {
            assert_eq!(SessionStatus::parse(status.as_str()), Ok(status));
        }
        assert!(SessionStatus::parse("archived").is_err());
    }
}
