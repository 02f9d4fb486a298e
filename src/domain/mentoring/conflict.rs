//! Pure interval overlap predicate for slot conflict detection.

use crate::domain::foundation::Timestamp;

/// Half-open interval overlap: `[a_start, a_end)` intersects
/// `[b_start, b_end)`.
///
/// Back-to-back intervals (one ends exactly when the other starts) do
/// not overlap.
pub fn intervals_overlap(
    a_start: &Timestamp,
    a_end: &Timestamp,
    b_start: &Timestamp,
    b_end: &Timestamp,
) -> bool {
    a_start < b_end && a_end > b_start
}
