use time::{Date, OffsetDateTime};

/// Returns whether the cell for `date` may be interacted with at the instant
/// `at`.
///
/// The reference instant is truncated to its calendar day, so a day unlocks
/// exactly at its own local midnight and remains unlocked from then on.
/// Strictly future days are locked.
pub(crate) fn is_available(date: Date, at: OffsetDateTime) -> bool {
    date <= at.date()
}
