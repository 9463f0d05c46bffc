//! Timestamps

use jiff::{SignedDuration, Timestamp};

/// Current time truncated to microseconds.
///
/// Both order stores hold timestamps at microsecond precision, so every
/// timestamp the application stamps is cut down to that before it is stored.
#[must_use]
pub fn now() -> Timestamp {
    let now = Timestamp::now();

    Timestamp::from_microsecond(now.as_microsecond()).unwrap_or(now)
}

/// Returns `at` when it lies strictly after `previous`, otherwise the
/// smallest representable instant after `previous`.
#[must_use]
pub fn advance(previous: Timestamp, at: Timestamp) -> Timestamp {
    if at > previous {
        return at;
    }

    previous
        .checked_add(SignedDuration::from_micros(1))
        .unwrap_or(previous)
}
