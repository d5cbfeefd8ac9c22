//! Countdown arithmetic and lifecycle types.

const MILLIS_PER_DAY: i64 = 86_400_000;
const MILLIS_PER_HOUR: i64 = 3_600_000;
const MILLIS_PER_MINUTE: i64 = 60_000;
const MILLIS_PER_SECOND: i64 = 1_000;

/// Whole days/hours/minutes/seconds remaining until a target instant.
///
/// Decomposed from a millisecond distance by truncating division, with
/// calendar-day semantics: a day is a 24-hour block, never a month-aware
/// unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Remaining {
    pub days: i64,
    pub hours: i64,
    pub minutes: i64,
    pub seconds: i64,
}

impl Remaining {
    /// Decompose a millisecond distance. Negative distances clamp to zero.
    #[must_use]
    pub const fn from_millis(distance_ms: i64) -> Self {
        let d = if distance_ms > 0 { distance_ms } else { 0 };
        Self {
            days: d / MILLIS_PER_DAY,
            hours: (d % MILLIS_PER_DAY) / MILLIS_PER_HOUR,
            minutes: (d % MILLIS_PER_HOUR) / MILLIS_PER_MINUTE,
            seconds: (d % MILLIS_PER_MINUTE) / MILLIS_PER_SECOND,
        }
    }
}

impl std::fmt::Display for Remaining {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}d {}h {}m {}s",
            self.days, self.hours, self.minutes, self.seconds
        )
    }
}

/// Countdown lifecycle: `Resolving -> Ticking -> Reached`.
///
/// `Reached` is terminal; once entered, the displayed state never reverts
/// to a numeric countdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CountdownPhase {
    #[default]
    Resolving,
    Ticking,
    Reached,
}

/// Where the countdown's reference instant came from.
///
/// `Local` is the recovery path when the remote time source fails; the
/// distinction is observable for logging but never surfaced to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeOrigin {
    Remote,
    Local,
}
