//! The release countdown: `Resolving -> Ticking -> Reached`.
//!
//! The reference instant is obtained once at startup (remote time source
//! with local fallback, see `vitrine-clock`) and never re-synchronized.
//! Each tick advances the local copy of "now" by exactly one second and
//! recomputes the distance to the fixed target; long-running sessions may
//! drift by the platform's cumulative scheduling jitter, which is an
//! accepted trade-off.

use std::time::Duration;

use chrono::{DateTime, TimeDelta, Utc};

use vitrine_clock::ReferenceInstant;
use vitrine_types::{CountdownPhase, Remaining};

use crate::host::CountdownDisplay;

const TICK_PERIOD: Duration = Duration::from_secs(1);

/// Result of one countdown tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tick {
    /// Still counting; show this value.
    Remaining(Remaining),
    /// Target reached. Terminal: every later tick reports `Reached` too.
    Reached,
}

/// The ticking countdown state.
///
/// `current` advances by exactly one second per tick and is never
/// re-queried from the wall clock.
#[derive(Debug, Clone, Copy)]
pub struct CountdownState {
    target: DateTime<Utc>,
    current: DateTime<Utc>,
    phase: CountdownPhase,
}

impl CountdownState {
    /// Enter `Ticking` from a resolved reference instant.
    #[must_use]
    pub fn begin(target: DateTime<Utc>, reference: DateTime<Utc>) -> Self {
        Self {
            target,
            current: reference,
            phase: CountdownPhase::Ticking,
        }
    }

    #[must_use]
    pub fn phase(&self) -> CountdownPhase {
        self.phase
    }

    /// Advance one tick: compute the remaining distance, then move the
    /// local instant forward by one second.
    pub fn tick(&mut self) -> Tick {
        if self.phase == CountdownPhase::Reached {
            return Tick::Reached;
        }

        let distance_ms = (self.target - self.current).num_milliseconds();
        if distance_ms <= 0 {
            self.phase = CountdownPhase::Reached;
            return Tick::Reached;
        }

        self.current += TimeDelta::seconds(1);
        Tick::Remaining(Remaining::from_millis(distance_ms))
    }
}

/// Drives the countdown display from page load to target-reached.
///
/// Runs independently of the card list; owns its display exclusively.
#[derive(Debug, Clone)]
pub struct CountdownService {
    target: DateTime<Utc>,
    time_endpoint: String,
}

impl CountdownService {
    #[must_use]
    pub fn new(target: DateTime<Utc>, time_endpoint: impl Into<String>) -> Self {
        Self {
            target,
            time_endpoint: time_endpoint.into(),
        }
    }

    /// Resolve the reference instant, then tick once per second until the
    /// target is reached.
    ///
    /// The resolution await is the `Resolving` phase; a failing time
    /// service only delays the first tick, it never breaks the countdown.
    pub async fn run<D: CountdownDisplay>(self, display: &mut D) {
        let reference = vitrine_clock::resolve_reference(&self.time_endpoint).await;
        tracing::info!(
            origin = ?reference.origin,
            target = %self.target,
            "Countdown reference resolved"
        );
        self.run_from(reference, display).await;
    }

    /// Tick against an already-resolved reference.
    pub async fn run_from<D: CountdownDisplay>(self, reference: ReferenceInstant, display: &mut D) {
        let mut state = CountdownState::begin(self.target, reference.instant);

        // First tick fires one full period after start, like the host's
        // repeating timer.
        let start = tokio::time::Instant::now() + TICK_PERIOD;
        let mut ticks = tokio::time::interval_at(start, TICK_PERIOD);

        loop {
            ticks.tick().await;
            match state.tick() {
                Tick::Remaining(remaining) => display.show_remaining(remaining),
                Tick::Reached => {
                    // Dropping the interval cancels the periodic tick
                    // permanently; the display never reverts.
                    display.show_reached();
                    return;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use vitrine_types::TimeOrigin;

    fn utc(h: u32, m: u32, s: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 1, 1, h, m, s).unwrap()
    }

    #[derive(Debug, Default)]
    struct RecordingDisplay {
        shown: Vec<Remaining>,
        reached: usize,
    }

    impl CountdownDisplay for RecordingDisplay {
        fn show_remaining(&mut self, remaining: Remaining) {
            self.shown.push(remaining);
        }

        fn show_reached(&mut self) {
            self.reached += 1;
        }
    }

    #[test]
    fn ticks_count_down_by_exactly_one_second() {
        let mut state = CountdownState::begin(utc(12, 0, 0), utc(11, 59, 57));

        assert_eq!(
            state.tick(),
            Tick::Remaining(Remaining::from_millis(3_000))
        );
        assert_eq!(
            state.tick(),
            Tick::Remaining(Remaining::from_millis(2_000))
        );
        assert_eq!(
            state.tick(),
            Tick::Remaining(Remaining::from_millis(1_000))
        );
        assert_eq!(state.tick(), Tick::Reached);
        assert_eq!(state.phase(), CountdownPhase::Reached);
    }

    #[test]
    fn reached_is_terminal() {
        let mut state = CountdownState::begin(utc(12, 0, 0), utc(12, 0, 0));
        assert_eq!(state.tick(), Tick::Reached);

        // Further ticks never revert to a numeric countdown.
        assert_eq!(state.tick(), Tick::Reached);
        assert_eq!(state.tick(), Tick::Reached);
    }

    #[test]
    fn target_in_the_past_reaches_on_first_tick() {
        let mut state = CountdownState::begin(utc(12, 0, 0), utc(13, 0, 0));
        assert_eq!(state.tick(), Tick::Reached);
    }

    #[tokio::test(start_paused = true)]
    async fn driver_ticks_then_reaches() {
        let reference = ReferenceInstant {
            instant: utc(11, 59, 57),
            origin: TimeOrigin::Remote,
        };
        let service = CountdownService::new(utc(12, 0, 0), "http://unused.invalid");
        let mut display = RecordingDisplay::default();

        service.run_from(reference, &mut display).await;

        assert_eq!(
            display.shown,
            vec![
                Remaining::from_millis(3_000),
                Remaining::from_millis(2_000),
                Remaining::from_millis(1_000),
            ]
        );
        assert_eq!(display.reached, 1);
    }

    #[tokio::test]
    async fn failing_time_service_still_reaches_a_past_target() {
        // Nothing answers here; resolution falls back to the local clock,
        // which is already past the target.
        let service = CountdownService::new(
            Utc.with_ymd_and_hms(2020, 1, 1, 12, 0, 0).unwrap(),
            "http://127.0.0.1:9/time",
        );
        let mut display = RecordingDisplay::default();

        service.run(&mut display).await;

        assert!(display.shown.is_empty());
        assert_eq!(display.reached, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn driver_with_passed_target_only_shows_reached() {
        let reference = ReferenceInstant {
            instant: utc(13, 0, 0),
            origin: TimeOrigin::Local,
        };
        let service = CountdownService::new(utc(12, 0, 0), "http://unused.invalid");
        let mut display = RecordingDisplay::default();

        service.run_from(reference, &mut display).await;

        assert!(display.shown.is_empty());
        assert_eq!(display.reached, 1);
    }
}
