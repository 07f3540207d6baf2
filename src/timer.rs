//! The repeating auto-advance timer.
//!
//! A timer is a plain value: a period and the next deadline. The controller
//! keeps it in an `Option` slot and replaces the whole value on every
//! restart, so there is never more than one live timer.

use std::time::Duration;
use tokio::time::Instant;

/// A repeating timer started at a known instant.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AutoAdvanceTimer {
    period: Duration,
    next_due: Instant,
    generation: u64,
}

impl AutoAdvanceTimer {
    /// Start a timer at `now`; the first tick is due one `period` later.
    pub fn start(now: Instant, period: Duration, generation: u64) -> Self {
        Self {
            period,
            next_due: now + period,
            generation,
        }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// Deadline of the next tick.
    pub fn next_due(&self) -> Instant {
        self.next_due
    }

    /// Counter distinguishing this timer from those it replaced.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Consume the tick due by `now`, if any.
    ///
    /// At most one tick fires per call. Deadlines missed by a late poll are
    /// skipped, and the next deadline is the first point on the original
    /// cadence after `now`.
    pub fn take_due(&mut self, now: Instant) -> bool {
        if now < self.next_due || self.period.is_zero() {
            return false;
        }

        let overdue = now - self.next_due;
        let skipped = overdue.as_nanos() / self.period.as_nanos();
        let steps = u32::try_from(skipped.saturating_add(1)).unwrap_or(u32::MAX);
        self.next_due = self
            .next_due
            .checked_add(self.period.saturating_mul(steps))
            .unwrap_or(now + self.period);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PERIOD: Duration = Duration::from_millis(5000);

    #[test]
    fn first_tick_is_one_period_after_start() {
        let start = Instant::now();
        let timer = AutoAdvanceTimer::start(start, PERIOD, 1);
        assert_eq!(timer.next_due(), start + PERIOD);
        assert_eq!(timer.period(), PERIOD);
        assert_eq!(timer.generation(), 1);
    }

    #[test]
    fn nothing_fires_before_deadline() {
        let start = Instant::now();
        let mut timer = AutoAdvanceTimer::start(start, PERIOD, 1);
        assert!(!timer.take_due(start + Duration::from_millis(4999)));
        assert_eq!(timer.next_due(), start + PERIOD);
    }

    #[test]
    fn fires_once_at_deadline_and_reschedules() {
        let start = Instant::now();
        let mut timer = AutoAdvanceTimer::start(start, PERIOD, 1);

        assert!(timer.take_due(start + PERIOD));
        assert_eq!(timer.next_due(), start + PERIOD * 2);
        assert!(!timer.take_due(start + PERIOD));
    }

    #[test]
    fn late_poll_fires_once_and_skips_missed_ticks() {
        let start = Instant::now();
        let mut timer = AutoAdvanceTimer::start(start, PERIOD, 1);

        assert!(timer.take_due(start + Duration::from_millis(17_000)));
        assert_eq!(timer.next_due(), start + Duration::from_millis(20_000));
        assert!(!timer.take_due(start + Duration::from_millis(19_999)));
    }

    #[test]
    fn poll_exactly_on_a_later_deadline_moves_past_it() {
        let start = Instant::now();
        let mut timer = AutoAdvanceTimer::start(start, PERIOD, 1);

        assert!(timer.take_due(start + PERIOD * 3));
        assert_eq!(timer.next_due(), start + PERIOD * 4);
    }
}
