//! Countdown timers driven by the fixed simulation step.
//!
//! Every cooldown and cadence in the game (weapon bursts, spawn intervals,
//! the heartbeat, explosion frames) is a [`Countdown`] owned by the entity or
//! director that created it.  Timers are advanced explicitly with the tick
//! `dt`, never by reading a clock, which keeps the simulation deterministic.

/// Accumulated float error tolerated when checking readiness, as a share of
/// the duration.
///
/// Sixty ticks of `1/60` do not always sum to exactly `1.0` in `f32`.
const READY_TOLERANCE: f32 = 1e-4;

/// A resettable countdown measured in seconds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Countdown {
    duration: f32,
    remaining: f32,
}

impl Countdown {
    /// A countdown that becomes ready after `duration` seconds of updates.
    pub fn new(duration: f32) -> Self {
        Self {
            duration,
            remaining: duration,
        }
    }

    /// A countdown that starts out already elapsed.
    pub fn ready(duration: f32) -> Self {
        Self {
            duration,
            remaining: 0.0,
        }
    }

    /// Advances the countdown by `dt` seconds.
    pub fn update(&mut self, dt: f32) {
        if self.remaining > 0.0 {
            self.remaining = (self.remaining - dt).max(0.0);
        }
    }

    /// `true` once the full duration has elapsed since creation or the last
    /// reset.  A zero or negative duration is always ready.
    pub fn is_ready(&self) -> bool {
        self.duration <= 0.0 || self.remaining <= self.duration * READY_TOLERANCE
    }

    /// Restarts the countdown from its full duration.
    pub fn reset(&mut self) {
        self.remaining = self.duration;
    }

    /// Changes the period and restarts the countdown.
    pub fn set_duration(&mut self, duration: f32) {
        self.duration = duration;
        self.reset();
    }

    pub fn duration(&self) -> f32 {
        self.duration
    }

    pub fn remaining(&self) -> f32 {
        self.remaining
    }

    /// Share of the duration still to run, in `[0, 1]`.
    pub fn fraction_remaining(&self) -> f32 {
        if self.duration <= 0.0 {
            0.0
        } else {
            (self.remaining / self.duration).clamp(0.0, 1.0)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ready_after_cumulative_updates() {
        let mut timer = Countdown::new(1.0);
        for _ in 0..59 {
            timer.update(1.0 / 60.0);
        }
        assert!(!timer.is_ready(), "59 ticks should not finish a 1 s timer");
        timer.update(1.0 / 60.0);
        assert!(timer.is_ready(), "60 ticks of 1/60 s should finish a 1 s timer");
    }

    #[test]
    fn reset_restores_full_duration() {
        let mut timer = Countdown::new(0.5);
        timer.update(0.6);
        assert!(timer.is_ready());
        timer.reset();
        assert!(!timer.is_ready());
        assert_eq!(timer.remaining(), 0.5);

        let mut short = Countdown::new(5e-5);
        short.reset();
        assert!(!short.is_ready(), "a tiny positive duration still has to run");
        short.update(5e-5);
        assert!(short.is_ready());
    }

    #[test]
    fn zero_or_negative_duration_is_ready_immediately() {
        assert!(Countdown::new(0.0).is_ready());
        assert!(Countdown::new(-1.0).is_ready());
        let mut timer = Countdown::new(0.0);
        timer.reset();
        assert!(timer.is_ready());
    }

    #[test]
    fn ready_constructor_starts_elapsed() {
        let mut timer = Countdown::ready(0.15);
        assert!(timer.is_ready());
        timer.reset();
        assert!(!timer.is_ready());
    }

    #[test]
    fn set_duration_restarts() {
        let mut timer = Countdown::new(1.6);
        timer.update(2.0);
        timer.set_duration(1.575);
        assert!(!timer.is_ready());
        assert_eq!(timer.duration(), 1.575);
        assert_eq!(timer.fraction_remaining(), 1.0);
    }
}
