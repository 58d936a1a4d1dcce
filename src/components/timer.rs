// Counts down a number of ticks and reports when it runs out.
use crate::resources::worldtime::seconds_to_ticks;

/// Whether a timer reloads after firing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerMode {
    /// Reload with the interval every time it fires.
    Interval,
    /// Fire once, then stay exhausted until [`TickTimer::reset`].
    Once,
}

/// Countdown evaluated once per tick.
///
/// Intervals may be fractional: the overshoot of one cycle carries into the
/// next, so an interval of 1.5 fires on ticks 2, 3, 5, 6, ... A non-positive
/// interval fires on every tick.
#[derive(Debug, Clone, PartialEq)]
pub struct TickTimer {
    pub interval: f32,
    pub remaining: f32,
    pub mode: TimerMode,
    exhausted: bool,
}

impl TickTimer {
    pub fn interval(ticks: f32) -> Self {
        TickTimer {
            interval: ticks,
            remaining: ticks,
            mode: TimerMode::Interval,
            exhausted: false,
        }
    }

    pub fn interval_seconds(seconds: f32) -> Self {
        Self::interval(seconds_to_ticks(seconds))
    }

    pub fn timeout(ticks: f32) -> Self {
        TickTimer {
            mode: TimerMode::Once,
            ..Self::interval(ticks)
        }
    }

    /// Count one tick. Returns `true` on the tick the timer elapses.
    pub fn tick(&mut self) -> bool {
        if self.exhausted {
            return false;
        }
        self.remaining -= 1.0;
        if self.remaining > 0.0 {
            return false;
        }
        match self.mode {
            TimerMode::Interval => {
                if self.interval > 0.0 {
                    self.remaining += self.interval;
                } else {
                    self.remaining = 0.0;
                }
            }
            TimerMode::Once => {
                self.remaining = 0.0;
                self.exhausted = true;
            }
        }
        true
    }

    pub fn reset(&mut self) {
        self.remaining = self.interval;
        self.exhausted = false;
    }

    pub fn is_exhausted(&self) -> bool {
        self.exhausted
    }
}
