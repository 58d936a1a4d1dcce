//! Incremental, tick-driven evaluation of a [`Curve`].
//!
//! A [`SampledCurve`] owns a curve, a running position in ticks and the value
//! at that position. The owner decides when to call [`SampledCurve::step`]
//! (once per tick while an animation runs) and when a bounded cycle is over
//! ([`SampledCurve::reset`]). No bounds are checked here.

use crate::components::curve::Curve;

/// Stateful cursor over a curve, advanced one tick at a time.
///
/// Invariant: `value() == curve().value(position())` after construction,
/// every step and every reset.
#[derive(Debug, Clone, PartialEq)]
pub struct SampledCurve {
    curve: Curve,
    position: f32,
    last_value: f32,
}

impl SampledCurve {
    pub fn new(curve: Curve) -> Self {
        let last_value = curve.value(0.0);
        SampledCurve {
            curve,
            position: 0.0,
            last_value,
        }
    }

    /// Advance by exactly one tick and cache the new value.
    pub fn step(&mut self) {
        self.position += 1.0;
        self.last_value = self.curve.value(self.position);
    }

    /// Return to position zero so the next cycle can start immediately.
    pub fn reset(&mut self) {
        self.position = 0.0;
        self.last_value = self.curve.value(0.0);
    }

    /// Ticks stepped since construction or the last reset.
    pub fn position(&self) -> f32 {
        self.position
    }

    /// Curve value at the current position.
    pub fn value(&self) -> f32 {
        self.last_value
    }

    pub fn curve(&self) -> &Curve {
        &self.curve
    }
}
