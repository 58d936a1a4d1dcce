//! Composable scalar curves.
//!
//! A [`Curve`] is an immutable expression tree describing `value(t)` for a
//! real parameter `t`. Primitives ([`Curve::constant`], [`Curve::sine`],
//! [`Curve::linear`]) are combined with chaining constructors that consume
//! the receiver and wrap it:
//!
//! ```
//! use std::f32::consts::PI;
//! use replicaengine::components::curve::Curve;
//!
//! // One positive sine hump, then flat at zero, scaled into [1, 2].
//! let pulse = Curve::sine()
//!     .join(Curve::constant(0.0), PI)
//!     .multiply(1.0)
//!     .offset(1.0);
//! assert_eq!(pulse.value(0.0), 1.0);
//! assert_eq!(pulse.value(4.0), 1.0);
//! ```
//!
//! Only [`Curve::stretch`] and [`Curve::join`] touch the time argument.
//! [`Curve::multiply`], [`Curve::offset`] and [`Curve::invert`] post-process
//! the output, so reordering them changes arithmetic but never the domain.
//!
//! Curves are plain data and can be described in JSON:
//!
//! ```json
//! { "kind": "offset", "inner": { "kind": "sine" }, "offset": 1.0 }
//! ```
//!
//! # Related
//!
//! - [`crate::components::sampler::SampledCurve`] – incremental, per-tick evaluation

use serde::{Deserialize, Serialize};

use crate::components::sampler::SampledCurve;

/// Pure function of one real parameter, built by composition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Curve {
    /// Same value everywhere.
    Constant { value: f32 },
    /// `sin(t)` with `t` in radians.
    Sine,
    /// `t` itself.
    Linear,
    /// `first` below `breakpoint`, then `second` restarted at zero.
    Join {
        first: Box<Curve>,
        breakpoint: f32,
        second: Box<Curve>,
    },
    /// Output scaled by `factor`.
    Multiply { inner: Box<Curve>, factor: f32 },
    /// Output shifted by `offset`.
    Offset { inner: Box<Curve>, offset: f32 },
    /// Input divided by `factor`; larger factors traverse the curve slower.
    Stretch { inner: Box<Curve>, factor: f32 },
    /// Output negated.
    Invert { inner: Box<Curve> },
}

impl Curve {
    pub fn constant(value: f32) -> Self {
        Curve::Constant { value }
    }

    pub fn sine() -> Self {
        Curve::Sine
    }

    pub fn linear() -> Self {
        Curve::Linear
    }

    /// Continue with `second` once `t` reaches `breakpoint`.
    ///
    /// `second` sees `t - breakpoint`, so its own domain starts at zero.
    pub fn join(self, second: Curve, breakpoint: f32) -> Self {
        Curve::Join {
            first: Box::new(self),
            breakpoint,
            second: Box::new(second),
        }
    }

    pub fn multiply(self, factor: f32) -> Self {
        Curve::Multiply {
            inner: Box::new(self),
            factor,
        }
    }

    pub fn offset(self, offset: f32) -> Self {
        Curve::Offset {
            inner: Box::new(self),
            offset,
        }
    }

    /// Rescale the input domain: `value(t) = inner.value(t / factor)`.
    ///
    /// A non-positive factor collapses the domain and pins the inner input
    /// to zero.
    pub fn stretch(self, factor: f32) -> Self {
        Curve::Stretch {
            inner: Box::new(self),
            factor,
        }
    }

    pub fn invert(self) -> Self {
        Curve::Invert {
            inner: Box::new(self),
        }
    }

    /// Wrap the curve in a sampler positioned at zero.
    pub fn sample(self) -> SampledCurve {
        SampledCurve::new(self)
    }

    /// Evaluate the curve at `t`.
    pub fn value(&self, t: f32) -> f32 {
        match self {
            Curve::Constant { value } => *value,
            Curve::Sine => t.sin(),
            Curve::Linear => t,
            Curve::Join {
                first,
                breakpoint,
                second,
            } => {
                if t < *breakpoint {
                    first.value(t)
                } else {
                    second.value(t - breakpoint)
                }
            }
            Curve::Multiply { inner, factor } => inner.value(t) * factor,
            Curve::Offset { inner, offset } => inner.value(t) + offset,
            Curve::Stretch { inner, factor } => {
                if *factor > 0.0 {
                    inner.value(t / factor)
                } else {
                    inner.value(0.0)
                }
            }
            Curve::Invert { inner } => -inner.value(t),
        }
    }
}
