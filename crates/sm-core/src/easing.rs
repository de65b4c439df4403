//! Easing curves shared by the Linear model and the fade sub-animations.

use serde::{Deserialize, Serialize};

/// An easing function family, each with an `In`/`Out`/`InOut` member where
/// the shape admits all three (§4.2 Linear, §4.6 fade ease).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Easing {
    #[default]
    Linear,
    QuadraticIn,
    QuadraticOut,
    QuadraticInOut,
    CubicIn,
    CubicOut,
    CubicInOut,
    SinusoidalIn,
    SinusoidalOut,
    SinusoidalInOut,
    ExponentialIn,
    ExponentialOut,
    ExponentialInOut,
}

impl Easing {
    /// Evaluate the curve at `t` in `[0, 1]`, returning a value in `[0, 1]`.
    pub fn evaluate(&self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,

            Easing::QuadraticIn => t * t,
            Easing::QuadraticOut => 1.0 - (1.0 - t) * (1.0 - t),
            Easing::QuadraticInOut => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
                }
            }

            Easing::CubicIn => t * t * t,
            Easing::CubicOut => 1.0 - (1.0 - t).powi(3),
            Easing::CubicInOut => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
                }
            }

            Easing::SinusoidalIn => 1.0 - (t * std::f64::consts::FRAC_PI_2).cos(),
            Easing::SinusoidalOut => (t * std::f64::consts::FRAC_PI_2).sin(),
            Easing::SinusoidalInOut => -((std::f64::consts::PI * t).cos() - 1.0) / 2.0,

            Easing::ExponentialIn => {
                if t <= 0.0 {
                    0.0
                } else {
                    2.0_f64.powf(10.0 * t - 10.0)
                }
            }
            Easing::ExponentialOut => {
                if t >= 1.0 {
                    1.0
                } else {
                    1.0 - 2.0_f64.powf(-10.0 * t)
                }
            }
            Easing::ExponentialInOut => {
                if t <= 0.0 {
                    0.0
                } else if t >= 1.0 {
                    1.0
                } else if t < 0.5 {
                    2.0_f64.powf(20.0 * t - 10.0) / 2.0
                } else {
                    (2.0 - 2.0_f64.powf(-20.0 * t + 10.0)) / 2.0
                }
            }
        }
    }
}
