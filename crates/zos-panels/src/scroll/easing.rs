//! Easing curves for animated scrolling

use serde::{Deserialize, Serialize};

/// Ease-in-out cubic
#[inline]
pub fn ease_in_out(t: f32) -> f32 {
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
    }
}

/// Ease-out cubic
#[inline]
pub fn ease_out_cubic(t: f32) -> f32 {
    1.0 - (1.0 - t).powi(3)
}

/// Ease-in cubic
#[inline]
pub fn ease_in_cubic(t: f32) -> f32 {
    t * t * t
}

#[inline]
pub fn linear(t: f32) -> f32 {
    t
}

/// Named easing curve, selectable from configuration
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Easing {
    #[default]
    EaseOutCubic,
    EaseInOut,
    EaseInCubic,
    Linear,
}

impl Easing {
    /// Evaluate the curve at `t`, clamped to `[0, 1]`
    pub fn apply(self, t: f32) -> f32 {
        let t = if t.is_nan() { 1.0 } else { t.clamp(0.0, 1.0) };
        match self {
            Easing::EaseOutCubic => ease_out_cubic(t),
            Easing::EaseInOut => ease_in_out(t),
            Easing::EaseInCubic => ease_in_cubic(t),
            Easing::Linear => linear(t),
        }
    }
}
