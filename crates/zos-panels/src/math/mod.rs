//! Geometry types and total clamping helpers
//!
//! Every helper here is total: degenerate input (NaN, negative extents,
//! inverted bounds, zero-sized areas) collapses to zero or to the lower
//! bound instead of panicking or propagating NaN.

mod vec2;
mod rect;
mod size;

pub use vec2::Vec2;
pub use rect::Rect;
pub use size::Size;

/// Clamp a value to zero or above; NaN becomes zero
#[inline]
pub fn non_negative(value: f32) -> f32 {
    if value.is_nan() {
        0.0
    } else {
        value.max(0.0)
    }
}

/// Clamp `value` into `[lo, hi]` without panicking
///
/// Inverted bounds resolve to `lo`; a NaN value resolves to `lo`.
#[inline]
pub fn clamp_total(value: f32, lo: f32, hi: f32) -> f32 {
    if value.is_nan() || hi < lo {
        return lo;
    }
    value.max(lo).min(hi)
}

/// Round `value` to the nearest multiple of `grid`
///
/// A non-positive or non-finite grid leaves the value untouched.
#[inline]
pub fn snap_to_grid(value: f32, grid: f32) -> f32 {
    if !(grid.is_finite() && grid > 0.0) {
        return value;
    }
    (value / grid).round() * grid
}

/// Position a span of length `len` starting at `start` inside `[lo, hi]`
///
/// When the span is longer than the available space it is pinned to `lo`.
#[inline]
pub fn clamp_span(start: f32, len: f32, lo: f32, hi: f32) -> f32 {
    let max_start = (hi - non_negative(len)).max(lo);
    clamp_total(start, lo, max_start)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_total_inverted_bounds() {
        assert!((clamp_total(50.0, 100.0, 10.0) - 100.0).abs() < 0.001);
        assert!((clamp_total(f32::NAN, 0.0, 10.0) - 0.0).abs() < 0.001);
        assert!((clamp_total(5.0, 0.0, 10.0) - 5.0).abs() < 0.001);
    }

    #[test]
    fn test_snap_to_grid() {
        assert!((snap_to_grid(23.0, 10.0) - 20.0).abs() < 0.001);
        assert!((snap_to_grid(25.0, 10.0) - 30.0).abs() < 0.001);
        assert!((snap_to_grid(-14.0, 10.0) - (-10.0)).abs() < 0.001);
        assert!((snap_to_grid(23.0, 0.0) - 23.0).abs() < 0.001);
    }

    #[test]
    fn test_clamp_span() {
        // Fits: pushed back inside
        assert!((clamp_span(950.0, 100.0, 0.0, 1000.0) - 900.0).abs() < 0.001);
        assert!((clamp_span(-20.0, 100.0, 0.0, 1000.0) - 0.0).abs() < 0.001);
        // Larger than the area: pinned to the start
        assert!((clamp_span(300.0, 2000.0, 0.0, 1000.0) - 0.0).abs() < 0.001);
        // Zero-sized area
        assert!((clamp_span(300.0, 100.0, 0.0, 0.0) - 0.0).abs() < 0.001);
    }

    #[test]
    fn test_non_negative() {
        assert_eq!(non_negative(-3.0), 0.0);
        assert_eq!(non_negative(f32::NAN), 0.0);
        assert_eq!(non_negative(4.5), 4.5);
    }
}
