//! Easing curves used to shape random velocity draws into a flame
//!
//! An [`EaseSpline`] is a monotonic cubic Bezier anchored at (0, 0) and
//! (1, 1) with two control points, evaluated the same way CSS
//! `cubic-bezier` timing functions are: solve the curve's x polynomial
//! for the parameter, then sample y. With both control-point x values
//! inside [0, 1] the curve is a function of x, and with the y values
//! inside [0, 1] it is monotonic non-decreasing, which is what keeps the
//! shaped velocities coherent instead of oscillating.

/// Newton-Raphson iterations before falling back to bisection
const NEWTON_ITERATIONS: usize = 8;

/// Convergence threshold on the x residual
const EPSILON: f64 = 1e-7;

/// Monotonic cubic-Bezier easing curve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EaseSpline {
    x1: f64,
    y1: f64,
    x2: f64,
    y2: f64,
}

/// Shapes the flame silhouette: fast rise through the mid-range, gentle
/// at both ends. Drives horizontal velocity toward zero for particles
/// destined to rise high, which tapers the flame tip.
pub const FLAME_TAPER: EaseSpline = EaseSpline::new(0.2, 0.8, 0.8, 0.2);

/// Mirror of [`FLAME_TAPER`], used to shape how strongly wind grips a
/// particle as it rises out of the sheltered fuel bed.
pub const LEEWARD: EaseSpline = EaseSpline::new(0.8, 0.2, 0.2, 0.8);

/// Slow start, accelerating finish. Used for the age-driven color shift
/// from end color back toward start color.
pub const EASE_IN: EaseSpline = EaseSpline::new(0.42, 0.0, 1.0, 1.0);

impl EaseSpline {
    /// Create an easing curve from its two control points.
    /// Asserts all coordinates lie in [0, 1] so the curve stays a
    /// monotonic function on the unit interval.
    #[must_use]
    #[track_caller]
    #[allow(clippy::manual_range_contains)] // RangeInclusive::contains is not const
    pub const fn new(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        assert!(
            x1 >= 0.0 && x1 <= 1.0 && x2 >= 0.0 && x2 <= 1.0,
            "EaseSpline::new: control x out of [0, 1]"
        );
        assert!(
            y1 >= 0.0 && y1 <= 1.0 && y2 >= 0.0 && y2 <= 1.0,
            "EaseSpline::new: control y out of [0, 1]"
        );
        EaseSpline { x1, y1, x2, y2 }
    }

    /// Evaluate the curve at `t`, clamped to [0, 1].
    #[must_use]
    pub fn ease(&self, t: f64) -> f64 {
        if t <= 0.0 {
            return 0.0;
        }
        if t >= 1.0 {
            return 1.0;
        }
        sample(self.y1, self.y2, solve_parameter(self.x1, self.x2, t))
    }

    /// Interpolate between `start` and `end` with the eased fraction of `t`.
    ///
    /// `interpolate(a, b, 0) == a` and `interpolate(a, b, 1) == b` exactly.
    #[must_use]
    pub fn interpolate(&self, start: f64, end: f64, t: f64) -> f64 {
        start + (end - start) * self.ease(t)
    }
}

/// Plain linear interpolation, `t` unclamped.
#[inline]
#[must_use]
pub fn lerp(start: f64, end: f64, t: f64) -> f64 {
    start + (end - start) * t
}

/// Evaluate one cubic Bezier component (anchors 0 and 1) at parameter `s`.
fn sample(c1: f64, c2: f64, s: f64) -> f64 {
    // Horner form of 3(1-s)²s·c1 + 3(1-s)s²·c2 + s³
    let c = 3.0 * c1;
    let b = 3.0 * (c2 - c1) - c;
    let a = 1.0 - c - b;
    ((a * s + b) * s + c) * s
}

/// Derivative of [`sample`] with respect to `s`.
fn sample_derivative(c1: f64, c2: f64, s: f64) -> f64 {
    let c = 3.0 * c1;
    let b = 3.0 * (c2 - c1) - c;
    let a = 1.0 - c - b;
    (3.0 * a * s + 2.0 * b) * s + c
}

/// Find the curve parameter whose x component equals `x`.
fn solve_parameter(x1: f64, x2: f64, x: f64) -> f64 {
    // Newton-Raphson converges in a few steps for well-behaved curves
    let mut s = x;
    for _ in 0..NEWTON_ITERATIONS {
        let residual = sample(x1, x2, s) - x;
        if residual.abs() < EPSILON {
            return s;
        }
        let slope = sample_derivative(x1, x2, s);
        if slope.abs() < EPSILON {
            break;
        }
        s -= residual / slope;
    }

    // Bisection fallback for flat-slope regions
    let (mut lo, mut hi) = (0.0_f64, 1.0_f64);
    s = x;
    while hi - lo > EPSILON {
        if sample(x1, x2, s) < x {
            lo = s;
        } else {
            hi = s;
        }
        s = (lo + hi) / 2.0;
    }
    s
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_endpoints_exact() {
        for spline in [FLAME_TAPER, LEEWARD, EASE_IN] {
            assert_eq!(spline.ease(0.0), 0.0);
            assert_eq!(spline.ease(1.0), 1.0);
            assert_eq!(spline.interpolate(3.0, 7.0, 0.0), 3.0);
            assert_eq!(spline.interpolate(3.0, 7.0, 1.0), 7.0);
        }
    }

    #[test]
    fn test_monotonic_non_decreasing() {
        for spline in [FLAME_TAPER, LEEWARD, EASE_IN] {
            let mut prev = 0.0;
            for i in 0..=1000 {
                let t = f64::from(i) / 1000.0;
                let v = spline.ease(t);
                assert!(
                    v >= prev - 1e-9,
                    "ease must not decrease: {v} < {prev} at t={t}"
                );
                prev = v;
            }
        }
    }

    #[test]
    fn test_clamps_outside_unit_interval() {
        assert_eq!(FLAME_TAPER.ease(-0.5), 0.0);
        assert_eq!(FLAME_TAPER.ease(1.5), 1.0);
    }

    #[test]
    fn test_symmetric_spline_midpoint() {
        // (0.2, 0.8, 0.8, 0.2) is symmetric about the diagonal
        assert_relative_eq!(FLAME_TAPER.ease(0.5), 0.5, epsilon = 1e-6);
    }

    #[test]
    fn test_ease_in_starts_slow() {
        assert!(EASE_IN.ease(0.25) < 0.25);
    }

    #[test]
    fn test_lerp_is_linear() {
        assert_relative_eq!(lerp(0.0, 0.7, 0.5), 0.35);
        assert_relative_eq!(lerp(2.0, 4.0, 0.25), 2.5);
    }
}
