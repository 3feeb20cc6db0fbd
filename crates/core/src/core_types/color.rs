//! Flame colors and compositing modes for the render surface.

use serde::{Deserialize, Serialize};
use std::fmt;

/// RGBA color with channels in [0, 1].
///
/// Particles carry a start and an end color; the renderer blends between
/// them as the particle ages (see [`Particle::render`](crate::Particle::render)).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rgba {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    pub a: f64,
}

impl Rgba {
    /// Flame core color
    pub const YELLOW: Rgba = Rgba::new(1.0, 1.0, 0.0, 1.0);

    /// Flame fringe color
    pub const RED: Rgba = Rgba::new(1.0, 0.0, 0.0, 1.0);

    /// Mid-flame color, used by the windward rendering variant
    pub const ORANGE: Rgba = Rgba::new(1.0, 0.65, 0.0, 1.0);

    /// Canvas background
    pub const BLACK: Rgba = Rgba::new(0.0, 0.0, 0.0, 1.0);

    /// Create a new color. Asserts all channels lie in [0, 1].
    #[inline]
    #[must_use]
    #[track_caller]
    #[allow(clippy::manual_range_contains)] // RangeInclusive::contains is not const
    pub const fn new(r: f64, g: f64, b: f64, a: f64) -> Self {
        assert!(
            r >= 0.0 && r <= 1.0 && g >= 0.0 && g <= 1.0 && b >= 0.0 && b <= 1.0 && a >= 0.0 && a <= 1.0,
            "Rgba::new: channel out of [0, 1]"
        );
        Rgba { r, g, b, a }
    }

    /// Channel-wise linear blend from `self` (t = 0) to `other` (t = 1).
    ///
    /// `t` is clamped to [0, 1] so extrapolation can never push a channel
    /// out of range.
    #[must_use]
    pub fn lerp(self, other: Rgba, t: f64) -> Rgba {
        let t = t.clamp(0.0, 1.0);
        Rgba {
            r: self.r + (other.r - self.r) * t,
            g: self.g + (other.g - self.g) * t,
            b: self.b + (other.b - self.b) * t,
            a: self.a + (other.a - self.a) * t,
        }
    }
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "rgba({:.3}, {:.3}, {:.3}, {:.3})",
            self.r, self.g, self.b, self.a
        )
    }
}

/// Compositing mode applied before a particle is drawn.
///
/// `SrcOver` is plain painter's-algorithm alpha compositing; `Add` gives
/// the bloom-like accumulation some surfaces use for flame cores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BlendMode {
    #[default]
    SrcOver,
    Add,
}

impl fmt::Display for BlendMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BlendMode::SrcOver => write!(f, "src-over"),
            BlendMode::Add => write!(f, "add"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_lerp_endpoints() {
        let from = Rgba::RED;
        let to = Rgba::YELLOW;
        assert_eq!(from.lerp(to, 0.0), from);
        assert_eq!(from.lerp(to, 1.0), to);
    }

    #[test]
    fn test_lerp_midpoint() {
        let mid = Rgba::RED.lerp(Rgba::YELLOW, 0.5);
        assert_relative_eq!(mid.r, 1.0);
        assert_relative_eq!(mid.g, 0.5);
        assert_relative_eq!(mid.b, 0.0);
    }

    #[test]
    fn test_lerp_clamps_parameter() {
        assert_eq!(Rgba::RED.lerp(Rgba::YELLOW, 1.5), Rgba::YELLOW);
        assert_eq!(Rgba::RED.lerp(Rgba::YELLOW, -0.5), Rgba::RED);
    }
}
