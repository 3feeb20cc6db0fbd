//! A particle in the flame particle system
//!
//! Particles are born by the emitter with `life = 1.0`, advanced once
//! per frame, and culled by the pool the first frame `life` reaches
//! zero. They have exactly two states, alive and expired, and the
//! transition is one-way; an expired particle is removed, never reused.

use crate::core_types::{BlendMode, MilesPerHour, Rgba, Vec2};
use crate::interp::{EASE_IN, LEEWARD};
use crate::render::{ParticleSnapshot, RenderSurface};

/// Frame rate the motion constants are calibrated against. Updates at
/// other rates are scaled so the animation plays at the same speed.
pub const REFERENCE_FRAME_RATE: f64 = 60.0;

/// Floor applied to the caller-reported frame rate. Guards the decay
/// and motion-scale divisions during startup frames where the measured
/// rate can be zero.
pub const MIN_FRAME_RATE: f64 = 1.0;

/// Per-frame velocity adjustment applied before integration.
///
/// Composes wind effects onto a particle without subclassing: the
/// emitter attaches the strategy at spawn time and `update` invokes it
/// every frame.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Drift {
    /// No adjustment; the particle keeps its spawn velocity.
    #[default]
    None,
    /// Ambient wind accelerates the particle downwind for as long as it
    /// lives. Grip on the particle grows as it ages and rises out of
    /// the sheltered fuel bed, shaped by the leeward easing curve, so
    /// the oldest, highest particles are carried fastest.
    Wind { speed: MilesPerHour },
}

impl Drift {
    /// Adjusted velocity for this frame.
    fn apply(self, velocity: Vec2, life: f64, frame_rate: f64) -> Vec2 {
        match self {
            Drift::None => velocity,
            Drift::Wind { speed } => {
                let grip = LEEWARD.ease(1.0 - life);
                let push = speed.to_feet_per_second() / frame_rate * grip;
                Vec2::new(velocity.x + push, velocity.y)
            }
        }
    }
}

/// A single flame particle owned by the pool from emission to expiry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    position: Vec2,
    velocity: Vec2,
    radius: f64,
    /// Remaining life in [0, 1]; 1.0 at birth, expired at <= 0
    life: f64,
    /// Total lifetime in seconds
    expiry_time: f64,
    start_color: Rgba,
    end_color: Rgba,
    blend_mode: BlendMode,
    drift: Drift,
}

impl Particle {
    /// Construct a freshly born particle (`life = 1.0`).
    #[allow(clippy::too_many_arguments)] // mirrors the full emission tuple
    pub(crate) fn new(
        position: Vec2,
        velocity: Vec2,
        radius: f64,
        expiry_time: f64,
        start_color: Rgba,
        end_color: Rgba,
        blend_mode: BlendMode,
        drift: Drift,
    ) -> Self {
        Particle {
            position,
            velocity,
            radius,
            life: 1.0,
            expiry_time,
            start_color,
            end_color,
            blend_mode,
            drift,
        }
    }

    /// True until the particle's life has decayed to zero.
    #[must_use]
    pub fn is_alive(&self) -> bool {
        self.life > 0.0
    }

    /// Advance position and age by one frame.
    ///
    /// Motion is normalized to [`REFERENCE_FRAME_RATE`], so a particle
    /// travels the same path per wall-clock second regardless of the
    /// actual rendering rate. `frame_rate` is clamped to
    /// [`MIN_FRAME_RATE`]; a zero expiry time expires the particle on
    /// its first update.
    pub fn update(&mut self, frame_rate: f64) {
        let frame_rate = if frame_rate.is_finite() {
            frame_rate.max(MIN_FRAME_RATE)
        } else {
            REFERENCE_FRAME_RATE
        };

        let decay = if self.expiry_time > 0.0 {
            1.0 / (self.expiry_time * frame_rate)
        } else {
            1.0
        };
        let scale = REFERENCE_FRAME_RATE / frame_rate;

        self.velocity = self.drift.apply(self.velocity, self.life, frame_rate);
        self.position += self.velocity * scale;
        self.life -= decay;
    }

    /// Draw the particle: alpha fades with remaining life and the fill
    /// color shifts from the end color (old) toward the start color
    /// (young) along the ease-in curve.
    pub fn render(&self, surface: &mut dyn RenderSurface) {
        surface.set_global_alpha(self.alpha());
        surface.set_blend_mode(self.blend_mode);
        surface.set_fill(self.fill_color());
        surface.fill_oval(self.position.x, self.position.y, self.radius, self.radius);
    }

    /// Render-ready value for consumers that draw elsewhere.
    #[must_use]
    pub fn snapshot(&self) -> ParticleSnapshot {
        ParticleSnapshot {
            x: self.position.x,
            y: self.position.y,
            radius: self.radius,
            color: self.fill_color(),
            alpha: self.alpha(),
            blend_mode: self.blend_mode,
        }
    }

    /// Current position in canvas coordinates
    #[must_use]
    pub fn position(&self) -> Vec2 {
        self.position
    }

    /// Current velocity in canvas units per reference frame
    #[must_use]
    pub fn velocity(&self) -> Vec2 {
        self.velocity
    }

    /// Remaining life in [0, 1]
    #[must_use]
    pub fn life(&self) -> f64 {
        self.life
    }

    /// Total lifetime in seconds
    #[must_use]
    pub fn expiry_time(&self) -> f64 {
        self.expiry_time
    }

    fn alpha(&self) -> f64 {
        self.life.clamp(0.0, 1.0)
    }

    fn fill_color(&self) -> Rgba {
        if self.start_color == self.end_color {
            self.start_color
        } else {
            // Full life draws the start color, zero life the end color
            let t = EASE_IN.ease(self.life.clamp(0.0, 1.0));
            self.end_color.lerp(self.start_color, t)
        }
    }
}
