//! Emitter of fire particles
//!
//! The emitter translates the latest fire-behavior calculation into a
//! small set of scalar emission parameters ([`EmitterConfig`]) and, once
//! per frame, stochastically spawns a batch of particles shaped so the
//! aggregate plume reads as a flame: wide flickering base, tapering tip,
//! lateral spread tracking the fuel bed.
//!
//! The batch size itself is random, `floor(max_count × uniform(0,1))`,
//! uniformly distributed between zero and the configured maximum. That
//! per-call draw is what produces the flicker; a fixed batch size makes
//! the flame look like a fountain.

use crate::core_types::{BlendMode, FireBehaviorSample, MilesPerHour, Rgba, Vec2};
use crate::interp::{lerp, FLAME_TAPER};
use crate::particle::{Drift, Particle};
use rand::Rng;
use tracing::info;

/// Calibration coefficients mapping fire-behavior outputs to emission
/// parameters.
///
/// These are the tuning knobs of the visual effect, set by eyeballing
/// reference renders rather than by physics. Override individual fields
/// from `Tuning::default()` to recalibrate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tuning {
    /// Vertical velocity per foot of flame length
    pub vertical_velocity_per_flame_foot: f64,
    /// Flame length divisor giving the horizontal velocity scale
    pub horizontal_velocity_divisor: f64,
    /// Horizontal position variance per Btu/ft² of heat release
    pub x_variance_per_heat_btu: f64,
    /// Cap on horizontal position variance
    pub max_x_variance: f64,
    /// Vertical position variance per foot of fuel-bed depth
    pub y_variance_per_depth_foot: f64,
    /// Particle radius per foot of flame length
    pub radius_per_flame_foot: f64,
    /// Cap on particle radius, bounds per-particle fill cost
    pub max_particle_radius: f64,
    /// Heat release divisor giving the max batch size
    pub count_heat_divisor: f64,
    /// Cap on batch size, bounds per-frame cost
    pub max_particle_count: u32,
    /// Seconds of particle expiry per minute of flame residence time
    pub expiry_secs_per_residence_minute: f64,
    /// Expiry floor; keeps the decay divisor away from zero
    pub min_expiry_secs: f64,
    /// Expiry ceiling; long-lived particles read as smoke, not flame
    pub max_expiry_secs: f64,
}

impl Default for Tuning {
    fn default() -> Self {
        Tuning {
            vertical_velocity_per_flame_foot: 1.0,
            horizontal_velocity_divisor: 5.0,
            x_variance_per_heat_btu: 0.04,
            max_x_variance: 100.0,
            y_variance_per_depth_foot: 10.0,
            radius_per_flame_foot: 5.0,
            max_particle_radius: 100.0,
            count_heat_divisor: 3.0,
            max_particle_count: 150,
            expiry_secs_per_residence_minute: 3.0,
            min_expiry_secs: 0.1,
            max_expiry_secs: 2.0,
        }
    }
}

/// Derived emission parameters, recomputed whenever a new
/// [`FireBehaviorSample`] arrives.
///
/// Invariants: every scale and variance is non-negative and finite,
/// `max_count` and `radius` are capped by the [`Tuning`] limits, and
/// `expiry_base` is strictly positive. Guaranteed by construction:
/// samples are validated at the boundary and the derivation below only
/// scales and clamps.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EmitterConfig {
    /// Vertical velocity scale (canvas units per reference frame)
    pub vertical_velocity: f64,
    /// Horizontal velocity scale
    pub horizontal_velocity: f64,
    /// Horizontal spawn spread around the origin
    pub x_variance: f64,
    /// Vertical spawn spread below the origin
    pub y_variance: f64,
    /// Particle radius
    pub radius: f64,
    /// Upper bound of the per-frame batch size
    pub max_count: u32,
    /// Longest particle lifetime in seconds
    pub expiry_base: f64,
    /// Ambient wind applied to particles as drift
    pub wind_speed: MilesPerHour,
    /// Color of a freshly spawned particle
    pub start_color: Rgba,
    /// Color a particle cools toward as it expires
    pub end_color: Rgba,
    /// Compositing mode for every particle in the plume
    pub blend_mode: BlendMode,
}

impl Default for EmitterConfig {
    /// A modest campfire, used until the first calculation arrives.
    fn default() -> Self {
        EmitterConfig {
            vertical_velocity: 4.0,
            horizontal_velocity: 2.0,
            x_variance: 40.0,
            y_variance: 20.0,
            radius: 25.0,
            max_count: 40,
            expiry_base: 0.7,
            wind_speed: MilesPerHour::new(0.0),
            start_color: Rgba::YELLOW,
            end_color: Rgba::RED,
            blend_mode: BlendMode::SrcOver,
        }
    }
}

impl EmitterConfig {
    /// Derive emission parameters from a fire-behavior sample with the
    /// default calibration.
    #[must_use]
    pub fn from_sample(sample: &FireBehaviorSample) -> Self {
        Self::from_sample_tuned(sample, &Tuning::default())
    }

    /// Derive emission parameters with an explicit calibration.
    ///
    /// Taller flames rise faster and spawn larger particles; hotter
    /// fuel beds spawn more particles over a wider base; deeper fuel
    /// beds thicken the plume root; longer residence times stretch
    /// particle lifetimes.
    #[must_use]
    pub fn from_sample_tuned(sample: &FireBehaviorSample, tuning: &Tuning) -> Self {
        assert!(
            tuning.horizontal_velocity_divisor > 0.0 && tuning.count_heat_divisor > 0.0,
            "EmitterConfig::from_sample_tuned: divisor coefficients must be positive"
        );
        assert!(
            tuning.min_expiry_secs > 0.0,
            "EmitterConfig::from_sample_tuned: expiry floor must be positive"
        );

        let flame_length = sample.flame_length().value();
        let heat_release = sample.heat_release().value();

        let max_count = (heat_release / tuning.count_heat_divisor)
            .min(f64::from(tuning.max_particle_count)) as u32;
        let expiry_base = (sample.flame_residence_time().value()
            * tuning.expiry_secs_per_residence_minute)
            .clamp(tuning.min_expiry_secs, tuning.max_expiry_secs);

        EmitterConfig {
            vertical_velocity: flame_length * tuning.vertical_velocity_per_flame_foot,
            horizontal_velocity: flame_length / tuning.horizontal_velocity_divisor,
            x_variance: (heat_release * tuning.x_variance_per_heat_btu).min(tuning.max_x_variance),
            y_variance: sample.fuel_bed_depth().value() * tuning.y_variance_per_depth_foot,
            radius: (flame_length * tuning.radius_per_flame_foot).min(tuning.max_particle_radius),
            max_count,
            expiry_base,
            wind_speed: sample.effective_wind_speed(),
            ..EmitterConfig::default()
        }
    }
}

/// An emitter of fire particles in the flame particle system.
///
/// Holds the current [`EmitterConfig`] as an immutable snapshot,
/// replaced wholesale on reconfiguration so a frame mid-emission never
/// observes a half-updated parameter set. Already-emitted particles are
/// unaffected by reconfiguration.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FireEmitter {
    config: EmitterConfig,
}

impl FireEmitter {
    /// Emitter with the default (pre-calculation) configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Emitter with an explicit configuration.
    #[must_use]
    pub fn with_config(config: EmitterConfig) -> Self {
        FireEmitter { config }
    }

    /// The configuration used by subsequent `emit` calls.
    #[must_use]
    pub fn config(&self) -> &EmitterConfig {
        &self.config
    }

    /// Replace the whole configuration snapshot.
    pub fn set_config(&mut self, config: EmitterConfig) {
        self.config = config;
    }

    /// Recompute the configuration from a new fire-behavior result.
    pub fn set_fire_behavior(&mut self, sample: &FireBehaviorSample) {
        let config = EmitterConfig::from_sample(sample);
        info!(
            "reconfigured emitter: flame length {}, max count {}, radius {:.0}, wind {}",
            sample.flame_length(),
            config.max_count,
            config.radius,
            config.wind_speed,
        );
        self.config = config;
    }

    /// Spawn this frame's batch of particles at the given origin,
    /// typically the visual base of the flame.
    ///
    /// Never fails; a zero `max_count` (or an unlucky draw) yields an
    /// empty batch.
    #[must_use]
    pub fn emit(&self, origin: Vec2) -> Vec<Particle> {
        self.emit_with(&mut rand::rng(), origin)
    }

    /// Deterministic variant of [`emit`](Self::emit) for tests and
    /// replays.
    #[must_use]
    pub fn emit_with<R: Rng + ?Sized>(&self, rng: &mut R, origin: Vec2) -> Vec<Particle> {
        let cfg = &self.config;

        // Fresh uniform draw each call: batches flicker between 0 and
        // max_count instead of streaming at a constant rate.
        let count = (f64::from(cfg.max_count) * rng.random::<f64>()).floor() as usize;

        let drift = if cfg.wind_speed.value() > 0.0 {
            Drift::Wind {
                speed: cfg.wind_speed,
            }
        } else {
            Drift::None
        };

        let mut batch = Vec::with_capacity(count);
        for _ in 0..count {
            let u_y0: f64 = rng.random();
            let u_x0: f64 = rng.random_range(-1.0..1.0);
            let u_y2: f64 = rng.random(); // pulse factor
            let u_x2: f64 = rng.random_range(-1.0..1.0);

            let position = Vec2::new(
                origin.x + u_x0 * cfg.x_variance,
                origin.y + u_y0 * cfg.y_variance,
            );

            // Rising speed attenuates away from the centerline (wide base)...
            let vy = FLAME_TAPER.interpolate(0.0, cfg.vertical_velocity, u_y2)
                / (u_x0.abs() + 1.0);
            // ...and horizontal speed is driven to zero for high risers
            // (tapered tip).
            let vx = FLAME_TAPER.interpolate(u_x2 * cfg.horizontal_velocity, 0.0, u_y2);
            let velocity = Vec2::new(vx, -vy);

            // High risers also live longest, giving the pulsing cadence
            let expiry = lerp(0.0, cfg.expiry_base, u_y2);

            batch.push(Particle::new(
                position,
                velocity,
                cfg.radius,
                expiry,
                cfg.start_color,
                cfg.end_color,
                cfg.blend_mode,
                drift,
            ));
        }
        batch
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core_types::RawFireBehavior;
    use approx::assert_relative_eq;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn sample(flame_length: f64, heat_release: f64) -> FireBehaviorSample {
        FireBehaviorSample::from_raw(RawFireBehavior {
            flame_length,
            fireline_intensity: 5246.0,
            rate_of_spread_max: 114.6,
            rate_of_spread_flanking: 11.2,
            effective_wind_speed: 5.26,
            heat_release,
            fuel_bed_depth: 2.0,
            characteristic_sav: 1672.0,
            flame_residence_time: 0.23,
            reaction_velocity: 13.5,
        })
        .unwrap()
    }

    #[test]
    fn test_config_derivation_coefficients() {
        let config = EmitterConfig::from_sample(&sample(23.14, 300.0));

        assert_relative_eq!(config.vertical_velocity, 23.14);
        assert_relative_eq!(config.horizontal_velocity, 23.14 / 5.0);
        assert_relative_eq!(config.x_variance, 300.0 * 0.04);
        assert_relative_eq!(config.y_variance, 20.0);
        assert_relative_eq!(config.radius, 100.0); // 23.14 * 5 capped at 100
        assert_eq!(config.max_count, 100); // 300 / 3
        assert_relative_eq!(config.expiry_base, 0.69, epsilon = 1e-9);
        assert_relative_eq!(config.wind_speed.value(), 5.26);
    }

    #[test]
    fn test_config_caps_count_and_radius() {
        let config = EmitterConfig::from_sample(&sample(50.0, 9000.0));
        assert_eq!(config.max_count, 150);
        assert_relative_eq!(config.radius, 100.0);
        assert_relative_eq!(config.x_variance, 100.0); // 360 capped
    }

    #[test]
    fn test_config_low_intensity_fire() {
        let config = EmitterConfig::from_sample(&sample(1.0, 9.0));
        assert_eq!(config.max_count, 3);
        assert_relative_eq!(config.radius, 5.0);
        assert_relative_eq!(config.vertical_velocity, 1.0);
    }

    #[test]
    fn test_batch_never_exceeds_max_count() {
        let mut rng = StdRng::seed_from_u64(7);
        let emitter = FireEmitter::new();
        let max = emitter.config().max_count as usize;
        for _ in 0..500 {
            let batch = emitter.emit_with(&mut rng, Vec2::new(100.0, 100.0));
            assert!(batch.len() <= max);
        }
    }

    #[test]
    fn test_zero_max_count_emits_nothing() {
        let mut rng = StdRng::seed_from_u64(7);
        let emitter = FireEmitter::with_config(EmitterConfig {
            max_count: 0,
            ..EmitterConfig::default()
        });
        for _ in 0..100 {
            assert!(emitter
                .emit_with(&mut rng, Vec2::new(100.0, 100.0))
                .is_empty());
        }
    }

    #[test]
    fn test_zero_variance_spawns_at_origin() {
        let mut rng = StdRng::seed_from_u64(42);
        let emitter = FireEmitter::with_config(EmitterConfig {
            x_variance: 0.0,
            y_variance: 0.0,
            ..EmitterConfig::default()
        });
        let batch = emitter.emit_with(&mut rng, Vec2::zeros());
        for p in &batch {
            assert_eq!(p.position(), Vec2::zeros());
        }
    }

    #[test]
    fn test_particles_rise_and_stay_bounded() {
        let mut rng = StdRng::seed_from_u64(11);
        let emitter = FireEmitter::new();
        let cfg = emitter.config();
        for _ in 0..50 {
            for p in emitter.emit_with(&mut rng, Vec2::new(100.0, 100.0)) {
                // Negative y velocity is upward; emission never pushes down
                assert!(p.velocity().y <= 0.0);
                assert!(p.velocity().y.abs() <= cfg.vertical_velocity);
                assert!(p.velocity().x.abs() <= cfg.horizontal_velocity);
                assert!(p.expiry_time() <= cfg.expiry_base);
                assert!((p.position().x - 100.0).abs() <= cfg.x_variance);
            }
        }
    }

    #[test]
    fn test_reconfigure_replaces_whole_snapshot() {
        let mut emitter = FireEmitter::new();
        let before = *emitter.config();
        emitter.set_fire_behavior(&sample(23.14, 1261.0));
        let after = *emitter.config();

        assert_ne!(before, after);
        assert_eq!(after, EmitterConfig::from_sample(&sample(23.14, 1261.0)));
    }

    #[test]
    fn test_wind_attaches_drift() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut emitter = FireEmitter::new();
        emitter.set_fire_behavior(&sample(10.0, 300.0));
        let mut batch = Vec::new();
        while batch.is_empty() {
            batch = emitter.emit_with(&mut rng, Vec2::new(100.0, 100.0));
        }
        // Windy sample: drift must nudge particles downwind over time
        let mut p = batch[0];
        let vx_at_birth = p.velocity().x;
        for _ in 0..20 {
            p.update(60.0);
        }
        assert!(p.velocity().x > vx_at_birth);
    }
}
