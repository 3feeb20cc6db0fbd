//! Frame-driven flame simulation: emitter plus particle pool
//!
//! Single-threaded and cooperative: the owning view's render loop calls
//! [`FlameSimulation::advance`] once per display refresh, then draws
//! the survivors. The pool is the sole owner of its particles;
//! reconfiguration only swaps the emitter's parameter snapshot and
//! never touches particles already in flight.

use crate::core_types::{FireBehaviorSample, Vec2};
use crate::emitter::FireEmitter;
use crate::particle::{Particle, MIN_FRAME_RATE, REFERENCE_FRAME_RATE};
use crate::render::{ParticleSnapshot, RenderSurface};
use rand::Rng;
use tracing::debug;

/// Per-frame diagnostics for on-screen labels. Not part of the
/// simulation's correctness contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FrameStats {
    /// Particles alive after this frame
    pub live_particles: usize,
    /// Particles spawned this frame
    pub spawned: usize,
    /// Particles culled this frame
    pub expired: usize,
}

/// The live particle system driving the flame animation.
#[derive(Debug, Clone, Default)]
pub struct FlameSimulation {
    emitter: FireEmitter,
    particles: Vec<Particle>,
    frame: u64,
}

impl FlameSimulation {
    /// Simulation with the default emitter configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Simulation around an explicitly configured emitter.
    #[must_use]
    pub fn with_emitter(emitter: FireEmitter) -> Self {
        FlameSimulation {
            emitter,
            particles: Vec::new(),
            frame: 0,
        }
    }

    /// Run one frame: emit a new batch at `origin`, integrate every
    /// particle, and cull the expired.
    pub fn advance(&mut self, origin: Vec2, frame_rate: f64) -> FrameStats {
        self.advance_with(&mut rand::rng(), origin, frame_rate)
    }

    /// Deterministic variant of [`advance`](Self::advance).
    pub fn advance_with<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        origin: Vec2,
        frame_rate: f64,
    ) -> FrameStats {
        let batch = self.emitter.emit_with(rng, origin);
        let spawned = batch.len();
        self.particles.extend(batch);

        let before = self.particles.len();
        for particle in &mut self.particles {
            particle.update(frame_rate);
        }
        self.particles.retain(Particle::is_alive);

        self.frame += 1;
        let stats = FrameStats {
            live_particles: self.particles.len(),
            spawned,
            expired: before - self.particles.len(),
        };
        debug!(
            "frame {}: {} live, {} spawned, {} expired",
            self.frame, stats.live_particles, stats.spawned, stats.expired
        );
        stats
    }

    /// Draw all live particles onto the surface, oldest first.
    pub fn render(&self, surface: &mut dyn RenderSurface) {
        for particle in &self.particles {
            particle.render(surface);
        }
    }

    /// Render-ready snapshots of all live particles.
    #[must_use]
    pub fn snapshots(&self) -> Vec<ParticleSnapshot> {
        self.particles.iter().map(Particle::snapshot).collect()
    }

    /// Live particles, oldest first.
    #[must_use]
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Number of live particles (the on-screen counter).
    #[must_use]
    pub fn particle_count(&self) -> usize {
        self.particles.len()
    }

    /// Frames advanced since construction.
    #[must_use]
    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Apply a new fire-behavior result to subsequent emission batches.
    /// Particles already in flight keep their spawn parameters.
    pub fn set_fire_behavior(&mut self, sample: &FireBehaviorSample) {
        self.emitter.set_fire_behavior(sample);
    }

    /// The particle emitter.
    #[must_use]
    pub fn emitter(&self) -> &FireEmitter {
        &self.emitter
    }

    /// Mutable access to the emitter, for direct reconfiguration.
    pub fn emitter_mut(&mut self) -> &mut FireEmitter {
        &mut self.emitter
    }
}

/// Ring buffer of frame timestamps
const FRAME_TIME_WINDOW: usize = 100;

/// Smoothed frames-per-second measurement over the last
/// [`FRAME_TIME_WINDOW`] frames, fed by the driver's per-frame
/// timestamp. Mirrors the on-screen fps label.
#[derive(Debug, Clone)]
pub struct FrameRateCounter {
    times: [u64; FRAME_TIME_WINDOW],
    index: usize,
    filled: usize,
}

impl Default for FrameRateCounter {
    fn default() -> Self {
        FrameRateCounter {
            times: [0; FRAME_TIME_WINDOW],
            index: 0,
            filled: 0,
        }
    }
}

impl FrameRateCounter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the current frame's timestamp in nanoseconds and return
    /// the smoothed frame rate.
    ///
    /// Timestamps only need a consistent origin, not one near zero.
    /// Until the window has seen enough frames the rate is averaged over
    /// the frames recorded so far; the very first frame has no interval
    /// to measure and reports [`REFERENCE_FRAME_RATE`]. The result never
    /// drops below [`MIN_FRAME_RATE`].
    pub fn record(&mut self, now_nanos: u64) -> f64 {
        let oldest = self.times[self.index];
        self.times[self.index] = now_nanos;
        self.index = (self.index + 1) % FRAME_TIME_WINDOW;

        let (elapsed, intervals) = if self.filled < FRAME_TIME_WINDOW {
            // Warming up: the ring still holds unwritten slots, so
            // measure from the first frame ever recorded instead of the
            // evicted slot.
            self.filled += 1;
            (now_nanos.saturating_sub(self.times[0]), self.filled - 1)
        } else {
            (now_nanos.saturating_sub(oldest), FRAME_TIME_WINDOW)
        };
        if intervals == 0 {
            return REFERENCE_FRAME_RATE;
        }

        let per_frame = elapsed / intervals as u64;
        if per_frame == 0 {
            return MIN_FRAME_RATE;
        }
        (1_000_000_000.0 / per_frame as f64).max(MIN_FRAME_RATE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::emitter::EmitterConfig;
    use approx::assert_relative_eq;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_advance_spawns_and_culls() {
        let mut rng = StdRng::seed_from_u64(99);
        let mut sim = FlameSimulation::new();

        let mut total_spawned = 0;
        for _ in 0..120 {
            let stats = sim.advance_with(&mut rng, Vec2::new(200.0, 400.0), 60.0);
            total_spawned += stats.spawned;
            assert_eq!(stats.live_particles, sim.particle_count());
        }
        assert!(total_spawned > 0, "two seconds of emission spawned nothing");
        // Default expiry is 0.7 s, so the pool must be turning over
        assert!(sim.particle_count() < total_spawned);
    }

    #[test]
    fn test_reconfiguration_spares_in_flight_particles() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut sim = FlameSimulation::with_emitter(crate::emitter::FireEmitter::with_config(
            EmitterConfig {
                radius: 30.0,
                expiry_base: 5.0,
                ..EmitterConfig::default()
            },
        ));
        while sim.particle_count() == 0 {
            sim.advance_with(&mut rng, Vec2::zeros(), 60.0);
        }

        sim.emitter_mut().set_config(EmitterConfig {
            radius: 99.0,
            max_count: 0,
            ..EmitterConfig::default()
        });
        sim.advance_with(&mut rng, Vec2::zeros(), 60.0);

        for snap in sim.snapshots() {
            assert_relative_eq!(snap.radius, 30.0);
        }
    }

    #[test]
    fn test_frame_rate_counter_steady_sixty() {
        let mut counter = FrameRateCounter::new();
        let step = 16_666_667_u64; // one 60 Hz frame in nanoseconds
        let mut fps = 0.0;
        for i in 1..=300_u64 {
            fps = counter.record(i * step);
        }
        assert_relative_eq!(fps, 60.0, epsilon = 0.1);
    }

    #[test]
    fn test_frame_rate_counter_accurate_during_warmup() {
        // Real monotonic clocks don't start near zero; the measurement
        // must hold from the second frame on, not only once the ring
        // has wrapped.
        let mut counter = FrameRateCounter::new();
        let base = 1_700_000_000_000_000_000_u64;
        let step = 16_666_667_u64; // one 60 Hz frame in nanoseconds

        let mut worst = f64::INFINITY;
        let mut fps = 0.0;
        for i in 0..100_u64 {
            fps = counter.record(base + i * step);
            if i > 0 {
                worst = worst.min(fps);
            }
        }
        assert_relative_eq!(fps, 60.0, epsilon = 0.1);
        assert!(
            worst > 59.0,
            "warmup frames reported {worst} fps under a steady 60 Hz clock"
        );
    }

    #[test]
    fn test_frame_rate_counter_first_frame_reports_reference() {
        let mut counter = FrameRateCounter::new();
        assert_relative_eq!(counter.record(1_700_000_000_000_000_000), 60.0);
    }

    #[test]
    fn test_frame_rate_counter_clamps_degenerate_input() {
        let mut counter = FrameRateCounter::new();
        // Identical timestamps: elapsed is zero, rate must stay usable
        assert!(counter.record(1000) >= MIN_FRAME_RATE);
        assert!(counter.record(1000) >= MIN_FRAME_RATE);
    }
}
