//! Flame Simulation Core Library
//!
//! Particle-based flame animation driven by wildland fire-behavior
//! metrics. A stochastic emitter spawns batches of particles whose
//! initial positions and velocities are shaped by easing splines so the
//! plume reads as a flame: wide flickering base, tapering tip, lateral
//! spread tracking the fuel bed. A frame-driven pool integrates the
//! particles, fades them out, and culls them as they expire.
//!
//! This is a stylized, art-directed effect calibrated by heuristic
//! formulas, not a combustion model. The fire-behavior inputs (flame
//! length, heat release, fuel-bed depth, wind) arrive from an external
//! calculation service; the core validates them at the boundary and
//! exposes render-ready particle states to whatever canvas the owning
//! view provides.

// Core types and utilities
pub mod core_types;

// Simulation modules
pub mod emitter;
pub mod interp;
pub mod particle;
pub mod render;
pub mod simulation;

// Re-export core types
pub use core_types::{BlendMode, FireBehaviorSample, RawFireBehavior, Rgba, SampleError, Vec2};

// Re-export simulation types
pub use emitter::{EmitterConfig, FireEmitter, Tuning};
pub use interp::EaseSpline;
pub use particle::{Drift, Particle, MIN_FRAME_RATE, REFERENCE_FRAME_RATE};
pub use render::{DrawOp, ParticleSnapshot, RecordingSurface, RenderSurface};
pub use simulation::{FlameSimulation, FrameRateCounter, FrameStats};
