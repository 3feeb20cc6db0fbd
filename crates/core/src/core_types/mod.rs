//! Core types and utilities

pub mod color;
pub mod fire_behavior;
pub mod units;
pub mod vec2;

pub use color::{BlendMode, Rgba};
pub use fire_behavior::{FireBehaviorSample, RawFireBehavior, SampleError};
pub use units::*;
pub use vec2::Vec2;
