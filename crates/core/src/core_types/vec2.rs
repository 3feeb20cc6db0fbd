//! Vector type alias for 2D positions and velocities.

use nalgebra::Vector2;

/// 2D vector type for particle positions, velocities, and emission origins.
///
/// This is a simple alias for `nalgebra::Vector2<f64>`, used throughout
/// the simulation in canvas coordinates: x grows rightward, y grows
/// downward, so upward motion carries a negative y velocity.
pub type Vec2 = Vector2<f64>;
