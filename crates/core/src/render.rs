//! Abstract 2D drawing surface and render-ready particle snapshots
//!
//! The core never touches a real canvas. The owning view implements
//! [`RenderSurface`] over whatever 2D context it has (a GPU canvas, a
//! software framebuffer); tests and the headless demo use
//! [`RecordingSurface`], which just captures the draw calls.

use crate::core_types::{BlendMode, Rgba};
use serde::{Deserialize, Serialize};

/// Minimal 2D drawing contract required to paint the flame.
pub trait RenderSurface {
    /// Clear the whole surface to a solid color.
    fn clear(&mut self, color: Rgba);

    /// Set the global alpha applied to subsequent fills, in [0, 1].
    fn set_global_alpha(&mut self, alpha: f64);

    /// Set the compositing mode for subsequent fills.
    fn set_blend_mode(&mut self, mode: BlendMode);

    /// Set the fill color for subsequent shapes.
    fn set_fill(&mut self, color: Rgba);

    /// Fill an axis-aligned oval with top-left corner (x, y).
    fn fill_oval(&mut self, x: f64, y: f64, width: f64, height: f64);
}

/// One particle reduced to exactly what a canvas needs to draw it.
///
/// Produced per frame for consumers that want data rather than draw
/// calls (remote views, the haul-chart overlay's flame thumbnail).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ParticleSnapshot {
    pub x: f64,
    pub y: f64,
    pub radius: f64,
    pub color: Rgba,
    pub alpha: f64,
    pub blend_mode: BlendMode,
}

/// A draw call captured by [`RecordingSurface`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DrawOp {
    Clear(Rgba),
    SetGlobalAlpha(f64),
    SetBlendMode(BlendMode),
    SetFill(Rgba),
    FillOval { x: f64, y: f64, width: f64, height: f64 },
}

/// Surface double that records draw calls instead of rasterizing.
#[derive(Debug, Default)]
pub struct RecordingSurface {
    ops: Vec<DrawOp>,
}

impl RecordingSurface {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// All draw calls recorded so far, in order.
    #[must_use]
    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    /// Number of ovals filled (one per rendered particle).
    #[must_use]
    pub fn oval_count(&self) -> usize {
        self.ops
            .iter()
            .filter(|op| matches!(op, DrawOp::FillOval { .. }))
            .count()
    }

    /// Forget recorded calls, keeping the allocation.
    pub fn reset(&mut self) {
        self.ops.clear();
    }
}

impl RenderSurface for RecordingSurface {
    fn clear(&mut self, color: Rgba) {
        self.ops.push(DrawOp::Clear(color));
    }

    fn set_global_alpha(&mut self, alpha: f64) {
        self.ops.push(DrawOp::SetGlobalAlpha(alpha));
    }

    fn set_blend_mode(&mut self, mode: BlendMode) {
        self.ops.push(DrawOp::SetBlendMode(mode));
    }

    fn set_fill(&mut self, color: Rgba) {
        self.ops.push(DrawOp::SetFill(color));
    }

    fn fill_oval(&mut self, x: f64, y: f64, width: f64, height: f64) {
        self.ops.push(DrawOp::FillOval {
            x,
            y,
            width,
            height,
        });
    }
}
