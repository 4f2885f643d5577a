//! Display state to backend-agnostic paint plans.
//!
//! Painting never touches pixels: it compiles a [`plan::PaintPlan`] that a
//! [`crate::RenderBackend`] rasterizes.

/// Canvas sizing and fit-to-target scaling.
pub mod geometry;
/// Paint order and decoration.
pub mod painter;
/// Draw operations.
pub mod plan;
