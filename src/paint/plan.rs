use std::sync::Arc;

use crate::assets::decode::PreparedImage;
use crate::foundation::core::{BezPath, Canvas, Point, Rect, Rgba8};

/// Backend-agnostic list of draw operations for one frame.
///
/// Plans are plain data: two equal plans rasterize to identical pixels on the same backend.
#[derive(Clone, Debug, PartialEq)]
pub struct PaintPlan {
    /// Output surface.
    pub canvas: Canvas,
    /// Operations in paint order.
    pub ops: Vec<DrawOp>,
}

/// One draw operation.
#[derive(Clone, Debug, PartialEq)]
pub enum DrawOp {
    /// Axis-aligned solid rectangle.
    FillRect {
        /// Covered area in canvas pixels.
        rect: Rect,
        /// Fill color.
        color: Rgba8,
        /// Layer opacity in `0..=1`.
        opacity: f32,
    },
    /// Solid vector shape (rounded rectangles, dots).
    FillPath {
        /// Outline in canvas pixels.
        path: BezPath,
        /// Fill color.
        color: Rgba8,
        /// Layer opacity in `0..=1`.
        opacity: f32,
    },
    /// Raster image stretched over `rect`.
    Image {
        /// Decoded pixels.
        image: Arc<PreparedImage>,
        /// Destination area in canvas pixels.
        rect: Rect,
        /// Layer opacity in `0..=1`.
        opacity: f32,
    },
    /// One run of single-line text.
    Text {
        /// Characters to draw.
        text: String,
        /// Top-left corner of the text row.
        origin: Point,
        /// Row height; the text is centered vertically within it.
        line_height: f32,
        /// Font size in pixels.
        size_px: f32,
        /// Glyph color.
        color: Rgba8,
        /// Layer opacity in `0..=1`.
        opacity: f32,
    },
}

impl DrawOp {
    /// Text content of a [`DrawOp::Text`].
    pub fn text(&self) -> Option<&str> {
        match self {
            DrawOp::Text { text, .. } => Some(text),
            _ => None,
        }
    }
}

impl PaintPlan {
    /// Text ops in paint order.
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.ops.iter().filter_map(DrawOp::text)
    }
}
