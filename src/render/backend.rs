use crate::assets::font::PreparedFont;
use crate::foundation::error::TermreelResult;
use crate::paint::plan::PaintPlan;

/// A rendered frame as RGBA8 pixels.
///
/// Backends produce **premultiplied** alpha; the flag makes this explicit at API boundaries.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameRGBA {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// RGBA8 bytes, tightly packed, row-major.
    pub data: Vec<u8>,
    /// Whether `data` is premultiplied alpha.
    pub premultiplied: bool,
}

impl FrameRGBA {
    /// Straight-alpha copy of the pixels, as image encoders expect them.
    pub fn to_straight_rgba8(&self) -> Vec<u8> {
        let mut data = self.data.clone();
        if self.premultiplied {
            crate::foundation::core::unpremultiply_rgba8_in_place(&mut data);
        }
        data
    }

    /// The RGBA8 value at pixel `(x, y)`, if in bounds.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = (y as usize * self.width as usize + x as usize) * 4;
        let px = self.data.get(i..i + 4)?;
        Some([px[0], px[1], px[2], px[3]])
    }
}

/// Settings needed to construct an equivalent backend on a worker thread.
#[derive(Clone, Debug, Default)]
pub struct RenderSettings {
    /// Font that every [`crate::DrawOp::Text`] is rasterized with.
    pub font: Option<PreparedFont>,
}

/// A rasterizer for [`PaintPlan`]s.
pub trait RenderBackend {
    /// Execute `plan` and read back the finished frame.
    fn render_plan(&mut self, plan: &PaintPlan) -> TermreelResult<FrameRGBA>;

    /// Return settings required to construct equivalent worker backends.
    ///
    /// Parallel exports are only possible when this returns `Some`.
    fn worker_render_settings(&self) -> Option<RenderSettings> {
        None
    }
}
