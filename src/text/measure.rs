//! Text measurement capability.
//!
//! Sizing and painting must agree on metrics, so one measurer instance is handed to both for a
//! given render request.

use std::collections::HashMap;

use crate::assets::font::PreparedFont;
use crate::foundation::error::{TermreelError, TermreelResult};
use crate::style::config::FontSpec;
use crate::text::engine::{TextBrushRgba8, TextLayoutEngine};

/// Pixel width of a string in a given font and size.
pub trait TextMeasurer {
    /// Advance width of `text` in pixels. Failures must propagate; callers never guess.
    fn measure(&mut self, font: &FontSpec, size_px: f32, text: &str) -> TermreelResult<f32>;
}

/// Fixed-advance measurer: every character is `size_px * advance_ratio` wide.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MonospaceMeasurer {
    /// Character advance as a ratio of font size.
    pub advance_ratio: f32,
}

impl Default for MonospaceMeasurer {
    fn default() -> Self {
        Self { advance_ratio: 0.6 }
    }
}

impl TextMeasurer for MonospaceMeasurer {
    fn measure(&mut self, _font: &FontSpec, size_px: f32, text: &str) -> TermreelResult<f32> {
        if !size_px.is_finite() || size_px <= 0.0 {
            return Err(TermreelError::measure("text size_px must be finite and > 0"));
        }
        Ok(text.chars().count() as f32 * size_px * self.advance_ratio)
    }
}

/// Shaping measurer backed by Parley and real font bytes.
#[derive(Default)]
pub struct ParleyMeasurer {
    engine: TextLayoutEngine,
    fonts: HashMap<FontSpec, PreparedFont>,
}

impl ParleyMeasurer {
    /// Measurer that loads fonts from `FontSpec::path` on first use.
    pub fn new() -> Self {
        Self::default()
    }

    /// Measurer with `font` pre-registered for `spec`, so no file IO happens later.
    pub fn with_font(spec: &FontSpec, font: PreparedFont) -> Self {
        let mut m = Self::new();
        m.fonts.insert(spec.clone(), font);
        m
    }

    fn font_for(&mut self, spec: &FontSpec) -> TermreelResult<PreparedFont> {
        if let Some(font) = self.fonts.get(spec) {
            return Ok(font.clone());
        }
        let font = PreparedFont::load(spec)
            .map_err(|e| TermreelError::measure(format!("cannot load font: {e}")))?;
        self.fonts.insert(spec.clone(), font.clone());
        Ok(font)
    }
}

impl TextMeasurer for ParleyMeasurer {
    fn measure(&mut self, font: &FontSpec, size_px: f32, text: &str) -> TermreelResult<f32> {
        if text.is_empty() {
            return Ok(0.0);
        }
        let prepared = self.font_for(font)?;
        let family = self.engine.register_font(&prepared)?;
        let layout = self
            .engine
            .layout_line(text, &family, size_px, TextBrushRgba8::default())?;
        Ok(layout.full_width())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/text/measure.rs"]
mod tests;
