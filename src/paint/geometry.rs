//! Canvas sizing.
//!
//! Geometry is computed once per render request from the fully revealed script so every frame of
//! an animation shares one canvas.

use crate::foundation::core::Canvas;
use crate::foundation::error::{TermreelError, TermreelResult};
use crate::script::parser::ScriptEntry;
use crate::style::config::StyleConfig;
use crate::text::measure::TextMeasurer;

/// Smallest font size auto-scaling may produce, in pixels.
pub const MIN_FONT_SIZE_PX: f32 = 8.0;

/// Unscaled height of the title bar when window chrome is enabled.
pub const TITLE_BAR_HEIGHT_PX: f32 = 36.0;

/// Fixed output dimensions requested by the caller.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct TargetSize {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

/// Resolved layout metrics shared by every frame of one render request.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Geometry {
    /// Output surface.
    pub canvas: Canvas,
    /// Effective font size after fitting.
    pub font_size: f32,
    /// Height of one text row in pixels.
    pub line_px: f32,
    /// Effective padding around the content.
    pub padding: f32,
    /// Effective title bar height; zero without window chrome.
    pub title_bar: f32,
    /// Effective corner radius of the window.
    pub border_radius: f32,
    /// Advance of one character cell, used for cursor width.
    pub cell_width: f32,
    /// Factor applied to the configured sizes (`1.0` when nothing was scaled).
    pub scale: f32,
}

impl Geometry {
    /// Top edge of the first text row.
    pub fn content_top(&self) -> f32 {
        self.title_bar + self.padding
    }

    /// Top edge of text row `row`.
    pub fn row_top(&self, row: usize) -> f32 {
        self.content_top() + row as f32 * self.line_px
    }
}

/// Number of text rows needed for `entries`, including multi-line prompts and the resting line.
pub fn row_count(entries: &[ScriptEntry], prompt_segments: usize) -> usize {
    let extra = prompt_segments.saturating_sub(1);
    let body: usize = entries
        .iter()
        .map(|e| if e.show_prompt { 1 + extra } else { 1 })
        .sum();
    body + 1
}

struct Natural {
    width: f32,
    height: f32,
}

fn natural_size(
    entries: &[ScriptEntry],
    style: &StyleConfig,
    font_size: f32,
    padding: f32,
    title_bar: f32,
    measurer: &mut dyn TextMeasurer,
) -> TermreelResult<Natural> {
    let segments = style.prompt_segments();
    let (last, leading) = segments
        .split_last()
        .ok_or_else(|| TermreelError::validation("prompt has no segments"))?;
    let font = &style.font;

    let mut widest_leading = 0.0f32;
    for seg in leading {
        widest_leading = widest_leading.max(measurer.measure(font, font_size, seg)?);
    }
    let prompt_w = measurer.measure(font, font_size, last)?;
    let cell = measurer.measure(font, font_size, "M")?;

    // Resting line: prompt plus cursor.
    let mut widest = prompt_w + cell;
    for entry in entries {
        let text_w = measurer.measure(font, font_size, &entry.text)?;
        let w = if entry.show_prompt {
            widest_leading.max(prompt_w + text_w)
        } else {
            text_w
        };
        widest = widest.max(w + cell);
    }
    if title_bar > 0.0 && !style.title.is_empty() {
        let title_w = measurer.measure(font, font_size, &style.title)?;
        widest = widest.max(title_w + 2.0 * dots_extent(title_bar));
    }

    let mut width = widest + 2.0 * padding;
    if title_bar > 0.0 {
        width = width.max(WindowDots::new(title_bar, padding).right_edge() + padding);
    }

    let rows = row_count(entries, segments.len());
    Ok(Natural {
        width,
        height: rows as f32 * font_size * style.line_height + title_bar + 2.0 * padding,
    })
}

/// Horizontal space reserved for the window-control dots on each side of the title.
pub(crate) fn dots_extent(title_bar: f32) -> f32 {
    title_bar * 2.2
}

/// Placement of the three window-control dots in the title bar.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct WindowDots {
    pub(crate) radius: f32,
    pub(crate) first_cx: f32,
    pub(crate) spacing: f32,
    pub(crate) cy: f32,
}

impl WindowDots {
    pub(crate) const COUNT: usize = 3;

    pub(crate) fn new(title_bar: f32, padding: f32) -> Self {
        let radius = title_bar * 0.17;
        Self {
            radius,
            first_cx: padding.max(radius * 2.0) + radius,
            spacing: radius * 3.2,
            cy: title_bar / 2.0,
        }
    }

    pub(crate) fn center_x(&self, index: usize) -> f32 {
        self.first_cx + index as f32 * self.spacing
    }

    /// Right edge of the last dot.
    pub(crate) fn right_edge(&self) -> f32 {
        self.center_x(Self::COUNT - 1) + self.radius
    }
}

fn to_px(v: f32) -> u32 {
    (v.ceil() as u32).max(1)
}

/// Size the canvas for `entries`.
///
/// Without a target the canvas grows to fit the content. With a target the canvas takes the target
/// dimensions and font size, padding and chrome shrink (never grow) by the tighter of the two fit
/// ratios, with the font floored at [`MIN_FONT_SIZE_PX`].
#[tracing::instrument(skip(entries, style, measurer), fields(entry_count = entries.len()))]
pub fn measure_geometry(
    entries: &[ScriptEntry],
    style: &StyleConfig,
    target: Option<TargetSize>,
    measurer: &mut dyn TextMeasurer,
) -> TermreelResult<Geometry> {
    let title_bar = if style.window_chrome {
        TITLE_BAR_HEIGHT_PX
    } else {
        0.0
    };
    let natural = natural_size(
        entries,
        style,
        style.font_size,
        style.padding,
        title_bar,
        measurer,
    )?;

    let (canvas, scale) = match target {
        None => (
            Canvas {
                width: to_px(natural.width),
                height: to_px(natural.height),
            },
            1.0f32,
        ),
        Some(t) => {
            if t.width == 0 || t.height == 0 {
                return Err(TermreelError::validation(
                    "target width and height must be > 0",
                ));
            }
            let fit_w = t.width as f32 / natural.width;
            let fit_h = t.height as f32 / natural.height;
            (
                Canvas {
                    width: t.width,
                    height: t.height,
                },
                fit_w.min(fit_h).min(1.0),
            )
        }
    };

    let font_size = (style.font_size * scale).max(MIN_FONT_SIZE_PX.min(style.font_size));
    let cell_width = measurer.measure(&style.font, font_size, "M")?;
    if scale < 1.0 {
        tracing::debug!(scale, font_size, "scaled down to fit target");
    }

    Ok(Geometry {
        canvas,
        font_size,
        line_px: font_size * style.line_height,
        padding: style.padding * scale,
        title_bar: title_bar * scale,
        border_radius: style.border_radius * scale,
        cell_width,
        scale,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/paint/geometry.rs"]
mod tests;
