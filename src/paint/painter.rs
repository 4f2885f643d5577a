//! Display state to paint plan.

use std::sync::Arc;

use kurbo::{Circle, RoundedRect, RoundedRectRadii, Shape};

use crate::assets::decode::PreparedImage;
use crate::foundation::core::{Point, Rect, Rgba8};
use crate::foundation::error::TermreelResult;
use crate::paint::geometry::{Geometry, WindowDots, dots_extent};
use crate::paint::plan::{DrawOp, PaintPlan};
use crate::style::config::{CursorStyle, StyleConfig};
use crate::style::theme::Theme;
use crate::text::measure::TextMeasurer;
use crate::timeline::state::DisplayState;

/// Half period of the cursor blink in live previews.
pub const CURSOR_BLINK_HALF_PERIOD_MS: u64 = 530;

const GLOW_OPACITY: f32 = 0.35;
const SCANLINE_OPACITY: f32 = 0.12;
const SCANLINE_PITCH: u32 = 3;
const CRT_OPACITY: f32 = 0.25;
const SHAPE_TOLERANCE: f64 = 0.1;

/// Presentation flags that are not part of the display state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PaintOptions {
    /// Animation is running; the typing cursor is only drawn while this is set.
    pub animating: bool,
    /// Suppress the typing cursor and keep the resting cursor solid. Lines are painted as given;
    /// pass [`DisplayState::finished`] for a fully revealed still.
    pub force_complete: bool,
    /// Blink phase; `false` hides cursors for this frame.
    pub cursor_visible: bool,
}

impl PaintOptions {
    /// Flags for frames of an animated export.
    pub fn animated() -> Self {
        Self {
            animating: true,
            force_complete: false,
            cursor_visible: true,
        }
    }

    /// Flags for a single fully revealed still.
    pub fn still() -> Self {
        Self {
            animating: false,
            force_complete: true,
            cursor_visible: true,
        }
    }

    /// Flags for a live preview frame at `now_ms`.
    pub fn live(animating: bool, now_ms: u64, blink: bool) -> Self {
        Self {
            animating,
            force_complete: false,
            cursor_visible: cursor_blink_visible(now_ms, blink),
        }
    }
}

impl Default for PaintOptions {
    fn default() -> Self {
        Self::animated()
    }
}

/// Whether a blinking cursor is lit at `now_ms`. Always `true` when blinking is disabled.
pub fn cursor_blink_visible(now_ms: u64, blink: bool) -> bool {
    !blink || (now_ms / CURSOR_BLINK_HALF_PERIOD_MS) % 2 == 0
}

/// Compiles display states into [`PaintPlan`]s for one style and geometry.
#[derive(Clone, Debug)]
pub struct Painter<'a> {
    style: &'a StyleConfig,
    theme: Theme,
    geometry: Geometry,
    background: Option<Arc<PreparedImage>>,
}

impl<'a> Painter<'a> {
    /// Resolve the theme once for all frames painted with `style`.
    pub fn new(style: &'a StyleConfig, geometry: Geometry) -> TermreelResult<Self> {
        Ok(Self {
            style,
            theme: style.resolved_theme()?,
            geometry,
            background: None,
        })
    }

    /// Overlay `image` on the window background at the configured opacity.
    pub fn with_background(mut self, image: Arc<PreparedImage>) -> Self {
        self.background = Some(image);
        self
    }

    /// Layout metrics in use.
    pub fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    /// Resolved theme colors.
    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    /// Build the plan for `state`.
    ///
    /// Paint order: window background, background image, title bar, text rows with their
    /// prompts and cursor, resting line, effect overlays.
    pub fn paint(
        &self,
        state: &DisplayState,
        opts: PaintOptions,
        measurer: &mut dyn TextMeasurer,
    ) -> TermreelResult<PaintPlan> {
        let g = &self.geometry;
        let mut ops = Vec::new();

        self.paint_window(&mut ops);
        if self.style.window_chrome {
            self.paint_title_bar(&mut ops, measurer)?;
        }

        let segments = self.style.prompt_segments();
        let (last_segment, leading_segments) =
            segments.split_last().map_or(("", &[][..]), |(l, rest)| (*l, rest));
        let prompt_w = measurer.measure(&self.style.font, g.font_size, last_segment)?;

        let cursor_allowed = opts.animating && !opts.force_complete && opts.cursor_visible;
        let mut row = 0usize;
        for (index, line) in state.lines.iter().enumerate() {
            let mut x = g.padding;
            if line.show_prompt {
                for seg in leading_segments {
                    self.push_text(&mut ops, seg, x, row, self.theme.prompt);
                    row += 1;
                }
                self.push_text(&mut ops, last_segment, x, row, self.theme.prompt);
                x += prompt_w;
            }
            self.push_text(&mut ops, &line.text, x, row, self.theme.foreground);

            if cursor_allowed && index == state.current_line && !line.complete {
                let text_w = measurer.measure(&self.style.font, g.font_size, &line.text)?;
                self.push_cursor(&mut ops, x + text_w, row);
            }
            row += 1;
        }

        if state.is_complete {
            self.push_text(&mut ops, last_segment, g.padding, row, self.theme.prompt);
            if opts.force_complete || opts.cursor_visible {
                self.push_cursor(&mut ops, g.padding + prompt_w, row);
            }
        }

        self.paint_effects(&mut ops);

        Ok(PaintPlan {
            canvas: g.canvas,
            ops,
        })
    }

    fn canvas_rect(&self) -> Rect {
        Rect::new(
            0.0,
            0.0,
            f64::from(self.geometry.canvas.width),
            f64::from(self.geometry.canvas.height),
        )
    }

    fn paint_window(&self, ops: &mut Vec<DrawOp>) {
        let outer = self.canvas_rect();
        let radius = f64::from(self.geometry.border_radius);
        ops.push(DrawOp::FillPath {
            path: RoundedRect::from_rect(outer, radius).to_path(SHAPE_TOLERANCE),
            color: self.theme.border,
            opacity: 1.0,
        });
        ops.push(DrawOp::FillPath {
            path: RoundedRect::from_rect(outer.inset(-1.0), (radius - 1.0).max(0.0))
                .to_path(SHAPE_TOLERANCE),
            color: self.theme.background,
            opacity: 1.0,
        });

        if let (Some(image), Some(spec)) = (&self.background, &self.style.background_image) {
            ops.push(DrawOp::Image {
                image: Arc::clone(image),
                rect: outer.inset(-1.0),
                opacity: spec.opacity.clamp(0.0, 1.0),
            });
        }
    }

    fn paint_title_bar(
        &self,
        ops: &mut Vec<DrawOp>,
        measurer: &mut dyn TextMeasurer,
    ) -> TermreelResult<()> {
        let g = &self.geometry;
        let width = f64::from(g.canvas.width);
        let bar_h = f64::from(g.title_bar);
        let radius = f64::from(g.border_radius);
        let bar = Rect::new(1.0, 1.0, width - 1.0, bar_h);
        let top_radius = (radius - 1.0).max(0.0);
        ops.push(DrawOp::FillPath {
            path: RoundedRect::from_rect(
                bar,
                RoundedRectRadii::new(top_radius, top_radius, 0.0, 0.0),
            )
            .to_path(SHAPE_TOLERANCE),
            color: self.theme.title_bar,
            opacity: 1.0,
        });

        let dots = WindowDots::new(g.title_bar, g.padding);
        for (i, color) in self.theme.dots.iter().enumerate() {
            let center = (f64::from(dots.center_x(i)), f64::from(dots.cy));
            ops.push(DrawOp::FillPath {
                path: Circle::new(center, f64::from(dots.radius)).to_path(SHAPE_TOLERANCE),
                color: *color,
                opacity: 1.0,
            });
        }

        if !self.style.title.is_empty() {
            let title_w =
                f64::from(measurer.measure(&self.style.font, g.font_size, &self.style.title)?);
            let x = ((width - title_w) / 2.0).max(f64::from(dots_extent(g.title_bar)));
            ops.push(DrawOp::Text {
                text: self.style.title.clone(),
                origin: Point::new(x, 0.0),
                line_height: g.title_bar,
                size_px: g.font_size,
                color: self.theme.title_text,
                opacity: 1.0,
            });
        }
        Ok(())
    }

    fn push_text(&self, ops: &mut Vec<DrawOp>, text: &str, x: f32, row: usize, color: Rgba8) {
        if text.is_empty() {
            return;
        }
        let g = &self.geometry;
        let y = g.row_top(row);
        let op = |dx: f32, opacity: f32| DrawOp::Text {
            text: text.to_owned(),
            origin: Point::new(f64::from(x + dx), f64::from(y + dx)),
            line_height: g.line_px,
            size_px: g.font_size,
            color,
            opacity,
        };
        if self.style.effects.glow {
            ops.push(op(1.0, GLOW_OPACITY));
        }
        ops.push(op(0.0, 1.0));
    }

    fn push_cursor(&self, ops: &mut Vec<DrawOp>, x: f32, row: usize) {
        let g = &self.geometry;
        let top = g.row_top(row) + (g.line_px - g.font_size) / 2.0;
        let bottom = top + g.font_size;
        let (x0, y0, x1, y1) = match self.style.cursor_style {
            CursorStyle::Block => (x, top, x + g.cell_width, bottom),
            CursorStyle::Underline => {
                let h = (g.font_size * 0.12).max(1.0);
                (x, bottom - h, x + g.cell_width, bottom)
            }
            CursorStyle::Bar => (x, top, x + (g.font_size * 0.1).max(1.0), bottom),
        };
        ops.push(DrawOp::FillRect {
            rect: Rect::new(f64::from(x0), f64::from(y0), f64::from(x1), f64::from(y1)),
            color: self.theme.cursor,
            opacity: 1.0,
        });
    }

    fn paint_effects(&self, ops: &mut Vec<DrawOp>) {
        let canvas = self.geometry.canvas;
        let (w, h) = (f64::from(canvas.width), f64::from(canvas.height));
        let shade = Rgba8::rgb(0, 0, 0);

        if self.style.effects.scanlines {
            for y in (0..canvas.height).step_by(SCANLINE_PITCH as usize) {
                let y = f64::from(y);
                ops.push(DrawOp::FillRect {
                    rect: Rect::new(0.0, y, w, y + 1.0),
                    color: shade,
                    opacity: SCANLINE_OPACITY,
                });
            }
        }

        if self.style.effects.crt {
            let band = (w.min(h) * 0.04).max(4.0);
            for rect in [
                Rect::new(0.0, 0.0, w, band),
                Rect::new(0.0, h - band, w, h),
                Rect::new(0.0, band, band, h - band),
                Rect::new(w - band, band, w, h - band),
            ] {
                ops.push(DrawOp::FillRect {
                    rect,
                    color: shade,
                    opacity: CRT_OPACITY,
                });
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/paint/painter.rs"]
mod tests;
