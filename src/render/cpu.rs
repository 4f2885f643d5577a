use std::collections::HashMap;
use std::sync::Arc;

use crate::assets::decode::PreparedImage;
use crate::foundation::core::{BezPath, Point, Rgba8};
use crate::foundation::error::{TermreelError, TermreelResult};
use crate::paint::plan::{DrawOp, PaintPlan};
use crate::render::backend::{FrameRGBA, RenderBackend, RenderSettings};
use crate::text::engine::{TextBrushRgba8, TextLayoutEngine};

/// CPU raster backend powered by `vello_cpu`.
pub struct CpuBackend {
    settings: RenderSettings,
    text: TextLayoutEngine,
    font: Option<(vello_cpu::peniko::FontData, String)>,
    image_cache: HashMap<usize, vello_cpu::Image>,
    surface: Option<vello_cpu::Pixmap>,
}

impl CpuBackend {
    /// Create a backend; text ops fail unless `settings.font` is set.
    pub fn new(settings: RenderSettings) -> Self {
        Self {
            settings,
            text: TextLayoutEngine::new(),
            font: None,
            image_cache: HashMap::new(),
            surface: None,
        }
    }

    fn ensure_surface(&mut self, width: u16, height: u16) -> &mut vello_cpu::Pixmap {
        let reuse = self
            .surface
            .as_ref()
            .is_some_and(|p| p.width() == width && p.height() == height);
        if !reuse {
            self.surface = None;
        }
        self.surface
            .get_or_insert_with(|| vello_cpu::Pixmap::new(width, height))
    }

    fn font(&mut self) -> TermreelResult<(vello_cpu::peniko::FontData, String)> {
        if let Some(font) = &self.font {
            return Ok(font.clone());
        }
        let prepared = self.settings.font.clone().ok_or_else(|| {
            TermreelError::render(
                "text op requires a font; set FontSpec::path or RenderSettings::font",
            )
        })?;
        let family = self.text.register_font(&prepared)?;
        let data = vello_cpu::peniko::FontData::new(
            vello_cpu::peniko::Blob::from(prepared.bytes.as_ref().clone()),
            0,
        );
        self.font = Some((data.clone(), family.clone()));
        Ok((data, family))
    }

    fn image_paint_for(&mut self, image: &Arc<PreparedImage>) -> TermreelResult<vello_cpu::Image> {
        let key = Arc::as_ptr(image) as usize;
        if let Some(paint) = self.image_cache.get(&key) {
            return Ok(paint.clone());
        }
        let pixmap =
            image_premul_bytes_to_pixmap(image.rgba8_premul.as_slice(), image.width, image.height)?;
        let paint = vello_cpu::Image {
            image: vello_cpu::ImageSource::Pixmap(Arc::new(pixmap)),
            sampler: vello_cpu::peniko::ImageSampler::default(),
        };
        self.image_cache.insert(key, paint.clone());
        Ok(paint)
    }
}

impl RenderBackend for CpuBackend {
    fn render_plan(&mut self, plan: &PaintPlan) -> TermreelResult<FrameRGBA> {
        let width: u16 = plan
            .canvas
            .width
            .try_into()
            .map_err(|_| TermreelError::render("surface width exceeds u16"))?;
        let height: u16 = plan
            .canvas
            .height
            .try_into()
            .map_err(|_| TermreelError::render("surface height exceeds u16"))?;
        if width == 0 || height == 0 {
            return Err(TermreelError::render("surface must be at least 1x1"));
        }

        let mut ctx = vello_cpu::RenderContext::new(width, height);
        for op in &plan.ops {
            draw_op(self, &mut ctx, op)?;
        }
        ctx.flush();

        let surface = self.ensure_surface(width, height);
        ctx.render_to_pixmap(surface);

        Ok(FrameRGBA {
            width: plan.canvas.width,
            height: plan.canvas.height,
            data: surface.data_as_u8_slice().to_vec(),
            premultiplied: true,
        })
    }

    fn worker_render_settings(&self) -> Option<RenderSettings> {
        Some(self.settings.clone())
    }
}

fn with_opacity(
    ctx: &mut vello_cpu::RenderContext,
    opacity: f32,
    draw: impl FnOnce(&mut vello_cpu::RenderContext),
) {
    if opacity < 1.0 {
        ctx.push_opacity_layer(opacity.max(0.0));
        draw(ctx);
        ctx.pop_layer();
    } else {
        draw(ctx);
    }
}

fn paint_color(c: Rgba8) -> vello_cpu::peniko::Color {
    vello_cpu::peniko::Color::from_rgba8(c.r, c.g, c.b, c.a)
}

fn draw_op(
    backend: &mut CpuBackend,
    ctx: &mut vello_cpu::RenderContext,
    op: &DrawOp,
) -> TermreelResult<()> {
    ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
    ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);

    match op {
        DrawOp::FillRect {
            rect,
            color,
            opacity,
        } => {
            ctx.set_paint(paint_color(*color));
            let r = vello_cpu::kurbo::Rect::new(rect.x0, rect.y0, rect.x1, rect.y1);
            with_opacity(ctx, *opacity, |ctx| ctx.fill_rect(&r));
            Ok(())
        }
        DrawOp::FillPath {
            path,
            color,
            opacity,
        } => {
            ctx.set_paint(paint_color(*color));
            let cpu_path = bezpath_to_cpu(path);
            with_opacity(ctx, *opacity, |ctx| ctx.fill_path(&cpu_path));
            Ok(())
        }
        DrawOp::Image {
            image,
            rect,
            opacity,
        } => {
            if image.width == 0 || image.height == 0 {
                return Ok(());
            }
            let paint = backend.image_paint_for(image)?;
            let (w, h) = (f64::from(image.width), f64::from(image.height));
            let transform = vello_cpu::kurbo::Affine::translate((rect.x0, rect.y0))
                * vello_cpu::kurbo::Affine::scale_non_uniform(rect.width() / w, rect.height() / h);
            ctx.set_transform(transform);
            ctx.set_paint(paint);
            with_opacity(ctx, *opacity, |ctx| {
                ctx.fill_rect(&vello_cpu::kurbo::Rect::new(0.0, 0.0, w, h));
            });
            Ok(())
        }
        DrawOp::Text {
            text,
            origin,
            line_height,
            size_px,
            color,
            opacity,
        } => {
            let (font, family) = backend.font()?;
            let brush = TextBrushRgba8 {
                r: color.r,
                g: color.g,
                b: color.b,
                a: color.a,
            };
            let layout = backend.text.layout_line(text, &family, *size_px, brush)?;
            let dy = (f64::from(*line_height) - f64::from(layout.height())) / 2.0;
            ctx.set_transform(vello_cpu::kurbo::Affine::translate((origin.x, origin.y + dy)));

            with_opacity(ctx, *opacity, |ctx| {
                for line in layout.lines() {
                    for item in line.items() {
                        let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                            continue;
                        };
                        let brush = run.style().brush;
                        ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
                            brush.r, brush.g, brush.b, brush.a,
                        ));
                        let glyphs = run.positioned_glyphs().map(|g| vello_cpu::Glyph {
                            id: g.id,
                            x: g.x,
                            y: g.y,
                        });
                        ctx.glyph_run(&font)
                            .font_size(run.run().font_size())
                            .fill_glyphs(glyphs);
                    }
                }
            });
            Ok(())
        }
    }
}

fn point_to_cpu(p: Point) -> vello_cpu::kurbo::Point {
    vello_cpu::kurbo::Point::new(p.x, p.y)
}

fn bezpath_to_cpu(path: &BezPath) -> vello_cpu::kurbo::BezPath {
    use kurbo::PathEl;

    let mut out = vello_cpu::kurbo::BezPath::new();
    for &el in path.elements() {
        match el {
            PathEl::MoveTo(p) => out.move_to(point_to_cpu(p)),
            PathEl::LineTo(p) => out.line_to(point_to_cpu(p)),
            PathEl::QuadTo(p1, p2) => out.quad_to(point_to_cpu(p1), point_to_cpu(p2)),
            PathEl::CurveTo(p1, p2, p3) => {
                out.curve_to(point_to_cpu(p1), point_to_cpu(p2), point_to_cpu(p3));
            }
            PathEl::ClosePath => out.close_path(),
        }
    }
    out
}

fn image_premul_bytes_to_pixmap(
    rgba8_premul: &[u8],
    width: u32,
    height: u32,
) -> TermreelResult<vello_cpu::Pixmap> {
    let w: u16 = width
        .try_into()
        .map_err(|_| TermreelError::render("image width exceeds u16"))?;
    let h: u16 = height
        .try_into()
        .map_err(|_| TermreelError::render("image height exceeds u16"))?;
    if rgba8_premul.len() != width as usize * height as usize * 4 {
        return Err(TermreelError::render("prepared image byte length mismatch"));
    }

    let mut may_have_opacities = false;
    let pixels = rgba8_premul
        .chunks_exact(4)
        .map(|px| {
            may_have_opacities |= px[3] != 255;
            vello_cpu::peniko::color::PremulRgba8 {
                r: px[0],
                g: px[1],
                b: px[2],
                a: px[3],
            }
        })
        .collect::<Vec<_>>();

    Ok(vello_cpu::Pixmap::from_parts_with_opacity(
        pixels,
        w,
        h,
        may_have_opacities,
    ))
}

#[cfg(test)]
#[path = "../../tests/unit/render/cpu.rs"]
mod tests;
