use std::path::Path;
use std::sync::Arc;

use rayon::prelude::*;

use crate::assets::decode::load_image;
use crate::assets::font::PreparedFont;
use crate::encode::gif::GifSink;
use crate::encode::png::write_png;
use crate::encode::sink::{FrameSink, SinkConfig};
use crate::foundation::error::{TermreelError, TermreelResult};
use crate::paint::geometry::{TargetSize, measure_geometry};
use crate::paint::painter::{PaintOptions, Painter};
use crate::paint::plan::PaintPlan;
use crate::render::backend::{FrameRGBA, RenderBackend, RenderSettings};
use crate::render::cpu::CpuBackend;
use crate::script::parser::{ScriptEntry, parse_text};
use crate::style::config::StyleConfig;
use crate::text::measure::{ParleyMeasurer, TextMeasurer};
use crate::timeline::generator::{generate, total_duration_ms};
use crate::timeline::state::{DisplayState, TimelineFrame};

#[derive(Clone, Debug)]
/// Threading and chunking controls for multi-frame rendering.
pub struct RenderThreading {
    /// Enable parallel rasterization when `true`.
    pub parallel: bool,
    /// Chunk size in frames for batched scheduling.
    pub chunk_size: usize,
    /// Optional explicit worker thread count.
    pub threads: Option<usize>,
}

impl Default for RenderThreading {
    fn default() -> Self {
        Self {
            parallel: false,
            chunk_size: 64,
            threads: None,
        }
    }
}

/// Options for [`render_timeline`].
#[derive(Clone, Debug)]
pub struct ExportOpts {
    /// Fixed output size; `None` sizes the canvas from content.
    pub target: Option<TargetSize>,
    /// Render threading/chunking configuration.
    pub threading: RenderThreading,
    /// Yield the thread after this many frames; `0` never yields.
    pub yield_every: usize,
}

impl Default for ExportOpts {
    fn default() -> Self {
        Self {
            target: None,
            threading: RenderThreading::default(),
            yield_every: 8,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
/// Counters returned by an export.
pub struct ExportStats {
    /// Frames pushed to the sink.
    pub frames: usize,
    /// Sum of all frame holds.
    pub total_duration_ms: u64,
}

fn painter_for<'a>(
    entries: &[ScriptEntry],
    style: &'a StyleConfig,
    target: Option<TargetSize>,
    measurer: &mut dyn TextMeasurer,
) -> TermreelResult<Painter<'a>> {
    style.validate()?;
    let geometry = measure_geometry(entries, style, target, measurer)?;
    let painter = Painter::new(style, geometry)?;
    Ok(match &style.background_image {
        Some(spec) => painter.with_background(Arc::new(load_image(&spec.path)?)),
        None => painter,
    })
}

/// Render the fully revealed session as one still frame.
#[tracing::instrument(skip_all, fields(entry_count = entries.len()))]
pub fn render_static(
    entries: &[ScriptEntry],
    style: &StyleConfig,
    target: Option<TargetSize>,
    measurer: &mut dyn TextMeasurer,
    backend: &mut dyn RenderBackend,
) -> TermreelResult<FrameRGBA> {
    let painter = painter_for(entries, style, target, measurer)?;
    let state = DisplayState::finished(entries);
    let plan = painter.paint(&state, PaintOptions::still(), measurer)?;
    backend.render_plan(&plan)
}

/// Generate the export timeline for `entries`, rasterize every frame and stream it into `sink`.
///
/// Geometry is computed once so all frames share a canvas. Frames reach the sink in timeline
/// order regardless of threading.
#[tracing::instrument(skip_all, fields(entry_count = entries.len()))]
pub fn render_timeline(
    entries: &[ScriptEntry],
    style: &StyleConfig,
    opts: &ExportOpts,
    measurer: &mut dyn TextMeasurer,
    backend: &mut dyn RenderBackend,
    sink: &mut dyn FrameSink,
) -> TermreelResult<ExportStats> {
    let painter = painter_for(entries, style, opts.target, measurer)?;
    let timeline = generate(entries, &style.timeline_params());
    let stats = ExportStats {
        frames: timeline.len(),
        total_duration_ms: total_duration_ms(&timeline),
    };
    let canvas = painter.geometry().canvas;

    sink.begin(SinkConfig {
        width: canvas.width,
        height: canvas.height,
        frame_count: stats.frames,
        total_duration_ms: stats.total_duration_ms,
    })?;

    let mut worker = None;
    if opts.threading.parallel {
        let settings = backend.worker_render_settings().ok_or_else(|| {
            TermreelError::render("parallel export requires backend worker settings support")
        })?;
        worker = Some((settings, build_thread_pool(opts.threading.threads)?));
    }

    let chunk_size = opts.threading.chunk_size.max(1);
    let mut pushed = 0usize;
    for chunk in timeline.chunks(chunk_size) {
        let plans = compile_chunk(&painter, chunk, measurer)?;
        let frames = match &worker {
            Some((settings, pool)) => rasterize_parallel(&plans, settings, pool)?,
            None => plans
                .iter()
                .map(|plan| backend.render_plan(plan))
                .collect::<TermreelResult<Vec<_>>>()?,
        };

        for (frame, tf) in frames.iter().zip(chunk) {
            sink.push_frame(pushed, frame, tf.hold_ms)?;
            pushed += 1;
            if opts.yield_every > 0 && pushed % opts.yield_every == 0 {
                tracing::trace!(pushed, "yield");
                std::thread::yield_now();
            }
        }
    }

    sink.end()?;
    tracing::debug!(
        frames = stats.frames,
        duration_ms = stats.total_duration_ms,
        "timeline exported"
    );
    Ok(stats)
}

fn compile_chunk(
    painter: &Painter<'_>,
    chunk: &[TimelineFrame],
    measurer: &mut dyn TextMeasurer,
) -> TermreelResult<Vec<PaintPlan>> {
    chunk
        .iter()
        .map(|tf| painter.paint(&tf.state, PaintOptions::animated(), measurer))
        .collect()
}

fn rasterize_parallel(
    plans: &[PaintPlan],
    settings: &RenderSettings,
    pool: &rayon::ThreadPool,
) -> TermreelResult<Vec<FrameRGBA>> {
    let rendered = pool.install(|| {
        plans
            .par_iter()
            .map_init(
                || CpuBackend::new(settings.clone()),
                |worker_backend, plan| worker_backend.render_plan(plan),
            )
            .collect::<Vec<_>>()
    });
    rendered.into_iter().collect()
}

fn build_thread_pool(threads: Option<usize>) -> TermreelResult<rayon::ThreadPool> {
    if let Some(n) = threads
        && n == 0
    {
        return Err(TermreelError::validation(
            "render threading 'threads' must be >= 1 when set",
        ));
    }

    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    builder
        .build()
        .map_err(|e| TermreelError::render(format!("failed to build rayon thread pool: {e}")))
}

fn font_stack(style: &StyleConfig) -> TermreelResult<(ParleyMeasurer, CpuBackend)> {
    let font = PreparedFont::load(&style.font)?;
    let measurer = ParleyMeasurer::with_font(&style.font, font.clone());
    let backend = CpuBackend::new(RenderSettings { font: Some(font) });
    Ok((measurer, backend))
}

/// Parse `script`, render it with the configured font and write an animated GIF to `path`.
pub fn export_gif(
    path: impl AsRef<Path>,
    script: &str,
    style: &StyleConfig,
    opts: &ExportOpts,
) -> TermreelResult<ExportStats> {
    let entries = parse_text(script);
    let (mut measurer, mut backend) = font_stack(style)?;
    let mut sink = GifSink::create(path)?;
    render_timeline(&entries, style, opts, &mut measurer, &mut backend, &mut sink)
}

/// Parse `script`, render the fully revealed session and write it to `path` as PNG.
pub fn export_png(
    path: impl AsRef<Path>,
    script: &str,
    style: &StyleConfig,
    target: Option<TargetSize>,
) -> TermreelResult<()> {
    let entries = parse_text(script);
    let (mut measurer, mut backend) = font_stack(style)?;
    let frame = render_static(&entries, style, target, &mut measurer, &mut backend)?;
    write_png(path, &frame)
}

#[cfg(test)]
#[path = "../../tests/unit/render/pipeline.rs"]
mod tests;
