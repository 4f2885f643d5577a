//! Termreel renders scripted terminal sessions into typing animations and stills.
//!
//! A script is plain text: lines starting with `>` are commands, a line containing only `!!`
//! toggles an instant block whose lines appear at once, and everything else is output.
//!
//! - Parse a script with [`parse_text`]
//! - Drive a live preview with [`AnimationDriver`], or materialize an export timeline with
//!   [`generate`]
//! - Compile display states into [`PaintPlan`]s with a [`Painter`] and rasterize them with
//!   [`CpuBackend`]
//! - Stream frames into a [`FrameSink`] ([`GifSink`], [`InMemorySink`]) or write a PNG still
//!
//! Both timing engines share one reveal policy, so the driver's resting state equals the last
//! frame of the generated timeline.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

/// Live, tick-driven animation.
pub mod animation;
/// Decoded fonts and images.
pub mod assets;
/// Frame sinks and image encoders.
pub mod encode;
/// Core primitives and error types.
pub mod foundation;
/// Display state to paint plans.
pub mod paint;
/// Rasterization backends and the export pipeline.
pub mod render;
/// Script parsing.
pub mod script;
/// Style configuration and themes.
pub mod style;
/// Text shaping and measurement.
pub mod text;
/// Export timeline generation.
pub mod timeline;

pub use crate::animation::driver::{AnimationDriver, Continuation, DriverParams, TickOutcome};
pub use crate::assets::decode::{PreparedImage, decode_image, load_image};
pub use crate::assets::font::PreparedFont;
pub use crate::encode::gif::GifSink;
pub use crate::encode::png::{encode_png, write_png};
pub use crate::encode::sink::{CapturedFrame, FrameSink, InMemorySink, SinkConfig};
pub use crate::foundation::core::{BezPath, Canvas, Point, Rect, Rgba8};
pub use crate::foundation::error::{TermreelError, TermreelResult};
pub use crate::paint::geometry::{Geometry, MIN_FONT_SIZE_PX, TargetSize, measure_geometry};
pub use crate::paint::painter::{PaintOptions, Painter, cursor_blink_visible};
pub use crate::paint::plan::{DrawOp, PaintPlan};
pub use crate::render::backend::{FrameRGBA, RenderBackend, RenderSettings};
pub use crate::render::cpu::CpuBackend;
pub use crate::render::pipeline::{
    ExportOpts, ExportStats, RenderThreading, export_gif, export_png, render_static,
    render_timeline,
};
pub use crate::script::parser::{
    EntryKind, ScriptEntry, ScriptSyntax, parse, parse_text, parse_with, split_input,
};
pub use crate::style::config::{
    BackgroundImageSpec, CursorStyle, Effects, FontSpec, StyleConfig, ThemeRef,
};
pub use crate::style::theme::{BUILTIN_THEMES, Theme};
pub use crate::text::measure::{MonospaceMeasurer, ParleyMeasurer, TextMeasurer};
pub use crate::timeline::generator::{TimelineParams, generate, total_duration_ms};
pub use crate::timeline::policy::{OutputMode, RevealStep, is_instant, reveal_plan};
pub use crate::timeline::state::{DisplayLine, DisplayState, TimelineFrame};
