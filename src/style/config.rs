use std::path::{Path, PathBuf};

use anyhow::Context;

use crate::animation::driver::DriverParams;
use crate::foundation::error::{TermreelError, TermreelResult};
use crate::style::theme::Theme;
use crate::timeline::generator::TimelineParams;
use crate::timeline::policy::OutputMode;

/// Cursor glyph shape.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CursorStyle {
    /// Full character cell.
    #[default]
    Block,
    /// Thin bar under the character cell.
    Underline,
    /// Thin vertical bar at the insertion point.
    Bar,
}

/// Font descriptor shared by measurement and rasterization.
#[derive(Clone, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct FontSpec {
    /// Display name of the family; informational.
    pub family: String,
    /// TTF/OTF file providing the glyphs.
    pub path: Option<PathBuf>,
}

impl Default for FontSpec {
    fn default() -> Self {
        Self {
            family: "monospace".to_owned(),
            path: None,
        }
    }
}

/// Decorative overlays.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct Effects {
    /// Soft halo under the text.
    pub glow: bool,
    /// Horizontal scanline overlay.
    pub scanlines: bool,
    /// Darkened screen edges.
    pub crt: bool,
}

/// Decorative background image drawn over the terminal background.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct BackgroundImageSpec {
    /// Image file (any format the `image` crate decodes).
    pub path: PathBuf,
    /// Blend opacity in `0..=1`.
    #[serde(default = "default_bg_opacity")]
    pub opacity: f32,
}

fn default_bg_opacity() -> f32 {
    0.3
}

/// Theme selection: a built-in name or an inline color set.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(untagged)]
pub enum ThemeRef {
    /// One of [`crate::BUILTIN_THEMES`].
    Named(String),
    /// Fully specified colors.
    Inline(Box<Theme>),
}

impl Default for ThemeRef {
    fn default() -> Self {
        Self::Named("classic".to_owned())
    }
}

/// Everything that controls how a session looks and moves.
///
/// Read-only for the rendering core; deserialize it from JSON and call
/// [`StyleConfig::validate`] before use.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct StyleConfig {
    /// Color theme.
    pub theme: ThemeRef,
    /// Font used for every glyph.
    pub font: FontSpec,
    /// Font size in pixels.
    pub font_size: f32,
    /// Line height as a multiple of the font size.
    pub line_height: f32,
    /// Inner padding in pixels.
    pub padding: f32,
    /// Window corner radius in pixels.
    pub border_radius: f32,
    /// Cursor glyph.
    pub cursor_style: CursorStyle,
    /// Blink the resting cursor in live previews.
    pub cursor_blink: bool,
    /// Draw the title bar with window-control dots.
    pub window_chrome: bool,
    /// Centered title bar text.
    pub title: String,
    /// Decorative overlays.
    pub effects: Effects,
    /// Optional decorative background image.
    pub background_image: Option<BackgroundImageSpec>,
    /// Prompt shown before commands; `\n` splits it into several lines.
    pub prompt: String,
    /// Output reveal policy.
    pub output_mode: OutputMode,
    /// Milliseconds per typed character.
    pub typing_speed_ms: u32,
    /// Live-preview pause between lines.
    pub line_delay_ms: u32,
    /// Desired number of typing frames in exports.
    pub target_frame_count: u32,
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            theme: ThemeRef::default(),
            font: FontSpec::default(),
            font_size: 14.0,
            line_height: 1.4,
            padding: 20.0,
            border_radius: 8.0,
            cursor_style: CursorStyle::Block,
            cursor_blink: true,
            window_chrome: true,
            title: String::new(),
            effects: Effects::default(),
            background_image: None,
            prompt: "$ ".to_owned(),
            output_mode: OutputMode::Typing,
            typing_speed_ms: 50,
            line_delay_ms: 300,
            target_frame_count: 40,
        }
    }
}

impl StyleConfig {
    /// Deserialize and validate a JSON document.
    pub fn from_json_str(json: &str) -> TermreelResult<Self> {
        let cfg: Self = serde_json::from_str(json)
            .map_err(|e| TermreelError::serde(format!("style config: {e}")))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Read, deserialize and validate a JSON file.
    ///
    /// Relative font and background paths are resolved against the file's directory.
    pub fn from_json_path(path: impl AsRef<Path>) -> TermreelResult<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("read style config {}", path.display()))?;
        let mut cfg = Self::from_json_str(&json)?;
        if let Some(base) = path.parent() {
            cfg.rebase_paths(base);
        }
        Ok(cfg)
    }

    fn rebase_paths(&mut self, base: &Path) {
        if let Some(p) = self.font.path.as_mut()
            && p.is_relative()
        {
            *p = base.join(&*p);
        }
        if let Some(bg) = self.background_image.as_mut()
            && bg.path.is_relative()
        {
            bg.path = base.join(&bg.path);
        }
    }

    /// Check numeric ranges and theme resolution.
    pub fn validate(&self) -> TermreelResult<()> {
        if !self.font_size.is_finite() || self.font_size <= 0.0 {
            return Err(TermreelError::validation(
                "font_size must be finite and > 0",
            ));
        }
        if !self.line_height.is_finite() || self.line_height <= 0.0 {
            return Err(TermreelError::validation(
                "line_height must be finite and > 0",
            ));
        }
        for (name, value) in [
            ("padding", self.padding),
            ("border_radius", self.border_radius),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(TermreelError::validation(format!(
                    "{name} must be finite and >= 0"
                )));
            }
        }
        if self.target_frame_count == 0 {
            return Err(TermreelError::validation("target_frame_count must be > 0"));
        }
        if let Some(bg) = &self.background_image
            && !bg.opacity.is_finite()
        {
            return Err(TermreelError::validation(
                "background_image.opacity must be finite",
            ));
        }
        self.resolved_theme()?;
        Ok(())
    }

    /// Resolve [`StyleConfig::theme`] into concrete colors.
    pub fn resolved_theme(&self) -> TermreelResult<Theme> {
        match &self.theme {
            ThemeRef::Named(name) => Theme::by_name(name),
            ThemeRef::Inline(theme) => Ok((**theme).clone()),
        }
    }

    /// Prompt split into display lines; the last one is drawn inline before the command.
    pub fn prompt_segments(&self) -> Vec<&str> {
        self.prompt.split('\n').collect()
    }

    /// Parameters for the export timeline generator.
    pub fn timeline_params(&self) -> TimelineParams {
        TimelineParams {
            target_frame_count: self.target_frame_count,
            typing_speed_ms: self.typing_speed_ms,
            output_mode: self.output_mode,
        }
    }

    /// Parameters for the live animation driver.
    pub fn driver_params(&self) -> DriverParams {
        DriverParams {
            typing_speed_ms: self.typing_speed_ms,
            line_delay_ms: self.line_delay_ms,
            output_mode: self.output_mode,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/style/config.rs"]
mod tests;
