use crate::foundation::core::Rgba8;
use crate::foundation::error::{TermreelError, TermreelResult};
use crate::style::color::{hex, hex_array3};

/// Named color set for a rendered terminal.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Theme {
    /// Theme identifier.
    #[serde(default)]
    pub name: String,
    /// Terminal background.
    #[serde(with = "hex")]
    pub background: Rgba8,
    /// Command and output text.
    #[serde(with = "hex")]
    pub foreground: Rgba8,
    /// Prompt glyphs.
    #[serde(with = "hex")]
    pub prompt: Rgba8,
    /// Cursor fill.
    #[serde(with = "hex")]
    pub cursor: Rgba8,
    /// Title bar fill.
    #[serde(with = "hex")]
    pub title_bar: Rgba8,
    /// Title text.
    #[serde(with = "hex")]
    pub title_text: Rgba8,
    /// Window outline.
    #[serde(with = "hex")]
    pub border: Rgba8,
    /// Window-control dots: close, minimize, zoom.
    #[serde(with = "hex_array3")]
    pub dots: [Rgba8; 3],
}

const MAC_DOTS: [Rgba8; 3] = [
    Rgba8::rgb(0xff, 0x5f, 0x56),
    Rgba8::rgb(0xff, 0xbd, 0x2e),
    Rgba8::rgb(0x27, 0xc9, 0x3f),
];

/// Names accepted by [`Theme::by_name`].
pub const BUILTIN_THEMES: &[&str] = &[
    "classic",
    "dracula",
    "monokai",
    "nord",
    "solarized-dark",
    "github-light",
];

impl Default for Theme {
    fn default() -> Self {
        Self::classic()
    }
}

impl Theme {
    /// Look up a built-in theme (case-insensitive).
    pub fn by_name(name: &str) -> TermreelResult<Self> {
        let theme = match name.trim().to_ascii_lowercase().as_str() {
            "classic" => Self::classic(),
            "dracula" => Self::dracula(),
            "monokai" => Self::monokai(),
            "nord" => Self::nord(),
            "solarized-dark" => Self::solarized_dark(),
            "github-light" => Self::github_light(),
            other => {
                return Err(TermreelError::validation(format!(
                    "unknown theme \"{other}\" (expected one of: {})",
                    BUILTIN_THEMES.join(", ")
                )));
            }
        };
        Ok(theme)
    }

    fn dark(
        name: &str,
        background: Rgba8,
        foreground: Rgba8,
        prompt: Rgba8,
        cursor: Rgba8,
    ) -> Self {
        Self {
            name: name.to_owned(),
            background,
            foreground,
            prompt,
            cursor,
            title_bar: Rgba8::rgb(0x2b, 0x2b, 0x2b),
            title_text: Rgba8::rgb(0x9a, 0x9a, 0x9a),
            border: Rgba8::rgba(0xff, 0xff, 0xff, 0x1a),
            dots: MAC_DOTS,
        }
    }

    fn classic() -> Self {
        Self::dark(
            "classic",
            Rgba8::rgb(0x1e, 0x1e, 0x1e),
            Rgba8::rgb(0xd4, 0xd4, 0xd4),
            Rgba8::rgb(0x4e, 0xc9, 0x4e),
            Rgba8::rgb(0xd4, 0xd4, 0xd4),
        )
    }

    fn dracula() -> Self {
        Self {
            title_bar: Rgba8::rgb(0x21, 0x22, 0x2c),
            title_text: Rgba8::rgb(0x62, 0x72, 0xa4),
            ..Self::dark(
                "dracula",
                Rgba8::rgb(0x28, 0x2a, 0x36),
                Rgba8::rgb(0xf8, 0xf8, 0xf2),
                Rgba8::rgb(0x50, 0xfa, 0x7b),
                Rgba8::rgb(0xff, 0x79, 0xc6),
            )
        }
    }

    fn monokai() -> Self {
        Self::dark(
            "monokai",
            Rgba8::rgb(0x27, 0x28, 0x22),
            Rgba8::rgb(0xf8, 0xf8, 0xf2),
            Rgba8::rgb(0xa6, 0xe2, 0x2e),
            Rgba8::rgb(0xf8, 0xf8, 0xf0),
        )
    }

    fn nord() -> Self {
        Self {
            title_bar: Rgba8::rgb(0x3b, 0x42, 0x52),
            title_text: Rgba8::rgb(0xd8, 0xde, 0xe9),
            ..Self::dark(
                "nord",
                Rgba8::rgb(0x2e, 0x34, 0x40),
                Rgba8::rgb(0xd8, 0xde, 0xe9),
                Rgba8::rgb(0x88, 0xc0, 0xd0),
                Rgba8::rgb(0xd8, 0xde, 0xe9),
            )
        }
    }

    fn solarized_dark() -> Self {
        Self {
            title_bar: Rgba8::rgb(0x07, 0x36, 0x42),
            title_text: Rgba8::rgb(0x93, 0xa1, 0xa1),
            ..Self::dark(
                "solarized-dark",
                Rgba8::rgb(0x00, 0x2b, 0x36),
                Rgba8::rgb(0x83, 0x94, 0x96),
                Rgba8::rgb(0x85, 0x99, 0x00),
                Rgba8::rgb(0x93, 0xa1, 0xa1),
            )
        }
    }

    fn github_light() -> Self {
        Self {
            name: "github-light".to_owned(),
            background: Rgba8::rgb(0xff, 0xff, 0xff),
            foreground: Rgba8::rgb(0x24, 0x29, 0x2f),
            prompt: Rgba8::rgb(0x11, 0x63, 0x29),
            cursor: Rgba8::rgb(0x04, 0x45, 0xaa),
            title_bar: Rgba8::rgb(0xf6, 0xf8, 0xfa),
            title_text: Rgba8::rgb(0x57, 0x60, 0x6a),
            border: Rgba8::rgb(0xd0, 0xd7, 0xde),
            dots: MAC_DOTS,
        }
    }
}
