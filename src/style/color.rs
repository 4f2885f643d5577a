use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::foundation::core::Rgba8;

/// Serde bridge for theme colors.
///
/// Accepts `"#RRGGBB"`, `"#RRGGBBAA"`, `[r, g, b]`, `[r, g, b, a]` (0..=255) or
/// `{ "r": .., "g": .., "b": .., "a": .. }`. Serializes back to a hex string.
pub(crate) mod hex {
    use super::*;

    pub(crate) fn serialize<S: Serializer>(c: &Rgba8, s: S) -> Result<S::Ok, S::Error> {
        to_hex(*c).serialize(s)
    }

    pub(crate) fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Rgba8, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Hex(String),
            RgbaObj {
                r: u8,
                g: u8,
                b: u8,
                #[serde(default = "opaque")]
                a: u8,
            },
            Arr(Vec<u8>),
        }

        fn opaque() -> u8 {
            255
        }

        match Repr::deserialize(d)? {
            Repr::Hex(s) => parse_hex(&s).map_err(serde::de::Error::custom),
            Repr::RgbaObj { r, g, b, a } => Ok(Rgba8::rgba(r, g, b, a)),
            Repr::Arr(v) => match v.as_slice() {
                [r, g, b] => Ok(Rgba8::rgb(*r, *g, *b)),
                [r, g, b, a] => Ok(Rgba8::rgba(*r, *g, *b, *a)),
                _ => Err(serde::de::Error::custom(
                    "rgba array must have len 3 ([r,g,b]) or 4 ([r,g,b,a])",
                )),
            },
        }
    }
}

/// Serde bridge for fixed-size color arrays such as the window-control dots.
pub(crate) mod hex_array3 {
    use super::*;

    pub(crate) fn serialize<S: Serializer>(c: &[Rgba8; 3], s: S) -> Result<S::Ok, S::Error> {
        c.map(to_hex).serialize(s)
    }

    pub(crate) fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<[Rgba8; 3], D::Error> {
        #[derive(Deserialize)]
        struct Wrapped(#[serde(with = "super::hex")] Rgba8);

        let [a, b, c] = <[Wrapped; 3]>::deserialize(d)?;
        Ok([a.0, b.0, c.0])
    }
}

/// Parse `#RRGGBB` or `#RRGGBBAA` (the `#` is optional, case-insensitive).
pub fn parse_hex(s: &str) -> Result<Rgba8, String> {
    let s = s.trim();
    let s = s.strip_prefix('#').unwrap_or(s);

    fn hex_byte(pair: &str) -> Result<u8, String> {
        u8::from_str_radix(pair, 16).map_err(|_| format!("invalid hex byte \"{pair}\""))
    }

    if !s.is_ascii() {
        return Err("hex color must be ASCII".to_owned());
    }
    match s.len() {
        6 => Ok(Rgba8::rgb(
            hex_byte(&s[0..2])?,
            hex_byte(&s[2..4])?,
            hex_byte(&s[4..6])?,
        )),
        8 => Ok(Rgba8::rgba(
            hex_byte(&s[0..2])?,
            hex_byte(&s[2..4])?,
            hex_byte(&s[4..6])?,
            hex_byte(&s[6..8])?,
        )),
        _ => Err("hex color must be #RRGGBB or #RRGGBBAA (case-insensitive)".to_owned()),
    }
}

/// Format as `#rrggbb`, or `#rrggbbaa` when not opaque.
pub fn to_hex(c: Rgba8) -> String {
    if c.a == 255 {
        format!("#{:02x}{:02x}{:02x}", c.r, c.g, c.b)
    } else {
        format!("#{:02x}{:02x}{:02x}{:02x}", c.r, c.g, c.b, c.a)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/style/color.rs"]
mod tests;
