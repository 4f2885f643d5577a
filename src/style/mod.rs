//! Style configuration surface.

/// Hex color (de)serialization.
pub(crate) mod color;
/// `StyleConfig` and its parts.
pub mod config;
/// Named color sets.
pub mod theme;
