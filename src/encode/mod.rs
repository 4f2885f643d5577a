//! Encoding sinks.
//!
//! Sinks consume rendered frames in timeline order and are driven by
//! [`crate::render_timeline`].

/// Animated GIF output.
pub mod gif;
/// Still PNG output.
pub mod png;
/// Generic frame sink trait and built-in sinks.
pub mod sink;
