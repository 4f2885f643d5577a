//! Live, tick-driven animation.

/// Cooperative state machine for interactive previews.
pub mod driver;
