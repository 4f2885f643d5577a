//! Text shaping and measurement.

/// Parley layout contexts.
pub mod engine;
/// The measurement capability shared by sizing and painting.
pub mod measure;
