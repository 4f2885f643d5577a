//! Rasterization and the export pipeline.

/// Backend trait and frame type.
pub mod backend;
/// CPU backend powered by `vello_cpu`.
pub mod cpu;
/// Static and animated export.
pub mod pipeline;
