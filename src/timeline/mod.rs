//! Export timeline: display states, reveal policy shared with the live driver, and the frame
//! generator.

/// Batched frame generation for export.
pub mod generator;
/// Instant/typed classification and reveal order.
pub mod policy;
/// Display state snapshots.
pub mod state;
