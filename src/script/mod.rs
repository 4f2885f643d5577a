//! Script text to structured entries.

/// Line classification and instant-block tracking.
pub mod parser;
