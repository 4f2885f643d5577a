/// Convenience result type used across termreel.
pub type TermreelResult<T> = Result<T, TermreelError>;

/// Top-level error taxonomy used by the rendering pipeline.
#[derive(thiserror::Error, Debug)]
pub enum TermreelError {
    /// Invalid user-provided configuration or parameters.
    #[error("validation error: {0}")]
    Validation(String),

    /// The measurement capability could not size a piece of text.
    #[error("measure error: {0}")]
    Measure(String),

    /// Errors while rasterizing a paint plan.
    #[error("render error: {0}")]
    Render(String),

    /// Errors while encoding rendered frames into an image container.
    #[error("encode error: {0}")]
    Encode(String),

    /// Errors when serializing or deserializing configuration.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl TermreelError {
    /// Build a [`TermreelError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`TermreelError::Measure`] value.
    pub fn measure(msg: impl Into<String>) -> Self {
        Self::Measure(msg.into())
    }

    /// Build a [`TermreelError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`TermreelError::Encode`] value.
    pub fn encode(msg: impl Into<String>) -> Self {
        Self::Encode(msg.into())
    }

    /// Build a [`TermreelError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
