use std::sync::Arc;

use anyhow::Context;

use crate::foundation::error::{TermreelError, TermreelResult};
use crate::style::config::FontSpec;

/// Font bytes shared by the measurer and the rasterizer.
#[derive(Clone)]
pub struct PreparedFont {
    /// Raw TTF/OTF bytes.
    pub bytes: Arc<Vec<u8>>,
    /// Family name from the descriptor, for diagnostics.
    pub family_hint: String,
}

impl std::fmt::Debug for PreparedFont {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PreparedFont")
            .field("bytes_len", &self.bytes.len())
            .field("family_hint", &self.family_hint)
            .finish()
    }
}

impl PreparedFont {
    /// Wrap bytes already in memory.
    pub fn from_bytes(bytes: Vec<u8>, family_hint: impl Into<String>) -> TermreelResult<Self> {
        if bytes.is_empty() {
            return Err(TermreelError::validation("font bytes must be non-empty"));
        }
        Ok(Self {
            bytes: Arc::new(bytes),
            family_hint: family_hint.into(),
        })
    }

    /// Read the file named by `spec.path`.
    pub fn load(spec: &FontSpec) -> TermreelResult<Self> {
        let path = spec.path.as_ref().ok_or_else(|| {
            TermreelError::validation(format!(
                "font \"{}\" has no path; a font file is required for text",
                spec.family
            ))
        })?;
        let bytes =
            std::fs::read(path).with_context(|| format!("read font file {}", path.display()))?;
        Self::from_bytes(bytes, spec.family.clone())
    }

    /// Stable identity of the underlying byte buffer.
    pub(crate) fn key(&self) -> usize {
        Arc::as_ptr(&self.bytes) as usize
    }
}
