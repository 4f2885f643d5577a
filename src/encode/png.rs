use std::io::Cursor;
use std::path::Path;

use anyhow::Context;

use crate::foundation::error::{TermreelError, TermreelResult};
use crate::render::backend::FrameRGBA;

/// Encode `frame` as a straight-alpha PNG.
pub fn encode_png(frame: &FrameRGBA) -> TermreelResult<Vec<u8>> {
    let img = image::RgbaImage::from_raw(frame.width, frame.height, frame.to_straight_rgba8())
        .ok_or_else(|| TermreelError::encode("frame byte length mismatch"))?;
    let mut buf = Vec::new();
    img.write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .map_err(|e| TermreelError::encode(format!("png encode failed: {e}")))?;
    Ok(buf)
}

/// Encode `frame` and write it to `path`, creating parent directories.
pub fn write_png(path: impl AsRef<Path>, frame: &FrameRGBA) -> TermreelResult<()> {
    let path = path.as_ref();
    let bytes = encode_png(frame)?;
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    std::fs::write(path, bytes).with_context(|| format!("write png '{}'", path.display()))?;
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/encode/png.rs"]
mod tests;
