use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::Context;
use image::codecs::gif::{GifEncoder, Repeat};
use image::{Delay, Frame, RgbaImage};

use crate::encode::sink::{FrameSink, SinkConfig};
use crate::foundation::error::{TermreelError, TermreelResult};
use crate::render::backend::FrameRGBA;

enum State<W: Write> {
    Ready(W),
    Encoding {
        encoder: GifEncoder<W>,
        cfg: SinkConfig,
        next_idx: usize,
    },
    Done,
}

/// Animated GIF sink: loops forever, one GIF frame per timeline frame, delay = hold duration.
pub struct GifSink<W: Write + Send> {
    state: State<W>,
}

impl GifSink<BufWriter<File>> {
    /// Create (or truncate) `path` and encode into it.
    pub fn create(path: impl AsRef<Path>) -> TermreelResult<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("create output dir '{}'", parent.display()))?;
        }
        let file =
            File::create(path).with_context(|| format!("create gif '{}'", path.display()))?;
        Ok(Self::new(BufWriter::new(file)))
    }
}

impl<W: Write + Send> GifSink<W> {
    /// Encode into `writer`. Output is complete once [`FrameSink::end`] returns.
    pub fn new(writer: W) -> Self {
        Self {
            state: State::Ready(writer),
        }
    }
}

impl<W: Write + Send> FrameSink for GifSink<W> {
    fn begin(&mut self, cfg: SinkConfig) -> TermreelResult<()> {
        let writer = match std::mem::replace(&mut self.state, State::Done) {
            State::Ready(w) => w,
            _ => return Err(TermreelError::encode("gif sink can only be started once")),
        };
        let mut encoder = GifEncoder::new(writer);
        encoder
            .set_repeat(Repeat::Infinite)
            .map_err(|e| TermreelError::encode(format!("gif set_repeat failed: {e}")))?;
        self.state = State::Encoding {
            encoder,
            cfg,
            next_idx: 0,
        };
        Ok(())
    }

    fn push_frame(&mut self, idx: usize, frame: &FrameRGBA, hold_ms: u32) -> TermreelResult<()> {
        let State::Encoding {
            encoder,
            cfg,
            next_idx,
        } = &mut self.state
        else {
            return Err(TermreelError::encode("push_frame called outside begin/end"));
        };
        if idx != *next_idx {
            return Err(TermreelError::encode(format!(
                "frames must arrive in order: expected {next_idx}, got {idx}"
            )));
        }
        if frame.width != cfg.width || frame.height != cfg.height {
            return Err(TermreelError::encode(format!(
                "frame is {}x{}, sink expects {}x{}",
                frame.width, frame.height, cfg.width, cfg.height
            )));
        }

        let img = RgbaImage::from_raw(frame.width, frame.height, frame.to_straight_rgba8())
            .ok_or_else(|| TermreelError::encode("frame byte length mismatch"))?;
        let delay = Delay::from_numer_denom_ms(hold_ms, 1);
        encoder
            .encode_frame(Frame::from_parts(img, 0, 0, delay))
            .map_err(|e| TermreelError::encode(format!("gif frame {idx} failed: {e}")))?;
        *next_idx += 1;
        Ok(())
    }

    fn end(&mut self) -> TermreelResult<()> {
        match std::mem::replace(&mut self.state, State::Done) {
            State::Encoding {
                encoder, next_idx, ..
            } => {
                drop(encoder);
                tracing::debug!(frames = next_idx, "gif finished");
                Ok(())
            }
            State::Ready(_) => Err(TermreelError::encode("gif sink ended before begin")),
            State::Done => Err(TermreelError::encode("gif sink already finished")),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/encode/gif.rs"]
mod tests;
