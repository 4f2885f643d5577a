use crate::foundation::error::{TermreelError, TermreelResult};
use crate::render::backend::FrameRGBA;

/// Configuration provided to a [`FrameSink`] before the first frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SinkConfig {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// Number of frames that will be pushed.
    pub frame_count: usize,
    /// Sum of all hold durations.
    pub total_duration_ms: u64,
}

/// Sink contract for consuming rendered frames in timeline order.
///
/// `push_frame` is called with strictly increasing indices starting at zero.
pub trait FrameSink: Send {
    /// Called once before any frames are pushed.
    fn begin(&mut self, cfg: SinkConfig) -> TermreelResult<()>;
    /// Push one frame and how long it stays on screen.
    fn push_frame(&mut self, idx: usize, frame: &FrameRGBA, hold_ms: u32) -> TermreelResult<()>;
    /// Called once after the last frame is pushed.
    fn end(&mut self) -> TermreelResult<()>;
}

/// Captured frame of an [`InMemorySink`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CapturedFrame {
    /// Timeline index.
    pub idx: usize,
    /// Rendered pixels.
    pub frame: FrameRGBA,
    /// Hold duration in milliseconds.
    pub hold_ms: u32,
}

/// In-memory sink for tests and debugging.
#[derive(Debug, Default)]
pub struct InMemorySink {
    cfg: Option<SinkConfig>,
    frames: Vec<CapturedFrame>,
    finished: bool,
}

impl InMemorySink {
    /// Create a new in-memory sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the configuration captured in `begin`, if any.
    pub fn config(&self) -> Option<SinkConfig> {
        self.cfg
    }

    /// Borrow the captured frames.
    pub fn frames(&self) -> &[CapturedFrame] {
        &self.frames
    }

    /// Whether `end` has been called.
    pub fn is_finished(&self) -> bool {
        self.finished
    }
}

impl FrameSink for InMemorySink {
    fn begin(&mut self, cfg: SinkConfig) -> TermreelResult<()> {
        self.cfg = Some(cfg);
        self.frames.clear();
        self.finished = false;
        Ok(())
    }

    fn push_frame(&mut self, idx: usize, frame: &FrameRGBA, hold_ms: u32) -> TermreelResult<()> {
        if self.cfg.is_none() {
            return Err(TermreelError::encode("push_frame called before begin"));
        }
        self.frames.push(CapturedFrame {
            idx,
            frame: frame.clone(),
            hold_ms,
        });
        Ok(())
    }

    fn end(&mut self) -> TermreelResult<()> {
        self.finished = true;
        Ok(())
    }
}
