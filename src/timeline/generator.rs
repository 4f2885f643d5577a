//! Offline frame timeline generation for export.
//!
//! Typing is throttled by a global characters-per-frame budget so long scripts still produce
//! roughly `target_frame_count` typing frames; contiguous instant lines collapse into one frame.

use crate::script::parser::ScriptEntry;
use crate::timeline::policy::{OutputMode, RevealStep, reveal_plan, typed_char_count};
use crate::timeline::state::{DisplayLine, DisplayState, TimelineFrame};

/// Hold of the initial empty frame.
pub const WARMUP_HOLD_MS: u32 = 500;
/// Hold of the beat between two lines.
pub const INTER_LINE_HOLD_MS: u32 = 150;
/// Hold of the final resting frame.
pub const FINAL_HOLD_MS: u32 = 2000;
/// Lower bound for the hold of a typed frame.
pub const MIN_TYPED_HOLD_MS: u32 = 30;

/// Parameters for [`generate`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TimelineParams {
    /// Desired number of typing frames; only used to derive the per-frame character advance.
    pub target_frame_count: u32,
    /// Minimum hold per typed frame.
    pub typing_speed_ms: u32,
    /// Output reveal policy.
    pub output_mode: OutputMode,
}

impl Default for TimelineParams {
    fn default() -> Self {
        Self {
            target_frame_count: 40,
            typing_speed_ms: 50,
            output_mode: OutputMode::Typing,
        }
    }
}

/// `max(1, ceil(typed_chars / target_frame_count))`.
pub fn chars_per_frame(typed_chars: usize, target_frame_count: u32) -> usize {
    let target = target_frame_count.max(1) as usize;
    typed_chars.div_ceil(target).max(1)
}

/// Hold for a batch of `count` instant lines: a base delay plus a shrinking per-line bonus,
/// capped at 400 ms.
pub fn instant_hold_ms(count: usize) -> u32 {
    let n = count.max(1) as f64;
    let bonus = n * (200.0 / n).min(50.0);
    (150.0 + bonus).min(400.0).round() as u32
}

/// Materialize the export timeline for `entries`.
///
/// Deterministic: the same entries and params always produce the same frames. An empty script
/// yields the warm-up frame only.
#[tracing::instrument(skip(entries), fields(entry_count = entries.len()))]
pub fn generate(entries: &[ScriptEntry], params: &TimelineParams) -> Vec<TimelineFrame> {
    let mut frames = vec![TimelineFrame {
        state: DisplayState::empty(),
        hold_ms: WARMUP_HOLD_MS,
    }];
    if entries.is_empty() {
        return frames;
    }

    let typed_chars = typed_char_count(entries, params.output_mode);
    let per_frame = chars_per_frame(typed_chars, params.target_frame_count);
    let typed_hold = params.typing_speed_ms.max(MIN_TYPED_HOLD_MS);
    let last_index = entries.len() - 1;

    let mut state = DisplayState::empty();
    let mut emitted = 0usize;

    for step in reveal_plan(entries, params.output_mode) {
        match &step {
            RevealStep::Instant { lines } => {
                for i in lines.clone() {
                    state.set_line(entries, i, DisplayLine::revealed(&entries[i]));
                }
                state.current_line = step.last_line();
                frames.push(TimelineFrame {
                    state: state.clone(),
                    hold_ms: instant_hold_ms(lines.len()),
                });
            }
            RevealStep::Typed { line } => {
                let entry = &entries[*line];
                let total = entry.char_len();
                state.current_line = *line;
                state.set_line(entries, *line, DisplayLine::partial(entry, 0));
                for shown in 1..=total {
                    emitted += 1;
                    if emitted % per_frame == 0 || shown == total {
                        state.set_line(entries, *line, DisplayLine::partial(entry, shown));
                        frames.push(TimelineFrame {
                            state: state.clone(),
                            hold_ms: typed_hold,
                        });
                    }
                }
            }
        }

        if step.last_line() < last_index {
            state.current_line = step.last_line() + 1;
            frames.push(TimelineFrame {
                state: state.clone(),
                hold_ms: INTER_LINE_HOLD_MS,
            });
        }
    }

    state.current_line = entries.len();
    state.is_complete = true;
    frames.push(TimelineFrame {
        state,
        hold_ms: FINAL_HOLD_MS,
    });

    tracing::debug!(
        frames = frames.len(),
        typed_chars,
        chars_per_frame = per_frame,
        "generated timeline"
    );
    frames
}

/// Sum of all hold durations.
pub fn total_duration_ms(frames: &[TimelineFrame]) -> u64 {
    frames.iter().map(|f| u64::from(f.hold_ms)).sum()
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/generator.rs"]
mod tests;
