//! Live, wall-clock driven reveal of a script.
//!
//! The driver does not own a timer. The host calls [`AnimationDriver::tick`] on every display
//! refresh and may consult [`AnimationDriver::pending`] to know when work is due. Each tick does
//! O(1) work: one typed character, one instant batch, or one inter-line wait check.

use std::fmt;

use crate::script::parser::ScriptEntry;
use crate::timeline::policy::{OutputMode, RevealStep, reveal_plan, total_char_count};
use crate::timeline::state::{DisplayLine, DisplayState};

/// Parameters for [`AnimationDriver`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DriverParams {
    /// Delay between two typed characters.
    pub typing_speed_ms: u32,
    /// Pause between two lines.
    pub line_delay_ms: u32,
    /// Output reveal policy, shared with the export generator.
    pub output_mode: OutputMode,
}

impl Default for DriverParams {
    fn default() -> Self {
        Self {
            typing_speed_ms: 50,
            line_delay_ms: 300,
            output_mode: OutputMode::Typing,
        }
    }
}

/// Handle for the next scheduled piece of work.
///
/// Every control call (pause, cancel, restart, skip) bumps the driver generation, so a
/// continuation captured before it is recognisably stale.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Continuation {
    /// Driver generation this continuation belongs to.
    pub generation: u64,
    /// Clock time at which the work becomes due.
    pub due_ms: u64,
}

/// Result of one [`AnimationDriver::tick`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    /// Nothing is scheduled (idle, paused, cancelled or complete).
    Idle,
    /// Work is scheduled but not due yet.
    NotDue,
    /// The display state changed or the driver moved past a wait.
    Advanced,
    /// The session finished on this tick.
    Completed,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Phase {
    Idle,
    Step { step: usize, chars: usize },
    LineWait { next_step: usize },
    Complete,
}

type CompletionHook = Box<dyn FnMut(&DisplayState)>;

/// Cooperative state machine: `Idle -> Step -> LineWait -> Step ... -> Complete`.
pub struct AnimationDriver {
    entries: Vec<ScriptEntry>,
    plan: Vec<RevealStep>,
    params: DriverParams,
    total_chars: usize,

    phase: Phase,
    state: DisplayState,
    pending: Option<Continuation>,
    paused_remaining_ms: Option<u64>,
    generation: u64,
    completion_fired: bool,
    on_complete: Option<CompletionHook>,
}

impl fmt::Debug for AnimationDriver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnimationDriver")
            .field("entries", &self.entries.len())
            .field("params", &self.params)
            .field("phase", &self.phase)
            .field("pending", &self.pending)
            .field("generation", &self.generation)
            .finish_non_exhaustive()
    }
}

impl AnimationDriver {
    /// Create an idle driver. Nothing happens until [`AnimationDriver::restart`].
    pub fn new(entries: Vec<ScriptEntry>, params: DriverParams) -> Self {
        let plan = reveal_plan(&entries, params.output_mode);
        let total_chars = total_char_count(&entries);
        Self {
            entries,
            plan,
            params,
            total_chars,
            phase: Phase::Idle,
            state: DisplayState::empty(),
            pending: None,
            paused_remaining_ms: None,
            generation: 0,
            completion_fired: false,
            on_complete: None,
        }
    }

    /// Register a hook fired once per run, when the session first becomes complete.
    pub fn on_complete(&mut self, hook: impl FnMut(&DisplayState) + 'static) {
        self.on_complete = Some(Box::new(hook));
    }

    /// Current display state.
    pub fn state(&self) -> &DisplayState {
        &self.state
    }

    /// Entries being animated.
    pub fn entries(&self) -> &[ScriptEntry] {
        &self.entries
    }

    /// Parameters in effect.
    pub fn params(&self) -> DriverParams {
        self.params
    }

    /// The scheduled continuation, if any.
    pub fn pending(&self) -> Option<Continuation> {
        self.pending
    }

    /// Current generation; see [`Continuation`].
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Whether `cont` still belongs to this driver's current schedule.
    pub fn is_current(&self, cont: &Continuation) -> bool {
        self.pending.as_ref() == Some(cont)
    }

    /// `true` while work is scheduled.
    pub fn is_running(&self) -> bool {
        self.pending.is_some()
    }

    /// `true` when stopped mid-run and resumable.
    pub fn is_paused(&self) -> bool {
        self.pending.is_none() && matches!(self.phase, Phase::Step { .. } | Phase::LineWait { .. })
    }

    /// `true` once the whole session is revealed.
    pub fn is_complete(&self) -> bool {
        self.state.is_complete
    }

    /// Fraction of all characters revealed, in `0..=1`. Coarse; not used for correctness.
    pub fn progress(&self) -> f64 {
        if self.total_chars == 0 {
            return if self.state.is_complete { 1.0 } else { 0.0 };
        }
        (self.state.revealed_chars() as f64 / self.total_chars as f64).min(1.0)
    }

    /// Reset to the empty state and start again from the first entry.
    pub fn restart(&mut self, now_ms: u64) {
        self.invalidate();
        self.discard_pause();
        self.state = DisplayState::empty();
        self.completion_fired = false;
        if self.plan.is_empty() {
            self.complete();
            return;
        }
        self.begin_step(0, now_ms);
    }

    /// Stop without losing progress; [`AnimationDriver::resume`] continues from here.
    ///
    /// Whatever was left of the pending typing interval or line delay at `now_ms` is kept.
    pub fn pause(&mut self, now_ms: u64) {
        if let Some(cont) = self.pending {
            self.paused_remaining_ms = Some(cont.due_ms.saturating_sub(now_ms));
        }
        self.invalidate();
    }

    /// Continue a paused run, honouring the delay that was left at pause time. No-op when idle,
    /// cancelled or complete.
    pub fn resume(&mut self, now_ms: u64) {
        if self.is_paused() {
            let remaining = self.paused_remaining_ms.take().unwrap_or(0);
            self.schedule(now_ms + remaining);
        }
    }

    /// Tear the run down. The current state stays visible; only a restart continues.
    pub fn cancel(&mut self) {
        self.invalidate();
        self.discard_pause();
        if self.phase != Phase::Complete {
            self.phase = Phase::Idle;
        }
    }

    /// Jump straight to the fully revealed state.
    pub fn skip_to_end(&mut self) {
        self.invalidate();
        self.discard_pause();
        self.state = DisplayState::finished(&self.entries);
        self.complete();
    }

    /// Advance by at most one unit of work if it is due at `now_ms`.
    pub fn tick(&mut self, now_ms: u64) -> TickOutcome {
        let Some(cont) = self.pending else {
            return TickOutcome::Idle;
        };
        if now_ms < cont.due_ms {
            return TickOutcome::NotDue;
        }
        self.pending = None;

        match self.phase {
            Phase::Idle | Phase::Complete => TickOutcome::Idle,
            Phase::LineWait { next_step } => {
                self.begin_step(next_step, now_ms);
                TickOutcome::Advanced
            }
            Phase::Step { step, chars } => match self.plan[step].clone() {
                RevealStep::Typed { line } => {
                    let entry = &self.entries[line];
                    let shown = (chars + 1).min(entry.char_len());
                    let display = DisplayLine::partial(entry, shown);
                    let done = display.complete;
                    self.state.set_line(&self.entries, line, display);
                    self.state.current_line = line;
                    if done {
                        self.finish_step(step, now_ms)
                    } else {
                        self.phase = Phase::Step {
                            step,
                            chars: shown,
                        };
                        self.schedule(now_ms + u64::from(self.params.typing_speed_ms));
                        TickOutcome::Advanced
                    }
                }
                RevealStep::Instant { lines } => {
                    for i in lines {
                        let display = DisplayLine::revealed(&self.entries[i]);
                        self.state.set_line(&self.entries, i, display);
                    }
                    self.state.current_line = self.plan[step].last_line();
                    self.finish_step(step, now_ms)
                }
            },
        }
    }

    fn begin_step(&mut self, step: usize, now_ms: u64) {
        tracing::trace!(step, "driver step begins");
        self.phase = Phase::Step { step, chars: 0 };
        self.state.current_line = self.plan[step].first_line();
        self.schedule(now_ms);
    }

    fn finish_step(&mut self, step: usize, now_ms: u64) -> TickOutcome {
        if step + 1 < self.plan.len() {
            self.state.current_line = self.plan[step].last_line() + 1;
            self.phase = Phase::LineWait {
                next_step: step + 1,
            };
            self.schedule(now_ms + u64::from(self.params.line_delay_ms));
            TickOutcome::Advanced
        } else {
            self.complete();
            TickOutcome::Completed
        }
    }

    fn complete(&mut self) {
        self.pending = None;
        self.phase = Phase::Complete;
        self.state.current_line = self.entries.len();
        self.state.is_complete = true;
        if !self.completion_fired {
            self.completion_fired = true;
            tracing::trace!("driver complete");
            if let Some(hook) = self.on_complete.as_mut() {
                hook(&self.state);
            }
        }
    }

    fn schedule(&mut self, due_ms: u64) {
        self.pending = Some(Continuation {
            generation: self.generation,
            due_ms,
        });
    }

    fn invalidate(&mut self) {
        self.generation += 1;
        self.pending = None;
    }

    fn discard_pause(&mut self) {
        self.paused_remaining_ms = None;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/driver.rs"]
mod tests;
