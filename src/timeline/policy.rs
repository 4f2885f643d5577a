//! Reveal policy shared by the export generator and the live driver.
//!
//! Both engines consume the same [`RevealStep`] sequence; only their stepping granularity
//! differs.

use std::ops::Range;

use crate::script::parser::{EntryKind, ScriptEntry};

/// How output lines are revealed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputMode {
    /// Output is typed like commands unless it sits in an instant block.
    #[default]
    Typing,
    /// Every output line appears at once.
    Instant,
}

/// Whether `entry` appears fully formed instead of being typed.
pub fn is_instant(entry: &ScriptEntry, mode: OutputMode) -> bool {
    entry.instant || (mode == OutputMode::Instant && entry.kind == EntryKind::Output)
}

/// One unit of reveal work.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RevealStep {
    /// Type the line at this index character by character.
    Typed {
        /// Entry index.
        line: usize,
    },
    /// Reveal a contiguous run of instant lines in one atomic step.
    Instant {
        /// Entry indices, non-empty.
        lines: Range<usize>,
    },
}

impl RevealStep {
    /// Index of the first line this step touches.
    pub fn first_line(&self) -> usize {
        match self {
            Self::Typed { line } => *line,
            Self::Instant { lines } => lines.start,
        }
    }

    /// Index of the last line this step touches.
    pub fn last_line(&self) -> usize {
        match self {
            Self::Typed { line } => *line,
            Self::Instant { lines } => lines.end - 1,
        }
    }
}

/// Group `entries` into reveal steps, batching contiguous instant entries.
pub fn reveal_plan(entries: &[ScriptEntry], mode: OutputMode) -> Vec<RevealStep> {
    let mut steps = Vec::new();
    let mut i = 0;
    while i < entries.len() {
        if is_instant(&entries[i], mode) {
            let start = i;
            while i < entries.len() && is_instant(&entries[i], mode) {
                i += 1;
            }
            steps.push(RevealStep::Instant { lines: start..i });
        } else {
            steps.push(RevealStep::Typed { line: i });
            i += 1;
        }
    }
    steps
}

/// Characters that will be typed rather than shown instantly.
pub fn typed_char_count(entries: &[ScriptEntry], mode: OutputMode) -> usize {
    entries
        .iter()
        .filter(|e| !is_instant(e, mode))
        .map(ScriptEntry::char_len)
        .sum()
}

/// Characters across all entries, instant or not.
pub fn total_char_count(entries: &[ScriptEntry]) -> usize {
    entries.iter().map(ScriptEntry::char_len).sum()
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/policy.rs"]
mod tests;
