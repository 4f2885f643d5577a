use crate::script::parser::ScriptEntry;

/// Per-frame projection of a [`ScriptEntry`]: the revealed prefix of its text.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct DisplayLine {
    /// Revealed prefix of the entry text.
    pub text: String,
    /// `false` only while the line is mid-typing.
    pub complete: bool,
    /// Copied from the entry so the painter does not need the script.
    pub show_prompt: bool,
}

impl DisplayLine {
    /// A line whose full text is visible.
    pub fn revealed(entry: &ScriptEntry) -> Self {
        Self {
            text: entry.text.clone(),
            complete: true,
            show_prompt: entry.show_prompt,
        }
    }

    /// A line with the first `chars` characters of `entry` visible.
    pub fn partial(entry: &ScriptEntry, chars: usize) -> Self {
        let total = entry.char_len();
        Self {
            text: entry.text.chars().take(chars).collect(),
            complete: chars >= total,
            show_prompt: entry.show_prompt,
        }
    }

    /// Number of visible characters.
    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }
}

/// Renderable snapshot of a session at one instant.
///
/// `lines` is index-aligned with the script entries and only holds lines whose reveal has
/// started; lines not reached yet are absent.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize)]
pub struct DisplayState {
    /// Started lines, in script order.
    pub lines: Vec<DisplayLine>,
    /// Line receiving the cursor, or one past the end once finished.
    pub current_line: usize,
    /// Whether the whole session has been revealed.
    pub is_complete: bool,
}

impl DisplayState {
    /// The state before anything is visible.
    pub fn empty() -> Self {
        Self::default()
    }

    /// The fully revealed resting state for `entries`.
    pub fn finished(entries: &[ScriptEntry]) -> Self {
        Self {
            lines: entries.iter().map(DisplayLine::revealed).collect(),
            current_line: entries.len(),
            is_complete: true,
        }
    }

    /// Insert or replace the line at `index`, padding any gap with fully revealed lines.
    pub(crate) fn set_line(&mut self, entries: &[ScriptEntry], index: usize, line: DisplayLine) {
        while self.lines.len() < index {
            let next = self.lines.len();
            self.lines.push(DisplayLine::revealed(&entries[next]));
        }
        if index < self.lines.len() {
            self.lines[index] = line;
        } else {
            self.lines.push(line);
        }
    }

    /// Total number of visible characters across all lines.
    pub fn revealed_chars(&self) -> usize {
        self.lines.iter().map(DisplayLine::char_len).sum()
    }
}

/// One materialized frame of an export timeline.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct TimelineFrame {
    /// What is visible.
    pub state: DisplayState,
    /// How long to show it, in whole milliseconds.
    pub hold_ms: u32,
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/state.rs"]
mod tests;
