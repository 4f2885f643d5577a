//! Script parsing: raw session text into typed [`ScriptEntry`] values.
//!
//! Input is one logical line per newline. A line whose leading-whitespace-stripped content starts
//! with the command marker (`>` by default) is a command; a line whose trimmed content equals the
//! instant-block marker (`!!` by default) toggles instant mode for the lines that follow; every
//! other line is literal output.

/// Whether an entry is a typed command or literal output.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryKind {
    /// A command line, rendered after the prompt.
    Command,
    /// Output printed by the previous command.
    Output,
}

/// One logical line of a scripted session.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ScriptEntry {
    /// Command vs. output.
    pub kind: EntryKind,
    /// Literal content to display; commands have their marker stripped.
    pub text: String,
    /// `true` iff `kind == Command`.
    pub show_prompt: bool,
    /// Appear fully formed instead of being typed (set inside an instant block).
    pub instant: bool,
}

impl ScriptEntry {
    /// Build a command entry.
    pub fn command(text: impl Into<String>) -> Self {
        Self {
            kind: EntryKind::Command,
            text: text.into(),
            show_prompt: true,
            instant: false,
        }
    }

    /// Build an output entry.
    pub fn output(text: impl Into<String>) -> Self {
        Self {
            kind: EntryKind::Output,
            text: text.into(),
            show_prompt: false,
            instant: false,
        }
    }

    /// Return the same entry with its `instant` flag set.
    pub fn instant(mut self) -> Self {
        self.instant = true;
        self
    }

    /// Number of characters (Unicode scalar values) in `text`.
    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }
}

/// Markers recognised by the parser.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScriptSyntax {
    /// Prefix that turns a line into a command.
    pub command_marker: char,
    /// Whole-line marker toggling instant output.
    pub instant_marker: String,
}

impl Default for ScriptSyntax {
    fn default() -> Self {
        Self {
            command_marker: '>',
            instant_marker: "!!".to_owned(),
        }
    }
}

/// Split raw input text into lines, dropping only trailing blank lines.
///
/// Interior blank lines are preserved. `\r\n` endings are accepted.
pub fn split_input(input: &str) -> Vec<String> {
    let mut lines: Vec<String> = input
        .split('\n')
        .map(|l| l.strip_suffix('\r').unwrap_or(l).to_owned())
        .collect();
    while lines.last().is_some_and(|l| l.trim().is_empty()) {
        lines.pop();
    }
    lines
}

/// Parse lines using the default [`ScriptSyntax`].
pub fn parse<S: AsRef<str>>(lines: &[S]) -> Vec<ScriptEntry> {
    parse_with(lines, &ScriptSyntax::default())
}

/// Parse raw text: [`split_input`] followed by [`parse`].
pub fn parse_text(input: &str) -> Vec<ScriptEntry> {
    parse(&split_input(input))
}

/// Parse lines with explicit markers.
///
/// Never fails: an instant block left open runs to the end of the input.
pub fn parse_with<S: AsRef<str>>(lines: &[S], syntax: &ScriptSyntax) -> Vec<ScriptEntry> {
    let mut entries = Vec::with_capacity(lines.len());
    let mut in_instant_block = false;

    for line in lines {
        let line = line.as_ref();
        if line.trim() == syntax.instant_marker {
            in_instant_block = !in_instant_block;
            continue;
        }

        let entry = match line.trim_start().strip_prefix(syntax.command_marker) {
            Some(rest) => ScriptEntry::command(rest.trim_start()),
            None => ScriptEntry::output(line),
        };
        entries.push(ScriptEntry {
            instant: in_instant_block,
            ..entry
        });
    }

    if in_instant_block {
        tracing::debug!(
            entries = entries.len(),
            "instant block not closed; treating end of input as implicit close"
        );
    }
    entries
}

#[cfg(test)]
#[path = "../../tests/unit/script/parser.rs"]
mod tests;
