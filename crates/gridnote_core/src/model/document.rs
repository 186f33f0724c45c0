//! Line view over raw document text.
//!
//! # Invariants
//! - Lines are split on `\n` only; `\r` stays part of the line content.
//! - `Document::from_text(t).to_text() == t` for every input string.

/// Ordered lines of one document, without terminators.
///
/// A trailing `\n` in the source text is represented by a final empty line,
/// so the empty string is one empty line and `"a\n"` is `["a", ""]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    lines: Vec<String>,
}

impl Document {
    /// Splits raw text into lines.
    pub fn from_text(text: &str) -> Self {
        Self {
            lines: split_lines(text),
        }
    }

    /// Wraps already-split lines.
    pub fn from_lines(lines: Vec<String>) -> Self {
        if lines.is_empty() {
            return Self {
                lines: vec![String::new()],
            };
        }
        Self { lines }
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Returns whether the document holds no text at all.
    pub fn is_empty(&self) -> bool {
        self.lines.len() == 1 && self.lines[0].is_empty()
    }

    /// Returns whether the source text ended with a line terminator.
    pub fn is_terminated(&self) -> bool {
        self.lines.len() > 1 && self.lines.last().is_some_and(|line| line.is_empty())
    }

    /// Joins lines back into text, byte-exact with the original.
    pub fn to_text(&self) -> String {
        self.lines.join("\n")
    }
}

/// Splits text on `\n`, keeping a final empty element for a trailing terminator.
pub fn split_lines(text: &str) -> Vec<String> {
    text.split('\n').map(str::to_string).collect()
}
