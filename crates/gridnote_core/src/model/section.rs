//! Section model produced by the section parser.
//!
//! # Responsibility
//! - Represent heading-delimited regions with exact line coordinates.
//! - Keep the opaque regions (frontmatter, preamble) addressable so a parse
//!   can always be reassembled into the original lines.
//!
//! # Invariants
//! - Sections are contiguous, non-overlapping and ordered by `start_line`.
//! - `frontmatter`, `preamble` and the sections tile `[0, len)` in order.
//! - `name` is the trimmed heading text with original casing; normalization
//!   happens only during matching.

use serde::{Deserialize, Serialize};

/// Half-open line range `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct LineRange {
    pub start: usize,
    pub end: usize,
}

impl LineRange {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Empty range anchored at `at`.
    pub fn empty_at(at: usize) -> Self {
        Self { start: at, end: at }
    }

    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.end <= self.start
    }

    pub fn contains(&self, line: usize) -> bool {
        self.start <= line && line < self.end
    }
}

/// One heading-delimited region of a document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    /// Trimmed heading text, casing preserved.
    pub name: String,
    /// Raw heading line exactly as it appears in the document.
    pub heading_line: String,
    /// Index of the heading line.
    pub start_line: usize,
    /// Index one past the last body line.
    pub end_line: usize,
    /// Body lines strictly between the heading and `end_line`.
    pub lines: Vec<String>,
}

impl Section {
    /// Full line range including the heading.
    pub fn range(&self) -> LineRange {
        LineRange::new(self.start_line, self.end_line)
    }

    /// Body line range, excluding the heading.
    pub fn body_range(&self) -> LineRange {
        LineRange::new(self.start_line + 1, self.end_line)
    }

    /// Body lines joined with `\n`.
    pub fn body_text(&self) -> String {
        self.lines.join("\n")
    }
}

/// Result of one parse over a document.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ParsedDocument {
    /// Opaque leading YAML block, empty when absent.
    pub frontmatter: LineRange,
    /// Lines between frontmatter and the first heading.
    pub preamble: LineRange,
    pub sections: Vec<Section>,
    /// Number of lines in the parsed document.
    pub line_count: usize,
}

impl ParsedDocument {
    /// Section names in document order.
    pub fn section_names(&self) -> Vec<&str> {
        self.sections.iter().map(|section| section.name.as_str()).collect()
    }

    /// Reassembles the document from its parts.
    ///
    /// `source` must be the line array this value was parsed from; only the
    /// opaque ranges are read from it, section content comes from the model.
    pub fn reconstruct_lines(&self, source: &[String]) -> Vec<String> {
        let mut out = Vec::with_capacity(self.line_count);
        out.extend_from_slice(slice_range(source, self.frontmatter));
        out.extend_from_slice(slice_range(source, self.preamble));
        for section in &self.sections {
            out.push(section.heading_line.clone());
            out.extend(section.lines.iter().cloned());
        }
        out
    }
}

fn slice_range(lines: &[String], range: LineRange) -> &[String] {
    let end = range.end.min(lines.len());
    let start = range.start.min(end);
    &lines[start..end]
}

#[cfg(test)]
mod tests {
    use super::{LineRange, Section};

    #[test]
    fn line_range_reports_length_and_membership() {
        let range = LineRange::new(2, 5);
        assert_eq!(range.len(), 3);
        assert!(range.contains(2));
        assert!(!range.contains(5));
        assert!(LineRange::empty_at(7).is_empty());
    }

    #[test]
    fn body_range_skips_heading() {
        let section = Section {
            name: "B".to_string(),
            heading_line: "## B".to_string(),
            start_line: 3,
            end_line: 6,
            lines: vec!["a".to_string(), "b".to_string()],
        };
        assert_eq!(section.body_range(), LineRange::new(4, 6));
        assert_eq!(section.body_text(), "a\nb");
    }
}
