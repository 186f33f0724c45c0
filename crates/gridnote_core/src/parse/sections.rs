//! Section parser.
//!
//! # Responsibility
//! - Partition the lines below the frontmatter into ordered, named sections
//!   at one configured heading level.
//! - Record the preamble between frontmatter and first heading so callers can
//!   reassemble the document byte-for-byte.
//!
//! # Invariants
//! - A heading starts at column 0 and matches `^#{L}\s(.+)$` after trimming
//!   trailing whitespace only.
//! - Duplicate names are kept as separate sections in document order.
//! - Parsing never fails.

use crate::model::document::Document;
use crate::model::section::{LineRange, ParsedDocument, Section};
use crate::parse::frontmatter::detect_frontmatter;
use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

const MIN_HEADING_LEVEL: u8 = 1;
const MAX_HEADING_LEVEL: u8 = 6;
const DEFAULT_HEADING_LEVEL: u8 = 2;

// Index `n` holds the pattern for level `n + 1`.
static HEADING_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    (MIN_HEADING_LEVEL..=MAX_HEADING_LEVEL)
        .map(|level| {
            Regex::new(&format!(r"^#{{{level}}}\s(.+)$")).expect("valid heading regex")
        })
        .collect()
});

/// Markdown ATX heading level used to delimit sections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct HeadingLevel(u8);

impl HeadingLevel {
    /// Validates a raw level in `1..=6`.
    pub fn new(level: u8) -> Result<Self, HeadingLevelError> {
        if !(MIN_HEADING_LEVEL..=MAX_HEADING_LEVEL).contains(&level) {
            return Err(HeadingLevelError::OutOfRange(level));
        }
        Ok(Self(level))
    }

    pub fn get(self) -> u8 {
        self.0
    }

    /// Heading marker, e.g. `##` for level 2.
    pub fn marker(self) -> String {
        "#".repeat(usize::from(self.0))
    }

    /// Formats a heading line for `title` at this level.
    pub fn heading_line(self, title: &str) -> String {
        format!("{} {}", self.marker(), title)
    }

    /// Returns the trimmed heading text when `line` is a heading of this level.
    pub fn match_heading(self, line: &str) -> Option<String> {
        let pattern = &HEADING_PATTERNS[usize::from(self.0 - MIN_HEADING_LEVEL)];
        pattern
            .captures(line.trim_end())
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().trim().to_string())
    }
}

impl Default for HeadingLevel {
    fn default() -> Self {
        Self(DEFAULT_HEADING_LEVEL)
    }
}

impl TryFrom<u8> for HeadingLevel {
    type Error = HeadingLevelError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<HeadingLevel> for u8 {
    fn from(value: HeadingLevel) -> Self {
        value.0
    }
}

impl Display for HeadingLevel {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Heading level validation errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeadingLevelError {
    OutOfRange(u8),
}

impl Display for HeadingLevelError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::OutOfRange(value) => write!(
                f,
                "heading level {value} is out of range (expected {MIN_HEADING_LEVEL}..={MAX_HEADING_LEVEL})"
            ),
        }
    }
}

impl Error for HeadingLevelError {}

/// Partitions `lines` into sections, starting at `frontmatter.end`.
///
/// Lines before the first heading belong to no section.
pub fn parse_sections(
    lines: &[String],
    level: HeadingLevel,
    frontmatter: LineRange,
) -> Vec<Section> {
    let mut sections = Vec::new();
    let mut open: Option<Section> = None;

    for (index, line) in lines.iter().enumerate().skip(frontmatter.end) {
        match level.match_heading(line) {
            Some(name) => {
                if let Some(mut previous) = open.take() {
                    previous.end_line = index;
                    sections.push(previous);
                }
                open = Some(Section {
                    name,
                    heading_line: line.clone(),
                    start_line: index,
                    end_line: index + 1,
                    lines: Vec::new(),
                });
            }
            None => {
                if let Some(current) = open.as_mut() {
                    current.lines.push(line.clone());
                }
            }
        }
    }

    if let Some(mut last) = open {
        last.end_line = lines.len();
        sections.push(last);
    }
    sections
}

/// Runs frontmatter detection and section parsing over one document.
pub fn parse_document(document: &Document, level: HeadingLevel) -> ParsedDocument {
    let lines = document.lines();
    let frontmatter = detect_frontmatter(lines);
    let sections = parse_sections(lines, level, frontmatter);
    let preamble_end = sections
        .first()
        .map(|section| section.start_line)
        .unwrap_or(lines.len());

    debug!(
        "event=document_parse module=parse status=ok lines={} frontmatter_end={} sections={} level={}",
        lines.len(),
        frontmatter.end,
        sections.len(),
        level
    );

    ParsedDocument {
        frontmatter,
        preamble: LineRange::new(frontmatter.end, preamble_end),
        sections,
        line_count: lines.len(),
    }
}

/// Convenience wrapper over raw text.
pub fn parse_text(text: &str, level: HeadingLevel) -> ParsedDocument {
    parse_document(&Document::from_text(text), level)
}
