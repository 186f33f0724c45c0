//! Missing-section resolver.
//!
//! # Responsibility
//! - Compute heading stubs for layout blocks the document lacks.
//! - Append them at the end of the document, after one blank separator line.
//!
//! # Invariants
//! - Append-only: the original text is always a byte prefix of the result.
//! - Frontmatter, preamble and existing sections are never moved or split.
//! - Re-parsing the result finds no missing titles for the same layout.

use crate::model::document::Document;
use crate::model::layout::Block;
use crate::model::section::ParsedDocument;
use crate::parse::sections::{parse_document, HeadingLevel};
use crate::sync::matcher::{match_sections, MatchResult};
use crate::sync::{SyncError, SyncResult};
use log::{debug, warn};
use serde::Serialize;

/// Heading stub for one missing block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SectionStub {
    pub title: String,
    pub heading_line: String,
}

impl SectionStub {
    fn new(title: &str, level: HeadingLevel) -> Self {
        let title = title.trim();
        Self {
            title: title.to_string(),
            heading_line: level.heading_line(title),
        }
    }

    /// Stub text: the heading line and its terminator.
    pub fn text(&self) -> String {
        format!("{}\n", self.heading_line)
    }
}

/// Where and what to append for one document.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct MissingSectionPlan {
    /// Index of the first stub heading in the patched line array.
    pub insertion_line: usize,
    /// Whether a blank separator line precedes the first stub.
    pub separator: bool,
    /// Stubs in layout order.
    pub stubs: Vec<SectionStub>,
}

impl MissingSectionPlan {
    pub fn is_empty(&self) -> bool {
        self.stubs.is_empty()
    }

    /// Titles the plan adds, in layout order.
    pub fn titles(&self) -> Vec<String> {
        self.stubs.iter().map(|stub| stub.title.clone()).collect()
    }
}

/// Plans stubs for every block without a matching section.
pub fn resolve_missing(
    document: &Document,
    parsed: &ParsedDocument,
    blocks: &[Block],
    level: HeadingLevel,
) -> MissingSectionPlan {
    let matches = match_sections(blocks, &parsed.sections);
    plan_for_titles(document, &matches.missing_titles, level)
}

/// Plans stubs for an explicit list of missing titles.
pub fn plan_for_titles(
    document: &Document,
    missing_titles: &[String],
    level: HeadingLevel,
) -> MissingSectionPlan {
    if missing_titles.is_empty() {
        return MissingSectionPlan::default();
    }

    let append = AppendPoint::of(document);
    let stubs = missing_titles
        .iter()
        .map(|title| SectionStub::new(title, level))
        .collect::<Vec<_>>();

    debug!(
        "event=sections_resolve module=sync status=ok stubs={} insertion_line={} separator={}",
        stubs.len(),
        append.insertion_line(),
        append.separator
    );

    MissingSectionPlan {
        insertion_line: append.insertion_line(),
        separator: append.separator,
        stubs,
    }
}

/// Appends planned stubs to `document`.
pub fn apply_missing_sections(document: &Document, plan: &MissingSectionPlan) -> Document {
    if plan.is_empty() {
        return document.clone();
    }

    let append = AppendPoint::of(document);
    let mut lines: Vec<String> = document.lines()[..append.keep].to_vec();
    if append.separator {
        lines.push(String::new());
    }
    for stub in &plan.stubs {
        lines.push(stub.heading_line.clone());
        lines.push(String::new());
    }
    Document::from_lines(lines)
}

/// Re-parses `document` and fails when any block is still unmatched.
pub fn verify_resolved(
    document: &Document,
    blocks: &[Block],
    level: HeadingLevel,
) -> SyncResult<MatchResult> {
    let parsed = parse_document(document, level);
    let matches = match_sections(blocks, &parsed.sections);
    if !matches.is_complete() {
        warn!(
            "event=sections_verify module=sync status=error unresolved={}",
            matches.missing_titles.len()
        );
        return Err(SyncError::UnresolvedTitles(matches.missing_titles));
    }
    Ok(matches)
}

struct AppendPoint {
    /// Leading lines carried over unchanged.
    keep: usize,
    separator: bool,
}

impl AppendPoint {
    fn of(document: &Document) -> Self {
        if document.is_empty() {
            return Self {
                keep: 0,
                separator: false,
            };
        }

        let lines = document.lines();
        // The final empty element of a terminated text is the terminator itself.
        let keep = if document.is_terminated() {
            lines.len() - 1
        } else {
            lines.len()
        };
        let separator = !lines[keep - 1].trim().is_empty();
        Self { keep, separator }
    }

    fn insertion_line(&self) -> usize {
        self.keep + usize::from(self.separator)
    }
}
