//! Layout synchronization service.
//!
//! # Responsibility
//! - Look up a named layout and reconcile one document text against it.
//! - Append stubs for missing blocks and verify the result.
//! - Patch one block's section after re-parsing the live text.
//!
//! # Invariants
//! - The service keeps no per-document state; every call re-parses the text
//!   it is given.
//! - Callers serialize read -> call -> write per document; concurrent writers
//!   are last-write-wins at the storage layer.

use crate::config::{ConfigError, EngineConfig};
use crate::layout::registry::LayoutRegistry;
use crate::model::document::{split_lines, Document};
use crate::model::layout::GridLayout;
use crate::model::section::ParsedDocument;
use crate::parse::sections::{parse_document, HeadingLevel};
use crate::sync::matcher::{match_sections, titles_match, MatchResult};
use crate::sync::patcher::patch_section;
use crate::sync::resolver::{apply_missing_sections, resolve_missing, verify_resolved};
use crate::sync::{SyncError, SyncResult};
use log::info;

/// Parse and match snapshot for one document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncReport {
    pub layout_name: String,
    pub parsed: ParsedDocument,
    pub matches: MatchResult,
}

/// Result of `ensure_sections`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnsureOutcome {
    /// Full document text after stubs were appended.
    pub text: String,
    /// Titles that received a stub, in layout order.
    pub added_titles: Vec<String>,
    /// Line index of the first stub heading, when any were added.
    pub insertion_line: Option<usize>,
}

impl EnsureOutcome {
    pub fn changed(&self) -> bool {
        !self.added_titles.is_empty()
    }
}

/// Service facade over a layout registry and engine settings.
#[derive(Debug, Clone, Default)]
pub struct LayoutSyncService {
    registry: LayoutRegistry,
    heading_level: HeadingLevel,
}

impl LayoutSyncService {
    pub fn new(registry: LayoutRegistry, heading_level: HeadingLevel) -> Self {
        Self {
            registry,
            heading_level,
        }
    }

    /// Builds the service from config, validating every layout definition.
    pub fn from_config(config: &EngineConfig) -> Result<Self, ConfigError> {
        Ok(Self::new(config.build_registry()?, config.heading_level))
    }

    pub fn registry(&self) -> &LayoutRegistry {
        &self.registry
    }

    pub fn heading_level(&self) -> HeadingLevel {
        self.heading_level
    }

    /// Parses `text` and matches it against layout `layout_name`.
    pub fn inspect(&self, layout_name: &str, text: &str) -> SyncResult<SyncReport> {
        let layout = self.registry.require(layout_name)?;
        let document = Document::from_text(text);
        let parsed = parse_document(&document, self.heading_level);
        let matches = match_sections(layout.blocks(), &parsed.sections);
        Ok(SyncReport {
            layout_name: layout.name().to_string(),
            parsed,
            matches,
        })
    }

    /// Appends stubs for every block without a section.
    ///
    /// Returns `text` unchanged when nothing is missing.
    ///
    /// # Errors
    /// - `SyncError::Registry` when the layout is unknown.
    /// - `SyncError::UnresolvedTitles` when the appended stubs still do not
    ///   satisfy the layout; this is a contract violation.
    pub fn ensure_sections(&self, layout_name: &str, text: &str) -> SyncResult<EnsureOutcome> {
        let layout = self.registry.require(layout_name)?;
        ensure_layout_sections(layout, text, self.heading_level)
    }

    /// Replaces the body of the section matched to block `block_title`.
    ///
    /// # Errors
    /// - `SyncError::BlockNotFound` when the layout has no such block.
    /// - `SyncError::SectionNotFound` when the document lacks the section.
    pub fn update_section(
        &self,
        layout_name: &str,
        text: &str,
        block_title: &str,
        new_body: &str,
    ) -> SyncResult<String> {
        let layout = self.registry.require(layout_name)?;
        update_layout_section(layout, text, block_title, new_body, self.heading_level)
    }
}

/// `ensure_sections` over an explicit layout.
pub fn ensure_layout_sections(
    layout: &GridLayout,
    text: &str,
    level: HeadingLevel,
) -> SyncResult<EnsureOutcome> {
    let document = Document::from_text(text);
    let parsed = parse_document(&document, level);
    let plan = resolve_missing(&document, &parsed, layout.blocks(), level);
    if plan.is_empty() {
        return Ok(EnsureOutcome {
            text: text.to_string(),
            added_titles: Vec::new(),
            insertion_line: None,
        });
    }

    let patched = apply_missing_sections(&document, &plan);
    verify_resolved(&patched, layout.blocks(), level)?;

    info!(
        "event=sections_ensure module=service status=ok layout={} added={} insertion_line={}",
        layout.name(),
        plan.stubs.len(),
        plan.insertion_line
    );
    Ok(EnsureOutcome {
        text: patched.to_text(),
        added_titles: plan.titles(),
        insertion_line: Some(plan.insertion_line),
    })
}

/// `update_section` over an explicit layout.
pub fn update_layout_section(
    layout: &GridLayout,
    text: &str,
    block_title: &str,
    new_body: &str,
    level: HeadingLevel,
) -> SyncResult<String> {
    let block = layout
        .blocks()
        .iter()
        .find(|block| titles_match(&block.title, block_title))
        .ok_or_else(|| SyncError::BlockNotFound(block_title.trim().to_string()))?;

    // Always patch against a parse of the text we were handed.
    let document = Document::from_text(text);
    let parsed = parse_document(&document, level);
    let matches = match_sections(layout.blocks(), &parsed.sections);
    let pair = matches
        .pair_for(&block.title)
        .ok_or_else(|| SyncError::SectionNotFound(block.title.clone()))?;

    let patched = patch_section(&document, &pair.section, &split_lines(new_body))?;
    info!(
        "event=section_update module=service status=ok layout={} start_line={} lines_before={} lines_after={}",
        layout.name(),
        pair.section.start_line,
        document.len(),
        patched.len()
    );
    Ok(patched.to_text())
}
