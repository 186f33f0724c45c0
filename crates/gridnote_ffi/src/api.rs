//! FFI use-case API for Flutter-facing calls.
//!
//! # Responsibility
//! - Expose the stateless engine as flat, use-case-level functions via FRB.
//! - Translate typed engine errors into response envelopes.
//!
//! # Invariants
//! - Exported functions must not panic across the FFI boundary.
//! - Every call takes the full document text and returns full text; nothing
//!   is cached between calls.

use gridnote_core::{
    collect_violations, core_version as core_version_inner, ensure_layout_sections,
    init_logging as init_logging_inner, parse_text, ping as ping_inner, update_layout_section,
    Block, GridLayout, HeadingLevel, LayoutViolation,
};
use log::warn;

const FFI_LAYOUT_NAME: &str = "ffi";

/// Minimal health-check API for FRB smoke integration.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// Input semantics:
/// - `level`: one of `trace|debug|info|warn|error` (case-insensitive).
/// - `log_dir`: absolute directory path where rolling logs are written.
///
/// # FFI contract
/// - Safe to call repeatedly with the same `level + log_dir` (idempotent).
/// - Returns empty string on success and the error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err.to_string(),
    }
}

/// Layout block as sent by the UI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayoutBlockInput {
    pub title: String,
    pub x: i64,
    pub y: i64,
    pub w: i64,
    pub h: i64,
}

/// One validator finding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayoutViolationItem {
    /// Offending block index (the later block for overlaps).
    pub block_index: u32,
    /// Violation kind label, e.g. `overlap`.
    pub kind: String,
    /// Human-readable description.
    pub message: String,
}

/// Validation response envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayoutValidationResponse {
    pub ok: bool,
    pub violations: Vec<LayoutViolationItem>,
}

/// One parsed section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionItem {
    pub name: String,
    pub start_line: u32,
    pub end_line: u32,
    /// Body text joined with `\n`.
    pub body: String,
}

/// Parse response envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentSectionsResponse {
    pub ok: bool,
    pub sections: Vec<SectionItem>,
    /// Line index one past the frontmatter block, `0` when absent.
    pub frontmatter_end: u32,
    pub message: String,
}

/// Text-producing action envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentActionResponse {
    pub ok: bool,
    /// Full new document text; the input text when the call failed.
    pub text: String,
    /// Titles that received stubs (ensure only).
    pub added_titles: Vec<String>,
    pub message: String,
}

impl DocumentActionResponse {
    fn success(text: String, added_titles: Vec<String>, message: impl Into<String>) -> Self {
        Self {
            ok: true,
            text,
            added_titles,
            message: message.into(),
        }
    }

    fn failure(text: String, message: impl Into<String>) -> Self {
        Self {
            ok: false,
            text,
            added_titles: Vec::new(),
            message: message.into(),
        }
    }
}

/// Validates a layout definition.
///
/// # FFI contract
/// - Sync call, pure computation.
/// - Reports every violation; never panics.
#[flutter_rust_bridge::frb(sync)]
pub fn layout_validate(blocks: Vec<LayoutBlockInput>) -> LayoutValidationResponse {
    let blocks = to_blocks(blocks);
    let violations = collect_violations(&blocks)
        .into_iter()
        .map(to_violation_item)
        .collect::<Vec<_>>();
    LayoutValidationResponse {
        ok: violations.is_empty(),
        violations,
    }
}

/// Parses document text into sections at `heading_level`.
///
/// # FFI contract
/// - Sync call, pure computation.
/// - Fails only for a heading level outside `1..=6`.
#[flutter_rust_bridge::frb(sync)]
pub fn document_sections(text: String, heading_level: u8) -> DocumentSectionsResponse {
    let level = match HeadingLevel::new(heading_level) {
        Ok(level) => level,
        Err(err) => {
            return DocumentSectionsResponse {
                ok: false,
                sections: Vec::new(),
                frontmatter_end: 0,
                message: format!("document_sections failed: {err}"),
            };
        }
    };

    let parsed = parse_text(&text, level);
    let sections = parsed
        .sections
        .iter()
        .map(|section| SectionItem {
            name: section.name.clone(),
            start_line: to_u32(section.start_line),
            end_line: to_u32(section.end_line),
            body: section.body_text(),
        })
        .collect::<Vec<_>>();
    DocumentSectionsResponse {
        ok: true,
        message: format!("Found {} section(s).", sections.len()),
        sections,
        frontmatter_end: to_u32(parsed.frontmatter.end),
    }
}

/// Appends heading stubs for layout blocks missing from `text`.
///
/// # FFI contract
/// - Sync call, pure computation.
/// - On failure `text` is returned unchanged with `ok = false`.
#[flutter_rust_bridge::frb(sync)]
pub fn document_ensure_sections(
    text: String,
    blocks: Vec<LayoutBlockInput>,
    heading_level: u8,
) -> DocumentActionResponse {
    let (layout, level) = match prepare(blocks, heading_level) {
        Ok(prepared) => prepared,
        Err(message) => {
            return DocumentActionResponse::failure(
                text,
                format!("document_ensure_sections failed: {message}"),
            )
        }
    };

    match ensure_layout_sections(&layout, &text, level) {
        Ok(outcome) if outcome.changed() => {
            let message = format!("Added {} section(s).", outcome.added_titles.len());
            DocumentActionResponse::success(outcome.text, outcome.added_titles, message)
        }
        Ok(outcome) => DocumentActionResponse::success(outcome.text, Vec::new(), "No changes."),
        Err(err) => {
            warn!("event=ffi_ensure module=ffi status=error");
            DocumentActionResponse::failure(text, format!("document_ensure_sections failed: {err}"))
        }
    }
}

/// Replaces the body of the section matched to block `title`.
///
/// # FFI contract
/// - Sync call, pure computation; re-parses `text` before patching.
/// - On failure `text` is returned unchanged with `ok = false`.
#[flutter_rust_bridge::frb(sync)]
pub fn document_patch_section(
    text: String,
    blocks: Vec<LayoutBlockInput>,
    title: String,
    body: String,
    heading_level: u8,
) -> DocumentActionResponse {
    let (layout, level) = match prepare(blocks, heading_level) {
        Ok(prepared) => prepared,
        Err(message) => {
            return DocumentActionResponse::failure(
                text,
                format!("document_patch_section failed: {message}"),
            )
        }
    };

    match update_layout_section(&layout, &text, &title, &body, level) {
        Ok(patched) => DocumentActionResponse::success(patched, Vec::new(), "Section updated."),
        Err(err) => {
            DocumentActionResponse::failure(text, format!("document_patch_section failed: {err}"))
        }
    }
}

fn prepare(
    blocks: Vec<LayoutBlockInput>,
    heading_level: u8,
) -> Result<(GridLayout, HeadingLevel), String> {
    let level = HeadingLevel::new(heading_level).map_err(|err| err.to_string())?;
    let layout =
        GridLayout::new(FFI_LAYOUT_NAME, to_blocks(blocks)).map_err(|err| err.to_string())?;
    Ok((layout, level))
}

fn to_blocks(blocks: Vec<LayoutBlockInput>) -> Vec<Block> {
    blocks
        .into_iter()
        .map(|input| Block::new(input.title, input.x, input.y, input.w, input.h))
        .collect()
}

fn to_violation_item(violation: LayoutViolation) -> LayoutViolationItem {
    use gridnote_core::LayoutViolationKind as Kind;

    let kind = match violation.kind {
        Kind::EmptyTitle => "empty_title",
        Kind::MultilineTitle => "multiline_title",
        Kind::NegativeValue { .. } => "negative_value",
        Kind::ZeroExtent { .. } => "zero_extent",
        Kind::OutOfBounds { .. } => "out_of_bounds",
        Kind::Overlap { .. } => "overlap",
    };
    LayoutViolationItem {
        block_index: to_u32(violation.block_index),
        kind: kind.to_string(),
        message: violation.to_string(),
    }
}

fn to_u32(value: usize) -> u32 {
    u32::try_from(value).unwrap_or(u32::MAX)
}
