//! Section patcher.
//!
//! # Responsibility
//! - Replace one section body with new lines as a pure splice.
//! - Refuse sections whose coordinates no longer describe the live text.
//!
//! # Invariants
//! - Output equals `lines[..=start_line] + new_body + lines[end_line..]`.
//! - The heading line and every line outside `[start_line + 1, end_line)`
//!   are carried over byte-for-byte.
//! - A stale section produces an error and no output; there is no retry.

use crate::model::document::{split_lines, Document};
use crate::model::section::Section;
use crate::sync::{SyncError, SyncResult};
use log::{debug, warn};

/// Replaces the body of `section` in `document` with `new_body`.
///
/// `section` must come from a parse of this exact document.
///
/// # Errors
/// - `SyncError::StaleSection` when the section range, heading line or body
///   no longer matches `document`.
pub fn patch_section(
    document: &Document,
    section: &Section,
    new_body: &[String],
) -> SyncResult<Document> {
    ensure_live(document.lines(), section)?;

    let lines = document.lines();
    let mut out = Vec::with_capacity(lines.len() - section.lines.len() + new_body.len());
    out.extend_from_slice(&lines[..=section.start_line]);
    out.extend_from_slice(new_body);
    out.extend_from_slice(&lines[section.end_line..]);

    debug!(
        "event=section_patch module=sync status=ok start_line={} end_line={} old_body_lines={} new_body_lines={}",
        section.start_line,
        section.end_line,
        section.lines.len(),
        new_body.len()
    );
    Ok(Document::from_lines(out))
}

/// Text-level variant of [`patch_section`]; `new_body` is split on `\n`.
pub fn patch_section_text(text: &str, section: &Section, new_body: &str) -> SyncResult<String> {
    let document = Document::from_text(text);
    patch_section(&document, section, &split_lines(new_body)).map(|patched| patched.to_text())
}

fn ensure_live(lines: &[String], section: &Section) -> SyncResult<()> {
    let reason = if section.end_line <= section.start_line {
        Some("range does not include the heading line")
    } else if section.end_line > lines.len() {
        Some("range extends past end of document")
    } else if lines[section.start_line] != section.heading_line {
        Some("heading line differs")
    } else if section.end_line - section.start_line - 1 != section.lines.len()
        || lines[section.start_line + 1..section.end_line] != section.lines[..]
    {
        Some("body differs")
    } else {
        None
    };

    match reason {
        None => Ok(()),
        Some(reason) => {
            warn!(
                "event=section_patch module=sync status=error start_line={} end_line={} reason={}",
                section.start_line,
                section.end_line,
                reason.replace(' ', "_")
            );
            Err(SyncError::StaleSection {
                name: section.name.clone(),
                range: section.range(),
                reason,
            })
        }
    }
}
