//! Leading YAML frontmatter detection.
//!
//! Only the delimiters are inspected. The YAML payload is opaque here; key
//! extraction belongs to the caller.

use crate::model::section::LineRange;

/// Exact delimiter line, no whitespace tolerance.
pub const FRONTMATTER_DELIMITER: &str = "---";

/// Returns the half-open line range occupied by frontmatter.
///
/// Line 0 must be exactly `---` and a later line must be exactly `---`;
/// the range then ends one past that closing line. A missing closing
/// delimiter is a normal mid-edit state and yields the empty range `[0, 0)`.
pub fn detect_frontmatter(lines: &[String]) -> LineRange {
    match lines.first() {
        Some(first) if first == FRONTMATTER_DELIMITER => {}
        _ => return LineRange::empty_at(0),
    }

    lines
        .iter()
        .enumerate()
        .skip(1)
        .find(|(_, line)| line.as_str() == FRONTMATTER_DELIMITER)
        .map(|(index, _)| LineRange::new(0, index + 1))
        .unwrap_or_else(|| LineRange::empty_at(0))
}
