//! Section matcher.
//!
//! # Invariants
//! - Titles compare by `normalize_title` equality only (trim + ASCII
//!   lowercase); no fuzzy matching.
//! - First unclaimed section in document order wins; later duplicates become
//!   extra sections.
//! - `missing_titles` keeps layout order, `extra_sections` document order.

use crate::model::layout::Block;
use crate::model::section::Section;
use log::trace;
use serde::Serialize;

/// Normalizes a block title or section name for comparison.
pub fn normalize_title(value: &str) -> String {
    value.trim().to_ascii_lowercase()
}

/// Returns whether two titles are equal after normalization.
pub fn titles_match(left: &str, right: &str) -> bool {
    normalize_title(left) == normalize_title(right)
}

/// One block paired with the section that satisfies it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatchedPair {
    /// Index into the layout blocks.
    pub block_index: usize,
    /// Index into the parsed sections.
    pub section_index: usize,
    pub block: Block,
    pub section: Section,
}

/// Outcome of matching one layout against one parse.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct MatchResult {
    /// Pairs in layout order.
    pub matched: Vec<MatchedPair>,
    /// Block titles without a section, in layout order.
    pub missing_titles: Vec<String>,
    /// Section names no block claimed, in document order.
    pub extra_sections: Vec<String>,
}

impl MatchResult {
    /// Returns whether every block found a section.
    pub fn is_complete(&self) -> bool {
        self.missing_titles.is_empty()
    }

    /// Returns the pair for the block whose title matches `title`.
    pub fn pair_for(&self, title: &str) -> Option<&MatchedPair> {
        self.matched
            .iter()
            .find(|pair| titles_match(&pair.block.title, title))
    }
}

/// Matches layout blocks to parsed sections.
pub fn match_sections(blocks: &[Block], sections: &[Section]) -> MatchResult {
    let normalized_sections: Vec<String> = sections
        .iter()
        .map(|section| normalize_title(&section.name))
        .collect();
    let mut claimed = vec![false; sections.len()];
    let mut result = MatchResult::default();

    for (block_index, block) in blocks.iter().enumerate() {
        let wanted = normalize_title(&block.title);
        let found = normalized_sections
            .iter()
            .enumerate()
            .find(|(index, name)| !claimed[*index] && **name == wanted)
            .map(|(index, _)| index);

        match found {
            Some(section_index) => {
                claimed[section_index] = true;
                result.matched.push(MatchedPair {
                    block_index,
                    section_index,
                    block: block.clone(),
                    section: sections[section_index].clone(),
                });
            }
            None => result.missing_titles.push(block.title.clone()),
        }
    }

    result.extra_sections = sections
        .iter()
        .zip(claimed.iter())
        .filter(|(_, claimed)| !**claimed)
        .map(|(section, _)| section.name.clone())
        .collect();

    trace!(
        "event=sections_match module=sync status=ok blocks={} sections={} matched={} missing={} extra={}",
        blocks.len(),
        sections.len(),
        result.matched.len(),
        result.missing_titles.len(),
        result.extra_sections.len()
    );
    result
}
