//! Layout/document reconciliation: matching, stub resolution and patching.
//!
//! # Responsibility
//! - Pair layout blocks with parsed sections by normalized title.
//! - Plan and apply append-only stubs for missing sections.
//! - Splice new section bodies into live text without touching other lines.
//!
//! # Invariants
//! - Every operation is a pure function of its inputs.
//! - Extra sections are never deleted or reordered.

pub mod matcher;
pub mod patcher;
pub mod resolver;

use crate::layout::registry::RegistryError;
use crate::model::section::LineRange;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type SyncResult<T> = Result<T, SyncError>;

/// Errors raised by layout/document synchronization.
///
/// Apart from `Registry`, `BlockNotFound` and `SectionNotFound`, these are
/// contract violations by the caller and are not retried.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncError {
    /// Layout lookup or definition failed.
    Registry(RegistryError),
    /// The layout has no block with this normalized title.
    BlockNotFound(String),
    /// The block exists but the document has no section for it.
    SectionNotFound(String),
    /// The supplied section no longer matches the live text.
    StaleSection {
        name: String,
        range: LineRange,
        reason: &'static str,
    },
    /// Titles still missing after stubs were applied.
    UnresolvedTitles(Vec<String>),
}

impl Display for SyncError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Registry(err) => write!(f, "{err}"),
            Self::BlockNotFound(title) => write!(f, "layout has no block titled `{title}`"),
            Self::SectionNotFound(title) => {
                write!(f, "document has no section for block `{title}`")
            }
            Self::StaleSection {
                name,
                range,
                reason,
            } => write!(
                f,
                "stale section `{name}` at lines {}..{}: {reason}; re-parse before patching",
                range.start, range.end
            ),
            Self::UnresolvedTitles(titles) => write!(
                f,
                "titles still missing after resolve: {}",
                titles.join(", ")
            ),
        }
    }
}

impl Error for SyncError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Registry(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RegistryError> for SyncError {
    fn from(value: RegistryError) -> Self {
        Self::Registry(value)
    }
}
