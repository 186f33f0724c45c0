//! Text-side analysis: frontmatter detection and section parsing.
//!
//! # Invariants
//! - Parsing is total: any text produces some, possibly empty, section list.
//! - Frontmatter and the preamble before the first heading are skipped, never
//!   interpreted or rewritten.

pub mod frontmatter;
pub mod sections;
