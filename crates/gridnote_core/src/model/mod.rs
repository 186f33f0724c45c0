//! Pure data model shared by the parser, validator and sync layers.
//!
//! # Responsibility
//! - Define layout blocks on the fixed grid.
//! - Define heading-delimited sections and the line ranges around them.
//! - Provide the line view over raw document text.
//!
//! # Invariants
//! - Model values carry no behavior beyond accessors and validation hooks.
//! - Nothing here is cached between engine calls; every parse is fresh.

pub mod document;
pub mod layout;
pub mod section;
