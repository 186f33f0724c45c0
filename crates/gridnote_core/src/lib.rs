//! Section-parsing and layout-synchronization engine for GridNote.
//! This crate is the single source of truth for section and layout invariants.

pub mod config;
pub mod layout;
pub mod logging;
pub mod model;
pub mod parse;
pub mod service;
pub mod sync;

pub use config::{ConfigError, EngineConfig, LayoutDefinition};
pub use layout::registry::{LayoutRegistry, RegistryError};
pub use layout::validator::{
    collect_violations, validate_blocks, BlockField, GridAxis, LayoutValidationError,
    LayoutViolation, LayoutViolationKind,
};
pub use logging::{default_log_level, init_logging, logging_status, LogSettings, LoggingError};
pub use model::document::{split_lines, Document};
pub use model::layout::{Block, GridLayout, GRID_COLUMNS, GRID_ROWS};
pub use model::section::{LineRange, ParsedDocument, Section};
pub use parse::frontmatter::detect_frontmatter;
pub use parse::sections::{
    parse_document, parse_sections, parse_text, HeadingLevel, HeadingLevelError,
};
pub use service::layout_sync::{
    ensure_layout_sections, update_layout_section, EnsureOutcome, LayoutSyncService, SyncReport,
};
pub use sync::matcher::{match_sections, normalize_title, MatchResult, MatchedPair};
pub use sync::patcher::{patch_section, patch_section_text};
pub use sync::resolver::{
    apply_missing_sections, plan_for_titles, resolve_missing, verify_resolved,
    MissingSectionPlan, SectionStub,
};
pub use sync::{SyncError, SyncResult};

/// Minimal health-check API for embedding hosts.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
