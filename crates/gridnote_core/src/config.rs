//! Engine configuration.
//!
//! # Responsibility
//! - Carry the heading level and the named layout definitions the engine
//!   runs with.
//! - Turn layout definitions into a validated `LayoutRegistry`.
//!
//! # Invariants
//! - A deserialized config always has a heading level in `1..=6`.
//! - Reading config files is the caller's job; this module only defines the
//!   shape and its validation.

use crate::layout::registry::{LayoutRegistry, RegistryError};
use crate::model::layout::Block;
use crate::parse::sections::{HeadingLevel, HeadingLevelError};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// One named layout as written by the caller, not yet validated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutDefinition {
    pub name: String,
    pub blocks: Vec<Block>,
}

/// Engine-wide settings.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    /// Heading level that delimits sections; `2` means `## ` headings.
    pub heading_level: HeadingLevel,
    /// Layout definitions registered at startup.
    pub layouts: Vec<LayoutDefinition>,
}

impl EngineConfig {
    /// Default config with a custom heading level.
    pub fn with_heading_level(level: u8) -> Result<Self, ConfigError> {
        Ok(Self {
            heading_level: HeadingLevel::new(level)?,
            layouts: Vec::new(),
        })
    }

    /// Validates every layout definition and builds the registry.
    ///
    /// # Errors
    /// - Returns the first definition that fails name or block validation.
    pub fn build_registry(&self) -> Result<LayoutRegistry, ConfigError> {
        let mut registry = LayoutRegistry::new();
        for definition in &self.layouts {
            registry.define(&definition.name, definition.blocks.clone())?;
        }
        Ok(registry)
    }
}

/// Configuration errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    HeadingLevel(HeadingLevelError),
    Layout(RegistryError),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::HeadingLevel(err) => write!(f, "invalid config: {err}"),
            Self::Layout(err) => write!(f, "invalid config: {err}"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::HeadingLevel(err) => Some(err),
            Self::Layout(err) => Some(err),
        }
    }
}

impl From<HeadingLevelError> for ConfigError {
    fn from(value: HeadingLevelError) -> Self {
        Self::HeadingLevel(value)
    }
}

impl From<RegistryError> for ConfigError {
    fn from(value: RegistryError) -> Self {
        Self::Layout(value)
    }
}
