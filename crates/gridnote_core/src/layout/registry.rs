//! Named layout registry.

use crate::layout::validator::LayoutValidationError;
use crate::model::layout::{Block, GridLayout};
use log::info;
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Layout registration/lookup errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    InvalidLayoutName(String),
    DuplicateLayoutName(String),
    LayoutNotFound(String),
    InvalidLayout {
        name: String,
        source: LayoutValidationError,
    },
}

impl Display for RegistryError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidLayoutName(value) => write!(f, "layout name is invalid: `{value}`"),
            Self::DuplicateLayoutName(value) => {
                write!(f, "layout name already registered: `{value}`")
            }
            Self::LayoutNotFound(value) => write!(f, "layout not found: `{value}`"),
            Self::InvalidLayout { name, source } => write!(f, "layout `{name}` rejected: {source}"),
        }
    }
}

impl Error for RegistryError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidLayout { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// In-process registry of validated layouts keyed by name.
#[derive(Debug, Clone, Default)]
pub struct LayoutRegistry {
    layouts: BTreeMap<String, GridLayout>,
}

impl LayoutRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an already validated layout under its own name.
    pub fn register(&mut self, layout: GridLayout) -> Result<(), RegistryError> {
        let name = layout.name().trim().to_string();
        if !is_valid_layout_name(&name) {
            return Err(RegistryError::InvalidLayoutName(name));
        }
        if self.layouts.contains_key(name.as_str()) {
            return Err(RegistryError::DuplicateLayoutName(name));
        }

        info!(
            "event=layout_register module=layout status=ok name={} blocks={}",
            name,
            layout.blocks().len()
        );
        self.layouts.insert(name.clone(), layout.with_name(name));
        Ok(())
    }

    /// Validates raw blocks and registers them as `name`.
    pub fn define(&mut self, name: &str, blocks: Vec<Block>) -> Result<(), RegistryError> {
        let trimmed = name.trim();
        let layout =
            GridLayout::new(trimmed, blocks).map_err(|source| RegistryError::InvalidLayout {
                name: trimmed.to_string(),
                source,
            })?;
        self.register(layout)
    }

    pub fn len(&self) -> usize {
        self.layouts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layouts.is_empty()
    }

    /// Returns sorted layout names.
    pub fn names(&self) -> Vec<String> {
        self.layouts.keys().cloned().collect()
    }

    /// Returns one layout by name.
    pub fn get(&self, name: &str) -> Option<&GridLayout> {
        self.layouts.get(name.trim())
    }

    /// Returns one layout by name or a typed not-found error.
    pub fn require(&self, name: &str) -> Result<&GridLayout, RegistryError> {
        self.get(name)
            .ok_or_else(|| RegistryError::LayoutNotFound(name.trim().to_string()))
    }
}

fn is_valid_layout_name(value: &str) -> bool {
    if value.is_empty() {
        return false;
    }
    value
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.' | ' '))
}
