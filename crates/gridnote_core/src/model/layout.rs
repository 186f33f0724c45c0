//! Grid layout model.
//!
//! # Responsibility
//! - Define named rectangles (`Block`) on the fixed 24x100 grid.
//! - Provide `GridLayout`, an ordered, validated list of blocks.
//!
//! # Invariants
//! - A `GridLayout` value has always passed the layout validator: every block
//!   is in bounds and no two blocks share a cell.
//! - Block order is the layout order used for matching and stub generation.
//! - Layouts are configuration data; they are never derived from documents.

use crate::layout::validator::{validate_blocks, LayoutValidationError};
use serde::{Deserialize, Serialize};

/// Grid width in columns.
pub const GRID_COLUMNS: i64 = 24;
/// Grid height in rows.
pub const GRID_ROWS: i64 = 100;

/// One named rectangle in a layout.
///
/// Coordinates are signed so definitions from outside can be reported by the
/// validator instead of being rejected during deserialization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    /// Matched against section headings after normalization.
    pub title: String,
    pub x: i64,
    pub y: i64,
    pub w: i64,
    pub h: i64,
}

impl Block {
    pub fn new(title: impl Into<String>, x: i64, y: i64, w: i64, h: i64) -> Self {
        Self {
            title: title.into(),
            x,
            y,
            w,
            h,
        }
    }

    /// Exclusive right edge.
    pub fn right(&self) -> i64 {
        self.x.saturating_add(self.w)
    }

    /// Exclusive bottom edge.
    pub fn bottom(&self) -> i64 {
        self.y.saturating_add(self.h)
    }

    /// Iterates `(col, row)` cells occupied by both blocks, in row-major order.
    ///
    /// Cells are real grid coordinates and are not clipped to the grid. A
    /// block with a zero or negative extent shares no cells.
    pub fn shared_cells(&self, other: &Block) -> impl Iterator<Item = (i64, i64)> {
        let (x, right) = (self.x.max(other.x), self.right().min(other.right()));
        let (y, bottom) = (self.y.max(other.y), self.bottom().min(other.bottom()));
        (y..bottom).flat_map(move |row| (x..right).map(move |col| (col, row)))
    }
}

/// Ordered, validated set of blocks under a stable name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "GridLayoutDef")]
pub struct GridLayout {
    name: String,
    blocks: Vec<Block>,
}

impl GridLayout {
    /// Builds a layout after running the full validator over `blocks`.
    ///
    /// # Errors
    /// - Returns every structural, bounds and overlap violation found.
    pub fn new(name: impl Into<String>, blocks: Vec<Block>) -> Result<Self, LayoutValidationError> {
        validate_blocks(&blocks)?;
        Ok(Self {
            name: name.into(),
            blocks,
        })
    }

    /// Same blocks under another name; blocks stay validated.
    pub(crate) fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    /// Block titles in layout order.
    pub fn titles(&self) -> Vec<&str> {
        self.blocks.iter().map(|block| block.title.as_str()).collect()
    }
}

/// Unvalidated wire shape for `GridLayout` deserialization.
#[derive(Debug, Deserialize)]
struct GridLayoutDef {
    name: String,
    blocks: Vec<Block>,
}

impl TryFrom<GridLayoutDef> for GridLayout {
    type Error = LayoutValidationError;

    fn try_from(value: GridLayoutDef) -> Result<Self, Self::Error> {
        GridLayout::new(value.name, value.blocks)
    }
}
