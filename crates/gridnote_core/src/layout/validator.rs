//! Layout validator.
//!
//! # Responsibility
//! - Check block definitions for structural, bounds and overlap violations.
//! - Report every violation found, in a stable order.
//!
//! # Invariants
//! - Violations are ordered by stage (structural, bounds, overlap), then by
//!   block index, then by cell in row-major order.
//! - Overlap detection covers every pair of blocks that share a cell, whether
//!   or not either block failed an earlier stage, using real coordinates.
//! - At most `OVERLAP_CELLS_PER_PAIR` cells are reported per pair of blocks.
//! - Nothing is auto-corrected.

use crate::model::layout::{Block, GRID_COLUMNS, GRID_ROWS};
use log::debug;
use serde::Serialize;
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Cap on overlap cells reported for one pair of blocks; one full grid.
pub const OVERLAP_CELLS_PER_PAIR: usize = (GRID_COLUMNS * GRID_ROWS) as usize;

/// Block coordinate field named by a violation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BlockField {
    X,
    Y,
    W,
    H,
}

impl BlockField {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::X => "x",
            Self::Y => "y",
            Self::W => "w",
            Self::H => "h",
        }
    }
}

/// Grid axis named by a bounds violation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GridAxis {
    Columns,
    Rows,
}

/// Kind of one layout violation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LayoutViolationKind {
    /// Title is empty or whitespace only.
    EmptyTitle,
    /// Title contains a line break and cannot become a heading.
    MultilineTitle,
    /// `x`, `y`, `w` or `h` is below zero.
    NegativeValue { field: BlockField, value: i64 },
    /// `w` or `h` is zero.
    ZeroExtent { field: BlockField },
    /// `x + w > 24` or `y + h > 100`.
    OutOfBounds { axis: GridAxis, edge: i64, limit: i64 },
    /// Cell `(col, row)` is occupied by both `first` and `second`.
    Overlap {
        first: usize,
        second: usize,
        col: i64,
        row: i64,
    },
}

/// One violation tagged with the offending block index.
///
/// For overlaps `block_index` is the later block; the kind names both.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LayoutViolation {
    pub block_index: usize,
    #[serde(flatten)]
    pub kind: LayoutViolationKind,
}

impl LayoutViolation {
    fn new(block_index: usize, kind: LayoutViolationKind) -> Self {
        Self { block_index, kind }
    }

    /// Returns whether this violation references block `index`.
    pub fn involves(&self, index: usize) -> bool {
        match self.kind {
            LayoutViolationKind::Overlap { first, second, .. } => {
                first == index || second == index
            }
            _ => self.block_index == index,
        }
    }

    pub fn is_overlap(&self) -> bool {
        matches!(self.kind, LayoutViolationKind::Overlap { .. })
    }
}

impl Display for LayoutViolation {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let index = self.block_index;
        match &self.kind {
            LayoutViolationKind::EmptyTitle => write!(f, "block #{index}: title must not be empty"),
            LayoutViolationKind::MultilineTitle => {
                write!(f, "block #{index}: title must be a single line")
            }
            LayoutViolationKind::NegativeValue { field, value } => write!(
                f,
                "block #{index}: `{}` must not be negative, got {value}",
                field.as_str()
            ),
            LayoutViolationKind::ZeroExtent { field } => {
                write!(f, "block #{index}: `{}` must be at least 1", field.as_str())
            }
            LayoutViolationKind::OutOfBounds { axis, edge, limit } => {
                let label = match axis {
                    GridAxis::Columns => "x + w",
                    GridAxis::Rows => "y + h",
                };
                write!(f, "block #{index}: {label} = {edge} exceeds grid limit {limit}")
            }
            LayoutViolationKind::Overlap {
                first,
                second,
                col,
                row,
            } => write!(
                f,
                "blocks #{first} and #{second} overlap at cell ({col}, {row})"
            ),
        }
    }
}

/// Non-empty list of violations for one layout definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayoutValidationError {
    violations: Vec<LayoutViolation>,
}

impl LayoutValidationError {
    pub fn violations(&self) -> &[LayoutViolation] {
        &self.violations
    }

    pub fn into_violations(self) -> Vec<LayoutViolation> {
        self.violations
    }
}

impl Display for LayoutValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "layout has {} violation(s)", self.violations.len())?;
        if let Some(first) = self.violations.first() {
            write!(f, "; first: {first}")?;
        }
        Ok(())
    }
}

impl Error for LayoutValidationError {}

/// Validates blocks and fails with the full violation list.
pub fn validate_blocks(blocks: &[Block]) -> Result<(), LayoutValidationError> {
    let violations = collect_violations(blocks);
    if violations.is_empty() {
        debug!(
            "event=layout_validate module=layout status=ok blocks={}",
            blocks.len()
        );
        return Ok(());
    }
    debug!(
        "event=layout_validate module=layout status=error blocks={} violations={}",
        blocks.len(),
        violations.len()
    );
    Err(LayoutValidationError { violations })
}

/// Runs every check and returns all violations, empty when valid.
pub fn collect_violations(blocks: &[Block]) -> Vec<LayoutViolation> {
    let mut violations = Vec::new();

    for (index, block) in blocks.iter().enumerate() {
        check_structure(index, block, &mut violations);
    }

    for (index, block) in blocks.iter().enumerate() {
        check_bounds(index, block, &mut violations);
    }

    for (index, block) in blocks.iter().enumerate() {
        check_overlaps(index, block, &blocks[..index], &mut violations);
    }

    violations
}

/// Flags each cell of `block` already owned by an earlier block.
///
/// The owner is the lowest-indexed earlier block covering the cell.
fn check_overlaps(
    index: usize,
    block: &Block,
    earlier: &[Block],
    out: &mut Vec<LayoutViolation>,
) {
    let mut owners: BTreeMap<(i64, i64), usize> = BTreeMap::new();
    for (first, other) in earlier.iter().enumerate() {
        let mut shared = block.shared_cells(other);
        for (col, row) in shared.by_ref().take(OVERLAP_CELLS_PER_PAIR) {
            owners.entry((row, col)).or_insert(first);
        }
        if shared.next().is_some() {
            debug!(
                "event=layout_validate module=layout status=overlap_truncated first={first} second={index} limit={OVERLAP_CELLS_PER_PAIR}"
            );
        }
    }

    for ((row, col), first) in owners {
        out.push(LayoutViolation::new(
            index,
            LayoutViolationKind::Overlap {
                first,
                second: index,
                col,
                row,
            },
        ));
    }
}

fn check_structure(index: usize, block: &Block, out: &mut Vec<LayoutViolation>) {
    if block.title.trim().is_empty() {
        out.push(LayoutViolation::new(index, LayoutViolationKind::EmptyTitle));
    } else if block.title.contains(['\n', '\r']) {
        out.push(LayoutViolation::new(index, LayoutViolationKind::MultilineTitle));
    }

    for (field, value) in [
        (BlockField::X, block.x),
        (BlockField::Y, block.y),
        (BlockField::W, block.w),
        (BlockField::H, block.h),
    ] {
        if value < 0 {
            out.push(LayoutViolation::new(
                index,
                LayoutViolationKind::NegativeValue { field, value },
            ));
        } else if value == 0 && matches!(field, BlockField::W | BlockField::H) {
            out.push(LayoutViolation::new(
                index,
                LayoutViolationKind::ZeroExtent { field },
            ));
        }
    }
}

fn check_bounds(index: usize, block: &Block, out: &mut Vec<LayoutViolation>) {
    let right = block.right();
    if right > GRID_COLUMNS {
        out.push(LayoutViolation::new(
            index,
            LayoutViolationKind::OutOfBounds {
                axis: GridAxis::Columns,
                edge: right,
                limit: GRID_COLUMNS,
            },
        ));
    }
    let bottom = block.bottom();
    if bottom > GRID_ROWS {
        out.push(LayoutViolation::new(
            index,
            LayoutViolationKind::OutOfBounds {
                axis: GridAxis::Rows,
                edge: bottom,
                limit: GRID_ROWS,
            },
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::{
        collect_violations, validate_blocks, BlockField, GridAxis, LayoutViolationKind,
        OVERLAP_CELLS_PER_PAIR,
    };
    use crate::model::layout::Block;

    #[test]
    fn accepts_full_width_non_overlapping_layout() {
        let blocks = vec![
            Block::new("Left", 0, 0, 12, 100),
            Block::new("Right", 12, 0, 12, 100),
        ];
        assert!(validate_blocks(&blocks).is_ok());
    }

    #[test]
    fn accepts_empty_layout() {
        assert!(validate_blocks(&[]).is_ok());
    }

    #[test]
    fn reports_structural_violations_for_every_field() {
        let violations = collect_violations(&[Block::new("  ", -1, -2, 0, -3)]);
        let kinds: Vec<_> = violations.iter().map(|v| v.kind.clone()).collect();
        assert_eq!(
            kinds,
            vec![
                LayoutViolationKind::EmptyTitle,
                LayoutViolationKind::NegativeValue {
                    field: BlockField::X,
                    value: -1
                },
                LayoutViolationKind::NegativeValue {
                    field: BlockField::Y,
                    value: -2
                },
                LayoutViolationKind::ZeroExtent {
                    field: BlockField::W
                },
                LayoutViolationKind::NegativeValue {
                    field: BlockField::H,
                    value: -3
                },
            ]
        );
    }

    #[test]
    fn rejects_multiline_title() {
        let violations = collect_violations(&[Block::new("To\ndo", 0, 0, 1, 1)]);
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].kind, LayoutViolationKind::MultilineTitle);
    }

    #[test]
    fn reports_both_bounds_axes() {
        let violations = collect_violations(&[Block::new("A", 20, 95, 5, 6)]);
        assert_eq!(
            violations.iter().map(|v| v.kind.clone()).collect::<Vec<_>>(),
            vec![
                LayoutViolationKind::OutOfBounds {
                    axis: GridAxis::Columns,
                    edge: 25,
                    limit: 24
                },
                LayoutViolationKind::OutOfBounds {
                    axis: GridAxis::Rows,
                    edge: 101,
                    limit: 100
                },
            ]
        );
    }

    #[test]
    fn stages_are_reported_in_order() {
        let violations = collect_violations(&[
            Block::new("A", 0, 0, 30, 1),
            Block::new("", 0, 0, 1, 1),
            Block::new("C", 0, 0, 2, 1),
        ]);
        assert!(matches!(
            violations[0].kind,
            LayoutViolationKind::EmptyTitle
        ));
        assert!(matches!(
            violations[1].kind,
            LayoutViolationKind::OutOfBounds { .. }
        ));
        let overlaps: Vec<_> = violations[2..].iter().map(|v| v.kind.clone()).collect();
        assert_eq!(
            overlaps,
            vec![
                LayoutViolationKind::Overlap {
                    first: 0,
                    second: 1,
                    col: 0,
                    row: 0
                },
                LayoutViolationKind::Overlap {
                    first: 0,
                    second: 2,
                    col: 0,
                    row: 0
                },
                LayoutViolationKind::Overlap {
                    first: 0,
                    second: 2,
                    col: 1,
                    row: 0
                },
            ]
        );
    }

    #[test]
    fn structurally_invalid_blocks_still_report_overlap() {
        let violations = collect_violations(&[
            Block::new("", 0, 0, 2, 2),
            Block::new("B", 0, 0, 2, 2),
        ]);
        assert_eq!(violations[0].kind, LayoutViolationKind::EmptyTitle);
        let overlaps: Vec<_> = violations.iter().filter(|v| v.is_overlap()).collect();
        assert_eq!(overlaps.len(), 4);
        assert!(overlaps.iter().all(|v| v.involves(0) && v.involves(1)));
    }

    #[test]
    fn overlap_outside_grid_is_reported_at_real_cells() {
        let violations = collect_violations(&[
            Block::new("A", 22, 0, 6, 1),
            Block::new("B", 24, 0, 3, 1),
        ]);
        let cells: Vec<_> = violations
            .iter()
            .filter_map(|v| match v.kind {
                LayoutViolationKind::Overlap {
                    first: 0,
                    second: 1,
                    col,
                    row,
                } => Some((col, row)),
                _ => None,
            })
            .collect();
        assert_eq!(cells, vec![(24, 0), (25, 0), (26, 0)]);
    }

    #[test]
    fn negative_origin_overlap_is_reported() {
        let violations = collect_violations(&[
            Block::new("A", -2, -2, 3, 3),
            Block::new("B", 0, 0, 1, 1),
        ]);
        let expected = LayoutViolationKind::Overlap {
            first: 0,
            second: 1,
            col: 0,
            row: 0,
        };
        assert!(violations.iter().any(|v| v.kind == expected));
    }

    #[test]
    fn zero_extent_block_shares_no_cells() {
        let violations = collect_violations(&[
            Block::new("A", 0, 0, 4, 4),
            Block::new("B", 1, 1, 0, 2),
        ]);
        assert!(!violations.iter().any(|v| v.is_overlap()));
    }

    #[test]
    fn overlap_of_three_blocks_names_first_owner() {
        let violations = collect_violations(&[
            Block::new("A", 0, 0, 1, 1),
            Block::new("B", 0, 0, 1, 1),
            Block::new("C", 0, 0, 1, 1),
        ]);
        assert_eq!(
            violations.iter().map(|v| v.kind.clone()).collect::<Vec<_>>(),
            vec![
                LayoutViolationKind::Overlap {
                    first: 0,
                    second: 1,
                    col: 0,
                    row: 0
                },
                LayoutViolationKind::Overlap {
                    first: 0,
                    second: 2,
                    col: 0,
                    row: 0
                },
            ]
        );
    }

    #[test]
    fn oversized_block_overlap_reports_shared_cells_only() {
        let violations = collect_violations(&[
            Block::new("Huge", 0, 0, 1_000_000_000, 1_000_000_000),
            Block::new("Cell", 23, 99, 1, 1),
        ]);
        let overlaps: Vec<_> = violations.iter().filter(|v| v.is_overlap()).collect();
        assert_eq!(overlaps.len(), 1);
        assert_eq!(violations.len(), 3);
    }

    #[test]
    fn overlap_cells_per_pair_are_capped() {
        let violations = collect_violations(&[
            Block::new("A", 0, 0, 1_000_000, 1_000_000),
            Block::new("B", 0, 0, 1_000_000, 1_000_000),
        ]);
        let overlaps: Vec<_> = violations.iter().filter(|v| v.is_overlap()).collect();
        assert_eq!(overlaps.len(), OVERLAP_CELLS_PER_PAIR);
        assert!(overlaps.iter().all(|v| v.involves(0) && v.involves(1)));
    }

    #[test]
    fn error_display_names_count_and_first_violation() {
        let err = validate_blocks(&[Block::new("", 0, 0, 1, 1)]).expect_err("empty title");
        let message = err.to_string();
        assert!(message.contains("1 violation"));
        assert!(message.contains("title must not be empty"));
    }
}
