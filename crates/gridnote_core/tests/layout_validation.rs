use gridnote_core::{
    collect_violations, validate_blocks, Block, GridLayout, LayoutViolationKind, GRID_COLUMNS,
    GRID_ROWS,
};
use std::collections::BTreeSet;

#[test]
fn identical_blocks_overlap_at_every_cell() {
    let blocks = vec![Block::new("A", 0, 0, 12, 12), Block::new("B", 0, 0, 12, 12)];
    let err = validate_blocks(&blocks).expect_err("identical blocks must overlap");

    let mut cells = BTreeSet::new();
    for violation in err.violations() {
        match violation.kind {
            LayoutViolationKind::Overlap {
                first,
                second,
                col,
                row,
            } => {
                assert_eq!((first, second), (0, 1));
                assert!(cells.insert((col, row)), "cell reported twice");
            }
            ref other => panic!("unexpected violation: {other:?}"),
        }
    }

    let expected: BTreeSet<_> = (0..12)
        .flat_map(|row| (0..12).map(move |col| (col, row)))
        .collect();
    assert_eq!(cells, expected);
}

#[test]
fn every_overlapping_pair_is_reported_with_both_indices() {
    let cases = [
        (Block::new("A", 0, 0, 4, 4), Block::new("B", 3, 3, 4, 4)),
        (Block::new("A", 10, 0, 1, 100), Block::new("B", 0, 50, 24, 1)),
        (Block::new("A", 23, 99, 1, 1), Block::new("B", 20, 90, 4, 10)),
        (Block::new("A", 5, 5, 2, 2), Block::new("B", 5, 5, 1, 1)),
        (Block::new("", 0, 0, 2, 2), Block::new("B", 0, 0, 2, 2)),
        (Block::new("A", 0, 0, 2, 2), Block::new("Two\nlines", 1, 1, 2, 2)),
        (Block::new("A", -3, -3, 4, 4), Block::new("B", 0, 0, 2, 2)),
        (Block::new("A", 22, 0, 6, 1), Block::new("B", 24, 0, 3, 1)),
        (Block::new("A", 0, 98, 2, 5), Block::new("B", 1, 101, 1, 1)),
    ];

    for (first, second) in cases {
        let violations = collect_violations(&[first.clone(), second.clone()]);
        let overlap = violations
            .iter()
            .find(|violation| violation.is_overlap())
            .unwrap_or_else(|| panic!("expected overlap for {first:?} / {second:?}"));
        assert!(overlap.involves(0));
        assert!(overlap.involves(1));
    }
}

#[test]
fn touching_blocks_do_not_overlap() {
    let blocks = vec![
        Block::new("A", 0, 0, 12, 10),
        Block::new("B", 12, 0, 12, 10),
        Block::new("C", 0, 10, 24, 90),
    ];
    assert!(collect_violations(&blocks).is_empty());
}

#[test]
fn grid_edges_are_inclusive_limits() {
    let exact = Block::new("Full", 0, 0, GRID_COLUMNS, GRID_ROWS);
    assert!(validate_blocks(&[exact]).is_ok());

    let violations = collect_violations(&[Block::new("Wide", 1, 0, GRID_COLUMNS, 1)]);
    assert_eq!(violations.len(), 1);
    assert!(matches!(
        violations[0].kind,
        LayoutViolationKind::OutOfBounds { edge: 25, .. }
    ));
}

#[test]
fn all_violations_are_collected_not_just_the_first() {
    let violations = collect_violations(&[
        Block::new("", 0, 0, 1, 1),
        Block::new("B", 0, 0, 0, 1),
        Block::new("C", 20, 0, 10, 1),
        Block::new("D", 0, 5, 2, 2),
        Block::new("E", 1, 6, 1, 1),
    ]);

    let indices: BTreeSet<_> = violations.iter().map(|v| v.block_index).collect();
    assert_eq!(indices, BTreeSet::from([0, 1, 2, 4]));
}

#[test]
fn layout_deserialization_runs_the_validator() {
    let valid: GridLayout = serde_json::from_value(serde_json::json!({
        "name": "daily",
        "blocks": [{"title": "Todo", "x": 0, "y": 0, "w": 24, "h": 10}]
    }))
    .expect("valid layout should deserialize");
    assert_eq!(valid.titles(), vec!["Todo"]);

    let err = serde_json::from_value::<GridLayout>(serde_json::json!({
        "name": "broken",
        "blocks": [
            {"title": "A", "x": 0, "y": 0, "w": 2, "h": 2},
            {"title": "B", "x": 1, "y": 1, "w": 2, "h": 2}
        ]
    }))
    .expect_err("overlapping layout must fail");
    assert!(err.to_string().contains("overlap"), "unexpected error: {err}");
}

#[test]
fn violations_serialize_with_kind_tag() {
    let violations = collect_violations(&[Block::new("A", 0, 0, 30, 1)]);
    let json = serde_json::to_value(&violations).expect("serialize violations");
    assert_eq!(json[0]["block_index"], 0);
    assert_eq!(json[0]["kind"], "out_of_bounds");
    assert_eq!(json[0]["axis"], "columns");
    assert_eq!(json[0]["edge"], 30);
}
