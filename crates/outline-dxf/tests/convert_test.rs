//! Integration tests for outline/drill extraction and DXF output on fixture boards.

use outline_dxf::excellon::ExcellonUnits;
use outline_dxf::gerber::Units;
use outline_dxf::{convert, excellon, gerber, HoleFilter, OutlineEntity};

const EDGE_CUTS: &str = include_str!("fixtures/board/board-Edge_Cuts.gbr");
const INCH_EDGE_CUTS: &str = include_str!("fixtures/board/board-inch-Edge_Cuts.gbr");
const PTH: &str = include_str!("fixtures/board/board-PTH.drl");
const NPTH: &str = include_str!("fixtures/board/board-NPTH.drl");
const INCH_DRILL: &str = include_str!("fixtures/board/board-inch.drl");

const EPSILON: f64 = 1e-6;

fn line_count(entities: &[OutlineEntity]) -> usize {
    entities
        .iter()
        .filter(|e| matches!(e, OutlineEntity::Line { .. }))
        .count()
}

/// KiCad rounded-rectangle outline → four lines and four corner arcs.
#[test]
fn kicad_outline_yields_lines_and_corner_arcs() {
    let outline = gerber::extract(EDGE_CUTS);
    assert_eq!(outline.entities.len(), 8, "entities: {:?}", outline.entities);
    assert_eq!(line_count(&outline.entities), 4);
    assert_eq!(outline.units, Units::Millimeter);
    assert!(
        outline.warnings.is_empty(),
        "unexpected warnings: {:?}",
        outline.warnings
    );
}

/// Clockwise corners are stored counter-clockwise with swapped angles.
#[test]
fn kicad_outline_corner_arcs_are_counter_clockwise() {
    let outline = gerber::extract(EDGE_CUTS);
    let arcs: Vec<(f64, f64, f64, f64, f64)> = outline
        .entities
        .iter()
        .filter_map(|e| match *e {
            OutlineEntity::Arc {
                cx,
                cy,
                radius,
                start_angle,
                end_angle,
            } => Some((cx, cy, radius, start_angle, end_angle)),
            OutlineEntity::Line { .. } => None,
        })
        .collect();

    let expected = [
        (2.0, 2.0, 2.0, 180.0, 270.0),
        (2.0, 28.0, 2.0, 90.0, 180.0),
        (48.0, 28.0, 2.0, 0.0, 90.0),
        (48.0, 2.0, 2.0, 270.0, 0.0),
    ];
    assert_eq!(arcs.len(), expected.len());
    for (got, want) in arcs.iter().zip(expected.iter()) {
        assert!((got.0 - want.0).abs() < EPSILON, "cx {got:?} vs {want:?}");
        assert!((got.1 - want.1).abs() < EPSILON, "cy {got:?} vs {want:?}");
        assert!((got.2 - want.2).abs() < EPSILON, "r {got:?} vs {want:?}");
        assert!((got.3 - want.3).abs() < EPSILON, "start {got:?} vs {want:?}");
        assert!((got.4 - want.4).abs() < EPSILON, "end {got:?} vs {want:?}");
    }
}

/// Outline bounds match the 50 x 30 mm board.
#[test]
fn kicad_outline_bounds_match_board_size() {
    let outline = gerber::extract(EDGE_CUTS);
    let b = outline.bounds;
    assert!(b.min_x.abs() < EPSILON && b.min_y.abs() < EPSILON);
    assert!((b.max_x - 50.0).abs() < EPSILON);
    assert!((b.max_y - 30.0).abs() < EPSILON);
}

/// Inch outline is normalized to millimeters.
#[test]
fn inch_outline_is_converted_to_millimeters() {
    let outline = gerber::extract(INCH_EDGE_CUTS);
    assert_eq!(outline.units, Units::Inch);
    assert_eq!(outline.entities.len(), 4);
    assert!((outline.bounds.max_x - 50.8).abs() < EPSILON);
    assert!((outline.bounds.max_y - 25.4).abs() < EPSILON);
}

/// Default filter keeps only the 3.0 and 3.2 mm holes.
#[test]
fn default_filter_keeps_mounting_holes_only() {
    let pth = excellon::extract(PTH, HoleFilter::default());
    let npth = excellon::extract(NPTH, HoleFilter::default());
    assert_eq!(pth.holes.len(), 2);
    assert_eq!(pth.filtered_count, 5);
    assert_eq!(npth.holes.len(), 2);
    assert_eq!(npth.filtered_count, 1);
    assert_eq!(pth.units, ExcellonUnits::Metric);
    assert_eq!(pth.tools.len(), 3);
}

/// A permissive filter returns every drilled hole.
#[test]
fn permissive_filter_keeps_every_hole() {
    let pth = excellon::extract(PTH, HoleFilter::any());
    assert_eq!(pth.holes.len(), 7);
    assert!(pth.warnings.is_empty(), "warnings: {:?}", pth.warnings);
}

/// Inch drill file is converted to millimeters.
#[test]
fn inch_drill_is_converted_to_millimeters() {
    let drill = excellon::extract(INCH_DRILL, HoleFilter::default());
    assert_eq!(drill.holes.len(), 1);
    let hole = drill.holes.first().copied();
    assert!(hole.is_some(), "hole missing");
    if let Some(hole) = hole {
        assert!((hole.x - 25.4).abs() < EPSILON);
        assert!((hole.y - 12.7).abs() < EPSILON);
        assert!((hole.diameter - 3.175).abs() < EPSILON);
    }
}

/// Full conversion → one LINE/ARC per outline entity and one CIRCLE per hole.
#[test]
#[allow(clippy::expect_used)]
fn full_board_conversion_document_structure() {
    let conversion =
        convert(EDGE_CUTS, &[PTH, NPTH], HoleFilter::default()).expect("conversion should succeed");
    let doc = &conversion.document;

    assert_eq!(doc.matches("\nLINE\n").count(), 4);
    assert_eq!(doc.matches("\nARC\n").count(), 4);
    assert_eq!(doc.matches("\nCIRCLE\n").count(), 4);
    assert!(doc.starts_with("0\nSECTION\n2\nHEADER\n9\n$INSUNITS\n70\n4\n"));
    assert!(doc.ends_with("0\nENDSEC\n0\nEOF\n"));
    assert!(doc.contains("8\nMOUNTING_HOLES\n10\n4.000000\n20\n4.000000\n30\n0.0\n40\n1.600000\n"));
    assert!(doc.contains("8\nMOUNTING_HOLES\n10\n46.000000\n20\n4.000000\n30\n0.0\n40\n1.500000\n"));
    assert_eq!(conversion.distinct_diameters(), vec![3.0, 3.2]);
}

/// Max bound narrows the hole set.
#[test]
#[allow(clippy::expect_used)]
fn max_bound_excludes_larger_holes() {
    let conversion = convert(EDGE_CUTS, &[PTH, NPTH], HoleFilter::new(2.0, Some(3.1)))
        .expect("conversion should succeed");
    let diameters = conversion.distinct_diameters();
    assert_eq!(diameters, vec![2.2, 3.0]);
    assert_eq!(conversion.holes.len(), 3);
}

/// Converting the same inputs twice yields identical bytes.
#[test]
#[allow(clippy::expect_used)]
fn conversion_is_idempotent() {
    let first = convert(EDGE_CUTS, &[PTH, NPTH], HoleFilter::default()).expect("first");
    let second = convert(EDGE_CUTS, &[PTH, NPTH], HoleFilter::default()).expect("second");
    assert_eq!(first.document, second.document);
}
