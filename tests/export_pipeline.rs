use omrcorpus::corpus::{io_pb, Ref1, Ref2};
use omrcorpus::export::{build_layout, save_pieces, ExportOptions};
use omrcorpus::scene::Element;
use omrcorpus::validation::{IssueCode, DUPLICATE_NEARBY, LINE_OUT_OF_RANGE, X_DISTANCE_TOO_LOW};
use omrcorpus::CorpusError;

mod common;

use common::*;

fn one_staff(extra: Vec<Element>) -> omrcorpus::scene::Scene {
    let mut elements = skeleton();
    elements.push(fragment(10, 0, 0.0, STAFF0_Y, 200.0));
    elements.extend(extra);
    omrcorpus::scene::Scene::new(elements)
}

#[test]
fn two_staff_scene_exports_cleanly() {
    let outcome = build_layout(&two_staff_scene(), &ExportOptions::default()).expect("build");

    assert_eq!(outcome.staff_count(), 2);
    assert_eq!(outcome.piece_count(), 5);
    assert!(outcome.report.is_clean(), "{}", outcome.report);

    let top = &outcome.layout.staff[0];
    assert_eq!(top.y, STAFF0_Y);
    assert_eq!(top.piece.len(), 3);
    assert_eq!(top.piece[0].tick, 20 * 120);
}

#[test]
fn fragments_merge_into_one_staff() {
    let outcome = build_layout(&two_staff_scene(), &ExportOptions::default()).expect("build");
    let staff = &outcome.layout.staff[0];

    assert_eq!(staff.x0, 0.0);
    assert_eq!(staff.x1, 250.0);
    assert_eq!(staff.y, STAFF0_Y);
    assert_eq!(staff.dy, SPATIUM);
    assert_eq!(staff.nlines, 5);
}

#[test]
fn geometry_is_consistent() {
    let outcome = build_layout(&two_staff_scene(), &ExportOptions::default()).expect("build");
    for staff in &outcome.layout.staff {
        assert!(staff.dy > 0.0);
        assert!(staff.nlines >= 1);
        assert!(staff.x0 <= staff.x1);
    }
}

#[test]
fn mismatched_fragment_y_aborts() {
    let mut scene = two_staff_scene();
    scene
        .elements
        .push(fragment(14, 0, 250.0, STAFF0_Y + 0.5, 50.0));

    let err = build_layout(&scene, &ExportOptions::default()).unwrap_err();
    assert!(matches!(err, CorpusError::InconsistentStaffGeometry { .. }));
}

#[test]
fn close_duplicate_is_removed_and_other_flagged() {
    let x = 60.0;
    let scene = one_staff(vec![
        mark(30, 0, STAFF0_Y, x, 4, Ref1::RestQuarter, Ref2::None),
        mark(31, 0, STAFF0_Y, x + 0.05 * SPATIUM, 4, Ref1::RestQuarter, Ref2::None),
    ]);
    let outcome = build_layout(&scene, &ExportOptions::default()).expect("build");

    let pieces = &outcome.layout.staff[0].piece;
    assert_eq!(pieces.len(), 1);
    assert_eq!(pieces[0].piece_error, DUPLICATE_NEARBY);
    assert_eq!(outcome.removed_count(), 1);
}

#[test]
fn close_spacing_is_flagged_and_kept() {
    let x = 60.0;
    let scene = one_staff(vec![
        mark(30, 0, STAFF0_Y, x, 4, Ref1::StemUp8, Ref2::None),
        mark(31, 0, STAFF0_Y, x + 0.5 * SPATIUM, 4, Ref1::StemUp8, Ref2::None),
    ]);
    let outcome = build_layout(&scene, &ExportOptions::default()).expect("build");

    let pieces = &outcome.layout.staff[0].piece;
    assert_eq!(pieces.len(), 2);
    let flagged: Vec<_> = pieces
        .iter()
        .filter(|p| p.piece_error == X_DISTANCE_TOO_LOW)
        .collect();
    assert_eq!(flagged.len(), 1);
    assert_eq!(outcome.removed_count(), 0);
}

#[test]
fn line_below_window_is_flagged_and_kept() {
    let scene = one_staff(vec![mark(30, 0, STAFF0_Y, 60.0, -13, Ref1::Rest8, Ref2::None)]);
    let outcome = build_layout(&scene, &ExportOptions::default()).expect("build");

    let pieces = &outcome.layout.staff[0].piece;
    assert_eq!(pieces.len(), 1);
    assert_eq!(pieces[0].piece_error, LINE_OUT_OF_RANGE);
    assert_eq!(outcome.report.count(IssueCode::LineOutOfRange), 1);
}

#[test]
fn unexpected_staffless_element_is_reported_not_fatal() {
    let scene = one_staff(vec![
        Element::decorative(40u64, "Lyrics").with_parent(PAGE),
        Element::decorative(41u64, "LayoutBreak").with_parent(PAGE),
    ]);
    let outcome = build_layout(&scene, &ExportOptions::default()).expect("build");

    assert_eq!(outcome.report.count(IssueCode::UnexpectedStafflessElement), 1);

    let opts = ExportOptions {
        staffless: vec!["Lyrics".into(), "LayoutBreak".into()],
        ..Default::default()
    };
    let outcome = build_layout(&scene, &opts).expect("build");
    assert!(outcome.report.is_clean());
}

#[test]
fn export_is_independent_of_visiting_order() {
    let scene = two_staff_scene();
    let mut reversed = scene.clone();
    reversed.elements.reverse();

    let opts = ExportOptions::default();
    let a = build_layout(&scene, &opts).expect("build");
    let b = build_layout(&reversed, &opts).expect("build reversed");

    assert_eq!(io_pb::to_bytes(&a.layout), io_pb::to_bytes(&b.layout));
}

#[test]
fn saving_twice_is_byte_identical() {
    let dir = tempfile::tempdir().expect("tempdir");
    let name = dir.path().join("page");
    let scene = two_staff_scene();
    let opts = ExportOptions::default();

    let (path, _) = save_pieces(&scene, &name, &opts).expect("first save");
    let first = std::fs::read(&path).expect("read first");
    let (path, _) = save_pieces(&scene, &name, &opts).expect("second save");
    let second = std::fs::read(&path).expect("read second");

    assert_eq!(first, second);
    assert!(!first.is_empty());
}
