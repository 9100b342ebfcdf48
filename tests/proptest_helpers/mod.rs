#![allow(dead_code)]

use omrcorpus::corpus::{Layout, Piece, Ref1, Ref2, Staff};
use proptest::prelude::*;
use proptest::test_runner::{Config as ProptestConfig, FileFailurePersistence};

pub const STAFF_Y: f64 = 40.0;
pub const STAFF_DY: f64 = 2.0;

pub fn proptest_config() -> ProptestConfig {
    let cases = std::env::var("PROPTEST_CASES")
        .ok()
        .and_then(|v| v.parse::<u32>().ok())
        .unwrap_or(64);

    let mut config = ProptestConfig::with_failure_persistence(FileFailurePersistence::WithSource(
        "proptest-regressions",
    ));
    config.cases = cases;
    config.max_shrink_iters = 1024;
    config
}

fn arb_ref1() -> impl Strategy<Value = Ref1> {
    prop::sample::select(vec![
        Ref1::None,
        Ref1::StemUp4,
        Ref1::StemDown8,
        Ref1::RestQuarter,
        Ref1::Rest8,
        Ref1::SlurStartAbove,
        Ref1::Clef,
        Ref1::Barline,
    ])
}

fn arb_ref2() -> impl Strategy<Value = Ref2> {
    prop::sample::select(vec![
        Ref2::None,
        Ref2::NoteheadBlack,
        Ref2::NoteheadHalf,
        Ref2::Sharp,
        Ref2::AugmentationDot,
    ])
}

/// A piece on a staff whose top line is at [`STAFF_Y`]. Positions sit on a
/// coarse grid so that ties, duplicates and close neighbours all occur.
pub fn arb_piece() -> impl Strategy<Value = Piece> {
    (
        0u32..400,
        -16i32..24,
        arb_ref1(),
        arb_ref2(),
        0i32..4,
        prop::bool::weighted(0.1),
    )
        .prop_map(|(x, line, ref1, ref2, tick, named)| {
            let mut piece = Piece {
                x: f64::from(x) * 0.1,
                y: STAFF_Y + f64::from(line) * STAFF_DY * 0.5,
                line,
                tick: tick * 240,
                ..Default::default()
            };
            piece.set_ref1(ref1);
            piece.set_ref2(ref2);
            if named {
                piece.name = "Fingering".to_string();
            }
            piece
        })
}

pub fn staff_with(pieces: Vec<Piece>, y: f64) -> Staff {
    Staff {
        x0: 0.0,
        x1: 40.0,
        y,
        dy: STAFF_DY,
        nlines: 5,
        piece: pieces,
    }
}

/// A two staff layout together with a shuffled copy of it.
pub fn arb_layout_and_shuffle() -> impl Strategy<Value = (Layout, Layout)> {
    (
        prop::collection::vec(arb_piece(), 0..40),
        prop::collection::vec(arb_piece(), 0..10),
    )
        .prop_flat_map(|(top, bottom)| {
            let lower: Vec<Piece> = bottom
                .into_iter()
                .map(|mut p| {
                    p.y += 40.0;
                    p
                })
                .collect();
            let layout = Layout {
                staff: vec![
                    staff_with(top.clone(), STAFF_Y),
                    staff_with(lower.clone(), STAFF_Y + 40.0),
                ],
            };
            let shuffled = (
                Just(top).prop_shuffle(),
                Just(lower).prop_shuffle(),
                any::<bool>(),
            )
                .prop_map(|(top, lower, swap)| {
                    let mut staff = vec![
                        staff_with(top, STAFF_Y),
                        staff_with(lower, STAFF_Y + 40.0),
                    ];
                    if swap {
                        staff.reverse();
                    }
                    Layout { staff }
                });
            (Just(layout), shuffled)
        })
}
