#![allow(dead_code)]

use omrcorpus::corpus::{Ref1, Ref2};
use omrcorpus::scene::{Element, GlyphMark, Scene, StaffLines, StaffStyle};

pub const PAGE: u64 = 1;
pub const SYSTEM: u64 = 2;
pub const SPATIUM: f64 = 2.0;
pub const STAFF0_Y: f64 = 40.0;
pub const STAFF1_Y: f64 = 80.0;

/// Staff step height in page units for the test spatium.
pub const STEP: f64 = SPATIUM * 0.5;

/// A page with one two-staff system and no fragments yet.
pub fn skeleton() -> Vec<Element> {
    vec![
        Element::page(PAGE),
        Element::system(SYSTEM, 2).with_parent(PAGE),
    ]
}

/// A five-line staff fragment `width` wide starting at `x`.
pub fn fragment(id: u64, staff_idx: i32, x: f64, y: f64, width: f64) -> Element {
    Element::staff_lines(
        id,
        StaffLines::new(StaffStyle::with_lines(5), width, SPATIUM),
    )
    .with_parent(SYSTEM)
    .on_staff(staff_idx)
    .at(x, y)
}

/// A single-mark glyph on staff `staff_idx` whose top line is at `staff_y`.
pub fn mark(
    id: u64,
    staff_idx: i32,
    staff_y: f64,
    x: f64,
    line: i32,
    ref1: Ref1,
    ref2: Ref2,
) -> Element {
    let y = staff_y + f64::from(line) * STEP;
    Element::glyph(id, "Chord", vec![GlyphMark::new(x, y, line, ref1, ref2)])
        .with_parent(SYSTEM)
        .on_staff(staff_idx)
        .with_tick(id as i32 * 120)
}

/// Two staves, each spanning two measure fragments, with a handful of
/// well-spaced glyphs.
pub fn two_staff_scene() -> Scene {
    let mut elements = skeleton();
    elements.extend([
        fragment(10, 0, 0.0, STAFF0_Y, 100.0),
        fragment(11, 0, 100.0, STAFF0_Y, 150.0),
        fragment(12, 1, 0.0, STAFF1_Y, 100.0),
        fragment(13, 1, 100.0, STAFF1_Y, 150.0),
        mark(20, 0, STAFF0_Y, 10.0, 4, Ref1::StemUp4, Ref2::NoteheadBlack),
        mark(21, 0, STAFF0_Y, 30.0, 6, Ref1::StemUp4, Ref2::NoteheadBlack),
        mark(22, 0, STAFF0_Y, 50.0, 4, Ref1::RestQuarter, Ref2::None),
        mark(23, 1, STAFF1_Y, 20.0, 2, Ref1::Rest8, Ref2::None),
        mark(24, 1, STAFF1_Y, 120.0, -2, Ref1::StemDown8, Ref2::Sharp),
        Element::ledger_line(25u64).with_parent(SYSTEM).on_staff(1),
        Element::decorative(26u64, "Text").with_parent(PAGE),
    ]);
    Scene::new(elements)
}
