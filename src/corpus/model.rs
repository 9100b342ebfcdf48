//! Protobuf messages of the corpus file.
//!
//! The messages are declared with `prost` derives directly, so the wire
//! format lives in Rust and no `.proto` compilation step is needed. Field
//! tags and enum numbering are part of the file format and must not change.

use serde::{Deserialize, Serialize};

/// A validated page layout: one record per physical staff.
#[derive(Clone, PartialEq, Serialize, prost::Message)]
pub struct Layout {
    #[prost(message, repeated, tag = "1")]
    pub staff: Vec<Staff>,
}

/// One physical staff and the glyphs placed on it.
#[derive(Clone, PartialEq, Serialize, prost::Message)]
pub struct Staff {
    /// Leftmost extent of the staff lines.
    #[prost(double, tag = "1")]
    pub x0: f64,
    /// Rightmost extent of the staff lines.
    #[prost(double, tag = "2")]
    pub x1: f64,
    /// Page y of the top line.
    #[prost(double, tag = "3")]
    pub y: f64,
    /// Distance between adjacent lines; zero for single-line staves.
    #[prost(double, tag = "4")]
    pub dy: f64,
    #[prost(int32, tag = "5")]
    pub nlines: i32,
    #[prost(message, repeated, tag = "6")]
    pub piece: Vec<Piece>,
}

/// One glyph observation.
#[derive(Clone, PartialEq, Serialize, prost::Message)]
pub struct Piece {
    #[prost(double, tag = "1")]
    pub x: f64,
    #[prost(double, tag = "2")]
    pub y: f64,
    /// Staff step position; 0 is the top line, negative is above the staff.
    #[prost(sint32, tag = "3")]
    pub line: i32,
    #[prost(enumeration = "Ref1", tag = "4")]
    pub ref1: i32,
    #[prost(enumeration = "Ref2", tag = "5")]
    pub ref2: i32,
    #[prost(string, tag = "6")]
    pub name: String,
    /// Why the piece was rejected; empty when unflagged.
    #[prost(string, tag = "7")]
    pub piece_error: String,
    #[prost(int32, tag = "8")]
    pub tick: i32,
}

impl Piece {
    /// Returns true if the piece is labelled or already flagged, which
    /// exempts it from geometric validation.
    pub fn is_finalized(&self) -> bool {
        !self.name.is_empty() || !self.piece_error.is_empty()
    }

    /// Returns true if the piece carries an error.
    pub fn is_flagged(&self) -> bool {
        !self.piece_error.is_empty()
    }
}

/// Primary coarse category of a piece.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    prost::Enumeration,
)]
#[repr(i32)]
pub enum Ref1 {
    None = 0,
    StemUp4 = 1,
    StemUp8 = 2,
    StemUp16 = 3,
    StemUp32 = 4,
    StemUp64 = 5,
    StemDown4 = 6,
    StemDown8 = 7,
    StemDown16 = 8,
    StemDown32 = 9,
    StemDown64 = 10,
    RestWhole = 11,
    RestHalf = 12,
    RestQuarter = 13,
    Rest8 = 14,
    Rest16 = 15,
    Rest32 = 16,
    Rest64 = 17,
    SlurStartAbove = 18,
    SlurStartBelow = 19,
    SlurEndAbove = 20,
    SlurEndBelow = 21,
    Clef = 22,
    KeySignature = 23,
    TimeSignature = 24,
    Barline = 25,
}

impl Ref1 {
    /// Stem/duration classes.
    pub fn is_stem(self) -> bool {
        (Ref1::StemUp4..=Ref1::StemDown64).contains(&self)
    }

    /// Rest duration classes.
    pub fn is_rest(self) -> bool {
        (Ref1::RestWhole..=Ref1::Rest64).contains(&self)
    }

    /// Slur endpoints, which may legitimately sit close together or far apart.
    pub fn is_slur(self) -> bool {
        matches!(
            self,
            Ref1::SlurStartAbove | Ref1::SlurStartBelow | Ref1::SlurEndAbove | Ref1::SlurEndBelow
        )
    }

    /// Categories the upstream detector tends to emit twice.
    pub fn is_duplicate_prone(self) -> bool {
        self.is_stem() || self.is_rest()
    }
}

/// Secondary coarse category of a piece, tracked per staff step.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    prost::Enumeration,
)]
#[repr(i32)]
pub enum Ref2 {
    None = 0,
    NoteheadBlack = 1,
    NoteheadHalf = 2,
    NoteheadWhole = 3,
    Sharp = 4,
    Flat = 5,
    Natural = 6,
    DoubleSharp = 7,
    DoubleFlat = 8,
    AugmentationDot = 9,
    Articulation = 10,
}
