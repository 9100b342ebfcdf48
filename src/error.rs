use std::path::PathBuf;
use thiserror::Error;

use crate::scene::StaffKey;
use crate::validation::ValidationReport;

/// The main error type for omrcorpus operations.
///
/// Variants fall into three groups: I/O and format failures, fatal layout
/// invariants (the upstream layout produced contradictory data and the export
/// is aborted), and CLI policy failures.
#[derive(Debug, Error)]
pub enum CorpusError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse scene JSON from {path}: {source}")]
    SceneJsonParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to write scene JSON to {path}: {source}")]
    SceneJsonWrite {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to serialize report as JSON: {source}")]
    ReportJson {
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to decode corpus from {path}: {source}")]
    CorpusDecode {
        path: PathBuf,
        #[source]
        source: prost::DecodeError,
    },

    #[error("Inconsistent Staff Geometry for {key}: top line at y={expected}, fragment at y={found}")]
    InconsistentStaffGeometry {
        key: StaffKey,
        expected: f64,
        found: f64,
    },

    #[error("Inconsistent Staff Geometry for {key}: {expected} line(s) recorded, fragment has {found}")]
    LineCountMismatch {
        key: StaffKey,
        expected: i32,
        found: i32,
    },

    #[error("Staff lines element {element} has {lines} lines, more than a corpus staff can record")]
    TooManyStaffLines { element: u64, lines: usize },

    #[error("Magnification must be a positive finite number, got {mag}")]
    InvalidMagnification { mag: f64 },

    #[error("Staff lines element {element} has no lines")]
    NoStaffLines { element: u64 },

    #[error("Staff lines element {element} has a slanted top line ({y1} != {y2})")]
    SlantedStaffLine { element: u64, y1: f64, y2: f64 },

    #[error("Staff lines for {key} have non-positive line spacing {dy}")]
    InvalidLineSpacing { key: StaffKey, dy: f64 },

    #[error("Staff lines element {element} does not belong to a system staff")]
    StaffLinesOutsideSystem { element: u64 },

    #[error("Piece tracking went backwards on staff {staff}: previous x={previous}, current x={current}")]
    NonMonotonicX {
        staff: usize,
        previous: f64,
        current: f64,
    },

    #[error("Export flagged {flagged} piece(s) and removed {removed} duplicate(s)")]
    ExportFlagged {
        flagged: usize,
        removed: usize,
        report: ValidationReport,
    },
}
