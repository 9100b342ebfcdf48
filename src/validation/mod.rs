//! Layout canonicalization and piece validation.
//!
//! Before a layout is written it is put into canonical order (staves top to
//! bottom, pieces left to right) and every unlabelled piece is checked:
//! - the piece must lie inside the staff's OCR window (step and y),
//! - a duplicate-prone glyph too close to the previous one of its category
//!   is a spurious double detection and is removed,
//! - glyphs of one category closer than a plausible glyph spacing are
//!   flagged but kept.
//!
//! Validation never mutates while scanning: each staff's pieces are read
//! once in sorted order and a new, filtered sequence is built.

mod report;

pub use report::{IssueCode, IssueContext, Severity, ValidationIssue, ValidationReport};

use std::cmp::Ordering;
use std::collections::HashMap;

use crate::corpus::{Layout, Piece, Ref1, Ref2, Staff};
use crate::error::CorpusError;
use crate::scene::Point;

pub const LINE_OUT_OF_RANGE: &str = "Line outside range";
pub const Y_OUT_OF_RANGE: &str = "y out of range";
pub const X_DISTANCE_TOO_LOW: &str = "x distance too low";
pub const NON_FINITE_POSITION: &str = "Non-finite position";
pub const DUPLICATE_NEARBY: &str = "Duplicate glyph removed nearby";

/// The vertical window an OCR model sees around one staff, in steps.
#[derive(Clone, Debug, PartialEq)]
pub struct OcrWindow {
    /// Window height in steps.
    pub ocr_height: i32,
    /// Row of the top staff line within the window.
    pub top_line_index: i32,
}

impl Default for OcrWindow {
    fn default() -> Self {
        Self {
            ocr_height: 33,
            top_line_index: 12,
        }
    }
}

impl OcrWindow {
    /// Smallest valid step position.
    pub fn min_line(&self) -> i32 {
        -self.top_line_index
    }

    /// Largest valid step position.
    pub fn max_line(&self) -> i32 {
        self.ocr_height - 1 - self.top_line_index
    }

    /// Valid page y band `(min_y, max_y)` for pieces on `staff`.
    pub fn y_band(&self, staff: &Staff) -> (f64, f64) {
        let min_y = staff.y - staff.dy * f64::from(self.top_line_index) * 0.5;
        let max_y = min_y + staff.dy * f64::from(self.ocr_height - 1) * 0.5;
        (min_y, max_y)
    }
}

/// Options for piece validation.
#[derive(Clone, Debug)]
pub struct ValidateOptions {
    pub window: OcrWindow,
    /// Gap, in units of `dy`, under which a duplicate-prone piece is removed.
    pub duplicate_ratio: f64,
    /// Gap, in units of `dy`, under which a piece is flagged as too close.
    pub min_spacing_ratio: f64,
}

impl Default for ValidateOptions {
    fn default() -> Self {
        Self {
            window: OcrWindow::default(),
            duplicate_ratio: 0.1,
            min_spacing_ratio: 0.9,
        }
    }
}

/// Orders pieces by `(x, line, y)`. Remaining fields break exact ties so the
/// result does not depend on the order pieces were collected in.
pub fn piece_order(a: &Piece, b: &Piece) -> Ordering {
    a.x.total_cmp(&b.x)
        .then(a.line.cmp(&b.line))
        .then(a.y.total_cmp(&b.y))
        .then(a.ref1.cmp(&b.ref1))
        .then(a.ref2.cmp(&b.ref2))
        .then(a.tick.cmp(&b.tick))
        .then_with(|| a.name.cmp(&b.name))
        .then_with(|| a.piece_error.cmp(&b.piece_error))
}

/// Orders staves top to bottom.
pub fn staff_order(a: &Staff, b: &Staff) -> Ordering {
    a.y.total_cmp(&b.y)
        .then(a.x0.total_cmp(&b.x0))
        .then(a.x1.total_cmp(&b.x1))
}

/// Sorts staves by `y` and each staff's pieces by [`piece_order`].
pub fn sort_layout(layout: &mut Layout) {
    layout.staff.sort_by(staff_order);
    for staff in &mut layout.staff {
        staff.piece.sort_by(piece_order);
    }
}

/// Sorts the layout and validates every staff.
///
/// # Errors
/// Returns [`CorpusError::NonMonotonicX`] if category tracking ever sees x
/// decrease, which cannot happen on a sorted staff.
pub fn validate_layout(
    layout: &mut Layout,
    opts: &ValidateOptions,
) -> Result<ValidationReport, CorpusError> {
    let mut report = ValidationReport::new();
    sort_layout(layout);
    for (idx, staff) in layout.staff.iter_mut().enumerate() {
        let pieces = std::mem::take(&mut staff.piece);
        staff.piece = validate_pieces(idx, staff, &pieces, opts, &mut report)?;
    }
    Ok(report)
}

/// Last tracked piece of one category.
#[derive(Clone, Copy)]
struct Tracked {
    x: f64,
    /// Position of the piece in the output sequence.
    index: usize,
}

/// Validates `pieces` of `staff` (which must already be sorted) and returns
/// the kept pieces, annotated.
///
/// `staff_idx` is only used for report context.
pub fn validate_pieces(
    staff_idx: usize,
    staff: &Staff,
    pieces: &[Piece],
    opts: &ValidateOptions,
    report: &mut ValidationReport,
) -> Result<Vec<Piece>, CorpusError> {
    let (min_line, max_line) = (opts.window.min_line(), opts.window.max_line());
    let (min_y, max_y) = opts.window.y_band(staff);
    let duplicate_gap = opts.duplicate_ratio * staff.dy;
    let min_gap = opts.min_spacing_ratio * staff.dy;

    let mut kept: Vec<Piece> = Vec::with_capacity(pieces.len());
    let mut by_ref1: HashMap<Ref1, Tracked> = HashMap::new();
    let mut by_ref2: HashMap<(Ref2, i32), f64> = HashMap::new();

    for original in pieces {
        let mut piece = original.clone();
        if piece.is_finalized() {
            kept.push(piece);
            continue;
        }

        if !Point::new(piece.x, piece.y).is_finite() {
            flag(&mut piece, staff_idx, IssueCode::NonFinitePosition, NON_FINITE_POSITION, report);
            kept.push(piece);
            continue;
        }
        if piece.line < min_line || piece.line > max_line {
            flag(&mut piece, staff_idx, IssueCode::LineOutOfRange, LINE_OUT_OF_RANGE, report);
            kept.push(piece);
            continue;
        }
        if piece.y < min_y || piece.y > max_y {
            flag(&mut piece, staff_idx, IssueCode::YOutOfRange, Y_OUT_OF_RANGE, report);
            kept.push(piece);
            continue;
        }

        let ref1 = piece.ref1();
        if ref1.is_slur() {
            kept.push(piece);
            continue;
        }

        if ref1 != Ref1::None {
            if let Some(prev) = by_ref1.get(&ref1).copied() {
                ensure_monotonic(staff_idx, prev.x, piece.x)?;
                let gap = piece.x - prev.x;
                if ref1.is_duplicate_prone() && gap < duplicate_gap {
                    tracing::debug!(staff = staff_idx, x = piece.x, ?ref1, "removing duplicate piece");
                    report.add(ValidationIssue::warning(
                        IssueCode::DuplicateRemoved,
                        format!("{:?} {:.3} after previous one (limit {:.3})", ref1, gap, duplicate_gap),
                        piece_context(staff_idx, &piece),
                    ));
                    if let Some(survivor) = kept.get_mut(prev.index) {
                        flag(survivor, staff_idx, IssueCode::DuplicateNearby, DUPLICATE_NEARBY, report);
                    }
                    continue;
                }
                if gap < min_gap {
                    flag(&mut piece, staff_idx, IssueCode::XSpacingTooLow, X_DISTANCE_TOO_LOW, report);
                }
            }
            by_ref1.insert(
                ref1,
                Tracked {
                    x: piece.x,
                    index: kept.len(),
                },
            );
        }

        let ref2 = piece.ref2();
        if ref2 != Ref2::None {
            let key = (ref2, piece.line);
            if let Some(prev_x) = by_ref2.get(&key).copied() {
                ensure_monotonic(staff_idx, prev_x, piece.x)?;
                if piece.x - prev_x < min_gap {
                    flag(&mut piece, staff_idx, IssueCode::XSpacingTooLow, X_DISTANCE_TOO_LOW, report);
                }
            }
            by_ref2.insert(key, piece.x);
        }

        kept.push(piece);
    }

    Ok(kept)
}

fn ensure_monotonic(staff_idx: usize, previous: f64, current: f64) -> Result<(), CorpusError> {
    if previous > current {
        return Err(CorpusError::NonMonotonicX {
            staff: staff_idx,
            previous,
            current,
        });
    }
    Ok(())
}

/// Sets `piece_error` unless the piece is already flagged.
fn flag(
    piece: &mut Piece,
    staff_idx: usize,
    code: IssueCode,
    message: &str,
    report: &mut ValidationReport,
) {
    if piece.is_flagged() {
        return;
    }
    piece.piece_error = message.to_string();
    report.add(ValidationIssue::warning(
        code,
        message,
        piece_context(staff_idx, piece),
    ));
}

fn piece_context(staff_idx: usize, piece: &Piece) -> IssueContext {
    IssueContext::Piece {
        staff: staff_idx,
        x: piece.x,
        tick: piece.tick,
    }
}
