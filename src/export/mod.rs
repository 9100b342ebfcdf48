//! Corpus export: from a laid-out scene to a validated layout on disk.
//!
//! The export runs in one pass per stage:
//! 1. staff-line fragments are accumulated into one staff per
//!    `(system, staff index)`,
//! 2. every other visible element appends its pieces to its staff,
//! 3. the layout is sorted and validated,
//! 4. the layout is written to `<name>.pb`.
//!
//! Contradictory layout data aborts the export with a [`CorpusError`];
//! everything else is recorded in the returned report.

mod accumulate;
mod collect;
mod locate;

pub use accumulate::StaffAccumulator;
pub use collect::{accumulate_staves, collect_pieces, DEFAULT_STAFFLESS};
pub use locate::{enclosing_system, locate_staff};

use std::path::{Path, PathBuf};

use crate::corpus::{io_pb, Layout};
use crate::error::CorpusError;
use crate::scene::Scene;
use crate::validation::{self, IssueCode, ValidateOptions, ValidationReport};

/// Options for one export.
#[derive(Clone, Debug)]
pub struct ExportOptions {
    /// Magnification applied to all page coordinates.
    pub magnification: f64,
    /// Element names that may be staff-less without being reported.
    pub staffless: Vec<String>,
    pub validate: ValidateOptions,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            magnification: 1.0,
            staffless: DEFAULT_STAFFLESS.iter().map(|s| s.to_string()).collect(),
            validate: ValidateOptions::default(),
        }
    }
}

/// The validated layout and everything reported while building it.
#[derive(Clone, Debug)]
pub struct ExportOutcome {
    pub layout: Layout,
    pub report: ValidationReport,
}

impl ExportOutcome {
    pub fn staff_count(&self) -> usize {
        self.layout.staff.len()
    }

    pub fn piece_count(&self) -> usize {
        self.layout.staff.iter().map(|s| s.piece.len()).sum()
    }

    /// Kept pieces carrying a `piece_error`.
    pub fn flagged_count(&self) -> usize {
        self.layout
            .staff
            .iter()
            .flat_map(|s| &s.piece)
            .filter(|p| p.is_flagged())
            .count()
    }

    /// Pieces removed as duplicates.
    pub fn removed_count(&self) -> usize {
        self.report.count(IssueCode::DuplicateRemoved)
    }
}

/// Builds the validated layout for `scene` without touching the filesystem.
///
/// # Errors
/// Returns an error if the magnification is not a positive finite number or
/// the scene's staff geometry is contradictory.
pub fn build_layout(scene: &Scene, opts: &ExportOptions) -> Result<ExportOutcome, CorpusError> {
    let mag = opts.magnification;
    if !(mag.is_finite() && mag > 0.0) {
        return Err(CorpusError::InvalidMagnification { mag });
    }
    let index = scene.index();

    let mut staves = accumulate_staves(scene, &index, mag)?.finish();

    let mut report = ValidationReport::new();
    collect_pieces(scene, &index, &mut staves, mag, &opts.staffless, &mut report);

    let mut layout = Layout {
        staff: staves.into_values().collect(),
    };
    report.extend(validation::validate_layout(&mut layout, &opts.validate)?);

    Ok(ExportOutcome { layout, report })
}

/// Builds the layout for `scene` and writes it to `<name>.pb`.
///
/// Nothing is written if building fails.
pub fn save_pieces(
    scene: &Scene,
    name: &Path,
    opts: &ExportOptions,
) -> Result<(PathBuf, ExportOutcome), CorpusError> {
    let outcome = build_layout(scene, opts)?;
    let path = io_pb::write_layout(name, &outcome.layout)?;
    Ok((path, outcome))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::corpus::{Ref1, Ref2};
    use crate::scene::{Element, GlyphMark, StaffLines, StaffStyle};

    fn scene() -> Scene {
        Scene::new(vec![
            Element::system(1u64, 1),
            Element::staff_lines(2u64, StaffLines::new(StaffStyle::with_lines(5), 100.0, 2.0))
                .with_parent(1u64)
                .on_staff(0)
                .at(0.0, 40.0),
            Element::glyph(
                3u64,
                "Rest",
                vec![GlyphMark::new(30.0, 44.0, 4, Ref1::Rest8, Ref2::None)],
            )
            .with_parent(1u64)
            .on_staff(0),
            Element::glyph(
                4u64,
                "Rest",
                vec![GlyphMark::new(10.0, 44.0, 4, Ref1::Rest8, Ref2::None)],
            )
            .with_parent(1u64)
            .on_staff(0),
        ])
    }

    #[test]
    fn test_build_layout_sorts_pieces() {
        let outcome = build_layout(&scene(), &ExportOptions::default()).expect("build");
        assert_eq!(outcome.staff_count(), 1);
        assert_eq!(outcome.piece_count(), 2);
        let xs: Vec<f64> = outcome.layout.staff[0].piece.iter().map(|p| p.x).collect();
        assert_eq!(xs, vec![10.0, 30.0]);
        assert_eq!(outcome.flagged_count(), 0);
        assert!(outcome.report.is_clean());
    }

    #[test]
    fn test_magnification_applies_to_staves_and_pieces() {
        let opts = ExportOptions {
            magnification: 0.5,
            ..Default::default()
        };
        let outcome = build_layout(&scene(), &opts).expect("build");
        let staff = &outcome.layout.staff[0];
        assert_eq!(staff.y, 20.0);
        assert_eq!(staff.dy, 1.0);
        assert_eq!(staff.x1, 50.0);
        assert_eq!(staff.piece[0].x, 5.0);
        assert_eq!(staff.piece[0].y, 22.0);
    }

    #[test]
    fn test_invalid_magnification_is_fatal() {
        for mag in [-1.0, 0.0, f64::NAN, f64::INFINITY] {
            let opts = ExportOptions {
                magnification: mag,
                ..Default::default()
            };
            let err = build_layout(&scene(), &opts).unwrap_err();
            assert!(
                matches!(err, CorpusError::InvalidMagnification { .. }),
                "mag {} gave {:?}",
                mag,
                err
            );
        }
    }

    #[test]
    fn test_invalid_magnification_writes_nothing() {
        let dir = tempfile::tempdir().expect("tempdir");
        let name = dir.path().join("page");
        let opts = ExportOptions {
            magnification: -1.0,
            ..Default::default()
        };

        assert!(save_pieces(&scene(), &name, &opts).is_err());
        assert!(!dir.path().join("page.pb").exists());
    }

    #[test]
    fn test_save_pieces_writes_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let name = dir.path().join("page");
        let (path, outcome) =
            save_pieces(&scene(), &name, &ExportOptions::default()).expect("save");

        assert_eq!(path, dir.path().join("page.pb"));
        let restored = io_pb::read_layout(&path).expect("read back");
        assert_eq!(restored, outcome.layout);
    }

    #[test]
    fn test_failed_export_writes_nothing() {
        let mut scene = scene();
        scene.elements.push(
            Element::staff_lines(5u64, StaffLines::new(StaffStyle::with_lines(5), 100.0, 2.0))
                .with_parent(1u64)
                .on_staff(0)
                .at(100.0, 41.0),
        );
        let dir = tempfile::tempdir().expect("tempdir");
        let name = dir.path().join("page");

        let err = save_pieces(&scene, &name, &ExportOptions::default()).unwrap_err();
        assert!(matches!(err, CorpusError::InconsistentStaffGeometry { .. }));
        assert!(!dir.path().join("page.pb").exists());
    }
}
