//! Staff and piece collection over a scene.

use std::collections::{BTreeMap, HashSet};

use super::accumulate::StaffAccumulator;
use super::locate::locate_staff;
use crate::corpus::Staff;
use crate::error::CorpusError;
use crate::scene::{ElementId, ElementKind, ExportPieces, Scene, SceneIndex, StaffKey};
use crate::validation::{IssueCode, IssueContext, ValidationIssue, ValidationReport};

/// Element names that are legitimately not attached to any staff.
pub const DEFAULT_STAFFLESS: [&str; 5] = ["Text", "Image", "Page", "VBox", "LayoutBreak"];

/// First pass: accumulates every visible staff-line fragment.
///
/// # Errors
/// Fails on the first fragment outside a system staff or inconsistent with
/// its staff's earlier fragments.
pub fn accumulate_staves<'a>(
    scene: &'a Scene,
    index: &SceneIndex<'a>,
    mag: f64,
) -> Result<StaffAccumulator, CorpusError> {
    let mut acc = StaffAccumulator::new(mag);
    for el in &scene.elements {
        if !el.visible {
            continue;
        }
        let ElementKind::StaffLineGroup { staff_lines } = &el.kind else {
            continue;
        };
        let key = locate_staff(index, el).ok_or(CorpusError::StaffLinesOutsideSystem {
            element: el.id.as_u64(),
        })?;
        acc.add_fragment(key, el.id, &staff_lines.layout(), el.pos)?;
    }
    Ok(acc)
}

/// Second pass: appends the pieces of every visible element to its staff.
///
/// Elements are visited once per id. Elements without a staff are dropped;
/// those whose name is not in `staffless` are reported.
pub fn collect_pieces<'a>(
    scene: &'a Scene,
    index: &SceneIndex<'a>,
    staves: &mut BTreeMap<StaffKey, Staff>,
    mag: f64,
    staffless: &[String],
    report: &mut ValidationReport,
) {
    let mut seen: HashSet<ElementId> = HashSet::new();
    for el in &scene.elements {
        if !seen.insert(el.id) {
            continue;
        }
        if !el.visible {
            continue;
        }
        if el.is_structure() || matches!(el.kind, ElementKind::StaffLineGroup { .. }) {
            continue;
        }

        let Some(key) = locate_staff(index, el) else {
            if !staffless.iter().any(|name| *name == el.name) {
                tracing::warn!(element = %el.id, "Bad Element: {}", el.name);
                report.add(ValidationIssue::warning(
                    IssueCode::UnexpectedStafflessElement,
                    format!("Bad Element: {}", el.name),
                    element_context(el.id, &el.name),
                ));
            }
            continue;
        };

        let Some(staff) = staves.get_mut(&key) else {
            tracing::error!(element = %el.id, %key, "inconsistent staff {}", el.name);
            report.add(ValidationIssue::error(
                IssueCode::MissingStaffRecord,
                format!("{} resolves to {} which has no staff lines", el.name, key),
                element_context(el.id, &el.name),
            ));
            continue;
        };

        if matches!(el.kind, ElementKind::LedgerLine) {
            continue;
        }

        let start = staff.piece.len();
        el.export_pieces(mag, &mut staff.piece);
        for piece in &mut staff.piece[start..] {
            piece.tick = el.tick;
        }
    }
}

fn element_context(id: ElementId, name: &str) -> IssueContext {
    IssueContext::Element {
        id: id.as_u64(),
        name: name.to_string(),
    }
}
