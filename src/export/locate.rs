//! Element-to-staff association.

use std::collections::HashSet;

use crate::scene::{Element, ElementId, SceneIndex, StaffKey};

/// Finds the system enclosing `el` (or `el` itself if it is a system) and
/// returns its id and staff count.
///
/// A parent chain that loops back on itself is treated as having no system.
pub fn enclosing_system<'a>(index: &SceneIndex<'a>, el: &'a Element) -> Option<(ElementId, usize)> {
    let mut seen: HashSet<ElementId> = HashSet::new();
    let mut current = Some(el);
    while let Some(node) = current {
        if !seen.insert(node.id) {
            tracing::debug!(element = %el.id, "parent chain loops at {}", node.id);
            return None;
        }
        if let Some(staves) = node.system_staves() {
            return Some((node.id, staves));
        }
        current = index.parent(node);
    }
    None
}

/// Returns the staff `el` visually belongs to.
///
/// `None` is not an error: text frames, page decorations and the like are
/// legitimately staff-less.
pub fn locate_staff<'a>(index: &SceneIndex<'a>, el: &'a Element) -> Option<StaffKey> {
    let (system, staves) = enclosing_system(index, el)?;
    let staff_idx = usize::try_from(el.staff_idx).ok()?;
    (staff_idx < staves).then(|| StaffKey::new(system, staff_idx))
}
