//! Staff geometry accumulation across fragments.
//!
//! A staff is rendered as one staff-line fragment per measure. The
//! accumulator rebuilds the single logical staff those fragments describe.
//! All fragments of one staff must agree on the top line's y and the line
//! count; any disagreement means the layout is contradictory and aborts the
//! export.

use std::collections::btree_map::Entry;
use std::collections::BTreeMap;

use crate::corpus::Staff;
use crate::error::CorpusError;
use crate::scene::{ElementId, Point, StaffKey, StaffLinesLayout};

#[derive(Clone, Debug, PartialEq)]
struct StaffBuilder {
    x0: f64,
    x1: f64,
    /// Page y of the top line, already magnified.
    y: f64,
    /// Unmagnified line distance; 0 for single-line staves.
    dy: f64,
    nlines: i32,
}

/// Builds one [`Staff`] per [`StaffKey`] from staff-line fragments.
#[derive(Clone, Debug)]
pub struct StaffAccumulator {
    mag: f64,
    staves: BTreeMap<StaffKey, StaffBuilder>,
}

impl StaffAccumulator {
    /// Creates an empty accumulator for the given magnification.
    pub fn new(mag: f64) -> Self {
        Self {
            mag,
            staves: BTreeMap::new(),
        }
    }

    /// Number of distinct staves seen so far.
    pub fn len(&self) -> usize {
        self.staves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.staves.is_empty()
    }

    /// Adds one fragment of the staff `key`, laid out as `layout` with its
    /// origin at page position `page_pos`.
    ///
    /// Layouts built by [`StaffLines::layout`](crate::scene::StaffLines::layout)
    /// are always horizontal; the slant check guards layouts assembled by
    /// the host directly.
    ///
    /// # Errors
    /// Fails if the fragment has no lines, too many lines, a slanted top
    /// line or non-positive line spacing, or if it disagrees with earlier
    /// fragments of the same staff on top line y or line count.
    pub fn add_fragment(
        &mut self,
        key: StaffKey,
        element: ElementId,
        layout: &StaffLinesLayout,
        page_pos: Point,
    ) -> Result<(), CorpusError> {
        let lines = &layout.lines;
        let line0 = lines.first().ok_or(CorpusError::NoStaffLines {
            element: element.as_u64(),
        })?;
        let nlines = line_count(element, lines.len())?;
        if !line0.is_horizontal() {
            return Err(CorpusError::SlantedStaffLine {
                element: element.as_u64(),
                y1: line0.y1(),
                y2: line0.y2(),
            });
        }

        let y = (line0.y1() + page_pos.y) * self.mag;
        let left = line0.x1() + page_pos.x;
        let right = line0.x2() + page_pos.x;
        let (left, right) = (left.min(right), left.max(right));

        match self.staves.entry(key) {
            Entry::Vacant(slot) => {
                let dy = match lines.get(1) {
                    Some(line1) => {
                        let dy = line1.y1() - line0.y1();
                        if !(dy > 0.0) {
                            return Err(CorpusError::InvalidLineSpacing { key, dy });
                        }
                        dy
                    }
                    None => 0.0,
                };
                slot.insert(StaffBuilder {
                    x0: left,
                    x1: right,
                    y,
                    dy,
                    nlines,
                });
            }
            Entry::Occupied(mut slot) => {
                let staff = slot.get_mut();
                if staff.y != y {
                    return Err(CorpusError::InconsistentStaffGeometry {
                        key,
                        expected: staff.y,
                        found: y,
                    });
                }
                if staff.nlines != nlines {
                    return Err(CorpusError::LineCountMismatch {
                        key,
                        expected: staff.nlines,
                        found: nlines,
                    });
                }
                staff.x0 = staff.x0.min(left);
                staff.x1 = staff.x1.max(right);
            }
        }
        Ok(())
    }

    /// Finishes accumulation, scaling `x0`, `x1` and `dy` by the
    /// magnification. `y` is already magnified.
    pub fn finish(self) -> BTreeMap<StaffKey, Staff> {
        let mag = self.mag;
        self.staves
            .into_iter()
            .map(|(key, b)| {
                let staff = Staff {
                    x0: b.x0 * mag,
                    x1: b.x1 * mag,
                    y: b.y,
                    dy: b.dy * mag,
                    nlines: b.nlines,
                    piece: Vec::new(),
                };
                (key, staff)
            })
            .collect()
    }
}

/// Converts a fragment's line count to the corpus field type.
fn line_count(element: ElementId, lines: usize) -> Result<i32, CorpusError> {
    i32::try_from(lines).map_err(|_| CorpusError::TooManyStaffLines {
        element: element.as_u64(),
        lines,
    })
}
