//! The element collection produced by the layout engine.
//!
//! A [`Scene`] is a flat list of laid-out elements. Structural nodes (pages,
//! systems, measures) appear in the same list so that every element's parent
//! chain can be walked by id. What an element contributes to the corpus is
//! decided by its closed [`ElementKind`].

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::geometry::Point;
use super::ids::ElementId;
use super::staff_lines::StaffLines;
use crate::corpus::{Piece, Ref1, Ref2};

/// A complete laid-out page (or score) handed over for export.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Scene {
    /// All elements, in the order the layout engine visited them.
    pub elements: Vec<Element>,
}

impl Scene {
    /// Creates a scene from a list of elements.
    pub fn new(elements: Vec<Element>) -> Self {
        Self { elements }
    }

    /// Builds an id lookup over the scene's elements.
    pub fn index(&self) -> SceneIndex<'_> {
        SceneIndex::new(self)
    }
}

/// Id lookup over a scene. When an id occurs more than once, the first
/// occurrence wins.
#[derive(Debug)]
pub struct SceneIndex<'a> {
    by_id: HashMap<ElementId, &'a Element>,
}

impl<'a> SceneIndex<'a> {
    fn new(scene: &'a Scene) -> Self {
        let mut by_id = HashMap::with_capacity(scene.elements.len());
        for el in &scene.elements {
            by_id.entry(el.id).or_insert(el);
        }
        Self { by_id }
    }

    /// Looks up an element by id.
    pub fn get(&self, id: ElementId) -> Option<&'a Element> {
        self.by_id.get(&id).copied()
    }

    /// Returns the parent of `el`, if it exists in the scene.
    pub fn parent(&self, el: &Element) -> Option<&'a Element> {
        el.parent.and_then(|id| self.get(id))
    }
}

/// One laid-out element.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Element {
    pub id: ElementId,

    /// Element type name as reported by the layout engine ("Note", "Text", ...).
    pub name: String,

    /// Structural parent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<ElementId>,

    #[serde(default = "default_visible")]
    pub visible: bool,

    /// Staff index within the enclosing system; negative when the element
    /// is not attached to a staff.
    #[serde(default = "default_staff_idx")]
    pub staff_idx: i32,

    /// Musical time position.
    #[serde(default)]
    pub tick: i32,

    /// Page position of the element's origin.
    #[serde(default)]
    pub pos: Point,

    pub kind: ElementKind,
}

fn default_visible() -> bool {
    true
}

fn default_staff_idx() -> i32 {
    -1
}

/// What an element is, as far as export is concerned.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ElementKind {
    /// Ancestry-only node; never exported.
    Structure { structure: Structure },
    /// A staff fragment: the staff lines of one measure.
    StaffLineGroup { staff_lines: StaffLines },
    /// A ledger line; an artifact of note position, never a piece.
    LedgerLine,
    /// A labelled glyph contributing one or more marks.
    Glyph { marks: Vec<GlyphMark> },
    /// Drawable but contributes nothing (text, frames, images, ...).
    Decorative,
}

/// Structural node types.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Structure {
    Page,
    /// A system with `staves` staves.
    System { staves: usize },
    Measure,
    Segment,
    Other,
}

/// A pre-labelled glyph observation in unscaled page coordinates.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GlyphMark {
    pub x: f64,
    pub y: f64,
    /// Staff step position (0 is the top line).
    pub line: i32,
    #[serde(default)]
    pub ref1: Ref1,
    #[serde(default)]
    pub ref2: Ref2,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,
}

impl GlyphMark {
    /// Creates a mark with the given codes and no label.
    pub fn new(x: f64, y: f64, line: i32, ref1: Ref1, ref2: Ref2) -> Self {
        Self {
            x,
            y,
            line,
            ref1,
            ref2,
            name: String::new(),
        }
    }

    /// Sets the label of the mark.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }
}

impl Element {
    fn with_kind(id: impl Into<ElementId>, name: impl Into<String>, kind: ElementKind) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            parent: None,
            visible: true,
            staff_idx: -1,
            tick: 0,
            pos: Point::default(),
            kind,
        }
    }

    /// Creates a page node.
    pub fn page(id: impl Into<ElementId>) -> Self {
        Self::with_kind(
            id,
            "Page",
            ElementKind::Structure {
                structure: Structure::Page,
            },
        )
    }

    /// Creates a system node with `staves` staves.
    pub fn system(id: impl Into<ElementId>, staves: usize) -> Self {
        Self::with_kind(
            id,
            "System",
            ElementKind::Structure {
                structure: Structure::System { staves },
            },
        )
    }

    /// Creates a measure node.
    pub fn measure(id: impl Into<ElementId>) -> Self {
        Self::with_kind(
            id,
            "Measure",
            ElementKind::Structure {
                structure: Structure::Measure,
            },
        )
    }

    /// Creates a staff fragment.
    pub fn staff_lines(id: impl Into<ElementId>, staff_lines: StaffLines) -> Self {
        Self::with_kind(id, "StaffLines", ElementKind::StaffLineGroup { staff_lines })
    }

    /// Creates a ledger line.
    pub fn ledger_line(id: impl Into<ElementId>) -> Self {
        Self::with_kind(id, "LedgerLine", ElementKind::LedgerLine)
    }

    /// Creates a glyph element.
    pub fn glyph(id: impl Into<ElementId>, name: impl Into<String>, marks: Vec<GlyphMark>) -> Self {
        Self::with_kind(id, name, ElementKind::Glyph { marks })
    }

    /// Creates a decorative element.
    pub fn decorative(id: impl Into<ElementId>, name: impl Into<String>) -> Self {
        Self::with_kind(id, name, ElementKind::Decorative)
    }

    /// Sets the structural parent.
    pub fn with_parent(mut self, parent: impl Into<ElementId>) -> Self {
        self.parent = Some(parent.into());
        self
    }

    /// Sets the staff index.
    pub fn on_staff(mut self, staff_idx: i32) -> Self {
        self.staff_idx = staff_idx;
        self
    }

    /// Sets the page position.
    pub fn at(mut self, x: f64, y: f64) -> Self {
        self.pos = Point::new(x, y);
        self
    }

    /// Sets the tick.
    pub fn with_tick(mut self, tick: i32) -> Self {
        self.tick = tick;
        self
    }

    /// Marks the element invisible.
    pub fn hidden(mut self) -> Self {
        self.visible = false;
        self
    }

    /// Returns the system's staff count if this is a system node.
    pub fn system_staves(&self) -> Option<usize> {
        match self.kind {
            ElementKind::Structure {
                structure: Structure::System { staves },
            } => Some(staves),
            _ => None,
        }
    }

    /// Returns true for ancestry-only nodes.
    pub fn is_structure(&self) -> bool {
        matches!(self.kind, ElementKind::Structure { .. })
    }
}

/// The export capability every drawable element provides: append its own
/// geometric representation to a staff's pieces.
pub trait ExportPieces {
    /// Appends zero or more pieces, scaling page coordinates by `mag`.
    fn export_pieces(&self, mag: f64, out: &mut Vec<Piece>);
}

impl ExportPieces for GlyphMark {
    fn export_pieces(&self, mag: f64, out: &mut Vec<Piece>) {
        let mut piece = Piece {
            x: self.x * mag,
            y: self.y * mag,
            line: self.line,
            name: self.name.clone(),
            ..Default::default()
        };
        piece.set_ref1(self.ref1);
        piece.set_ref2(self.ref2);
        out.push(piece);
    }
}

impl ExportPieces for Element {
    fn export_pieces(&self, mag: f64, out: &mut Vec<Piece>) {
        match &self.kind {
            ElementKind::Glyph { marks } => {
                for mark in marks {
                    mark.export_pieces(mag, out);
                }
            }
            ElementKind::Structure { .. }
            | ElementKind::StaffLineGroup { .. }
            | ElementKind::LedgerLine
            | ElementKind::Decorative => {}
        }
    }
}
