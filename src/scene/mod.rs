//! The laid-out score handed over by the layout engine.
//!
//! The layout engine itself is not part of this crate. It hands over a
//! [`Scene`]: every visible element with its page position, staff index,
//! tick and structural parent, plus the staff line fragments that carry the
//! staff geometry.
//!
//! # Example
//!
//! ```
//! use omrcorpus::corpus::{Ref1, Ref2};
//! use omrcorpus::scene::{Element, GlyphMark, Scene, StaffLines, StaffStyle};
//!
//! let scene = Scene::new(vec![
//!     Element::system(1u64, 1),
//!     Element::staff_lines(2u64, StaffLines::new(StaffStyle::with_lines(5), 100.0, 1.0))
//!         .with_parent(1u64)
//!         .on_staff(0)
//!         .at(0.0, 50.0),
//!     Element::glyph(
//!         3u64,
//!         "Rest",
//!         vec![GlyphMark::new(10.0, 52.0, 4, Ref1::RestQuarter, Ref2::None)],
//!     )
//!     .with_parent(1u64)
//!     .on_staff(0),
//! ]);
//! assert_eq!(scene.elements.len(), 3);
//! ```

mod geometry;
mod ids;
pub mod io_json;
mod model;
mod staff_lines;

pub use geometry::{LineSegment, Point, Rect};
pub use ids::{ElementId, StaffKey};
pub use model::{
    Element, ElementKind, ExportPieces, GlyphMark, Scene, SceneIndex, Structure,
};
pub use staff_lines::{
    Color, StaffLines, StaffLinesLayout, StaffStyle, DEFAULT_LINES, DEFAULT_LINE_WIDTH_SP,
};
