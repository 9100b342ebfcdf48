//! Staff line geometry for one rendered staff fragment.
//!
//! Anatomy of a staff:
//!
//! - *step*: the possible vertical positions of a note. The top staff line is
//!   step zero and steps grow downwards.
//! - *lines*: number of visible staff lines.
//! - *line distance*: distance between lines in spatium units. A standard five
//!   line staff has a line distance of 1.0, i.e. two steps.
//! - *spatium*: the global unit of measure, already scaled by staff size.
//! - *yoffset*: vertical offset (spatium units) aligning staves of different
//!   height.

use serde::{Deserialize, Serialize};

use super::geometry::{LineSegment, Rect};

/// Line count used when a fragment carries no staff style.
pub const DEFAULT_LINES: usize = 5;

/// Staff line thickness in spatium units used when none is given.
pub const DEFAULT_LINE_WIDTH_SP: f64 = 0.08;

/// An RGBA colour packed as `0xRRGGBBAA`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Color(pub u32);

impl Color {
    /// Opaque black, the layout engine's default colour.
    pub const DEFAULT: Color = Color(0x0000_00ff);
}

impl Default for Color {
    fn default() -> Self {
        Color::DEFAULT
    }
}

impl std::fmt::Debug for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{:08x}", self.0)
    }
}

/// The visual style of a staff at a given tick.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StaffStyle {
    /// Number of staff lines.
    pub lines: usize,
    /// Distance between adjacent lines, in spatium units.
    #[serde(default = "default_line_distance")]
    pub line_distance: f64,
    /// Vertical offset of the top line, in spatium units.
    #[serde(default)]
    pub yoffset: f64,
    /// Staff magnification (small staves, cue staves).
    #[serde(default = "default_mag")]
    pub mag: f64,
    #[serde(default)]
    pub color: Color,
}

fn default_line_distance() -> f64 {
    1.0
}

fn default_mag() -> f64 {
    1.0
}

fn default_line_width_sp() -> f64 {
    DEFAULT_LINE_WIDTH_SP
}

impl StaffStyle {
    /// A standard staff with `lines` lines one spatium apart.
    pub fn with_lines(lines: usize) -> Self {
        Self {
            lines,
            line_distance: 1.0,
            yoffset: 0.0,
            mag: 1.0,
            color: Color::DEFAULT,
        }
    }
}

/// One staff fragment as handed over by the layout engine: the measure-wide
/// segment of a staff within a system.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StaffLines {
    /// Style of the staff; `None` for placeholder staves.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<StaffStyle>,
    /// Width of the fragment (the measure width).
    pub width: f64,
    /// Spatium, already scaled by staff size.
    pub spatium: f64,
    /// Staff line thickness in spatium units.
    #[serde(default = "default_line_width_sp")]
    pub line_width_sp: f64,
}

/// The computed line set of a staff fragment, relative to its page position.
#[derive(Clone, Debug, PartialEq)]
pub struct StaffLinesLayout {
    /// One horizontal segment per staff line, top to bottom.
    pub lines: Vec<LineSegment>,
    /// Stroke width of the lines.
    pub line_width: f64,
    /// Bounding box including half the stroke width.
    pub bbox: Rect,
    pub mag: f64,
    pub color: Color,
}

impl StaffLines {
    /// Creates a fragment of the given width with a known style.
    pub fn new(style: StaffStyle, width: f64, spatium: f64) -> Self {
        Self {
            style: Some(style),
            width,
            spatium,
            line_width_sp: DEFAULT_LINE_WIDTH_SP,
        }
    }

    /// Creates a placeholder fragment with no style.
    pub fn placeholder(width: f64, spatium: f64) -> Self {
        Self {
            style: None,
            width,
            spatium,
            line_width_sp: DEFAULT_LINE_WIDTH_SP,
        }
    }

    /// Vertical position of the top line relative to the staff origin.
    pub fn top_line_offset(&self) -> f64 {
        self.style
            .as_ref()
            .map(|s| s.yoffset * self.spatium)
            .unwrap_or(0.0)
    }

    /// Vertical position of the top line relative to the enclosing system,
    /// given the staff's y within that system.
    pub fn top_line_y(&self, system_staff_y: f64) -> f64 {
        system_staff_y + self.top_line_offset()
    }

    /// Lays out the fragment at its own width.
    pub fn layout(&self) -> StaffLinesLayout {
        self.layout_for_width(self.width)
    }

    /// Computes the line segments for a fragment `width` wide.
    pub fn layout_for_width(&self, width: f64) -> StaffLinesLayout {
        let spatium = self.spatium;
        let (lines, dist, mag, color) = match &self.style {
            Some(style) => (
                style.lines,
                spatium * style.line_distance,
                style.mag,
                style.color,
            ),
            None => (DEFAULT_LINES, spatium, 1.0, Color::DEFAULT),
        };

        let line_width = self.line_width_sp * spatium;
        let x1 = 0.0;
        let x2 = x1 + width;
        let mut y = self.top_line_offset();

        let span = lines.saturating_sub(1) as f64 * dist;
        let mut bbox = Rect::new(x1, y - line_width * 0.5, width, span + line_width);
        if lines == 1 {
            bbox.adjust_vertical(-spatium, spatium);
        }

        let mut segments = Vec::with_capacity(lines);
        for _ in 0..lines {
            segments.push(LineSegment::horizontal(x1, x2, y));
            y += dist;
        }

        StaffLinesLayout {
            lines: segments,
            line_width,
            bbox,
            mag,
            color,
        }
    }
}
