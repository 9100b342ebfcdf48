//! Page-space geometry primitives used by scene elements.

use serde::{Deserialize, Serialize};

/// A point in page coordinates. `y` grows downwards.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    /// Creates a new point.
    #[inline]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Returns true if both coordinates are finite (not NaN or infinite).
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// A straight segment between two points.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct LineSegment {
    pub p1: Point,
    pub p2: Point,
}

impl LineSegment {
    /// Creates a horizontal segment from `x1` to `x2` at height `y`.
    #[inline]
    pub fn horizontal(x1: f64, x2: f64, y: f64) -> Self {
        Self {
            p1: Point::new(x1, y),
            p2: Point::new(x2, y),
        }
    }

    #[inline]
    pub fn x1(&self) -> f64 {
        self.p1.x
    }

    #[inline]
    pub fn x2(&self) -> f64 {
        self.p2.x
    }

    #[inline]
    pub fn y1(&self) -> f64 {
        self.p1.y
    }

    #[inline]
    pub fn y2(&self) -> f64 {
        self.p2.y
    }

    /// Returns true if both endpoints share the same y.
    #[inline]
    pub fn is_horizontal(&self) -> bool {
        self.p1.y == self.p2.y
    }
}

/// An axis-aligned rectangle stored as origin plus size.
///
/// Like the layout engine's bounding boxes, the rectangle may be adjusted
/// outwards after construction.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    /// Creates a rectangle from origin and size.
    #[inline]
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    #[inline]
    pub fn top(&self) -> f64 {
        self.y
    }

    #[inline]
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Moves the top edge by `dy1` and the bottom edge by `dy2`.
    pub fn adjust_vertical(&mut self, dy1: f64, dy2: f64) {
        self.y += dy1;
        self.height += dy2 - dy1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_is_finite() {
        assert!(Point::new(1.0, 2.0).is_finite());
        assert!(!Point::new(f64::NAN, 2.0).is_finite());
        assert!(!Point::new(1.0, f64::INFINITY).is_finite());
    }

    #[test]
    fn test_horizontal_segment() {
        let seg = LineSegment::horizontal(0.0, 10.0, 4.0);
        assert!(seg.is_horizontal());
        assert_eq!(seg.x2() - seg.x1(), 10.0);

        let slanted = LineSegment {
            p1: Point::new(0.0, 0.0),
            p2: Point::new(10.0, 1.0),
        };
        assert!(!slanted.is_horizontal());
    }

    #[test]
    fn test_rect_adjust_vertical() {
        let mut r = Rect::new(0.0, -0.5, 100.0, 1.0);
        r.adjust_vertical(-2.0, 2.0);
        assert_eq!(r.top(), -2.5);
        assert_eq!(r.bottom(), 2.5);
        assert_eq!(r.height, 5.0);
    }
}
