//! Pure 2D math shared by every other module.
//!
//! Nothing here validates its inputs: NaN and infinities pass straight
//! through, so callers must not feed them in.

#[cfg(test)]
#[path = "geometry_test.rs"]
mod geometry_test;

use serde::{Deserialize, Serialize};

use crate::element::{Element, ElementKind, Footprint};

/// A point in either screen or scene space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Component-wise difference `self - other`.
    #[must_use]
    pub fn sub(self, other: Point) -> Point {
        Point::new(self.x - other.x, self.y - other.y)
    }

    /// Component-wise sum `self + other`.
    #[must_use]
    pub fn add(self, other: Point) -> Point {
        Point::new(self.x + other.x, self.y + other.y)
    }
}

/// Width and height of something, in whatever space the caller is in.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Axis-aligned rectangle anchored at its top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    #[must_use]
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    /// Normalized rectangle spanned by two opposite corners, in any order.
    #[must_use]
    pub fn from_corners(a: Point, b: Point) -> Self {
        Self {
            x: a.x.min(b.x),
            y: a.y.min(b.y),
            width: (a.x - b.x).abs(),
            height: (a.y - b.y).abs(),
        }
    }

    #[must_use]
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    #[must_use]
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Smallest rectangle covering both `self` and `other`.
    #[must_use]
    pub fn union(&self, other: &Rect) -> Rect {
        let x = self.x.min(other.x);
        let y = self.y.min(other.y);
        Rect {
            x,
            y,
            width: self.right().max(other.right()) - x,
            height: self.bottom().max(other.bottom()) - y,
        }
    }
}

/// Circle given by its center and radius.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Circle {
    pub center: Point,
    pub radius: f64,
}

/// Euclidean distance between two points.
#[must_use]
pub fn distance(a: Point, b: Point) -> f64 {
    (a.x - b.x).hypot(a.y - b.y)
}

/// Whether `p` lies inside `rect`, edges included.
#[must_use]
pub fn point_in_rect(p: Point, rect: &Rect) -> bool {
    p.x >= rect.x && p.x <= rect.right() && p.y >= rect.y && p.y <= rect.bottom()
}

/// Whether `p` lies inside `circle`, boundary included.
#[must_use]
pub fn point_in_circle(p: Point, circle: &Circle) -> bool {
    distance(p, circle.center) <= circle.radius
}

/// Axis-aligned overlap test. Rectangles that only touch along an edge or at
/// a corner still intersect.
#[must_use]
pub fn rects_intersect(a: &Rect, b: &Rect) -> bool {
    !(a.right() < b.x || b.right() < a.x || a.bottom() < b.y || b.bottom() < a.y)
}

/// Wrap an angle in degrees into `[0, 360)`.
#[must_use]
pub fn normalize_degrees(deg: f64) -> f64 {
    let wrapped = ((deg % 360.0) + 360.0) % 360.0;
    // -1e-15 % 360 + 360 rounds up to exactly 360.
    if wrapped >= 360.0 { 0.0 } else { wrapped }
}

/// Bounding box of an element in the frame its `x, y` are expressed in.
///
/// Circular tables treat `x, y` as the center and return the enclosing
/// square; everything else is the stored rectangle.
#[must_use]
pub fn element_bounds(element: &Element) -> Rect {
    match &element.kind {
        ElementKind::Table { footprint: Footprint::Circle { radius }, .. } => Rect {
            x: element.x - radius,
            y: element.y - radius,
            width: 2.0 * radius,
            height: 2.0 * radius,
        },
        ElementKind::Table { footprint: Footprint::Rect(dims), .. }
        | ElementKind::Wall(dims)
        | ElementKind::Door(dims)
        | ElementKind::Window(dims)
        | ElementKind::Group { size: dims, .. } => Rect {
            x: element.x,
            y: element.y,
            width: dims.width,
            height: dims.height,
        },
    }
}
