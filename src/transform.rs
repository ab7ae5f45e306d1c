//! Finalizing drag, resize and rotate gestures into element state.
//!
//! While a gesture runs, the rendering layer moves and scales its own node;
//! the stored element is untouched. On release the node's transform is
//! handed here and folded into the element: positions are snapped, scale is
//! absorbed into width/height/radius, and the node's scale is reset to 1 so
//! no element ever carries a standing scale multiplier.

#[cfg(test)]
#[path = "transform_test.rs"]
mod transform_test;

use crate::element::{Dimensions, Element, ElementKind, Footprint};
use crate::error::EditError;
use crate::geometry::{Point, normalize_degrees};
use crate::grid::GridSnapper;

/// Transform reported by the rendering layer for a node at gesture end.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NodeTransform {
    pub x: f64,
    pub y: f64,
    pub scale_x: f64,
    pub scale_y: f64,
    /// Degrees, not necessarily normalized.
    pub rotation: f64,
}

impl NodeTransform {
    /// Unscaled node at the element's current position and rotation.
    #[must_use]
    pub fn of(element: &Element) -> Self {
        Self { x: element.x, y: element.y, scale_x: 1.0, scale_y: 1.0, rotation: element.rotation }
    }
}

/// Snapping and minimum-size policy applied to every commit.
#[derive(Debug, Clone, Copy)]
pub struct TransformCommitter {
    pub snapper: GridSnapper,
    pub snap_enabled: bool,
    pub min_size: f64,
}

impl TransformCommitter {
    #[must_use]
    pub fn new(snapper: GridSnapper, snap_enabled: bool, min_size: f64) -> Self {
        Self { snapper, snap_enabled, min_size }
    }

    fn snap_size(&self, value: f64) -> f64 {
        self.snapper.snap(value, self.snap_enabled).max(self.min_size)
    }

    /// Snap the dropped position; nothing else changes.
    pub fn commit_move(&self, element: &mut Element, raw: Point) {
        element.set_position(self.snapper.snap_point(raw, self.snap_enabled));
    }

    /// Absorb the node's scale into the element's size, re-snap its
    /// position, take its rotation, and reset the node's scale to 1.
    ///
    /// Round tables scale their radius by the larger axis factor so they stay
    /// round. Every resulting size is at least `min_size`.
    ///
    /// # Errors
    ///
    /// [`EditError::GroupResize`] for groups, whose box is derived from their
    /// members. Nothing is modified in that case.
    pub fn commit_resize(&self, element: &mut Element, node: &mut NodeTransform) -> Result<(), EditError> {
        let scaled = |d: Dimensions| {
            Dimensions::new(self.snap_size(d.width * node.scale_x), self.snap_size(d.height * node.scale_y))
        };
        match &mut element.kind {
            ElementKind::Group { .. } => return Err(EditError::GroupResize(element.id.clone())),
            ElementKind::Table { footprint: Footprint::Circle { radius }, .. } => {
                *radius = self.snap_size(*radius * node.scale_x.max(node.scale_y));
            }
            ElementKind::Table { footprint: Footprint::Rect(dims), .. }
            | ElementKind::Wall(dims)
            | ElementKind::Door(dims)
            | ElementKind::Window(dims) => *dims = scaled(*dims),
        }
        element.set_position(self.snapper.snap_point(Point::new(node.x, node.y), self.snap_enabled));
        element.rotation = normalize_degrees(node.rotation);
        node.scale_x = 1.0;
        node.scale_y = 1.0;
        node.x = element.x;
        node.y = element.y;
        node.rotation = element.rotation;
        Ok(())
    }

    /// Store a rotation gesture's final angle.
    pub fn commit_rotate(&self, element: &mut Element, raw_rotation: f64) {
        element.rotation = normalize_degrees(raw_rotation);
    }
}
