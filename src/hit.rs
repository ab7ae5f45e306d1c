#[cfg(test)]
#[path = "hit_test.rs"]
mod hit_test;

use crate::element::{Element, ElementId, ElementKind, Footprint};
use crate::geometry::{Circle, Point, element_bounds, point_in_circle, point_in_rect};
use crate::plan::Floor;

/// Whether `scene_pt` falls on `element`, which must be in scene coordinates.
#[must_use]
pub fn hits(element: &Element, scene_pt: Point) -> bool {
    match &element.kind {
        ElementKind::Table { footprint: Footprint::Circle { radius }, .. } => {
            point_in_circle(scene_pt, &Circle { center: element.position(), radius: *radius })
        }
        _ => point_in_rect(scene_pt, &element_bounds(element)),
    }
}

/// The top-most top-level element under `scene_pt`.
///
/// Higher `z_index` wins; among equal z the later element in the floor wins,
/// matching paint order. Grouped members are reached through their group.
#[must_use]
pub fn hit_test(scene_pt: Point, floor: &Floor) -> Option<ElementId> {
    floor
        .top_level()
        .enumerate()
        .filter(|(_, e)| hits(e, scene_pt))
        .max_by_key(|(idx, e)| (e.z_index, *idx))
        .map(|(_, e)| e.id.clone())
}
