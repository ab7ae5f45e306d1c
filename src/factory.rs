//! Construction of new elements from a tool choice and a scene anchor.
//!
//! All coordinates pass through the grid snapper before they are stored.
//! Default sizes and z tiers (walls below doors/windows below tables) come
//! from [`SizeDefaults`], so a freshly placed element stacks correctly
//! without any explicit z management.

#[cfg(test)]
#[path = "factory_test.rs"]
mod factory_test;

use crate::config::SizeDefaults;
use crate::element::{Dimensions, Element, ElementId, ElementKind, ElementType, TableShape};
use crate::geometry::Point;
use crate::grid::GridSnapper;

/// Which kind of element to place at an anchor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placeable {
    Table(TableShape),
    Wall,
    Door,
    Window,
}

#[derive(Debug, Clone, Copy)]
pub struct ElementFactory {
    pub snapper: GridSnapper,
    pub snap_enabled: bool,
    pub sizes: SizeDefaults,
    pub min_size: f64,
}

impl ElementFactory {
    #[must_use]
    pub fn new(snapper: GridSnapper, snap_enabled: bool, sizes: SizeDefaults, min_size: f64) -> Self {
        Self { snapper, snap_enabled, sizes, min_size }
    }

    fn snap(&self, value: f64) -> f64 {
        self.snapper.snap(value, self.snap_enabled)
    }

    /// Build the element a tool places at `anchor`.
    #[must_use]
    pub fn create(&self, what: Placeable, anchor: Point) -> Element {
        match what {
            Placeable::Table(shape) => self.create_table(anchor, shape),
            Placeable::Wall => self.create_wall(anchor),
            Placeable::Door => self.create_door(anchor),
            Placeable::Window => self.create_window(anchor),
        }
    }

    /// New table for a click at `anchor`.
    ///
    /// Round tables store `snap(anchor - radius)` on both axes; rect-like
    /// tables are centered on the anchor and store their snapped top-left.
    #[must_use]
    pub fn create_table(&self, anchor: Point, shape: TableShape) -> Element {
        let s = &self.sizes;
        let (width, height, capacity) = match shape {
            TableShape::Circle => (2.0 * s.table_radius, 2.0 * s.table_radius, s.round_capacity),
            TableShape::Square => (s.square_side, s.square_side, s.square_capacity),
            TableShape::Rectangle => (s.rectangle_width, s.rectangle_height, s.rectangle_capacity),
            TableShape::Oval => (s.oval_width, s.oval_height, s.oval_capacity),
        };
        let (x, y) = match shape {
            TableShape::Circle => (self.snap(anchor.x - s.table_radius), self.snap(anchor.y - s.table_radius)),
            TableShape::Square | TableShape::Rectangle | TableShape::Oval => {
                (self.snap(anchor.x - width / 2.0), self.snap(anchor.y - height / 2.0))
            }
        };
        let kind = ElementKind::table(shape, width, height, s.table_radius);
        let mut table = Element::new(ElementId::generate(ElementType::Table), kind, x, y, s.table_z);
        table.capacity = Some(capacity);
        table
    }

    /// Default-length horizontal wall with its top-left at `anchor`.
    #[must_use]
    pub fn create_wall(&self, anchor: Point) -> Element {
        let dims = Dimensions::new(self.sizes.wall_length, self.sizes.wall_thickness);
        self.rect_like(ElementType::Wall, ElementKind::Wall(dims), anchor, self.sizes.wall_z)
    }

    #[must_use]
    pub fn create_door(&self, anchor: Point) -> Element {
        let dims = Dimensions::new(self.sizes.door_width, self.sizes.wall_thickness);
        self.rect_like(ElementType::Door, ElementKind::Door(dims), anchor, self.sizes.opening_z)
    }

    #[must_use]
    pub fn create_window(&self, anchor: Point) -> Element {
        let dims = Dimensions::new(self.sizes.window_width, self.sizes.wall_thickness);
        self.rect_like(ElementType::Window, ElementKind::Window(dims), anchor, self.sizes.opening_z)
    }

    /// Wall drawn by dragging from `start` to `end`.
    ///
    /// The wall runs along whichever axis the drag covered more of, keeps
    /// the default thickness across it, and is at least `min_size` long.
    #[must_use]
    pub fn create_wall_between(&self, start: Point, end: Point) -> Element {
        let a = self.snapper.snap_point(start, self.snap_enabled);
        let b = self.snapper.snap_point(end, self.snap_enabled);
        let dx = (b.x - a.x).abs();
        let dy = (b.y - a.y).abs();
        let thickness = self.sizes.wall_thickness;
        let (x, y, dims) = if dx >= dy {
            (a.x.min(b.x), a.y, Dimensions::new(dx.max(self.min_size), thickness))
        } else {
            (a.x, a.y.min(b.y), Dimensions::new(thickness, dy.max(self.min_size)))
        };
        Element::new(ElementId::generate(ElementType::Wall), ElementKind::Wall(dims), x, y, self.sizes.wall_z)
    }

    fn rect_like(&self, element_type: ElementType, kind: ElementKind, anchor: Point, z: i64) -> Element {
        let p = self.snapper.snap_point(anchor, self.snap_enabled);
        Element::new(ElementId::generate(element_type), kind, p.x, p.y, z)
    }
}
