//! Element model: the things placed on a floor, their ids, and the flat
//! record they travel as on the wire.
//!
//! In memory an element's shape is a sum type (`ElementKind`), so a circular
//! table can only carry a radius and a wall can only carry width and height.
//! On the wire the same element is a flat camelCase object with optional
//! `width`/`height`/`radius` fields (`ElementRecord`); converting from the
//! record is where malformed input is rejected.
//!
//! Fields the editor does not interpret (colors, chair layout, and other
//! decoration owned by rendering) are kept in `decoration` and written back
//! untouched.

#[cfg(test)]
#[path = "element_test.rs"]
mod element_test;

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::geometry::{Point, normalize_degrees};

/// Opaque element identifier, `{type}-{suffix}` for generated ids.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ElementId(String);

impl ElementId {
    #[must_use]
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Fresh id for a new element of the given type.
    #[must_use]
    pub fn generate(element_type: ElementType) -> Self {
        Self(format!("{}-{}", element_type.as_str(), Uuid::new_v4().simple()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ElementId {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

/// Discriminant of [`ElementKind`], as written in the wire `type` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementType {
    Table,
    Wall,
    Door,
    Window,
    Group,
}

impl ElementType {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Table => "table",
            Self::Wall => "wall",
            Self::Door => "door",
            Self::Window => "window",
            Self::Group => "group",
        }
    }
}

/// Outline of a table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TableShape {
    Circle,
    Square,
    Rectangle,
    Oval,
}

/// Width and height of a rect-like element, in scene units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Dimensions {
    pub width: f64,
    pub height: f64,
}

impl Dimensions {
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Sizing of a table: rect-like tables use width/height, round ones a radius.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Footprint {
    Rect(Dimensions),
    Circle { radius: f64 },
}

/// What an element is, together with the size fields that kind carries.
#[derive(Debug, Clone, PartialEq)]
pub enum ElementKind {
    Table { shape: TableShape, footprint: Footprint },
    Wall(Dimensions),
    Door(Dimensions),
    Window(Dimensions),
    /// Synthetic container. `children` are member ids in selection order.
    Group { size: Dimensions, children: Vec<ElementId> },
}

impl ElementKind {
    /// Table of the given shape. Circles keep only `radius`, every other shape
    /// only `width` and `height`.
    #[must_use]
    pub fn table(shape: TableShape, width: f64, height: f64, radius: f64) -> Self {
        let footprint = match shape {
            TableShape::Circle => Footprint::Circle { radius },
            TableShape::Square | TableShape::Rectangle | TableShape::Oval => {
                Footprint::Rect(Dimensions::new(width, height))
            }
        };
        Self::Table { shape, footprint }
    }

    #[must_use]
    pub fn element_type(&self) -> ElementType {
        match self {
            Self::Table { .. } => ElementType::Table,
            Self::Wall(_) => ElementType::Wall,
            Self::Door(_) => ElementType::Door,
            Self::Window(_) => ElementType::Window,
            Self::Group { .. } => ElementType::Group,
        }
    }
}

/// Coordinate frame an element's `x, y` are expressed in.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Placement {
    /// Scene coordinates.
    #[default]
    Absolute,
    /// Offset from the origin of the named group.
    RelativeTo(ElementId),
}

/// A placed object on a floor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ElementRecord", into = "ElementRecord")]
pub struct Element {
    pub id: ElementId,
    pub kind: ElementKind,
    /// Top-left for rect-like kinds, center for circular tables.
    pub x: f64,
    pub y: f64,
    /// Degrees in `[0, 360)`.
    pub rotation: f64,
    /// Stacking order; lower values are drawn beneath higher values.
    pub z_index: i64,
    pub label: Option<String>,
    pub capacity: Option<u32>,
    /// Rendering-owned fields carried through unchanged.
    pub decoration: Map<String, Value>,
    pub placement: Placement,
}

impl Element {
    /// Bare element at `(x, y)` with no rotation, label or decoration.
    #[must_use]
    pub fn new(id: ElementId, kind: ElementKind, x: f64, y: f64, z_index: i64) -> Self {
        Self {
            id,
            kind,
            x,
            y,
            rotation: 0.0,
            z_index,
            label: None,
            capacity: None,
            decoration: Map::new(),
            placement: Placement::Absolute,
        }
    }

    #[must_use]
    pub fn element_type(&self) -> ElementType {
        self.kind.element_type()
    }

    #[must_use]
    pub fn is_group(&self) -> bool {
        matches!(self.kind, ElementKind::Group { .. })
    }

    /// Member ids of a group; empty for everything else.
    #[must_use]
    pub fn children(&self) -> &[ElementId] {
        match &self.kind {
            ElementKind::Group { children, .. } => children,
            _ => &[],
        }
    }

    /// Whether `x, y` are currently relative to a group origin.
    #[must_use]
    pub fn is_grouped(&self) -> bool {
        matches!(self.placement, Placement::RelativeTo(_))
    }

    #[must_use]
    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn set_position(&mut self, p: Point) {
        self.x = p.x;
        self.y = p.y;
    }
}

/// Error converting an [`ElementRecord`] into an [`Element`].
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ElementError {
    /// A rect-like element lacks `width` or `height`.
    #[error("element {0} has no width/height")]
    MissingSize(ElementId),
    /// A circular table lacks `radius`.
    #[error("circular table {0} has no radius")]
    CircleWithoutRadius(ElementId),
    /// A size field is negative.
    #[error("element {0} has a negative size")]
    NegativeSize(ElementId),
    /// A group record carries no `children` list.
    #[error("group {0} has no children list")]
    GroupWithoutChildren(ElementId),
    /// `isGroup` disagrees with `type`.
    #[error("element {0} has isGroup inconsistent with its type")]
    GroupFlagMismatch(ElementId),
}

/// Flat wire form of an [`Element`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElementRecord {
    pub id: ElementId,
    #[serde(rename = "type")]
    pub element_type: ElementType,
    pub x: f64,
    pub y: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub radius: Option<f64>,
    #[serde(default)]
    pub rotation: f64,
    #[serde(default)]
    pub z_index: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub table_shape: Option<TableShape>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub capacity: Option<u32>,
    #[serde(default)]
    pub is_group: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<ElementId>>,
    #[serde(flatten)]
    pub decoration: Map<String, Value>,
}

impl ElementRecord {
    fn dimensions(&self) -> Result<Dimensions, ElementError> {
        match (self.width, self.height) {
            (Some(w), Some(h)) if w < 0.0 || h < 0.0 => Err(ElementError::NegativeSize(self.id.clone())),
            (Some(w), Some(h)) => Ok(Dimensions::new(w, h)),
            _ => Err(ElementError::MissingSize(self.id.clone())),
        }
    }

    fn kind(&self) -> Result<ElementKind, ElementError> {
        if self.is_group != (self.element_type == ElementType::Group) {
            return Err(ElementError::GroupFlagMismatch(self.id.clone()));
        }
        match self.element_type {
            ElementType::Table => {
                // Older records omit the shape; a radius implies a round table.
                let shape = self.table_shape.unwrap_or(if self.radius.is_some() {
                    TableShape::Circle
                } else {
                    TableShape::Rectangle
                });
                let footprint = match shape {
                    TableShape::Circle => match self.radius {
                        Some(r) if r < 0.0 => return Err(ElementError::NegativeSize(self.id.clone())),
                        Some(radius) => Footprint::Circle { radius },
                        None => return Err(ElementError::CircleWithoutRadius(self.id.clone())),
                    },
                    TableShape::Square | TableShape::Rectangle | TableShape::Oval => {
                        Footprint::Rect(self.dimensions()?)
                    }
                };
                Ok(ElementKind::Table { shape, footprint })
            }
            ElementType::Wall => Ok(ElementKind::Wall(self.dimensions()?)),
            ElementType::Door => Ok(ElementKind::Door(self.dimensions()?)),
            ElementType::Window => Ok(ElementKind::Window(self.dimensions()?)),
            ElementType::Group => {
                let Some(children) = self.children.clone() else {
                    return Err(ElementError::GroupWithoutChildren(self.id.clone()));
                };
                Ok(ElementKind::Group { size: self.dimensions()?, children })
            }
        }
    }
}

impl TryFrom<ElementRecord> for Element {
    type Error = ElementError;

    fn try_from(record: ElementRecord) -> Result<Self, Self::Error> {
        let kind = record.kind()?;
        Ok(Self {
            id: record.id,
            kind,
            x: record.x,
            y: record.y,
            rotation: normalize_degrees(record.rotation),
            z_index: record.z_index,
            label: record.label,
            capacity: record.capacity,
            decoration: record.decoration,
            placement: Placement::Absolute,
        })
    }
}

impl From<Element> for ElementRecord {
    fn from(element: Element) -> Self {
        let element_type = element.element_type();
        let (width, height, radius, table_shape, children) = match element.kind {
            ElementKind::Table { shape, footprint: Footprint::Circle { radius } } => {
                (None, None, Some(radius), Some(shape), None)
            }
            ElementKind::Table { shape, footprint: Footprint::Rect(d) } => {
                (Some(d.width), Some(d.height), None, Some(shape), None)
            }
            ElementKind::Wall(d) | ElementKind::Door(d) | ElementKind::Window(d) => {
                (Some(d.width), Some(d.height), None, None, None)
            }
            ElementKind::Group { size, children } => (Some(size.width), Some(size.height), None, None, Some(children)),
        };
        Self {
            id: element.id,
            element_type,
            x: element.x,
            y: element.y,
            width,
            height,
            radius,
            rotation: element.rotation,
            z_index: element.z_index,
            table_shape,
            label: element.label,
            capacity: element.capacity,
            is_group: element_type == ElementType::Group,
            children,
            decoration: element.decoration,
        }
    }
}
