//! Floors and the `FloorPlan` aggregate, plus load-time validation.
//!
//! A plan read from storage is only handed to the editor after it passes the
//! checks in [`FloorPlan::from_json`]: at least one floor, a resolvable
//! current floor, and flat groups. Group membership is then turned into
//! explicit [`Placement`]s so nothing downstream has to scan `children`
//! lists to learn which frame an element's coordinates are in.

#[cfg(test)]
#[path = "plan_test.rs"]
mod plan_test;

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::element::{Element, ElementId, Placement};
use crate::geometry::Point;

/// Opaque floor identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FloorId(String);

impl FloorId {
    #[must_use]
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    #[must_use]
    pub fn generate() -> Self {
        Self(format!("floor-{}", Uuid::new_v4().simple()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FloorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for FloorId {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

/// One level of a venue and the elements placed on it.
///
/// Element order carries no meaning; `z_index` decides stacking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Floor {
    pub id: FloorId,
    pub name: String,
    /// Display ordering among floors.
    pub level: i32,
    #[serde(default)]
    pub elements: Vec<Element>,
}

impl Floor {
    /// Empty floor with a fresh id.
    #[must_use]
    pub fn new(name: impl Into<String>, level: i32) -> Self {
        Self { id: FloorId::generate(), name: name.into(), level, elements: Vec::new() }
    }

    #[must_use]
    pub fn get(&self, id: &ElementId) -> Option<&Element> {
        self.elements.iter().find(|e| &e.id == id)
    }

    pub fn get_mut(&mut self, id: &ElementId) -> Option<&mut Element> {
        self.elements.iter_mut().find(|e| &e.id == id)
    }

    #[must_use]
    pub fn contains(&self, id: &ElementId) -> bool {
        self.get(id).is_some()
    }

    pub fn push(&mut self, element: Element) {
        self.elements.push(element);
    }

    /// Remove an element by id with no cascading, returning it if present.
    pub fn take(&mut self, id: &ElementId) -> Option<Element> {
        let idx = self.elements.iter().position(|e| &e.id == id)?;
        Some(self.elements.remove(idx))
    }

    /// Highest z-index on the floor, if any element exists.
    #[must_use]
    pub fn max_z(&self) -> Option<i64> {
        self.elements.iter().map(|e| e.z_index).max()
    }

    /// Elements expressed in scene coordinates (not inside a group).
    pub fn top_level(&self) -> impl Iterator<Item = &Element> {
        self.elements.iter().filter(|e| !e.is_grouped())
    }

    /// Group members that still exist on the floor, in `children` order.
    #[must_use]
    pub fn group_members(&self, group: &Element) -> Vec<&Element> {
        group.children().iter().filter_map(|id| self.get(id)).collect()
    }

    /// Id of the group that owns `id`, if any.
    #[must_use]
    pub fn owning_group(&self, id: &ElementId) -> Option<&ElementId> {
        match &self.get(id)?.placement {
            Placement::RelativeTo(group) => Some(group),
            Placement::Absolute => None,
        }
    }

    /// Derive every element's placement from the groups' `children` lists.
    pub fn rebuild_placements(&mut self) {
        let memberships: Vec<(ElementId, ElementId)> = self
            .elements
            .iter()
            .filter(|e| e.is_group())
            .flat_map(|g| g.children().iter().map(move |c| (c.clone(), g.id.clone())))
            .collect();
        for element in &mut self.elements {
            element.placement = Placement::Absolute;
        }
        for (child, group) in memberships {
            match self.get_mut(&child) {
                Some(element) => element.placement = Placement::RelativeTo(group),
                None => tracing::warn!(floor = %self.id, %group, %child, "group lists a missing child"),
            }
        }
    }
}

/// Logical canvas extents and the last-used view.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Stage {
    pub width: f64,
    pub height: f64,
    pub scale: f64,
    pub offset: Point,
}

impl Default for Stage {
    fn default() -> Self {
        Self {
            width: crate::consts::STAGE_WIDTH,
            height: crate::consts::STAGE_HEIGHT,
            scale: 1.0,
            offset: Point::default(),
        }
    }
}

/// Rejection of a persisted plan.
#[derive(Debug, thiserror::Error)]
pub enum PlanError {
    #[error("plan has no floors")]
    NoFloors,
    #[error("current floor {0} is not among the plan's floors")]
    UnknownCurrentFloor(FloorId),
    #[error("floor id {0} is used more than once")]
    DuplicateFloorId(FloorId),
    #[error("element id {id} is used more than once on floor {floor}")]
    DuplicateElementId { floor: FloorId, id: ElementId },
    #[error("group {group} lists group {child} as a child")]
    NestedGroup { group: ElementId, child: ElementId },
    #[error("element {child} is listed by both {first} and {second}")]
    SharedChild { child: ElementId, first: ElementId, second: ElementId },
    #[error("invalid plan JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// The aggregate root: stage, floors, and which floor is being edited.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "PlanRecord")]
pub struct FloorPlan {
    pub stage: Stage,
    pub floors: Vec<Floor>,
    pub current_floor_id: FloorId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Value>,
}

/// Wire form of a plan before validation.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanRecord {
    #[serde(default)]
    pub stage: Stage,
    #[serde(default)]
    pub floors: Vec<Floor>,
    #[serde(default)]
    pub current_floor_id: Option<FloorId>,
    #[serde(default)]
    pub metadata: Option<Value>,
}

impl FloorPlan {
    /// Plan with a single empty floor.
    #[must_use]
    pub fn new(first_floor: impl Into<String>) -> Self {
        let floor = Floor::new(first_floor, 0);
        Self {
            stage: Stage::default(),
            current_floor_id: floor.id.clone(),
            floors: vec![floor],
            metadata: None,
        }
    }

    /// Parse and validate a stored plan.
    ///
    /// A missing `currentFloorId` falls back to the first floor; one that is
    /// present but unknown is rejected.
    ///
    /// # Errors
    ///
    /// Returns [`PlanError::Json`] for malformed JSON or element records and
    /// the other [`PlanError`] variants for invariant violations.
    pub fn from_json(raw: &str) -> Result<Self, PlanError> {
        let record: PlanRecord = serde_json::from_str(raw)?;
        Self::try_from(record)
    }

    /// Serialize to pretty JSON.
    ///
    /// # Errors
    ///
    /// Returns [`PlanError::Json`] if serialization fails (non-string map
    /// keys in decoration payloads).
    pub fn to_json(&self) -> Result<String, PlanError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    #[must_use]
    pub fn floor(&self, id: &FloorId) -> Option<&Floor> {
        self.floors.iter().find(|f| &f.id == id)
    }

    pub fn floor_mut(&mut self, id: &FloorId) -> Option<&mut Floor> {
        self.floors.iter_mut().find(|f| &f.id == id)
    }
}

fn check_unique_ids(floors: &[Floor]) -> Result<(), PlanError> {
    let mut floor_ids = HashSet::new();
    for floor in floors {
        if !floor_ids.insert(&floor.id) {
            return Err(PlanError::DuplicateFloorId(floor.id.clone()));
        }
        let mut element_ids = HashSet::new();
        if let Some(dup) = floor.elements.iter().find(|e| !element_ids.insert(&e.id)) {
            return Err(PlanError::DuplicateElementId { floor: floor.id.clone(), id: dup.id.clone() });
        }
    }
    Ok(())
}

fn check_groups(floor: &Floor) -> Result<(), PlanError> {
    let mut owners: Vec<(&ElementId, &ElementId)> = Vec::new();
    for group in floor.elements.iter().filter(|e| e.is_group()) {
        for child in group.children() {
            if floor.get(child).is_some_and(Element::is_group) {
                return Err(PlanError::NestedGroup { group: group.id.clone(), child: child.clone() });
            }
            if let Some((_, first)) = owners.iter().find(|(c, _)| *c == child) {
                return Err(PlanError::SharedChild {
                    child: child.clone(),
                    first: (*first).clone(),
                    second: group.id.clone(),
                });
            }
            owners.push((child, &group.id));
        }
    }
    Ok(())
}

impl TryFrom<PlanRecord> for FloorPlan {
    type Error = PlanError;

    fn try_from(record: PlanRecord) -> Result<Self, Self::Error> {
        let Some(first) = record.floors.first() else {
            return Err(PlanError::NoFloors);
        };
        let current_floor_id = match record.current_floor_id {
            Some(id) if record.floors.iter().any(|f| f.id == id) => id,
            Some(id) => return Err(PlanError::UnknownCurrentFloor(id)),
            None => first.id.clone(),
        };
        check_unique_ids(&record.floors)?;
        for floor in &record.floors {
            check_groups(floor)?;
        }
        let mut floors = record.floors;
        for floor in &mut floors {
            floor.rebuild_placements();
        }
        Ok(Self { stage: record.stage, floors, current_floor_id, metadata: record.metadata })
    }
}
