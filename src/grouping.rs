//! Ad-hoc grouping of elements and the coordinate-frame changes it implies.
//!
//! Grouping is destructive: members' `x, y` are rewritten relative to the
//! group origin and their placement becomes `RelativeTo(group)`. Ungrouping
//! (and deleting a group) adds the origin back and returns them to
//! `Absolute`. Groups are flat: a group never contains another group, and an
//! element belongs to at most one group.

#[cfg(test)]
#[path = "grouping_test.rs"]
mod grouping_test;

use tracing::{debug, info, warn};

use crate::element::{Dimensions, Element, ElementId, ElementKind, ElementType, Placement};
use crate::error::EditError;
use crate::geometry::{Rect, element_bounds};
use crate::plan::Floor;

/// Fold the given elements into a new group and return its id.
///
/// Duplicate ids are ignored. The group's box is the union of the members'
/// bounds and its z-index sits above every member.
///
/// # Errors
///
/// [`EditError::TooFewToGroup`], [`EditError::UnknownElement`],
/// [`EditError::AlreadyGroup`] or [`EditError::AlreadyGrouped`]; the floor is
/// untouched in every case.
pub fn group(floor: &mut Floor, ids: &[ElementId]) -> Result<ElementId, EditError> {
    let mut members: Vec<ElementId> = Vec::with_capacity(ids.len());
    for id in ids {
        if !members.contains(id) {
            members.push(id.clone());
        }
    }
    if members.len() < 2 {
        return Err(EditError::TooFewToGroup(members.len()));
    }

    let mut bounds: Option<Rect> = None;
    let mut top_z = i64::MIN;
    for id in &members {
        let Some(element) = floor.get(id) else {
            return Err(EditError::UnknownElement(id.clone()));
        };
        if element.is_group() {
            return Err(EditError::AlreadyGroup(id.clone()));
        }
        if element.is_grouped() {
            return Err(EditError::AlreadyGrouped(id.clone()));
        }
        let b = element_bounds(element);
        bounds = Some(bounds.map_or(b, |acc| acc.union(&b)));
        top_z = top_z.max(element.z_index);
    }
    let Some(bounds) = bounds else {
        return Err(EditError::TooFewToGroup(0));
    };

    let group_id = ElementId::generate(ElementType::Group);
    let count = members.len();
    for id in &members {
        if let Some(element) = floor.get_mut(id) {
            element.x -= bounds.x;
            element.y -= bounds.y;
            element.placement = Placement::RelativeTo(group_id.clone());
        }
    }
    let kind = ElementKind::Group { size: Dimensions::new(bounds.width, bounds.height), children: members };
    floor.push(Element::new(group_id.clone(), kind, bounds.x, bounds.y, top_z.saturating_add(1)));
    info!(group = %group_id, members = count, "grouped elements");
    Ok(group_id)
}

/// Dissolve a group, restoring its members' scene coordinates. Returns the
/// ids of the members that were restored.
///
/// # Errors
///
/// [`EditError::UnknownElement`] or [`EditError::NotAGroup`].
pub fn ungroup(floor: &mut Floor, group_id: &ElementId) -> Result<Vec<ElementId>, EditError> {
    let Some(group) = floor.get(group_id) else {
        return Err(EditError::UnknownElement(group_id.clone()));
    };
    if !group.is_group() {
        return Err(EditError::NotAGroup(group_id.clone()));
    }
    let origin = group.position();
    let children = group.children().to_vec();

    let mut restored = Vec::with_capacity(children.len());
    for child in children {
        let Some(element) = floor.get_mut(&child) else {
            warn!(group = %group_id, %child, "skipping missing group child");
            continue;
        };
        element.x += origin.x;
        element.y += origin.y;
        element.placement = Placement::Absolute;
        restored.push(child);
    }
    floor.take(group_id);
    info!(group = %group_id, restored = restored.len(), "ungrouped elements");
    Ok(restored)
}

/// What [`delete_element`] removed and what it changed along the way.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DeleteOutcome {
    pub deleted: Vec<ElementId>,
    pub updated: Vec<ElementId>,
}

/// Delete an element, keeping group membership consistent.
///
/// - A group is dissolved: its members return to scene coordinates and stay.
/// - A grouped member is pruned from its group's `children`; a group left
///   with fewer than two members is dissolved as well.
///
/// # Errors
///
/// [`EditError::UnknownElement`] when the id is not on the floor.
pub fn delete_element(floor: &mut Floor, id: &ElementId) -> Result<DeleteOutcome, EditError> {
    let Some(element) = floor.get(id) else {
        return Err(EditError::UnknownElement(id.clone()));
    };

    if element.is_group() {
        let updated = ungroup(floor, id)?;
        return Ok(DeleteOutcome { deleted: vec![id.clone()], updated });
    }

    let owner = floor.owning_group(id).cloned();
    floor.take(id);
    let mut outcome = DeleteOutcome { deleted: vec![id.clone()], updated: Vec::new() };
    let Some(group_id) = owner else {
        debug!(%id, "deleted element");
        return Ok(outcome);
    };

    let remaining = match floor.get_mut(&group_id).map(|g| &mut g.kind) {
        Some(ElementKind::Group { children, .. }) => {
            children.retain(|c| c != id);
            children.clone()
        }
        _ => return Ok(outcome),
    };
    let live = remaining.iter().filter(|c| floor.contains(c)).count();
    if live < 2 {
        outcome.updated = ungroup(floor, &group_id)?;
        outcome.deleted.push(group_id);
    } else {
        outcome.updated.push(group_id);
    }
    debug!(%id, "deleted grouped element");
    Ok(outcome)
}
