//! Rejections of editing operations.
//!
//! Every variant is a precondition the caller could have checked first
//! (selection size, `is_group`, floor count). Operations validate before
//! touching any state, so an `Err` always means nothing changed.

use crate::element::ElementId;
use crate::plan::FloorId;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EditError {
    #[error("grouping needs at least two elements, got {0}")]
    TooFewToGroup(usize),
    #[error("element {0} is a group; groups cannot be nested")]
    AlreadyGroup(ElementId),
    #[error("element {0} already belongs to a group")]
    AlreadyGrouped(ElementId),
    #[error("element {0} is not a group")]
    NotAGroup(ElementId),
    #[error("groups cannot be resized: {0}")]
    GroupResize(ElementId),
    #[error("element not found: {0}")]
    UnknownElement(ElementId),
    #[error("floor not found: {0}")]
    UnknownFloor(FloorId),
    #[error("cannot delete the only floor")]
    LastFloor,
    #[error("floor name must not be empty")]
    EmptyFloorName,
}
