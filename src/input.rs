//! Input model: tools, modifier keys, mouse buttons, and the gesture state machine.
//!
//! `Tool` and `Modifiers` capture the user's intent at the time of a pointer
//! event. `GestureState` is the single gesture being tracked between
//! pointer-down and pointer-up; starting any gesture replaces whatever was
//! in progress, and pointer-leave or `Escape` drops it.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use crate::element::{ElementId, TableShape};
use crate::factory::Placeable;
use crate::geometry::{Point, Rect};

/// Which tool is currently active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tool {
    /// Pointer / selection tool (default).
    #[default]
    Select,
    /// Drag anywhere to pan the view.
    Pan,
    /// Click to place a table of the given shape.
    Table(TableShape),
    /// Click for a default wall, drag to draw one.
    Wall,
    /// Click to place a door.
    Door,
    /// Click to place a window.
    Window,
}

impl Tool {
    /// The element a single click with this tool places, if any.
    ///
    /// Walls are absent: they are placed on release of a wall-draw gesture.
    #[must_use]
    pub fn placeable(self) -> Option<Placeable> {
        match self {
            Self::Table(shape) => Some(Placeable::Table(shape)),
            Self::Door => Some(Placeable::Door),
            Self::Window => Some(Placeable::Window),
            Self::Select | Self::Pan | Self::Wall => None,
        }
    }
}

/// Keyboard/mouse modifier keys held during an event.
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, Copy, Default)]
pub struct Modifiers {
    /// Shift key is held.
    pub shift: bool,
    /// Ctrl key is held.
    pub ctrl: bool,
    /// Alt / Option key is held.
    pub alt: bool,
    /// Meta / Command key is held.
    pub meta: bool,
}

impl Modifiers {
    /// Ctrl on most platforms, Command on macOS: toggles selection membership.
    #[must_use]
    pub fn additive(self) -> bool {
        self.ctrl || self.meta
    }
}

/// Mouse button identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    /// Left mouse button (or single-finger tap).
    Primary,
    /// Middle mouse button (scroll wheel click).
    Middle,
    /// Right mouse button (or two-finger tap).
    Secondary,
}

/// A keyboard key as reported by the host (e.g. `"Delete"`, `"Escape"`, `"g"`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Key(pub String);

/// Wheel / trackpad scroll delta.
#[derive(Debug, Clone, Copy)]
pub struct WheelDelta {
    /// Horizontal scroll amount in pixels.
    pub dx: f64,
    /// Vertical scroll amount in pixels (positive = down).
    pub dy: f64,
}

/// The gesture in progress, if any.
///
/// Each active variant carries the context needed to update on pointer-move
/// and to commit on pointer-up.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum GestureState {
    /// No gesture in progress; waiting for the next pointer-down.
    #[default]
    Idle,
    /// Dragging the view.
    Panning {
        /// `initial_pointer - initial_position`, fixed for the whole gesture.
        anchor: Point,
    },
    /// Dragging out a selection rectangle, in scene coordinates.
    Marqueeing { start: Point, current: Point },
    /// Dragging out a new wall, in scene coordinates.
    DrawingWall { start: Point, current: Point },
    /// Moving an existing top-level element.
    DraggingElement {
        id: ElementId,
        /// Pointer position minus element position at grab time.
        grab_offset: Point,
        /// Element position at grab time, restored on cancel.
        origin: Point,
    },
}

impl GestureState {
    #[must_use]
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    /// The normalized marquee rectangle while marqueeing.
    #[must_use]
    pub fn marquee_rect(&self) -> Option<Rect> {
        match self {
            Self::Marqueeing { start, current } => Some(Rect::from_corners(*start, *current)),
            _ => None,
        }
    }
}
