//! The editing session: one plan, one viewport, one selection, one gesture.
//!
//! `EditorSession` is the only stateful type callers talk to. Every input
//! handler runs synchronously to completion and returns the [`Action`]s the
//! host should forward: element changes for rendering and persistence,
//! selection/viewport changes for chrome, and repaint requests. There is no
//! global state; several sessions can coexist.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use std::mem;

use tracing::{debug, warn};

use crate::config::{ConfigError, EditorConfig};
use crate::element::{Element, ElementId};
use crate::error::EditError;
use crate::factory::{ElementFactory, Placeable};
use crate::floors::FloorManager;
use crate::geometry::{Point, Rect, Size, distance};
use crate::grid::GridSnapper;
use crate::grouping::{self, DeleteOutcome};
use crate::hit::hit_test;
use crate::input::{Button, GestureState, Key, Modifiers, Tool, WheelDelta};
use crate::plan::{FloorId, FloorPlan};
use crate::selection::Selection;
use crate::transform::{NodeTransform, TransformCommitter};
use crate::viewport::Viewport;

/// Actions returned from input handlers for the host to process.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    ElementCreated(Element),
    ElementUpdated(Element),
    ElementDeleted { id: ElementId },
    SelectionChanged,
    FloorSwitched { id: FloorId },
    ViewportChanged,
    RenderNeeded,
}

/// Explicit editor state; see the module docs.
#[derive(Debug, Clone)]
pub struct EditorSession {
    pub floors: FloorManager,
    pub viewport: Viewport,
    pub selection: Selection,
    pub gesture: GestureState,
    pub tool: Tool,
    pub config: EditorConfig,
}

impl Default for EditorSession {
    fn default() -> Self {
        Self::new(FloorPlan::new("Ground floor"), EditorConfig::default())
    }
}

impl EditorSession {
    /// Open a validated plan, restoring the view stored on its stage.
    ///
    /// `config` is taken as given; [`EditorConfig::from_env`] and
    /// [`EditorConfig::validate`] are where bad values get rejected. See
    /// [`EditorSession::with_config`] for a checked constructor.
    #[must_use]
    pub fn new(plan: FloorPlan, config: EditorConfig) -> Self {
        let viewport = Viewport::from_stage(&plan.stage, config.min_zoom, config.max_zoom);
        Self {
            floors: FloorManager::new(plan),
            viewport,
            selection: Selection::new(),
            gesture: GestureState::Idle,
            tool: Tool::Select,
            config,
        }
    }

    /// Like [`EditorSession::new`], but rejects a config that fails
    /// [`EditorConfig::validate`].
    ///
    /// # Errors
    ///
    /// The first [`ConfigError`] found in `config`.
    pub fn with_config(plan: FloorPlan, config: EditorConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::new(plan, config))
    }

    fn snapper(&self) -> GridSnapper {
        GridSnapper::new(self.config.grid_pitch)
    }

    fn factory(&self) -> ElementFactory {
        ElementFactory::new(self.snapper(), self.config.snap_enabled, self.config.sizes, self.config.min_element_size)
    }

    fn committer(&self) -> TransformCommitter {
        TransformCommitter::new(self.snapper(), self.config.snap_enabled, self.config.min_element_size)
    }

    // --- Queries ---

    /// The active floor's elements: the snapshot rendering and persistence read.
    #[must_use]
    pub fn elements(&self) -> &[Element] {
        &self.floors.active().elements
    }

    #[must_use]
    pub fn element(&self, id: &ElementId) -> Option<&Element> {
        self.floors.active().get(id)
    }

    /// The plan with the current view written into its stage.
    #[must_use]
    pub fn snapshot(&self) -> FloorPlan {
        let mut plan = self.floors.plan().clone();
        self.viewport.store_into(&mut plan.stage);
        plan
    }

    // --- Tool / settings ---

    /// Switch tools. Any gesture in progress is cancelled.
    pub fn set_tool(&mut self, tool: Tool) -> Vec<Action> {
        let actions = self.cancel_gesture();
        self.tool = tool;
        actions
    }

    pub fn set_snap(&mut self, enabled: bool) {
        self.config.snap_enabled = enabled;
    }

    // --- Input events ---

    pub fn on_pointer_down(&mut self, screen_pt: Point, button: Button, modifiers: Modifiers) -> Vec<Action> {
        let mut actions = self.cancel_gesture();
        let scene = self.viewport.screen_to_scene(screen_pt);

        if button == Button::Middle || (button == Button::Primary && self.tool == Tool::Pan) {
            self.gesture = GestureState::Panning { anchor: self.viewport.pan_anchor(screen_pt) };
            return actions;
        }
        if button != Button::Primary {
            return actions;
        }

        match self.tool {
            Tool::Select => actions.extend(self.begin_select(scene, modifiers)),
            Tool::Wall => self.gesture = GestureState::DrawingWall { start: scene, current: scene },
            Tool::Pan | Tool::Table(_) | Tool::Door | Tool::Window => {
                if let Some(what) = self.tool.placeable() {
                    actions.extend(self.place_element(what, scene));
                }
            }
        }
        actions
    }

    fn begin_select(&mut self, scene: Point, modifiers: Modifiers) -> Vec<Action> {
        let Some(id) = hit_test(scene, self.floors.active()) else {
            self.selection.clear();
            self.gesture = GestureState::Marqueeing { start: scene, current: scene };
            return vec![Action::SelectionChanged, Action::RenderNeeded];
        };
        if modifiers.additive() {
            self.selection.select(Some(id), true);
            return vec![Action::SelectionChanged, Action::RenderNeeded];
        }
        self.selection.select(Some(id.clone()), false);
        if let Some(element) = self.floors.active().get(&id) {
            let origin = element.position();
            self.gesture = GestureState::DraggingElement { id, grab_offset: scene.sub(origin), origin };
        }
        vec![Action::SelectionChanged, Action::RenderNeeded]
    }

    pub fn on_pointer_move(&mut self, screen_pt: Point, _modifiers: Modifiers) -> Vec<Action> {
        let scene = self.viewport.screen_to_scene(screen_pt);
        match &mut self.gesture {
            GestureState::Idle => Vec::new(),
            GestureState::Panning { anchor } => {
                let anchor = *anchor;
                self.viewport.pan(screen_pt, anchor);
                vec![Action::ViewportChanged, Action::RenderNeeded]
            }
            GestureState::Marqueeing { current, .. } | GestureState::DrawingWall { current, .. } => {
                *current = scene;
                vec![Action::RenderNeeded]
            }
            GestureState::DraggingElement { id, grab_offset, .. } => {
                let target = scene.sub(*grab_offset);
                let id = id.clone();
                if let Some(element) = self.floors.active_mut().get_mut(&id) {
                    element.set_position(target);
                }
                vec![Action::RenderNeeded]
            }
        }
    }

    pub fn on_pointer_up(&mut self, screen_pt: Point, _button: Button, _modifiers: Modifiers) -> Vec<Action> {
        let scene = self.viewport.screen_to_scene(screen_pt);
        match mem::take(&mut self.gesture) {
            GestureState::Idle => Vec::new(),
            GestureState::Panning { .. } => vec![Action::ViewportChanged],
            GestureState::Marqueeing { start, .. } => {
                let rect = Rect::from_corners(start, scene);
                let threshold = self.config.marquee_threshold;
                if self.selection.select_marquee(&rect, &self.floors.active().elements, threshold) {
                    debug!(hits = self.selection.len(), "marquee selection");
                    vec![Action::SelectionChanged, Action::RenderNeeded]
                } else {
                    Vec::new()
                }
            }
            GestureState::DrawingWall { start, .. } => {
                let factory = self.factory();
                let wall = if distance(start, scene) < self.config.marquee_threshold {
                    factory.create_wall(start)
                } else {
                    factory.create_wall_between(start, scene)
                };
                self.insert_and_select(wall)
            }
            GestureState::DraggingElement { id, grab_offset, origin } => {
                let committer = self.committer();
                let Some(element) = self.floors.active_mut().get_mut(&id) else {
                    return Vec::new();
                };
                committer.commit_move(element, scene.sub(grab_offset));
                if element.position() == origin {
                    return vec![Action::RenderNeeded];
                }
                vec![Action::ElementUpdated(element.clone()), Action::RenderNeeded]
            }
        }
    }

    /// The pointer left the canvas: drop the gesture without committing.
    pub fn on_pointer_leave(&mut self) -> Vec<Action> {
        self.cancel_gesture()
    }

    /// Wheel zoom anchored at the pointer. Scrolling up zooms in.
    pub fn on_wheel(&mut self, screen_pt: Point, delta: WheelDelta, _modifiers: Modifiers) -> Vec<Action> {
        if delta.dy == 0.0 {
            return Vec::new();
        }
        let factor = if delta.dy < 0.0 { self.config.wheel_zoom_factor } else { 1.0 / self.config.wheel_zoom_factor };
        self.viewport.zoom_at_pointer(screen_pt, factor);
        vec![Action::ViewportChanged, Action::RenderNeeded]
    }

    /// Keyboard shortcuts: Delete/Backspace, Escape, Ctrl/Cmd+G and
    /// Ctrl/Cmd+Shift+G.
    pub fn on_key_down(&mut self, key: &Key, modifiers: Modifiers) -> Vec<Action> {
        let result = match key.0.as_str() {
            "Delete" | "Backspace" => self.delete_selected(),
            "Escape" => {
                let mut actions = self.cancel_gesture();
                self.selection.clear();
                actions.extend([Action::SelectionChanged, Action::RenderNeeded]);
                Ok(actions)
            }
            "g" | "G" if modifiers.additive() && modifiers.shift => self.ungroup_selection(),
            "g" | "G" if modifiers.additive() => self.group_selection(),
            _ => Ok(Vec::new()),
        };
        result.unwrap_or_else(|e| {
            warn!(error = %e, key = %key.0, "shortcut rejected");
            Vec::new()
        })
    }

    /// Abandon the gesture in progress. A dragged element goes back to where
    /// it was picked up.
    pub fn cancel_gesture(&mut self) -> Vec<Action> {
        match mem::take(&mut self.gesture) {
            GestureState::Idle => Vec::new(),
            GestureState::DraggingElement { id, origin, .. } => {
                if let Some(element) = self.floors.active_mut().get_mut(&id) {
                    element.set_position(origin);
                }
                vec![Action::RenderNeeded]
            }
            GestureState::Panning { .. } | GestureState::Marqueeing { .. } | GestureState::DrawingWall { .. } => {
                vec![Action::RenderNeeded]
            }
        }
    }

    // --- Viewport commands ---

    pub fn zoom_in(&mut self) -> Vec<Action> {
        self.viewport.zoom_by(self.config.zoom_step);
        vec![Action::ViewportChanged, Action::RenderNeeded]
    }

    pub fn zoom_out(&mut self) -> Vec<Action> {
        self.viewport.zoom_by(-self.config.zoom_step);
        vec![Action::ViewportChanged, Action::RenderNeeded]
    }

    /// Fit the plan's stage into a viewport of the given pixel size.
    pub fn fit_to_stage(&mut self, viewport: Size) -> Vec<Action> {
        let stage = self.floors.plan().stage;
        let content = Size::new(stage.width, stage.height);
        if self.viewport.fit_to_bounds(content, viewport, self.config.fit_margin) {
            vec![Action::ViewportChanged, Action::RenderNeeded]
        } else {
            Vec::new()
        }
    }

    // --- Element commands ---

    /// Create an element at a scene anchor on the active floor and select it.
    pub fn place_element(&mut self, what: Placeable, scene_anchor: Point) -> Vec<Action> {
        let element = self.factory().create(what, scene_anchor);
        self.insert_and_select(element)
    }

    fn insert_and_select(&mut self, element: Element) -> Vec<Action> {
        debug!(id = %element.id, x = element.x, y = element.y, "created element");
        self.selection.select(Some(element.id.clone()), false);
        self.floors.active_mut().push(element.clone());
        vec![Action::ElementCreated(element), Action::SelectionChanged, Action::RenderNeeded]
    }

    /// Click-select by id, as a properties list or the hit test would.
    pub fn select_element(&mut self, id: Option<ElementId>, additive: bool) -> Vec<Action> {
        self.selection.select(id, additive);
        vec![Action::SelectionChanged, Action::RenderNeeded]
    }

    /// Replace the selection with a scene-space marquee.
    pub fn select_in_rect(&mut self, rect: &Rect) -> Vec<Action> {
        let mut actions = self.cancel_gesture();
        self.selection.clear();
        self.selection.select_marquee(rect, &self.floors.active().elements, self.config.marquee_threshold);
        actions.extend([Action::SelectionChanged, Action::RenderNeeded]);
        actions
    }

    /// Snap and store a drop position.
    ///
    /// # Errors
    ///
    /// [`EditError::UnknownElement`] when the id is not on the active floor.
    pub fn move_element(&mut self, id: &ElementId, raw: Point) -> Result<Vec<Action>, EditError> {
        let committer = self.committer();
        let element = self.active_element_mut(id)?;
        committer.commit_move(element, raw);
        Ok(vec![Action::ElementUpdated(element.clone()), Action::RenderNeeded])
    }

    /// Fold a finished resize/rotate gesture into the element.
    ///
    /// # Errors
    ///
    /// [`EditError::UnknownElement`] or [`EditError::GroupResize`].
    pub fn commit_transform(&mut self, id: &ElementId, node: &mut NodeTransform) -> Result<Vec<Action>, EditError> {
        let committer = self.committer();
        let element = self.active_element_mut(id)?;
        committer.commit_resize(element, node)?;
        Ok(vec![Action::ElementUpdated(element.clone()), Action::RenderNeeded])
    }

    /// Store a rotation gesture's final angle.
    ///
    /// # Errors
    ///
    /// [`EditError::UnknownElement`] when the id is not on the active floor.
    pub fn rotate_element(&mut self, id: &ElementId, degrees: f64) -> Result<Vec<Action>, EditError> {
        let committer = self.committer();
        let element = self.active_element_mut(id)?;
        committer.commit_rotate(element, degrees);
        Ok(vec![Action::ElementUpdated(element.clone()), Action::RenderNeeded])
    }

    fn active_element_mut(&mut self, id: &ElementId) -> Result<&mut Element, EditError> {
        self.floors
            .active_mut()
            .get_mut(id)
            .ok_or_else(|| EditError::UnknownElement(id.clone()))
    }

    /// Delete one element; see [`grouping::delete_element`] for cascading.
    ///
    /// # Errors
    ///
    /// [`EditError::UnknownElement`] when the id is not on the active floor.
    pub fn delete_element(&mut self, id: &ElementId) -> Result<Vec<Action>, EditError> {
        let outcome = grouping::delete_element(self.floors.active_mut(), id)?;
        let floor = self.floors.active();
        self.selection.retain(|s| floor.contains(s));
        let mut actions = self.outcome_actions(outcome);
        actions.extend([Action::SelectionChanged, Action::RenderNeeded]);
        Ok(actions)
    }

    /// Delete every selected element.
    ///
    /// # Errors
    ///
    /// Never in practice: ids that an earlier deletion already removed are
    /// skipped.
    pub fn delete_selected(&mut self) -> Result<Vec<Action>, EditError> {
        let ids = self.selection.ids().to_vec();
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let mut actions = Vec::new();
        for id in ids {
            if !self.floors.active().contains(&id) {
                continue;
            }
            let outcome = grouping::delete_element(self.floors.active_mut(), &id)?;
            actions.extend(self.outcome_actions(outcome));
        }
        self.selection.clear();
        actions.extend([Action::SelectionChanged, Action::RenderNeeded]);
        Ok(actions)
    }

    fn outcome_actions(&self, outcome: DeleteOutcome) -> Vec<Action> {
        let floor = self.floors.active();
        let mut actions: Vec<Action> =
            outcome.deleted.into_iter().map(|id| Action::ElementDeleted { id }).collect();
        actions.extend(outcome.updated.iter().filter_map(|id| floor.get(id)).cloned().map(Action::ElementUpdated));
        actions
    }

    /// Group the current selection and select the new group.
    ///
    /// # Errors
    ///
    /// Any rejection from [`grouping::group`]; the selection is unchanged.
    pub fn group_selection(&mut self) -> Result<Vec<Action>, EditError> {
        let ids = self.selection.ids().to_vec();
        let group_id = grouping::group(self.floors.active_mut(), &ids)?;
        self.selection.select(Some(group_id.clone()), false);

        let floor = self.floors.active();
        let mut actions = Vec::with_capacity(ids.len() + 3);
        if let Some(group) = floor.get(&group_id) {
            actions.push(Action::ElementCreated(group.clone()));
        }
        actions.extend(ids.iter().filter_map(|id| floor.get(id)).cloned().map(Action::ElementUpdated));
        actions.extend([Action::SelectionChanged, Action::RenderNeeded]);
        Ok(actions)
    }

    /// Ungroup a group and clear the selection.
    ///
    /// # Errors
    ///
    /// [`EditError::UnknownElement`] or [`EditError::NotAGroup`].
    pub fn ungroup(&mut self, group_id: &ElementId) -> Result<Vec<Action>, EditError> {
        let restored = grouping::ungroup(self.floors.active_mut(), group_id)?;
        self.selection.clear();

        let floor = self.floors.active();
        let mut actions = vec![Action::ElementDeleted { id: group_id.clone() }];
        actions.extend(restored.iter().filter_map(|id| floor.get(id)).cloned().map(Action::ElementUpdated));
        actions.extend([Action::SelectionChanged, Action::RenderNeeded]);
        Ok(actions)
    }

    /// Ungroup the focused element. Nothing happens when nothing is focused.
    ///
    /// # Errors
    ///
    /// [`EditError::NotAGroup`] when the focused element is not a group.
    pub fn ungroup_selection(&mut self) -> Result<Vec<Action>, EditError> {
        match self.selection.selected_id.clone() {
            Some(id) => self.ungroup(&id),
            None => Ok(Vec::new()),
        }
    }

    // --- Floors ---

    /// Actions for a new active floor. The caller cancels any gesture before
    /// the switch, while the dragged element is still on the active floor.
    fn floor_changed(&mut self, mut actions: Vec<Action>) -> Vec<Action> {
        self.selection.clear();
        actions.extend([
            Action::FloorSwitched { id: self.floors.active_id().clone() },
            Action::SelectionChanged,
            Action::RenderNeeded,
        ]);
        actions
    }

    /// Add an empty floor and switch to it.
    pub fn add_floor(&mut self, name: &str) -> (FloorId, Vec<Action>) {
        let cancelled = self.cancel_gesture();
        let id = self.floors.add_floor(name);
        (id, self.floor_changed(cancelled))
    }

    /// # Errors
    ///
    /// [`EditError::UnknownFloor`].
    pub fn switch_floor(&mut self, id: &FloorId) -> Result<Vec<Action>, EditError> {
        if self.floors.plan().floor(id).is_none() {
            return Err(EditError::UnknownFloor(id.clone()));
        }
        let cancelled = self.cancel_gesture();
        self.floors.switch_floor(id)?;
        Ok(self.floor_changed(cancelled))
    }

    /// # Errors
    ///
    /// [`EditError::LastFloor`] or [`EditError::UnknownFloor`].
    pub fn delete_floor(&mut self, id: &FloorId) -> Result<Vec<Action>, EditError> {
        if self.floors.active_id() != id {
            self.floors.delete_floor(id)?;
            return Ok(Vec::new());
        }
        if self.floors.floors().len() == 1 {
            return Err(EditError::LastFloor);
        }
        let cancelled = self.cancel_gesture();
        self.floors.delete_floor(id)?;
        Ok(self.floor_changed(cancelled))
    }

    /// # Errors
    ///
    /// [`EditError::EmptyFloorName`] or [`EditError::UnknownFloor`].
    pub fn rename_floor(&mut self, id: &FloorId, name: &str) -> Result<(), EditError> {
        self.floors.rename_floor(id, name)
    }
}
