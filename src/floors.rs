#[cfg(test)]
#[path = "floors_test.rs"]
mod floors_test;

use tracing::info;

use crate::error::EditError;
use crate::plan::{Floor, FloorId, FloorPlan};

/// Owns the plan and tracks which floor is being edited.
///
/// Elements are always edited in place inside the active `Floor`, so there
/// is no separate working copy that could be lost on a floor switch.
#[derive(Debug, Clone)]
pub struct FloorManager {
    plan: FloorPlan,
    active: usize,
}

impl FloorManager {
    /// Take ownership of a validated plan.
    #[must_use]
    pub fn new(plan: FloorPlan) -> Self {
        let active = plan.floors.iter().position(|f| f.id == plan.current_floor_id).unwrap_or(0);
        Self { plan, active }
    }

    #[must_use]
    pub fn plan(&self) -> &FloorPlan {
        &self.plan
    }

    #[must_use]
    pub fn into_plan(self) -> FloorPlan {
        self.plan
    }

    #[must_use]
    pub fn floors(&self) -> &[Floor] {
        &self.plan.floors
    }

    #[must_use]
    pub fn active(&self) -> &Floor {
        &self.plan.floors[self.active]
    }

    pub fn active_mut(&mut self) -> &mut Floor {
        &mut self.plan.floors[self.active]
    }

    #[must_use]
    pub fn active_id(&self) -> &FloorId {
        &self.plan.current_floor_id
    }

    fn activate(&mut self, idx: usize) {
        self.active = idx;
        self.plan.current_floor_id = self.plan.floors[idx].id.clone();
    }

    /// Append an empty floor one level above the highest and make it active.
    pub fn add_floor(&mut self, name: &str) -> FloorId {
        let level = self.plan.floors.iter().map(|f| f.level).max().map_or(0, |l| l + 1);
        let floor = Floor::new(name.trim(), level);
        let id = floor.id.clone();
        self.plan.floors.push(floor);
        self.activate(self.plan.floors.len() - 1);
        info!(floor = %id, level, "added floor");
        id
    }

    /// Make `id` the active floor.
    ///
    /// # Errors
    ///
    /// [`EditError::UnknownFloor`] when no floor has that id.
    pub fn switch_floor(&mut self, id: &FloorId) -> Result<(), EditError> {
        let idx = self.index_of(id)?;
        self.activate(idx);
        info!(floor = %id, "switched floor");
        Ok(())
    }

    /// Remove a floor. When it was active, the first remaining floor takes
    /// over.
    ///
    /// # Errors
    ///
    /// [`EditError::LastFloor`] when it is the only floor,
    /// [`EditError::UnknownFloor`] when no floor has that id.
    pub fn delete_floor(&mut self, id: &FloorId) -> Result<(), EditError> {
        let idx = self.index_of(id)?;
        if self.plan.floors.len() == 1 {
            return Err(EditError::LastFloor);
        }
        let was_active = idx == self.active;
        self.plan.floors.remove(idx);
        if was_active {
            self.activate(0);
        } else if idx < self.active {
            self.active -= 1;
        }
        info!(floor = %id, active = %self.plan.current_floor_id, "deleted floor");
        Ok(())
    }

    /// Rename a floor; the name is stored trimmed.
    ///
    /// # Errors
    ///
    /// [`EditError::EmptyFloorName`] for a blank name,
    /// [`EditError::UnknownFloor`] when no floor has that id.
    pub fn rename_floor(&mut self, id: &FloorId, name: &str) -> Result<(), EditError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(EditError::EmptyFloorName);
        }
        let idx = self.index_of(id)?;
        self.plan.floors[idx].name = name.to_owned();
        Ok(())
    }

    fn index_of(&self, id: &FloorId) -> Result<usize, EditError> {
        self.plan
            .floors
            .iter()
            .position(|f| &f.id == id)
            .ok_or_else(|| EditError::UnknownFloor(id.clone()))
    }
}
