//! Plan persistence collaborator.
//!
//! The editor never awaits storage: the host snapshots the session and hands
//! the plan to a [`PlanStore`]. Loading always goes through
//! [`FloorPlan::from_json`], so a stored plan that violates the model's
//! invariants is rejected before an editing session is built from it.

#[cfg(test)]
#[path = "store_test.rs"]
mod store_test;

use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::info;
use uuid::Uuid;

use crate::plan::{FloorPlan, PlanError};

/// Durable identifier of a stored plan.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PlanId(String);

impl PlanId {
    #[must_use]
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4().simple().to_string())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PlanId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("plan not found: {0}")]
    NotFound(PlanId),
    #[error("invalid plan id: {0:?}")]
    InvalidId(String),
    #[error("plan storage I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Plan(#[from] PlanError),
}

/// Somewhere plans can be saved to and loaded from.
pub trait PlanStore {
    /// Store a new plan and return its id.
    ///
    /// # Errors
    ///
    /// Storage-specific failures.
    fn save(&mut self, plan: &FloorPlan) -> Result<PlanId, StoreError>;

    /// Overwrite the plan stored under `id`.
    ///
    /// # Errors
    ///
    /// Storage-specific failures.
    fn update(&mut self, id: &PlanId, plan: &FloorPlan) -> Result<(), StoreError>;

    /// Load and validate the plan stored under `id`.
    ///
    /// # Errors
    ///
    /// [`StoreError::NotFound`], or [`StoreError::Plan`] when the stored plan
    /// is malformed.
    fn load(&self, id: &PlanId) -> Result<FloorPlan, StoreError>;
}

/// Plans held as JSON strings in memory, for tests and previews.
#[derive(Debug, Default)]
pub struct MemoryPlanStore {
    plans: HashMap<PlanId, String>,
}

impl MemoryPlanStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store raw JSON as-is, bypassing serialization.
    pub fn insert_raw(&mut self, id: PlanId, json: impl Into<String>) {
        self.plans.insert(id, json.into());
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.plans.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.plans.is_empty()
    }
}

impl PlanStore for MemoryPlanStore {
    fn save(&mut self, plan: &FloorPlan) -> Result<PlanId, StoreError> {
        let id = PlanId::generate();
        self.plans.insert(id.clone(), plan.to_json()?);
        Ok(id)
    }

    fn update(&mut self, id: &PlanId, plan: &FloorPlan) -> Result<(), StoreError> {
        self.plans.insert(id.clone(), plan.to_json()?);
        Ok(())
    }

    fn load(&self, id: &PlanId) -> Result<FloorPlan, StoreError> {
        let raw = self.plans.get(id).ok_or_else(|| StoreError::NotFound(id.clone()))?;
        Ok(FloorPlan::from_json(raw)?)
    }
}

/// One pretty-printed `<id>.json` file per plan in a directory.
#[derive(Debug, Clone)]
pub struct FilePlanStore {
    dir: PathBuf,
}

impl FilePlanStore {
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, id: &PlanId) -> Result<PathBuf, StoreError> {
        let raw = id.as_str();
        let valid = !raw.is_empty() && raw.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !valid {
            return Err(StoreError::InvalidId(raw.to_owned()));
        }
        Ok(self.dir.join(format!("{raw}.json")))
    }

    fn write(&self, id: &PlanId, plan: &FloorPlan) -> Result<(), StoreError> {
        let path = self.path_for(id)?;
        fs::create_dir_all(&self.dir)?;
        fs::write(&path, plan.to_json()?)?;
        info!(plan = %id, path = %path.display(), floors = plan.floors.len(), "saved plan");
        Ok(())
    }
}

impl PlanStore for FilePlanStore {
    fn save(&mut self, plan: &FloorPlan) -> Result<PlanId, StoreError> {
        let id = PlanId::generate();
        self.write(&id, plan)?;
        Ok(id)
    }

    fn update(&mut self, id: &PlanId, plan: &FloorPlan) -> Result<(), StoreError> {
        self.write(id, plan)
    }

    fn load(&self, id: &PlanId) -> Result<FloorPlan, StoreError> {
        let path = self.path_for(id)?;
        let raw = match fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Err(StoreError::NotFound(id.clone())),
            Err(e) => return Err(e.into()),
        };
        Ok(FloorPlan::from_json(&raw)?)
    }
}
