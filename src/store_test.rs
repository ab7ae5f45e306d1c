use super::*;
use crate::element::{Dimensions, Element, ElementId, ElementKind};

fn sample_plan() -> FloorPlan {
    let mut plan = FloorPlan::new("Ground floor");
    plan.floors[0].push(Element::new(
        ElementId::new("wall-1"),
        ElementKind::Wall(Dimensions::new(200.0, 20.0)),
        0.0,
        0.0,
        0,
    ));
    plan
}

// =============================================================
// MemoryPlanStore
// =============================================================

#[test]
fn memory_save_then_load() {
    let mut store = MemoryPlanStore::new();
    let plan = sample_plan();
    let id = store.save(&plan).unwrap();
    assert_eq!(store.len(), 1);
    assert_eq!(store.load(&id).unwrap(), plan);
}

#[test]
fn memory_update_overwrites() {
    let mut store = MemoryPlanStore::new();
    let mut plan = sample_plan();
    let id = store.save(&plan).unwrap();
    plan.floors[0].name = "Renamed".into();
    store.update(&id, &plan).unwrap();
    assert_eq!(store.load(&id).unwrap().floors[0].name, "Renamed");
    assert_eq!(store.len(), 1);
}

#[test]
fn memory_load_missing_is_not_found() {
    let store = MemoryPlanStore::new();
    assert!(store.is_empty());
    assert!(matches!(store.load(&PlanId::new("nope")), Err(StoreError::NotFound(_))));
}

#[test]
fn memory_load_rejects_invalid_plan() {
    let mut store = MemoryPlanStore::new();
    let id = PlanId::new("broken");
    store.insert_raw(id.clone(), r#"{ "floors": [] }"#);
    assert!(matches!(store.load(&id), Err(StoreError::Plan(PlanError::NoFloors))));
}

// =============================================================
// FilePlanStore
// =============================================================

#[test]
fn file_save_writes_json_and_loads_back() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = FilePlanStore::new(dir.path().join("plans"));
    let plan = sample_plan();

    let id = store.save(&plan).unwrap();
    let path = dir.path().join("plans").join(format!("{id}.json"));
    assert!(path.exists());
    let raw = std::fs::read_to_string(&path).unwrap();
    assert!(raw.contains("\"currentFloorId\""));

    assert_eq!(store.load(&id).unwrap(), plan);
}

#[test]
fn file_update_replaces_contents() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = FilePlanStore::new(dir.path());
    let mut plan = sample_plan();
    let id = store.save(&plan).unwrap();

    plan.floors[0].elements.clear();
    store.update(&id, &plan).unwrap();
    assert!(store.load(&id).unwrap().floors[0].elements.is_empty());
}

#[test]
fn file_load_missing_is_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let store = FilePlanStore::new(dir.path());
    let id = PlanId::new("missing");
    match store.load(&id) {
        Err(StoreError::NotFound(got)) => assert_eq!(got, id),
        other => panic!("expected NotFound, got {other:?}"),
    }
}

#[test]
fn file_rejects_path_like_ids() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = FilePlanStore::new(dir.path());
    for raw in ["../escape", "a/b", "", "x.json"] {
        let id = PlanId::new(raw);
        assert!(matches!(store.load(&id), Err(StoreError::InvalidId(_))), "{raw:?}");
        assert!(matches!(store.update(&id, &sample_plan()), Err(StoreError::InvalidId(_))), "{raw:?}");
    }
}

#[test]
fn file_load_rejects_corrupt_json() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("bad.json"), "{ not json").unwrap();
    let store = FilePlanStore::new(dir.path());
    assert!(matches!(store.load(&PlanId::new("bad")), Err(StoreError::Plan(PlanError::Json(_)))));
}
