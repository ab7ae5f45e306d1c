//! Reference numeric constants for the editor.
//!
//! These are the defaults behind [`crate::config::EditorConfig`]; code reads
//! the config, not these constants, so a session can be tuned at runtime.

// ── Grid ────────────────────────────────────────────────────────

/// Grid pitch in scene units.
pub const GRID_PITCH: f64 = 20.0;

// ── Viewport ────────────────────────────────────────────────────

/// Smallest allowed viewport scale.
pub const MIN_ZOOM: f64 = 0.5;

/// Largest allowed viewport scale.
pub const MAX_ZOOM: f64 = 3.0;

/// Scale increment for the discrete +/- zoom controls.
pub const ZOOM_STEP: f64 = 0.1;

/// Multiplicative scale change per wheel notch.
pub const WHEEL_ZOOM_FACTOR: f64 = 1.1;

/// Margin in device pixels kept around content by fit-to-bounds.
pub const FIT_MARGIN_PX: f64 = 40.0;

// ── Interaction ─────────────────────────────────────────────────

/// Marquee drags narrower or shorter than this (scene units) count as clicks.
pub const MARQUEE_THRESHOLD: f64 = 5.0;

/// Smallest width, height or radius an element may be resized to.
pub const MIN_ELEMENT_SIZE: f64 = 10.0;

// ── Element defaults ────────────────────────────────────────────

/// Radius of a new circular table.
pub const TABLE_RADIUS: f64 = 30.0;

/// Side of a new square table.
pub const TABLE_SQUARE_SIDE: f64 = 60.0;

/// Width of a new rectangular table.
pub const TABLE_RECT_WIDTH: f64 = 120.0;

/// Height of a new rectangular table.
pub const TABLE_RECT_HEIGHT: f64 = 60.0;

/// Width of a new oval table.
pub const TABLE_OVAL_WIDTH: f64 = 100.0;

/// Height of a new oval table.
pub const TABLE_OVAL_HEIGHT: f64 = 60.0;

/// Length of a new wall.
pub const WALL_LENGTH: f64 = 200.0;

/// Thickness shared by walls, doors and windows.
pub const WALL_THICKNESS: f64 = 20.0;

/// Width of a new door.
pub const DOOR_WIDTH: f64 = 80.0;

/// Width of a new window.
pub const WINDOW_WIDTH: f64 = 100.0;

// ── Stacking tiers ──────────────────────────────────────────────

/// Default z-index for walls.
pub const Z_WALL: i64 = 0;

/// Default z-index for doors and windows.
pub const Z_OPENING: i64 = 1;

/// Default z-index for tables.
pub const Z_TABLE: i64 = 2;

// ── Stage ───────────────────────────────────────────────────────

/// Logical canvas width of a new plan.
pub const STAGE_WIDTH: f64 = 1200.0;

/// Logical canvas height of a new plan.
pub const STAGE_HEIGHT: f64 = 800.0;
