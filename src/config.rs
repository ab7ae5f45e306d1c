//! Editor tunables, with optional overrides from the environment.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use crate::consts;

/// Default sizes, capacities and stacking tiers for new elements.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SizeDefaults {
    pub table_radius: f64,
    pub square_side: f64,
    pub rectangle_width: f64,
    pub rectangle_height: f64,
    pub oval_width: f64,
    pub oval_height: f64,
    pub wall_length: f64,
    pub wall_thickness: f64,
    pub door_width: f64,
    pub window_width: f64,
    pub round_capacity: u32,
    pub square_capacity: u32,
    pub rectangle_capacity: u32,
    pub oval_capacity: u32,
    pub wall_z: i64,
    pub opening_z: i64,
    pub table_z: i64,
}

impl Default for SizeDefaults {
    fn default() -> Self {
        Self {
            table_radius: consts::TABLE_RADIUS,
            square_side: consts::TABLE_SQUARE_SIDE,
            rectangle_width: consts::TABLE_RECT_WIDTH,
            rectangle_height: consts::TABLE_RECT_HEIGHT,
            oval_width: consts::TABLE_OVAL_WIDTH,
            oval_height: consts::TABLE_OVAL_HEIGHT,
            wall_length: consts::WALL_LENGTH,
            wall_thickness: consts::WALL_THICKNESS,
            door_width: consts::DOOR_WIDTH,
            window_width: consts::WINDOW_WIDTH,
            round_capacity: 4,
            square_capacity: 4,
            rectangle_capacity: 6,
            oval_capacity: 8,
            wall_z: consts::Z_WALL,
            opening_z: consts::Z_OPENING,
            table_z: consts::Z_TABLE,
        }
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("{var}: cannot parse {value:?}")]
    Parse { var: &'static str, value: String },
    #[error("{var} must be positive, got {value}")]
    NotPositive { var: &'static str, value: f64 },
    #[error("zoom bounds inverted: min {min} > max {max}")]
    InvertedZoom { min: f64, max: f64 },
}

/// Every tunable the editor reads at runtime.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EditorConfig {
    pub grid_pitch: f64,
    pub snap_enabled: bool,
    pub min_zoom: f64,
    pub max_zoom: f64,
    pub zoom_step: f64,
    pub wheel_zoom_factor: f64,
    pub marquee_threshold: f64,
    pub min_element_size: f64,
    pub fit_margin: f64,
    pub sizes: SizeDefaults,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            grid_pitch: consts::GRID_PITCH,
            snap_enabled: true,
            min_zoom: consts::MIN_ZOOM,
            max_zoom: consts::MAX_ZOOM,
            zoom_step: consts::ZOOM_STEP,
            wheel_zoom_factor: consts::WHEEL_ZOOM_FACTOR,
            marquee_threshold: consts::MARQUEE_THRESHOLD,
            min_element_size: consts::MIN_ELEMENT_SIZE,
            fit_margin: consts::FIT_MARGIN_PX,
            sizes: SizeDefaults::default(),
        }
    }
}

impl EditorConfig {
    /// Defaults overlaid with environment variables.
    ///
    /// Optional:
    /// - `FLOORPLAN_GRID_PITCH`: default 20
    /// - `FLOORPLAN_SNAP`: `true`/`false`, default `true`
    /// - `FLOORPLAN_MIN_ZOOM` / `FLOORPLAN_MAX_ZOOM`: default 0.5 / 3.0
    /// - `FLOORPLAN_ZOOM_STEP`: default 0.1
    /// - `FLOORPLAN_WHEEL_FACTOR`: default 1.1
    /// - `FLOORPLAN_MARQUEE_THRESHOLD`: default 5
    /// - `FLOORPLAN_MIN_SIZE`: default 10
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a variable is set but unparsable, or when
    /// the resulting config fails [`EditorConfig::validate`].
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let cfg = Self {
            grid_pitch: env_f64("FLOORPLAN_GRID_PITCH", defaults.grid_pitch)?,
            snap_enabled: env_bool("FLOORPLAN_SNAP", defaults.snap_enabled)?,
            min_zoom: env_f64("FLOORPLAN_MIN_ZOOM", defaults.min_zoom)?,
            max_zoom: env_f64("FLOORPLAN_MAX_ZOOM", defaults.max_zoom)?,
            zoom_step: env_f64("FLOORPLAN_ZOOM_STEP", defaults.zoom_step)?,
            wheel_zoom_factor: env_f64("FLOORPLAN_WHEEL_FACTOR", defaults.wheel_zoom_factor)?,
            marquee_threshold: env_f64("FLOORPLAN_MARQUEE_THRESHOLD", defaults.marquee_threshold)?,
            min_element_size: env_f64("FLOORPLAN_MIN_SIZE", defaults.min_element_size)?,
            ..defaults
        };
        cfg.validate()?;
        Ok(cfg)
    }

    /// Check the invariants the rest of the crate relies on.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] for a non-positive pitch, zoom bound or wheel
    /// factor, or for `min_zoom > max_zoom`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("FLOORPLAN_GRID_PITCH", self.grid_pitch)?;
        positive("FLOORPLAN_MIN_ZOOM", self.min_zoom)?;
        positive("FLOORPLAN_MAX_ZOOM", self.max_zoom)?;
        positive("FLOORPLAN_WHEEL_FACTOR", self.wheel_zoom_factor)?;
        if self.min_zoom > self.max_zoom {
            return Err(ConfigError::InvertedZoom { min: self.min_zoom, max: self.max_zoom });
        }
        Ok(())
    }
}

fn positive(var: &'static str, value: f64) -> Result<(), ConfigError> {
    if value > 0.0 { Ok(()) } else { Err(ConfigError::NotPositive { var, value }) }
}

fn env_f64(var: &'static str, default: f64) -> Result<f64, ConfigError> {
    match std::env::var(var) {
        Ok(raw) => raw
            .trim()
            .parse::<f64>()
            .map_err(|_| ConfigError::Parse { var, value: raw.clone() }),
        Err(_) => Ok(default),
    }
}

fn env_bool(var: &'static str, default: bool) -> Result<bool, ConfigError> {
    match std::env::var(var) {
        Ok(raw) => match raw.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "on" | "yes" => Ok(true),
            "0" | "false" | "off" | "no" => Ok(false),
            _ => Err(ConfigError::Parse { var, value: raw }),
        },
        Err(_) => Ok(default),
    }
}
