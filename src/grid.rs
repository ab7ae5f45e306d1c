#[cfg(test)]
#[path = "grid_test.rs"]
mod grid_test;

use crate::geometry::Point;

/// Quantizes scene coordinates to a square grid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridSnapper {
    /// Grid pitch in scene units. Always positive.
    pub pitch: f64,
}

impl GridSnapper {
    #[must_use]
    pub fn new(pitch: f64) -> Self {
        Self { pitch }
    }

    /// Round `value` to the nearest grid line, or return it untouched when
    /// snapping is off.
    #[must_use]
    pub fn snap(&self, value: f64, enabled: bool) -> f64 {
        if !enabled {
            return value;
        }
        (value / self.pitch).round() * self.pitch
    }

    /// Snap both axes independently.
    #[must_use]
    pub fn snap_point(&self, p: Point, enabled: bool) -> Point {
        Point::new(self.snap(p.x, enabled), self.snap(p.y, enabled))
    }
}

impl Default for GridSnapper {
    fn default() -> Self {
        Self::new(crate::consts::GRID_PITCH)
    }
}
