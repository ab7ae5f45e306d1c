#[cfg(test)]
#[path = "viewport_test.rs"]
mod viewport_test;

use crate::geometry::{Point, Size};
use crate::plan::Stage;

/// `f64::clamp` without its panic on inverted bounds: `max_zoom` wins.
fn clamp_zoom(scale: f64, min_zoom: f64, max_zoom: f64) -> f64 {
    scale.max(min_zoom).min(max_zoom)
}

/// Pan/zoom state of the editor canvas.
///
/// `position` is the pan offset in device pixels. `scale` is the zoom factor
/// (1.0 = no zoom) and always stays within `[min_zoom, max_zoom]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub scale: f64,
    pub position: Point,
    pub min_zoom: f64,
    pub max_zoom: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(crate::consts::MIN_ZOOM, crate::consts::MAX_ZOOM)
    }
}

impl Viewport {
    /// Identity viewport with the given zoom bounds.
    #[must_use]
    pub fn new(min_zoom: f64, max_zoom: f64) -> Self {
        Self { scale: clamp_zoom(1.0, min_zoom, max_zoom), position: Point::default(), min_zoom, max_zoom }
    }

    /// Restore the last-used view stored on a plan's stage.
    #[must_use]
    pub fn from_stage(stage: &Stage, min_zoom: f64, max_zoom: f64) -> Self {
        Self { scale: clamp_zoom(stage.scale, min_zoom, max_zoom), position: stage.offset, min_zoom, max_zoom }
    }

    /// Write the current scale and offset back onto a stage.
    pub fn store_into(&self, stage: &mut Stage) {
        stage.scale = self.scale;
        stage.offset = self.position;
    }

    fn clamp(&self, scale: f64) -> f64 {
        clamp_zoom(scale, self.min_zoom, self.max_zoom)
    }

    /// Convert a pointer position (device pixels) to scene coordinates.
    #[must_use]
    pub fn screen_to_scene(&self, pointer: Point) -> Point {
        Point {
            x: (pointer.x - self.position.x) / self.scale,
            y: (pointer.y - self.position.y) / self.scale,
        }
    }

    /// Convert a scene point to device pixels.
    #[must_use]
    pub fn scene_to_screen(&self, scene: Point) -> Point {
        Point {
            x: scene.x * self.scale + self.position.x,
            y: scene.y * self.scale + self.position.y,
        }
    }

    /// Additive zoom used by the discrete +/- controls.
    pub fn zoom_by(&mut self, delta: f64) {
        self.scale = self.clamp(self.scale + delta);
    }

    /// Multiplicative zoom that keeps the scene point under `pointer` fixed.
    pub fn zoom_at_pointer(&mut self, pointer: Point, factor: f64) {
        let anchor = self.screen_to_scene(pointer);
        let scale = self.clamp(self.scale * factor);
        self.scale = scale;
        self.position = Point {
            x: pointer.x - anchor.x * scale,
            y: pointer.y - anchor.y * scale,
        };
    }

    /// Anchor captured at pan start: `initial_pointer - initial_position`.
    #[must_use]
    pub fn pan_anchor(&self, pointer: Point) -> Point {
        pointer.sub(self.position)
    }

    /// Move the view so the anchor captured at pan start follows the pointer.
    pub fn pan(&mut self, pointer: Point, anchor: Point) {
        self.position = pointer.sub(anchor);
    }

    /// Fit `content` (scene units) inside `viewport` (device pixels) with
    /// `margin` pixels on every side, never zooming past 1.0, and center it.
    ///
    /// Returns `false` and leaves the view untouched when either size is
    /// degenerate.
    pub fn fit_to_bounds(&mut self, content: Size, viewport: Size, margin: f64) -> bool {
        if content.width <= 0.0 || content.height <= 0.0 || viewport.width <= 0.0 || viewport.height <= 0.0 {
            return false;
        }
        let avail_w = if viewport.width > 2.0 * margin { viewport.width - 2.0 * margin } else { viewport.width };
        let avail_h = if viewport.height > 2.0 * margin { viewport.height - 2.0 * margin } else { viewport.height };
        let fit = (avail_w / content.width).min(avail_h / content.height).min(1.0);
        let scale = self.clamp(fit);
        self.scale = scale;
        self.position = Point {
            x: (viewport.width - content.width * scale) / 2.0,
            y: (viewport.height - content.height * scale) / 2.0,
        };
        true
    }
}
