#![allow(clippy::float_cmp)]

use super::*;

const EPSILON: f64 = 1e-9;

fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < EPSILON
}

fn point_approx_eq(a: Point, b: Point) -> bool {
    approx_eq(a.x, b.x) && approx_eq(a.y, b.y)
}

fn viewport(scale: f64, x: f64, y: f64) -> Viewport {
    Viewport { scale, position: Point::new(x, y), min_zoom: 0.5, max_zoom: 3.0 }
}

// =============================================================
// Defaults
// =============================================================

#[test]
fn default_is_identity() {
    let vp = Viewport::default();
    assert_eq!(vp.scale, 1.0);
    assert_eq!(vp.position, Point::new(0.0, 0.0));
    assert_eq!(vp.min_zoom, 0.5);
    assert_eq!(vp.max_zoom, 3.0);
}

#[test]
fn new_clamps_identity_scale_into_bounds() {
    let vp = Viewport::new(1.5, 4.0);
    assert_eq!(vp.scale, 1.5);
}

// =============================================================
// screen_to_scene / scene_to_screen
// =============================================================

#[test]
fn screen_to_scene_with_pan_and_zoom() {
    let vp = viewport(2.0, 20.0, 10.0);
    let scene = vp.screen_to_scene(Point::new(60.0, 50.0));
    assert!(point_approx_eq(scene, Point::new(20.0, 20.0)));
}

#[test]
fn scene_to_screen_inverts_screen_to_scene() {
    let vp = viewport(1.7, -33.0, 12.5);
    let screen = Point::new(123.0, -45.0);
    let back = vp.scene_to_screen(vp.screen_to_scene(screen));
    assert!(point_approx_eq(back, screen));
}

// =============================================================
// zoom_by
// =============================================================

#[test]
fn zoom_by_adds_delta() {
    let mut vp = Viewport::default();
    vp.zoom_by(0.1);
    assert!(approx_eq(vp.scale, 1.1));
    vp.zoom_by(-0.3);
    assert!(approx_eq(vp.scale, 0.8));
}

#[test]
fn zoom_by_clamps_to_bounds() {
    let mut vp = Viewport::default();
    vp.zoom_by(100.0);
    assert_eq!(vp.scale, 3.0);
    vp.zoom_by(-100.0);
    assert_eq!(vp.scale, 0.5);
}

#[test]
fn zoom_stays_clamped_over_any_sequence() {
    let mut vp = Viewport::default();
    let deltas = [0.7, 0.9, 1.3, -0.2, -4.0, 0.05, 2.5, -0.01];
    let factors = [1.1, 3.0, 0.2, 10.0, 0.01, 1.0, 0.9];
    for (i, d) in deltas.iter().enumerate() {
        vp.zoom_by(*d);
        assert!((0.5..=3.0).contains(&vp.scale));
        vp.zoom_at_pointer(Point::new(37.0 * i as f64, 11.0), factors[i % factors.len()]);
        assert!((0.5..=3.0).contains(&vp.scale));
    }
}

// =============================================================
// zoom_at_pointer
// =============================================================

#[test]
fn zoom_at_pointer_keeps_scene_point_under_pointer() {
    let mut vp = viewport(1.0, 40.0, -20.0);
    let pointer = Point::new(300.0, 200.0);
    let before = vp.screen_to_scene(pointer);
    vp.zoom_at_pointer(pointer, 1.5);
    assert!(approx_eq(vp.scale, 1.5));
    let after = vp.screen_to_scene(pointer);
    assert!(point_approx_eq(before, after));
}

#[test]
fn zoom_at_pointer_anchor_holds_when_clamped() {
    let mut vp = viewport(2.8, 0.0, 0.0);
    let pointer = Point::new(512.0, 384.0);
    let before = vp.screen_to_scene(pointer);
    vp.zoom_at_pointer(pointer, 2.0);
    assert_eq!(vp.scale, 3.0);
    assert!(point_approx_eq(before, vp.screen_to_scene(pointer)));
}

#[test]
fn zoom_at_pointer_out_then_in_restores_position() {
    let mut vp = viewport(1.0, 10.0, 10.0);
    let pointer = Point::new(100.0, 100.0);
    vp.zoom_at_pointer(pointer, 0.8);
    vp.zoom_at_pointer(pointer, 1.25);
    assert!(approx_eq(vp.scale, 1.0));
    assert!(point_approx_eq(vp.position, Point::new(10.0, 10.0)));
}

// =============================================================
// pan
// =============================================================

#[test]
fn pan_follows_pointer_from_anchor() {
    let mut vp = viewport(1.0, 50.0, 30.0);
    let anchor = vp.pan_anchor(Point::new(100.0, 100.0));
    assert_eq!(anchor, Point::new(50.0, 70.0));
    vp.pan(Point::new(130.0, 90.0), anchor);
    assert_eq!(vp.position, Point::new(80.0, 20.0));
}

#[test]
fn pan_back_to_start_restores_position() {
    let mut vp = viewport(2.0, -15.0, 5.0);
    let start = Point::new(10.0, 10.0);
    let anchor = vp.pan_anchor(start);
    vp.pan(Point::new(400.0, -30.0), anchor);
    vp.pan(start, anchor);
    assert_eq!(vp.position, Point::new(-15.0, 5.0));
}

// =============================================================
// fit_to_bounds
// =============================================================

#[test]
fn fit_to_bounds_shrinks_large_content_and_centers() {
    let mut vp = Viewport::default();
    assert!(vp.fit_to_bounds(Size::new(1200.0, 800.0), Size::new(680.0, 680.0), 40.0));
    // available 600x600 -> min(0.5, 0.75) = 0.5
    assert!(approx_eq(vp.scale, 0.5));
    assert!(approx_eq(vp.position.x, (680.0 - 600.0) / 2.0));
    assert!(approx_eq(vp.position.y, (680.0 - 400.0) / 2.0));
}

#[test]
fn fit_to_bounds_never_zooms_past_one() {
    let mut vp = viewport(2.0, 0.0, 0.0);
    assert!(vp.fit_to_bounds(Size::new(100.0, 100.0), Size::new(1000.0, 800.0), 40.0));
    assert_eq!(vp.scale, 1.0);
    assert!(approx_eq(vp.position.x, 450.0));
    assert!(approx_eq(vp.position.y, 350.0));
}

#[test]
fn fit_to_bounds_respects_min_zoom() {
    let mut vp = Viewport::default();
    assert!(vp.fit_to_bounds(Size::new(10_000.0, 10_000.0), Size::new(500.0, 500.0), 0.0));
    assert_eq!(vp.scale, 0.5);
}

#[test]
fn fit_to_bounds_rejects_degenerate_sizes() {
    let mut vp = viewport(1.3, 7.0, 8.0);
    let before = vp;
    assert!(!vp.fit_to_bounds(Size::new(100.0, 100.0), Size::new(0.0, 600.0), 40.0));
    assert!(!vp.fit_to_bounds(Size::new(0.0, 100.0), Size::new(800.0, 600.0), 40.0));
    assert_eq!(vp, before);
}

// =============================================================
// Stage round-trip
// =============================================================

#[test]
fn stage_round_trip_keeps_view() {
    let vp = viewport(1.25, -40.0, 60.0);
    let mut stage = Stage::default();
    vp.store_into(&mut stage);
    let restored = Viewport::from_stage(&stage, 0.5, 3.0);
    assert_eq!(restored, vp);
}

#[test]
fn from_stage_clamps_out_of_range_scale() {
    let stage = Stage { scale: 9.0, ..Stage::default() };
    assert_eq!(Viewport::from_stage(&stage, 0.5, 3.0).scale, 3.0);
}

#[test]
fn inverted_bounds_settle_on_max_zoom() {
    let stage = Stage { scale: 1.0, ..Stage::default() };
    assert_eq!(Viewport::from_stage(&stage, 2.0, 0.5).scale, 0.5);
    let mut vp = Viewport::new(2.0, 0.5);
    assert_eq!(vp.scale, 0.5);
    vp.zoom_by(1.0);
    assert_eq!(vp.scale, 0.5);
}
