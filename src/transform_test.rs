#![allow(clippy::float_cmp)]

use super::*;
use crate::element::{ElementId, TableShape};

fn committer(snap_enabled: bool) -> TransformCommitter {
    TransformCommitter::new(GridSnapper::new(20.0), snap_enabled, 10.0)
}

fn rect_table(x: f64, y: f64) -> Element {
    Element::new(ElementId::new("t"), ElementKind::table(TableShape::Rectangle, 120.0, 60.0, 0.0), x, y, 2)
}

fn node(x: f64, y: f64, scale_x: f64, scale_y: f64, rotation: f64) -> NodeTransform {
    NodeTransform { x, y, scale_x, scale_y, rotation }
}

// =============================================================
// commit_move
// =============================================================

#[test]
fn move_snaps_position() {
    let mut t = rect_table(0.0, 0.0);
    committer(true).commit_move(&mut t, Point::new(33.0, 47.0));
    assert_eq!((t.x, t.y), (40.0, 40.0));
    assert_eq!(t.kind, ElementKind::table(TableShape::Rectangle, 120.0, 60.0, 0.0));
}

#[test]
fn move_without_snap_keeps_raw() {
    let mut t = rect_table(0.0, 0.0);
    committer(false).commit_move(&mut t, Point::new(33.0, 47.0));
    assert_eq!((t.x, t.y), (33.0, 47.0));
}

// =============================================================
// commit_resize
// =============================================================

#[test]
fn resize_absorbs_scale_into_dimensions() {
    let mut t = rect_table(0.0, 0.0);
    let mut n = node(33.0, 47.0, 1.5, 0.5, 0.0);
    committer(true).commit_resize(&mut t, &mut n).unwrap();
    // 120 * 1.5 = 180; 60 * 0.5 = 30 -> 40
    assert_eq!(t.kind, ElementKind::table(TableShape::Rectangle, 180.0, 40.0, 0.0));
    assert_eq!((t.x, t.y), (40.0, 40.0));
    assert_eq!((n.scale_x, n.scale_y), (1.0, 1.0));
    assert_eq!((n.x, n.y), (40.0, 40.0));
}

#[test]
fn resize_without_snap_keeps_exact_product() {
    let mut t = rect_table(0.0, 0.0);
    let mut n = node(3.0, 4.0, 1.5, 0.55, 0.0);
    committer(false).commit_resize(&mut t, &mut n).unwrap();
    match t.kind {
        ElementKind::Table { footprint: Footprint::Rect(d), .. } => {
            assert!((d.width - 180.0).abs() < 1e-9);
            assert!((d.height - 33.0).abs() < 1e-9);
        }
        other => panic!("unexpected kind {other:?}"),
    }
    assert_eq!((t.x, t.y), (3.0, 4.0));
}

#[test]
fn resize_circle_uses_larger_axis() {
    let mut t = Element::new(ElementId::new("c"), ElementKind::table(TableShape::Circle, 0.0, 0.0, 30.0), 80.0, 80.0, 2);
    let mut n = node(80.0, 80.0, 1.2, 2.0, 0.0);
    committer(true).commit_resize(&mut t, &mut n).unwrap();
    assert_eq!(t.kind, ElementKind::table(TableShape::Circle, 0.0, 0.0, 60.0));
}

#[test]
fn resize_never_goes_below_min_size() {
    let mut w = Element::new(ElementId::new("w"), ElementKind::Wall(Dimensions::new(200.0, 20.0)), 0.0, 0.0, 0);
    let mut n = node(0.0, 0.0, 0.01, 0.1, 0.0);
    committer(true).commit_resize(&mut w, &mut n).unwrap();
    assert_eq!(w.kind, ElementKind::Wall(Dimensions::new(10.0, 10.0)));
}

#[test]
fn resize_normalizes_rotation() {
    let mut t = rect_table(0.0, 0.0);
    let mut n = node(0.0, 0.0, 1.0, 1.0, -30.0);
    committer(true).commit_resize(&mut t, &mut n).unwrap();
    assert_eq!(t.rotation, 330.0);
    assert_eq!(n.rotation, 330.0);
}

#[test]
fn resize_twice_does_not_compound_scale() {
    let mut t = rect_table(0.0, 0.0);
    let c = committer(true);
    let mut n = node(0.0, 0.0, 2.0, 1.0, 0.0);
    c.commit_resize(&mut t, &mut n).unwrap();
    // Node was reset; committing again with the untouched node changes nothing.
    c.commit_resize(&mut t, &mut n).unwrap();
    assert_eq!(t.kind, ElementKind::table(TableShape::Rectangle, 240.0, 60.0, 0.0));
}

#[test]
fn resize_group_is_rejected_untouched() {
    let kind = ElementKind::Group { size: Dimensions::new(15.0, 15.0), children: vec![ElementId::new("a")] };
    let mut g = Element::new(ElementId::new("g"), kind.clone(), 0.0, 0.0, 3);
    let mut n = node(40.0, 40.0, 2.0, 2.0, 45.0);
    let err = committer(true).commit_resize(&mut g, &mut n).unwrap_err();
    assert_eq!(err, EditError::GroupResize(ElementId::new("g")));
    assert_eq!(g.kind, kind);
    assert_eq!((g.x, g.y, g.rotation), (0.0, 0.0, 0.0));
    assert_eq!(n.scale_x, 2.0);
}

// =============================================================
// commit_rotate
// =============================================================

#[test]
fn rotate_wraps_into_range() {
    let mut t = rect_table(0.0, 0.0);
    let c = committer(true);
    c.commit_rotate(&mut t, 450.0);
    assert_eq!(t.rotation, 90.0);
    c.commit_rotate(&mut t, -45.0);
    assert_eq!(t.rotation, 315.0);
}

#[test]
fn node_of_mirrors_element() {
    let mut t = rect_table(12.0, 34.0);
    t.rotation = 90.0;
    assert_eq!(NodeTransform::of(&t), node(12.0, 34.0, 1.0, 1.0, 90.0));
}
