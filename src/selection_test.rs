use super::*;
use crate::element::{Dimensions, ElementKind, Placement};

fn id(raw: &str) -> ElementId {
    ElementId::new(raw)
}

fn wall(raw: &str, x: f64, y: f64, w: f64, h: f64) -> Element {
    Element::new(id(raw), ElementKind::Wall(Dimensions::new(w, h)), x, y, 0)
}

fn selection(ids: &[&str], focused: Option<&str>) -> Selection {
    Selection { selected_id: focused.map(id), selected_ids: ids.iter().map(|s| id(s)).collect() }
}

// =============================================================
// select
// =============================================================

#[test]
fn plain_select_replaces_set() {
    let mut s = selection(&["a", "b"], Some("b"));
    s.select(Some(id("c")), false);
    assert_eq!(s, selection(&["c"], Some("c")));
}

#[test]
fn plain_select_none_clears() {
    let mut s = selection(&["a", "b"], Some("b"));
    s.select(None, false);
    assert!(s.is_empty());
    assert_eq!(s.selected_id, None);
}

#[test]
fn additive_select_none_is_noop() {
    let mut s = selection(&["a", "b"], Some("b"));
    s.select(None, true);
    assert_eq!(s, selection(&["a", "b"], Some("b")));
}

#[test]
fn additive_select_adds_and_focuses() {
    let mut s = selection(&["a"], Some("a"));
    s.select(Some(id("b")), true);
    assert_eq!(s, selection(&["a", "b"], Some("b")));
}

#[test]
fn additive_toggle_off_leaves_single_survivor_focused() {
    let mut s = selection(&["a", "b"], Some("b"));
    s.select(Some(id("b")), true);
    assert_eq!(s, selection(&["a"], Some("a")));
}

#[test]
fn additive_toggle_off_with_several_left_clears_focus() {
    let mut s = selection(&["a", "b", "c"], Some("c"));
    s.select(Some(id("a")), true);
    assert_eq!(s, selection(&["b", "c"], None));
}

#[test]
fn additive_toggle_off_last_one_empties() {
    let mut s = selection(&["a"], Some("a"));
    s.select(Some(id("a")), true);
    assert_eq!(s, Selection::new());
}

// =============================================================
// retain
// =============================================================

#[test]
fn retain_drops_focus_when_focused_id_removed() {
    let mut s = selection(&["a", "b", "c"], Some("c"));
    s.retain(|i| i.as_str() != "c");
    assert_eq!(s, selection(&["a", "b"], None));
}

#[test]
fn retain_keeps_focus_when_untouched() {
    let mut s = selection(&["a", "b", "c"], Some("c"));
    s.retain(|i| i.as_str() != "a");
    assert_eq!(s, selection(&["b", "c"], Some("c")));
}

// =============================================================
// Marquee
// =============================================================

#[test]
fn marquee_edge_touch_selects() {
    let elements = [wall("b", 20.0, 20.0, 10.0, 10.0)];
    let hits = marquee_hits(&Rect::new(0.0, 0.0, 20.0, 20.0), &elements);
    assert_eq!(hits, vec![id("b")]);
}

#[test]
fn marquee_selects_exactly_intersecting_elements() {
    let elements = [
        wall("inside", 10.0, 10.0, 5.0, 5.0),
        wall("overlap", 90.0, 90.0, 50.0, 50.0),
        wall("outside", 200.0, 200.0, 10.0, 10.0),
        wall("left", -30.0, 10.0, 20.0, 20.0),
    ];
    let mut s = Selection::new();
    assert!(s.select_marquee(&Rect::new(0.0, 0.0, 100.0, 100.0), &elements, 5.0));
    assert_eq!(s.selected_ids, vec![id("inside"), id("overlap")]);
    assert_eq!(s.selected_id, Some(id("overlap")));
}

#[test]
fn marquee_below_threshold_is_noop() {
    let elements = [wall("a", 0.0, 0.0, 10.0, 10.0)];
    let mut s = selection(&["z"], Some("z"));
    assert!(!s.select_marquee(&Rect::new(0.0, 0.0, 4.0, 100.0), &elements, 5.0));
    assert_eq!(s, selection(&["z"], Some("z")));
}

#[test]
fn marquee_replaces_previous_selection_even_when_empty() {
    let elements = [wall("a", 500.0, 500.0, 10.0, 10.0)];
    let mut s = selection(&["z"], Some("z"));
    assert!(s.select_marquee(&Rect::new(0.0, 0.0, 50.0, 50.0), &elements, 5.0));
    assert!(s.is_empty());
    assert_eq!(s.selected_id, None);
}

#[test]
fn marquee_skips_groups_and_their_members() {
    let mut member = wall("m", 0.0, 0.0, 10.0, 10.0);
    member.placement = Placement::RelativeTo(id("g"));
    let group = Element::new(
        id("g"),
        ElementKind::Group { size: Dimensions::new(10.0, 10.0), children: vec![id("m")] },
        0.0,
        0.0,
        1,
    );
    let loose = wall("w", 5.0, 5.0, 10.0, 10.0);
    let elements = [member, group, loose];
    assert_eq!(marquee_hits(&Rect::new(0.0, 0.0, 50.0, 50.0), &elements), vec![id("w")]);
}

#[test]
fn is_marquee_drag_requires_both_axes() {
    assert!(is_marquee_drag(&Rect::new(0.0, 0.0, 5.0, 5.0), 5.0));
    assert!(!is_marquee_drag(&Rect::new(0.0, 0.0, 50.0, 4.9), 5.0));
}
