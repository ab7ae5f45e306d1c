//! Single, additive and marquee selection.
//!
//! `selected_id` is the last-focused element (what a properties panel
//! shows); `selected_ids` is the full set. Order in the set carries no
//! meaning but is kept stable so group children come out in click order.

#[cfg(test)]
#[path = "selection_test.rs"]
mod selection_test;

use crate::element::{Element, ElementId};
use crate::geometry::{Rect, element_bounds, rects_intersect};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Selection {
    pub selected_id: Option<ElementId>,
    pub selected_ids: Vec<ElementId>,
}

impl Selection {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Click selection.
    ///
    /// Non-additive: replace the set with `{id}`, or clear on `None`.
    /// Additive on a selected id: drop it, focusing the sole survivor if
    /// exactly one remains. Additive on a new id: add and focus it.
    pub fn select(&mut self, id: Option<ElementId>, additive: bool) {
        let Some(id) = id else {
            if !additive {
                self.clear();
            }
            return;
        };
        if !additive {
            self.selected_ids = vec![id.clone()];
            self.selected_id = Some(id);
            return;
        }
        if let Some(pos) = self.selected_ids.iter().position(|s| s == &id) {
            self.selected_ids.remove(pos);
            self.selected_id = match self.selected_ids.as_slice() {
                [only] => Some(only.clone()),
                _ => None,
            };
        } else {
            self.selected_ids.push(id.clone());
            self.selected_id = Some(id);
        }
    }

    pub fn clear(&mut self) {
        self.selected_id = None;
        self.selected_ids.clear();
    }

    #[must_use]
    pub fn is_selected(&self, id: &ElementId) -> bool {
        self.selected_ids.contains(id)
    }

    #[must_use]
    pub fn ids(&self) -> &[ElementId] {
        &self.selected_ids
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.selected_ids.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.selected_ids.len()
    }

    /// Drop ids for which `keep` returns false.
    pub fn retain(&mut self, keep: impl Fn(&ElementId) -> bool) {
        self.selected_ids.retain(|id| keep(id));
        if self.selected_id.as_ref().is_some_and(|id| !keep(id)) {
            self.selected_id = match self.selected_ids.as_slice() {
                [only] => Some(only.clone()),
                _ => None,
            };
        }
    }

    /// Replace the selection with the marquee hits. A marquee below
    /// `threshold` on either axis is a no-op and returns `false`.
    pub fn select_marquee<'a>(
        &mut self,
        rect: &Rect,
        elements: impl IntoIterator<Item = &'a Element>,
        threshold: f64,
    ) -> bool {
        if !is_marquee_drag(rect, threshold) {
            return false;
        }
        self.selected_ids = marquee_hits(rect, elements);
        self.selected_id = self.selected_ids.last().cloned();
        true
    }
}

/// Whether a drag rectangle is large enough to count as a marquee rather
/// than a click.
#[must_use]
pub fn is_marquee_drag(rect: &Rect, threshold: f64) -> bool {
    rect.width >= threshold && rect.height >= threshold
}

/// Ids of every top-level, non-group element whose bounds touch `rect`.
///
/// Groups are only selectable by direct click, and their members carry
/// group-relative coordinates, so both are skipped.
#[must_use]
pub fn marquee_hits<'a>(rect: &Rect, elements: impl IntoIterator<Item = &'a Element>) -> Vec<ElementId> {
    elements
        .into_iter()
        .filter(|e| !e.is_group() && !e.is_grouped())
        .filter(|e| rects_intersect(&element_bounds(e), rect))
        .map(|e| e.id.clone())
        .collect()
}
