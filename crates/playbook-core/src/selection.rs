//! Selection set and rubber-band selection geometry.

use crate::geometry::{rect_contains, span_rect};
use crate::model::{Board, ElementId};
use kurbo::{Point, Rect};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Which end of a line-like drawing a handle controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Endpoint {
    Start,
    End,
}

/// Set of selected item and drawing ids.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    ids: HashSet<ElementId>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, id: ElementId) -> bool {
        self.ids.contains(&id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn insert(&mut self, id: ElementId) {
        self.ids.insert(id);
    }

    pub fn remove(&mut self, id: ElementId) {
        self.ids.remove(&id);
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }

    /// Replace the whole selection.
    pub fn replace(&mut self, ids: impl IntoIterator<Item = ElementId>) {
        self.ids = ids.into_iter().collect();
    }

    pub fn iter(&self) -> impl Iterator<Item = ElementId> + '_ {
        self.ids.iter().copied()
    }

    /// Selected ids as a vector, for handing to commands.
    pub fn ids(&self) -> Vec<ElementId> {
        self.ids.iter().copied().collect()
    }

    /// Drop ids that no longer exist on the board.
    pub fn retain_existing(&mut self, board: &Board) {
        self.ids.retain(|id| board.contains(*id));
    }
}

/// Ids of everything inside the normalized rectangle spanned by `a` and `b`.
///
/// Items count when their position is inside; drawings count when any of
/// their points is. Boundaries are inclusive.
pub fn ids_in_rect(board: &Board, a: Point, b: Point) -> Vec<ElementId> {
    let rect = span_rect(a, b);
    let items = board
        .items
        .iter()
        .filter(|item| rect_contains(rect, item.position))
        .map(|item| item.id);
    let drawings = board
        .drawings
        .iter()
        .filter(|d| d.points.iter().any(|p| rect_contains(rect, *p)))
        .map(|d| d.id);
    items.chain(drawings).collect()
}

/// Normalized bounding box over every point of the selected objects.
pub fn selection_bounds(board: &Board, selection: &Selection) -> Option<Rect> {
    let item_points = board
        .items
        .iter()
        .filter(|i| selection.contains(i.id))
        .map(|i| i.position);
    let drawing_points = board
        .drawings
        .iter()
        .filter(|d| selection.contains(d.id))
        .flat_map(|d| d.points.iter().copied());

    item_points
        .chain(drawing_points)
        .map(|p| Rect::from_points(p, p))
        .reduce(|acc, r| acc.union(r))
}
