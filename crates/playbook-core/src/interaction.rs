//! Transient gesture state.
//!
//! Exactly one gesture is active at a time. None of this state is part of
//! the board; it lives on the surface and is dropped when a gesture ends.

use crate::geometry::clamp_unit;
use crate::model::{Board, Drawing, ElementId};
use crate::selection::Endpoint;
use kurbo::{Point, Vec2};
use std::collections::HashMap;
use uuid::Uuid;

/// The active gesture.
#[derive(Debug, Clone, Default)]
pub enum Interaction {
    #[default]
    Idle,
    /// Collecting points for a new drawing.
    Drawing(Drawing),
    /// Rubber-band selection between two normalized corners.
    Selecting { start: Point, end: Point },
    Moving(MoveState),
    /// Dragging one endpoint of a line-like drawing.
    Resizing { drawing_id: ElementId, endpoint: Endpoint },
    EditingText(TextDraft),
}

impl Interaction {
    pub fn is_idle(&self) -> bool {
        matches!(self, Interaction::Idle)
    }

    /// Short name for logging.
    pub fn name(&self) -> &'static str {
        match self {
            Interaction::Idle => "idle",
            Interaction::Drawing(_) => "drawing",
            Interaction::Selecting { .. } => "selecting",
            Interaction::Moving(_) => "moving",
            Interaction::Resizing { .. } => "resizing",
            Interaction::EditingText(_) => "editing-text",
        }
    }

    /// The drawing being created, for live preview.
    pub fn preview_drawing(&self) -> Option<&Drawing> {
        match self {
            Interaction::Drawing(d) => Some(d),
            _ => None,
        }
    }

    /// Corners of the rubber band, while selecting.
    pub fn selection_rect(&self) -> Option<(Point, Point)> {
        match self {
            Interaction::Selecting { start, end } => Some((*start, *end)),
            _ => None,
        }
    }

    pub fn text_draft(&self) -> Option<&TextDraft> {
        match self {
            Interaction::EditingText(draft) => Some(draft),
            _ => None,
        }
    }
}

/// A move of one or more objects, computed from their original geometry.
///
/// Positions are always derived from the snapshot and the total delta since
/// the gesture started, so the result does not depend on how many move
/// events arrived in between.
#[derive(Debug, Clone)]
pub struct MoveState {
    /// Normalized pointer position at gesture start.
    pub start: Point,
    /// Latest normalized pointer position.
    pub current: Point,
    /// Original item positions.
    pub items: HashMap<ElementId, Point>,
    /// Original drawing points.
    pub drawings: HashMap<ElementId, Vec<Point>>,
}

impl MoveState {
    /// Snapshot the geometry of `ids` on `board`.
    pub fn capture(board: &Board, start: Point, ids: impl IntoIterator<Item = ElementId>) -> Self {
        let mut items = HashMap::new();
        let mut drawings = HashMap::new();
        for id in ids {
            if let Some(item) = board.item(id) {
                items.insert(id, item.position);
            } else if let Some(drawing) = board.drawing(id) {
                drawings.insert(id, drawing.points.clone());
            }
        }
        Self {
            start,
            current: start,
            items,
            drawings,
        }
    }

    /// Get the drag delta.
    pub fn delta(&self) -> Vec2 {
        self.current - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty() && self.drawings.is_empty()
    }

    /// Place every captured object at its original geometry plus the delta,
    /// clamped to the unit square.
    pub fn apply(&self, board: &Board) -> Board {
        let delta = self.delta();
        let mut next = board.clone();
        for item in next.items.iter_mut() {
            if let Some(origin) = self.items.get(&item.id) {
                item.position = clamp_unit(*origin + delta);
            }
        }
        for drawing in next.drawings.iter_mut() {
            if let Some(origin) = self.drawings.get(&drawing.id) {
                drawing.points = origin.iter().map(|p| clamp_unit(*p + delta)).collect();
            }
        }
        next
    }
}

/// An open text label editor.
#[derive(Debug, Clone, PartialEq)]
pub struct TextDraft {
    /// Id of the label being edited, or the id a new label will get.
    pub id: ElementId,
    pub anchor: Point,
    pub text: String,
    pub color: String,
    pub stroke_width: f64,
    /// Whether committing creates a label rather than updating one.
    pub is_new: bool,
}

impl TextDraft {
    pub fn new_label(anchor: Point, color: impl Into<String>, stroke_width: f64) -> Self {
        Self {
            id: Uuid::new_v4(),
            anchor: clamp_unit(anchor),
            text: String::new(),
            color: color.into(),
            stroke_width,
            is_new: true,
        }
    }

    /// Open an editor on an existing label. Returns `None` for non-text drawings.
    pub fn existing(drawing: &Drawing) -> Option<Self> {
        if drawing.kind != crate::model::DrawingKind::Text {
            return None;
        }
        Some(Self {
            id: drawing.id,
            anchor: drawing.start()?,
            text: drawing.text.clone().unwrap_or_default(),
            color: drawing.color.clone(),
            stroke_width: drawing.stroke_width,
            is_new: false,
        })
    }

    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }

    /// Commit the draft.
    ///
    /// A blank draft discards a new label and deletes an existing one.
    /// Otherwise the label is created, or updated in place keeping its id,
    /// anchor and position in the drawing order.
    pub fn apply(&self, board: &Board) -> Board {
        let mut next = board.clone();
        match (self.is_new, self.is_blank()) {
            (true, true) => {}
            (false, true) => next.drawings.retain(|d| d.id != self.id),
            (true, false) => {
                let mut label = Drawing::label(self.anchor, self.text.clone(), self.color.clone(), self.stroke_width);
                label.id = self.id;
                next.drawings.push(label);
            }
            (false, false) => {
                if let Some(label) = next.drawing_mut(self.id) {
                    label.text = Some(self.text.clone());
                }
            }
        }
        next
    }
}
