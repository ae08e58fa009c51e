//! Board document: placed items and drawings.

mod drawing;
mod item;

pub use drawing::{Drawing, DrawingKind};
pub use item::{BoardItem, DEFAULT_SHAPE_SIZE, ItemKind, PlayerData, ShapeData, Team};

use crate::geometry::{clamp_unit, in_unit};
use log::warn;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use uuid::Uuid;

/// Unique identifier of an item or a drawing.
pub type ElementId = Uuid;

/// Board loading errors.
#[derive(Debug, Error)]
pub enum BoardError {
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("Invalid board layout: {0}")]
    Layout(String),
}

/// The full state of a tactical board.
///
/// Items render above drawings. Drawings render in list order, later ones on
/// top. Hosts own the board; the surface only ever hands back updated copies.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Board {
    #[serde(default)]
    pub items: Vec<BoardItem>,
    #[serde(default)]
    pub drawings: Vec<Drawing>,
}

/// What [`Board::sanitize`] had to change.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SanitizeReport {
    pub dropped_items: usize,
    pub dropped_drawings: usize,
    /// Items and drawings that had coordinates pulled back into the unit square.
    pub clamped: usize,
}

impl SanitizeReport {
    pub fn is_clean(&self) -> bool {
        self.dropped_items == 0 && self.dropped_drawings == 0 && self.clamped == 0
    }
}

impl Board {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty() && self.drawings.is_empty()
    }

    pub fn item(&self, id: ElementId) -> Option<&BoardItem> {
        self.items.iter().find(|i| i.id == id)
    }

    pub fn item_mut(&mut self, id: ElementId) -> Option<&mut BoardItem> {
        self.items.iter_mut().find(|i| i.id == id)
    }

    pub fn drawing(&self, id: ElementId) -> Option<&Drawing> {
        self.drawings.iter().find(|d| d.id == id)
    }

    pub fn drawing_mut(&mut self, id: ElementId) -> Option<&mut Drawing> {
        self.drawings.iter_mut().find(|d| d.id == id)
    }

    /// Whether an item or drawing with this id exists.
    pub fn contains(&self, id: ElementId) -> bool {
        self.item(id).is_some() || self.drawing(id).is_some()
    }

    /// Iterate over every element id on the board.
    pub fn ids(&self) -> impl Iterator<Item = ElementId> + '_ {
        self.items.iter().map(|i| i.id).chain(self.drawings.iter().map(|d| d.id))
    }

    /// Serialize the board to JSON.
    pub fn to_json(&self) -> Result<String, BoardError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Deserialize a board from JSON. Any malformed entry fails the whole load.
    pub fn from_json(json: &str) -> Result<Self, BoardError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a board, skipping entries that fail to parse and sanitizing the rest.
    ///
    /// Only a document that is not a JSON object at all is an error.
    pub fn from_json_lenient(json: &str) -> Result<(Self, SanitizeReport), BoardError> {
        let value: Value = serde_json::from_str(json)?;
        let Value::Object(root) = value else {
            return Err(BoardError::Layout("expected a JSON object".to_string()));
        };

        let (items, bad_items) = parse_entries::<BoardItem>(root.get("items"), "item");
        let (drawings, bad_drawings) = parse_entries::<Drawing>(root.get("drawings"), "drawing");

        let (board, mut report) = Board { items, drawings }.sanitize();
        report.dropped_items += bad_items;
        report.dropped_drawings += bad_drawings;
        Ok((board, report))
    }

    /// Return a copy that satisfies every board invariant.
    ///
    /// Items with non-finite numbers and drawings that cannot render are
    /// dropped. Positions are clamped to the unit square, rotation is folded
    /// into `0..360` and two-point drawings are collapsed to their endpoints.
    pub fn sanitize(&self) -> (Self, SanitizeReport) {
        let mut report = SanitizeReport::default();

        let mut items = Vec::with_capacity(self.items.len());
        for item in &self.items {
            let mut item = item.clone();
            if !item.scale.is_finite() || item.scale <= 0.0 {
                item.scale = 1.0;
            }
            if !item.is_well_formed() {
                warn!("Dropping item {} with non-finite geometry", item.id);
                report.dropped_items += 1;
                continue;
            }
            if !item.in_bounds() {
                item.position = clamp_unit(item.position);
                report.clamped += 1;
            }
            item.rotation = item.rotation.rem_euclid(360.0);
            items.push(item);
        }

        let mut drawings = Vec::with_capacity(self.drawings.len());
        for drawing in &self.drawings {
            if !drawing.is_renderable() {
                warn!("Dropping drawing {} ({:?}): not renderable", drawing.id, drawing.kind);
                report.dropped_drawings += 1;
                continue;
            }
            let mut drawing = drawing.clone();
            drawing.normalize_endpoints();
            if drawing.points.iter().any(|p| !in_unit(*p)) {
                drawing.points.iter_mut().for_each(|p| *p = clamp_unit(*p));
                report.clamped += 1;
            }
            drawings.push(drawing);
        }

        (Board { items, drawings }, report)
    }
}

fn parse_entries<T: DeserializeOwned>(value: Option<&Value>, what: &str) -> (Vec<T>, usize) {
    let Some(value) = value else {
        return (Vec::new(), 0);
    };
    let Some(entries) = value.as_array() else {
        warn!("Ignoring {what} list: not an array");
        return (Vec::new(), 0);
    };

    let mut parsed = Vec::with_capacity(entries.len());
    let mut skipped = 0;
    for (index, entry) in entries.iter().enumerate() {
        match serde_json::from_value(entry.clone()) {
            Ok(v) => parsed.push(v),
            Err(e) => {
                warn!("Skipping {what} #{index}: {e}");
                skipped += 1;
            }
        }
    }
    (parsed, skipped)
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::Point;

    fn cone_at(x: f64, y: f64) -> BoardItem {
        BoardItem::shape(
            "cone",
            Point::new(x, y),
            ShapeData {
                icon: Some("cone".into()),
                image_url: None,
                color: Some("#f97316".into()),
                base_size: DEFAULT_SHAPE_SIZE,
            },
        )
    }

    #[test]
    fn test_lookup() {
        let mut board = Board::new();
        let item = cone_at(0.5, 0.5);
        let id = item.id;
        board.items.push(item);
        assert!(board.contains(id));
        assert!(board.item(id).is_some());
        assert!(board.drawing(id).is_none());
        assert!(!board.contains(Uuid::new_v4()));
    }

    #[test]
    fn test_json_roundtrip() {
        let mut board = Board::new();
        board.items.push(cone_at(0.2, 0.8));
        board.drawings.push(Drawing::segment(
            DrawingKind::Arrow,
            Point::new(0.1, 0.1),
            Point::new(0.4, 0.3),
            "#ffffff",
            3.0,
        ));
        let json = board.to_json().unwrap();
        assert_eq!(Board::from_json(&json).unwrap(), board);
    }

    #[test]
    fn test_sanitize_clamps_and_drops() {
        let mut board = Board::new();
        let mut outside = cone_at(0.5, 0.5);
        outside.position = Point::new(1.5, -0.25);
        outside.rotation = -90.0;
        board.items.push(outside);
        let mut broken = cone_at(0.5, 0.5);
        broken.position.x = f64::NAN;
        board.items.push(broken);
        board.drawings.push(Drawing::new(DrawingKind::Line, Point::new(0.1, 0.1), "#fff", 3.0));

        let (clean, report) = board.sanitize();
        assert_eq!(clean.items.len(), 1);
        assert_eq!(clean.items[0].position, Point::new(1.0, 0.0));
        assert_eq!(clean.items[0].rotation, 270.0);
        assert!(clean.drawings.is_empty());
        assert_eq!(report.dropped_items, 1);
        assert_eq!(report.dropped_drawings, 1);
        assert_eq!(report.clamped, 1);
    }

    #[test]
    fn test_sanitize_collapses_two_point_drawings() {
        let mut board = Board::new();
        let mut arrow = Drawing::segment(DrawingKind::Arrow, Point::new(0.1, 0.1), Point::new(0.2, 0.2), "#fff", 3.0);
        arrow.points.push(Point::new(0.6, 0.4));
        board.drawings.push(arrow);
        let mut pencil = Drawing::new(DrawingKind::Pencil, Point::new(0.1, 0.1), "#fff", 3.0);
        pencil.points.extend([Point::new(0.2, 0.2), Point::new(0.3, 0.1)]);
        board.drawings.push(pencil);

        let (clean, report) = board.sanitize();
        assert_eq!(clean.drawings[0].points, vec![Point::new(0.1, 0.1), Point::new(0.6, 0.4)]);
        assert_eq!(clean.drawings[1].points.len(), 3);
        assert_eq!(report.clamped, 0);
    }

    #[test]
    fn test_lenient_load_skips_bad_entries() {
        let json = r##"{
            "items": [
                { "id": "not-a-uuid", "type": "shape", "data": {}, "elementId": "x", "position": { "x": 0, "y": 0 } }
            ],
            "drawings": [
                {
                    "id": "b1c7a0c4-58de-4c0e-8f7a-5a3f0d0b3c21",
                    "type": "line",
                    "points": [{ "x": 0.1, "y": 0.1 }, { "x": 0.9, "y": 0.9 }],
                    "color": "#fff",
                    "strokeWidth": 3
                },
                { "type": "hexagon" }
            ]
        }"##;
        let (board, report) = Board::from_json_lenient(json).unwrap();
        assert!(board.items.is_empty());
        assert_eq!(board.drawings.len(), 1);
        assert_eq!(report.dropped_items, 1);
        assert_eq!(report.dropped_drawings, 1);
    }

    #[test]
    fn test_lenient_load_rejects_non_object() {
        assert!(matches!(Board::from_json_lenient("[]"), Err(BoardError::Layout(_))));
        assert!(Board::from_json_lenient("{").is_err());
    }
}
