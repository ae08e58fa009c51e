//! Board commands.
//!
//! Every command is a pure function from a board to a new board. Commands
//! are total: ids that do not exist, or objects a command does not apply to,
//! are skipped silently.

use crate::geometry::clamp_unit;
use crate::model::{Board, ElementId, ItemKind};
use crate::selection::Endpoint;
use kurbo::{Point, Vec2};
use log::debug;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Offset, on both axes, of a duplicated object.
pub const DUPLICATE_OFFSET: f64 = 0.02;
/// Smallest scale a shape can be resized to.
pub const MIN_SCALE: f64 = 0.2;
/// Largest scale a shape can be resized to.
pub const MAX_SCALE: f64 = 5.0;

/// A board mutation, serializable for scripted replay.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "kebab-case")]
pub enum Command {
    Delete { ids: Vec<ElementId> },
    Duplicate { ids: Vec<ElementId> },
    Recolor { ids: Vec<ElementId>, color: String },
    Resize { id: ElementId, factor: f64 },
    Rotate { id: ElementId },
}

impl Command {
    /// Apply the command to a board.
    pub fn apply(&self, board: &Board) -> Board {
        debug!("Applying {self:?}");
        match self {
            Command::Delete { ids } => delete(board, ids),
            Command::Duplicate { ids } => duplicate(board, ids, DUPLICATE_OFFSET),
            Command::Recolor { ids, color } => recolor(board, ids, color),
            Command::Resize { id, factor } => resize(board, *id, *factor),
            Command::Rotate { id } => rotate(board, *id),
        }
    }

    /// Whether the command would change anything on this board.
    pub fn applies_to(&self, board: &Board) -> bool {
        match self {
            Command::Delete { ids } => ids.iter().any(|id| board.contains(*id)),
            Command::Duplicate { ids } => !duplicate_plan(board, ids).is_empty(),
            Command::Recolor { ids, .. } => ids.iter().any(|id| {
                board.drawing(*id).is_some()
                    || board.item(*id).is_some_and(|item| match &item.kind {
                        ItemKind::Player(_) => true,
                        ItemKind::Shape(shape) => !shape.is_image_backed(),
                    })
            }),
            Command::Resize { id, factor } => {
                factor.is_finite() && *factor > 0.0 && board.item(*id).is_some_and(|i| i.is_shape())
            }
            Command::Rotate { id } => board.item(*id).is_some_and(|i| i.is_shape()),
        }
    }
}

/// Remove matching items and drawings.
pub fn delete(board: &Board, ids: &[ElementId]) -> Board {
    Board {
        items: board.items.iter().filter(|i| !ids.contains(&i.id)).cloned().collect(),
        drawings: board.drawings.iter().filter(|d| !ids.contains(&d.id)).cloned().collect(),
    }
}

/// Set the color of drawings and items. Image-backed shapes keep theirs.
pub fn recolor(board: &Board, ids: &[ElementId], color: &str) -> Board {
    let mut next = board.clone();
    for item in next.items.iter_mut().filter(|i| ids.contains(&i.id)) {
        item.set_color(color);
    }
    for drawing in next.drawings.iter_mut().filter(|d| ids.contains(&d.id)) {
        drawing.color = color.to_string();
    }
    next
}

/// Multiply a shape's scale, clamped to `[MIN_SCALE, MAX_SCALE]`.
pub fn resize(board: &Board, id: ElementId, factor: f64) -> Board {
    let mut next = board.clone();
    if !factor.is_finite() || factor <= 0.0 {
        return next;
    }
    if let Some(item) = next.item_mut(id).filter(|i| i.is_shape()) {
        item.scale = (item.scale * factor).clamp(MIN_SCALE, MAX_SCALE);
    }
    next
}

/// Rotate a shape a quarter turn clockwise.
pub fn rotate(board: &Board, id: ElementId) -> Board {
    let mut next = board.clone();
    if let Some(item) = next.item_mut(id).filter(|i| i.is_shape()) {
        item.rotation = (item.rotation + 90.0).rem_euclid(360.0);
    }
    next
}

/// Pair every duplicable source id with a fresh id.
///
/// Player tokens are unique on the board and never duplicated.
pub fn duplicate_plan(board: &Board, ids: &[ElementId]) -> Vec<(ElementId, ElementId)> {
    ids.iter()
        .filter(|id| board.item(**id).is_some_and(|i| !i.is_player()) || board.drawing(**id).is_some())
        .map(|id| (*id, Uuid::new_v4()))
        .collect()
}

/// Append offset copies according to a plan from [`duplicate_plan`].
pub fn apply_duplicate(board: &Board, plan: &[(ElementId, ElementId)], offset: f64) -> Board {
    let shift = Vec2::new(offset, offset);
    let mut next = board.clone();
    for (source, copy_id) in plan {
        if let Some(item) = board.item(*source).filter(|i| !i.is_player()) {
            let mut copy = item.clone();
            copy.id = *copy_id;
            copy.position = clamp_unit(item.position + shift);
            next.items.push(copy);
        } else if let Some(drawing) = board.drawing(*source) {
            let mut copy = drawing.clone();
            copy.id = *copy_id;
            copy.points = drawing.points.iter().map(|p| clamp_unit(*p + shift)).collect();
            next.drawings.push(copy);
        }
    }
    next
}

/// Duplicate objects with fresh ids, offset by `offset` on both axes.
pub fn duplicate(board: &Board, ids: &[ElementId], offset: f64) -> Board {
    apply_duplicate(board, &duplicate_plan(board, ids), offset)
}

/// Replace one endpoint of a line-like drawing with a (clamped) point.
pub fn move_endpoint(board: &Board, id: ElementId, endpoint: Endpoint, point: Point) -> Board {
    let mut next = board.clone();
    let point = clamp_unit(point);
    if let Some(drawing) = next.drawing_mut(id).filter(|d| d.kind.is_line_like()) {
        let slot = match endpoint {
            Endpoint::Start => drawing.points.first_mut(),
            Endpoint::End => drawing.points.last_mut(),
        };
        if let Some(slot) = slot {
            *slot = point;
        }
    }
    next
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{BoardItem, Drawing, DrawingKind, PlayerData, ShapeData, Team};

    fn shape(image: bool) -> BoardItem {
        BoardItem::shape(
            "cone",
            Point::new(0.5, 0.5),
            ShapeData {
                icon: (!image).then(|| "cone".to_string()),
                image_url: image.then(|| "cone.png".to_string()),
                color: Some("#f97316".into()),
                base_size: 40.0,
            },
        )
    }

    fn player() -> BoardItem {
        BoardItem::player(
            "p-1",
            Point::new(0.3, 0.3),
            PlayerData {
                team: Team::Home,
                number: 1,
                nickname: "Keeper".into(),
                avatar_url: None,
                color: "#1d4ed8".into(),
            },
        )
    }

    fn line() -> Drawing {
        Drawing::segment(DrawingKind::Line, Point::new(0.1, 0.1), Point::new(0.2, 0.2), "#fff", 3.0)
    }

    #[test]
    fn test_delete_missing_is_noop() {
        let mut board = Board::new();
        board.items.push(shape(false));
        let next = delete(&board, &[Uuid::new_v4()]);
        assert_eq!(next, board);
        assert!(delete(&board, &[board.items[0].id]).is_empty());
    }

    #[test]
    fn test_duplicate_offsets_and_skips_players() {
        let mut board = Board::new();
        board.items.push(shape(false));
        board.items.push(player());
        let ids = vec![board.items[0].id, board.items[1].id];

        let next = duplicate(&board, &ids, DUPLICATE_OFFSET);
        assert_eq!(next.items.len(), 3);
        let copy = &next.items[2];
        assert_ne!(copy.id, board.items[0].id);
        assert!((copy.position.x - 0.52).abs() < 1e-12);
        assert!((copy.position.y - 0.52).abs() < 1e-12);
    }

    #[test]
    fn test_duplicate_clamps_at_edge() {
        let mut board = Board::new();
        let mut d = line();
        d.points[1] = Point::new(0.99, 1.0);
        board.drawings.push(d);
        let next = duplicate(&board, &[board.drawings[0].id], DUPLICATE_OFFSET);
        assert_eq!(next.drawings[1].points[1], Point::new(1.0, 1.0));
    }

    #[test]
    fn test_recolor() {
        let mut board = Board::new();
        board.items.push(shape(true));
        board.items.push(player());
        board.drawings.push(line());
        let ids: Vec<_> = board.ids().collect();
        let next = recolor(&board, &ids, "#00ff00");
        assert_eq!(next.items[0].color(), Some("#f97316"));
        assert_eq!(next.items[1].color(), Some("#00ff00"));
        assert_eq!(next.drawings[0].color, "#00ff00");
    }

    #[test]
    fn test_resize_clamps_and_ignores_players() {
        let mut board = Board::new();
        board.items.push(shape(false));
        board.items.push(player());
        let (cone, keeper) = (board.items[0].id, board.items[1].id);

        let big = resize(&board, cone, 100.0);
        assert_eq!(big.items[0].scale, MAX_SCALE);
        let small = resize(&board, cone, 0.01);
        assert_eq!(small.items[0].scale, MIN_SCALE);
        assert_eq!(resize(&board, cone, f64::NAN), board);
        assert_eq!(resize(&board, keeper, 2.0), board);
    }

    #[test]
    fn test_rotate_wraps() {
        let mut board = Board::new();
        board.items.push(shape(false));
        board.items[0].rotation = 270.0;
        let id = board.items[0].id;
        let next = rotate(&board, id);
        assert_eq!(next.items[0].rotation, 0.0);
        assert_eq!(rotate(&next, id).items[0].rotation, 90.0);
    }

    #[test]
    fn test_move_endpoint() {
        let mut board = Board::new();
        board.drawings.push(line());
        let id = board.drawings[0].id;
        let next = move_endpoint(&board, id, Endpoint::End, Point::new(1.3, 0.4));
        assert_eq!(next.drawings[0].points, vec![Point::new(0.1, 0.1), Point::new(1.0, 0.4)]);
    }

    #[test]
    fn test_command_json_and_applies_to() {
        let mut board = Board::new();
        board.items.push(player());
        let id = board.items[0].id;
        let cmd: Command = serde_json::from_value(serde_json::json!({
            "command": "rotate",
            "id": id,
        }))
        .unwrap();
        assert_eq!(cmd, Command::Rotate { id });
        assert!(!cmd.applies_to(&board));
        assert!(!Command::Duplicate { ids: vec![id] }.applies_to(&board));
        assert!(Command::Recolor { ids: vec![id], color: "#000".into() }.applies_to(&board));
    }
}
