//! Creating items from catalog assets: click-to-place and drag-and-drop.

use crate::model::{BoardItem, DEFAULT_SHAPE_SIZE, PlayerData, ShapeData, Team};
use kurbo::Point;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Which catalog a placement comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlacementKind {
    Player,
    Shape,
}

impl std::fmt::Display for PlacementKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PlacementKind::Player => write!(f, "player"),
            PlacementKind::Shape => write!(f, "shape"),
        }
    }
}

/// A roster player as offered by the host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerAsset {
    pub id: String,
    pub number: u32,
    pub nickname: String,
    #[serde(default)]
    pub team: Team,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

/// A shape from the host's palette.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShapeAsset {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_size: Option<f64>,
}

/// An asset waiting to be placed on the board.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "payload", rename_all = "lowercase")]
pub enum Placement {
    Player(PlayerAsset),
    Shape(ShapeAsset),
}

impl Placement {
    pub fn kind(&self) -> PlacementKind {
        match self {
            Placement::Player(_) => PlacementKind::Player,
            Placement::Shape(_) => PlacementKind::Shape,
        }
    }

    /// Instantiate the asset as a board item at a normalized position.
    pub fn into_item(self, position: Point) -> BoardItem {
        match self {
            Placement::Player(p) => {
                let color = p.color.unwrap_or_else(|| p.team.default_color().to_string());
                BoardItem::player(
                    p.id,
                    position,
                    PlayerData {
                        team: p.team,
                        number: p.number,
                        nickname: p.nickname,
                        avatar_url: p.avatar_url,
                        color,
                    },
                )
            }
            Placement::Shape(s) => BoardItem::shape(
                s.id,
                position,
                ShapeData {
                    icon: s.icon,
                    image_url: s.image_url,
                    color: s.color,
                    base_size: s.base_size.filter(|v| v.is_finite() && *v > 0.0).unwrap_or(DEFAULT_SHAPE_SIZE),
                },
            ),
        }
    }
}

/// Drag-and-drop payload errors.
#[derive(Debug, Error)]
pub enum PlacementError {
    #[error("Drop payload of type {0} carries no asset")]
    MissingAsset(PlacementKind),
    #[error("Invalid drop payload: {0}")]
    Invalid(#[from] serde_json::Error),
}

/// Data transferred by a drag-and-drop onto the board.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DropPayload {
    #[serde(rename = "type")]
    pub kind: PlacementKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub player: Option<PlayerAsset>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shape: Option<ShapeAsset>,
}

impl DropPayload {
    pub fn from_json(json: &str) -> Result<Self, PlacementError> {
        Ok(serde_json::from_str(json)?)
    }
}

impl TryFrom<DropPayload> for Placement {
    type Error = PlacementError;

    fn try_from(payload: DropPayload) -> Result<Self, Self::Error> {
        match payload.kind {
            PlacementKind::Player => payload
                .player
                .map(Placement::Player)
                .ok_or(PlacementError::MissingAsset(PlacementKind::Player)),
            PlacementKind::Shape => payload
                .shape
                .map(Placement::Shape)
                .ok_or(PlacementError::MissingAsset(PlacementKind::Shape)),
        }
    }
}
