//! Placed tokens: players and shapes.

use super::ElementId;
use crate::geometry::{clamp_unit, in_unit};
use kurbo::Point;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Default rendered size of a shape token at scale 1, in pixels.
pub const DEFAULT_SHAPE_SIZE: f64 = 40.0;

/// Which side a player token belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Team {
    #[default]
    Home,
    Away,
}

impl Team {
    /// Token color used when the catalog entry does not carry one.
    pub fn default_color(self) -> &'static str {
        match self {
            Team::Home => "#1d4ed8",
            Team::Away => "#dc2626",
        }
    }

    /// Wire name, as stored in board JSON.
    pub fn name(self) -> &'static str {
        match self {
            Team::Home => "home",
            Team::Away => "away",
        }
    }
}

/// Payload of a player token.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerData {
    pub team: Team,
    pub number: u32,
    pub nickname: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
    pub color: String,
}

/// Payload of a shape token (cone, ball, mannequin, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShapeData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default = "default_base_size")]
    pub base_size: f64,
}

fn default_base_size() -> f64 {
    DEFAULT_SHAPE_SIZE
}

impl ShapeData {
    /// Image-backed shapes keep the colors of their bitmap.
    pub fn is_image_backed(&self) -> bool {
        self.image_url.is_some()
    }
}

/// Variant payload of a board item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "lowercase")]
pub enum ItemKind {
    Player(PlayerData),
    Shape(ShapeData),
}

/// A token placed on the board.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardItem {
    pub id: ElementId,
    #[serde(flatten)]
    pub kind: ItemKind,
    /// Catalog asset this item instantiates.
    pub element_id: String,
    /// Visual center, normalized.
    pub position: Point,
    #[serde(default = "default_scale")]
    pub scale: f64,
    /// Degrees, `0..360`.
    #[serde(default)]
    pub rotation: f64,
}

fn default_scale() -> f64 {
    1.0
}

impl BoardItem {
    /// Create a player token at a (clamped) position.
    pub fn player(element_id: impl Into<String>, position: Point, data: PlayerData) -> Self {
        Self::with_kind(element_id, position, ItemKind::Player(data))
    }

    /// Create a shape token at a (clamped) position.
    pub fn shape(element_id: impl Into<String>, position: Point, data: ShapeData) -> Self {
        Self::with_kind(element_id, position, ItemKind::Shape(data))
    }

    fn with_kind(element_id: impl Into<String>, position: Point, kind: ItemKind) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind,
            element_id: element_id.into(),
            position: clamp_unit(position),
            scale: 1.0,
            rotation: 0.0,
        }
    }

    pub fn is_player(&self) -> bool {
        matches!(self.kind, ItemKind::Player(_))
    }

    pub fn is_shape(&self) -> bool {
        matches!(self.kind, ItemKind::Shape(_))
    }

    /// The token's color, if it carries one.
    pub fn color(&self) -> Option<&str> {
        match &self.kind {
            ItemKind::Player(p) => Some(&p.color),
            ItemKind::Shape(s) => s.color.as_deref(),
        }
    }

    /// Set the token color. Returns `false` when the item cannot be recolored.
    pub fn set_color(&mut self, color: &str) -> bool {
        match &mut self.kind {
            ItemKind::Player(p) => {
                p.color = color.to_string();
                true
            }
            ItemKind::Shape(s) if s.is_image_backed() => false,
            ItemKind::Shape(s) => {
                s.color = Some(color.to_string());
                true
            }
        }
    }

    /// Check that every numeric field is usable.
    pub fn is_well_formed(&self) -> bool {
        self.position.x.is_finite()
            && self.position.y.is_finite()
            && self.scale.is_finite()
            && self.scale > 0.0
            && self.rotation.is_finite()
    }

    /// Whether the position already satisfies the unit-square invariant.
    pub fn in_bounds(&self) -> bool {
        in_unit(self.position)
    }
}
