//! Surface tunables.

use crate::geometry::Orientation;
use crate::model::{BoardItem, ItemKind};
use serde::{Deserialize, Serialize};

/// Tunables of a [`BoardSurface`](crate::BoardSurface).
///
/// Every field has a default, so a config file only needs to name what it
/// overrides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SurfaceConfig {
    /// Normalized offset applied to duplicated objects on both axes.
    pub duplicate_offset: f64,
    /// Factor used by the enlarge/shrink menu entries.
    pub resize_step: f64,
    /// Player token diameter in pixels, horizontal board.
    pub player_size_horizontal: f64,
    /// Player token diameter in pixels, vertical board.
    pub player_size_vertical: f64,
    /// Shape size multiplier applied on a vertical board.
    pub vertical_shape_factor: f64,
    /// Pick radius of endpoint handles, in pixels.
    pub handle_radius: f64,
}

impl Default for SurfaceConfig {
    fn default() -> Self {
        Self {
            duplicate_offset: crate::commands::DUPLICATE_OFFSET,
            resize_step: 1.2,
            player_size_horizontal: 44.0,
            player_size_vertical: 34.0,
            vertical_shape_factor: 0.8,
            handle_radius: 8.0,
        }
    }
}

impl SurfaceConfig {
    /// Parse a (possibly partial) config from JSON.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn player_size(&self, orientation: Orientation) -> f64 {
        match orientation {
            Orientation::Horizontal => self.player_size_horizontal,
            Orientation::Vertical => self.player_size_vertical,
        }
    }

    /// Rendered diameter of a token in pixels.
    pub fn token_size(&self, item: &BoardItem, orientation: Orientation) -> f64 {
        match &item.kind {
            ItemKind::Player(_) => self.player_size(orientation),
            ItemKind::Shape(shape) => {
                let size = shape.base_size * item.scale;
                match orientation {
                    Orientation::Horizontal => size,
                    Orientation::Vertical => size * self.vertical_shape_factor,
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{DEFAULT_SHAPE_SIZE, ShapeData};
    use kurbo::Point;

    #[test]
    fn test_partial_config() {
        let config = SurfaceConfig::from_json(r#"{ "handleRadius": 12 }"#).unwrap();
        assert_eq!(config.handle_radius, 12.0);
        assert_eq!(config.player_size_horizontal, 44.0);
        assert_eq!(config.duplicate_offset, 0.02);
    }

    #[test]
    fn test_token_sizes() {
        let config = SurfaceConfig::default();
        let mut cone = BoardItem::shape(
            "cone",
            Point::new(0.5, 0.5),
            ShapeData {
                icon: Some("cone".into()),
                image_url: None,
                color: None,
                base_size: DEFAULT_SHAPE_SIZE,
            },
        );
        cone.scale = 1.5;
        assert_eq!(config.token_size(&cone, Orientation::Horizontal), 60.0);
        assert!((config.token_size(&cone, Orientation::Vertical) - 48.0).abs() < 1e-9);
        assert_eq!(config.player_size(Orientation::Vertical), 34.0);
    }
}
