//! Hit testing against items, drawings and endpoint handles.
//!
//! All functions take pixel positions. Normalized model geometry is scaled
//! to the surface before comparison so pick tolerances stay constant on
//! screen.

use crate::config::SurfaceConfig;
use crate::geometry::{Orientation, to_surface};
use crate::model::{BoardItem, Drawing};
use crate::path::build_path;
use crate::selection::Endpoint;
use kurbo::{Point, Size};

/// Check whether a pixel position hits a drawing's padded hit area.
pub fn hit_test_drawing(drawing: &Drawing, point: Point, size: Size) -> bool {
    build_path(drawing, size).is_some_and(|g| g.hit_area().contains(point))
}

/// Check whether a pixel position hits an item's token disc.
pub fn hit_test_item(
    item: &BoardItem,
    point: Point,
    size: Size,
    orientation: Orientation,
    config: &SurfaceConfig,
) -> bool {
    let center = to_surface(item.position, size);
    let radius = config.token_size(item, orientation) / 2.0;
    (point - center).hypot() <= radius
}

/// Pixel positions of a drawing's endpoint handles.
///
/// Only line-like drawings have handles.
pub fn endpoint_handles(drawing: &Drawing, size: Size) -> Option<[(Endpoint, Point); 2]> {
    if !drawing.kind.is_line_like() {
        return None;
    }
    let start = drawing.start()?;
    let end = drawing.end()?;
    Some([
        (Endpoint::Start, to_surface(start, size)),
        (Endpoint::End, to_surface(end, size)),
    ])
}

/// Find the endpoint handle under a pixel position.
///
/// When both handles overlap the end handle wins, matching paint order.
pub fn hit_test_handle(drawing: &Drawing, point: Point, size: Size, radius: f64) -> Option<Endpoint> {
    endpoint_handles(drawing, size)?
        .into_iter()
        .rev()
        .find(|(_, center)| (point - *center).hypot() <= radius)
        .map(|(endpoint, _)| endpoint)
}
