//! SVG renderer implementation.

use std::path::Path;

use kurbo::{BezPath, Point, Rect, Size};
use log::{debug, error};
use peniko::Color;
use playbook_core::geometry::{span_rect, to_surface};
use playbook_core::hit::endpoint_handles;
use playbook_core::path::{GLYPH_ADVANCE, HIT_AREA_PADDING, TEXT_LINE_HEIGHT};
use playbook_core::{
    BoardItem, Drawing, DrawingGeometry, ElementId, HitArea, ItemKind, PlayerData, ShapeData, StrokePath,
    TextBlock, TextDraft, Tool, build_path,
};
use svg::node::Text as SvgText;
use svg::{Document, node::element as svg_element};

use crate::renderer::{RenderContext, RenderResult, Renderer, RendererError};

/// Extra stroke width of the selection halo around drawings.
const HALO_WIDTH: f64 = 6.0;
/// Gap between a selected token and its selection ring.
const RING_GAP: f64 = 4.0;
/// Side length of the drag handle on the group selection box.
const DRAG_HANDLE_SIZE: f64 = 10.0;
/// Fill used for icon shapes that carry no color of their own.
const DEFAULT_SHAPE_FILL: &str = "#f97316";

/// Renders a board and the live surface state to SVG.
#[derive(Debug, Default)]
pub struct SvgRenderer {
    scene: Option<String>,
}

impl SvgRenderer {
    /// Create a new SVG renderer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Render a frame into a standalone document.
    pub fn render(&self, ctx: &RenderContext) -> RenderResult<Document> {
        let size = ctx.viewport_size;
        if !(size.width.is_finite() && size.height.is_finite() && size.width > 0.0 && size.height > 0.0) {
            return Err(RendererError::InvalidViewport(size.width, size.height));
        }

        let doc = Document::new()
            .set("viewBox", format!("0 0 {} {}", size.width, size.height))
            .set("width", size.width)
            .set("height", size.height);

        let background = svg_element::Rectangle::new()
            .set("x", 0)
            .set("y", 0)
            .set("width", size.width)
            .set("height", size.height)
            .set("fill", css(ctx.background_color));

        Ok(doc
            .add(background)
            .add(self.drawing_layer(ctx))
            .add(self.overlay_layer(ctx))
            .add(self.shape_layer(ctx))
            .add(self.player_layer(ctx))
            .add(self.editor_layer(ctx)))
    }

    /// The most recently built scene.
    pub fn scene(&self) -> Option<&str> {
        self.scene.as_deref()
    }

    /// The most recently built scene as an owned string.
    pub fn to_svg_string(&self) -> RenderResult<String> {
        self.scene.clone().ok_or(RendererError::NoScene)
    }

    /// Write the most recently built scene to a file.
    pub fn save(&self, path: impl AsRef<Path>) -> RenderResult<()> {
        let scene = self.scene.as_deref().ok_or(RendererError::NoScene)?;
        std::fs::write(path.as_ref(), scene)?;
        debug!("Saved scene to {}", path.as_ref().display());
        Ok(())
    }

    fn is_selected(ctx: &RenderContext, id: ElementId) -> bool {
        ctx.surface.is_some_and(|s| s.selection().contains(id))
    }

    /// Drawings, in insertion order, followed by the in-progress preview.
    fn drawing_layer(&self, ctx: &RenderContext) -> svg_element::Group {
        let mut layer = svg_element::Group::new().set("id", "drawings");
        let size = ctx.viewport_size;
        let selection = css(ctx.selection_color);

        // The label under edit is drawn by the editor overlay instead.
        let editing = ctx
            .surface
            .and_then(|s| s.interaction().text_draft())
            .filter(|draft| !draft.is_new)
            .map(|draft| draft.id);

        for drawing in &ctx.board.drawings {
            if Some(drawing.id) == editing {
                continue;
            }
            let halo = Self::is_selected(ctx, drawing.id).then_some(selection.as_str());
            if let Some(node) = drawing_node(drawing, size, halo, ctx.show_hit_areas) {
                layer = layer.add(node);
            }
        }

        if let Some(preview) = ctx.surface.and_then(|s| s.preview()) {
            if let Some(node) = drawing_node(preview, size, None, false) {
                layer = layer.add(node.set("class", "preview").set("opacity", 0.8));
            }
        }
        layer
    }

    /// Rubber band, group selection box and endpoint handles.
    fn overlay_layer(&self, ctx: &RenderContext) -> svg_element::Group {
        let mut layer = svg_element::Group::new().set("id", "overlay");
        let Some(surface) = ctx.surface else {
            return layer;
        };
        let size = ctx.viewport_size;
        let selection = css(ctx.selection_color);

        if let Some((start, end)) = surface.interaction().selection_rect() {
            let rect = span_rect(to_surface(start, size), to_surface(end, size));
            let band = rect_node(rect)
                .set("fill", selection.as_str())
                .set("fill-opacity", 25.0 / 255.0)
                .set("stroke", selection.as_str())
                .set("stroke-width", 1)
                .set("stroke-dasharray", "4 4");
            layer = layer.add(band);
        }

        if surface.tool() == Tool::Selection && surface.selection().len() > 1 {
            if let Some(bounds) = surface.selection_bounds(ctx.board) {
                let rect = Rect::from_points(to_surface(bounds.origin(), size), to_surface(Point::new(bounds.x1, bounds.y1), size))
                    .inflate(HIT_AREA_PADDING, HIT_AREA_PADDING);
                let frame = rect_node(rect)
                    .set("fill", "none")
                    .set("stroke", selection.as_str())
                    .set("stroke-width", 1.5)
                    .set("stroke-dasharray", "6 3");
                let handle = rect_node(Rect::from_center_size(
                    Point::new(rect.center().x, rect.y0),
                    Size::new(DRAG_HANDLE_SIZE, DRAG_HANDLE_SIZE),
                ))
                .set("fill", "#ffffff")
                .set("stroke", selection.as_str())
                .set("stroke-width", 1.5);
                layer = layer.add(frame).add(handle.set("class", "drag-handle"));
            }
        }

        if surface.tool() == Tool::Move {
            let radius = ctx.config.handle_radius;
            for drawing in &ctx.board.drawings {
                let Some(handles) = endpoint_handles(drawing, size) else {
                    continue;
                };
                for (_, center) in handles {
                    let handle = svg_element::Circle::new()
                        .set("class", "handle")
                        .set("cx", center.x)
                        .set("cy", center.y)
                        .set("r", radius)
                        .set("fill", "#ffffff")
                        .set("stroke", selection.as_str())
                        .set("stroke-width", 2);
                    layer = layer.add(handle);
                }
            }
        }
        layer
    }

    fn shape_layer(&self, ctx: &RenderContext) -> svg_element::Group {
        let mut layer = svg_element::Group::new().set("id", "shapes");
        for item in &ctx.board.items {
            if let ItemKind::Shape(shape) = &item.kind {
                let token = ctx.config.token_size(item, ctx.orientation);
                let mut group = token_group(item, ctx.viewport_size).add(shape_node(shape, token));
                if Self::is_selected(ctx, item.id) {
                    group = group.add(ring(token, &css(ctx.selection_color)));
                }
                layer = layer.add(group);
            }
        }
        layer
    }

    fn player_layer(&self, ctx: &RenderContext) -> svg_element::Group {
        let mut layer = svg_element::Group::new().set("id", "players");
        for item in &ctx.board.items {
            if let ItemKind::Player(player) = &item.kind {
                let token = ctx.config.token_size(item, ctx.orientation);
                let mut group = player_node(token_group(item, ctx.viewport_size), player, token);
                if Self::is_selected(ctx, item.id) {
                    group = group.add(ring(token, &css(ctx.selection_color)));
                }
                layer = layer.add(group);
            }
        }
        layer
    }

    /// The label editor: draft text with a caret.
    fn editor_layer(&self, ctx: &RenderContext) -> svg_element::Group {
        let mut layer = svg_element::Group::new().set("id", "editor");
        let Some(draft) = ctx.surface.and_then(|s| s.interaction().text_draft()) else {
            return layer;
        };
        let size = ctx.viewport_size;
        let label = Drawing::label(draft.anchor, draft.text.clone(), draft.color.clone(), draft.stroke_width);
        if let Some(DrawingGeometry::Text(block)) = build_path(&label, size) {
            layer = layer.add(text_node(&block, &draft.color));
        }
        layer.add(caret(draft, to_surface(draft.anchor, size), label.font_size(), &css(ctx.selection_color)))
    }
}

impl Renderer for SvgRenderer {
    fn build_scene(&mut self, ctx: &RenderContext) {
        match self.render(ctx) {
            Ok(doc) => self.scene = Some(doc.to_string()),
            Err(err) => {
                error!("Failed to build scene: {err}");
                self.scene = None;
            }
        }
    }
}

fn rect_node(rect: Rect) -> svg_element::Rectangle {
    svg_element::Rectangle::new()
        .set("x", rect.x0)
        .set("y", rect.y0)
        .set("width", rect.width())
        .set("height", rect.height())
}

fn drawing_node(drawing: &Drawing, size: Size, halo: Option<&str>, show_hit_area: bool) -> Option<svg_element::Group> {
    let geometry = build_path(drawing, size)?;
    let mut group = svg_element::Group::new()
        .set("data-id", drawing.id.to_string())
        .set("data-kind", drawing.kind.name());

    match &geometry {
        DrawingGeometry::Stroke(stroke) => {
            if let Some(color) = halo {
                group = group.add(
                    svg_element::Path::new()
                        .set("d", stroke.visual.to_svg())
                        .set("fill", "none")
                        .set("stroke", color)
                        .set("stroke-opacity", 0.5)
                        .set("stroke-width", stroke.stroke_width + HALO_WIDTH)
                        .set("stroke-linecap", "round")
                        .set("stroke-linejoin", "round"),
                );
            }
            group = add_stroke(group, stroke, &drawing.color);
        }
        DrawingGeometry::Text(block) => {
            if let (Some(color), Some(rect)) = (halo, block.hit_area.fill) {
                group = group.add(
                    rect_node(rect)
                        .set("fill", "none")
                        .set("stroke", color)
                        .set("stroke-width", 1.5)
                        .set("stroke-dasharray", "4 4"),
                );
            }
            group = group.add(text_node(block, &drawing.color));
        }
    }

    if show_hit_area {
        group = group.add(hit_area_node(geometry.hit_area()));
    }
    Some(group)
}

fn add_stroke(group: svg_element::Group, stroke: &StrokePath, color: &str) -> svg_element::Group {
    let mut path = svg_element::Path::new()
        .set("d", stroke.visual.to_svg())
        .set("stroke", color)
        .set("stroke-width", stroke.stroke_width)
        .set("stroke-linecap", "round")
        .set("stroke-linejoin", "round");
    path = match stroke.fill_opacity {
        Some(opacity) => path.set("fill", color).set("fill-opacity", opacity),
        None => path.set("fill", "none"),
    };
    if let Some([dash, gap]) = stroke.dash {
        path = path.set("stroke-dasharray", format!("{dash} {gap}"));
    }

    let group = group.add(path);
    match &stroke.head {
        Some(head) => group.add(
            svg_element::Path::new()
                .set("d", head.to_svg())
                .set("fill", color)
                .set("stroke", color)
                .set("stroke-width", 1)
                .set("stroke-linejoin", "round"),
        ),
        None => group,
    }
}

fn text_node(block: &TextBlock, color: &str) -> svg_element::Text {
    let mut text = svg_element::Text::new("")
        .set("font-family", "sans-serif")
        .set("font-size", block.font_size)
        .set("fill", color)
        .set("stroke", outline_for(color))
        .set("stroke-width", block.outline_width)
        .set("stroke-linejoin", "round")
        .set("paint-order", "stroke");
    for run in &block.runs {
        let tspan = svg_element::TSpan::new("")
            .set("x", run.origin.x)
            .set("y", run.origin.y)
            .add(SvgText::new(run.text.clone()));
        text = text.add(tspan);
    }
    text
}

/// Debug overlay of the padded hit area.
fn hit_area_node(area: &HitArea) -> svg_element::Group {
    let mut group = svg_element::Group::new().set("class", "hit-area");
    for line in &area.polylines {
        let mut path = BezPath::new();
        for (i, p) in line.iter().enumerate() {
            if i == 0 {
                path.move_to(*p);
            } else {
                path.line_to(*p);
            }
        }
        group = group.add(
            svg_element::Path::new()
                .set("d", path.to_svg())
                .set("fill", "none")
                .set("stroke", "#ef4444")
                .set("stroke-opacity", 0.25)
                .set("stroke-width", area.width)
                .set("stroke-linecap", "round")
                .set("stroke-linejoin", "round"),
        );
    }
    if let Some(rect) = area.fill {
        group = group.add(rect_node(rect).set("fill", "#ef4444").set("fill-opacity", 0.15));
    }
    group
}

/// Group placed at the token's center and rotated about it.
fn token_group(item: &BoardItem, size: Size) -> svg_element::Group {
    let center = to_surface(item.position, size);
    svg_element::Group::new()
        .set("data-id", item.id.to_string())
        .set("data-element", item.element_id.as_str())
        .set("transform", format!("translate({} {}) rotate({})", center.x, center.y, item.rotation))
}

fn shape_node(shape: &ShapeData, token: f64) -> svg_element::Group {
    let half = token / 2.0;
    let group = svg_element::Group::new();
    match (&shape.image_url, &shape.icon) {
        (Some(url), _) => group.add(
            svg_element::Image::new()
                .set("href", url.as_str())
                .set("x", -half)
                .set("y", -half)
                .set("width", token)
                .set("height", token),
        ),
        (None, icon) => {
            let fill = shape.color.as_deref().unwrap_or(DEFAULT_SHAPE_FILL);
            let body = svg_element::Circle::new()
                .set("r", half)
                .set("fill", fill)
                .set("stroke", outline_for(fill))
                .set("stroke-width", 1.5);
            let group = group.add(body);
            match icon {
                Some(icon) => group.set("data-icon", icon.as_str()),
                None => group,
            }
        }
    }
}

fn player_node(group: svg_element::Group, player: &PlayerData, token: f64) -> svg_element::Group {
    let half = token / 2.0;
    let mut group = group.set("data-team", player.team.name()).add(
        svg_element::Circle::new()
            .set("r", half)
            .set("fill", player.color.as_str())
            .set("stroke", "#ffffff")
            .set("stroke-width", 2),
    );

    if let Some(url) = &player.avatar_url {
        group = group.add(
            svg_element::Image::new()
                .set("href", url.as_str())
                .set("x", -half)
                .set("y", -half)
                .set("width", token)
                .set("height", token)
                .set("preserveAspectRatio", "xMidYMid slice"),
        );
    } else {
        group = group.add(
            svg_element::Text::new("")
                .set("text-anchor", "middle")
                .set("dominant-baseline", "central")
                .set("font-family", "sans-serif")
                .set("font-weight", "bold")
                .set("font-size", token * 0.4)
                .set("fill", outline_for(&player.color))
                .add(SvgText::new(player.number.to_string())),
        );
    }

    if !player.nickname.is_empty() {
        group = group.add(
            svg_element::Text::new("")
                .set("y", half + 12.0)
                .set("text-anchor", "middle")
                .set("font-family", "sans-serif")
                .set("font-size", 11)
                .set("fill", "#ffffff")
                .set("stroke", "#000000")
                .set("stroke-width", 2)
                .set("paint-order", "stroke")
                .add(SvgText::new(player.nickname.clone())),
        );
    }
    group
}

fn ring(token: f64, color: &str) -> svg_element::Circle {
    svg_element::Circle::new()
        .set("class", "selection")
        .set("r", token / 2.0 + RING_GAP)
        .set("fill", "none")
        .set("stroke", color)
        .set("stroke-width", 2)
}

/// Caret after the last glyph of the draft.
fn caret(draft: &TextDraft, anchor: Point, font_size: f64, color: &str) -> svg_element::Line {
    let lines: Vec<&str> = draft.text.split('\n').collect();
    let row = lines.len().saturating_sub(1);
    let column = lines.last().map_or(0, |line| line.chars().count());
    let x = anchor.x + column as f64 * GLYPH_ADVANCE * font_size;
    let baseline = anchor.y + row as f64 * TEXT_LINE_HEIGHT * font_size;
    svg_element::Line::new()
        .set("class", "caret")
        .set("x1", x)
        .set("y1", baseline - font_size)
        .set("x2", x)
        .set("y2", baseline + (TEXT_LINE_HEIGHT - 1.0) * font_size)
        .set("stroke", color)
        .set("stroke-width", 1.5)
}

/// Hex string for a peniko color, alpha dropped.
fn css(color: Color) -> String {
    let rgba = color.to_rgba8();
    format!("#{:02x}{:02x}{:02x}", rgba.r, rgba.g, rgba.b)
}

/// Parse `#rgb` or `#rrggbb`.
fn parse_hex(color: &str) -> Option<[u8; 3]> {
    let hex = color.strip_prefix('#')?;
    if !hex.is_ascii() {
        return None;
    }
    let byte = |s: &str| u8::from_str_radix(s, 16).ok();
    match hex.len() {
        3 => {
            let mut out = [0u8; 3];
            for (slot, i) in out.iter_mut().zip(0..3) {
                *slot = byte(&hex[i..i + 1])? * 17;
            }
            Some(out)
        }
        6 => Some([byte(&hex[0..2])?, byte(&hex[2..4])?, byte(&hex[4..6])?]),
        _ => None,
    }
}

/// Dark outline for light colors, light outline otherwise.
fn outline_for(color: &str) -> &'static str {
    match parse_hex(color) {
        Some([r, g, b]) if 0.299 * r as f64 + 0.587 * g as f64 + 0.114 * b as f64 > 150.0 => "#111827",
        _ => "#ffffff",
    }
}
