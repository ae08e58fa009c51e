//! Pixel-space geometry for drawings.
//!
//! [`build_path`] turns a normalized [`Drawing`] into backend-independent
//! outlines (kurbo paths) plus the padded hit area used for picking.

use crate::geometry::{
    angle_between, arrow_head, curve_control, point_to_polyline_dist, quad_tangent_angle,
    rect_contains, sample_circle, sample_quad, span_rect, to_surface,
};
use crate::model::{Drawing, DrawingKind};
use kurbo::{BezPath, Circle, Point, Rect, Shape, Size};

/// Extra width, in pixels, added to a stroke to form its hit area.
pub const HIT_AREA_PADDING: f64 = 12.0;
/// Fill opacity of a shaded area.
pub const SHADED_AREA_OPACITY: f64 = 0.3;
/// Arrowhead length relative to the stroke width.
pub const ARROW_HEAD_RATIO: f64 = 2.5;
/// Line advance of a text label, relative to its font size.
pub const TEXT_LINE_HEIGHT: f64 = 1.2;
/// Width of the contrasting outline drawn behind label glyphs.
pub const TEXT_OUTLINE_WIDTH: f64 = 3.0;

/// Average glyph advance relative to the font size, used to size text boxes.
pub const GLYPH_ADVANCE: f64 = 0.6;
/// Samples used when flattening curves and circles for hit testing.
const HIT_SAMPLES: usize = 32;
/// Flattening tolerance for kurbo shapes.
const PATH_TOLERANCE: f64 = 0.1;

/// Region that accepts pointer hits for one drawing.
#[derive(Debug, Clone, PartialEq)]
pub struct HitArea {
    /// Full width of the stroked band around `polylines`.
    pub width: f64,
    /// Flattened outlines, in pixels.
    pub polylines: Vec<Vec<Point>>,
    /// Filled interior that also counts as a hit.
    pub fill: Option<Rect>,
}

impl HitArea {
    fn stroked(stroke_width: f64, polylines: Vec<Vec<Point>>) -> Self {
        Self {
            width: stroke_width + HIT_AREA_PADDING,
            polylines,
            fill: None,
        }
    }

    /// Check whether a pixel position falls inside the area.
    pub fn contains(&self, point: Point) -> bool {
        if self.fill.is_some_and(|rect| rect_contains(rect, point)) {
            return true;
        }
        let half = self.width / 2.0;
        self.polylines
            .iter()
            .any(|line| point_to_polyline_dist(point, line) <= half)
    }
}

/// A stroked drawing in pixels.
#[derive(Debug, Clone)]
pub struct StrokePath {
    pub visual: BezPath,
    /// Filled arrowhead triangle.
    pub head: Option<BezPath>,
    /// Dash pattern (dash, gap) in pixels.
    pub dash: Option<[f64; 2]>,
    /// Interior fill opacity for filled kinds.
    pub fill_opacity: Option<f64>,
    pub stroke_width: f64,
    pub hit_area: HitArea,
}

/// One line of a text label.
#[derive(Debug, Clone, PartialEq)]
pub struct TextRun {
    pub text: String,
    /// Baseline origin, in pixels.
    pub origin: Point,
}

/// A laid out text label.
#[derive(Debug, Clone, PartialEq)]
pub struct TextBlock {
    pub runs: Vec<TextRun>,
    pub font_size: f64,
    pub outline_width: f64,
    pub hit_area: HitArea,
}

/// Renderable geometry of a drawing.
#[derive(Debug, Clone)]
pub enum DrawingGeometry {
    Stroke(StrokePath),
    Text(TextBlock),
}

impl DrawingGeometry {
    pub fn hit_area(&self) -> &HitArea {
        match self {
            DrawingGeometry::Stroke(s) => &s.hit_area,
            DrawingGeometry::Text(t) => &t.hit_area,
        }
    }
}

/// Build the pixel geometry for a drawing on a surface of the given size.
///
/// Returns `None` for drawings that cannot produce output: too few points,
/// a text label without content, or an unusable stroke width.
pub fn build_path(drawing: &Drawing, size: Size) -> Option<DrawingGeometry> {
    if !drawing.is_renderable() {
        return None;
    }
    let points: Vec<Point> = drawing.points.iter().map(|p| to_surface(*p, size)).collect();
    let w = drawing.stroke_width;

    let stroke = match drawing.kind {
        DrawingKind::Text => return Some(DrawingGeometry::Text(layout_text(drawing, points[0]))),
        DrawingKind::Pencil => polyline(&points, w),
        DrawingKind::Line => segment(points[0], points[1], w),
        DrawingKind::DashedLine => StrokePath {
            dash: Some([3.0 * w, 2.0 * w]),
            ..segment(points[0], points[1], w)
        },
        DrawingKind::Arrow => arrow(points[0], points[1], w),
        DrawingKind::CurvedArrow => curved_arrow(points[0], points[1], w),
        DrawingKind::Rectangle => rectangle(points[0], points[1], w, None),
        DrawingKind::ShadedArea => rectangle(points[0], points[1], w, Some(SHADED_AREA_OPACITY)),
        DrawingKind::Circle => circle(points[0], points[1], w),
    };
    Some(DrawingGeometry::Stroke(stroke))
}

fn plain(visual: BezPath, w: f64, hit_area: HitArea) -> StrokePath {
    StrokePath {
        visual,
        head: None,
        dash: None,
        fill_opacity: None,
        stroke_width: w,
        hit_area,
    }
}

fn polyline(points: &[Point], w: f64) -> StrokePath {
    let mut path = BezPath::new();
    path.move_to(points[0]);
    for p in &points[1..] {
        path.line_to(*p);
    }
    plain(path, w, HitArea::stroked(w, vec![points.to_vec()]))
}

fn segment(start: Point, end: Point, w: f64) -> StrokePath {
    polyline(&[start, end], w)
}

fn head_triangle(tip: Point, angle: f64, w: f64) -> (BezPath, Vec<Point>) {
    let (left, right) = arrow_head(tip, angle, ARROW_HEAD_RATIO * w);
    let mut head = BezPath::new();
    head.move_to(tip);
    head.line_to(left);
    head.line_to(right);
    head.close_path();
    (head, vec![tip, left, right, tip])
}

fn arrow(start: Point, end: Point, w: f64) -> StrokePath {
    let (head, outline) = head_triangle(end, angle_between(start, end), w);
    let mut stroke = segment(start, end, w);
    stroke.head = Some(head);
    stroke.hit_area.polylines.push(outline);
    stroke
}

fn curved_arrow(start: Point, end: Point, w: f64) -> StrokePath {
    let control = curve_control(start, end);
    let mut path = BezPath::new();
    path.move_to(start);
    path.quad_to(control, end);

    let (head, outline) = head_triangle(end, quad_tangent_angle(start, control, end, 1.0), w);
    let hit = HitArea::stroked(w, vec![sample_quad(start, control, end, HIT_SAMPLES), outline]);
    StrokePath {
        head: Some(head),
        ..plain(path, w, hit)
    }
}

fn rectangle(a: Point, b: Point, w: f64, fill_opacity: Option<f64>) -> StrokePath {
    let rect = span_rect(a, b);
    let corners = vec![
        Point::new(rect.x0, rect.y0),
        Point::new(rect.x1, rect.y0),
        Point::new(rect.x1, rect.y1),
        Point::new(rect.x0, rect.y1),
        Point::new(rect.x0, rect.y0),
    ];
    let mut path = BezPath::new();
    path.move_to(corners[0]);
    for p in &corners[1..4] {
        path.line_to(*p);
    }
    path.close_path();

    let mut hit = HitArea::stroked(w, vec![corners]);
    if fill_opacity.is_some() {
        hit.fill = Some(rect);
    }
    StrokePath {
        fill_opacity,
        ..plain(path, w, hit)
    }
}

fn circle(center: Point, rim: Point, w: f64) -> StrokePath {
    let radius = (rim - center).hypot();
    let path = Circle::new(center, radius).to_path(PATH_TOLERANCE);
    let hit = HitArea::stroked(w, vec![sample_circle(center, radius, HIT_SAMPLES)]);
    plain(path, w, hit)
}

fn layout_text(drawing: &Drawing, anchor: Point) -> TextBlock {
    let font_size = drawing.font_size();
    let advance = TEXT_LINE_HEIGHT * font_size;
    let runs: Vec<TextRun> = drawing
        .lines()
        .enumerate()
        .map(|(i, line)| TextRun {
            text: line.to_string(),
            origin: Point::new(anchor.x, anchor.y + advance * i as f64),
        })
        .collect();

    let widest = runs.iter().map(|r| r.text.chars().count()).max().unwrap_or(0);
    let last_baseline = anchor.y + advance * runs.len().saturating_sub(1) as f64;
    let text_box = Rect::new(
        anchor.x,
        anchor.y - font_size,
        anchor.x + widest as f64 * GLYPH_ADVANCE * font_size,
        last_baseline + (TEXT_LINE_HEIGHT - 1.0) * font_size,
    );

    TextBlock {
        runs,
        font_size,
        outline_width: TEXT_OUTLINE_WIDTH,
        hit_area: HitArea {
            width: 0.0,
            polylines: Vec::new(),
            fill: Some(text_box.inflate(HIT_AREA_PADDING / 2.0, HIT_AREA_PADDING / 2.0)),
        },
    }
}
