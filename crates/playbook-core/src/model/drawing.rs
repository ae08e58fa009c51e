//! Vector annotations drawn on the board.

use super::ElementId;
use kurbo::Point;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The kind of annotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DrawingKind {
    /// Freehand polyline through every sampled point.
    Pencil,
    Line,
    DashedLine,
    Arrow,
    CurvedArrow,
    Rectangle,
    /// Rectangle filled at low opacity.
    ShadedArea,
    /// Center at the first point, radius to the second.
    Circle,
    Text,
}

impl DrawingKind {
    /// Kinds defined by exactly a start and an end point.
    pub fn is_two_point(self) -> bool {
        match self {
            DrawingKind::Line
            | DrawingKind::DashedLine
            | DrawingKind::Arrow
            | DrawingKind::CurvedArrow
            | DrawingKind::Rectangle
            | DrawingKind::ShadedArea
            | DrawingKind::Circle => true,
            DrawingKind::Pencil | DrawingKind::Text => false,
        }
    }

    /// Kinds that get endpoint handles with the move tool.
    pub fn is_line_like(self) -> bool {
        matches!(
            self,
            DrawingKind::Line | DrawingKind::DashedLine | DrawingKind::Arrow | DrawingKind::CurvedArrow
        )
    }

    /// Wire name, as stored in board JSON.
    pub fn name(self) -> &'static str {
        match self {
            DrawingKind::Pencil => "pencil",
            DrawingKind::Line => "line",
            DrawingKind::DashedLine => "dashed-line",
            DrawingKind::Arrow => "arrow",
            DrawingKind::CurvedArrow => "curved-arrow",
            DrawingKind::Rectangle => "rectangle",
            DrawingKind::ShadedArea => "shaded-area",
            DrawingKind::Circle => "circle",
            DrawingKind::Text => "text",
        }
    }

    /// Minimum number of points needed to render anything.
    pub fn required_points(self) -> usize {
        match self {
            DrawingKind::Pencil | DrawingKind::Text => 1,
            _ => 2,
        }
    }
}

/// A vector annotation in normalized coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Drawing {
    pub id: ElementId,
    #[serde(rename = "type")]
    pub kind: DrawingKind,
    pub points: Vec<Point>,
    pub color: String,
    pub stroke_width: f64,
    /// Label content, newline separated. Only meaningful for text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

impl Drawing {
    /// Start a drawing of the given kind at its first point.
    pub fn new(kind: DrawingKind, start: Point, color: impl Into<String>, stroke_width: f64) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind,
            points: vec![start],
            color: color.into(),
            stroke_width,
            text: None,
        }
    }

    /// Create a text label anchored at a point.
    pub fn label(anchor: Point, text: impl Into<String>, color: impl Into<String>, stroke_width: f64) -> Self {
        Self {
            text: Some(text.into()),
            ..Self::new(DrawingKind::Text, anchor, color, stroke_width)
        }
    }

    /// Create a two-point drawing from its endpoints.
    pub fn segment(
        kind: DrawingKind,
        start: Point,
        end: Point,
        color: impl Into<String>,
        stroke_width: f64,
    ) -> Self {
        let mut drawing = Self::new(kind, start, color, stroke_width);
        drawing.points.push(end);
        drawing
    }

    pub fn start(&self) -> Option<Point> {
        self.points.first().copied()
    }

    pub fn end(&self) -> Option<Point> {
        self.points.last().copied()
    }

    /// Font size of a text label, derived from the stroke width.
    pub fn font_size(&self) -> f64 {
        self.stroke_width * 2.0 + 8.0
    }

    /// Lines of a text label.
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.text.as_deref().unwrap_or_default().split('\n')
    }

    /// Collapse a two-point drawing to exactly `[start, last]`. A drawing that
    /// never moved becomes the degenerate `[start, start]`.
    pub fn normalize_endpoints(&mut self) {
        if !self.kind.is_two_point() {
            return;
        }
        if let (Some(start), Some(end)) = (self.start(), self.end()) {
            self.points = vec![start, end];
        }
    }

    /// Whether the drawing has everything it needs to produce output.
    pub fn is_renderable(&self) -> bool {
        if self.points.len() < self.kind.required_points() {
            return false;
        }
        if !self.stroke_width.is_finite() || self.stroke_width <= 0.0 {
            return false;
        }
        if self.points.iter().any(|p| !p.x.is_finite() || !p.y.is_finite()) {
            return false;
        }
        match self.kind {
            DrawingKind::Text => self.text.as_deref().is_some_and(|t| !t.trim().is_empty()),
            _ => true,
        }
    }
}
