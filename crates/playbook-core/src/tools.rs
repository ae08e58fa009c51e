//! Board tools.

use crate::model::DrawingKind;
use serde::{Deserialize, Serialize};

/// Available tools.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Tool {
    /// Grab and drag single objects; shows endpoint handles.
    #[default]
    Move,
    /// Rubber-band selection and group moves.
    Selection,
    Pencil,
    Line,
    DashedLine,
    Arrow,
    CurvedArrow,
    Rectangle,
    ShadedArea,
    Circle,
    Text,
}

impl Tool {
    /// The drawing kind a gesture with this tool produces.
    ///
    /// Text is not a drawing tool: it opens a label editor instead of
    /// collecting points.
    pub fn drawing_kind(self) -> Option<DrawingKind> {
        match self {
            Tool::Pencil => Some(DrawingKind::Pencil),
            Tool::Line => Some(DrawingKind::Line),
            Tool::DashedLine => Some(DrawingKind::DashedLine),
            Tool::Arrow => Some(DrawingKind::Arrow),
            Tool::CurvedArrow => Some(DrawingKind::CurvedArrow),
            Tool::Rectangle => Some(DrawingKind::Rectangle),
            Tool::ShadedArea => Some(DrawingKind::ShadedArea),
            Tool::Circle => Some(DrawingKind::Circle),
            Tool::Move | Tool::Selection | Tool::Text => None,
        }
    }

    pub fn is_drawing(self) -> bool {
        self.drawing_kind().is_some()
    }
}
