//! Context menus for items, drawings and the multi-selection.

use crate::commands::Command;
use crate::model::{Board, DrawingKind, ElementId, ItemKind};
use serde::{Deserialize, Serialize};

/// What a context menu was opened on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "on", content = "id", rename_all = "lowercase")]
pub enum MenuTarget {
    Item(ElementId),
    Drawing(ElementId),
    /// The bounding box of the current selection.
    Selection,
}

/// An entry shown in a context menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MenuEntry {
    Delete,
    Duplicate,
    Recolor,
    Enlarge,
    Shrink,
    Rotate,
    EditText,
}

impl MenuEntry {
    pub fn label(self) -> &'static str {
        match self {
            MenuEntry::Delete => "Delete",
            MenuEntry::Duplicate => "Duplicate",
            MenuEntry::Recolor => "Change color",
            MenuEntry::Enlarge => "Enlarge",
            MenuEntry::Shrink => "Shrink",
            MenuEntry::Rotate => "Rotate",
            MenuEntry::EditText => "Edit text",
        }
    }
}

/// A chosen menu entry, with its argument.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", content = "color", rename_all = "kebab-case")]
pub enum MenuAction {
    Delete,
    Duplicate,
    Recolor(String),
    Enlarge,
    Shrink,
    Rotate,
    EditText,
}

impl MenuAction {
    pub fn entry(&self) -> MenuEntry {
        match self {
            MenuAction::Delete => MenuEntry::Delete,
            MenuAction::Duplicate => MenuEntry::Duplicate,
            MenuAction::Recolor(_) => MenuEntry::Recolor,
            MenuAction::Enlarge => MenuEntry::Enlarge,
            MenuAction::Shrink => MenuEntry::Shrink,
            MenuAction::Rotate => MenuEntry::Rotate,
            MenuAction::EditText => MenuEntry::EditText,
        }
    }

    /// The board command behind this action, for the given targets.
    ///
    /// Text editing is not a board command and yields `None`, as do
    /// single-object actions aimed at several objects.
    pub fn command(&self, ids: &[ElementId], resize_step: f64) -> Option<Command> {
        let single = match ids {
            [id] => Some(*id),
            _ => None,
        };
        match self {
            MenuAction::Delete => Some(Command::Delete { ids: ids.to_vec() }),
            MenuAction::Duplicate => Some(Command::Duplicate { ids: ids.to_vec() }),
            MenuAction::Recolor(color) => Some(Command::Recolor {
                ids: ids.to_vec(),
                color: color.clone(),
            }),
            MenuAction::Enlarge => single.map(|id| Command::Resize { id, factor: resize_step }),
            MenuAction::Shrink => single.map(|id| Command::Resize { id, factor: 1.0 / resize_step }),
            MenuAction::Rotate => single.map(|id| Command::Rotate { id }),
            MenuAction::EditText => None,
        }
    }
}

/// Entries available for a menu target. Unknown ids get an empty menu.
pub fn menu_for(board: &Board, target: MenuTarget) -> Vec<MenuEntry> {
    use MenuEntry::*;
    match target {
        MenuTarget::Item(id) => match board.item(id).map(|i| &i.kind) {
            Some(ItemKind::Player(_)) => vec![Delete, Recolor],
            Some(ItemKind::Shape(shape)) if shape.is_image_backed() => {
                vec![Delete, Duplicate, Enlarge, Shrink, Rotate]
            }
            Some(ItemKind::Shape(_)) => vec![Delete, Duplicate, Recolor, Enlarge, Shrink, Rotate],
            None => Vec::new(),
        },
        MenuTarget::Drawing(id) => match board.drawing(id).map(|d| d.kind) {
            Some(DrawingKind::Text) => vec![EditText, Delete, Duplicate, Recolor],
            Some(_) => vec![Delete, Duplicate, Recolor],
            None => Vec::new(),
        },
        MenuTarget::Selection => vec![Delete, Duplicate, Recolor],
    }
}
