//! Playbook Core Library
//!
//! Platform-agnostic data model, geometry and interaction logic for the
//! Playbook tactical board. Hosts own the [`Board`] and receive every change
//! as a pure `&Board -> Board` updater through [`BoardHost`].

pub mod commands;
pub mod config;
pub mod geometry;
pub mod hit;
pub mod host;
pub mod input;
pub mod interaction;
pub mod menu;
pub mod model;
pub mod path;
pub mod placement;
pub mod selection;
pub mod surface;
pub mod tools;

pub use commands::Command;
pub use config::SurfaceConfig;
pub use geometry::{Orientation, Position};
pub use host::{BoardHost, MemoryHost, Updater};
pub use input::{Key, KeyEvent, Modifiers, PointerEvent};
pub use interaction::{Interaction, MoveState, TextDraft};
pub use menu::{MenuAction, MenuEntry, MenuTarget};
pub use model::{
    Board, BoardError, BoardItem, Drawing, DrawingKind, ElementId, ItemKind, PlayerData,
    SanitizeReport, ShapeData, Team,
};
pub use path::{DrawingGeometry, HitArea, StrokePath, TextBlock, TextRun, build_path};
pub use placement::{DropPayload, Placement, PlacementError, PlacementKind, PlayerAsset, ShapeAsset};
pub use selection::{Endpoint, Selection};
pub use surface::{BoardSurface, Target};
pub use tools::Tool;
