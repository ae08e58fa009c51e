//! Gesture scripts: a JSON list of input steps replayed through a surface.
//!
//! ```json
//! [
//!   { "step": "tool", "tool": "arrow" },
//!   { "step": "drag", "from": [100, 100], "to": [400, 100] },
//!   { "step": "tool", "tool": "selection" },
//!   { "step": "drag", "from": [50, 50], "to": [450, 150] },
//!   { "step": "action", "target": { "on": "selection" }, "action": { "action": "recolor", "color": "#ff0000" } }
//! ]
//! ```

use kurbo::Point;
use log::{debug, trace};
use playbook_core::{
    BoardSurface, Command, DropPayload, ElementId, Key, KeyEvent, MemoryHost, MenuAction, MenuTarget,
    Modifiers, Orientation, Placement, PlacementError, PointerEvent, Tool,
};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};

fn default_drag_steps() -> usize {
    8
}

/// One scripted input. Pointer positions are surface pixels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "step", rename_all = "kebab-case")]
pub enum Step {
    Tool {
        tool: Tool,
    },
    Color {
        color: String,
    },
    StrokeWidth {
        width: f64,
    },
    Orientation {
        orientation: Orientation,
    },
    Down {
        x: f64,
        y: f64,
        #[serde(default)]
        modifiers: Modifiers,
    },
    Move {
        x: f64,
        y: f64,
        #[serde(default)]
        modifiers: Modifiers,
    },
    Up {
        x: f64,
        y: f64,
        #[serde(default)]
        modifiers: Modifiers,
    },
    /// Press at `from`, move in `steps` increments, release at `to`.
    Drag {
        from: (f64, f64),
        to: (f64, f64),
        #[serde(default = "default_drag_steps")]
        steps: usize,
        #[serde(default)]
        modifiers: Modifiers,
    },
    Leave,
    DoubleClick {
        x: f64,
        y: f64,
    },
    Key {
        key: Key,
        #[serde(default)]
        modifiers: Modifiers,
    },
    /// Replace the label editor's draft text.
    Type {
        text: String,
    },
    Commit,
    Cancel,
    Select {
        ids: Vec<ElementId>,
    },
    Command {
        command: Command,
    },
    Action {
        target: MenuTarget,
        action: MenuAction,
    },
    Drop {
        x: f64,
        y: f64,
        payload: DropPayload,
    },
    /// Arm click-to-place with an asset.
    Place {
        placement: Placement,
    },
}

impl Step {
    /// Feed this step to the surface.
    pub fn apply(&self, surface: &mut BoardSurface, host: &mut MemoryHost) -> Result<(), PlacementError> {
        trace!("Step {self:?}");
        match self {
            Step::Tool { tool } => surface.set_tool(host, *tool),
            Step::Color { color } => surface.set_color(color.clone()),
            Step::StrokeWidth { width } => surface.set_stroke_width(*width),
            Step::Orientation { orientation } => surface.set_orientation(*orientation),
            Step::Down { x, y, modifiers } => {
                surface.pointer_down(host, PointerEvent::at(*x, *y).with_modifiers(*modifiers))
            }
            Step::Move { x, y, modifiers } => {
                surface.pointer_move(host, PointerEvent::at(*x, *y).with_modifiers(*modifiers))
            }
            Step::Up { x, y, modifiers } => {
                surface.pointer_up(host, PointerEvent::at(*x, *y).with_modifiers(*modifiers))
            }
            Step::Drag { from, to, steps, modifiers } => drag(surface, host, *from, *to, *steps, *modifiers),
            Step::Leave => surface.pointer_leave(host),
            Step::DoubleClick { x, y } => surface.double_click(host, PointerEvent::at(*x, *y)),
            Step::Key { key, modifiers } => {
                surface.key_down(host, KeyEvent::new(*key).with_modifiers(*modifiers));
            }
            Step::Type { text } => {
                if !surface.set_draft_text(text.clone()) {
                    debug!("No label editor open, ignoring typed text");
                }
            }
            Step::Commit => surface.commit_text(host),
            Step::Cancel => surface.cancel(),
            Step::Select { ids } => surface.select(ids.iter().copied()),
            Step::Command { command } => surface.execute(host, command.clone()),
            Step::Action { target, action } => surface.run_action(host, *target, action.clone()),
            Step::Drop { x, y, payload } => {
                surface.drop_payload(host, payload.clone(), Point::new(*x, *y))?;
            }
            Step::Place { placement } => surface.set_pending_placement(Some(placement.clone())),
        }
        Ok(())
    }
}

fn drag(
    surface: &mut BoardSurface,
    host: &mut MemoryHost,
    from: (f64, f64),
    to: (f64, f64),
    steps: usize,
    modifiers: Modifiers,
) {
    let at = |x: f64, y: f64| PointerEvent::at(x, y).with_modifiers(modifiers);
    surface.pointer_down(host, at(from.0, from.1));
    let steps = steps.max(1);
    for i in 1..=steps {
        let t = i as f64 / steps as f64;
        surface.pointer_move(host, at(from.0 + (to.0 - from.0) * t, from.1 + (to.1 - from.1) * t));
    }
    surface.pointer_up(host, at(to.0, to.1));
}

/// Parse a script from JSON.
pub fn parse_script(json: &str) -> Result<Vec<Step>, serde_json::Error> {
    serde_json::from_str(json)
}

/// Replay every step in order. Stops at the first rejected drop.
pub fn run_script(surface: &mut BoardSurface, host: &mut MemoryHost, steps: &[Step]) -> AppResult<()> {
    for (index, step) in steps.iter().enumerate() {
        step.apply(surface, host).map_err(|source| AppError::Step { index, source })?;
    }
    debug!(
        "Replayed {} steps: {} updates, {} placements",
        steps.len(),
        host.updates,
        host.placements
    );
    Ok(())
}
