//! The board surface: turns pointer and keyboard input into board updates.
//!
//! The surface owns only transient state (tool, selection, active gesture).
//! The board itself stays with the [`BoardHost`], which receives every change
//! as a pure updater.

use crate::commands::{Command, apply_duplicate, delete, duplicate_plan, move_endpoint};
use crate::config::SurfaceConfig;
use crate::geometry::{Orientation, clamp_unit, from_surface, rect_contains, to_surface};
use crate::hit::{hit_test_drawing, hit_test_handle, hit_test_item};
use crate::host::BoardHost;
use crate::input::{Key, KeyEvent, Modifiers, PointerEvent};
use crate::interaction::{Interaction, MoveState, TextDraft};
use crate::menu::{MenuAction, MenuTarget, menu_for};
use crate::model::{Board, Drawing, DrawingKind, ElementId};
use crate::path::HIT_AREA_PADDING;
use crate::placement::{DropPayload, Placement, PlacementError};
use crate::selection::{Endpoint, Selection, ids_in_rect, selection_bounds};
use crate::tools::Tool;
use kurbo::{Point, Rect, Size};
use log::{debug, trace, warn};

/// What lies under the pointer, topmost first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    /// Endpoint handle of a line-like drawing (move tool only).
    Handle(ElementId, Endpoint),
    Item(ElementId),
    Drawing(ElementId),
    /// Empty space inside the multi-selection bounding box (selection tool only).
    SelectionBox,
    Surface,
}

/// Interactive tactical board surface.
#[derive(Debug, Clone)]
pub struct BoardSurface {
    tool: Tool,
    color: String,
    stroke_width: f64,
    orientation: Orientation,
    size: Size,
    config: SurfaceConfig,
    pending: Option<Placement>,
    selection: Selection,
    interaction: Interaction,
}

impl BoardSurface {
    /// Create a surface rendered at `size` pixels.
    pub fn new(size: Size) -> Self {
        Self {
            tool: Tool::default(),
            color: "#ffffff".to_string(),
            stroke_width: 3.0,
            orientation: Orientation::default(),
            size,
            config: SurfaceConfig::default(),
            pending: None,
            selection: Selection::new(),
            interaction: Interaction::Idle,
        }
    }

    pub fn with_config(mut self, config: SurfaceConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_orientation(mut self, orientation: Orientation) -> Self {
        self.orientation = orientation;
        self
    }

    pub fn with_tool(mut self, tool: Tool) -> Self {
        self.tool = tool;
        self
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = color.into();
        self
    }

    pub fn with_stroke_width(mut self, width: f64) -> Self {
        self.stroke_width = width;
        self
    }

    pub fn tool(&self) -> Tool {
        self.tool
    }

    pub fn color(&self) -> &str {
        &self.color
    }

    pub fn stroke_width(&self) -> f64 {
        self.stroke_width
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn config(&self) -> &SurfaceConfig {
        &self.config
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn interaction(&self) -> &Interaction {
        &self.interaction
    }

    pub fn pending_placement(&self) -> Option<&Placement> {
        self.pending.as_ref()
    }

    /// Switch tools. A gesture in flight is finished first, so an open label
    /// or a drawing under way is committed. Leaving the selection tool clears
    /// the selection.
    pub fn set_tool(&mut self, host: &mut dyn BoardHost, tool: Tool) {
        if tool == self.tool {
            return;
        }
        if matches!(self.interaction, Interaction::EditingText(_)) {
            self.commit_text(host);
        } else if !self.interaction.is_idle() {
            debug!("Finishing {} gesture on tool change", self.interaction.name());
            self.finish(host);
        }
        if self.tool == Tool::Selection {
            self.selection.clear();
        }
        debug!("Tool: {:?} -> {:?}", self.tool, tool);
        self.tool = tool;
    }

    pub fn set_color(&mut self, color: impl Into<String>) {
        self.color = color.into();
    }

    pub fn set_stroke_width(&mut self, width: f64) {
        self.stroke_width = width;
    }

    pub fn set_orientation(&mut self, orientation: Orientation) {
        self.orientation = orientation;
    }

    pub fn set_size(&mut self, size: Size) {
        self.size = size;
    }

    /// Arm (or disarm) click-to-place. A pending placement wins over the
    /// active tool for the next press on empty surface.
    pub fn set_pending_placement(&mut self, placement: Option<Placement>) {
        self.pending = placement;
    }

    /// Replace the selection from the host side.
    pub fn select(&mut self, ids: impl IntoIterator<Item = ElementId>) {
        self.selection.replace(ids);
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    /// The drawing being created, for live preview.
    pub fn preview(&self) -> Option<&Drawing> {
        self.interaction.preview_drawing()
    }

    /// Normalized bounding box of the current selection.
    pub fn selection_bounds(&self, board: &Board) -> Option<Rect> {
        selection_bounds(board, &self.selection)
    }

    /// Convert a surface pixel position to a clamped normalized position.
    pub fn to_board(&self, position: Point) -> Point {
        clamp_unit(from_surface(position, self.size))
    }

    /// Find what lies under a pixel position.
    pub fn target_at(&self, board: &Board, position: Point) -> Target {
        if self.tool == Tool::Move {
            let radius = self.config.handle_radius;
            for drawing in board.drawings.iter().rev() {
                if let Some(endpoint) = hit_test_handle(drawing, position, self.size, radius) {
                    return Target::Handle(drawing.id, endpoint);
                }
            }
        }

        let token_hit = |players: bool| {
            board
                .items
                .iter()
                .rev()
                .filter(|item| item.is_player() == players)
                .find(|item| hit_test_item(item, position, self.size, self.orientation, &self.config))
                .map(|item| Target::Item(item.id))
        };
        if let Some(target) = token_hit(true).or_else(|| token_hit(false)) {
            return target;
        }

        if let Some(drawing) = board
            .drawings
            .iter()
            .rev()
            .find(|d| hit_test_drawing(d, position, self.size))
        {
            return Target::Drawing(drawing.id);
        }

        if self.tool == Tool::Selection && self.selection.len() > 1 {
            let in_box = self.selection_bounds(board).is_some_and(|bounds| {
                let corner = Point::new(bounds.x1, bounds.y1);
                let px = Rect::from_points(to_surface(bounds.origin(), self.size), to_surface(corner, self.size));
                rect_contains(px.inflate(HIT_AREA_PADDING, HIT_AREA_PADDING), position)
            });
            if in_box {
                return Target::SelectionBox;
            }
        }

        Target::Surface
    }

    /// Handle a pointer press.
    pub fn pointer_down(&mut self, host: &mut dyn BoardHost, event: PointerEvent) {
        if matches!(self.interaction, Interaction::EditingText(_)) {
            // A press anywhere commits the open label and does nothing else.
            self.commit_text(host);
            return;
        }
        if !self.interaction.is_idle() {
            debug!("Finishing stale {} gesture", self.interaction.name());
            self.finish(host);
        }
        self.selection.retain_existing(host.board());

        let point = self.to_board(event.position);
        match self.target_at(host.board(), event.position) {
            Target::Handle(id, endpoint) => self.begin_resize(id, endpoint),
            Target::Item(id) | Target::Drawing(id) => {
                self.begin_move(host.board(), id, point, event.modifiers)
            }
            Target::SelectionBox => {
                let state = MoveState::capture(host.board(), point, self.selection.iter());
                debug!("Moving selection of {}", self.selection.len());
                self.interaction = Interaction::Moving(state);
            }
            Target::Surface => self.press_surface(host, point),
        }
    }

    /// Handle pointer motion.
    pub fn pointer_move(&mut self, host: &mut dyn BoardHost, event: PointerEvent) {
        let point = self.to_board(event.position);
        if matches!(self.interaction, Interaction::Drawing(_) | Interaction::Selecting { .. }) {
            self.track(point);
            return;
        }
        match &mut self.interaction {
            Interaction::Idle
            | Interaction::EditingText(_)
            | Interaction::Drawing(_)
            | Interaction::Selecting { .. } => {}
            Interaction::Moving(state) if state.is_empty() => {}
            Interaction::Moving(state) => {
                state.current = point;
                let state = state.clone();
                trace!("Move delta {:?}", state.delta());
                host.apply(Box::new(move |board: &Board| state.apply(board)));
            }
            Interaction::Resizing { drawing_id, endpoint } => {
                let (id, endpoint) = (*drawing_id, *endpoint);
                trace!("Endpoint {endpoint:?} of {id} -> {point:?}");
                host.apply(Box::new(move |board: &Board| move_endpoint(board, id, endpoint, point)));
            }
        }
    }

    /// Handle a pointer release: commits drawings and rubber-band selections.
    pub fn pointer_up(&mut self, host: &mut dyn BoardHost, event: PointerEvent) {
        let point = self.to_board(event.position);
        self.track(point);
        self.finish(host);
    }

    /// The pointer left the surface. Behaves like a release at the last
    /// known position.
    pub fn pointer_leave(&mut self, host: &mut dyn BoardHost) {
        self.finish(host);
    }

    /// Handle a double click: enters label editing on text, asks the host to
    /// edit a shape item.
    pub fn double_click(&mut self, host: &mut dyn BoardHost, event: PointerEvent) {
        if matches!(self.interaction, Interaction::EditingText(_)) {
            return;
        }
        match self.target_at(host.board(), event.position) {
            Target::Drawing(id) => {
                self.begin_text_edit(host, id);
            }
            Target::Item(id) if host.board().item(id).is_some_and(|i| i.is_shape()) => {
                debug!("Edit requested for shape {id}");
                host.edit_requested(id);
            }
            _ => {}
        }
    }

    /// Open the label editor on an existing text drawing.
    ///
    /// Returns `false` if `id` is not a text label.
    pub fn begin_text_edit(&mut self, host: &mut dyn BoardHost, id: ElementId) -> bool {
        let Some(draft) = host.board().drawing(id).and_then(TextDraft::existing) else {
            return false;
        };
        match self.interaction.text_draft().map(|open| open.id) {
            Some(open) if open == id => return true,
            Some(_) => self.commit_text(host),
            None if self.interaction.is_idle() => {}
            None => self.finish(host),
        }
        debug!("Editing label {id}");
        self.interaction = Interaction::EditingText(draft);
        true
    }

    /// Start dragging an endpoint handle.
    pub fn begin_resize(&mut self, drawing_id: ElementId, endpoint: Endpoint) {
        debug!("Resizing {drawing_id} by {endpoint:?}");
        self.interaction = Interaction::Resizing { drawing_id, endpoint };
    }

    /// Handle a key press. Returns whether the surface consumed it; keys are
    /// only consumed while a label editor is open.
    pub fn key_down(&mut self, host: &mut dyn BoardHost, event: KeyEvent) -> bool {
        let Interaction::EditingText(draft) = &mut self.interaction else {
            return false;
        };
        match event.key {
            Key::Enter if event.modifiers.shift => draft.text.push('\n'),
            Key::Enter => self.commit_text(host),
            Key::Escape => {
                debug!("Discarding label edit");
                self.interaction = Interaction::Idle;
            }
            Key::Backspace => {
                draft.text.pop();
            }
            Key::Char(c) => draft.text.push(c),
        }
        true
    }

    /// Replace the whole draft text of the open label editor.
    pub fn set_draft_text(&mut self, text: impl Into<String>) -> bool {
        match &mut self.interaction {
            Interaction::EditingText(draft) => {
                draft.text = text.into();
                true
            }
            _ => false,
        }
    }

    /// Commit the open label editor, if any.
    pub fn commit_text(&mut self, host: &mut dyn BoardHost) {
        if !matches!(self.interaction, Interaction::EditingText(_)) {
            return;
        }
        let Interaction::EditingText(draft) = std::mem::take(&mut self.interaction) else {
            return;
        };
        match (draft.is_new, draft.is_blank()) {
            (true, true) => {
                debug!("Discarding empty label");
                return;
            }
            (false, true) => {
                debug!("Deleting emptied label {}", draft.id);
                self.selection.remove(draft.id);
            }
            _ => debug!("Committing label {}", draft.id),
        }
        host.apply(Box::new(move |board: &Board| draft.apply(board)));
    }

    /// Abort the active gesture without committing anything.
    pub fn cancel(&mut self) {
        if !self.interaction.is_idle() {
            debug!("Cancelled {} gesture", self.interaction.name());
        }
        self.interaction = Interaction::Idle;
    }

    /// Run a command through the host, keeping the selection consistent.
    pub fn execute(&mut self, host: &mut dyn BoardHost, command: Command) {
        match command {
            Command::Delete { ids } => {
                for id in &ids {
                    self.selection.remove(*id);
                }
                debug!("Deleting {} objects", ids.len());
                host.apply(Box::new(move |board: &Board| delete(board, &ids)));
            }
            Command::Duplicate { ids } => {
                let plan = duplicate_plan(host.board(), &ids);
                if plan.is_empty() {
                    debug!("Nothing to duplicate");
                    return;
                }
                self.selection.replace(plan.iter().map(|(_, copy)| *copy));
                let offset = self.config.duplicate_offset;
                debug!("Duplicating {} objects", plan.len());
                host.apply(Box::new(move |board: &Board| apply_duplicate(board, &plan, offset)));
            }
            command if !command.applies_to(host.board()) => {
                debug!("{command:?} has no target on the board");
            }
            command => host.apply(Box::new(move |board: &Board| command.apply(board))),
        }
    }

    /// Run a context menu action on a target.
    pub fn run_action(&mut self, host: &mut dyn BoardHost, target: MenuTarget, action: MenuAction) {
        if !menu_for(host.board(), target).contains(&action.entry()) {
            warn!("{:?} is not available for {target:?}", action.entry());
            return;
        }
        let ids = match target {
            MenuTarget::Item(id) | MenuTarget::Drawing(id) => vec![id],
            MenuTarget::Selection => self.selection.ids(),
        };
        if action == MenuAction::EditText {
            if let MenuTarget::Drawing(id) = target {
                self.begin_text_edit(host, id);
            }
            return;
        }
        if let Some(command) = action.command(&ids, self.config.resize_step) {
            self.execute(host, command);
        }
    }

    /// Place an asset dropped at a surface pixel position.
    pub fn drop_payload(
        &mut self,
        host: &mut dyn BoardHost,
        payload: DropPayload,
        position: Point,
    ) -> Result<ElementId, PlacementError> {
        let placement = Placement::try_from(payload).inspect_err(|e| warn!("Rejected drop: {e}"))?;
        let point = self.to_board(position);
        Ok(self.place(host, placement, point))
    }

    fn place(&mut self, host: &mut dyn BoardHost, placement: Placement, point: Point) -> ElementId {
        let kind = placement.kind();
        let item = placement.into_item(point);
        let id = item.id;
        debug!("Placing {kind} {} at {point:?}", item.element_id);
        host.apply(Box::new(move |board: &Board| {
            let mut next = board.clone();
            next.items.push(item);
            next
        }));
        id
    }

    fn press_surface(&mut self, host: &mut dyn BoardHost, point: Point) {
        if let Some(placement) = self.pending.take() {
            self.place(host, placement, point);
            host.placement_consumed();
            return;
        }
        match self.tool {
            Tool::Move => self.selection.clear(),
            Tool::Selection => {
                self.selection.clear();
                self.interaction = Interaction::Selecting { start: point, end: point };
            }
            Tool::Text => {
                self.selection.clear();
                debug!("New label at {point:?}");
                self.interaction =
                    Interaction::EditingText(TextDraft::new_label(point, self.color.clone(), self.stroke_width));
            }
            tool => {
                if let Some(kind) = tool.drawing_kind() {
                    self.selection.clear();
                    debug!("Drawing {kind:?}");
                    self.interaction =
                        Interaction::Drawing(Drawing::new(kind, point, self.color.clone(), self.stroke_width));
                }
            }
        }
    }

    fn begin_move(&mut self, board: &Board, id: ElementId, point: Point, modifiers: Modifiers) {
        let group = self.tool == Tool::Selection && self.selection.len() > 1 && self.selection.contains(id);
        let ids = if group {
            self.selection.ids()
        } else if modifiers.extends_selection() {
            self.selection.insert(id);
            self.selection.ids()
        } else {
            self.selection.replace([id]);
            vec![id]
        };
        debug!("Moving {} objects", ids.len());
        self.interaction = Interaction::Moving(MoveState::capture(board, point, ids));
    }

    /// Follow the pointer in gestures that only touch transient state.
    fn track(&mut self, point: Point) {
        match &mut self.interaction {
            Interaction::Drawing(drawing) if drawing.kind == DrawingKind::Pencil => {
                if drawing.end() != Some(point) {
                    drawing.points.push(point);
                }
            }
            Interaction::Drawing(drawing) => {
                drawing.points.truncate(1);
                drawing.points.push(point);
            }
            Interaction::Selecting { end, .. } => *end = point,
            _ => {}
        }
    }

    /// End the active gesture. An open label editor survives.
    fn finish(&mut self, host: &mut dyn BoardHost) {
        match std::mem::take(&mut self.interaction) {
            Interaction::Drawing(mut drawing) => {
                drawing.normalize_endpoints();
                if drawing.is_renderable() {
                    debug!("Committing {:?} {}", drawing.kind, drawing.id);
                    host.apply(Box::new(move |board: &Board| {
                        let mut next = board.clone();
                        next.drawings.push(drawing);
                        next
                    }));
                } else {
                    warn!("Dropping unrenderable {:?}", drawing.kind);
                }
            }
            Interaction::Selecting { start, end } => {
                let ids = ids_in_rect(host.board(), start, end);
                debug!("Selected {} objects", ids.len());
                self.selection.replace(ids);
            }
            Interaction::EditingText(draft) => self.interaction = Interaction::EditingText(draft),
            Interaction::Moving(_) | Interaction::Resizing { .. } | Interaction::Idle => {}
        }
    }
}
