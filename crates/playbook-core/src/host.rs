//! The contract between a board surface and the application that owns the board.

use crate::model::{Board, ElementId};
use log::trace;

/// A pure board update: receives the current board and returns the next one.
pub type Updater = Box<dyn FnOnce(&Board) -> Board>;

/// Owner of the authoritative board.
///
/// The surface never mutates a board in place. Every change reaches the host
/// through [`apply`](BoardHost::apply), once per committed change (and once
/// per pointer move while dragging).
pub trait BoardHost {
    /// The current board.
    fn board(&self) -> &Board;

    /// Replace the board with the result of `updater`.
    fn apply(&mut self, updater: Updater);

    /// A pending placement turned into an item.
    fn placement_consumed(&mut self) {}

    /// The user asked to edit a shape item (double-click).
    fn edit_requested(&mut self, _id: ElementId) {}
}

/// In-memory host for tests and the command-line tool.
#[derive(Debug, Clone, Default)]
pub struct MemoryHost {
    board: Board,
    /// Number of updates applied so far.
    pub updates: usize,
    /// Number of placements consumed.
    pub placements: usize,
    /// Shape ids the surface asked to edit, in order.
    pub edit_requests: Vec<ElementId>,
}

impl MemoryHost {
    pub fn new(board: Board) -> Self {
        Self {
            board,
            ..Default::default()
        }
    }

    pub fn into_board(self) -> Board {
        self.board
    }
}

impl BoardHost for MemoryHost {
    fn board(&self) -> &Board {
        &self.board
    }

    fn apply(&mut self, updater: Updater) {
        self.board = updater(&self.board);
        self.updates += 1;
        trace!("Board update #{}", self.updates);
    }

    fn placement_consumed(&mut self) {
        self.placements += 1;
    }

    fn edit_requested(&mut self, id: ElementId) {
        self.edit_requests.push(id);
    }
}
