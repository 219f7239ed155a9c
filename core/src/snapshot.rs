use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Everything a renderer needs to draw one frame, detached from the controller.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub phase: Phase,
    pub menu_options: Vec<String>,
    pub selected_menu_index: usize,
    pub cursor: Coord2,
    pub elapsed_secs: u64,
    pub remaining_mines: i32,
    pub cells_revealed: CellCount,
    pub flags_placed: CellCount,
    /// Row-major, indexed `[y, x]`, absent outside a round.
    pub cells: Option<Array2<CellView>>,
}

impl Snapshot {
    pub fn from_controller(controller: &GameController) -> Self {
        let state = controller.state();
        Self {
            phase: state.phase(),
            menu_options: controller
                .menu_options()
                .into_iter()
                .map(str::to_owned)
                .collect(),
            selected_menu_index: state.selected_menu_index(),
            cursor: state.cursor(),
            elapsed_secs: state.elapsed().as_secs(),
            remaining_mines: state.remaining_mines(),
            cells_revealed: state.cells_revealed(),
            flags_placed: state.flags_placed(),
            cells: controller.board().map(Self::cells_of),
        }
    }

    fn cells_of(board: &Board) -> Array2<CellView> {
        board.cells().map(|cell| cell.view())
    }

    pub fn cell_at(&self, coords: Coord2) -> Option<CellView> {
        self.cells
            .as_ref()?
            .get(coords.to_nd_index())
            .copied()
    }
}
