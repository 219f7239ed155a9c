use core::time::Duration;

use serde::{Deserialize, Serialize};
use web_time::Instant;

use crate::*;

/// Valid transitions:
/// - Menu -> Playing
/// - Menu -> Exited
/// - Playing -> Won
/// - Playing -> Lost
/// - Playing -> Menu
/// - Won -> Menu
/// - Lost -> Menu
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    /// Initial state, choosing a difficulty
    #[default]
    Menu,
    /// A round is in progress
    Playing,
    /// Round ended and player won
    Won,
    /// Round ended and player lost
    Lost,
    /// Terminal, the host should shut down
    Exited,
}

impl Phase {
    /// Indicates a round has ended and awaits acknowledgement
    pub const fn is_game_over(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }

    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Exited)
    }
}

/// Session data the controller mutates between commands.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GameState {
    pub(crate) phase: Phase,
    pub(crate) cursor: Coord2,
    pub(crate) started_at: Option<Instant>,
    pub(crate) flags_placed: CellCount,
    pub(crate) cells_revealed: CellCount,
    pub(crate) difficulty: Option<Difficulty>,
    pub(crate) selected_menu_index: usize,
}

impl GameState {
    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn cursor(&self) -> Coord2 {
        self.cursor
    }

    pub fn flags_placed(&self) -> CellCount {
        self.flags_placed
    }

    pub fn cells_revealed(&self) -> CellCount {
        self.cells_revealed
    }

    pub fn difficulty(&self) -> Option<&Difficulty> {
        self.difficulty.as_ref()
    }

    pub fn selected_menu_index(&self) -> usize {
        self.selected_menu_index
    }

    /// Time since the current round started, zero if none has.
    pub fn elapsed(&self) -> Duration {
        self.started_at
            .map(|started_at| started_at.elapsed())
            .unwrap_or_default()
    }

    /// Mines minus flags, negative when the player over-flags.
    pub fn remaining_mines(&self) -> i32 {
        self.difficulty.as_ref().map_or(0, |difficulty| {
            i32::from(difficulty.mine_count()) - i32::from(self.flags_placed)
        })
    }

    pub(crate) fn start_round(&mut self, difficulty: Difficulty) {
        self.phase = Phase::Playing;
        self.started_at = Some(Instant::now());
        self.cursor = (0, 0);
        self.flags_placed = 0;
        self.cells_revealed = 0;
        self.difficulty = Some(difficulty);
    }

    /// Moves the cursor by a delta clamped to the board, returning whether it moved.
    pub(crate) fn move_cursor(&mut self, dx: i8, dy: i8) -> bool {
        let Some(difficulty) = &self.difficulty else {
            return false;
        };
        let clamp = |value: Coord, delta: i8, len: Coord| {
            value
                .saturating_add_signed(delta)
                .min(len.saturating_sub(1))
        };

        let next = (
            clamp(self.cursor.0, dx, difficulty.width()),
            clamp(self.cursor.1, dy, difficulty.height()),
        );
        let moved = next != self.cursor;
        self.cursor = next;
        moved
    }

    pub(crate) fn back_to_menu(&mut self) {
        self.phase = Phase::Menu;
        self.selected_menu_index = 0;
    }
}
