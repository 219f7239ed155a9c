use core::time::Duration;

use rand::prelude::*;
use rand::rngs::SmallRng;
use serde::{Deserialize, Serialize};

use crate::*;

/// Label of the menu entry after the difficulties.
pub const EXIT_MENU_ENTRY: &str = "Exit";

/// Abstract input, already decoded from whatever the host reads.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Command {
    MoveUp,
    MoveDown,
    MoveLeft,
    MoveRight,
    Select,
    Flag,
    Exit,
    /// No input this poll
    Idle,
}

type Handler = fn(&mut GameController) -> Result<()>;

/// The transition table, `None` means the command is ignored in that phase.
fn handler_for(phase: Phase, command: Command) -> Option<Handler> {
    use Command::*;
    use Phase::*;

    let handler: Handler = match (phase, command) {
        (Menu, MoveUp) => GameController::menu_up,
        (Menu, MoveDown) => GameController::menu_down,
        (Menu, Select) => GameController::menu_select,
        (Menu, Exit) => GameController::exit,
        (Playing, MoveUp) => |ctl| ctl.move_cursor(0, -1),
        (Playing, MoveDown) => |ctl| ctl.move_cursor(0, 1),
        (Playing, MoveLeft) => |ctl| ctl.move_cursor(-1, 0),
        (Playing, MoveRight) => |ctl| ctl.move_cursor(1, 0),
        (Playing, Select) => GameController::reveal_at_cursor,
        (Playing, Flag) => GameController::flag_at_cursor,
        (Playing, Exit) => GameController::leave_round,
        (Won | Lost, Select | Exit) => GameController::leave_round,
        _ => return None,
    };
    Some(handler)
}

/// Summary counters for a status line.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameStatistics {
    pub phase: Phase,
    pub elapsed: Duration,
    pub remaining_mines: i32,
    pub cells_revealed: CellCount,
    pub flags_placed: CellCount,
}

/// Drives the menu, rounds and game-over screens from a stream of [`Command`]s.
///
/// Owns the session [`GameState`] and, while a round is shown, its [`Board`]. Calls must be serialized by the host;
/// nothing here locks.
#[derive(Debug)]
pub struct GameController {
    state: GameState,
    board: Option<Board>,
    difficulties: DifficultySet,
    rng: SmallRng,
    strategy: GenerationStrategy,
}

impl GameController {
    pub fn new(difficulties: impl Into<DifficultySet>) -> Self {
        Self::with_rng(difficulties.into(), SmallRng::from_os_rng())
    }

    /// Controller whose rounds are fully determined by `seed`.
    pub fn with_seed(difficulties: impl Into<DifficultySet>, seed: u64) -> Self {
        Self::with_rng(difficulties.into(), SmallRng::seed_from_u64(seed))
    }

    fn with_rng(difficulties: DifficultySet, rng: SmallRng) -> Self {
        Self {
            state: GameState::default(),
            board: None,
            difficulties,
            rng,
            strategy: GenerationStrategy::default(),
        }
    }

    pub fn with_strategy(mut self, strategy: GenerationStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Applies one command and returns the phase it leaves the controller in.
    ///
    /// Commands that mean nothing in the current phase are ignored. The only error is a failed mine placement on the
    /// first reveal of a round, which leaves the round playing on a board without mines.
    pub fn handle(&mut self, command: Command) -> Result<Phase> {
        let phase = self.state.phase;
        let Some(handler) = handler_for(phase, command) else {
            return Ok(phase);
        };

        handler(self)?;

        if self.state.phase != phase {
            log::debug!(
                "Phase {:?} -> {:?} on {:?}",
                phase,
                self.state.phase,
                command
            );
        }
        Ok(self.state.phase)
    }

    pub fn phase(&self) -> Phase {
        self.state.phase
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn board(&self) -> Option<&Board> {
        self.board.as_ref()
    }

    pub fn difficulties(&self) -> &DifficultySet {
        &self.difficulties
    }

    pub fn selected_menu_index(&self) -> usize {
        self.state.selected_menu_index
    }

    pub fn cursor(&self) -> Coord2 {
        self.state.cursor
    }

    pub fn elapsed(&self) -> Duration {
        self.state.elapsed()
    }

    pub fn remaining_mines(&self) -> i32 {
        self.state.remaining_mines()
    }

    /// Difficulty names followed by the exit entry.
    pub fn menu_options(&self) -> Vec<&str> {
        self.difficulties
            .iter()
            .map(Difficulty::name)
            .chain([EXIT_MENU_ENTRY])
            .collect()
    }

    pub fn add_difficulty(&mut self, difficulty: Difficulty) {
        log::debug!("Added difficulty {:?}", difficulty.name());
        self.difficulties.push(difficulty);
    }

    pub fn statistics(&self) -> GameStatistics {
        GameStatistics {
            phase: self.state.phase,
            elapsed: self.state.elapsed(),
            remaining_mines: self.state.remaining_mines(),
            cells_revealed: self.state.cells_revealed,
            flags_placed: self.state.flags_placed,
        }
    }

    pub fn is_game_active(&self) -> bool {
        self.state.phase == Phase::Playing && self.board.is_some()
    }

    pub fn is_game_over(&self) -> bool {
        self.state.phase.is_game_over()
    }

    /// Starts a fresh round with the last played difficulty, false if there is none or the controller exited.
    pub fn restart_current_game(&mut self) -> bool {
        if self.state.phase.is_terminal() {
            return false;
        }
        match self.state.difficulty.clone() {
            Some(difficulty) => {
                self.start_round(difficulty);
                true
            }
            None => false,
        }
    }

    fn start_round(&mut self, difficulty: Difficulty) {
        let generator = RandomMinefieldGenerator::new(self.rng.random(), self.strategy);
        log::debug!(
            "Starting {} round, {}x{} with {} mines",
            difficulty.name(),
            difficulty.width(),
            difficulty.height(),
            difficulty.mine_count()
        );
        self.board = Some(Board::with_generator(difficulty.clone(), generator));
        self.state.start_round(difficulty);
    }

    fn menu_up(&mut self) -> Result<()> {
        self.state.selected_menu_index = self.state.selected_menu_index.saturating_sub(1);
        Ok(())
    }

    fn menu_down(&mut self) -> Result<()> {
        // the entry past the last difficulty is "Exit"
        self.state.selected_menu_index =
            (self.state.selected_menu_index + 1).min(self.difficulties.len());
        Ok(())
    }

    fn menu_select(&mut self) -> Result<()> {
        match self.difficulties.get(self.state.selected_menu_index).cloned() {
            Some(difficulty) => self.start_round(difficulty),
            None => self.state.phase = Phase::Exited,
        }
        Ok(())
    }

    fn exit(&mut self) -> Result<()> {
        self.state.phase = Phase::Exited;
        Ok(())
    }

    fn move_cursor(&mut self, dx: i8, dy: i8) -> Result<()> {
        self.state.move_cursor(dx, dy);
        Ok(())
    }

    fn reveal_at_cursor(&mut self) -> Result<()> {
        let Some(board) = self.board.as_mut() else {
            return Ok(());
        };

        let cursor = self.state.cursor;
        let outcome = board
            .reveal_cell(cursor)
            .inspect_err(|err| log::error!("Mine placement failed at {cursor:?}: {err}"))?;

        match outcome {
            RevealOutcome::NoChange => {}
            RevealOutcome::HitMine => {
                board.reveal_all_mines();
                self.state.phase = Phase::Lost;
            }
            RevealOutcome::Revealed => {
                self.state.cells_revealed = board.revealed_count();
                if board.is_solved() {
                    self.state.phase = Phase::Won;
                }
            }
        }
        Ok(())
    }

    fn flag_at_cursor(&mut self) -> Result<()> {
        let Some(board) = self.board.as_mut() else {
            return Ok(());
        };

        let outcome = board.toggle_flag(self.state.cursor);
        if !outcome.has_update() {
            return Ok(());
        }

        self.state.flags_placed = match outcome {
            FlagOutcome::Flagged => self.state.flags_placed + 1,
            _ => self.state.flags_placed.saturating_sub(1),
        };
        log::trace!(
            "{:?} at {:?}, {} flags placed",
            outcome,
            self.state.cursor,
            self.state.flags_placed
        );
        Ok(())
    }

    fn leave_round(&mut self) -> Result<()> {
        self.board = None;
        self.state.back_to_menu();
        Ok(())
    }
}

impl Default for GameController {
    fn default() -> Self {
        Self::new(DifficultySet::presets())
    }
}
