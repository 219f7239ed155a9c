use std::collections::BTreeSet;
use std::fmt;

use ndarray::Array2;

use crate::*;

/// Mines are placed on the first reveal, at most once.
#[derive(Debug)]
enum MinePlacement {
    Pending(Box<dyn MinefieldGenerator>),
    Placed,
}

/// The grid of one round: every cell, the mine set, and whether mines have been placed yet.
#[derive(Debug)]
pub struct Board {
    difficulty: Difficulty,
    cells: Array2<Cell>,
    mines: BTreeSet<Coord2>,
    placement: MinePlacement,
}

impl Board {
    /// Empty board whose mines will be drawn from an OS-seeded generator on the first reveal.
    pub fn new(difficulty: Difficulty) -> Self {
        Self::with_generator(
            difficulty,
            RandomMinefieldGenerator::from_seed(rand::random()),
        )
    }

    pub fn with_generator(
        difficulty: Difficulty,
        generator: impl MinefieldGenerator + 'static,
    ) -> Self {
        Self {
            cells: Array2::default(grid_shape(difficulty.size())),
            mines: BTreeSet::new(),
            placement: MinePlacement::Pending(Box::new(generator)),
            difficulty,
        }
    }

    /// Board with mines already in place, the first reveal has no safety guarantee.
    pub fn from_layout(difficulty: Difficulty, layout: MineLayout) -> Result<Self> {
        if !layout.is_valid_for(&difficulty) {
            return Err(GameError::InvalidBoardShape);
        }
        let mut board = Self {
            cells: Array2::default(grid_shape(difficulty.size())),
            mines: BTreeSet::new(),
            placement: MinePlacement::Placed,
            difficulty,
        };
        board.apply_layout(&layout);
        Ok(board)
    }

    pub fn difficulty(&self) -> &Difficulty {
        &self.difficulty
    }

    /// `(width, height)`
    pub fn size(&self) -> Coord2 {
        self.difficulty.size()
    }

    pub fn is_initialized(&self) -> bool {
        matches!(self.placement, MinePlacement::Placed)
    }

    pub fn cell_at(&self, coords: Coord2) -> Option<Cell> {
        if in_bounds(coords, self.size()) {
            Some(self.cells[coords.to_nd_index()])
        } else {
            None
        }
    }

    /// Row-major grid, indexed `[y, x]`.
    pub fn cells(&self) -> &Array2<Cell> {
        &self.cells
    }

    /// Mine coordinates, empty until the first reveal.
    pub fn mines(&self) -> impl Iterator<Item = Coord2> + '_ {
        self.mines.iter().copied()
    }

    pub fn neighbors(&self, coords: Coord2) -> NeighborIter {
        NeighborIter::new(coords, self.size())
    }

    pub fn revealed_count(&self) -> CellCount {
        self.count_cells(|cell| cell.is_revealed)
    }

    pub fn flag_count(&self) -> CellCount {
        self.count_cells(|cell| cell.is_flagged)
    }

    /// Every non-mine cell is revealed, never true before mines are placed.
    pub fn is_solved(&self) -> bool {
        self.is_initialized() && self.cells.iter().all(|cell| cell.has_mine || cell.is_revealed)
    }

    pub fn reveal_cell(&mut self, coords: Coord2) -> Result<RevealOutcome> {
        match self.cell_at(coords) {
            Some(cell) if cell.can_reveal() => {}
            _ => return Ok(RevealOutcome::NoChange),
        }

        self.place_mines(coords)?;

        let cell = &mut self.cells[coords.to_nd_index()];
        cell.is_revealed = true;

        if cell.has_mine {
            log::debug!("Revealed mine at {:?}", coords);
            return Ok(RevealOutcome::HitMine);
        }

        log::debug!("Revealed cell at {:?}, mine count: {}", coords, cell.adjacent_mines);
        if cell.adjacent_mines == 0 {
            self.flood_fill(coords);
        }
        Ok(RevealOutcome::Revealed)
    }

    pub fn toggle_flag(&mut self, coords: Coord2) -> FlagOutcome {
        if !in_bounds(coords, self.size()) {
            return FlagOutcome::NoChange;
        }

        let cell = &mut self.cells[coords.to_nd_index()];
        if !cell.can_flag() {
            return FlagOutcome::NoChange;
        }

        cell.is_flagged = !cell.is_flagged;
        if cell.is_flagged {
            FlagOutcome::Flagged
        } else {
            FlagOutcome::Unflagged
        }
    }

    /// Exposes every mine, flagged or not, once the round is lost.
    pub fn reveal_all_mines(&mut self) {
        for &coords in &self.mines {
            self.cells[coords.to_nd_index()].is_revealed = true;
        }
    }

    fn place_mines(&mut self, safe: Coord2) -> Result<()> {
        let MinePlacement::Pending(generator) = &mut self.placement else {
            return Ok(());
        };

        let layout = generator.generate(&self.difficulty, safe)?;
        if !layout.is_valid_for(&self.difficulty) {
            return Err(GameError::InvalidBoardShape);
        }

        log::debug!(
            "Placed {} mines on {}x{} board, safe at {:?}",
            layout.mine_count(),
            self.difficulty.width(),
            self.difficulty.height(),
            safe
        );
        self.apply_layout(&layout);
        self.placement = MinePlacement::Placed;
        Ok(())
    }

    fn apply_layout(&mut self, layout: &MineLayout) {
        self.mines = layout.iter_mines().collect();

        for ((y, x), cell) in self.cells.indexed_iter_mut() {
            let coords = (x as Coord, y as Coord);
            cell.has_mine = layout[coords];
            cell.adjacent_mines = if cell.has_mine {
                0
            } else {
                layout.adjacent_mine_count(coords)
            };
        }
    }

    /// Reveals the connected zero region around `origin` and its numbered border.
    fn flood_fill(&mut self, origin: Coord2) {
        let mut pending = vec![origin];
        log::trace!("Starting flood-fill from {:?}", origin);

        while let Some(coords) = pending.pop() {
            for neighbor in self.neighbors(coords) {
                let cell = &mut self.cells[neighbor.to_nd_index()];
                if !cell.can_reveal() {
                    continue;
                }

                cell.is_revealed = true;
                log::trace!(
                    "Flood opened cell at {:?}, mine count: {}",
                    neighbor,
                    cell.adjacent_mines
                );

                if !cell.has_mine && cell.adjacent_mines == 0 {
                    pending.push(neighbor);
                }
            }
        }
    }

    fn count_cells(&self, predicate: impl Fn(&Cell) -> bool) -> CellCount {
        self.cells
            .iter()
            .filter(|&cell| predicate(cell))
            .count()
            .try_into()
            .unwrap_or(CellCount::MAX)
    }
}

/// One text row per board row: `F` flag, `#` hidden, `*` revealed mine, digits for counts, space for zero.
impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (y, row) in self.cells.rows().into_iter().enumerate() {
            if y > 0 {
                writeln!(f)?;
            }
            for cell in row {
                let glyph = match cell.view() {
                    CellView::Flagged => 'F',
                    CellView::Hidden => '#',
                    CellView::Mine => '*',
                    CellView::Revealed(0) => ' ',
                    CellView::Revealed(count) => char::from(b'0' + count),
                };
                write!(f, "{glyph}")?;
            }
        }
        Ok(())
    }
}
