use serde::{Deserialize, Serialize};

/// Full state of one grid position.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    pub has_mine: bool,
    pub is_revealed: bool,
    pub is_flagged: bool,
    /// Only meaningful for non-mine cells once mines are placed.
    pub adjacent_mines: u8,
}

impl Cell {
    pub const fn can_reveal(self) -> bool {
        !self.is_revealed && !self.is_flagged
    }

    pub const fn can_flag(self) -> bool {
        !self.is_revealed
    }

    pub const fn view(self) -> CellView {
        match (self.is_revealed, self.has_mine, self.is_flagged) {
            (true, true, _) => CellView::Mine,
            (true, false, _) => CellView::Revealed(self.adjacent_mines),
            (false, _, true) => CellView::Flagged,
            (false, _, false) => CellView::Hidden,
        }
    }
}

/// Player-visible state of a cell, what a renderer needs to draw it.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellView {
    #[default]
    Hidden,
    Flagged,
    Revealed(u8),
    Mine,
}

impl CellView {
    pub const fn is_unrevealed(self) -> bool {
        matches!(self, Self::Hidden | Self::Flagged)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flagged_cell_cannot_be_revealed() {
        let cell = Cell {
            is_flagged: true,
            ..Default::default()
        };

        assert!(!cell.can_reveal());
        assert!(cell.can_flag());
    }

    #[test]
    fn revealed_mine_shows_as_mine_even_if_flagged() {
        let cell = Cell {
            has_mine: true,
            is_revealed: true,
            is_flagged: true,
            adjacent_mines: 0,
        };

        assert_eq!(cell.view(), CellView::Mine);
        assert!(!cell.view().is_unrevealed());
    }
}
