use thiserror::Error;

use crate::{CellCount, Coord};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid difficulty {name:?}: {width}x{height} board cannot hold {mines} mines")]
    InvalidDifficulty {
        name: String,
        width: Coord,
        height: Coord,
        mines: CellCount,
    },
    #[error("Cannot place {mines} mines in {available} available cells")]
    Placement {
        mines: CellCount,
        available: CellCount,
    },
    #[error("Invalid coordinates")]
    InvalidCoords,
    #[error("Board shape does not match declared size")]
    InvalidBoardShape,
    #[error("Malformed difficulty list: {0}")]
    MalformedConfig(String),
}

pub type Result<T> = core::result::Result<T, GameError>;
