use thiserror::Error;

use crate::{CellCount, Coord};

/// Configuration problems, reported when a game is created.
#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Board size {0}x{1} is outside 1x1 to 20x20")]
    InvalidSize(Coord, Coord),
    #[error("At least one mine is required")]
    NoMines,
    #[error("Too many mines, requested {mines} but at most {max} fit")]
    TooManyMines { mines: CellCount, max: CellCount },
    #[error("Invalid coordinates")]
    InvalidCoords,
    #[error("Board shape does not match declared size")]
    InvalidBoardShape,
    #[error("Generator placed {generated} mines, requested {requested}")]
    GeneratorMismatch {
        requested: CellCount,
        generated: CellCount,
    },
    #[error("Saved game is inconsistent")]
    InvalidSnapshot,
}

pub type Result<T> = core::result::Result<T, GameError>;

/// Why a player action did not change anything.
#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum Rejection {
    #[error("Coordinates are outside the board")]
    OutOfBounds,
    #[error("Cell does not accept this action in its current state")]
    NotActionable,
    #[error("Game already ended, no new moves are accepted")]
    GameOver,
}
