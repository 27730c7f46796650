use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    InProgress,
    Win,
    Loss,
}

impl GameStatus {
    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Win | Self::Loss)
    }
}

impl Default for GameStatus {
    fn default() -> Self {
        Self::InProgress
    }
}

/// Judges the flags: a win needs every mine marked and nothing else marked.
pub fn evaluate(board: &Board, mines: &MinePlacement) -> GameStatus {
    let wrong_flag = board.iter().find(|&(coords, cell)| {
        let marked = cell.state() == CellState::Marked;
        marked != mines.contains_mine(coords)
    });

    match wrong_flag {
        Some((coords, _)) => {
            log::trace!("Flag check failed at {:?}", coords);
            GameStatus::Loss
        }
        None => GameStatus::Win,
    }
}
