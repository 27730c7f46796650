#![no_std]

extern crate alloc;

use core::ops::Index;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

pub use board::*;
pub use cell::*;
pub use error::*;
pub use generator::*;
pub use reveal::*;
pub use session::*;
pub use status::*;
pub use types::*;

mod board;
mod cell;
mod error;
mod generator;
mod reveal;
mod session;
mod status;
mod types;

/// Smallest accepted board side.
pub const MIN_SIDE: Coord = 1;

/// Largest accepted board side.
pub const MAX_SIDE: Coord = 20;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    pub size: Coord2,
    pub mines: CellCount,
}

impl GameConfig {
    pub const fn new_unchecked(size: Coord2, mines: CellCount) -> Self {
        Self { size, mines }
    }

    pub fn new(size: Coord2, mines: CellCount) -> Result<Self> {
        let config = Self::new_unchecked(size, mines);
        config.validate()?;
        Ok(config)
    }

    /// Pulls arbitrary settings into range the way the settings form does.
    ///
    /// A 1x1 board still comes out invalid, there is no room for a mine next
    /// to a free cell.
    pub fn clamped((size_x, size_y): Coord2, mines: CellCount) -> Self {
        let size_x = size_x.clamp(MIN_SIDE, MAX_SIDE);
        let size_y = size_y.clamp(MIN_SIDE, MAX_SIDE);
        let mines = mines.min(mult(size_x, size_y) - 1).max(1);
        Self::new_unchecked((size_x, size_y), mines)
    }

    pub fn validate(&self) -> Result<()> {
        let (size_x, size_y) = self.size;
        let valid_side = MIN_SIDE..=MAX_SIDE;
        if !valid_side.contains(&size_x) || !valid_side.contains(&size_y) {
            return Err(GameError::InvalidSize(size_x, size_y));
        }
        if self.mines == 0 {
            return Err(GameError::NoMines);
        }
        let max = self.total_cells() - 1;
        if self.mines > max {
            return Err(GameError::TooManyMines {
                mines: self.mines,
                max,
            });
        }
        Ok(())
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.size.0, self.size.1)
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new_unchecked((8, 8), 10)
    }
}

/// Where the mines are, as a dense mask.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "PlacementSnapshot")]
pub struct MinePlacement {
    mine_mask: Array2<bool>,
    mine_count: CellCount,
}

#[derive(Deserialize)]
struct PlacementSnapshot {
    mine_mask: Array2<bool>,
    mine_count: CellCount,
}

impl TryFrom<PlacementSnapshot> for MinePlacement {
    type Error = GameError;

    fn try_from(snapshot: PlacementSnapshot) -> Result<Self> {
        let placement = Self::from_mine_mask(snapshot.mine_mask);
        if placement.mine_count != snapshot.mine_count {
            return Err(GameError::InvalidSnapshot);
        }
        Ok(placement)
    }
}

impl MinePlacement {
    pub fn from_mine_mask(mine_mask: Array2<bool>) -> Self {
        let mine_count = mine_mask.iter().filter(|&&is_mine| is_mine).count();
        Self {
            mine_count: CellCount::try_from(mine_count).unwrap_or(CellCount::MAX),
            mine_mask,
        }
    }

    /// Builds a fixed layout; repeated coordinates count once.
    pub fn from_mine_coords(size: Coord2, mine_coords: &[Coord2]) -> Result<Self> {
        let mut mine_mask: Array2<bool> = Array2::default(size.to_nd_index());

        for &coords in mine_coords {
            if coords.0 >= size.0 || coords.1 >= size.1 {
                return Err(GameError::InvalidCoords);
            }
            mine_mask[coords.to_nd_index()] = true;
        }

        Ok(Self::from_mine_mask(mine_mask))
    }

    pub fn game_config(&self) -> GameConfig {
        GameConfig::new_unchecked(self.size(), self.mine_count)
    }

    pub fn size(&self) -> Coord2 {
        let (x_len, y_len) = self.mine_mask.dim();
        (
            Coord::try_from(x_len).unwrap_or(Coord::MAX),
            Coord::try_from(y_len).unwrap_or(Coord::MAX),
        )
    }

    pub fn mine_count(&self) -> CellCount {
        self.mine_count
    }

    pub fn total_cells(&self) -> CellCount {
        CellCount::try_from(self.mine_mask.len()).unwrap_or(CellCount::MAX)
    }

    pub fn safe_cell_count(&self) -> CellCount {
        self.total_cells() - self.mine_count
    }

    /// Membership test, `false` outside the board.
    pub fn contains_mine(&self, coords: Coord2) -> bool {
        self.mine_mask
            .get(coords.to_nd_index())
            .copied()
            .unwrap_or(false)
    }

    pub fn adjacent_mine_count(&self, coords: Coord2) -> u8 {
        self.mine_mask
            .iter_neighbors(coords)
            .filter(|&pos| self[pos])
            .count() as u8
    }

    /// Mine coordinates in board order.
    pub fn iter(&self) -> impl Iterator<Item = Coord2> + '_ {
        self.mine_mask
            .indexed_iter()
            .filter(|&(_, &is_mine)| is_mine)
            .map(|((x, y), _)| (x as Coord, y as Coord))
    }
}

impl Index<Coord2> for MinePlacement {
    type Output = bool;

    fn index(&self, (x, y): Coord2) -> &Self::Output {
        &self.mine_mask[(x as usize, y as usize)]
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MarkOutcome {
    NoChange(Rejection),
    Changed,
}

impl MarkOutcome {
    pub const fn has_update(self) -> bool {
        match self {
            Self::NoChange(_) => false,
            Self::Changed => true,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RevealOutcome {
    NoChange(Rejection),
    /// Number of cells uncovered by the cascade.
    Revealed(CellCount),
    HitMine,
}

impl RevealOutcome {
    pub const fn has_update(self) -> bool {
        use RevealOutcome::*;
        match self {
            NoChange(_) => false,
            Revealed(_) => true,
            HitMine => true,
        }
    }
}
