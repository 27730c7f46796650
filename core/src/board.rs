use core::ops::Index;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// The grid of cells, indexed `(x, y)`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Board {
    cells: Array2<Cell>,
}

impl Board {
    /// Fresh board, every cell unexplored and without a value.
    pub fn new(size: Coord2) -> Self {
        Self {
            cells: Array2::default(size.to_nd_index()),
        }
    }

    pub fn size(&self) -> Coord2 {
        let (x_len, y_len) = self.cells.dim();
        (
            Coord::try_from(x_len).unwrap_or(Coord::MAX),
            Coord::try_from(y_len).unwrap_or(Coord::MAX),
        )
    }

    pub fn neighbors_of(&self, coords: Coord2) -> NeighborIter {
        self.cells.iter_neighbors(coords)
    }

    pub fn get(&self, coords: Coord2) -> Option<&Cell> {
        self.cells.get(coords.to_nd_index())
    }

    pub(crate) fn get_mut(&mut self, coords: Coord2) -> Option<&mut Cell> {
        self.cells.get_mut(coords.to_nd_index())
    }

    /// Cells in `(x, y)` order, x-major.
    pub fn iter(&self) -> impl Iterator<Item = (Coord2, &Cell)> + '_ {
        self.cells
            .indexed_iter()
            .map(|((x, y), cell)| ((x as Coord, y as Coord), cell))
    }

    /// One row of cells, left to right, for line-oriented front ends.
    pub fn row(&self, y: Coord) -> impl Iterator<Item = &Cell> + '_ {
        let (size_x, _) = self.size();
        (0..size_x).filter_map(move |x| self.get((x, y)))
    }

    pub fn is_valued(&self) -> bool {
        self.cells.iter().all(|cell| cell.value().is_some())
    }

    pub fn count_state(&self, state: CellState) -> CellCount {
        let count = self.cells.iter().filter(|cell| cell.state() == state).count();
        CellCount::try_from(count).unwrap_or(CellCount::MAX)
    }

    /// Stores the mine or neighbor count of every cell.
    pub fn fill_values(&mut self, mines: &MinePlacement) -> Result<()> {
        if mines.size() != self.size() {
            return Err(GameError::InvalidBoardShape);
        }

        for ((x, y), cell) in self.cells.indexed_iter_mut() {
            let coords = (x as Coord, y as Coord);
            let value = if mines[coords] {
                CellValue::Mine
            } else {
                CellValue::Count(mines.adjacent_mine_count(coords))
            };
            cell.set_value(value);
        }
        Ok(())
    }

    /// Shows every cell's value, used when the game is lost.
    pub(crate) fn reveal_all(&mut self) {
        for cell in self.cells.iter_mut() {
            if !cell.uncover() {
                log::warn!("Revealing a board that has no values yet");
            }
        }
    }
}

impl Index<Coord2> for Board {
    type Output = Cell;

    fn index(&self, coords: Coord2) -> &Self::Output {
        &self.cells[coords.to_nd_index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valued_board(size: Coord2, mines: &[Coord2]) -> Board {
        let placement = MinePlacement::from_mine_coords(size, mines).unwrap();
        let mut board = Board::new(size);
        board.fill_values(&placement).unwrap();
        board
    }

    fn values(board: &Board, y: Coord) -> alloc::vec::Vec<Option<CellValue>> {
        board.row(y).map(Cell::value).collect()
    }

    #[test]
    fn new_board_is_unexplored_and_unvalued() {
        let board = Board::new((4, 2));

        assert_eq!(board.size(), (4, 2));
        assert!(!board.is_valued());
        assert_eq!(board.count_state(CellState::Unexplored), 8);
        assert!(board.get((4, 0)).is_none());
        assert!(board.get((0, 2)).is_none());
    }

    #[test]
    fn values_around_center_mine() {
        use CellValue::*;
        let board = valued_board((3, 3), &[(1, 1)]);

        assert!(board.is_valued());
        assert_eq!(values(&board, 0), [Some(Count(1)); 3]);
        assert_eq!(values(&board, 1), [Some(Count(1)), Some(Mine), Some(Count(1))]);
        assert_eq!(values(&board, 2), [Some(Count(1)); 3]);
    }

    #[test]
    fn values_on_five_by_five_fixture() {
        use CellValue::*;
        // M . . . .
        // . . M . .
        // . . . . .
        // . M . . M
        // . . . . M
        let board = valued_board((5, 5), &[(0, 0), (2, 1), (1, 3), (4, 3), (4, 4)]);

        let expected = [
            [Mine, Count(2), Count(1), Count(1), Count(0)],
            [Count(1), Count(2), Mine, Count(1), Count(0)],
            [Count(1), Count(2), Count(2), Count(2), Count(1)],
            [Count(1), Mine, Count(1), Count(2), Mine],
            [Count(1), Count(1), Count(1), Count(2), Mine],
        ];
        for (y, row) in expected.iter().enumerate() {
            let row: alloc::vec::Vec<_> = row.iter().copied().map(Some).collect();
            assert_eq!(values(&board, y as Coord), row, "row {y}");
        }
    }

    #[test]
    fn fill_values_rejects_mismatched_layout() {
        let placement = MinePlacement::from_mine_coords((3, 3), &[(0, 0)]).unwrap();
        let mut board = Board::new((3, 4));

        assert_eq!(board.fill_values(&placement), Err(GameError::InvalidBoardShape));
    }

    #[test]
    fn reveal_all_shows_values() {
        let mut board = valued_board((2, 2), &[(1, 0)]);

        board.reveal_all();

        assert_eq!(board[(1, 0)].state(), CellState::Mine);
        assert_eq!(board[(0, 0)].state(), CellState::Revealed(1));
        assert_eq!(board[(1, 0)].content(), "M");
        assert_eq!(board.count_state(CellState::Unexplored), 0);
    }
}
