use alloc::collections::{BTreeSet, VecDeque};
use smallvec::SmallVec;

use crate::*;

/// Neighbors queued from one expanded cell, in the order they will be visited.
pub type Neighbors = SmallVec<[Coord2; 8]>;

impl Board {
    /// Uncovers one unexplored safe cell and returns its count.
    ///
    /// Mines, cells the player already touched, and cells without a value are left alone.
    fn expand(&mut self, coords: Coord2, mines: &MinePlacement) -> Option<u8> {
        if mines.contains_mine(coords) {
            return None;
        }
        let cell = self.get_mut(coords)?;
        if cell.state() != CellState::Unexplored {
            return None;
        }
        match cell.value() {
            Some(CellValue::Count(count)) => {
                cell.set_state(CellState::Revealed(count));
                Some(count)
            }
            Some(CellValue::Mine) => None,
            None => {
                log::warn!("Cell {:?} has no value, not expanding", coords);
                None
            }
        }
    }

    /// Breadth-first reveal from `start`, spreading through zero-count cells.
    ///
    /// `arrange` may reorder each batch of neighbors before it is queued; the
    /// set of uncovered cells does not depend on it. Returns how many cells
    /// were uncovered.
    pub(crate) fn flood_reveal<F>(
        &mut self,
        start: Coord2,
        mines: &MinePlacement,
        mut arrange: F,
    ) -> CellCount
    where
        F: FnMut(&mut Neighbors),
    {
        let mut uncovered: CellCount = 0;
        let mut visited = BTreeSet::from([start]);
        let mut to_visit = VecDeque::from([start]);

        while let Some(coords) = to_visit.pop_front() {
            let Some(count) = self.expand(coords, mines) else {
                continue;
            };
            uncovered += 1;
            if count != 0 {
                continue;
            }

            let mut next: Neighbors = self
                .neighbors_of(coords)
                .filter(|pos| !visited.contains(pos) && !mines.contains_mine(*pos))
                .collect();
            arrange(&mut next);
            for pos in next {
                if visited.insert(pos) {
                    to_visit.push_back(pos);
                }
            }
        }

        log::trace!("Flood from {:?} uncovered {} cells", start, uncovered);
        uncovered
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;
    use rand::prelude::*;

    fn valued_board(size: Coord2, mines: &[Coord2]) -> (Board, MinePlacement) {
        let placement = MinePlacement::from_mine_coords(size, mines).unwrap();
        let mut board = Board::new(size);
        board.fill_values(&placement).unwrap();
        (board, placement)
    }

    fn revealed(board: &Board) -> BTreeSet<(Coord2, u8)> {
        board
            .iter()
            .filter_map(|(coords, cell)| match cell.state() {
                CellState::Revealed(count) => Some((coords, count)),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn cascade_stops_at_numbered_fringe() {
        let (mut board, mines) = valued_board((3, 3), &[(1, 1)]);

        let uncovered = board.flood_reveal((0, 0), &mines, |_| {});

        assert_eq!(uncovered, 1);
        assert_eq!(board[(0, 0)].state(), CellState::Revealed(1));
        assert_eq!(board.count_state(CellState::Unexplored), 8);
    }

    #[test]
    fn zero_corner_reveals_component_and_fringe() {
        // 3x3 with the mine in the far corner: everything but the mine opens.
        let (mut board, mines) = valued_board((3, 3), &[(2, 2)]);

        let uncovered = board.flood_reveal((0, 0), &mines, |_| {});

        assert_eq!(uncovered, 8);
        assert_eq!(board[(2, 2)].state(), CellState::Unexplored);
        assert_eq!(board[(1, 1)].state(), CellState::Revealed(1));
        assert_eq!(board[(0, 0)].content(), "");
    }

    #[test]
    fn cascade_does_not_cross_numbered_wall() {
        // mine column at x = 2, the right side stays closed
        let (mut board, mines) = valued_board((5, 3), &[(2, 0), (2, 1), (2, 2)]);

        board.flood_reveal((0, 1), &mines, |_| {});

        let opened = revealed(&board);
        let expected: BTreeSet<_> = [
            ((0, 0), 0),
            ((0, 1), 0),
            ((0, 2), 0),
            ((1, 0), 2),
            ((1, 1), 3),
            ((1, 2), 2),
        ]
        .into_iter()
        .collect();
        assert_eq!(opened, expected);
        assert!((3..5).all(|x| (0..3).all(|y| board[(x, y)].state() == CellState::Unexplored)));
    }

    #[test]
    fn marked_cells_block_the_cascade() {
        let (mut board, mines) = valued_board((4, 1), &[(3, 0)]);
        board.get_mut((1, 0)).unwrap().set_state(CellState::Marked);

        let uncovered = board.flood_reveal((0, 0), &mines, |_| {});

        assert_eq!(uncovered, 1);
        assert_eq!(board[(1, 0)].state(), CellState::Marked);
        assert_eq!(board[(2, 0)].state(), CellState::Unexplored);
    }

    #[test]
    fn expansion_order_does_not_change_revealed_set() {
        let layout = [(3, 0), (7, 2), (1, 5), (5, 5), (8, 8), (0, 9), (9, 4)];
        let (mut forward, mines) = valued_board((10, 10), &layout);
        let (mut shuffled_a, _) = valued_board((10, 10), &layout);
        let (mut shuffled_b, _) = valued_board((10, 10), &layout);

        let mut rng_a = SmallRng::seed_from_u64(1);
        let mut rng_b = SmallRng::seed_from_u64(2);
        let mut seen_orders: Vec<Neighbors> = Vec::new();

        forward.flood_reveal((0, 0), &mines, |_| {});
        shuffled_a.flood_reveal((0, 0), &mines, |next| {
            next.shuffle(&mut rng_a);
            seen_orders.push(next.clone());
        });
        shuffled_b.flood_reveal((0, 0), &mines, |next| {
            next.shuffle(&mut rng_b);
            next.reverse();
        });

        assert!(!seen_orders.is_empty());
        assert_eq!(revealed(&forward), revealed(&shuffled_a));
        assert_eq!(revealed(&forward), revealed(&shuffled_b));
        assert_eq!(forward, shuffled_a);
    }

    #[test]
    fn revealed_set_is_zero_component_plus_fringe() {
        let layout = [(2, 2), (5, 0), (6, 6), (0, 6)];
        let (mut board, mines) = valued_board((8, 8), &layout);
        let start = (7, 3);

        board.flood_reveal(start, &mines, |_| {});

        // reference: connected zero cells from start, then their neighbors
        let mut component = BTreeSet::from([start]);
        let mut stack = alloc::vec![start];
        while let Some(coords) = stack.pop() {
            for pos in neighbors(coords, (8, 8)) {
                let is_zero = !mines.contains_mine(pos) && mines.adjacent_mine_count(pos) == 0;
                if is_zero && component.insert(pos) {
                    stack.push(pos);
                }
            }
        }
        let mut expected: BTreeSet<Coord2> = component.clone();
        for &coords in &component {
            expected.extend(neighbors(coords, (8, 8)).filter(|&pos| !mines.contains_mine(pos)));
        }

        let opened: BTreeSet<Coord2> =
            revealed(&board).into_iter().map(|(coords, _)| coords).collect();
        assert_eq!(mines.adjacent_mine_count(start), 0);
        assert_eq!(opened, expected);
    }

    #[test]
    fn never_expands_mines() {
        let (mut board, mines) = valued_board((2, 2), &[(1, 1)]);

        assert_eq!(board.flood_reveal((1, 1), &mines, |_| {}), 0);
        assert_eq!(board[(1, 1)].state(), CellState::Unexplored);
    }
}
