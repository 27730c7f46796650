use hashbrown::HashSet;
use ndarray::Array2;

use super::*;

/// Uniform placement by rejection sampling: draw a random cell, keep it unless
/// it already holds a mine.
#[derive(Clone, Debug, PartialEq)]
pub struct RandomMineGenerator {
    seed: u64,
}

impl RandomMineGenerator {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }
}

impl MineGenerator for RandomMineGenerator {
    fn generate(self, config: GameConfig) -> MinePlacement {
        use rand::prelude::*;

        let (size_x, size_y) = config.size;
        let total_cells = config.total_cells();

        if total_cells == 0 {
            log::warn!("Cannot place mines on an empty {}x{} board", size_x, size_y);
            return MinePlacement::from_mine_mask(Array2::default(config.size.to_nd_index()));
        }

        // at least one cell has to stay free or sampling never ends
        let mines = if config.mines >= total_cells {
            log::warn!(
                "Minefield too full, requested {} but only {} fit",
                config.mines,
                total_cells - 1
            );
            total_cells - 1
        } else {
            config.mines
        };

        let mut rng = SmallRng::seed_from_u64(self.seed);
        let mut placed: HashSet<Coord2> = HashSet::with_capacity(mines.into());
        while placed.len() < usize::from(mines) {
            let coords = (rng.random_range(0..size_x), rng.random_range(0..size_y));
            placed.insert(coords);
        }

        let mut mine_mask: Array2<bool> = Array2::default(config.size.to_nd_index());
        for coords in placed {
            mine_mask[coords.to_nd_index()] = true;
        }
        MinePlacement::from_mine_mask(mine_mask)
    }
}
