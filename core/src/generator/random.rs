use ndarray::Array2;
use rand::prelude::*;
use rand::rngs::SmallRng;

use super::*;

/// Purely random placement that keeps the starting cell clear, and its
/// neighbours too whenever the mine count leaves room for it.
#[derive(Clone, Debug, PartialEq)]
pub struct RandomMineGenerator {
    seed: u64,
}

impl RandomMineGenerator {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl MineGenerator for RandomMineGenerator {
    fn generate(self, config: GameConfig, start: CellIndex) -> Result<MineLayout> {
        let start = config.validate_index(start)?;
        let total_cells = config.total_cells();
        let mut mines: Array2<bool> = Array2::default(config.size.to_nd_index());

        let zero_zone = 1 + mines.iter_neighbors(start).count() as CellCount;
        let start_tile = if config.mines + zero_zone <= total_cells {
            StartTile::AlwaysZero
        } else {
            log::warn!(
                "Cannot keep {} cells around the start clear with {} mines on {} cells, \
                 start cell will only be safe",
                zero_zone,
                config.mines,
                total_cells
            );
            StartTile::SimpleSafe
        };

        // block the safe zone so the draw below never lands there
        let safe_zone: Vec<Coord2> = match start_tile {
            StartTile::SimpleSafe => vec![start],
            StartTile::AlwaysZero => core::iter::once(start)
                .chain(mines.iter_neighbors(start))
                .collect(),
        };
        for &coords in &safe_zone {
            mines[coords.to_nd_index()] = true;
        }
        let mut free_cells = usize::from(total_cells) - safe_zone.len();

        let mut rng = SmallRng::seed_from_u64(self.seed);
        {
            let cells = mines
                .as_slice_mut()
                .ok_or(GameError::InvalidLayout("mine mask is not in standard layout"))?;
            for _ in 0..config.mines {
                let place = rng.random_range(0..free_cells);
                if let Some(cell) = cells.iter_mut().filter(|cell| !**cell).nth(place) {
                    *cell = true;
                    free_cells -= 1;
                }
            }
        }

        for &coords in &safe_zone {
            mines[coords.to_nd_index()] = false;
        }

        let layout = MineLayout::from_mine_mask(mines);
        log::debug!(
            "Generated {} mines with seed {} around start {:?} ({:?})",
            layout.mine_count(),
            self.seed,
            start,
            start_tile
        );
        Ok(layout)
    }
}
