use core::ops::Index;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Initial mine placement for a board.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MineLayout {
    mine_mask: Array2<bool>,
    mine_count: CellCount,
}

impl MineLayout {
    pub fn from_mine_mask(mine_mask: Array2<bool>) -> Self {
        let mine_count = mine_mask.iter().filter(|&&is_mine| is_mine).count() as CellCount;
        Self {
            mine_mask,
            mine_count,
        }
    }

    /// Builds a layout on the board described by `config` with mines at `mine_indices`.
    ///
    /// Only the size of `config` is used; the mine count is whatever `mine_indices` yields.
    pub fn from_mine_indices(config: GameConfig, mine_indices: &[CellIndex]) -> Result<Self> {
        let mut mine_mask: Array2<bool> = Array2::default(config.size.to_nd_index());

        for &index in mine_indices {
            let coords = config.validate_index(index)?;
            mine_mask[coords.to_nd_index()] = true;
        }

        Ok(Self::from_mine_mask(mine_mask))
    }

    pub fn game_config(&self) -> GameConfig {
        GameConfig::new_unchecked(self.size(), self.mine_count)
    }

    pub fn size(&self) -> Coord2 {
        let (rows, cols) = self.mine_mask.dim();
        (rows as Coord, cols as Coord)
    }

    pub fn total_cells(&self) -> CellCount {
        self.mine_mask.len() as CellCount
    }

    pub fn mine_count(&self) -> CellCount {
        self.mine_count
    }

    pub fn contains_mine(&self, coords: Coord2) -> bool {
        self[coords]
    }

    pub fn adjacent_mine_count(&self, coords: Coord2) -> u8 {
        self.mine_mask
            .iter_neighbors(coords)
            .filter(|&pos| self[pos])
            .count() as u8
    }

    /// Mine indices in ascending row-major order.
    pub fn mine_indices(&self) -> Vec<CellIndex> {
        self.mine_mask
            .iter()
            .enumerate()
            .filter_map(|(index, &is_mine)| is_mine.then_some(index))
            .collect()
    }
}

impl Index<Coord2> for MineLayout {
    type Output = bool;

    fn index(&self, (row, col): Coord2) -> &Self::Output {
        &self.mine_mask[(row as usize, col as usize)]
    }
}

/// Per-cell classification derived once from a [`MineLayout`], plus the
/// index sets the win checks walk.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GroundTruth {
    cells: Array2<Classification>,
    mines: Vec<CellIndex>,
    hints: Vec<CellIndex>,
    frees: Vec<CellIndex>,
}

impl GroundTruth {
    pub fn new(layout: &MineLayout) -> Self {
        let (rows, cols) = layout.size();
        let cells = Array2::from_shape_fn((rows as usize, cols as usize), |(row, col)| {
            let coords = (row as Coord, col as Coord);
            Classification::from_adjacent(
                layout.contains_mine(coords),
                layout.adjacent_mine_count(coords),
            )
        });

        let mut mines = Vec::new();
        let mut hints = Vec::new();
        let mut frees = Vec::new();
        for (index, cell) in cells.iter().enumerate() {
            match cell {
                Classification::Mine => mines.push(index),
                Classification::Hint(_) => hints.push(index),
                Classification::Free => frees.push(index),
            }
        }

        log::debug!(
            "Classified {} cells: {} mines, {} hints, {} free",
            cells.len(),
            mines.len(),
            hints.len(),
            frees.len()
        );

        Self {
            cells,
            mines,
            hints,
            frees,
        }
    }

    pub fn at(&self, coords: Coord2) -> Classification {
        self.cells[coords.to_nd_index()]
    }

    pub fn mines(&self) -> &[CellIndex] {
        &self.mines
    }

    pub fn hints(&self) -> &[CellIndex] {
        &self.hints
    }

    pub fn frees(&self) -> &[CellIndex] {
        &self.frees
    }

    /// Classification symbols in row-major order, as the solved board is printed.
    pub fn symbols(&self) -> impl Iterator<Item = char> + '_ {
        self.cells.iter().map(|cell| match cell {
            Classification::Mine => '*',
            other => other.revealed().symbol(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(rows: Coord, cols: Coord) -> GameConfig {
        GameConfig::new_unchecked((rows, cols), 1)
    }

    #[test]
    fn from_mine_indices_rejects_out_of_bounds() {
        let err = MineLayout::from_mine_indices(config(3, 3), &[9]).unwrap_err();
        assert_eq!(err, GameError::OutOfBounds { index: 9, cells: 9 });
    }

    #[test]
    fn adjacent_counts_use_all_eight_directions() {
        let layout = MineLayout::from_mine_indices(config(3, 3), &[0, 2, 6, 8]).unwrap();
        assert_eq!(layout.mine_count(), 4);
        assert_eq!(layout.adjacent_mine_count((1, 1)), 4);
        assert_eq!(layout.adjacent_mine_count((0, 1)), 2);
        assert_eq!(layout.adjacent_mine_count((1, 2)), 2);
    }

    #[test]
    fn east_edge_does_not_leak_into_next_row() {
        // mine at the start of row 1 must not count for the end of row 0
        let layout = MineLayout::from_mine_indices(config(3, 4), &[4]).unwrap();
        assert_eq!(layout.adjacent_mine_count((0, 3)), 0);
        assert_eq!(layout.adjacent_mine_count((0, 0)), 1);
        assert_eq!(layout.adjacent_mine_count((2, 1)), 1);
    }

    #[test]
    fn ground_truth_partitions_every_cell() {
        let layout = MineLayout::from_mine_indices(config(3, 3), &[8]).unwrap();
        let truth = GroundTruth::new(&layout);

        assert_eq!(truth.mines(), &[8]);
        assert_eq!(truth.hints(), &[4, 5, 7]);
        assert_eq!(truth.frees(), &[0, 1, 2, 3, 6]);
        assert_eq!(truth.at((1, 1)), Classification::Hint(1));
        assert_eq!(truth.symbols().collect::<String>(), "////11/1*");
    }

    #[test]
    fn mine_indices_are_sorted() {
        let layout = MineLayout::from_mine_indices(config(2, 2), &[3, 1]).unwrap();
        assert_eq!(layout.mine_indices(), vec![1, 3]);
    }
}
