//! Board engine for a text minesweeper: deferred, first-move-safe mine
//! placement, hint computation, flood-fill reveals and win/loss tracking.

use serde::{Deserialize, Serialize};

pub use engine::*;
pub use error::*;
pub use generator::*;
pub use layout::*;
pub use tile::*;
pub use types::*;

mod engine;
mod error;
mod generator;
mod layout;
mod tile;
mod types;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    /// `(rows, cols)`
    pub size: Coord2,
    pub mines: CellCount,
}

impl GameConfig {
    pub const fn new_unchecked(size: Coord2, mines: CellCount) -> Self {
        Self { size, mines }
    }

    /// Validates that the board holds at least one mine and at least one safe cell.
    pub fn new(mines: CellCount, rows: Coord, cols: Coord) -> Result<Self> {
        let cells = mult(rows, cols);
        if mines == 0 || mines >= cells {
            return Err(GameError::InvalidConfiguration { mines, cells });
        }
        Ok(Self::new_unchecked((rows, cols), mines))
    }

    pub const fn rows(&self) -> Coord {
        self.size.0
    }

    pub const fn cols(&self) -> Coord {
        self.size.1
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.size.0, self.size.1)
    }

    pub const fn safe_cells(&self) -> CellCount {
        self.total_cells().saturating_sub(self.mines)
    }

    /// Maps a linear index to `(row, col)`, rejecting anything off the board.
    pub fn validate_index(&self, index: CellIndex) -> Result<Coord2> {
        let cells = self.total_cells();
        if index < CellIndex::from(cells) {
            Ok(coords_of(index, self.cols()))
        } else {
            Err(GameError::OutOfBounds { index, cells })
        }
    }

    pub fn index_of(&self, coords: Coord2) -> CellIndex {
        index_of(coords, self.cols())
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new_unchecked((9, 9), 10)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MarkOutcome {
    NoChange,
    Changed,
}

impl MarkOutcome {
    pub const fn has_update(self) -> bool {
        match self {
            Self::NoChange => false,
            Self::Changed => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_rejects_zero_mines() {
        assert_eq!(
            GameConfig::new(0, 9, 9),
            Err(GameError::InvalidConfiguration { mines: 0, cells: 81 })
        );
    }

    #[test]
    fn config_rejects_full_board() {
        assert!(GameConfig::new(81, 9, 9).is_err());
        assert!(GameConfig::new(200, 9, 9).is_err());
        assert!(GameConfig::new(1, 0, 9).is_err());
        assert!(GameConfig::new(1, 1, 1).is_err());
    }

    #[test]
    fn config_accepts_all_but_one_cell() {
        let config = GameConfig::new(80, 9, 9).unwrap();
        assert_eq!(config.total_cells(), 81);
        assert_eq!(config.safe_cells(), 1);
    }

    #[test]
    fn validate_index_maps_row_major() {
        let config = GameConfig::new(1, 3, 4).unwrap();
        assert_eq!(config.validate_index(7), Ok((1, 3)));
        assert_eq!(config.index_of((1, 3)), 7);
        assert_eq!(
            config.validate_index(12),
            Err(GameError::OutOfBounds { index: 12, cells: 12 })
        );
    }
}
