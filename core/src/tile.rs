use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::{CellIndex, Coord, Coord2, ToNdIndex};

/// Ground truth of a single cell, fixed once the layout exists.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Classification {
    Mine,
    /// Safe cell next to `1..=8` mines.
    Hint(u8),
    /// Safe cell with no adjacent mines.
    Free,
}

impl Classification {
    pub const fn from_adjacent(is_mine: bool, adjacent_mines: u8) -> Self {
        match (is_mine, adjacent_mines) {
            (true, _) => Self::Mine,
            (false, 0) => Self::Free,
            (false, count) => Self::Hint(count),
        }
    }

    pub const fn is_mine(self) -> bool {
        matches!(self, Self::Mine)
    }

    /// The visible state this cell takes when the player uncovers it.
    pub const fn revealed(self) -> VisibleCell {
        match self {
            Self::Mine => VisibleCell::RevealedMine,
            Self::Hint(count) => VisibleCell::RevealedHint(count),
            Self::Free => VisibleCell::RevealedFree,
        }
    }
}

/// Canonical player-visible state stored by the board engine.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum VisibleCell {
    #[default]
    Hidden,
    /// Marked by the player as a suspected mine.
    Flagged,
    RevealedFree,
    RevealedHint(u8),
    /// Only shown once the game is lost.
    RevealedMine,
}

impl VisibleCell {
    pub const fn is_unrevealed(self) -> bool {
        matches!(self, Self::Hidden | Self::Flagged)
    }

    pub const fn is_revealed(self) -> bool {
        !self.is_unrevealed()
    }

    pub const fn symbol(self) -> char {
        match self {
            Self::Hidden => '.',
            Self::Flagged => '*',
            Self::RevealedFree => '/',
            Self::RevealedHint(count) => match char::from_digit(count as u32, 10) {
                Some(digit) => digit,
                None => '?',
            },
            Self::RevealedMine => 'X',
        }
    }
}

/// Borrowed row-major view of the visible board, handed to the display layer.
#[derive(Copy, Clone, Debug)]
pub struct VisibleGrid<'a> {
    cells: &'a Array2<VisibleCell>,
}

impl<'a> VisibleGrid<'a> {
    pub(crate) fn new(cells: &'a Array2<VisibleCell>) -> Self {
        Self { cells }
    }

    pub fn size(&self) -> Coord2 {
        let (rows, cols) = self.cells.dim();
        (rows as Coord, cols as Coord)
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn get(&self, index: CellIndex) -> Option<VisibleCell> {
        let cols = self.cells.ncols();
        if index >= self.cells.len() {
            return None;
        }
        Some(self.cells[[index / cols, index % cols]])
    }

    pub fn cell(&self, coords: Coord2) -> VisibleCell {
        self.cells[coords.to_nd_index()]
    }

    /// Cells in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = VisibleCell> + 'a {
        self.cells.iter().copied()
    }

    pub fn symbols(&self) -> impl Iterator<Item = char> + 'a {
        self.iter().map(VisibleCell::symbol)
    }

    /// One string of symbols per board row.
    pub fn rows(&self) -> Vec<String> {
        self.cells
            .rows()
            .into_iter()
            .map(|row| row.iter().map(|cell| cell.symbol()).collect())
            .collect()
    }
}
