use crate::*;
pub use random::*;

mod random;

/// Produces the mine layout once the player has picked a starting cell.
pub trait MineGenerator {
    fn generate(self, config: GameConfig, start: CellIndex) -> Result<MineLayout>;
}

/// How much of the board around the starting cell is kept clear of mines.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum StartTile {
    /// Only the starting cell itself.
    SimpleSafe,
    /// The starting cell and all its neighbours, so it opens as a free cell.
    AlwaysZero,
}

/// A fixed layout, for replaying a known board.
impl MineGenerator for MineLayout {
    fn generate(self, config: GameConfig, start: CellIndex) -> Result<MineLayout> {
        let start = config.validate_index(start)?;
        let own = self.game_config();
        if own.size != config.size {
            return Err(GameError::InvalidLayout("board size differs from configuration"));
        }
        if own.mines != config.mines {
            return Err(GameError::InvalidLayout("mine count differs from configuration"));
        }
        if self.contains_mine(start) {
            return Err(GameError::InvalidLayout("starting cell holds a mine"));
        }
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> GameConfig {
        GameConfig::new(1, 3, 3).unwrap()
    }

    #[test]
    fn preset_layout_is_returned_as_is() {
        let layout = MineLayout::from_mine_indices(config(), &[8]).unwrap();
        assert_eq!(layout.clone().generate(config(), 0), Ok(layout));
    }

    #[test]
    fn preset_layout_rejects_mine_on_start() {
        let layout = MineLayout::from_mine_indices(config(), &[4]).unwrap();
        assert!(matches!(
            layout.generate(config(), 4),
            Err(GameError::InvalidLayout(_))
        ));
    }

    #[test]
    fn preset_layout_rejects_wrong_mine_count() {
        let layout = MineLayout::from_mine_indices(config(), &[7, 8]).unwrap();
        assert!(matches!(
            layout.generate(config(), 0),
            Err(GameError::InvalidLayout(_))
        ));
    }
}
