use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{CellCount, CellIndex, EnginePhase};

/// Player actions, named in phase errors.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Action {
    ToggleFlag,
    StartGame,
    Reveal,
    ToggleMineMark,
}

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Mine count must be greater than zero and less than {cells}, got {mines}")]
    InvalidConfiguration { mines: CellCount, cells: CellCount },
    #[error("Cell index {index} is out of bounds for a board of {cells} cells")]
    OutOfBounds { index: CellIndex, cells: CellCount },
    #[error("{action:?} is not accepted while the game is {phase:?}")]
    InvalidActionForPhase { action: Action, phase: EnginePhase },
    #[error("Preset layout rejected: {0}")]
    InvalidLayout(&'static str),
}

pub type Result<T> = core::result::Result<T, GameError>;
