use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Lifecycle of a [`BoardEngine`].
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum EnginePhase {
    /// No layout yet, the player may only place pre-game flags.
    #[default]
    Marking,
    Playing,
    Won,
    Lost,
}

impl EnginePhase {
    pub const fn is_marking(self) -> bool {
        matches!(self, Self::Marking)
    }

    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }

    pub const fn status(self) -> GameStatus {
        match self {
            Self::Marking | Self::Playing => GameStatus::Ongoing,
            Self::Won => GameStatus::Won,
            Self::Lost => GameStatus::Lost,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    Ongoing,
    Won,
    Lost,
}

/// Layout and everything derived from it, present once the game started.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
struct Board {
    layout: MineLayout,
    truth: GroundTruth,
}

/// Owns the three views of one game: the initial mine placement, the ground
/// truth derived from it and the cells the player can see.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BoardEngine {
    config: GameConfig,
    seed: u64,
    board: Option<Board>,
    visible: Array2<VisibleCell>,
    phase: EnginePhase,
    triggered_mine: Option<CellIndex>,
}

impl BoardEngine {
    /// New game with a fresh random seed.
    pub fn new(mines: CellCount, rows: Coord, cols: Coord) -> Result<Self> {
        Self::with_seed(GameConfig::new(mines, rows, cols)?, rand::random())
    }

    pub fn from_config(config: GameConfig) -> Result<Self> {
        Self::with_seed(config, rand::random())
    }

    /// New game whose layout is fully determined by `seed` and the first reveal.
    pub fn with_seed(config: GameConfig, seed: u64) -> Result<Self> {
        let config = GameConfig::new(config.mines, config.rows(), config.cols())?;
        log::debug!(
            "New {}x{} board with {} mines, seed {}",
            config.rows(),
            config.cols(),
            config.mines,
            seed
        );
        Ok(Self {
            config,
            seed,
            board: None,
            visible: Array2::default(config.size.to_nd_index()),
            phase: Default::default(),
            triggered_mine: None,
        })
    }

    pub fn config(&self) -> GameConfig {
        self.config
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn phase(&self) -> EnginePhase {
        self.phase
    }

    pub fn status(&self) -> GameStatus {
        self.phase.status()
    }

    pub fn is_finished(&self) -> bool {
        self.phase.is_finished()
    }

    pub fn grid(&self) -> VisibleGrid<'_> {
        VisibleGrid::new(&self.visible)
    }

    pub fn cell_at(&self, index: CellIndex) -> Result<VisibleCell> {
        let coords = self.config.validate_index(index)?;
        Ok(self.visible[coords.to_nd_index()])
    }

    /// Initial mine placement, `None` until the game started.
    pub fn layout(&self) -> Option<&MineLayout> {
        self.board.as_ref().map(|board| &board.layout)
    }

    pub fn ground_truth(&self) -> Option<&GroundTruth> {
        self.board.as_ref().map(|board| &board.truth)
    }

    /// The mine whose reveal lost the game.
    pub fn triggered_mine(&self) -> Option<CellIndex> {
        self.triggered_mine
    }

    pub fn marked_count(&self) -> CellCount {
        self.visible
            .iter()
            .filter(|&&cell| cell == VisibleCell::Flagged)
            .count() as CellCount
    }

    pub fn mines_left(&self) -> isize {
        self.config.mines as isize - self.marked_count() as isize
    }

    /// Toggles a pre-game flag. Only accepted before the first reveal.
    pub fn toggle_flag(&mut self, index: CellIndex) -> Result<MarkOutcome> {
        let coords = self.config.validate_index(index)?;
        self.check_phase(Action::ToggleFlag, EnginePhase::Marking)?;
        Ok(toggle_mark(&mut self.visible[coords.to_nd_index()]))
    }

    /// Generates a random layout around `index` and reveals it.
    pub fn start_game(&mut self, index: CellIndex) -> Result<GameStatus> {
        self.start_game_with(RandomMineGenerator::new(self.seed), index)
    }

    pub fn start_game_with<G: MineGenerator>(
        &mut self,
        generator: G,
        index: CellIndex,
    ) -> Result<GameStatus> {
        self.config.validate_index(index)?;
        self.check_phase(Action::StartGame, EnginePhase::Marking)?;

        let layout = generator.generate(self.config, index)?;
        let truth = GroundTruth::new(&layout);
        self.board = Some(Board { layout, truth });

        // pre-game flags do not carry over
        self.visible.fill(VisibleCell::Hidden);
        self.phase = EnginePhase::Playing;
        log::debug!("Game started at cell {}", index);

        self.reveal(index)
    }

    /// Uncovers a cell. Mines lose the game, free cells flood-fill.
    pub fn reveal(&mut self, index: CellIndex) -> Result<GameStatus> {
        let coords = self.config.validate_index(index)?;
        self.check_phase(Action::Reveal, EnginePhase::Playing)?;
        let Some(board) = &self.board else {
            return Err(self.phase_error(Action::Reveal));
        };

        if self.visible[coords.to_nd_index()].is_revealed() {
            return Ok(self.status());
        }

        match board.truth.at(coords) {
            Classification::Mine => {
                log::debug!("Mine revealed at cell {}, game lost", index);
                for &mine in board.truth.mines() {
                    let mine_coords = coords_of(mine, self.config.cols());
                    self.visible[mine_coords.to_nd_index()] = VisibleCell::RevealedMine;
                }
                self.triggered_mine = Some(index);
                self.phase = EnginePhase::Lost;
                return Ok(self.status());
            }
            Classification::Hint(count) => {
                self.visible[coords.to_nd_index()] = VisibleCell::RevealedHint(count);
                log::trace!("Revealed hint {} at cell {}", count, index);
            }
            Classification::Free => {
                let opened = flood_fill(&board.truth, &mut self.visible, coords);
                log::debug!("Flood-fill from cell {} opened {} cells", index, opened);
            }
        }

        self.check_won();
        Ok(self.status())
    }

    /// Toggles a mine mark during play. Revealed cells are left untouched.
    pub fn toggle_mine_mark(&mut self, index: CellIndex) -> Result<GameStatus> {
        let coords = self.config.validate_index(index)?;
        self.check_phase(Action::ToggleMineMark, EnginePhase::Playing)?;

        if toggle_mark(&mut self.visible[coords.to_nd_index()]).has_update() {
            self.check_won();
        } else {
            log::debug!("Ignoring mine mark on revealed cell {}", index);
        }
        Ok(self.status())
    }

    fn check_won(&mut self) {
        let Some(board) = &self.board else {
            return;
        };
        let cols = self.config.cols();
        let visible_at = |index: CellIndex| self.visible[coords_of(index, cols).to_nd_index()];

        let all_mines_marked = board
            .truth
            .mines()
            .iter()
            .all(|&index| visible_at(index) == VisibleCell::Flagged)
            && usize::from(self.marked_count()) == board.truth.mines().len();

        let all_safe_revealed = board
            .truth
            .frees()
            .iter()
            .all(|&index| visible_at(index) == VisibleCell::RevealedFree)
            && board
                .truth
                .hints()
                .iter()
                .all(|&index| matches!(visible_at(index), VisibleCell::RevealedHint(_)));

        if all_mines_marked || all_safe_revealed {
            log::debug!(
                "Game won ({})",
                if all_mines_marked { "all mines marked" } else { "all safe cells revealed" }
            );
            self.phase = EnginePhase::Won;
        }
    }

    fn check_phase(&self, action: Action, expected: EnginePhase) -> Result<()> {
        if self.phase == expected {
            Ok(())
        } else {
            Err(self.phase_error(action))
        }
    }

    fn phase_error(&self, action: Action) -> GameError {
        GameError::InvalidActionForPhase {
            action,
            phase: self.phase,
        }
    }
}

fn toggle_mark(cell: &mut VisibleCell) -> MarkOutcome {
    match *cell {
        VisibleCell::Hidden => {
            *cell = VisibleCell::Flagged;
            MarkOutcome::Changed
        }
        VisibleCell::Flagged => {
            *cell = VisibleCell::Hidden;
            MarkOutcome::Changed
        }
        _ => MarkOutcome::NoChange,
    }
}

/// Opens the free region around `start` through edge-sharing neighbours,
/// stopping each branch at the first hint. Returns the number of cells opened.
fn flood_fill(truth: &GroundTruth, visible: &mut Array2<VisibleCell>, start: Coord2) -> usize {
    let mut opened = 0;
    let mut to_visit = vec![start];

    while let Some(coords) = to_visit.pop() {
        let current = visible[coords.to_nd_index()];
        match truth.at(coords) {
            Classification::Hint(count) if current != VisibleCell::RevealedHint(count) => {
                visible[coords.to_nd_index()] = VisibleCell::RevealedHint(count);
                opened += 1;
                log::trace!("Flood opened hint {} at {:?}", count, coords);
            }
            // a revealed free cell is the visited marker
            Classification::Free if current != VisibleCell::RevealedFree => {
                visible[coords.to_nd_index()] = VisibleCell::RevealedFree;
                opened += 1;
                log::trace!("Flood opened free cell at {:?}", coords);
                to_visit.extend(visible.iter_orthogonal(coords));
            }
            _ => {}
        }
    }

    opened
}
