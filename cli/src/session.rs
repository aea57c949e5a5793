use std::collections::VecDeque;
use std::io::{BufRead, Write};
use std::str::FromStr;

use anyhow::Result;
use textsweep_core::*;

use crate::render::write_table;

const MINES_PROMPT: &str = "How many mines do you want on the field?";
const INPUT_ERROR: &str = "Input is not correct, please try again . . .";
const MOVE_PROMPT: &str = "Set/unset mines marks or claim a cell as free:";
const COLUMN_ERROR: &str = "Column is not correct, please try again";
const ROW_ERROR: &str = "Row is not correct, please try again";
const STATE_ERROR: &str = "State is not correct, please try again";
const STATE_PROMPT: &str = "Enter a cell state:";
const OUT_OF_BOUNDS: &str = "Index is out of bounds, please select an appropriate index!";
const ALREADY_REVEALED: &str = "This cell is already revealed, please select another one!";
const WIN_MESSAGE: &str = "Congratulations! You found all mines!";
const LOSS_MESSAGE: &str = "You stepped on a mine and failed!";

/// What the player claims about a cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Intent {
    Free,
    Mine,
}

impl FromStr for Intent {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "free" => Ok(Self::Free),
            "mine" => Ok(Self::Mine),
            _ => Err(()),
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Move {
    pub index: CellIndex,
    pub intent: Intent,
}

/// Text front end: reads whitespace-separated tokens from `input`, writes
/// prompts and boards to `output`. Every read returns `None` once input ends.
pub struct Session<R, W> {
    input: R,
    output: W,
    pending: VecDeque<String>,
}

impl<R: BufRead, W: Write> Session<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self {
            input,
            output,
            pending: VecDeque::new(),
        }
    }

    pub fn into_output(self) -> W {
        self.output
    }

    /// Asks for a mine count until it fits a `rows` by `cols` board.
    pub fn ask_config(&mut self, rows: Coord, cols: Coord) -> Result<Option<GameConfig>> {
        loop {
            let Some(mines) = self.read_value::<CellCount>(MINES_PROMPT, INPUT_ERROR)? else {
                return Ok(None);
            };
            match GameConfig::new(mines, rows, cols) {
                Ok(config) => return Ok(Some(config)),
                Err(err) => writeln!(self.output, "{err}")?,
            }
        }
    }

    /// Reads `<col> <row> <free|mine>` until it names a cell on the board.
    pub fn read_move(&mut self, config: GameConfig) -> Result<Option<Move>> {
        let Some(mut col) = self.read_value::<i64>(MOVE_PROMPT, COLUMN_ERROR)? else {
            return Ok(None);
        };
        let Some(mut row) = self.read_value::<i64>("", ROW_ERROR)? else {
            return Ok(None);
        };

        let intent = loop {
            let Some(token) = self.next_token()? else {
                return Ok(None);
            };
            match token.parse::<Intent>() {
                Ok(intent) => break intent,
                Err(()) => {
                    writeln!(self.output, "{STATE_ERROR}")?;
                    self.prompt(STATE_PROMPT)?;
                }
            }
        };

        loop {
            let in_bounds = (1..=i64::from(config.cols())).contains(&col)
                && (1..=i64::from(config.rows())).contains(&row);
            if in_bounds {
                let coords = ((row - 1) as Coord, (col - 1) as Coord);
                return Ok(Some(Move {
                    index: config.index_of(coords),
                    intent,
                }));
            }

            writeln!(self.output, "{OUT_OF_BOUNDS}")?;
            let Some(next_col) = self.read_value::<i64>(MOVE_PROMPT, COLUMN_ERROR)? else {
                return Ok(None);
            };
            let Some(next_row) = self.read_value::<i64>("", ROW_ERROR)? else {
                return Ok(None);
            };
            (col, row) = (next_col, next_row);
        }
    }

    /// Plays `engine` to the end. Returns `None` if input ran out first.
    pub fn play(
        &mut self,
        engine: &mut BoardEngine,
        show_layout: bool,
    ) -> Result<Option<GameStatus>> {
        let config = engine.config();
        self.show(engine)?;

        // flags only, until the first cell is claimed as free
        let start = loop {
            let Some(Move { index, intent }) = self.read_move(config)? else {
                return Ok(None);
            };
            match intent {
                Intent::Mine => {
                    engine.toggle_flag(index)?;
                    self.show(engine)?;
                }
                Intent::Free => break index,
            }
        };
        engine.start_game(start)?;
        self.show(engine)?;

        while !engine.is_finished() {
            let Some(Move { index, intent }) = self.read_move(config)? else {
                return Ok(None);
            };
            match intent {
                Intent::Mine if engine.cell_at(index)?.is_revealed() => {
                    writeln!(self.output, "{ALREADY_REVEALED}")?;
                    continue;
                }
                Intent::Mine => {
                    engine.toggle_mine_mark(index)?;
                }
                Intent::Free => {
                    engine.reveal(index)?;
                }
            }
            self.show(engine)?;
        }

        let status = engine.status();
        log::info!("Game over: {:?}", status);
        writeln!(
            self.output,
            "{}",
            if status == GameStatus::Won { WIN_MESSAGE } else { LOSS_MESSAGE }
        )?;

        if show_layout {
            if let Some(truth) = engine.ground_truth() {
                let symbols: Vec<char> = truth.symbols().collect();
                let rows: Vec<String> = symbols
                    .chunks(usize::from(config.cols()))
                    .map(|row| row.iter().collect())
                    .collect();
                write_table(&mut self.output, &rows)?;
            }
        }

        self.output.flush()?;
        Ok(Some(status))
    }

    fn show(&mut self, engine: &BoardEngine) -> Result<()> {
        write_table(&mut self.output, &engine.grid().rows())?;
        Ok(())
    }

    fn prompt(&mut self, message: &str) -> Result<()> {
        if !message.is_empty() {
            write!(self.output, "{message} ")?;
        }
        self.output.flush()?;
        Ok(())
    }

    /// Prompts and parses one token, re-prompting after `error` while it does not parse.
    fn read_value<T: FromStr>(&mut self, message: &str, error: &str) -> Result<Option<T>> {
        self.prompt(message)?;
        loop {
            let Some(token) = self.next_token()? else {
                return Ok(None);
            };
            match token.parse() {
                Ok(value) => return Ok(Some(value)),
                Err(_) => {
                    log::debug!("Rejected input {:?}", token);
                    writeln!(self.output, "{error}")?;
                    self.prompt(message)?;
                }
            }
        }
    }

    fn next_token(&mut self) -> Result<Option<String>> {
        loop {
            if let Some(token) = self.pending.pop_front() {
                return Ok(Some(token));
            }
            let mut line = String::new();
            if self.input.read_line(&mut line)? == 0 {
                return Ok(None);
            }
            self.pending.extend(line.split_whitespace().map(str::to_owned));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    type TestSession = Session<Cursor<String>, Vec<u8>>;

    fn session(input: &str) -> TestSession {
        Session::new(Cursor::new(input.to_string()), Vec::new())
    }

    fn output(session: TestSession) -> String {
        String::from_utf8(session.into_output()).unwrap()
    }

    fn config() -> GameConfig {
        GameConfig::new(2, 4, 4).unwrap()
    }

    /// First seed whose opening move at the top-left corner does not end the game.
    fn ongoing_after_start(config: GameConfig) -> (u64, BoardEngine) {
        (0..)
            .find_map(|seed| {
                let mut engine = BoardEngine::with_seed(config, seed).unwrap();
                let status = engine.start_game(0).unwrap();
                (status == GameStatus::Ongoing).then_some((seed, engine))
            })
            .unwrap()
    }

    fn cell_input(config: GameConfig, index: CellIndex, state: &str) -> String {
        let (row, col) = coords_of(index, config.cols());
        format!("{} {} {}\n", col + 1, row + 1, state)
    }

    #[test]
    fn intent_is_case_insensitive() {
        assert_eq!("FREE".parse::<Intent>(), Ok(Intent::Free));
        assert_eq!("Mine".parse::<Intent>(), Ok(Intent::Mine));
        assert_eq!("flag".parse::<Intent>(), Err(()));
    }

    #[test]
    fn move_is_column_then_row() {
        let mut session = session("3 2 free\n");
        assert_eq!(
            session.read_move(config()).unwrap(),
            Some(Move {
                index: 6,
                intent: Intent::Free
            })
        );
    }

    #[test]
    fn malformed_move_parts_are_asked_again() {
        let mut session = session("x 1\ny 2 maybe\nMINE\n");
        let mv = session.read_move(config()).unwrap();

        assert_eq!(
            mv,
            Some(Move {
                index: 4,
                intent: Intent::Mine
            })
        );
        let out = output(session);
        assert!(out.contains(COLUMN_ERROR));
        assert!(out.contains(ROW_ERROR));
        assert!(out.contains(STATE_ERROR));
    }

    #[test]
    fn out_of_bounds_cells_are_asked_again() {
        let mut session = session("5 1 free\n0 3\n4 4\n");
        let mv = session.read_move(config()).unwrap();

        assert_eq!(
            mv,
            Some(Move {
                index: 15,
                intent: Intent::Free
            })
        );
        assert_eq!(output(session).matches(OUT_OF_BOUNDS).count(), 2);
    }

    #[test]
    fn mine_count_is_asked_until_valid() {
        let mut session = session("lots\n0\n16\n3\n");
        assert_eq!(
            session.ask_config(4, 4).unwrap(),
            Some(GameConfig::new(3, 4, 4).unwrap())
        );
        let out = output(session);
        assert!(out.contains(INPUT_ERROR));
        assert_eq!(out.matches("Mine count must be").count(), 2);
    }

    #[test]
    fn end_of_input_stops_quietly() {
        let mut session = session("2 2 mine\n");
        let mut engine = BoardEngine::with_seed(config(), 1).unwrap();

        assert_eq!(session.play(&mut engine, false).unwrap(), None);
        assert_eq!(engine.phase(), EnginePhase::Marking);
        assert!(output(session).contains("2|.*..|"));
    }

    #[test]
    fn marking_every_mine_wins() {
        let (seed, solved) = ongoing_after_start(config());
        let mines = solved.ground_truth().unwrap().mines().to_vec();

        let mut input = String::from("4 4 mine\n");
        input += &cell_input(config(), 0, "free");
        for &mine in &mines {
            input += &cell_input(config(), mine, "mine");
        }

        let mut session = session(&input);
        let mut engine = BoardEngine::with_seed(config(), seed).unwrap();
        assert_eq!(session.play(&mut engine, false).unwrap(), Some(GameStatus::Won));
        assert!(output(session).ends_with(&format!("{WIN_MESSAGE}\n")));
    }

    #[test]
    fn claiming_a_mine_as_free_loses() {
        let (seed, solved) = ongoing_after_start(config());
        let mine = solved.ground_truth().unwrap().mines()[0];

        let input = cell_input(config(), 0, "free") + &cell_input(config(), mine, "free");
        let mut session = session(&input);
        let mut engine = BoardEngine::with_seed(config(), seed).unwrap();

        assert_eq!(session.play(&mut engine, true).unwrap(), Some(GameStatus::Lost));
        let out = output(session);
        assert!(out.contains(LOSS_MESSAGE));
        assert!(out.contains('X'));
    }

    #[test]
    fn marking_a_revealed_cell_is_refused() {
        let (seed, _) = ongoing_after_start(config());
        let input = cell_input(config(), 0, "free") + &cell_input(config(), 0, "mine");

        let mut session = session(&input);
        let mut engine = BoardEngine::with_seed(config(), seed).unwrap();
        assert_eq!(session.play(&mut engine, false).unwrap(), None);
        assert_eq!(engine.marked_count(), 0);
        assert!(output(session).contains(ALREADY_REVEALED));
    }
}
