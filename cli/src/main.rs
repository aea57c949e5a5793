use std::io;

use anyhow::{Context, bail};
use clap::Parser;
use textsweep_core::*;

mod logging;
mod render;
mod session;

use logging::init_logging;
use session::Session;

/// Minesweeper in the terminal.
///
/// Moves are typed as `<column> <row> <free|mine>`, both numbers 1-based.
/// Cells marked `mine` before the first `free` claim are cleared once the
/// field is laid out around that first cell.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// What log level to use
    #[command(flatten)]
    verbose: clap_verbosity_flag::Verbosity,

    /// Number of mines, asked for interactively when omitted
    #[arg(short, long)]
    mines: Option<CellCount>,

    #[arg(short, long, default_value_t = 9)]
    rows: Coord,

    #[arg(short, long, default_value_t = 9)]
    cols: Coord,

    /// Force a seed instead of random
    #[arg(short, long)]
    seed: Option<u64>,

    /// Print the solved field once the game ends
    #[arg(long)]
    show_layout: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging(args.verbose.log_level_filter());
    log::debug!("{:?}", args);

    if mult(args.rows, args.cols) < 2 {
        bail!("a {}x{} field has no room for mines", args.rows, args.cols);
    }

    let mut session = Session::new(io::stdin().lock(), io::stdout().lock());

    let config = match args.mines {
        Some(mines) => GameConfig::new(mines, args.rows, args.cols)
            .context("invalid field configuration")?,
        None => match session.ask_config(args.rows, args.cols)? {
            Some(config) => config,
            None => return Ok(()),
        },
    };

    let mut engine = match args.seed {
        Some(seed) => BoardEngine::with_seed(config, seed)?,
        None => BoardEngine::from_config(config)?,
    };
    log::debug!("seed: {}", engine.seed());

    if session.play(&mut engine, args.show_layout)?.is_none() {
        log::info!("Input closed before the game ended");
    }
    Ok(())
}
