use anyhow::{Context, Result};
use chrono::Utc;
use clap::{Parser, ValueEnum};
use sapper_core::{CellCount, Difficulty, Minefield};
use std::io;
use std::path::PathBuf;

mod command;
mod host;
mod logger;
mod render;
mod session;
mod store;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, ValueEnum)]
enum DifficultyArg {
    #[default]
    Easy,
    Intermediate,
    Hard,
    Expert,
}

impl From<DifficultyArg> for Difficulty {
    fn from(arg: DifficultyArg) -> Self {
        match arg {
            DifficultyArg::Easy => Difficulty::Easy,
            DifficultyArg::Intermediate => Difficulty::Intermediate,
            DifficultyArg::Hard => Difficulty::Hard,
            DifficultyArg::Expert => Difficulty::Expert,
        }
    }
}

/// Terminal Minesweeper. Commands: `r <row> <col>` reveal, `f <row> <col>` flag, `n` new game, `q` quit.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// What log level to use
    #[command(flatten)]
    verbose: clap_verbosity_flag::Verbosity,

    /// Board preset
    #[arg(short, long, value_enum, default_value_t)]
    difficulty: DifficultyArg,

    /// Custom mine count on the preset's board
    #[arg(short, long)]
    mines: Option<CellCount>,

    /// Force a seed instead of random
    #[arg(short, long)]
    seed: Option<u64>,

    /// File keeping the best winning time
    #[arg(long, default_value = "sapper-best.json")]
    store: PathBuf,
}

fn main() -> Result<()> {
    let args = Args::parse();
    logger::init(args.verbose.log_level_filter());
    log::debug!("seed: {:?}", args.seed);

    let difficulty = Difficulty::from(args.difficulty);
    let config = match args.mines {
        Some(mines) => difficulty.custom(mines),
        None => Ok(difficulty.config()),
    }
    .context("Could not start game")?;

    let mut seeds = host::SeedSource::new(args.seed);
    let engine = Minefield::new_game(config, seeds.next_seed()).context("Could not start game")?;
    let store = store::JsonFileStore::new(args.store);

    log::debug!("App started");
    host::Host::new(engine, store, seeds, Utc::now()).run(io::stdin().lock(), io::stdout().lock())
}
