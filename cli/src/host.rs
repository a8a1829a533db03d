use anyhow::{Context, Result};
use chrono::prelude::*;
use sapper_core::{Coord, Minefield, RevealOutcome, TileId};
use std::io::{BufRead, Write};

use crate::command::{Command, CommandError};
use crate::render::BoardView;
use crate::session::GameSession;
use crate::store::{BestTimeStore, record_win};

/// Seeds for consecutive games: a fixed start that counts up, or the wall clock.
#[derive(Copy, Clone, Debug)]
pub(crate) struct SeedSource {
    next_fixed: Option<u64>,
}

impl SeedSource {
    pub fn new(seed: Option<u64>) -> Self {
        Self { next_fixed: seed }
    }

    pub fn next_seed(&mut self) -> u64 {
        match self.next_fixed.as_mut() {
            Some(seed) => {
                let current = *seed;
                *seed = seed.wrapping_add(1);
                current
            }
            None => clock_seed(),
        }
    }
}

fn clock_seed() -> u64 {
    use web_time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_nanos() as u64)
        .unwrap_or_default()
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum Flow {
    Continue,
    Quit,
}

/// Line-driven host: turns commands into engine calls and prints the board after each one.
pub(crate) struct Host<S> {
    session: GameSession,
    store: S,
    seeds: SeedSource,
}

impl<S: BestTimeStore> Host<S> {
    pub fn new(engine: Minefield, store: S, seeds: SeedSource, now: DateTime<Utc>) -> Self {
        Self {
            session: GameSession::new(engine, now),
            store,
            seeds,
        }
    }

    pub fn run(&mut self, input: impl BufRead, mut output: impl Write) -> Result<()> {
        self.print_board(&mut output, Utc::now())?;

        for line in input.lines() {
            let line = line.context("Could not read input")?;
            if self.step(&line, Utc::now(), &mut output)? == Flow::Quit {
                break;
            }
        }

        output.flush()?;
        Ok(())
    }

    pub fn step(&mut self, line: &str, now: DateTime<Utc>, out: &mut impl Write) -> Result<Flow> {
        let command = match line.parse::<Command>() {
            Ok(command) => command,
            Err(CommandError::Empty) => return Ok(Flow::Continue),
            Err(err) => {
                writeln!(out, "{err}")?;
                return Ok(Flow::Continue);
            }
        };

        match command {
            Command::Reveal { row, column } => {
                let Some(id) = self.tile_id(row, column, out)? else {
                    return Ok(Flow::Continue);
                };
                self.reveal(id, now, out)?;
            }
            Command::Flag { row, column } => {
                let Some(id) = self.tile_id(row, column, out)? else {
                    return Ok(Flow::Continue);
                };
                if !self.session.toggle_flag(id, now).has_update() && self.session.engine.is_finished() {
                    writeln!(out, "Game over, type n for a new game")?;
                }
            }
            Command::NewGame => {
                let seed = self.seeds.next_seed();
                log::info!("Starting a new game");
                log::debug!("seed: {seed}");
                self.session.restart(seed, now);
            }
            Command::Quit => return Ok(Flow::Quit),
        }

        self.print_board(out, now)?;
        Ok(Flow::Continue)
    }

    fn tile_id(&self, row: Coord, column: Coord, out: &mut impl Write) -> Result<Option<TileId>> {
        let id = self.session.engine.dims().id_at(row, column);
        if id.is_none() {
            writeln!(out, "Tile {row} {column} is outside the board")?;
        }
        Ok(id)
    }

    fn reveal(&mut self, id: TileId, now: DateTime<Utc>, out: &mut impl Write) -> Result<()> {
        match self.session.reveal(id, now) {
            RevealOutcome::Won => {
                let secs = self.session.elapsed_secs(now);
                log::info!("Won in {secs}s");
                if record_win(&mut self.store, secs)? {
                    writeln!(out, "You won in {secs}s, a new best time!")?;
                } else {
                    writeln!(out, "You won in {secs}s")?;
                }
            }
            RevealOutcome::HitMine => {
                log::info!("Lost after {} moves", self.session.move_count);
                writeln!(out, "Boom! Type n for a new game")?;
            }
            RevealOutcome::NoChange if self.session.engine.is_finished() => {
                writeln!(out, "Game over, type n for a new game")?;
            }
            RevealOutcome::NoChange | RevealOutcome::Revealed => {}
        }
        Ok(())
    }

    fn print_board(&self, out: &mut impl Write, now: DateTime<Utc>) -> Result<()> {
        let snapshot = self.session.engine.snapshot();
        let view = BoardView {
            snapshot: &snapshot,
            elapsed_secs: self.session.elapsed_secs(now),
        };
        write!(out, "{view}")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use chrono::TimeDelta;
    use sapper_core::{Dimensions, GameStatus, MineLayout};

    fn at(secs: i64) -> DateTime<Utc> {
        DateTime::<Utc>::from_timestamp_millis(0).unwrap() + TimeDelta::seconds(secs)
    }

    fn host(mines: &[TileId], best: Option<u32>) -> Host<MemoryStore> {
        let layout = MineLayout::from_mine_ids(Dimensions::new(3, 3), mines).unwrap();
        Host::new(
            Minefield::with_layout(layout),
            MemoryStore { best },
            SeedSource::new(Some(1)),
            at(0),
        )
    }

    fn step(host: &mut Host<MemoryStore>, line: &str, secs: i64) -> String {
        let mut out: Vec<u8> = Vec::new();
        assert_eq!(host.step(line, at(secs), &mut out).unwrap(), Flow::Continue);
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn winning_records_best_time() {
        let mut host = host(&[8], Some(100));

        step(&mut host, "f 2 2", 10);
        let text = step(&mut host, "r 0 0", 40);

        assert!(text.starts_with("You won in 40s, a new best time!\n"));
        assert_eq!(host.store.best, Some(40));
        assert_eq!(host.session.engine.status(), GameStatus::Won);
    }

    #[test]
    fn slower_win_keeps_previous_record() {
        let mut host = host(&[8], Some(5));

        step(&mut host, "f 2 2", 0);
        let text = step(&mut host, "r 0 0", 20);

        assert!(text.starts_with("You won in 20s\n"));
        assert_eq!(host.store.best, Some(5));
        assert!(step(&mut host, "r 0 0", 21).starts_with("Game over"));
    }

    #[test]
    fn hitting_a_mine_ends_the_game() {
        let mut host = host(&[0, 8], None);

        let text = step(&mut host, "r 0 0", 3);

        assert!(text.starts_with("Boom!"));
        assert_eq!(host.session.engine.status(), GameStatus::Lost);
        assert_eq!(host.store.best, None);
    }

    #[test]
    fn bad_lines_keep_the_game_going() {
        let mut host = host(&[8], None);

        assert_eq!(step(&mut host, "", 0), "");
        assert!(step(&mut host, "r 9 9", 0).starts_with("Tile 9 9 is outside the board"));
        assert!(step(&mut host, "dig 1 1", 0).starts_with("Unknown command"));
        assert_eq!(host.session.move_count, 0);
    }

    #[test]
    fn new_game_uses_fresh_seed_and_clears_board() {
        let mut host = host(&[0, 8], None);
        step(&mut host, "r 0 0", 3);

        step(&mut host, "n", 4);

        assert_eq!(host.session.engine.status(), GameStatus::Playing);
        assert!(!host.session.engine.mines_placed());
        assert_eq!(host.seeds.next_seed(), 2);
    }

    #[test]
    fn quit_stops_the_loop() {
        let mut host = host(&[8], None);
        let mut out: Vec<u8> = Vec::new();

        host.run("f 0 1\nq\nr 0 0\n".as_bytes(), &mut out).unwrap();

        assert_eq!(host.session.engine.revealed_count(), 0);
        assert_eq!(host.session.engine.remaining_mine_count(), 0);
    }

    #[test]
    fn fixed_seed_counts_up() {
        let mut seeds = SeedSource::new(Some(u64::MAX));

        assert_eq!(seeds.next_seed(), u64::MAX);
        assert_eq!(seeds.next_seed(), 0);
    }
}
