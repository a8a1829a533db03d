use sapper_core::{BoardSnapshot, DisplayValue, FlagState, GameStatus, TileSnapshot};
use std::fmt::{self, Write};

fn glyph(tile: &TileSnapshot) -> char {
    match (tile.revealed, tile.flag, tile.display) {
        (false, FlagState::Flagged, _) => 'F',
        (false, FlagState::Questioned, _) => '?',
        (false, FlagState::None, _) => '#',
        (true, _, DisplayValue::Empty) => '.',
        (true, _, DisplayValue::Count(count)) => char::from(b'0' + count),
        (true, _, DisplayValue::Mine) => '*',
    }
}

/// Status line followed by the grid, one row per line with row and column indices.
pub(crate) struct BoardView<'a> {
    pub snapshot: &'a BoardSnapshot,
    pub elapsed_secs: u32,
}

impl fmt::Display for BoardView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let snapshot = self.snapshot;
        let status = match snapshot.status {
            GameStatus::Playing => "playing",
            GameStatus::Won => "won",
            GameStatus::Lost => "lost",
        };

        writeln!(
            f,
            "mines left: {}  time: {}s  {}",
            snapshot.remaining_mines, self.elapsed_secs, status
        )?;

        f.write_str("    ")?;
        for column in 0..snapshot.dims.width {
            write!(f, "{column:>3}")?;
        }
        f.write_char('\n')?;

        for (row, tiles) in snapshot.rows().enumerate() {
            write!(f, "{row:>3} ")?;
            for tile in tiles {
                write!(f, "{:>3}", glyph(tile))?;
            }
            f.write_char('\n')?;
        }

        Ok(())
    }
}
