use core::str::FromStr;
use sapper_core::Coord;
use thiserror::Error;

/// One line of player input.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum Command {
    Reveal { row: Coord, column: Coord },
    Flag { row: Coord, column: Coord },
    NewGame,
    Quit,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub(crate) enum CommandError {
    #[error("Empty command")]
    Empty,
    #[error("Unknown command {0:?}, expected r, f, n or q")]
    Unknown(String),
    #[error("Expected a row and a column")]
    MissingCoordinates,
    #[error("Invalid coordinate {0:?}")]
    InvalidCoordinate(String),
}

fn parse_coord(raw: &str) -> Result<Coord, CommandError> {
    raw.parse()
        .map_err(|_| CommandError::InvalidCoordinate(raw.to_string()))
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let Some(verb) = words.next() else {
            return Err(CommandError::Empty);
        };

        let mut coords = || -> Result<(Coord, Coord), CommandError> {
            match (words.next(), words.next()) {
                (Some(row), Some(column)) => Ok((parse_coord(row)?, parse_coord(column)?)),
                _ => Err(CommandError::MissingCoordinates),
            }
        };

        match verb.to_ascii_lowercase().as_str() {
            "r" | "reveal" => {
                let (row, column) = coords()?;
                Ok(Self::Reveal { row, column })
            }
            "f" | "flag" => {
                let (row, column) = coords()?;
                Ok(Self::Flag { row, column })
            }
            "n" | "new" => Ok(Self::NewGame),
            "q" | "quit" => Ok(Self::Quit),
            _ => Err(CommandError::Unknown(verb.to_string())),
        }
    }
}
