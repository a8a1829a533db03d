use core::fmt;
use serde::{Deserialize, Serialize};

/// Player marker on an unrevealed tile.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum FlagState {
    #[default]
    None,
    Flagged,
    Questioned,
}

impl FlagState {
    /// Next state in the `None -> Flagged -> Questioned -> None` cycle.
    pub const fn cycle(self) -> Self {
        match self {
            Self::None => Self::Flagged,
            Self::Flagged => Self::Questioned,
            Self::Questioned => Self::None,
        }
    }

    /// Flagged and questioned tiles are both protected from reveal.
    pub const fn is_marked(self) -> bool {
        !matches!(self, Self::None)
    }
}

/// What a tile shows once revealed.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum DisplayValue {
    #[default]
    Empty,
    Count(u8),
    Mine,
}

impl DisplayValue {
    pub const fn from_adjacent(count: u8) -> Self {
        if count == 0 {
            Self::Empty
        } else {
            Self::Count(count)
        }
    }
}

impl fmt::Display for DisplayValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => Ok(()),
            Self::Count(count) => write!(f, "{count}"),
            Self::Mine => f.write_str("*"),
        }
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tile {
    pub revealed: bool,
    pub flag: FlagState,
    pub display: DisplayValue,
}

impl Tile {
    pub(crate) fn reveal(&mut self, display: DisplayValue) {
        self.revealed = true;
        self.display = display;
    }
}
