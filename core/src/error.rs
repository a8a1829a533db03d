use thiserror::Error;

use crate::{CellCount, TileId};

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid game config: {0}")]
    InvalidConfig(ConfigIssue),
}

/// Why a board configuration was refused.
#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum ConfigIssue {
    #[error("board must be at least 1x1")]
    EmptyBoard,
    #[error("{mines} mines do not leave a safe tile on a board of {tiles}")]
    TooManyMines { mines: CellCount, tiles: CellCount },
    #[error("{mines} mines exceed the limit of {cap} for this preset")]
    AbovePresetCap { mines: CellCount, cap: CellCount },
    #[error("mine at tile {0} is outside the board")]
    MineOutOfRange(TileId),
    #[error("mine mask does not match the board size")]
    MaskShapeMismatch,
}

impl From<ConfigIssue> for GameError {
    fn from(issue: ConfigIssue) -> Self {
        Self::InvalidConfig(issue)
    }
}

pub type Result<T> = core::result::Result<T, GameError>;
