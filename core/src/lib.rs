#![no_std]

extern crate alloc;

use alloc::vec::Vec;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

pub use engine::*;
pub use error::*;
pub use generator::*;
pub use snapshot::*;
pub use tile::*;
pub use types::*;

mod engine;
mod error;
mod generator;
mod snapshot;
mod tile;
mod types;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    pub dims: Dimensions,
    pub mines: CellCount,
}

impl GameConfig {
    pub const fn new_unchecked(dims: Dimensions, mines: CellCount) -> Self {
        Self { dims, mines }
    }

    pub fn new(width: Coord, height: Coord, mines: CellCount) -> Result<Self> {
        let config = Self::new_unchecked(Dimensions::new(width, height), mines);
        config.validate()?;
        Ok(config)
    }

    /// A board needs at least one tile and at least one tile that is not a mine.
    pub fn validate(&self) -> Result<()> {
        if self.dims.width == 0 || self.dims.height == 0 {
            return Err(ConfigIssue::EmptyBoard.into());
        }

        let tiles = self.total_tiles();
        if self.mines >= tiles {
            return Err(ConfigIssue::TooManyMines {
                mines: self.mines,
                tiles,
            }
            .into());
        }

        Ok(())
    }

    pub const fn total_tiles(&self) -> CellCount {
        self.dims.tile_count()
    }

    pub const fn safe_tile_count(&self) -> CellCount {
        self.total_tiles().saturating_sub(self.mines)
    }
}

/// Built-in board presets.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Difficulty {
    #[default]
    Easy,
    Intermediate,
    Hard,
    Expert,
}

impl Difficulty {
    pub const ALL: [Difficulty; 4] = [
        Difficulty::Easy,
        Difficulty::Intermediate,
        Difficulty::Hard,
        Difficulty::Expert,
    ];

    pub const fn config(self) -> GameConfig {
        use Difficulty::*;
        let (width, height, mines) = match self {
            Easy => (10, 10, 12),
            Intermediate => (18, 14, 35),
            Hard => (24, 20, 70),
            Expert => (34, 20, 110),
        };
        GameConfig::new_unchecked(Dimensions::new(width, height), mines)
    }

    /// Highest mine count a custom game on this preset's board accepts.
    pub const fn mine_cap(self) -> CellCount {
        match self {
            Self::Easy => 89,
            _ => self.config().total_tiles() - 1,
        }
    }

    /// This preset's board size with a player-chosen mine count.
    pub fn custom(self, mines: CellCount) -> Result<GameConfig> {
        let cap = self.mine_cap();
        if mines > cap {
            log::warn!("Refusing {mines} mines on {self:?}, limit is {cap}");
            return Err(ConfigIssue::AbovePresetCap { mines, cap }.into());
        }

        let config = GameConfig::new_unchecked(self.config().dims, mines);
        config.validate()?;
        Ok(config)
    }
}

/// Placed mines of a single game.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "MineLayoutRepr")]
pub struct MineLayout {
    dims: Dimensions,
    mine_mask: Array2<bool>,
    mine_count: CellCount,
}

impl MineLayout {
    pub(crate) fn from_mine_mask(dims: Dimensions, mine_mask: Array2<bool>) -> Self {
        let mine_count = mine_mask.iter().filter(|&&is_mine| is_mine).count() as CellCount;
        Self {
            dims,
            mine_mask,
            mine_count,
        }
    }

    /// Builds a layout with mines at exactly `mine_ids`; duplicates collapse.
    pub fn from_mine_ids(dims: Dimensions, mine_ids: &[TileId]) -> Result<Self> {
        GameConfig::new_unchecked(dims, 0).validate()?;

        let mut mine_mask: Array2<bool> = Array2::default(dims.shape());
        for &id in mine_ids {
            if !dims.contains(id) {
                return Err(ConfigIssue::MineOutOfRange(id).into());
            }
            mine_mask[dims.to_nd_index(id)] = true;
        }

        let layout = Self::from_mine_mask(dims, mine_mask);
        layout.game_config().validate()?;
        Ok(layout)
    }

    pub fn game_config(&self) -> GameConfig {
        GameConfig::new_unchecked(self.dims, self.mine_count)
    }

    pub fn dims(&self) -> Dimensions {
        self.dims
    }

    pub fn mine_count(&self) -> CellCount {
        self.mine_count
    }

    pub fn contains_mine(&self, id: TileId) -> bool {
        self.dims.contains(id) && self.mine_mask[self.dims.to_nd_index(id)]
    }

    pub fn adjacent_mine_count(&self, id: TileId) -> u8 {
        self.dims
            .iter_neighbors(id)
            .filter(|&neighbor| self.contains_mine(neighbor))
            .count() as u8
    }

    pub fn mine_ids(&self) -> Vec<TileId> {
        (0..self.dims.tile_count())
            .filter(|&id| self.contains_mine(id))
            .collect()
    }
}

/// Deserialized form of [`MineLayout`]; the mine count is recomputed from the mask.
#[derive(Deserialize)]
struct MineLayoutRepr {
    dims: Dimensions,
    mine_mask: Array2<bool>,
}

impl TryFrom<MineLayoutRepr> for MineLayout {
    type Error = GameError;

    fn try_from(repr: MineLayoutRepr) -> Result<Self> {
        if repr.mine_mask.shape() != repr.dims.shape() {
            return Err(ConfigIssue::MaskShapeMismatch.into());
        }

        let layout = Self::from_mine_mask(repr.dims, repr.mine_mask);
        layout.game_config().validate()?;
        Ok(layout)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MarkOutcome {
    NoChange,
    Changed,
}

impl MarkOutcome {
    pub const fn has_update(self) -> bool {
        match self {
            Self::NoChange => false,
            Self::Changed => true,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RevealOutcome {
    NoChange,
    Revealed,
    HitMine,
    Won,
}

impl RevealOutcome {
    pub const fn has_update(self) -> bool {
        use RevealOutcome::*;
        match self {
            NoChange => false,
            Revealed => true,
            HitMine => true,
            Won => true,
        }
    }
}
