use alloc::collections::VecDeque;
use hashbrown::HashSet;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    #[default]
    Playing,
    Won,
    Lost,
}

impl GameStatus {
    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

/// Game state of a single board: tiles, lazily placed mines, and flag bookkeeping.
#[derive(Clone, Debug, PartialEq)]
pub struct Minefield {
    config: GameConfig,
    seed: u64,
    tiles: Array2<Tile>,
    mines: Option<MineLayout>,
    revealed_count: CellCount,
    flagged_count: CellCount,
    status: GameStatus,
}

impl Minefield {
    /// Fresh board with no mines; they are placed around the first revealed tile.
    pub fn new_game(config: GameConfig, seed: u64) -> Result<Self> {
        config.validate()?;
        log::debug!(
            "New game {}x{} with {} mines",
            config.dims.width,
            config.dims.height,
            config.mines
        );

        Ok(Self {
            config,
            seed,
            tiles: Array2::default(config.dims.shape()),
            mines: None,
            revealed_count: 0,
            flagged_count: 0,
            status: GameStatus::Playing,
        })
    }

    /// Board whose mines are already fixed, skipping first-reveal placement.
    pub fn with_layout(layout: MineLayout) -> Self {
        let config = layout.game_config();
        Self {
            config,
            seed: 0,
            tiles: Array2::default(config.dims.shape()),
            mines: Some(layout),
            revealed_count: 0,
            flagged_count: 0,
            status: GameStatus::Playing,
        }
    }

    /// Discards the current game and starts over with the same config.
    pub fn reset(&mut self, seed: u64) {
        self.seed = seed;
        self.tiles = Array2::default(self.config.dims.shape());
        self.mines = None;
        self.revealed_count = 0;
        self.flagged_count = 0;
        self.status = GameStatus::Playing;
    }

    pub fn config(&self) -> GameConfig {
        self.config
    }

    pub fn dims(&self) -> Dimensions {
        self.config.dims
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn is_finished(&self) -> bool {
        self.status.is_finished()
    }

    pub fn tile(&self, id: TileId) -> Option<Tile> {
        let dims = self.dims();
        dims.contains(id).then(|| self.tiles[dims.to_nd_index(id)])
    }

    pub fn revealed_count(&self) -> CellCount {
        self.revealed_count
    }

    pub fn mines_placed(&self) -> bool {
        self.mines.is_some()
    }

    /// Placed mine ids; empty until the first reveal.
    pub fn mine_ids(&self) -> Vec<TileId> {
        self.mines
            .as_ref()
            .map(MineLayout::mine_ids)
            .unwrap_or_default()
    }

    /// Mines minus flags. Goes negative when the player over-flags.
    pub fn remaining_mine_count(&self) -> i32 {
        i32::from(self.config.mines) - i32::from(self.flagged_count)
    }

    pub fn snapshot(&self) -> BoardSnapshot {
        BoardSnapshot::from_engine(self)
    }

    pub fn toggle_flag(&mut self, id: TileId) -> MarkOutcome {
        let dims = self.dims();
        if !dims.contains(id) || self.status.is_finished() {
            return MarkOutcome::NoChange;
        }

        let tile = &mut self.tiles[dims.to_nd_index(id)];
        if tile.revealed {
            return MarkOutcome::NoChange;
        }

        let previous = tile.flag;
        tile.flag = previous.cycle();
        match (previous, tile.flag) {
            (_, FlagState::Flagged) => self.flagged_count += 1,
            (FlagState::Flagged, _) => self.flagged_count -= 1,
            _ => {}
        }
        MarkOutcome::Changed
    }

    pub fn reveal(&mut self, id: TileId) -> RevealOutcome {
        let dims = self.dims();
        if !dims.contains(id) || self.status.is_finished() {
            return RevealOutcome::NoChange;
        }

        let (config, seed) = (self.config, self.seed);
        let mines = &*self
            .mines
            .get_or_insert_with(|| RandomMineGenerator::new(seed).generate(config, id));

        let tile = self.tiles[dims.to_nd_index(id)];
        if tile.revealed || tile.flag.is_marked() {
            return RevealOutcome::NoChange;
        }

        if mines.contains_mine(id) {
            for mine in mines.mine_ids() {
                self.tiles[dims.to_nd_index(mine)].reveal(DisplayValue::Mine);
            }
            log::debug!("Hit mine at tile {id}");
            self.status = GameStatus::Lost;
            return RevealOutcome::HitMine;
        }

        let flood = flood_reveal(mines, &mut self.tiles, id);
        self.revealed_count += flood.opened;
        self.flagged_count -= flood.cleared_flags;
        log::debug!("Revealed {} tiles from tile {id}", flood.opened);

        if self.revealed_count == self.config.safe_tile_count() {
            self.status = GameStatus::Won;
            RevealOutcome::Won
        } else {
            RevealOutcome::Revealed
        }
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
struct FloodResult {
    opened: CellCount,
    cleared_flags: CellCount,
}

/// Reveals `start` and spreads through zero-count tiles, visiting each tile at most once.
///
/// Mines are never opened. Marked tiles reached by the cascade are opened and lose their marker;
/// `cleared_flags` counts the `Flagged` ones so the mine counter can follow.
fn flood_reveal(mines: &MineLayout, tiles: &mut Array2<Tile>, start: TileId) -> FloodResult {
    let dims = mines.dims();
    let mut visited = HashSet::new();
    let mut to_visit = VecDeque::from([start]);
    let mut result = FloodResult::default();

    while let Some(id) = to_visit.pop_front() {
        if !visited.insert(id) {
            continue;
        }

        let tile = &mut tiles[dims.to_nd_index(id)];
        if tile.revealed || mines.contains_mine(id) {
            continue;
        }

        if tile.flag == FlagState::Flagged {
            result.cleared_flags += 1;
        }
        tile.flag = FlagState::None;

        let adjacent = mines.adjacent_mine_count(id);
        tile.reveal(DisplayValue::from_adjacent(adjacent));
        result.opened += 1;

        if adjacent == 0 {
            to_visit.extend(
                dims.neighbors(id)
                    .into_iter()
                    .filter(|neighbor| !visited.contains(neighbor))
                    .filter(|&neighbor| !tiles[dims.to_nd_index(neighbor)].revealed),
            );
        }
    }

    result
}
