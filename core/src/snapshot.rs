use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileSnapshot {
    pub id: TileId,
    pub revealed: bool,
    pub flag: FlagState,
    pub display: DisplayValue,
}

/// Read-only copy of everything a renderer needs, tiles in id order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardSnapshot {
    pub dims: Dimensions,
    pub status: GameStatus,
    pub remaining_mines: i32,
    pub tiles: Vec<TileSnapshot>,
}

impl BoardSnapshot {
    pub fn from_engine(engine: &Minefield) -> Self {
        let dims = engine.dims();
        let tiles = (0..dims.tile_count())
            .filter_map(|id| {
                let tile = engine.tile(id)?;
                Some(TileSnapshot {
                    id,
                    revealed: tile.revealed,
                    flag: tile.flag,
                    display: tile.display,
                })
            })
            .collect();

        Self {
            dims,
            status: engine.status(),
            remaining_mines: engine.remaining_mine_count(),
            tiles,
        }
    }

    pub fn tile(&self, id: TileId) -> Option<&TileSnapshot> {
        self.tiles.get(usize::from(id))
    }

    /// Tiles grouped by row, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[TileSnapshot]> {
        self.tiles.chunks(usize::from(self.dims.width).max(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snapshot_lists_every_tile_in_order() {
        let mut engine =
            Minefield::with_layout(MineLayout::from_mine_ids(Dimensions::new(3, 2), &[5]).unwrap());
        engine.toggle_flag(5);
        engine.reveal(0);

        let snapshot = engine.snapshot();

        assert_eq!(snapshot.tiles.len(), 6);
        assert!(snapshot.tiles.iter().enumerate().all(|(i, t)| usize::from(t.id) == i));
        assert_eq!(snapshot.status, GameStatus::Playing);
        assert!(!snapshot.tile(2).unwrap().revealed);
        assert_eq!(snapshot.remaining_mines, 0);
        assert_eq!(snapshot.tile(5).unwrap().flag, FlagState::Flagged);
        assert_eq!(snapshot.tile(1).unwrap().display, DisplayValue::Count(1));
        assert_eq!(snapshot.rows().count(), 2);
        assert_eq!(snapshot.rows().next().unwrap().len(), 3);
    }

    #[test]
    fn snapshot_serializes_for_hosts() {
        let engine = Minefield::new_game(GameConfig::new(2, 1, 1).unwrap(), 0).unwrap();

        let json = serde_json::to_value(engine.snapshot()).unwrap();

        assert_eq!(json["dims"]["width"], 2);
        assert_eq!(json["status"], "Playing");
        assert_eq!(json["remaining_mines"], 1);
        assert_eq!(json["tiles"][1]["flag"], "None");
        assert_eq!(json["tiles"][1]["display"], "Empty");
    }
}
