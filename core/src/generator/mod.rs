use crate::*;
pub use random::*;

mod random;

/// Decides where the mines of a game go once the first tile is chosen.
pub trait MineGenerator {
    /// Places `config.mines` mines, never on `safe`.
    fn generate(self, config: GameConfig, safe: TileId) -> MineLayout;
}
