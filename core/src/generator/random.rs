use super::*;

/// Uniform placement over every tile except the first one revealed.
#[derive(Clone, Debug, PartialEq)]
pub struct RandomMineGenerator {
    seed: u64,
}

impl RandomMineGenerator {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }
}

impl MineGenerator for RandomMineGenerator {
    fn generate(self, config: GameConfig, safe: TileId) -> MineLayout {
        use rand::prelude::*;

        let dims = config.dims;
        let mut mine_mask: Array2<bool> = Array2::default(dims.shape());

        let mut candidates: Vec<TileId> = (0..dims.tile_count()).filter(|&id| id != safe).collect();
        let wanted = usize::from(config.mines).min(candidates.len());
        if wanted < usize::from(config.mines) {
            log::warn!(
                "Minefield cannot fit {} mines around a safe tile, placing {}",
                config.mines,
                wanted
            );
        }

        // partial Fisher-Yates: the first `wanted` slots end up a uniform sample
        let mut rng = SmallRng::seed_from_u64(self.seed);
        for i in 0..wanted {
            let pick = rng.random_range(i..candidates.len());
            candidates.swap(i, pick);
        }

        for &id in &candidates[..wanted] {
            mine_mask[dims.to_nd_index(id)] = true;
        }

        let layout = MineLayout::from_mine_mask(dims, mine_mask);
        log::debug!(
            "Placed {} mines on {}x{} avoiding tile {}",
            layout.mine_count(),
            dims.width,
            dims.height,
            safe
        );
        layout
    }
}
