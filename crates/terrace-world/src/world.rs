use std::sync::Arc;

use crate::gen_ctx::{ColumnSample, GenCtx};
use crate::seed::WorldSeed;
use crate::worldgen::WorldGenParams;

/// Immutable generator context: the seed and the parameter snapshot every
/// sampling call site derives its noise channels from.
#[derive(Clone, Debug)]
pub struct World {
    pub seed: WorldSeed,
    pub params: Arc<WorldGenParams>,
}

impl World {
    pub fn new(seed: WorldSeed, params: WorldGenParams) -> Self {
        Self {
            seed,
            params: Arc::new(params),
        }
    }

    pub fn with_seed(seed: u64) -> Self {
        Self::new(WorldSeed::new(seed), WorldGenParams::default())
    }

    pub fn make_gen_ctx(&self) -> GenCtx {
        GenCtx::new(self.seed, Arc::clone(&self.params))
    }

    /// One-off sample.
    pub fn sample(&self, wx: i32, wz: i32) -> ColumnSample {
        // PERF: builds fresh noise channels; reuse a `GenCtx` when sampling many columns.
        self.make_gen_ctx().sample(wx, wz)
    }

    /// Observer spawn y: two cells above the generated surface.
    pub fn spawn_height(&self, wx: i32, wz: i32) -> i32 {
        self.sample(wx, wz).height + 2
    }
}
