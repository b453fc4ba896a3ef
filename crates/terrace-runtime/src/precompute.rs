use std::sync::Arc;

use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuildError, ThreadPoolBuilder};
use terrace_world::{ChunkCoord, ChunkSamples, World};

/// Samples chunk footprints in parallel. Each task owns the buffer it
/// writes; generator contexts are built once per worker split and reused
/// across the coordinates that split handles.
pub struct Precompute {
    world: Arc<World>,
    pool: ThreadPool,
    workers: usize,
}

impl Precompute {
    pub fn new(world: Arc<World>, workers: usize) -> Result<Self, ThreadPoolBuildError> {
        let workers = workers.max(1);
        let pool = ThreadPoolBuilder::new()
            .num_threads(workers)
            .thread_name(|i| format!("terrace-gen-{i}"))
            .build()?;
        log::info!("precompute pool: {} workers", workers);
        Ok(Self {
            world,
            pool,
            workers,
        })
    }

    #[inline]
    pub fn world(&self) -> &World {
        &self.world
    }

    #[inline]
    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Samples every chunk in `coords`; output order follows the input.
    pub fn run(&self, coords: &[ChunkCoord]) -> Vec<ChunkSamples> {
        if coords.is_empty() {
            return Vec::new();
        }
        self.pool.install(|| {
            coords
                .par_iter()
                .map_init(
                    || self.world.make_gen_ctx(),
                    |ctx, coord| ChunkSamples::generate(ctx, *coord),
                )
                .collect()
        })
    }
}
