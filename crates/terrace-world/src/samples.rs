use crate::CHUNK_SIZE;
use crate::chunk_coord::ChunkCoord;
use crate::gen_ctx::{ColumnSample, GenCtx};

/// Generator outputs for every column of one chunk footprint.
#[derive(Clone, Debug, PartialEq)]
pub struct ChunkSamples {
    pub coord: ChunkCoord,
    pub samples: Vec<ColumnSample>,
}

impl ChunkSamples {
    #[inline]
    pub fn idx(x: usize, z: usize) -> usize {
        z * CHUNK_SIZE + x
    }

    pub fn generate(ctx: &GenCtx, coord: ChunkCoord) -> Self {
        let (base_x, base_z) = coord.origin();
        let mut samples = Vec::with_capacity(CHUNK_SIZE * CHUNK_SIZE);
        for z in 0..CHUNK_SIZE {
            for x in 0..CHUNK_SIZE {
                samples.push(ctx.sample(base_x + x as i32, base_z + z as i32));
            }
        }
        Self { coord, samples }
    }

    #[inline]
    pub fn get_local(&self, x: usize, z: usize) -> ColumnSample {
        self.samples[Self::idx(x, z)]
    }

    /// Sample for a world column, if it lies in this footprint.
    pub fn get_world(&self, wx: i32, wz: i32) -> Option<ColumnSample> {
        let (base_x, base_z) = self.coord.origin();
        let lx = wx - base_x;
        let lz = wz - base_z;
        let size = CHUNK_SIZE as i32;
        if lx < 0 || lz < 0 || lx >= size || lz >= size {
            return None;
        }
        Some(self.get_local(lx as usize, lz as usize))
    }

    /// Lowest and highest surface heights in the footprint.
    pub fn height_range(&self) -> (i32, i32) {
        self.samples
            .iter()
            .fold((i32::MAX, i32::MIN), |(lo, hi), s| {
                (lo.min(s.height), hi.max(s.height))
            })
    }
}
