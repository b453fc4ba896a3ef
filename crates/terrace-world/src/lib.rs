//! Chunk addressing, world seed, and procedural terrain sampling.
#![forbid(unsafe_code)]

mod chunk_coord;
mod gen_ctx;
mod samples;
mod seed;
mod world;
pub mod worldgen;

pub use chunk_coord::{BlockPos, ChunkCoord, Direction, chunk_coord_of, local_of};
pub use gen_ctx::{ColumnSample, GenCtx};
pub use samples::ChunkSamples;
pub use seed::WorldSeed;
pub use world::World;

/// Columns per chunk edge.
pub const CHUNK_SIZE: usize = 16;
/// Vertical domain is `0..CHUNK_HEIGHT`.
pub const CHUNK_HEIGHT: i32 = 256;
