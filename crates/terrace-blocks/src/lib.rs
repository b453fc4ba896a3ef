//! Block kinds, biomes, and the per-kind mining table.
#![forbid(unsafe_code)]

pub mod mining;
pub mod types;

pub use mining::MiningTable;
pub use types::{Biome, BlockType};
