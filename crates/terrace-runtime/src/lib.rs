//! Chunk directory, observer-driven streaming, and the parallel precompute stage.
#![forbid(unsafe_code)]

mod directory;
mod precompute;
mod streaming;

pub use directory::ChunkDirectory;
pub use precompute::Precompute;
pub use streaming::{StreamUpdate, StreamingController};
