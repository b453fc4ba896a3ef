//! Column layer model, chunk grids, and neighbor routing.
#![forbid(unsafe_code)]

mod chunk;
mod column;
mod error;
mod visual;

pub use chunk::{Chunk, ChunkState, ColumnRef};
pub use column::Column;
pub use error::WorldError;
pub use visual::{HeadlessSpawner, VisualHandle, VisualSpawner};
