use terrace_blocks::BlockType;
use terrace_world::{BlockPos, ChunkCoord, Direction};

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum WorldError {
    #[error("chunk ({}, {}) has no {dir:?} neighbor linked", .coord.cx, .coord.cz)]
    MissingNeighbor { coord: ChunkCoord, dir: Direction },
    #[error("y={y} is above the top layer (y={top}) of column ({x}, {z})")]
    AboveColumnTop { x: i32, z: i32, y: i32, top: i32 },
    #[error("chunk ({}, {}) is not loaded", .0.cx, .0.cz)]
    ChunkNotLoaded(ChunkCoord),
    #[error("directory has no entry for chunk ({}, {})", .0.cx, .0.cz)]
    DirectoryMissing(ChunkCoord),
    #[error("y={0} is outside the vertical domain")]
    OutOfBounds(i32),
    #[error("nothing to destroy at ({}, {}, {})", .0.x, .0.y, .0.z)]
    NothingToDestroy(BlockPos),
    #[error("{kind} at ({}, {}, {}) cannot be broken", .pos.x, .pos.y, .pos.z)]
    Unbreakable { pos: BlockPos, kind: BlockType },
    #[error("({}, {}, {}) is already occupied by {kind}", .pos.x, .pos.y, .pos.z)]
    Occupied { pos: BlockPos, kind: BlockType },
    #[error("{0} cannot be placed")]
    NotPlaceable(BlockType),
}

impl WorldError {
    /// Errors that point at a streaming-radius or construction-order bug
    /// rather than a rejected request.
    pub fn is_invariant_violation(&self) -> bool {
        matches!(
            self,
            WorldError::MissingNeighbor { .. }
                | WorldError::AboveColumnTop { .. }
                | WorldError::DirectoryMissing(_)
        )
    }
}
