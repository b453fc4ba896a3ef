use terrace_blocks::{BlockType, MiningTable};
use terrace_chunk::{VisualSpawner, WorldError};
use terrace_runtime::ChunkDirectory;
use terrace_world::{BlockPos, CHUNK_HEIGHT};

use crate::inventory::{BlockSelector, Inventory};
use crate::mining::{MiningProgress, MiningStep};

#[derive(Debug, PartialEq, thiserror::Error)]
pub enum EditError {
    #[error(transparent)]
    World(#[from] WorldError),
    #[error("no {0} left in the inventory")]
    OutOfStock(BlockType),
    #[error("({}, {}, {}) overlaps the observer", .0.x, .0.y, .0.z)]
    BlocksObserver(BlockPos),
}

/// Mining and placement on behalf of one observer.
#[derive(Debug, Default)]
pub struct EditSession {
    pub inventory: Inventory,
    pub selector: BlockSelector,
    mining: MiningProgress,
    table: MiningTable,
}

impl EditSession {
    pub fn new(table: MiningTable) -> Self {
        Self {
            table,
            ..Self::default()
        }
    }

    pub fn mining(&self) -> &MiningProgress {
        &self.mining
    }

    pub fn stop_mining(&mut self) {
        self.mining.reset();
    }

    /// Keeps mining the block at `pos` for `dt` seconds; a completed block
    /// is destroyed and goes into the inventory.
    pub fn mine(
        &mut self,
        dir: &mut ChunkDirectory,
        pos: BlockPos,
        dt: f32,
        spawner: &mut dyn VisualSpawner,
    ) -> Result<MiningStep, EditError> {
        let kind = dir.type_at(pos)?;
        let step = self.mining.advance(pos, kind, dt, &self.table);
        if step == MiningStep::Complete {
            let mined = dir.block_destroyed(pos, spawner)?;
            self.inventory.collect(mined);
            log::debug!("mined {} at {:?}, holding {}", mined, pos, self.inventory.count(mined));
        }
        Ok(step)
    }

    /// Places the selected kind at `pos`, using one from the inventory.
    /// `observer` is the cell holding the observer's feet; it and the cell
    /// above stay free.
    pub fn place(
        &mut self,
        dir: &mut ChunkDirectory,
        pos: BlockPos,
        observer: Option<BlockPos>,
        spawner: &mut dyn VisualSpawner,
    ) -> Result<BlockType, EditError> {
        if pos.y >= CHUNK_HEIGHT {
            return Err(WorldError::OutOfBounds(pos.y).into());
        }
        let kind = self.selector.current();
        if self.inventory.count(kind) == 0 {
            return Err(EditError::OutOfStock(kind));
        }
        if let Some(o) = observer {
            if o.x == pos.x && o.z == pos.z && (pos.y == o.y || pos.y == o.y + 1) {
                return Err(EditError::BlocksObserver(pos));
            }
        }
        dir.block_placed(pos, kind, spawner)?;
        self.inventory.take(kind);
        Ok(kind)
    }
}
