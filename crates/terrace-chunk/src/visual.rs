use std::collections::{HashMap, HashSet};

use terrace_blocks::BlockType;
use terrace_world::{BlockPos, ChunkCoord};

/// Opaque token returned by a spawner for one block visual.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VisualHandle(pub u64);

/// Renderer-side collaborator. The core never asks it for state; columns
/// track which cells they spawned themselves.
pub trait VisualSpawner {
    fn spawn(&mut self, cell: BlockPos, kind: BlockType) -> VisualHandle;

    fn despawn(&mut self, handle: VisualHandle);

    /// Chunk toggled between active and inactive.
    fn chunk_visibility(&mut self, _coord: ChunkCoord, _visible: bool) {}
}

/// Spawner without a renderer: hands out handles and remembers what is live.
#[derive(Default, Debug)]
pub struct HeadlessSpawner {
    next: u64,
    live: HashMap<VisualHandle, (BlockPos, BlockType)>,
    by_cell: HashMap<BlockPos, VisualHandle>,
    hidden: HashSet<ChunkCoord>,
    pub spawned_total: u64,
    pub despawned_total: u64,
}

impl HeadlessSpawner {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn live_count(&self) -> usize {
        self.live.len()
    }

    /// Kind of the live visual at `cell`, if any.
    pub fn live_at(&self, cell: BlockPos) -> Option<BlockType> {
        let handle = self.by_cell.get(&cell)?;
        self.live.get(handle).map(|(_, kind)| *kind)
    }

    #[inline]
    pub fn is_hidden(&self, coord: ChunkCoord) -> bool {
        self.hidden.contains(&coord)
    }
}

impl VisualSpawner for HeadlessSpawner {
    fn spawn(&mut self, cell: BlockPos, kind: BlockType) -> VisualHandle {
        debug_assert!(kind.is_material(), "spawned the Empty sentinel at {cell:?}");
        self.next += 1;
        let handle = VisualHandle(self.next);
        self.live.insert(handle, (cell, kind));
        self.by_cell.insert(cell, handle);
        self.spawned_total += 1;
        handle
    }

    fn despawn(&mut self, handle: VisualHandle) {
        if let Some((cell, _)) = self.live.remove(&handle) {
            if self.by_cell.get(&cell) == Some(&handle) {
                self.by_cell.remove(&cell);
            }
            self.despawned_total += 1;
        } else {
            log::warn!("despawn of unknown visual {:?}", handle);
        }
    }

    fn chunk_visibility(&mut self, coord: ChunkCoord, visible: bool) {
        if visible {
            self.hidden.remove(&coord);
        } else {
            self.hidden.insert(coord);
        }
    }
}
