use hashbrown::HashMap;
use terrace_blocks::BlockType;
use terrace_chunk::{Chunk, ChunkState, ColumnRef, VisualSpawner, WorldError};
use terrace_world::{BlockPos, ChunkCoord, Direction};

/// Every chunk that has been built, keyed by coordinate. Chunks are only
/// dropped through `evict`; streaming toggles their state instead.
#[derive(Default)]
pub struct ChunkDirectory {
    chunks: HashMap<ChunkCoord, Chunk>,
}

impl ChunkDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn get(&self, coord: ChunkCoord) -> Option<&Chunk> {
        self.chunks.get(&coord)
    }

    #[inline]
    pub fn get_mut(&mut self, coord: ChunkCoord) -> Option<&mut Chunk> {
        self.chunks.get_mut(&coord)
    }

    #[inline]
    pub fn contains(&self, coord: ChunkCoord) -> bool {
        self.chunks.contains_key(&coord)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    /// Adds a chunk and links it with whichever cardinal neighbors exist,
    /// in both directions. Returns a chunk previously stored at the same
    /// coordinate.
    pub fn insert(&mut self, mut chunk: Chunk) -> Option<Chunk> {
        let coord = chunk.coord();
        for dir in Direction::ALL {
            let n = coord.neighbor(dir);
            if let Some(other) = self.chunks.get_mut(&n) {
                other.link(dir.opposite(), coord);
                chunk.link(dir, n);
            }
        }
        let replaced = self.chunks.insert(coord, chunk);
        if replaced.is_some() {
            log::warn!(target: "stream", "chunk ({}, {}) inserted twice", coord.cx, coord.cz);
        }
        replaced
    }

    /// Removes a chunk, clears the links pointing at it and releases its visuals.
    pub fn evict(&mut self, coord: ChunkCoord, spawner: &mut dyn VisualSpawner) -> Option<Chunk> {
        let mut chunk = self.chunks.remove(&coord)?;
        for dir in Direction::ALL {
            if let Some(other) = self.chunks.get_mut(&coord.neighbor(dir)) {
                other.unlink(dir.opposite());
            }
        }
        chunk.despawn_all(spawner);
        log::debug!(target: "stream", "evicted chunk ({}, {})", coord.cx, coord.cz);
        Some(chunk)
    }

    /// Stored coordinates, nearest to `origin` first (Chebyshev distance,
    /// then x, then z).
    pub fn coords_by_distance(&self, origin: ChunkCoord) -> Vec<ChunkCoord> {
        let mut coords: Vec<ChunkCoord> = self.chunks.keys().copied().collect();
        coords.sort_by_key(|c| (c.chebyshev(origin), c.cx, c.cz));
        coords
    }

    /// Generated surface height of a world column, if its chunk is stored.
    pub fn cached_height(&self, wx: i32, wz: i32) -> Option<i32> {
        self.chunks
            .get(&ChunkCoord::containing(wx, wz))?
            .cached_height(wx, wz)
    }

    pub fn activate(
        &mut self,
        coord: ChunkCoord,
        spawner: &mut dyn VisualSpawner,
    ) -> Result<(), WorldError> {
        self.set_state(coord, ChunkState::Active, spawner)
    }

    pub fn deactivate(
        &mut self,
        coord: ChunkCoord,
        spawner: &mut dyn VisualSpawner,
    ) -> Result<(), WorldError> {
        self.set_state(coord, ChunkState::Inactive, spawner)
    }

    fn set_state(
        &mut self,
        coord: ChunkCoord,
        state: ChunkState,
        spawner: &mut dyn VisualSpawner,
    ) -> Result<(), WorldError> {
        let Some(chunk) = self.chunks.get_mut(&coord) else {
            let err = WorldError::DirectoryMissing(coord);
            log::error!(target: "stream", "{}", err);
            return Err(err);
        };
        if chunk.state() != state {
            chunk.set_state(state);
            spawner.chunk_visibility(coord, state == ChunkState::Active);
        }
        Ok(())
    }

    pub fn type_at(&self, pos: BlockPos) -> Result<BlockType, WorldError> {
        self.chunks
            .get(&pos.chunk())
            .ok_or(WorldError::ChunkNotLoaded(pos.chunk()))?
            .type_at(pos)
    }

    /// Checks that every chunk an edit at `pos` would reach is stored and
    /// built, so the edit can finish once it starts.
    fn edit_ready(&self, pos: BlockPos) -> Result<(), WorldError> {
        let coord = pos.chunk();
        let chunk = self
            .chunks
            .get(&coord)
            .ok_or(WorldError::ChunkNotLoaded(coord))?;
        let (lx, lz) = pos.local();
        for dir in Direction::ALL {
            let ColumnRef::Remote(n, _) = chunk.neighbor_column(lx, lz, dir)? else {
                continue;
            };
            let err = match self.chunks.get(&n) {
                None => WorldError::DirectoryMissing(n),
                Some(other) if !other.is_initialized() => WorldError::ChunkNotLoaded(n),
                Some(_) => continue,
            };
            log::error!("{}", err);
            return Err(err);
        }
        Ok(())
    }

    /// Whether the world cell `pos` holds material. Cells of chunks that
    /// are not stored count as air.
    pub fn is_solid(&self, pos: BlockPos) -> bool {
        self.chunks
            .get(&pos.chunk())
            .is_some_and(|chunk| chunk.is_solid(pos))
    }

    fn conceal(&mut self, pos: BlockPos, spawner: &mut dyn VisualSpawner) -> bool {
        let sides_solid = Direction::ALL.iter().all(|dir| {
            let (dx, dz) = dir.offset();
            self.is_solid(pos.offset(dx, 0, dz))
        });
        self.chunks
            .get_mut(&pos.chunk())
            .is_some_and(|chunk| chunk.conceal(pos, sides_solid, spawner))
    }

    /// Destroys the cell at `pos`, then lets every horizontally adjacent
    /// column spawn its newly exposed cell. Fails without touching any
    /// chunk when a neighbor the destroy would notify is not stored.
    pub fn block_destroyed(
        &mut self,
        pos: BlockPos,
        spawner: &mut dyn VisualSpawner,
    ) -> Result<BlockType, WorldError> {
        self.edit_ready(pos)?;
        let coord = pos.chunk();
        let chunk = self
            .chunks
            .get_mut(&coord)
            .ok_or(WorldError::ChunkNotLoaded(coord))?;
        let (old, remote) = chunk.block_destroyed(pos, spawner)?;
        for (n, index) in remote {
            self.chunks
                .get_mut(&n)
                .ok_or(WorldError::DirectoryMissing(n))?
                .neighbor_destroyed(index, pos.y, spawner)?;
        }
        log::debug!("destroyed {} at {:?}", old, pos);
        Ok(old)
    }

    /// Places `kind` into the air cell at `pos`, then hides whichever of the
    /// six surrounding cells the new block closed off completely.
    pub fn block_placed(
        &mut self,
        pos: BlockPos,
        kind: BlockType,
        spawner: &mut dyn VisualSpawner,
    ) -> Result<(), WorldError> {
        self.edit_ready(pos)?;
        let coord = pos.chunk();
        self.chunks
            .get_mut(&coord)
            .ok_or(WorldError::ChunkNotLoaded(coord))?
            .block_placed(pos, kind, spawner)?;
        let mut hidden = 0;
        let faces = [(0, -1, 0), (0, 1, 0), (0, 0, -1), (1, 0, 0), (0, 0, 1), (-1, 0, 0)];
        for (dx, dy, dz) in faces {
            if self.conceal(pos.offset(dx, dy, dz), spawner) {
                hidden += 1;
            }
        }
        log::debug!("placed {} at {:?}, {} cells hidden", kind, pos, hidden);
        Ok(())
    }
}
