use terrace_blocks::BlockType;
use terrace_world::{BlockPos, CHUNK_SIZE, ChunkCoord, ChunkSamples, Direction, local_of};

use crate::column::Column;
use crate::error::WorldError;
use crate::visual::VisualSpawner;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChunkState {
    Active,
    Inactive,
}

/// Address of a column relative to the chunk asking for it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ColumnRef {
    Local(usize),
    Remote(ChunkCoord, usize),
}

/// A `CHUNK_SIZE`² grid of columns plus the generator samples it was built
/// from. Neighbors are referenced by coordinate and resolved by the owner
/// of all chunks.
#[derive(Debug)]
pub struct Chunk {
    coord: ChunkCoord,
    columns: Vec<Column>,
    samples: Option<ChunkSamples>,
    neighbors: [Option<ChunkCoord>; 4],
    state: ChunkState,
    height_range: (i32, i32),
    pub modified: bool,
}

impl Chunk {
    /// Container without terrain.
    pub fn shell(coord: ChunkCoord) -> Self {
        Self {
            coord,
            columns: Vec::new(),
            samples: None,
            neighbors: [None; 4],
            state: ChunkState::Active,
            height_range: (0, 0),
            modified: false,
        }
    }

    /// Builds every column from `samples`. `neighbor_height(x, z)` answers
    /// for world columns outside this footprint.
    pub fn initialize(
        &mut self,
        samples: ChunkSamples,
        mut neighbor_height: impl FnMut(i32, i32) -> i32,
        spawner: &mut dyn VisualSpawner,
    ) {
        debug_assert_eq!(samples.coord, self.coord);
        let (base_x, base_z) = self.coord.origin();
        let mut columns = Vec::with_capacity(CHUNK_SIZE * CHUNK_SIZE);
        for lz in 0..CHUNK_SIZE {
            for lx in 0..CHUNK_SIZE {
                let wx = base_x + lx as i32;
                let wz = base_z + lz as i32;
                let heights = Direction::ALL.map(|dir| {
                    let (dx, dz) = dir.offset();
                    samples
                        .get_world(wx + dx, wz + dz)
                        .map_or_else(|| neighbor_height(wx + dx, wz + dz), |s| s.height)
                });
                columns.push(Column::generate(
                    wx,
                    wz,
                    samples.get_local(lx, lz),
                    heights,
                    spawner,
                ));
            }
        }
        self.columns = columns;
        self.height_range = samples.height_range();
        self.samples = Some(samples);
        log::debug!(
            "chunk ({}, {}) built, heights {:?}",
            self.coord.cx,
            self.coord.cz,
            self.height_range
        );
    }

    #[inline]
    pub fn coord(&self) -> ChunkCoord {
        self.coord
    }

    #[inline]
    pub fn is_initialized(&self) -> bool {
        !self.columns.is_empty()
    }

    #[inline]
    pub fn state(&self) -> ChunkState {
        self.state
    }

    #[inline]
    pub fn set_state(&mut self, state: ChunkState) {
        self.state = state;
    }

    /// Lowest and highest generated surface heights in the footprint.
    #[inline]
    pub fn height_range(&self) -> (i32, i32) {
        self.height_range
    }

    pub fn samples(&self) -> Option<&ChunkSamples> {
        self.samples.as_ref()
    }

    /// Generated surface height of a world column inside this chunk.
    pub fn cached_height(&self, wx: i32, wz: i32) -> Option<i32> {
        self.samples.as_ref()?.get_world(wx, wz).map(|s| s.height)
    }

    pub fn link(&mut self, dir: Direction, coord: ChunkCoord) {
        self.neighbors[dir.index()] = Some(coord);
    }

    pub fn unlink(&mut self, dir: Direction) {
        self.neighbors[dir.index()] = None;
    }

    #[inline]
    pub fn neighbor(&self, dir: Direction) -> Option<ChunkCoord> {
        self.neighbors[dir.index()]
    }

    pub fn column(&self, lx: usize, lz: usize) -> Option<&Column> {
        self.columns.get(ChunkSamples::idx(lx, lz))
    }

    pub fn column_mut(&mut self, lx: usize, lz: usize) -> Option<&mut Column> {
        self.columns.get_mut(ChunkSamples::idx(lx, lz))
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Column adjacent to local `(lx, lz)` in `dir`, wrapping into the
    /// linked neighbor chunk across an edge.
    pub fn neighbor_column(
        &self,
        lx: usize,
        lz: usize,
        dir: Direction,
    ) -> Result<ColumnRef, WorldError> {
        let (dx, dz) = dir.offset();
        let nx = lx as i32 + dx;
        let nz = lz as i32 + dz;
        let size = CHUNK_SIZE as i32;
        if (0..size).contains(&nx) && (0..size).contains(&nz) {
            return Ok(ColumnRef::Local(ChunkSamples::idx(nx as usize, nz as usize)));
        }
        let Some(coord) = self.neighbor(dir) else {
            let err = WorldError::MissingNeighbor {
                coord: self.coord,
                dir,
            };
            log::error!("{}", err);
            return Err(err);
        };
        Ok(ColumnRef::Remote(
            coord,
            ChunkSamples::idx(local_of(nx), local_of(nz)),
        ))
    }

    pub fn type_at(&self, pos: BlockPos) -> Result<BlockType, WorldError> {
        let (lx, lz) = pos.local();
        self.column(lx, lz)
            .ok_or(WorldError::ChunkNotLoaded(self.coord))?
            .type_at(pos.y)
    }

    /// Destroys the cell at `pos` and notifies the neighbor columns inside
    /// this chunk. Neighbor columns in other chunks are returned for the
    /// caller to deliver.
    pub fn block_destroyed(
        &mut self,
        pos: BlockPos,
        spawner: &mut dyn VisualSpawner,
    ) -> Result<(BlockType, Vec<(ChunkCoord, usize)>), WorldError> {
        debug_assert_eq!(pos.chunk(), self.coord);
        let (lx, lz) = pos.local();
        let refs = Direction::ALL
            .iter()
            .map(|dir| self.neighbor_column(lx, lz, *dir))
            .collect::<Result<Vec<_>, _>>()?;
        let column = self
            .columns
            .get_mut(ChunkSamples::idx(lx, lz))
            .ok_or(WorldError::ChunkNotLoaded(self.coord))?;
        let old = column.block_replaced(pos.y, BlockType::Empty, spawner)?;
        self.modified = true;

        let mut remote = Vec::new();
        for r in refs {
            match r {
                ColumnRef::Local(index) => {
                    if let Some(col) = self.columns.get_mut(index) {
                        col.neighbor_destroyed(pos.y, spawner);
                    }
                }
                ColumnRef::Remote(coord, index) => remote.push((coord, index)),
            }
        }
        Ok((old, remote))
    }

    /// Places `kind` into the air cell at `pos`. Like a destroy, it needs
    /// every neighbor chunk the cell touches to be linked. Hiding the cells
    /// the new block buries is left to the owner of all chunks, since their
    /// faces may lie in other chunks.
    pub fn block_placed(
        &mut self,
        pos: BlockPos,
        kind: BlockType,
        spawner: &mut dyn VisualSpawner,
    ) -> Result<(), WorldError> {
        debug_assert_eq!(pos.chunk(), self.coord);
        if kind.is_empty() {
            return Err(WorldError::NotPlaceable(kind));
        }
        let (lx, lz) = pos.local();
        for dir in Direction::ALL {
            self.neighbor_column(lx, lz, dir)?;
        }
        let coord = self.coord;
        let column = self
            .column_mut(lx, lz)
            .ok_or(WorldError::ChunkNotLoaded(coord))?;
        column.block_replaced(pos.y, kind, spawner)?;
        self.modified = true;
        Ok(())
    }

    /// Hides the cell at `pos` if it and all six faces are material.
    /// `sides_solid` answers for the horizontal faces.
    pub fn conceal(
        &mut self,
        pos: BlockPos,
        sides_solid: bool,
        spawner: &mut dyn VisualSpawner,
    ) -> bool {
        let (lx, lz) = pos.local();
        self.column_mut(lx, lz)
            .is_some_and(|col| col.conceal(pos.y, sides_solid, spawner))
    }

    /// Whether the world cell `pos` holds material. Unbuilt chunks hold none.
    pub fn is_solid(&self, pos: BlockPos) -> bool {
        let (lx, lz) = pos.local();
        self.column(lx, lz).is_some_and(|col| col.is_solid(pos.y))
    }

    /// Delivers a destroy in an adjacent chunk to column `index`.
    pub fn neighbor_destroyed(
        &mut self,
        index: usize,
        y: i32,
        spawner: &mut dyn VisualSpawner,
    ) -> Result<(), WorldError> {
        let column = self
            .columns
            .get_mut(index)
            .ok_or(WorldError::ChunkNotLoaded(self.coord))?;
        column.neighbor_destroyed(y, spawner);
        Ok(())
    }

    pub fn despawn_all(&mut self, spawner: &mut dyn VisualSpawner) {
        for column in &mut self.columns {
            column.despawn_all(spawner);
        }
    }
}
