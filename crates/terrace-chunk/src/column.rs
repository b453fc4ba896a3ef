use std::collections::BTreeMap;

use terrace_blocks::BlockType;
use terrace_world::{BlockPos, CHUNK_HEIGHT, ColumnSample};

use crate::error::WorldError;
use crate::visual::{VisualHandle, VisualSpawner};

/// One vertical stack of cells stored as run-length layers.
///
/// Each key of `layers` is the inclusive top y of a layer; the layer reaches
/// down to the next lower key, and the lowest layer extends without bound.
/// Adjacent layers never share a type, and the topmost layer is material
/// with its top cell spawned.
#[derive(Clone, Debug)]
pub struct Column {
    x: i32,
    z: i32,
    layers: BTreeMap<i32, BlockType>,
    spawned: BTreeMap<i32, VisualHandle>,
}

impl Column {
    /// Builds the column from its generator sample and spawns the exposed
    /// cells. `neighbor_heights` are the surface heights of the four
    /// cardinal neighbor columns.
    pub fn generate(
        x: i32,
        z: i32,
        sample: ColumnSample,
        neighbor_heights: [i32; 4],
        spawner: &mut dyn VisualSpawner,
    ) -> Self {
        let mut col = Self {
            x,
            z,
            layers: initial_layers(sample),
            spawned: BTreeMap::new(),
        };
        let height = sample.height;
        col.expose(height, spawner);
        let min_neighbor = neighbor_heights.iter().copied().min().unwrap_or(height);
        for y in (min_neighbor + 1).max(0)..height {
            col.expose(y, spawner);
        }
        col
    }

    #[inline]
    pub fn x(&self) -> i32 {
        self.x
    }

    #[inline]
    pub fn z(&self) -> i32 {
        self.z
    }

    #[inline]
    pub fn pos(&self, y: i32) -> BlockPos {
        BlockPos::new(self.x, y, self.z)
    }

    pub fn layers(&self) -> &BTreeMap<i32, BlockType> {
        &self.layers
    }

    #[inline]
    pub fn layer_count(&self) -> usize {
        self.layers.len()
    }

    #[inline]
    pub fn is_spawned(&self, y: i32) -> bool {
        self.spawned.contains_key(&y)
    }

    #[inline]
    pub fn spawned_count(&self) -> usize {
        self.spawned.len()
    }

    pub fn spawned_cells(&self) -> impl Iterator<Item = i32> + '_ {
        self.spawned.keys().copied()
    }

    /// Top-of-column cell and its type.
    pub fn top(&self) -> Option<(i32, BlockType)> {
        self.layers.last_key_value().map(|(y, kind)| (*y, *kind))
    }

    /// Highest y the column holds material at.
    pub fn height(&self) -> i32 {
        self.top().map_or(0, |(y, _)| y)
    }

    /// Type of the cell at `y`. Cells above the top are not part of the
    /// column and asking for one is a caller bug.
    pub fn type_at(&self, y: i32) -> Result<BlockType, WorldError> {
        match self.layers.range(y..).next() {
            Some((_, kind)) => Ok(*kind),
            None => {
                let err = WorldError::AboveColumnTop {
                    x: self.x,
                    z: self.z,
                    y,
                    top: self.height(),
                };
                log::error!("{}", err);
                Err(err)
            }
        }
    }

    /// Like `type_at`, but air above the top is a normal answer.
    #[inline]
    fn kind_or_air(&self, y: i32) -> BlockType {
        self.layers
            .range(y..)
            .next()
            .map_or(BlockType::Empty, |(_, kind)| *kind)
    }

    /// Replaces the cell at `y` with `new_kind` and returns what was there.
    /// `BlockType::Empty` destroys the cell; anything else places into air.
    pub fn block_replaced(
        &mut self,
        y: i32,
        new_kind: BlockType,
        spawner: &mut dyn VisualSpawner,
    ) -> Result<BlockType, WorldError> {
        if !(0..CHUNK_HEIGHT).contains(&y) {
            return Err(WorldError::OutOfBounds(y));
        }
        let pos = self.pos(y);
        let top = self.height();
        let old = self.kind_or_air(y);
        if new_kind.is_empty() {
            if old.is_empty() {
                return Err(WorldError::NothingToDestroy(pos));
            }
            if old.is_unbreakable() {
                return Err(WorldError::Unbreakable { pos, kind: old });
            }
            if let Some(handle) = self.spawned.remove(&y) {
                spawner.despawn(handle);
            }
        } else if old.is_material() {
            return Err(WorldError::Occupied { pos, kind: old });
        }

        if y > top {
            if y - 1 > top {
                self.layers.insert(y - 1, BlockType::Empty);
            }
        } else {
            // The owning layer keeps its key above `y`; re-key the part below.
            let below = self.layers.range(..y).next_back().map(|(k, _)| *k);
            if below.is_none_or(|k| k < y - 1) {
                self.layers.insert(y - 1, old);
            }
        }
        self.layers.insert(y, new_kind);
        self.merge_layers();

        if new_kind.is_empty() {
            for ny in [y - 1, y + 1] {
                if (0..CHUNK_HEIGHT).contains(&ny) {
                    self.expose(ny, spawner);
                }
            }
        } else {
            self.expose(y, spawner);
        }
        let new_top = self.height();
        self.expose(new_top, spawner);

        debug_assert!(
            self.check_invariants(),
            "column ({}, {}) broke its layer invariants",
            self.x,
            self.z
        );
        Ok(old)
    }

    /// Whether the cell at `y` holds material. Air above the top is not.
    #[inline]
    pub fn is_solid(&self, y: i32) -> bool {
        self.kind_or_air(y).is_material()
    }

    /// Despawns the cell at `y` once all of its faces touch material.
    /// `sides_solid` answers for the four horizontal faces; the column
    /// checks above and below itself. Returns whether a visual was released.
    pub fn conceal(
        &mut self,
        y: i32,
        sides_solid: bool,
        spawner: &mut dyn VisualSpawner,
    ) -> bool {
        let enclosed = sides_solid && [y - 1, y, y + 1].iter().all(|cy| self.is_solid(*cy));
        if !enclosed {
            return false;
        }
        match self.spawned.remove(&y) {
            Some(handle) => {
                spawner.despawn(handle);
                true
            }
            None => false,
        }
    }

    /// A horizontally adjacent cell at `y` was destroyed.
    pub fn neighbor_destroyed(&mut self, y: i32, spawner: &mut dyn VisualSpawner) {
        if (0..CHUNK_HEIGHT).contains(&y) {
            self.expose(y, spawner);
        }
    }

    /// Spawns the cell at `y` when it holds material and has no visual yet.
    fn expose(&mut self, y: i32, spawner: &mut dyn VisualSpawner) {
        if self.spawned.contains_key(&y) {
            return;
        }
        let kind = self.kind_or_air(y);
        if kind.is_material() {
            let handle = spawner.spawn(self.pos(y), kind);
            self.spawned.insert(y, handle);
        }
    }

    fn merge_layers(&mut self) {
        let runs: Vec<(i32, BlockType)> = self.layers.iter().map(|(k, v)| (*k, *v)).collect();
        for pair in runs.windows(2) {
            if pair[0].1 == pair[1].1 {
                self.layers.remove(&pair[0].0);
            }
        }
        while let Some((_, kind)) = self.layers.last_key_value() {
            if !kind.is_empty() {
                break;
            }
            self.layers.pop_last();
        }
    }

    /// Adjacent layers differ, the top is spawned material, and only
    /// material cells carry visuals.
    pub fn check_invariants(&self) -> bool {
        let Some((top, top_kind)) = self.top() else {
            return false;
        };
        if top_kind.is_empty() || !self.spawned.contains_key(&top) {
            return false;
        }
        let distinct = self
            .layers
            .values()
            .zip(self.layers.values().skip(1))
            .all(|(lo, hi)| lo != hi);
        distinct && self.spawned.keys().all(|y| self.kind_or_air(*y).is_material())
    }

    pub fn despawn_all(&mut self, spawner: &mut dyn VisualSpawner) {
        for (_, handle) in std::mem::take(&mut self.spawned) {
            spawner.despawn(handle);
        }
    }
}

/// Surface cell, `soil_depth` cells of subsurface, stone down to y = 1 and
/// bedrock from y = 0 down.
fn initial_layers(sample: ColumnSample) -> BTreeMap<i32, BlockType> {
    let height = sample.height;
    let soil_bottom = (height - sample.soil_depth).max(1);
    let mut runs = vec![(height, sample.surface())];
    if height - 1 >= 1 {
        runs.push((height - 1, sample.subsurface()));
    }
    if soil_bottom - 1 >= 1 {
        runs.push((soil_bottom - 1, BlockType::Stone));
    }
    runs.push((0, BlockType::Bedrock));

    let mut layers = BTreeMap::new();
    let mut prev: Option<BlockType> = None;
    for (top, kind) in runs {
        if prev == Some(kind) {
            continue;
        }
        layers.insert(top, kind);
        prev = Some(kind);
    }
    layers
}
