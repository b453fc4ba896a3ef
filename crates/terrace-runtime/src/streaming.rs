use terrace_chunk::{Chunk, VisualSpawner};
use terrace_world::{BlockPos, ChunkCoord};

use crate::directory::ChunkDirectory;
use crate::precompute::Precompute;

/// What one observer update changed.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StreamUpdate {
    pub activated: Vec<ChunkCoord>,
    pub deactivated: Vec<ChunkCoord>,
    /// Coordinates with no chunk yet, waiting for the next `tick`.
    pub queued: Vec<ChunkCoord>,
}

impl StreamUpdate {
    pub fn is_empty(&self) -> bool {
        self.activated.is_empty() && self.deactivated.is_empty() && self.queued.is_empty()
    }
}

/// Keeps the square of chunks within `render_distance` of the observer
/// active, deactivating what falls behind and queueing what is missing.
pub struct StreamingController {
    render_distance: i32,
    center: ChunkCoord,
    pending: Vec<ChunkCoord>,
}

impl StreamingController {
    pub fn new(render_distance: i32, center: ChunkCoord) -> Self {
        Self {
            render_distance: render_distance.max(0),
            center,
            pending: Vec::new(),
        }
    }

    #[inline]
    pub fn center(&self) -> ChunkCoord {
        self.center
    }

    #[inline]
    pub fn render_distance(&self) -> i32 {
        self.render_distance
    }

    pub fn pending(&self) -> &[ChunkCoord] {
        &self.pending
    }

    #[inline]
    fn in_range(&self, coord: ChunkCoord) -> bool {
        coord.chebyshev(self.center) <= self.render_distance
    }

    /// Activates or queues the full square around the current center.
    pub fn bootstrap(
        &mut self,
        dir: &mut ChunkDirectory,
        spawner: &mut dyn VisualSpawner,
    ) -> StreamUpdate {
        let mut update = StreamUpdate::default();
        for coord in self.center.square(self.render_distance) {
            self.bring_in(coord, dir, spawner, &mut update);
        }
        log::info!(
            target: "stream",
            "bootstrap around ({}, {}) r={}: {} queued",
            self.center.cx,
            self.center.cz,
            self.render_distance,
            update.queued.len()
        );
        update
    }

    /// Moves the streamed square to the chunk holding `pos`.
    pub fn update_observer_position(
        &mut self,
        pos: BlockPos,
        dir: &mut ChunkDirectory,
        spawner: &mut dyn VisualSpawner,
    ) -> StreamUpdate {
        let mut update = StreamUpdate::default();
        let next = pos.chunk();
        if next == self.center {
            return update;
        }
        let dx = next.cx - self.center.cx;
        let dz = next.cz - self.center.cz;
        if dx.abs() > 1 || dz.abs() > 1 {
            log::warn!(
                target: "stream",
                "observer jumped ({}, {}) -> ({}, {}), rescanning",
                self.center.cx,
                self.center.cz,
                next.cx,
                next.cz
            );
            self.jump_to(next, dir, spawner, &mut update);
            return update;
        }

        let r = self.render_distance;
        if dx != 0 {
            let old = self.center;
            for z in (old.cz - r)..=(old.cz + r) {
                let trailing = ChunkCoord::new(old.cx - dx * r, z);
                self.push_out(trailing, dir, spawner, &mut update);
            }
            self.center = ChunkCoord::new(old.cx + dx, old.cz);
            for z in (old.cz - r)..=(old.cz + r) {
                let leading = ChunkCoord::new(self.center.cx + dx * r, z);
                self.bring_in(leading, dir, spawner, &mut update);
            }
        }
        if dz != 0 {
            let old = self.center;
            for x in (old.cx - r)..=(old.cx + r) {
                let trailing = ChunkCoord::new(x, old.cz - dz * r);
                self.push_out(trailing, dir, spawner, &mut update);
            }
            self.center = ChunkCoord::new(old.cx, old.cz + dz);
            for x in (old.cx - r)..=(old.cx + r) {
                let leading = ChunkCoord::new(x, self.center.cz + dz * r);
                self.bring_in(leading, dir, spawner, &mut update);
            }
        }
        log::debug!(
            target: "stream",
            "center ({}, {}): +{} -{} queued {}",
            self.center.cx,
            self.center.cz,
            update.activated.len(),
            update.deactivated.len(),
            update.queued.len()
        );
        update
    }

    fn jump_to(
        &mut self,
        next: ChunkCoord,
        dir: &mut ChunkDirectory,
        spawner: &mut dyn VisualSpawner,
        update: &mut StreamUpdate,
    ) {
        let old = self.center;
        let r = self.render_distance;
        self.center = next;
        for coord in old.square(r) {
            if !self.in_range(coord) {
                self.push_out(coord, dir, spawner, update);
            }
        }
        for coord in next.square(r) {
            if coord.chebyshev(old) > r {
                self.bring_in(coord, dir, spawner, update);
            }
        }
    }

    fn bring_in(
        &mut self,
        coord: ChunkCoord,
        dir: &mut ChunkDirectory,
        spawner: &mut dyn VisualSpawner,
        update: &mut StreamUpdate,
    ) {
        if dir.contains(coord) {
            if dir.activate(coord, spawner).is_ok() {
                update.activated.push(coord);
            }
        } else if !self.pending.contains(&coord) {
            self.pending.push(coord);
            update.queued.push(coord);
        }
    }

    /// A chunk leaving the square must already exist, unless it is still
    /// waiting in the queue.
    fn push_out(
        &mut self,
        coord: ChunkCoord,
        dir: &mut ChunkDirectory,
        spawner: &mut dyn VisualSpawner,
        update: &mut StreamUpdate,
    ) {
        if let Some(i) = self.pending.iter().position(|c| *c == coord) {
            self.pending.swap_remove(i);
            return;
        }
        // deactivate logs the missing entry
        if dir.deactivate(coord, spawner).is_ok() {
            update.deactivated.push(coord);
        }
    }

    /// Builds every queued chunk: samples are computed on the worker pool
    /// while the shells are allocated, then each shell is initialized and
    /// stored, nearest first. Returns the created coordinates.
    pub fn tick(
        &mut self,
        dir: &mut ChunkDirectory,
        precompute: &Precompute,
        spawner: &mut dyn VisualSpawner,
    ) -> Vec<ChunkCoord> {
        let mut coords = std::mem::take(&mut self.pending);
        coords.retain(|c| !dir.contains(*c));
        if coords.is_empty() {
            return coords;
        }
        let center = self.center;
        coords.sort_by_key(|c| (c.chebyshev(center), c.cx, c.cz));

        let (samples, shells) = rayon::join(
            || precompute.run(&coords),
            || coords.iter().map(|c| Chunk::shell(*c)).collect::<Vec<_>>(),
        );

        let ctx = precompute.world().make_gen_ctx();
        for (mut chunk, buf) in shells.into_iter().zip(samples) {
            let coord = chunk.coord();
            chunk.initialize(
                buf,
                |x, z| dir.cached_height(x, z).unwrap_or_else(|| ctx.height_for(x, z)),
                spawner,
            );
            dir.insert(chunk);
            // the observer may have moved on while this coordinate was queued
            if !self.in_range(coord) {
                match dir.deactivate(coord, spawner) {
                    Ok(()) => log::debug!(
                        target: "stream",
                        "chunk ({}, {}) built out of range, deactivated",
                        coord.cx,
                        coord.cz
                    ),
                    Err(e) => log::warn!(
                        target: "stream",
                        "chunk ({}, {}) left active: {}",
                        coord.cx,
                        coord.cz,
                        e
                    ),
                }
            }
        }
        log::info!(
            target: "stream",
            "built {} chunks around ({}, {}), {} stored",
            coords.len(),
            center.cx,
            center.cz,
            dir.len()
        );
        coords
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use terrace_chunk::{ChunkState, HeadlessSpawner};
    use terrace_world::World;

    #[test]
    fn same_chunk_is_a_no_op() {
        let mut dir = ChunkDirectory::new();
        let mut sp = HeadlessSpawner::new();
        let mut stream = StreamingController::new(1, ChunkCoord::new(0, 0));
        stream.bootstrap(&mut dir, &mut sp);
        assert_eq!(stream.pending().len(), 9);
        let update = stream.update_observer_position(BlockPos::new(15, 80, 15), &mut dir, &mut sp);
        assert!(update.is_empty());
        assert_eq!(stream.center(), ChunkCoord::new(0, 0));
    }

    #[test]
    fn moving_before_a_tick_drops_stale_queue_entries() {
        let mut dir = ChunkDirectory::new();
        let mut sp = HeadlessSpawner::new();
        let mut stream = StreamingController::new(1, ChunkCoord::new(0, 0));
        stream.bootstrap(&mut dir, &mut sp);
        let update = stream.update_observer_position(BlockPos::new(-1, 80, 0), &mut dir, &mut sp);
        assert!(update.deactivated.is_empty());
        assert_eq!(update.queued.len(), 3);
        assert!(stream.pending().iter().all(|c| c.cx <= 0));
        assert_eq!(stream.pending().len(), 9);
    }

    #[test]
    fn jump_rescans_whole_square() {
        let mut dir = ChunkDirectory::new();
        let mut sp = HeadlessSpawner::new();
        let mut stream = StreamingController::new(1, ChunkCoord::new(0, 0));
        for c in ChunkCoord::new(0, 0).square(1) {
            dir.insert(Chunk::shell(c));
        }
        let update = stream.update_observer_position(BlockPos::new(16 * 5, 0, 0), &mut dir, &mut sp);
        assert_eq!(update.deactivated.len(), 9);
        assert_eq!(update.queued.len(), 9);
        assert_eq!(stream.center(), ChunkCoord::new(5, 0));
    }

    #[test]
    fn chunks_built_after_leaving_range_end_up_inactive() {
        let mut dir = ChunkDirectory::new();
        let mut sp = HeadlessSpawner::new();
        let pre = Precompute::new(Arc::new(World::with_seed(8)), 1).unwrap();
        let mut stream = StreamingController::new(0, ChunkCoord::new(0, 0));
        stream.bootstrap(&mut dir, &mut sp);
        let stale = ChunkCoord::new(4, -2);
        stream.pending.push(stale);
        let built = stream.tick(&mut dir, &pre, &mut sp);
        assert_eq!(built, vec![ChunkCoord::new(0, 0), stale]);
        assert_eq!(dir.get(stale).map(|c| c.state()), Some(ChunkState::Inactive));
        assert!(sp.is_hidden(stale));
        assert_eq!(
            dir.get(ChunkCoord::new(0, 0)).map(|c| c.state()),
            Some(ChunkState::Active)
        );
    }
}
