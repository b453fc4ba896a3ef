use terrace_blocks::{BlockType, MiningTable};
use terrace_world::BlockPos;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum MiningStep {
    /// Fraction of the mining time spent so far, in `[0, 1)`.
    InProgress(f32),
    Complete,
    /// Kind has no finite mining time.
    Unbreakable,
}

/// Timer for the block currently being mined.
#[derive(Clone, Debug, Default)]
pub struct MiningProgress {
    target: Option<(BlockPos, BlockType)>,
    elapsed: f32,
}

impl MiningProgress {
    pub fn target(&self) -> Option<(BlockPos, BlockType)> {
        self.target
    }

    #[inline]
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    /// Mining stopped or the observer looked away.
    pub fn reset(&mut self) {
        self.target = None;
        self.elapsed = 0.0;
    }

    /// Adds `dt` seconds on `pos`. A new target restarts the timer without
    /// counting `dt`. Completion clears the target.
    pub fn advance(
        &mut self,
        pos: BlockPos,
        kind: BlockType,
        dt: f32,
        table: &MiningTable,
    ) -> MiningStep {
        let duration = match table.duration(kind) {
            Some(d) if d.is_finite() => d,
            _ => {
                self.reset();
                return MiningStep::Unbreakable;
            }
        };
        if self.target != Some((pos, kind)) {
            self.target = Some((pos, kind));
            self.elapsed = 0.0;
            return MiningStep::InProgress(0.0);
        }
        self.elapsed += dt.max(0.0);
        if self.elapsed >= duration {
            self.reset();
            MiningStep::Complete
        } else {
            MiningStep::InProgress(self.elapsed / duration)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn completes_after_table_duration() {
        let table = MiningTable::default();
        let mut m = MiningProgress::default();
        let pos = BlockPos::new(1, 2, 3);
        assert_eq!(m.advance(pos, BlockType::Sand, 0.3, &table), MiningStep::InProgress(0.0));
        assert_eq!(m.advance(pos, BlockType::Sand, 0.25, &table), MiningStep::InProgress(0.5));
        assert_eq!(m.advance(pos, BlockType::Sand, 0.25, &table), MiningStep::Complete);
        assert_eq!(m.target(), None);
    }

    #[test]
    fn retargeting_resets_timer() {
        let table = MiningTable::default();
        let mut m = MiningProgress::default();
        let a = BlockPos::new(0, 5, 0);
        let b = BlockPos::new(1, 5, 0);
        m.advance(a, BlockType::Stone, 0.0, &table);
        m.advance(a, BlockType::Stone, 1.0, &table);
        assert_eq!(m.advance(b, BlockType::Stone, 1.0, &table), MiningStep::InProgress(0.0));
        assert_eq!(m.elapsed(), 0.0);
    }

    #[test]
    fn bedrock_never_completes() {
        let table = MiningTable::default();
        let mut m = MiningProgress::default();
        let pos = BlockPos::new(0, 0, 0);
        assert_eq!(m.advance(pos, BlockType::Bedrock, 100.0, &table), MiningStep::Unbreakable);
        assert_eq!(m.advance(pos, BlockType::Empty, 1.0, &table), MiningStep::Unbreakable);
    }
}
