use proptest::prelude::*;
use terrace_blocks::{Biome, BlockType};
use terrace_chunk::{Column, HeadlessSpawner, WorldError};
use terrace_world::{BlockPos, ColumnSample};

fn sample() -> impl Strategy<Value = ColumnSample> {
    (1i32..60, 0usize..Biome::COUNT, 1i32..6).prop_map(|(height, b, soil_depth)| ColumnSample {
        height,
        biome: Biome::ALL[b],
        soil_depth,
    })
}

fn kind() -> impl Strategy<Value = BlockType> {
    // index COUNT maps to Empty, i.e. a destroy
    (0usize..=BlockType::COUNT).prop_map(|i| BlockType::from_index(i).unwrap_or(BlockType::Empty))
}

fn edits() -> impl Strategy<Value = Vec<(i32, BlockType)>> {
    prop::collection::vec((0i32..70, kind()), 0..60)
}

fn snapshot(col: &Column) -> Vec<(i32, BlockType)> {
    col.layers().iter().map(|(k, v)| (*k, *v)).collect()
}

proptest! {
    #[test]
    fn edits_keep_layers_merged_and_top_spawned(
        s in sample(),
        neighbors in prop::array::uniform4(1i32..60),
        ops in edits(),
    ) {
        let mut sp = HeadlessSpawner::new();
        let mut col = Column::generate(4, -9, s, neighbors, &mut sp);
        prop_assert!(col.check_invariants());
        for (y, k) in ops {
            let before = snapshot(&col);
            match col.block_replaced(y, k, &mut sp) {
                Ok(_) => {}
                Err(_) => prop_assert_eq!(snapshot(&col), before),
            }
            prop_assert!(col.check_invariants());
            let (top, _) = col.top().unwrap();
            prop_assert_eq!(sp.live_at(BlockPos::new(4, top, -9)), col.type_at(top).ok());
            // map size bounded by material transitions
            prop_assert!(col.layer_count() <= 2 * 70 + 4);
        }
        prop_assert_eq!(sp.live_count(), col.spawned_count());
    }

    #[test]
    fn surface_lookup_matches_sample(s in sample()) {
        let mut sp = HeadlessSpawner::new();
        let col = Column::generate(0, 0, s, [s.height; 4], &mut sp);
        prop_assert_eq!(col.type_at(s.height), Ok(s.surface()));
        prop_assert_eq!(col.top(), Some((s.height, s.surface())));
    }

    #[test]
    fn place_then_destroy_round_trips(s in sample(), lift in 1i32..20, k in 0usize..BlockType::COUNT - 1) {
        let mut sp = HeadlessSpawner::new();
        let mut col = Column::generate(0, 0, s, [s.height; 4], &mut sp);
        // bedrock (last) cannot be destroyed again
        let placed = BlockType::ALL[k];
        let before = snapshot(&col);
        let y = s.height + lift;
        prop_assert_eq!(col.block_replaced(y, placed, &mut sp), Ok(BlockType::Empty));
        prop_assert_eq!(col.block_replaced(y, BlockType::Empty, &mut sp), Ok(placed));
        prop_assert_eq!(snapshot(&col), before);
    }

    #[test]
    fn destroying_air_is_rejected(s in sample(), lift in 1i32..100) {
        let mut sp = HeadlessSpawner::new();
        let mut col = Column::generate(0, 0, s, [s.height; 4], &mut sp);
        let before = snapshot(&col);
        let y = s.height + lift;
        prop_assert_eq!(
            col.block_replaced(y, BlockType::Empty, &mut sp),
            Err(WorldError::NothingToDestroy(BlockPos::new(0, y, 0)))
        );
        prop_assert_eq!(snapshot(&col), before);
        prop_assert_eq!(col.spawned_count(), 1);
    }
}
