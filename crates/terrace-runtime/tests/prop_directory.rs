use proptest::prelude::*;
use terrace_chunk::{Chunk, HeadlessSpawner};
use terrace_runtime::ChunkDirectory;
use terrace_world::{ChunkCoord, Direction};

fn coords() -> impl Strategy<Value = Vec<(i32, i32)>> {
    prop::collection::vec((-6i32..6, -6i32..6), 0..40)
}

proptest! {
    #[test]
    fn enumeration_is_ordered_and_complete(cs in coords(), ox in -3i32..3, oz in -3i32..3) {
        let mut dir = ChunkDirectory::new();
        for c in &cs {
            dir.insert(Chunk::shell((*c).into()));
        }
        let origin = ChunkCoord::new(ox, oz);
        let order = dir.coords_by_distance(origin);
        prop_assert_eq!(order.len(), dir.len());
        for pair in order.windows(2) {
            let a = (pair[0].chebyshev(origin), pair[0].cx, pair[0].cz);
            let b = (pair[1].chebyshev(origin), pair[1].cx, pair[1].cz);
            prop_assert!(a < b);
        }
    }

    // links always point at stored chunks and are mirrored
    #[test]
    fn links_stay_symmetric(cs in coords(), evict in coords()) {
        let mut dir = ChunkDirectory::new();
        let mut sp = HeadlessSpawner::new();
        for c in &cs {
            dir.insert(Chunk::shell((*c).into()));
        }
        for c in &evict {
            dir.evict((*c).into(), &mut sp);
        }
        for coord in dir.coords_by_distance(ChunkCoord::new(0, 0)) {
            let chunk = dir.get(coord).unwrap();
            for d in Direction::ALL {
                let n = coord.neighbor(d);
                prop_assert_eq!(chunk.neighbor(d).is_some(), dir.contains(n));
                if let Some(other) = dir.get(n) {
                    prop_assert_eq!(other.neighbor(d.opposite()), Some(coord));
                }
            }
        }
    }
}
