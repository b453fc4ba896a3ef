use proptest::prelude::*;
use terrace_blocks::{Biome, BlockType, MiningTable};

fn kind() -> impl Strategy<Value = BlockType> {
    (0..BlockType::COUNT).prop_map(|i| BlockType::ALL[i])
}

// quarters of a second print and parse back exactly
fn seconds() -> impl Strategy<Value = f32> {
    (0u32..40_000).prop_map(|q| q as f32 / 4.0)
}

proptest! {
    #[test]
    fn ordinals_map_back_to_kinds(i in 0usize..BlockType::COUNT + 8) {
        match BlockType::from_index(i) {
            Some(kind) => prop_assert_eq!(kind.index(), i),
            None => prop_assert!(i > BlockType::COUNT),
        }
    }

    #[test]
    fn names_map_back_to_kinds(k in kind()) {
        prop_assert_eq!(BlockType::from_name(k.name()), Some(k));
        prop_assert_eq!(k.to_string(), k.name());
    }

    #[test]
    fn biome_ids_index_their_surface(i in 0usize..Biome::COUNT) {
        let biome = Biome::ALL[i];
        prop_assert_eq!(BlockType::from_index(biome.id() as usize), Some(biome.surface()));
        prop_assert!(biome.subsurface().is_material());
    }

    #[test]
    fn one_override_changes_one_entry(k in kind(), secs in seconds()) {
        let table = MiningTable::from_toml_str(&format!("[mining]\n{} = {:?}\n", k.name(), secs))
            .unwrap();
        let defaults = MiningTable::default();
        for other in BlockType::ALL {
            let expected = if other == k { Some(secs) } else { defaults.duration(other) };
            prop_assert_eq!(table.duration(other), expected);
        }
    }
}
