use terrace_blocks::{BlockType, MiningTable};

#[test]
fn defaults_cover_every_kind() {
    let table = MiningTable::default();
    for kind in BlockType::ALL {
        let secs = table.duration(kind).expect("concrete kinds have a duration");
        assert!(secs > 0.0);
    }
    assert_eq!(table.duration(BlockType::Empty), None);
    assert!(table.duration(BlockType::Bedrock).unwrap().is_infinite());
}

#[test]
fn toml_overrides_by_name() {
    let table = MiningTable::from_toml_str(
        r#"
        [mining]
        stone = 3.0
        grass = 0.25
    "#,
    )
    .unwrap();
    assert_eq!(table.duration(BlockType::Stone), Some(3.0));
    assert_eq!(table.duration(BlockType::Grass), Some(0.25));
    // untouched entries keep their defaults
    assert_eq!(
        table.duration(BlockType::Dirt),
        MiningTable::default().duration(BlockType::Dirt)
    );
}

#[test]
fn empty_document_is_default() {
    let table = MiningTable::from_toml_str("").unwrap();
    assert_eq!(table, MiningTable::default());
}

#[test]
fn rejects_unknown_and_negative_entries() {
    assert!(MiningTable::from_toml_str("[mining]\nobsidian = 1.0\n").is_err());
    assert!(MiningTable::from_toml_str("[mining]\nempty = 1.0\n").is_err());
    assert!(MiningTable::from_toml_str("[mining]\nsand = -1.0\n").is_err());
}
