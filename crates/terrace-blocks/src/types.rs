use serde::{Deserialize, Serialize};

/// Concrete block kinds followed by the `Empty` sentinel.
///
/// The discriminant order is part of the contract with [`crate::MiningTable`]
/// and with [`Biome`]: the first `Biome::COUNT` kinds are the biome surface
/// blocks, so a biome id reinterprets directly as its surface kind.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum BlockType {
    Grass = 0,
    Sand = 1,
    Snow = 2,
    Gravel = 3,
    Dirt = 4,
    Sandstone = 5,
    Stone = 6,
    Bedrock = 7,
    /// Absence of material. Only ever a layer marker, never spawned.
    Empty = 8,
}

impl BlockType {
    /// Number of concrete kinds (the ordinal of `Empty`).
    pub const COUNT: usize = 8;

    pub const ALL: [BlockType; Self::COUNT] = [
        BlockType::Grass,
        BlockType::Sand,
        BlockType::Snow,
        BlockType::Gravel,
        BlockType::Dirt,
        BlockType::Sandstone,
        BlockType::Stone,
        BlockType::Bedrock,
    ];

    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Maps an ordinal back to a kind; `COUNT` yields `Empty`.
    #[inline]
    pub fn from_index(index: usize) -> Option<BlockType> {
        if index == Self::COUNT {
            return Some(BlockType::Empty);
        }
        Self::ALL.get(index).copied()
    }

    #[inline]
    pub const fn is_empty(self) -> bool {
        matches!(self, BlockType::Empty)
    }

    #[inline]
    pub const fn is_material(self) -> bool {
        !self.is_empty()
    }

    /// Kinds the player cannot break.
    #[inline]
    pub const fn is_unbreakable(self) -> bool {
        matches!(self, BlockType::Bedrock)
    }

    pub const fn name(self) -> &'static str {
        match self {
            BlockType::Grass => "grass",
            BlockType::Sand => "sand",
            BlockType::Snow => "snow",
            BlockType::Gravel => "gravel",
            BlockType::Dirt => "dirt",
            BlockType::Sandstone => "sandstone",
            BlockType::Stone => "stone",
            BlockType::Bedrock => "bedrock",
            BlockType::Empty => "empty",
        }
    }

    pub fn from_name(name: &str) -> Option<BlockType> {
        if name == "empty" {
            return Some(BlockType::Empty);
        }
        Self::ALL.iter().copied().find(|b| b.name() == name)
    }
}

impl std::fmt::Display for BlockType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum Biome {
    Meadow = 0,
    Desert = 1,
    Tundra = 2,
    Highlands = 3,
}

impl Biome {
    pub const COUNT: usize = 4;

    pub const ALL: [Biome; Self::COUNT] =
        [Biome::Meadow, Biome::Desert, Biome::Tundra, Biome::Highlands];

    #[inline]
    pub const fn id(self) -> u8 {
        self as u8
    }

    /// Default top block: the biome id read as a `BlockType` ordinal.
    #[inline]
    pub const fn surface(self) -> BlockType {
        BlockType::ALL[self as usize]
    }

    pub const fn subsurface(self) -> BlockType {
        match self {
            Biome::Meadow => BlockType::Dirt,
            Biome::Desert => BlockType::Sandstone,
            Biome::Tundra => BlockType::Dirt,
            Biome::Highlands => BlockType::Stone,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Biome::Meadow => "meadow",
            Biome::Desert => "desert",
            Biome::Tundra => "tundra",
            Biome::Highlands => "highlands",
        }
    }
}
