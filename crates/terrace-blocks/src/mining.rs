use std::collections::HashMap;
use std::error::Error;
use std::fs;
use std::path::Path;

use serde::Deserialize;

use super::types::BlockType;

/// Seconds needed to break one block, indexed by `BlockType` ordinal.
#[derive(Clone, Debug, PartialEq)]
pub struct MiningTable {
    seconds: [f32; BlockType::COUNT],
}

impl Default for MiningTable {
    fn default() -> Self {
        let mut seconds = [1.0; BlockType::COUNT];
        seconds[BlockType::Grass.index()] = 0.6;
        seconds[BlockType::Sand.index()] = 0.5;
        seconds[BlockType::Snow.index()] = 0.4;
        seconds[BlockType::Gravel.index()] = 0.8;
        seconds[BlockType::Dirt.index()] = 0.6;
        seconds[BlockType::Sandstone.index()] = 1.2;
        seconds[BlockType::Stone.index()] = 1.5;
        seconds[BlockType::Bedrock.index()] = f32::INFINITY;
        Self { seconds }
    }
}

impl MiningTable {
    /// Duration for `kind`, or `None` for the `Empty` sentinel.
    #[inline]
    pub fn duration(&self, kind: BlockType) -> Option<f32> {
        self.seconds.get(kind.index()).copied()
    }

    pub fn set(&mut self, kind: BlockType, seconds: f32) {
        if let Some(slot) = self.seconds.get_mut(kind.index()) {
            *slot = seconds;
        }
    }

    /// Defaults overridden by a `[mining]` table keyed by block name.
    pub fn from_toml_str(toml_str: &str) -> Result<Self, Box<dyn Error>> {
        let cfg: MiningConfig = toml::from_str(toml_str)?;
        let mut table = MiningTable::default();
        let mut entries: Vec<(String, f32)> = cfg.mining.into_iter().collect();
        // Stable error reporting regardless of HashMap order.
        entries.sort_by(|a, b| a.0.cmp(&b.0));
        for (name, seconds) in entries {
            let kind = match BlockType::from_name(&name) {
                Some(kind) if kind.is_material() => kind,
                _ => return Err(format!("unknown block type '{name}' in mining table").into()),
            };
            if !(seconds >= 0.0) {
                return Err(format!("mining time for '{name}' must be >= 0, got {seconds}").into());
            }
            table.set(kind, seconds);
        }
        Ok(table)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, Box<dyn Error>> {
        let s = fs::read_to_string(path)?;
        Self::from_toml_str(&s)
    }
}

#[derive(Deserialize)]
struct MiningConfig {
    #[serde(default)]
    mining: HashMap<String, f32>,
}
