use serde::Deserialize;
use std::error::Error;
use std::fs;
use std::path::Path;

#[derive(Clone, Debug, Default, Deserialize)]
pub struct WorldGenConfig {
    #[serde(default)]
    pub height: Height,
    #[serde(default)]
    pub surface: Surface,
    #[serde(default)]
    pub biomes: Biomes,
}

#[derive(Clone, Debug, Deserialize)]
pub struct Height {
    #[serde(default = "default_height_freq")]
    pub frequency: f32,
    #[serde(default = "default_octaves")]
    pub octaves: i32,
    #[serde(default = "default_lacunarity")]
    pub lacunarity: f32,
    #[serde(default = "default_gain")]
    pub gain: f32,
    #[serde(default = "default_min_y_ratio")]
    pub min_y_ratio: f32,
    #[serde(default = "default_max_y_ratio")]
    pub max_y_ratio: f32,
}
fn default_height_freq() -> f32 {
    0.012
}
fn default_octaves() -> i32 {
    3
}
fn default_lacunarity() -> f32 {
    2.0
}
fn default_gain() -> f32 {
    0.5
}
fn default_min_y_ratio() -> f32 {
    0.22
}
fn default_max_y_ratio() -> f32 {
    0.58
}
impl Default for Height {
    fn default() -> Self {
        Self {
            frequency: default_height_freq(),
            octaves: default_octaves(),
            lacunarity: default_lacunarity(),
            gain: default_gain(),
            min_y_ratio: default_min_y_ratio(),
            max_y_ratio: default_max_y_ratio(),
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct Surface {
    #[serde(default = "default_soil_depth")]
    pub soil_depth: i32,
    #[serde(default = "default_soil_variation")]
    pub soil_variation: i32,
    #[serde(default = "default_soil_freq")]
    pub soil_frequency: f32,
}
fn default_soil_depth() -> i32 {
    3
}
fn default_soil_variation() -> i32 {
    2
}
fn default_soil_freq() -> f32 {
    0.05
}
impl Default for Surface {
    fn default() -> Self {
        Self {
            soil_depth: default_soil_depth(),
            soil_variation: default_soil_variation(),
            soil_frequency: default_soil_freq(),
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct Biomes {
    #[serde(default = "default_climate_freq")]
    pub climate_frequency: f32,
    #[serde(default = "default_desert_below")]
    pub desert_below: f32,
    #[serde(default = "default_tundra_above")]
    pub tundra_above: f32,
    #[serde(default = "default_highlands_ratio")]
    pub highlands_y_ratio: f32,
}
fn default_climate_freq() -> f32 {
    0.004
}
fn default_desert_below() -> f32 {
    0.3
}
fn default_tundra_above() -> f32 {
    0.7
}
fn default_highlands_ratio() -> f32 {
    0.5
}
impl Default for Biomes {
    fn default() -> Self {
        Self {
            climate_frequency: default_climate_freq(),
            desert_below: default_desert_below(),
            tundra_above: default_tundra_above(),
            highlands_y_ratio: default_highlands_ratio(),
        }
    }
}

// Flattened params used in tight loops (snapshot of config)
#[derive(Clone, Debug, PartialEq)]
pub struct WorldGenParams {
    pub height_frequency: f32,
    pub octaves: i32,
    pub lacunarity: f32,
    pub gain: f32,
    pub min_y_ratio: f32,
    pub max_y_ratio: f32,
    pub soil_depth: i32,
    pub soil_variation: i32,
    pub soil_frequency: f32,
    pub climate_frequency: f32,
    pub desert_below: f32,
    pub tundra_above: f32,
    pub highlands_y_ratio: f32,
}

impl Default for WorldGenParams {
    fn default() -> Self {
        Self::from_config(&WorldGenConfig::default())
    }
}

impl WorldGenParams {
    pub fn from_config(cfg: &WorldGenConfig) -> Self {
        Self {
            height_frequency: cfg.height.frequency,
            octaves: cfg.height.octaves.max(1),
            lacunarity: cfg.height.lacunarity,
            gain: cfg.height.gain,
            min_y_ratio: cfg.height.min_y_ratio,
            max_y_ratio: cfg.height.max_y_ratio,
            soil_depth: cfg.surface.soil_depth.max(1),
            soil_variation: cfg.surface.soil_variation.max(0),
            soil_frequency: cfg.surface.soil_frequency,
            climate_frequency: cfg.biomes.climate_frequency,
            desert_below: cfg.biomes.desert_below,
            tundra_above: cfg.biomes.tundra_above,
            highlands_y_ratio: cfg.biomes.highlands_y_ratio,
        }
    }
}

pub fn params_from_toml_str(s: &str) -> Result<WorldGenParams, Box<dyn Error>> {
    let cfg: WorldGenConfig = toml::from_str(s)?;
    if cfg.height.min_y_ratio > cfg.height.max_y_ratio {
        return Err(format!(
            "height.min_y_ratio ({}) exceeds height.max_y_ratio ({})",
            cfg.height.min_y_ratio, cfg.height.max_y_ratio
        )
        .into());
    }
    Ok(WorldGenParams::from_config(&cfg))
}

pub fn load_params_from_path(path: &Path) -> Result<WorldGenParams, Box<dyn Error>> {
    let s = fs::read_to_string(path)?;
    params_from_toml_str(&s)
}
