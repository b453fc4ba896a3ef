use std::sync::Arc;

use fastnoise_lite::{FastNoiseLite, FractalType, NoiseType};
use terrace_blocks::{Biome, BlockType};

use crate::CHUNK_HEIGHT;
use crate::seed::WorldSeed;
use crate::worldgen::WorldGenParams;

/// Generator output for one world column.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ColumnSample {
    pub height: i32,
    pub biome: Biome,
    /// Cells of subsurface material directly under the surface block.
    pub soil_depth: i32,
}

impl ColumnSample {
    #[inline]
    pub fn surface(self) -> BlockType {
        self.biome.surface()
    }

    #[inline]
    pub fn subsurface(self) -> BlockType {
        self.biome.subsurface()
    }
}

/// Noise channels for one sampling thread. Cheap to build, not shared.
pub struct GenCtx {
    pub terrain: FastNoiseLite,
    pub soil: FastNoiseLite,
    pub climate: FastNoiseLite,
    pub params: Arc<WorldGenParams>,
    offset_x: f32,
    offset_z: f32,
}

impl GenCtx {
    pub fn new(seed: WorldSeed, params: Arc<WorldGenParams>) -> Self {
        let base = seed.noise_seed();
        let mut terrain = FastNoiseLite::with_seed(base);
        terrain.set_noise_type(Some(NoiseType::OpenSimplex2));
        terrain.set_frequency(Some(params.height_frequency));
        terrain.set_fractal_type(Some(FractalType::FBm));
        terrain.set_fractal_octaves(Some(params.octaves));
        terrain.set_fractal_lacunarity(Some(params.lacunarity));
        terrain.set_fractal_gain(Some(params.gain));
        let mut soil = FastNoiseLite::with_seed(base ^ 41_337);
        soil.set_noise_type(Some(NoiseType::OpenSimplex2));
        soil.set_frequency(Some(params.soil_frequency));
        let mut climate = FastNoiseLite::with_seed(((base as u32) ^ 0x1203_5F31u32) as i32);
        climate.set_noise_type(Some(NoiseType::OpenSimplex2));
        climate.set_frequency(Some(params.climate_frequency));
        let (ox, oz) = seed.offsets();
        Self {
            terrain,
            soil,
            climate,
            params,
            offset_x: ox as f32,
            offset_z: oz as f32,
        }
    }

    pub fn sample(&self, wx: i32, wz: i32) -> ColumnSample {
        let height = self.height_for(wx, wz);
        ColumnSample {
            height,
            biome: self.biome_for(wx, wz, height),
            soil_depth: self.soil_depth_for(wx, wz),
        }
    }

    pub fn height_for(&self, wx: i32, wz: i32) -> i32 {
        let (x, z) = self.noise_pos(wx, wz);
        remap_noise_to_height(self.terrain.get_noise_2d(x, z), &self.params)
    }

    fn biome_for(&self, wx: i32, wz: i32, height: i32) -> Biome {
        if height as f32 >= CHUNK_HEIGHT as f32 * self.params.highlands_y_ratio {
            return Biome::Highlands;
        }
        let (x, z) = self.noise_pos(wx, wz);
        let t = ((self.climate.get_noise_2d(x, z) + 1.0) * 0.5).clamp(0.0, 1.0);
        if t < self.params.desert_below {
            Biome::Desert
        } else if t > self.params.tundra_above {
            Biome::Tundra
        } else {
            Biome::Meadow
        }
    }

    fn soil_depth_for(&self, wx: i32, wz: i32) -> i32 {
        let (x, z) = self.noise_pos(wx, wz);
        let n = self.soil.get_noise_2d(x, z);
        let jitter = (n * self.params.soil_variation as f32).round() as i32;
        (self.params.soil_depth + jitter).max(1)
    }

    #[inline]
    fn noise_pos(&self, wx: i32, wz: i32) -> (f32, f32) {
        (wx as f32 + self.offset_x, wz as f32 + self.offset_z)
    }
}

pub(crate) fn remap_noise_to_height(noise: f32, params: &WorldGenParams) -> i32 {
    let world_height_f = CHUNK_HEIGHT as f32;
    let min_h = (world_height_f * params.min_y_ratio) as i32;
    let max_h = (world_height_f * params.max_y_ratio) as i32;
    let span = (max_h - min_h) as f32;
    let hh = ((noise.clamp(-1.0, 1.0) + 1.0) * 0.5 * span) as i32 + min_h;
    hh.clamp(1, CHUNK_HEIGHT - 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn remap_covers_configured_band() {
        let params = WorldGenParams::default();
        let lo = remap_noise_to_height(-1.0, &params);
        let hi = remap_noise_to_height(1.0, &params);
        assert_eq!(lo, (CHUNK_HEIGHT as f32 * params.min_y_ratio) as i32);
        assert!(hi <= (CHUNK_HEIGHT as f32 * params.max_y_ratio) as i32);
        assert!(lo < hi);
    }

    #[test]
    fn remap_never_leaves_domain() {
        let params = WorldGenParams {
            min_y_ratio: -1.0,
            max_y_ratio: 2.0,
            ..WorldGenParams::default()
        };
        for n in [-5.0, -1.0, 0.0, 1.0, 5.0] {
            let h = remap_noise_to_height(n, &params);
            assert!((1..CHUNK_HEIGHT).contains(&h));
        }
    }
}
