use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Noise offsets stay small so f32 sampling keeps unit precision.
const OFFSET_RANGE: i32 = 10_000;

/// Seed value and the two coordinate offsets derived from it.
///
/// Derivation happens once; every generator context built from the same
/// seed samples identical terrain.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WorldSeed {
    value: u64,
    offset_x: i32,
    offset_z: i32,
}

impl WorldSeed {
    pub fn new(value: u64) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(value);
        let offset_x = rng.gen_range(-OFFSET_RANGE..OFFSET_RANGE);
        let offset_z = rng.gen_range(-OFFSET_RANGE..OFFSET_RANGE);
        Self {
            value,
            offset_x,
            offset_z,
        }
    }

    /// Explicit seed, or a fresh random one.
    pub fn initialize(explicit: Option<u64>) -> Self {
        Self::new(explicit.unwrap_or_else(rand::random))
    }

    #[inline]
    pub fn value(self) -> u64 {
        self.value
    }

    #[inline]
    pub fn offsets(self) -> (i32, i32) {
        (self.offset_x, self.offset_z)
    }

    /// 32-bit seed for noise channels, folded from the full value.
    #[inline]
    pub fn noise_seed(self) -> i32 {
        (self.value ^ (self.value >> 32)) as i32
    }
}
