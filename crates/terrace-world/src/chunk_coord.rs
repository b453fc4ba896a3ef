use serde::{Deserialize, Serialize};

use crate::CHUNK_SIZE;

const SIZE: i32 = CHUNK_SIZE as i32;

/// Chunk index of a world cell coordinate, floored toward negative infinity.
#[inline]
pub fn chunk_coord_of(cell: i32) -> i32 {
    cell.div_euclid(SIZE)
}

/// Position of a world cell inside its chunk, always in `0..CHUNK_SIZE`.
#[inline]
pub fn local_of(cell: i32) -> usize {
    cell.rem_euclid(SIZE) as usize
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChunkCoord {
    pub cx: i32,
    pub cz: i32,
}

impl ChunkCoord {
    #[inline]
    pub const fn new(cx: i32, cz: i32) -> Self {
        Self { cx, cz }
    }

    /// Chunk holding the world column `(x, z)`.
    #[inline]
    pub fn containing(x: i32, z: i32) -> Self {
        Self::new(chunk_coord_of(x), chunk_coord_of(z))
    }

    /// World coordinates of the chunk's minimum corner column.
    #[inline]
    pub fn origin(self) -> (i32, i32) {
        (self.cx * SIZE, self.cz * SIZE)
    }

    #[inline]
    pub fn offset(self, dx: i32, dz: i32) -> Self {
        Self {
            cx: self.cx + dx,
            cz: self.cz + dz,
        }
    }

    #[inline]
    pub fn neighbor(self, dir: Direction) -> Self {
        let (dx, dz) = dir.offset();
        self.offset(dx, dz)
    }

    #[inline]
    pub fn chebyshev(self, other: ChunkCoord) -> i32 {
        (self.cx - other.cx).abs().max((self.cz - other.cz).abs())
    }

    #[inline]
    pub fn distance_sq(self, other: ChunkCoord) -> i64 {
        let dx = i64::from(self.cx - other.cx);
        let dz = i64::from(self.cz - other.cz);
        dx * dx + dz * dz
    }

    /// Square of chunks within `radius` (Chebyshev) of `self`, row-major.
    pub fn square(self, radius: i32) -> Vec<ChunkCoord> {
        if radius < 0 {
            return Vec::new();
        }
        let side = (2 * radius + 1) as usize;
        let mut coords = Vec::with_capacity(side * side);
        for dz in -radius..=radius {
            for dx in -radius..=radius {
                coords.push(self.offset(dx, dz));
            }
        }
        coords
    }
}

impl From<(i32, i32)> for ChunkCoord {
    fn from(value: (i32, i32)) -> Self {
        Self::new(value.0, value.1)
    }
}

impl From<ChunkCoord> for (i32, i32) {
    fn from(value: ChunkCoord) -> Self {
        (value.cx, value.cz)
    }
}

/// Integer world cell.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BlockPos {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl BlockPos {
    #[inline]
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    #[inline]
    pub fn chunk(self) -> ChunkCoord {
        ChunkCoord::containing(self.x, self.z)
    }

    /// Column index inside the owning chunk.
    #[inline]
    pub fn local(self) -> (usize, usize) {
        (local_of(self.x), local_of(self.z))
    }

    #[inline]
    pub fn offset(self, dx: i32, dy: i32, dz: i32) -> Self {
        Self::new(self.x + dx, self.y + dy, self.z + dz)
    }

    /// Cell containing a floating point position (floored per axis).
    pub fn from_world(x: f32, y: f32, z: f32) -> Self {
        Self::new(x.floor() as i32, y.floor() as i32, z.floor() as i32)
    }
}

/// Cardinal neighbor directions. North is -Z, East is +X.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    North = 0,
    East = 1,
    South = 2,
    West = 3,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::East,
        Direction::South,
        Direction::West,
    ];

    #[inline]
    pub const fn offset(self) -> (i32, i32) {
        match self {
            Direction::North => (0, -1),
            Direction::East => (1, 0),
            Direction::South => (0, 1),
            Direction::West => (-1, 0),
        }
    }

    #[inline]
    pub const fn opposite(self) -> Direction {
        match self {
            Direction::North => Direction::South,
            Direction::East => Direction::West,
            Direction::South => Direction::North,
            Direction::West => Direction::East,
        }
    }

    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }
}
