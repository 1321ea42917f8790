use serde::{Deserialize, Serialize};

use crate::CHUNK_SIZE;

/// Chunk-space coordinate of a 16x16 column tile.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct ChunkCoord {
    pub cx: i32,
    pub cz: i32,
}

impl ChunkCoord {
    #[inline]
    pub const fn new(cx: i32, cz: i32) -> Self {
        Self { cx, cz }
    }

    /// Chunk containing the world column `(x, z)`; floors toward negative infinity.
    #[inline]
    pub fn from_column(x: i32, z: i32) -> Self {
        let s = CHUNK_SIZE as i32;
        Self {
            cx: x.div_euclid(s),
            cz: z.div_euclid(s),
        }
    }

    /// Chunk containing a continuous world position.
    #[inline]
    pub fn from_position(x: f32, z: f32) -> Self {
        Self::from_column(x.floor() as i32, z.floor() as i32)
    }

    /// Saturates at the ends of the coordinate range.
    #[inline]
    pub fn offset(self, dx: i32, dz: i32) -> Self {
        Self {
            cx: self.cx.saturating_add(dx),
            cz: self.cz.saturating_add(dz),
        }
    }

    /// max(|dx|, |dz|) in chunk units.
    #[inline]
    pub fn chebyshev(self, other: ChunkCoord) -> i32 {
        let dx = (i64::from(self.cx) - i64::from(other.cx)).unsigned_abs();
        let dz = (i64::from(self.cz) - i64::from(other.cz)).unsigned_abs();
        dx.max(dz).min(i32::MAX as u64) as i32
    }

    /// World column of the chunk's (0, 0) local corner.
    ///
    /// Chunks lying past the last whole tile of the column range report the
    /// nearest origin whose 16 columns still fit in `i32`; they own no columns.
    #[inline]
    pub fn origin(self) -> (i32, i32) {
        (origin_axis(self.cx), origin_axis(self.cz))
    }

    #[inline]
    pub fn contains_column(self, x: i32, z: i32) -> bool {
        Self::from_column(x, z) == self
    }

    /// Every chunk within Chebyshev `radius` of `self`, row by row.
    pub fn square_around(self, radius: i32) -> impl Iterator<Item = ChunkCoord> {
        let r = radius.max(0);
        (-r..=r).flat_map(move |dx| (-r..=r).map(move |dz| self.offset(dx, dz)))
    }
}

fn origin_axis(c: i32) -> i32 {
    let s = CHUNK_SIZE as i64;
    let max = i64::from(i32::MAX) - (s - 1);
    (i64::from(c) * s).clamp(i64::from(i32::MIN), max) as i32
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

/// Index of local column `(lx, lz)` in a chunk's row-major height grid.
#[inline]
pub fn local_index(lx: usize, lz: usize) -> usize {
    lx * CHUNK_SIZE + lz
}
