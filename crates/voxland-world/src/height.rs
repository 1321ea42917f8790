//! Single-valued terrain height field.
//!
//! Heights are a pure function of the column and the worldgen params, so any
//! caller (collision, overview sampling, chunk generation) may query any column
//! at any time without a chunk being resident.

use crate::worldgen::{Octave, WorldGenParams};

#[derive(Clone, Debug, PartialEq)]
pub struct HeightField {
    base: f64,
    octaves: [Octave; 3],
    offset_x: i64,
    offset_z: i64,
}

impl HeightField {
    pub fn new(params: &WorldGenParams) -> Self {
        let (offset_x, offset_z) = seed_offsets(params.seed);
        Self {
            base: params.base_height,
            octaves: params.octaves,
            offset_x,
            offset_z,
        }
    }

    /// Terrain height of column `(x, z)`; always `>= 0`.
    #[inline]
    pub fn height(&self, x: i32, z: i32) -> i32 {
        let sx = (i64::from(x) + self.offset_x) as f64;
        let sz = (i64::from(z) + self.offset_z) as f64;
        let mut total = self.base;
        for o in &self.octaves {
            total += (sx * o.frequency).sin() * (sz * o.frequency).cos() * o.amplitude;
        }
        let h = total.floor();
        if h.is_nan() || h <= 0.0 {
            0
        } else {
            h.min(i32::MAX as f64) as i32
        }
    }

    /// World-space y of the walkable top face of column `(x, z)`.
    ///
    /// A block stored at height `h` spans `[h, h + 1]`.
    #[inline]
    pub fn surface_top(&self, x: i32, z: i32) -> i32 {
        self.height(x, z) + 1
    }

    /// Column containing a continuous world coordinate.
    #[inline]
    pub fn column_of(v: f32) -> i32 {
        v.floor() as i32
    }
}

// Seed 0 leaves the field unshifted.
fn seed_offsets(seed: i32) -> (i64, i64) {
    let s = i64::from(seed);
    (
        s.wrapping_mul(0x2F1B).rem_euclid(1 << 16),
        s.wrapping_mul(0x6A09).rem_euclid(1 << 16),
    )
}
