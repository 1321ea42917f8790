//! Coordinate-hashed tree placement.
//!
//! Candidates sit on a world-aligned grid, so the decision for a column never
//! depends on which chunk asked. A tree is owned by the chunk containing its
//! jittered column.

use crate::chunk_coord::{ChunkCoord, local_index};
use crate::worldgen::WorldGenParams;
use crate::{CHUNK_AREA, CHUNK_SIZE};

/// Horizontal radius of the trunk collision cylinder.
pub const TRUNK_RADIUS: f32 = 0.8;
/// Height of the trunk collision cylinder above `ground_height + 1`.
pub const TRUNK_ENVELOPE_HEIGHT: f32 = 6.0;

const LEAF_RADIUS: i32 = 2;
const LEAF_FILL: f32 = 0.75;

const SALT_ADMIT: u32 = 0xA53F9;
const SALT_JITTER_X: u32 = 0x1B873;
const SALT_JITTER_Z: u32 = 0x2C1D5;
const SALT_TRUNK: u32 = 0x0051_F0A7;
const SALT_LEAF: u32 = 0x1EAF_0001;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TreePosition {
    pub x: i32,
    pub z: i32,
    pub ground_height: i32,
    pub trunk_height: i32,
}

impl TreePosition {
    /// Centre of the trunk cylinder on the XZ plane.
    #[inline]
    pub fn trunk_center(&self) -> (f32, f32) {
        (self.x as f32 + 0.5, self.z as f32 + 0.5)
    }

    /// Vertical extent `(bottom, top)` of the conservative trunk envelope.
    #[inline]
    pub fn trunk_span(&self) -> (f32, f32) {
        let bottom = self.ground_height as f32 + 1.0;
        (bottom, bottom + TRUNK_ENVELOPE_HEIGHT)
    }
}

/// Block layout of one tree, in world block coordinates `[x, y, z]`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TreeBlocks {
    pub trunk: Vec<[i32; 3]>,
    pub leaves: Vec<[i32; 3]>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct VegetationPlacer {
    seed: u32,
    stride: i32,
    density: f32,
    jitter: i32,
    trunk_min: i32,
    trunk_max: i32,
}

impl VegetationPlacer {
    pub fn new(params: &WorldGenParams) -> Self {
        Self {
            seed: params.seed as u32,
            stride: params.tree_stride.max(1),
            density: params.tree_density,
            jitter: params.tree_jitter.max(0),
            trunk_min: params.trunk_min,
            trunk_max: params.trunk_max.max(params.trunk_min),
        }
    }

    /// Trees owned by `coord`, given that chunk's height grid.
    pub fn place(&self, coord: ChunkCoord, heights: &[i32]) -> Vec<TreePosition> {
        debug_assert_eq!(heights.len(), CHUNK_AREA);
        let (x0, z0) = coord.origin();
        let span = CHUNK_SIZE as i64;
        let j = i64::from(self.jitter);
        let xs = self.candidate_lines(i64::from(x0) - j, i64::from(x0) + span - 1 + j);
        let zs = self.candidate_lines(i64::from(z0) - j, i64::from(z0) + span - 1 + j);

        let mut trees = Vec::new();
        for gx in xs {
            for gz in zs.clone() {
                if rand01(self.seed, gx, gz, SALT_ADMIT) >= self.density {
                    continue;
                }
                let x = i64::from(gx) + i64::from(self.jitter_offset(gx, gz, SALT_JITTER_X));
                let z = i64::from(gz) + i64::from(self.jitter_offset(gx, gz, SALT_JITTER_Z));
                let (Ok(x), Ok(z)) = (i32::try_from(x), i32::try_from(z)) else {
                    continue;
                };
                if !coord.contains_column(x, z) {
                    continue;
                }
                let lx = (x - x0) as usize;
                let lz = (z - z0) as usize;
                trees.push(TreePosition {
                    x,
                    z,
                    ground_height: heights[local_index(lx, lz)],
                    trunk_height: self.trunk_height(x, z),
                });
            }
        }
        trees
    }

    /// Trunk blocks followed by a roughly spherical leaf crown around the trunk top.
    pub fn tree_blocks(&self, tree: &TreePosition) -> TreeBlocks {
        let mut out = TreeBlocks::default();
        for y in 1..=tree.trunk_height {
            out.trunk.push([tree.x, tree.ground_height.saturating_add(y), tree.z]);
        }
        let crown = tree.ground_height.saturating_add(tree.trunk_height);
        let r = LEAF_RADIUS;
        for dx in -r..=r {
            for dy in -1..=2 {
                for dz in -r..=r {
                    if dx == 0 && dz == 0 && dy <= 0 {
                        continue;
                    }
                    let dist = ((dx * dx + dy * dy + dz * dz) as f32).sqrt();
                    if dist > r as f32 + 0.5 {
                        continue;
                    }
                    let (lx, ly, lz) = (
                        tree.x.saturating_add(dx),
                        crown.saturating_add(dy),
                        tree.z.saturating_add(dz),
                    );
                    let salt = SALT_LEAF.wrapping_add((ly as u32).wrapping_mul(0x9E37_79B9));
                    if rand01(self.seed, lx, lz, salt) > LEAF_FILL {
                        continue;
                    }
                    out.leaves.push([lx, ly, lz]);
                }
            }
        }
        out
    }

    /// Grid lines within `[lo, hi]`, clipped to the `i32` column range.
    fn candidate_lines(&self, lo: i64, hi: i64) -> impl Iterator<Item = i32> + Clone {
        let lo = lo.max(i64::from(i32::MIN));
        let hi = hi.min(i64::from(i32::MAX));
        let stride = i64::from(self.stride);
        let first = lo.div_euclid(stride) * stride;
        let first = if first < lo { first + stride } else { first };
        (first..=hi).step_by(self.stride as usize).map(|v| v as i32)
    }

    fn jitter_offset(&self, gx: i32, gz: i32, salt: u32) -> i32 {
        if self.jitter == 0 {
            return 0;
        }
        let span = (self.jitter * 2 + 1) as u32;
        let seed = (self.seed ^ salt).wrapping_add(0x9E37_79B9);
        (hash2(gx, gz, seed) % span) as i32 - self.jitter
    }

    fn trunk_height(&self, x: i32, z: i32) -> i32 {
        let span = (self.trunk_max - self.trunk_min) as u32;
        let sel = hash2(x, z, self.seed ^ SALT_TRUNK) % (span + 1);
        self.trunk_min + sel as i32
    }
}

fn hash2(ix: i32, iz: i32, seed: u32) -> u32 {
    let mut h = (ix as u32).wrapping_mul(0x85eb_ca6b)
        ^ (iz as u32).wrapping_mul(0xc2b2_ae35)
        ^ seed.wrapping_mul(0x27d4_eb2d);
    h ^= h >> 16;
    h = h.wrapping_mul(0x7feb_352d);
    h ^= h >> 15;
    h = h.wrapping_mul(0x846c_a68b);
    h ^= h >> 16;
    h
}

fn rand01(world_seed: u32, ix: i32, iz: i32, salt: u32) -> f32 {
    let h = hash2(ix, iz, (world_seed ^ salt).wrapping_add(0x9E37_79B9));
    ((h & 0x00FF_FFFF) as f32) / 16_777_216.0
}
