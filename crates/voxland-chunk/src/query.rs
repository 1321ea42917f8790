use voxland_world::{ChunkCoord, HeightField, TreePosition};

use crate::chunk::Chunk;
use crate::store::ChunkStore;

/// Read-only view over the height field and the resident chunks.
///
/// Height queries go straight to the field and work for any column, loaded or
/// not. Tree queries only see resident chunks.
#[derive(Clone, Copy)]
pub struct WorldQuery<'a> {
    store: &'a ChunkStore,
}

impl<'a> WorldQuery<'a> {
    pub fn new(store: &'a ChunkStore) -> Self {
        Self { store }
    }

    #[inline]
    pub fn field(&self) -> &'a HeightField {
        self.store.world().field()
    }

    #[inline]
    pub fn ground_height(&self, x: i32, z: i32) -> i32 {
        self.field().height(x, z)
    }

    /// Walkable top face under a continuous position.
    #[inline]
    pub fn surface_at(&self, x: f32, z: f32) -> f32 {
        self.field()
            .surface_top(HeightField::column_of(x), HeightField::column_of(z)) as f32
    }

    /// Trees of every resident chunk within the keep radius of `center`.
    ///
    /// Resident chunks farther away are skipped; around the player's own chunk
    /// this is every resident chunk, since nothing beyond the keep radius stays
    /// resident.
    pub fn trees_near(&self, center: ChunkCoord) -> Vec<TreePosition> {
        let keep = self.store.keep_radius();
        self.store
            .resident_chunks()
            .filter(|c| c.coord.chebyshev(center) <= keep)
            .flat_map(|c| c.trees.iter().copied())
            .collect()
    }

    pub fn resident_chunks(&self) -> impl Iterator<Item = &'a Chunk> + 'a {
        self.store.resident_chunks()
    }

    /// Heights of the `(2r+1)^2` columns centred on `(center_x, center_z)`.
    pub fn sample_area(&self, center_x: i32, center_z: i32, radius: i32) -> HeightSample {
        let r = radius.max(0);
        let side = (2 * r + 1) as usize;
        let field = self.field();
        let mut heights = Vec::with_capacity(side * side);
        for dz in -r..=r {
            for dx in -r..=r {
                heights.push(field.height(
                    center_x.saturating_add(dx),
                    center_z.saturating_add(dz),
                ));
            }
        }
        HeightSample {
            min_x: center_x.saturating_sub(r),
            min_z: center_z.saturating_sub(r),
            side,
            heights,
        }
    }
}

/// Square grid of column heights, row-major by z then x.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HeightSample {
    pub min_x: i32,
    pub min_z: i32,
    pub side: usize,
    pub heights: Vec<i32>,
}

impl HeightSample {
    #[inline]
    pub fn get(&self, col: usize, row: usize) -> i32 {
        self.heights[row * self.side + col]
    }

    pub fn max_height(&self) -> i32 {
        self.heights.iter().copied().max().unwrap_or(0)
    }

    pub fn min_height(&self) -> i32 {
        self.heights.iter().copied().min().unwrap_or(0)
    }
}
