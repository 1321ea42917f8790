use voxland_world::{CHUNK_AREA, CHUNK_SIZE, ChunkCoord, TreePosition, World, local_index};

/// One generated 16x16 column tile: heights plus the trees it owns.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Chunk {
    pub coord: ChunkCoord,
    pub heights: Vec<i32>,
    pub trees: Vec<TreePosition>,
    pub generated: bool,
}

impl Chunk {
    #[inline]
    pub fn height_local(&self, lx: usize, lz: usize) -> i32 {
        self.heights[local_index(lx, lz)]
    }

    #[inline]
    pub fn contains_column(&self, x: i32, z: i32) -> bool {
        self.coord.contains_column(x, z)
    }
}

/// Fills the full height grid and tree list for `coord`. Pure in `(world, coord)`.
pub fn generate_chunk(world: &World, coord: ChunkCoord) -> Chunk {
    let (x0, z0) = coord.origin();
    let field = world.field();
    let mut heights = vec![0; CHUNK_AREA];
    for lx in 0..CHUNK_SIZE {
        for lz in 0..CHUNK_SIZE {
            heights[local_index(lx, lz)] = field.height(x0 + lx as i32, z0 + lz as i32);
        }
    }
    let trees = world.vegetation().place(coord, &heights);
    Chunk {
        coord,
        heights,
        trees,
        generated: true,
    }
}
