//! Deterministic terrain sampling, vegetation placement, and worldgen parameters.
#![forbid(unsafe_code)]

mod chunk_coord;
pub mod height;
pub mod vegetation;
mod world;
pub mod worldgen;

pub use chunk_coord::{ChunkCoord, local_index};
pub use height::HeightField;
pub use vegetation::{TRUNK_RADIUS, TreeBlocks, TreePosition, VegetationPlacer};
pub use world::World;
pub use worldgen::{ConfigError, WorldGenConfig, WorldGenParams};

/// Columns along one edge of a chunk.
pub const CHUNK_SIZE: usize = 16;
/// Columns in one chunk.
pub const CHUNK_AREA: usize = CHUNK_SIZE * CHUNK_SIZE;
