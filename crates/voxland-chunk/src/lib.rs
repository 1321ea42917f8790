//! Realized chunks, the resident chunk store, and the read-only world query facade.
#![forbid(unsafe_code)]

mod chunk;
mod query;
mod store;

pub use chunk::{Chunk, generate_chunk};
pub use query::{HeightSample, WorldQuery};
pub use store::{ChunkStore, StreamReport};
