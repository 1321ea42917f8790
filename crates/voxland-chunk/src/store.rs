use std::sync::Arc;

use hashbrown::HashMap;
use rayon::prelude::*;
use voxland_world::{ChunkCoord, World};

use crate::chunk::{Chunk, generate_chunk};
use crate::query::WorldQuery;

/// Outcome of one `ensure_loaded` pass.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StreamReport {
    pub center: ChunkCoord,
    pub generated: usize,
    pub evicted: usize,
    pub resident: usize,
}

/// Resident chunks keyed by coordinate.
///
/// Chunks inside `load_radius` of the last center are always present; chunks
/// farther than `load_radius + 1` are never kept. The one-chunk margin keeps a
/// player oscillating across a border from regenerating the same tiles.
pub struct ChunkStore {
    world: Arc<World>,
    load_radius: i32,
    chunks: HashMap<ChunkCoord, Chunk>,
    center: Option<ChunkCoord>,
    generated_total: u64,
    evicted_total: u64,
}

impl ChunkStore {
    pub fn new(world: Arc<World>) -> Self {
        let load_radius = world.load_radius.max(0);
        Self::with_radius(world, load_radius)
    }

    pub fn with_radius(world: Arc<World>, load_radius: i32) -> Self {
        Self {
            world,
            load_radius: load_radius.max(0),
            chunks: HashMap::new(),
            center: None,
            generated_total: 0,
            evicted_total: 0,
        }
    }

    #[inline]
    pub fn world(&self) -> &World {
        &self.world
    }

    #[inline]
    pub fn load_radius(&self) -> i32 {
        self.load_radius
    }

    /// Chebyshev distance beyond which resident chunks are dropped.
    #[inline]
    pub fn keep_radius(&self) -> i32 {
        self.load_radius + 1
    }

    #[inline]
    pub fn center(&self) -> Option<ChunkCoord> {
        self.center
    }

    /// Generates every absent chunk within `load_radius` of `center`, then evicts
    /// every chunk farther than `load_radius + 1`.
    pub fn ensure_loaded(&mut self, center: ChunkCoord) -> StreamReport {
        let mut missing: Vec<ChunkCoord> = center
            .square_around(self.load_radius)
            .filter(|c| !self.chunks.contains_key(c))
            .collect();
        // Offsets saturate at the range ends, so the square can repeat coords there
        missing.sort_unstable();
        missing.dedup();

        // Generation is pure; only the insert below touches the map.
        let world: &World = &self.world;
        let fresh: Vec<Chunk> = missing
            .par_iter()
            .map(|&coord| generate_chunk(world, coord))
            .collect();
        let generated = fresh.len();
        for chunk in fresh {
            self.chunks.insert(chunk.coord, chunk);
        }

        let keep = self.keep_radius();
        let before = self.chunks.len();
        self.chunks.retain(|coord, _| coord.chebyshev(center) <= keep);
        let evicted = before - self.chunks.len();

        self.center = Some(center);
        self.generated_total += generated as u64;
        self.evicted_total += evicted as u64;

        let report = StreamReport {
            center,
            generated,
            evicted,
            resident: self.chunks.len(),
        };
        if generated > 0 || evicted > 0 {
            log::debug!(
                target: "stream",
                "center=({}, {}) generated={} evicted={} resident={}",
                center.cx,
                center.cz,
                generated,
                evicted,
                report.resident
            );
        }
        report
    }

    #[inline]
    pub fn get(&self, coord: ChunkCoord) -> Option<&Chunk> {
        self.chunks.get(&coord)
    }

    #[inline]
    pub fn contains(&self, coord: ChunkCoord) -> bool {
        self.chunks.contains_key(&coord)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    pub fn resident_chunks(&self) -> impl Iterator<Item = &Chunk> + '_ {
        self.chunks.values()
    }

    pub fn resident_coords(&self) -> impl Iterator<Item = ChunkCoord> + '_ {
        self.chunks.keys().copied()
    }

    /// Lifetime counters `(generated, evicted)`.
    pub fn totals(&self) -> (u64, u64) {
        (self.generated_total, self.evicted_total)
    }

    pub fn query(&self) -> WorldQuery<'_> {
        WorldQuery::new(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use voxland_world::WorldGenParams;

    fn store(radius: i32) -> ChunkStore {
        ChunkStore::with_radius(Arc::new(World::new(WorldGenParams::default())), radius)
    }

    #[test]
    fn first_load_fills_the_square() {
        let mut s = store(1);
        assert!(s.is_empty());
        let r = s.ensure_loaded(ChunkCoord::new(1, 1));
        assert_eq!(r.generated, 9);
        assert_eq!(r.evicted, 0);
        assert_eq!(s.len(), 9);
        for cx in 0..=2 {
            for cz in 0..=2 {
                assert!(s.contains(ChunkCoord::new(cx, cz)));
            }
        }
    }

    #[test]
    fn repeated_load_is_a_no_op() {
        let mut s = store(1);
        s.ensure_loaded(ChunkCoord::new(0, 0));
        let r = s.ensure_loaded(ChunkCoord::new(0, 0));
        assert_eq!((r.generated, r.evicted, r.resident), (0, 0, 9));
        assert_eq!(s.totals(), (9, 0));
    }

    #[test]
    fn one_step_keeps_the_margin() {
        let mut s = store(1);
        s.ensure_loaded(ChunkCoord::new(1, 1));
        let r = s.ensure_loaded(ChunkCoord::new(2, 1));
        // Column cx=3 is new; cx=0 sits at distance 2 and stays
        assert_eq!(r.generated, 3);
        assert_eq!(r.evicted, 0);
        assert!(s.contains(ChunkCoord::new(0, 0)));
        assert_eq!(s.len(), 12);
        let r = s.ensure_loaded(ChunkCoord::new(3, 1));
        // cx=0 is now at distance 3
        assert_eq!(r.evicted, 3);
        assert!(!s.contains(ChunkCoord::new(0, 0)));
    }

    #[test]
    fn radius_zero_keeps_only_neighbours() {
        let mut s = store(0);
        s.ensure_loaded(ChunkCoord::new(0, 0));
        assert_eq!(s.len(), 1);
        s.ensure_loaded(ChunkCoord::new(1, 0));
        assert_eq!(s.len(), 2);
        s.ensure_loaded(ChunkCoord::new(2, 0));
        assert_eq!(s.len(), 2);
        assert!(!s.contains(ChunkCoord::new(0, 0)));
    }
}
