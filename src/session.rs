//! Composition root: one chunk store and one player, driven frame by frame.

use std::sync::Arc;

use voxland_chunk::{Chunk, ChunkStore, HeightSample, StreamReport};
use voxland_geom::Vec3;
use voxland_world::{ChunkCoord, HeightField, TreeBlocks, TreePosition, World, WorldGenParams};

use crate::config::AppConfig;
use crate::player::{InputIntent, PlayerConfig, PlayerController, PlayerState, TickReport};

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum InputError {
    #[error("frame dt must be finite (got {0})")]
    NonFiniteDt(f32),
    #[error("camera forward must be finite (got {0:?})")]
    NonFiniteCamera(Vec3),
}

pub struct Session {
    store: ChunkStore,
    player: PlayerController,
    ticks: u64,
}

impl Session {
    pub fn new(params: WorldGenParams, player: PlayerConfig, spawn: (i32, i32)) -> Self {
        let world = Arc::new(World::new(params));
        let mut store = ChunkStore::new(world);
        let player = {
            let q = store.query();
            let ground = |x: i32, z: i32| q.ground_height(x, z);
            PlayerController::spawn(player, &ground, spawn.0, spawn.1)
        };
        let report = store.ensure_loaded(player.chunk());
        let p = player.state().position;
        log::info!(
            target: "player",
            "spawned at ({:.2}, {:.2}, {:.2}) in chunk ({}, {}); {} chunks resident",
            p.x,
            p.y,
            p.z,
            player.chunk().cx,
            player.chunk().cz,
            report.resident
        );
        Self {
            store,
            player,
            ticks: 0,
        }
    }

    pub fn from_config(cfg: &AppConfig) -> Self {
        Self::new(
            cfg.world_params(),
            cfg.player.to_player_config(),
            cfg.spawn_column(),
        )
    }

    #[inline]
    pub fn ground_height(&self, x: i32, z: i32) -> i32 {
        self.store.query().ground_height(x, z)
    }

    pub fn resident_chunks(&self) -> impl Iterator<Item = &Chunk> + '_ {
        self.store.resident_chunks()
    }

    pub fn trees_near(&self, chunk: ChunkCoord) -> Vec<TreePosition> {
        self.store.query().trees_near(chunk)
    }

    /// Block layout of a tree placed in this world.
    pub fn tree_blocks(&self, tree: &TreePosition) -> TreeBlocks {
        self.store.world().vegetation().tree_blocks(tree)
    }

    /// Walkable top face under the player.
    pub fn surface_under_player(&self) -> f32 {
        let p = self.player.state().position;
        self.store.query().surface_at(p.x, p.z)
    }

    #[inline]
    pub fn player_state(&self) -> &PlayerState {
        self.player.state()
    }

    #[inline]
    pub fn player_chunk(&self) -> ChunkCoord {
        self.player.chunk()
    }

    #[inline]
    pub fn store(&self) -> &ChunkStore {
        &self.store
    }

    #[inline]
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Validates the frame input and advances the player by one tick.
    ///
    /// Non-finite input is rejected without touching any state. Negative `dt`
    /// runs a zero-length tick; `dt` above `max_dt` is clamped.
    pub fn submit_input(
        &mut self,
        intent: InputIntent,
        camera_forward: Vec3,
        dt: f32,
    ) -> Result<TickReport, InputError> {
        if !dt.is_finite() {
            log::warn!(target: "player", "dropping tick with dt={dt}");
            return Err(InputError::NonFiniteDt(dt));
        }
        if !camera_forward.is_finite() {
            log::warn!(target: "player", "dropping tick with camera={camera_forward:?}");
            return Err(InputError::NonFiniteCamera(camera_forward));
        }
        let dt = dt.clamp(0.0, self.player.config().max_dt);
        let report = self
            .player
            .tick(&mut self.store, intent, camera_forward, dt);
        self.ticks += 1;
        if let Some(StreamReport {
            center,
            generated,
            evicted,
            resident,
        }) = report.stream
        {
            log::debug!(
                target: "stream",
                "tick {} entered chunk ({}, {}): +{} -{} = {}",
                self.ticks,
                center.cx,
                center.cz,
                generated,
                evicted,
                resident
            );
        }
        Ok(report)
    }

    /// Heights of the square of columns centred on the player.
    pub fn sample_area(&self, radius: i32) -> HeightSample {
        let p = self.player.state().position;
        self.store.query().sample_area(
            HeightField::column_of(p.x),
            HeightField::column_of(p.z),
            radius,
        )
    }
}
