use voxland_chunk::{ChunkStore, StreamReport};
use voxland_geom::Vec3;
use voxland_world::{ChunkCoord, HeightField, TRUNK_RADIUS, TreePosition};

/// Movement keys held during one tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct InputIntent {
    pub forward: bool,
    pub back: bool,
    pub left: bool,
    pub right: bool,
    pub jump: bool,
}

impl InputIntent {
    pub fn forward() -> Self {
        Self {
            forward: true,
            ..Self::default()
        }
    }

    pub fn with_jump(self, jump: bool) -> Self {
        Self { jump, ..self }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum MovementMode {
    /// Horizontal velocity snaps to the target every tick.
    Instant,
    /// Exponential approach to the target with time constant `tau` seconds.
    Damped { tau: f32 },
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlayerConfig {
    pub max_speed: f32,
    pub jump_speed: f32,
    pub gravity: f32,
    pub half_height: f32,
    pub radius: f32,
    pub ground_epsilon: f32,
    pub autojump_factor: f32,
    pub max_dt: f32,
    pub movement: MovementMode,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            max_speed: 4.137,
            jump_speed: 8.0,
            gravity: 50.0,
            half_height: 0.8,
            radius: 0.3,
            ground_epsilon: 0.1,
            autojump_factor: 0.85,
            max_dt: 1.0 / 30.0,
            movement: MovementMode::Instant,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlayerState {
    /// Body centre; the feet sit at `position.y - half_height`.
    pub position: Vec3,
    pub velocity: Vec3,
    pub grounded: bool,
}

/// What happened during one tick.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TickReport {
    /// Grounded before the tick; jumps are only legal when set.
    pub grounded: bool,
    pub jumped: bool,
    pub autojumped: bool,
    pub blocked_by_tree: bool,
    pub chunk_changed: bool,
    pub stream: Option<StreamReport>,
}

#[derive(Debug)]
pub struct PlayerController {
    state: PlayerState,
    config: PlayerConfig,
    chunk: ChunkCoord,
}

impl PlayerController {
    /// Places the player standing on column `(x, z)`, centred in it.
    pub fn spawn<F>(config: PlayerConfig, ground: &F, x: i32, z: i32) -> Self
    where
        F: Fn(i32, i32) -> i32,
    {
        let y = (ground(x, z) + 1) as f32 + config.half_height;
        let position = Vec3::new(x as f32 + 0.5, y, z as f32 + 0.5);
        Self::at(config, position)
    }

    pub fn at(config: PlayerConfig, position: Vec3) -> Self {
        Self {
            state: PlayerState {
                position,
                velocity: Vec3::ZERO,
                grounded: false,
            },
            config,
            chunk: ChunkCoord::from_position(position.x, position.z),
        }
    }

    #[inline]
    pub fn state(&self) -> &PlayerState {
        &self.state
    }

    #[inline]
    pub fn config(&self) -> &PlayerConfig {
        &self.config
    }

    #[inline]
    pub fn chunk(&self) -> ChunkCoord {
        self.chunk
    }

    /// Advances one tick against the store and streams chunks when the player
    /// crosses a chunk border.
    pub fn tick(
        &mut self,
        store: &mut ChunkStore,
        intent: InputIntent,
        camera_forward: Vec3,
        dt: f32,
    ) -> TickReport {
        let mut report = {
            let q = store.query();
            let trees = q.trees_near(self.chunk);
            let ground = |x: i32, z: i32| q.ground_height(x, z);
            self.step(&ground, &trees, intent, camera_forward, dt)
        };
        if report.chunk_changed {
            report.stream = Some(store.ensure_loaded(self.chunk));
        }
        report
    }

    /// One physics step against an arbitrary ground-height sampler.
    pub fn step<F>(
        &mut self,
        ground: &F,
        trees: &[TreePosition],
        intent: InputIntent,
        camera_forward: Vec3,
        dt: f32,
    ) -> TickReport
    where
        F: Fn(i32, i32) -> i32,
    {
        let cfg = self.config;
        let dt = if dt.is_finite() {
            dt.clamp(0.0, cfg.max_dt)
        } else {
            0.0
        };
        let surface = |x: f32, z: f32| {
            (ground(HeightField::column_of(x), HeightField::column_of(z)) + 1) as f32
        };
        let old = self.state.position;
        let mut vel = self.state.velocity;
        let mut report = TickReport::default();

        // Wishdir on the camera's flattened basis
        let fwd = camera_forward.horizontal().normalized();
        let right = fwd.cross(Vec3::UP);
        let mut wish = Vec3::ZERO;
        if intent.forward {
            wish += fwd;
        }
        if intent.back {
            wish -= fwd;
        }
        if intent.right {
            wish += right;
        }
        if intent.left {
            wish -= right;
        }
        let target = wish.normalized() * cfg.max_speed;
        match cfg.movement {
            MovementMode::Instant => {
                vel.x = target.x;
                vel.z = target.z;
            }
            MovementMode::Damped { tau } => {
                let alpha = if tau > 0.0 {
                    1.0 - (-dt / tau).exp()
                } else {
                    1.0
                };
                vel.x += (target.x - vel.x) * alpha;
                vel.z += (target.z - vel.z) * alpha;
            }
        }

        vel.y -= cfg.gravity * dt;

        let grounded = old.y <= surface(old.x, old.z) + cfg.half_height + cfg.ground_epsilon;
        report.grounded = grounded;
        if grounded && intent.jump {
            vel.y = cfg.jump_speed;
            report.jumped = true;
        }

        let mut new = old + vel * dt;

        // Trunks already overlapping the old position never block, so a player
        // placed inside one can walk out.
        let blocking: Vec<&TreePosition> = trees
            .iter()
            .filter(|t| !self.overlaps_trunk(old, t))
            .collect();
        let collides = |p: Vec3| blocking.iter().any(|t| self.overlaps_trunk(p, t));
        if collides(new) {
            report.blocked_by_tree = true;
            let x_only = Vec3::new(new.x, new.y, old.z);
            let z_only = Vec3::new(old.x, new.y, new.z);
            if !collides(x_only) {
                new = x_only;
                vel.z = 0.0;
            } else if !collides(z_only) {
                new = z_only;
                vel.x = 0.0;
            } else {
                new.x = old.x;
                new.z = old.z;
                vel.x = 0.0;
                vel.z = 0.0;
            }
        }

        let moving = vel.x.abs() > 0.1 || vel.z.abs() > 0.1;
        if grounded && moving && vel.y <= 0.0 {
            let here = ground(HeightField::column_of(old.x), HeightField::column_of(old.z));
            let there = ground(HeightField::column_of(new.x), HeightField::column_of(new.z));
            let rise = there - here;
            if rise > 0 && rise <= 1 {
                vel.y = cfg.jump_speed * cfg.autojump_factor;
                report.autojumped = true;
            }
        }

        let floor = surface(new.x, new.z) + cfg.half_height;
        if new.y < floor {
            new.y = floor;
            vel.y = vel.y.max(0.0);
        }

        self.state.position = new;
        self.state.velocity = vel;
        self.state.grounded = new.y <= floor + cfg.ground_epsilon;

        let chunk = ChunkCoord::from_position(new.x, new.z);
        if chunk != self.chunk {
            report.chunk_changed = true;
            self.chunk = chunk;
        }
        log::trace!(
            target: "player",
            "pos=({:.2}, {:.2}, {:.2}) vel=({:.2}, {:.2}, {:.2}) grounded={} jumped={} autojumped={} blocked={}",
            new.x,
            new.y,
            new.z,
            vel.x,
            vel.y,
            vel.z,
            report.grounded,
            report.jumped,
            report.autojumped,
            report.blocked_by_tree
        );
        report
    }

    fn overlaps_trunk(&self, p: Vec3, tree: &TreePosition) -> bool {
        let (tx, tz) = tree.trunk_center();
        if p.distance_xz(Vec3::new(tx, p.y, tz)) >= self.config.radius + TRUNK_RADIUS {
            return false;
        }
        let (bottom, top) = tree.trunk_span();
        let h = self.config.half_height;
        p.y - h < top && p.y + h > bottom
    }
}
