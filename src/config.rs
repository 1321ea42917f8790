//! Application config: worldgen sections plus `[player]`.

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use voxland_world::{ConfigError, WorldGenConfig, WorldGenParams};

use crate::player::{MovementMode, PlayerConfig};

#[derive(Debug, thiserror::Error)]
pub enum AppConfigError {
    #[error("failed to read config {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error(transparent)]
    World(#[from] ConfigError),
    #[error("invalid player config: {0}")]
    Player(String),
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct AppConfig {
    #[serde(flatten)]
    pub worldgen: WorldGenConfig,
    #[serde(default)]
    pub player: PlayerSection,
}

#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Movement {
    #[default]
    Instant,
    Damped,
}

#[derive(Clone, Debug, Deserialize)]
pub struct PlayerSection {
    #[serde(default = "default_max_speed")]
    pub max_speed: f32,
    #[serde(default = "default_jump_speed")]
    pub jump_speed: f32,
    #[serde(default = "default_gravity")]
    pub gravity: f32,
    #[serde(default = "default_half_height")]
    pub half_height: f32,
    #[serde(default = "default_radius")]
    pub radius: f32,
    #[serde(default = "default_ground_epsilon")]
    pub ground_epsilon: f32,
    #[serde(default = "default_autojump_factor")]
    pub autojump_factor: f32,
    #[serde(default = "default_max_dt")]
    pub max_dt: f32,
    #[serde(default)]
    pub movement: Movement,
    #[serde(default = "default_damping_tau")]
    pub damping_tau: f32,
    #[serde(default = "default_spawn")]
    pub spawn_x: i32,
    #[serde(default = "default_spawn")]
    pub spawn_z: i32,
}
fn default_max_speed() -> f32 {
    4.137
}
fn default_jump_speed() -> f32 {
    8.0
}
fn default_gravity() -> f32 {
    50.0
}
fn default_half_height() -> f32 {
    0.8
}
fn default_radius() -> f32 {
    0.3
}
fn default_ground_epsilon() -> f32 {
    0.1
}
fn default_autojump_factor() -> f32 {
    0.85
}
fn default_max_dt() -> f32 {
    1.0 / 30.0
}
fn default_damping_tau() -> f32 {
    0.1
}
fn default_spawn() -> i32 {
    25
}
impl Default for PlayerSection {
    fn default() -> Self {
        Self {
            max_speed: default_max_speed(),
            jump_speed: default_jump_speed(),
            gravity: default_gravity(),
            half_height: default_half_height(),
            radius: default_radius(),
            ground_epsilon: default_ground_epsilon(),
            autojump_factor: default_autojump_factor(),
            max_dt: default_max_dt(),
            movement: Movement::default(),
            damping_tau: default_damping_tau(),
            spawn_x: default_spawn(),
            spawn_z: default_spawn(),
        }
    }
}

impl PlayerSection {
    pub fn to_player_config(&self) -> PlayerConfig {
        PlayerConfig {
            max_speed: self.max_speed,
            jump_speed: self.jump_speed,
            gravity: self.gravity,
            half_height: self.half_height,
            radius: self.radius,
            ground_epsilon: self.ground_epsilon,
            autojump_factor: self.autojump_factor,
            max_dt: self.max_dt,
            movement: match self.movement {
                Movement::Instant => MovementMode::Instant,
                Movement::Damped => MovementMode::Damped {
                    tau: self.damping_tau,
                },
            },
        }
    }

    pub fn validate(&self) -> Result<(), AppConfigError> {
        let finite = [
            ("max_speed", self.max_speed),
            ("jump_speed", self.jump_speed),
            ("gravity", self.gravity),
            ("half_height", self.half_height),
            ("radius", self.radius),
            ("ground_epsilon", self.ground_epsilon),
            ("autojump_factor", self.autojump_factor),
            ("max_dt", self.max_dt),
            ("damping_tau", self.damping_tau),
        ];
        for (name, v) in finite {
            if !v.is_finite() || v < 0.0 {
                return Err(AppConfigError::Player(format!(
                    "{name} must be finite and >= 0 (got {v})"
                )));
            }
        }
        if self.gravity <= 0.0 {
            return Err(AppConfigError::Player(format!(
                "gravity must be > 0 (got {})",
                self.gravity
            )));
        }
        if self.half_height <= 0.0 {
            return Err(AppConfigError::Player(format!(
                "half_height must be > 0 (got {})",
                self.half_height
            )));
        }
        if self.max_dt <= 0.0 {
            return Err(AppConfigError::Player(format!(
                "max_dt must be > 0 (got {})",
                self.max_dt
            )));
        }
        if self.movement == Movement::Damped && self.damping_tau <= 0.0 {
            return Err(AppConfigError::Player(
                "damping_tau must be > 0 for damped movement".into(),
            ));
        }
        Ok(())
    }
}

impl AppConfig {
    pub fn parse(src: &str) -> Result<Self, AppConfigError> {
        let cfg: AppConfig = toml::from_str(src)?;
        cfg.world_params().validate()?;
        cfg.player.validate()?;
        Ok(cfg)
    }

    pub fn load(path: &Path) -> Result<Self, AppConfigError> {
        let s = fs::read_to_string(path).map_err(|source| AppConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&s)
    }

    pub fn world_params(&self) -> WorldGenParams {
        WorldGenParams::from_config(&self.worldgen)
    }

    pub fn spawn_column(&self) -> (i32, i32) {
        (self.player.spawn_x, self.player.spawn_z)
    }
}
