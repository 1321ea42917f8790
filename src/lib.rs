//! Streaming voxel terrain with a walking player.
#![forbid(unsafe_code)]

pub mod config;
pub mod overview;
pub mod player;
pub mod session;

pub use config::{AppConfig, AppConfigError};
pub use player::{InputIntent, MovementMode, PlayerConfig, PlayerController, PlayerState, TickReport};
pub use session::{InputError, Session};
