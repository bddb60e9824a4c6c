pub mod ai;
pub mod body;
pub mod camera;
pub mod collider;
pub mod combat;
pub mod compute;
pub mod config;
pub mod entities;
pub mod error;
pub mod level;
pub mod playback;
pub mod registry;
pub mod state;
pub mod vector;

pub use error::GameError;
