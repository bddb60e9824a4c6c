use thiserror::Error;

use crate::entities::{BodyKind, EntityId};
use crate::state::BodyState;

#[derive(Debug, Error)]
pub enum GameError {
    /// A body was configured without one of its required clips.
    #[error("{kind} is missing the `{clip}` animation clip")]
    MissingClip { kind: BodyKind, clip: &'static str },

    #[error("collision shape must have a positive size, got {width}x{height}")]
    InvalidShape { width: f32, height: f32 },

    /// A state-machine operation the body kind does not implement.
    #[error("`{operation}` is not wired for {kind} in state {state}")]
    StateNotWired {
        kind: BodyKind,
        state: BodyState,
        operation: &'static str,
    },

    #[error("no entity with id {0}")]
    UnknownEntity(EntityId),

    #[error("no levels configured")]
    NoLevels,

    #[error("level {level} is out of range (1..={max})")]
    LevelOutOfRange { level: usize, max: usize },

    #[error("level {level} is invalid: {reason}")]
    InvalidLevel { level: usize, reason: String },

    #[error("invalid config: {0}")]
    Config(#[from] toml::de::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
