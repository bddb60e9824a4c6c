/// Gameplay tuning and level configuration, loaded from TOML.
///
/// Every table falls back to its `Default`, so an empty file is a valid
/// configuration describing the stock game.

use std::path::Path;

use serde::Deserialize;

use crate::ai::Reach;
use crate::body::{AnimationSet, BodySpec};
use crate::collider::DEFAULT_LOOK_BACK;
use crate::entities::{BodyKind, CollisionShape, Direction};
use crate::level::{default_levels, LevelDef};
use crate::GameError;

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub game: RunConfig,
    pub player: PlayerConfig,
    pub enemy: EnemyConfig,
    pub body: ShapeConfig,
    pub projectile: ProjectileConfig,
    pub collision: CollisionConfig,
    pub camera: CameraConfig,
    pub display: DisplayConfig,
    pub animations: AnimationConfig,
    pub levels: Vec<LevelDef>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            game: RunConfig::default(),
            player: PlayerConfig::default(),
            enemy: EnemyConfig::default(),
            body: ShapeConfig::default(),
            projectile: ProjectileConfig::default(),
            collision: CollisionConfig::default(),
            camera: CameraConfig::default(),
            display: DisplayConfig::default(),
            animations: AnimationConfig::default(),
            levels: default_levels(),
        }
    }
}

impl GameConfig {
    pub fn from_toml_str(source: &str) -> Result<Self, GameError> {
        Ok(toml::from_str(source)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, GameError> {
        let source = std::fs::read_to_string(path)?;
        Self::from_toml_str(&source)
    }

    pub fn player_spec(&self) -> Result<BodySpec, GameError> {
        Ok(BodySpec {
            move_speed: self.player.move_speed,
            shape: self.body.shape()?,
            clips: AnimationSet::from_clips(BodyKind::Player, &self.animations.player)?,
        })
    }

    pub fn enemy_spec(&self) -> Result<BodySpec, GameError> {
        Ok(BodySpec {
            move_speed: self.enemy.move_speed,
            shape: self.body.shape()?,
            clips: AnimationSet::from_clips(BodyKind::Enemy, &self.animations.enemy)?,
        })
    }

    pub fn reach(&self) -> Reach {
        Reach {
            jump: self.enemy.jump,
            sword: self.enemy.sword,
        }
    }
}

// ── Run ───────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    /// Run time limit; exceeding it ends the run.
    pub max_time_ms: f32,
    /// 1-based level the run starts on.
    pub start_level: usize,
    /// Seed for the AI random source. `None` seeds from entropy.
    pub seed: Option<u64>,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            max_time_ms: 25_000.0,
            start_level: 1,
            seed: None,
        }
    }
}

// ── Actors ────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    /// Walk speed in pixels per second.
    pub move_speed: f32,
    /// How long the front-end plays an attack before signaling completion.
    pub attack_duration_ms: f32,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            move_speed: 200.0,
            attack_duration_ms: 300.0,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct EnemyConfig {
    pub move_speed: f32,
    pub wander_interval_ms: f32,
    /// Enables the jump-and-hit behavior.
    pub tactical: bool,
    pub jump: f32,
    pub sword: f32,
    pub attack_duration_ms: f32,
}

impl Default for EnemyConfig {
    fn default() -> Self {
        Self {
            move_speed: 100.0,
            wander_interval_ms: 1000.0,
            tactical: true,
            jump: 30.0,
            sword: 5.0,
            attack_duration_ms: 500.0,
        }
    }
}

/// Collision shape shared by every body, relative to its visual origin.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct ShapeConfig {
    pub offset_x: f32,
    pub offset_y: f32,
    pub width: f32,
    pub height: f32,
}

impl Default for ShapeConfig {
    fn default() -> Self {
        Self {
            offset_x: 18.0,
            offset_y: 15.0,
            width: 28.0,
            height: 49.0,
        }
    }
}

impl ShapeConfig {
    pub fn shape(&self) -> Result<CollisionShape, GameError> {
        CollisionShape::new(self.offset_x, self.offset_y, self.width, self.height)
    }
}

// ── Projectiles ───────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Offset {
    pub x: f32,
    pub y: f32,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct DirectionOffsets {
    pub up: Offset,
    pub right: Offset,
    pub down: Offset,
    pub left: Offset,
}

impl DirectionOffsets {
    pub fn get(&self, direction: Direction) -> Offset {
        match direction {
            Direction::Up => self.up,
            Direction::Right => self.right,
            Direction::Down => self.down,
            Direction::Left => self.left,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct ProjectileConfig {
    /// Pixels per second.
    pub speed: f32,
    /// Extent along the direction of travel.
    pub length: f32,
    /// Extent across the direction of travel.
    pub thickness: f32,
    /// Extra shift from the centred spawn point, per facing.
    pub offsets: DirectionOffsets,
}

impl Default for ProjectileConfig {
    fn default() -> Self {
        Self {
            speed: 400.0,
            length: 32.0,
            thickness: 6.0,
            offsets: DirectionOffsets::default(),
        }
    }
}

// ── Collision / camera / display ──────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct CollisionConfig {
    pub look_back: f32,
}

impl Default for CollisionConfig {
    fn default() -> Self {
        Self {
            look_back: DEFAULT_LOOK_BACK,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub offset_x: f32,
    pub offset_y: f32,
    pub width: f32,
    pub height: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            offset_x: -42.0,
            offset_y: -34.0,
            width: 100.0,
            height: 100.0,
        }
    }
}

/// Level pixels covered by one terminal cell.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    pub cell_width: f32,
    pub cell_height: f32,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            cell_width: 12.0,
            cell_height: 24.0,
        }
    }
}

// ── Animations ────────────────────────────────────────────────────────────────

/// Clip names as configured. Missing entries are rejected when a body spec
/// is built.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct ClipNames {
    pub walk_up: Option<String>,
    pub walk_right: Option<String>,
    pub walk_down: Option<String>,
    pub walk_left: Option<String>,
    pub attack_up: Option<String>,
    pub attack_right: Option<String>,
    pub attack_down: Option<String>,
    pub attack_left: Option<String>,
    pub dead: Option<String>,
}

impl ClipNames {
    /// `<prefix>-Walk-Up`, `<prefix>-Attack-Left`, `<prefix>-Dead-Down`, ...
    pub fn with_prefix(prefix: &str) -> Self {
        let clip = |action: &str, dir: &str| Some(format!("{prefix}-{action}-{dir}"));
        Self {
            walk_up: clip("Walk", "Up"),
            walk_right: clip("Walk", "Right"),
            walk_down: clip("Walk", "Down"),
            walk_left: clip("Walk", "Left"),
            attack_up: clip("Attack", "Up"),
            attack_right: clip("Attack", "Right"),
            attack_down: clip("Attack", "Down"),
            attack_left: clip("Attack", "Left"),
            dead: clip("Dead", "Down"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct AnimationConfig {
    pub player: ClipNames,
    pub enemy: ClipNames,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            player: ClipNames::with_prefix("Elven"),
            enemy: ClipNames::with_prefix("Orc"),
        }
    }
}
