/// All simulation entity types: plain data plus geometry helpers.
///
/// Positions are in level pixels with the origin at the top-left corner of
/// the level and `y` growing downward.

use std::fmt;

use serde::Deserialize;

use crate::ai::WanderAi;
use crate::body::Body;
use crate::state::Animation;
use crate::vector::Velocity;

// ── Identity ──────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityId(pub u64);

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BodyKind {
    Player,
    Enemy,
}

impl fmt::Display for BodyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BodyKind::Player => f.write_str("player"),
            BodyKind::Enemy => f.write_str("enemy"),
        }
    }
}

// ── Direction ─────────────────────────────────────────────────────────────────

/// Cardinal facing. There is no diagonal movement.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Right,
    Down,
    Left,
}

impl Direction {
    /// Priority order used whenever several directions are held at once.
    pub const ALL: [Direction; 4] = [Direction::Up, Direction::Right, Direction::Down, Direction::Left];

    pub fn is_horizontal(self) -> bool {
        matches!(self, Direction::Left | Direction::Right)
    }

    pub fn name(self) -> &'static str {
        match self {
            Direction::Up => "Up",
            Direction::Right => "Right",
            Direction::Down => "Down",
            Direction::Left => "Left",
        }
    }
}

// ── Rectangles ────────────────────────────────────────────────────────────────

/// Edges of an axis-aligned rectangle.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
    pub left: f32,
}

/// The level rectangle acts as an implicit obstacle on all four sides.
pub type LevelBounds = Bounds;

impl Bounds {
    pub fn from_rect(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            top: y,
            right: x + width,
            bottom: y + height,
            left: x,
        }
    }

    pub fn level(width: f32, height: f32) -> LevelBounds {
        Self::from_rect(0.0, 0.0, width, height)
    }

    pub fn width(&self) -> f32 {
        self.right - self.left
    }

    pub fn height(&self) -> f32 {
        self.bottom - self.top
    }

    /// Strict overlap: rectangles that only share an edge do not intersect.
    pub fn intersects(&self, other: &Bounds) -> bool {
        self.left < other.right
            && self.right > other.left
            && self.top < other.bottom
            && self.bottom > other.top
    }

    /// True once this rectangle lies entirely beyond any edge of `area`.
    pub fn is_outside(&self, area: &Bounds) -> bool {
        self.right < area.left
            || self.left > area.right
            || self.bottom < area.top
            || self.top > area.bottom
    }
}

/// Reduced hit-testing rectangle anchored to an entity's origin.
///
/// Only the offset and size are stored; the world-space rectangle is
/// recomputed from the owner's position on every query.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CollisionShape {
    pub offset_x: f32,
    pub offset_y: f32,
    pub width: f32,
    pub height: f32,
}

impl CollisionShape {
    pub fn new(
        offset_x: f32,
        offset_y: f32,
        width: f32,
        height: f32,
    ) -> Result<Self, crate::GameError> {
        if !(width > 0.0 && height > 0.0) {
            return Err(crate::GameError::InvalidShape { width, height });
        }
        Ok(Self {
            offset_x,
            offset_y,
            width,
            height,
        })
    }

    pub fn bounds_at(&self, x: f32, y: f32) -> Bounds {
        Bounds::from_rect(x + self.offset_x, y + self.offset_y, self.width, self.height)
    }
}

/// Immutable level geometry the collider resolves bodies against.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
pub struct Obstacle {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Obstacle {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    pub fn bounds(&self) -> Bounds {
        Bounds::from_rect(self.x, self.y, self.width, self.height)
    }
}

// ── Actors ────────────────────────────────────────────────────────────────────

/// An AI-driven body together with its wander controller.
#[derive(Clone, Debug)]
pub struct Enemy {
    pub body: Body,
    pub ai: WanderAi,
}

/// A player projectile. Removal is deferred to the end-of-frame sweep.
#[derive(Clone, Debug)]
pub struct Arrow {
    pub id: EntityId,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub velocity: Velocity,
    pub marked_for_deletion: bool,
}

impl Arrow {
    pub fn bounds(&self) -> Bounds {
        Bounds::from_rect(self.x, self.y, self.width, self.height)
    }
}

// ── Run status ────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// Every level was cleared.
    Won,
    /// The run timer ran past the configured limit.
    TimedOut,
    /// An enemy's tactical strike landed on the player.
    Slain,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameStatus {
    Playing,
    Ended(Outcome),
}

// ── Notifications for the excluded collaborators ─────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SoundEffect {
    ArrowShot,
    EnemyHit,
    SwordHit,
}

/// One-way notifications queued by the core and drained by the front-end.
#[derive(Clone, Debug, PartialEq)]
pub enum GameEvent {
    AnimationSwitched {
        entity: EntityId,
        kind: BodyKind,
        animation: Animation,
        clip: String,
    },
    Sound(SoundEffect),
    ArrowSpawned(EntityId),
    ArrowRemoved(EntityId),
    EnemySlain(EntityId),
    PlayerSlain { by: EntityId },
    LevelStarted(usize),
    GameEnded(Outcome),
}
