/// Enemy decision making: random wandering and the tactical jump-and-hit.

use rand::Rng;
use tracing::{debug, info};

use crate::body::Body;
use crate::entities::{Bounds, Direction, Obstacle};
use crate::state::AiCommand;
use crate::GameError;

// ── Wander ────────────────────────────────────────────────────────────────────

/// Picks a fresh random direction every `change_time_ms`.
#[derive(Clone, Debug, PartialEq)]
pub struct WanderAi {
    direction: Direction,
    change_time_ms: f32,
    elapsed_ms: f32,
}

impl WanderAi {
    pub fn new(change_time_ms: f32) -> Self {
        Self {
            direction: Direction::Down,
            change_time_ms,
            elapsed_ms: 0.0,
        }
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn elapsed_ms(&self) -> f32 {
        self.elapsed_ms
    }

    pub fn reset(&mut self) {
        self.direction = Direction::Down;
        self.elapsed_ms = 0.0;
    }

    /// Accumulate time; once the interval is reached, start over and return
    /// a new direction for the body to walk in.
    pub fn update(&mut self, delta_ms: f32, rng: &mut impl Rng) -> Option<Direction> {
        if self.elapsed_ms >= self.change_time_ms {
            self.elapsed_ms = 0.0;
            self.direction = choose_direction(rng);
            Some(self.direction)
        } else {
            self.elapsed_ms += delta_ms;
            None
        }
    }
}

pub fn choose_direction(rng: &mut impl Rng) -> Direction {
    Direction::ALL[rng.gen_range(0..Direction::ALL.len())]
}

// ── Tactical jump ─────────────────────────────────────────────────────────────

/// Thresholds of the jump-and-hit windows.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Reach {
    /// How far (px) the enemy's facing edge may be from the player's edge.
    pub jump: f32,
    /// Gap left between the two shapes after the snap.
    pub sword: f32,
}

/// Test the left, up, right and down windows in that order. A window whose
/// gap between the two shapes holds an obstacle is skipped. On the first
/// open match the enemy snaps to sword reach of the player and enters the
/// matching attack state; the caller is responsible for the hit itself.
pub fn can_jump_and_hit(
    enemy: &mut Body,
    player: &Bounds,
    reach: Reach,
    obstacles: &[Obstacle],
) -> Result<bool, GameError> {
    if enemy.is_dead() {
        return Ok(false);
    }
    let id = enemy.id();
    let e = enemy.collision_bounds();
    let half = reach.jump / 2.0;
    let window = 0.0..reach.jump;
    let vertical = e.top < player.bottom + half && e.bottom > player.top - half;
    let horizontal = e.left < player.right + half && e.right > player.left - half;

    // (facing, snapped x, snapped y, gap the jump crosses)
    let windows = [
        (vertical && window.contains(&(e.left - player.right))).then(|| {
            let gap = Bounds { top: e.top, right: e.left, bottom: e.bottom, left: player.right };
            (Direction::Left, player.right + reach.sword, e.top, gap)
        }),
        (horizontal && window.contains(&(e.top - player.bottom))).then(|| {
            let gap = Bounds { top: player.bottom, right: e.right, bottom: e.top, left: e.left };
            (Direction::Up, e.left, player.bottom + reach.sword, gap)
        }),
        (vertical && window.contains(&(player.left - e.right))).then(|| {
            let gap = Bounds { top: e.top, right: player.left, bottom: e.bottom, left: e.right };
            (Direction::Right, player.left - reach.sword - e.width(), e.top, gap)
        }),
        (horizontal && window.contains(&(player.top - e.bottom))).then(|| {
            let gap = Bounds { top: e.bottom, right: e.right, bottom: player.top, left: e.left };
            (Direction::Down, e.left, player.top - reach.sword - e.height(), gap)
        }),
    ];

    let strike = windows.into_iter().flatten().find(|(direction, _, _, gap)| {
        let blocked = obstacles.iter().any(|o| o.bounds().intersects(gap));
        if blocked {
            debug!(target: "combat", enemy_id = %id, ?direction, "jump blocked by obstacle");
        }
        !blocked
    });

    let Some((direction, x, y, _)) = strike else {
        return Ok(false);
    };
    enemy.set_collision_position(x, y);
    enemy.command(AiCommand::Strike(direction))?;
    info!(target: "combat", enemy_id = %id, ?direction, "tactical jump");
    Ok(true)
}
