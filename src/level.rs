/// Level geometry supplied at level-load time: size, spawn points and
/// obstacle rectangles. Immutable until the next level load.

use std::iter;

use serde::Deserialize;

use crate::entities::{Bounds, CollisionShape, LevelBounds, Obstacle};
use crate::GameError;

/// Collision-shape position of a spawned body.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
pub struct SpawnPoint {
    pub x: f32,
    pub y: f32,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct LevelDef {
    pub width: f32,
    pub height: f32,
    pub player: SpawnPoint,
    #[serde(default)]
    pub enemies: Vec<SpawnPoint>,
    #[serde(default)]
    pub obstacles: Vec<Obstacle>,
}

impl LevelDef {
    pub fn bounds(&self) -> LevelBounds {
        Bounds::level(self.width, self.height)
    }

    /// Where a body's `shape` lands when spawned at `p`.
    pub fn spawn_bounds(p: &SpawnPoint, shape: &CollisionShape) -> Bounds {
        Bounds::from_rect(p.x, p.y, shape.width, shape.height)
    }

    /// `level` is the 1-based number used in error messages. Every spawned
    /// shape must lie inside the level and clear of obstacles, and a level
    /// needs at least one enemy to clear.
    pub fn validate(&self, level: usize, shape: &CollisionShape) -> Result<(), GameError> {
        let invalid = |reason: String| GameError::InvalidLevel { level, reason };
        if !(self.width > 0.0 && self.height > 0.0) {
            return Err(invalid(format!("size {}x{} is not positive", self.width, self.height)));
        }
        if let Some(o) = self
            .obstacles
            .iter()
            .find(|o| !(o.width > 0.0 && o.height > 0.0))
        {
            return Err(invalid(format!("obstacle at ({}, {}) has no area", o.x, o.y)));
        }
        if self.enemies.is_empty() {
            return Err(invalid("no enemy spawns".to_string()));
        }

        let level_bounds = self.bounds();
        let spawns = iter::once(("player", &self.player)).chain(self.enemies.iter().map(|p| ("enemy", p)));
        for (who, p) in spawns {
            let b = Self::spawn_bounds(p, shape);
            let inside = b.left >= level_bounds.left
                && b.top >= level_bounds.top
                && b.right <= level_bounds.right
                && b.bottom <= level_bounds.bottom;
            if !inside {
                return Err(invalid(format!("{who} spawn ({}, {}) lies outside the level", p.x, p.y)));
            }
            if let Some(o) = self.obstacles.iter().find(|o| o.bounds().intersects(&b)) {
                return Err(invalid(format!(
                    "{who} spawn ({}, {}) overlaps the obstacle at ({}, {})",
                    p.x, p.y, o.x, o.y
                )));
            }
        }
        Ok(())
    }
}

/// The two built-in arenas.
pub fn default_levels() -> Vec<LevelDef> {
    let sp = |x, y| SpawnPoint { x, y };
    vec![
        LevelDef {
            width: 960.0,
            height: 640.0,
            player: sp(150.0, 80.0),
            enemies: vec![sp(700.0, 400.0), sp(300.0, 520.0), sp(820.0, 540.0)],
            obstacles: vec![
                Obstacle::new(400.0, 260.0, 160.0, 120.0),
                Obstacle::new(120.0, 400.0, 64.0, 64.0),
                Obstacle::new(760.0, 120.0, 64.0, 64.0),
                Obstacle::new(0.0, 220.0, 240.0, 32.0),
            ],
        },
        LevelDef {
            width: 1280.0,
            height: 800.0,
            player: sp(80.0, 80.0),
            enemies: vec![
                sp(600.0, 120.0),
                sp(1100.0, 160.0),
                sp(320.0, 560.0),
                sp(900.0, 600.0),
                sp(1180.0, 700.0),
            ],
            obstacles: vec![
                Obstacle::new(256.0, 0.0, 32.0, 320.0),
                Obstacle::new(256.0, 448.0, 32.0, 352.0),
                Obstacle::new(640.0, 320.0, 320.0, 32.0),
                Obstacle::new(512.0, 640.0, 96.0, 96.0),
                Obstacle::new(1000.0, 400.0, 64.0, 160.0),
            ],
        },
    ]
}
