/// Projectile travel, hit testing and out-of-bounds culling.

use tracing::info;

use crate::config::ProjectileConfig;
use crate::entities::{Arrow, Bounds, Direction, Enemy, EntityId, GameEvent, LevelBounds, SoundEffect};
use crate::registry::Registry;
use crate::vector::Velocity;

/// Build an arrow just outside `shooter`'s leading edge, centred across it,
/// then shifted by the per-direction offset.
pub fn spawn_arrow(
    id: EntityId,
    direction: Direction,
    shooter: &Bounds,
    cfg: &ProjectileConfig,
) -> Arrow {
    let offset = cfg.offsets.get(direction);
    let (width, height) = if direction.is_horizontal() {
        (cfg.length, cfg.thickness)
    } else {
        (cfg.thickness, cfg.length)
    };
    let centre_x = (shooter.left + shooter.right) / 2.0 - width / 2.0;
    let centre_y = (shooter.top + shooter.bottom) / 2.0 - height / 2.0;
    let (x, y) = match direction {
        Direction::Up => (centre_x, shooter.top - height),
        Direction::Right => (shooter.right, centre_y),
        Direction::Down => (centre_x, shooter.bottom),
        Direction::Left => (shooter.left - width, centre_y),
    };
    Arrow {
        id,
        x: x + offset.x,
        y: y + offset.y,
        width,
        height,
        velocity: Velocity::new(direction, cfg.speed),
        marked_for_deletion: false,
    }
}

/// First live enemy whose collision rectangle the arrow overlaps.
pub fn arrow_hit(arrow: &Arrow, enemies: &Registry<Enemy>) -> Option<EntityId> {
    let bounds = arrow.bounds();
    enemies
        .iter()
        .find(|(_, enemy)| !enemy.body.is_dead() && bounds.intersects(&enemy.body.collision_bounds()))
        .map(|(id, _)| id)
}

/// One frame of arrow logic.
///
/// The hit test runs before the arrow moves, so an arrow that reached an
/// enemy last frame is consumed instead of flying through it. Consumed and
/// escaped arrows are only marked here; `sweep_arrows` removes them.
pub fn advance_arrows(
    arrows: &mut Registry<Arrow>,
    enemies: &mut Registry<Enemy>,
    level: &LevelBounds,
    delta_ms: f32,
    events: &mut Vec<GameEvent>,
) {
    for arrow in arrows.values_mut() {
        if arrow.marked_for_deletion {
            continue;
        }
        if let Some(enemy_id) = arrow_hit(arrow, enemies) {
            arrow.marked_for_deletion = true;
            if let Some(enemy) = enemies.get_mut(enemy_id) {
                enemy.body.mark_dead();
            }
            info!(target: "combat", arrow_id = %arrow.id, enemy_id = %enemy_id, "enemy hit");
            events.push(GameEvent::Sound(SoundEffect::EnemyHit));
            events.push(GameEvent::EnemySlain(enemy_id));
            continue;
        }

        let velocity = arrow.velocity;
        velocity.integrate(&mut arrow.x, &mut arrow.y, delta_ms);
        if arrow.bounds().is_outside(level) {
            arrow.marked_for_deletion = true;
        }
    }
}

/// End-of-frame removal of every marked arrow. Returns how many were removed.
pub fn sweep_arrows(arrows: &mut Registry<Arrow>, events: &mut Vec<GameEvent>) -> usize {
    let marked: Vec<EntityId> = arrows
        .iter()
        .filter(|(_, arrow)| arrow.marked_for_deletion)
        .map(|(id, _)| id)
        .collect();
    for id in &marked {
        arrows.despawn(*id);
    }
    let flushed = arrows.flush();
    for id in &flushed.despawned {
        events.push(GameEvent::ArrowRemoved(*id));
    }
    for id in &flushed.spawned {
        events.push(GameEvent::ArrowSpawned(*id));
    }
    flushed.despawned.len()
}
