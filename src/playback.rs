/// Attack playback timing for front-ends without a real animation system.
///
/// Watches `AnimationSwitched` events and reports which bodies finished
/// their attack animation, so the caller can signal `attack_completed`.

use std::collections::BTreeMap;

use crate::entities::{BodyKind, EntityId, GameEvent};

#[derive(Clone, Debug, Default)]
pub struct AnimationClock {
    player_attack_ms: f32,
    enemy_attack_ms: f32,
    remaining: BTreeMap<EntityId, f32>,
}

impl AnimationClock {
    pub fn new(player_attack_ms: f32, enemy_attack_ms: f32) -> Self {
        Self {
            player_attack_ms,
            enemy_attack_ms,
            remaining: BTreeMap::new(),
        }
    }

    /// Start timing on attack animations; any other switch cancels.
    pub fn observe(&mut self, event: &GameEvent) {
        if let GameEvent::AnimationSwitched {
            entity,
            kind,
            animation,
            ..
        } = event
        {
            if animation.is_attack() {
                let duration = match kind {
                    BodyKind::Player => self.player_attack_ms,
                    BodyKind::Enemy => self.enemy_attack_ms,
                };
                self.remaining.insert(*entity, duration);
            } else {
                self.remaining.remove(entity);
            }
        }
    }

    /// Advance all timers; returns finished entities in id order.
    pub fn advance(&mut self, delta_ms: f32) -> Vec<EntityId> {
        let mut finished = Vec::new();
        for (entity, remaining) in self.remaining.iter_mut() {
            *remaining -= delta_ms;
            if *remaining <= 0.0 {
                finished.push(*entity);
            }
        }
        for entity in &finished {
            self.remaining.remove(entity);
        }
        finished
    }

    pub fn is_playing(&self, entity: EntityId) -> bool {
        self.remaining.contains_key(&entity)
    }

    pub fn clear(&mut self) {
        self.remaining.clear();
    }
}
