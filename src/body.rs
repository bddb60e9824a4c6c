/// Physical, animated entity shell shared by the player and enemies.

use tracing::debug;

use crate::config::ClipNames;
use crate::entities::{BodyKind, Bounds, CollisionShape, Direction, EntityId, GameEvent};
use crate::state::{dispatch, AiCommand, Animation, BodyState, InputSource, SideEffect, Stimulus};
use crate::vector::Velocity;
use crate::GameError;

// ── Animation clips ───────────────────────────────────────────────────────────

/// Clip name for each of the 13 animations, validated at construction.
#[derive(Clone, Debug, PartialEq)]
pub struct AnimationSet {
    clips: [String; 13],
}

impl AnimationSet {
    /// Stand clips reuse the matching walk clip; every other clip is required.
    pub fn from_clips(kind: BodyKind, names: &ClipNames) -> Result<Self, GameError> {
        let require = |clip: &'static str, value: &Option<String>| {
            value
                .clone()
                .filter(|name| !name.is_empty())
                .ok_or(GameError::MissingClip { kind, clip })
        };
        let walk_up = require("walk_up", &names.walk_up)?;
        let walk_right = require("walk_right", &names.walk_right)?;
        let walk_down = require("walk_down", &names.walk_down)?;
        let walk_left = require("walk_left", &names.walk_left)?;
        let attack_up = require("attack_up", &names.attack_up)?;
        let attack_right = require("attack_right", &names.attack_right)?;
        let attack_down = require("attack_down", &names.attack_down)?;
        let attack_left = require("attack_left", &names.attack_left)?;
        let dead = require("dead", &names.dead)?;

        Ok(Self {
            clips: [
                walk_up.clone(),
                walk_right.clone(),
                walk_down.clone(),
                walk_left.clone(),
                walk_up,
                walk_right,
                walk_down,
                walk_left,
                attack_up,
                attack_right,
                attack_down,
                attack_left,
                dead,
            ],
        })
    }

    pub fn clip(&self, animation: Animation) -> &str {
        &self.clips[animation.index()]
    }
}

/// Everything needed to construct a body besides its id and spawn point.
#[derive(Clone, Debug)]
pub struct BodySpec {
    pub move_speed: f32,
    pub shape: CollisionShape,
    pub clips: AnimationSet,
}

// ── Body ──────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct Body {
    id: EntityId,
    kind: BodyKind,
    /// Origin of the visual bounds; the collision shape hangs off it.
    pub x: f32,
    pub y: f32,
    /// Collision-shape position to return to on restart.
    spawn_x: f32,
    spawn_y: f32,
    move_speed: f32,
    velocity: Velocity,
    shape: CollisionShape,
    state: BodyState,
    animation: Option<Animation>,
    clips: AnimationSet,
    outbox: Vec<GameEvent>,
}

impl Body {
    /// Place the collision shape at `(spawn_x, spawn_y)` and stand facing down.
    pub fn new(id: EntityId, kind: BodyKind, spawn_x: f32, spawn_y: f32, spec: BodySpec) -> Self {
        let mut body = Self {
            id,
            kind,
            x: 0.0,
            y: 0.0,
            spawn_x,
            spawn_y,
            move_speed: spec.move_speed,
            velocity: Velocity::new(Direction::Down, 0.0),
            shape: spec.shape,
            state: BodyState::Stand(Direction::Down),
            animation: None,
            clips: spec.clips,
            outbox: Vec::new(),
        };
        body.restart();
        body
    }

    pub fn id(&self) -> EntityId {
        self.id
    }

    pub fn kind(&self) -> BodyKind {
        self.kind
    }

    pub fn state(&self) -> BodyState {
        self.state
    }

    pub fn velocity(&self) -> &Velocity {
        &self.velocity
    }

    pub fn shape(&self) -> &CollisionShape {
        &self.shape
    }

    pub fn animation(&self) -> Option<Animation> {
        self.animation
    }

    pub fn facing(&self) -> Direction {
        self.velocity.direction()
    }

    pub fn is_attacking(&self) -> bool {
        self.state.is_attack()
    }

    pub fn is_dead(&self) -> bool {
        self.state == BodyState::Dead
    }

    pub fn spawn(&self) -> (f32, f32) {
        (self.spawn_x, self.spawn_y)
    }

    pub fn set_spawn(&mut self, x: f32, y: f32) {
        self.spawn_x = x;
        self.spawn_y = y;
    }

    // ── State machine ────────────────────────────────────────────────────────

    /// The only way velocity and animation change.
    ///
    /// Re-entering the current state is a no-op, and `Dead` has no way out.
    pub fn set_state(&mut self, next: BodyState) {
        if next == self.state {
            return;
        }
        if self.is_dead() {
            debug!(target: "body_state", entity = %self.id, ignored = %next, "dead body ignores transition");
            return;
        }
        self.enter(next);
    }

    fn enter(&mut self, next: BodyState) {
        let direction = next.facing().unwrap_or(self.velocity.direction());
        let speed = match next {
            BodyState::Walk(_) => self.move_speed,
            _ => 0.0,
        };
        self.velocity.set_direction(direction, speed);
        self.state = next;
        self.switch_animation(next.animation());
        debug!(target: "body_state", entity = %self.id, kind = %self.kind, state = %next, "enter");
    }

    /// Ask the renderer for `animation` unless it is already playing.
    pub fn switch_animation(&mut self, animation: Animation) {
        if self.animation == Some(animation) {
            return;
        }
        self.animation = Some(animation);
        self.outbox.push(GameEvent::AnimationSwitched {
            entity: self.id,
            kind: self.kind,
            animation,
            clip: self.clips.clip(animation).to_string(),
        });
    }

    /// Player only: re-evaluate intent.
    pub fn handle_input(&mut self, input: &dyn InputSource) -> Result<(), GameError> {
        let transition = dispatch(self.kind, self.state, Stimulus::Input(input))?;
        self.set_state(transition.next);
        Ok(())
    }

    pub fn command(&mut self, command: AiCommand) -> Result<(), GameError> {
        let transition = dispatch(self.kind, self.state, Stimulus::Ai(command))?;
        self.set_state(transition.next);
        Ok(())
    }

    /// Returns the direction to shoot in when the completion has that effect.
    pub fn on_attack_completed(&mut self) -> Result<Option<Direction>, GameError> {
        let transition = dispatch(self.kind, self.state, Stimulus::AttackCompleted)?;
        self.set_state(transition.next);
        Ok(transition.effect.map(|SideEffect::SpawnArrow(d)| d))
    }

    pub fn mark_dead(&mut self) {
        self.set_state(BodyState::Dead);
    }

    /// Back to the spawn point, stopped, standing down. Revives dead bodies.
    pub fn restart(&mut self) {
        self.velocity.stop();
        self.set_collision_position(self.spawn_x, self.spawn_y);
        if self.state != BodyState::Stand(Direction::Down) || self.animation.is_none() {
            self.enter(BodyState::Stand(Direction::Down));
        }
    }

    // ── Motion & geometry ────────────────────────────────────────────────────

    /// Unconstrained move for this frame; attacking bodies stay put.
    pub fn integrate(&mut self, delta_ms: f32) {
        if self.is_attacking() {
            return;
        }
        self.velocity.integrate(&mut self.x, &mut self.y, delta_ms);
    }

    pub fn collision_bounds(&self) -> Bounds {
        self.shape.bounds_at(self.x, self.y)
    }

    pub fn set_collision_position(&mut self, x: f32, y: f32) {
        self.x = x - self.shape.offset_x;
        self.y = y - self.shape.offset_y;
    }

    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.outbox)
    }
}
