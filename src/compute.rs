/// Frame orchestration.
///
/// `tick` is the only entry point that advances the simulation. Within one
/// frame it runs, strictly in order: player intent and every enemy's AI,
/// combat resolution, collision resolution, then the camera. Randomness comes
/// through the injected `rng` so callers control determinism (tests use a
/// seeded RNG).

use std::iter;

use rand::Rng;
use tracing::info;

use crate::ai::{can_jump_and_hit, WanderAi};
use crate::body::Body;
use crate::camera::Camera;
use crate::collider::Collider;
use crate::combat::{advance_arrows, spawn_arrow, sweep_arrows};
use crate::config::GameConfig;
use crate::entities::{
    Arrow, BodyKind, Enemy, EntityId, GameEvent, GameStatus, Outcome, SoundEffect,
};
use crate::registry::{IdGen, Registry};
use crate::state::{AiCommand, InputSource};
use crate::GameError;

// ── State ─────────────────────────────────────────────────────────────────────

/// The entire simulation. The orchestration functions below are the only
/// code that adds or removes entities.
#[derive(Clone, Debug)]
pub struct GameState {
    pub config: GameConfig,
    pub status: GameStatus,
    /// 1-based current level.
    pub level: usize,
    pub elapsed_ms: f32,
    pub player: Body,
    pub enemies: Registry<Enemy>,
    pub arrows: Registry<Arrow>,
    pub collider: Collider,
    pub camera: Camera,
    ids: IdGen,
    events: Vec<GameEvent>,
}

impl GameState {
    pub fn enemies_alive(&self) -> usize {
        self.enemies.values().filter(|e| !e.body.is_dead()).count()
    }

    pub fn is_over(&self) -> bool {
        self.status != GameStatus::Playing
    }

    pub fn level_count(&self) -> usize {
        self.config.levels.len()
    }
}

// ── Lifecycle ─────────────────────────────────────────────────────────────────

/// Build a game on its start level for a view of `view_width` x `view_height`
/// level pixels.
pub fn init_state(config: GameConfig, view_width: f32, view_height: f32) -> Result<GameState, GameError> {
    if config.levels.is_empty() {
        return Err(GameError::NoLevels);
    }
    let start = config.game.start_level;
    if start == 0 || start > config.levels.len() {
        return Err(GameError::LevelOutOfRange {
            level: start,
            max: config.levels.len(),
        });
    }
    let shape = config.body.shape()?;
    for (i, level) in config.levels.iter().enumerate() {
        level.validate(i + 1, &shape)?;
    }
    // Fail fast on missing clips for either kind before anything spawns.
    let player_spec = config.player_spec()?;
    config.enemy_spec()?;

    let mut ids = IdGen::default();
    let first = &config.levels[start - 1];
    let player = Body::new(
        ids.next_id(),
        BodyKind::Player,
        first.player.x,
        first.player.y,
        player_spec,
    );
    let collider = Collider::new(Vec::new(), first.bounds(), config.collision.look_back);
    let camera = Camera::new(config.camera.clone(), view_width, view_height);

    let mut state = GameState {
        config,
        status: GameStatus::Playing,
        level: start,
        elapsed_ms: 0.0,
        player,
        enemies: Registry::new(),
        arrows: Registry::new(),
        collider,
        camera,
        ids,
        events: Vec::new(),
    };
    run_level(&mut state, start)?;
    Ok(state)
}

/// Restart the run from the configured start level.
pub fn start_game(state: &mut GameState) -> Result<(), GameError> {
    state.status = GameStatus::Playing;
    state.elapsed_ms = 0.0;
    let start = state.config.game.start_level;
    run_level(state, start)
}

/// Unload the current level and load `level`. Past the last level the run is
/// won instead.
pub fn run_level(state: &mut GameState, level: usize) -> Result<(), GameError> {
    if level > state.config.levels.len() {
        end_game(state, Outcome::Won);
        return Ok(());
    }
    let def = state
        .config
        .levels
        .get(level.wrapping_sub(1))
        .cloned()
        .ok_or(GameError::LevelOutOfRange {
            level,
            max: state.config.levels.len(),
        })?;
    let enemy_spec = state.config.enemy_spec()?;

    state.level = level;
    state.enemies.clear();
    state.arrows.clear();

    state.player.set_spawn(def.player.x, def.player.y);
    state.player.restart();

    for point in &def.enemies {
        let id = state.ids.next_id();
        let body = Body::new(id, BodyKind::Enemy, point.x, point.y, enemy_spec.clone());
        let ai = WanderAi::new(state.config.enemy.wander_interval_ms);
        state.enemies.spawn(id, Enemy { body, ai });
    }
    state.enemies.flush();

    let mut collider = Collider::new(def.obstacles.clone(), def.bounds(), state.config.collision.look_back);
    collider.add_kinematic_body(&state.player);
    for enemy in state.enemies.values() {
        collider.add_kinematic_body(&enemy.body);
    }
    state.collider = collider;

    let (view_w, view_h) = {
        let view = state.camera.viewport();
        (view.width(), view.height())
    };
    state.camera.resize(view_w, view_h, def.width, def.height);
    state.camera.restart();
    state.camera.follow(&state.player.collision_bounds());

    info!(target: "level", level, enemies = def.enemies.len(), obstacles = def.obstacles.len(), "level started");
    state.events.push(GameEvent::LevelStarted(level));
    collect_body_events(state);
    Ok(())
}

pub fn end_game(state: &mut GameState, outcome: Outcome) {
    if state.is_over() {
        return;
    }
    state.status = GameStatus::Ended(outcome);
    info!(target: "level", ?outcome, level = state.level, elapsed_ms = state.elapsed_ms, "game ended");
    state.events.push(GameEvent::GameEnded(outcome));
}

/// Change the visible area, e.g. after a terminal resize.
pub fn resize_view(state: &mut GameState, view_width: f32, view_height: f32) {
    let bounds = *state.collider.bounds();
    state
        .camera
        .resize(view_width, view_height, bounds.width(), bounds.height());
    state.camera.follow(&state.player.collision_bounds());
}

// ── Per-frame tick ────────────────────────────────────────────────────────────

/// Advance the simulation by `delta_ms`. A finished game is left untouched.
pub fn tick(
    state: &mut GameState,
    input: &impl InputSource,
    delta_ms: f32,
    rng: &mut impl Rng,
) -> Result<(), GameError> {
    if state.is_over() {
        return Ok(());
    }
    state.elapsed_ms += delta_ms;
    if state.elapsed_ms > state.config.game.max_time_ms {
        end_game(state, Outcome::TimedOut);
        return Ok(());
    }

    // ── 0. Frame boundary: arrows queued since the last frame go live ───────
    for id in state.arrows.flush().spawned {
        state.events.push(GameEvent::ArrowSpawned(id));
    }

    // ── 1. Intent and AI for every body ─────────────────────────────────────
    state.player.handle_input(input)?;
    state.player.integrate(delta_ms);

    for enemy in state.enemies.values_mut() {
        if enemy.body.is_dead() {
            continue;
        }
        if let Some(direction) = enemy.ai.update(delta_ms, rng) {
            enemy.body.command(AiCommand::Wander(direction))?;
        }
        enemy.body.integrate(delta_ms);
    }

    // ── 2. Combat ────────────────────────────────────────────────────────────
    if state.config.enemy.tactical && !state.player.is_dead() {
        let target = state.player.collision_bounds();
        let reach = state.config.reach();
        let mut striker: Option<EntityId> = None;
        for enemy in state.enemies.values_mut() {
            if can_jump_and_hit(&mut enemy.body, &target, reach, state.collider.obstacles())? {
                state.collider.sync_body(&enemy.body);
                striker = Some(enemy.body.id());
                break;
            }
        }
        if let Some(by) = striker {
            state.player.mark_dead();
            info!(target: "combat", enemy_id = %by, "player slain");
            state.events.push(GameEvent::Sound(SoundEffect::SwordHit));
            state.events.push(GameEvent::PlayerSlain { by });
        }
    }

    let level_bounds = *state.collider.bounds();
    advance_arrows(
        &mut state.arrows,
        &mut state.enemies,
        &level_bounds,
        delta_ms,
        &mut state.events,
    );

    // ── 3. Collisions ────────────────────────────────────────────────────────
    let bodies = iter::once(&mut state.player).chain(state.enemies.values_mut().map(|e| &mut e.body));
    state.collider.resolve(bodies);

    // ── 4. Camera ────────────────────────────────────────────────────────────
    state.camera.follow(&state.player.collision_bounds());

    // ── 5. End-of-frame sweep ────────────────────────────────────────────────
    sweep_arrows(&mut state.arrows, &mut state.events);
    collect_body_events(state);

    // ── 6. Outcome ───────────────────────────────────────────────────────────
    if state.player.is_dead() {
        end_game(state, Outcome::Slain);
    } else if state.enemies_alive() == 0 {
        info!(target: "level", level = state.level, elapsed_ms = state.elapsed_ms, "level cleared");
        let next = state.level + 1;
        run_level(state, next)?;
    }
    Ok(())
}

/// Signal from the animation provider that `entity` finished its attack.
///
/// The player's completion queues an arrow in its facing, leaving from the
/// middle of the collision shape's leading edge; it goes live at the next
/// frame boundary.
pub fn attack_completed(state: &mut GameState, entity: EntityId) -> Result<(), GameError> {
    if state.is_over() {
        return Ok(());
    }
    if entity == state.player.id() {
        if let Some(direction) = state.player.on_attack_completed()? {
            let id = state.ids.next_id();
            let arrow = spawn_arrow(
                id,
                direction,
                &state.player.collision_bounds(),
                &state.config.projectile,
            );
            state.arrows.spawn(id, arrow);
            info!(target: "combat", arrow_id = %id, ?direction, "arrow shot");
            state.events.push(GameEvent::Sound(SoundEffect::ArrowShot));
        }
    } else {
        let enemy = state
            .enemies
            .get_mut(entity)
            .ok_or(GameError::UnknownEntity(entity))?;
        enemy.body.on_attack_completed()?;
    }
    collect_body_events(state);
    Ok(())
}

/// Take every notification queued since the last call.
pub fn drain_events(state: &mut GameState) -> Vec<GameEvent> {
    collect_body_events(state);
    std::mem::take(&mut state.events)
}

fn collect_body_events(state: &mut GameState) {
    let mut events = state.player.drain_events();
    for enemy in state.enemies.values_mut() {
        events.extend(enemy.body.drain_events());
    }
    state.events.extend(events);
}
