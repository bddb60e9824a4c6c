use archer_arena::body::{AnimationSet, Body, BodySpec};
use archer_arena::config::{ClipNames, GameConfig};
use archer_arena::entities::{BodyKind, Bounds, Direction, EntityId, GameEvent};
use archer_arena::state::{AiCommand, Animation, BodyState, Intent};
use archer_arena::GameError;

fn player_at(x: f32, y: f32) -> Body {
    let spec = GameConfig::default().player_spec().unwrap();
    Body::new(EntityId(1), BodyKind::Player, x, y, spec)
}

fn enemy_at(x: f32, y: f32) -> Body {
    let spec = GameConfig::default().enemy_spec().unwrap();
    Body::new(EntityId(2), BodyKind::Enemy, x, y, spec)
}

fn clips(events: &[GameEvent]) -> Vec<&str> {
    events
        .iter()
        .filter_map(|e| match e {
            GameEvent::AnimationSwitched { clip, .. } => Some(clip.as_str()),
            _ => None,
        })
        .collect()
}

// ── Construction ──────────────────────────────────────────────────────────────

#[test]
fn new_body_stands_down_at_spawn() {
    let mut body = player_at(100.0, 200.0);
    assert_eq!(body.state(), BodyState::Stand(Direction::Down));
    assert_eq!(body.collision_bounds(), Bounds::from_rect(100.0, 200.0, 28.0, 49.0));
    assert_eq!((body.x, body.y), (82.0, 185.0));
    // Stand clips reuse the walk clip.
    assert_eq!(clips(&body.drain_events()), vec!["Elven-Walk-Down"]);
}

#[test]
fn missing_clip_fails_fast() {
    let mut names = ClipNames::with_prefix("Orc");
    names.attack_left = None;
    let err = AnimationSet::from_clips(BodyKind::Enemy, &names).unwrap_err();
    assert!(matches!(
        err,
        GameError::MissingClip { kind: BodyKind::Enemy, clip: "attack_left" }
    ));
}

#[test]
fn empty_clip_name_counts_as_missing() {
    let mut names = ClipNames::with_prefix("Elven");
    names.dead = Some(String::new());
    assert!(matches!(
        AnimationSet::from_clips(BodyKind::Player, &names),
        Err(GameError::MissingClip { clip: "dead", .. })
    ));
}

#[test]
fn animation_set_maps_every_slot() {
    let set = AnimationSet::from_clips(BodyKind::Player, &ClipNames::with_prefix("Elven")).unwrap();
    assert_eq!(set.clip(Animation::Stand(Direction::Left)), "Elven-Walk-Left");
    assert_eq!(set.clip(Animation::Walk(Direction::Up)), "Elven-Walk-Up");
    assert_eq!(set.clip(Animation::Attack(Direction::Right)), "Elven-Attack-Right");
    assert_eq!(set.clip(Animation::Dead), "Elven-Dead-Down");
}

// ── State entry ───────────────────────────────────────────────────────────────

#[test]
fn reentering_a_state_is_silent() {
    let mut body = player_at(0.0, 0.0);
    body.drain_events();
    body.set_state(BodyState::Stand(Direction::Down));
    assert!(body.drain_events().is_empty());
}

#[test]
fn walk_sets_velocity_and_moves() {
    let mut body = player_at(100.0, 100.0);
    body.handle_input(&Intent::toward(Direction::Right)).unwrap();
    assert_eq!(body.state(), BodyState::Walk(Direction::Right));
    assert_eq!(body.velocity().x(), 200.0);
    body.integrate(500.0);
    assert_eq!(body.collision_bounds().left, 200.0);
}

#[test]
fn stand_has_zero_speed() {
    let mut body = player_at(100.0, 100.0);
    body.handle_input(&Intent::toward(Direction::Up)).unwrap();
    body.handle_input(&Intent::default()).unwrap();
    assert_eq!(body.state(), BodyState::Stand(Direction::Up));
    assert_eq!(body.velocity().speed(), 0.0);
    assert_eq!(body.facing(), Direction::Up);
}

#[test]
fn attacking_body_does_not_move() {
    let mut body = player_at(100.0, 100.0);
    body.handle_input(&Intent::toward(Direction::Left).with_special()).unwrap();
    assert!(body.is_attacking());
    assert_eq!(body.facing(), Direction::Left);
    body.integrate(1_000.0);
    assert_eq!(body.collision_bounds().left, 100.0);
}

#[test]
fn player_attack_completion_returns_facing() {
    let mut body = player_at(0.0, 0.0);
    body.handle_input(&Intent::toward(Direction::Up).with_special()).unwrap();
    assert_eq!(body.on_attack_completed().unwrap(), Some(Direction::Up));
    assert_eq!(body.state(), BodyState::Stand(Direction::Up));
}

#[test]
fn attack_completion_while_standing_is_rejected() {
    let mut body = enemy_at(0.0, 0.0);
    assert!(matches!(body.on_attack_completed(), Err(GameError::StateNotWired { .. })));
}

#[test]
fn enemy_rejects_player_input() {
    let mut body = enemy_at(0.0, 0.0);
    assert!(body.handle_input(&Intent::toward(Direction::Up)).is_err());
    assert_eq!(body.state(), BodyState::Stand(Direction::Down));
}

#[test]
fn enemy_follows_ai_commands() {
    let mut body = enemy_at(0.0, 0.0);
    body.command(AiCommand::Wander(Direction::Right)).unwrap();
    assert_eq!(body.velocity().x(), 100.0);
    body.command(AiCommand::Strike(Direction::Left)).unwrap();
    assert_eq!(body.state(), BodyState::Attack(Direction::Left));
    assert_eq!(body.velocity().speed(), 0.0);
}

// ── Death & restart ───────────────────────────────────────────────────────────

#[test]
fn dead_is_terminal() {
    let mut body = player_at(0.0, 0.0);
    body.handle_input(&Intent::toward(Direction::Left)).unwrap();
    body.mark_dead();
    body.drain_events();

    body.handle_input(&Intent::toward(Direction::Up).with_special()).unwrap();
    body.set_state(BodyState::Walk(Direction::Down));
    assert!(body.is_dead());
    assert_eq!(body.facing(), Direction::Left);
    assert!(body.drain_events().is_empty());
}

#[test]
fn restart_revives_at_spawn() {
    let mut body = player_at(40.0, 60.0);
    body.handle_input(&Intent::toward(Direction::Right)).unwrap();
    body.integrate(1_000.0);
    body.mark_dead();
    body.restart();
    assert_eq!(body.state(), BodyState::Stand(Direction::Down));
    assert_eq!(body.collision_bounds().left, 40.0);
    assert_eq!(body.collision_bounds().top, 60.0);
    assert_eq!(body.velocity().speed(), 0.0);
}

#[test]
fn animation_events_name_the_body() {
    let mut body = enemy_at(0.0, 0.0);
    body.drain_events();
    body.command(AiCommand::Strike(Direction::Up)).unwrap();
    let events = body.drain_events();
    assert_eq!(
        events,
        vec![GameEvent::AnimationSwitched {
            entity: EntityId(2),
            kind: BodyKind::Enemy,
            animation: Animation::Attack(Direction::Up),
            clip: "Orc-Attack-Up".to_string(),
        }]
    );
}

#[test]
fn custom_spec_speed_is_used() {
    let cfg = GameConfig::default();
    let spec = BodySpec {
        move_speed: 50.0,
        ..cfg.enemy_spec().unwrap()
    };
    let mut body = Body::new(EntityId(9), BodyKind::Enemy, 0.0, 0.0, spec);
    body.command(AiCommand::Wander(Direction::Down)).unwrap();
    body.integrate(1_000.0);
    assert_eq!(body.collision_bounds().top, 50.0);
}
