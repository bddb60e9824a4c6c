use archer_arena::ai::{can_jump_and_hit, choose_direction, Reach, WanderAi};
use archer_arena::body::Body;
use archer_arena::config::GameConfig;
use archer_arena::entities::{BodyKind, Bounds, Direction, EntityId, Obstacle};
use archer_arena::state::BodyState;

use rand::rngs::StdRng;
use rand::SeedableRng;

const REACH: Reach = Reach { jump: 30.0, sword: 5.0 };

fn seeded_rng() -> StdRng {
    StdRng::seed_from_u64(42)
}

/// Enemy whose 28x49 collision shape sits at (100, 100).
fn enemy() -> Body {
    let spec = GameConfig::default().enemy_spec().unwrap();
    Body::new(EntityId(2), BodyKind::Enemy, 100.0, 100.0, spec)
}

// ── Wander ────────────────────────────────────────────────────────────────────

#[test]
fn wander_waits_for_the_interval() {
    let mut ai = WanderAi::new(1_000.0);
    let mut rng = seeded_rng();
    for _ in 0..4 {
        assert_eq!(ai.update(250.0, &mut rng), None);
    }
    assert_eq!(ai.elapsed_ms(), 1_000.0);
    assert!(ai.update(250.0, &mut rng).is_some());
    assert_eq!(ai.elapsed_ms(), 0.0);
}

#[test]
fn wander_is_deterministic_for_a_seed() {
    let run = |seed| {
        let mut ai = WanderAi::new(100.0);
        let mut rng = StdRng::seed_from_u64(seed);
        (0..200)
            .filter_map(|_| ai.update(50.0, &mut rng))
            .collect::<Vec<_>>()
    };
    assert_eq!(run(7), run(7));
    assert!(!run(7).is_empty());
}

#[test]
fn choose_direction_covers_all_four() {
    let mut rng = seeded_rng();
    let picks: Vec<Direction> = (0..200).map(|_| choose_direction(&mut rng)).collect();
    for d in Direction::ALL {
        assert!(picks.contains(&d), "{d:?} never chosen");
    }
}

#[test]
fn reset_restarts_the_timer() {
    let mut ai = WanderAi::new(1_000.0);
    let mut rng = seeded_rng();
    ai.update(600.0, &mut rng);
    ai.reset();
    assert_eq!(ai.elapsed_ms(), 0.0);
    assert_eq!(ai.direction(), Direction::Down);
}

// ── Tactical jump ─────────────────────────────────────────────────────────────

#[test]
fn player_within_reach_on_the_left_is_struck() {
    let mut e = enemy();
    // Player's right edge at 95: 5px from the enemy's left edge.
    let player = Bounds::from_rect(67.0, 100.0, 28.0, 49.0);
    assert!(can_jump_and_hit(&mut e, &player, REACH, &[]).unwrap());
    assert_eq!(e.state(), BodyState::Attack(Direction::Left));
    assert_eq!(e.collision_bounds().left, 100.0);
    assert_eq!(e.collision_bounds().top, 100.0);
}

#[test]
fn left_window_wins_over_up() {
    let mut e = enemy();
    // Up and to the left: both the left and the up windows match.
    let player = Bounds::from_rect(62.0, 60.0, 28.0, 30.0);
    assert!(can_jump_and_hit(&mut e, &player, REACH, &[]).unwrap());
    assert_eq!(e.state(), BodyState::Attack(Direction::Left));
    assert_eq!(e.collision_bounds().left, 95.0);
    // Perpendicular coordinate is kept.
    assert_eq!(e.collision_bounds().top, 100.0);
}

#[test]
fn player_above_is_struck_upward() {
    let mut e = enemy();
    let player = Bounds::from_rect(100.0, 41.0, 28.0, 49.0);
    assert!(can_jump_and_hit(&mut e, &player, REACH, &[]).unwrap());
    assert_eq!(e.state(), BodyState::Attack(Direction::Up));
    assert_eq!(e.collision_bounds().top, 95.0);
    assert_eq!(e.collision_bounds().left, 100.0);
}

#[test]
fn player_on_the_right_is_struck() {
    let mut e = enemy();
    let player = Bounds::from_rect(135.0, 100.0, 28.0, 49.0);
    assert!(can_jump_and_hit(&mut e, &player, REACH, &[]).unwrap());
    assert_eq!(e.state(), BodyState::Attack(Direction::Right));
    assert_eq!(e.collision_bounds().right, 130.0);
}

#[test]
fn player_below_is_struck_downward() {
    let mut e = enemy();
    let player = Bounds::from_rect(100.0, 160.0, 28.0, 49.0);
    assert!(can_jump_and_hit(&mut e, &player, REACH, &[]).unwrap());
    assert_eq!(e.state(), BodyState::Attack(Direction::Down));
    assert_eq!(e.collision_bounds().top, 106.0);
}

#[test]
fn reach_is_half_open() {
    let mut e = enemy();
    // Exactly `jump` away is out of reach.
    let player = Bounds::from_rect(42.0, 100.0, 28.0, 49.0);
    assert!(!can_jump_and_hit(&mut e, &player, REACH, &[]).unwrap());
    assert_eq!(e.state(), BodyState::Stand(Direction::Down));
    assert_eq!(e.collision_bounds().left, 100.0);
}

#[test]
fn misaligned_player_is_out_of_reach() {
    let mut e = enemy();
    // Horizontally in range but far below the widened vertical span.
    let player = Bounds::from_rect(67.0, 300.0, 28.0, 49.0);
    assert!(!can_jump_and_hit(&mut e, &player, REACH, &[]).unwrap());
}

#[test]
fn dead_enemies_never_strike() {
    let mut e = enemy();
    e.mark_dead();
    let player = Bounds::from_rect(67.0, 100.0, 28.0, 49.0);
    assert!(!can_jump_and_hit(&mut e, &player, REACH, &[]).unwrap());
    assert_eq!(e.state(), BodyState::Dead);
}

#[test]
fn obstacle_in_the_gap_blocks_the_jump() {
    let mut e = enemy();
    let player = Bounds::from_rect(67.0, 100.0, 28.0, 49.0);
    let wall = [Obstacle::new(96.0, 100.0, 2.0, 49.0)];
    assert!(!can_jump_and_hit(&mut e, &player, REACH, &wall).unwrap());
    assert_eq!(e.state(), BodyState::Stand(Direction::Down));
    assert_eq!(e.collision_bounds().left, 100.0);
}

#[test]
fn blocked_window_falls_through_to_the_next() {
    let mut e = enemy();
    // Same corner as `left_window_wins_over_up`, with the left gap walled.
    let player = Bounds::from_rect(62.0, 60.0, 28.0, 30.0);
    let wall = [Obstacle::new(92.0, 100.0, 4.0, 49.0)];
    assert!(can_jump_and_hit(&mut e, &player, REACH, &wall).unwrap());
    assert_eq!(e.state(), BodyState::Attack(Direction::Up));
    assert_eq!(e.collision_bounds().top, 95.0);
    assert_eq!(e.collision_bounds().left, 100.0);
}

#[test]
fn obstacles_off_the_gap_do_not_block() {
    let mut e = enemy();
    let player = Bounds::from_rect(67.0, 100.0, 28.0, 49.0);
    let elsewhere = [Obstacle::new(96.0, 0.0, 2.0, 50.0), Obstacle::new(200.0, 100.0, 10.0, 49.0)];
    assert!(can_jump_and_hit(&mut e, &player, REACH, &elsewhere).unwrap());
    assert_eq!(e.state(), BodyState::Attack(Direction::Left));
}
