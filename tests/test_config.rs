use archer_arena::config::GameConfig;
use archer_arena::entities::{BodyKind, Obstacle};
use archer_arena::level::{default_levels, LevelDef, SpawnPoint};
use archer_arena::GameError;

#[test]
fn defaults_carry_the_stock_tuning() {
    let cfg = GameConfig::default();
    assert_eq!(cfg.game.max_time_ms, 25_000.0);
    assert_eq!(cfg.game.start_level, 1);
    assert_eq!(cfg.player.move_speed, 200.0);
    assert_eq!(cfg.enemy.move_speed, 100.0);
    assert_eq!(cfg.enemy.wander_interval_ms, 1_000.0);
    assert_eq!((cfg.enemy.jump, cfg.enemy.sword), (30.0, 5.0));
    assert_eq!(cfg.projectile.speed, 400.0);
    assert_eq!(cfg.collision.look_back, 1.0);
    assert_eq!((cfg.body.offset_x, cfg.body.offset_y), (18.0, 15.0));
    assert_eq!((cfg.body.width, cfg.body.height), (28.0, 49.0));
    assert_eq!((cfg.camera.offset_x, cfg.camera.offset_y), (-42.0, -34.0));
    assert_eq!(cfg.levels, default_levels());
}

#[test]
fn empty_toml_is_the_default_config() {
    assert_eq!(GameConfig::from_toml_str("").unwrap(), GameConfig::default());
}

#[test]
fn partial_table_keeps_other_defaults() {
    let cfg = GameConfig::from_toml_str(
        r#"
        [enemy]
        jump = 40.0
        tactical = false

        [game]
        seed = 7
        "#,
    )
    .unwrap();
    assert_eq!(cfg.enemy.jump, 40.0);
    assert!(!cfg.enemy.tactical);
    assert_eq!(cfg.enemy.sword, 5.0);
    assert_eq!(cfg.game.seed, Some(7));
    assert_eq!(cfg.game.max_time_ms, 25_000.0);
}

#[test]
fn levels_replace_the_built_in_ones() {
    let cfg = GameConfig::from_toml_str(
        r#"
        [[levels]]
        width = 200.0
        height = 100.0
        player = { x = 10.0, y = 10.0 }
        enemies = [{ x = 150.0, y = 20.0 }]
        obstacles = [{ x = 80.0, y = 0.0, width = 10.0, height = 50.0 }]

        [[levels]]
        width = 300.0
        height = 300.0
        player = { x = 20.0, y = 20.0 }
        "#,
    )
    .unwrap();
    assert_eq!(cfg.levels.len(), 2);
    assert_eq!(
        cfg.levels[0],
        LevelDef {
            width: 200.0,
            height: 100.0,
            player: SpawnPoint { x: 10.0, y: 10.0 },
            enemies: vec![SpawnPoint { x: 150.0, y: 20.0 }],
            obstacles: vec![Obstacle::new(80.0, 0.0, 10.0, 50.0)],
        }
    );
    assert!(cfg.levels[1].enemies.is_empty());
    assert!(cfg.levels[1].obstacles.is_empty());
}

#[test]
fn malformed_toml_is_a_config_error() {
    assert!(matches!(
        GameConfig::from_toml_str("[enemy]\njump = \"far\""),
        Err(GameError::Config(_))
    ));
}

#[test]
fn missing_file_is_an_io_error() {
    assert!(matches!(
        GameConfig::load("/definitely/not/here/archer_arena.toml"),
        Err(GameError::Io(_))
    ));
}

#[test]
fn incomplete_clip_table_is_rejected_when_building_specs() {
    let cfg = GameConfig::from_toml_str(
        r#"
        [animations.enemy]
        walk_up = "Orc-Walk-Up"
        walk_right = "Orc-Walk-Right"
        walk_down = "Orc-Walk-Down"
        walk_left = "Orc-Walk-Left"
        "#,
    )
    .unwrap();
    assert!(cfg.player_spec().is_ok());
    assert!(matches!(
        cfg.enemy_spec(),
        Err(GameError::MissingClip { kind: BodyKind::Enemy, clip: "attack_up" })
    ));
}

#[test]
fn zero_sized_body_shape_is_rejected() {
    let cfg = GameConfig::from_toml_str("[body]\nwidth = 0.0").unwrap();
    assert!(matches!(cfg.player_spec(), Err(GameError::InvalidShape { .. })));
}

#[test]
fn level_validation() {
    let shape = GameConfig::default().body.shape().unwrap();
    let level = |width: f32, player: SpawnPoint, obstacles: Vec<Obstacle>| LevelDef {
        width,
        height: 100.0,
        player,
        enemies: vec![SpawnPoint { x: 50.0, y: 50.0 }],
        obstacles,
    };
    let inside = SpawnPoint { x: 10.0, y: 10.0 };

    assert!(level(100.0, inside, vec![]).validate(1, &shape).is_ok());
    assert!(matches!(
        level(0.0, inside, vec![]).validate(2, &shape),
        Err(GameError::InvalidLevel { level: 2, .. })
    ));
    assert!(level(100.0, SpawnPoint { x: 150.0, y: 10.0 }, vec![]).validate(1, &shape).is_err());
    assert!(level(100.0, inside, vec![Obstacle::new(0.0, 0.0, 0.0, 5.0)]).validate(1, &shape).is_err());
    for (i, def) in default_levels().iter().enumerate() {
        assert!(def.validate(i + 1, &shape).is_ok());
    }
}

#[test]
fn spawned_shapes_must_fit_inside_the_level() {
    let shape = GameConfig::default().body.shape().unwrap();
    let level = |player: SpawnPoint| LevelDef {
        width: 100.0,
        height: 100.0,
        player,
        enemies: vec![SpawnPoint { x: 50.0, y: 50.0 }],
        obstacles: vec![],
    };
    // 28x49 shape: the origin is inside, the rectangle is not.
    assert!(level(SpawnPoint { x: 80.0, y: 10.0 }).validate(1, &shape).is_err());
    assert!(level(SpawnPoint { x: 10.0, y: 60.0 }).validate(1, &shape).is_err());
    // Flush with the right and bottom edges is fine.
    assert!(level(SpawnPoint { x: 72.0, y: 51.0 }).validate(1, &shape).is_ok());

    let mut enemy_out = level(SpawnPoint { x: 10.0, y: 10.0 });
    enemy_out.enemies.push(SpawnPoint { x: 90.0, y: 0.0 });
    assert!(enemy_out.validate(1, &shape).is_err());
}

#[test]
fn spawns_must_be_clear_of_obstacles() {
    let shape = GameConfig::default().body.shape().unwrap();
    let def = LevelDef {
        width: 200.0,
        height: 200.0,
        player: SpawnPoint { x: 10.0, y: 10.0 },
        enemies: vec![SpawnPoint { x: 100.0, y: 100.0 }],
        obstacles: vec![Obstacle::new(120.0, 120.0, 20.0, 20.0)],
    };
    assert!(matches!(def.validate(1, &shape), Err(GameError::InvalidLevel { level: 1, .. })));

    // Touching an edge is not an overlap.
    let mut touching = def.clone();
    touching.obstacles = vec![Obstacle::new(128.0, 100.0, 20.0, 20.0)];
    assert!(touching.validate(1, &shape).is_ok());
}

#[test]
fn level_without_enemies_is_rejected() {
    let shape = GameConfig::default().body.shape().unwrap();
    let def = LevelDef {
        width: 100.0,
        height: 100.0,
        player: SpawnPoint { x: 10.0, y: 10.0 },
        enemies: vec![],
        obstacles: vec![],
    };
    assert!(matches!(def.validate(3, &shape), Err(GameError::InvalidLevel { level: 3, .. })));
}
