use archer_arena::entities::Direction;
use archer_arena::vector::Velocity;

#[test]
fn direction_table() {
    let up = Velocity::new(Direction::Up, 200.0);
    assert_eq!((up.x(), up.y()), (0.0, -200.0));
    let down = Velocity::new(Direction::Down, 200.0);
    assert_eq!((down.x(), down.y()), (0.0, 200.0));
    let right = Velocity::new(Direction::Right, 200.0);
    assert_eq!((right.x(), right.y()), (200.0, 0.0));
    let left = Velocity::new(Direction::Left, 200.0);
    assert_eq!((left.x(), left.y()), (-200.0, 0.0));
}

#[test]
fn set_direction_replaces_both_axes() {
    let mut v = Velocity::new(Direction::Right, 100.0);
    v.set_direction(Direction::Up, 50.0);
    assert_eq!(v.direction(), Direction::Up);
    assert_eq!(v.speed(), 50.0);
    assert_eq!((v.x(), v.y()), (0.0, -50.0));
}

#[test]
fn stop_keeps_facing() {
    let mut v = Velocity::new(Direction::Left, 100.0);
    v.stop();
    assert_eq!(v.direction(), Direction::Left);
    assert_eq!(v.speed(), 0.0);
    assert_eq!(v.displacement(1_000.0), (0.0, 0.0));
}

#[test]
fn zero_speed_never_moves() {
    let v = Velocity::new(Direction::Down, 0.0);
    let (mut x, mut y) = (12.0, 34.0);
    v.integrate(&mut x, &mut y, 123_456.0);
    assert_eq!((x, y), (12.0, 34.0));
}

#[test]
fn integrate_is_pixels_per_second() {
    let v = Velocity::new(Direction::Up, 400.0);
    let (mut x, mut y) = (50.0, 50.0);
    v.integrate(&mut x, &mut y, 250.0);
    assert_eq!((x, y), (50.0, -50.0));
}

#[test]
fn split_frames_match_one_long_frame() {
    let v = Velocity::new(Direction::Right, 200.0);
    let (mut x1, mut y1) = (0.0, 0.0);
    v.integrate(&mut x1, &mut y1, 500.0);
    let (mut x2, mut y2) = (0.0, 0.0);
    for _ in 0..4 {
        v.integrate(&mut x2, &mut y2, 125.0);
    }
    assert_eq!(x1, 100.0);
    assert_eq!(x2, 100.0);
    assert_eq!(y1, y2);
}

#[test]
fn one_second_moves_exactly_speed_along_one_axis() {
    for speed in [1.0, 75.0, 200.0, 400.0] {
        for direction in Direction::ALL {
            let v = Velocity::new(direction, speed);
            let (dx, dy) = v.displacement(1_000.0);
            let expected = match direction {
                Direction::Up => (0.0, -speed),
                Direction::Right => (speed, 0.0),
                Direction::Down => (0.0, speed),
                Direction::Left => (-speed, 0.0),
            };
            assert_eq!((dx, dy), expected, "{direction:?} at {speed}");
            assert_eq!(dx.abs() + dy.abs(), speed);
        }
    }
}
