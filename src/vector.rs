/// Direction + scalar speed turned into per-axis velocity.
///
/// Speeds are pixels per second; integration is explicit Euler over the
/// frame delta in milliseconds.

use crate::entities::Direction;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Velocity {
    direction: Direction,
    speed: f32,
    x: f32,
    y: f32,
}

impl Velocity {
    pub fn new(direction: Direction, speed: f32) -> Self {
        let mut velocity = Self {
            direction,
            speed: 0.0,
            x: 0.0,
            y: 0.0,
        };
        velocity.set_direction(direction, speed);
        velocity
    }

    /// Recompute both axis components. Exactly one of them carries the speed.
    pub fn set_direction(&mut self, direction: Direction, speed: f32) {
        self.direction = direction;
        self.speed = speed;
        self.x = 0.0;
        self.y = 0.0;
        match direction {
            Direction::Up => self.y = -speed,
            Direction::Down => self.y = speed,
            Direction::Right => self.x = speed,
            Direction::Left => self.x = -speed,
        }
    }

    /// Zero the speed but keep the facing.
    pub fn stop(&mut self) {
        self.set_direction(self.direction, 0.0);
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    pub fn x(&self) -> f32 {
        self.x
    }

    pub fn y(&self) -> f32 {
        self.y
    }

    pub fn displacement(&self, delta_ms: f32) -> (f32, f32) {
        (self.x * delta_ms / 1000.0, self.y * delta_ms / 1000.0)
    }

    pub fn integrate(&self, x: &mut f32, y: &mut f32, delta_ms: f32) {
        let (dx, dy) = self.displacement(delta_ms);
        *x += dx;
        *y += dy;
    }
}
