/// Axis-separated collision resolution against static obstacles.
///
/// Each kinematic body is integrated freely first; the collider then compares
/// the position it recorded last frame with the new one and clamps X and Y
/// independently so the collision shape stops exactly at the nearest edge it
/// crossed this frame.

use std::collections::BTreeMap;

use tracing::{trace, warn};

use crate::body::Body;
use crate::entities::{CollisionShape, EntityId, LevelBounds, Obstacle};

/// Default one-pixel look-back on the leading edge.
///
/// A body resting flush against an edge is then never seen as crossing it
/// again. The value is a tuning knob, not a contract.
pub const DEFAULT_LOOK_BACK: f32 = 1.0;

/// Bookkeeping for one registered body.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TrackedBody {
    pub x: f32,
    pub y: f32,
    pub init_x: f32,
    pub init_y: f32,
    pub entity: EntityId,
}

#[derive(Clone, Debug)]
pub struct Collider {
    obstacles: Vec<Obstacle>,
    bounds: LevelBounds,
    look_back: f32,
    tracked: BTreeMap<EntityId, TrackedBody>,
}

impl Collider {
    pub fn new(obstacles: Vec<Obstacle>, bounds: LevelBounds, look_back: f32) -> Self {
        Self {
            obstacles,
            bounds,
            look_back,
            tracked: BTreeMap::new(),
        }
    }

    pub fn obstacles(&self) -> &[Obstacle] {
        &self.obstacles
    }

    pub fn bounds(&self) -> &LevelBounds {
        &self.bounds
    }

    pub fn tracked(&self, entity: EntityId) -> Option<&TrackedBody> {
        self.tracked.get(&entity)
    }

    pub fn add_kinematic_body(&mut self, body: &Body) {
        self.tracked.insert(
            body.id(),
            TrackedBody {
                x: body.x,
                y: body.y,
                init_x: body.x,
                init_y: body.y,
                entity: body.id(),
            },
        );
    }

    /// Move a body's record to where the body stands now, so a placement
    /// is not resolved as a swept move on the next `resolve`.
    pub fn sync_body(&mut self, body: &Body) {
        match self.tracked.get_mut(&body.id()) {
            Some(record) => {
                record.x = body.x;
                record.y = body.y;
            }
            None => warn!(target: "collider", entity = %body.id(), "sync on unregistered body"),
        }
    }

    pub fn remove_kinematic_body(&mut self, entity: EntityId) {
        self.tracked.remove(&entity);
    }

    /// Rewind every record to where it was registered.
    pub fn restart(&mut self) {
        for record in self.tracked.values_mut() {
            record.x = record.init_x;
            record.y = record.init_y;
        }
    }

    /// Clamp every body's post-move position and write it back to both the
    /// body and its record.
    pub fn resolve<'a, I>(&mut self, bodies: I)
    where
        I: IntoIterator<Item = &'a mut Body>,
    {
        for body in bodies {
            let Some(record) = self.tracked.get_mut(&body.id()) else {
                warn!(target: "collider", entity = %body.id(), "resolve on unregistered body");
                continue;
            };
            let (x, y) = resolve_position(
                (record.x, record.y),
                (body.x, body.y),
                body.shape(),
                &self.obstacles,
                &self.bounds,
                self.look_back,
            );
            if x != body.x || y != body.y {
                trace!(target: "collider", entity = %body.id(), from_x = body.x, from_y = body.y, x, y, "clamped");
            }
            record.x = x;
            record.y = y;
            body.x = x;
            body.y = y;
        }
    }
}

/// Resolve one body's move from `old` to `new` (entity origins).
///
/// Level bounds are applied first, then every obstacle whose edge the leading
/// edge crossed this frame. The nearest edge always wins, so the result does
/// not depend on obstacle order.
pub fn resolve_position(
    old: (f32, f32),
    new: (f32, f32),
    shape: &CollisionShape,
    obstacles: &[Obstacle],
    bounds: &LevelBounds,
    look_back: f32,
) -> (f32, f32) {
    let (old_x, old_y) = old;
    let (mut x, mut y) = new;
    let (dx, dy) = (x - old_x, y - old_y);
    let CollisionShape {
        offset_x: ox,
        offset_y: oy,
        width: w,
        height: h,
    } = *shape;

    // Vertical span at the new y, used for the horizontal pass.
    let top = y + oy;
    let bottom = y + oy + h;

    // moving right
    if dx > 0.0 {
        let mut right = (x + ox + w).min(bounds.right);
        for o in obstacles.iter().map(Obstacle::bounds) {
            let crossed = old_x - look_back + ox + w < o.left && x + ox + w > o.left;
            if crossed && top < o.bottom && bottom > o.top {
                right = right.min(o.left);
            }
        }
        x = right - ox - w;
    }

    // moving left
    if dx < 0.0 {
        let mut left = (x + ox).max(bounds.left);
        for o in obstacles.iter().map(Obstacle::bounds) {
            let crossed = old_x + look_back + ox > o.right && x + ox < o.right;
            if crossed && top < o.bottom && bottom > o.top {
                left = left.max(o.right);
            }
        }
        x = left - ox;
    }

    // Horizontal span at the resolved x, used for the vertical pass.
    let left = x + ox;
    let right = x + ox + w;

    // moving down
    if dy > 0.0 {
        let mut bottom = (y + oy + h).min(bounds.bottom);
        for o in obstacles.iter().map(Obstacle::bounds) {
            let crossed = old_y - look_back + oy + h < o.top && y + oy + h > o.top;
            if crossed && left < o.right && right > o.left {
                bottom = bottom.min(o.top);
            }
        }
        y = bottom - oy - h;
    }

    // moving up
    if dy < 0.0 {
        let mut top = (y + oy).max(bounds.top);
        for o in obstacles.iter().map(Obstacle::bounds) {
            let crossed = old_y + look_back + oy > o.bottom && y + oy < o.bottom;
            if crossed && left < o.right && right > o.left {
                top = top.max(o.bottom);
            }
        }
        y = top - oy;
    }

    (x, y)
}
