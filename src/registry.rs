/// Entity arena keyed by id, with spawns and despawns deferred to frame
/// boundaries so iteration never sees the set change underneath it.

use std::collections::BTreeMap;

use crate::entities::EntityId;

/// Hands out ids unique across every registry of one game.
#[derive(Clone, Debug, Default)]
pub struct IdGen {
    next: u64,
}

impl IdGen {
    pub fn next_id(&mut self) -> EntityId {
        self.next += 1;
        EntityId(self.next)
    }
}

/// Ids that entered or left the live set during one `flush`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Flushed {
    pub spawned: Vec<EntityId>,
    pub despawned: Vec<EntityId>,
}

#[derive(Clone, Debug)]
pub struct Registry<T> {
    live: BTreeMap<EntityId, T>,
    to_spawn: Vec<(EntityId, T)>,
    to_despawn: Vec<EntityId>,
}

impl<T> Default for Registry<T> {
    fn default() -> Self {
        Self {
            live: BTreeMap::new(),
            to_spawn: Vec::new(),
            to_despawn: Vec::new(),
        }
    }
}

impl<T> Registry<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue `value`; it becomes visible at the next `flush`.
    pub fn spawn(&mut self, id: EntityId, value: T) {
        self.to_spawn.push((id, value));
    }

    /// Queue removal of `id`; it stays visible until the next `flush`.
    pub fn despawn(&mut self, id: EntityId) {
        if !self.to_despawn.contains(&id) {
            self.to_despawn.push(id);
        }
    }

    /// Apply queued spawns, then queued despawns.
    pub fn flush(&mut self) -> Flushed {
        let mut flushed = Flushed::default();
        for (id, value) in self.to_spawn.drain(..) {
            self.live.insert(id, value);
            flushed.spawned.push(id);
        }
        for id in self.to_despawn.drain(..) {
            if self.live.remove(&id).is_some() {
                flushed.despawned.push(id);
            }
        }
        flushed
    }

    /// Drop everything, pending work included.
    pub fn clear(&mut self) {
        self.live.clear();
        self.to_spawn.clear();
        self.to_despawn.clear();
    }

    pub fn get(&self, id: EntityId) -> Option<&T> {
        self.live.get(&id)
    }

    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut T> {
        self.live.get_mut(&id)
    }

    pub fn contains(&self, id: EntityId) -> bool {
        self.live.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.live.len()
    }

    pub fn is_empty(&self) -> bool {
        self.live.is_empty()
    }

    pub fn pending_spawns(&self) -> usize {
        self.to_spawn.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (EntityId, &T)> {
        self.live.iter().map(|(id, value)| (*id, value))
    }

    pub fn values(&self) -> impl Iterator<Item = &T> {
        self.live.values()
    }

    pub fn values_mut(&mut self) -> impl Iterator<Item = &mut T> {
        self.live.values_mut()
    }
}
