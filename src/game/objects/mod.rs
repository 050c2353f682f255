// Interactive world objects and the capabilities they opt into
//
// Abilities never ask what an object *is*; they ask whether it can burn,
// freeze or break, probing the struck object first and then its parent.

pub mod breakable;
pub mod water_wall;

pub use breakable::BreakableObject;
pub use water_wall::{WallState, WaterWall};

use log::debug;
use std::collections::HashMap;

use crate::engine::physics::{ColliderHandle, PhysicsQuery, RigidBodyHandle};

/// Reacts to fire
pub trait Burnable {
    fn burn(&mut self, physics: &mut dyn PhysicsQuery);
}

/// Reacts to ice
pub trait Freezable {
    fn freeze(&mut self, physics: &mut dyn PhysicsQuery);
}

/// Can be smashed
pub trait Breakable {
    fn break_apart(&mut self, physics: &mut dyn PhysicsQuery);
}

/// Anything registered in the world that abilities may interact with
pub trait WorldObject {
    fn name(&self) -> &str;

    fn as_burnable(&mut self) -> Option<&mut dyn Burnable> {
        None
    }

    fn as_freezable(&mut self) -> Option<&mut dyn Freezable> {
        None
    }

    fn as_breakable(&mut self) -> Option<&mut dyn Breakable> {
        None
    }
}

/// Unique identifier for a registered object
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId(pub u32);

struct Entry {
    object: Box<dyn WorldObject>,
    parent: Option<ObjectId>,
    colliders: Vec<ColliderHandle>,
    body: Option<RigidBodyHandle>,
}

/// Registry mapping physics handles to world objects
#[derive(Default)]
pub struct WorldObjects {
    entries: HashMap<ObjectId, Entry>,
    by_collider: HashMap<ColliderHandle, ObjectId>,
    by_body: HashMap<RigidBodyHandle, ObjectId>,
    next_id: u32,
}

impl WorldObjects {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an object owning the given colliders and, optionally, a body
    pub fn insert(
        &mut self,
        object: Box<dyn WorldObject>,
        colliders: &[ColliderHandle],
        body: Option<RigidBodyHandle>,
    ) -> ObjectId {
        let id = ObjectId(self.next_id);
        self.next_id += 1;

        for &collider in colliders {
            self.by_collider.insert(collider, id);
        }
        if let Some(body) = body {
            self.by_body.insert(body, id);
        }

        debug!("Registered world object '{}' as {:?}", object.name(), id);
        self.entries.insert(
            id,
            Entry {
                object,
                parent: None,
                colliders: colliders.to_vec(),
                body,
            },
        );
        id
    }

    /// Nest `child` under `parent` for capability probes
    pub fn set_parent(&mut self, child: ObjectId, parent: Option<ObjectId>) {
        if let Some(entry) = self.entries.get_mut(&child) {
            entry.parent = parent;
        }
    }

    pub fn parent(&self, id: ObjectId) -> Option<ObjectId> {
        self.entries.get(&id).and_then(|e| e.parent)
    }

    pub fn object_for_collider(&self, collider: ColliderHandle) -> Option<ObjectId> {
        self.by_collider.get(&collider).copied()
    }

    pub fn object_for_body(&self, body: RigidBodyHandle) -> Option<ObjectId> {
        self.by_body.get(&body).copied()
    }

    pub fn get(&self, id: ObjectId) -> Option<&dyn WorldObject> {
        self.entries.get(&id).map(|e| e.object.as_ref())
    }

    pub fn get_mut(&mut self, id: ObjectId) -> Option<&mut (dyn WorldObject + 'static)> {
        self.entries.get_mut(&id).map(|e| e.object.as_mut())
    }

    /// Unregister an object and forget its handles
    pub fn remove(&mut self, id: ObjectId) -> Option<Box<dyn WorldObject>> {
        let entry = self.entries.remove(&id)?;
        for collider in &entry.colliders {
            self.by_collider.remove(collider);
        }
        if let Some(body) = entry.body {
            self.by_body.remove(&body);
        }
        for other in self.entries.values_mut() {
            if other.parent == Some(id) {
                other.parent = None;
            }
        }
        Some(entry.object)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Run `apply` on the object itself, then on its parent, stopping at the
    /// first one that accepts. Returns the object that accepted.
    fn probe(
        &mut self,
        start: ObjectId,
        mut apply: impl FnMut(&mut dyn WorldObject) -> bool,
    ) -> Option<ObjectId> {
        let parent = self.parent(start);
        for id in std::iter::once(start).chain(parent) {
            if let Some(entry) = self.entries.get_mut(&id) {
                if apply(entry.object.as_mut()) {
                    return Some(id);
                }
            }
        }
        None
    }

    /// Burn whatever owns `collider` (or its parent). Returns true if something burned.
    pub fn burn(&mut self, collider: ColliderHandle, physics: &mut dyn PhysicsQuery) -> bool {
        let Some(id) = self.object_for_collider(collider) else {
            return false;
        };
        self.probe(id, |object| match object.as_burnable() {
            Some(burnable) => {
                burnable.burn(physics);
                true
            }
            None => false,
        })
        .is_some()
    }

    /// Freeze whatever owns `collider` (or its parent). Returns true if something froze.
    pub fn freeze(&mut self, collider: ColliderHandle, physics: &mut dyn PhysicsQuery) -> bool {
        let Some(id) = self.object_for_collider(collider) else {
            return false;
        };
        self.probe(id, |object| match object.as_freezable() {
            Some(freezable) => {
                freezable.freeze(physics);
                true
            }
            None => false,
        })
        .is_some()
    }

    /// Whether the object owning `body` can be broken
    pub fn is_breakable(&mut self, body: RigidBodyHandle) -> bool {
        self.object_for_body(body)
            .and_then(|id| self.entries.get_mut(&id))
            .is_some_and(|entry| entry.object.as_breakable().is_some())
    }

    /// Break the object owning `body` and unregister it. Returns true if it broke.
    pub fn break_body(&mut self, body: RigidBodyHandle, physics: &mut dyn PhysicsQuery) -> bool {
        let Some(id) = self.object_for_body(body) else {
            return false;
        };
        let broke = self
            .entries
            .get_mut(&id)
            .and_then(|entry| entry.object.as_breakable())
            .map(|breakable| breakable.break_apart(physics))
            .is_some();
        if broke {
            self.remove(id);
        }
        broke
    }
}
