// Props that can be smashed

use log::info;

use super::{Breakable, WorldObject};
use crate::engine::physics::{PhysicsQuery, RigidBodyHandle};

/// A prop whose body is removed from the world when broken
#[derive(Debug)]
pub struct BreakableObject {
    name: String,
    body: RigidBodyHandle,
    broken: bool,
}

impl BreakableObject {
    pub fn new(name: &str, body: RigidBodyHandle) -> Self {
        Self {
            name: name.to_string(),
            body,
            broken: false,
        }
    }

    pub fn body(&self) -> RigidBodyHandle {
        self.body
    }

    pub fn is_broken(&self) -> bool {
        self.broken
    }
}

impl Breakable for BreakableObject {
    fn break_apart(&mut self, physics: &mut dyn PhysicsQuery) {
        if self.broken {
            return;
        }
        self.broken = true;
        physics.despawn_body(self.body);
        info!("'{}' broke apart", self.name);
    }
}

impl WorldObject for BreakableObject {
    fn name(&self) -> &str {
        &self.name
    }

    fn as_breakable(&mut self) -> Option<&mut dyn Breakable> {
        Some(self)
    }
}
