// Ability pickups: sensors that grant an ability when the player walks in

use glam::Vec2;
use log::{debug, info};

use crate::engine::physics::{
    presets, ColliderHandle, CollisionEvent, Layer, PhysicsQuery, PhysicsWorld, RigidBodyHandle,
};
use crate::game::abilities::AbilityDefinition;

/// Side length of a pickup's sensor box
pub const PICKUP_SIZE: f32 = 0.8;

#[derive(Debug, Clone)]
pub struct AbilityPickup {
    pub body: RigidBodyHandle,
    pub collider: ColliderHandle,
    /// `None` makes the pickup inert
    pub definition: Option<AbilityDefinition>,
}

/// Pickups still lying in the level
#[derive(Debug, Default)]
pub struct Pickups {
    pickups: Vec<AbilityPickup>,
}

impl Pickups {
    pub fn new() -> Self {
        Self::default()
    }

    /// Track a pickup whose body and sensor already exist
    pub fn add(&mut self, pickup: AbilityPickup) {
        self.pickups.push(pickup);
    }

    /// Place a fixed sensor at `position` on the pickup layer
    pub fn spawn(
        &mut self,
        world: &mut PhysicsWorld,
        position: Vec2,
        definition: Option<AbilityDefinition>,
    ) -> RigidBodyHandle {
        let body = world.add_rigid_body(presets::ground_body(position.x, position.y));
        let collider = world.add_collider(
            presets::sensor_collider(PICKUP_SIZE, PICKUP_SIZE, Layer::Pickup),
            body,
        );
        if let Some(definition) = &definition {
            debug!("Placed '{}' pickup at {}", definition.name, position);
        }
        self.add(AbilityPickup {
            body,
            collider,
            definition,
        });
        body
    }

    /// Collect every pickup the player started touching this step
    ///
    /// Returns the granted definitions; collected pickups are despawned.
    pub fn collect(
        &mut self,
        events: &[CollisionEvent],
        player_collider: ColliderHandle,
        physics: &mut dyn PhysicsQuery,
    ) -> Vec<AbilityDefinition> {
        let mut granted = Vec::new();
        for event in events {
            let Some(index) = self
                .pickups
                .iter()
                .position(|p| event.started_with(p.collider) == Some(player_collider))
            else {
                continue;
            };

            let Some(definition) = self.pickups[index].definition.clone() else {
                continue;
            };

            let pickup = self.pickups.swap_remove(index);
            physics.despawn_body(pickup.body);
            info!("Picked up '{}'", definition.name);
            granted.push(definition);
        }
        granted
    }

    pub fn iter(&self) -> impl Iterator<Item = &AbilityPickup> {
        self.pickups.iter()
    }

    pub fn len(&self) -> usize {
        self.pickups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pickups.is_empty()
    }
}
