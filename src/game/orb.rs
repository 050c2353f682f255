// Wizard projectiles
//
// Orbs are weightless sensors. They live until they hit something on their
// collision mask or their lifetime runs out, whichever comes first.

use glam::Vec2;
use log::{debug, info};

use crate::engine::physics::{
    ColliderHandle, CollisionEvent, LayerMask, PhysicsQuery, RigidBodyHandle,
};
use crate::game::abilities::WizardConfig;
use crate::game::objects::WorldObjects;

/// What an orb does to the object it strikes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Element {
    Fire,
    Ice,
}

/// Per-orb tunables, set by the casting ability
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbSettings {
    pub speed: f32,
    pub radius: f32,
    /// Seconds before the orb removes itself
    pub lifetime: f32,
    /// Layers that consume the orb on contact
    pub collision_layers: LayerMask,
    /// Record an impact for cosmetic feedback
    pub hit_effect: bool,
}

impl Default for OrbSettings {
    fn default() -> Self {
        WizardConfig::DEFAULT.orb_settings()
    }
}

/// A live projectile
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Orb {
    pub element: Element,
    pub body: RigidBodyHandle,
    pub collider: ColliderHandle,
    spawned_at: f32,
    settings: OrbSettings,
}

impl Orb {
    pub fn is_expired(&self, now: f32) -> bool {
        now - self.spawned_at >= self.settings.lifetime
    }
}

/// Where an orb hit, for effects
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbImpact {
    pub element: Element,
    pub position: Vec2,
    /// The struck object reacted to the element
    pub affected: bool,
}

/// All live orbs
#[derive(Debug, Default)]
pub struct OrbSet {
    orbs: Vec<Orb>,
    impacts: Vec<OrbImpact>,
}

impl OrbSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Launch an orb from `position` along `direction` (normalized)
    pub fn spawn(
        &mut self,
        physics: &mut dyn PhysicsQuery,
        element: Element,
        position: Vec2,
        direction: Vec2,
        settings: OrbSettings,
        now: f32,
    ) -> Option<RigidBodyHandle> {
        let velocity = direction * settings.speed;
        let Some((body, collider)) = physics.spawn_orb(position, velocity, settings.radius) else {
            debug!("Could not spawn {:?} orb", element);
            return None;
        };

        debug!("Spawned {:?} orb at {} heading {}", element, position, direction);
        self.orbs.push(Orb {
            element,
            body,
            collider,
            spawned_at: now,
            settings,
        });
        Some(body)
    }

    /// Remove orbs that outlived their lifetime
    pub fn expire(&mut self, physics: &mut dyn PhysicsQuery, now: f32) {
        self.orbs.retain(|orb| {
            if orb.is_expired(now) {
                debug!("{:?} orb expired", orb.element);
                physics.despawn_body(orb.body);
                false
            } else {
                true
            }
        });
    }

    /// Resolve this step's collision events
    ///
    /// An orb touching a collider outside its mask keeps flying. Otherwise the
    /// element is applied to the struck object (or its parent) and the orb is
    /// removed.
    pub fn handle_collisions(
        &mut self,
        events: &[CollisionEvent],
        physics: &mut dyn PhysicsQuery,
        objects: &mut WorldObjects,
    ) {
        for event in events {
            let Some((index, other)) = self
                .orbs
                .iter()
                .enumerate()
                .find_map(|(i, orb)| event.started_with(orb.collider).map(|other| (i, other)))
            else {
                continue;
            };

            let orb = self.orbs[index];
            if !physics
                .collider_layers(other)
                .intersects(orb.settings.collision_layers)
            {
                debug!("{:?} orb passed through a collider outside its mask", orb.element);
                continue;
            }

            let affected = match orb.element {
                Element::Fire => objects.burn(other, physics),
                Element::Ice => objects.freeze(other, physics),
            };
            if affected {
                info!("{:?} orb hit a reactive object", orb.element);
            }

            if orb.settings.hit_effect {
                if let Some(position) = physics.body_position(orb.body) {
                    self.impacts.push(OrbImpact {
                        element: orb.element,
                        position,
                        affected,
                    });
                }
            }

            physics.despawn_body(orb.body);
            self.orbs.swap_remove(index);
        }
    }

    /// Impacts recorded since the last call
    pub fn drain_impacts(&mut self) -> Vec<OrbImpact> {
        std::mem::take(&mut self.impacts)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Orb> {
        self.orbs.iter()
    }

    pub fn len(&self) -> usize {
        self.orbs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.orbs.is_empty()
    }
}
