// Teleport: blink toward the cursor, stopping short of walls

use glam::Vec2;
use log::{debug, info, warn};

use super::definition::{require_non_negative, require_positive};
use super::error::AbilityError;
use super::{Ability, AbilityEnv, AbilityKind};
use crate::core::math::clamped_direction;
use crate::engine::physics::{Layer, LayerMask, PhysicsQuery};
use crate::game::actor::Actor;
use crate::game::stats::PlayerStats;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TeleportConfig {
    /// Longest blink, in world units
    pub max_distance: f32,
    /// Layers that block a blink
    pub obstacle_layers: LayerMask,
    /// Clearance kept from a blocking surface, roughly the player's radius
    pub collision_offset: f32,
    /// Seconds between blinks
    pub cooldown: f32,
}

impl TeleportConfig {
    pub const DEFAULT: Self = Self {
        max_distance: 10.0,
        obstacle_layers: Layer::Default
            .mask()
            .with(Layer::Ground.mask())
            .with(Layer::Grabbable.mask())
            .with(Layer::Ice.mask()),
        collision_offset: 0.5,
        cooldown: 0.5,
    };

    pub(crate) fn validate(&self, ability: &str) -> Result<(), AbilityError> {
        require_positive(ability, "max_distance", self.max_distance)?;
        require_non_negative(ability, "collision_offset", self.collision_offset)?;
        require_non_negative(ability, "cooldown", self.cooldown)
    }
}

impl Default for TeleportConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[derive(Debug)]
pub struct Teleport {
    config: TeleportConfig,
    owner: Option<Actor>,
    last_teleport: Option<f32>,
}

impl Teleport {
    pub fn new(config: TeleportConfig) -> Self {
        Self {
            config,
            owner: None,
            last_teleport: None,
        }
    }

    /// Ready to blink at time `now`
    pub fn is_ready(&self, now: f32) -> bool {
        self.last_teleport
            .map_or(true, |last| now >= last + self.config.cooldown)
    }

    /// Where a blink from `origin` along `direction` for `distance` lands
    ///
    /// The straight target is used when clear. Otherwise the actor stops
    /// `collision_offset` before the first obstacle on the way.
    pub fn resolve_target(
        &self,
        physics: &dyn PhysicsQuery,
        origin: Vec2,
        direction: Vec2,
        distance: f32,
    ) -> Vec2 {
        let target = origin + direction * distance;
        let probe_radius = self.config.collision_offset * 0.5;

        if physics
            .overlap_circle(target, probe_radius, self.config.obstacle_layers)
            .is_none()
        {
            return target;
        }

        match physics.raycast(origin, direction, distance, self.config.obstacle_layers) {
            Some(hit) => hit.point - direction * self.config.collision_offset,
            None => target,
        }
    }

    fn perform(&mut self, env: &mut AbilityEnv<'_>) {
        let Some(owner) = self.owner else {
            warn!("Teleport: no owner to move");
            return;
        };
        let Some(cursor) = env.cursor_world() else {
            warn!("Teleport: no camera to aim with");
            return;
        };
        let Some(origin) = owner.position(&*env.physics) else {
            warn!("Teleport: owner has no body");
            return;
        };
        let Some((direction, distance)) =
            clamped_direction(cursor - origin, self.config.max_distance)
        else {
            debug!("Teleport: cursor is on the player, nowhere to go");
            return;
        };

        let target = self.resolve_target(&*env.physics, origin, direction, distance);
        env.physics.set_body_position(owner.body, target);
        env.physics.set_body_velocity(owner.body, Vec2::ZERO);
        self.last_teleport = Some(env.time.now);

        info!("Teleported to {}", target);
    }
}

impl Ability for Teleport {
    fn kind(&self) -> AbilityKind {
        AbilityKind::Teleport
    }

    fn initialize(&mut self, owner: Option<Actor>, _stats: &PlayerStats) {
        self.owner = owner;
    }

    fn frame_tick(&mut self, env: &mut AbilityEnv<'_>, _stats: &mut PlayerStats) {
        if !env.input.primary_just_pressed() {
            return;
        }
        if env.input.pointer_over_ui() {
            return;
        }
        if !self.is_ready(env.time.now) {
            debug!("Teleport: cooling down");
            return;
        }
        self.perform(env);
    }
}
