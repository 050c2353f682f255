// Player locomotion driven by the runtime movement stats

use glam::Vec2;
use log::debug;

use crate::engine::input::{Action, PlayerInput};
use crate::engine::physics::{Layer, LayerMask, PhysicsQuery, STANDARD_GRAVITY};
use crate::game::actor::Actor;
use crate::game::stats::MovementStats;

/// Horizontal input below this is treated as no input
const INPUT_DEADZONE: f32 = 0.1;

/// Moves the player body from input
///
/// Reads the stats every update, so anything an ability changes shows up on
/// the next frame: speeds, jump arc and jump budget.
#[derive(Debug)]
pub struct PlayerController {
    actor: Actor,
    /// Jumps left before landing
    jumps_remaining: i32,
    was_grounded: bool,
    pub ground_check_distance: f32,
    pub ground_layers: LayerMask,
}

impl PlayerController {
    pub fn new(actor: Actor) -> Self {
        Self {
            actor,
            jumps_remaining: 0,
            was_grounded: false,
            ground_check_distance: 0.1,
            ground_layers: Layer::Default
                .mask()
                .with(Layer::Ground.mask())
                .with(Layer::Grabbable.mask())
                .with(Layer::Ice.mask()),
        }
    }

    pub fn actor(&self) -> Actor {
        self.actor
    }

    pub fn jumps_remaining(&self) -> i32 {
        self.jumps_remaining
    }

    pub fn is_grounded(&self) -> bool {
        self.was_grounded
    }

    /// Apply one frame of input to the body
    pub fn update(
        &mut self,
        physics: &mut dyn PhysicsQuery,
        input: &PlayerInput,
        stats: &MovementStats,
        dt: f32,
    ) {
        let Some(mut velocity) = physics.body_velocity(self.actor.body) else {
            return;
        };

        let grounded = self.actor.is_grounded(
            &*physics,
            self.ground_check_distance,
            self.ground_layers,
        );
        if grounded && !self.was_grounded {
            self.on_land(stats);
        }
        self.was_grounded = grounded;
        // Budget can shrink mid-air when an ability is unequipped
        self.jumps_remaining = self.jumps_remaining.min(stats.max_jumps);

        velocity.x = self.horizontal_velocity(velocity.x, input, stats, grounded, dt);

        if input.just_pressed(Action::Jump) {
            if let Some(vy) = self.try_jump(stats) {
                velocity.y = vy;
            }
        }

        // Gravity that produces the configured arc
        physics.set_body_gravity_scale(self.actor.body, stats.jump_gravity() / STANDARD_GRAVITY);
        physics.set_body_velocity(self.actor.body, velocity);
    }

    fn horizontal_velocity(
        &self,
        current: f32,
        input: &PlayerInput,
        stats: &MovementStats,
        grounded: bool,
        dt: f32,
    ) -> f32 {
        let axis = input.horizontal();
        let running = input.is_pressed(Action::Run);

        if axis.abs() <= INPUT_DEADZONE {
            // Stop on ground, keep momentum in the air
            return if grounded { 0.0 } else { current };
        }

        let speed = if running { stats.run_speed } else { stats.walk_speed };
        let target = axis * speed;
        if grounded {
            return target;
        }

        let acceleration = if running {
            stats.run_air_acceleration
        } else {
            stats.air_acceleration
        };
        move_towards(current, target, acceleration * dt)
    }

    /// Consume a jump. Returns the takeoff velocity.
    fn try_jump(&mut self, stats: &MovementStats) -> Option<f32> {
        if self.jumps_remaining <= 0 {
            return None;
        }
        self.jumps_remaining -= 1;
        debug!(
            "Jump: height {:.2}, {} left",
            stats.max_jump_height, self.jumps_remaining
        );
        Some(stats.jump_velocity())
    }

    fn on_land(&mut self, stats: &MovementStats) {
        self.jumps_remaining = stats.max_jumps;
    }

    pub fn position(&self, physics: &dyn PhysicsQuery) -> Option<Vec2> {
        self.actor.position(physics)
    }
}

fn move_towards(current: f32, target: f32, max_delta: f32) -> f32 {
    if (target - current).abs() <= max_delta {
        target
    } else {
        current + (target - current).signum() * max_delta
    }
}
