// Telekinesis: grab a prop under the cursor and drag it around
//
// While an object is held the player cannot move, the object ignores the
// player's colliders, and a spring joint pulls it toward the cursor at a
// fixed speed regardless of its mass.

use glam::Vec2;
use log::{debug, info, warn};

use super::definition::require_positive;
use super::error::AbilityError;
use super::{Ability, AbilityEnv, AbilityKind};
use crate::core::math::move_towards;
use crate::engine::physics::{
    ColliderHandle, JointId, Layer, LayerMask, RigidBodyHandle, TargetJointParams,
};
use crate::game::actor::Actor;
use crate::game::stats::{MovementStats, PlayerStats, StatField, StatOverride};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TelekinesisConfig {
    /// Layers that can be picked up
    pub grabbable_layers: LayerMask,
    /// Speed the joint target follows the cursor (units/second)
    pub drag_speed: f32,
    /// Linear damping applied to a held object
    pub held_drag: f32,
    /// Cursor movement below this counts as standing still
    pub cursor_epsilon: f32,
    /// Joint max force per unit of the held body's mass
    pub force_per_mass: f32,
    pub joint_frequency: f32,
    pub joint_damping_ratio: f32,
}

impl TelekinesisConfig {
    pub const DEFAULT: Self = Self {
        grabbable_layers: Layer::Grabbable.mask(),
        drag_speed: 20.0,
        held_drag: 50.0,
        cursor_epsilon: 0.001,
        force_per_mass: 1000.0,
        joint_frequency: 10.0,
        joint_damping_ratio: 1.0,
    };

    pub(crate) fn validate(&self, ability: &str) -> Result<(), AbilityError> {
        if self.grabbable_layers.is_empty() {
            return Err(AbilityError::EmptyMask {
                ability: ability.to_string(),
                kind: AbilityKind::Telekinesis,
                field: "grabbable_layers",
            });
        }
        require_positive(ability, "drag_speed", self.drag_speed)?;
        require_positive(ability, "held_drag", self.held_drag)?;
        require_positive(ability, "cursor_epsilon", self.cursor_epsilon)?;
        require_positive(ability, "force_per_mass", self.force_per_mass)?;
        require_positive(ability, "joint_frequency", self.joint_frequency)?;
        require_positive(ability, "joint_damping_ratio", self.joint_damping_ratio)
    }
}

impl Default for TelekinesisConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Everything that must be undone on release
#[derive(Debug)]
struct Grab {
    body: RigidBodyHandle,
    joint: Option<JointId>,
    original_damping: f32,
    ignored_pairs: Vec<(ColliderHandle, ColliderHandle)>,
    frozen_movement: StatOverride,
    target: Vec2,
    last_cursor: Vec2,
}

#[derive(Debug)]
pub struct Telekinesis {
    config: TelekinesisConfig,
    owner: Option<Actor>,
    grab: Option<Grab>,
}

impl Telekinesis {
    pub fn new(config: TelekinesisConfig) -> Self {
        Self {
            config,
            owner: None,
            grab: None,
        }
    }

    pub fn is_grabbing(&self) -> bool {
        self.grab.is_some()
    }

    pub fn grabbed_body(&self) -> Option<RigidBodyHandle> {
        self.grab.as_ref().map(|g| g.body)
    }

    fn try_grab(&mut self, env: &mut AbilityEnv<'_>, stats: &mut PlayerStats) {
        if self.grab.is_some() {
            return;
        }

        let Some(cursor) = env.cursor_world() else {
            warn!("Telekinesis: no camera to aim with");
            return;
        };
        let Some(body) = env
            .physics
            .point_query(cursor, self.config.grabbable_layers)
            .and_then(|hit| hit.body)
        else {
            debug!("Telekinesis: nothing to grab at {}", cursor);
            return;
        };
        let (Some(mass), Some(original_damping)) = (
            env.physics.body_mass(body),
            env.physics.body_linear_damping(body),
        ) else {
            return;
        };

        env.physics
            .set_body_linear_damping(body, self.config.held_drag);

        let frozen_movement =
            StatOverride::acquire(&mut stats.runtime, StatField::LOCOMOTION, |s| {
                s.walk_speed = 0.0;
                s.run_speed = 0.0;
                s.air_acceleration = 0.0;
                s.run_air_acceleration = 0.0;
            });

        let mut ignored_pairs = Vec::new();
        match self.owner {
            Some(owner) => {
                let held_colliders = env.physics.body_colliders(body);
                for own in env.physics.body_colliders(owner.body) {
                    for &held in &held_colliders {
                        env.physics.set_collision_ignored(own, held, true);
                        ignored_pairs.push((own, held));
                    }
                }
            }
            None => debug!("Telekinesis: no owner, held object keeps colliding with nobody"),
        }

        let params = TargetJointParams {
            max_force: self.config.force_per_mass * mass,
            frequency: self.config.joint_frequency,
            damping_ratio: self.config.joint_damping_ratio,
        };
        let joint = env.physics.create_target_joint(body, cursor, cursor, params);

        info!("Telekinesis: grabbed body {:?} (mass {:.2})", body, mass);
        self.grab = Some(Grab {
            body,
            joint,
            original_damping,
            ignored_pairs,
            frozen_movement,
            target: cursor,
            last_cursor: cursor,
        });
    }

    /// Undo the grab. Safe to call when nothing is held.
    fn release(&mut self, env: &mut AbilityEnv<'_>, stats: &mut PlayerStats) {
        let Some(grab) = self.grab.take() else {
            return;
        };

        if let Some(joint) = grab.joint {
            env.physics.remove_joint(joint);
        }
        env.physics
            .set_body_linear_damping(grab.body, grab.original_damping);
        for (own, held) in grab.ignored_pairs {
            env.physics.set_collision_ignored(own, held, false);
        }
        grab.frozen_movement.restore(&mut stats.runtime);

        info!("Telekinesis: released body {:?}", grab.body);
    }

    fn try_break(&mut self, env: &mut AbilityEnv<'_>, stats: &mut PlayerStats) {
        let Some(body) = self.grabbed_body() else {
            return;
        };
        if !env.objects.is_breakable(body) {
            return;
        }

        self.release(env, stats);
        env.objects.break_body(body, env.physics);
    }

    fn drag(&mut self, env: &mut AbilityEnv<'_>) {
        let Some(grab) = self.grab.as_mut() else {
            return;
        };
        let Some(cursor) = env.cursor_world() else {
            return;
        };

        if cursor.distance(grab.last_cursor) < self.config.cursor_epsilon {
            // Let the object settle instead of oscillating around the target
            env.physics.set_body_velocity(grab.body, Vec2::ZERO);
            env.physics.set_body_angular_velocity(grab.body, 0.0);
        }
        grab.last_cursor = cursor;

        grab.target = move_towards(grab.target, cursor, self.config.drag_speed * env.time.dt);
        if let Some(joint) = grab.joint {
            env.physics.set_joint_target(joint, grab.target);
        }
    }
}

impl Ability for Telekinesis {
    fn kind(&self) -> AbilityKind {
        AbilityKind::Telekinesis
    }

    fn initialize(&mut self, owner: Option<Actor>, _stats: &PlayerStats) {
        self.owner = owner;
    }

    fn on_unequip(&mut self, env: &mut AbilityEnv<'_>, stats: &mut PlayerStats) {
        self.release(env, stats);
    }

    fn on_passive_applied(&mut self, apply: &dyn Fn(&mut MovementStats)) {
        if let Some(grab) = &mut self.grab {
            grab.frozen_movement.rebase(apply);
        }
    }

    fn frame_tick(&mut self, env: &mut AbilityEnv<'_>, stats: &mut PlayerStats) {
        if env.input.primary_just_pressed() {
            self.try_grab(env, stats);
        }
        if env.input.primary_just_released() {
            self.release(env, stats);
        }
        if env.input.secondary_just_pressed() {
            self.try_break(env, stats);
        }
        self.drag(env);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::input::Action;
    use crate::engine::physics::{PhysicsQuery, RigidBodyHandle};
    use crate::game::abilities::test_support::Harness;
    use crate::game::objects::BreakableObject;
    use approx::assert_relative_eq;

    const PROP_POS: Vec2 = Vec2::new(3.0, 0.0);

    fn setup() -> (Harness, Telekinesis, PlayerStats, RigidBodyHandle) {
        let mut h = Harness::new();
        let prop = h.physics.add_body(PROP_POS, 2.0, 0.5);
        h.physics
            .add_collider(prop, Vec2::ZERO, Vec2::splat(0.5), Layer::Grabbable);

        let stats = PlayerStats::default();
        let mut ability = Telekinesis::new(TelekinesisConfig::DEFAULT);
        ability.initialize(Some(h.player), &stats);
        (h, ability, stats, prop)
    }

    fn press_primary_at(
        h: &mut Harness,
        ability: &mut Telekinesis,
        stats: &mut PlayerStats,
        at: Vec2,
    ) {
        h.cursor_at(at);
        h.input.press(Action::Primary);
        ability.frame_tick(&mut h.env(), stats);
    }

    #[test]
    fn test_grab_freezes_player_and_holds_object() {
        let (mut h, mut ability, mut stats, prop) = setup();

        press_primary_at(&mut h, &mut ability, &mut stats, PROP_POS);

        assert_eq!(ability.grabbed_body(), Some(prop));
        assert_eq!(h.physics.body_linear_damping(prop), Some(50.0));
        assert_eq!(stats.runtime.walk_speed, 0.0);
        assert_eq!(stats.runtime.run_speed, 0.0);
        assert_eq!(stats.runtime.air_acceleration, 0.0);
        assert_eq!(stats.runtime.run_air_acceleration, 0.0);
        assert_eq!(h.physics.ignored_pair_count(), 1);
        assert!(h.physics.is_collision_ignored(
            h.player.collider,
            h.physics.body_colliders(prop)[0]
        ));

        let joint = h.physics.joint(JointId(0)).unwrap();
        assert_eq!(joint.body, prop);
        assert_relative_eq!(joint.params.max_force, 2000.0);
        assert_relative_eq!(joint.params.frequency, 10.0);
    }

    #[test]
    fn test_grab_release_round_trip() {
        let (mut h, mut ability, mut stats, prop) = setup();
        stats.runtime.walk_speed = 7.5;
        let before = stats.clone();

        press_primary_at(&mut h, &mut ability, &mut stats, PROP_POS);
        h.advance(0.016);
        h.input.release(Action::Primary);
        ability.frame_tick(&mut h.env(), &mut stats);

        assert!(!ability.is_grabbing());
        assert_eq!(stats, before);
        assert_eq!(h.physics.body_linear_damping(prop), Some(0.5));
        assert_eq!(h.physics.ignored_pair_count(), 0);
        assert_eq!(h.physics.joint_count(), 0);
    }

    #[test]
    fn test_target_follows_cursor_at_constant_speed() {
        let (mut h, mut ability, mut stats, _) = setup();
        press_primary_at(&mut h, &mut ability, &mut stats, PROP_POS);

        h.advance(0.1);
        h.cursor_at(Vec2::new(13.0, 0.0));
        ability.frame_tick(&mut h.env(), &mut stats);

        // 20 units/s for 0.1 s, regardless of mass
        let target = h.physics.joint(JointId(0)).unwrap().target;
        assert_relative_eq!(target.x, 5.0, epsilon = 1e-3);
        assert_relative_eq!(target.y, 0.0, epsilon = 1e-3);
    }

    #[test]
    fn test_still_cursor_stops_object() {
        let (mut h, mut ability, mut stats, prop) = setup();
        press_primary_at(&mut h, &mut ability, &mut stats, PROP_POS);

        h.advance(0.016);
        h.physics.set_body_velocity(prop, Vec2::new(4.0, -1.0));
        h.physics.set_body_angular_velocity(prop, 2.0);
        ability.frame_tick(&mut h.env(), &mut stats);

        let body = h.physics.body(prop).unwrap();
        assert_eq!(body.velocity, Vec2::ZERO);
        assert_eq!(body.angular_velocity, 0.0);
    }

    #[test]
    fn test_miss_changes_nothing() {
        let (mut h, mut ability, mut stats, _) = setup();
        let before = stats.clone();

        press_primary_at(&mut h, &mut ability, &mut stats, Vec2::new(-4.0, 4.0));

        assert!(!ability.is_grabbing());
        assert_eq!(stats, before);
        assert_eq!(h.physics.joint_count(), 0);
    }

    #[test]
    fn test_ground_is_not_grabbable() {
        let (mut h, mut ability, mut stats, _) = setup();
        h.add_ground(-1.0);

        press_primary_at(&mut h, &mut ability, &mut stats, Vec2::new(0.0, -1.5));

        assert!(!ability.is_grabbing());
    }

    #[test]
    fn test_no_camera_no_grab() {
        let (mut h, mut ability, mut stats, _) = setup();
        h.camera = None;

        press_primary_at(&mut h, &mut ability, &mut stats, PROP_POS);

        assert!(!ability.is_grabbing());
    }

    #[test]
    fn test_unequip_releases() {
        let (mut h, mut ability, mut stats, prop) = setup();
        let before = stats.clone();
        press_primary_at(&mut h, &mut ability, &mut stats, PROP_POS);

        ability.on_unequip(&mut h.env(), &mut stats);

        assert!(!ability.is_grabbing());
        assert_eq!(stats, before);
        assert_eq!(h.physics.body_linear_damping(prop), Some(0.5));
        assert_eq!(h.physics.joint_count(), 0);
    }

    #[test]
    fn test_secondary_breaks_breakable_object() {
        let (mut h, mut ability, mut stats, prop) = setup();
        let colliders = h.physics.body_colliders(prop);
        h.objects
            .insert(Box::new(BreakableObject::new("crate", prop)), &colliders, Some(prop));
        let before = stats.clone();
        press_primary_at(&mut h, &mut ability, &mut stats, PROP_POS);

        h.advance(0.016);
        h.input.press(Action::Secondary);
        ability.frame_tick(&mut h.env(), &mut stats);

        assert!(!ability.is_grabbing());
        assert_eq!(stats, before);
        assert!(h.physics.body_position(prop).is_none());
        assert!(h.objects.is_empty());
    }

    #[test]
    fn test_secondary_ignores_unbreakable_object() {
        let (mut h, mut ability, mut stats, prop) = setup();
        press_primary_at(&mut h, &mut ability, &mut stats, PROP_POS);

        h.advance(0.016);
        h.input.press(Action::Secondary);
        ability.frame_tick(&mut h.env(), &mut stats);

        assert_eq!(ability.grabbed_body(), Some(prop));
    }
}
