// Physics queries and body control, as seen by gameplay code

use glam::Vec2;

use super::collision::LayerMask;
use super::{ColliderHandle, RigidBodyHandle};

/// A collider found by a point or shape query
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColliderHit {
    pub collider: ColliderHandle,
    /// Body the collider is attached to, if any
    pub body: Option<RigidBodyHandle>,
}

/// Result of a ray query
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    pub collider: ColliderHandle,
    /// World-space impact point
    pub point: Vec2,
    /// Distance travelled along the ray
    pub distance: f32,
}

/// Axis-aligned bounds of a collider
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub center: Vec2,
    pub half_extents: Vec2,
}

impl Bounds {
    pub fn size(&self) -> Vec2 {
        self.half_extents * 2.0
    }

    pub fn contains(&self, point: Vec2) -> bool {
        let d = (point - self.center).abs();
        d.x <= self.half_extents.x && d.y <= self.half_extents.y
    }
}

/// Identifies a draggable target joint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct JointId(pub u32);

/// Spring settings for a target joint
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TargetJointParams {
    /// Maximum force the joint may apply
    pub max_force: f32,
    /// Oscillation frequency in Hz
    pub frequency: f32,
    /// 1.0 = critically damped
    pub damping_ratio: f32,
}

/// Everything abilities need from the physics simulation
///
/// All queries are synchronous snapshots of the current world state.
/// Operations on unknown handles are ignored (getters return `None`).
pub trait PhysicsQuery {
    /// First non-sensor collider on `mask` containing `point`
    fn point_query(&self, point: Vec2, mask: LayerMask) -> Option<ColliderHit>;

    /// First non-sensor collider on `mask` overlapping a circle
    fn overlap_circle(&self, center: Vec2, radius: f32, mask: LayerMask) -> Option<ColliderHandle>;

    /// True if any non-sensor collider on `mask` overlaps the box, ignoring `exclude`'s colliders
    fn overlap_box(
        &self,
        center: Vec2,
        half_extents: Vec2,
        mask: LayerMask,
        exclude: Option<RigidBodyHandle>,
    ) -> bool;

    /// Cast a ray; `direction` must be normalized
    fn raycast(
        &self,
        origin: Vec2,
        direction: Vec2,
        max_distance: f32,
        mask: LayerMask,
    ) -> Option<RayHit>;

    fn collider_bounds(&self, collider: ColliderHandle) -> Option<Bounds>;
    fn collider_layers(&self, collider: ColliderHandle) -> LayerMask;
    fn collider_body(&self, collider: ColliderHandle) -> Option<RigidBodyHandle>;
    fn body_colliders(&self, body: RigidBodyHandle) -> Vec<ColliderHandle>;

    fn body_position(&self, body: RigidBodyHandle) -> Option<Vec2>;
    fn set_body_position(&mut self, body: RigidBodyHandle, position: Vec2);
    fn body_velocity(&self, body: RigidBodyHandle) -> Option<Vec2>;
    fn set_body_velocity(&mut self, body: RigidBodyHandle, velocity: Vec2);
    fn set_body_angular_velocity(&mut self, body: RigidBodyHandle, angvel: f32);
    fn body_linear_damping(&self, body: RigidBodyHandle) -> Option<f32>;
    fn set_body_linear_damping(&mut self, body: RigidBodyHandle, damping: f32);
    fn body_mass(&self, body: RigidBodyHandle) -> Option<f32>;
    fn set_body_gravity_scale(&mut self, body: RigidBodyHandle, scale: f32);

    /// Enable or disable contacts between exactly these two colliders
    fn set_collision_ignored(&mut self, a: ColliderHandle, b: ColliderHandle, ignored: bool);
    fn is_collision_ignored(&self, a: ColliderHandle, b: ColliderHandle) -> bool;

    /// Attach a spring that pulls `world_anchor` on `body` toward `target`
    fn create_target_joint(
        &mut self,
        body: RigidBodyHandle,
        world_anchor: Vec2,
        target: Vec2,
        params: TargetJointParams,
    ) -> Option<JointId>;
    fn set_joint_target(&mut self, joint: JointId, target: Vec2);
    fn remove_joint(&mut self, joint: JointId);

    /// Spawn a weightless projectile sensor; returns its body and collider
    fn spawn_orb(
        &mut self,
        position: Vec2,
        velocity: Vec2,
        radius: f32,
    ) -> Option<(RigidBodyHandle, ColliderHandle)>;

    /// Remove a body, its colliders and any joints attached to it
    fn despawn_body(&mut self, body: RigidBodyHandle);

    /// Move a collider to different collision layers
    fn set_collider_layer(&mut self, collider: ColliderHandle, layer: super::Layer);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds_contains() {
        let bounds = Bounds {
            center: Vec2::new(1.0, 1.0),
            half_extents: Vec2::new(0.5, 1.0),
        };
        assert!(bounds.contains(Vec2::new(1.4, 1.9)));
        assert!(!bounds.contains(Vec2::new(1.6, 1.0)));
        assert_eq!(bounds.size(), Vec2::new(1.0, 2.0));
    }
}
