// Deterministic in-memory physics double for gameplay tests
//
// Every collider is an axis-aligned box, queries are exact, and nothing moves
// unless a test moves it. Handles are allocated sequentially so results are
// reproducible.

use glam::Vec2;
use std::collections::{BTreeMap, HashMap};

use super::collision::{ContactFilter, Layer, LayerMask};
use super::query::{Bounds, ColliderHit, JointId, PhysicsQuery, RayHit, TargetJointParams};
use super::{ColliderHandle, RigidBodyHandle};

#[derive(Debug, Clone)]
pub struct TestBody {
    pub position: Vec2,
    pub velocity: Vec2,
    pub angular_velocity: f32,
    pub linear_damping: f32,
    pub gravity_scale: f32,
    pub mass: f32,
    pub colliders: Vec<ColliderHandle>,
}

#[derive(Debug, Clone)]
pub struct TestCollider {
    pub body: RigidBodyHandle,
    pub offset: Vec2,
    pub half_extents: Vec2,
    pub layers: LayerMask,
    pub sensor: bool,
}

#[derive(Debug, Clone, Copy)]
pub struct TestJoint {
    pub body: RigidBodyHandle,
    pub anchor: Vec2,
    pub target: Vec2,
    pub params: TargetJointParams,
}

#[derive(Debug, Default)]
pub struct TestWorld {
    bodies: BTreeMap<u32, TestBody>,
    colliders: BTreeMap<u32, TestCollider>,
    contact_filter: ContactFilter,
    joints: HashMap<JointId, TestJoint>,
    next_body: u32,
    next_collider: u32,
    next_joint: u32,
}

fn body_key(handle: RigidBodyHandle) -> u32 {
    handle.into_raw_parts().0
}

fn collider_key(handle: ColliderHandle) -> u32 {
    handle.into_raw_parts().0
}

fn collider_handle(key: u32) -> ColliderHandle {
    ColliderHandle::from_raw_parts(key, 0)
}

impl TestWorld {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a body with no colliders
    pub fn add_body(&mut self, position: Vec2, mass: f32, linear_damping: f32) -> RigidBodyHandle {
        let key = self.next_body;
        self.next_body += 1;
        self.bodies.insert(
            key,
            TestBody {
                position,
                velocity: Vec2::ZERO,
                angular_velocity: 0.0,
                linear_damping,
                gravity_scale: 1.0,
                mass,
                colliders: Vec::new(),
            },
        );
        RigidBodyHandle::from_raw_parts(key, 0)
    }

    /// Attach a box collider to a body
    pub fn add_collider(
        &mut self,
        body: RigidBodyHandle,
        offset: Vec2,
        half_extents: Vec2,
        layer: Layer,
    ) -> ColliderHandle {
        let key = self.next_collider;
        self.next_collider += 1;
        self.colliders.insert(
            key,
            TestCollider {
                body,
                offset,
                half_extents,
                layers: layer.mask(),
                sensor: false,
            },
        );
        let handle = collider_handle(key);
        if let Some(b) = self.bodies.get_mut(&body_key(body)) {
            b.colliders.push(handle);
        }
        handle
    }

    /// Add a body with a single box collider centered on it
    pub fn add_box(
        &mut self,
        position: Vec2,
        half_extents: Vec2,
        layer: Layer,
    ) -> (RigidBodyHandle, ColliderHandle) {
        let body = self.add_body(position, 1.0, 0.0);
        let collider = self.add_collider(body, Vec2::ZERO, half_extents, layer);
        (body, collider)
    }

    pub fn body(&self, body: RigidBodyHandle) -> Option<&TestBody> {
        self.bodies.get(&body_key(body))
    }

    pub fn body_mut(&mut self, body: RigidBodyHandle) -> Option<&mut TestBody> {
        self.bodies.get_mut(&body_key(body))
    }

    pub fn joint(&self, joint: JointId) -> Option<&TestJoint> {
        self.joints.get(&joint)
    }

    pub fn joint_count(&self) -> usize {
        self.joints.len()
    }

    pub fn ignored_pair_count(&self) -> usize {
        self.contact_filter.len()
    }

    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }

    fn world_bounds(&self, collider: &TestCollider) -> Option<Bounds> {
        let body = self.bodies.get(&body_key(collider.body))?;
        Some(Bounds {
            center: body.position + collider.offset,
            half_extents: collider.half_extents,
        })
    }

    /// Non-sensor colliders on `mask`, in handle order
    fn candidates(&self, mask: LayerMask) -> impl Iterator<Item = (u32, &TestCollider)> + '_ {
        self.colliders
            .iter()
            .filter(move |(_, c)| !c.sensor && c.layers.intersects(mask))
            .map(|(k, c)| (*k, c))
    }
}

/// Slab test: distance along the ray to the box, 0.0 if the origin is inside
fn ray_box_distance(origin: Vec2, direction: Vec2, bounds: &Bounds) -> Option<f32> {
    let min = bounds.center - bounds.half_extents;
    let max = bounds.center + bounds.half_extents;
    let mut t_min = 0.0_f32;
    let mut t_max = f32::INFINITY;

    for axis in 0..2 {
        let (o, d, lo, hi) = (origin[axis], direction[axis], min[axis], max[axis]);
        if d.abs() <= f32::EPSILON {
            if o < lo || o > hi {
                return None;
            }
        } else {
            let t1 = (lo - o) / d;
            let t2 = (hi - o) / d;
            t_min = t_min.max(t1.min(t2));
            t_max = t_max.min(t1.max(t2));
            if t_min > t_max {
                return None;
            }
        }
    }
    Some(t_min)
}

impl PhysicsQuery for TestWorld {
    fn point_query(&self, point: Vec2, mask: LayerMask) -> Option<ColliderHit> {
        self.candidates(mask)
            .find(|(_, c)| self.world_bounds(c).is_some_and(|b| b.contains(point)))
            .map(|(key, c)| ColliderHit {
                collider: collider_handle(key),
                body: Some(c.body),
            })
    }

    fn overlap_circle(&self, center: Vec2, radius: f32, mask: LayerMask) -> Option<ColliderHandle> {
        self.candidates(mask)
            .find(|(_, c)| {
                self.world_bounds(c).is_some_and(|b| {
                    let closest =
                        center.clamp(b.center - b.half_extents, b.center + b.half_extents);
                    closest.distance(center) <= radius
                })
            })
            .map(|(key, _)| collider_handle(key))
    }

    fn overlap_box(
        &self,
        center: Vec2,
        half_extents: Vec2,
        mask: LayerMask,
        exclude: Option<RigidBodyHandle>,
    ) -> bool {
        self.candidates(mask)
            .filter(|(_, c)| Some(c.body) != exclude)
            .any(|(_, c)| {
                self.world_bounds(c).is_some_and(|b| {
                    let d = (b.center - center).abs();
                    d.x <= b.half_extents.x + half_extents.x
                        && d.y <= b.half_extents.y + half_extents.y
                })
            })
    }

    fn raycast(
        &self,
        origin: Vec2,
        direction: Vec2,
        max_distance: f32,
        mask: LayerMask,
    ) -> Option<RayHit> {
        self.candidates(mask)
            .filter_map(|(key, c)| {
                let bounds = self.world_bounds(c)?;
                let distance = ray_box_distance(origin, direction, &bounds)?;
                (distance <= max_distance).then_some((key, distance))
            })
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(key, distance)| RayHit {
                collider: collider_handle(key),
                point: origin + direction * distance,
                distance,
            })
    }

    fn collider_bounds(&self, collider: ColliderHandle) -> Option<Bounds> {
        let c = self.colliders.get(&collider_key(collider))?;
        self.world_bounds(c)
    }

    fn collider_layers(&self, collider: ColliderHandle) -> LayerMask {
        self.colliders
            .get(&collider_key(collider))
            .map(|c| c.layers)
            .unwrap_or(LayerMask::NONE)
    }

    fn collider_body(&self, collider: ColliderHandle) -> Option<RigidBodyHandle> {
        self.colliders.get(&collider_key(collider)).map(|c| c.body)
    }

    fn body_colliders(&self, body: RigidBodyHandle) -> Vec<ColliderHandle> {
        self.body(body)
            .map(|b| b.colliders.clone())
            .unwrap_or_default()
    }

    fn body_position(&self, body: RigidBodyHandle) -> Option<Vec2> {
        self.body(body).map(|b| b.position)
    }

    fn set_body_position(&mut self, body: RigidBodyHandle, position: Vec2) {
        if let Some(b) = self.body_mut(body) {
            b.position = position;
        }
    }

    fn body_velocity(&self, body: RigidBodyHandle) -> Option<Vec2> {
        self.body(body).map(|b| b.velocity)
    }

    fn set_body_velocity(&mut self, body: RigidBodyHandle, velocity: Vec2) {
        if let Some(b) = self.body_mut(body) {
            b.velocity = velocity;
        }
    }

    fn set_body_angular_velocity(&mut self, body: RigidBodyHandle, angvel: f32) {
        if let Some(b) = self.body_mut(body) {
            b.angular_velocity = angvel;
        }
    }

    fn body_linear_damping(&self, body: RigidBodyHandle) -> Option<f32> {
        self.body(body).map(|b| b.linear_damping)
    }

    fn set_body_linear_damping(&mut self, body: RigidBodyHandle, damping: f32) {
        if let Some(b) = self.body_mut(body) {
            b.linear_damping = damping;
        }
    }

    fn body_mass(&self, body: RigidBodyHandle) -> Option<f32> {
        self.body(body).map(|b| b.mass)
    }

    fn set_body_gravity_scale(&mut self, body: RigidBodyHandle, scale: f32) {
        if let Some(b) = self.body_mut(body) {
            b.gravity_scale = scale;
        }
    }

    fn set_collision_ignored(&mut self, a: ColliderHandle, b: ColliderHandle, ignored: bool) {
        self.contact_filter.set_ignored(a, b, ignored);
    }

    fn is_collision_ignored(&self, a: ColliderHandle, b: ColliderHandle) -> bool {
        self.contact_filter.is_ignored(a, b)
    }

    fn create_target_joint(
        &mut self,
        body: RigidBodyHandle,
        world_anchor: Vec2,
        target: Vec2,
        params: TargetJointParams,
    ) -> Option<JointId> {
        let position = self.body(body)?.position;
        let id = JointId(self.next_joint);
        self.next_joint += 1;
        self.joints.insert(
            id,
            TestJoint {
                body,
                anchor: world_anchor - position,
                target,
                params,
            },
        );
        Some(id)
    }

    fn set_joint_target(&mut self, joint: JointId, target: Vec2) {
        if let Some(j) = self.joints.get_mut(&joint) {
            j.target = target;
        }
    }

    fn remove_joint(&mut self, joint: JointId) {
        self.joints.remove(&joint);
    }

    fn spawn_orb(
        &mut self,
        position: Vec2,
        velocity: Vec2,
        radius: f32,
    ) -> Option<(RigidBodyHandle, ColliderHandle)> {
        let body = self.add_body(position, 0.1, 0.0);
        let collider = self.add_collider(body, Vec2::ZERO, Vec2::splat(radius), Layer::Projectile);
        if let Some(c) = self.colliders.get_mut(&collider_key(collider)) {
            c.sensor = true;
        }
        if let Some(b) = self.body_mut(body) {
            b.velocity = velocity;
        }
        Some((body, collider))
    }

    fn despawn_body(&mut self, body: RigidBodyHandle) {
        if let Some(removed) = self.bodies.remove(&body_key(body)) {
            for collider in removed.colliders {
                self.colliders.remove(&collider_key(collider));
                self.contact_filter.forget(collider);
            }
        }
        self.joints.retain(|_, j| j.body != body);
    }

    fn set_collider_layer(&mut self, collider: ColliderHandle, layer: Layer) {
        if let Some(c) = self.colliders.get_mut(&collider_key(collider)) {
            c.layers = layer.mask();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_raycast_hits_nearest_box() {
        let mut world = TestWorld::new();
        let (_, far) = world.add_box(Vec2::new(8.0, 0.0), Vec2::splat(0.5), Layer::Ground);
        let (_, near) = world.add_box(Vec2::new(4.0, 0.0), Vec2::splat(0.5), Layer::Ground);

        let hit = world
            .raycast(Vec2::ZERO, Vec2::X, 20.0, Layer::Ground.mask())
            .unwrap();
        assert_eq!(hit.collider, near);
        assert_relative_eq!(hit.distance, 3.5);
        assert_ne!(hit.collider, far);
    }

    #[test]
    fn test_raycast_respects_max_distance() {
        let mut world = TestWorld::new();
        world.add_box(Vec2::new(8.0, 0.0), Vec2::splat(0.5), Layer::Ground);
        assert!(world
            .raycast(Vec2::ZERO, Vec2::X, 5.0, Layer::Ground.mask())
            .is_none());
    }

    #[test]
    fn test_sensors_are_not_queried() {
        let mut world = TestWorld::new();
        world.spawn_orb(Vec2::ZERO, Vec2::X, 0.5);
        assert!(world.point_query(Vec2::ZERO, LayerMask::ALL).is_none());
    }
}
