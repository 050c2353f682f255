use glam::Vec2;
use log::debug;
use rapier2d::parry::shape::{Ball, Cuboid};
use rapier2d::prelude::*;
use std::collections::HashMap;

use crate::engine::game_loop::FIXED_TIMESTEP;

use super::body::presets;
use super::collision::{
    CollisionEvent as GameCollisionEvent, CollisionEventQueue, ContactFilter, Layer, LayerMask,
};
use super::joint::TargetJoint;
use super::query::{Bounds, ColliderHit, JointId, PhysicsQuery, RayHit, TargetJointParams};

/// Downward gravity of the default world (m/s²)
pub const STANDARD_GRAVITY: Real = 9.81;

/// Handle to identify rigid bodies
pub type RigidBodyHandle = rapier2d::prelude::RigidBodyHandle;

/// Handle to identify colliders
pub type ColliderHandle = rapier2d::prelude::ColliderHandle;

fn to_point(v: Vec2) -> Point<Real> {
    point![v.x, v.y]
}

fn to_vec2(v: &Vector<Real>) -> Vec2 {
    Vec2::new(v.x, v.y)
}

/// Physics world that manages all physics simulation
pub struct PhysicsWorld {
    /// Gravity vector (default: -9.81 m/s² in y-axis)
    gravity: Vector<Real>,

    /// Integration parameters for the physics simulation
    integration_parameters: IntegrationParameters,

    /// Physics pipeline handles collision detection and solving
    physics_pipeline: PhysicsPipeline,

    /// Island manager for sleeping bodies
    island_manager: IslandManager,

    /// Broad phase collision detection
    broad_phase: DefaultBroadPhase,

    /// Narrow phase collision detection
    narrow_phase: NarrowPhase,

    /// Impulse joint set
    impulse_joint_set: ImpulseJointSet,

    /// Multibody joint set
    multibody_joint_set: MultibodyJointSet,

    /// CCD solver for fast-moving objects
    ccd_solver: CCDSolver,

    /// Query pipeline for raycasts and shape casts
    query_pipeline: QueryPipeline,

    /// Rigid body set
    rigid_body_set: RigidBodySet,

    /// Collider set
    collider_set: ColliderSet,

    /// Collision event handler
    collision_event_queue: CollisionEventQueue,

    /// Pairs of colliders that must not touch
    contact_filter: ContactFilter,

    /// Draggable target joints, applied before each step
    target_joints: HashMap<JointId, TargetJoint>,
    next_joint_id: u32,
}

impl PhysicsWorld {
    /// Create a new physics world with default settings
    pub fn new() -> Self {
        Self::with_gravity(vector![0.0, -STANDARD_GRAVITY])
    }

    /// Create a new physics world with custom gravity
    pub fn with_gravity(gravity: Vector<Real>) -> Self {
        let mut integration_parameters = IntegrationParameters::default();
        integration_parameters.dt = FIXED_TIMESTEP;

        Self {
            gravity,
            integration_parameters,
            physics_pipeline: PhysicsPipeline::new(),
            island_manager: IslandManager::new(),
            broad_phase: DefaultBroadPhase::new(),
            narrow_phase: NarrowPhase::new(),
            impulse_joint_set: ImpulseJointSet::new(),
            multibody_joint_set: MultibodyJointSet::new(),
            ccd_solver: CCDSolver::new(),
            query_pipeline: QueryPipeline::new(),
            rigid_body_set: RigidBodySet::new(),
            collider_set: ColliderSet::new(),
            collision_event_queue: CollisionEventQueue::new(),
            contact_filter: ContactFilter::new(),
            target_joints: HashMap::new(),
            next_joint_id: 0,
        }
    }

    /// Step the physics simulation forward by one timestep
    pub fn step(&mut self) {
        self.collision_event_queue.clear();

        let dt = self.integration_parameters.dt;
        for joint in self.target_joints.values() {
            joint.apply(&mut self.rigid_body_set, dt);
        }

        self.physics_pipeline.step(
            &self.gravity,
            &self.integration_parameters,
            &mut self.island_manager,
            &mut self.broad_phase,
            &mut self.narrow_phase,
            &mut self.rigid_body_set,
            &mut self.collider_set,
            &mut self.impulse_joint_set,
            &mut self.multibody_joint_set,
            &mut self.ccd_solver,
            Some(&mut self.query_pipeline),
            &self.contact_filter,
            &self.collision_event_queue,
        );
    }

    /// Add a rigid body to the physics world
    pub fn add_rigid_body(&mut self, body: RigidBody) -> RigidBodyHandle {
        self.rigid_body_set.insert(body)
    }

    /// Add a collider attached to a rigid body
    pub fn add_collider(
        &mut self,
        collider: Collider,
        parent_handle: RigidBodyHandle,
    ) -> ColliderHandle {
        self.collider_set
            .insert_with_parent(collider, parent_handle, &mut self.rigid_body_set)
    }

    /// Remove a rigid body and all its attached colliders
    pub fn remove_rigid_body(&mut self, handle: RigidBodyHandle) {
        for collider in self.body_colliders(handle) {
            self.contact_filter.forget(collider);
        }
        self.target_joints.retain(|_, joint| joint.body != handle);
        self.rigid_body_set.remove(
            handle,
            &mut self.island_manager,
            &mut self.collider_set,
            &mut self.impulse_joint_set,
            &mut self.multibody_joint_set,
            true, // remove attached colliders
        );
    }

    /// Get all collision events from the last step
    pub fn get_collision_events(&self) -> Vec<GameCollisionEvent> {
        self.collision_event_queue.events()
    }

    /// Number of live target joints
    pub fn joint_count(&self) -> usize {
        self.target_joints.len()
    }
}

impl Default for PhysicsWorld {
    fn default() -> Self {
        Self::new()
    }
}

impl PhysicsQuery for PhysicsWorld {
    fn point_query(&self, point: Vec2, mask: LayerMask) -> Option<ColliderHit> {
        let mut found = None;
        self.query_pipeline.intersections_with_point(
            &self.rigid_body_set,
            &self.collider_set,
            &to_point(point),
            mask.query_filter(),
            |handle| {
                found = Some(handle);
                false // first hit is enough
            },
        );
        found.map(|collider| ColliderHit {
            collider,
            body: self.collider_body(collider),
        })
    }

    fn overlap_circle(&self, center: Vec2, radius: f32, mask: LayerMask) -> Option<ColliderHandle> {
        self.query_pipeline.intersection_with_shape(
            &self.rigid_body_set,
            &self.collider_set,
            &Isometry::translation(center.x, center.y),
            &Ball::new(radius),
            mask.query_filter(),
        )
    }

    fn overlap_box(
        &self,
        center: Vec2,
        half_extents: Vec2,
        mask: LayerMask,
        exclude: Option<RigidBodyHandle>,
    ) -> bool {
        let mut filter = mask.query_filter();
        if let Some(body) = exclude {
            filter = filter.exclude_rigid_body(body);
        }
        self.query_pipeline
            .intersection_with_shape(
                &self.rigid_body_set,
                &self.collider_set,
                &Isometry::translation(center.x, center.y),
                &Cuboid::new(vector![half_extents.x, half_extents.y]),
                filter,
            )
            .is_some()
    }

    fn raycast(
        &self,
        origin: Vec2,
        direction: Vec2,
        max_distance: f32,
        mask: LayerMask,
    ) -> Option<RayHit> {
        let ray = Ray::new(to_point(origin), vector![direction.x, direction.y]);
        self.query_pipeline
            .cast_ray(
                &self.rigid_body_set,
                &self.collider_set,
                &ray,
                max_distance,
                true,
                mask.query_filter(),
            )
            .map(|(collider, distance)| RayHit {
                collider,
                point: origin + direction * distance,
                distance,
            })
    }

    fn collider_bounds(&self, collider: ColliderHandle) -> Option<Bounds> {
        self.collider_set.get(collider).map(|c| {
            let aabb = c.compute_aabb();
            Bounds {
                center: Vec2::new(aabb.center().x, aabb.center().y),
                half_extents: to_vec2(&aabb.half_extents()),
            }
        })
    }

    fn collider_layers(&self, collider: ColliderHandle) -> LayerMask {
        self.collider_set
            .get(collider)
            .map(|c| LayerMask(c.collision_groups().memberships.bits()))
            .unwrap_or(LayerMask::NONE)
    }

    fn collider_body(&self, collider: ColliderHandle) -> Option<RigidBodyHandle> {
        self.collider_set.get(collider).and_then(|c| c.parent())
    }

    fn body_colliders(&self, body: RigidBodyHandle) -> Vec<ColliderHandle> {
        self.rigid_body_set
            .get(body)
            .map(|rb| rb.colliders().to_vec())
            .unwrap_or_default()
    }

    fn body_position(&self, body: RigidBodyHandle) -> Option<Vec2> {
        self.rigid_body_set
            .get(body)
            .map(|rb| to_vec2(rb.translation()))
    }

    fn set_body_position(&mut self, body: RigidBodyHandle, position: Vec2) {
        if let Some(rb) = self.rigid_body_set.get_mut(body) {
            rb.set_translation(vector![position.x, position.y], true);
        }
    }

    fn body_velocity(&self, body: RigidBodyHandle) -> Option<Vec2> {
        self.rigid_body_set.get(body).map(|rb| to_vec2(rb.linvel()))
    }

    fn set_body_velocity(&mut self, body: RigidBodyHandle, velocity: Vec2) {
        if let Some(rb) = self.rigid_body_set.get_mut(body) {
            rb.set_linvel(vector![velocity.x, velocity.y], true);
        }
    }

    fn set_body_angular_velocity(&mut self, body: RigidBodyHandle, angvel: f32) {
        if let Some(rb) = self.rigid_body_set.get_mut(body) {
            rb.set_angvel(angvel, true);
        }
    }

    fn body_linear_damping(&self, body: RigidBodyHandle) -> Option<f32> {
        self.rigid_body_set.get(body).map(|rb| rb.linear_damping())
    }

    fn set_body_linear_damping(&mut self, body: RigidBodyHandle, damping: f32) {
        if let Some(rb) = self.rigid_body_set.get_mut(body) {
            rb.set_linear_damping(damping);
        }
    }

    fn body_mass(&self, body: RigidBodyHandle) -> Option<f32> {
        self.rigid_body_set.get(body).map(|rb| rb.mass())
    }

    fn set_body_gravity_scale(&mut self, body: RigidBodyHandle, scale: f32) {
        if let Some(rb) = self.rigid_body_set.get_mut(body) {
            rb.set_gravity_scale(scale, true);
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
        let rb = self.rigid_body_set.get(body)?;
        let local_anchor = rb.position().inverse_transform_point(&to_point(world_anchor));

        let id = JointId(self.next_joint_id);
        self.next_joint_id += 1;
        self.target_joints
            .insert(id, TargetJoint::new(body, local_anchor, target, params));
        debug!("Created target joint {:?} on body {:?}", id, body);
        Some(id)
    }

    fn set_joint_target(&mut self, joint: JointId, target: Vec2) {
        if let Some(joint) = self.target_joints.get_mut(&joint) {
            joint.set_target(target);
        }
    }

    fn remove_joint(&mut self, joint: JointId) {
        if self.target_joints.remove(&joint).is_some() {
            debug!("Removed target joint {:?}", joint);
        }
    }

    fn spawn_orb(
        &mut self,
        position: Vec2,
        velocity: Vec2,
        radius: f32,
    ) -> Option<(RigidBodyHandle, ColliderHandle)> {
        let body = self.add_rigid_body(presets::orb_body(
            position.x, position.y, velocity.x, velocity.y,
        ));
        let collider = self.add_collider(presets::orb_collider(radius), body);
        Some((body, collider))
    }

    fn despawn_body(&mut self, body: RigidBodyHandle) {
        self.remove_rigid_body(body);
    }

    fn set_collider_layer(&mut self, collider: ColliderHandle, layer: Layer) {
        if let Some(c) = self.collider_set.get_mut(collider) {
            c.set_collision_groups(layer.to_interaction_groups());
        }
    }
}
