use glam::Vec2;
use rapier2d::prelude::*;
use std::f32::consts::TAU;

use super::query::TargetJointParams;

/// Spring-damper that drags one point of a body toward a world-space target
///
/// Solved implicitly each step so stiff settings stay stable at the fixed
/// timestep; the resulting impulse is clamped to `max_force * dt`.
#[derive(Debug, Clone)]
pub struct TargetJoint {
    pub body: RigidBodyHandle,
    /// Anchor in the body's local frame
    local_anchor: Point<Real>,
    target: Vec2,
    params: TargetJointParams,
}

impl TargetJoint {
    pub fn new(
        body: RigidBodyHandle,
        local_anchor: Point<Real>,
        target: Vec2,
        params: TargetJointParams,
    ) -> Self {
        Self {
            body,
            local_anchor,
            target,
            params,
        }
    }

    pub fn set_target(&mut self, target: Vec2) {
        self.target = target;
    }

    /// Apply this step's impulse to the body
    pub fn apply(&self, bodies: &mut RigidBodySet, dt: Real) {
        let Some(body) = bodies.get_mut(self.body) else {
            return;
        };
        let mass = body.mass();
        if mass <= 0.0 || dt <= 0.0 {
            return;
        }

        let anchor = body.position().transform_point(&self.local_anchor);
        let error = vector![self.target.x - anchor.x, self.target.y - anchor.y];
        let velocity = body.velocity_at_point(&anchor);

        let omega = TAU * self.params.frequency;
        let damping = 2.0 * self.params.damping_ratio * omega;
        let softness = dt * (omega * omega * dt + damping);
        let delta_v = (error * (dt * omega * omega) - velocity * softness) / (1.0 + softness);

        let mut impulse = delta_v * mass;
        let max_impulse = self.params.max_force * dt;
        let magnitude = impulse.norm();
        if magnitude > max_impulse && magnitude > 0.0 {
            impulse *= max_impulse / magnitude;
        }

        body.apply_impulse_at_point(impulse, anchor, true);
    }
}
