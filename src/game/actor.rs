// The physical presence abilities act on behalf of

use glam::Vec2;

use crate::engine::physics::{ColliderHandle, LayerMask, PhysicsQuery, RigidBodyHandle};

/// Physics handles of the actor that owns the abilities
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Actor {
    pub body: RigidBodyHandle,
    /// Main collider, used for ground checks
    pub collider: ColliderHandle,
}

impl Actor {
    pub fn new(body: RigidBodyHandle, collider: ColliderHandle) -> Self {
        Self { body, collider }
    }

    pub fn position(&self, physics: &dyn PhysicsQuery) -> Option<Vec2> {
        physics.body_position(self.body)
    }

    /// Look for ground in a thin strip just below the collider bounds
    pub fn is_grounded(
        &self,
        physics: &dyn PhysicsQuery,
        distance: f32,
        ground: LayerMask,
    ) -> bool {
        let Some(bounds) = physics.collider_bounds(self.collider) else {
            return false;
        };

        let half_depth = distance * 0.5;
        let center = Vec2::new(
            bounds.center.x,
            bounds.center.y - bounds.half_extents.y - half_depth,
        );
        // Slightly narrower so walls touching the sides do not count as ground
        let half_extents = Vec2::new(bounds.half_extents.x * 0.9, half_depth);

        physics.overlap_box(center, half_extents, ground, Some(self.body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::physics::testing::TestWorld;
    use crate::engine::physics::Layer;

    fn actor_at(world: &mut TestWorld, y: f32) -> Actor {
        let (body, collider) = world.add_box(Vec2::new(0.0, y), Vec2::new(0.5, 1.0), Layer::Player);
        Actor::new(body, collider)
    }

    #[test]
    fn test_grounded_when_standing_on_ground() {
        let mut world = TestWorld::new();
        world.add_box(Vec2::new(0.0, -0.5), Vec2::new(10.0, 0.5), Layer::Ground);
        let actor = actor_at(&mut world, 1.0);

        assert!(actor.is_grounded(&world, 0.1, Layer::Ground.mask()));
    }

    #[test]
    fn test_not_grounded_in_the_air() {
        let mut world = TestWorld::new();
        world.add_box(Vec2::new(0.0, -0.5), Vec2::new(10.0, 0.5), Layer::Ground);
        let actor = actor_at(&mut world, 3.0);

        assert!(!actor.is_grounded(&world, 0.1, Layer::Ground.mask()));
    }

    #[test]
    fn test_ground_check_respects_mask() {
        let mut world = TestWorld::new();
        world.add_box(Vec2::new(0.0, -0.5), Vec2::new(10.0, 0.5), Layer::Water);
        let actor = actor_at(&mut world, 1.0);

        assert!(!actor.is_grounded(&world, 0.1, Layer::Ground.mask()));
    }
}
