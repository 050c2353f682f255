// Physics system using rapier2d

pub mod body;
mod collision;
mod joint;
mod query;
mod world;

#[cfg(test)]
pub mod testing;

pub use body::{presets, BodyBuilder, ColliderBuilder2D};
pub use collision::{CollisionEvent, ContactFilter, Layer, LayerMask};
pub use query::{Bounds, ColliderHit, JointId, PhysicsQuery, RayHit, TargetJointParams};
pub use world::{ColliderHandle, PhysicsWorld, RigidBodyHandle, STANDARD_GRAVITY};
