use super::collision::Layer;
use rapier2d::prelude::*;

pub use rapier2d::prelude::{ColliderHandle, RigidBodyHandle};

/// Builder for creating rigid bodies with common configurations
pub struct BodyBuilder {
    body_type: RigidBodyType,
    position: Isometry<Real>,
    linvel: Vector<Real>,
    gravity_scale: Real,
    linear_damping: Real,
    can_sleep: bool,
    ccd: bool,
    locked_axes: LockedAxes,
}

impl BodyBuilder {
    fn with_type(body_type: RigidBodyType) -> Self {
        Self {
            body_type,
            position: Isometry::identity(),
            linvel: Vector::zeros(),
            gravity_scale: 1.0,
            linear_damping: 0.0,
            can_sleep: true,
            ccd: false,
            locked_axes: LockedAxes::empty(),
        }
    }

    /// Create a new dynamic body (affected by forces and collisions)
    pub fn new_dynamic() -> Self {
        Self::with_type(RigidBodyType::Dynamic).linear_damping(0.5)
    }

    /// Create a new fixed (static) body (completely immovable)
    pub fn new_fixed() -> Self {
        Self::with_type(RigidBodyType::Fixed).gravity_scale(0.0)
    }

    /// Set the initial position of the body
    pub fn position(mut self, x: Real, y: Real) -> Self {
        self.position = Isometry::translation(x, y);
        self
    }

    /// Set the initial linear velocity
    pub fn linvel(mut self, x: Real, y: Real) -> Self {
        self.linvel = vector![x, y];
        self
    }

    /// Set the gravity scale (1.0 = normal gravity, 0.0 = no gravity)
    pub fn gravity_scale(mut self, scale: Real) -> Self {
        self.gravity_scale = scale;
        self
    }

    /// Set the linear damping ("drag")
    pub fn linear_damping(mut self, damping: Real) -> Self {
        self.linear_damping = damping;
        self
    }

    /// Set whether the body can sleep when inactive
    pub fn can_sleep(mut self, can_sleep: bool) -> Self {
        self.can_sleep = can_sleep;
        self
    }

    /// Enable continuous collision detection (fast projectiles)
    pub fn ccd(mut self, enabled: bool) -> Self {
        self.ccd = enabled;
        self
    }

    /// Lock rotation (useful for player characters)
    pub fn lock_rotation(mut self) -> Self {
        self.locked_axes = LockedAxes::ROTATION_LOCKED;
        self
    }

    /// Build the rigid body
    pub fn build(self) -> RigidBody {
        RigidBodyBuilder::new(self.body_type)
            .position(self.position)
            .linvel(self.linvel)
            .gravity_scale(self.gravity_scale)
            .linear_damping(self.linear_damping)
            .can_sleep(self.can_sleep)
            .ccd_enabled(self.ccd)
            .locked_axes(self.locked_axes)
            .build()
    }
}

/// Builder for creating colliders with common configurations
pub struct ColliderBuilder2D {
    shape: SharedShape,
    layer: Layer,
    is_sensor: bool,
    friction: Real,
    density: Real,
}

impl ColliderBuilder2D {
    fn with_shape(shape: SharedShape) -> Self {
        Self {
            shape,
            layer: Layer::Default,
            is_sensor: false,
            friction: 0.5,
            density: 1.0,
        }
    }

    /// Create a box-shaped collider
    pub fn box_shape(half_width: Real, half_height: Real) -> Self {
        Self::with_shape(SharedShape::cuboid(half_width, half_height))
    }

    /// Create a circle-shaped collider
    pub fn circle(radius: Real) -> Self {
        Self::with_shape(SharedShape::ball(radius))
    }

    /// Create a capsule-shaped collider (good for characters)
    pub fn capsule(half_height: Real, radius: Real) -> Self {
        Self::with_shape(SharedShape::capsule(
            point![0.0, -half_height],
            point![0.0, half_height],
            radius,
        ))
    }

    /// Set the collision layer
    pub fn layer(mut self, layer: Layer) -> Self {
        self.layer = layer;
        self
    }

    /// Make this a sensor (detects collisions but doesn't cause physical response)
    pub fn sensor(mut self, is_sensor: bool) -> Self {
        self.is_sensor = is_sensor;
        self
    }

    /// Set friction coefficient (0.0 = no friction, 1.0 = high friction)
    pub fn friction(mut self, friction: Real) -> Self {
        self.friction = friction;
        self
    }

    /// Set density (mass will be calculated from shape volume)
    pub fn density(mut self, density: Real) -> Self {
        self.density = density;
        self
    }

    /// Build the collider
    ///
    /// Every collider reports collision events and is routed through the
    /// contact filter so pairwise suppression works on any pair.
    pub fn build(self) -> Collider {
        rapier2d::prelude::ColliderBuilder::new(self.shape)
            .collision_groups(self.layer.to_interaction_groups())
            .sensor(self.is_sensor)
            .friction(self.friction)
            .density(self.density)
            .active_events(ActiveEvents::COLLISION_EVENTS)
            .active_hooks(ActiveHooks::FILTER_CONTACT_PAIRS)
            .build()
    }
}

/// Common rigid body configurations for game objects
pub mod presets {
    use super::*;

    /// Create a player character body (dynamic, rotation locked)
    pub fn player_body(x: Real, y: Real) -> RigidBody {
        BodyBuilder::new_dynamic()
            .position(x, y)
            .lock_rotation()
            .linear_damping(0.0)
            .can_sleep(false) // Players should never sleep
            .build()
    }

    /// Create a player character collider (capsule shape)
    pub fn player_collider(width: Real, height: Real) -> Collider {
        let radius = width / 2.0;
        let half_height = (height / 2.0) - radius;

        ColliderBuilder2D::capsule(half_height, radius)
            .layer(Layer::Player)
            .friction(0.0)
            .build()
    }

    /// Create a static slab of level geometry
    pub fn ground_body(x: Real, y: Real) -> RigidBody {
        BodyBuilder::new_fixed().position(x, y).build()
    }

    pub fn ground_collider(width: Real, height: Real) -> Collider {
        ColliderBuilder2D::box_shape(width / 2.0, height / 2.0)
            .layer(Layer::Ground)
            .friction(0.3)
            .build()
    }

    /// Create a movable prop (crates, boulders) that can be grabbed
    pub fn prop_body(x: Real, y: Real) -> RigidBody {
        BodyBuilder::new_dynamic().position(x, y).build()
    }

    pub fn prop_collider(width: Real, height: Real, density: Real) -> Collider {
        ColliderBuilder2D::box_shape(width / 2.0, height / 2.0)
            .layer(Layer::Grabbable)
            .density(density)
            .build()
    }

    /// Create a wizard orb body (no gravity, continuous collision)
    pub fn orb_body(x: Real, y: Real, vel_x: Real, vel_y: Real) -> RigidBody {
        BodyBuilder::new_dynamic()
            .position(x, y)
            .linvel(vel_x, vel_y)
            .gravity_scale(0.0)
            .linear_damping(0.0)
            .can_sleep(false)
            .ccd(true)
            .build()
    }

    /// Orbs are sensors: they report what they touch and resolve hits themselves
    pub fn orb_collider(radius: Real) -> Collider {
        ColliderBuilder2D::circle(radius)
            .layer(Layer::Projectile)
            .sensor(true)
            .density(0.1)
            .build()
    }

    /// Create a sensor collider on the given layer (pickups, trigger zones)
    pub fn sensor_collider(width: Real, height: Real, layer: Layer) -> Collider {
        ColliderBuilder2D::box_shape(width / 2.0, height / 2.0)
            .layer(layer)
            .sensor(true)
            .build()
    }
}
