use rapier2d::prelude::*;
use std::collections::HashSet;
use std::sync::{Arc, Mutex};

/// Collision layers a collider can belong to
///
/// Abilities never hardcode what they hit; every query takes a [`LayerMask`]
/// built from these layers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Layer {
    /// Default group - interacts with everything
    Default = 0b0000_0001,

    /// Player characters
    Player = 0b0000_0010,

    /// Static level geometry (floors, walls)
    Ground = 0b0000_0100,

    /// Props that telekinesis can pick up
    Grabbable = 0b0000_1000,

    /// Wizard orbs
    Projectile = 0b0001_0000,

    /// Melted water walls - passable
    Water = 0b0010_0000,

    /// Frozen water walls - solid
    Ice = 0b0100_0000,

    /// Ability pickups (sensors)
    Pickup = 0b1000_0000,
}

impl Layer {
    /// Mask containing only this layer
    pub const fn mask(self) -> LayerMask {
        LayerMask(self as u32)
    }

    /// Which layers this layer physically collides with
    fn collides_with(self) -> LayerMask {
        match self {
            Layer::Player => LayerMask::of(&[
                Layer::Default,
                Layer::Ground,
                Layer::Grabbable,
                Layer::Ice,
                Layer::Pickup,
            ]),
            Layer::Projectile => LayerMask::ALL.without(Layer::Projectile.mask()),
            Layer::Water => LayerMask::of(&[Layer::Projectile, Layer::Grabbable]),
            Layer::Pickup => Layer::Player.mask(),
            _ => LayerMask::ALL,
        }
    }

    /// Convert to rapier2d's InteractionGroups
    pub fn to_interaction_groups(self) -> InteractionGroups {
        InteractionGroups::new(self.mask().to_group(), self.collides_with().to_group())
    }
}

/// Bit set of [`Layer`]s used to filter queries and collisions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct LayerMask(pub u32);

impl LayerMask {
    pub const NONE: LayerMask = LayerMask(0);
    pub const ALL: LayerMask = LayerMask(u32::MAX);

    /// Build a mask from a list of layers
    pub fn of(layers: &[Layer]) -> Self {
        layers
            .iter()
            .fold(Self::NONE, |mask, layer| mask.with(layer.mask()))
    }

    pub const fn with(self, other: LayerMask) -> Self {
        LayerMask(self.0 | other.0)
    }

    pub const fn without(self, other: LayerMask) -> Self {
        LayerMask(self.0 & !other.0)
    }

    /// True if the two masks share at least one layer
    pub const fn intersects(self, other: LayerMask) -> bool {
        self.0 & other.0 != 0
    }

    pub fn contains(self, layer: Layer) -> bool {
        self.intersects(layer.mask())
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn to_group(self) -> Group {
        Group::from_bits_truncate(self.0)
    }

    /// Query filter that only accepts non-sensor colliders on these layers
    pub fn query_filter(self) -> QueryFilter<'static> {
        QueryFilter::default()
            .exclude_sensors()
            .groups(InteractionGroups::new(Group::ALL, self.to_group()))
    }
}

impl From<Layer> for LayerMask {
    fn from(layer: Layer) -> Self {
        layer.mask()
    }
}

/// Custom collision event for game logic
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionEvent {
    /// Two colliders started touching
    Started {
        collider1: ColliderHandle,
        collider2: ColliderHandle,
    },

    /// Two colliders stopped touching
    Stopped {
        collider1: ColliderHandle,
        collider2: ColliderHandle,
    },
}

impl CollisionEvent {
    /// If this is a `Started` event involving `collider`, return the other collider
    pub fn started_with(&self, collider: ColliderHandle) -> Option<ColliderHandle> {
        match *self {
            CollisionEvent::Started {
                collider1,
                collider2,
            } if collider1 == collider => Some(collider2),
            CollisionEvent::Started {
                collider1,
                collider2,
            } if collider2 == collider => Some(collider1),
            _ => None,
        }
    }
}

/// Queue for storing collision events during physics step
pub struct CollisionEventQueue {
    events: Arc<Mutex<Vec<CollisionEvent>>>,
}

impl CollisionEventQueue {
    pub fn new() -> Self {
        Self {
            events: Arc::new(Mutex::new(Vec::with_capacity(32))),
        }
    }

    /// Clear all events (call at start of physics step)
    pub fn clear(&self) {
        if let Ok(mut events) = self.events.lock() {
            events.clear();
        }
    }

    /// Get all collision events from this step
    pub fn events(&self) -> Vec<CollisionEvent> {
        self.events
            .lock()
            .map(|events| events.clone())
            .unwrap_or_default()
    }

    fn push(&self, event: CollisionEvent) {
        if let Ok(mut events) = self.events.lock() {
            events.push(event);
        }
    }
}

impl Default for CollisionEventQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl EventHandler for CollisionEventQueue {
    fn handle_collision_event(
        &self,
        _bodies: &RigidBodySet,
        _colliders: &ColliderSet,
        event: rapier2d::prelude::CollisionEvent,
        _contact_pair: Option<&ContactPair>,
    ) {
        match event {
            rapier2d::prelude::CollisionEvent::Started(h1, h2, _flags) => {
                self.push(CollisionEvent::Started {
                    collider1: h1,
                    collider2: h2,
                });
            }
            rapier2d::prelude::CollisionEvent::Stopped(h1, h2, _flags) => {
                self.push(CollisionEvent::Stopped {
                    collider1: h1,
                    collider2: h2,
                });
            }
        }
    }

    fn handle_contact_force_event(
        &self,
        _dt: Real,
        _bodies: &RigidBodySet,
        _colliders: &ColliderSet,
        _contact_pair: &ContactPair,
        _total_force_magnitude: Real,
    ) {
    }
}

/// Pairwise contact suppression between specific colliders
///
/// Installed as the pipeline's physics hooks. Only colliders built with
/// `ActiveHooks::FILTER_CONTACT_PAIRS` are routed through it.
#[derive(Debug, Default)]
pub struct ContactFilter {
    ignored: HashSet<(ColliderHandle, ColliderHandle)>,
}

impl ContactFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable contacts between two colliders
    pub fn set_ignored(&mut self, a: ColliderHandle, b: ColliderHandle, ignored: bool) {
        if ignored {
            self.ignored.insert((a, b));
        } else {
            self.ignored.remove(&(a, b));
            self.ignored.remove(&(b, a));
        }
    }

    pub fn is_ignored(&self, a: ColliderHandle, b: ColliderHandle) -> bool {
        self.ignored.contains(&(a, b)) || self.ignored.contains(&(b, a))
    }

    /// Number of suppressed pairs
    pub fn len(&self) -> usize {
        self.ignored.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ignored.is_empty()
    }

    /// Forget every pair involving `collider` (used when bodies are removed)
    pub fn forget(&mut self, collider: ColliderHandle) {
        self.ignored
            .retain(|(a, b)| *a != collider && *b != collider);
    }
}

impl PhysicsHooks for ContactFilter {
    fn filter_contact_pair(&self, context: &PairFilterContext) -> Option<SolverFlags> {
        if self.is_ignored(context.collider1, context.collider2) {
            None
        } else {
            Some(SolverFlags::COMPUTE_IMPULSES)
        }
    }
}
