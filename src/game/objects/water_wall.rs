// Water that fire and ice switch between passable and solid

use log::info;

use super::{Burnable, Freezable, WorldObject};
use crate::engine::physics::{ColliderHandle, Layer, PhysicsQuery};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WallState {
    /// Passable by the player
    Water,
    /// Solid, can be stood on
    Ice,
}

impl WallState {
    pub fn layer(self) -> Layer {
        match self {
            WallState::Water => Layer::Water,
            WallState::Ice => Layer::Ice,
        }
    }
}

/// A wall of water: freezing turns it to ice, burning melts it back
#[derive(Debug)]
pub struct WaterWall {
    collider: ColliderHandle,
    state: WallState,
}

impl WaterWall {
    /// Wrap a collider; the wall starts as water
    pub fn new(collider: ColliderHandle, physics: &mut dyn PhysicsQuery) -> Self {
        let mut wall = Self {
            collider,
            state: WallState::Water,
        };
        wall.set_state(WallState::Water, physics);
        wall
    }

    pub fn state(&self) -> WallState {
        self.state
    }

    pub fn collider(&self) -> ColliderHandle {
        self.collider
    }

    fn set_state(&mut self, state: WallState, physics: &mut dyn PhysicsQuery) {
        self.state = state;
        physics.set_collider_layer(self.collider, state.layer());
    }
}

impl Burnable for WaterWall {
    fn burn(&mut self, physics: &mut dyn PhysicsQuery) {
        self.set_state(WallState::Water, physics);
        info!("Water wall burned, it is water again");
    }
}

impl Freezable for WaterWall {
    fn freeze(&mut self, physics: &mut dyn PhysicsQuery) {
        self.set_state(WallState::Ice, physics);
        info!("Water wall frozen into ice");
    }
}

impl WorldObject for WaterWall {
    fn name(&self) -> &str {
        "water wall"
    }

    fn as_burnable(&mut self) -> Option<&mut dyn Burnable> {
        Some(self)
    }

    fn as_freezable(&mut self) -> Option<&mut dyn Freezable> {
        Some(self)
    }
}
