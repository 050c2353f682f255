// Ability system
//
// This module contains everything related to player abilities:
// - The `Ability` trait every variant implements
// - Definitions (name, classification, tunables) and their validation
// - The manager owning unlock/equip state and per-tick dispatch
// - One module per ability kind

pub mod catalog;
pub mod definition;
pub mod error;
pub mod manager;
pub mod stat_modifier;
pub mod telekinesis;
pub mod teleport;
pub mod wings_flap;
pub mod wizard;

// Re-export commonly used types
pub use catalog::AbilityCatalog;
pub use definition::{AbilityConfig, AbilityDefinition};
pub use error::AbilityError;
pub use manager::{AbilityEvent, AbilityManager, UnlockedAbility};
pub use stat_modifier::{StatModifier, StatModifierConfig};
pub use telekinesis::{Telekinesis, TelekinesisConfig};
pub use teleport::{Teleport, TeleportConfig};
pub use wings_flap::{WingsFlap, WingsFlapConfig};
pub use wizard::{Wizard, WizardConfig};

use glam::Vec2;
use std::fmt;

use crate::engine::camera::Camera;
use crate::engine::game_loop::FrameTime;
use crate::engine::input::InputSource;
use crate::engine::physics::PhysicsQuery;
use crate::game::actor::Actor;
use crate::game::objects::WorldObjects;
use crate::game::orb::OrbSet;
use crate::game::stats::{MovementStats, PlayerStats};

/// Identifies an ability; at most one of each kind can be unlocked
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AbilityKind {
    StatModifier,
    Telekinesis,
    Teleport,
    WingsFlap,
    Wizard,
}

impl AbilityKind {
    pub fn class(self) -> AbilityClass {
        match self {
            AbilityKind::StatModifier => AbilityClass::Passive,
            _ => AbilityClass::Active,
        }
    }
}

impl fmt::Display for AbilityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AbilityKind::StatModifier => "stat modifier",
            AbilityKind::Telekinesis => "telekinesis",
            AbilityKind::Teleport => "teleport",
            AbilityKind::WingsFlap => "wings flap",
            AbilityKind::Wizard => "wizard",
        };
        f.write_str(name)
    }
}

/// Passive abilities apply once on unlock; active ones get equipped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AbilityClass {
    Passive,
    Active,
}

/// Everything an ability may touch during a callback
pub struct AbilityEnv<'a> {
    pub physics: &'a mut dyn PhysicsQuery,
    pub input: &'a dyn InputSource,
    /// Needed to turn the cursor into a world position
    pub camera: Option<&'a Camera>,
    pub objects: &'a mut WorldObjects,
    pub orbs: &'a mut OrbSet,
    pub time: FrameTime,
}

impl AbilityEnv<'_> {
    /// Cursor position in world space, if a camera is available
    pub fn cursor_world(&self) -> Option<Vec2> {
        self.camera
            .map(|camera| camera.screen_to_world(self.input.cursor_position()))
    }
}

/// Behaviour shared by every ability kind
///
/// All callbacks default to doing nothing so each kind only overrides what
/// it needs. `on_unequip` must undo everything `on_equip` and the ticks did.
pub trait Ability {
    fn kind(&self) -> AbilityKind;

    /// Bind to the owning actor, once, right after unlock
    fn initialize(&mut self, _owner: Option<Actor>, _stats: &PlayerStats) {}

    fn on_equip(&mut self, _env: &mut AbilityEnv<'_>, _stats: &mut PlayerStats) {}

    fn on_unequip(&mut self, _env: &mut AbilityEnv<'_>, _stats: &mut PlayerStats) {}

    /// A passive bonus was added to the runtime stats while this ability is
    /// active. Anything it will later restore must include the bonus too.
    fn on_passive_applied(&mut self, _apply: &dyn Fn(&mut MovementStats)) {}

    /// Variable-rate tick: input, timers
    fn frame_tick(&mut self, _env: &mut AbilityEnv<'_>, _stats: &mut PlayerStats) {}

    /// Fixed-rate tick: body and joint mutation
    fn physics_tick(&mut self, _env: &mut AbilityEnv<'_>, _stats: &mut PlayerStats) {}
}

/// A live, unlocked ability
#[derive(Debug)]
pub enum AbilityInstance {
    StatModifier(StatModifier),
    Telekinesis(Telekinesis),
    Teleport(Teleport),
    WingsFlap(WingsFlap),
    Wizard(Wizard),
}

impl AbilityInstance {
    /// Build a fresh instance from its definition
    pub fn from_config(config: &AbilityConfig) -> Self {
        match config {
            AbilityConfig::StatModifier(c) => Self::StatModifier(StatModifier::new(*c)),
            AbilityConfig::Telekinesis(c) => Self::Telekinesis(Telekinesis::new(*c)),
            AbilityConfig::Teleport(c) => Self::Teleport(Teleport::new(*c)),
            AbilityConfig::WingsFlap(c) => Self::WingsFlap(WingsFlap::new(*c)),
            AbilityConfig::Wizard(c) => Self::Wizard(Wizard::new(*c)),
        }
    }

    pub fn class(&self) -> AbilityClass {
        self.kind().class()
    }

    pub fn as_ability(&self) -> &dyn Ability {
        match self {
            Self::StatModifier(a) => a,
            Self::Telekinesis(a) => a,
            Self::Teleport(a) => a,
            Self::WingsFlap(a) => a,
            Self::Wizard(a) => a,
        }
    }

    pub fn as_ability_mut(&mut self) -> &mut dyn Ability {
        match self {
            Self::StatModifier(a) => a,
            Self::Telekinesis(a) => a,
            Self::Teleport(a) => a,
            Self::WingsFlap(a) => a,
            Self::Wizard(a) => a,
        }
    }

    pub fn kind(&self) -> AbilityKind {
        self.as_ability().kind()
    }
}
