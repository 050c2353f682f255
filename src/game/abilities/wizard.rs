// Wizard: fire orbs on the primary action, ice orbs on the secondary

use log::{debug, warn};

use super::definition::{require_non_negative, require_positive};
use super::error::AbilityError;
use super::{Ability, AbilityEnv, AbilityKind};
use crate::engine::physics::{Layer, LayerMask};
use crate::game::actor::Actor;
use crate::game::orb::{Element, OrbSettings};
use crate::game::stats::PlayerStats;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WizardConfig {
    pub orb_speed: f32,
    /// Seconds between two orbs of the same element
    pub fire_rate: f32,
    pub orb_radius: f32,
    pub orb_lifetime: f32,
    /// Layers that stop an orb
    pub orb_collision_layers: LayerMask,
    pub hit_effect: bool,
}

impl WizardConfig {
    pub const DEFAULT: Self = Self {
        orb_speed: 10.0,
        fire_rate: 0.5,
        orb_radius: 0.25,
        orb_lifetime: 5.0,
        orb_collision_layers: Layer::Default
            .mask()
            .with(Layer::Ground.mask())
            .with(Layer::Grabbable.mask())
            .with(Layer::Water.mask())
            .with(Layer::Ice.mask()),
        hit_effect: true,
    };

    pub(crate) fn validate(&self, ability: &str) -> Result<(), AbilityError> {
        require_positive(ability, "orb_speed", self.orb_speed)?;
        require_non_negative(ability, "fire_rate", self.fire_rate)?;
        require_positive(ability, "orb_radius", self.orb_radius)?;
        require_positive(ability, "orb_lifetime", self.orb_lifetime)?;
        if self.orb_collision_layers.is_empty() {
            return Err(AbilityError::EmptyMask {
                ability: ability.to_string(),
                kind: AbilityKind::Wizard,
                field: "orb_collision_layers",
            });
        }
        Ok(())
    }

    pub fn orb_settings(&self) -> OrbSettings {
        OrbSettings {
            speed: self.orb_speed,
            radius: self.orb_radius,
            lifetime: self.orb_lifetime,
            collision_layers: self.orb_collision_layers,
            hit_effect: self.hit_effect,
        }
    }
}

impl Default for WizardConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[derive(Debug)]
pub struct Wizard {
    config: WizardConfig,
    owner: Option<Actor>,
    last_fire: Option<f32>,
    last_ice: Option<f32>,
}

impl Wizard {
    pub fn new(config: WizardConfig) -> Self {
        Self {
            config,
            owner: None,
            last_fire: None,
            last_ice: None,
        }
    }

    fn ready(&self, last: Option<f32>, now: f32) -> bool {
        last.map_or(true, |last| now >= last + self.config.fire_rate)
    }

    /// Launch one orb toward the cursor. Returns true if it was spawned.
    fn cast(&self, env: &mut AbilityEnv<'_>, element: Element) -> bool {
        if env.input.pointer_over_ui() {
            return false;
        }
        let Some(owner) = self.owner else {
            warn!("Wizard: no owner to cast from");
            return false;
        };
        let Some(cursor) = env.cursor_world() else {
            warn!("Wizard: no camera to aim with");
            return false;
        };
        let Some(origin) = owner.position(&*env.physics) else {
            return false;
        };
        let direction = (cursor - origin).normalize_or_zero();
        if direction == glam::Vec2::ZERO {
            debug!("Wizard: cursor is on the player, no direction to cast");
            return false;
        }

        env.orbs
            .spawn(
                env.physics,
                element,
                origin,
                direction,
                self.config.orb_settings(),
                env.time.now,
            )
            .is_some()
    }
}

impl Ability for Wizard {
    fn kind(&self) -> AbilityKind {
        AbilityKind::Wizard
    }

    fn initialize(&mut self, owner: Option<Actor>, _stats: &PlayerStats) {
        self.owner = owner;
    }

    fn frame_tick(&mut self, env: &mut AbilityEnv<'_>, _stats: &mut PlayerStats) {
        let now = env.time.now;

        if env.input.primary_pressed()
            && self.ready(self.last_fire, now)
            && self.cast(env, Element::Fire)
        {
            self.last_fire = Some(now);
        }

        if env.input.secondary_pressed()
            && self.ready(self.last_ice, now)
            && self.cast(env, Element::Ice)
        {
            self.last_ice = Some(now);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::input::Action;
    use crate::engine::physics::PhysicsQuery;
    use crate::game::abilities::test_support::Harness;
    use approx::assert_relative_eq;
    use glam::Vec2;

    fn setup() -> (Harness, Wizard, PlayerStats) {
        let h = Harness::new();
        let stats = PlayerStats::default();
        let mut ability = Wizard::new(WizardConfig::DEFAULT);
        ability.initialize(Some(h.player), &stats);
        (h, ability, stats)
    }

    #[test]
    fn test_primary_casts_fire_toward_cursor() {
        let (mut h, mut ability, mut stats) = setup();
        h.cursor_at(Vec2::new(0.0, 4.0));
        h.input.press(Action::Primary);

        ability.frame_tick(&mut h.env(), &mut stats);

        let orb = *h.orbs.iter().next().unwrap();
        assert_eq!(orb.element, Element::Fire);
        let velocity = h.physics.body_velocity(orb.body).unwrap();
        assert_relative_eq!(velocity.x, 0.0, epsilon = 1e-4);
        assert_relative_eq!(velocity.y, 10.0, epsilon = 1e-4);
    }

    #[test]
    fn test_fire_rate_limits_held_casting() {
        let (mut h, mut ability, mut stats) = setup();
        h.cursor_at(Vec2::new(3.0, 0.0));
        h.input.press(Action::Primary);

        // Held for 1 s of 0.125 s frames: casts at 0.0, 0.5 and 1.0
        for _ in 0..9 {
            ability.frame_tick(&mut h.env(), &mut stats);
            h.advance(0.125);
        }

        assert_eq!(h.orbs.len(), 3);
    }

    #[test]
    fn test_elements_have_independent_timers() {
        let (mut h, mut ability, mut stats) = setup();
        h.cursor_at(Vec2::new(3.0, 0.0));
        h.input.press(Action::Primary);
        h.input.press(Action::Secondary);

        ability.frame_tick(&mut h.env(), &mut stats);

        let mut elements: Vec<Element> = h.orbs.iter().map(|orb| orb.element).collect();
        elements.sort_by_key(|e| *e == Element::Ice);
        assert_eq!(elements, vec![Element::Fire, Element::Ice]);
    }

    #[test]
    fn test_no_cast_over_ui() {
        let (mut h, mut ability, mut stats) = setup();
        h.cursor_at(Vec2::new(3.0, 0.0));
        h.input.press(Action::Primary);
        h.input.set_pointer_over_ui(true);
        ability.frame_tick(&mut h.env(), &mut stats);
        assert!(h.orbs.is_empty());

        // Leaving the UI casts right away, the blocked attempt did not start the timer
        h.advance(0.01);
        h.input.set_pointer_over_ui(false);
        ability.frame_tick(&mut h.env(), &mut stats);
        assert_eq!(h.orbs.len(), 1);
    }

    #[test]
    fn test_released_button_stops_casting() {
        let (mut h, mut ability, mut stats) = setup();
        h.cursor_at(Vec2::new(3.0, 0.0));

        ability.frame_tick(&mut h.env(), &mut stats);

        assert!(h.orbs.is_empty());
    }
}
