// Wings flap: a bigger jump budget, with each chained air jump shorter
// than the last until the player lands again

use log::{debug, warn};

use super::definition::require_positive;
use super::error::AbilityError;
use super::{Ability, AbilityEnv, AbilityKind};
use crate::engine::physics::{Layer, LayerMask};
use crate::game::actor::Actor;
use crate::game::stats::{MovementStats, PlayerStats, StatField, StatOverride};

/// Fields owned by the ability while it is equipped
const JUMP_FIELDS: &[StatField] = &[
    StatField::MaxJumps,
    StatField::TimeTillJumpApex,
    StatField::MaxJumpHeight,
];

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WingsFlapConfig {
    /// Jump budget while equipped, ground jump included
    pub total_jumps: i32,
    pub time_till_jump_apex: f32,
    /// Share of the full jump height for the 1st, 2nd and 3rd+ air jump
    pub air_height_ratios: [f32; 3],
    pub ground_check_distance: f32,
    pub ground_layers: LayerMask,
}

impl WingsFlapConfig {
    pub const DEFAULT: Self = Self {
        total_jumps: 4,
        time_till_jump_apex: 0.6,
        air_height_ratios: [0.8, 0.6, 0.4],
        ground_check_distance: 0.1,
        ground_layers: Layer::Default
            .mask()
            .with(Layer::Ground.mask())
            .with(Layer::Grabbable.mask())
            .with(Layer::Ice.mask()),
    };

    pub(crate) fn validate(&self, ability: &str) -> Result<(), AbilityError> {
        if self.total_jumps < 1 {
            return Err(AbilityError::InvalidJumpBudget {
                ability: ability.to_string(),
                value: self.total_jumps,
            });
        }
        require_positive(ability, "time_till_jump_apex", self.time_till_jump_apex)?;
        require_positive(ability, "ground_check_distance", self.ground_check_distance)?;
        if self.ground_layers.is_empty() {
            return Err(AbilityError::EmptyMask {
                ability: ability.to_string(),
                kind: AbilityKind::WingsFlap,
                field: "ground_layers",
            });
        }

        for &ratio in &self.air_height_ratios {
            if !(ratio > 0.0 && ratio <= 1.0) {
                return Err(AbilityError::RatioOutOfRange {
                    ability: ability.to_string(),
                    value: ratio,
                });
            }
        }
        if self.air_height_ratios.windows(2).any(|w| w[1] >= w[0]) {
            warn!(
                "'{}': air jump ratios {:?} do not shrink with each flap",
                ability, self.air_height_ratios
            );
        }
        Ok(())
    }

    /// Height multiplier after `air_jumps` consecutive air jumps
    pub fn height_ratio(&self, air_jumps: u32) -> f32 {
        match air_jumps {
            0 => 1.0,
            1 => self.air_height_ratios[0],
            2 => self.air_height_ratios[1],
            _ => self.air_height_ratios[2],
        }
    }
}

impl Default for WingsFlapConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[derive(Debug)]
pub struct WingsFlap {
    config: WingsFlapConfig,
    owner: Option<Actor>,
    /// Present while equipped
    jump_override: Option<StatOverride>,
    air_jumps: u32,
}

impl WingsFlap {
    pub fn new(config: WingsFlapConfig) -> Self {
        Self {
            config,
            owner: None,
            jump_override: None,
            air_jumps: 0,
        }
    }

    pub fn air_jumps(&self) -> u32 {
        self.air_jumps
    }

    fn apply_height(&self, stats: &mut PlayerStats) {
        if let Some(jump_override) = &self.jump_override {
            stats.runtime.max_jump_height = jump_override.original().max_jump_height
                * self.config.height_ratio(self.air_jumps);
        }
    }
}

impl Ability for WingsFlap {
    fn kind(&self) -> AbilityKind {
        AbilityKind::WingsFlap
    }

    fn initialize(&mut self, owner: Option<Actor>, _stats: &PlayerStats) {
        if owner.is_none() {
            warn!("WingsFlap: no owner, ground checks will always fail");
        }
        self.owner = owner;
    }

    fn on_equip(&mut self, _env: &mut AbilityEnv<'_>, stats: &mut PlayerStats) {
        if let Some(previous) = self.jump_override.take() {
            previous.restore(&mut stats.runtime);
        }
        let total_jumps = self.config.total_jumps;
        let apex = self.config.time_till_jump_apex;
        self.jump_override = Some(StatOverride::acquire(&mut stats.runtime, JUMP_FIELDS, |s| {
            s.max_jumps = total_jumps;
            s.time_till_jump_apex = apex;
        }));
        self.air_jumps = 0;
    }

    fn on_unequip(&mut self, _env: &mut AbilityEnv<'_>, stats: &mut PlayerStats) {
        if let Some(jump_override) = self.jump_override.take() {
            jump_override.restore(&mut stats.runtime);
        }
        self.air_jumps = 0;
    }

    fn on_passive_applied(&mut self, apply: &dyn Fn(&mut MovementStats)) {
        if let Some(jump_override) = &mut self.jump_override {
            jump_override.rebase(apply);
        }
    }

    fn frame_tick(&mut self, env: &mut AbilityEnv<'_>, stats: &mut PlayerStats) {
        let grounded = self.owner.is_some_and(|owner| {
            owner.is_grounded(
                &*env.physics,
                self.config.ground_check_distance,
                self.config.ground_layers,
            )
        });

        if env.input.jump_just_pressed() {
            if grounded {
                self.air_jumps = 0;
            } else {
                self.air_jumps += 1;
            }
            debug!(
                "WingsFlap: jump (grounded: {}, air jumps: {})",
                grounded, self.air_jumps
            );
            self.apply_height(stats);
        } else if grounded && self.air_jumps > 0 {
            // Landed without jumping
            self.air_jumps = 0;
            self.apply_height(stats);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::input::Action;
    use crate::game::abilities::stat_modifier::{StatModifier, StatModifierConfig};
    use crate::game::abilities::test_support::Harness;
    use crate::game::stats::BASE_STATS;
    use approx::assert_relative_eq;
    use glam::Vec2;

    const ON_GROUND: Vec2 = Vec2::new(0.0, 1.0);
    const IN_AIR: Vec2 = Vec2::new(0.0, 6.0);

    fn setup() -> (Harness, WingsFlap, PlayerStats) {
        let mut h = Harness::new();
        h.add_ground(0.0);
        h.set_player_position(ON_GROUND);

        let mut stats = PlayerStats::default();
        let mut ability = WingsFlap::new(WingsFlapConfig::DEFAULT);
        ability.initialize(Some(h.player), &stats);
        ability.on_equip(&mut h.env(), &mut stats);
        (h, ability, stats)
    }

    /// Jump from `position` and return the resulting height ratio
    fn jump_from(
        h: &mut Harness,
        ability: &mut WingsFlap,
        stats: &mut PlayerStats,
        position: Vec2,
    ) -> f32 {
        h.advance(0.1);
        h.set_player_position(position);
        h.input.press(Action::Jump);
        ability.frame_tick(&mut h.env(), stats);
        h.input.release(Action::Jump);
        stats.runtime.max_jump_height / BASE_STATS.max_jump_height
    }

    #[test]
    fn test_equip_overrides_budget_and_apex() {
        let (_, _, stats) = setup();
        assert_eq!(stats.runtime.max_jumps, 4);
        assert_relative_eq!(stats.runtime.time_till_jump_apex, 0.6);
    }

    #[test]
    fn test_chained_air_jumps_shrink() {
        let (mut h, mut ability, mut stats) = setup();

        let ratios: Vec<f32> = [ON_GROUND, IN_AIR, IN_AIR, IN_AIR, IN_AIR]
            .into_iter()
            .map(|position| jump_from(&mut h, &mut ability, &mut stats, position))
            .collect();

        let expected = [1.0, 0.8, 0.6, 0.4, 0.4];
        for (ratio, expected) in ratios.iter().zip(expected) {
            assert_relative_eq!(*ratio, expected, epsilon = 1e-5);
        }
    }

    #[test]
    fn test_ground_jump_resets_ratio() {
        let (mut h, mut ability, mut stats) = setup();
        jump_from(&mut h, &mut ability, &mut stats, ON_GROUND);
        jump_from(&mut h, &mut ability, &mut stats, IN_AIR);
        jump_from(&mut h, &mut ability, &mut stats, IN_AIR);

        let ratio = jump_from(&mut h, &mut ability, &mut stats, ON_GROUND);

        assert_relative_eq!(ratio, 1.0);
        assert_eq!(ability.air_jumps(), 0);
    }

    #[test]
    fn test_landing_without_jump_resets_height() {
        let (mut h, mut ability, mut stats) = setup();
        jump_from(&mut h, &mut ability, &mut stats, IN_AIR);
        assert_eq!(ability.air_jumps(), 1);

        h.advance(0.1);
        h.set_player_position(ON_GROUND);
        ability.frame_tick(&mut h.env(), &mut stats);

        assert_eq!(ability.air_jumps(), 0);
        assert_relative_eq!(stats.runtime.max_jump_height, BASE_STATS.max_jump_height);
    }

    #[test]
    fn test_unequip_restores_all_jump_stats() {
        let (mut h, mut ability, mut stats) = setup();
        jump_from(&mut h, &mut ability, &mut stats, IN_AIR);

        ability.on_unequip(&mut h.env(), &mut stats);

        assert_eq!(stats, PlayerStats::default());
    }

    #[test]
    fn test_restore_keeps_passive_bonus() {
        let mut h = Harness::new();
        let mut stats = PlayerStats::default();
        StatModifier::new(StatModifierConfig {
            extra_jumps: 1,
            extra_dashes: 0,
        })
        .apply_stats(&mut stats.runtime);
        assert_eq!(stats.runtime.max_jumps, 2);

        let mut ability = WingsFlap::new(WingsFlapConfig::DEFAULT);
        ability.initialize(Some(h.player), &stats);
        ability.on_equip(&mut h.env(), &mut stats);
        assert_eq!(stats.runtime.max_jumps, 4);

        ability.on_unequip(&mut h.env(), &mut stats);
        assert_eq!(stats.runtime.max_jumps, 2);
    }

    #[test]
    fn test_passive_unlocked_while_equipped_survives_restore() {
        let (mut h, mut ability, mut stats) = setup();
        let modifier = StatModifier::new(StatModifierConfig {
            extra_jumps: 1,
            extra_dashes: 0,
        });

        modifier.apply_stats(&mut stats.runtime);
        ability.on_passive_applied(&|s| modifier.add_deltas(s));
        assert_eq!(stats.runtime.max_jumps, 5);

        ability.on_unequip(&mut h.env(), &mut stats);
        assert_eq!(stats.runtime.max_jumps, 2);
    }

    #[test]
    fn test_validation() {
        let bad_ratio = WingsFlapConfig {
            air_height_ratios: [0.8, 1.2, 0.4],
            ..WingsFlapConfig::DEFAULT
        };
        assert!(matches!(
            bad_ratio.validate("Wings"),
            Err(AbilityError::RatioOutOfRange { .. })
        ));

        let no_jumps = WingsFlapConfig {
            total_jumps: 0,
            ..WingsFlapConfig::DEFAULT
        };
        assert!(matches!(
            no_jumps.validate("Wings"),
            Err(AbilityError::InvalidJumpBudget { value: 0, .. })
        ));

        // Growing ratios only warn
        let growing = WingsFlapConfig {
            air_height_ratios: [0.4, 0.6, 0.8],
            ..WingsFlapConfig::DEFAULT
        };
        assert!(growing.validate("Wings").is_ok());
    }
}
