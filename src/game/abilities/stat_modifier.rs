// Passive ability: permanent extra jumps and dashes

use log::info;

use super::error::AbilityError;
use super::{Ability, AbilityKind};
use crate::game::stats::MovementStats;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StatModifierConfig {
    pub extra_jumps: i32,
    pub extra_dashes: i32,
}

impl StatModifierConfig {
    pub(crate) fn validate(&self, _ability: &str) -> Result<(), AbilityError> {
        // Negative deltas are allowed
        Ok(())
    }
}

/// Adds its deltas to the runtime stats once, on unlock
#[derive(Debug)]
pub struct StatModifier {
    config: StatModifierConfig,
}

impl StatModifier {
    pub fn new(config: StatModifierConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &StatModifierConfig {
        &self.config
    }

    pub fn apply_stats(&self, stats: &mut MovementStats) {
        self.add_deltas(stats);
        info!(
            "Stat modifier applied: {:+} jumps, {:+} dashes (now {} / {})",
            self.config.extra_jumps, self.config.extra_dashes, stats.max_jumps, stats.max_dashes
        );
    }

    /// The deltas alone, without logging
    pub fn add_deltas(&self, stats: &mut MovementStats) {
        stats.max_jumps += self.config.extra_jumps;
        stats.max_dashes += self.config.extra_dashes;
    }
}

impl Ability for StatModifier {
    fn kind(&self) -> AbilityKind {
        AbilityKind::StatModifier
    }
}
