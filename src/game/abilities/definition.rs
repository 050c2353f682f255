// Ability definitions: presentation info plus kind-specific tunables

use super::error::AbilityError;
use super::{
    AbilityClass, AbilityKind, StatModifierConfig, TelekinesisConfig, TeleportConfig,
    WingsFlapConfig, WizardConfig,
};

/// Tunables for one ability kind
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AbilityConfig {
    StatModifier(StatModifierConfig),
    Telekinesis(TelekinesisConfig),
    Teleport(TeleportConfig),
    WingsFlap(WingsFlapConfig),
    Wizard(WizardConfig),
}

impl AbilityConfig {
    pub fn kind(&self) -> AbilityKind {
        match self {
            AbilityConfig::StatModifier(_) => AbilityKind::StatModifier,
            AbilityConfig::Telekinesis(_) => AbilityKind::Telekinesis,
            AbilityConfig::Teleport(_) => AbilityKind::Teleport,
            AbilityConfig::WingsFlap(_) => AbilityKind::WingsFlap,
            AbilityConfig::Wizard(_) => AbilityKind::Wizard,
        }
    }
}

/// Immutable description of an ability, instantiated on unlock
#[derive(Debug, Clone, PartialEq)]
pub struct AbilityDefinition {
    pub name: String,
    pub description: String,
    /// Icon asset name, for UI only
    pub icon: Option<String>,
    pub config: AbilityConfig,
}

impl AbilityDefinition {
    pub fn new(name: &str, config: AbilityConfig) -> Self {
        Self {
            name: name.to_string(),
            description: String::new(),
            icon: None,
            config,
        }
    }

    pub fn with_description(mut self, description: &str) -> Self {
        self.description = description.to_string();
        self
    }

    pub fn with_icon(mut self, icon: &str) -> Self {
        self.icon = Some(icon.to_string());
        self
    }

    pub fn kind(&self) -> AbilityKind {
        self.config.kind()
    }

    pub fn class(&self) -> AbilityClass {
        self.kind().class()
    }

    /// Check the tunables are usable
    pub fn validate(&self) -> Result<(), AbilityError> {
        if self.name.trim().is_empty() {
            return Err(AbilityError::EmptyName);
        }
        match &self.config {
            AbilityConfig::StatModifier(c) => c.validate(&self.name),
            AbilityConfig::Telekinesis(c) => c.validate(&self.name),
            AbilityConfig::Teleport(c) => c.validate(&self.name),
            AbilityConfig::WingsFlap(c) => c.validate(&self.name),
            AbilityConfig::Wizard(c) => c.validate(&self.name),
        }
    }

    // Standard definitions

    pub fn agility() -> Self {
        Self::new(
            "Mask of Agility",
            AbilityConfig::StatModifier(StatModifierConfig {
                extra_jumps: 1,
                extra_dashes: 1,
            }),
        )
        .with_description("One more jump and one dash before landing.")
        .with_icon("agility")
    }

    pub fn telekinesis() -> Self {
        Self::new("Telekinesis", AbilityConfig::Telekinesis(TelekinesisConfig::DEFAULT))
            .with_description("Grab props with the cursor and drag them around.")
            .with_icon("telekinesis")
    }

    pub fn teleport() -> Self {
        Self::new("Teleport", AbilityConfig::Teleport(TeleportConfig::DEFAULT))
            .with_description("Blink toward the cursor.")
            .with_icon("teleport")
    }

    pub fn wings_flap() -> Self {
        Self::new("Wings Flap", AbilityConfig::WingsFlap(WingsFlapConfig::DEFAULT))
            .with_description("Chain air jumps that get shorter each flap.")
            .with_icon("wings_flap")
    }

    pub fn wizard() -> Self {
        Self::new("Wizard", AbilityConfig::Wizard(WizardConfig::DEFAULT))
            .with_description("Cast fire with the primary action and ice with the secondary.")
            .with_icon("wizard")
    }
}

pub(crate) fn require_positive(
    ability: &str,
    field: &'static str,
    value: f32,
) -> Result<(), AbilityError> {
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(AbilityError::NotPositive {
            ability: ability.to_string(),
            field,
            value,
        })
    }
}

pub(crate) fn require_non_negative(
    ability: &str,
    field: &'static str,
    value: f32,
) -> Result<(), AbilityError> {
    if value >= 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(AbilityError::Negative {
            ability: ability.to_string(),
            field,
            value,
        })
    }
}
