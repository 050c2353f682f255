// The set of ability definitions a level can hand out

use std::collections::HashSet;

use log::debug;

use super::{AbilityDefinition, AbilityError, AbilityKind};

/// Validated ability definitions with unique names
#[derive(Debug, Clone, Default)]
pub struct AbilityCatalog {
    definitions: Vec<AbilityDefinition>,
}

impl AbilityCatalog {
    /// Build a catalog, rejecting invalid tunables, duplicate names and
    /// duplicate kinds
    ///
    /// Only one ability per kind can ever be unlocked, so a second definition
    /// of a kind could never grant anything.
    pub fn new(definitions: Vec<AbilityDefinition>) -> Result<Self, AbilityError> {
        let mut names = HashSet::new();
        let mut kinds = HashSet::new();
        for definition in &definitions {
            definition.validate()?;
            if !names.insert(definition.name.as_str()) {
                return Err(AbilityError::DuplicateName(definition.name.clone()));
            }
            if !kinds.insert(definition.kind()) {
                return Err(AbilityError::DuplicateKind {
                    name: definition.name.clone(),
                    kind: definition.kind(),
                });
            }
        }
        debug!("Ability catalog loaded with {} definitions", definitions.len());
        Ok(Self { definitions })
    }

    /// Every built-in ability
    pub fn standard() -> Self {
        Self {
            definitions: vec![
                AbilityDefinition::agility(),
                AbilityDefinition::telekinesis(),
                AbilityDefinition::teleport(),
                AbilityDefinition::wings_flap(),
                AbilityDefinition::wizard(),
            ],
        }
    }

    /// The definition of `kind`
    pub fn get(&self, kind: AbilityKind) -> Option<&AbilityDefinition> {
        self.definitions.iter().find(|d| d.kind() == kind)
    }

    pub fn by_name(&self, name: &str) -> Option<&AbilityDefinition> {
        self.definitions.iter().find(|d| d.name == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &AbilityDefinition> {
        self.definitions.iter()
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}
