use thiserror::Error;

use super::AbilityKind;

/// Invalid ability tunables, caught when a definition is validated
#[derive(Debug, Error, Clone, PartialEq)]
pub enum AbilityError {
    #[error("ability name must not be empty")]
    EmptyName,

    #[error("ability '{ability}': {field} must be positive, got {value}")]
    NotPositive {
        ability: String,
        field: &'static str,
        value: f32,
    },

    #[error("ability '{ability}': {field} must not be negative, got {value}")]
    Negative {
        ability: String,
        field: &'static str,
        value: f32,
    },

    #[error("ability '{ability}': jump height ratio {value} is outside (0, 1]")]
    RatioOutOfRange { ability: String, value: f32 },

    #[error("ability '{ability}': total jumps must be at least 1, got {value}")]
    InvalidJumpBudget { ability: String, value: i32 },

    #[error("ability '{ability}': {kind} has an empty layer mask for {field}")]
    EmptyMask {
        ability: String,
        kind: AbilityKind,
        field: &'static str,
    },

    #[error("duplicate ability name '{0}' in catalog")]
    DuplicateName(String),

    #[error("ability '{name}': catalog already has a {kind} ability")]
    DuplicateKind { name: String, kind: AbilityKind },
}
