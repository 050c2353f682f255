// Ability manager: unlock list, the single active ability, per-tick dispatch

use log::{debug, info, warn};

use super::{AbilityClass, AbilityDefinition, AbilityEnv, AbilityInstance, AbilityKind};
use crate::game::actor::Actor;
use crate::game::stats::{MovementStats, PlayerStats};

/// Notifications for UI and other observers
#[derive(Debug, Clone, PartialEq)]
pub enum AbilityEvent {
    Unlocked {
        kind: AbilityKind,
        name: String,
        class: AbilityClass,
    },
    /// The previous active ability finished tearing down
    Unequipped(AbilityKind),
    /// The new active ability, or `None` when nothing is equipped
    Equipped(Option<AbilityKind>),
}

/// An unlocked ability and the definition it came from
#[derive(Debug)]
pub struct UnlockedAbility {
    pub definition: AbilityDefinition,
    pub instance: AbilityInstance,
}

impl UnlockedAbility {
    pub fn kind(&self) -> AbilityKind {
        self.instance.kind()
    }

    pub fn name(&self) -> &str {
        &self.definition.name
    }

    pub fn class(&self) -> AbilityClass {
        self.instance.class()
    }
}

/// Owns the player's abilities and stats
///
/// At most one ability per kind is unlocked. Passive abilities apply on
/// unlock and are never active; the active ability, if any, is always one of
/// the unlocked ones and is the only one that receives ticks.
#[derive(Debug)]
pub struct AbilityManager {
    owner: Option<Actor>,
    stats: PlayerStats,
    unlocked: Vec<UnlockedAbility>,
    /// Index into `unlocked`
    active: Option<usize>,
    events: Vec<AbilityEvent>,
}

impl AbilityManager {
    pub fn new(base: MovementStats, owner: Option<Actor>) -> Self {
        if owner.is_none() {
            warn!("Ability manager created without an owner, abilities will be inert");
        }
        Self {
            owner,
            stats: PlayerStats::new(base),
            unlocked: Vec::new(),
            active: None,
            events: Vec::new(),
        }
    }

    pub fn stats(&self) -> &PlayerStats {
        &self.stats
    }

    pub fn owner(&self) -> Option<Actor> {
        self.owner
    }

    /// Unlocked abilities in unlock order
    pub fn unlocked(&self) -> &[UnlockedAbility] {
        &self.unlocked
    }

    pub fn has_ability(&self, kind: AbilityKind) -> bool {
        self.unlocked.iter().any(|a| a.kind() == kind)
    }

    pub fn active_kind(&self) -> Option<AbilityKind> {
        self.active.map(|i| self.unlocked[i].kind())
    }

    pub fn active(&self) -> Option<&AbilityInstance> {
        self.active.map(|i| &self.unlocked[i].instance)
    }

    /// Events raised since the last call
    pub fn drain_events(&mut self) -> Vec<AbilityEvent> {
        std::mem::take(&mut self.events)
    }

    /// Grant an ability. Returns false if one of the same kind is already unlocked.
    ///
    /// Passive abilities apply their stat deltas now; active abilities are
    /// equipped right away.
    pub fn unlock(&mut self, definition: &AbilityDefinition, env: &mut AbilityEnv<'_>) -> bool {
        let kind = definition.kind();
        if self.has_ability(kind) {
            debug!("Ability {} already unlocked, ignoring '{}'", kind, definition.name);
            return false;
        }

        let mut instance = AbilityInstance::from_config(&definition.config);
        instance
            .as_ability_mut()
            .initialize(self.owner, &self.stats);

        if let AbilityInstance::StatModifier(modifier) = &instance {
            modifier.apply_stats(&mut self.stats.runtime);
            // The active ability may be holding a snapshot it will restore later
            if let Some(active) = self.active {
                self.unlocked[active]
                    .instance
                    .as_ability_mut()
                    .on_passive_applied(&|s| modifier.add_deltas(s));
            }
        }

        let class = instance.class();
        self.unlocked.push(UnlockedAbility {
            definition: definition.clone(),
            instance,
        });
        self.events.push(AbilityEvent::Unlocked {
            kind,
            name: definition.name.clone(),
            class,
        });
        info!("Unlocked ability: {}", definition.name);

        if class == AbilityClass::Active {
            self.equip(Some(self.unlocked.len() - 1), env);
        }
        true
    }

    /// Make the ability at `index` in [`Self::unlocked`] the active one, or
    /// clear it with `None`
    ///
    /// The current ability is fully torn down before the new one is set up.
    /// Equipping what is already active, a passive ability, or an index
    /// out of range does nothing.
    pub fn equip(&mut self, index: Option<usize>, env: &mut AbilityEnv<'_>) {
        if let Some(i) = index {
            match self.unlocked.get(i) {
                None => {
                    warn!("No unlocked ability at slot {}", i);
                    return;
                }
                Some(ability) if ability.class() == AbilityClass::Passive => {
                    debug!("'{}' is passive and cannot be equipped", ability.name());
                    return;
                }
                Some(_) => {}
            }
        }
        if index == self.active {
            return;
        }

        if let Some(current) = self.active.take() {
            let ability = &mut self.unlocked[current];
            ability
                .instance
                .as_ability_mut()
                .on_unequip(env, &mut self.stats);
            self.events.push(AbilityEvent::Unequipped(ability.kind()));
        }

        self.active = index;

        let equipped = match index {
            Some(i) => {
                let ability = &mut self.unlocked[i];
                ability
                    .instance
                    .as_ability_mut()
                    .on_equip(env, &mut self.stats);
                info!("Equipped ability: {}", ability.name());
                Some(ability.kind())
            }
            None => {
                info!("Unequipped active ability");
                None
            }
        };
        self.events.push(AbilityEvent::Equipped(equipped));
    }

    /// Equip the unlocked ability of `kind`, if there is one
    pub fn equip_kind(&mut self, kind: AbilityKind, env: &mut AbilityEnv<'_>) {
        match self.unlocked.iter().position(|a| a.kind() == kind) {
            Some(index) => self.equip(Some(index), env),
            None => debug!("Cannot equip {}: not unlocked", kind),
        }
    }

    pub fn unequip_active(&mut self, env: &mut AbilityEnv<'_>) {
        self.equip(None, env);
    }

    /// Variable-rate tick, forwarded to the active ability only
    pub fn frame_tick(&mut self, env: &mut AbilityEnv<'_>) {
        if let Some(i) = self.active {
            self.unlocked[i]
                .instance
                .as_ability_mut()
                .frame_tick(env, &mut self.stats);
        }
    }

    /// Fixed-rate tick, forwarded to the active ability only
    pub fn physics_tick(&mut self, env: &mut AbilityEnv<'_>) {
        if let Some(i) = self.active {
            self.unlocked[i]
                .instance
                .as_ability_mut()
                .physics_tick(env, &mut self.stats);
        }
    }
}
