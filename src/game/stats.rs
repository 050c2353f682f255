// Player movement stats
//
// One immutable base template per actor and one runtime copy that
// abilities mutate. Gameplay code only ever reads the runtime copy.

/// Movement and jump parameters read by the player controller
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MovementStats {
    // Locomotion
    /// Ground speed while walking (units/second)
    pub walk_speed: f32,
    /// Ground speed while running (units/second)
    pub run_speed: f32,
    /// Horizontal acceleration in the air while walking
    pub air_acceleration: f32,
    /// Horizontal acceleration in the air while running
    pub run_air_acceleration: f32,

    // Jumping
    /// Height of a full jump in world units
    pub max_jump_height: f32,
    /// Seconds from take-off to the top of a jump
    pub time_till_jump_apex: f32,
    /// Jumps available before touching ground again
    pub max_jumps: i32,
    /// Dashes available before touching ground again
    pub max_dashes: i32,

    // Dimensions (for physics collider)
    pub width: f32,
    pub height: f32,
}

/// The template every player starts from
pub const BASE_STATS: MovementStats = MovementStats {
    walk_speed: 6.0,
    run_speed: 10.0,
    air_acceleration: 40.0,
    run_air_acceleration: 60.0,

    max_jump_height: 3.5,
    time_till_jump_apex: 0.4,
    max_jumps: 2,
    max_dashes: 1,

    width: 1.0,
    height: 2.0,
};

impl Default for MovementStats {
    fn default() -> Self {
        BASE_STATS
    }
}

impl MovementStats {
    /// Upward launch speed reaching `max_jump_height` after `time_till_jump_apex`
    pub fn jump_velocity(&self) -> f32 {
        if self.time_till_jump_apex <= f32::EPSILON {
            return 0.0;
        }
        2.0 * self.max_jump_height / self.time_till_jump_apex
    }

    /// Gravity magnitude matching the jump arc
    pub fn jump_gravity(&self) -> f32 {
        if self.time_till_jump_apex <= f32::EPSILON {
            return 0.0;
        }
        2.0 * self.max_jump_height / (self.time_till_jump_apex * self.time_till_jump_apex)
    }
}

/// A single field of [`MovementStats`], used to scope overrides
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatField {
    WalkSpeed,
    RunSpeed,
    AirAcceleration,
    RunAirAcceleration,
    MaxJumpHeight,
    TimeTillJumpApex,
    MaxJumps,
    MaxDashes,
}

impl StatField {
    /// The four horizontal movement fields
    pub const LOCOMOTION: &'static [StatField] = &[
        StatField::WalkSpeed,
        StatField::RunSpeed,
        StatField::AirAcceleration,
        StatField::RunAirAcceleration,
    ];

    /// Copy this field's value from `from` into `to`
    pub fn copy(self, from: &MovementStats, to: &mut MovementStats) {
        match self {
            StatField::WalkSpeed => to.walk_speed = from.walk_speed,
            StatField::RunSpeed => to.run_speed = from.run_speed,
            StatField::AirAcceleration => to.air_acceleration = from.air_acceleration,
            StatField::RunAirAcceleration => to.run_air_acceleration = from.run_air_acceleration,
            StatField::MaxJumpHeight => to.max_jump_height = from.max_jump_height,
            StatField::TimeTillJumpApex => to.time_till_jump_apex = from.time_till_jump_apex,
            StatField::MaxJumps => to.max_jumps = from.max_jumps,
            StatField::MaxDashes => to.max_dashes = from.max_dashes,
        }
    }
}

/// Base template plus the mutable runtime copy
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerStats {
    base: MovementStats,
    /// Live values, mutated by abilities
    pub runtime: MovementStats,
}

impl PlayerStats {
    /// Copy `base` into a runtime model with starting powers only:
    /// one jump, no dashes.
    pub fn new(base: MovementStats) -> Self {
        let mut runtime = base;
        runtime.max_jumps = 1;
        runtime.max_dashes = 0;
        Self { base, runtime }
    }

    pub fn base(&self) -> &MovementStats {
        &self.base
    }
}

impl Default for PlayerStats {
    fn default() -> Self {
        Self::new(BASE_STATS)
    }
}

/// A temporary change to some runtime fields
///
/// `acquire` snapshots the current values, including any permanent passive
/// bonuses already applied, then mutates. `restore` writes the snapshot back
/// for the listed fields only, so changes to other fields made in between
/// survive.
#[derive(Debug, Clone)]
#[must_use = "an override that is dropped without restore leaves the stats mutated"]
pub struct StatOverride {
    snapshot: MovementStats,
    fields: &'static [StatField],
}

impl StatOverride {
    pub fn acquire(
        stats: &mut MovementStats,
        fields: &'static [StatField],
        mutate: impl FnOnce(&mut MovementStats),
    ) -> Self {
        let snapshot = *stats;
        mutate(stats);
        Self { snapshot, fields }
    }

    /// Values as they were before the override
    pub fn original(&self) -> &MovementStats {
        &self.snapshot
    }

    /// Apply a permanent change to the snapshot, so `restore` keeps it
    pub fn rebase(&mut self, change: impl FnOnce(&mut MovementStats)) {
        change(&mut self.snapshot);
    }

    pub fn restore(self, stats: &mut MovementStats) {
        for field in self.fields {
            field.copy(&self.snapshot, stats);
        }
    }
}
