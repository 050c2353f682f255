// Gameplay layer: player stats, abilities and the world objects they act on

pub mod abilities;
pub mod actor;
pub mod objects;
pub mod orb;
pub mod pickup;
pub mod player;
pub mod stats;
