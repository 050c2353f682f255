// Faceless: a 2D platformer where masks grant swappable abilities

pub mod core;
pub mod engine;
pub mod game;
