// Engine modules: physics, input, camera, timing

pub mod camera;
pub mod game_loop;
pub mod input;
pub mod physics;
