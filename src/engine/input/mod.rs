// Input handling system
//
// Maps keyboard and mouse input to game actions and exposes the resulting
// state to abilities through the `InputSource` trait.
//
// ## Architecture
//
// - `action`: Defines game actions and default bindings
// - `config`: Binding configuration and remapping
// - `player`: Per-frame input state with press/release edges and cursor
// - `source`: The read-only view abilities consume
// - `manager`: Feeds winit events into the player state
//
// ## Usage Example
//
// ```rust
// use faceless::engine::input::{Action, InputManager};
//
// let mut input = InputManager::new();
//
// // In your event loop
// input.process_mouse_button(button, state);
// input.process_cursor_moved(position);
//
// // Run the frame's logic, then clear the edges
// if input.player().just_pressed(Action::Jump) { /* ... */ }
// input.update();
// ```

pub mod action;
pub mod config;
pub mod manager;
pub mod player;
pub mod source;

// Re-export commonly used types
pub use action::{Action, Binding, EQUIP_SLOTS};
pub use config::InputConfig;
pub use manager::InputManager;
pub use player::PlayerInput;
pub use source::InputSource;
