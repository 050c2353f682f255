// Input manager - turns winit events into player actions

use super::action::{Action, Binding};
use super::config::InputConfig;
use super::player::PlayerInput;
use glam::Vec2;
use winit::dpi::PhysicalPosition;
use winit::event::{ElementState, KeyEvent, MouseButton};
use winit::keyboard::PhysicalKey;

/// Coordinates bindings and the local player's input state
#[derive(Debug, Default)]
pub struct InputManager {
    config: InputConfig,
    player: PlayerInput,
}

impl InputManager {
    /// Create an input manager with the default bindings
    pub fn new() -> Self {
        Self::with_config(InputConfig::with_defaults())
    }

    pub fn with_config(config: InputConfig) -> Self {
        Self {
            config,
            player: PlayerInput::new(),
        }
    }

    /// Process a keyboard event from winit
    pub fn process_keyboard_event(&mut self, event: &KeyEvent) {
        if event.repeat {
            return;
        }
        if let PhysicalKey::Code(key_code) = event.physical_key {
            self.process_binding(Binding::key(key_code), event.state);
        }
    }

    /// Process a mouse button event from winit
    pub fn process_mouse_button(&mut self, button: MouseButton, state: ElementState) {
        self.process_binding(Binding::mouse(button), state);
    }

    /// Process a cursor move from winit
    pub fn process_cursor_moved(&mut self, position: PhysicalPosition<f64>) {
        self.player
            .set_cursor(Vec2::new(position.x as f32, position.y as f32));
    }

    /// Apply a press or release of a bound input
    ///
    /// Returns the action it maps to, if any.
    pub fn process_binding(&mut self, binding: Binding, state: ElementState) -> Option<Action> {
        let action = self.config.get_action(binding)?;
        match state {
            ElementState::Pressed => self.player.press(action),
            ElementState::Released => self.player.release(action),
        }
        Some(action)
    }

    /// Update input state for a new frame
    /// Call this once per frame after the frame's logic ran
    pub fn update(&mut self) {
        self.player.update();
    }

    pub fn player(&self) -> &PlayerInput {
        &self.player
    }

    pub fn player_mut(&mut self) -> &mut PlayerInput {
        &mut self.player
    }

    pub fn config(&self) -> &InputConfig {
        &self.config
    }
}
