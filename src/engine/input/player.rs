// Per-player input state management

use super::action::Action;
use super::source::InputSource;
use glam::Vec2;
use std::collections::HashSet;

/// Input state for the local player
#[derive(Debug, Default)]
pub struct PlayerInput {
    /// Actions that are currently pressed this frame
    pressed: HashSet<Action>,

    /// Actions that were just pressed this frame (press events)
    just_pressed: HashSet<Action>,

    /// Actions that were just released this frame (release events)
    just_released: HashSet<Action>,

    /// Last known cursor position in screen pixels
    cursor: Vec2,

    /// Whether the cursor currently hovers interactive UI
    over_ui: bool,
}

impl PlayerInput {
    /// Create a new player input state
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if an action is currently pressed
    pub fn is_pressed(&self, action: Action) -> bool {
        self.pressed.contains(&action)
    }

    /// Check if an action was just pressed this frame
    pub fn just_pressed(&self, action: Action) -> bool {
        self.just_pressed.contains(&action)
    }

    /// Check if an action was just released this frame
    pub fn just_released(&self, action: Action) -> bool {
        self.just_released.contains(&action)
    }

    /// Register an action press
    pub fn press(&mut self, action: Action) {
        if self.pressed.insert(action) {
            self.just_pressed.insert(action);
        }
    }

    /// Register an action release
    pub fn release(&mut self, action: Action) {
        if self.pressed.remove(&action) {
            self.just_released.insert(action);
        }
    }

    /// Record a new cursor position
    pub fn set_cursor(&mut self, position: Vec2) {
        self.cursor = position;
    }

    /// Mark whether the cursor is over UI
    pub fn set_pointer_over_ui(&mut self, over_ui: bool) {
        self.over_ui = over_ui;
    }

    /// Update input state for a new frame
    /// Call this once per frame after the frame's logic ran
    pub fn update(&mut self) {
        self.just_pressed.clear();
        self.just_released.clear();
    }

    /// Reset all input state (e.g. on focus loss)
    pub fn reset(&mut self) {
        self.pressed.clear();
        self.just_pressed.clear();
        self.just_released.clear();
    }

    /// Horizontal movement axis (-1.0 to 1.0)
    pub fn horizontal(&self) -> f32 {
        let mut horizontal = 0.0;
        if self.is_pressed(Action::MoveLeft) {
            horizontal -= 1.0;
        }
        if self.is_pressed(Action::MoveRight) {
            horizontal += 1.0;
        }
        horizontal
    }
}

impl InputSource for PlayerInput {
    fn cursor_position(&self) -> Vec2 {
        self.cursor
    }

    fn primary_pressed(&self) -> bool {
        self.is_pressed(Action::Primary)
    }

    fn primary_just_pressed(&self) -> bool {
        self.just_pressed(Action::Primary)
    }

    fn primary_just_released(&self) -> bool {
        self.just_released(Action::Primary)
    }

    fn secondary_pressed(&self) -> bool {
        self.is_pressed(Action::Secondary)
    }

    fn secondary_just_pressed(&self) -> bool {
        self.just_pressed(Action::Secondary)
    }

    fn secondary_just_released(&self) -> bool {
        self.just_released(Action::Secondary)
    }

    fn jump_just_pressed(&self) -> bool {
        self.just_pressed(Action::Jump)
    }

    fn pointer_over_ui(&self) -> bool {
        self.over_ui
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_press_action() {
        let mut input = PlayerInput::new();
        input.press(Action::Primary);
        assert!(input.primary_pressed());
        assert!(input.primary_just_pressed());
    }

    #[test]
    fn test_release_action() {
        let mut input = PlayerInput::new();
        input.press(Action::Secondary);
        input.update();
        input.release(Action::Secondary);
        assert!(!input.secondary_pressed());
        assert!(input.secondary_just_released());
    }

    #[test]
    fn test_repeat_press_is_not_an_edge() {
        let mut input = PlayerInput::new();
        input.press(Action::Jump);
        input.update();
        input.press(Action::Jump);
        assert!(!input.jump_just_pressed());
    }

    #[test]
    fn test_release_without_press_is_ignored() {
        let mut input = PlayerInput::new();
        input.release(Action::Primary);
        assert!(!input.primary_just_released());
    }

    #[test]
    fn test_cursor_and_ui_flag() {
        let mut input = PlayerInput::new();
        input.set_cursor(Vec2::new(12.0, 34.0));
        input.set_pointer_over_ui(true);
        assert_eq!(input.cursor_position(), Vec2::new(12.0, 34.0));
        assert!(input.pointer_over_ui());
    }

    #[test]
    fn test_horizontal_axis() {
        let mut input = PlayerInput::new();
        input.press(Action::MoveLeft);
        assert_eq!(input.horizontal(), -1.0);
        input.press(Action::MoveRight);
        assert_eq!(input.horizontal(), 0.0);
    }
}
