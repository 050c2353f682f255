// What abilities read from the input layer

use glam::Vec2;

/// Live input state exposed to abilities
///
/// Held state is the ambient current value; the `just_*` edges are true for
/// exactly one frame after the change, which is how abilities react to
/// press/release notifications.
pub trait InputSource {
    /// Cursor position in screen pixels
    fn cursor_position(&self) -> Vec2;

    fn primary_pressed(&self) -> bool;
    fn primary_just_pressed(&self) -> bool;
    fn primary_just_released(&self) -> bool;

    fn secondary_pressed(&self) -> bool;
    fn secondary_just_pressed(&self) -> bool;
    fn secondary_just_released(&self) -> bool;

    /// The bound jump action fired this frame
    fn jump_just_pressed(&self) -> bool;

    /// The cursor is over interactive UI (menus, ability panel)
    fn pointer_over_ui(&self) -> bool;
}
