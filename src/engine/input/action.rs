// Game action definitions and default bindings

use winit::event::MouseButton;
use winit::keyboard::KeyCode;

/// Represents all possible in-game actions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    // Movement
    MoveLeft,
    MoveRight,
    Run,
    Jump,

    // Ability triggers (mouse buttons)
    Primary,
    Secondary,

    // Ability selection
    EquipSlot(u8),
    Unequip,

    // Meta actions
    Menu,
}

/// A physical input bound to an action (keyboard key or mouse button)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Binding {
    Keyboard(KeyCode),
    Mouse(MouseButton),
}

impl Binding {
    /// Create a keyboard binding
    pub fn key(code: KeyCode) -> Self {
        Self::Keyboard(code)
    }

    /// Create a mouse button binding
    pub fn mouse(button: MouseButton) -> Self {
        Self::Mouse(button)
    }
}

/// Number of ability slots reachable from the number row
pub const EQUIP_SLOTS: u8 = 4;

/// Default keyboard/mouse bindings
pub fn default_bindings() -> Vec<(Binding, Action)> {
    let mut bindings = vec![
        (Binding::key(KeyCode::KeyA), Action::MoveLeft),
        (Binding::key(KeyCode::KeyD), Action::MoveRight),
        (Binding::key(KeyCode::ShiftLeft), Action::Run),
        (Binding::key(KeyCode::Space), Action::Jump),
        (Binding::key(KeyCode::KeyW), Action::Jump),
        (Binding::mouse(MouseButton::Left), Action::Primary),
        (Binding::mouse(MouseButton::Right), Action::Secondary),
        (Binding::key(KeyCode::KeyQ), Action::Unequip),
        (Binding::key(KeyCode::Escape), Action::Menu),
    ];
    let slot_keys = [KeyCode::Digit1, KeyCode::Digit2, KeyCode::Digit3, KeyCode::Digit4];
    for (slot, key) in (0..EQUIP_SLOTS).zip(slot_keys) {
        bindings.push((Binding::key(key), Action::EquipSlot(slot)));
    }
    bindings
}
