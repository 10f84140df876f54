//! Fixed key bindings
//!
//! Discrete keys (quit, mode toggles) fire once per press. Movement and
//! rotation keys are read from the held set by the controller instead.

use winit::keyboard::KeyCode;

use crate::controller::MoveDirection;

/// Actions triggered by a discrete key press
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputAction {
    /// Request application exit (Escape)
    Exit,
    /// Toggle night skybox and light colour (`-`)
    ToggleNight,
    /// Toggle wireframe polygon mode (`=`)
    ToggleWireframe,
}

/// Held keys that translate the camera
pub const MOVEMENT_KEYS: [(KeyCode, MoveDirection); 4] = [
    (KeyCode::KeyW, MoveDirection::Forward),
    (KeyCode::KeyS, MoveDirection::Backward),
    (KeyCode::KeyA, MoveDirection::Left),
    (KeyCode::KeyD, MoveDirection::Right),
];

/// Held keys that switch to sprint speed
pub const SPRINT_KEYS: [KeyCode; 2] = [KeyCode::ShiftLeft, KeyCode::ShiftRight];

/// Maps discrete key presses to semantic actions
pub struct InputMapper;

impl InputMapper {
    /// Returns `Some(action)` for discrete keys, `None` for everything else
    pub fn map_key_press(key: KeyCode) -> Option<InputAction> {
        match key {
            KeyCode::Escape => Some(InputAction::Exit),
            KeyCode::Minus => Some(InputAction::ToggleNight),
            KeyCode::Equal => Some(InputAction::ToggleWireframe),
            _ => None,
        }
    }
}
