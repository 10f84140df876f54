//! Input handling for Rainscape
//!
//! Raw window events are accumulated by an [`InputCollector`] and frozen
//! into an [`InputSnapshot`] once per frame. The [`InputController`] maps a
//! snapshot to camera commands (through the [`CameraControl`] seam) and to
//! per-frame [`FrameCommands`] for everything else.
//!
//! Bindings:
//! - W/A/S/D: move forward/left/back/right
//! - Shift: sprint
//! - Q/E: spin the scene's rotating object
//! - J/L: orbit the light
//! - `-`: toggle night, `=`: toggle wireframe
//! - Escape: quit
//! - Mouse: look, scroll: field of view

mod bindings;
mod controller;
mod snapshot;

pub use bindings::{InputAction, InputMapper, MOVEMENT_KEYS, SPRINT_KEYS};
pub use controller::{
    CameraControl, ControllerSettings, FrameCommands, InputController, MoveDirection,
};
pub use snapshot::{InputCollector, InputSnapshot};
