//! Application systems
//!
//! The window, simulation and render halves of the frame loop, kept out of
//! `main.rs` so each can be exercised on its own.

mod render;
mod simulation;
mod window;

pub use render::RenderSystem;
pub use simulation::{cap_delta, SimulationSystem, MAX_FRAME_TIME};
pub use window::{format_title, WindowError, WindowSystem};
