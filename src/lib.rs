//! Rainscape - a rainy scene renderer
//!
//! A fly camera over a small lit scene with shadow mapping, day/night
//! skyboxes and camera-relative rain. The library half exposes the
//! configuration, the per-frame state and the systems; `main.rs` wires them
//! into winit's event loop.

pub mod config;
pub mod frame;
pub mod systems;
