//! Frame simulation system
//!
//! Manages the CPU half of a frame:
//! - Delta time calculation
//! - Input → camera, toggles and orbit angles

use std::time::Instant;
use rainscape_input::InputSnapshot;

use crate::frame::{FrameContext, FrameOutcome};

/// Longest frame step fed to the simulation, in seconds
pub const MAX_FRAME_TIME: f32 = 0.25;

/// Clamp a measured frame time
///
/// Stalls (the first frame, window drags, breakpoints) would otherwise turn
/// into one huge camera jump.
pub fn cap_delta(raw_dt: f32) -> f32 {
    raw_dt.clamp(0.0, MAX_FRAME_TIME)
}

/// Measures frame time and runs the input step
pub struct SimulationSystem {
    last_frame: Instant,
}

impl SimulationSystem {
    /// Create a new simulation system
    pub fn new() -> Self {
        Self {
            last_frame: Instant::now(),
        }
    }

    /// Restart timing, e.g. once startup has finished
    pub fn reset_clock(&mut self) {
        self.last_frame = Instant::now();
    }

    /// Run one simulation frame
    pub fn update(&mut self, frame: &mut FrameContext, snapshot: &InputSnapshot) -> FrameOutcome {
        let now = Instant::now();
        let dt = cap_delta((now - self.last_frame).as_secs_f32());
        self.last_frame = now;

        frame.update(snapshot, dt)
    }
}

impl Default for SimulationSystem {
    fn default() -> Self {
        Self::new()
    }
}
