//! Per-frame input snapshots
//!
//! Window events arrive one at a time between frames. The collector folds
//! them into key state and accumulated deltas; the frame loop then takes a
//! snapshot, which resets the per-frame parts.

use std::collections::HashSet;
use winit::event::{ElementState, MouseScrollDelta};
use winit::keyboard::KeyCode;

/// Immutable view of the input for one frame
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InputSnapshot {
    /// Keys currently held down
    pub held: HashSet<KeyCode>,
    /// Keys pressed since the previous snapshot, in order (repeats excluded)
    pub pressed: Vec<KeyCode>,
    /// Raw mouse motion since the previous snapshot (x right, y down)
    pub mouse_delta: (f64, f64),
    /// Scroll since the previous snapshot, in lines (positive = away from user)
    pub scroll_delta: f32,
}

impl InputSnapshot {
    pub fn is_held(&self, key: KeyCode) -> bool {
        self.held.contains(&key)
    }

    pub fn was_pressed(&self, key: KeyCode) -> bool {
        self.pressed.contains(&key)
    }

    /// Builder: mark keys as held
    pub fn with_held(mut self, keys: &[KeyCode]) -> Self {
        self.held.extend(keys.iter().copied());
        self
    }

    /// Builder: record a discrete press
    pub fn with_pressed(mut self, key: KeyCode) -> Self {
        self.pressed.push(key);
        self.held.insert(key);
        self
    }

    /// Builder: set the mouse motion
    pub fn with_mouse_delta(mut self, dx: f64, dy: f64) -> Self {
        self.mouse_delta = (dx, dy);
        self
    }

    /// Builder: set the scroll amount
    pub fn with_scroll(mut self, lines: f32) -> Self {
        self.scroll_delta = lines;
        self
    }
}

/// Accumulates window/device events until the next snapshot
#[derive(Debug, Default)]
pub struct InputCollector {
    held: HashSet<KeyCode>,
    pressed: Vec<KeyCode>,
    mouse_delta: (f64, f64),
    scroll_delta: f32,
}

impl InputCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Process a keyboard event
    pub fn process_keyboard(&mut self, key: KeyCode, state: ElementState, repeat: bool) {
        match state {
            ElementState::Pressed => {
                if !repeat {
                    self.pressed.push(key);
                }
                self.held.insert(key);
            }
            ElementState::Released => {
                self.held.remove(&key);
            }
        }
    }

    /// Process raw mouse motion
    pub fn process_mouse_motion(&mut self, delta_x: f64, delta_y: f64) {
        self.mouse_delta.0 += delta_x;
        self.mouse_delta.1 += delta_y;
    }

    /// Process a scroll wheel event
    pub fn process_scroll(&mut self, delta: MouseScrollDelta) {
        self.scroll_delta += match delta {
            MouseScrollDelta::LineDelta(_, y) => y,
            MouseScrollDelta::PixelDelta(pos) => pos.y as f32 / 100.0,
        };
    }

    /// Forget held keys (focus lost: release events will never arrive)
    pub fn release_all(&mut self) {
        self.held.clear();
    }

    /// Freeze the current state and reset the per-frame accumulators
    pub fn take_snapshot(&mut self) -> InputSnapshot {
        InputSnapshot {
            held: self.held.clone(),
            pressed: std::mem::take(&mut self.pressed),
            mouse_delta: std::mem::take(&mut self.mouse_delta),
            scroll_delta: std::mem::take(&mut self.scroll_delta),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_press_and_release() {
        let mut collector = InputCollector::new();
        collector.process_keyboard(KeyCode::KeyW, ElementState::Pressed, false);
        let snap = collector.take_snapshot();
        assert!(snap.is_held(KeyCode::KeyW));
        assert!(snap.was_pressed(KeyCode::KeyW));

        // Still held next frame, but no new press
        let snap = collector.take_snapshot();
        assert!(snap.is_held(KeyCode::KeyW));
        assert!(!snap.was_pressed(KeyCode::KeyW));

        collector.process_keyboard(KeyCode::KeyW, ElementState::Released, false);
        assert!(!collector.take_snapshot().is_held(KeyCode::KeyW));
    }

    #[test]
    fn test_repeat_not_counted_as_press() {
        let mut collector = InputCollector::new();
        collector.process_keyboard(KeyCode::Minus, ElementState::Pressed, false);
        collector.process_keyboard(KeyCode::Minus, ElementState::Pressed, true);
        collector.process_keyboard(KeyCode::Minus, ElementState::Pressed, true);
        assert_eq!(collector.take_snapshot().pressed, vec![KeyCode::Minus]);
    }

    #[test]
    fn test_deltas_accumulate_and_reset() {
        let mut collector = InputCollector::new();
        collector.process_mouse_motion(3.0, -1.0);
        collector.process_mouse_motion(2.0, 4.0);
        collector.process_scroll(MouseScrollDelta::LineDelta(0.0, 1.0));
        collector.process_scroll(MouseScrollDelta::LineDelta(0.0, 2.0));

        let snap = collector.take_snapshot();
        assert_eq!(snap.mouse_delta, (5.0, 3.0));
        assert_eq!(snap.scroll_delta, 3.0);

        let snap = collector.take_snapshot();
        assert_eq!(snap.mouse_delta, (0.0, 0.0));
        assert_eq!(snap.scroll_delta, 0.0);
    }

    #[test]
    fn test_release_all() {
        let mut collector = InputCollector::new();
        collector.process_keyboard(KeyCode::KeyA, ElementState::Pressed, false);
        collector.release_all();
        assert!(collector.take_snapshot().held.is_empty());
    }
}
