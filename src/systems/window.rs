//! Window management system
//!
//! Handles window creation, cursor capture and title updates.

use glam::Vec3;
use rainscape_core::Toggles;
use std::sync::Arc;
use thiserror::Error;
use winit::{
    event_loop::ActiveEventLoop,
    window::{CursorGrabMode, Fullscreen, Window},
};
use crate::config::WindowConfig;

/// Manages the application window and cursor state
pub struct WindowSystem {
    window: Arc<Window>,
    cursor_captured: bool,
    base_title: String,
}

impl WindowSystem {
    /// Create window from config
    pub fn create(
        event_loop: &ActiveEventLoop,
        config: &WindowConfig,
    ) -> Result<Self, WindowError> {
        let mut attrs = Window::default_attributes()
            .with_title(&config.title)
            .with_inner_size(winit::dpi::LogicalSize::new(
                config.width,
                config.height,
            ));

        if config.fullscreen {
            attrs = attrs.with_fullscreen(Some(Fullscreen::Borderless(None)));
        }

        let window = Arc::new(event_loop.create_window(attrs)?);

        Ok(Self {
            window,
            cursor_captured: false,
            base_title: config.title.clone(),
        })
    }

    /// Get window reference (for RenderContext creation)
    pub fn window(&self) -> &Arc<Window> {
        &self.window
    }

    pub fn is_cursor_captured(&self) -> bool {
        self.cursor_captured
    }

    /// Hide and grab the cursor for mouse look
    pub fn capture_cursor(&mut self) -> bool {
        let grab_result = self.window
            .set_cursor_grab(CursorGrabMode::Locked)
            .or_else(|_| self.window.set_cursor_grab(CursorGrabMode::Confined));

        if grab_result.is_ok() {
            self.window.set_cursor_visible(false);
            self.cursor_captured = true;
            log::info!("Cursor captured - Escape to quit");
            true
        } else {
            log::warn!("Failed to capture cursor");
            false
        }
    }

    /// Update window title with position and mode info
    pub fn update_title(&self, position: Vec3, toggles: Toggles) {
        self.window.set_title(&format_title(&self.base_title, position, toggles));
    }

    /// Request a redraw
    pub fn request_redraw(&self) {
        self.window.request_redraw();
    }
}

/// Title text: base title, camera position, active modes
pub fn format_title(base: &str, position: Vec3, toggles: Toggles) -> String {
    let mut title = format!(
        "{} - ({:.1}, {:.1}, {:.1}) {}",
        base,
        position.x,
        position.y,
        position.z,
        if toggles.is_night() { "[Night]" } else { "[Day]" }
    );
    if toggles.is_wireframe() {
        title.push_str(" [Wireframe]");
    }
    title
}

#[derive(Debug, Error)]
pub enum WindowError {
    #[error("Window creation failed: {0}")]
    CreationFailed(#[from] winit::error::OsError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_formatting_day() {
        let title = format_title("Test", Vec3::new(1.0, 2.0, -3.0), Toggles::default());
        assert_eq!(title, "Test - (1.0, 2.0, -3.0) [Day]");
    }

    #[test]
    fn test_title_formatting_modes() {
        let title = format_title("Test", Vec3::ZERO, Toggles::NIGHT | Toggles::WIREFRAME);
        assert!(title.contains("[Night]"));
        assert!(title.ends_with("[Wireframe]"));
    }
}
