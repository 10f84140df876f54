//! Render mode toggles
//!
//! Night mode switches the skybox and the directional light colour.
//! Wireframe mode switches the lit pass to line polygons.

use bitflags::bitflags;
use glam::Vec3;

use crate::light::LightPalette;

bitflags! {
    /// Mode flags flipped by discrete key presses and read every frame
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Toggles: u8 {
        /// Night skybox and night light colour
        const NIGHT = 1 << 0;
        /// Lit pass drawn as lines
        const WIREFRAME = 1 << 1;
    }
}

/// Which skybox is drawn as the background
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkyboxKind {
    Day,
    Night,
}

impl Toggles {
    /// Flip night mode, returning the new state
    pub fn toggle_night(&mut self) -> bool {
        self.toggle(Toggles::NIGHT);
        self.is_night()
    }

    /// Flip wireframe mode, returning the new state
    pub fn toggle_wireframe(&mut self) -> bool {
        self.toggle(Toggles::WIREFRAME);
        self.is_wireframe()
    }

    pub fn is_night(self) -> bool {
        self.contains(Toggles::NIGHT)
    }

    pub fn is_wireframe(self) -> bool {
        self.contains(Toggles::WIREFRAME)
    }

    /// Directional light colour for the current mode
    pub fn light_color(self, palette: &LightPalette) -> Vec3 {
        if self.is_night() {
            Vec3::from(palette.night)
        } else {
            Vec3::from(palette.day)
        }
    }

    /// Skybox selected by the current mode
    pub fn skybox(self) -> SkyboxKind {
        if self.is_night() {
            SkyboxKind::Night
        } else {
            SkyboxKind::Day
        }
    }
}
