//! Debug domain: state and action definitions for debug tooling.

use bevy::prelude::*;

/// Resource tracking debug mode state
#[derive(Resource, Debug, Default)]
pub struct DebugState {
    /// F1: readout panel, collider outlines and invisible platforms
    pub hud_visible: bool,
    /// F2: 100 px coordinate grid
    pub grid_visible: bool,
    /// Message to display temporarily in debug UI
    pub status_message: Option<(String, f32)>,
}

impl DebugState {
    /// Set a status message that will fade after a duration
    pub fn set_message(&mut self, message: impl Into<String>, duration: f32) {
        self.status_message = Some((message.into(), duration));
    }

    /// Count the message down, dropping it once expired.
    pub fn tick_message(&mut self, dt: f32) {
        if let Some((_, ref mut remaining)) = self.status_message {
            *remaining -= dt;
            if *remaining <= 0.0 {
                self.status_message = None;
            }
        }
    }
}

/// Actions that can be triggered from debug UI
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DebugAction {
    Reset,
    ToggleGrid,
    Close,
}

/// Grid spacing in world pixels.
pub const GRID_SPACING: f32 = 100.0;

/// Grid segments (screen space) covering `view`, on multiples of `spacing`.
pub fn grid_lines(view_min: Vec2, view_max: Vec2, spacing: f32) -> Vec<(Vec2, Vec2)> {
    if spacing <= 0.0 {
        return Vec::new();
    }
    let mut lines = Vec::new();
    let mut x = (view_min.x / spacing).ceil() * spacing;
    while x <= view_max.x {
        lines.push((Vec2::new(x, view_min.y), Vec2::new(x, view_max.y)));
        x += spacing;
    }
    let mut y = (view_min.y / spacing).ceil() * spacing;
    while y <= view_max.y {
        lines.push((Vec2::new(view_min.x, y), Vec2::new(view_max.x, y)));
        y += spacing;
    }
    lines
}
