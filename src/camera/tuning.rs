//! Camera domain: tuning loaded from runtime.ron.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Resource, Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct CameraTuning {
    /// Follow smoothing per 60 Hz tick
    pub smoothing: f32,
    /// Zoom smoothing per 60 Hz tick
    pub zoom_smoothing: f32,
    /// Zoom snaps to its target once closer than this
    pub zoom_snap: f32,
    pub base_zoom: f32,
    pub modal_zoom: f32,
    /// Where the player is framed while a project modal is open (fraction of viewport)
    pub modal_anchor: (f32, f32),
    /// Horizontal framing of the player on hub entry, desktop
    pub hub_anchor_desktop: f32,
    /// Horizontal framing of the player on hub entry, touch devices
    pub hub_anchor_touch: f32,
}

impl Default for CameraTuning {
    fn default() -> Self {
        Self {
            smoothing: 0.1,
            zoom_smoothing: 0.08,
            zoom_snap: 0.01,
            base_zoom: 1.0,
            modal_zoom: 1.5,
            modal_anchor: (0.25, 0.5),
            hub_anchor_desktop: 0.1,
            hub_anchor_touch: 0.5,
        }
    }
}
