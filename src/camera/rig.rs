//! Camera domain: the follow/modal camera model.
//!
//! Positions are screen space. `position` is the world point drawn at the
//! viewport's top-left corner at zoom 1; zoom scales about the viewport
//! center, and the shake offset is added after translation.

use bevy::prelude::*;
use rand::Rng;

use crate::camera::CameraTuning;
use crate::physics::Aabb;

/// Reference tick rate the per-tick smoothing factors are expressed in.
const SMOOTHING_HZ: f32 = 60.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CameraMode {
    #[default]
    Follow,
    Modal,
}

impl CameraMode {
    pub fn label(self) -> &'static str {
        match self {
            CameraMode::Follow => "follow",
            CameraMode::Modal => "modal",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShakePreset {
    Light,
    Medium,
    Heavy,
}

impl ShakePreset {
    pub fn amplitude(self) -> f32 {
        match self {
            ShakePreset::Light => 3.0,
            ShakePreset::Medium => 6.0,
            ShakePreset::Heavy => 12.0,
        }
    }

    pub fn duration(self) -> f32 {
        match self {
            ShakePreset::Light => 0.15,
            ShakePreset::Medium => 0.25,
            ShakePreset::Heavy => 0.4,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Shake {
    amplitude: f32,
    duration: f32,
    remaining: f32,
}

/// `1 - (1 - s)^(dt * 60)`: the fraction of the gap closed over `dt`.
pub fn smoothing_step(per_tick: f32, dt: f32) -> f32 {
    let per_tick = per_tick.clamp(0.0, 1.0);
    1.0 - (1.0 - per_tick).powf(dt * SMOOTHING_HZ)
}

#[derive(Resource, Debug, Clone)]
pub struct CameraRig {
    pub position: Vec2,
    pub target: Vec2,
    pub zoom: f32,
    pub target_zoom: f32,
    pub mode: CameraMode,
    pub bounds: Option<Aabb>,
    pub viewport: Vec2,
    pub shake_offset: Vec2,
    shake: Option<Shake>,
    tuning: CameraTuning,
}

impl Default for CameraRig {
    fn default() -> Self {
        Self::new(CameraTuning::default())
    }
}

impl CameraRig {
    pub fn new(tuning: CameraTuning) -> Self {
        Self {
            position: Vec2::ZERO,
            target: Vec2::ZERO,
            zoom: tuning.base_zoom,
            target_zoom: tuning.base_zoom,
            mode: CameraMode::Follow,
            bounds: None,
            viewport: Vec2::new(1280.0, 720.0),
            shake_offset: Vec2::ZERO,
            shake: None,
            tuning,
        }
    }

    pub fn tuning(&self) -> &CameraTuning {
        &self.tuning
    }

    pub fn set_tuning(&mut self, tuning: CameraTuning) {
        if self.mode == CameraMode::Follow {
            self.target_zoom = tuning.base_zoom;
        }
        self.tuning = tuning;
    }

    pub fn set_viewport(&mut self, size: Vec2) {
        self.viewport = size.max(Vec2::ONE);
    }

    /// World rectangle the follow target is kept within.
    pub fn set_bounds(&mut self, bounds: Aabb) {
        self.bounds = Some(bounds);
    }

    pub fn is_modal(&self) -> bool {
        self.mode == CameraMode::Modal
    }

    /// Advance the pose for this tick using the current mode's law.
    pub fn follow(&mut self, player_center: Vec2, dt: f32) {
        match self.mode {
            CameraMode::Follow => {
                self.target = self.clamp_to_bounds(player_center - self.viewport * 0.5);
                let t = smoothing_step(self.tuning.smoothing, dt);
                self.position += (self.target - self.position) * t;
            }
            CameraMode::Modal => self.pin_for_modal(player_center),
        }
    }

    /// Place the camera so `player_center` projects to the modal anchor at the
    /// current zoom. Bounds are bypassed.
    pub fn pin_for_modal(&mut self, player_center: Vec2) {
        let anchor = Vec2::new(self.tuning.modal_anchor.0, self.tuning.modal_anchor.1);
        let half = self.viewport * 0.5;
        let screen = self.viewport * anchor;
        self.position = player_center - half - (screen - half) / self.zoom.max(f32::EPSILON);
        self.target = self.position;
    }

    fn clamp_to_bounds(&self, target: Vec2) -> Vec2 {
        let Some(bounds) = self.bounds else {
            return target;
        };
        // A world narrower than the viewport pins to its left/top edge.
        let max = (bounds.max - self.viewport).max(bounds.min);
        target.clamp(bounds.min, max)
    }

    pub fn enter_modal(&mut self) {
        self.mode = CameraMode::Modal;
        self.target_zoom = self.tuning.modal_zoom;
        info!("[CAMERA] Modal mode, zoom -> {:.2}", self.target_zoom);
    }

    pub fn exit_modal(&mut self) {
        self.mode = CameraMode::Follow;
        self.target_zoom = self.tuning.base_zoom;
        info!("[CAMERA] Follow mode, zoom -> {:.2}", self.target_zoom);
    }

    /// Zoom animation and shake decay for this tick.
    pub fn update(&mut self, dt: f32, rng: &mut impl Rng) {
        let gap = self.target_zoom - self.zoom;
        if gap.abs() < self.tuning.zoom_snap {
            self.zoom = self.target_zoom;
        } else {
            self.zoom += gap * smoothing_step(self.tuning.zoom_smoothing, dt);
        }

        self.shake_offset = Vec2::ZERO;
        if let Some(shake) = self.shake.as_mut() {
            shake.remaining -= dt;
            if shake.remaining <= 0.0 {
                self.shake = None;
            } else {
                let strength = shake.amplitude * (shake.remaining / shake.duration);
                self.shake_offset = Vec2::new(
                    rng.random_range(-1.0..=1.0),
                    rng.random_range(-1.0..=1.0),
                ) * strength;
            }
        }
    }

    /// Start a shake, replacing any shake in progress.
    pub fn shake(&mut self, preset: ShakePreset) {
        self.shake = Some(Shake {
            amplitude: preset.amplitude(),
            duration: preset.duration(),
            remaining: preset.duration(),
        });
    }

    pub fn is_shaking(&self) -> bool {
        self.shake.is_some()
    }

    /// Jump straight to `position` (kept within bounds), no smoothing.
    pub fn snap_to(&mut self, position: Vec2) {
        let position = self.clamp_to_bounds(position);
        self.position = position;
        self.target = position;
    }

    /// Follow mode at base zoom, no shake, pose unchanged.
    pub fn reset(&mut self) {
        self.mode = CameraMode::Follow;
        self.zoom = self.tuning.base_zoom;
        self.target_zoom = self.tuning.base_zoom;
        self.shake = None;
        self.shake_offset = Vec2::ZERO;
    }

    /// Screen pixel a world point is drawn at.
    pub fn world_to_screen(&self, point: Vec2) -> Vec2 {
        let half = self.viewport * 0.5;
        half + (point - self.position + self.shake_offset - half) * self.zoom
    }

    pub fn screen_to_world(&self, pixel: Vec2) -> Vec2 {
        let half = self.viewport * 0.5;
        (pixel - half) / self.zoom.max(f32::EPSILON) + half + self.position - self.shake_offset
    }

    /// World point under the viewport center.
    pub fn view_center(&self) -> Vec2 {
        self.position + self.viewport * 0.5 - self.shake_offset
    }
}
