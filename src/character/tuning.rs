//! Character domain: tuning loaded from runtime.ron.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Resource, Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct CharacterTuning {
    pub width: f32,
    pub height: f32,
    /// Horizontal speed approached while a direction is held (px/s)
    pub max_speed: f32,
    pub accel: f32,
    pub decel: f32,
    /// Upward speed set by a jump (px/s)
    pub jump_impulse: f32,
    pub gravity: f32,
    pub max_fall_speed: f32,
    pub max_jumps: u8,
    /// |vy| below this counts as resting when sampling the ground (px/s)
    pub ground_velocity_epsilon: f32,
    /// Length of the downward ground probe below the feet (px)
    pub ground_probe: f32,
    /// |vx| above this animates as walking (px/s)
    pub walk_threshold: f32,
    /// Death line below the world's ground level (px)
    pub death_offset: f32,
    /// Seconds the character stays frozen before respawning
    pub death_freeze: f32,
    pub frame_duration: f32,
}

impl Default for CharacterTuning {
    fn default() -> Self {
        Self {
            width: 28.0,
            height: 44.0,
            max_speed: 300.0,
            accel: 2400.0,
            decel: 2800.0,
            jump_impulse: 640.0,
            gravity: 1800.0,
            max_fall_speed: 960.0,
            max_jumps: 2,
            ground_velocity_epsilon: 30.0,
            ground_probe: 4.0,
            walk_threshold: 12.0,
            death_offset: 200.0,
            death_freeze: 0.35,
            frame_duration: 0.12,
        }
    }
}

impl CharacterTuning {
    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    /// Height reached by one jump from rest: h = v² / (2g)
    pub fn single_jump_height(&self) -> f32 {
        self.jump_impulse * self.jump_impulse / (2.0 * self.gravity)
    }

    /// Height reached with every jump used at its apex.
    pub fn max_reachable_height(&self) -> f32 {
        self.single_jump_height() * self.max_jumps as f32
    }
}
