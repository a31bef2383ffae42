//! Character domain: the player body and its movement state.

use bevy::prelude::*;

use crate::character::JumpKind;

/// Marker for the physics-bodied player entity.
#[derive(Component, Debug)]
pub struct Player;

/// Child entity carrying the player's sprite, so visual squash never scales
/// the collider.
#[derive(Component, Debug)]
pub struct PlayerVisual;

/// Present until the first world places the player; control is skipped meanwhile.
#[derive(Component, Debug)]
pub struct AwaitingSpawn;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Facing {
    Left,
    #[default]
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AnimationState {
    #[default]
    Idle,
    Walking,
    Jumping,
    Falling,
}

impl AnimationState {
    /// Pick the state from screen-space velocity (+y down) and ground contact.
    pub fn from_motion(vx: f32, vy: f32, grounded: bool, walk_threshold: f32) -> Self {
        if grounded {
            if vx.abs() > walk_threshold {
                AnimationState::Walking
            } else {
                AnimationState::Idle
            }
        } else if vy < 0.0 {
            AnimationState::Jumping
        } else {
            AnimationState::Falling
        }
    }

    pub fn frame_count(self) -> u32 {
        match self {
            AnimationState::Idle => 2,
            AnimationState::Walking => 4,
            AnimationState::Jumping | AnimationState::Falling => 1,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            AnimationState::Idle => "idle",
            AnimationState::Walking => "walking",
            AnimationState::Jumping => "jumping",
            AnimationState::Falling => "falling",
        }
    }
}

#[derive(Component, Debug, Clone)]
pub struct Character {
    pub is_grounded: bool,
    pub jumps_remaining: u8,
    pub max_jumps: u8,
    pub facing: Facing,
    pub animation: AnimationState,
    pub animation_frame: u32,
    frame_timer: f32,
    /// Times the character has fallen out of the world
    pub respawns: u32,
    /// Seconds left frozen after a death, before the respawn
    pub death_freeze: Option<f32>,
}

impl Character {
    pub fn new(max_jumps: u8) -> Self {
        Self {
            is_grounded: false,
            jumps_remaining: max_jumps,
            max_jumps,
            facing: Facing::Right,
            animation: AnimationState::Idle,
            animation_frame: 0,
            frame_timer: 0.0,
            respawns: 0,
            death_freeze: None,
        }
    }

    /// Record this tick's ground sample. Returns true on the grounded rising
    /// edge, the only place jumps are restored.
    pub fn update_grounded(&mut self, grounded: bool) -> bool {
        let landed = grounded && !self.is_grounded;
        self.is_grounded = grounded;
        if landed {
            self.jumps_remaining = self.max_jumps;
        }
        landed
    }

    /// Spend one jump if any remain.
    pub fn try_jump(&mut self) -> Option<JumpKind> {
        if self.jumps_remaining == 0 {
            return None;
        }
        let kind = if self.jumps_remaining == self.max_jumps {
            JumpKind::Normal
        } else {
            JumpKind::Double
        };
        self.jumps_remaining -= 1;
        Some(kind)
    }

    /// Facing follows the last nonzero horizontal intent.
    pub fn face(&mut self, axis: f32) {
        if axis > 0.1 {
            self.facing = Facing::Right;
        } else if axis < -0.1 {
            self.facing = Facing::Left;
        }
    }

    pub fn set_animation(&mut self, state: AnimationState) {
        if self.animation != state {
            self.animation = state;
            self.animation_frame = 0;
            self.frame_timer = 0.0;
        }
    }

    pub fn tick_animation(&mut self, dt: f32, frame_duration: f32) {
        self.frame_timer += dt;
        while frame_duration > 0.0 && self.frame_timer >= frame_duration {
            self.frame_timer -= frame_duration;
            self.animation_frame = (self.animation_frame + 1) % self.animation.frame_count();
        }
    }

    pub fn is_frozen(&self) -> bool {
        self.death_freeze.is_some()
    }

    /// Start a death if `screen_y` is past `death_y`. A frozen character
    /// cannot die again until it has respawned.
    pub fn check_death(&mut self, screen_y: f32, death_y: f32, freeze: f32) -> bool {
        if self.is_frozen() || screen_y <= death_y {
            return false;
        }
        self.respawns += 1;
        self.death_freeze = Some(freeze);
        true
    }

    /// Count the freeze down. Returns true on the tick the respawn is due.
    pub fn tick_freeze(&mut self, dt: f32) -> bool {
        let Some(left) = self.death_freeze.as_mut() else {
            return false;
        };
        *left -= dt;
        *left <= 0.0
    }

    /// Restore the state a fresh spawn starts with.
    pub fn reset_for_respawn(&mut self) {
        self.jumps_remaining = self.max_jumps;
        self.is_grounded = false;
        self.death_freeze = None;
        self.set_animation(AnimationState::Idle);
    }
}

/// Where the current world respawns the player and where falling kills them.
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct RespawnPoint {
    /// Screen-space spawn position (body center)
    pub spawn: Vec2,
    /// Screen-space y past which the character dies
    pub death_y: f32,
}

impl Default for RespawnPoint {
    fn default() -> Self {
        Self {
            spawn: Vec2::new(100.0, 400.0),
            death_y: 800.0,
        }
    }
}

/// Vertical speed relative to the supporting body is near zero, so riding a
/// moving platform still counts as standing.
pub fn is_resting_on(body_vy: f32, support_vy: f32, epsilon: f32) -> bool {
    (body_vy - support_vy).abs() < epsilon
}

/// Move `current` toward `target` by at most `step`.
pub fn approach(current: f32, target: f32, step: f32) -> f32 {
    if current < target {
        (current + step).min(target)
    } else {
        (current - step).max(target)
    }
}
