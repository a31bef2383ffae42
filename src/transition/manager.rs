//! Transition domain: world swap bookkeeping.

use bevy::ecs::message::Message;
use bevy::prelude::*;
use std::collections::{BTreeMap, HashMap};

use crate::camera::CameraRig;
use crate::content::{RuntimeSettings, SpawnCoord};
use crate::world::{PlatformKind, WorldConfig};

/// What started a world swap; decides where the player lands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionKind {
    /// Walked through a door into a sub-world
    Entry,
    /// Walked back out towards the hub
    Exit,
    /// Launch route naming a world
    Url,
    /// Back/forward through the navigation history
    History,
    /// First load with no route
    Initial,
    /// Global reset back to the hub
    Reset,
}

impl TransitionKind {
    pub fn label(self) -> &'static str {
        match self {
            TransitionKind::Entry => "entry",
            TransitionKind::Exit => "exit",
            TransitionKind::Url => "url",
            TransitionKind::History => "history",
            TransitionKind::Initial => "initial",
            TransitionKind::Reset => "reset",
        }
    }

    /// Completed swaps of this kind add a history entry.
    pub fn pushes_history(self) -> bool {
        matches!(
            self,
            TransitionKind::Entry | TransitionKind::Exit | TransitionKind::Url
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TransitionRequest {
    pub target: String,
    /// Screen-space spawn overriding every other rule
    pub spawn: Option<Vec2>,
    pub kind: TransitionKind,
}

impl Message for TransitionRequest {}

impl TransitionRequest {
    pub fn new(target: impl Into<String>, kind: TransitionKind) -> Self {
        Self {
            target: target.into(),
            spawn: None,
            kind,
        }
    }

    pub fn with_spawn(mut self, spawn: Option<Vec2>) -> Self {
        self.spawn = spawn;
        self
    }
}

/// Written once the new world is built and the player placed in it.
#[derive(Debug, Clone)]
pub struct WorldEnteredEvent {
    pub world_id: String,
    pub name: String,
    pub spawn: Vec2,
    pub kind: TransitionKind,
}

impl Message for WorldEnteredEvent {}

/// A requested world could not be loaded. `fatal` when there is no world to
/// stay in.
#[derive(Debug, Clone)]
pub struct WorldLoadFailed {
    pub world_id: String,
    pub reason: String,
    pub fatal: bool,
}

impl Message for WorldLoadFailed {}

#[derive(Resource, Debug, Default)]
pub struct TransitionManager {
    pub current_world_id: Option<String>,
    /// Last position (body center, screen space) the player had in each world
    pub player_positions: HashMap<String, Vec2>,
    is_transitioning: bool,
}

impl TransitionManager {
    pub fn is_transitioning(&self) -> bool {
        self.is_transitioning
    }

    /// Claim the transition slot. A request made while another swap is in
    /// flight is dropped and `false` returned.
    pub fn begin(&mut self, request: &TransitionRequest) -> bool {
        if self.is_transitioning {
            debug!(
                "[TRANSITION] Dropped {} request for '{}', already transitioning",
                request.kind.label(),
                request.target
            );
            return false;
        }
        self.is_transitioning = true;
        true
    }

    /// Remember where the player stood in the world being left.
    pub fn save_position(&mut self, position: Vec2) {
        if let Some(world) = &self.current_world_id {
            self.player_positions.insert(world.clone(), position);
        }
    }

    pub fn saved_position(&self, world: &str) -> Option<Vec2> {
        self.player_positions.get(world).copied()
    }

    /// Where the player lands: an explicit spawn, then the progression point of
    /// the world being exited, then (for routes) the saved position, then the
    /// target's own default.
    pub fn resolve_spawn(
        &self,
        request: &TransitionRequest,
        progression: &BTreeMap<String, SpawnCoord>,
        default_spawn: Vec2,
    ) -> Vec2 {
        if let Some(spawn) = request.spawn {
            return spawn;
        }
        match request.kind {
            TransitionKind::Exit => self
                .current_world_id
                .as_ref()
                .and_then(|source| progression.get(source))
                .map(|p| Vec2::new(p.x, p.y))
                .unwrap_or(default_spawn),
            TransitionKind::Url | TransitionKind::History => self
                .saved_position(&request.target)
                .unwrap_or(default_spawn),
            _ => default_spawn,
        }
    }

    pub fn complete(&mut self, world_id: impl Into<String>) {
        self.current_world_id = Some(world_id.into());
        self.is_transitioning = false;
    }

    /// Give up on the in-flight swap; the current world stays as it was.
    pub fn abort(&mut self) {
        self.is_transitioning = false;
    }

    pub fn reset_positions(&mut self) {
        self.player_positions.clear();
    }
}

/// Blocks door triggers for a moment after every arrival.
#[derive(Resource, Debug)]
pub struct TransitionCooldown {
    pub timer: Timer,
}

impl Default for TransitionCooldown {
    fn default() -> Self {
        Self {
            timer: Timer::from_seconds(0.3, TimerMode::Once),
        }
    }
}

impl TransitionCooldown {
    pub fn reset(&mut self) {
        self.timer.reset();
    }

    pub fn tick(&mut self, delta: std::time::Duration) {
        self.timer.tick(delta);
    }

    pub fn can_transition(&self) -> bool {
        self.timer.remaining_secs() == 0.0
    }
}

/// Door the player is standing in. Arriving inside a door latches it, so only
/// walking into a door anew fires it.
#[derive(Resource, Debug, Default)]
pub struct DoorLatch {
    inside: Option<Entity>,
}

impl DoorLatch {
    /// Record this tick's overlap and say whether it should fire.
    pub fn observe(&mut self, overlapping: Option<Entity>, armed: bool) -> bool {
        let entered = overlapping.is_some() && overlapping != self.inside;
        self.inside = overlapping;
        armed && entered
    }

    pub fn clear(&mut self) {
        self.inside = None;
    }
}

/// Where the player and camera end up when `request` completes into `config`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArrivalPlan {
    /// Screen-space body center the player is placed at
    pub spawn: Vec2,
    /// The world's own spawn, used for respawns after a death
    pub respawn: Vec2,
    /// Camera top-left before bounds clamping
    pub camera: Vec2,
}

pub fn plan_arrival(
    manager: &TransitionManager,
    request: &TransitionRequest,
    settings: &RuntimeSettings,
    config: &WorldConfig,
    rig: &CameraRig,
    touch: bool,
) -> ArrivalPlan {
    let respawn = config.spawn_point.resolve(touch);
    let spawn = manager.resolve_spawn(request, &settings.progression_spawns, respawn);
    let camera = if config.id == settings.hub_world {
        let tuning = rig.tuning();
        let anchor = if touch {
            tuning.hub_anchor_touch
        } else {
            tuning.hub_anchor_desktop
        };
        hub_camera_position(spawn, anchor, ground_bottom(config), rig.viewport)
    } else {
        spawn - rig.viewport * 0.5
    };
    ArrivalPlan {
        spawn,
        respawn,
        camera,
    }
}

/// Camera pose on arriving in the hub: the player sits `anchor` of the way
/// across the view and the underside of the ground meets the view's bottom.
pub fn hub_camera_position(spawn: Vec2, anchor: f32, ground_bottom: f32, viewport: Vec2) -> Vec2 {
    Vec2::new(spawn.x - viewport.x * anchor, ground_bottom - viewport.y)
}

/// Lowest edge of the world's ground platforms, or the world height if it has
/// none.
pub fn ground_bottom(config: &WorldConfig) -> f32 {
    config
        .platforms
        .iter()
        .filter(|p| p.kind == PlatformKind::Ground)
        .map(|p| p.y + p.height)
        .reduce(f32::max)
        .unwrap_or(config.dimensions.height)
}
