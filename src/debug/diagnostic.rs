//! Debug domain: a serialisable snapshot of the running game.
//!
//! The snapshot is rebuilt every tick. The debug panel renders it as text and
//! `--diagnostic` logs it as JSON whenever a game event fires.

use bevy::prelude::*;
use serde::Serialize;

use crate::camera::CameraRig;
use crate::character::Character;
use crate::interaction::BoxStats;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PlayerSnapshot {
    pub x: f32,
    pub y: f32,
    pub vx: f32,
    pub vy: f32,
    pub grounded: bool,
    pub jumps_remaining: u8,
    pub animation: String,
    pub deaths: u32,
}

impl PlayerSnapshot {
    /// `center` and `velocity` are screen space.
    pub fn capture(center: Vec2, velocity: Vec2, character: &Character) -> Self {
        Self {
            x: center.x,
            y: center.y,
            vx: velocity.x,
            vy: velocity.y,
            grounded: character.is_grounded,
            jumps_remaining: character.jumps_remaining,
            animation: character.animation.label().to_string(),
            deaths: character.respawns,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CameraSnapshot {
    pub x: f32,
    pub y: f32,
    pub zoom: f32,
    pub mode: String,
    pub shaking: bool,
}

impl CameraSnapshot {
    pub fn capture(rig: &CameraRig) -> Self {
        Self {
            x: rig.position.x,
            y: rig.position.y,
            zoom: rig.zoom,
            mode: rig.mode.label().to_string(),
            shaking: rig.is_shaking(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AudioSnapshot {
    pub muted: bool,
    pub sfx_volume: f32,
    pub music_started: bool,
    pub cues_loaded: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BoxSnapshot {
    pub inactive: usize,
    pub hit: usize,
    pub completed: usize,
}

impl From<BoxStats> for BoxSnapshot {
    fn from(stats: BoxStats) -> Self {
        Self {
            inactive: stats.inactive,
            hit: stats.hit,
            completed: stats.completed,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DiagnosticSnapshot {
    pub fps: f32,
    pub game_time: f32,
    pub world: Option<String>,
    pub transitioning: bool,
    pub paused: bool,
    pub modal_project: Option<String>,
    pub player: Option<PlayerSnapshot>,
    pub camera: CameraSnapshot,
    pub audio: AudioSnapshot,
    pub live_particles: usize,
    pub boxes: BoxSnapshot,
}

impl DiagnosticSnapshot {
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Key/value rows for the debug panel.
    pub fn readout(&self) -> Vec<(&'static str, String)> {
        let mut rows = vec![
            ("FPS", format!("{:.0}", self.fps)),
            ("Game time", format!("{:.1}s", self.game_time)),
            (
                "World",
                self.world.clone().unwrap_or_else(|| "-".to_string()),
            ),
        ];
        match &self.player {
            Some(p) => {
                rows.push(("Deaths", p.deaths.to_string()));
                rows.push(("Pose", format!("({:.0}, {:.0}) {}", p.x, p.y, p.animation)));
                rows.push(("Velocity", format!("({:.0}, {:.0})", p.vx, p.vy)));
                rows.push(("Grounded", p.grounded.to_string()));
                rows.push(("Jumps", p.jumps_remaining.to_string()));
            }
            None => rows.push(("Player", "not placed".to_string())),
        }
        rows.push((
            "Camera",
            format!(
                "({:.0}, {:.0}) x{:.2} {}{}",
                self.camera.x,
                self.camera.y,
                self.camera.zoom,
                self.camera.mode,
                if self.camera.shaking { " shake" } else { "" }
            ),
        ));
        rows.push((
            "Audio",
            format!(
                "{} vol {:.1} music {} ({} cues)",
                if self.audio.muted { "muted" } else { "on" },
                self.audio.sfx_volume,
                if self.audio.music_started { "on" } else { "off" },
                self.audio.cues_loaded
            ),
        ));
        rows.push(("Particles", self.live_particles.to_string()));
        rows.push((
            "Boxes",
            format!(
                "{} inactive / {} hit / {} completed",
                self.boxes.inactive, self.boxes.hit, self.boxes.completed
            ),
        ));
        rows.push((
            "State",
            match (&self.modal_project, self.paused, self.transitioning) {
                (Some(project), _, _) => format!("modal '{}'", project),
                (None, true, _) => "paused".to_string(),
                (None, false, true) => "transitioning".to_string(),
                (None, false, false) => "running".to_string(),
            },
        ));
        rows
    }
}

/// Latest snapshot; `logging` is set by `--diagnostic`.
#[derive(Resource, Debug, Default)]
pub struct DiagnosticHandle {
    pub logging: bool,
    pub snapshot: DiagnosticSnapshot,
}

impl DiagnosticHandle {
    pub fn log(&self, event: &str) {
        if !self.logging {
            return;
        }
        match self.snapshot.to_json() {
            Ok(json) => info!("[DIAG] {} {}", event, json),
            Err(e) => warn!("[DIAG] Snapshot failed to serialise: {}", e),
        }
    }
}
