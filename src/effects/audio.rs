//! Effects domain: sound cues, background music and the mixer settings.

use bevy::prelude::*;
use std::collections::HashMap;
use std::path::Path;

pub const VOLUME_STEP: f32 = 0.1;
pub const MUSIC_PATH: &str = "audio/music.ogg";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundCue {
    Jump,
    DoubleJump,
    Land,
    Hit,
    Collect,
    Door,
    Death,
}

impl SoundCue {
    pub const ALL: [SoundCue; 7] = [
        SoundCue::Jump,
        SoundCue::DoubleJump,
        SoundCue::Land,
        SoundCue::Hit,
        SoundCue::Collect,
        SoundCue::Door,
        SoundCue::Death,
    ];

    /// Path under the assets root.
    pub fn path(self) -> &'static str {
        match self {
            SoundCue::Jump => "audio/jump.ogg",
            SoundCue::DoubleJump => "audio/double_jump.ogg",
            SoundCue::Land => "audio/land.ogg",
            SoundCue::Hit => "audio/hit.ogg",
            SoundCue::Collect => "audio/collect.ogg",
            SoundCue::Door => "audio/door.ogg",
            SoundCue::Death => "audio/death.ogg",
        }
    }
}

#[derive(Resource, Debug, Clone, PartialEq)]
pub struct AudioSettings {
    pub muted: bool,
    /// Effects volume in `0..=1`
    pub sfx_volume: f32,
    pub music_volume: f32,
    pub music_started: bool,
}

impl Default for AudioSettings {
    fn default() -> Self {
        Self {
            muted: false,
            sfx_volume: 0.7,
            music_volume: 0.4,
            music_started: false,
        }
    }
}

impl AudioSettings {
    pub fn toggle_mute(&mut self) -> bool {
        self.muted = !self.muted;
        self.muted
    }

    /// Step the effects volume, kept on the 0.1 grid within `0..=1`.
    pub fn adjust_volume(&mut self, delta: f32) -> f32 {
        let stepped = ((self.sfx_volume + delta) / VOLUME_STEP).round() * VOLUME_STEP;
        self.sfx_volume = stepped.clamp(0.0, 1.0);
        self.sfx_volume
    }

    pub fn effective_sfx_volume(&self) -> f32 {
        if self.muted { 0.0 } else { self.sfx_volume }
    }

    pub fn effective_music_volume(&self) -> f32 {
        if self.muted { 0.0 } else { self.music_volume }
    }
}

/// Handles for every sound file present on disk. Missing files are skipped
/// with a warning and their cues stay silent.
#[derive(Resource, Debug, Default)]
pub struct AudioLibrary {
    cues: HashMap<SoundCue, Handle<AudioSource>>,
    pub music: Option<Handle<AudioSource>>,
}

impl AudioLibrary {
    pub fn load(asset_server: &AssetServer, assets_root: &Path) -> Self {
        let mut library = Self::default();
        for cue in SoundCue::ALL {
            if let Some(handle) = load_if_present(asset_server, assets_root, cue.path()) {
                library.cues.insert(cue, handle);
            }
        }
        library.music = load_if_present(asset_server, assets_root, MUSIC_PATH);
        info!(
            "[AUDIO] {} of {} cues available, music {}",
            library.cues.len(),
            SoundCue::ALL.len(),
            if library.music.is_some() { "on" } else { "off" }
        );
        library
    }

    pub fn cue(&self, cue: SoundCue) -> Option<&Handle<AudioSource>> {
        self.cues.get(&cue)
    }

    pub fn cue_count(&self) -> usize {
        self.cues.len()
    }
}

fn load_if_present(
    asset_server: &AssetServer,
    assets_root: &Path,
    path: &str,
) -> Option<Handle<AudioSource>> {
    if assets_root.join(path).is_file() {
        Some(asset_server.load(path.to_string()))
    } else {
        warn!("[AUDIO] Missing sound '{}', skipping", path);
        None
    }
}

/// Marks the looping music entity.
#[derive(Component, Debug)]
pub struct MusicTrack;
