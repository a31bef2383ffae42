//! Effects domain: particles and audio reacting to gameplay events.

mod audio;
mod particles;
mod systems;


pub use audio::{AudioLibrary, AudioSettings, MUSIC_PATH, MusicTrack, SoundCue, VOLUME_STEP};
pub use particles::{
    BurstSpec, MAX_PARTICLES, PARTICLE_Z, Particle, ParticleSeed, ParticleStats, arc_direction,
    emit_burst, sample_range,
};

use bevy::prelude::*;

use crate::core::TickSet;
use crate::effects::systems::{
    handle_audio_keys, load_audio_library, play_sound_cues, spawn_particle_bursts, start_music,
    tick_particles,
};

pub struct EffectsPlugin;

impl Plugin for EffectsPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<AudioSettings>()
            .init_resource::<AudioLibrary>()
            .init_resource::<ParticleStats>()
            .add_systems(Startup, load_audio_library)
            .add_systems(
                Update,
                (
                    handle_audio_keys,
                    start_music,
                    play_sound_cues,
                    spawn_particle_bursts,
                    tick_particles,
                )
                    .chain()
                    .in_set(TickSet::Presentation),
            );
    }
}
