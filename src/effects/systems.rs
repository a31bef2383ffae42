//! Effects domain: systems turning game events into particles and sound.

use bevy::audio::{AudioSinkPlayback, Volume};
use bevy::color::Alpha;
use bevy::ecs::message::MessageReader;
use bevy::prelude::*;

use crate::character::{CharacterTuning, DeathEvent, JumpEvent, JumpKind, LandEvent};
use crate::core::{EffectsRng, LaunchOptions};
use crate::effects::{
    AudioLibrary, AudioSettings, BurstSpec, MAX_PARTICLES, MusicTrack, PARTICLE_Z, Particle,
    ParticleStats, SoundCue, VOLUME_STEP, emit_burst,
};
use crate::input::{Action, InputState};
use crate::interaction::{BoxHitEvent, CollectibleCollectedEvent};
use crate::physics::scene_translation;
use crate::transition::{TransitionKind, WorldEnteredEvent};

pub(crate) fn load_audio_library(
    mut commands: Commands,
    asset_server: Res<AssetServer>,
    options: Res<LaunchOptions>,
) {
    commands.insert_resource(AudioLibrary::load(&asset_server, &options.assets));
}

pub(crate) fn spawn_particle_bursts(
    mut commands: Commands,
    tuning: Res<CharacterTuning>,
    mut rng: ResMut<EffectsRng>,
    mut stats: ResMut<ParticleStats>,
    mut lands: MessageReader<LandEvent>,
    mut jumps: MessageReader<JumpEvent>,
    mut hits: MessageReader<BoxHitEvent>,
    mut collects: MessageReader<CollectibleCollectedEvent>,
) {
    let feet = Vec2::new(0.0, tuning.height * 0.5);
    let mut bursts: Vec<(BurstSpec, Vec2)> = Vec::new();
    bursts.extend(
        lands
            .read()
            .map(|e| (BurstSpec::landing_dust(), e.position + feet)),
    );
    bursts.extend(
        jumps
            .read()
            .filter(|e| e.kind == JumpKind::Double)
            .map(|e| (BurstSpec::double_jump_puff(), e.position + feet)),
    );
    bursts.extend(hits.read().map(|e| (BurstSpec::hit_sparks(), e.position)));
    bursts.extend(
        collects
            .read()
            .map(|e| (BurstSpec::collect_sparkle(), e.position)),
    );

    for (spec, origin) in bursts {
        for seed in emit_burst(&spec, origin, &mut rng.0) {
            if stats.live >= MAX_PARTICLES {
                stats.dropped += 1;
                continue;
            }
            stats.live += 1;
            stats.spawned += 1;
            commands.spawn((
                Particle::new(seed, spec.gravity),
                Sprite::from_color(spec.color, Vec2::splat(spec.size)),
                Transform::from_translation(scene_translation(seed.position, PARTICLE_Z)),
            ));
        }
    }
}

pub(crate) fn tick_particles(
    mut commands: Commands,
    time: Res<Time>,
    mut stats: ResMut<ParticleStats>,
    mut particles: Query<(Entity, &mut Particle, &mut Transform, &mut Sprite)>,
) {
    let dt = time.delta_secs();
    let mut live = 0;
    for (entity, mut particle, mut transform, mut sprite) in &mut particles {
        if !particle.advance(dt) {
            commands.entity(entity).despawn();
            continue;
        }
        live += 1;
        transform.translation = scene_translation(particle.position, PARTICLE_Z);
        sprite.color.set_alpha(particle.alpha());
    }
    stats.live = live;
}

/// M mutes, +/- step the effects volume.
pub(crate) fn handle_audio_keys(
    input: Res<InputState>,
    mut settings: ResMut<AudioSettings>,
    mut music: Query<&mut AudioSink, With<MusicTrack>>,
) {
    let mut changed = false;
    if input.was_just_pressed(Action::ToggleMute) {
        let muted = settings.toggle_mute();
        info!("[AUDIO] {}", if muted { "Muted" } else { "Unmuted" });
        changed = true;
    }
    if input.was_just_pressed(Action::VolumeUp) {
        let volume = settings.adjust_volume(VOLUME_STEP);
        info!("[AUDIO] Effects volume {:.1}", volume);
    }
    if input.was_just_pressed(Action::VolumeDown) {
        let volume = settings.adjust_volume(-VOLUME_STEP);
        info!("[AUDIO] Effects volume {:.1}", volume);
    }
    if changed {
        for mut sink in &mut music {
            sink.set_volume(Volume::Linear(settings.effective_music_volume()));
        }
    }
}

/// Music starts on the first key or touch, or when B is pressed.
pub(crate) fn start_music(
    mut commands: Commands,
    input: Res<InputState>,
    library: Res<AudioLibrary>,
    mut settings: ResMut<AudioSettings>,
) {
    if settings.music_started || !input.any_just_pressed() {
        return;
    }
    let Some(music) = library.music.clone() else {
        if input.was_just_pressed(Action::StartMusic) {
            warn!("[AUDIO] No music track to start");
        }
        return;
    };
    commands.spawn((
        MusicTrack,
        AudioPlayer::new(music),
        PlaybackSettings::LOOP.with_volume(Volume::Linear(settings.effective_music_volume())),
    ));
    settings.music_started = true;
    info!("[AUDIO] Music started");
}

pub(crate) fn play_sound_cues(
    mut commands: Commands,
    library: Res<AudioLibrary>,
    settings: Res<AudioSettings>,
    mut jumps: MessageReader<JumpEvent>,
    mut lands: MessageReader<LandEvent>,
    mut hits: MessageReader<BoxHitEvent>,
    mut collects: MessageReader<CollectibleCollectedEvent>,
    mut deaths: MessageReader<DeathEvent>,
    mut entered: MessageReader<WorldEnteredEvent>,
) {
    let mut cues = Vec::new();
    cues.extend(jumps.read().map(|e| match e.kind {
        JumpKind::Normal => SoundCue::Jump,
        JumpKind::Double => SoundCue::DoubleJump,
    }));
    cues.extend(lands.read().map(|_| SoundCue::Land));
    cues.extend(hits.read().map(|_| SoundCue::Hit));
    cues.extend(collects.read().map(|_| SoundCue::Collect));
    cues.extend(deaths.read().map(|_| SoundCue::Death));
    cues.extend(
        entered
            .read()
            .filter(|e| matches!(e.kind, TransitionKind::Entry | TransitionKind::Exit))
            .map(|_| SoundCue::Door),
    );

    let volume = settings.effective_sfx_volume();
    if volume <= 0.0 {
        return;
    }
    for cue in cues {
        let Some(handle) = library.cue(cue) else {
            continue;
        };
        commands.spawn((
            AudioPlayer::new(handle.clone()),
            PlaybackSettings::DESPAWN.with_volume(Volume::Linear(volume)),
        ));
    }
}
