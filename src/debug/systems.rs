//! Debug domain: debug systems for input, overlays and the diagnostic handle.

use avian2d::prelude::*;
use bevy::ecs::message::{MessageReader, MessageWriter};
use bevy::prelude::*;

use crate::camera::CameraRig;
use crate::character::{AwaitingSpawn, Character, DeathEvent, JumpEvent, LandEvent, Player};
use crate::core::{GameplayPaused, SessionStats};
use crate::debug::diagnostic::{
    AudioSnapshot, CameraSnapshot, DiagnosticHandle, DiagnosticSnapshot, PlayerSnapshot,
};
use crate::debug::state::{DebugAction, DebugState, GRID_SPACING, grid_lines};
use crate::debug::ui::{
    DebugButton, DebugReadout, DebugStatusMessage, DebugUI, format_readout, spawn_debug_ui,
};
use crate::effects::{AudioLibrary, AudioSettings, ParticleStats};
use crate::input::{Action, InputState};
use crate::interaction::{
    BoxHitEvent, CollectibleCollectedEvent, ModalClosedEvent, ModalOpenedEvent, MysteryBoxStates,
    ProjectModal, ResetRequest,
};
use crate::physics::{PhysicsDebugSettings, screen_position, screen_velocity, to_scene};
use crate::transition::{TransitionManager, WorldEnteredEvent};
use crate::world::{InvisiblePlatform, WorldRuntime};

const GRID_COLOR: Color = Color::srgba(1.0, 1.0, 1.0, 0.15);

fn set_hud_visible(
    commands: &mut Commands,
    debug_state: &mut DebugState,
    physics_debug: &mut PhysicsDebugSettings,
    existing_ui: &Query<Entity, With<DebugUI>>,
    invisible: &mut Query<&mut Visibility, With<InvisiblePlatform>>,
    visible: bool,
) {
    debug_state.hud_visible = visible;
    physics_debug.enabled = visible;

    for entity in existing_ui.iter() {
        commands.entity(entity).despawn();
    }
    if visible {
        spawn_debug_ui(commands);
    }

    let platform_visibility = if visible {
        Visibility::Inherited
    } else {
        Visibility::Hidden
    };
    for mut visibility in invisible.iter_mut() {
        *visibility = platform_visibility;
    }
    info!("[DEBUG] HUD {}", if visible { "on" } else { "off" });
}

/// F1: debug panel, collider outlines and invisible platforms together.
pub(crate) fn toggle_debug_hud(
    mut commands: Commands,
    input: Res<InputState>,
    mut debug_state: ResMut<DebugState>,
    mut physics_debug: ResMut<PhysicsDebugSettings>,
    existing_ui: Query<Entity, With<DebugUI>>,
    mut invisible: Query<&mut Visibility, With<InvisiblePlatform>>,
) {
    if !input.was_just_pressed(Action::ToggleDebug) {
        return;
    }
    let visible = !debug_state.hud_visible;
    set_hud_visible(
        &mut commands,
        &mut debug_state,
        &mut physics_debug,
        &existing_ui,
        &mut invisible,
        visible,
    );
}

/// Platforms spawned by a world swap while the HUD is already on.
pub(crate) fn reveal_new_invisible_platforms(
    debug_state: Res<DebugState>,
    mut added: Query<&mut Visibility, Added<InvisiblePlatform>>,
) {
    if !debug_state.hud_visible {
        return;
    }
    for mut visibility in &mut added {
        *visibility = Visibility::Inherited;
    }
}

/// F2 grid and R reset hotkeys. Reset only fires while the HUD is open.
pub(crate) fn handle_debug_hotkeys(
    input: Res<InputState>,
    mut debug_state: ResMut<DebugState>,
    mut resets: MessageWriter<ResetRequest>,
) {
    if input.was_just_pressed(Action::ToggleGrid) {
        debug_state.grid_visible = !debug_state.grid_visible;
        let msg = if debug_state.grid_visible {
            "Grid ON"
        } else {
            "Grid OFF"
        };
        debug_state.set_message(msg, 2.0);
        info!("[DEBUG] {}", msg);
    }

    if debug_state.hud_visible && input.was_just_pressed(Action::Reset) {
        resets.write(ResetRequest);
        debug_state.set_message("Reset", 2.0);
        info!("[DEBUG] Reset requested");
    }
}

/// Handle button clicks in debug UI
pub(crate) fn handle_debug_buttons(
    mut commands: Commands,
    mut debug_state: ResMut<DebugState>,
    mut physics_debug: ResMut<PhysicsDebugSettings>,
    mut resets: MessageWriter<ResetRequest>,
    button_query: Query<(&DebugButton, &Interaction), Changed<Interaction>>,
    existing_ui: Query<Entity, With<DebugUI>>,
    mut invisible: Query<&mut Visibility, With<InvisiblePlatform>>,
) {
    for (button, interaction) in &button_query {
        if *interaction != Interaction::Pressed {
            continue;
        }

        match button.action {
            DebugAction::Reset => {
                resets.write(ResetRequest);
                debug_state.set_message("Reset", 2.0);
            }
            DebugAction::ToggleGrid => {
                debug_state.grid_visible = !debug_state.grid_visible;
                let msg = if debug_state.grid_visible {
                    "Grid ON"
                } else {
                    "Grid OFF"
                };
                debug_state.set_message(msg, 2.0);
            }
            DebugAction::Close => {
                set_hud_visible(
                    &mut commands,
                    &mut debug_state,
                    &mut physics_debug,
                    &existing_ui,
                    &mut invisible,
                    false,
                );
            }
        }
    }
}

/// Update status message timer and fade out
pub(crate) fn update_status_message(
    time: Res<Time>,
    mut debug_state: ResMut<DebugState>,
    mut query: Query<&mut Text, With<DebugStatusMessage>>,
) {
    debug_state.tick_message(time.delta_secs());
    let message = debug_state
        .status_message
        .as_ref()
        .map(|(message, _)| message.as_str())
        .unwrap_or("");
    for mut text in &mut query {
        if text.0 != message {
            **text = message.to_string();
        }
    }
}

/// Rebuild the snapshot from the live resources.
pub(crate) fn refresh_diagnostics(
    mut handle: ResMut<DiagnosticHandle>,
    stats: Res<SessionStats>,
    paused: Res<GameplayPaused>,
    modal: Res<ProjectModal>,
    manager: Res<TransitionManager>,
    rig: Res<CameraRig>,
    settings: Res<AudioSettings>,
    library: Res<AudioLibrary>,
    particles: Res<ParticleStats>,
    store: Res<MysteryBoxStates>,
    runtime: Option<Res<WorldRuntime>>,
    player: Query<(&Transform, &LinearVelocity, &Character), (With<Player>, Without<AwaitingSpawn>)>,
) {
    let boxes = runtime
        .as_ref()
        .map(|runtime| store.stats(runtime.box_ids().iter().map(String::as_str)))
        .unwrap_or_default();

    handle.snapshot = DiagnosticSnapshot {
        fps: stats.fps,
        game_time: stats.game_time,
        world: manager.current_world_id.clone(),
        transitioning: manager.is_transitioning(),
        paused: paused.is_paused(),
        modal_project: modal.project_id().map(str::to_string),
        player: player.iter().next().map(|(transform, velocity, character)| {
            PlayerSnapshot::capture(
                screen_position(transform),
                screen_velocity(velocity.0),
                character,
            )
        }),
        camera: CameraSnapshot::capture(&rig),
        audio: AudioSnapshot {
            muted: settings.muted,
            sfx_volume: settings.sfx_volume,
            music_started: settings.music_started,
            cues_loaded: library.cue_count(),
        },
        live_particles: particles.live,
        boxes: boxes.into(),
    };
}

pub(crate) fn update_debug_readout(
    debug_state: Res<DebugState>,
    handle: Res<DiagnosticHandle>,
    mut query: Query<&mut Text, With<DebugReadout>>,
) {
    if !debug_state.hud_visible {
        return;
    }
    for mut text in &mut query {
        **text = format_readout(&handle.snapshot);
    }
}

/// `--diagnostic`: one `[DIAG]` line per game event, carrying the snapshot.
pub(crate) fn log_diagnostic_events(
    handle: Res<DiagnosticHandle>,
    mut jumps: MessageReader<JumpEvent>,
    mut lands: MessageReader<LandEvent>,
    mut deaths: MessageReader<DeathEvent>,
    mut hits: MessageReader<BoxHitEvent>,
    mut collected: MessageReader<CollectibleCollectedEvent>,
    mut opened: MessageReader<ModalOpenedEvent>,
    mut closed: MessageReader<ModalClosedEvent>,
    mut entered: MessageReader<WorldEnteredEvent>,
) {
    for event in jumps.read() {
        handle.log(&format!("jump:{:?}", event.kind));
    }
    for _ in lands.read() {
        handle.log("land");
    }
    for event in deaths.read() {
        handle.log(&format!("death:{}", event.respawns));
    }
    for event in hits.read() {
        handle.log(&format!("box_hit:{}", event.box_id));
    }
    for event in collected.read() {
        handle.log(&format!("collected:{}", event.box_id));
    }
    for event in opened.read() {
        handle.log(&format!("modal_opened:{}", event.project_id));
    }
    for event in closed.read() {
        handle.log(&format!("modal_closed:{}", event.project_id));
    }
    for event in entered.read() {
        handle.log(&format!("world_entered:{}", event.world_id));
    }
}

/// F2: grid lines every `GRID_SPACING` world pixels over the visible area.
pub(crate) fn draw_debug_grid(
    debug_state: Res<DebugState>,
    rig: Res<CameraRig>,
    mut gizmos: Gizmos,
) {
    if !debug_state.grid_visible {
        return;
    }
    let view_min = rig.screen_to_world(Vec2::ZERO);
    let view_max = rig.screen_to_world(rig.viewport);
    for (start, end) in grid_lines(view_min, view_max, GRID_SPACING) {
        gizmos.line_2d(to_scene(start), to_scene(end), GRID_COLOR);
    }
}
