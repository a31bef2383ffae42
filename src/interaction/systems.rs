//! Interaction domain: hit detection, collection, modal open/close and reset.

use avian2d::prelude::*;
use bevy::ecs::message::{MessageReader, MessageWriter};
use bevy::prelude::*;
use bevy::window::PrimaryWindow;

use crate::camera::{CameraRig, ShakePreset};
use crate::character::{AwaitingSpawn, CharacterTuning, Player};
use crate::content::ProjectCatalog;
use crate::core::{GameplayPaused, PAUSE_PROJECT_MODAL};
use crate::input::{Action, InputState};
use crate::interaction::modal::spawn_modal_panel;
use crate::interaction::{
    BoxBounce, BoxGlyph, BoxHitEvent, BoxState, BoxVisual, Collectible, CollectibleCollectedEvent,
    CollectibleVisual, MODAL_BREAKPOINT, ModalCloseButton, ModalClosedEvent, ModalLayout,
    ModalOpenedEvent, MysteryBox, MysteryBoxStates, ProjectModal, ProjectModalUI, ResetRequest,
    collectible_body_id, spawn_collectible,
};
use crate::physics::{Aabb, BodyRegistry, despawn_body, screen_position, screen_velocity};

/// Screen-space rectangle of the player body.
fn player_rect(transform: &Transform, tuning: &CharacterTuning) -> Aabb {
    Aabb::from_center(screen_position(transform), tuning.size())
}

fn window_width(windows: &Query<&Window, With<PrimaryWindow>>) -> f32 {
    windows
        .single()
        .map_or(MODAL_BREAKPOINT, |window| window.width())
}

pub(crate) fn detect_box_hits(
    mut commands: Commands,
    mut registry: ResMut<BodyRegistry>,
    tuning: Res<CharacterTuning>,
    mut store: ResMut<MysteryBoxStates>,
    mut rig: ResMut<CameraRig>,
    mut hit_events: MessageWriter<BoxHitEvent>,
    player: Query<(&Transform, &LinearVelocity), (With<Player>, Without<AwaitingSpawn>)>,
    mut boxes: Query<(Entity, &mut MysteryBox)>,
) {
    let Ok((transform, velocity)) = player.single() else {
        return;
    };
    let rect = player_rect(transform, &tuning);
    let vy = screen_velocity(velocity.0).y;

    for (entity, mut mystery_box) in &mut boxes {
        if !mystery_box.is_hit_from_below(&rect, vy) || !mystery_box.try_hit() {
            continue;
        }
        info!("[BOX] '{}' hit from below", mystery_box.id);
        store.set(&mystery_box.id, BoxState::Hit);
        spawn_collectible(
            &mut commands,
            &mut registry,
            &mystery_box.id,
            entity,
            mystery_box.collectible_origin(),
        );
        commands.entity(entity).insert(BoxBounce::default());
        rig.shake(ShakePreset::Light);
        hit_events.write(BoxHitEvent {
            box_id: mystery_box.id.clone(),
            position: mystery_box.rect.center(),
        });
    }
}

pub(crate) fn collect_collectibles(
    mut commands: Commands,
    mut registry: ResMut<BodyRegistry>,
    tuning: Res<CharacterTuning>,
    mut store: ResMut<MysteryBoxStates>,
    mut collected_events: MessageWriter<CollectibleCollectedEvent>,
    player: Query<&Transform, (With<Player>, Without<AwaitingSpawn>)>,
    collectibles: Query<&Collectible>,
    mut boxes: Query<&mut MysteryBox>,
) {
    let Ok(transform) = player.single() else {
        return;
    };
    let rect = player_rect(transform, &tuning);

    for collectible in &collectibles {
        if !collectible.is_collected_by(&rect) {
            continue;
        }
        despawn_body(
            &mut commands,
            &mut registry,
            &collectible_body_id(&collectible.box_id),
        );
        if let Ok(mut mystery_box) = boxes.get_mut(collectible.box_entity)
            && mystery_box.complete()
        {
            store.set(&mystery_box.id, BoxState::Completed);
        }
        info!("[BOX] Collectible for '{}' collected", collectible.box_id);
        collected_events.write(CollectibleCollectedEvent {
            box_id: collectible.box_id.clone(),
            position: collectible.rect.center(),
        });
    }
}

/// Opening pauses gameplay and puts the camera in modal framing.
pub(crate) fn open_modal_on_collect(
    mut commands: Commands,
    mut collected: MessageReader<CollectibleCollectedEvent>,
    catalog: Res<ProjectCatalog>,
    windows: Query<&Window, With<PrimaryWindow>>,
    mut modal: ResMut<ProjectModal>,
    mut paused: ResMut<GameplayPaused>,
    mut rig: ResMut<CameraRig>,
    mut opened: MessageWriter<ModalOpenedEvent>,
) {
    for event in collected.read() {
        if !modal.open(event.box_id.clone()) {
            continue;
        }
        let layout = ModalLayout::for_width(window_width(&windows));
        spawn_modal_panel(
            &mut commands,
            &event.box_id,
            catalog.get(&event.box_id),
            layout,
        );
        paused.pause(PAUSE_PROJECT_MODAL);
        rig.enter_modal();
        info!("[MODAL] Opened '{}' ({:?})", event.box_id, layout);
        opened.write(ModalOpenedEvent {
            project_id: event.box_id.clone(),
        });
    }
}

/// Runs while paused. The close key's jump edge is consumed so resuming
/// never doubles as a jump.
pub(crate) fn close_modal_on_input(
    mut commands: Commands,
    mut input: ResMut<InputState>,
    buttons: Query<&Interaction, (With<ModalCloseButton>, Changed<Interaction>)>,
    panels: Query<Entity, With<ProjectModalUI>>,
    mut modal: ResMut<ProjectModal>,
    mut paused: ResMut<GameplayPaused>,
    mut rig: ResMut<CameraRig>,
    mut closed: MessageWriter<ModalClosedEvent>,
) {
    if !modal.is_open() {
        return;
    }
    let key = input.was_just_pressed(Action::CloseModal);
    let clicked = buttons
        .iter()
        .any(|interaction| *interaction == Interaction::Pressed);
    if !key && !clicked {
        return;
    }

    input.consume(Action::CloseModal);
    input.consume(Action::Jump);
    if let Some(project_id) = close_modal(
        &mut commands,
        &panels,
        &mut modal,
        &mut paused,
        &mut rig,
    ) {
        closed.write(ModalClosedEvent { project_id });
    }
}

fn close_modal(
    commands: &mut Commands,
    panels: &Query<Entity, With<ProjectModalUI>>,
    modal: &mut ProjectModal,
    paused: &mut GameplayPaused,
    rig: &mut CameraRig,
) -> Option<String> {
    let project_id = modal.close()?;
    for entity in panels {
        commands.entity(entity).despawn();
    }
    paused.unpause(PAUSE_PROJECT_MODAL);
    rig.exit_modal();
    info!("[MODAL] Closed '{}'", project_id);
    Some(project_id)
}

/// Store cleared, modal closed, live boxes back to inactive, camera reset.
/// The hub reload is handled by the transition domain.
pub(crate) fn apply_reset(
    mut commands: Commands,
    mut requests: MessageReader<ResetRequest>,
    mut registry: ResMut<BodyRegistry>,
    mut store: ResMut<MysteryBoxStates>,
    panels: Query<Entity, With<ProjectModalUI>>,
    mut modal: ResMut<ProjectModal>,
    mut paused: ResMut<GameplayPaused>,
    mut rig: ResMut<CameraRig>,
    mut closed: MessageWriter<ModalClosedEvent>,
    collectibles: Query<&Collectible>,
    mut boxes: Query<(Entity, &mut MysteryBox)>,
) {
    if requests.read().count() == 0 {
        return;
    }

    store.reset();
    if let Some(project_id) = close_modal(
        &mut commands,
        &panels,
        &mut modal,
        &mut paused,
        &mut rig,
    ) {
        closed.write(ModalClosedEvent { project_id });
    }
    paused.clear();

    for collectible in &collectibles {
        despawn_body(
            &mut commands,
            &mut registry,
            &collectible_body_id(&collectible.box_id),
        );
    }
    for (entity, mut mystery_box) in &mut boxes {
        *mystery_box = MysteryBox::new(mystery_box.id.clone(), mystery_box.rect.min);
        commands.entity(entity).remove::<BoxBounce>();
    }
    rig.reset();
    info!("[STATE] Global reset applied");
}

pub(crate) fn animate_box_bounce(
    mut commands: Commands,
    time: Res<Time>,
    mut boxes: Query<(Entity, &mut BoxBounce, &Children)>,
    mut visuals: Query<&mut Transform, With<BoxVisual>>,
) {
    for (entity, mut bounce, children) in &mut boxes {
        bounce.advance(time.delta_secs());
        let scale = bounce.scale();
        for child in children.iter() {
            if let Ok(mut transform) = visuals.get_mut(child) {
                transform.scale = Vec3::new(scale, scale, 1.0);
            }
        }
        if bounce.is_finished() {
            commands.entity(entity).remove::<BoxBounce>();
        }
    }
}

pub(crate) fn animate_collectibles(
    time: Res<Time>,
    mut collectibles: Query<(&mut Collectible, &Children)>,
    mut visuals: Query<&mut Transform, With<CollectibleVisual>>,
) {
    for (mut collectible, children) in &mut collectibles {
        collectible.elapsed += time.delta_secs();
        // Screen offset is +y down; scene translation is +y up.
        let lift = -collectible.bob_offset();
        for child in children.iter() {
            if let Ok(mut transform) = visuals.get_mut(child) {
                transform.translation.y = lift;
            }
        }
    }
}

/// Colour and glyph follow the box state in the same tick it changes.
pub(crate) fn sync_box_visuals(
    boxes: Query<(&MysteryBox, &Children), Changed<MysteryBox>>,
    mut sprites: Query<(&mut Sprite, &Children), With<BoxVisual>>,
    mut glyphs: Query<&mut Text2d, With<BoxGlyph>>,
) {
    for (mystery_box, children) in &boxes {
        for child in children.iter() {
            let Ok((mut sprite, glyph_children)) = sprites.get_mut(child) else {
                continue;
            };
            sprite.color = mystery_box.state.color();
            for glyph in glyph_children.iter() {
                if let Ok(mut text) = glyphs.get_mut(glyph) {
                    **text = mystery_box.state.glyph().to_string();
                }
            }
        }
    }
}

pub(crate) fn relayout_modal(
    windows: Query<&Window, (With<PrimaryWindow>, Changed<Window>)>,
    mut panels: Query<&mut Node, With<ProjectModalUI>>,
) {
    let Ok(window) = windows.single() else {
        return;
    };
    let layout = ModalLayout::for_width(window.width());
    for mut node in &mut panels {
        *node = layout.node();
    }
}
