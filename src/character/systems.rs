//! Character domain: spawn, ground sampling, control, death and respawn.

use avian2d::prelude::*;
use bevy::ecs::message::MessageWriter;
use bevy::prelude::*;

use crate::character::{
    AnimationState, AwaitingSpawn, Character, CharacterTuning, DeathEvent, Facing, JumpEvent,
    LandEvent, Player, PlayerVisual, RespawnEvent, RespawnPoint, approach, is_resting_on,
};
use crate::input::{Action, InputState, TouchPad};
use crate::physics::{
    BodyLabel, BodyRegistry, GameLayer, scene_translation, screen_position, screen_velocity,
    spawn_body,
};

/// Body id the player is registered under.
pub const PLAYER_BODY_ID: &str = "player";
pub const PLAYER_Z: f32 = 10.0;

const PLAYER_COLOR: Color = Color::srgb(0.95, 0.55, 0.25);

pub(crate) fn spawn_player(
    mut commands: Commands,
    tuning: Res<CharacterTuning>,
    respawn_point: Res<RespawnPoint>,
    mut registry: ResMut<BodyRegistry>,
) {
    let size = tuning.size();
    let Some(entity) = spawn_body(
        &mut commands,
        &mut registry,
        PLAYER_BODY_ID,
        BodyLabel::Player,
        (
            Player,
            AwaitingSpawn,
            Character::new(tuning.max_jumps),
            RigidBody::Dynamic,
            Collider::rectangle(size.x, size.y),
            LockedAxes::ROTATION_LOCKED,
            GravityScale(0.0),
            Friction::new(0.0),
            Restitution::new(0.0),
            LinearVelocity::ZERO,
            CollisionLayers::new(GameLayer::Player, [GameLayer::Ground, GameLayer::Sensor]),
            Transform::from_translation(scene_translation(respawn_point.spawn, PLAYER_Z)),
            Visibility::Hidden,
        ),
    ) else {
        return;
    };

    commands.entity(entity).with_children(|parent| {
        parent.spawn((
            PlayerVisual,
            Sprite::from_color(PLAYER_COLOR, size),
            Transform::default(),
        ));
    });
    info!("[CHARACTER] Player spawned, waiting for the first world");
}

/// Grounded needs a platform right below the feet and a near-zero vertical
/// speed relative to it. Three rays (both edges and the middle) so ledges
/// still count.
pub(crate) fn detect_ground(
    spatial_query: SpatialQuery,
    tuning: Res<CharacterTuning>,
    mut land_events: MessageWriter<LandEvent>,
    mut query: Query<
        (&Transform, &LinearVelocity, &mut Character),
        (With<Player>, Without<AwaitingSpawn>),
    >,
    supports: Query<&LinearVelocity, Without<Player>>,
) {
    let ground_filter = SpatialQueryFilter::from_mask(GameLayer::Ground);
    let half = tuning.size() * 0.5;
    let inset = (half.x - 2.0).max(0.0);

    for (transform, velocity, mut character) in &mut query {
        if character.is_frozen() {
            continue;
        }
        let feet = transform.translation.truncate() - Vec2::new(0.0, half.y);
        let support = [-inset, 0.0, inset].into_iter().find_map(|dx| {
            spatial_query.cast_ray(
                feet + Vec2::new(dx, 0.0),
                Dir2::NEG_Y,
                tuning.ground_probe,
                true,
                &ground_filter,
            )
        });
        let grounded = support.is_some_and(|hit| {
            let support_vy = supports.get(hit.entity).map_or(0.0, |v| v.y);
            is_resting_on(velocity.y, support_vy, tuning.ground_velocity_epsilon)
        });

        if character.update_grounded(grounded) {
            debug!(
                "[CHARACTER] Landed, jumps restored to {}",
                character.jumps_remaining
            );
            land_events.write(LandEvent {
                position: screen_position(transform),
            });
        }
    }
}

pub(crate) fn apply_horizontal_movement(
    time: Res<Time>,
    input: Res<InputState>,
    tuning: Res<CharacterTuning>,
    mut query: Query<(&mut Character, &mut LinearVelocity), (With<Player>, Without<AwaitingSpawn>)>,
) {
    let dt = time.delta_secs();
    let axis = input.horizontal_axis();

    for (mut character, mut velocity) in &mut query {
        if character.is_frozen() {
            continue;
        }
        velocity.x = if axis.abs() > 0.1 {
            approach(velocity.x, axis * tuning.max_speed, tuning.accel * dt)
        } else {
            approach(velocity.x, 0.0, tuning.decel * dt)
        };
        character.face(axis);
    }
}

/// One impulse per input edge; airborne jumps are allowed while any remain.
pub(crate) fn apply_jump(
    input: Res<InputState>,
    tuning: Res<CharacterTuning>,
    mut jump_events: MessageWriter<JumpEvent>,
    mut query: Query<
        (&Transform, &mut Character, &mut LinearVelocity),
        (With<Player>, Without<AwaitingSpawn>),
    >,
) {
    if !input.was_just_pressed(Action::Jump) {
        return;
    }

    for (transform, mut character, mut velocity) in &mut query {
        if character.is_frozen() {
            continue;
        }
        let Some(kind) = character.try_jump() else {
            debug!("[CHARACTER] Jump ignored, none remaining");
            continue;
        };
        velocity.y = tuning.jump_impulse;
        debug!(
            "[CHARACTER] {:?} jump, {} remaining",
            kind, character.jumps_remaining
        );
        jump_events.write(JumpEvent {
            kind,
            position: screen_position(transform),
        });
    }
}

pub(crate) fn apply_gravity(
    time: Res<Time>,
    tuning: Res<CharacterTuning>,
    mut query: Query<(&Character, &mut LinearVelocity), (With<Player>, Without<AwaitingSpawn>)>,
) {
    let dt = time.delta_secs();

    for (character, mut velocity) in &mut query {
        if character.is_frozen() {
            continue;
        }
        velocity.y = (velocity.y - tuning.gravity * dt).max(-tuning.max_fall_speed);
    }
}

pub(crate) fn update_animation(
    time: Res<Time>,
    tuning: Res<CharacterTuning>,
    mut query: Query<(&LinearVelocity, &mut Character, &Children), With<Player>>,
    mut visuals: Query<(&mut Sprite, &mut Transform), With<PlayerVisual>>,
) {
    for (velocity, mut character, children) in &mut query {
        let screen = screen_velocity(velocity.0);
        let state = AnimationState::from_motion(
            screen.x,
            screen.y,
            character.is_grounded,
            tuning.walk_threshold,
        );
        character.set_animation(state);
        character.tick_animation(time.delta_secs(), tuning.frame_duration);

        for child in children.iter() {
            let Ok((mut sprite, mut transform)) = visuals.get_mut(child) else {
                continue;
            };
            sprite.flip_x = character.facing == Facing::Left;
            transform.scale = squash_for(character.animation, character.animation_frame);
        }
    }
}

/// Visual stretch per animation frame, applied to the sprite child only.
fn squash_for(state: AnimationState, frame: u32) -> Vec3 {
    match state {
        AnimationState::Idle if frame == 1 => Vec3::new(1.02, 0.98, 1.0),
        AnimationState::Walking if frame % 2 == 1 => Vec3::new(0.97, 1.03, 1.0),
        AnimationState::Jumping => Vec3::new(0.92, 1.08, 1.0),
        AnimationState::Falling => Vec3::new(1.05, 0.95, 1.0),
        _ => Vec3::ONE,
    }
}

pub(crate) fn check_death_boundary(
    tuning: Res<CharacterTuning>,
    respawn_point: Res<RespawnPoint>,
    mut death_events: MessageWriter<DeathEvent>,
    mut query: Query<
        (&Transform, &mut Character, &mut LinearVelocity),
        (With<Player>, Without<AwaitingSpawn>),
    >,
) {
    for (transform, mut character, mut velocity) in &mut query {
        let position = screen_position(transform);
        if !character.check_death(position.y, respawn_point.death_y, tuning.death_freeze) {
            continue;
        }
        velocity.0 = Vec2::ZERO;
        info!(
            "[CHARACTER] Fell out of the world at ({:.0}, {:.0}), respawn #{}",
            position.x, position.y, character.respawns
        );
        death_events.write(DeathEvent {
            respawns: character.respawns,
            position,
        });
    }
}

/// Hold a dead character in place, then put it back at the world spawn.
pub(crate) fn tick_respawn_freeze(
    time: Res<Time>,
    respawn_point: Res<RespawnPoint>,
    mut respawn_events: MessageWriter<RespawnEvent>,
    mut query: Query<(&mut Transform, &mut LinearVelocity, &mut Character), With<Player>>,
) {
    for (mut transform, mut velocity, mut character) in &mut query {
        if !character.is_frozen() {
            continue;
        }
        velocity.0 = Vec2::ZERO;
        if character.tick_freeze(time.delta_secs()) {
            respawn_character(
                &mut transform,
                &mut velocity,
                &mut character,
                respawn_point.spawn,
            );
            respawn_events.write(RespawnEvent {
                position: respawn_point.spawn,
            });
        }
    }
}

pub(crate) fn sync_touch_jump(
    mut pad: ResMut<TouchPad>,
    query: Query<&Character, With<Player>>,
) {
    let available = query
        .iter()
        .next()
        .is_none_or(|character| character.jumps_remaining > 0);
    if pad.jump_available != available {
        pad.jump_available = available;
    }
}

/// Teleport to `at` (screen space), zero velocity, restore jumps, idle.
pub fn respawn_character(
    transform: &mut Transform,
    velocity: &mut LinearVelocity,
    character: &mut Character,
    at: Vec2,
) {
    set_character_position(transform, at);
    velocity.0 = Vec2::ZERO;
    character.reset_for_respawn();
}

/// Move the body without touching its velocity or state.
pub fn set_character_position(transform: &mut Transform, at: Vec2) {
    transform.translation = scene_translation(at, transform.translation.z);
}
