//! Interaction domain: spawning boxes and collectibles as registered bodies.

use bevy::prelude::*;

use crate::interaction::{
    BoxGlyph, BoxState, BoxVisual, COLLECTIBLE_SIZE, Collectible, CollectibleVisual, MysteryBox,
};
use crate::physics::{BodyLabel, BodyRegistry, spawn_body, static_sensor, static_solid};

pub const BOX_Z: f32 = 5.0;
pub const COLLECTIBLE_Z: f32 = 6.0;

const COLLECTIBLE_COLOR: Color = Color::srgb(1.0, 0.95, 0.6);
const GLYPH_COLOR: Color = Color::srgb(0.25, 0.15, 0.05);

pub fn mystery_box_body_id(box_id: &str) -> String {
    format!("box:{box_id}")
}

pub fn collectible_body_id(box_id: &str) -> String {
    format!("collectible:{box_id}")
}

/// Spawn a box in whatever state it carries. A box restored as `hit` gets
/// its collectible straight away.
pub fn spawn_mystery_box(
    commands: &mut Commands,
    registry: &mut BodyRegistry,
    mystery_box: MysteryBox,
) -> Option<Entity> {
    let rect = mystery_box.rect;
    let state = mystery_box.state;
    let box_id = mystery_box.id.clone();
    let collectible_origin = mystery_box.collectible_origin();

    let entity = spawn_body(
        commands,
        registry,
        mystery_box_body_id(&box_id),
        BodyLabel::MysteryBox,
        (mystery_box, static_solid(rect, BOX_Z), Visibility::default()),
    )?;

    commands.entity(entity).with_children(|parent| {
        parent
            .spawn((
                BoxVisual,
                Sprite::from_color(state.color(), rect.size()),
                Transform::default(),
            ))
            .with_child((
                BoxGlyph,
                Text2d::new(state.glyph()),
                TextFont {
                    font_size: 26.0,
                    ..default()
                },
                TextColor(GLYPH_COLOR),
                Transform::from_xyz(0.0, 0.0, 0.1),
            ));
    });

    if state == BoxState::Hit {
        spawn_collectible(commands, registry, &box_id, entity, collectible_origin);
    }
    Some(entity)
}

pub fn spawn_collectible(
    commands: &mut Commands,
    registry: &mut BodyRegistry,
    box_id: &str,
    box_entity: Entity,
    top_left: Vec2,
) -> Option<Entity> {
    let collectible = Collectible::new(box_id, box_entity, top_left);
    let rect = collectible.rect;

    let entity = spawn_body(
        commands,
        registry,
        collectible_body_id(box_id),
        BodyLabel::Collectible,
        (
            collectible,
            static_sensor(rect, COLLECTIBLE_Z),
            Visibility::default(),
        ),
    )?;

    commands.entity(entity).with_child((
        CollectibleVisual,
        Sprite::from_color(COLLECTIBLE_COLOR, Vec2::splat(COLLECTIBLE_SIZE)),
        Transform::from_rotation(Quat::from_rotation_z(std::f32::consts::FRAC_PI_4)),
    ));
    Some(entity)
}
