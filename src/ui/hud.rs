//! UI domain: world name, project progress and mute indicator.

use bevy::ecs::message::MessageReader;
use bevy::prelude::*;

use crate::content::ProjectCatalog;
use crate::effects::AudioSettings;
use crate::interaction::{BoxStats, MysteryBoxStates};
use crate::transition::WorldEnteredEvent;

pub(crate) const HUD_PADDING: f32 = 16.0;

/// Marker for the HUD container
#[derive(Component)]
pub struct HudRoot;

#[derive(Component)]
pub struct WorldNameText;

#[derive(Component)]
pub struct ProjectsFoundText;

#[derive(Component)]
pub struct MuteIndicator;

pub fn projects_found_label(stats: &BoxStats) -> String {
    format!("Projects found: {}/{}", stats.completed, stats.total())
}

pub fn mute_label(settings: &AudioSettings) -> String {
    if settings.muted {
        "Sound off [M]".to_string()
    } else {
        format!("Sound {:.0}% [M]", settings.sfx_volume * 100.0)
    }
}

pub(crate) fn spawn_hud(mut commands: Commands) {
    let text_color = Color::srgb(0.95, 0.93, 0.85);

    commands
        .spawn((
            HudRoot,
            Node {
                position_type: PositionType::Absolute,
                left: Val::Px(HUD_PADDING),
                top: Val::Px(HUD_PADDING),
                flex_direction: FlexDirection::Column,
                row_gap: Val::Px(4.0),
                padding: UiRect::axes(Val::Px(10.0), Val::Px(6.0)),
                ..default()
            },
            BackgroundColor(Color::srgba(0.05, 0.07, 0.12, 0.6)),
            ZIndex(100),
        ))
        .with_children(|parent| {
            parent.spawn((
                WorldNameText,
                Text::new(""),
                TextFont {
                    font_size: 20.0,
                    ..default()
                },
                TextColor(Color::srgb(1.0, 0.85, 0.45)),
            ));
            parent.spawn((
                ProjectsFoundText,
                Text::new(""),
                TextFont {
                    font_size: 14.0,
                    ..default()
                },
                TextColor(text_color),
            ));
            parent.spawn((
                MuteIndicator,
                Text::new(""),
                TextFont {
                    font_size: 12.0,
                    ..default()
                },
                TextColor(text_color.with_alpha(0.7)),
            ));
        });
}

pub(crate) fn update_world_name(
    mut entered: MessageReader<WorldEnteredEvent>,
    mut query: Query<&mut Text, With<WorldNameText>>,
) {
    let Some(event) = entered.read().last() else {
        return;
    };
    for mut text in &mut query {
        **text = event.name.clone();
    }
}

pub(crate) fn update_projects_found(
    catalog: Res<ProjectCatalog>,
    store: Res<MysteryBoxStates>,
    mut query: Query<&mut Text, With<ProjectsFoundText>>,
) {
    if !store.is_changed() && !catalog.is_changed() {
        return;
    }
    let stats = store.stats(catalog.iter().map(|p| p.id.as_str()));
    for mut text in &mut query {
        **text = projects_found_label(&stats);
    }
}

pub(crate) fn update_mute_indicator(
    settings: Res<AudioSettings>,
    mut query: Query<&mut Text, With<MuteIndicator>>,
) {
    if !settings.is_changed() {
        return;
    }
    for mut text in &mut query {
        **text = mute_label(&settings);
    }
}
