//! UI domain: full-screen notice when no world can be loaded at all.

use bevy::ecs::message::{MessageReader, MessageWriter};
use bevy::prelude::*;

use crate::content::RuntimeSettings;
use crate::transition::{TransitionKind, TransitionRequest, WorldEnteredEvent, WorldLoadFailed};

/// Marker for the load-failure overlay
#[derive(Component)]
pub struct LoadFailureUI;

#[derive(Component)]
pub struct RetryLoadButton;

pub(crate) fn show_load_failure(
    mut commands: Commands,
    mut failures: MessageReader<WorldLoadFailed>,
    existing: Query<Entity, With<LoadFailureUI>>,
) {
    let Some(failure) = failures.read().filter(|f| f.fatal).last() else {
        return;
    };
    if existing.is_empty() {
        spawn_load_failure(&mut commands, &failure.reason);
    }
}

fn spawn_load_failure(commands: &mut Commands, reason: &str) {
    commands
        .spawn((
            LoadFailureUI,
            Node {
                position_type: PositionType::Absolute,
                left: Val::Px(0.0),
                right: Val::Px(0.0),
                top: Val::Px(0.0),
                bottom: Val::Px(0.0),
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                flex_direction: FlexDirection::Column,
                ..default()
            },
            BackgroundColor(Color::srgba(0.0, 0.0, 0.0, 0.85)),
            ZIndex(900),
        ))
        .with_children(|parent| {
            parent.spawn((
                Text::new("The world could not be loaded"),
                TextFont {
                    font_size: 36.0,
                    ..default()
                },
                TextColor(Color::srgb(0.9, 0.4, 0.3)),
                Node {
                    margin: UiRect::bottom(Val::Px(16.0)),
                    ..default()
                },
            ));

            parent.spawn((
                Text::new(reason),
                TextFont {
                    font_size: 14.0,
                    ..default()
                },
                TextColor(Color::srgb(0.6, 0.6, 0.6)),
                Node {
                    max_width: Val::Px(640.0),
                    margin: UiRect::bottom(Val::Px(40.0)),
                    ..default()
                },
            ));

            parent
                .spawn((
                    RetryLoadButton,
                    Button,
                    Node {
                        padding: UiRect::axes(Val::Px(32.0), Val::Px(12.0)),
                        border: UiRect::all(Val::Px(2.0)),
                        ..default()
                    },
                    BackgroundColor(Color::srgb(0.2, 0.2, 0.25)),
                    BorderColor::all(Color::srgb(0.5, 0.5, 0.6)),
                ))
                .with_child((
                    Text::new("RETRY"),
                    TextFont {
                        font_size: 22.0,
                        ..default()
                    },
                    TextColor(Color::srgb(0.9, 0.9, 0.9)),
                ));
        });
}

/// Enter or the button asks for the hub again.
pub(crate) fn handle_retry_load(
    keyboard: Res<ButtonInput<KeyCode>>,
    settings: Res<RuntimeSettings>,
    button_query: Query<&Interaction, (With<RetryLoadButton>, Changed<Interaction>)>,
    overlay: Query<Entity, With<LoadFailureUI>>,
    mut requests: MessageWriter<TransitionRequest>,
) {
    if overlay.is_empty() {
        return;
    }
    let retry = keyboard.just_pressed(KeyCode::Enter)
        || keyboard.just_pressed(KeyCode::NumpadEnter)
        || button_query
            .iter()
            .any(|interaction| *interaction == Interaction::Pressed);
    if retry {
        info!("[UI] Retrying hub '{}'", settings.hub_world);
        requests.write(TransitionRequest::new(
            settings.hub_world.clone(),
            TransitionKind::Initial,
        ));
    }
}

pub(crate) fn clear_load_failure(
    mut commands: Commands,
    mut entered: MessageReader<WorldEnteredEvent>,
    overlay: Query<Entity, With<LoadFailureUI>>,
) {
    if entered.read().count() == 0 {
        return;
    }
    for entity in &overlay {
        commands.entity(entity).despawn();
    }
}
