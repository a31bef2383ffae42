//! Interaction domain: the project modal panel.
//!
//! Right-anchored at half the window width; narrow windows get a full-width
//! bottom sheet instead.

use bevy::prelude::*;

use crate::content::ProjectDef;

/// Windows narrower than this (logical px) use the bottom sheet.
pub const MODAL_BREAKPOINT: f32 = 768.0;

const PANEL_BG: Color = Color::srgba(0.08, 0.09, 0.13, 0.94);
const TITLE_COLOR: Color = Color::srgb(0.98, 0.86, 0.45);
const BODY_COLOR: Color = Color::srgb(0.85, 0.86, 0.9);
const MUTED_COLOR: Color = Color::srgb(0.55, 0.57, 0.65);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalLayout {
    Side,
    BottomSheet,
}

impl ModalLayout {
    pub fn for_width(width: f32) -> Self {
        if width < MODAL_BREAKPOINT {
            ModalLayout::BottomSheet
        } else {
            ModalLayout::Side
        }
    }

    pub fn node(self) -> Node {
        let base = Node {
            position_type: PositionType::Absolute,
            flex_direction: FlexDirection::Column,
            padding: UiRect::all(Val::Px(32.0)),
            row_gap: Val::Px(14.0),
            overflow: Overflow::clip_y(),
            ..default()
        };
        match self {
            ModalLayout::Side => Node {
                right: Val::Px(0.0),
                top: Val::Px(0.0),
                width: Val::Percent(50.0),
                height: Val::Percent(100.0),
                ..base
            },
            ModalLayout::BottomSheet => Node {
                left: Val::Px(0.0),
                bottom: Val::Px(0.0),
                width: Val::Percent(100.0),
                height: Val::Percent(55.0),
                ..base
            },
        }
    }
}

/// Which project, if any, the modal is showing.
#[derive(Resource, Debug, Default)]
pub struct ProjectModal {
    open: Option<String>,
}

impl ProjectModal {
    pub fn is_open(&self) -> bool {
        self.open.is_some()
    }

    pub fn project_id(&self) -> Option<&str> {
        self.open.as_deref()
    }

    /// Returns false if a modal is already showing.
    pub fn open(&mut self, project_id: impl Into<String>) -> bool {
        if self.open.is_some() {
            return false;
        }
        self.open = Some(project_id.into());
        true
    }

    pub fn close(&mut self) -> Option<String> {
        self.open.take()
    }
}

#[derive(Component, Debug)]
pub struct ProjectModalUI;

#[derive(Component, Debug)]
pub struct ModalCloseButton;

pub(crate) fn spawn_modal_panel(
    commands: &mut Commands,
    project_id: &str,
    project: Option<&ProjectDef>,
    layout: ModalLayout,
) {
    let title = project.map_or(project_id, |p| p.title.as_str()).to_string();

    commands
        .spawn((
            ProjectModalUI,
            layout.node(),
            BackgroundColor(PANEL_BG),
            ZIndex(50),
        ))
        .with_children(|parent| {
            parent
                .spawn(Node {
                    flex_direction: FlexDirection::Row,
                    justify_content: JustifyContent::SpaceBetween,
                    align_items: AlignItems::Center,
                    ..default()
                })
                .with_children(|header| {
                    header.spawn((
                        Text::new(title),
                        TextFont {
                            font_size: 32.0,
                            ..default()
                        },
                        TextColor(TITLE_COLOR),
                    ));
                    header
                        .spawn((
                            ModalCloseButton,
                            Button,
                            Node {
                                padding: UiRect::axes(Val::Px(14.0), Val::Px(6.0)),
                                border: UiRect::all(Val::Px(2.0)),
                                ..default()
                            },
                            BackgroundColor(Color::srgb(0.2, 0.2, 0.25)),
                            BorderColor::all(Color::srgb(0.5, 0.5, 0.6)),
                        ))
                        .with_child((
                            Text::new("CLOSE"),
                            TextFont {
                                font_size: 16.0,
                                ..default()
                            },
                            TextColor(BODY_COLOR),
                        ));
                });

            let Some(project) = project else {
                parent.spawn((
                    Text::new("No details available for this project yet."),
                    TextFont {
                        font_size: 18.0,
                        ..default()
                    },
                    TextColor(MUTED_COLOR),
                ));
                return;
            };

            parent.spawn((
                Text::new(project.summary.clone()),
                TextFont {
                    font_size: 20.0,
                    ..default()
                },
                TextColor(BODY_COLOR),
            ));

            if !project.description.is_empty() {
                parent.spawn((
                    Text::new(project.description.clone()),
                    TextFont {
                        font_size: 16.0,
                        ..default()
                    },
                    TextColor(BODY_COLOR),
                ));
            }

            if !project.technologies.is_empty() {
                parent.spawn((
                    Text::new(project.technologies.join("  ·  ")),
                    TextFont {
                        font_size: 14.0,
                        ..default()
                    },
                    TextColor(TITLE_COLOR),
                ));
            }

            let mut footer = Vec::new();
            if let Some(year) = project.year {
                footer.push(year.to_string());
            }
            if let Some(link) = &project.link {
                footer.push(link.clone());
            }
            if !footer.is_empty() {
                parent.spawn((
                    Text::new(footer.join("  |  ")),
                    TextFont {
                        font_size: 14.0,
                        ..default()
                    },
                    TextColor(MUTED_COLOR),
                ));
            }

            parent.spawn((
                Text::new("Press [Esc] or [Space] to continue"),
                TextFont {
                    font_size: 14.0,
                    ..default()
                },
                TextColor(MUTED_COLOR),
                Node {
                    margin: UiRect::top(Val::Auto),
                    ..default()
                },
            ));
        });
}
