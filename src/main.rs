mod camera;
mod character;
mod content;
mod core;
#[cfg(feature = "dev-tools")]
mod debug;
mod effects;
mod input;
mod interaction;
mod physics;
mod transition;
mod ui;
mod world;

use bevy::prelude::*;
use clap::Parser;

use crate::core::LaunchOptions;

fn main() {
    let options = LaunchOptions::parse();
    let asset_root = options.assets.to_string_lossy().into_owned();

    let mut app = App::new();
    app.insert_resource(options)
        .add_plugins(
            DefaultPlugins
                .set(WindowPlugin {
                    primary_window: Some(Window {
                        title: "Shore".to_string(),
                        resolution: (1280, 720).into(),
                        resizable: true,
                        ..default()
                    }),
                    ..default()
                })
                .set(AssetPlugin {
                    file_path: asset_root,
                    ..default()
                }),
        )
        .add_plugins((
            core::CorePlugin,
            content::ContentPlugin,
            input::InputPlugin,
            physics::PhysicsBridgePlugin,
            character::CharacterPlugin,
            camera::CameraPlugin,
            interaction::InteractionPlugin,
            world::WorldPlugin,
            transition::TransitionPlugin,
            effects::EffectsPlugin,
            ui::UiPlugin,
        ));

    #[cfg(feature = "dev-tools")]
    app.add_plugins(debug::DebugPlugin);

    app.run();
}
