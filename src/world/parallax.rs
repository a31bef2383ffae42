//! World domain: the parallax background.
//!
//! The background root sits on the camera's view center and cancels the
//! zoom, so layers scroll with the camera position only. Each layer is
//! shifted by `(-camX * speed, -camY * speed * 0.5)` in screen space.

use bevy::color::Mix;
use bevy::prelude::*;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::physics::{scene_translation, to_scene};
use crate::world::{BackgroundDef, ElementDef, LayerDef, SkyDef, parse_color};

pub const BACKGROUND_Z: f32 = -100.0;
/// Extra sky beyond the viewport so shake and resizes never show an edge.
pub const SKY_SLACK: f32 = 400.0;

const SKY_BANDS: usize = 32;
const GRADIENT_BANDS: usize = 12;
const LAYER_Z_STEP: f32 = 1.0;

#[derive(Debug, Error)]
#[error("background asset missing: {}", .path.display())]
pub struct AssetMissing {
    pub path: PathBuf,
}

#[derive(Component, Debug)]
pub struct ParallaxBackground;

#[derive(Component, Debug)]
pub struct ParallaxLayer {
    pub speed: f32,
    pub z: f32,
}

/// Unit-sized sky, scaled to the viewport every frame.
#[derive(Component, Debug)]
pub struct SkyFill;

/// Screen-space shift of a layer for a camera at `camera`.
pub fn layer_offset(camera: Vec2, speed: f32) -> Vec2 {
    Vec2::new(camera.x * speed, camera.y * speed * 0.5)
}

/// Layer translation relative to the background root (the view center).
pub fn layer_translation(camera: Vec2, speed: f32, viewport: Vec2, z: f32) -> Vec3 {
    scene_translation(-layer_offset(camera, speed) - viewport * 0.5, z)
}

/// Colour at `t` in `0..=1` along evenly spaced stops.
pub fn sample_gradient(stops: &[Color], t: f32) -> Color {
    match stops {
        [] => Color::BLACK,
        [only] => *only,
        _ => {
            let scaled = t.clamp(0.0, 1.0) * (stops.len() - 1) as f32;
            let index = (scaled.floor() as usize).min(stops.len() - 2);
            stops[index].mix(&stops[index + 1], scaled - index as f32)
        }
    }
}

fn parse_stops(colors: &[String]) -> Vec<Color> {
    colors
        .iter()
        .map(|hex| parse_color(hex, Color::srgb(0.5, 0.7, 0.9)))
        .collect()
}

/// Everything needed to turn background data into entities.
pub struct BackgroundBuilder<'a> {
    pub meshes: &'a mut Assets<Mesh>,
    pub materials: &'a mut Assets<ColorMaterial>,
    pub asset_server: &'a AssetServer,
    pub assets_root: &'a Path,
    /// World directory relative to the assets root, e.g. `configs/pine-barrens`
    pub world_dir: PathBuf,
}

impl BackgroundBuilder<'_> {
    /// Spawn the background root with its sky and layers.
    pub fn spawn(&mut self, commands: &mut Commands, background: &BackgroundDef) -> Entity {
        let root = commands
            .spawn((
                ParallaxBackground,
                Transform::from_xyz(0.0, 0.0, BACKGROUND_Z),
                Visibility::default(),
            ))
            .id();

        let sky = self.spawn_sky(commands, &background.sky);
        commands.entity(root).add_child(sky);

        for (index, layer) in background.layers.iter().enumerate() {
            let z = (index + 1) as f32 * LAYER_Z_STEP;
            let layer_entity = self.spawn_layer(commands, layer, z);
            commands.entity(root).add_child(layer_entity);
        }
        root
    }

    fn spawn_sky(&mut self, commands: &mut Commands, sky: &SkyDef) -> Entity {
        let stops = match sky {
            SkyDef::Solid { color } => vec![parse_color(color, Color::srgb(0.53, 0.81, 0.92))],
            SkyDef::Gradient { colors } => parse_stops(colors),
        };
        let bands = if stops.len() > 1 { SKY_BANDS } else { 1 };
        let band_height = 1.0 / bands as f32;

        commands
            .spawn((SkyFill, Transform::default(), Visibility::default()))
            .with_children(|parent| {
                for band in 0..bands {
                    let t = (band as f32 + 0.5) / bands as f32;
                    // Unit square centered on the root, top band first.
                    let y = 0.5 - t;
                    parent.spawn((
                        Sprite::from_color(
                            sample_gradient(&stops, t),
                            // Overlap bands slightly so no seams show.
                            Vec2::new(1.0, band_height * 1.02),
                        ),
                        Transform::from_xyz(0.0, y, 0.0),
                    ));
                }
            })
            .id()
    }

    fn spawn_layer(&mut self, commands: &mut Commands, layer: &LayerDef, z: f32) -> Entity {
        let layer_entity = commands
            .spawn((
                ParallaxLayer {
                    speed: layer.scroll_speed,
                    z,
                },
                Transform::from_xyz(0.0, 0.0, z),
                Visibility::default(),
            ))
            .id();

        for (order, element) in layer.elements.iter().enumerate() {
            // Later elements draw over earlier ones within a layer.
            let depth = order as f32 * 0.001;
            match self.spawn_element(commands, element, depth) {
                Ok(entity) => {
                    commands.entity(layer_entity).add_child(entity);
                }
                Err(e) => warn!("[WORLD] {} - element skipped", e),
            }
        }
        layer_entity
    }

    fn spawn_element(
        &mut self,
        commands: &mut Commands,
        element: &ElementDef,
        depth: f32,
    ) -> Result<Entity, AssetMissing> {
        let entity = match element {
            ElementDef::Gradient {
                x,
                y,
                width,
                height,
                colors,
            } => {
                let stops = parse_stops(colors);
                let center = Vec2::new(x + width / 2.0, y + height / 2.0);
                let band_height = height / GRADIENT_BANDS as f32;
                commands
                    .spawn((
                        Transform::from_translation(scene_translation(center, depth)),
                        Visibility::default(),
                    ))
                    .with_children(|parent| {
                        for band in 0..GRADIENT_BANDS {
                            let t = (band as f32 + 0.5) / GRADIENT_BANDS as f32;
                            parent.spawn((
                                Sprite::from_color(
                                    sample_gradient(&stops, t),
                                    Vec2::new(*width, band_height + 1.0),
                                ),
                                Transform::from_xyz(0.0, height * (0.5 - t), 0.0),
                            ));
                        }
                    })
                    .id()
            }
            ElementDef::Sun {
                x,
                y,
                radius,
                color,
            } => {
                let color = parse_color(color, Color::srgb(1.0, 0.85, 0.4));
                let halo = self.materials.add(color.with_alpha(0.25));
                let disc = self.materials.add(color);
                let halo_mesh = self.meshes.add(Circle::new(radius * 1.4));
                let disc_mesh = self.meshes.add(Circle::new(*radius));
                commands
                    .spawn((
                        Mesh2d(halo_mesh),
                        MeshMaterial2d(halo),
                        Transform::from_translation(scene_translation(Vec2::new(*x, *y), depth)),
                    ))
                    .with_child((
                        Mesh2d(disc_mesh),
                        MeshMaterial2d(disc),
                        Transform::from_xyz(0.0, 0.0, 0.0005),
                    ))
                    .id()
            }
            ElementDef::Cloud { x, y, width, color } => {
                let material = self
                    .materials
                    .add(parse_color(color, Color::WHITE).with_alpha(0.9));
                let puffs = [(-0.25, 0.0, 0.22), (0.0, 0.08, 0.3), (0.27, 0.0, 0.2)];
                let meshes: Vec<_> = puffs
                    .iter()
                    .map(|(_, _, r)| self.meshes.add(Circle::new(width * r)))
                    .collect();
                commands
                    .spawn((
                        Transform::from_translation(scene_translation(Vec2::new(*x, *y), depth)),
                        Visibility::default(),
                    ))
                    .with_children(|parent| {
                        for ((dx, dy, _), mesh) in puffs.iter().zip(meshes) {
                            parent.spawn((
                                Mesh2d(mesh),
                                MeshMaterial2d(material.clone()),
                                Transform::from_xyz(width * dx, width * dy, 0.0),
                            ));
                        }
                    })
                    .id()
            }
            ElementDef::Lighthouse {
                x,
                y,
                height,
                color,
            } => {
                let stripe = parse_color(color, Color::srgb(0.84, 0.27, 0.25));
                let width = height * 0.18;
                let base = Vec2::new(*x, y - height / 2.0);
                commands
                    .spawn((
                        Sprite::from_color(Color::srgb(0.95, 0.95, 0.92), Vec2::new(width, *height)),
                        Transform::from_translation(scene_translation(base, depth)),
                    ))
                    .with_children(|parent| {
                        for i in 0..3 {
                            let offset = height * (0.3 - i as f32 * 0.3);
                            parent.spawn((
                                Sprite::from_color(stripe, Vec2::new(width, height * 0.12)),
                                Transform::from_xyz(0.0, offset, 0.0005),
                            ));
                        }
                        parent.spawn((
                            Sprite::from_color(
                                Color::srgb(1.0, 0.93, 0.55),
                                Vec2::new(width * 1.2, width * 0.8),
                            ),
                            Transform::from_xyz(0.0, height / 2.0 + width * 0.4, 0.0005),
                        ));
                    })
                    .id()
            }
            ElementDef::PixelText {
                x,
                y,
                text,
                size,
                color,
            } => commands
                .spawn((
                    Text2d::new(text.clone()),
                    TextFont {
                        font_size: *size,
                        ..default()
                    },
                    TextColor(parse_color(color, Color::WHITE)),
                    Transform::from_translation(scene_translation(Vec2::new(*x, *y), depth)),
                ))
                .id(),
            ElementDef::Rect {
                x,
                y,
                width,
                height,
                color,
            } => {
                let center = Vec2::new(x + width / 2.0, y + height / 2.0);
                commands
                    .spawn((
                        Sprite::from_color(
                            parse_color(color, Color::srgb(0.3, 0.5, 0.3)),
                            Vec2::new(*width, *height),
                        ),
                        Transform::from_translation(scene_translation(center, depth)),
                    ))
                    .id()
            }
            ElementDef::Image {
                x,
                y,
                width,
                height,
                src,
            } => {
                let asset_path = self.world_dir.join(src);
                let disk_path = self.assets_root.join(&asset_path);
                if !disk_path.is_file() {
                    return Err(AssetMissing { path: disk_path });
                }
                let center = Vec2::new(x + width / 2.0, y + height / 2.0);
                commands
                    .spawn((
                        Sprite {
                            image: self.asset_server.load(asset_path),
                            custom_size: Some(Vec2::new(*width, *height)),
                            ..default()
                        },
                        Transform::from_translation(scene_translation(center, depth)),
                    ))
                    .id()
            }
        };
        Ok(entity)
    }
}

/// Keep the background on the view, sized to it, with layers scrolled.
pub fn place_background(root: &mut Transform, view_center: Vec2, zoom: f32) {
    let unzoom = 1.0 / zoom.max(f32::EPSILON);
    root.translation = to_scene(view_center).extend(BACKGROUND_Z);
    root.scale = Vec3::new(unzoom, unzoom, 1.0);
}
