//! World domain: building a world from its config and tearing it down.
//!
//! A `WorldRuntime` remembers every body id and root entity it created, so
//! `destroy` leaves nothing of the world behind in the body registry.

use bevy::prelude::*;
use std::f32::consts::TAU;

use crate::content::ProjectCatalog;
use crate::interaction::{
    MysteryBox, MysteryBoxStates, collectible_body_id, mystery_box_body_id, spawn_mystery_box,
};
use crate::physics::{
    Aabb, BodyLabel, BodyRegistry, despawn_body, kinematic_solid, spawn_body, static_sensor,
    static_solid,
};
use crate::world::{
    BackgroundBuilder, Dimensions, Door, DoorLabel, DoorVisual, PlatformKind, SpawnPointDef,
    WorldConfig, parse_color,
};

pub const PLATFORM_Z: f32 = 0.0;
pub const DOOR_Z: f32 = 2.0;
pub const BOUNDARY_THICKNESS: f32 = 50.0;
/// The catch-all floor sits this far below the ground level.
pub const DEEP_FLOOR_DEPTH: f32 = 400.0;

const GROUND_COLOR: Color = Color::srgb(0.78, 0.64, 0.42);
const PLATFORM_COLOR: Color = Color::srgb(0.55, 0.38, 0.24);
const INVISIBLE_COLOR: Color = Color::srgba(1.0, 0.2, 0.8, 0.35);

#[derive(Component, Debug)]
pub struct Platform {
    pub kind: PlatformKind,
}

/// Solid platform that is only drawn while debug mode is on.
#[derive(Component, Debug)]
pub struct InvisiblePlatform;

#[derive(Component, Debug, Clone)]
pub struct MovingPlatform {
    pub amplitude: Vec2,
    pub period: f32,
    pub elapsed: f32,
}

impl MovingPlatform {
    /// Screen-space offset from the configured position at `t` seconds.
    pub fn offset_at(&self, t: f32) -> Vec2 {
        if self.period <= 0.0 {
            return Vec2::ZERO;
        }
        self.amplitude * (TAU * t / self.period).sin()
    }

    /// Screen-space velocity at `t`, the derivative of `offset_at`.
    pub fn velocity_at(&self, t: f32) -> Vec2 {
        if self.period <= 0.0 {
            return Vec2::ZERO;
        }
        self.amplitude * (TAU / self.period) * (TAU * t / self.period).cos()
    }
}

#[derive(Resource, Debug)]
pub struct WorldRuntime {
    pub id: String,
    pub name: String,
    pub dimensions: Dimensions,
    pub spawn_point: SpawnPointDef,
    body_ids: Vec<String>,
    box_ids: Vec<String>,
    entities: Vec<Entity>,
}

impl WorldRuntime {
    pub fn bounds(&self) -> Aabb {
        Aabb::from_top_left(0.0, 0.0, self.dimensions.width, self.dimensions.height)
    }

    pub fn default_spawn(&self, touch: bool) -> Vec2 {
        self.spawn_point.resolve(touch)
    }

    pub fn body_ids(&self) -> &[String] {
        &self.body_ids
    }

    /// Ids of the mystery boxes placed in this world.
    pub fn box_ids(&self) -> &[String] {
        &self.box_ids
    }

    /// Remove every body this world registered (and any live collectible of
    /// its boxes), then despawn its other entities.
    pub fn destroy(&mut self, commands: &mut Commands, registry: &mut BodyRegistry) {
        for box_id in &self.box_ids {
            let collectible = collectible_body_id(box_id);
            if registry.contains(&collectible) {
                despawn_body(commands, registry, &collectible);
            }
        }
        for id in self.body_ids.drain(..) {
            despawn_body(commands, registry, &id);
        }
        for entity in self.entities.drain(..) {
            if let Ok(mut entity_commands) = commands.get_entity(entity) {
                entity_commands.despawn();
            }
        }
        self.box_ids.clear();
        info!("[WORLD] '{}' destroyed", self.id);
    }
}

/// Left, right, ceiling and deep floor, enclosing the world.
pub fn boundary_rects(dimensions: &Dimensions) -> [(&'static str, Aabb); 4] {
    let t = BOUNDARY_THICKNESS;
    let floor_y = dimensions.ground_level + DEEP_FLOOR_DEPTH;
    let wall_height = floor_y + 2.0 * t;
    [
        ("left", Aabb::from_top_left(-t, -t, t, wall_height)),
        (
            "right",
            Aabb::from_top_left(dimensions.width, -t, t, wall_height),
        ),
        (
            "ceiling",
            Aabb::from_top_left(-t, -t, dimensions.width + 2.0 * t, t),
        ),
        (
            "floor",
            Aabb::from_top_left(-t, floor_y, dimensions.width + 2.0 * t, t),
        ),
    ]
}

/// Instantiate background, platforms, boundaries, boxes and doors.
pub fn spawn_world(
    commands: &mut Commands,
    registry: &mut BodyRegistry,
    config: &WorldConfig,
    catalog: &ProjectCatalog,
    store: &MysteryBoxStates,
    background: &mut BackgroundBuilder,
) -> WorldRuntime {
    let mut runtime = WorldRuntime {
        id: config.id.clone(),
        name: config.name.clone(),
        dimensions: config.dimensions,
        spawn_point: config.spawn_point,
        body_ids: Vec::new(),
        box_ids: Vec::new(),
        entities: Vec::new(),
    };
    let world = config.id.as_str();

    runtime
        .entities
        .push(background.spawn(commands, &config.background));

    for platform in &config.platforms {
        let id = format!("platform:{world}:{}", platform.id);
        let rect = Aabb::from_top_left(platform.x, platform.y, platform.width, platform.height);
        let (color, visibility) = match platform.kind {
            PlatformKind::Ground => (GROUND_COLOR, Visibility::Inherited),
            PlatformKind::Platform => (PLATFORM_COLOR, Visibility::Inherited),
            PlatformKind::Invisible => (INVISIBLE_COLOR, Visibility::Hidden),
        };
        let visuals = (
            Platform {
                kind: platform.kind,
            },
            Sprite::from_color(color, rect.size()),
            visibility,
        );

        let spawned = match platform.motion {
            Some(motion) => spawn_body(
                commands,
                registry,
                id.clone(),
                BodyLabel::Platform,
                (
                    visuals,
                    kinematic_solid(rect, PLATFORM_Z),
                    MovingPlatform {
                        amplitude: Vec2::new(motion.dx, motion.dy),
                        period: motion.period,
                        elapsed: 0.0,
                    },
                ),
            ),
            None => spawn_body(
                commands,
                registry,
                id.clone(),
                BodyLabel::Platform,
                (visuals, static_solid(rect, PLATFORM_Z)),
            ),
        };
        if let Some(entity) = spawned {
            if platform.kind == PlatformKind::Invisible {
                commands.entity(entity).insert(InvisiblePlatform);
            }
            runtime.body_ids.push(id);
        }
    }

    for (side, rect) in boundary_rects(&config.dimensions) {
        let id = format!("boundary:{world}:{side}");
        if spawn_body(
            commands,
            registry,
            id.clone(),
            BodyLabel::Boundary,
            static_solid(rect, PLATFORM_Z),
        )
        .is_some()
        {
            runtime.body_ids.push(id);
        }
    }

    let layout = config.mystery_boxes;
    if layout.enabled {
        for (index, project) in catalog.for_world(world).enumerate() {
            let mystery_box =
                MysteryBox::restored(&project.id, layout.slot(index), store.get(&project.id));
            if spawn_mystery_box(commands, registry, mystery_box).is_some() {
                runtime.body_ids.push(mystery_box_body_id(&project.id));
                runtime.box_ids.push(project.id.clone());
            }
        }
    }

    for (key, def) in &config.doors {
        let id = format!("door:{world}:{key}");
        let rect = Aabb::from_top_left(def.x, def.y, def.width, def.height);
        let theme = parse_color(&def.theme_color, Color::srgb(0.56, 0.42, 0.29));
        let door = Door {
            key: key.clone(),
            name: def.name.clone(),
            target_world: def.target_world.clone(),
            kind: def.door_type,
            theme,
            spawn: def.spawn_point.map(|p| Vec2::new(p.x, p.y)),
            rect,
            hover: 0.0,
        };
        let Some(entity) = spawn_body(
            commands,
            registry,
            id.clone(),
            BodyLabel::Door,
            (door, static_sensor(rect, DOOR_Z), Visibility::default()),
        ) else {
            continue;
        };
        commands.entity(entity).with_children(|parent| {
            parent.spawn((
                DoorVisual,
                Sprite::from_color(theme, rect.size()),
                Transform::default(),
            ));
            parent.spawn((
                DoorLabel,
                Text2d::new(def.name.clone()),
                TextFont {
                    font_size: 16.0,
                    ..default()
                },
                TextColor(Color::WHITE),
                Transform::from_xyz(0.0, rect.size().y / 2.0 + 14.0, 0.1),
                Visibility::Hidden,
            ));
        });
        runtime.body_ids.push(id);
    }

    info!(
        "[WORLD] '{}' spawned: {} bodies, {} boxes, {}x{}",
        runtime.id,
        runtime.body_ids.len(),
        runtime.box_ids.len(),
        runtime.dimensions.width,
        runtime.dimensions.height
    );
    runtime
}
