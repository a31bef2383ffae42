//! World domain: tests for config parsing, loading, layout and parallax math.

use bevy::prelude::*;
use std::fs;
use std::path::PathBuf;

use super::{
    BOUNDARY_THICKNESS, DEEP_FLOOR_DEPTH, Dimensions, Door, DoorKind, ElementDef, MovingPlatform,
    PlatformKind, SkyDef, WorldLoadError, WorldLoader, boundary_rects, is_valid_world_id,
    layer_offset, layer_translation, parse_world_config, sample_gradient,
};
use crate::physics::Aabb;

const MINIMAL: &str = r##"{
    "id": "cove",
    "name": "Cove",
    "dimensions": { "width": 1200, "height": 720, "groundLevel": 600 },
    "spawnPoint": { "x": 100, "y": 550, "mobileY": 520 },
    "platforms": [
        { "id": "sand", "x": 0, "y": 600, "width": 1200, "height": 120, "type": "ground" },
        { "id": "ledge", "x": 300, "y": 480, "width": 100, "height": 20 },
        { "id": "raft", "x": 500, "y": 480, "width": 100, "height": 20,
          "motion": { "dx": 40, "period": 2 } }
    ],
    "background": {
        "sky": { "type": "gradient", "colors": ["#000000", "#ffffff"] },
        "layers": [
            { "parallaxSpeed": 0.2, "elements": [
                { "type": "pixel-text", "x": 10, "y": 20, "text": "HI" },
                { "type": "sun", "x": 50, "y": 60, "radius": 30 }
            ] }
        ]
    },
    "mysteryBoxes": { "enabled": true, "startX": 230, "spacing": 120, "y": 450 },
    "doors": {
        "home": { "x": 40, "y": 520, "targetWorld": "hub", "doorType": "exit", "name": "Home" }
    }
}"##;

fn shipped_loader() -> WorldLoader {
    WorldLoader::new(PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("assets"))
}

// -----------------------------------------------------------------------------
// Config parsing tests
// -----------------------------------------------------------------------------

#[test]
fn test_parse_minimal_config() {
    let config = parse_world_config("cove", MINIMAL).expect("config should parse");

    assert_eq!(config.dimensions.ground_level, 600.0);
    assert_eq!(config.platforms.len(), 3);
    assert_eq!(config.platforms[0].kind, PlatformKind::Ground);
    assert_eq!(config.platforms[1].kind, PlatformKind::Platform);
    assert_eq!(config.platforms[2].motion.map(|m| m.dx), Some(40.0));
    assert!(matches!(config.background.sky, SkyDef::Gradient { .. }));
    assert_eq!(config.background.layers[0].scroll_speed, 0.2);
    assert!(matches!(
        config.background.layers[0].elements[0],
        ElementDef::PixelText { size, .. } if size == 24.0
    ));
}

#[test]
fn test_door_defaults() {
    let config = parse_world_config("cove", MINIMAL).expect("config should parse");
    let door = &config.doors["home"];

    assert_eq!(door.door_type, DoorKind::Exit);
    assert_eq!((door.width, door.height), (60.0, 80.0));
    assert_eq!(door.spawn_point, None);
}

#[test]
fn test_spawn_point_mobile_override() {
    let config = parse_world_config("cove", MINIMAL).expect("config should parse");

    assert_eq!(config.spawn_point.resolve(false), Vec2::new(100.0, 550.0));
    assert_eq!(config.spawn_point.resolve(true), Vec2::new(100.0, 520.0));
}

#[test]
fn test_mystery_box_slots() {
    let config = parse_world_config("cove", MINIMAL).expect("config should parse");

    assert_eq!(config.mystery_boxes.slot(0), Vec2::new(230.0, 450.0));
    assert_eq!(config.mystery_boxes.slot(2), Vec2::new(470.0, 450.0));
}

#[test]
fn test_parse_rejects_id_mismatch() {
    let err = parse_world_config("other", MINIMAL).unwrap_err();
    assert!(matches!(err, WorldLoadError::IdMismatch { .. }));
    assert_eq!(err.world_id(), "other");
}

#[test]
fn test_parse_rejects_garbage() {
    let err = parse_world_config("cove", "{ nope").unwrap_err();
    assert!(matches!(err, WorldLoadError::Invalid { .. }));
}

// -----------------------------------------------------------------------------
// Loader tests
// -----------------------------------------------------------------------------

#[test]
fn test_loader_missing_world_not_found() {
    let dir = tempfile::tempdir().expect("tempdir");
    let err = WorldLoader::new(dir.path()).load("nowhere").unwrap_err();
    assert!(matches!(err, WorldLoadError::NotFound { .. }));
}

#[test]
fn test_loader_reads_config_dir() {
    let dir = tempfile::tempdir().expect("tempdir");
    let world_dir = dir.path().join("configs").join("cove");
    fs::create_dir_all(&world_dir).expect("create world dir");
    fs::write(world_dir.join("config.json"), MINIMAL).expect("write config");

    let config = WorldLoader::new(dir.path()).load("cove").expect("load cove");
    assert_eq!(config.name, "Cove");
}

#[test]
fn test_loader_rejects_path_like_ids() {
    let loader = shipped_loader();
    assert!(matches!(
        loader.load("../data"),
        Err(WorldLoadError::InvalidId(_))
    ));
    assert!(is_valid_world_id("pine-barrens"));
    assert!(!is_valid_world_id(""));
    assert!(!is_valid_world_id("Pine"));
}

#[test]
fn test_shipped_worlds_load() {
    let loader = shipped_loader();
    for id in [
        "jersey-shore",
        "boardwalk-arcade",
        "pine-barrens",
        "lighthouse-point",
    ] {
        let config = loader.load(id).unwrap_or_else(|e| panic!("{id}: {e}"));
        assert_eq!(config.id, id);
    }
}

#[test]
fn test_hub_layout() {
    let hub = shipped_loader().load("jersey-shore").expect("hub");

    let arcade = &hub.doors["arcade"];
    assert_eq!((arcade.x, arcade.y), (800.0, 520.0));
    assert_eq!(arcade.target_world, "boardwalk-arcade");

    assert!(hub.mystery_boxes.enabled);
    assert_eq!(hub.mystery_boxes.slot(0), Vec2::new(230.0, 450.0));
}

#[test]
fn test_sub_worlds_exit_to_hub() {
    let loader = shipped_loader();
    for id in ["boardwalk-arcade", "pine-barrens", "lighthouse-point"] {
        let config = loader.load(id).expect("sub-world");
        assert!(
            config
                .doors
                .values()
                .any(|d| d.door_type == DoorKind::Exit && d.target_world == "jersey-shore"),
            "{id} has no exit to the hub"
        );
    }
}

// -----------------------------------------------------------------------------
// Layout tests
// -----------------------------------------------------------------------------

#[test]
fn test_boundaries_enclose_world() {
    let dimensions = Dimensions {
        width: 1200.0,
        height: 720.0,
        ground_level: 600.0,
    };
    let rects = boundary_rects(&dimensions);
    let by_side = |side: &str| {
        rects
            .iter()
            .find(|(name, _)| *name == side)
            .map(|(_, rect)| *rect)
            .expect("side")
    };

    assert_eq!(by_side("left").max.x, 0.0);
    assert_eq!(by_side("right").min.x, 1200.0);
    assert_eq!(by_side("ceiling").max.y, 0.0);
    assert_eq!(by_side("floor").min.y, 600.0 + DEEP_FLOOR_DEPTH);
    assert_eq!(by_side("floor").size().y, BOUNDARY_THICKNESS);
    // Walls reach the floor so nothing slips out at the corners.
    assert!(by_side("left").max.y >= by_side("floor").max.y);
}

#[test]
fn test_moving_platform_offset_and_velocity() {
    let platform = MovingPlatform {
        amplitude: Vec2::new(40.0, 0.0),
        period: 2.0,
        elapsed: 0.0,
    };
    assert!(platform.offset_at(0.0).length() < 1e-4);
    assert!((platform.offset_at(0.5).x - 40.0).abs() < 1e-3);
    assert!(platform.velocity_at(0.5).x.abs() < 1e-3);

    let still = MovingPlatform {
        period: 0.0,
        ..platform
    };
    assert_eq!(still.velocity_at(1.0), Vec2::ZERO);
}

// -----------------------------------------------------------------------------
// Door tests
// -----------------------------------------------------------------------------

fn door_at(x: f32, y: f32) -> Door {
    Door {
        key: "arcade".to_string(),
        name: "Arcade".to_string(),
        target_world: "boardwalk-arcade".to_string(),
        kind: DoorKind::Entry,
        theme: Color::WHITE,
        spawn: None,
        rect: Aabb::from_top_left(x, y, 60.0, 80.0),
        hover: 0.0,
    }
}

#[test]
fn test_door_proximity_fades_with_distance() {
    let door = door_at(800.0, 520.0);
    assert_eq!(door.proximity(Vec2::new(830.0, 560.0)), 1.0);
    assert!((door.proximity(Vec2::new(920.0, 560.0)) - 0.5).abs() < 1e-4);
    assert_eq!(door.proximity(Vec2::new(1200.0, 560.0)), 0.0);
}

#[test]
fn test_door_overlap_with_player() {
    let door = door_at(800.0, 520.0);
    assert!(door.overlaps(&Aabb::from_top_left(840.0, 556.0, 28.0, 44.0)));
    assert!(!door.overlaps(&Aabb::from_top_left(886.0, 528.0, 28.0, 44.0)));
}

// -----------------------------------------------------------------------------
// Parallax tests
// -----------------------------------------------------------------------------

#[test]
fn test_layer_offset_halves_vertical() {
    assert_eq!(
        layer_offset(Vec2::new(1000.0, 200.0), 0.5),
        Vec2::new(500.0, 50.0)
    );
    assert_eq!(layer_offset(Vec2::new(1000.0, 200.0), 0.0), Vec2::ZERO);
}

#[test]
fn test_layer_translation_places_origin_at_view_top_left() {
    let viewport = Vec2::new(800.0, 600.0);
    let translation = layer_translation(Vec2::ZERO, 0.3, viewport, 2.0);
    // Screen (0,0) is half a viewport up-left of the view center.
    assert_eq!(translation, Vec3::new(-400.0, 300.0, 2.0));
}

#[test]
fn test_sample_gradient_endpoints() {
    let stops = [Color::BLACK, Color::WHITE];
    assert_eq!(sample_gradient(&stops, 0.0), Color::BLACK);
    assert_eq!(sample_gradient(&stops, 1.0), Color::WHITE);
    assert_eq!(sample_gradient(&[Color::WHITE], 0.7), Color::WHITE);
}
