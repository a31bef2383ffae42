//! Physics bridge: tests for the body registry, AABB predicates and coordinates.

use bevy::prelude::*;

use super::{
    Aabb, BodyLabel, BodyRegistry, BodyRegistryError, engine_velocity, screen_velocity, to_scene,
    to_screen,
};

fn entities(count: usize) -> Vec<Entity> {
    let mut world = World::new();
    (0..count).map(|_| world.spawn_empty().id()).collect()
}

// -----------------------------------------------------------------------------
// BodyRegistry tests
// -----------------------------------------------------------------------------

#[test]
fn test_registry_add_and_lookup() {
    let e = entities(1);
    let mut registry = BodyRegistry::default();

    registry
        .add_body("jersey-shore/platform/ground", BodyLabel::Platform, e[0])
        .unwrap();

    assert_eq!(registry.entity("jersey-shore/platform/ground"), Some(e[0]));
    assert_eq!(registry.body_of(e[0]), Some("jersey-shore/platform/ground"));
    assert_eq!(
        registry.label("jersey-shore/platform/ground"),
        Some(BodyLabel::Platform)
    );
    assert_eq!(registry.len(), 1);
}

#[test]
fn test_registry_duplicate_id_rejected() {
    let e = entities(2);
    let mut registry = BodyRegistry::default();
    registry.add_body("box", BodyLabel::MysteryBox, e[0]).unwrap();

    let err = registry
        .add_body("box", BodyLabel::MysteryBox, e[1])
        .unwrap_err();

    assert_eq!(err, BodyRegistryError::DuplicateBody("box".to_string()));
    // The original registration is untouched
    assert_eq!(registry.entity("box"), Some(e[0]));
    assert!(registry.body_of(e[1]).is_none());
}

#[test]
fn test_registry_remove_missing_is_error() {
    let mut registry = BodyRegistry::default();
    assert_eq!(
        registry.remove_body("ghost"),
        Err(BodyRegistryError::MissingBody("ghost".to_string()))
    );
}

#[test]
fn test_registry_remove_clears_both_directions() {
    let e = entities(1);
    let mut registry = BodyRegistry::default();
    registry.add_body("door", BodyLabel::Door, e[0]).unwrap();

    assert_eq!(registry.remove_body("door"), Ok(e[0]));
    assert!(registry.is_empty());
    assert!(registry.body_of(e[0]).is_none());
    // Id can be reused after removal
    registry.add_body("door", BodyLabel::Door, e[0]).unwrap();
}

#[test]
fn test_registry_labelled_filters() {
    let e = entities(3);
    let mut registry = BodyRegistry::default();
    registry.add_body("p1", BodyLabel::Platform, e[0]).unwrap();
    registry.add_body("p2", BodyLabel::Platform, e[1]).unwrap();
    registry.add_body("left", BodyLabel::Boundary, e[2]).unwrap();

    assert_eq!(registry.count(BodyLabel::Platform), 2);
    assert_eq!(registry.count(BodyLabel::Boundary), 1);
    assert_eq!(registry.count(BodyLabel::Door), 0);
}

// -----------------------------------------------------------------------------
// Aabb tests
// -----------------------------------------------------------------------------

#[test]
fn test_aabb_from_top_left_and_center_agree() {
    let a = Aabb::from_top_left(230.0, 450.0, 40.0, 40.0);
    let b = Aabb::from_center(Vec2::new(250.0, 470.0), Vec2::splat(40.0));
    assert_eq!(a, b);
    assert_eq!(a.center(), Vec2::new(250.0, 470.0));
    assert_eq!(a.top(), 450.0);
    assert_eq!(a.bottom(), 490.0);
}

#[test]
fn test_aabb_edge_contact_is_not_overlap() {
    let a = Aabb::from_top_left(0.0, 0.0, 10.0, 10.0);
    let b = Aabb::from_top_left(10.0, 0.0, 10.0, 10.0);
    assert!(!a.overlaps(&b));
    assert!(a.expanded(0.5).overlaps(&b));
}

#[test]
fn test_aabb_overlap_is_symmetric() {
    let a = Aabb::from_top_left(0.0, 0.0, 10.0, 10.0);
    let b = Aabb::from_top_left(5.0, 5.0, 10.0, 10.0);
    assert!(a.overlaps(&b));
    assert!(b.overlaps(&a));
}

#[test]
fn test_aabb_distance() {
    let a = Aabb::from_top_left(0.0, 0.0, 10.0, 10.0);
    assert_eq!(a.distance_to(Vec2::new(5.0, 5.0)), 0.0);
    assert_eq!(a.distance_to(Vec2::new(13.0, 5.0)), 3.0);
    assert!(a.contains(Vec2::new(10.0, 10.0)));
}

// -----------------------------------------------------------------------------
// Coordinate tests
// -----------------------------------------------------------------------------

#[test]
fn test_coordinates_flip_y() {
    let p = Vec2::new(120.0, 550.0);
    assert_eq!(to_scene(p), Vec2::new(120.0, -550.0));
    assert_eq!(to_screen(to_scene(p)), p);
}

#[test]
fn test_upward_screen_velocity_is_positive_engine_velocity() {
    let jump = Vec2::new(0.0, -640.0);
    assert_eq!(engine_velocity(jump), Vec2::new(0.0, 640.0));
    assert_eq!(screen_velocity(engine_velocity(jump)), jump);
}
