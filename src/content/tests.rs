//! Content domain: tests for the shipped data files and the project catalog.

use std::collections::HashSet;
use std::path::PathBuf;

use super::{
    ProjectCatalog, ProjectDef, RuntimeSettings, load_projects, load_runtime_settings,
    parse_projects, parse_runtime_settings, validate_catalog,
};

fn assets_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("assets")
}

fn project(id: &str, world: &str) -> ProjectDef {
    ProjectDef {
        id: id.to_string(),
        world: world.to_string(),
        title: id.to_uppercase(),
        summary: String::new(),
        description: String::new(),
        technologies: Vec::new(),
        link: None,
        year: None,
    }
}

// -----------------------------------------------------------------------------
// Shipped data tests
// -----------------------------------------------------------------------------

#[test]
fn test_shipped_projects_load() {
    let catalog = load_projects(&assets_root()).expect("projects.json should parse");
    assert!(!catalog.is_empty());
    assert!(catalog.get("tide-tracker").is_some());
}

#[test]
fn test_shipped_projects_reference_shipped_worlds() {
    let catalog = load_projects(&assets_root()).expect("projects.json should parse");
    let worlds: HashSet<String> = [
        "jersey-shore",
        "boardwalk-arcade",
        "pine-barrens",
        "lighthouse-point",
    ]
    .into_iter()
    .map(str::to_string)
    .collect();

    assert!(validate_catalog(&catalog, &worlds).is_empty());
}

#[test]
fn test_shipped_runtime_settings_match_defaults_for_flow() {
    let settings = load_runtime_settings(&assets_root()).expect("runtime.ron should parse");
    let defaults = RuntimeSettings::default();

    assert_eq!(settings.hub_world, "jersey-shore");
    assert_eq!(settings.progression_spawns, defaults.progression_spawns);
    assert_eq!(settings.character.max_jumps, 2);
    assert_eq!(settings.camera.modal_anchor, (0.25, 0.5));
}

// -----------------------------------------------------------------------------
// Parsing tests
// -----------------------------------------------------------------------------

#[test]
fn test_runtime_settings_partial_file_uses_defaults() {
    let settings = parse_runtime_settings("inline", "(character: (max_jumps: 3))")
        .expect("partial settings should parse");

    assert_eq!(settings.character.max_jumps, 3);
    assert_eq!(settings.character.gravity, 1800.0);
    assert_eq!(settings.hub_world, "jersey-shore");
}

#[test]
fn test_projects_parse_error_names_file() {
    let err = parse_projects("broken.json", "{ \"items\": 3 }").unwrap_err();
    assert!(err.to_string().contains("broken.json"));
}

#[test]
fn test_projects_optional_fields_default() {
    let raw = r#"{
        "schema_version": 1,
        "items": [{ "id": "a", "world": "w", "title": "A", "summary": "s" }]
    }"#;
    let catalog = parse_projects("inline", raw).expect("minimal project should parse");
    let a = catalog.get("a").expect("project a");
    assert!(a.technologies.is_empty());
    assert_eq!(a.link, None);
}

// -----------------------------------------------------------------------------
// Catalog tests
// -----------------------------------------------------------------------------

#[test]
fn test_catalog_drops_later_duplicates() {
    let mut second = project("a", "other");
    second.title = "Second".to_string();
    let catalog = ProjectCatalog::from_items(vec![project("a", "w"), second]);

    assert_eq!(catalog.len(), 1);
    assert_eq!(catalog.get("a").map(|p| p.world.as_str()), Some("w"));
}

#[test]
fn test_catalog_for_world_keeps_file_order() {
    let catalog = ProjectCatalog::from_items(vec![
        project("c", "hub"),
        project("x", "elsewhere"),
        project("a", "hub"),
    ]);
    let ids: Vec<&str> = catalog.for_world("hub").map(|p| p.id.as_str()).collect();
    assert_eq!(ids, vec!["c", "a"]);
}

#[test]
fn test_validation_reports_missing_world() {
    let catalog = ProjectCatalog::from_items(vec![project("a", "hub"), project("b", "gone")]);
    let worlds: HashSet<String> = ["hub".to_string()].into_iter().collect();

    let problems = validate_catalog(&catalog, &worlds);
    assert_eq!(problems.len(), 1);
    assert_eq!(problems[0].project_id, "b");
    assert_eq!(problems[0].missing_world, "gone");
}
