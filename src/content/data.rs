//! Data definitions for content files.
//!
//! `projects.json` holds the portfolio entries revealed by mystery boxes;
//! `runtime.ron` holds tuning for the character, camera and world flow.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::camera::CameraTuning;
use crate::character::CharacterTuning;

// ============================================================================
// Common wrapper for list files with schema_version and items
// ============================================================================

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DataFile<T> {
    pub schema_version: u32,
    pub items: Vec<T>,
}

// ============================================================================
// Projects (projects.json)
// ============================================================================

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ProjectDef {
    pub id: String,
    /// World whose mystery boxes reveal this project
    pub world: String,
    pub title: String,
    pub summary: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub technologies: Vec<String>,
    #[serde(default)]
    pub link: Option<String>,
    #[serde(default)]
    pub year: Option<u16>,
}

// ============================================================================
// Runtime settings (runtime.ron)
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct SpawnCoord {
    pub x: f32,
    pub y: f32,
}

#[derive(Resource, Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RuntimeSettings {
    /// World entered when no route is given and returned to on reset
    pub hub_world: String,
    /// Where the player lands in the hub after leaving each sub-world
    pub progression_spawns: BTreeMap<String, SpawnCoord>,
    pub character: CharacterTuning,
    pub camera: CameraTuning,
}

impl Default for RuntimeSettings {
    fn default() -> Self {
        let progression_spawns = [
            ("boardwalk-arcade", 900.0),
            ("pine-barrens", 1500.0),
            ("lighthouse-point", 2100.0),
        ]
        .into_iter()
        .map(|(id, x)| (id.to_string(), SpawnCoord { x, y: 550.0 }))
        .collect();

        Self {
            hub_world: "jersey-shore".to_string(),
            progression_spawns,
            character: CharacterTuning::default(),
            camera: CameraTuning::default(),
        }
    }
}
