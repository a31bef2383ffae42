//! World domain: the per-world `config.json` schema.
//!
//! All coordinates are screen space (+y down), top-left anchored.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::content::SpawnCoord;

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WorldConfig {
    pub id: String,
    pub name: String,
    pub dimensions: Dimensions,
    pub spawn_point: SpawnPointDef,
    #[serde(default)]
    pub platforms: Vec<PlatformDef>,
    #[serde(default)]
    pub background: BackgroundDef,
    #[serde(default)]
    pub mystery_boxes: MysteryBoxLayout,
    /// Keyed by door name; ordered so spawning is deterministic
    #[serde(default)]
    pub doors: BTreeMap<String, DoorDef>,
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Dimensions {
    pub width: f32,
    pub height: f32,
    pub ground_level: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SpawnPointDef {
    pub x: f32,
    pub y: f32,
    /// Spawn height used on touch devices
    #[serde(default)]
    pub mobile_y: Option<f32>,
}

impl SpawnPointDef {
    pub fn resolve(&self, touch: bool) -> Vec2 {
        let y = match (touch, self.mobile_y) {
            (true, Some(mobile_y)) => mobile_y,
            _ => self.y,
        };
        Vec2::new(self.x, y)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PlatformKind {
    Ground,
    #[default]
    Platform,
    /// Solid but only drawn while debug mode is on
    Invisible,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlatformDef {
    pub id: String,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    #[serde(rename = "type", default)]
    pub kind: PlatformKind,
    #[serde(default)]
    pub motion: Option<PlatformMotionDef>,
}

/// Sinusoidal back-and-forth around the platform's configured position.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlatformMotionDef {
    #[serde(default)]
    pub dx: f32,
    #[serde(default)]
    pub dy: f32,
    /// Seconds per full cycle
    pub period: f32,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BackgroundDef {
    #[serde(default)]
    pub sky: SkyDef,
    #[serde(default)]
    pub layers: Vec<LayerDef>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum SkyDef {
    Solid { color: String },
    Gradient { colors: Vec<String> },
}

impl Default for SkyDef {
    fn default() -> Self {
        SkyDef::Solid {
            color: "#87ceeb".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LayerDef {
    #[serde(alias = "parallaxSpeed")]
    pub scroll_speed: f32,
    #[serde(default)]
    pub elements: Vec<ElementDef>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum ElementDef {
    /// Horizontal band blended top to bottom
    Gradient {
        #[serde(default)]
        x: f32,
        y: f32,
        #[serde(default = "default_band_width")]
        width: f32,
        height: f32,
        colors: Vec<String>,
    },
    Sun {
        x: f32,
        y: f32,
        radius: f32,
        #[serde(default = "default_sun_color")]
        color: String,
    },
    Cloud {
        x: f32,
        y: f32,
        width: f32,
        #[serde(default = "default_cloud_color")]
        color: String,
    },
    /// Striped tower, `y` is the base
    Lighthouse {
        x: f32,
        y: f32,
        height: f32,
        #[serde(default = "default_lighthouse_color")]
        color: String,
    },
    PixelText {
        x: f32,
        y: f32,
        text: String,
        #[serde(default = "default_text_size")]
        size: f32,
        #[serde(default = "default_text_color")]
        color: String,
    },
    Rect {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        color: String,
    },
    /// Path relative to the world's config directory
    Image {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        src: String,
    },
}

fn default_band_width() -> f32 {
    6000.0
}

fn default_sun_color() -> String {
    "#ffd966".to_string()
}

fn default_cloud_color() -> String {
    "#ffffff".to_string()
}

fn default_lighthouse_color() -> String {
    "#d64541".to_string()
}

fn default_text_size() -> f32 {
    24.0
}

fn default_text_color() -> String {
    "#ffffff".to_string()
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MysteryBoxLayout {
    pub enabled: bool,
    pub start_x: f32,
    pub spacing: f32,
    pub y: f32,
}

impl Default for MysteryBoxLayout {
    fn default() -> Self {
        Self {
            enabled: false,
            start_x: 200.0,
            spacing: 120.0,
            y: 450.0,
        }
    }
}

impl MysteryBoxLayout {
    /// Top-left of the `index`-th box.
    pub fn slot(&self, index: usize) -> Vec2 {
        Vec2::new(self.start_x + index as f32 * self.spacing, self.y)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DoorKind {
    #[default]
    Entry,
    Exit,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DoorDef {
    pub x: f32,
    pub y: f32,
    #[serde(default = "default_door_width")]
    pub width: f32,
    #[serde(default = "default_door_height")]
    pub height: f32,
    pub target_world: String,
    #[serde(default)]
    pub door_type: DoorKind,
    #[serde(default = "default_theme_color")]
    pub theme_color: String,
    pub name: String,
    #[serde(default)]
    pub spawn_point: Option<SpawnCoord>,
}

fn default_door_width() -> f32 {
    60.0
}

fn default_door_height() -> f32 {
    80.0
}

fn default_theme_color() -> String {
    "#8e6c4a".to_string()
}

/// Parse `#rrggbb` / `#rgb` style colours, logging and falling back on error.
pub fn parse_color(hex: &str, fallback: Color) -> Color {
    match Srgba::hex(hex) {
        Ok(color) => color.into(),
        Err(e) => {
            warn!("[WORLD] Bad colour '{}': {:?}", hex, e);
            fallback
        }
    }
}
