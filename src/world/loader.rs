//! World domain: reading world configs from `configs/<id>/config.json`.

use bevy::prelude::*;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::world::WorldConfig;

#[derive(Debug, Error)]
pub enum WorldLoadError {
    #[error("world '{id}' not found at {}: {source}", .path.display())]
    NotFound {
        id: String,
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("world '{id}' has an invalid config: {source}")]
    Invalid {
        id: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("'{0}' is not a valid world id")]
    InvalidId(String),
    #[error("config for '{expected}' declares id '{found}'")]
    IdMismatch { expected: String, found: String },
}

impl WorldLoadError {
    /// Every failure means the requested world cannot be entered.
    pub fn world_id(&self) -> &str {
        match self {
            WorldLoadError::NotFound { id, .. } | WorldLoadError::Invalid { id, .. } => id,
            WorldLoadError::InvalidId(id) => id,
            WorldLoadError::IdMismatch { expected, .. } => expected,
        }
    }
}

#[derive(Resource, Debug, Clone)]
pub struct WorldLoader {
    assets_root: PathBuf,
}

impl WorldLoader {
    pub fn new(assets_root: impl AsRef<Path>) -> Self {
        Self {
            assets_root: assets_root.as_ref().to_path_buf(),
        }
    }

    pub fn assets_root(&self) -> &Path {
        &self.assets_root
    }

    /// Directory holding a world's config and its background images.
    pub fn world_dir(&self, id: &str) -> PathBuf {
        self.assets_root.join("configs").join(id)
    }

    pub fn config_path(&self, id: &str) -> PathBuf {
        self.world_dir(id).join("config.json")
    }

    pub fn load(&self, id: &str) -> Result<WorldConfig, WorldLoadError> {
        if !is_valid_world_id(id) {
            return Err(WorldLoadError::InvalidId(id.to_string()));
        }
        let path = self.config_path(id);
        let raw = fs::read_to_string(&path).map_err(|source| WorldLoadError::NotFound {
            id: id.to_string(),
            path: path.clone(),
            source,
        })?;
        parse_world_config(id, &raw)
    }
}

pub fn parse_world_config(id: &str, raw: &str) -> Result<WorldConfig, WorldLoadError> {
    let config: WorldConfig =
        serde_json::from_str(raw).map_err(|source| WorldLoadError::Invalid {
            id: id.to_string(),
            source,
        })?;
    if config.id != id {
        return Err(WorldLoadError::IdMismatch {
            expected: id.to_string(),
            found: config.id,
        });
    }
    Ok(config)
}

/// Lowercase ascii, digits, `-` and `_` only, so an id from the command line
/// can never leave the configs directory.
pub fn is_valid_world_id(id: &str) -> bool {
    !id.is_empty()
        && id
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' || c == '_')
}
