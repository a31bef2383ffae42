//! Loader for content files at startup.

use ron::Options;
use std::fs;
use std::path::Path;
use thiserror::Error;

use super::data::*;
use super::registry::ProjectCatalog;

/// Error type for content loading failures.
#[derive(Debug, Error)]
#[error("Failed to load {file}: {message}")]
pub struct ContentLoadError {
    pub file: String,
    pub message: String,
}

/// Create RON options with extensions enabled for more flexible parsing.
fn ron_options() -> Options {
    Options::default().with_default_extension(ron::extensions::Extensions::IMPLICIT_SOME)
}

fn read_file(path: &Path) -> Result<String, ContentLoadError> {
    fs::read_to_string(path).map_err(|e| ContentLoadError {
        file: path.display().to_string(),
        message: format!("IO error: {}", e),
    })
}

/// Parse a JSON DataFile<ProjectDef> into a catalog.
pub fn parse_projects(file: &str, contents: &str) -> Result<ProjectCatalog, ContentLoadError> {
    let data: DataFile<ProjectDef> =
        serde_json::from_str(contents).map_err(|e| ContentLoadError {
            file: file.to_string(),
            message: format!("Parse error: {}", e),
        })?;
    Ok(ProjectCatalog::from_items(data.items))
}

pub fn parse_runtime_settings(
    file: &str,
    contents: &str,
) -> Result<RuntimeSettings, ContentLoadError> {
    ron_options()
        .from_str(contents)
        .map_err(|e| ContentLoadError {
            file: file.to_string(),
            message: format!("Parse error: {}", e),
        })
}

/// Load data/projects.json under `assets_root`.
pub fn load_projects(assets_root: &Path) -> Result<ProjectCatalog, ContentLoadError> {
    let path = assets_root.join("data").join("projects.json");
    let contents = read_file(&path)?;
    parse_projects(&path.display().to_string(), &contents)
}

/// Load data/runtime.ron under `assets_root`.
pub fn load_runtime_settings(assets_root: &Path) -> Result<RuntimeSettings, ContentLoadError> {
    let path = assets_root.join("data").join("runtime.ron");
    let contents = read_file(&path)?;
    parse_runtime_settings(&path.display().to_string(), &contents)
}
