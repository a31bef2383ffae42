//! Validation for references from projects to worlds.

use std::collections::HashSet;
use std::fmt;

use super::registry::ProjectCatalog;

/// A validation error with context about what failed.
#[derive(Debug, PartialEq, Eq)]
pub struct ValidationError {
    pub project_id: String,
    pub missing_world: String,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Project '{}' references missing world '{}'",
            self.project_id, self.missing_world
        )
    }
}

/// Check every project points at a world that has a config.
pub fn validate_catalog(
    catalog: &ProjectCatalog,
    known_worlds: &HashSet<String>,
) -> Vec<ValidationError> {
    catalog
        .iter()
        .filter(|p| !known_worlds.contains(&p.world))
        .map(|p| ValidationError {
            project_id: p.id.clone(),
            missing_world: p.world.clone(),
        })
        .collect()
}
