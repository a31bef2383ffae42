//! Interaction domain: persisted mystery box states.
//!
//! The whole map lives under one key and is rewritten on every transition.
//! It is read once when the resource is built.

use bevy::prelude::*;
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::interaction::BoxState;

pub const MYSTERY_BOX_STATES_KEY: &str = "portfolioMysteryBoxStates";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to access '{key}': {source}")]
    Io {
        key: String,
        #[source]
        source: io::Error,
    },
    #[error("persisted state under '{key}' is corrupt: {source}")]
    Corrupt {
        key: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to encode state for '{key}': {source}")]
    Encode {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}

/// String key/value persistence, one record per key.
pub trait KeyValueStorage: Send + Sync + 'static {
    fn read(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn write(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
}

/// One `<key>.json` file per key inside a data directory.
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl KeyValueStorage for FileStorage {
    fn read(&self, key: &str) -> Result<Option<String>, StoreError> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(raw) => Ok(Some(raw)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StoreError::Io {
                key: key.to_string(),
                source,
            }),
        }
    }

    fn write(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        let io_err = |source| StoreError::Io {
            key: key.to_string(),
            source,
        };
        fs::create_dir_all(&self.dir).map_err(io_err)?;
        fs::write(self.path_for(key), value).map_err(io_err)
    }
}

#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    entries: HashMap<String, String>,
}

impl MemoryStorage {
    pub fn with_entry(key: &str, value: &str) -> Self {
        let mut storage = Self::default();
        storage.entries.insert(key.to_string(), value.to_string());
        storage
    }
}

impl KeyValueStorage for MemoryStorage {
    fn read(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.entries.get(key).cloned())
    }

    fn write(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Aggregate counts shown on the debug HUD.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BoxStats {
    pub inactive: usize,
    pub hit: usize,
    pub completed: usize,
}

impl BoxStats {
    pub fn total(&self) -> usize {
        self.inactive + self.hit + self.completed
    }
}

#[derive(Resource)]
pub struct MysteryBoxStates {
    states: BTreeMap<String, BoxState>,
    storage: Box<dyn KeyValueStorage>,
}

impl MysteryBoxStates {
    /// Read the persisted map. A corrupt or unreadable record is logged and
    /// the game starts with every box inactive.
    pub fn load(storage: impl KeyValueStorage) -> Self {
        let states = match read_states(&storage) {
            Ok(states) => states,
            Err(e) => {
                error!("[STATE] {} - starting with every box inactive", e);
                BTreeMap::new()
            }
        };
        info!("[STATE] {} persisted box states loaded", states.len());
        Self {
            states,
            storage: Box::new(storage),
        }
    }

    pub fn get(&self, id: &str) -> BoxState {
        self.states.get(id).copied().unwrap_or_default()
    }

    /// Record a state and write the whole map through.
    pub fn set(&mut self, id: &str, state: BoxState) {
        self.states.insert(id.to_string(), state);
        self.save();
    }

    /// Forget every box and persist the empty map.
    pub fn reset(&mut self) {
        self.states.clear();
        self.save();
        info!("[STATE] Mystery box states cleared");
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, BoxState)> {
        self.states.iter().map(|(id, state)| (id.as_str(), *state))
    }

    /// Counts over `ids`, treating unknown ids as inactive.
    pub fn stats<'a>(&self, ids: impl IntoIterator<Item = &'a str>) -> BoxStats {
        let mut stats = BoxStats::default();
        for id in ids {
            match self.get(id) {
                BoxState::Inactive => stats.inactive += 1,
                BoxState::Hit => stats.hit += 1,
                BoxState::Completed => stats.completed += 1,
            }
        }
        stats
    }

    /// Raw record currently persisted, if any.
    pub fn persisted(&self) -> Option<String> {
        self.storage
            .read(MYSTERY_BOX_STATES_KEY)
            .ok()
            .flatten()
    }

    fn save(&mut self) {
        let encoded = match serde_json::to_string(&self.states) {
            Ok(encoded) => encoded,
            Err(source) => {
                let e = StoreError::Encode {
                    key: MYSTERY_BOX_STATES_KEY.to_string(),
                    source,
                };
                error!("[STATE] {}", e);
                return;
            }
        };
        if let Err(e) = self.storage.write(MYSTERY_BOX_STATES_KEY, &encoded) {
            error!("[STATE] {}", e);
        }
    }
}

impl Default for MysteryBoxStates {
    fn default() -> Self {
        Self::load(MemoryStorage::default())
    }
}

fn read_states(storage: &impl KeyValueStorage) -> Result<BTreeMap<String, BoxState>, StoreError> {
    let Some(raw) = storage.read(MYSTERY_BOX_STATES_KEY)? else {
        return Ok(BTreeMap::new());
    };
    serde_json::from_str(&raw).map_err(|source| StoreError::Corrupt {
        key: MYSTERY_BOX_STATES_KEY.to_string(),
        source,
    })
}
