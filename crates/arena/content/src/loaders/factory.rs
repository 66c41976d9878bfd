//! Content factory for loading arena content from a data directory.

use std::path::{Path, PathBuf};

use arena_core::{CombatConfig, Roster};

use crate::loaders::{ConfigLoader, LoadResult, RosterLoader};

/// Content factory that loads all arena content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── combat.toml   (optional)
/// └── saints.json
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    pub const ROSTER_FILE: &'static str = "saints.json";
    pub const COMBAT_FILE: &'static str = "combat.toml";

    /// Creates a new content factory pointing to a data directory.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Load the balance table from `combat.toml`, falling back to the
    /// built-in table when the file does not exist.
    pub fn load_config(&self) -> LoadResult<CombatConfig> {
        let path = self.data_dir.join(Self::COMBAT_FILE);
        if path.exists() {
            ConfigLoader::load(&path)
        } else {
            ConfigLoader::builtin()
        }
    }

    /// Load the roster from `saints.json`.
    pub fn load_roster(&self, config: &CombatConfig) -> LoadResult<Roster> {
        let path = self.data_dir.join(Self::ROSTER_FILE);
        RosterLoader::load(&path, config)
    }

    /// Load balance table and roster together.
    pub fn load_all(&self) -> LoadResult<(CombatConfig, Roster)> {
        let config = self.load_config()?;
        let roster = self.load_roster(&config)?;
        Ok((config, roster))
    }

    /// Returns the data directory path.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}
