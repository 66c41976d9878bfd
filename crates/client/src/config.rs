//! Client configuration read from the environment.
use std::env;
use std::path::PathBuf;
use std::time::Duration;

use arena_content::{ConfigLoader, ContentFactory, RosterLoader};
use arena_core::{CombatConfig, Roster};
use arena_runtime::{PacingConfig, RuntimeConfig};

/// Configuration required to bootstrap the arena client.
#[derive(Clone, Debug, Default)]
pub struct ClientConfig {
    /// Directory holding `saints.json` and an optional `combat.toml`.
    pub data_dir: Option<PathBuf>,
    /// Roster JSON file. Overrides `data_dir`; uses the embedded roster when
    /// neither is set.
    pub roster_path: Option<PathBuf>,
    /// Combat balance TOML file. Uses the embedded table when unset.
    pub combat_config_path: Option<PathBuf>,
    /// Seed for replayable battles.
    pub seed: Option<u64>,
    pub pacing: PacingConfig,
    pub session_id: Option<String>,
    /// Log directory override (default: platform cache directory).
    pub log_dir: Option<PathBuf>,
}

impl ClientConfig {
    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `ARENA_DATA_DIR` - Content directory (default: embedded content)
    /// - `ARENA_ROSTER_PATH` - Roster JSON file (default: embedded roster)
    /// - `ARENA_COMBAT_CONFIG` - Balance TOML file (default: embedded table)
    /// - `ARENA_SEED` - Seed for replayable battles (default: OS entropy)
    /// - `ARENA_MISS_DELAY_MS` - Pause after a miss (default: 700)
    /// - `ARENA_HIT_DELAY_MS` - Pause after a hit (default: 900)
    /// - `ARENA_REMATCH_DELAY_MS` - Pause before a rematch's first turn (default: 300)
    /// - `ARENA_SESSION_ID` - Session identifier for log files (default: timestamp)
    /// - `ARENA_LOG_DIR` - Log directory (default: platform-specific)
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) over an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        config.data_dir = lookup("ARENA_DATA_DIR").map(PathBuf::from);
        config.roster_path = lookup("ARENA_ROSTER_PATH").map(PathBuf::from);
        config.combat_config_path = lookup("ARENA_COMBAT_CONFIG").map(PathBuf::from);
        config.seed = read_parsed(&lookup, "ARENA_SEED");

        if let Some(ms) = read_parsed::<u64>(&lookup, "ARENA_MISS_DELAY_MS") {
            config.pacing.miss_delay = Duration::from_millis(ms);
        }
        if let Some(ms) = read_parsed::<u64>(&lookup, "ARENA_HIT_DELAY_MS") {
            config.pacing.hit_delay = Duration::from_millis(ms);
        }
        if let Some(ms) = read_parsed::<u64>(&lookup, "ARENA_REMATCH_DELAY_MS") {
            config.pacing.rematch_delay = Duration::from_millis(ms);
        }

        config.session_id = lookup("ARENA_SESSION_ID").filter(|id| !id.trim().is_empty());
        config.log_dir = lookup("ARENA_LOG_DIR").map(PathBuf::from);

        config
    }

    /// Loads the balance table and roster.
    ///
    /// Explicit file paths win over the data directory, which wins over the
    /// embedded content.
    pub fn load_content(&self) -> anyhow::Result<(CombatConfig, Roster)> {
        let factory = self.data_dir.as_deref().map(ContentFactory::new);

        let combat = match (&self.combat_config_path, &factory) {
            (Some(path), _) => ConfigLoader::load(path)?,
            (None, Some(factory)) => factory.load_config()?,
            (None, None) => ConfigLoader::builtin()?,
        };
        let roster = match (&self.roster_path, &factory) {
            (Some(path), _) => RosterLoader::load(path, &combat)?,
            (None, Some(factory)) => factory.load_roster(&combat)?,
            (None, None) => RosterLoader::builtin(&combat)?,
        };

        Ok((combat, roster))
    }

    /// Runtime settings derived from this configuration.
    pub fn runtime_config(&self, combat: CombatConfig) -> RuntimeConfig {
        RuntimeConfig {
            combat,
            pacing: self.pacing,
            seed: self.seed,
            ..RuntimeConfig::default()
        }
    }
}

fn read_parsed<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    lookup(key)?.trim().parse().ok()
}
